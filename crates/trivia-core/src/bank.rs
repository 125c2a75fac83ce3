//! Fetched questions partitioned into per-difficulty FIFO queues.

use std::collections::VecDeque;

use crate::model::{Difficulty, Question};

/// Three FIFO queues of questions, one per difficulty tier.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    easy: VecDeque<Question>,
    medium: VecDeque<Question>,
    hard: VecDeque<Question>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bank from per-tier question lists, preserving their order.
    pub fn from_tiers(easy: Vec<Question>, medium: Vec<Question>, hard: Vec<Question>) -> Self {
        let mut bank = Self::new();
        bank.populate(Difficulty::Easy, easy);
        bank.populate(Difficulty::Medium, medium);
        bank.populate(Difficulty::Hard, hard);
        bank
    }

    /// Append questions to the back of a tier's queue.
    pub fn populate(&mut self, tier: Difficulty, questions: Vec<Question>) {
        self.queue_mut(tier).extend(questions);
    }

    /// Pop the next question, preferring `preferred`.
    ///
    /// Falls back to the other tiers in [`Difficulty::fallback_order`] when
    /// the preferred queue is empty. Returns the tier the question actually
    /// came from so the caller can switch to it, or `None` once every tier
    /// is exhausted.
    pub fn dequeue(&mut self, preferred: Difficulty) -> Option<(Question, Difficulty)> {
        std::iter::once(preferred)
            .chain(preferred.fallback_order())
            .find_map(|tier| self.queue_mut(tier).pop_front().map(|q| (q, tier)))
    }

    /// Whether a tier still has questions.
    pub fn has_questions(&self, tier: Difficulty) -> bool {
        !self.queue(tier).is_empty()
    }

    /// Questions left in one tier.
    pub fn remaining(&self, tier: Difficulty) -> usize {
        self.queue(tier).len()
    }

    /// Questions left across all tiers.
    pub fn len(&self) -> usize {
        self.easy.len() + self.medium.len() + self.hard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn queue(&self, tier: Difficulty) -> &VecDeque<Question> {
        match tier {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn queue_mut(&mut self, tier: Difficulty) -> &mut VecDeque<Question> {
        match tier {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(prompt: &str, tier: Difficulty) -> Question {
        Question::new(prompt, "yes", vec!["no".into()], tier)
    }

    #[test]
    fn preferred_tier_is_fifo() {
        let mut bank = QuestionBank::from_tiers(
            vec![q("e1", Difficulty::Easy), q("e2", Difficulty::Easy)],
            vec![q("m1", Difficulty::Medium)],
            vec![],
        );

        let (first, tier) = bank.dequeue(Difficulty::Easy).unwrap();
        assert_eq!(first.prompt(), "e1");
        assert_eq!(tier, Difficulty::Easy);
        let (second, _) = bank.dequeue(Difficulty::Easy).unwrap();
        assert_eq!(second.prompt(), "e2");
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn falls_back_to_nearest_tier() {
        let mut bank = QuestionBank::from_tiers(
            vec![q("e1", Difficulty::Easy)],
            vec![q("m1", Difficulty::Medium)],
            vec![],
        );

        let (question, tier) = bank.dequeue(Difficulty::Hard).unwrap();
        assert_eq!(question.prompt(), "m1");
        assert_eq!(tier, Difficulty::Medium);

        let (question, tier) = bank.dequeue(Difficulty::Hard).unwrap();
        assert_eq!(question.prompt(), "e1");
        assert_eq!(tier, Difficulty::Easy);
    }

    #[test]
    fn medium_prefers_easy_over_hard() {
        let mut bank = QuestionBank::from_tiers(
            vec![q("e1", Difficulty::Easy)],
            vec![],
            vec![q("h1", Difficulty::Hard)],
        );
        let (_, tier) = bank.dequeue(Difficulty::Medium).unwrap();
        assert_eq!(tier, Difficulty::Easy);
    }

    #[test]
    fn empty_bank_yields_none() {
        let mut bank = QuestionBank::new();
        assert!(bank.is_empty());
        assert!(bank.dequeue(Difficulty::Medium).is_none());
    }

    #[test]
    fn populate_appends_in_order() {
        let mut bank = QuestionBank::new();
        bank.populate(Difficulty::Hard, vec![q("h1", Difficulty::Hard)]);
        bank.populate(Difficulty::Hard, vec![q("h2", Difficulty::Hard)]);
        assert!(bank.has_questions(Difficulty::Hard));
        assert!(!bank.has_questions(Difficulty::Easy));
        assert_eq!(bank.remaining(Difficulty::Hard), 2);
        assert_eq!(bank.dequeue(Difficulty::Hard).unwrap().0.prompt(), "h1");
    }
}
