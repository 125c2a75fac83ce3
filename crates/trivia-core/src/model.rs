//! Core data model types for trivia.
//!
//! These are the fundamental types the whole quiz uses to represent
//! questions, difficulty tiers, quiz progress and recorded scores.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Difficulty tiers, ordered `Easy < Medium < Hard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers from easiest to hardest.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The next tier up, if any.
    pub fn higher(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Hard),
            Difficulty::Hard => None,
        }
    }

    /// The next tier down, if any.
    pub fn lower(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(Difficulty::Easy),
            Difficulty::Hard => Some(Difficulty::Medium),
        }
    }

    /// Tiers to try when this one is exhausted: nearest first, lower before
    /// higher on a tie.
    pub fn fallback_order(self) -> [Difficulty; 2] {
        match self {
            Difficulty::Easy => [Difficulty::Medium, Difficulty::Hard],
            Difficulty::Medium => [Difficulty::Easy, Difficulty::Hard],
            Difficulty::Hard => [Difficulty::Medium, Difficulty::Easy],
        }
    }

    /// The lowercase name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A single multiple-choice trivia question.
///
/// Immutable once constructed; the correct answer is always one of the
/// choices, including when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    prompt: String,
    choices: Vec<String>,
    correct_answer: String,
    difficulty: Difficulty,
    category: Option<String>,
}

impl Question {
    /// Build a question from its prompt, correct answer and distractors.
    ///
    /// Choices are the incorrect answers followed by the correct one.
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
        difficulty: Difficulty,
    ) -> Self {
        let correct_answer = correct_answer.into();
        let mut choices = incorrect_answers;
        choices.push(correct_answer.clone());
        Self {
            prompt: prompt.into(),
            choices,
            correct_answer,
            difficulty,
            category: None,
        }
    }

    /// Attach the source category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Shuffle the presentation order of the choices.
    pub fn shuffled<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.choices.shuffle(rng);
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Exact, case-sensitive comparison with no trimming.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}

#[derive(Deserialize)]
struct RawQuestion {
    prompt: String,
    choices: Vec<String>,
    correct_answer: String,
    difficulty: Difficulty,
    #[serde(default)]
    category: Option<String>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = String;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        if !raw.choices.contains(&raw.correct_answer) {
            return Err(format!(
                "correct answer {:?} is not among the choices",
                raw.correct_answer
            ));
        }
        Ok(Self {
            prompt: raw.prompt,
            choices: raw.choices,
            correct_answer: raw.correct_answer,
            difficulty: raw.difficulty,
            category: raw.category,
        })
    }
}

/// Streak and tier state owned by the difficulty controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyState {
    pub current_tier: Difficulty,
    pub consecutive_correct: u32,
    pub consecutive_incorrect: u32,
}

impl DifficultyState {
    pub fn new(start: Difficulty) -> Self {
        Self {
            current_tier: start,
            consecutive_correct: 0,
            consecutive_incorrect: 0,
        }
    }
}

impl Default for DifficultyState {
    fn default() -> Self {
        Self::new(Difficulty::Easy)
    }
}

/// Running tally of one quiz.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizSession {
    pub score: u32,
    pub questions_asked: u32,
    pub current_question: Option<Question>,
    pub terminal: bool,
}

/// Outcome of scoring one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    pub correct_answer: String,
}

/// Final tally of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub score: u32,
    pub total: u32,
}

/// What the engine emits after `start` or `submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The next question awaiting an answer.
    Question(Question),
    /// The quiz is over.
    Done(Completion),
}

impl Step {
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    pub fn question(&self) -> Option<&Question> {
        match self {
            Step::Question(q) => Some(q),
            Step::Done(_) => None,
        }
    }
}

/// Result of a single `submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub feedback: Feedback,
    pub next: Step,
}

/// One recorded quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub username: String,
    pub score: u32,
    pub total: u32,
    pub timestamp: DateTime<Utc>,
}
