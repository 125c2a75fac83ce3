//! Streak tracking and tier promotion/demotion.

use crate::bank::QuestionBank;
use crate::model::{Difficulty, DifficultyState};

/// Consecutive same-outcome answers needed to change tier.
pub const STREAK_THRESHOLD: u32 = 2;

/// Moves the active tier up after a run of correct answers and down after a
/// run of incorrect ones.
#[derive(Debug, Clone, Default)]
pub struct DifficultyController {
    state: DifficultyState,
}

impl DifficultyController {
    pub fn new(start: Difficulty) -> Self {
        Self {
            state: DifficultyState::new(start),
        }
    }

    pub fn current_tier(&self) -> Difficulty {
        self.state.current_tier
    }

    pub fn state(&self) -> DifficultyState {
        self.state
    }

    /// Record an answer and move tiers if a streak hit the threshold.
    ///
    /// A tier change only happens when the adjacent tier still has
    /// questions in `bank`; the streak resets at the threshold regardless.
    pub fn adjust(&mut self, was_correct: bool, bank: &QuestionBank) {
        let state = &mut self.state;
        if was_correct {
            state.consecutive_correct += 1;
            state.consecutive_incorrect = 0;
            if state.consecutive_correct >= STREAK_THRESHOLD {
                state.consecutive_correct = 0;
                let next = state.current_tier.higher().filter(|t| bank.has_questions(*t));
                if let Some(next) = next {
                    tracing::debug!(from = %state.current_tier, to = %next, "promoting");
                    state.current_tier = next;
                }
            }
        } else {
            state.consecutive_incorrect += 1;
            state.consecutive_correct = 0;
            if state.consecutive_incorrect >= STREAK_THRESHOLD {
                state.consecutive_incorrect = 0;
                let next = state.current_tier.lower().filter(|t| bank.has_questions(*t));
                if let Some(next) = next {
                    tracing::debug!(from = %state.current_tier, to = %next, "demoting");
                    state.current_tier = next;
                }
            }
        }
    }

    /// Follow a fallback the bank made. Streaks are kept.
    pub fn switch_to(&mut self, tier: Difficulty) {
        if tier != self.state.current_tier {
            tracing::debug!(from = %self.state.current_tier, to = %tier, "tier exhausted, falling back");
            self.state.current_tier = tier;
        }
    }
}
