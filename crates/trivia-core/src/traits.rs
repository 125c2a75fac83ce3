//! Trait seams between the engine and the outside world.
//!
//! `QuestionSource` is implemented by the `trivia-source` crate; the
//! `Presentation` trait is implemented by whatever hosts the quiz (the
//! terminal front end in `trivia-cli`, or a recording double in tests).

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::{Difficulty, Question};

// ---------------------------------------------------------------------------
// Question source
// ---------------------------------------------------------------------------

/// A backend that can fetch questions for one difficulty tier.
///
/// Implementations make exactly one attempt per call; retry and backoff
/// belong to [`crate::fetch::fetch_tier`].
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "opentdb").
    fn name(&self) -> &str;

    /// Fetch up to `amount` questions of the given difficulty.
    ///
    /// An empty `Ok` is treated by the retry loop like
    /// [`FetchError::NoResults`].
    async fn fetch(&self, difficulty: Difficulty, amount: u32)
        -> Result<Vec<Question>, FetchError>;
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Display operations the quiz calls into.
pub trait Presentation {
    fn show_question(&mut self, question: &Question);
    fn show_feedback(&mut self, correct: bool, correct_answer: &str);
    fn show_completion(&mut self, score: u32, total: u32);
    fn show_error(&mut self, message: &str);
    fn show_loading(&mut self, loading: bool);
}

/// Presentation that discards everything.
pub struct NoopPresentation;

impl Presentation for NoopPresentation {
    fn show_question(&mut self, _: &Question) {}
    fn show_feedback(&mut self, _: bool, _: &str) {}
    fn show_completion(&mut self, _: u32, _: u32) {}
    fn show_error(&mut self, _: &str) {}
    fn show_loading(&mut self, _: bool) {}
}
