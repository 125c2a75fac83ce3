//! Mock source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use trivia_core::error::FetchError;
use trivia_core::model::{Difficulty, Question};
use trivia_core::traits::QuestionSource;

/// A mock question source for exercising the quiz without network access.
///
/// Serves fixed per-tier question lists. Tiers can be set to fail their
/// first few calls with a rate limit to exercise the retry path.
pub struct MockSource {
    /// Questions served per tier.
    tiers: HashMap<Difficulty, Vec<Question>>,
    /// Remaining rate-limited replies per tier.
    rate_limited: Mutex<HashMap<Difficulty, u32>>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last (difficulty, amount) requested.
    last_request: Mutex<Option<(Difficulty, u32)>>,
}

impl MockSource {
    /// Create a mock serving the given per-tier questions.
    pub fn new(tiers: HashMap<Difficulty, Vec<Question>>) -> Self {
        Self {
            tiers,
            rate_limited: Mutex::new(HashMap::new()),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock with `per_tier` generated questions in every tier.
    ///
    /// The correct answer to every question is `"right"`.
    pub fn generated(per_tier: usize) -> Self {
        let tiers = Difficulty::ALL
            .into_iter()
            .map(|tier| {
                let questions = (0..per_tier)
                    .map(|i| {
                        Question::new(
                            format!("{tier} question {}", i + 1),
                            "right",
                            vec!["wrong".into(), "close".into(), "far off".into()],
                            tier,
                        )
                    })
                    .collect::<Vec<_>>();
                (tier, questions)
            })
            .collect();
        Self::new(tiers)
    }

    /// Replace one tier's questions.
    pub fn with_tier(mut self, tier: Difficulty, questions: Vec<Question>) -> Self {
        self.tiers.insert(tier, questions);
        self
    }

    /// Make the first `times` calls for `tier` fail with a rate limit.
    pub fn rate_limited_first(self, tier: Difficulty, times: u32) -> Self {
        self.rate_limited.lock().unwrap().insert(tier, times);
        self
    }

    /// Get the number of calls made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this source.
    pub fn last_request(&self) -> Option<(Difficulty, u32)> {
        *self.last_request.lock().unwrap()
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(
        &self,
        difficulty: Difficulty,
        amount: u32,
    ) -> Result<Vec<Question>, FetchError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some((difficulty, amount));

        if let Some(remaining) = self.rate_limited.lock().unwrap().get_mut(&difficulty) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(FetchError::RateLimited {
                    retry_after_ms: Some(0),
                });
            }
        }

        match self.tiers.get(&difficulty) {
            Some(questions) if !questions.is_empty() => {
                Ok(questions.iter().take(amount as usize).cloned().collect())
            }
            _ => Err(FetchError::NoResults),
        }
    }
}
