//! Retrying tier loader.
//!
//! Wraps single-attempt [`QuestionSource`] calls with exponential backoff,
//! honours rate-limit hints, and fetches all three tiers concurrently to
//! fill a [`QuestionBank`].

use std::time::Duration;

use rand::Rng;

use crate::bank::QuestionBank;
use crate::error::{FetchError, QuizError};
use crate::model::{Difficulty, Question};
use crate::traits::QuestionSource;

/// Attempt ceiling and backoff schedule for one tier.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Backoff base; attempt `n` waits `base_delay * 2^n` plus extra.
    pub base_delay: Duration,
    /// Upper bound of the random jitter added after non-rate-limit failures.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(2000),
            max_jitter: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// How long to wait after `attempt` (0-based) failed with `error`.
    pub fn delay_for(&self, attempt: u32, error: &FetchError) -> Duration {
        let backoff = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
        let extra = match error.retry_after_ms() {
            Some(ms) => Duration::from_millis(ms),
            None => self.jitter(),
        };
        backoff.saturating_add(extra)
    }

    fn jitter(&self) -> Duration {
        let max = self.max_jitter.as_millis() as u64;
        if max == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..max))
    }
}

/// Fetch one tier, retrying per `policy`.
///
/// Never fails: once every attempt is spent the tier is reported empty, which
/// callers treat as "no questions at this difficulty".
pub async fn fetch_tier(
    source: &dyn QuestionSource,
    difficulty: Difficulty,
    amount: u32,
    policy: &RetryPolicy,
) -> Vec<Question> {
    let attempts = policy.max_attempts.max(1);
    for attempt in 0..attempts {
        let reply = match source.fetch(difficulty, amount).await {
            Ok(questions) if questions.is_empty() => Err(FetchError::NoResults),
            reply => reply,
        };
        match reply {
            Ok(questions) => {
                tracing::debug!(
                    source = source.name(),
                    %difficulty,
                    count = questions.len(),
                    attempt = attempt + 1,
                    "tier fetched"
                );
                return questions;
            }
            Err(e) => {
                if attempt + 1 == attempts {
                    tracing::warn!(
                        source = source.name(),
                        %difficulty,
                        "giving up after {attempts} attempts: {e}"
                    );
                    break;
                }
                let delay = policy.delay_for(attempt, &e);
                tracing::warn!(
                    source = source.name(),
                    %difficulty,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    "fetch failed, retrying: {e}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    Vec::new()
}

/// Fetch every tier concurrently and build a bank.
///
/// Partial failure is tolerated; only an entirely empty result is an error.
pub async fn load_bank(
    source: &dyn QuestionSource,
    amount: u32,
    policy: &RetryPolicy,
) -> Result<QuestionBank, QuizError> {
    let (easy, medium, hard) = futures::join!(
        fetch_tier(source, Difficulty::Easy, amount, policy),
        fetch_tier(source, Difficulty::Medium, amount, policy),
        fetch_tier(source, Difficulty::Hard, amount, policy),
    );

    tracing::info!(
        source = source.name(),
        easy = easy.len(),
        medium = medium.len(),
        hard = hard.len(),
        "question bank loaded"
    );

    let bank = QuestionBank::from_tiers(easy, medium, hard);
    if bank.is_empty() {
        return Err(QuizError::Initialization);
    }
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::time::Instant;

    type Reply = Result<Vec<Question>, FetchError>;

    /// Replays queued replies per tier; an exhausted script fails.
    struct ScriptedSource {
        scripts: Mutex<HashMap<Difficulty, VecDeque<Reply>>>,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new() -> Self {
            Self {
                scripts: Mutex::new(HashMap::new()),
                calls: AtomicU32::new(0),
            }
        }

        fn script(self, tier: Difficulty, replies: Vec<Reply>) -> Self {
            self.scripts
                .lock()
                .unwrap()
                .insert(tier, replies.into_iter().collect());
            self
        }
    }

    #[async_trait]
    impl QuestionSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch(&self, difficulty: Difficulty, _amount: u32) -> Reply {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.scripts
                .lock()
                .unwrap()
                .get_mut(&difficulty)
                .and_then(|q| q.pop_front())
                .unwrap_or(Err(FetchError::NoResults))
        }
    }

    fn questions(n: usize, tier: Difficulty) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(format!("q{i}"), "a", vec!["b".into()], tier))
            .collect()
    }

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_jitter: Duration::ZERO,
            ..RetryPolicy::default()
        }
    }

    fn rate_limited() -> Reply {
        Err(FetchError::RateLimited {
            retry_after_ms: None,
        })
    }

    #[test]
    fn backoff_doubles_and_adds_hint() {
        let policy = policy();
        let limited = FetchError::RateLimited {
            retry_after_ms: Some(3000),
        };
        assert_eq!(policy.delay_for(0, &limited), Duration::from_millis(5000));
        assert_eq!(policy.delay_for(2, &limited), Duration::from_millis(11000));
        assert_eq!(
            policy.delay_for(1, &FetchError::NoResults),
            Duration::from_millis(4000)
        );
    }

    #[test]
    fn jitter_stays_in_bounds() {
        let policy = RetryPolicy::default();
        for _ in 0..100 {
            let delay = policy.delay_for(0, &FetchError::Network("reset".into()));
            assert!(delay >= Duration::from_millis(2000));
            assert!(delay < Duration::from_millis(3000));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_rate_limiting() {
        let source = ScriptedSource::new().script(
            Difficulty::Easy,
            vec![
                rate_limited(),
                rate_limited(),
                Ok(questions(3, Difficulty::Easy)),
            ],
        );
        let start = Instant::now();

        let fetched = fetch_tier(&source, Difficulty::Easy, 3, &policy()).await;

        assert_eq!(fetched.len(), 3);
        assert_eq!(source.calls.load(Ordering::Relaxed), 3);
        // (2000 + 1000) + (4000 + 1000)
        assert_eq!(start.elapsed(), Duration::from_millis(8000));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_with_empty_tier_after_five_attempts() {
        let source = ScriptedSource::new();
        let start = Instant::now();

        let fetched = fetch_tier(&source, Difficulty::Hard, 10, &policy()).await;

        assert!(fetched.is_empty());
        assert_eq!(source.calls.load(Ordering::Relaxed), 5);
        // No wait after the final attempt: 2 + 4 + 8 + 16 seconds.
        assert_eq!(start.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_reply_is_retried() {
        let source = ScriptedSource::new().script(
            Difficulty::Medium,
            vec![Ok(vec![]), Ok(questions(2, Difficulty::Medium))],
        );
        let start = Instant::now();

        let fetched = fetch_tier(&source, Difficulty::Medium, 2, &policy()).await;

        assert_eq!(fetched.len(), 2);
        assert_eq!(source.calls.load(Ordering::Relaxed), 2);
        assert_eq!(start.elapsed(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn load_bank_tolerates_partial_failure() {
        let source = ScriptedSource::new()
            .script(Difficulty::Easy, vec![Ok(questions(2, Difficulty::Easy))])
            .script(
                Difficulty::Medium,
                vec![
                    Err(FetchError::Api {
                        status: 503,
                        message: "busy".into(),
                    }),
                    Ok(questions(1, Difficulty::Medium)),
                ],
            );

        let bank = load_bank(&source, 2, &policy()).await.unwrap();

        assert_eq!(bank.remaining(Difficulty::Easy), 2);
        assert_eq!(bank.remaining(Difficulty::Medium), 1);
        assert_eq!(bank.remaining(Difficulty::Hard), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn load_bank_fails_when_every_tier_is_empty() {
        let source = ScriptedSource::new()
            .script(Difficulty::Easy, vec![Ok(vec![])])
            .script(Difficulty::Medium, vec![Ok(vec![])])
            .script(Difficulty::Hard, vec![Ok(vec![])]);

        let err = load_bank(&source, 5, &policy()).await.unwrap_err();
        assert!(matches!(err, QuizError::Initialization));
    }

    #[tokio::test(start_paused = true)]
    async fn tiers_are_fetched_concurrently() {
        let source = ScriptedSource::new();
        let start = Instant::now();

        let result = load_bank(&source, 5, &policy()).await;

        assert!(result.is_err());
        assert_eq!(source.calls.load(Ordering::Relaxed), 15);
        assert_eq!(start.elapsed(), Duration::from_secs(30));
    }
}
