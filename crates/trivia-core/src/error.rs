//! Error types for fetching and playing a quiz.
//!
//! `FetchError` lives here rather than in `trivia-source` so the retrying
//! loader can classify failures (rate limit vs. everything else) without
//! string matching.

use thiserror::Error;

/// A single failed attempt to fetch one difficulty tier.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP 429 or the service's rate-limit response code.
    #[error("rate limited, retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    /// The service returned a non-success HTTP status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The body could not be decoded.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The service reported a non-zero result status.
    #[error("service returned response code {0}")]
    ResponseCode(u8),

    /// The payload was well-formed but carried no questions.
    #[error("no questions in response")]
    NoResults,
}

impl FetchError {
    /// Server-suggested delay in milliseconds, if this is a rate limit.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            FetchError::RateLimited { retry_after_ms } => Some(retry_after_ms.unwrap_or(1000)),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }
}

/// Errors surfaced to whoever drives a quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Every tier came back empty after its retries.
    #[error("could not load any questions, please try again")]
    Initialization,

    /// The engine was driven out of order.
    #[error("invalid quiz operation: {0}")]
    CallerMisuse(&'static str),
}
