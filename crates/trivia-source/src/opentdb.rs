//! Open Trivia DB question source.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use trivia_core::error::FetchError;
use trivia_core::model::{Difficulty, Question};
use trivia_core::traits::QuestionSource;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Open Trivia DB's "rate limit exceeded" result code.
const RESPONSE_CODE_RATE_LIMIT: u8 = 5;

/// Upper bound on a server-supplied `Retry-After`, in seconds.
pub const MAX_RETRY_AFTER_SECS: u64 = 300;

/// Fetches multiple-choice questions from an Open Trivia DB compatible API.
pub struct OpenTdbSource {
    endpoint: Url,
    category: Option<u32>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenTdbSource {
    pub fn new(base_url: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let endpoint = Url::parse(&format!("{}/api.php", base.trim_end_matches('/')))
            .with_context(|| format!("invalid base URL: {base}"))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            endpoint,
            category: None,
            timeout_secs: timeout.as_secs(),
            client,
        })
    }

    /// Restrict questions to one Open Trivia DB category id.
    pub fn with_category(mut self, category: Option<u32>) -> Self {
        self.category = category;
        self
    }

    fn request_url(&self, difficulty: Difficulty, amount: u32) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("amount", &amount.to_string())
                .append_pair("difficulty", difficulty.as_str())
                .append_pair("type", "multiple")
                .append_pair("encode", "url3986");
            if let Some(category) = self.category {
                query.append_pair("category", &category.to_string());
            }
        }
        url
    }
}

#[derive(Deserialize)]
struct OpenTdbResponse {
    response_code: Option<u8>,
    results: Option<Vec<OpenTdbRecord>>,
}

#[derive(Deserialize)]
struct OpenTdbRecord {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    #[serde(default)]
    category: Option<String>,
}

impl OpenTdbRecord {
    fn into_question(self, difficulty: Difficulty) -> Question {
        let incorrect = self.incorrect_answers.iter().map(|a| decode(a)).collect();
        let mut question = Question::new(
            decode(&self.question),
            decode(&self.correct_answer),
            incorrect,
            difficulty,
        );
        if let Some(category) = self.category {
            question = question.with_category(decode(&category));
        }
        question.shuffled(&mut rand::thread_rng())
    }
}

/// Decode an RFC 3986 percent-encoded field.
fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Validate a decoded body and turn it into questions.
fn parse_body(body: &str, difficulty: Difficulty) -> Result<Vec<Question>, FetchError> {
    let payload: OpenTdbResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::InvalidPayload(format!("failed to parse response: {e}")))?;

    match payload.response_code {
        Some(0) => {}
        Some(RESPONSE_CODE_RATE_LIMIT) => {
            return Err(FetchError::RateLimited {
                retry_after_ms: None,
            })
        }
        Some(code) => return Err(FetchError::ResponseCode(code)),
        None => {
            return Err(FetchError::InvalidPayload(
                "missing response_code".to_string(),
            ))
        }
    }

    let records = payload
        .results
        .ok_or_else(|| FetchError::InvalidPayload("missing results".to_string()))?;
    if records.is_empty() {
        return Err(FetchError::NoResults);
    }

    Ok(records
        .into_iter()
        .map(|r| r.into_question(difficulty))
        .collect())
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    fn name(&self) -> &str {
        "opentdb"
    }

    #[instrument(skip(self))]
    async fn fetch(
        &self,
        difficulty: Difficulty,
        amount: u32,
    ) -> Result<Vec<Question>, FetchError> {
        let response = self
            .client
            .get(self.request_url(difficulty, amount))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(self.timeout_secs)
                } else {
                    FetchError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after_ms = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(|secs| secs.min(MAX_RETRY_AFTER_SECS).saturating_mul(1000));
            return Err(FetchError::RateLimited { retry_after_ms });
        }
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Api { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let questions = parse_body(&body, difficulty)?;
        tracing::debug!(count = questions.len(), "received questions");
        Ok(questions)
    }
}
