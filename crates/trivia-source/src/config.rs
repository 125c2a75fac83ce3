//! Quiz configuration and source factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use trivia_core::engine::{EngineConfig, DEFAULT_MAX_QUESTIONS};
use trivia_core::fetch::RetryPolicy;
use trivia_core::host::HostSettings;
use trivia_core::model::Difficulty;

use crate::opentdb::{OpenTdbSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Top-level trivia configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaConfig {
    /// Base URL of the Open Trivia DB compatible service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional Open Trivia DB category id.
    #[serde(default)]
    pub category: Option<u32>,
    /// Questions requested per difficulty tier.
    #[serde(default = "default_amount")]
    pub amount_per_tier: u32,
    /// Questions asked per quiz.
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,
    /// Fetch attempts per tier, including the first.
    #[serde(default = "default_attempts")]
    pub max_attempts: u32,
    /// Backoff base delay in milliseconds.
    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,
    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Name scores are recorded under.
    #[serde(default = "default_username")]
    pub username: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_amount() -> u32 {
    10
}
fn default_max_questions() -> u32 {
    DEFAULT_MAX_QUESTIONS
}
fn default_attempts() -> u32 {
    5
}
fn default_base_delay() -> u64 {
    2000
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_username() -> String {
    std::env::var("USER")
        .ok()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "player".to_string())
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            category: None,
            amount_per_tier: default_amount(),
            max_questions: default_max_questions(),
            max_attempts: default_attempts(),
            base_delay_ms: default_base_delay(),
            request_timeout_secs: default_timeout(),
            username: default_username(),
        }
    }
}

impl TriviaConfig {
    /// Check values that would make a quiz impossible to run.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.amount_per_tier >= 1, "amount_per_tier must be at least 1");
        anyhow::ensure!(
            self.amount_per_tier <= 50,
            "amount_per_tier must be at most 50"
        );
        anyhow::ensure!(self.max_questions >= 1, "max_questions must be at least 1");
        anyhow::ensure!(self.max_attempts >= 1, "max_attempts must be at least 1");
        anyhow::ensure!(!self.username.trim().is_empty(), "username must not be empty");
        Ok(())
    }

    /// Settings the quiz host runs with.
    pub fn host_settings(&self) -> HostSettings {
        HostSettings {
            amount_per_tier: self.amount_per_tier,
            retry: RetryPolicy {
                max_attempts: self.max_attempts,
                base_delay: Duration::from_millis(self.base_delay_ms),
                ..RetryPolicy::default()
            },
            engine: EngineConfig {
                max_questions: self.max_questions,
                start_tier: Difficulty::Easy,
            },
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `trivia.toml` in the current directory
/// 2. `~/.config/trivia/config.toml`
///
/// Environment variable overrides: `TRIVIA_BASE_URL`, `TRIVIA_USERNAME`.
pub fn load_config() -> Result<TriviaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TriviaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("trivia.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loading config from {}", path.display());
            toml::from_str::<TriviaConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TriviaConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("TRIVIA_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(username) = std::env::var("TRIVIA_USERNAME") {
        config.username = username;
    }

    config.base_url = resolve_env_vars(&config.base_url);
    config.username = resolve_env_vars(&config.username);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("trivia"))
}

/// Create the question source described by the configuration.
pub fn create_source(config: &TriviaConfig) -> Result<OpenTdbSource> {
    let source = OpenTdbSource::new(
        Some(config.base_url.clone()),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    Ok(source.with_category(config.category))
}
