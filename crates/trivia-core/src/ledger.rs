//! In-memory, append-only score history per user.

use std::collections::HashMap;

use chrono::Utc;

use crate::model::ScoreEntry;

/// Score history for every user seen in this process.
#[derive(Debug, Clone, Default)]
pub struct ScoreLedger {
    entries: HashMap<String, Vec<ScoreEntry>>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result for `username`, stamped with the current time.
    pub fn record(&mut self, username: &str, score: u32, total: u32) -> &ScoreEntry {
        let entry = ScoreEntry {
            username: username.to_string(),
            score,
            total,
            timestamp: Utc::now(),
        };
        tracing::info!(username, score, total, "score recorded");
        let history = self.entries.entry(username.to_string()).or_default();
        history.push(entry);
        &history[history.len() - 1]
    }

    /// A user's results in the order they were recorded.
    pub fn history(&self, username: &str) -> &[ScoreEntry] {
        self.entries
            .get(username)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Users with at least one recorded result, sorted by name.
    pub fn users(&self) -> Vec<&str> {
        let mut users: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        users.sort_unstable();
        users
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
