// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rolling interaction log with a cumulative success score.
//!
//! The log is bounded (oldest evicted first) but the score is cumulative
//! across evictions: truncating history never rewinds the score. That
//! asymmetry is observed behavior and must be preserved.

use std::collections::VecDeque;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persist;

/// Score delta applied for a successful exchange.
pub const SCORE_SUCCESS: i64 = 10;
/// Score delta applied for a failed exchange.
pub const SCORE_FAILURE: i64 = -5;

/// One recorded exchange with the language model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// RFC 3339 timestamp of the exchange.
    pub timestamp: String,
    pub user_input: String,
    pub response: String,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    pub score_delta: i64,
}

/// Persisted document shape: `{history, score}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct InteractionLogDoc {
    #[serde(default)]
    history: VecDeque<Interaction>,
    #[serde(default)]
    score: i64,
}

/// Append-only bounded log of past exchanges plus the cumulative score.
///
/// Every mutation performs its own durability write.
#[derive(Debug)]
pub struct InteractionStore {
    path: PathBuf,
    cap: usize,
    history: VecDeque<Interaction>,
    score: i64,
}

impl InteractionStore {
    /// Loads the store from `path`, defaulting to empty on any load failure.
    ///
    /// A persisted history longer than `cap` is truncated to its most recent
    /// `cap` entries; the persisted score is kept as-is.
    pub fn load(path: PathBuf, cap: usize) -> Self {
        let doc: InteractionLogDoc = persist::load_document(&path);
        let mut history = doc.history;
        while history.len() > cap {
            history.pop_front();
        }
        Self {
            path,
            cap,
            history,
            score: doc.score,
        }
    }

    /// Records one exchange and applies its score delta (+10 success, -5 failure).
    pub fn add_interaction(
        &mut self,
        user_input: &str,
        response: &str,
        success: bool,
        error: Option<String>,
    ) {
        let score_delta = if success { SCORE_SUCCESS } else { SCORE_FAILURE };
        self.history.push_back(Interaction {
            timestamp: chrono::Utc::now().to_rfc3339(),
            user_input: user_input.to_string(),
            response: response.to_string(),
            success,
            error,
            score_delta,
        });
        while self.history.len() > self.cap {
            self.history.pop_front();
        }
        self.score += score_delta;
        self.save();
    }

    /// Cumulative score across all exchanges since the store was created,
    /// including evicted ones.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Success percentage over the retained history (0.0 when empty).
    pub fn success_rate(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        let successful = self.history.iter().filter(|i| i.success).count();
        (successful as f64 / self.history.len() as f64) * 100.0
    }

    /// The most recent `count` interactions, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &Interaction> {
        let skip = self.history.len().saturating_sub(count);
        self.history.iter().skip(skip)
    }

    /// Renders recent exchanges as prompt context lines.
    pub fn context_for_prompt(&self, max_items: usize) -> String {
        let mut lines = Vec::new();
        for item in self.recent(max_items) {
            lines.push(format!("User: {}", item.user_input));
            lines.push(format!("Bot: {}", item.response));
        }
        lines.join("\n")
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    fn save(&self) {
        let doc = InteractionLogDoc {
            history: self.history.clone(),
            score: self.score,
        };
        persist::save_document(&self.path, &doc);
    }
}
