// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic rendering for configuration errors, with typo suggestions
//! for unknown keys.

#![allow(clippy::result_large_err)]

use thiserror::Error;

/// A single configuration error, suitable for user display.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config failed to parse or deserialize.
    #[error("{message}")]
    Parse { message: String },

    /// The config parsed but failed a semantic validation check.
    #[error("{message}")]
    Validation { message: String },
}

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Converts a figment error chain into displayable [`ConfigError`]s.
///
/// Unknown-field errors get a closest-match suggestion against the set of
/// keys serde expected at that position.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| {
            let message = match &e.kind {
                figment::error::Kind::UnknownField(field, expected) => {
                    let mut msg = format!("unknown configuration key `{field}`");
                    if let Some(suggestion) = closest_key(field, expected) {
                        msg.push_str(&format!(" (did you mean `{suggestion}`?)"));
                    }
                    msg
                }
                _ => e.to_string(),
            };
            ConfigError::Parse { message }
        })
        .collect()
}

/// Prints all collected errors to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("warden: config error: {error}");
    }
}

fn closest_key(field: &str, candidates: &[&'static str]) -> Option<&'static str> {
    candidates
        .iter()
        .map(|c| (*c, strsim::jaro_winkler(field, c)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}
