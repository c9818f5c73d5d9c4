// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty channel names and positive caps.

use crate::diagnostic::ConfigError;
use crate::model::WardenConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &WardenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.bot_channel.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.bot_channel must not be empty".to_string(),
        });
    }

    if config.agent.command_prefix.is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.command_prefix must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if !config.ollama.base_url.starts_with("http://")
        && !config.ollama.base_url.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "ollama.base_url must be an http(s) URL, got `{}`",
                config.ollama.base_url
            ),
        });
    }

    if config.ollama.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "ollama.timeout_secs must be positive".to_string(),
        });
    }

    if config.store.data_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.data_dir must not be empty".to_string(),
        });
    }

    if config.limits.history_cap == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.history_cap must be positive".to_string(),
        });
    }

    if config.limits.max_commands == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.max_commands must be positive".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
