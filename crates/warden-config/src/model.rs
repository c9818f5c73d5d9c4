// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Warden steward bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Warden configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WardenConfig {
    /// Bot identity and response behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Ollama endpoint settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Persistent store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Retention caps and limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Bot identity and response behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Channel in which the bot always responds and shows score footers.
    #[serde(default = "default_bot_channel")]
    pub bot_channel: String,

    /// Prefix that invokes a registered dynamic command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Leading tokens that address the bot outside the bot channel.
    #[serde(default = "default_prefix_tokens")]
    pub prefix_tokens: Vec<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            bot_channel: default_bot_channel(),
            command_prefix: default_command_prefix(),
            prefix_tokens: default_prefix_tokens(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "warden".to_string()
}

fn default_bot_channel() -> String {
    "bot".to_string()
}

fn default_command_prefix() -> String {
    "/".to_string()
}

fn default_prefix_tokens() -> Vec<String> {
    vec!["bot".to_string(), "@bot".to_string(), "!bot".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Ollama endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier passed to the chat endpoint.
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds for completion calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Persistent store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding the JSON state documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("warden"))
        .unwrap_or_else(|| std::path::PathBuf::from("warden-data"))
        .to_string_lossy()
        .into_owned()
}

/// Retention caps and limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum number of registered dynamic commands.
    #[serde(default = "default_max_commands")]
    pub max_commands: usize,

    /// Capacity of the interaction log and each per-user/per-channel message log.
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Number of recent messages shown by `get_user_info`.
    #[serde(default = "default_user_info_messages")]
    pub user_info_messages: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_commands: default_max_commands(),
            history_cap: default_history_cap(),
            user_info_messages: default_user_info_messages(),
        }
    }
}

fn default_max_commands() -> usize {
    50
}

fn default_history_cap() -> usize {
    100
}

fn default_user_info_messages() -> usize {
    5
}
