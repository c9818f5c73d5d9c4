// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across collaborator traits and the Warden framework.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Kind of channel on the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Text,
    Voice,
    Forum,
}

/// A channel as reported by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub name: String,
    pub kind: ChannelKind,
    /// Name of the parent category, if the channel has one.
    pub category: Option<String>,
    pub topic: Option<String>,
}

/// A category as reported by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: String,
}

/// A role as reported by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub name: String,
    /// `#RRGGBB` color string, if the role has a non-default color.
    pub color: Option<String>,
    pub permissions: Vec<String>,
}

/// Health status reported by collaborator health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Collaborator is fully operational.
    Healthy,
    /// Collaborator is operational but experiencing issues.
    Degraded(String),
    /// Collaborator is not operational.
    Unhealthy(String),
}

/// An inbound message delivered by the chat platform.
///
/// Author and channel names are carried as plain strings; the stores keep
/// denormalized copies and there is deliberately no referential integrity
/// between message records and user records.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub guild: String,
    pub channel: String,
    pub author_id: String,
    pub author_name: String,
    pub author_display: String,
    pub author_is_bot: bool,
    pub content: String,
    /// RFC 3339 creation timestamp.
    pub timestamp: String,
    /// RFC 3339 edit timestamp, when the platform reports the message as edited.
    pub edited_at: Option<String>,
    pub attachments: Vec<String>,
    /// Whether the platform resolved a mention of the bot in this message.
    pub mentions_bot: bool,
}

/// A guild member as delivered by membership events or the startup sync.
#[derive(Debug, Clone)]
pub struct MemberInfo {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub roles: Vec<String>,
    /// RFC 3339 account creation timestamp, when the platform exposes it.
    pub created_at: Option<String>,
    /// RFC 3339 guild join timestamp, when the platform exposes it.
    pub joined_at: Option<String>,
    pub is_bot: bool,
}

/// One element of the parsed model response, before validation.
///
/// The parser guarantees shape only (`action` is a string, `params` is an
/// object); unrecognized action names pass through and are rejected by the
/// dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAction {
    pub action: String,
    pub params: Value,
}

/// Outcome of dispatching one action.
///
/// A failure carries a human-readable cause and never aborts the rest of
/// the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Success(String),
    Failure(String),
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success(_))
    }

    pub fn text(&self) -> &str {
        match self {
            ActionOutcome::Success(s) | ActionOutcome::Failure(s) => s,
        }
    }
}

/// A validated, typed action requested by the language model.
///
/// Each variant carries only the parameters its kind requires. Actions have
/// no identity beyond their position in the parsed sequence; ordering is
/// significant and execution is strictly sequential.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SendMessage {
        channel: String,
        message: String,
    },
    CreateChannel {
        name: String,
        kind: ChannelKind,
        category: Option<String>,
    },
    CreateCategory {
        name: String,
    },
    CreateRole {
        name: String,
        color: Option<String>,
        permissions: Vec<String>,
    },
    UpdateDescription {
        channel: String,
        description: String,
    },
    CreateCommand {
        name: String,
        description: String,
        response: String,
    },
    DeleteCommand {
        name: String,
    },
    ListCommands,
    DeleteChannel {
        name: String,
    },
    MoveChannel {
        channel: String,
        category: String,
    },
    AnalyzeChannels,
    AnalyzeRoles,
    TrollChannel {
        channel: String,
        messages: Vec<String>,
    },
    ChannelSequence {
        channel: String,
        messages: Vec<String>,
        delay_secs: f64,
    },
    GetUserInfo {
        name: String,
    },
    ListUsers,
    Error {
        error: String,
    },
}

impl Action {
    /// Validates a raw action into its typed form.
    ///
    /// Unknown action names and missing or mistyped required parameters are
    /// validation errors, never panics. The returned message is suitable for
    /// user display.
    pub fn from_raw(raw: &RawAction) -> Result<Action, String> {
        let p = &raw.params;
        match raw.action.as_str() {
            "send_message" => Ok(Action::SendMessage {
                channel: req_str(p, "channel")?,
                message: req_str(p, "message")?,
            }),
            "create_channel" => {
                let kind_str = req_str(p, "type")?;
                let kind = kind_str.parse::<ChannelKind>().map_err(|_| {
                    format!("invalid channel type `{kind_str}` (expected text, voice, or forum)")
                })?;
                Ok(Action::CreateChannel {
                    name: req_str(p, "name")?,
                    kind,
                    category: opt_str(p, "category"),
                })
            }
            "create_category" => Ok(Action::CreateCategory {
                name: req_str(p, "name")?,
            }),
            "create_role" => Ok(Action::CreateRole {
                name: req_str(p, "name")?,
                color: opt_str(p, "color"),
                permissions: opt_str_list(p, "permissions")?,
            }),
            "update_description" => Ok(Action::UpdateDescription {
                channel: req_str(p, "channel")?,
                description: req_str(p, "description")?,
            }),
            "create_command" => Ok(Action::CreateCommand {
                name: req_str(p, "name")?,
                description: req_str(p, "description")?,
                response: req_str(p, "response")?,
            }),
            "delete_command" => Ok(Action::DeleteCommand {
                name: req_str(p, "name")?,
            }),
            "list_commands" => Ok(Action::ListCommands),
            "delete_channel" => Ok(Action::DeleteChannel {
                name: req_str(p, "name")?,
            }),
            "move_channel" => Ok(Action::MoveChannel {
                channel: req_str(p, "channel")?,
                category: req_str(p, "category")?,
            }),
            "analyze_channels" => Ok(Action::AnalyzeChannels),
            "analyze_roles" => Ok(Action::AnalyzeRoles),
            "troll_channel" => Ok(Action::TrollChannel {
                channel: req_str(p, "channel")?,
                messages: req_str_list(p, "messages")?,
            }),
            "channel_sequence" => Ok(Action::ChannelSequence {
                channel: req_str(p, "channel")?,
                messages: req_str_list(p, "messages")?,
                delay_secs: opt_f64(p, "delay").unwrap_or(1.0),
            }),
            "get_user_info" => Ok(Action::GetUserInfo {
                name: req_str(p, "name")?,
            }),
            "list_users" => Ok(Action::ListUsers),
            "error" => Ok(Action::Error {
                error: req_str(p, "error")?,
            }),
            other => Err(format!("unsupported action `{other}`")),
        }
    }
}

fn req_str(params: &Value, key: &str) -> Result<String, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("missing or non-string parameter `{key}`"))
}

fn opt_str(params: &Value, key: &str) -> Option<String> {
    params.get(key).and_then(Value::as_str).map(str::to_string)
}

fn opt_f64(params: &Value, key: &str) -> Option<f64> {
    params.get(key).and_then(Value::as_f64)
}

/// Required list of strings; a non-array or non-string element is a validation error.
fn req_str_list(params: &Value, key: &str) -> Result<Vec<String>, String> {
    let arr = params
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("missing or non-list parameter `{key}`"))?;
    arr.iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("parameter `{key}` must contain only strings"))
        })
        .collect()
}

/// Optional list of strings defaulting to empty; present-but-malformed is an error.
fn opt_str_list(params: &Value, key: &str) -> Result<Vec<String>, String> {
    if params.get(key).is_none() {
        return Ok(Vec::new());
    }
    req_str_list(params, key)
}
