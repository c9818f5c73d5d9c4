// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation loop for the Warden steward bot.
//!
//! The [`ConversationLoop`] is the central coordinator that:
//! - Records every observed message into the stores
//! - Decides whether the bot should respond
//! - Builds the prompt and requests a completion from the language model
//! - Parses the reply into actions and dispatches them in order
//! - Records the outcome into the interaction log
//! - Reports results back to the originating channel
//!
//! The platform delivers one inbound event at a time; the loop holds its
//! state exclusively, so no two messages are ever processed concurrently.

pub mod dispatch;
pub mod parser;
pub mod prompt;
pub mod queries;

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};
use warden_config::WardenConfig;
use warden_core::types::{ActionOutcome, ChannelKind, InboundMessage, MemberInfo};
use warden_core::{ChatPlatform, LanguageModel, WardenError};
use warden_store::{ChannelMessageLog, CommandTable, InteractionStore, UserDirectory};

use crate::dispatch::Dispatcher;

/// The single sequential event handler tying platform, model, and stores together.
pub struct ConversationLoop {
    platform: Arc<dyn ChatPlatform>,
    model: Arc<dyn LanguageModel>,
    interactions: InteractionStore,
    users: UserDirectory,
    channel_log: ChannelMessageLog,
    commands: CommandTable,
    config: WardenConfig,
}

impl ConversationLoop {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        model: Arc<dyn LanguageModel>,
        interactions: InteractionStore,
        users: UserDirectory,
        channel_log: ChannelMessageLog,
        commands: CommandTable,
        config: WardenConfig,
    ) -> Self {
        info!(bot = config.agent.name.as_str(), "conversation loop initialized");
        Self {
            platform,
            model,
            interactions,
            users,
            channel_log,
            commands,
            config,
        }
    }

    /// Read access to the interaction log (score footers, status display).
    pub fn interactions(&self) -> &InteractionStore {
        &self.interactions
    }

    /// Handles a membership event.
    pub fn on_member_join(&mut self, member: &MemberInfo) {
        self.users.update_user(member);
    }

    /// Handles a member profile change.
    pub fn on_member_update(&mut self, member: &MemberInfo) {
        self.users.update_user(member);
    }

    /// Refreshes the user directory from a full member listing (startup sync).
    pub fn sync_members(&mut self, members: &[MemberInfo]) {
        for member in members {
            self.users.update_user(member);
        }
    }

    /// Handles one inbound message end to end.
    ///
    /// Nothing below this boundary terminates the process: model, parse, and
    /// dispatch failures all end in a user-visible text message in the
    /// originating channel. The returned error covers only the final
    /// platform write of that message.
    pub async fn on_message(&mut self, msg: InboundMessage) -> Result<(), WardenError> {
        if msg.author_is_bot {
            return Ok(());
        }

        // Track every observed message, addressed to the bot or not.
        self.users.add_message(&msg);
        self.channel_log.add_message(&msg);

        info!(
            channel = msg.channel.as_str(),
            author = msg.author_name.as_str(),
            "message received"
        );

        // Dynamic command invocation works in every channel.
        if let Some(reply) = self.try_dynamic_command(&msg.content) {
            return self.platform.send_message(&msg.channel, &reply).await;
        }

        let Some(user_input) = self.addressed_input(&msg) else {
            return Ok(());
        };

        // History questions are answered from the channel log directly.
        if queries::is_history_query(&user_input) {
            let answer = queries::answer_history_query(&user_input, &msg.guild, &self.channel_log);
            return self.platform.send_message(&msg.channel, &answer).await;
        }

        let response = match self.request_completion(&user_input).await {
            Ok(response) => response,
            Err(e) => {
                // Model failures feed the standard error-action path and are
                // recorded as a failed exchange.
                let cause = e.to_string();
                error!(error = cause.as_str(), "model request failed");
                let raw = parser::error_action(&cause, "");
                let outcome = self.dispatcher().dispatch(&raw).await;
                self.interactions
                    .add_interaction(&user_input, "", false, Some(cause));
                return self
                    .platform
                    .send_message(&msg.channel, outcome.text())
                    .await;
            }
        };

        let actions = parser::parse_response(&response);

        let mut results = Vec::new();
        let mut success = true;
        let mut error_message = None;

        for mut raw in actions {
            // A send_message without an explicit channel goes to the channel
            // the triggering message arrived in.
            if raw.action == "send_message" {
                default_channel_param(&mut raw.params, &msg.channel);
            }

            match self.dispatcher().dispatch(&raw).await {
                ActionOutcome::Success(text) => results.push(text),
                ActionOutcome::Failure(cause) => {
                    warn!(
                        action = raw.action.as_str(),
                        cause = cause.as_str(),
                        "action failed"
                    );
                    results.push(format!("❌ Action {} failed: {cause}", raw.action));
                    success = false;
                    error_message = Some(cause);
                }
            }
        }

        // Record before building the footer so the score shown includes
        // this exchange.
        self.interactions
            .add_interaction(&user_input, &response, success, error_message);

        let mut final_message = results.join("\n");
        if self.is_bot_channel(&msg.channel) {
            final_message.push_str(&format!(
                "\n\n🎯 Score: {} | Success rate: {:.1}%",
                self.interactions.score(),
                self.interactions.success_rate()
            ));
        }

        if final_message.trim().is_empty() {
            return Ok(());
        }
        self.platform.send_message(&msg.channel, &final_message).await
    }

    fn dispatcher(&mut self) -> Dispatcher<'_> {
        Dispatcher {
            platform: self.platform.as_ref(),
            users: &self.users,
            commands: &mut self.commands,
            bot_channel: &self.config.agent.bot_channel,
            user_info_messages: self.config.limits.user_info_messages,
        }
    }

    /// Renders a dynamic command invocation, if the text is one.
    fn try_dynamic_command(&self, content: &str) -> Option<String> {
        let rest = content.strip_prefix(&self.config.agent.command_prefix)?;
        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let args = parts.next().unwrap_or("").trim();
        self.commands.render(name, args)
    }

    fn is_bot_channel(&self, channel: &str) -> bool {
        channel.eq_ignore_ascii_case(&self.config.agent.bot_channel)
    }

    /// Decides whether the bot should respond, and if so returns the input
    /// with the addressing mention or prefix stripped.
    ///
    /// The bot responds in the bot channel, when mentioned, and when the
    /// message starts with one of the configured prefix tokens.
    fn addressed_input(&self, msg: &InboundMessage) -> Option<String> {
        if msg.mentions_bot {
            let mention = format!("@{}", self.config.agent.name);
            return Some(msg.content.replace(&mention, "").trim().to_string());
        }

        if let Some(stripped) = self.strip_prefix_token(&msg.content) {
            return Some(stripped);
        }

        if self.is_bot_channel(&msg.channel) {
            return Some(msg.content.trim().to_string());
        }

        None
    }

    /// Strips a leading prefix token (`bot`, `@bot`, `!bot`) if present.
    fn strip_prefix_token(&self, content: &str) -> Option<String> {
        let lowered = content.to_lowercase();
        for token in &self.config.agent.prefix_tokens {
            let token = token.to_lowercase();
            if lowered == token {
                return Some(String::new());
            }
            if lowered.starts_with(&token)
                && lowered[token.len()..].starts_with(char::is_whitespace)
            {
                return Some(content[token.len()..].trim().to_string());
            }
        }
        None
    }

    async fn request_completion(&self, user_input: &str) -> Result<String, WardenError> {
        let channels = self.platform.list_channels().await?;
        let text_channels: Vec<String> = channels
            .into_iter()
            .filter(|c| c.kind == ChannelKind::Text)
            .map(|c| c.name)
            .collect();

        let system_prompt = prompt::build_system_prompt(
            &self.config.agent.name,
            &self.config.agent.bot_channel,
            &text_channels,
            &self.interactions,
        );

        self.model.complete(&system_prompt, user_input).await
    }
}

/// Fills in the originating channel when the model omitted (or emptied) the
/// `channel` parameter of a send_message.
fn default_channel_param(params: &mut Value, channel: &str) {
    let missing = match params.get("channel") {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };
    if missing && let Some(map) = params.as_object_mut() {
        map.insert("channel".to_string(), Value::String(channel.to_string()));
    }
}
