// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action dispatch: validate one raw action and execute it against the
//! chat platform and the stores.
//!
//! Actions run strictly in sequence with no parallelism; every platform
//! write is awaited before the caller moves to the next action, so a
//! channel created by action *i* is visible to action *i+1*. A failing
//! action produces a failure outcome and never aborts the batch.

use std::time::Duration;

use tracing::{debug, info};
use warden_core::types::{Action, ActionOutcome, ChannelKind, RawAction};
use warden_core::{ChatPlatform, WardenError};
use warden_store::{CommandTable, UserDirectory};

/// Borrowed context the dispatcher executes against.
pub struct Dispatcher<'a> {
    pub platform: &'a dyn ChatPlatform,
    pub users: &'a UserDirectory,
    pub commands: &'a mut CommandTable,
    /// Protected channel name; delete requests for it are refused before
    /// any platform call.
    pub bot_channel: &'a str,
    /// How many recent messages `get_user_info` shows.
    pub user_info_messages: usize,
}

impl Dispatcher<'_> {
    /// Validates and executes one action.
    pub async fn dispatch(&mut self, raw: &RawAction) -> ActionOutcome {
        debug!(action = raw.action.as_str(), "dispatching action");
        let action = match Action::from_raw(raw) {
            Ok(action) => action,
            Err(cause) => return ActionOutcome::Failure(cause),
        };
        match self.execute(action).await {
            Ok(text) => ActionOutcome::Success(text),
            Err(cause) => ActionOutcome::Failure(cause),
        }
    }

    async fn execute(&mut self, action: Action) -> Result<String, String> {
        match action {
            Action::SendMessage { channel, message } => {
                self.platform
                    .send_message(&channel, &message)
                    .await
                    .map_err(display_cause)?;
                Ok(format!("✅ Message sent to #{channel}!"))
            }

            Action::CreateChannel {
                name,
                kind,
                category,
            } => {
                let info = self
                    .platform
                    .create_channel(&name, kind, category.as_deref())
                    .await
                    .map_err(display_cause)?;
                info!(channel = info.name.as_str(), kind = %kind, "channel created");
                Ok(format!("✅ Channel #{} created!", info.name))
            }

            Action::CreateCategory { name } => {
                let info = self
                    .platform
                    .create_category(&name)
                    .await
                    .map_err(display_cause)?;
                Ok(format!("✅ Category {} created!", info.name))
            }

            Action::CreateRole {
                name,
                color,
                permissions,
            } => {
                let info = self
                    .platform
                    .create_role(&name, color.as_deref(), &permissions)
                    .await
                    .map_err(display_cause)?;
                Ok(format!("✅ Role @{} created!", info.name))
            }

            Action::UpdateDescription {
                channel,
                description,
            } => {
                self.platform
                    .edit_channel_topic(&channel, &description)
                    .await
                    .map_err(display_cause)?;
                Ok(format!("✅ Description of #{channel} updated!"))
            }

            Action::CreateCommand {
                name,
                description,
                response,
            } => {
                // `echo` always gets the pure-echo template, whatever the
                // model asked for.
                let response = if name.eq_ignore_ascii_case("echo") {
                    "{args}".to_string()
                } else {
                    response
                };
                self.commands.create(&name, &description, &response)?;
                Ok(format!("✅ Command /{name} created!"))
            }

            Action::DeleteCommand { name } => {
                self.commands.remove(&name)?;
                Ok(format!("✅ Command /{name} deleted!"))
            }

            Action::ListCommands => Ok(self.commands.list_text()),

            Action::DeleteChannel { name } => {
                if name.eq_ignore_ascii_case(self.bot_channel) {
                    return Err("the bot channel cannot be deleted".to_string());
                }
                self.platform
                    .delete_channel(&name)
                    .await
                    .map_err(display_cause)?;
                Ok(format!("✅ Channel '{name}' deleted!"))
            }

            Action::MoveChannel { channel, category } => {
                self.platform
                    .move_channel(&channel, &category)
                    .await
                    .map_err(display_cause)?;
                Ok(format!(
                    "✅ Channel #{channel} moved to category '{category}'!"
                ))
            }

            Action::AnalyzeChannels => self.analyze_channels().await,

            Action::AnalyzeRoles => self.analyze_roles().await,

            Action::TrollChannel { channel, messages } => {
                for message in &messages {
                    self.platform
                        .send_message(&channel, message)
                        .await
                        .map_err(display_cause)?;
                }
                Ok(format!("😈 Successfully trolled #{channel}!"))
            }

            Action::ChannelSequence {
                channel,
                messages,
                delay_secs,
            } => {
                let delay = Duration::from_secs_f64(delay_secs.max(0.0));
                for message in &messages {
                    self.platform
                        .send_message(&channel, message)
                        .await
                        .map_err(display_cause)?;
                    // Pace the batch only when there is more than one message.
                    if messages.len() > 1 {
                        tokio::time::sleep(delay).await;
                    }
                }
                Ok(format!("✅ Messages sent to #{channel}!"))
            }

            Action::GetUserInfo { name } => {
                let Some((id, profile)) = self.users.get_user_by_name(&name) else {
                    return Err(format!("user '{name}' not found"));
                };
                let mut out = format!("**User information for {}**\n", profile.display_name);
                out.push_str(&format!("Username: {}\n", profile.username));
                out.push_str(&format!(
                    "Account created: {}\n",
                    profile.created_at.as_deref().unwrap_or("unknown")
                ));
                out.push_str(&format!(
                    "Joined server: {}\n",
                    profile.joined_at.as_deref().unwrap_or("unknown")
                ));
                out.push_str(&format!("Roles: {}\n", profile.roles.join(", ")));
                out.push_str(&format!("Last online: {}\n", profile.last_online));
                out.push_str("\nRecent messages:\n");
                for message in self.users.messages_for(id, self.user_info_messages) {
                    out.push_str(&format!(
                        "[{}] #{}: {}\n",
                        message.timestamp, message.channel, message.content
                    ));
                }
                Ok(out)
            }

            Action::ListUsers => {
                let mut out = String::from("**Server members:**\n");
                for profile in self.users.all_users() {
                    let marker = if profile.is_bot { "🤖" } else { "👤" };
                    out.push_str(&format!(
                        "{marker} {} ({})\n",
                        profile.display_name, profile.username
                    ));
                }
                Ok(out)
            }

            // Passthrough display for parser-generated error actions; the
            // dispatch itself did not fail.
            Action::Error { error } => Ok(format!("❌ Error: {error}")),
        }
    }

    async fn analyze_channels(&self) -> Result<String, String> {
        let channels = self.platform.list_channels().await.map_err(display_cause)?;
        let categories = self
            .platform
            .list_categories()
            .await
            .map_err(display_cause)?;

        let count = |kind: ChannelKind| channels.iter().filter(|c| c.kind == kind).count();

        let mut lines = vec![
            "📊 **Server channel analysis**\n".to_string(),
            "**Overview:**".to_string(),
            format!("- Total channels: {}", channels.len()),
            format!("- Text channels: {}", count(ChannelKind::Text)),
            format!("- Voice channels: {}", count(ChannelKind::Voice)),
            format!("- Forums: {}", count(ChannelKind::Forum)),
            format!("- Categories: {}\n", categories.len()),
            "**Categories and their channels:**".to_string(),
        ];

        for category in &categories {
            let members: Vec<_> = channels
                .iter()
                .filter(|c| c.category.as_deref() == Some(category.name.as_str()))
                .collect();
            lines.push(format!("\n`{}` ({} channels)", category.name, members.len()));
            for (kind, label) in [
                (ChannelKind::Text, "📝 Text channels:"),
                (ChannelKind::Voice, "🔊 Voice channels:"),
                (ChannelKind::Forum, "📋 Forums:"),
            ] {
                let of_kind: Vec<_> = members.iter().filter(|c| c.kind == kind).collect();
                if !of_kind.is_empty() {
                    lines.push(label.to_string());
                    for channel in of_kind {
                        lines.push(format!("  • {}", channel.name));
                    }
                }
            }
        }

        let uncategorized: Vec<_> = channels.iter().filter(|c| c.category.is_none()).collect();
        if !uncategorized.is_empty() {
            lines.push("\n**Channels without a category:**".to_string());
            for channel in uncategorized {
                let marker = match channel.kind {
                    ChannelKind::Text => "📝",
                    ChannelKind::Voice => "🔊",
                    ChannelKind::Forum => "📋",
                };
                lines.push(format!("{marker} {}", channel.name));
            }
        }

        Ok(lines.join("\n"))
    }

    async fn analyze_roles(&self) -> Result<String, String> {
        let roles = self.platform.list_roles().await.map_err(display_cause)?;

        let mut lines = vec![
            "👥 **Server role analysis**\n".to_string(),
            format!("**Total roles:** {}\n", roles.len()),
            "**Role hierarchy:**".to_string(),
        ];

        for role in &roles {
            lines.push(format!("\n`{}`", role.name));
            lines.push(format!(
                "- Color: {}",
                role.color.as_deref().unwrap_or("default")
            ));
            if !role.permissions.is_empty() {
                lines.push(format!("- Key permissions: {}", role.permissions.join(", ")));
            }
        }

        Ok(lines.join("\n"))
    }
}

/// Strips the error-enum prefix so users see the cause, not the taxonomy.
fn display_cause(e: WardenError) -> String {
    match e {
        WardenError::Platform { message, .. }
        | WardenError::Model { message, .. }
        | WardenError::Store { message, .. } => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use warden_platform::InMemoryGuild;

    struct Fixture {
        guild: InMemoryGuild,
        users: UserDirectory,
        commands: CommandTable,
        _dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        Fixture {
            guild: InMemoryGuild::new("test"),
            users: UserDirectory::load(dir.path().join("users.json"), 100),
            commands: CommandTable::load(dir.path().join("commands.json"), 50),
            _dir: dir,
        }
    }

    async fn dispatch_one(fixture: &mut Fixture, action: &str, params: serde_json::Value) -> ActionOutcome {
        let mut dispatcher = Dispatcher {
            platform: &fixture.guild,
            users: &fixture.users,
            commands: &mut fixture.commands,
            bot_channel: "bot",
            user_info_messages: 5,
        };
        dispatcher
            .dispatch(&RawAction {
                action: action.to_string(),
                params,
            })
            .await
    }

    #[tokio::test]
    async fn unknown_action_kind_is_rejected() {
        let mut f = fixture();
        let outcome = dispatch_one(&mut f, "summon_dragons", json!({})).await;
        assert_eq!(
            outcome,
            ActionOutcome::Failure("unsupported action `summon_dragons`".to_string())
        );
    }

    #[tokio::test]
    async fn missing_required_parameter_is_a_failure_not_a_crash() {
        let mut f = fixture();
        let outcome = dispatch_one(&mut f, "send_message", json!({"message": "hi"})).await;
        match outcome {
            ActionOutcome::Failure(cause) => assert!(cause.contains("`channel`")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_action_renders_without_failing_the_dispatch() {
        let mut f = fixture();
        let outcome = dispatch_one(&mut f, "error", json!({"error": "something broke"})).await;
        assert_eq!(
            outcome,
            ActionOutcome::Success("❌ Error: something broke".to_string())
        );
    }

    #[tokio::test]
    async fn protected_channel_guard_fires_before_any_platform_call() {
        let mut f = fixture();
        // The channel does not even exist; the guard still wins.
        let outcome = dispatch_one(&mut f, "delete_channel", json!({"name": "BOT"})).await;
        assert_eq!(
            outcome,
            ActionOutcome::Failure("the bot channel cannot be deleted".to_string())
        );
        assert_eq!(f.guild.delete_call_count().await, 0);
    }

    #[tokio::test]
    async fn troll_channel_sends_each_message_in_order() {
        let mut f = fixture();
        f.guild.seed_text_channel("victim").await;
        let outcome = dispatch_one(
            &mut f,
            "troll_channel",
            json!({"channel": "victim", "messages": ["one", "two"]}),
        )
        .await;
        assert!(outcome.is_success());
        let sent = f.guild.sent_messages().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].1, "one");
        assert_eq!(sent[1].1, "two");
    }

    #[tokio::test]
    async fn get_user_info_reports_unknown_users() {
        let mut f = fixture();
        let outcome = dispatch_one(&mut f, "get_user_info", json!({"name": "nobody"})).await;
        assert_eq!(
            outcome,
            ActionOutcome::Failure("user 'nobody' not found".to_string())
        );
    }

    #[tokio::test]
    async fn analyze_channels_summarizes_structure() {
        let mut f = fixture();
        f.guild.seed_text_channel("general").await;
        dispatch_one(&mut f, "create_category", json!({"name": "Info"})).await;
        dispatch_one(
            &mut f,
            "create_channel",
            json!({"name": "news", "type": "text", "category": "Info"}),
        )
        .await;

        let outcome = dispatch_one(&mut f, "analyze_channels", json!({})).await;
        let report = match outcome {
            ActionOutcome::Success(text) => text,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert!(report.contains("Total channels: 2"));
        assert!(report.contains("`Info` (1 channels)"));
        assert!(report.contains("**Channels without a category:**"));
        assert!(report.contains("📝 general"));
    }

    #[tokio::test]
    async fn list_commands_reflects_the_table() {
        let mut f = fixture();
        let outcome = dispatch_one(&mut f, "list_commands", json!({})).await;
        assert_eq!(
            outcome,
            ActionOutcome::Success("No commands available.".to_string())
        );

        dispatch_one(
            &mut f,
            "create_command",
            json!({"name": "greet", "description": "Say hello", "response": "hi"}),
        )
        .await;
        let outcome = dispatch_one(&mut f, "list_commands", json!({})).await;
        assert!(outcome.text().contains("• /greet - Say hello"));
    }
}
