// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `warden shell` command implementation.
//!
//! Launches an interactive REPL wired to an in-memory guild and the real
//! Ollama provider, with readline history. Every line is delivered to the
//! conversation loop as a message in the bot channel; whatever the bot
//! posts back to the guild is echoed to the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;
use warden_agent::ConversationLoop;
use warden_config::WardenConfig;
use warden_core::types::{InboundMessage, MemberInfo};
use warden_core::{ChatPlatform, LanguageModel, WardenError};
use warden_ollama::OllamaModel;
use warden_platform::InMemoryGuild;
use warden_store::{ChannelMessageLog, CommandTable, InteractionStore, UserDirectory};

/// Author name used for shell input.
const OPERATOR: &str = "operator";

/// Runs the `warden shell` interactive REPL.
pub async fn run_shell(config: WardenConfig) -> Result<(), WardenError> {
    let data_dir = PathBuf::from(&config.store.data_dir);
    let cap = config.limits.history_cap;

    let interactions = InteractionStore::load(data_dir.join("interactions.json"), cap);
    let users = UserDirectory::load(data_dir.join("users.json"), cap);
    let channel_log = ChannelMessageLog::new(cap);
    let commands = CommandTable::load(data_dir.join("commands.json"), config.limits.max_commands);

    let model: Arc<dyn LanguageModel> = Arc::new(OllamaModel::new(&config.ollama)?);

    let guild = Arc::new(InMemoryGuild::new("shell"));
    guild.seed_text_channel(&config.agent.bot_channel).await;
    guild.seed_text_channel("general").await;

    let bot_channel = config.agent.bot_channel.clone();
    let mut convo = ConversationLoop::new(
        guild.clone() as Arc<dyn ChatPlatform>,
        model,
        interactions,
        users,
        channel_log,
        commands,
        config,
    );
    convo.sync_members(&[operator_member()]);

    println!(
        "{} score {} | success rate {:.1}% | Ctrl-D exits",
        "warden shell".bold(),
        convo.interactions().score(),
        convo.interactions().success_rate()
    );

    let mut editor = DefaultEditor::new()
        .map_err(|e| WardenError::Internal(format!("failed to initialize readline: {e}")))?;

    loop {
        match editor.readline(&format!("{} ", "❯".cyan())) {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                editor.add_history_entry(&line).ok();

                if let Err(e) = convo.on_message(make_message(&bot_channel, &line)).await {
                    eprintln!("{} {e}", "error:".red());
                }

                for (channel, text) in guild.drain_sent().await {
                    println!("{} {text}", format!("#{channel}").dimmed());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                return Err(WardenError::Internal(format!("readline failed: {e}")));
            }
        }
    }

    info!("shell session ended");
    Ok(())
}

fn make_message(channel: &str, content: &str) -> InboundMessage {
    InboundMessage {
        id: uuid::Uuid::new_v4().to_string(),
        guild: "shell".to_string(),
        channel: channel.to_string(),
        author_id: OPERATOR.to_string(),
        author_name: OPERATOR.to_string(),
        author_display: OPERATOR.to_string(),
        author_is_bot: false,
        content: content.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        edited_at: None,
        attachments: Vec::new(),
        mentions_bot: false,
    }
}

fn operator_member() -> MemberInfo {
    MemberInfo {
        id: OPERATOR.to_string(),
        username: OPERATOR.to_string(),
        display_name: OPERATOR.to_string(),
        roles: Vec::new(),
        created_at: None,
        joined_at: Some(chrono::Utc::now().to_rfc3339()),
        is_bot: false,
    }
}
