// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory per-channel message history, scoped by guild.
//!
//! Each channel keeps at most `cap` records, oldest evicted first. Records
//! carry denormalized author and channel names; there is no referential
//! integrity with the user directory.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use warden_core::types::InboundMessage;

/// One tracked channel message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMessageRecord {
    pub content: String,
    pub author: String,
    pub timestamp: String,
    pub channel_name: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub edited_at: Option<String>,
}

/// Bounded per-channel message history for all observed guilds.
#[derive(Debug)]
pub struct ChannelMessageLog {
    cap: usize,
    // guild -> lowercase channel name -> records
    guilds: HashMap<String, HashMap<String, VecDeque<ChannelMessageRecord>>>,
}

impl ChannelMessageLog {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            guilds: HashMap::new(),
        }
    }

    /// Records an inbound message into its guild/channel bucket.
    pub fn add_message(&mut self, msg: &InboundMessage) {
        let channels = self.guilds.entry(msg.guild.clone()).or_default();
        let log = channels.entry(msg.channel.to_lowercase()).or_default();
        log.push_back(ChannelMessageRecord {
            content: msg.content.clone(),
            author: msg.author_name.clone(),
            timestamp: msg.timestamp.clone(),
            channel_name: msg.channel.clone(),
            attachments: msg.attachments.clone(),
            edited_at: msg.edited_at.clone(),
        });
        while log.len() > self.cap {
            log.pop_front();
        }
    }

    /// The retained history of a channel, oldest first.
    pub fn channel_history(&self, guild: &str, channel: &str) -> Vec<&ChannelMessageRecord> {
        self.guilds
            .get(guild)
            .and_then(|channels| channels.get(&channel.to_lowercase()))
            .map(|log| log.iter().collect())
            .unwrap_or_default()
    }

    /// All retained messages by a given author, across channels.
    pub fn user_messages(&self, guild: &str, username: &str) -> Vec<&ChannelMessageRecord> {
        let needle = username.to_lowercase();
        let Some(channels) = self.guilds.get(guild) else {
            return Vec::new();
        };
        channels
            .values()
            .flat_map(|log| log.iter())
            .filter(|record| record.author.to_lowercase() == needle)
            .collect()
    }

    /// The most recent retained message, optionally filtered by channel
    /// and/or author.
    pub fn latest_message(
        &self,
        guild: &str,
        channel: Option<&str>,
        username: Option<&str>,
    ) -> Option<&ChannelMessageRecord> {
        let channels = self.guilds.get(guild)?;
        let channel_needle = channel.map(str::to_lowercase);
        let user_needle = username.map(str::to_lowercase);

        channels
            .iter()
            .filter(|(name, _)| channel_needle.as_deref().is_none_or(|c| c == name.as_str()))
            .flat_map(|(_, log)| log.iter())
            .filter(|record| {
                user_needle
                    .as_deref()
                    .is_none_or(|u| record.author.to_lowercase() == u)
            })
            .max_by(|a, b| a.timestamp.cmp(&b.timestamp))
    }
}
