// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user activity profiles and bounded per-user message logs.
//!
//! Profiles are created lazily on the first observed message or membership
//! event and are never deleted; retention is bounded only by the per-user
//! message cap.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use warden_core::types::{InboundMessage, MemberInfo};

use crate::persist;

/// Minimum Jaro-Winkler similarity for a fuzzy user-name match.
const FUZZY_THRESHOLD: f64 = 0.8;

/// Profile attributes tracked for one guild member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// RFC 3339 account creation timestamp, when known.
    #[serde(default)]
    pub created_at: Option<String>,
    /// RFC 3339 guild join timestamp, when known.
    #[serde(default)]
    pub joined_at: Option<String>,
    /// RFC 3339 timestamp of the last observed activity.
    pub last_online: String,
    #[serde(default)]
    pub is_bot: bool,
}

/// One message attributed to a user (denormalized copy, no foreign keys).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub content: String,
    pub timestamp: String,
    pub channel: String,
}

/// Persisted document shape for the directory.
#[derive(Debug, Default, Serialize, Deserialize)]
struct UserDirectoryDoc {
    #[serde(default)]
    users: HashMap<String, UserProfile>,
    #[serde(default)]
    messages: HashMap<String, VecDeque<UserMessage>>,
}

/// Mapping from user identity to profile and bounded message log.
#[derive(Debug)]
pub struct UserDirectory {
    path: PathBuf,
    cap: usize,
    users: HashMap<String, UserProfile>,
    messages: HashMap<String, VecDeque<UserMessage>>,
}

impl UserDirectory {
    /// Loads the directory from `path`, defaulting to empty on any load failure.
    pub fn load(path: PathBuf, cap: usize) -> Self {
        let doc: UserDirectoryDoc = persist::load_document(&path);
        Self {
            path,
            cap,
            users: doc.users,
            messages: doc.messages,
        }
    }

    /// Updates (or creates) the profile for a member event.
    pub fn update_user(&mut self, member: &MemberInfo) {
        self.users.insert(
            member.id.clone(),
            UserProfile {
                username: member.username.clone(),
                display_name: member.display_name.clone(),
                roles: member.roles.clone(),
                created_at: member.created_at.clone(),
                joined_at: member.joined_at.clone(),
                last_online: chrono::Utc::now().to_rfc3339(),
                is_bot: member.is_bot,
            },
        );
        self.save();
    }

    /// Records a message against its author, lazily creating a usable profile
    /// when no membership event has been observed for them yet.
    pub fn add_message(&mut self, msg: &InboundMessage) {
        self.users
            .entry(msg.author_id.clone())
            .or_insert_with(|| UserProfile {
                username: msg.author_name.clone(),
                display_name: msg.author_display.clone(),
                roles: Vec::new(),
                created_at: None,
                joined_at: None,
                last_online: chrono::Utc::now().to_rfc3339(),
                is_bot: msg.author_is_bot,
            });

        let log = self.messages.entry(msg.author_id.clone()).or_default();
        log.push_back(UserMessage {
            content: msg.content.clone(),
            timestamp: msg.timestamp.clone(),
            channel: msg.channel.clone(),
        });
        while log.len() > self.cap {
            log.pop_front();
        }
        self.save();
    }

    /// Resolves a user by name: exact case-insensitive match on username or
    /// display name first, then the best fuzzy match above the threshold.
    pub fn get_user_by_name(&self, name: &str) -> Option<(&str, &UserProfile)> {
        let needle = name.to_lowercase();

        let exact = self.users.iter().find(|(_, profile)| {
            profile.username.to_lowercase() == needle
                || profile.display_name.to_lowercase() == needle
        });
        if let Some((id, profile)) = exact {
            return Some((id.as_str(), profile));
        }

        self.users
            .iter()
            .map(|(id, profile)| {
                let score = strsim::jaro_winkler(&needle, &profile.username.to_lowercase()).max(
                    strsim::jaro_winkler(&needle, &profile.display_name.to_lowercase()),
                );
                (id, profile, score)
            })
            .filter(|(_, _, score)| *score >= FUZZY_THRESHOLD)
            .max_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(id, profile, _)| (id.as_str(), profile))
    }

    /// The most recent `count` messages for a user id, oldest first.
    pub fn messages_for(&self, id: &str, count: usize) -> Vec<&UserMessage> {
        match self.messages.get(id) {
            Some(log) => {
                let skip = log.len().saturating_sub(count);
                log.iter().skip(skip).collect()
            }
            None => Vec::new(),
        }
    }

    /// All tracked profiles, sorted by username for stable display.
    pub fn all_users(&self) -> Vec<&UserProfile> {
        let mut users: Vec<&UserProfile> = self.users.values().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn save(&self) {
        let doc = UserDirectoryDoc {
            users: self.users.clone(),
            messages: self.messages.clone(),
        };
        persist::save_document(&self.path, &doc);
    }
}
