// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture builders for inbound messages and members.

use warden_core::types::{InboundMessage, MemberInfo};

/// Builds a plain inbound text message from `author` in `channel`.
pub fn make_inbound(channel: &str, author: &str, content: &str) -> InboundMessage {
    InboundMessage {
        id: format!("test-{}", uuid::Uuid::new_v4()),
        guild: "test-guild".to_string(),
        channel: channel.to_string(),
        author_id: format!("id-{author}"),
        author_name: author.to_string(),
        author_display: author.to_string(),
        author_is_bot: false,
        content: content.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        edited_at: None,
        attachments: Vec::new(),
        mentions_bot: false,
    }
}

/// Same as [`make_inbound`] but marked as authored by a bot.
pub fn make_bot_inbound(channel: &str, author: &str, content: &str) -> InboundMessage {
    InboundMessage {
        author_is_bot: true,
        ..make_inbound(channel, author, content)
    }
}

/// Builds a member record for membership-event tests.
pub fn make_member(id: &str, username: &str, roles: &[&str]) -> MemberInfo {
    MemberInfo {
        id: id.to_string(),
        username: username.to_string(),
        display_name: username.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        created_at: Some("2024-01-01T00:00:00+00:00".to_string()),
        joined_at: Some("2024-06-01T00:00:00+00:00".to_string()),
        is_bot: false,
    }
}
