// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory guild state behind the [`ChatPlatform`] trait.
//!
//! Holds channels, categories, and roles for a single guild, with
//! case-insensitive name lookups throughout. Messages posted through
//! [`ChatPlatform::send_message`] are captured so the shell can display
//! them and tests can assert on them.

use async_trait::async_trait;
use tokio::sync::Mutex;

use warden_core::WardenError;
use warden_core::types::{CategoryInfo, ChannelInfo, ChannelKind, RoleInfo};

/// Permission names the platform recognizes on roles. Unknown names in a
/// create_role request are ignored, not fatal.
pub const KNOWN_PERMISSIONS: &[&str] = &[
    "administrator",
    "manage_guild",
    "manage_channels",
    "manage_roles",
    "manage_messages",
    "kick_members",
    "ban_members",
    "send_messages",
    "read_message_history",
];

#[derive(Debug, Clone)]
struct ChannelState {
    name: String,
    kind: ChannelKind,
    category: Option<String>,
    topic: Option<String>,
}

#[derive(Debug, Clone)]
struct RoleState {
    name: String,
    color: Option<String>,
    permissions: Vec<String>,
}

#[derive(Debug, Default)]
struct GuildState {
    channels: Vec<ChannelState>,
    categories: Vec<String>,
    roles: Vec<RoleState>,
    sent: Vec<(String, String)>,
    delete_calls: usize,
}

/// A single in-memory guild.
pub struct InMemoryGuild {
    name: String,
    state: Mutex<GuildState>,
}

impl InMemoryGuild {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(GuildState::default()),
        }
    }

    /// Seeds a text channel without going through the trait surface.
    pub async fn seed_text_channel(&self, name: &str) {
        let mut state = self.state.lock().await;
        state.channels.push(ChannelState {
            name: name.to_string(),
            kind: ChannelKind::Text,
            category: None,
            topic: None,
        });
    }

    /// All messages posted so far, as `(channel, text)` pairs in post order.
    pub async fn sent_messages(&self) -> Vec<(String, String)> {
        self.state.lock().await.sent.clone()
    }

    /// Removes and returns all captured messages.
    pub async fn drain_sent(&self) -> Vec<(String, String)> {
        std::mem::take(&mut self.state.lock().await.sent)
    }

    /// Number of times the delete operation was invoked (for assertions).
    pub async fn delete_call_count(&self) -> usize {
        self.state.lock().await.delete_calls
    }
}

fn find_channel_index(state: &GuildState, name: &str) -> Option<usize> {
    let needle = name.to_lowercase();
    state
        .channels
        .iter()
        .position(|c| c.name.to_lowercase() == needle)
}

fn text_channel_names(state: &GuildState) -> String {
    state
        .channels
        .iter()
        .filter(|c| c.kind == ChannelKind::Text)
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn ensure_category(state: &mut GuildState, name: &str) -> String {
    let needle = name.to_lowercase();
    match state
        .categories
        .iter()
        .find(|c| c.to_lowercase() == needle)
    {
        Some(existing) => existing.clone(),
        None => {
            state.categories.push(name.to_string());
            name.to_string()
        }
    }
}

fn channel_info(channel: &ChannelState) -> ChannelInfo {
    ChannelInfo {
        name: channel.name.clone(),
        kind: channel.kind,
        category: channel.category.clone(),
        topic: channel.topic.clone(),
    }
}

fn valid_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[async_trait]
impl warden_core::ChatPlatform for InMemoryGuild {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find_channel(&self, name: &str) -> Result<Option<ChannelInfo>, WardenError> {
        let state = self.state.lock().await;
        Ok(find_channel_index(&state, name).map(|i| channel_info(&state.channels[i])))
    }

    async fn send_message(&self, channel: &str, text: &str) -> Result<(), WardenError> {
        let mut state = self.state.lock().await;
        let needle = channel.to_lowercase();
        let target = state
            .channels
            .iter()
            .find(|c| c.kind == ChannelKind::Text && c.name.to_lowercase() == needle)
            .map(|c| c.name.clone());
        match target {
            Some(name) => {
                state.sent.push((name, text.to_string()));
                Ok(())
            }
            None => Err(WardenError::platform(format!(
                "channel `{channel}` not found. Available text channels: {}",
                text_channel_names(&state)
            ))),
        }
    }

    async fn create_channel(
        &self,
        name: &str,
        kind: ChannelKind,
        category: Option<&str>,
    ) -> Result<ChannelInfo, WardenError> {
        let mut state = self.state.lock().await;
        let category = category.map(|c| ensure_category(&mut state, c));
        let channel = ChannelState {
            name: name.to_string(),
            kind,
            category,
            topic: None,
        };
        let info = channel_info(&channel);
        state.channels.push(channel);
        Ok(info)
    }

    async fn create_category(&self, name: &str) -> Result<CategoryInfo, WardenError> {
        let mut state = self.state.lock().await;
        let name = ensure_category(&mut state, name);
        Ok(CategoryInfo { name })
    }

    async fn create_role(
        &self,
        name: &str,
        color: Option<&str>,
        permissions: &[String],
    ) -> Result<RoleInfo, WardenError> {
        if let Some(color) = color
            && !valid_color(color)
        {
            return Err(WardenError::platform(format!(
                "invalid role color `{color}` (expected #RRGGBB)"
            )));
        }

        let granted: Vec<String> = permissions
            .iter()
            .filter(|p| KNOWN_PERMISSIONS.contains(&p.as_str()))
            .cloned()
            .collect();

        let mut state = self.state.lock().await;
        let role = RoleState {
            name: name.to_string(),
            color: color.map(str::to_string),
            permissions: granted,
        };
        let info = RoleInfo {
            name: role.name.clone(),
            color: role.color.clone(),
            permissions: role.permissions.clone(),
        };
        state.roles.push(role);
        Ok(info)
    }

    async fn edit_channel_topic(&self, channel: &str, topic: &str) -> Result<(), WardenError> {
        let mut state = self.state.lock().await;
        let needle = channel.to_lowercase();
        let target = state
            .channels
            .iter_mut()
            .find(|c| c.kind == ChannelKind::Text && c.name.to_lowercase() == needle);
        match target {
            Some(c) => {
                c.topic = Some(topic.to_string());
                Ok(())
            }
            None => Err(WardenError::platform(format!(
                "channel `{channel}` not found. Available text channels: {}",
                text_channel_names(&state)
            ))),
        }
    }

    async fn move_channel(&self, channel: &str, category: &str) -> Result<(), WardenError> {
        let mut state = self.state.lock().await;
        let Some(index) = find_channel_index(&state, channel) else {
            return Err(WardenError::platform(format!(
                "channel `{channel}` not found"
            )));
        };
        let category = ensure_category(&mut state, category);
        state.channels[index].category = Some(category);
        Ok(())
    }

    async fn delete_channel(&self, name: &str) -> Result<(), WardenError> {
        let mut state = self.state.lock().await;
        state.delete_calls += 1;
        match find_channel_index(&state, name) {
            Some(index) => {
                state.channels.remove(index);
                Ok(())
            }
            None => Err(WardenError::platform(format!("channel `{name}` not found"))),
        }
    }

    async fn list_channels(&self) -> Result<Vec<ChannelInfo>, WardenError> {
        let state = self.state.lock().await;
        Ok(state.channels.iter().map(channel_info).collect())
    }

    async fn list_categories(&self) -> Result<Vec<CategoryInfo>, WardenError> {
        let state = self.state.lock().await;
        Ok(state
            .categories
            .iter()
            .map(|name| CategoryInfo { name: name.clone() })
            .collect())
    }

    async fn list_roles(&self) -> Result<Vec<RoleInfo>, WardenError> {
        let state = self.state.lock().await;
        Ok(state
            .roles
            .iter()
            .map(|r| RoleInfo {
                name: r.name.clone(),
                color: r.color.clone(),
                permissions: r.permissions.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::ChatPlatform;

    #[tokio::test]
    async fn channel_lookup_is_case_insensitive() {
        let guild = InMemoryGuild::new("test");
        guild.seed_text_channel("News").await;
        let found = guild.find_channel("nEwS").await.unwrap().unwrap();
        assert_eq!(found.name, "News");
        assert!(guild.find_channel("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn send_message_requires_existing_text_channel() {
        let guild = InMemoryGuild::new("test");
        guild.seed_text_channel("general").await;
        guild
            .create_channel("lounge", ChannelKind::Voice, None)
            .await
            .unwrap();

        guild.send_message("GENERAL", "hi").await.unwrap();
        assert_eq!(
            guild.sent_messages().await,
            vec![("general".to_string(), "hi".to_string())]
        );

        // Voice channels are not valid message targets.
        let err = guild.send_message("lounge", "hi").await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn create_channel_auto_creates_named_category() {
        let guild = InMemoryGuild::new("test");
        let info = guild
            .create_channel("news", ChannelKind::Text, Some("Info"))
            .await
            .unwrap();
        assert_eq!(info.category.as_deref(), Some("Info"));
        assert_eq!(guild.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_category_is_idempotent_by_name() {
        let guild = InMemoryGuild::new("test");
        guild.create_category("Info").await.unwrap();
        let second = guild.create_category("info").await.unwrap();
        assert_eq!(second.name, "Info");
        assert_eq!(guild.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_role_ignores_unknown_permissions() {
        let guild = InMemoryGuild::new("test");
        let role = guild
            .create_role(
                "mods",
                Some("#ff0000"),
                &[
                    "manage_messages".to_string(),
                    "summon_dragons".to_string(),
                ],
            )
            .await
            .unwrap();
        assert_eq!(role.permissions, vec!["manage_messages".to_string()]);
    }

    #[tokio::test]
    async fn create_role_rejects_malformed_color() {
        let guild = InMemoryGuild::new("test");
        let err = guild.create_role("mods", Some("red"), &[]).await.unwrap_err();
        assert!(err.to_string().contains("invalid role color"));
    }

    #[tokio::test]
    async fn move_channel_auto_creates_category() {
        let guild = InMemoryGuild::new("test");
        guild.seed_text_channel("news").await;
        guild.move_channel("news", "Archive").await.unwrap();
        let info = guild.find_channel("news").await.unwrap().unwrap();
        assert_eq!(info.category.as_deref(), Some("Archive"));
    }

    #[tokio::test]
    async fn delete_channel_removes_and_counts_calls() {
        let guild = InMemoryGuild::new("test");
        guild.seed_text_channel("doomed").await;
        guild.delete_channel("DOOMED").await.unwrap();
        assert!(guild.find_channel("doomed").await.unwrap().is_none());
        assert_eq!(guild.delete_call_count().await, 1);
        assert!(guild.delete_channel("doomed").await.is_err());
    }

    #[tokio::test]
    async fn edit_channel_topic_sets_topic() {
        let guild = InMemoryGuild::new("test");
        guild.seed_text_channel("news").await;
        guild.edit_channel_topic("news", "daily updates").await.unwrap();
        let info = guild.find_channel("news").await.unwrap().unwrap();
        assert_eq!(info.topic.as_deref(), Some("daily updates"));
    }
}
