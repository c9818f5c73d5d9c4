// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat platform trait: the narrow capability surface the dispatcher acts through.

use async_trait::async_trait;

use crate::error::WardenError;
use crate::types::{CategoryInfo, ChannelInfo, ChannelKind, RoleInfo};

/// Capability interface for a guild on the chat platform.
///
/// All name lookups are case-insensitive. Every write must be fully applied
/// before the call returns, so an action sequence observes the side effects
/// of its earlier elements.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Human-readable name of this platform instance.
    fn name(&self) -> &str;

    /// Looks up a channel by name.
    async fn find_channel(&self, name: &str) -> Result<Option<ChannelInfo>, WardenError>;

    /// Posts text to the named channel. Fails if the channel does not exist.
    async fn send_message(&self, channel: &str, text: &str) -> Result<(), WardenError>;

    /// Creates a channel, auto-creating the named category if it is absent.
    async fn create_channel(
        &self,
        name: &str,
        kind: ChannelKind,
        category: Option<&str>,
    ) -> Result<ChannelInfo, WardenError>;

    /// Creates a category, or returns the existing one of the same name.
    async fn create_category(&self, name: &str) -> Result<CategoryInfo, WardenError>;

    /// Creates a role. Unknown permission names are ignored, not fatal.
    async fn create_role(
        &self,
        name: &str,
        color: Option<&str>,
        permissions: &[String],
    ) -> Result<RoleInfo, WardenError>;

    /// Sets the topic of the named channel.
    async fn edit_channel_topic(&self, channel: &str, topic: &str) -> Result<(), WardenError>;

    /// Reparents a channel, auto-creating the category if it is absent.
    async fn move_channel(&self, channel: &str, category: &str) -> Result<(), WardenError>;

    /// Deletes the named channel.
    async fn delete_channel(&self, name: &str) -> Result<(), WardenError>;

    async fn list_channels(&self) -> Result<Vec<ChannelInfo>, WardenError>;

    async fn list_categories(&self) -> Result<Vec<CategoryInfo>, WardenError>;

    async fn list_roles(&self) -> Result<Vec<RoleInfo>, WardenError>;
}
