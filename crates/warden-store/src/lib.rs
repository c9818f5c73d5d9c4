// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent state for the Warden steward bot.
//!
//! Four stores: the scored interaction log, the user directory, the
//! per-channel message history, and the dynamic command table. The first
//! two and the command table are JSON documents flushed synchronously
//! after every mutation; the channel history is in-memory only.

pub mod channels;
pub mod commands;
pub mod interactions;
mod persist;
pub mod users;

pub use channels::{ChannelMessageLog, ChannelMessageRecord};
pub use commands::{CommandSpec, CommandTable};
pub use interactions::{Interaction, InteractionStore, SCORE_FAILURE, SCORE_SUCCESS};
pub use users::{UserDirectory, UserMessage, UserProfile};
