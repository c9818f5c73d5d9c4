// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Warden steward bot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Warden workspace. Collaborator adapters
//! (chat platform, language model) implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::WardenError;
pub use traits::{ChatPlatform, LanguageModel};
pub use types::{
    Action, ActionOutcome, ChannelKind, HealthStatus, InboundMessage, MemberInfo, RawAction,
};
