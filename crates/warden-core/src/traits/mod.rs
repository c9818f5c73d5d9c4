// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The conversation loop and the dispatcher only ever talk to the chat
//! platform and the language model through these traits, via `#[async_trait]`
//! for dynamic dispatch compatibility.

pub mod model;
pub mod platform;

pub use model::LanguageModel;
pub use platform::ChatPlatform;
