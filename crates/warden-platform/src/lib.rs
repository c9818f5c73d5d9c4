// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory chat platform for the Warden steward bot.
//!
//! The dispatcher and conversation loop only ever see the
//! [`warden_core::ChatPlatform`] trait; this crate provides the in-memory
//! guild used by the interactive shell and by tests. A networked platform
//! adapter would live in a sibling crate implementing the same trait.

pub mod guild;

pub use guild::{InMemoryGuild, KNOWN_PERMISSIONS};
