// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Warden workspace.
//!
//! Provides a deterministic [`MockModel`] and fixture builders so tests can
//! drive the conversation loop without a live platform or model.

pub mod fixtures;
pub mod mock_model;

pub use fixtures::{make_bot_inbound, make_inbound, make_member};
pub use mock_model::MockModel;
