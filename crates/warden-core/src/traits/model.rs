// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language model trait for completion providers (Ollama, etc.).

use async_trait::async_trait;

use crate::error::WardenError;
use crate::types::HealthStatus;

/// Collaborator interface for a language model.
///
/// The model is an untrusted free-text generator; callers must treat the
/// returned string as raw material for the response parser.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Human-readable name of this model backend.
    fn name(&self) -> &str;

    /// Sends a completion request and returns the full response text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
    -> Result<String, WardenError>;

    /// Performs a health check and returns the backend's current status.
    async fn health_check(&self) -> Result<HealthStatus, WardenError>;
}
