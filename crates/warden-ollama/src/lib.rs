// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama integration for the Warden steward bot.
//!
//! [`OllamaModel`] adapts [`OllamaClient`] to the [`LanguageModel`]
//! collaborator trait consumed by the conversation loop.

pub mod client;
pub mod types;

use async_trait::async_trait;
use warden_config::model::OllamaConfig;
use warden_core::types::HealthStatus;
use warden_core::{LanguageModel, WardenError};

pub use client::OllamaClient;
use types::ChatMessage;

/// [`LanguageModel`] implementation backed by a local Ollama endpoint.
pub struct OllamaModel {
    client: OllamaClient,
}

impl OllamaModel {
    pub fn new(config: &OllamaConfig) -> Result<Self, WardenError> {
        Ok(Self {
            client: OllamaClient::new(config)?,
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaModel {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, WardenError> {
        let response = self
            .client
            .chat(vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ])
            .await?;
        Ok(response.message.content)
    }

    async fn health_check(&self) -> Result<HealthStatus, WardenError> {
        match self.client.version().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}
