// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ollama chat API.
//!
//! Provides [`OllamaClient`] which handles request construction, transient
//! error retry, and error mapping into [`WardenError`].

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};
use warden_config::model::OllamaConfig;
use warden_core::WardenError;

use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse, VersionResponse};

/// HTTP client for a locally hosted Ollama endpoint.
///
/// Retries once after a 1-second delay on transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
    max_retries: u32,
}

impl OllamaClient {
    /// Creates a new Ollama API client from configuration.
    pub fn new(config: &OllamaConfig) -> Result<Self, WardenError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WardenError::Model {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout,
            max_retries: 1,
        })
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a non-streaming chat request and returns the full response.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatResponse, WardenError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        };
        let url = format!("{}/api/chat", self.base_url);

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying chat request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| self.map_send_error(e))?;

            let status = response.status();
            debug!(status = %status, attempt, "chat response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| WardenError::Model {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&body).map_err(|e| WardenError::Model {
                    message: format!("failed to parse chat response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(WardenError::model(format!("API returned {status}: {body}")));
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!("Ollama API error: {}", api_err.error)
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(WardenError::model(message));
        }

        Err(last_error
            .unwrap_or_else(|| WardenError::model("chat request failed after retries")))
    }

    /// Probes the endpoint's version (used for health checks).
    pub async fn version(&self) -> Result<String, WardenError> {
        let url = format!("{}/api/version", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WardenError::model(format!("version probe returned {status}")));
        }

        let parsed: VersionResponse = response.json().await.map_err(|e| WardenError::Model {
            message: format!("failed to parse version response: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(parsed.version)
    }

    fn map_send_error(&self, e: reqwest::Error) -> WardenError {
        if e.is_timeout() {
            WardenError::Timeout {
                duration: self.timeout,
            }
        } else {
            WardenError::Model {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

fn is_transient_error(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::SERVICE_UNAVAILABLE
    )
}
