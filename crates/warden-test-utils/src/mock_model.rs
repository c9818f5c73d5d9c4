// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock language model for deterministic testing.
//!
//! `MockModel` implements `LanguageModel` with pre-configured outcomes,
//! enabling fast, CI-runnable tests without a live Ollama endpoint.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use warden_core::types::HealthStatus;
use warden_core::{LanguageModel, WardenError};

/// A mock language model that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue: `Ok` entries become completion
/// text, `Err` entries become model errors. When the queue is empty, a
/// default "mock response" text is returned.
pub struct MockModel {
    outcomes: Arc<Mutex<VecDeque<Result<String, String>>>>,
}

impl MockModel {
    /// Create a new mock model with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a mock model pre-loaded with the given response texts.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(
                responses.into_iter().map(Ok).collect(),
            )),
        }
    }

    /// Add a successful response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(text.into()));
    }

    /// Add a failure to the end of the queue; `complete` will return a
    /// model error with this cause.
    pub async fn add_failure(&self, cause: impl Into<String>) {
        self.outcomes.lock().await.push_back(Err(cause.into()));
    }

    async fn next_outcome(&self) -> Result<String, String> {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    fn name(&self) -> &str {
        "mock-model"
    }

    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, WardenError> {
        self.next_outcome().await.map_err(WardenError::model)
    }

    async fn health_check(&self) -> Result<HealthStatus, WardenError> {
        Ok(HealthStatus::Healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let model = MockModel::new();
        let text = model.complete("sys", "hi").await.unwrap();
        assert_eq!(text, "mock response");
    }

    #[tokio::test]
    async fn queued_outcomes_returned_in_order() {
        let model = MockModel::with_responses(vec!["first".into(), "second".into()]);
        model.add_failure("model down").await;

        assert_eq!(model.complete("s", "u").await.unwrap(), "first");
        assert_eq!(model.complete("s", "u").await.unwrap(), "second");
        let err = model.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, WardenError::Model { .. }));
        // Queue exhausted, falls back to default.
        assert_eq!(model.complete("s", "u").await.unwrap(), "mock response");
    }
}
