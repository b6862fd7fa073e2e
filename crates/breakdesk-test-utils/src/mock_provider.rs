// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured replies
//! and records every request it receives.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use breakdesk_core::{
    BreakdeskError, CompletionProvider, CompletionRequest, CompletionResponse, HealthStatus,
    PluginAdapter, TokenUsage,
};

/// A mock provider that answers from a FIFO queue.
///
/// `Err` entries fail the call with a provider error. When the queue is
/// empty, a default "mock response" text is returned.
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(responses.into_iter().map(Ok).collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.replies.lock().await.push_back(Ok(text.into()));
    }

    /// Make the very next call fail with a provider error.
    pub async fn fail_next(&self, message: impl Into<String>) {
        self.replies.lock().await.push_front(Err(message.into()));
    }

    /// Shared handle to every request received so far.
    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    async fn health_check(&self) -> Result<HealthStatus, BreakdeskError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, BreakdeskError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        let next = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()));

        match next {
            Ok(content) => Ok(CompletionResponse {
                content,
                model,
                usage: Some(TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 20,
                }),
            }),
            Err(message) => Err(BreakdeskError::Provider {
                message,
                source: None,
            }),
        }
    }
}
