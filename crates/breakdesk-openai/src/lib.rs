// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat Completions provider adapter.
//!
//! Implements [`CompletionProvider`] on top of [`OpenAiClient`]. The transcript
//! is forwarded as-is; this crate owns no prompt content.

pub mod client;
pub mod types;

use async_trait::async_trait;
use breakdesk_config::BreakdeskConfig;
use breakdesk_core::error::BreakdeskError;
use breakdesk_core::traits::{CompletionProvider, PluginAdapter};
use breakdesk_core::types::{
    CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ApiMessage, ChatCompletionRequest};

/// Chat Completions provider implementing [`CompletionProvider`].
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a provider from configuration and a resolved API key.
    pub fn new(config: &BreakdeskConfig, api_key: &SecretString) -> Result<Self, BreakdeskError> {
        let client = OpenAiClient::new(api_key)?.with_base_url(config.openai.base_url.clone());
        info!(
            model = %config.agent.model,
            endpoint = client.base_url(),
            "completion provider initialized"
        );
        Ok(Self { client })
    }

    /// Creates a provider with an existing client.
    pub fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }

    fn to_api_request(request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.to_string(),
                    content: Some(m.content.clone()),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn health_check(&self) -> Result<HealthStatus, BreakdeskError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, BreakdeskError> {
        let api_request = Self::to_api_request(&request);
        let response = self.client.complete_chat(&api_request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BreakdeskError::Provider {
                message: "completion response contained no choices".into(),
                source: None,
            })?;

        debug!(
            id = %response.id,
            finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown"),
            "completion received"
        );

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakdesk_core::types::ChatMessage;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenAiProvider {
        let client = OpenAiClient::new(&SecretString::from("sk-test".to_string()))
            .unwrap()
            .with_base_url(server.uri());
        OpenAiProvider::with_client(client)
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4-turbo-preview".into(),
            messages: vec![
                ChatMessage::system("collect five fields"),
                ChatMessage::user("Excavator"),
                ChatMessage::assistant("What is the equipment ID?"),
                ChatMessage::user("E-12"),
            ],
        }
    }

    #[tokio::test]
    async fn forwards_full_transcript_with_roles() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "collect five fields"},
                    {"role": "user", "content": "Excavator"},
                    {"role": "assistant", "content": "What is the equipment ID?"},
                    {"role": "user", "content": "E-12"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-2",
                "model": "gpt-4-turbo-preview-0125",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Describe the problem."}}],
                "usage": {"prompt_tokens": 40, "completion_tokens": 5}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = provider(&server).complete(request()).await.unwrap();
        assert_eq!(response.content, "Describe the problem.");
        assert_eq!(response.model, "gpt-4-turbo-preview-0125");
        assert_eq!(
            response.usage,
            Some(TokenUsage {
                prompt_tokens: 40,
                completion_tokens: 5
            })
        );
    }

    #[tokio::test]
    async fn empty_choices_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-3",
                "model": "gpt-4-turbo-preview",
                "choices": []
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(request()).await.unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[tokio::test]
    async fn name_and_health() {
        let server = MockServer::start().await;
        let provider = provider(&server);
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.health_check().await.unwrap(), HealthStatus::Healthy);
    }
}
