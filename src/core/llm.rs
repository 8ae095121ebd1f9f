//! Chat-completion client for the hosted LLM collaborator.
//!
//! The collaborator is an opaque function from role-tagged messages to a
//! single text blob. No streaming, no structured output. Requests carry a
//! bounded timeout and are retried once on transient transport failure;
//! an API-level error status is surfaced immediately.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Duration;

use crate::config::LLMConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("failed to decode completion response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("completion response contained no choices")]
    EmptyCompletion,
}

pub struct LLMClient {
    client: Client,
    api_key: String,
    config: LLMConfig,
}

impl LLMClient {
    pub fn new(api_key: String, config: LLMConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config,
        }
    }

    pub fn default_temperature(&self) -> f32 {
        self.config.temperature
    }

    /// One completion: a system prompt, a user prompt, a temperature, a
    /// single text blob back.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, CollaboratorError> {
        let messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ];
        self.chat(&messages, temperature).await
    }

    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, CollaboratorError> {
        let endpoint = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature,
        };

        let mut attempts = 0;
        let response = loop {
            attempts += 1;
            let result = self
                .client
                .post(&endpoint)
                .bearer_auth(&self.api_key)
                .timeout(Duration::from_secs(self.config.timeout_secs))
                .json(&request)
                .send()
                .await;

            match result {
                Ok(response) => break response,
                Err(source) if attempts == 1 && (source.is_timeout() || source.is_connect()) => {
                    tracing::warn!(
                        "[LLMClient] Transient failure talking to {}, retrying once: {}",
                        endpoint,
                        source
                    );
                }
                Err(source) => {
                    return Err(CollaboratorError::Http { endpoint, source });
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Api { status, body });
        }

        let completion: ChatResponse = response.json().await.map_err(CollaboratorError::Decode)?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CollaboratorError::EmptyCompletion)
    }
}
