//! Chat-completion client abstraction.
//!
//! `ChatClient` is the seam between the generation services and the model
//! endpoint: the services build role-tagged messages, the client performs
//! exactly one network round-trip and hands back the raw text of the first
//! choice. Everything that can go wrong on the wire collapses into
//! `GenerationError::ModelUnavailable` so callers have a single transient
//! category to retry or fall back on.

use crate::error::GenerationError;
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{ChatCompletionRequestMessage, CreateChatCompletionRequestArgs, ResponseFormat},
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Sampling and output parameters for one completion call. Supplied by the
/// calling service, not hardcoded per call site.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
    /// Ask the provider for a strict JSON object response.
    pub json_response: bool,
}

impl From<OpenAIError> for GenerationError {
    fn from(err: OpenAIError) -> Self {
        GenerationError::ModelUnavailable(err.to_string())
    }
}

/// A generic client for one-shot chat completions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Performs a single, non-streaming completion call and returns the raw
    /// content of the first choice. An empty or missing choice is an error;
    /// no retries happen at this level.
    async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
        params: GenerationParams,
    ) -> Result<String, GenerationError>;

    /// The model identifier this client talks to, for result metadata.
    fn model_id(&self) -> &str;
}

/// An implementation of `ChatClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAICompatibleClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gpt-4o-mini").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-call timeout. The model call is otherwise unbounded.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ChatClient for OpenAICompatibleClient {
    async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
        params: GenerationParams,
    ) -> Result<String, GenerationError> {
        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.model)
            .messages(messages)
            .temperature(params.temperature)
            .max_tokens(params.max_tokens);

        if let Some(top_p) = params.top_p {
            builder.top_p(top_p);
        }
        if let Some(penalty) = params.frequency_penalty {
            builder.frequency_penalty(penalty);
        }
        if let Some(penalty) = params.presence_penalty {
            builder.presence_penalty(penalty);
        }
        if params.json_response {
            builder.response_format(ResponseFormat::JsonObject);
        }

        let request = builder.build()?;

        debug!(model = %self.model, "Sending chat completion request");
        let response = timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                GenerationError::ModelUnavailable(format!(
                    "model call timed out after {}s",
                    self.timeout.as_secs()
                ))
            })??;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GenerationError::ModelUnavailable("Resposta vazia da API".to_string()))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_errors_map_to_model_unavailable() {
        let err: GenerationError = OpenAIError::InvalidArgument("bad argument".to_string()).into();
        assert!(err.is_transient());
    }

    #[test]
    fn test_client_reports_its_model() {
        let client = OpenAICompatibleClient::new(OpenAIConfig::new(), "gpt-4o-mini".to_string());
        assert_eq!(client.model_id(), "gpt-4o-mini");
        assert_eq!(client.timeout, OpenAICompatibleClient::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_timeout_override() {
        let client = OpenAICompatibleClient::new(OpenAIConfig::new(), "gpt-4o-mini".to_string())
            .with_timeout(Duration::from_secs(5));
        assert_eq!(client.timeout, Duration::from_secs(5));
    }
}
