//! Assistant Response Service
//!
//! The orchestration facade for the emotional assistant: selects the tone's
//! system prompt, folds in a bounded slice of conversation history and any
//! attached file, calls the model and returns the reply with tone-matched
//! follow-up suggestions. When the model path fails the student still gets
//! a canned reply in the same register, at reduced confidence.

use crate::assistant::{AssistantRequest, AssistantResponse, AttachmentKind, Sender};
use crate::error::GenerationError;
use crate::fallback::{self, LIVE_CONFIDENCE};
use crate::llm_client::{ChatClient, GenerationParams};
use crate::prompts;
use crate::retry::{self, RetryPolicy};
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestMessageContentPartImageArgs, ChatCompletionRequestMessageContentPartTextArgs,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};
use std::sync::Arc;
use tracing::warn;

/// Most recent conversation turns forwarded to the model.
const CONTEXT_WINDOW: usize = 6;
/// Tighter window when a file rides along, leaving token room for its content.
const CONTEXT_WINDOW_WITH_FILE: usize = 5;
/// Cap on inlined file content, in characters.
const FILE_PREVIEW_CHARS: usize = 8000;

/// Generates assistant replies through an injected [`ChatClient`].
pub struct AssistantService {
    client: Arc<dyn ChatClient>,
    params: GenerationParams,
    retry: RetryPolicy,
}

impl AssistantService {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            params: Self::default_params(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Conversational sampling: moderate temperature, nucleus sampling and
    /// light repetition penalties keep replies varied without rambling.
    fn default_params() -> GenerationParams {
        GenerationParams {
            temperature: 0.7,
            max_tokens: 1500,
            top_p: Some(0.95),
            frequency_penalty: Some(0.3),
            presence_penalty: Some(0.3),
            json_response: false,
        }
    }

    /// Produces a reply for the student's message.
    ///
    /// Never fails from the caller's perspective: any model-path error is
    /// absorbed into the tone's canned fallback reply.
    pub async fn respond(&self, request: &AssistantRequest) -> AssistantResponse {
        match self.live_text(request).await {
            Ok(text) => {
                let preset = prompts::tone_preset(request.tone);
                AssistantResponse {
                    text,
                    confidence: Some(LIVE_CONFIDENCE),
                    suggestions: preset.suggestions.iter().map(|s| s.to_string()).collect(),
                }
            }
            Err(err) => {
                warn!(
                    tone = ?request.tone,
                    error = %err,
                    "Assistant generation failed, returning canned reply"
                );
                fallback::fallback_response(request.tone)
            }
        }
    }

    async fn live_text(&self, request: &AssistantRequest) -> Result<String, GenerationError> {
        let messages = self.build_messages(request)?;
        retry::retry_generation(&self.retry, || {
            self.client.complete(messages.clone(), self.params.clone())
        })
        .await
    }

    fn build_messages(
        &self,
        request: &AssistantRequest,
    ) -> Result<Vec<ChatCompletionRequestMessage>, GenerationError> {
        let preset = prompts::tone_preset(request.tone);

        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();
        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(preset.system_prompt)
                .build()?
                .into(),
        );

        let window = if request.file_content.is_some() {
            CONTEXT_WINDOW_WITH_FILE
        } else {
            CONTEXT_WINDOW
        };
        let start = request.context.len().saturating_sub(window);
        for message in &request.context[start..] {
            match message.sender {
                Sender::User => messages.push(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(message.text.as_str())
                        .build()?
                        .into(),
                ),
                Sender::Assistant => messages.push(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(message.text.as_str())
                        .build()?
                        .into(),
                ),
            }
        }

        messages.push(self.user_turn(request)?);
        Ok(messages)
    }

    /// Assembles the current user turn, including any attached file.
    fn user_turn(
        &self,
        request: &AssistantRequest,
    ) -> Result<ChatCompletionRequestMessage, GenerationError> {
        let file_name = request.file_name.as_deref().unwrap_or("arquivo");

        match (request.file_kind, request.file_content.as_deref()) {
            // An image arrives as a data URI and becomes a multimodal turn.
            (Some(AttachmentKind::Image), Some(content))
                if content.starts_with("data:image") =>
            {
                let text = if request.message.trim().is_empty() {
                    format!(
                        "Por favor, analise esta imagem ({}) e forneça feedback educacional apropriado ao tom selecionado.",
                        file_name
                    )
                } else {
                    format!("{}\n\n[Imagem anexada: {}]", request.message, file_name)
                };

                let parts: Vec<ChatCompletionRequestUserMessageContentPart> = vec![
                    ChatCompletionRequestMessageContentPartTextArgs::default()
                        .text(text)
                        .build()?
                        .into(),
                    ChatCompletionRequestMessageContentPartImageArgs::default()
                        .image_url(ImageUrlArgs::default().url(content).build()?)
                        .build()?
                        .into(),
                ];

                Ok(ChatCompletionRequestUserMessageArgs::default()
                    .content(ChatCompletionRequestUserMessageContent::Array(parts))
                    .build()?
                    .into())
            }
            // Textual files are inlined, truncated to the preview budget.
            (kind, Some(content)) => {
                let label = kind.unwrap_or(AttachmentKind::Text).label();
                let preview: String = if content.starts_with("data:") {
                    "[Conteúdo do arquivo não textual]".to_string()
                } else {
                    content.chars().take(FILE_PREVIEW_CHARS).collect()
                };
                let question = if request.message.trim().is_empty() {
                    "Por favor, analise este arquivo e forneça recomendações de estudo apropriadas ao tom selecionado."
                        .to_string()
                } else {
                    format!("PERGUNTA/SOLICITAÇÃO DO ALUNO: {}", request.message)
                };

                let text = format!(
                    "ARQUIVO ENVIADO: {} ({})\n\nCONTEÚDO DO ARQUIVO:\n{}\n\n{}",
                    file_name, label, preview, question
                );

                Ok(ChatCompletionRequestUserMessageArgs::default()
                    .content(text)
                    .build()?
                    .into())
            }
            _ => Ok(ChatCompletionRequestUserMessageArgs::default()
                .content(request.message.as_str())
                .build()?
                .into()),
        }
    }
}
