//! Quiz Generation Service
//!
//! The orchestration facade for quiz generation: validates the request,
//! builds the prompts, calls the model (with bounded retry for transient
//! failures), validates the output and wraps everything in the uniform
//! response envelope. Callers always receive usable questions; `success`
//! tells them whether the content is model-generated or placeholder.

use crate::error::GenerationError;
use crate::fallback;
use crate::llm_client::{ChatClient, GenerationParams};
use crate::parser::{self, ParsedQuestions};
use crate::prompts;
use crate::quiz::{GenerationMetadata, QuizGenerationRequest, QuizGenerationResponse};
use crate::retry::{self, RetryPolicy};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Generates quizzes through an injected [`ChatClient`].
///
/// Stateless across calls: concurrent generations are independent and share
/// nothing but the client.
pub struct QuizService {
    client: Arc<dyn ChatClient>,
    params: GenerationParams,
    retry: RetryPolicy,
}

impl QuizService {
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

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Quiz generation wants creative but well-formed output: high
    /// temperature plus the strict JSON response format.
    fn default_params() -> GenerationParams {
        GenerationParams {
            temperature: 0.8,
            max_tokens: 3000,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
            json_response: true,
        }
    }

    /// Generates a quiz for the given request.
    ///
    /// Returns `Err` only for requests that fail validation; every failure
    /// past that point (network, malformed output, insufficient valid
    /// questions) is absorbed into a fallback envelope with `success=false`.
    pub async fn generate(
        &self,
        request: &QuizGenerationRequest,
    ) -> Result<QuizGenerationResponse, GenerationError> {
        request.validate()?;

        let generated_at = Utc::now();
        let batch = generated_at.timestamp_millis();
        let started = Instant::now();

        match self.generate_questions(request, batch).await {
            Ok(parsed) => {
                info!(
                    topic = %request.topic,
                    count = parsed.questions.len(),
                    dropped = parsed.rejected.len(),
                    "Quiz generated"
                );
                Ok(QuizGenerationResponse {
                    success: true,
                    questions: parsed.questions,
                    error: None,
                    rejected: parsed.rejected,
                    metadata: GenerationMetadata {
                        generated_at,
                        model: Some(self.client.model_id().to_string()),
                        processing_time_ms: started.elapsed().as_millis() as u64,
                    },
                })
            }
            Err(err) => {
                warn!(
                    topic = %request.topic,
                    error = %err,
                    "Quiz generation failed, returning fallback questions"
                );
                Ok(QuizGenerationResponse {
                    success: false,
                    questions: fallback::fallback_questions(request, batch),
                    error: Some(err.to_string()),
                    rejected: Vec::new(),
                    metadata: GenerationMetadata {
                        generated_at,
                        model: None,
                        processing_time_ms: started.elapsed().as_millis() as u64,
                    },
                })
            }
        }
    }

    async fn generate_questions(
        &self,
        request: &QuizGenerationRequest,
        batch: i64,
    ) -> Result<ParsedQuestions, GenerationError> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompts::quiz_system_prompt(request.difficulty))
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompts::quiz_user_prompt(request))
                .build()?
                .into(),
        ];

        let raw = retry::retry_generation(&self.retry, || {
            self.client.complete(messages.clone(), self.params.clone())
        })
        .await?;

        let mut parsed = parser::parse_quiz_questions(&raw, request.difficulty, batch)?;

        // Fewer valid questions than asked for is a failed generation, not a
        // short success: mixing in placeholders or silently under-delivering
        // would hide the degradation from the caller.
        if parsed.questions.len() < request.number_of_questions {
            return Err(GenerationError::MalformedResponse(format!(
                "API gerou apenas {} questões válidas, esperado {}",
                parsed.questions.len(),
                request.number_of_questions
            )));
        }
        parsed.questions.truncate(request.number_of_questions);

        Ok(parsed)
    }
}
