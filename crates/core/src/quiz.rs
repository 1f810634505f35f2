//! Quiz Domain Types
//!
//! Data structures exchanged between the UI, the quiz generation service and
//! the model endpoint, plus request validation. Wire names stay camelCase so
//! the existing front-end keeps working unchanged.

use crate::error::GenerationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty levels recognized by the quiz generator.
///
/// Serialized with the Portuguese wire values the platform has always used
/// (`"facil"`, `"medio"`, `"dificil"`). Unknown values fail deserialization
/// instead of silently defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizDifficulty {
    Facil,
    Medio,
    Dificil,
}

impl fmt::Display for QuizDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizDifficulty::Facil => write!(f, "facil"),
            QuizDifficulty::Medio => write!(f, "medio"),
            QuizDifficulty::Dificil => write!(f, "dificil"),
        }
    }
}

impl FromStr for QuizDifficulty {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "facil" => Ok(QuizDifficulty::Facil),
            "medio" => Ok(QuizDifficulty::Medio),
            "dificil" => Ok(QuizDifficulty::Dificil),
            other => Err(GenerationError::InvalidRequest(format!(
                "Dificuldade inválida: '{}'",
                other
            ))),
        }
    }
}

/// A single answer alternative within a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
}

/// A validated multiple-choice question.
///
/// Invariants upheld by the parser and the fallback generator: exactly four
/// options, ids unique within the question, and `correct_answer_id` always
/// referencing one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<QuizOption>,
    pub correct_answer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<QuizDifficulty>,
}

/// Parameters for one quiz generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGenerationRequest {
    pub topic: String,
    pub subject: String,
    pub difficulty: QuizDifficulty,
    pub number_of_questions: usize,
    /// Target school grade (série), e.g. 7 for "7º ano".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_grade: Option<u8>,
    /// A narrower focus within the topic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_focus: Option<String>,
}

impl QuizGenerationRequest {
    pub const MIN_QUESTIONS: usize = 3;
    pub const MAX_QUESTIONS: usize = 20;

    /// Checks the request constraints. Must pass before any network call is
    /// made; the message names the field that failed.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.topic.trim().chars().count() < 3 {
            return Err(GenerationError::InvalidRequest(
                "Tópico deve ter pelo menos 3 caracteres".to_string(),
            ));
        }
        if self.subject.trim().chars().count() < 3 {
            return Err(GenerationError::InvalidRequest(
                "Disciplina deve ser informada".to_string(),
            ));
        }
        if self.number_of_questions < Self::MIN_QUESTIONS
            || self.number_of_questions > Self::MAX_QUESTIONS
        {
            return Err(GenerationError::InvalidRequest(
                "Número de questões deve estar entre 3 e 20".to_string(),
            ));
        }
        Ok(())
    }
}

/// A model-produced question that was dropped during validation, with the
/// reason it was rejected. Kept next to the surviving batch so callers and
/// tests can observe exactly what was discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedQuestion {
    /// Zero-based position of the item in the model's output.
    pub index: usize,
    pub reason: String,
}

/// Timing and provenance stamped onto every generation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub generated_at: DateTime<Utc>,
    /// Model identifier, present only when the content is model-generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub processing_time_ms: u64,
}

/// The uniform envelope returned by the quiz service.
///
/// `questions` is always usable: on failure it holds fallback content and
/// `success` is false so the UI can surface the degradation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGenerationResponse {
    pub success: bool,
    pub questions: Vec<QuizQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedQuestion>,
    pub metadata: GenerationMetadata,
}
