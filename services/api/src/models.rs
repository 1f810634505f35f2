//! API Models
//!
//! Request payloads and response bodies for the HTTP surface, annotated for
//! OpenAPI generation with `utoipa`. Payloads are converted into the core
//! domain types on the way in; enum-like fields arrive as strings and are
//! parsed strictly, so an unknown difficulty or tone fails the request
//! instead of silently defaulting.

use chrono::{DateTime, Utc};
use saber_core::assistant::{
    AssistantRequest, AssistantResponse, AttachmentKind, ContextMessage, Sender, Tone,
};
use saber_core::quiz::{
    QuizDifficulty, QuizGenerationRequest, QuizGenerationResponse, QuizQuestion,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Request payloads ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizPayload {
    #[schema(example = "Frações")]
    pub topic: String,
    #[schema(example = "Matemática")]
    pub subject: String,
    #[schema(example = "medio")]
    pub difficulty: String,
    #[schema(example = 5)]
    pub number_of_questions: usize,
    #[schema(example = 7)]
    pub target_grade: Option<u8>,
    pub specific_focus: Option<String>,
}

impl TryFrom<GenerateQuizPayload> for QuizGenerationRequest {
    type Error = String;

    fn try_from(payload: GenerateQuizPayload) -> Result<Self, Self::Error> {
        let difficulty = payload
            .difficulty
            .parse::<QuizDifficulty>()
            .map_err(|err| err.to_string())?;
        Ok(QuizGenerationRequest {
            topic: payload.topic,
            subject: payload.subject,
            difficulty,
            number_of_questions: payload.number_of_questions,
            target_grade: payload.target_grade,
            specific_focus: payload.specific_focus,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContextEntryPayload {
    #[schema(example = "user")]
    pub sender: String,
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistantPayload {
    #[schema(example = "Estou triste")]
    pub message: String,
    #[schema(example = "humor")]
    pub tone: String,
    pub file_content: Option<String>,
    pub file_name: Option<String>,
    #[schema(example = "pdf")]
    pub file_kind: Option<String>,
    #[serde(default)]
    pub context: Vec<ContextEntryPayload>,
}

impl TryFrom<AssistantPayload> for AssistantRequest {
    type Error = String;

    fn try_from(payload: AssistantPayload) -> Result<Self, Self::Error> {
        let tone = payload.tone.parse::<Tone>().map_err(|err| err.to_string())?;
        let file_kind = payload
            .file_kind
            .as_deref()
            .map(|kind| kind.parse::<AttachmentKind>().map_err(|err| err.to_string()))
            .transpose()?;

        let mut context = Vec::with_capacity(payload.context.len());
        for entry in payload.context {
            let sender = match entry.sender.trim().to_lowercase().as_str() {
                "user" => Sender::User,
                "assistant" => Sender::Assistant,
                other => return Err(format!("Remetente inválido: '{}'", other)),
            };
            context.push(ContextMessage {
                sender,
                text: entry.text,
            });
        }

        Ok(AssistantRequest {
            message: payload.message,
            tone,
            file_content: payload.file_content,
            file_name: payload.file_name,
            file_kind,
            context,
        })
    }
}

// --- Response bodies ---

#[derive(Debug, Serialize, ToSchema)]
pub struct OptionBody {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBody {
    pub id: String,
    pub question: String,
    pub options: Vec<OptionBody>,
    pub correct_answer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[schema(example = "medio")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl From<QuizQuestion> for QuestionBody {
    fn from(question: QuizQuestion) -> Self {
        Self {
            id: question.id,
            question: question.question,
            options: question
                .options
                .into_iter()
                .map(|opt| OptionBody {
                    id: opt.id,
                    text: opt.text,
                })
                .collect(),
            correct_answer_id: question.correct_answer_id,
            explanation: question.explanation,
            difficulty: question.difficulty.map(|d| d.to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RejectedQuestionBody {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBody {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponseBody {
    pub success: bool,
    pub questions: Vec<QuestionBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedQuestionBody>,
    pub metadata: MetadataBody,
}

impl From<QuizGenerationResponse> for QuizResponseBody {
    fn from(response: QuizGenerationResponse) -> Self {
        Self {
            success: response.success,
            questions: response.questions.into_iter().map(Into::into).collect(),
            error: response.error,
            rejected: response
                .rejected
                .into_iter()
                .map(|rejected| RejectedQuestionBody {
                    index: rejected.index,
                    reason: rejected.reason,
                })
                .collect(),
            metadata: MetadataBody {
                generated_at: response.metadata.generated_at,
                model: response.metadata.model,
                processing_time_ms: response.metadata.processing_time_ms,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssistantReplyBody {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl From<AssistantResponse> for AssistantReplyBody {
    fn from(response: AssistantResponse) -> Self {
        Self {
            text: response.text,
            confidence: response.confidence,
            suggestions: response.suggestions,
        }
    }
}

// --- Configuration diagnostics ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenFormat {
    Valid,
    Invalid,
    Missing,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenStatusResponse {
    pub exists: bool,
    #[schema(example = "valid")]
    pub format: TokenFormat,
    #[schema(example = "ghp_")]
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigStatusResponse {
    pub is_configured: bool,
    pub token: TokenStatusResponse,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
