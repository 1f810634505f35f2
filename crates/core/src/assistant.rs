//! Assistant Domain Types
//!
//! Request and response shapes for the emotional-assistant chat path. The
//! tone selects a persona register for both live prompts and canned fallback
//! replies.

use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The persona register selected by the student in the chat UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Study help: encouraging, organized, bite-sized explanations.
    Aprendizado,
    /// Emotional support: validating, warm, escalates serious distress.
    Humor,
    /// Winding down: slow pacing, no pressure.
    Relaxar,
}

impl FromStr for Tone {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "aprendizado" => Ok(Tone::Aprendizado),
            "humor" => Ok(Tone::Humor),
            "relaxar" => Ok(Tone::Relaxar),
            other => Err(GenerationError::InvalidRequest(format!(
                "Tom inválido: '{}'",
                other
            ))),
        }
    }
}

/// Kind of file the student attached, as classified by the upload layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Pdf,
    Text,
}

impl AttachmentKind {
    /// Portuguese label used when describing the file to the model.
    pub fn label(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "imagem",
            AttachmentKind::Pdf => "PDF",
            AttachmentKind::Text => "texto",
        }
    }
}

impl FromStr for AttachmentKind {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "image" => Ok(AttachmentKind::Image),
            "pdf" => Ok(AttachmentKind::Pdf),
            "text" => Ok(AttachmentKind::Text),
            other => Err(GenerationError::InvalidRequest(format!(
                "Tipo de arquivo inválido: '{}'",
                other
            ))),
        }
    }
}

/// Who authored a prior message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One prior turn of the conversation, passed back in by the caller for
/// context. Nothing is stored between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextMessage {
    pub sender: Sender,
    pub text: String,
}

/// Parameters for one assistant response.
///
/// The upload layer extracts file content before calling; images arrive as
/// `data:image/...` URIs, textual files as plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub message: String,
    pub tone: Tone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_kind: Option<AttachmentKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<ContextMessage>,
}

/// The assistant's reply. `confidence` distinguishes live model output from
/// canned fallback content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}
