//! Axum Handlers for the REST API
//!
//! Request validation failures map to 400 with the field-level message; a
//! generation call that gets past validation always answers 200, with the
//! envelope's `success` flag distinguishing live from fallback content.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use saber_core::GenerationError;
use saber_core::assistant::AssistantRequest;
use saber_core::quiz::QuizGenerationRequest;
use std::sync::Arc;
use tracing::error;

use crate::{
    models::{
        AssistantPayload, AssistantReplyBody, ConfigStatusResponse, ErrorResponse,
        GenerateQuizPayload, QuizResponseBody,
    },
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

/// Generate a quiz for a topic.
#[utoipa::path(
    post,
    path = "/quizzes/generate",
    request_body = GenerateQuizPayload,
    responses(
        (status = 200, description = "Quiz generated (check `success` for live vs. fallback content)", body = QuizResponseBody),
        (status = 400, description = "Request failed validation", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateQuizPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let request: QuizGenerationRequest = payload.try_into().map_err(ApiError::BadRequest)?;

    let response = state
        .quiz_service
        .generate(&request)
        .await
        .map_err(|err| match err {
            GenerationError::InvalidRequest(message) => ApiError::BadRequest(message),
            other => ApiError::InternalServerError(anyhow::Error::new(other)),
        })?;

    Ok((StatusCode::OK, Json(QuizResponseBody::from(response))))
}

/// Generate an assistant reply for a chat message.
#[utoipa::path(
    post,
    path = "/assistant/respond",
    request_body = AssistantPayload,
    responses(
        (status = 200, description = "Assistant reply (canned fallback when the model is unreachable)", body = AssistantReplyBody),
        (status = 400, description = "Request failed validation", body = ErrorResponse)
    )
)]
pub async fn assistant_respond(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AssistantPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let request: AssistantRequest = payload.try_into().map_err(ApiError::BadRequest)?;

    let reply = state.assistant_service.respond(&request).await;

    Ok((StatusCode::OK, Json(AssistantReplyBody::from(reply))))
}

/// Report whether the model endpoint is configured, so the UI can warn
/// before a student triggers generation.
#[utoipa::path(
    get,
    path = "/config/status",
    responses(
        (status = 200, description = "Configuration diagnostics", body = ConfigStatusResponse)
    )
)]
pub async fn config_status(State(state): State<Arc<AppState>>) -> Json<ConfigStatusResponse> {
    Json(state.config.status())
}
