//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        AssistantPayload, AssistantReplyBody, ConfigStatusResponse, ContextEntryPayload,
        ErrorResponse, GenerateQuizPayload, MetadataBody, OptionBody, QuestionBody,
        QuizResponseBody, RejectedQuestionBody, TokenFormat, TokenStatusResponse,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::generate_quiz,
        handlers::assistant_respond,
        handlers::config_status,
    ),
    components(
        schemas(
            GenerateQuizPayload,
            AssistantPayload,
            ContextEntryPayload,
            QuizResponseBody,
            QuestionBody,
            OptionBody,
            RejectedQuestionBody,
            MetadataBody,
            AssistantReplyBody,
            ConfigStatusResponse,
            TokenStatusResponse,
            TokenFormat,
            ErrorResponse
        )
    ),
    tags(
        (name = "Quest do Saber API", description = "Model-backed quiz and assistant generation")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/quizzes/generate", post(handlers::generate_quiz))
        .route("/assistant/respond", post(handlers::assistant_respond))
        .route("/config/status", get(handlers::config_status))
        .with_state(app_state);

    // Merge the stateful routes with the stateless Swagger UI routes.
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
