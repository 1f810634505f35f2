//! Quest do Saber content generation core.
//!
//! This crate implements the model-backed generation pipeline behind the
//! platform's quizzes and its emotional assistant: prompt construction,
//! a single-call chat-completion client, strict response validation, and
//! deterministic fallback content so the UI always has something usable to
//! render. The HTTP surface lives in the `saber-api` service crate.

pub mod assistant;
pub mod assistant_service;
pub mod error;
pub mod fallback;
pub mod llm_client;
pub mod parser;
pub mod prompts;
pub mod quiz;
pub mod quiz_service;
pub mod retry;

pub use assistant_service::AssistantService;
pub use error::GenerationError;
pub use quiz_service::QuizService;
