//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the generation
//! services and the loaded configuration. The concrete model client is
//! constructed once in `bin/api.rs` and injected into both services.

use crate::config::Config;
use saber_core::{AssistantService, QuizService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub assistant_service: Arc<AssistantService>,
    pub config: Arc<Config>,
}
