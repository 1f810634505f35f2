//! Error taxonomy for the generation services.
//!
//! The three categories map to the three points where a generation attempt
//! can go wrong: before the network call (`InvalidRequest`), during it
//! (`ModelUnavailable`), and after it (`MalformedResponse`).

/// A failure while generating content through the model endpoint.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The request failed validation and was rejected before any model call.
    /// The message identifies which constraint failed.
    #[error("{0}")]
    InvalidRequest(String),

    /// The model endpoint could not produce a completion: network or timeout
    /// failures, authentication problems, rate limits, and empty completions
    /// all collapse into this category.
    #[error("{0}")]
    ModelUnavailable(String),

    /// The model answered, but its output could not be turned into enough
    /// valid content: unparseable JSON, a missing `questions` array, or too
    /// few items surviving validation.
    #[error("{0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Whether a retry could plausibly succeed. Only provider availability
    /// is transient; bad requests and bad output are not fixed by retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, GenerationError::ModelUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_model_unavailable_is_transient() {
        assert!(GenerationError::ModelUnavailable("connection refused".to_string()).is_transient());
        assert!(!GenerationError::InvalidRequest("campo obrigatório".to_string()).is_transient());
        assert!(!GenerationError::MalformedResponse("JSON inválido".to_string()).is_transient());
    }

    #[test]
    fn test_display_passes_message_through() {
        let err = GenerationError::ModelUnavailable("Resposta vazia da API".to_string());
        assert_eq!(format!("{}", err), "Resposta vazia da API");
    }
}
