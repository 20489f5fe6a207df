use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{0}")]
    NoFile(String),

    #[error("{0}")]
    InvalidImage(String),

    #[error("File size exceeds limit of {max} bytes")]
    FileTooLarge { max: usize },

    #[error("API key is required")]
    MissingApiKey,

    #[error("API key was rejected by the provider: {0}")]
    InvalidApiKey(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("{0}")]
    InvalidMenuImage(String),

    #[error("Invalid LLM response: {0}")]
    InvalidLlmResponse(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// True when the failure happened before any provider call was attempted.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CoreError::NoFile(_)
                | CoreError::InvalidImage(_)
                | CoreError::FileTooLarge { .. }
                | CoreError::MissingApiKey
                | CoreError::UnknownProvider(_)
        )
    }
}
