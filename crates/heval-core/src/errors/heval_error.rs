use super::error_code::{self, HevalErrorCode};
use super::{
    ConfigError, DefinitionError, DetectionError, EmbeddingError, InputError, KnowledgeError,
    RetrievalError,
};

/// Top-level error aggregating every subsystem error via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum HevalError {
    #[error("detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("definition error: {0}")]
    Definition(#[from] DefinitionError),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("malformed input: {0}")]
    Input(#[from] InputError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("evaluation cancelled")]
    Cancelled,
}

/// Convenience alias used across the workspace.
pub type HevalResult<T> = Result<T, HevalError>;

impl HevalErrorCode for HevalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Detection(e) => e.error_code(),
            Self::Definition(e) => e.error_code(),
            Self::Retrieval(e) => e.error_code(),
            Self::Knowledge(e) => e.error_code(),
            Self::Embedding(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}

impl From<&HevalError> for super::ErrorResponse {
    fn from(error: &HevalError) -> Self {
        Self::from_error(error)
    }
}
