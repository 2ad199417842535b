use super::error_code::{self, HevalErrorCode};

/// Embedding capability errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },
}

impl HevalErrorCode for EmbeddingError {
    fn error_code(&self) -> &'static str {
        error_code::EMBEDDING_ERROR
    }
}
