use super::error_code::{self, HevalErrorCode};

/// Knowledge base query errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("retrieval timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("query embedding has {actual} dimensions, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("query embedding is empty")]
    EmptyQuery,

    #[error("retrieval worker disconnected before answering")]
    WorkerDisconnected,
}

impl HevalErrorCode for RetrievalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::RETRIEVAL_TIMEOUT,
            _ => error_code::RETRIEVAL_ERROR,
        }
    }
}
