//! Stable error codes surfaced to the transport layer.

use serde::{Deserialize, Serialize};

/// Every error enum implements this to expose a stable, machine-readable code.
pub trait HevalErrorCode {
    /// Returns the error code string (e.g., "DETECTION_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn formatted(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const DETECTION_ERROR: &str = "DETECTION_ERROR";
pub const MALFORMED_CRITERION: &str = "MALFORMED_CRITERION";
pub const MALFORMED_INPUT: &str = "MALFORMED_INPUT";
pub const RETRIEVAL_ERROR: &str = "RETRIEVAL_ERROR";
pub const RETRIEVAL_TIMEOUT: &str = "RETRIEVAL_TIMEOUT";
pub const KNOWLEDGE_ERROR: &str = "KNOWLEDGE_ERROR";
pub const EMBEDDING_ERROR: &str = "EMBEDDING_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const CANCELLED: &str = "CANCELLED";

/// Single error response handed to the caller when a request fails.
/// A failed request never carries a partial report alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn from_error<E>(error: &E) -> Self
    where
        E: HevalErrorCode + std::fmt::Display,
    {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}
