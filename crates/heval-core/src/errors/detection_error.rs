use super::error_code::{self, HevalErrorCode};

/// Failures of the upstream UI-element detector.
/// Fatal to the request; never retried inside the engine.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("element detector unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("element detector returned unusable output: {reason}")]
    UnusableOutput { reason: String },

    #[error("element detection timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl HevalErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        error_code::DETECTION_ERROR
    }
}
