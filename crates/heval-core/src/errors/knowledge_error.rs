use super::error_code::{self, HevalErrorCode};

/// Knowledge base curation errors (insert, reject, snapshot).
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("exemplar {id} already exists")]
    DuplicateExemplar { id: String },

    #[error("exemplar not found: {id}")]
    ExemplarNotFound { id: String },

    #[error("exemplar embedding has {actual} dimensions, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("knowledge base lock poisoned")]
    LockPoisoned,

    #[error("snapshot {path}: {reason}")]
    Snapshot { path: String, reason: String },
}

impl HevalErrorCode for KnowledgeError {
    fn error_code(&self) -> &'static str {
        error_code::KNOWLEDGE_ERROR
    }
}
