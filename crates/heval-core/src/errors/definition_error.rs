use super::error_code::{self, HevalErrorCode};

/// Malformed heuristic or criterion definitions.
/// Raised at startup only; a process holding one of these never serves requests.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("criterion {criterion_id} has non-positive weight {weight}")]
    NonPositiveWeight { criterion_id: String, weight: u32 },

    #[error("criterion {criterion_id} references unknown predicate '{predicate}'")]
    UnknownPredicate {
        criterion_id: String,
        predicate: String,
    },

    #[error("heuristic {heuristic_id} is defined more than once")]
    DuplicateHeuristic { heuristic_id: String },

    #[error("criterion {criterion_id} is defined more than once")]
    DuplicateCriterion { criterion_id: String },

    #[error("criterion {criterion_id} does not belong to heuristic {heuristic_id}")]
    MismatchedCriterion {
        criterion_id: String,
        heuristic_id: String,
    },

    #[error("heuristic {heuristic_id} defines no criteria")]
    EmptyHeuristic { heuristic_id: String },

    #[error("criterion {criterion_id} declares absence severity '{severity}', must be at least major")]
    WeakAbsenceSeverity {
        criterion_id: String,
        severity: String,
    },

    #[error("predicate '{predicate}' for criterion {criterion_id} panicked: {message}")]
    PredicatePanicked {
        criterion_id: String,
        predicate: String,
        message: String,
    },
}

impl HevalErrorCode for DefinitionError {
    fn error_code(&self) -> &'static str {
        error_code::MALFORMED_CRITERION
    }
}
