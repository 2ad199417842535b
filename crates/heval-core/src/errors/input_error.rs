use super::error_code::{self, HevalErrorCode};

/// Malformed evaluation requests. Moves the request straight to FAILED.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("element has an empty id")]
    EmptyElementId,

    #[error("element {element_id} has confidence {value} outside [0, 1]")]
    InvalidConfidence { element_id: String, value: f64 },

    #[error("element {element_id} has a bounding box outside normalized [0, 1] coordinates")]
    InvalidBoundingBox { element_id: String },

    #[error("element id {element_id} appears more than once")]
    DuplicateElementId { element_id: String },

    #[error("element {element_id} references unknown parent {parent_id}")]
    DanglingParent {
        element_id: String,
        parent_id: String,
    },

    #[error("element {element_id} is part of a parent cycle")]
    ParentCycle { element_id: String },

    #[error("unknown heuristic {heuristic_id}")]
    UnknownHeuristic { heuristic_id: String },
}

impl HevalErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        error_code::MALFORMED_INPUT
    }
}
