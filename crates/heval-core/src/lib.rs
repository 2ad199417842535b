//! # heval-core
//!
//! Foundation crate for the heuristic evaluation engine.
//! Defines the element catalog, heuristic definitions, violations, reports,
//! knowledge exemplars, the collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::HevalConfig;
pub use errors::{ErrorResponse, HevalError, HevalErrorCode, HevalResult};
pub use models::{
    BoundingBox, CriterionDefinition, DetectedElement, ElementType, EvaluationReport,
    HeuristicDefinition, HeuristicResult, KnowledgeExemplar, Severity, Violation,
};
