//! # heval-engine
//!
//! Entry point of the heuristic evaluation engine. Wires the heuristic catalog,
//! the knowledge base, and the explanation augmenter behind
//! [`HeuristicEvaluationService`].

pub mod orchestrator;
pub mod service;
pub mod state;
pub mod tracing_setup;

pub use orchestrator::{validate_elements, EvaluationOrchestrator};
pub use service::HeuristicEvaluationService;
pub use state::{EvaluationState, EvaluationTracker};
