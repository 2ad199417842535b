//! # heval-analysis
//!
//! The deterministic half of an evaluation: structural predicates over the
//! element catalog, the heuristic catalog they back, violation detection, and
//! severity-weighted scoring. Nothing here touches the knowledge base.

pub mod catalog;
pub mod detector;
pub mod predicates;
pub mod scorer;

pub use catalog::HeuristicCatalog;
pub use detector::{CriterionViolations, ViolationDetector};
pub use predicates::PredicateRegistry;
pub use scorer::{deduction_breakdown, explanation_text, overall_score, score, CriterionDeduction};
