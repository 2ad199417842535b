//! Data model shared by every stage of an evaluation.

pub mod element;
pub mod evidence;
pub mod exemplar;
pub mod heuristic;
pub mod knowledge_stats;
pub mod report;
pub mod violation;

pub use element::{BoundingBox, CatalogSummary, DetectedElement, ElementType};
pub use evidence::{Evidence, Finding};
pub use exemplar::{KnowledgeExemplar, Provenance, RetrievalScope, ScoredExemplar};
pub use heuristic::{CriterionDefinition, HeuristicDefinition, HeuristicSummary};
pub use knowledge_stats::KnowledgeBaseStats;
pub use report::{EvaluationReport, HeuristicResult};
pub use violation::{Severity, Violation};
