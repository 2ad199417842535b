//! Seams between the engine and its collaborators.

pub mod cancellation;
pub mod element_detector;
pub mod embedding;
pub mod knowledge_index;
pub mod predicate;

pub use cancellation::{Cancellable, CancellationToken};
pub use element_detector::IElementDetector;
pub use embedding::IEmbeddingProvider;
pub use knowledge_index::IKnowledgeIndex;
pub use predicate::IStructuralPredicate;
