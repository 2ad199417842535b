//! # heval-knowledge
//!
//! Expert-curated exemplars and the similarity index the explanation layer
//! queries. Retrieval widens from criterion to heuristic to global scope.
//! Curation (insert, reject) is a separate write path from evaluation reads.

pub mod feedback;
pub mod index;
pub mod seed;
pub mod snapshot;

pub use feedback::{ExplanationFeedback, FeedbackCurator, FeedbackOutcome, FeedbackVerdict};
pub use index::KnowledgeBaseIndex;
pub use seed::{seed_exemplars, seed_index};
pub use snapshot::IndexSnapshot;
