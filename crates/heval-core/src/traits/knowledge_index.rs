use crate::errors::HevalResult;
use crate::models::{KnowledgeBaseStats, KnowledgeExemplar, ScoredExemplar};

/// Similarity search over curated exemplars.
///
/// Reads never block each other; `insert` and `mark_rejected` are serialized
/// against each other and against in-flight reads.
pub trait IKnowledgeIndex: Send + Sync {
    /// Up to `k` exemplars ordered by descending similarity, scoped criterion →
    /// heuristic → global.
    fn retrieve(
        &self,
        query_embedding: &[f32],
        heuristic_id: &str,
        criterion_id: &str,
        k: usize,
    ) -> HevalResult<Vec<ScoredExemplar>>;

    /// Append an exemplar. Existing exemplars are never re-embedded.
    fn insert(&self, exemplar: KnowledgeExemplar) -> HevalResult<()>;

    /// Soft-delete an exemplar: excluded from retrieval, retained for audit.
    fn mark_rejected(&self, exemplar_id: &str) -> HevalResult<()>;

    /// Whether `exemplar_id` is soft-deleted. Indexes that never tombstone
    /// report `false`.
    fn is_rejected(&self, _exemplar_id: &str) -> HevalResult<bool> {
        Ok(false)
    }

    fn stats(&self) -> HevalResult<KnowledgeBaseStats>;
}
