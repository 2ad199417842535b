use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read-only introspection of the knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBaseStats {
    /// Exemplars eligible for retrieval (rejected ones excluded).
    pub exemplar_count: usize,
    pub per_heuristic_counts: BTreeMap<String, usize>,
    /// Soft-deleted exemplars retained for audit.
    pub rejected_count: usize,
}
