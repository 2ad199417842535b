use serde::{Deserialize, Serialize};

use super::defaults;

/// Knowledge base configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Minimum cosine similarity [-1, 1] for a retrieval hit to count.
    pub similarity_floor: f64,
    /// Dimensionality every exemplar embedding must have.
    pub embedding_dimensions: usize,
    /// Load the curated expert exemplars at startup.
    pub seed_expert_exemplars: bool,
    /// Optional JSON snapshot to load instead of (or on top of) the seed set.
    pub snapshot_path: Option<String>,
    /// Capacity of the in-memory query embedding cache.
    pub embedding_cache_capacity: u64,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            similarity_floor: defaults::DEFAULT_SIMILARITY_FLOOR,
            embedding_dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            seed_expert_exemplars: defaults::DEFAULT_SEED_EXPERT_EXEMPLARS,
            snapshot_path: None,
            embedding_cache_capacity: defaults::DEFAULT_EMBEDDING_CACHE_CAPACITY,
        }
    }
}
