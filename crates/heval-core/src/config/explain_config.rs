use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Explanation augmenter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    /// Exemplars requested per violation. At least 3.
    pub retrieval_k: usize,
    /// Upper bound on the embed + retrieve step per violation.
    pub retrieval_timeout_ms: u64,
    /// Long-lived retrieval worker threads.
    pub retrieval_workers: usize,
    /// Queued lookups beyond which new ones fall back immediately.
    pub retrieval_queue_capacity: usize,
}

impl ExplainConfig {
    pub fn retrieval_timeout(&self) -> Duration {
        Duration::from_millis(self.retrieval_timeout_ms)
    }
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            retrieval_k: defaults::DEFAULT_RETRIEVAL_K,
            retrieval_timeout_ms: defaults::DEFAULT_RETRIEVAL_TIMEOUT_MS,
            retrieval_workers: defaults::DEFAULT_RETRIEVAL_WORKERS,
            retrieval_queue_capacity: defaults::DEFAULT_RETRIEVAL_QUEUE_CAPACITY,
        }
    }
}
