use serde::{Deserialize, Serialize};

use super::defaults;

/// Orchestrator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Evaluate heuristics and criteria on the rayon pool.
    pub parallel: bool,
    /// Heuristics evaluated when a request names none. Empty = all.
    pub default_scope: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: defaults::DEFAULT_PARALLEL,
            default_scope: Vec::new(),
        }
    }
}
