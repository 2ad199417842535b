use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an exemplar came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Curated by a usability expert.
    Expert,
    /// A generated explanation that a reviewer confirmed as correct.
    AcceptedFeedback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expert => f.write_str("expert"),
            Self::AcceptedFeedback => f.write_str("accepted_feedback"),
        }
    }
}

/// An expert-validated evaluation pattern: a situation and its resolution.
/// Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeExemplar {
    pub exemplar_id: String,
    pub heuristic_id: String,
    pub criterion_id: String,
    /// Embedding of `situation`.
    pub embedding: Vec<f32>,
    pub situation: String,
    pub resolution: String,
    pub provenance: Provenance,
    pub created_at: DateTime<Utc>,
}

/// Which search scope produced a retrieval hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalScope {
    Criterion,
    Heuristic,
    Global,
}

/// A retrieval hit with its cosine similarity in [-1, 1].
#[derive(Debug, Clone)]
pub struct ScoredExemplar {
    pub exemplar: Arc<KnowledgeExemplar>,
    pub similarity: f64,
    pub scope: RetrievalScope,
}
