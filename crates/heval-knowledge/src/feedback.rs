//! Reviewer feedback on generated explanations.
//!
//! Accepted explanations become exemplars; rejected ones soft-delete the
//! exemplar that produced them. Identical accepted content is stored once.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use heval_core::errors::{HevalError, HevalResult, KnowledgeError};
use heval_core::models::{KnowledgeExemplar, Provenance};
use heval_core::traits::{IEmbeddingProvider, IKnowledgeIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackVerdict {
    Accepted,
    Rejected,
}

/// A reviewer's verdict on one explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationFeedback {
    pub heuristic_id: String,
    pub criterion_id: String,
    /// What the reviewer saw: the violation's description.
    pub situation: String,
    /// The recommendation being judged.
    pub resolution: String,
    pub verdict: FeedbackVerdict,
    /// Exemplar that grounded the explanation, if any.
    #[serde(default)]
    pub source_exemplar_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    Inserted { exemplar_id: String },
    Duplicate { exemplar_id: String },
    /// Identical content was accepted before and later rejected. The
    /// tombstone stands; the exemplar stays out of retrieval.
    PreviouslyRejected { exemplar_id: String },
    Rejected { exemplar_id: String },
    /// A rejected template explanation: nothing in the index to retract.
    NothingToReject,
}

/// Applies curation feedback to the knowledge base.
pub struct FeedbackCurator {
    index: Arc<dyn IKnowledgeIndex>,
    embedder: Arc<dyn IEmbeddingProvider>,
}

impl FeedbackCurator {
    pub fn new(index: Arc<dyn IKnowledgeIndex>, embedder: Arc<dyn IEmbeddingProvider>) -> Self {
        Self { index, embedder }
    }

    pub fn apply(&self, feedback: &ExplanationFeedback) -> HevalResult<FeedbackOutcome> {
        match feedback.verdict {
            FeedbackVerdict::Accepted => self.store(
                &feedback.heuristic_id,
                &feedback.criterion_id,
                &feedback.situation,
                &feedback.resolution,
                Provenance::AcceptedFeedback,
            ),
            FeedbackVerdict::Rejected => match &feedback.source_exemplar_id {
                Some(id) => {
                    self.index.mark_rejected(id)?;
                    Ok(FeedbackOutcome::Rejected {
                        exemplar_id: id.clone(),
                    })
                }
                None => {
                    info!(
                        criterion_id = %feedback.criterion_id,
                        "rejected template explanation, knowledge base unchanged"
                    );
                    Ok(FeedbackOutcome::NothingToReject)
                }
            },
        }
    }

    /// Add an expert-authored exemplar directly.
    pub fn add_expert_exemplar(
        &self,
        heuristic_id: &str,
        criterion_id: &str,
        situation: &str,
        resolution: &str,
    ) -> HevalResult<FeedbackOutcome> {
        self.store(heuristic_id, criterion_id, situation, resolution, Provenance::Expert)
    }

    fn store(
        &self,
        heuristic_id: &str,
        criterion_id: &str,
        situation: &str,
        resolution: &str,
        provenance: Provenance,
    ) -> HevalResult<FeedbackOutcome> {
        let exemplar_id = content_id(heuristic_id, criterion_id, situation, resolution);
        let exemplar = KnowledgeExemplar {
            exemplar_id: exemplar_id.clone(),
            heuristic_id: heuristic_id.to_string(),
            criterion_id: criterion_id.to_string(),
            embedding: self.embedder.embed(situation)?,
            situation: situation.to_string(),
            resolution: resolution.to_string(),
            provenance,
            created_at: Utc::now(),
        };

        match self.index.insert(exemplar) {
            Ok(()) => Ok(FeedbackOutcome::Inserted { exemplar_id }),
            Err(HevalError::Knowledge(KnowledgeError::DuplicateExemplar { .. })) => {
                if self.index.is_rejected(&exemplar_id)? {
                    warn!(exemplar_id = %exemplar_id, "feedback matches a rejected exemplar, left rejected");
                    Ok(FeedbackOutcome::PreviouslyRejected { exemplar_id })
                } else {
                    info!(exemplar_id = %exemplar_id, "duplicate feedback, no action needed");
                    Ok(FeedbackOutcome::Duplicate { exemplar_id })
                }
            }
            Err(e) => Err(e),
        }
    }
}

/// Content-addressed id: identical feedback maps to the same exemplar.
fn content_id(heuristic_id: &str, criterion_id: &str, situation: &str, resolution: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    for part in [heuristic_id, criterion_id, situation.trim(), resolution.trim()] {
        hasher.update(part.as_bytes());
        hasher.update(&[0]);
    }
    let hex = hasher.finalize().to_hex();
    format!("fb_{}", &hex.as_str()[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_ignores_surrounding_whitespace() {
        assert_eq!(
            content_id("H1", "H1.2", " a ", "b"),
            content_id("H1", "H1.2", "a", "b ")
        );
    }

    #[test]
    fn content_id_separates_fields() {
        assert_ne!(
            content_id("H1", "H1.2", "ab", "c"),
            content_id("H1", "H1.2", "a", "bc")
        );
    }
}
