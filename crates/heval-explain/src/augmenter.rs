//! Explanation augmenter: violation → (description, recommendation).
//!
//! The embed + retrieve step runs on the retrieval pool and is bounded by a
//! timeout. Whatever goes wrong there, the violation still gets an
//! explanation from the template.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use heval_core::config::ExplainConfig;
use heval_core::constants::MIN_RETRIEVAL_K;
use heval_core::models::{CriterionDefinition, RetrievalScope, ScoredExemplar, Violation};
use heval_core::traits::{Cancellable, CancellationToken, IEmbeddingProvider, IKnowledgeIndex};

use crate::pool::{Lookup, RetrievalPool};
use crate::template;

/// Why an explanation fell back to the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No exemplar reached the similarity floor.
    NoMatch,
    Cancelled,
    EmbeddingFailed,
    RetrievalFailed,
    Timeout,
}

/// Where an explanation's text came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExplanationSource {
    Exemplar {
        exemplar_id: String,
        similarity: f64,
        scope: RetrievalScope,
    },
    Template { reason: FallbackReason },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub description: String,
    pub recommendation: String,
    pub source: ExplanationSource,
}

impl Explanation {
    pub fn is_grounded(&self) -> bool {
        matches!(self.source, ExplanationSource::Exemplar { .. })
    }

    /// The exemplar that produced this explanation, if any. Feedback on the
    /// explanation is routed to it.
    pub fn exemplar_id(&self) -> Option<&str> {
        match &self.source {
            ExplanationSource::Exemplar { exemplar_id, .. } => Some(exemplar_id),
            ExplanationSource::Template { .. } => None,
        }
    }
}

/// Composes explanations. Never fails; retrieval never touches score or severity.
pub struct ExplanationAugmenter {
    pool: RetrievalPool,
    k: usize,
    similarity_floor: f64,
}

impl ExplanationAugmenter {
    pub fn new(
        index: Arc<dyn IKnowledgeIndex>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: &ExplainConfig,
        similarity_floor: f64,
    ) -> Self {
        Self {
            pool: RetrievalPool::new(
                index,
                embedder,
                config.retrieval_workers,
                config.retrieval_queue_capacity,
                config.retrieval_timeout(),
            ),
            k: config.retrieval_k.max(MIN_RETRIEVAL_K),
            similarity_floor,
        }
    }

    /// Retrieval worker threads. Fixed for the augmenter's lifetime.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Exemplars requested per query. Never below 3.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn explain(
        &self,
        violation: &Violation,
        criterion: &CriterionDefinition,
        cancel: &CancellationToken,
    ) -> Explanation {
        match self.best_match(violation, criterion, cancel) {
            Ok(hit) => Explanation {
                description: format!(
                    "{}. Similar case: {}",
                    violation.description, hit.exemplar.situation
                ),
                recommendation: hit.exemplar.resolution.clone(),
                source: ExplanationSource::Exemplar {
                    exemplar_id: hit.exemplar.exemplar_id.clone(),
                    similarity: hit.similarity,
                    scope: hit.scope,
                },
            },
            Err(reason) => {
                debug!(
                    criterion_id = %violation.criterion_id,
                    reason = ?reason,
                    "explanation fell back to template"
                );
                Explanation {
                    description: template::describe(violation, criterion),
                    recommendation: template::recommend(violation, criterion),
                    source: ExplanationSource::Template { reason },
                }
            }
        }
    }

    /// `violation` with its description and recommendation replaced.
    pub fn augment(
        &self,
        violation: &Violation,
        criterion: &CriterionDefinition,
        cancel: &CancellationToken,
    ) -> Violation {
        let explanation = self.explain(violation, criterion, cancel);
        violation.explained(explanation.description, explanation.recommendation)
    }

    fn best_match(
        &self,
        violation: &Violation,
        criterion: &CriterionDefinition,
        cancel: &CancellationToken,
    ) -> Result<ScoredExemplar, FallbackReason> {
        if cancel.is_cancelled() {
            return Err(FallbackReason::Cancelled);
        }

        let lookup = Lookup {
            query: query_text(violation, criterion),
            heuristic_id: violation.heuristic_id.clone(),
            criterion_id: violation.criterion_id.clone(),
            k: self.k,
        };
        let hits = self.pool.lookup(lookup, cancel)?;
        hits.into_iter()
            .next()
            .filter(|top| top.similarity >= self.similarity_floor)
            .ok_or(FallbackReason::NoMatch)
    }
}

/// Text embedded for retrieval: the criterion and the mechanical finding.
pub fn query_text(violation: &Violation, criterion: &CriterionDefinition) -> String {
    format!("{}: {}", criterion.description, violation.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heval_core::models::Severity;

    #[test]
    fn query_combines_criterion_and_finding() {
        let criterion = CriterionDefinition::new("H3.3", "Confirmation for destructive actions", 10, "destructive_confirmation");
        let v = Violation::new("H3", "H3.3", Severity::Major, "'Delete' runs without confirmation", ["b1"]);
        assert_eq!(
            query_text(&v, &criterion),
            "Confirmation for destructive actions: 'Delete' runs without confirmation"
        );
    }

    #[test]
    fn template_source_has_no_exemplar() {
        let e = Explanation {
            description: String::new(),
            recommendation: String::new(),
            source: ExplanationSource::Template {
                reason: FallbackReason::NoMatch,
            },
        };
        assert!(!e.is_grounded());
        assert_eq!(e.exemplar_id(), None);
    }
}
