//! In-memory exemplar index with scope-widening retrieval.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use heval_core::errors::{HevalResult, KnowledgeError, RetrievalError};
use heval_core::models::{
    KnowledgeBaseStats, KnowledgeExemplar, RetrievalScope, ScoredExemplar,
};
use heval_core::traits::IKnowledgeIndex;
use heval_embeddings::cosine_similarity;

const SCOPES: [RetrievalScope; 3] = [
    RetrievalScope::Criterion,
    RetrievalScope::Heuristic,
    RetrievalScope::Global,
];

#[derive(Debug, Clone)]
pub(crate) struct IndexEntry {
    pub(crate) exemplar: Arc<KnowledgeExemplar>,
    pub(crate) rejected: bool,
}

#[derive(Debug, Default)]
struct IndexState {
    entries: Vec<IndexEntry>,
    positions: HashMap<String, usize>,
}

/// Append-only exemplar store. Readers share the lock; curation takes it
/// exclusively.
#[derive(Debug)]
pub struct KnowledgeBaseIndex {
    dimensions: usize,
    similarity_floor: f64,
    state: RwLock<IndexState>,
}

impl KnowledgeBaseIndex {
    pub fn new(dimensions: usize, similarity_floor: f64) -> Self {
        Self {
            dimensions,
            similarity_floor,
            state: RwLock::new(IndexState::default()),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn similarity_floor(&self) -> f64 {
        self.similarity_floor
    }

    /// Look up an exemplar by id, rejected or not.
    pub fn get(&self, exemplar_id: &str) -> HevalResult<Option<Arc<KnowledgeExemplar>>> {
        let state = self.read()?;
        Ok(state
            .positions
            .get(exemplar_id)
            .map(|&pos| state.entries[pos].exemplar.clone()))
    }

    pub fn len(&self) -> HevalResult<usize> {
        Ok(self.read()?.entries.len())
    }

    pub fn is_empty(&self) -> HevalResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Copy of every entry in insertion order, tombstones included.
    pub(crate) fn entries(&self) -> HevalResult<Vec<IndexEntry>> {
        Ok(self.read()?.entries.clone())
    }

    /// Restore an entry with its rejection flag. Used when loading snapshots.
    pub(crate) fn restore(&self, exemplar: KnowledgeExemplar, rejected: bool) -> HevalResult<()> {
        let mut state = self.write()?;
        self.push(&mut state, exemplar, rejected)
    }

    fn push(
        &self,
        state: &mut IndexState,
        exemplar: KnowledgeExemplar,
        rejected: bool,
    ) -> HevalResult<()> {
        if exemplar.embedding.len() != self.dimensions {
            return Err(KnowledgeError::DimensionMismatch {
                expected: self.dimensions,
                actual: exemplar.embedding.len(),
            }
            .into());
        }
        if state.positions.contains_key(&exemplar.exemplar_id) {
            return Err(KnowledgeError::DuplicateExemplar {
                id: exemplar.exemplar_id,
            }
            .into());
        }
        state
            .positions
            .insert(exemplar.exemplar_id.clone(), state.entries.len());
        state.entries.push(IndexEntry {
            exemplar: Arc::new(exemplar),
            rejected,
        });
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexState>, KnowledgeError> {
        self.state.read().map_err(|_| KnowledgeError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexState>, KnowledgeError> {
        self.state.write().map_err(|_| KnowledgeError::LockPoisoned)
    }
}

fn in_scope(
    exemplar: &KnowledgeExemplar,
    scope: RetrievalScope,
    heuristic_id: &str,
    criterion_id: &str,
) -> bool {
    match scope {
        RetrievalScope::Criterion => {
            exemplar.heuristic_id == heuristic_id && exemplar.criterion_id == criterion_id
        }
        RetrievalScope::Heuristic => exemplar.heuristic_id == heuristic_id,
        RetrievalScope::Global => true,
    }
}

impl IKnowledgeIndex for KnowledgeBaseIndex {
    fn retrieve(
        &self,
        query_embedding: &[f32],
        heuristic_id: &str,
        criterion_id: &str,
        k: usize,
    ) -> HevalResult<Vec<ScoredExemplar>> {
        if query_embedding.is_empty() {
            return Err(RetrievalError::EmptyQuery.into());
        }
        if query_embedding.len() != self.dimensions {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimensions,
                actual: query_embedding.len(),
            }
            .into());
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let state = self.read()?;
        let mut candidates: Vec<(&Arc<KnowledgeExemplar>, f64)> = Vec::new();
        for entry in state.entries.iter().filter(|entry| !entry.rejected) {
            let sim = cosine_similarity(query_embedding, &entry.exemplar.embedding)?;
            if sim >= self.similarity_floor {
                candidates.push((&entry.exemplar, sim));
            }
        }

        for scope in SCOPES {
            let mut hits: Vec<(&Arc<KnowledgeExemplar>, f64)> = candidates
                .iter()
                .filter(|(ex, _)| in_scope(ex, scope, heuristic_id, criterion_id))
                .copied()
                .collect();
            if hits.is_empty() {
                continue;
            }

            hits.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.0.exemplar_id.cmp(&b.0.exemplar_id))
            });
            hits.truncate(k);
            debug!(
                heuristic_id,
                criterion_id,
                scope = ?scope,
                hits = hits.len(),
                top_similarity = hits[0].1,
                "knowledge base retrieval"
            );
            return Ok(hits
                .into_iter()
                .map(|(exemplar, similarity)| ScoredExemplar {
                    exemplar: exemplar.clone(),
                    similarity,
                    scope,
                })
                .collect());
        }

        debug!(heuristic_id, criterion_id, "knowledge base retrieval found nothing above floor");
        Ok(Vec::new())
    }

    fn insert(&self, exemplar: KnowledgeExemplar) -> HevalResult<()> {
        let id = exemplar.exemplar_id.clone();
        let heuristic_id = exemplar.heuristic_id.clone();
        let provenance = exemplar.provenance;
        let mut state = self.write()?;
        self.push(&mut state, exemplar, false)?;
        info!(exemplar_id = %id, heuristic_id = %heuristic_id, provenance = %provenance, "exemplar inserted");
        Ok(())
    }

    fn mark_rejected(&self, exemplar_id: &str) -> HevalResult<()> {
        let mut state = self.write()?;
        let pos = *state
            .positions
            .get(exemplar_id)
            .ok_or_else(|| KnowledgeError::ExemplarNotFound {
                id: exemplar_id.to_string(),
            })?;
        let entry = &mut state.entries[pos];
        if entry.rejected {
            debug!(exemplar_id, "exemplar already rejected");
        } else {
            entry.rejected = true;
            info!(exemplar_id, "exemplar rejected");
        }
        Ok(())
    }

    fn is_rejected(&self, exemplar_id: &str) -> HevalResult<bool> {
        let state = self.read()?;
        match state.positions.get(exemplar_id) {
            Some(&pos) => Ok(state.entries[pos].rejected),
            None => Err(KnowledgeError::ExemplarNotFound {
                id: exemplar_id.to_string(),
            }
            .into()),
        }
    }

    fn stats(&self) -> HevalResult<KnowledgeBaseStats> {
        let state = self.read()?;
        let mut per_heuristic_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut rejected_count = 0;
        for entry in &state.entries {
            if entry.rejected {
                rejected_count += 1;
            } else {
                *per_heuristic_counts
                    .entry(entry.exemplar.heuristic_id.clone())
                    .or_default() += 1;
            }
        }
        Ok(KnowledgeBaseStats {
            exemplar_count: state.entries.len() - rejected_count,
            per_heuristic_counts,
            rejected_count,
        })
    }
}
