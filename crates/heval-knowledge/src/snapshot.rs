//! JSON snapshots of the index, tombstones included.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use heval_core::errors::{HevalResult, KnowledgeError};
use heval_core::models::KnowledgeExemplar;

use crate::index::KnowledgeBaseIndex;

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub exemplar: KnowledgeExemplar,
    pub rejected: bool,
}

/// Serializable image of a `KnowledgeBaseIndex`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub version: u32,
    pub dimensions: usize,
    pub entries: Vec<SnapshotEntry>,
}

impl IndexSnapshot {
    pub fn capture(index: &KnowledgeBaseIndex) -> HevalResult<Self> {
        let entries = index
            .entries()?
            .into_iter()
            .map(|entry| SnapshotEntry {
                exemplar: (*entry.exemplar).clone(),
                rejected: entry.rejected,
            })
            .collect();
        Ok(Self {
            version: SNAPSHOT_VERSION,
            dimensions: index.dimensions(),
            entries,
        })
    }

    /// Rebuild an index. Embeddings are taken as stored, never recomputed.
    pub fn restore(self, similarity_floor: f64) -> HevalResult<KnowledgeBaseIndex> {
        let index = KnowledgeBaseIndex::new(self.dimensions, similarity_floor);
        for entry in self.entries {
            index.restore(entry.exemplar, entry.rejected)?;
        }
        Ok(index)
    }

    pub fn save(index: &KnowledgeBaseIndex, path: &Path) -> HevalResult<()> {
        let snapshot = Self::capture(index)?;
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json).map_err(|e| snapshot_error(path, e))?;
        info!(path = %path.display(), entries = snapshot.entries.len(), "knowledge base snapshot saved");
        Ok(())
    }

    pub fn load(path: &Path, similarity_floor: f64) -> HevalResult<KnowledgeBaseIndex> {
        let raw = std::fs::read_to_string(path).map_err(|e| snapshot_error(path, e))?;
        let snapshot: Self = serde_json::from_str(&raw).map_err(|e| snapshot_error(path, e))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(KnowledgeError::Snapshot {
                path: path.display().to_string(),
                reason: format!("unsupported snapshot version {}", snapshot.version),
            }
            .into());
        }
        let count = snapshot.entries.len();
        let index = snapshot.restore(similarity_floor)?;
        info!(path = %path.display(), entries = count, "knowledge base snapshot loaded");
        Ok(index)
    }
}

fn snapshot_error(path: &Path, err: impl std::fmt::Display) -> KnowledgeError {
    KnowledgeError::Snapshot {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
