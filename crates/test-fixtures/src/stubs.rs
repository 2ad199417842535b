//! Stub collaborators with controllable behavior.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread::{self, ThreadId};
use std::time::Duration;

use chrono::Utc;

use heval_core::errors::{DetectionError, EmbeddingError, HevalResult, RetrievalError};
use heval_core::models::{
    DetectedElement, KnowledgeBaseStats, KnowledgeExemplar, Provenance, ScoredExemplar,
};
use heval_core::traits::{IElementDetector, IEmbeddingProvider, IKnowledgeIndex};

/// Build an expert exemplar with a given embedding.
pub fn exemplar(id: &str, heuristic_id: &str, criterion_id: &str, embedding: Vec<f32>) -> KnowledgeExemplar {
    KnowledgeExemplar {
        exemplar_id: id.to_string(),
        heuristic_id: heuristic_id.to_string(),
        criterion_id: criterion_id.to_string(),
        embedding,
        situation: format!("situation for {id}"),
        resolution: format!("resolution from {id}"),
        provenance: Provenance::Expert,
        created_at: Utc::now(),
    }
}

// --- Embedders ---

/// Returns a fixed vector for every text unless an override is registered.
pub struct StubEmbedder {
    default: Vec<f32>,
    overrides: HashMap<String, Vec<f32>>,
    fail: bool,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn constant(vector: Vec<f32>) -> Self {
        Self {
            default: vector,
            overrides: HashMap::new(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails with an inference error.
    pub fn failing(dimensions: usize) -> Self {
        Self {
            fail: true,
            ..Self::constant(vec![0.0; dimensions])
        }
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.overrides.insert(text.to_string(), vector);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IEmbeddingProvider for StubEmbedder {
    fn embed(&self, text: &str) -> HevalResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EmbeddingError::InferenceFailed {
                reason: "stub embedder configured to fail".to_string(),
            }
            .into());
        }
        Ok(self
            .overrides
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }

    fn dimensions(&self) -> usize {
        self.default.len()
    }

    fn name(&self) -> &str {
        "stub"
    }
}

// --- Indexes ---

/// Holds nothing; counts queries so tests can assert none were issued.
#[derive(Default)]
pub struct EmptyIndex {
    queries: AtomicUsize,
}

impl EmptyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl IKnowledgeIndex for EmptyIndex {
    fn retrieve(&self, _: &[f32], _: &str, _: &str, _: usize) -> HevalResult<Vec<ScoredExemplar>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    fn insert(&self, _: KnowledgeExemplar) -> HevalResult<()> {
        Ok(())
    }

    fn mark_rejected(&self, _: &str) -> HevalResult<()> {
        Ok(())
    }

    fn stats(&self) -> HevalResult<KnowledgeBaseStats> {
        Ok(KnowledgeBaseStats::default())
    }
}

/// Answers with fixed hits after a delay. Records which threads served it.
pub struct SlowIndex {
    delay: Duration,
    hits: Vec<ScoredExemplar>,
    started: AtomicUsize,
    completed: AtomicUsize,
    threads: Mutex<HashSet<ThreadId>>,
}

impl SlowIndex {
    pub fn new(delay: Duration, hits: Vec<ScoredExemplar>) -> Self {
        Self {
            delay,
            hits,
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            threads: Mutex::new(HashSet::new()),
        }
    }

    /// Queries that reached the index.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Queries that ran to completion, including ones the caller gave up on.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Distinct threads that have run a query.
    pub fn distinct_threads(&self) -> usize {
        self.threads.lock().map(|t| t.len()).unwrap_or_default()
    }
}

impl IKnowledgeIndex for SlowIndex {
    fn retrieve(&self, _: &[f32], _: &str, _: &str, k: usize) -> HevalResult<Vec<ScoredExemplar>> {
        self.started.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut threads) = self.threads.lock() {
            threads.insert(thread::current().id());
        }
        thread::sleep(self.delay);
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(self.hits.iter().take(k).cloned().collect())
    }

    fn insert(&self, _: KnowledgeExemplar) -> HevalResult<()> {
        Ok(())
    }

    fn mark_rejected(&self, _: &str) -> HevalResult<()> {
        Ok(())
    }

    fn stats(&self) -> HevalResult<KnowledgeBaseStats> {
        Ok(KnowledgeBaseStats::default())
    }
}

/// Every query fails; curation calls are recorded.
#[derive(Default)]
pub struct FailingIndex {
    rejected: Mutex<Vec<String>>,
}

impl FailingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejected(&self) -> Vec<String> {
        self.rejected.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl IKnowledgeIndex for FailingIndex {
    fn retrieve(&self, _: &[f32], _: &str, _: &str, _: usize) -> HevalResult<Vec<ScoredExemplar>> {
        Err(RetrievalError::WorkerDisconnected.into())
    }

    fn insert(&self, _: KnowledgeExemplar) -> HevalResult<()> {
        Ok(())
    }

    fn mark_rejected(&self, exemplar_id: &str) -> HevalResult<()> {
        if let Ok(mut rejected) = self.rejected.lock() {
            rejected.push(exemplar_id.to_string());
        }
        Ok(())
    }

    fn stats(&self) -> HevalResult<KnowledgeBaseStats> {
        Ok(KnowledgeBaseStats::default())
    }
}

// --- Detectors ---

/// Always returns the same catalog.
pub struct FixedDetector {
    elements: Vec<DetectedElement>,
}

impl FixedDetector {
    pub fn new(elements: Vec<DetectedElement>) -> Self {
        Self { elements }
    }
}

impl IElementDetector for FixedDetector {
    fn detect_elements(&self, _image: &[u8]) -> Result<Vec<DetectedElement>, DetectionError> {
        Ok(self.elements.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Always unavailable.
pub struct FailingDetector;

impl IElementDetector for FailingDetector {
    fn detect_elements(&self, _image: &[u8]) -> Result<Vec<DetectedElement>, DetectionError> {
        Err(DetectionError::Unavailable {
            reason: "detector offline".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}
