//! HeuristicEvaluationService: the facade exposed to transport layers.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use heval_analysis::HeuristicCatalog;
use heval_core::config::{HevalConfig, KnowledgeConfig};
use heval_core::errors::{DetectionError, HevalError, HevalErrorCode, HevalResult, KnowledgeError};
use heval_core::models::{
    DetectedElement, EvaluationReport, HeuristicDefinition, HeuristicSummary, KnowledgeBaseStats,
};
use heval_core::traits::{CancellationToken, IElementDetector, IEmbeddingProvider, IKnowledgeIndex};
use heval_embeddings::{CachedEmbedder, TfIdfEmbedder};
use heval_explain::ExplanationAugmenter;
use heval_knowledge::{
    seed_exemplars, ExplanationFeedback, FeedbackCurator, FeedbackOutcome, IndexSnapshot,
    KnowledgeBaseIndex,
};

use crate::orchestrator::EvaluationOrchestrator;
use crate::state::EvaluationTracker;

/// Owns the load-once catalog and the knowledge base; safe to share across threads.
pub struct HeuristicEvaluationService {
    config: HevalConfig,
    orchestrator: EvaluationOrchestrator,
    index: Arc<dyn IKnowledgeIndex>,
    /// Set when the index is the built-in one and can be snapshotted.
    snapshot_source: Option<Arc<KnowledgeBaseIndex>>,
    curator: FeedbackCurator,
    detector: Option<Arc<dyn IElementDetector>>,
}

impl HeuristicEvaluationService {
    /// Build the service with the built-in catalog, the hashed TF-IDF embedder
    /// behind a cache, and a knowledge base from the snapshot and/or seed set.
    pub fn new(config: HevalConfig) -> HevalResult<Self> {
        config.validate()?;
        let catalog = HeuristicCatalog::builtin()?;
        let embedder: Arc<dyn IEmbeddingProvider> = Arc::new(CachedEmbedder::new(
            TfIdfEmbedder::new(config.knowledge.embedding_dimensions)?,
            config.knowledge.embedding_cache_capacity,
        ));
        let index = Arc::new(build_index(&config.knowledge, embedder.as_ref())?);

        let mut service = Self::with_components(config, catalog, index.clone(), embedder);
        service.snapshot_source = Some(index);
        Ok(service)
    }

    /// Resolve configuration from `path` and the environment, then build.
    pub fn from_config_file(path: Option<&Path>) -> HevalResult<Self> {
        Self::new(HevalConfig::load(path)?)
    }

    /// Assemble from caller-provided collaborators.
    pub fn with_components(
        config: HevalConfig,
        catalog: HeuristicCatalog,
        index: Arc<dyn IKnowledgeIndex>,
        embedder: Arc<dyn IEmbeddingProvider>,
    ) -> Self {
        let augmenter = ExplanationAugmenter::new(
            Arc::clone(&index),
            Arc::clone(&embedder),
            &config.explain,
            config.knowledge.similarity_floor,
        );
        let orchestrator = EvaluationOrchestrator::new(
            Arc::new(catalog),
            augmenter,
            config.scoring.severity_multipliers,
            &config.engine,
        );
        let curator = FeedbackCurator::new(Arc::clone(&index), embedder);
        info!(
            heuristics = orchestrator.catalog().heuristics().len(),
            parallel = config.engine.parallel,
            "heuristic evaluation service ready"
        );
        Self {
            config,
            orchestrator,
            index,
            snapshot_source: None,
            curator,
            detector: None,
        }
    }

    pub fn with_detector(mut self, detector: Arc<dyn IElementDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn config(&self) -> &HevalConfig {
        &self.config
    }

    /// Evaluate a detected element catalog. An empty `scope` falls back to
    /// `engine.default_scope`, and an empty default means every heuristic.
    pub fn evaluate(
        &self,
        elements: &[DetectedElement],
        scope: &[String],
    ) -> HevalResult<EvaluationReport> {
        self.evaluate_with_cancel(elements, scope, &CancellationToken::new())
    }

    pub fn evaluate_with_cancel(
        &self,
        elements: &[DetectedElement],
        scope: &[String],
        cancel: &CancellationToken,
    ) -> HevalResult<EvaluationReport> {
        self.orchestrator
            .evaluate(elements, self.effective_scope(scope), cancel)
    }

    /// Run the injected element detector over a screenshot, then evaluate.
    /// Detector failures are surfaced unchanged.
    pub fn evaluate_image(&self, image: &[u8], scope: &[String]) -> HevalResult<EvaluationReport> {
        self.evaluate_image_with_cancel(image, scope, &CancellationToken::new())
    }

    pub fn evaluate_image_with_cancel(
        &self,
        image: &[u8],
        scope: &[String],
        cancel: &CancellationToken,
    ) -> HevalResult<EvaluationReport> {
        let mut tracker = EvaluationTracker::new();
        match self.detector.as_deref() {
            Some(detector) => self.orchestrator.evaluate_image_with_tracker(
                &mut tracker,
                detector,
                image,
                self.effective_scope(scope),
                cancel,
            ),
            None => {
                let err = HevalError::from(DetectionError::Unavailable {
                    reason: "no element detector configured".to_string(),
                });
                tracker.fail(err.error_code(), &err.to_string());
                Err(err)
            }
        }
    }

    pub fn list_heuristics(&self) -> Vec<HeuristicDefinition> {
        self.orchestrator.catalog().heuristics().to_vec()
    }

    pub fn heuristic_summaries(&self) -> Vec<HeuristicSummary> {
        self.orchestrator.catalog().summaries()
    }

    pub fn knowledge_base_stats(&self) -> HevalResult<KnowledgeBaseStats> {
        self.index.stats()
    }

    pub fn submit_feedback(&self, feedback: &ExplanationFeedback) -> HevalResult<FeedbackOutcome> {
        self.curator.apply(feedback)
    }

    pub fn add_expert_exemplar(
        &self,
        heuristic_id: &str,
        criterion_id: &str,
        situation: &str,
        resolution: &str,
    ) -> HevalResult<FeedbackOutcome> {
        self.curator
            .add_expert_exemplar(heuristic_id, criterion_id, situation, resolution)
    }

    /// An empty scope falls back to `engine.default_scope`.
    fn effective_scope<'a>(&'a self, scope: &'a [String]) -> &'a [String] {
        if scope.is_empty() {
            self.config.engine.default_scope.as_slice()
        } else {
            scope
        }
    }

    pub fn save_snapshot(&self, path: &Path) -> HevalResult<()> {
        match &self.snapshot_source {
            Some(index) => IndexSnapshot::save(index, path),
            None => Err(KnowledgeError::Snapshot {
                path: path.display().to_string(),
                reason: "knowledge base does not support snapshots".to_string(),
            }
            .into()),
        }
    }
}

/// Snapshot first (when configured and present), then any seed exemplars it lacks.
fn build_index(
    config: &KnowledgeConfig,
    embedder: &dyn IEmbeddingProvider,
) -> HevalResult<KnowledgeBaseIndex> {
    let snapshot = config.snapshot_path.as_deref().map(Path::new);
    let index = match snapshot {
        Some(path) if path.exists() => {
            let index = IndexSnapshot::load(path, config.similarity_floor)?;
            if index.dimensions() != config.embedding_dimensions {
                return Err(KnowledgeError::DimensionMismatch {
                    expected: config.embedding_dimensions,
                    actual: index.dimensions(),
                }
                .into());
            }
            index
        }
        Some(path) => {
            warn!(path = %path.display(), "knowledge base snapshot not found, starting empty");
            KnowledgeBaseIndex::new(config.embedding_dimensions, config.similarity_floor)
        }
        None => KnowledgeBaseIndex::new(config.embedding_dimensions, config.similarity_floor),
    };

    if config.seed_expert_exemplars {
        let mut seeded = 0usize;
        for exemplar in seed_exemplars(embedder)? {
            match index.insert(exemplar) {
                Ok(()) => seeded += 1,
                Err(HevalError::Knowledge(KnowledgeError::DuplicateExemplar { .. })) => {}
                Err(e) => return Err(e),
            }
        }
        info!(seeded, provider = embedder.name(), "expert exemplars loaded");
    }
    Ok(index)
}
