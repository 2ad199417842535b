use std::sync::Arc;
use std::thread;
use std::time::Duration;

use heval_core::config::ExplainConfig;
use heval_core::models::{CriterionDefinition, RetrievalScope, ScoredExemplar, Severity, Violation};
use heval_core::traits::{Cancellable, CancellationToken, IKnowledgeIndex};
use heval_explain::{ExplanationAugmenter, ExplanationSource, FallbackReason};
use heval_knowledge::KnowledgeBaseIndex;
use test_fixtures::{exemplar, EmptyIndex, FailingIndex, SlowIndex, StubEmbedder};

const FLOOR: f64 = 0.3;

fn config(timeout_ms: u64) -> ExplainConfig {
    ExplainConfig {
        retrieval_k: 3,
        retrieval_timeout_ms: timeout_ms,
        ..ExplainConfig::default()
    }
}

fn criterion() -> CriterionDefinition {
    CriterionDefinition::new("H1.2", "System feedback for user actions", 10, "interaction_feedback")
}

fn violation() -> Violation {
    Violation::new(
        "H1",
        "H1.2",
        Severity::Major,
        "Button 'Save' has no hover, focus or pressed state",
        ["btn-save"],
    )
}

fn augmenter(index: Arc<dyn IKnowledgeIndex>, embedder: Arc<StubEmbedder>, timeout_ms: u64) -> ExplanationAugmenter {
    ExplanationAugmenter::new(index, embedder, &config(timeout_ms), FLOOR)
}

fn template_reason(source: &ExplanationSource) -> Option<FallbackReason> {
    match source {
        ExplanationSource::Template { reason } => Some(*reason),
        ExplanationSource::Exemplar { .. } => None,
    }
}

#[test]
fn matching_exemplar_grounds_the_explanation() {
    let index = Arc::new(KnowledgeBaseIndex::new(2, FLOOR));
    index.insert(exemplar("kb_a", "H1", "H1.2", vec![1.0, 0.0])).unwrap();
    let embedder = Arc::new(StubEmbedder::constant(vec![1.0, 0.0]));

    let explanation = augmenter(index, embedder, 2000).explain(&violation(), &criterion(), &CancellationToken::new());

    assert!(explanation.is_grounded());
    assert_eq!(explanation.exemplar_id(), Some("kb_a"));
    assert_eq!(explanation.recommendation, "resolution from kb_a");
    assert_eq!(
        explanation.description,
        "Button 'Save' has no hover, focus or pressed state. Similar case: situation for kb_a"
    );
    match explanation.source {
        ExplanationSource::Exemplar { similarity, scope, .. } => {
            assert!((similarity - 1.0).abs() < 1e-6);
            assert_eq!(scope, RetrievalScope::Criterion);
        }
        other => panic!("unexpected source {other:?}"),
    }
}

#[test]
fn no_exemplar_above_floor_uses_template() {
    let index = Arc::new(KnowledgeBaseIndex::new(2, FLOOR));
    index.insert(exemplar("kb_a", "H1", "H1.2", vec![0.0, 1.0])).unwrap();
    let embedder = Arc::new(StubEmbedder::constant(vec![1.0, 0.0]));

    let explanation = augmenter(index, embedder, 2000).explain(&violation(), &criterion(), &CancellationToken::new());

    assert_eq!(template_reason(&explanation.source), Some(FallbackReason::NoMatch));
    assert!(explanation.description.starts_with("System feedback for user actions (H1.2, major)"));
    assert!(explanation.recommendation.contains("on btn-save"));
}

#[test]
fn low_similarity_hit_from_index_is_ignored() {
    let hit = ScoredExemplar {
        exemplar: Arc::new(exemplar("kb_low", "H1", "H1.2", vec![1.0, 0.0])),
        similarity: 0.1,
        scope: RetrievalScope::Global,
    };
    let index = Arc::new(SlowIndex::new(Duration::ZERO, vec![hit]));
    let embedder = Arc::new(StubEmbedder::constant(vec![1.0, 0.0]));

    let explanation = augmenter(index, embedder, 2000).explain(&violation(), &criterion(), &CancellationToken::new());
    assert_eq!(template_reason(&explanation.source), Some(FallbackReason::NoMatch));
}

#[test]
fn cancelled_request_issues_no_query() {
    let index = Arc::new(EmptyIndex::new());
    let embedder = Arc::new(StubEmbedder::constant(vec![1.0, 0.0]));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let explanation = augmenter(index.clone(), embedder.clone(), 2000).explain(&violation(), &criterion(), &cancel);

    assert_eq!(template_reason(&explanation.source), Some(FallbackReason::Cancelled));
    assert_eq!(index.queries(), 0);
    assert_eq!(embedder.calls(), 0);
}

#[test]
fn slow_retrieval_times_out_and_worker_finishes() {
    let hit = ScoredExemplar {
        exemplar: Arc::new(exemplar("kb_slow", "H1", "H1.2", vec![1.0, 0.0])),
        similarity: 0.95,
        scope: RetrievalScope::Criterion,
    };
    let index = Arc::new(SlowIndex::new(Duration::from_millis(300), vec![hit]));
    let embedder = Arc::new(StubEmbedder::constant(vec![1.0, 0.0]));

    let explanation = augmenter(index.clone(), embedder, 20).explain(&violation(), &criterion(), &CancellationToken::new());
    assert_eq!(template_reason(&explanation.source), Some(FallbackReason::Timeout));

    thread::sleep(Duration::from_millis(800));
    assert_eq!(index.completed(), 1);
}

#[test]
fn retrieval_failure_uses_template() {
    let index = Arc::new(FailingIndex::new());
    let embedder = Arc::new(StubEmbedder::constant(vec![1.0, 0.0]));
    let explanation = augmenter(index, embedder, 2000).explain(&violation(), &criterion(), &CancellationToken::new());
    assert_eq!(template_reason(&explanation.source), Some(FallbackReason::RetrievalFailed));
}

#[test]
fn embedding_failure_uses_template() {
    let index = Arc::new(EmptyIndex::new());
    let embedder = Arc::new(StubEmbedder::failing(2));
    let explanation = augmenter(index.clone(), embedder, 2000).explain(&violation(), &criterion(), &CancellationToken::new());
    assert_eq!(template_reason(&explanation.source), Some(FallbackReason::EmbeddingFailed));
    assert_eq!(index.queries(), 0);
}

#[test]
fn dimension_mismatch_uses_template() {
    let index = Arc::new(KnowledgeBaseIndex::new(2, FLOOR));
    let embedder = Arc::new(StubEmbedder::constant(vec![1.0, 0.0, 0.0]));
    let explanation = augmenter(index, embedder, 2000).explain(&violation(), &criterion(), &CancellationToken::new());
    assert_eq!(template_reason(&explanation.source), Some(FallbackReason::RetrievalFailed));
}

#[test]
fn k_is_never_below_three() {
    let a = ExplanationAugmenter::new(
        Arc::new(EmptyIndex::new()),
        Arc::new(StubEmbedder::constant(vec![1.0])),
        &ExplainConfig {
            retrieval_k: 1,
            retrieval_timeout_ms: 100,
            ..ExplainConfig::default()
        },
        FLOOR,
    );
    assert_eq!(a.k(), 3);
}

#[test]
fn augment_keeps_severity_and_elements() {
    let index = Arc::new(EmptyIndex::new());
    let embedder = Arc::new(StubEmbedder::constant(vec![1.0, 0.0]));
    let original = violation();
    let explained = augmenter(index, embedder, 2000).augment(&original, &criterion(), &CancellationToken::new());

    assert_eq!(explained.severity, original.severity);
    assert_eq!(explained.affected_elements, original.affected_elements);
    assert_eq!(explained.criterion_id, original.criterion_id);
    assert!(!explained.recommendation.is_empty());
}
