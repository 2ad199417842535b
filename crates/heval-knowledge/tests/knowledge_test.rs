use std::sync::Arc;

use heval_core::models::{Provenance, RetrievalScope};
use heval_core::traits::{IEmbeddingProvider, IKnowledgeIndex};
use heval_embeddings::TfIdfEmbedder;
use heval_knowledge::{
    seed_index, ExplanationFeedback, FeedbackCurator, FeedbackOutcome, FeedbackVerdict,
    IndexSnapshot, KnowledgeBaseIndex,
};
use test_fixtures::{exemplar, StubEmbedder};

/// Unit vector at `cos` similarity to [1, 0].
fn at_similarity(cos: f32) -> Vec<f32> {
    vec![cos, (1.0 - cos * cos).sqrt()]
}

// --- Scoping ---

#[test]
fn criterion_match_beats_stronger_cross_heuristic_match() {
    let index = KnowledgeBaseIndex::new(2, 0.3);
    index.insert(exemplar("crit", "H1", "H1.2", at_similarity(0.9))).unwrap();
    index.insert(exemplar("other", "H3", "H3.3", at_similarity(0.99))).unwrap();

    let hits = index.retrieve(&[1.0, 0.0], "H1", "H1.2", 3).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].exemplar.exemplar_id, "crit");
    assert_eq!(hits[0].scope, RetrievalScope::Criterion);
    assert!((hits[0].similarity - 0.9).abs() < 1e-5);
}

#[test]
fn widens_to_heuristic_scope_when_criterion_below_floor() {
    let index = KnowledgeBaseIndex::new(2, 0.3);
    index.insert(exemplar("weak", "H1", "H1.2", at_similarity(0.1))).unwrap();
    index.insert(exemplar("sibling", "H1", "H1.1", at_similarity(0.6))).unwrap();
    index.insert(exemplar("far", "H4", "H4.1", at_similarity(0.95))).unwrap();

    let hits = index.retrieve(&[1.0, 0.0], "H1", "H1.2", 3).unwrap();
    let ids: Vec<_> = hits.iter().map(|h| h.exemplar.exemplar_id.as_str()).collect();
    assert_eq!(ids, vec!["sibling"]);
    assert_eq!(hits[0].scope, RetrievalScope::Heuristic);
}

#[test]
fn widens_to_global_scope_last() {
    let index = KnowledgeBaseIndex::new(2, 0.3);
    index.insert(exemplar("far", "H4", "H4.1", at_similarity(0.5))).unwrap();
    let hits = index.retrieve(&[1.0, 0.0], "H1", "H1.2", 3).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].scope, RetrievalScope::Global);
}

#[test]
fn nothing_above_floor_returns_empty() {
    let index = KnowledgeBaseIndex::new(2, 0.3);
    index.insert(exemplar("a", "H1", "H1.2", at_similarity(0.2))).unwrap();
    index.insert(exemplar("b", "H2", "H2.1", at_similarity(-0.5))).unwrap();
    assert!(index.retrieve(&[1.0, 0.0], "H1", "H1.2", 3).unwrap().is_empty());
}

#[test]
fn results_are_descending_and_capped_at_k() {
    let index = KnowledgeBaseIndex::new(2, 0.3);
    for (i, cos) in [0.4, 0.9, 0.6, 0.8, 0.5].iter().enumerate() {
        index
            .insert(exemplar(&format!("e{i}"), "H1", "H1.2", at_similarity(*cos)))
            .unwrap();
    }
    let hits = index.retrieve(&[1.0, 0.0], "H1", "H1.2", 3).unwrap();
    let ids: Vec<_> = hits.iter().map(|h| h.exemplar.exemplar_id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e3", "e2"]);
}

#[test]
fn concurrent_readers_see_consistent_results() {
    let index = Arc::new(KnowledgeBaseIndex::new(2, 0.3));
    index.insert(exemplar("a", "H1", "H1.2", at_similarity(0.9))).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let index = index.clone();
            std::thread::spawn(move || index.retrieve(&[1.0, 0.0], "H1", "H1.2", 3).unwrap().len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}

// --- Seed ---

#[test]
fn seed_populates_ten_heuristics() {
    let embedder = TfIdfEmbedder::new(256).unwrap();
    let index = KnowledgeBaseIndex::new(256, 0.3);
    assert_eq!(seed_index(&index, &embedder).unwrap(), 12);

    let stats = index.stats().unwrap();
    assert_eq!(stats.exemplar_count, 12);
    assert_eq!(stats.per_heuristic_counts["H1"], 2);
    assert_eq!(stats.per_heuristic_counts["H3"], 2);
    assert_eq!(stats.per_heuristic_counts.len(), 10);
    assert_eq!(stats.rejected_count, 0);
}

#[test]
fn seeded_destructive_exemplar_is_found_for_delete_query() {
    let embedder = TfIdfEmbedder::new(256).unwrap();
    let index = KnowledgeBaseIndex::new(256, 0.1);
    seed_index(&index, &embedder).unwrap();

    let query = embedder
        .embed("Destructive action delete has no confirmation dialog")
        .unwrap();
    let hits = index.retrieve(&query, "H3", "H3.3", 3).unwrap();
    assert_eq!(hits[0].exemplar.exemplar_id, "kb_002");
}

// --- Feedback ---

#[test]
fn accepted_feedback_inserts_once() {
    let index = Arc::new(KnowledgeBaseIndex::new(2, 0.3));
    let curator = FeedbackCurator::new(index.clone(), Arc::new(StubEmbedder::constant(vec![1.0, 0.0])));
    let feedback = ExplanationFeedback {
        heuristic_id: "H1".into(),
        criterion_id: "H1.2".into(),
        situation: "Button 'Pay' has no pressed state".into(),
        resolution: "Add a pressed state".into(),
        verdict: FeedbackVerdict::Accepted,
        source_exemplar_id: None,
    };

    let first = curator.apply(&feedback).unwrap();
    let second = curator.apply(&feedback).unwrap();
    let exemplar_id = match first {
        FeedbackOutcome::Inserted { exemplar_id } => exemplar_id,
        other => panic!("expected insert, got {other:?}"),
    };
    assert_eq!(second, FeedbackOutcome::Duplicate { exemplar_id: exemplar_id.clone() });

    let stored = index.get(&exemplar_id).unwrap().unwrap();
    assert_eq!(stored.provenance, Provenance::AcceptedFeedback);
    assert_eq!(index.stats().unwrap().exemplar_count, 1);
}

#[test]
fn rejected_feedback_soft_deletes_source() {
    let index = Arc::new(KnowledgeBaseIndex::new(2, 0.3));
    index.insert(exemplar("kb_x", "H1", "H1.2", vec![1.0, 0.0])).unwrap();
    let curator = FeedbackCurator::new(index.clone(), Arc::new(StubEmbedder::constant(vec![1.0, 0.0])));

    let outcome = curator
        .apply(&ExplanationFeedback {
            heuristic_id: "H1".into(),
            criterion_id: "H1.2".into(),
            situation: "s".into(),
            resolution: "r".into(),
            verdict: FeedbackVerdict::Rejected,
            source_exemplar_id: Some("kb_x".into()),
        })
        .unwrap();

    assert_eq!(outcome, FeedbackOutcome::Rejected { exemplar_id: "kb_x".into() });
    assert!(index.is_rejected("kb_x").unwrap());
    assert!(index.retrieve(&[1.0, 0.0], "H1", "H1.2", 3).unwrap().is_empty());
}

#[test]
fn reaccepting_rejected_feedback_reports_the_tombstone() {
    let index = Arc::new(KnowledgeBaseIndex::new(2, 0.3));
    let curator = FeedbackCurator::new(index.clone(), Arc::new(StubEmbedder::constant(vec![1.0, 0.0])));
    let accepted = ExplanationFeedback {
        heuristic_id: "H3".into(),
        criterion_id: "H3.3".into(),
        situation: "Delete runs immediately".into(),
        resolution: "Ask for confirmation first".into(),
        verdict: FeedbackVerdict::Accepted,
        source_exemplar_id: None,
    };

    let exemplar_id = match curator.apply(&accepted).unwrap() {
        FeedbackOutcome::Inserted { exemplar_id } => exemplar_id,
        other => panic!("expected insert, got {other:?}"),
    };
    curator
        .apply(&ExplanationFeedback {
            verdict: FeedbackVerdict::Rejected,
            source_exemplar_id: Some(exemplar_id.clone()),
            ..accepted.clone()
        })
        .unwrap();

    let again = curator.apply(&accepted).unwrap();
    assert_eq!(again, FeedbackOutcome::PreviouslyRejected { exemplar_id: exemplar_id.clone() });
    assert!(index.is_rejected(&exemplar_id).unwrap());
    assert!(index.retrieve(&[1.0, 0.0], "H3", "H3.3", 3).unwrap().is_empty());
}

#[test]
fn rejected_template_explanation_changes_nothing() {
    let index = Arc::new(KnowledgeBaseIndex::new(2, 0.3));
    let curator = FeedbackCurator::new(index.clone(), Arc::new(StubEmbedder::constant(vec![1.0, 0.0])));
    let outcome = curator
        .apply(&ExplanationFeedback {
            heuristic_id: "H1".into(),
            criterion_id: "H1.2".into(),
            situation: "s".into(),
            resolution: "r".into(),
            verdict: FeedbackVerdict::Rejected,
            source_exemplar_id: None,
        })
        .unwrap();
    assert_eq!(outcome, FeedbackOutcome::NothingToReject);
    assert!(index.is_empty().unwrap());
}

#[test]
fn expert_exemplar_has_expert_provenance() {
    let index = Arc::new(KnowledgeBaseIndex::new(2, 0.3));
    let curator = FeedbackCurator::new(index.clone(), Arc::new(StubEmbedder::constant(vec![0.0, 1.0])));
    let outcome = curator
        .add_expert_exemplar("H2", "H2.2", "Error 500 shown to users", "Explain the failure in plain words")
        .unwrap();
    let exemplar_id = match outcome {
        FeedbackOutcome::Inserted { exemplar_id } => exemplar_id,
        other => panic!("expected insert, got {other:?}"),
    };
    assert_eq!(index.get(&exemplar_id).unwrap().unwrap().provenance, Provenance::Expert);
}

// --- Snapshot ---

#[test]
fn snapshot_preserves_tombstones() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kb.json");

    let index = KnowledgeBaseIndex::new(2, 0.3);
    index.insert(exemplar("keep", "H1", "H1.2", vec![1.0, 0.0])).unwrap();
    index.insert(exemplar("drop", "H1", "H1.2", vec![1.0, 0.0])).unwrap();
    index.mark_rejected("drop").unwrap();
    IndexSnapshot::save(&index, &path).unwrap();

    let restored = IndexSnapshot::load(&path, 0.3).unwrap();
    assert_eq!(restored.len().unwrap(), 2);
    assert!(restored.is_rejected("drop").unwrap());
    assert_eq!(restored.stats().unwrap(), index.stats().unwrap());
    let hits = restored.retrieve(&[1.0, 0.0], "H1", "H1.2", 3).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].exemplar.exemplar_id, "keep");
}

#[test]
fn loading_garbage_is_snapshot_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kb.json");
    std::fs::write(&path, "not json").unwrap();
    let err = IndexSnapshot::load(&path, 0.3).unwrap_err();
    assert!(err.to_string().contains("snapshot"));
}

#[test]
fn loading_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(IndexSnapshot::load(&dir.path().join("missing.json"), 0.3).is_err());
}
