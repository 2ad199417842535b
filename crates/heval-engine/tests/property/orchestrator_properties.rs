//! Property tests for report assembly.

use std::sync::Arc;

use heval_analysis::HeuristicCatalog;
use heval_core::config::HevalConfig;
use heval_engine::HeuristicEvaluationService;
use proptest::prelude::*;
use test_fixtures::{EmptyIndex, StubEmbedder};

const FIXTURES: &[&str] = &["login_form", "checkout_wizard", "destructive_list"];
const HEURISTICS: &[&str] = &["H1", "H2", "H3", "H4"];

fn service() -> HeuristicEvaluationService {
    HeuristicEvaluationService::with_components(
        HevalConfig::default(),
        HeuristicCatalog::builtin().unwrap(),
        Arc::new(EmptyIndex::new()),
        Arc::new(StubEmbedder::constant(vec![1.0])),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_scope_never_changes_a_result(
        fixture in 0usize..3,
        mask in prop::collection::vec(any::<bool>(), 4),
    ) {
        let service = service();
        let elements = test_fixtures::catalog(FIXTURES[fixture]);
        let scope: Vec<String> = HEURISTICS
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(h, _)| h.to_string())
            .collect();
        prop_assume!(!scope.is_empty());

        let full = service.evaluate(&elements, &[]).unwrap();
        let partial = service.evaluate(&elements, &scope).unwrap();
        prop_assert_eq!(partial.heuristic_scores.len(), scope.len());
        for result in &partial.heuristic_scores {
            prop_assert_eq!(Some(result), full.result(&result.heuristic_id));
        }
    }

    #[test]
    fn prop_overall_lies_between_extremes(fixture in 0usize..3) {
        let report = service().evaluate(&test_fixtures::catalog(FIXTURES[fixture]), &[]).unwrap();
        let scores = report.heuristic_scores.iter().map(|r| f64::from(r.score));
        let lo = scores.clone().fold(f64::INFINITY, f64::min);
        let hi = scores.fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(report.overall_score >= lo - 0.01 && report.overall_score <= hi + 0.01);
        prop_assert_eq!(
            report.total_violations,
            report.heuristic_scores.iter().map(|r| r.violations.len()).sum::<usize>()
        );
    }
}
