use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use heval_analysis::HeuristicCatalog;
use heval_core::config::HevalConfig;
use heval_engine::HeuristicEvaluationService;
use test_fixtures::{EmptyIndex, StubEmbedder};

fn bench_detect_and_score(c: &mut Criterion) {
    let service = HeuristicEvaluationService::with_components(
        HevalConfig::default(),
        HeuristicCatalog::builtin().unwrap(),
        Arc::new(EmptyIndex::new()),
        Arc::new(StubEmbedder::constant(vec![1.0])),
    );
    let elements = test_fixtures::catalog("destructive_list");

    c.bench_function("evaluate_all_heuristics_stub_index", |b| {
        b.iter(|| service.evaluate(&elements, &[]).unwrap())
    });
}

fn bench_with_knowledge_base(c: &mut Criterion) {
    let service = HeuristicEvaluationService::new(HevalConfig::default()).unwrap();
    let elements = test_fixtures::catalog("checkout_wizard");

    c.bench_function("evaluate_all_heuristics_seeded_kb", |b| {
        b.iter(|| service.evaluate(&elements, &[]).unwrap())
    });
}

criterion_group!(benches, bench_detect_and_score, bench_with_knowledge_base);
criterion_main!(benches);
