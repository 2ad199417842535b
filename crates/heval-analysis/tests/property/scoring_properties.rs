//! Property tests for detection and scoring.

use heval_analysis::{score, CriterionViolations, HeuristicCatalog, ViolationDetector};
use heval_core::config::SeverityMultipliers;
use heval_core::models::{BoundingBox, DetectedElement, ElementType, Severity, Violation};
use proptest::prelude::*;

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Critical),
        Just(Severity::Major),
        Just(Severity::Minor),
        Just(Severity::Cosmetic),
    ]
}

fn element_type() -> impl Strategy<Value = ElementType> {
    prop_oneof![
        Just(ElementType::Button),
        Just(ElementType::Input),
        Just(ElementType::Link),
        Just(ElementType::Icon),
        Just(ElementType::Text),
        Just(ElementType::Container),
        Just(ElementType::Navigation),
        Just(ElementType::Dialog),
        Just(ElementType::Indicator),
        Just(ElementType::Spinner),
    ]
}

fn label() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("Delete".to_string()),
        Just("Remove".to_string()),
        Just("Next".to_string()),
        Just("Cancel".to_string()),
        Just("Submit".to_string()),
        Just("Error 503".to_string()),
        Just("Step 1 of 3".to_string()),
        "[a-z ]{0,12}",
    ])
}

fn elements() -> impl Strategy<Value = Vec<DetectedElement>> {
    prop::collection::vec(
        (element_type(), 0.0f64..0.9, 0.0f64..0.9, 0.01f64..0.1, 0.01f64..0.1, label()),
        0..16,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (ty, x, y, w, h, label))| {
                let mut e = DetectedElement::new(format!("e{i}"), ty, BoundingBox::new(x, y, w, h));
                e.label = label;
                e
            })
            .collect()
    })
}

/// Violations spread over the criteria of H1 (three criteria).
fn violations_for_h1(severities: &[(usize, Severity)]) -> CriterionViolations {
    let mut map = CriterionViolations::new();
    for (i, (criterion, severity)) in severities.iter().enumerate() {
        let criterion_id = format!("H1.{}", criterion % 3 + 1);
        map.entry(criterion_id.clone()).or_default().push(Violation::new(
            "H1",
            criterion_id,
            *severity,
            format!("v{i}"),
            Vec::<String>::new(),
        ));
    }
    map
}

proptest! {
    #[test]
    fn prop_score_bounded_and_perfect_only_when_clean(
        found in prop::collection::vec((0usize..3, severity()), 0..12),
    ) {
        let catalog = HeuristicCatalog::builtin().unwrap();
        let h1 = catalog.get("H1").unwrap();
        let result = score(&violations_for_h1(&found), h1, &SeverityMultipliers::default());
        prop_assert!(result.score <= 100);
        prop_assert_eq!(result.score == 100, found.is_empty());
        prop_assert_eq!(result.violations.len(), found.len());
    }

    #[test]
    fn prop_extra_violation_never_raises_score(
        found in prop::collection::vec((0usize..3, severity()), 0..10),
        extra in (0usize..3, severity()),
    ) {
        let catalog = HeuristicCatalog::builtin().unwrap();
        let h1 = catalog.get("H1").unwrap();
        let multipliers = SeverityMultipliers::default();
        let before = score(&violations_for_h1(&found), h1, &multipliers).score;
        let mut more = found.clone();
        more.push(extra);
        let after = score(&violations_for_h1(&more), h1, &multipliers).score;
        prop_assert!(after <= before);
    }

    #[test]
    fn prop_detection_is_total_and_deterministic(catalog_elements in elements()) {
        let catalog = HeuristicCatalog::builtin().unwrap();
        let detector = ViolationDetector::new(catalog.registry().clone(), false);
        let multipliers = SeverityMultipliers::default();
        for heuristic in catalog.heuristics() {
            let first = detector.detect_heuristic(&catalog_elements, heuristic).unwrap();
            let second = detector.detect_heuristic(&catalog_elements, heuristic).unwrap();
            prop_assert_eq!(&first, &second);
            let result = score(&first, heuristic, &multipliers);
            prop_assert!(result.score <= 100);
            for v in &result.violations {
                prop_assert_eq!(&v.heuristic_id, &heuristic.heuristic_id);
                prop_assert!(v.affected_elements.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
