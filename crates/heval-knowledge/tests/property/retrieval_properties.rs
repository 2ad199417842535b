//! Property tests for knowledge base retrieval.

use heval_core::traits::IKnowledgeIndex;
use heval_knowledge::KnowledgeBaseIndex;
use proptest::prelude::*;
use test_fixtures::exemplar;

fn unit(angle: f64) -> Vec<f32> {
    vec![angle.cos() as f32, angle.sin() as f32]
}

proptest! {
    #[test]
    fn prop_results_sorted_bounded_and_above_floor(
        angles in prop::collection::vec(0.0f64..std::f64::consts::PI, 1..20),
        criteria in prop::collection::vec(0usize..3, 1..20),
        k in 1usize..6,
    ) {
        let index = KnowledgeBaseIndex::new(2, 0.3);
        for (i, angle) in angles.iter().enumerate() {
            let c = criteria[i % criteria.len()];
            let h = if c == 2 { "H2" } else { "H1" };
            let criterion = format!("{h}.{}", c + 1);
            index.insert(exemplar(&format!("e{i:02}"), h, &criterion, unit(*angle))).unwrap();
        }

        let hits = index.retrieve(&[1.0, 0.0], "H1", "H1.1", k).unwrap();
        prop_assert!(hits.len() <= k);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
        }
        for hit in &hits {
            prop_assert!(hit.similarity >= 0.3);
            prop_assert!((-1.0..=1.0).contains(&hit.similarity));
            prop_assert_eq!(hit.scope, hits[0].scope);
        }
    }

    #[test]
    fn prop_rejected_never_returned(reject_mask in prop::collection::vec(any::<bool>(), 1..12)) {
        let index = KnowledgeBaseIndex::new(2, 0.3);
        for (i, reject) in reject_mask.iter().enumerate() {
            let id = format!("e{i:02}");
            index.insert(exemplar(&id, "H1", "H1.1", vec![1.0, 0.0])).unwrap();
            if *reject {
                index.mark_rejected(&id).unwrap();
            }
        }
        let hits = index.retrieve(&[1.0, 0.0], "H1", "H1.1", reject_mask.len()).unwrap();
        let kept = reject_mask.iter().filter(|r| !**r).count();
        prop_assert_eq!(hits.len(), kept);
        for hit in &hits {
            prop_assert!(!index.is_rejected(&hit.exemplar.exemplar_id).unwrap());
        }
    }
}
