//! Property tests for core model invariants.

use heval_core::models::{BoundingBox, Severity, Violation};
use proptest::prelude::*;

fn normalized_box() -> impl Strategy<Value = BoundingBox> {
    (0.0f64..1.0, 0.0f64..1.0)
        .prop_flat_map(|(x, y)| (Just(x), Just(y), 0.0..=(1.0 - x), 0.0..=(1.0 - y)))
        .prop_map(|(x, y, w, h)| BoundingBox::new(x, y, w, h))
}

proptest! {
    #[test]
    fn prop_expand_stays_normalized_and_covers(bbox in normalized_box(), margin in 0.0f64..0.5) {
        let grown = bbox.expand(margin);
        prop_assert!(grown.is_normalized());
        prop_assert!(grown.x <= bbox.x && grown.y <= bbox.y);
        prop_assert!(grown.right() >= bbox.right() - 1e-9);
        prop_assert!(grown.bottom() >= bbox.bottom() - 1e-9);
    }

    #[test]
    fn prop_intersects_is_symmetric(a in normalized_box(), b in normalized_box()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn prop_affected_elements_sorted_unique(ids in prop::collection::vec("[a-c]{1,2}", 0..12)) {
        let v = Violation::new("H1", "H1.1", Severity::Minor, "d", ids.clone());
        prop_assert!(v.affected_elements.windows(2).all(|w| w[0] < w[1]));
        for id in &ids {
            prop_assert!(v.affected_elements.contains(id));
        }
        prop_assert_eq!(v.is_global(), ids.is_empty());
    }

    #[test]
    fn prop_max_severity_dominates(a in 0usize..4, b in 0usize..4) {
        let (sa, sb) = (Severity::all()[a], Severity::all()[b]);
        let worst = sa.max(sb);
        prop_assert!(worst.is_at_least(sa) && worst.is_at_least(sb));
    }
}
