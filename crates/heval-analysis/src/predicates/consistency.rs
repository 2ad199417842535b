//! H4 Consistency and Standards.

use std::collections::BTreeMap;

use heval_core::models::{DetectedElement, ElementType, Evidence, Finding, Severity};
use heval_core::traits::IStructuralPredicate;

use super::geometry::{display_name, median, of_type};
use super::lexicon::{self, SYNONYM_GROUPS};

/// One word per action across the screen.
pub struct ConsistentTerminology;

impl IStructuralPredicate for ConsistentTerminology {
    fn name(&self) -> &str {
        "consistent_terminology"
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        let mut evidence = Vec::new();
        for group in SYNONYM_GROUPS {
            // term → elements using it, in a stable order for the description.
            let mut usage: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
            for element in elements {
                if let Some(term) = element
                    .label
                    .as_deref()
                    .and_then(|l| lexicon::find_term(l, group))
                {
                    usage.entry(term).or_default().push(&element.id);
                }
            }
            if usage.len() < 2 {
                continue;
            }
            let terms: Vec<String> = usage.keys().map(|t| format!("'{t}'")).collect();
            let ids: Vec<&str> = usage.values().flatten().copied().collect();
            evidence.push(Finding::elements(
                Severity::Minor,
                ids,
                format!("Mixed terminology for the same action: {}", terms.join(" and ")),
            ));
        }
        evidence
    }
}

/// Relative height deviation from the median beyond which a button is inconsistent.
const SIZE_TOLERANCE: f64 = 0.25;

/// Minimum number of buttons before sizes are compared.
const MIN_SIZED_BUTTONS: usize = 3;

/// Buttons share a common height.
pub struct ConsistentSizing;

impl IStructuralPredicate for ConsistentSizing {
    fn name(&self) -> &str {
        "consistent_sizing"
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        let buttons: Vec<&DetectedElement> = of_type(elements, ElementType::Button).collect();
        if buttons.len() < MIN_SIZED_BUTTONS {
            return Vec::new();
        }
        let mut heights: Vec<f64> = buttons.iter().map(|b| b.bbox.h).collect();
        let Some(typical) = median(&mut heights).filter(|m| *m > f64::EPSILON) else {
            return Vec::new();
        };

        buttons
            .into_iter()
            .filter(|b| ((b.bbox.h - typical) / typical).abs() > SIZE_TOLERANCE)
            .map(|b| {
                Finding::element(
                    Severity::Cosmetic,
                    &b.id,
                    format!(
                        "Button {} height {:.3} departs from the typical {:.3}",
                        display_name(b),
                        b.bbox.h,
                        typical
                    ),
                )
            })
            .collect()
    }
}

/// Edge band (normalized) in which navigation counts as conventionally placed.
const NAVIGATION_EDGE_BAND: f64 = 0.2;

/// Navigation sits along the top, left or bottom edge.
pub struct NavigationPlacement;

impl IStructuralPredicate for NavigationPlacement {
    fn name(&self) -> &str {
        "navigation_placement"
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        of_type(elements, ElementType::Navigation)
            .filter(|nav| {
                let b = &nav.bbox;
                let top = b.y <= NAVIGATION_EDGE_BAND;
                let left = b.x <= NAVIGATION_EDGE_BAND && b.w <= NAVIGATION_EDGE_BAND * 2.0;
                let bottom = b.bottom() >= 1.0 - NAVIGATION_EDGE_BAND;
                !(top || left || bottom)
            })
            .map(|nav| {
                Finding::element(
                    Severity::Minor,
                    &nav.id,
                    format!(
                        "Navigation {} is placed away from the top, side or bottom edge",
                        display_name(nav)
                    ),
                )
            })
            .collect()
    }
}
