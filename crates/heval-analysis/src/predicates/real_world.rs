//! H2 Match Between System and the Real World.

use heval_core::models::{DetectedElement, ElementType, Evidence, Finding, Severity};
use heval_core::traits::IStructuralPredicate;

use super::geometry::{display_name, find, is_within, of_type, CAPTION_MARGIN};
use super::lexicon::{self, ERROR_CODE_RE, JARGON};

/// Icons need a text label or an adjacent caption.
pub struct LabelledIcons;

impl LabelledIcons {
    fn is_captioned(elements: &[DetectedElement], icon: &DetectedElement) -> bool {
        if icon.has_label() {
            return true;
        }
        let parent_labelled = icon
            .parent_id
            .as_deref()
            .and_then(|id| find(elements, id))
            .is_some_and(|p| p.element_type.is_interactive() && p.has_label());
        if parent_labelled {
            return true;
        }
        let zone = icon.bbox.expand(CAPTION_MARGIN);
        of_type(elements, ElementType::Text).any(|t| t.has_label() && zone.intersects(&t.bbox))
    }
}

impl IStructuralPredicate for LabelledIcons {
    fn name(&self) -> &str {
        "labelled_icons"
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        of_type(elements, ElementType::Icon)
            .filter(|icon| !Self::is_captioned(elements, icon))
            .map(|icon| {
                Finding::element(
                    Severity::Minor,
                    &icon.id,
                    format!("Icon {} has no text label or caption", icon.id),
                )
            })
            .collect()
    }
}

/// User-facing text avoids raw error codes and developer vocabulary.
pub struct PlainLanguage;

impl IStructuralPredicate for PlainLanguage {
    fn name(&self) -> &str {
        "plain_language"
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        let mut evidence = Vec::new();
        for element in elements {
            let Some(label) = element.label.as_deref() else {
                continue;
            };
            if lexicon::matches(&ERROR_CODE_RE, label) {
                evidence.push(Finding::element(
                    Severity::Major,
                    &element.id,
                    format!("{} exposes a raw error code", display_name(element)),
                ));
            } else if let Some(term) = lexicon::find_term(label, JARGON) {
                evidence.push(Finding::element(
                    Severity::Minor,
                    &element.id,
                    format!("{} uses technical term '{term}'", display_name(element)),
                ));
            }
        }
        evidence
    }
}

/// Minimum number of content elements before grouping is expected.
const GROUPING_THRESHOLD: usize = 6;

fn is_grouping(element_type: ElementType) -> bool {
    matches!(
        element_type,
        ElementType::Container | ElementType::Navigation | ElementType::Dialog
    )
}

/// Related content is organized into visible groups.
pub struct ContentGrouping;

impl IStructuralPredicate for ContentGrouping {
    fn name(&self) -> &str {
        "content_grouping"
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        let content: Vec<&DetectedElement> = elements
            .iter()
            .filter(|e| !is_grouping(e.element_type) && !e.element_type.is_status_cue())
            .collect();
        if content.len() < GROUPING_THRESHOLD {
            return Vec::new();
        }

        let groups: Vec<&DetectedElement> = elements
            .iter()
            .filter(|e| is_grouping(e.element_type))
            .collect();
        if groups.is_empty() {
            return vec![Finding::global(
                Severity::Major,
                format!(
                    "{} elements are laid out with no grouping containers",
                    content.len()
                ),
            )];
        }

        let orphans: Vec<&str> = content
            .iter()
            .filter(|e| !groups.iter().any(|g| is_within(elements, e, g)))
            .map(|e| e.id.as_str())
            .collect();
        // Most of the screen ungrouped reads as one layout problem, not many.
        if orphans.len() * 2 > content.len() {
            vec![Finding::global(
                Severity::Minor,
                format!(
                    "{} of {} elements sit outside any group",
                    orphans.len(),
                    content.len()
                ),
            )]
        } else {
            Vec::new()
        }
    }
}
