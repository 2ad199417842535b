//! H1 Visibility of System Status.

use heval_core::models::{DetectedElement, ElementType, Evidence, Finding, Severity};
use heval_core::traits::IStructuralPredicate;

use super::geometry::{display_name, is_attached, of_type, ATTACHMENT_MARGIN};
use super::lexicon::{self, LOADING_CUES, PROCESSING_ACTIONS, STEP_CONTROLS, STEP_COUNTER_RE};

/// Screens whose actions start processing must show a loading state.
pub struct LoadingIndicator;

impl IStructuralPredicate for LoadingIndicator {
    fn name(&self) -> &str {
        "loading_indicator"
    }

    fn required_types(&self) -> &[ElementType] {
        &[ElementType::Button, ElementType::Input, ElementType::Link]
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        let triggers: Vec<&DetectedElement> = elements
            .iter()
            .filter(|e| e.element_type.is_interactive())
            .filter(|e| {
                e.label
                    .as_deref()
                    .is_some_and(|l| lexicon::has_term(l, PROCESSING_ACTIONS))
            })
            .collect();
        if triggers.is_empty() {
            return Vec::new();
        }

        let has_loading_state = elements.iter().any(|e| {
            matches!(e.element_type, ElementType::Spinner | ElementType::ProgressBar)
                || e.label
                    .as_deref()
                    .is_some_and(|l| lexicon::has_term(l, LOADING_CUES))
        });
        if has_loading_state {
            return Vec::new();
        }

        let names: Vec<String> = triggers.iter().map(|e| display_name(e)).collect();
        vec![Finding::global(
            Severity::Major,
            format!(
                "No loading state is visible for actions that start processing ({})",
                names.join(", ")
            ),
        )]
    }
}

/// Every button needs a visible state cue: hover, focus or pressed.
pub struct InteractionFeedback;

impl IStructuralPredicate for InteractionFeedback {
    fn name(&self) -> &str {
        "interaction_feedback"
    }

    fn required_types(&self) -> &[ElementType] {
        &[ElementType::Button]
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        let indicators: Vec<&DetectedElement> = of_type(elements, ElementType::Indicator).collect();
        of_type(elements, ElementType::Button)
            .filter(|button| {
                !indicators
                    .iter()
                    .any(|cue| is_attached(cue, button, ATTACHMENT_MARGIN))
            })
            .map(|button| {
                Finding::element(
                    Severity::Major,
                    &button.id,
                    format!(
                        "Button {} has no visible hover, focus or pressed state",
                        display_name(button)
                    ),
                )
            })
            .collect()
    }
}

/// Multi-step flows need a progress indicator or step counter.
pub struct StepProgress;

impl StepProgress {
    fn is_multi_step(elements: &[DetectedElement]) -> bool {
        elements.iter().any(|e| {
            e.element_type.is_interactive()
                && e.label
                    .as_deref()
                    .is_some_and(|l| lexicon::has_term(l, STEP_CONTROLS))
        })
    }
}

impl IStructuralPredicate for StepProgress {
    fn name(&self) -> &str {
        "step_progress"
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        if !Self::is_multi_step(elements) {
            return Vec::new();
        }
        let has_progress = elements.iter().any(|e| {
            e.element_type == ElementType::ProgressBar
                || e.label
                    .as_deref()
                    .is_some_and(|l| lexicon::matches(&STEP_COUNTER_RE, l))
        });
        if has_progress {
            Vec::new()
        } else {
            vec![Finding::global(
                Severity::Major,
                "Multi-step flow shows no progress bar or step counter",
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heval_core::models::BoundingBox;

    fn el(id: &str, t: ElementType, x: f64, y: f64) -> DetectedElement {
        DetectedElement::new(id, t, BoundingBox::new(x, y, 0.1, 0.05))
    }

    #[test]
    fn submit_without_spinner_is_flagged_once() {
        let elements = vec![
            el("b1", ElementType::Button, 0.1, 0.1).with_label("Save"),
            el("b2", ElementType::Button, 0.3, 0.1).with_label("Send"),
        ];
        let evidence = LoadingIndicator.evaluate(&elements);
        assert_eq!(evidence.len(), 1);
        assert!(evidence[0].affected_elements.is_empty());
    }

    #[test]
    fn loading_text_satisfies_loading_state() {
        let elements = vec![
            el("b1", ElementType::Button, 0.1, 0.1).with_label("Save"),
            el("t1", ElementType::Text, 0.1, 0.3).with_label("Saving..."),
        ];
        assert!(LoadingIndicator.evaluate(&elements).is_empty());
    }

    #[test]
    fn non_processing_actions_need_no_loading_state() {
        let elements = vec![el("b1", ElementType::Button, 0.1, 0.1).with_label("Help")];
        assert!(LoadingIndicator.evaluate(&elements).is_empty());
    }

    #[test]
    fn indicator_by_parent_or_proximity() {
        let elements = vec![
            el("b1", ElementType::Button, 0.1, 0.1),
            el("b2", ElementType::Button, 0.5, 0.5),
            el("b3", ElementType::Button, 0.8, 0.8),
            el("i1", ElementType::Indicator, 0.9, 0.0).with_parent("b1"),
            el("i2", ElementType::Indicator, 0.5, 0.56),
        ];
        let evidence = InteractionFeedback.evaluate(&elements);
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].affected_elements, vec!["b3"]);
        assert_eq!(evidence[0].severity, Severity::Major);
    }

    #[test]
    fn wizard_without_counter_is_flagged() {
        let elements = vec![el("n", ElementType::Button, 0.8, 0.9).with_label("Next")];
        assert_eq!(StepProgress.evaluate(&elements).len(), 1);

        let with_counter = vec![
            el("n", ElementType::Button, 0.8, 0.9).with_label("Next"),
            el("t", ElementType::Text, 0.1, 0.1).with_label("Step 2 of 3"),
        ];
        assert!(StepProgress.evaluate(&with_counter).is_empty());
    }
}
