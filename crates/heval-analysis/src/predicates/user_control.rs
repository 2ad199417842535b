//! H3 User Control and Freedom.

use heval_core::models::{DetectedElement, ElementType, Evidence, Finding, Severity};
use heval_core::traits::IStructuralPredicate;

use super::geometry::{display_name, is_within, of_type};
use super::lexicon::{
    self, CONFIRMATION_CUES, DESTRUCTIVE_ACTIONS, EXIT_CONTROLS, REVERSAL_CONTROLS, STEP_CONTROLS,
    STEP_COUNTER_RE,
};

fn labelled_with(element: &DetectedElement, terms: &[&str]) -> bool {
    element
        .label
        .as_deref()
        .is_some_and(|l| lexicon::has_term(l, terms))
}

/// Controls a user can act on, including icon buttons such as a close "x".
fn is_actionable(element: &DetectedElement) -> bool {
    element.element_type.is_interactive() || element.element_type == ElementType::Icon
}

/// Some way to reverse the last action: undo, back or cancel.
pub struct ReversibleActions;

impl IStructuralPredicate for ReversibleActions {
    fn name(&self) -> &str {
        "reversible_actions"
    }

    fn required_types(&self) -> &[ElementType] {
        &[ElementType::Button, ElementType::Link]
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        let reversible = elements
            .iter()
            .any(|e| is_actionable(e) && labelled_with(e, REVERSAL_CONTROLS));
        if reversible {
            Vec::new()
        } else {
            vec![Finding::global(
                Severity::Major,
                "No undo, back or cancel control is available",
            )]
        }
    }
}

/// Flows and dialogs offer a clearly marked exit.
pub struct ExitAffordance;

impl ExitAffordance {
    fn is_flow(elements: &[DetectedElement]) -> bool {
        elements.iter().any(|e| {
            (e.element_type.is_interactive() && labelled_with(e, STEP_CONTROLS))
                || e.label
                    .as_deref()
                    .is_some_and(|l| lexicon::matches(&STEP_COUNTER_RE, l))
        })
    }
}

impl IStructuralPredicate for ExitAffordance {
    fn name(&self) -> &str {
        "exit_affordance"
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        let mut evidence = Vec::new();

        for dialog in of_type(elements, ElementType::Dialog) {
            let closable = elements.iter().any(|e| {
                is_actionable(e) && labelled_with(e, EXIT_CONTROLS) && is_within(elements, e, dialog)
            });
            if !closable {
                evidence.push(Finding::element(
                    Severity::Critical,
                    &dialog.id,
                    format!("Dialog {} has no close or cancel control", display_name(dialog)),
                ));
            }
        }

        if Self::is_flow(elements) {
            let exitable = elements
                .iter()
                .any(|e| is_actionable(e) && labelled_with(e, EXIT_CONTROLS));
            if !exitable {
                evidence.push(Finding::global(
                    Severity::Critical,
                    "Multi-step flow offers no way to cancel or exit",
                ));
            }
        }

        evidence
    }
}

/// Destructive actions are confirmed before they run.
pub struct DestructiveConfirmation;

impl IStructuralPredicate for DestructiveConfirmation {
    fn name(&self) -> &str {
        "destructive_confirmation"
    }

    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence {
        let confirmation_shown = elements.iter().any(|e| labelled_with(e, CONFIRMATION_CUES));
        if confirmation_shown {
            return Vec::new();
        }
        let dialogs: Vec<&DetectedElement> = of_type(elements, ElementType::Dialog).collect();

        elements
            .iter()
            .filter(|e| e.element_type.is_interactive() && labelled_with(e, DESTRUCTIVE_ACTIONS))
            .filter(|e| !dialogs.iter().any(|d| is_within(elements, e, d)))
            .map(|e| {
                Finding::element(
                    Severity::Major,
                    &e.id,
                    format!("Destructive action {} runs without confirmation", display_name(e)),
                )
            })
            .collect()
    }
}
