//! Deterministic explanation text built only from the violation and its criterion.

use heval_core::models::{CriterionDefinition, Severity, Violation};

/// Affected elements are listed up to this many ids, then summarized.
const MAX_LISTED_ELEMENTS: usize = 5;

pub fn describe(violation: &Violation, criterion: &CriterionDefinition) -> String {
    format!(
        "{} ({}, {}): {} [{}]",
        criterion.description,
        criterion.criterion_id,
        violation.severity,
        violation.description,
        scope_text(&violation.affected_elements)
    )
}

pub fn recommend(violation: &Violation, criterion: &CriterionDefinition) -> String {
    let urgency = match violation.severity {
        Severity::Critical => "Fix before release",
        Severity::Major => "Fix with high priority",
        Severity::Minor => "Fix when convenient",
        Severity::Cosmetic => "Consider polishing",
    };
    let target = if violation.is_global() {
        "across the screen".to_string()
    } else {
        format!("on {}", list_elements(&violation.affected_elements))
    };
    format!(
        "{urgency}: make sure the screen satisfies \"{}\" {target}.",
        lowercase_first(&criterion.description)
    )
}

fn scope_text(affected: &[String]) -> String {
    if affected.is_empty() {
        "layout-wide".to_string()
    } else {
        format!("affects {}", list_elements(affected))
    }
}

fn list_elements(affected: &[String]) -> String {
    if affected.len() <= MAX_LISTED_ELEMENTS {
        return affected.join(", ");
    }
    format!(
        "{} and {} more",
        affected[..MAX_LISTED_ELEMENTS].join(", "),
        affected.len() - MAX_LISTED_ELEMENTS
    )
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
