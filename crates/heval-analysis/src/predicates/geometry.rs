//! Catalog lookups shared by predicates: parent links, proximity, display names.

use heval_core::models::{DetectedElement, ElementType};

/// Margin (normalized units) within which a cue counts as attached to an element.
pub const ATTACHMENT_MARGIN: f64 = 0.02;

/// Margin within which a text element can serve as an icon's caption.
pub const CAPTION_MARGIN: f64 = 0.03;

pub fn of_type<'a>(
    elements: &'a [DetectedElement],
    element_type: ElementType,
) -> impl Iterator<Item = &'a DetectedElement> + 'a {
    elements.iter().filter(move |e| e.element_type == element_type)
}

pub fn any_of_type(elements: &[DetectedElement], types: &[ElementType]) -> bool {
    elements.iter().any(|e| types.contains(&e.element_type))
}

pub fn find<'a>(elements: &'a [DetectedElement], id: &str) -> Option<&'a DetectedElement> {
    elements.iter().find(|e| e.id == id)
}

/// Whether `inner` sits inside `outer`: by parent chain or by geometry.
pub fn is_within(elements: &[DetectedElement], inner: &DetectedElement, outer: &DetectedElement) -> bool {
    if inner.id == outer.id {
        return false;
    }
    if outer.bbox.contains(&inner.bbox) {
        return true;
    }
    // Bounded walk; malformed parent cycles are rejected before detection.
    let mut current = inner.parent_id.as_deref();
    for _ in 0..elements.len() {
        match current {
            Some(id) if id == outer.id => return true,
            Some(id) => current = find(elements, id).and_then(|p| p.parent_id.as_deref()),
            None => return false,
        }
    }
    false
}

/// Whether `cue` is attached to `target`: parented to it, or touching its
/// box expanded by `margin`.
pub fn is_attached(cue: &DetectedElement, target: &DetectedElement, margin: f64) -> bool {
    cue.parent_id.as_deref() == Some(target.id.as_str())
        || target.bbox.expand(margin).intersects(&cue.bbox)
}

/// Label if present, otherwise the element id.
pub fn display_name(element: &DetectedElement) -> String {
    element
        .label
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| format!("'{l}'"))
        .unwrap_or_else(|| element.id.clone())
}

pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}
