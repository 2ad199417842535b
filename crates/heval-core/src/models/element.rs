//! Detected UI elements, as produced by the upstream element detector.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a detected UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Button,
    Input,
    Link,
    Icon,
    Text,
    Heading,
    Image,
    Container,
    Navigation,
    Dialog,
    /// Visual state cue: hover highlight, focus ring, pressed state.
    Indicator,
    Spinner,
    ProgressBar,
    #[serde(other)]
    Unknown,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input => "input",
            Self::Link => "link",
            Self::Icon => "icon",
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Image => "image",
            Self::Container => "container",
            Self::Navigation => "navigation",
            Self::Dialog => "dialog",
            Self::Indicator => "indicator",
            Self::Spinner => "spinner",
            Self::ProgressBar => "progress_bar",
            Self::Unknown => "unknown",
        }
    }

    /// Elements a user can act on directly.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Button | Self::Input | Self::Link)
    }

    /// Elements that only exist to communicate system state.
    pub fn is_status_cue(&self) -> bool {
        matches!(self, Self::Indicator | Self::Spinner | Self::ProgressBar)
    }

    /// Grouping bucket used by [`CatalogSummary`].
    pub fn group(&self) -> &'static str {
        match self {
            Self::Button => "buttons",
            Self::Input => "inputs",
            Self::Navigation => "navigation",
            Self::Link => "links",
            _ => "content",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned box in normalized [0, 1] screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Tolerance for detector rounding at the right/bottom screen edge.
const EDGE_TOLERANCE: f64 = 1e-6;

impl BoundingBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Whether every coordinate is finite and the box lies inside the unit square.
    pub fn is_normalized(&self) -> bool {
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        in_unit(self.x)
            && in_unit(self.y)
            && in_unit(self.w)
            && in_unit(self.h)
            && self.right() <= 1.0 + EDGE_TOLERANCE
            && self.bottom() <= 1.0 + EDGE_TOLERANCE
    }

    /// Grow the box by `margin` on every side, clipped to the unit square.
    pub fn expand(&self, margin: f64) -> Self {
        let x = (self.x - margin).max(0.0);
        let y = (self.y - margin).max(0.0);
        let right = (self.right() + margin).min(1.0);
        let bottom = (self.bottom() + margin).min(1.0);
        Self::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    /// Boxes that touch count as intersecting.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// One UI element reported by the upstream detector.
///
/// Immutable once produced; owned by the evaluation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedElement {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub bbox: BoundingBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Detector confidence [0.0, 1.0].
    pub confidence: f64,
    /// Weak reference to the enclosing element, by id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl DetectedElement {
    pub fn new(id: impl Into<String>, element_type: ElementType, bbox: BoundingBox) -> Self {
        Self {
            id: id.into(),
            element_type,
            bbox,
            label: None,
            confidence: 1.0,
            parent_id: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Trimmed, lowercased label, or `None` when the label is missing or blank.
    pub fn normalized_label(&self) -> Option<String> {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_lowercase)
    }

    pub fn has_label(&self) -> bool {
        self.normalized_label().is_some()
    }
}

/// Overview of a catalog: totals, type spread, and elements bucketed by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total_elements: usize,
    pub interactive_elements: usize,
    pub element_types: Vec<ElementType>,
    /// Group name ("buttons", "inputs", "navigation", "links", "content") → element ids.
    pub groups: BTreeMap<String, Vec<String>>,
}

impl CatalogSummary {
    pub fn of(elements: &[DetectedElement]) -> Self {
        let mut groups: BTreeMap<String, Vec<String>> = ["buttons", "inputs", "navigation", "links", "content"]
            .iter()
            .map(|g| ((*g).to_string(), Vec::new()))
            .collect();
        let mut types = BTreeSet::new();

        for element in elements {
            types.insert(element.element_type);
            groups
                .entry(element.element_type.group().to_string())
                .or_default()
                .push(element.id.clone());
        }

        Self {
            total_elements: elements.len(),
            interactive_elements: elements
                .iter()
                .filter(|e| e.element_type.is_interactive())
                .count(),
            element_types: types.into_iter().collect(),
            groups,
        }
    }
}
