use serde::{Deserialize, Serialize};

use super::Severity;

/// One instance of missing structural evidence reported by a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    /// Empty for layout-global findings.
    pub affected_elements: Vec<String>,
    pub detail: String,
}

impl Finding {
    /// A layout-global finding that no single element owns.
    pub fn global(severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            severity,
            affected_elements: Vec::new(),
            detail: detail.into(),
        }
    }

    pub fn element(severity: Severity, element_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            affected_elements: vec![element_id.into()],
            detail: detail.into(),
        }
    }

    pub fn elements<I, S>(severity: Severity, element_ids: I, detail: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            severity,
            affected_elements: element_ids.into_iter().map(Into::into).collect(),
            detail: detail.into(),
        }
    }
}

/// Predicate output. Empty means the criterion is satisfied.
pub type Evidence = Vec<Finding>;
