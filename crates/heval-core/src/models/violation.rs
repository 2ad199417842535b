use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Violation severity: critical > major > minor > cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Cosmetic,
}

impl Severity {
    pub fn all() -> &'static [Severity] {
        &[Self::Critical, Self::Major, Self::Minor, Self::Cosmetic]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Cosmetic => "cosmetic",
        }
    }

    /// Higher is more severe.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::Major => 2,
            Self::Minor => 1,
            Self::Cosmetic => 0,
        }
    }

    pub fn is_at_least(&self, other: Severity) -> bool {
        self.rank() >= other.rank()
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed check against one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub heuristic_id: String,
    pub criterion_id: String,
    pub severity: Severity,
    pub description: String,
    /// Sorted, deduplicated element ids. Empty for layout-global violations.
    pub affected_elements: Vec<String>,
    pub recommendation: String,
}

impl Violation {
    pub fn new<I, S>(
        heuristic_id: impl Into<String>,
        criterion_id: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        affected_elements: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let affected: BTreeSet<String> = affected_elements.into_iter().map(Into::into).collect();
        Self {
            heuristic_id: heuristic_id.into(),
            criterion_id: criterion_id.into(),
            severity,
            description: description.into(),
            affected_elements: affected.into_iter().collect(),
            recommendation: String::new(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.affected_elements.is_empty()
    }

    /// A copy carrying the composed explanation; detection output is left untouched.
    pub fn explained(&self, description: String, recommendation: String) -> Self {
        Self {
            description,
            recommendation,
            ..self.clone()
        }
    }
}
