use serde::{Deserialize, Serialize};

use super::Severity;

fn default_absence_severity() -> Severity {
    Severity::Major
}

/// A named, weighted check belonging to one heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionDefinition {
    /// e.g. "H1.2"
    pub criterion_id: String,
    pub description: String,
    /// Deduction points per unit of severity multiplier. Must be positive.
    pub weight: u32,
    /// Name of the structural predicate in the predicate registry.
    pub predicate: String,
    /// Severity used when the catalog has no elements at all.
    #[serde(default = "default_absence_severity")]
    pub absence_severity: Severity,
}

impl CriterionDefinition {
    pub fn new(
        criterion_id: impl Into<String>,
        description: impl Into<String>,
        weight: u32,
        predicate: impl Into<String>,
    ) -> Self {
        Self {
            criterion_id: criterion_id.into(),
            description: description.into(),
            weight,
            predicate: predicate.into(),
            absence_severity: default_absence_severity(),
        }
    }

    pub fn with_absence_severity(mut self, severity: Severity) -> Self {
        self.absence_severity = severity;
        self
    }
}

/// One Nielsen heuristic and its ordered criteria.
/// Loaded once at startup; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicDefinition {
    /// e.g. "H1"
    pub heuristic_id: String,
    pub name: String,
    pub description: String,
    pub criteria: Vec<CriterionDefinition>,
}

impl HeuristicDefinition {
    /// Sum of criterion weights; the heuristic's weight in the overall score.
    pub fn total_weight(&self) -> u32 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    pub fn criterion(&self, criterion_id: &str) -> Option<&CriterionDefinition> {
        self.criteria.iter().find(|c| c.criterion_id == criterion_id)
    }

    pub fn summary(&self) -> HeuristicSummary {
        HeuristicSummary {
            heuristic_id: self.heuristic_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            criteria_count: self.criteria.len(),
        }
    }
}

/// Listing entry for introspection endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicSummary {
    pub heuristic_id: String,
    pub name: String,
    pub description: String,
    pub criteria_count: usize,
}
