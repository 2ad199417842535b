use serde::{Deserialize, Serialize};

use super::{Severity, Violation};

/// Score and findings for one heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicResult {
    pub heuristic_id: String,
    /// 0–100.
    pub score: u32,
    /// Display alias of `score`.
    pub percentage: f64,
    pub violations: Vec<Violation>,
    pub explanation: String,
}

impl HeuristicResult {
    pub fn critical_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Critical)
            .count()
    }
}

/// Final result handed to the transport layer. Field names are a fixed JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub overall_score: f64,
    pub heuristic_scores: Vec<HeuristicResult>,
    pub total_violations: usize,
    pub critical_issues: usize,
}

impl EvaluationReport {
    pub fn result(&self, heuristic_id: &str) -> Option<&HeuristicResult> {
        self.heuristic_scores
            .iter()
            .find(|r| r.heuristic_id == heuristic_id)
    }
}
