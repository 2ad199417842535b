//! Severity-weighted scoring. Pure arithmetic over detector output.

use tracing::{debug, warn};

use heval_core::config::SeverityMultipliers;
use heval_core::constants::MAX_SCORE;
use heval_core::models::{HeuristicDefinition, HeuristicResult, Violation};

use crate::catalog::HeuristicCatalog;
use crate::detector::CriterionViolations;

/// Audit line: what one criterion cost its heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionDeduction {
    pub criterion_id: String,
    pub weight: u32,
    pub violations: usize,
    /// Σ weight × multiplier(severity) over the criterion's violations.
    pub deduction: u64,
}

/// Per-criterion deductions in the heuristic's criterion order.
/// Keys that are not criteria of `heuristic` are ignored.
pub fn deduction_breakdown(
    criterion_violations: &CriterionViolations,
    heuristic: &HeuristicDefinition,
    multipliers: &SeverityMultipliers,
) -> Vec<CriterionDeduction> {
    heuristic
        .criteria
        .iter()
        .map(|criterion| {
            let violations = criterion_violations
                .get(&criterion.criterion_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let deduction = violations
                .iter()
                .map(|v| u64::from(criterion.weight) * u64::from(multipliers.multiplier(v.severity)))
                .sum();
            CriterionDeduction {
                criterion_id: criterion.criterion_id.clone(),
                weight: criterion.weight,
                violations: violations.len(),
                deduction,
            }
        })
        .collect()
}

/// Score one heuristic: 100 minus every deduction, clamped to [0, 100].
pub fn score(
    criterion_violations: &CriterionViolations,
    heuristic: &HeuristicDefinition,
    multipliers: &SeverityMultipliers,
) -> HeuristicResult {
    for (criterion_id, violations) in criterion_violations {
        if heuristic.criterion(criterion_id).is_none() && !violations.is_empty() {
            warn!(
                heuristic_id = %heuristic.heuristic_id,
                criterion_id = %criterion_id,
                dropped = violations.len(),
                "violations for unknown criterion dropped"
            );
        }
    }

    let breakdown = deduction_breakdown(criterion_violations, heuristic, multipliers);
    let total: u64 = breakdown.iter().map(|d| d.deduction).sum();
    let score = MAX_SCORE - total.min(u64::from(MAX_SCORE)) as u32;

    let violations: Vec<Violation> = heuristic
        .criteria
        .iter()
        .filter_map(|c| criterion_violations.get(&c.criterion_id))
        .flatten()
        .cloned()
        .collect();

    debug!(
        heuristic_id = %heuristic.heuristic_id,
        score,
        deduction = total,
        violations = violations.len(),
        "heuristic scored"
    );

    HeuristicResult {
        heuristic_id: heuristic.heuristic_id.clone(),
        score,
        percentage: f64::from(score),
        explanation: explanation_text(score, &violations),
        violations,
    }
}

/// "Score 40/100 - 1 violations: major: Button 'Pay' has no ...".
pub fn explanation_text(score: u32, violations: &[Violation]) -> String {
    let head = format!("Score {score}/{MAX_SCORE} - {} violations", violations.len());
    if violations.is_empty() {
        return head;
    }
    let details: Vec<String> = violations
        .iter()
        .map(|v| format!("{}: {}", v.severity, v.description))
        .collect();
    format!("{head}: {}", details.join("; "))
}

/// Criterion-weight-proportional mean of heuristic scores, rounded to two
/// decimals. An empty scope scores 100.
pub fn overall_score(results: &[HeuristicResult], catalog: &HeuristicCatalog) -> f64 {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for result in results {
        let Some(heuristic) = catalog.get(&result.heuristic_id) else {
            warn!(heuristic_id = %result.heuristic_id, "result for unknown heuristic ignored");
            continue;
        };
        let weight = f64::from(heuristic.total_weight());
        weighted += f64::from(result.score) * weight;
        total_weight += weight;
    }
    if total_weight <= 0.0 {
        return f64::from(MAX_SCORE);
    }
    ((weighted / total_weight) * 100.0).round() / 100.0
}
