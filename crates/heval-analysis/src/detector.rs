//! Violation detection: criterion → predicate → violations.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use heval_core::constants::NO_ELEMENTS_DETECTED;
use heval_core::errors::DefinitionError;
use heval_core::models::{
    CriterionDefinition, DetectedElement, ElementType, HeuristicDefinition, Severity, Violation,
};

use crate::predicates::{geometry, PredicateRegistry};

/// Violations per criterion id.
pub type CriterionViolations = BTreeMap<String, Vec<Violation>>;

/// Runs criterion predicates over a catalog. Stateless between calls.
#[derive(Debug, Clone)]
pub struct ViolationDetector {
    registry: PredicateRegistry,
    parallel: bool,
}

impl ViolationDetector {
    pub fn new(registry: PredicateRegistry, parallel: bool) -> Self {
        Self { registry, parallel }
    }

    /// Violations of one criterion. Empty when the criterion is satisfied.
    pub fn detect(
        &self,
        elements: &[DetectedElement],
        heuristic_id: &str,
        criterion: &CriterionDefinition,
    ) -> Result<Vec<Violation>, DefinitionError> {
        let predicate = self.registry.get(&criterion.predicate).ok_or_else(|| {
            DefinitionError::UnknownPredicate {
                criterion_id: criterion.criterion_id.clone(),
                predicate: criterion.predicate.clone(),
            }
        })?;

        if elements.is_empty() {
            return Ok(vec![Violation::new(
                heuristic_id,
                &criterion.criterion_id,
                criterion.absence_severity,
                NO_ELEMENTS_DETECTED,
                Vec::<String>::new(),
            )]);
        }

        let required = predicate.required_types();
        if !required.is_empty() && !geometry::any_of_type(elements, required) {
            return Ok(vec![Violation::new(
                heuristic_id,
                &criterion.criterion_id,
                criterion.absence_severity.max(Severity::Major),
                format!("no {} detected", describe_types(required)),
                Vec::<String>::new(),
            )]);
        }

        let violations: Vec<Violation> = predicate
            .evaluate(elements)
            .into_iter()
            .map(|finding| {
                Violation::new(
                    heuristic_id,
                    &criterion.criterion_id,
                    finding.severity,
                    finding.detail,
                    finding.affected_elements,
                )
            })
            .collect();
        debug!(
            criterion_id = %criterion.criterion_id,
            predicate = %criterion.predicate,
            violations = violations.len(),
            "criterion evaluated"
        );
        Ok(violations)
    }

    /// Violations of every criterion of `heuristic`, keyed by criterion id.
    /// Satisfied criteria map to an empty list.
    pub fn detect_heuristic(
        &self,
        elements: &[DetectedElement],
        heuristic: &HeuristicDefinition,
    ) -> Result<CriterionViolations, DefinitionError> {
        let run = |criterion: &CriterionDefinition| {
            self.detect(elements, &heuristic.heuristic_id, criterion)
                .map(|v| (criterion.criterion_id.clone(), v))
        };
        let pairs: Vec<(String, Vec<Violation>)> = if self.parallel {
            heuristic.criteria.par_iter().map(run).collect::<Result<_, _>>()?
        } else {
            heuristic.criteria.iter().map(run).collect::<Result<_, _>>()?
        };
        Ok(pairs.into_iter().collect())
    }
}

/// "button", "button or link", "button, input or link".
fn describe_types(types: &[ElementType]) -> String {
    let names: Vec<&str> = types.iter().map(ElementType::as_str).collect();
    match names.split_last() {
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        None => String::new(),
    }
}
