//! Evaluation orchestrator: validate → detect → score → explain → assemble.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use heval_analysis::{score, CriterionViolations, HeuristicCatalog, ViolationDetector};
use heval_core::config::{EngineConfig, SeverityMultipliers};
use heval_core::errors::{HevalError, HevalErrorCode, HevalResult, InputError};
use heval_core::models::{
    CatalogSummary, DetectedElement, EvaluationReport, HeuristicDefinition, HeuristicResult,
    Severity,
};
use heval_core::traits::{Cancellable, CancellationToken, IElementDetector};
use heval_explain::ExplanationAugmenter;

use crate::state::{EvaluationState, EvaluationTracker};

/// Runs one evaluation request end to end. Holds no per-request state.
pub struct EvaluationOrchestrator {
    catalog: Arc<HeuristicCatalog>,
    detector: ViolationDetector,
    augmenter: ExplanationAugmenter,
    multipliers: SeverityMultipliers,
    parallel: bool,
}

impl EvaluationOrchestrator {
    pub fn new(
        catalog: Arc<HeuristicCatalog>,
        augmenter: ExplanationAugmenter,
        multipliers: SeverityMultipliers,
        engine: &EngineConfig,
    ) -> Self {
        let detector = ViolationDetector::new(catalog.registry().clone(), engine.parallel);
        Self {
            catalog,
            detector,
            augmenter,
            multipliers,
            parallel: engine.parallel,
        }
    }

    pub fn catalog(&self) -> &HeuristicCatalog {
        &self.catalog
    }

    /// Evaluate `elements` against the heuristics named in `scope` (all when empty).
    ///
    /// Either a complete report or an error; never a partial report.
    pub fn evaluate(
        &self,
        elements: &[DetectedElement],
        scope: &[String],
        cancel: &CancellationToken,
    ) -> HevalResult<EvaluationReport> {
        self.evaluate_with_tracker(&mut EvaluationTracker::new(), elements, scope, cancel)
    }

    /// Run `detector` over a screenshot, then evaluate what it found.
    /// Detection failures fail the request and are returned unchanged.
    pub fn evaluate_image(
        &self,
        detector: &dyn IElementDetector,
        image: &[u8],
        scope: &[String],
        cancel: &CancellationToken,
    ) -> HevalResult<EvaluationReport> {
        self.evaluate_image_with_tracker(&mut EvaluationTracker::new(), detector, image, scope, cancel)
    }

    /// [`Self::evaluate`], recording transitions on a caller-owned tracker.
    pub fn evaluate_with_tracker(
        &self,
        tracker: &mut EvaluationTracker,
        elements: &[DetectedElement],
        scope: &[String],
        cancel: &CancellationToken,
    ) -> HevalResult<EvaluationReport> {
        let result = self.run(tracker, elements, scope, cancel);
        record_failure(tracker, &result);
        result
    }

    /// [`Self::evaluate_image`], recording transitions on a caller-owned tracker.
    pub fn evaluate_image_with_tracker(
        &self,
        tracker: &mut EvaluationTracker,
        detector: &dyn IElementDetector,
        image: &[u8],
        scope: &[String],
        cancel: &CancellationToken,
    ) -> HevalResult<EvaluationReport> {
        let result = match detect_elements(tracker, detector, image, cancel) {
            Ok(elements) => self.run(tracker, &elements, scope, cancel),
            Err(e) => Err(e),
        };
        record_failure(tracker, &result);
        result
    }

    fn run(
        &self,
        tracker: &mut EvaluationTracker,
        elements: &[DetectedElement],
        scope: &[String],
        cancel: &CancellationToken,
    ) -> HevalResult<EvaluationReport> {
        validate_elements(elements)?;
        let heuristics = self.catalog.resolve_scope(scope)?;

        let summary = CatalogSummary::of(elements);
        info!(
            request_id = %tracker.request_id(),
            elements = summary.total_elements,
            interactive = summary.interactive_elements,
            element_types = summary.element_types.len(),
            heuristics = heuristics.len(),
            "evaluation received"
        );

        cancel.check()?;
        tracker.advance(EvaluationState::Detecting);
        let detected = self.detect(elements, &heuristics)?;

        cancel.check()?;
        tracker.advance(EvaluationState::Scoring);
        let scored: Vec<(&HeuristicDefinition, HeuristicResult)> = heuristics
            .iter()
            .zip(&detected)
            .map(|(h, violations)| (*h, score(violations, h, &self.multipliers)))
            .collect();

        cancel.check()?;
        tracker.advance(EvaluationState::Explaining);
        let results = self.explain(scored, cancel);
        // A request cancelled mid-explanation is discarded, not half-reported.
        cancel.check()?;

        tracker.advance(EvaluationState::Assembled);
        let report = assemble(results, &self.catalog);
        info!(
            request_id = %tracker.request_id(),
            overall_score = report.overall_score,
            total_violations = report.total_violations,
            critical_issues = report.critical_issues,
            "evaluation assembled"
        );
        Ok(report)
    }

    fn detect(
        &self,
        elements: &[DetectedElement],
        heuristics: &[&HeuristicDefinition],
    ) -> HevalResult<Vec<CriterionViolations>> {
        let run = |h: &&HeuristicDefinition| self.detector.detect_heuristic(elements, h);
        let detected = if self.parallel {
            heuristics.par_iter().map(run).collect::<Result<Vec<_>, _>>()?
        } else {
            heuristics.iter().map(run).collect::<Result<Vec<_>, _>>()?
        };
        Ok(detected)
    }

    fn explain(
        &self,
        scored: Vec<(&HeuristicDefinition, HeuristicResult)>,
        cancel: &CancellationToken,
    ) -> Vec<HeuristicResult> {
        let explain_one = |(heuristic, mut result): (&HeuristicDefinition, HeuristicResult)| {
            result.violations = result
                .violations
                .iter()
                .map(|v| match heuristic.criterion(&v.criterion_id) {
                    Some(criterion) => self.augmenter.augment(v, criterion, cancel),
                    None => v.clone(),
                })
                .collect();
            debug!(
                heuristic_id = %result.heuristic_id,
                violations = result.violations.len(),
                "violations explained"
            );
            result
        };
        if self.parallel {
            scored.into_par_iter().map(explain_one).collect()
        } else {
            scored.into_iter().map(explain_one).collect()
        }
    }
}

fn detect_elements(
    tracker: &EvaluationTracker,
    detector: &dyn IElementDetector,
    image: &[u8],
    cancel: &CancellationToken,
) -> HevalResult<Vec<DetectedElement>> {
    cancel.check()?;
    let elements = detector.detect_elements(image).map_err(|e| {
        warn!(
            request_id = %tracker.request_id(),
            detector = detector.name(),
            error = %e,
            "element detection failed"
        );
        HevalError::from(e)
    })?;
    debug!(
        request_id = %tracker.request_id(),
        detector = detector.name(),
        elements = elements.len(),
        "elements detected"
    );
    Ok(elements)
}

fn record_failure<T>(tracker: &mut EvaluationTracker, result: &HevalResult<T>) {
    if let Err(e) = result {
        tracker.fail(e.error_code(), &e.to_string());
    }
}

fn assemble(results: Vec<HeuristicResult>, catalog: &HeuristicCatalog) -> EvaluationReport {
    let overall_score = heval_analysis::overall_score(&results, catalog);
    let total_violations = results.iter().map(|r| r.violations.len()).sum();
    let critical_issues = results
        .iter()
        .flat_map(|r| &r.violations)
        .filter(|v| v.severity == Severity::Critical)
        .count();
    EvaluationReport {
        overall_score,
        heuristic_scores: results,
        total_violations,
        critical_issues,
    }
}

/// Reject malformed catalogs before any detection runs.
pub fn validate_elements(elements: &[DetectedElement]) -> Result<(), InputError> {
    let mut ids = HashSet::with_capacity(elements.len());
    for element in elements {
        if element.id.trim().is_empty() {
            return Err(InputError::EmptyElementId);
        }
        if !element.confidence.is_finite() || !(0.0..=1.0).contains(&element.confidence) {
            return Err(InputError::InvalidConfidence {
                element_id: element.id.clone(),
                value: element.confidence,
            });
        }
        if !element.bbox.is_normalized() {
            return Err(InputError::InvalidBoundingBox {
                element_id: element.id.clone(),
            });
        }
        if !ids.insert(element.id.as_str()) {
            return Err(InputError::DuplicateElementId {
                element_id: element.id.clone(),
            });
        }
    }

    let parents: HashMap<&str, &str> = elements
        .iter()
        .filter_map(|e| e.parent_id.as_deref().map(|p| (e.id.as_str(), p)))
        .collect();
    for (&child, &parent) in &parents {
        if !ids.contains(parent) {
            return Err(InputError::DanglingParent {
                element_id: child.to_string(),
                parent_id: parent.to_string(),
            });
        }
    }
    for &start in parents.keys() {
        let mut current = start;
        let mut steps = 0;
        while let Some(&parent) = parents.get(current) {
            steps += 1;
            if parent == start || steps > parents.len() {
                return Err(InputError::ParentCycle {
                    element_id: start.to_string(),
                });
            }
            current = parent;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heval_core::config::ExplainConfig;
    use heval_core::errors::DetectionError;
    use heval_core::models::{BoundingBox, ElementType};
    use test_fixtures::{EmptyIndex, FailingDetector, FixedDetector, StubEmbedder};

    fn el(id: &str) -> DetectedElement {
        DetectedElement::new(id, ElementType::Button, BoundingBox::new(0.1, 0.1, 0.2, 0.1))
    }

    fn orchestrator() -> EvaluationOrchestrator {
        let augmenter = ExplanationAugmenter::new(
            Arc::new(EmptyIndex::new()),
            Arc::new(StubEmbedder::constant(vec![1.0, 0.0])),
            &ExplainConfig::default(),
            0.3,
        );
        EvaluationOrchestrator::new(
            Arc::new(HeuristicCatalog::builtin().unwrap()),
            augmenter,
            SeverityMultipliers::default(),
            &EngineConfig::default(),
        )
    }

    #[test]
    fn detector_failure_moves_request_to_failed() {
        let mut tracker = EvaluationTracker::new();
        let err = orchestrator()
            .evaluate_image_with_tracker(&mut tracker, &FailingDetector, b"png", &[], &CancellationToken::new())
            .unwrap_err();

        assert!(matches!(err, HevalError::Detection(DetectionError::Unavailable { .. })));
        assert_eq!(tracker.state(), EvaluationState::Failed);
        assert_eq!(tracker.history(), &[EvaluationState::Received, EvaluationState::Failed]);
    }

    #[test]
    fn image_request_runs_every_phase() {
        let mut tracker = EvaluationTracker::new();
        let detector = FixedDetector::new(vec![el("a")]);
        orchestrator()
            .evaluate_image_with_tracker(&mut tracker, &detector, b"png", &[], &CancellationToken::new())
            .unwrap();

        assert_eq!(
            tracker.history(),
            &[
                EvaluationState::Received,
                EvaluationState::Detecting,
                EvaluationState::Scoring,
                EvaluationState::Explaining,
                EvaluationState::Assembled,
            ]
        );
    }

    #[test]
    fn cancelled_image_request_skips_the_detector() {
        let mut tracker = EvaluationTracker::new();
        let err = orchestrator()
            .evaluate_image_with_tracker(&mut tracker, &FailingDetector, b"png", &[], &CancellationToken::cancelled())
            .unwrap_err();

        assert!(matches!(err, HevalError::Cancelled));
        assert_eq!(tracker.state(), EvaluationState::Failed);
    }

    #[test]
    fn nested_elements_are_valid() {
        let elements = vec![el("a"), el("b").with_parent("a"), el("c").with_parent("b")];
        assert!(validate_elements(&elements).is_ok());
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let err = validate_elements(&[el("a").with_parent("a")]).unwrap_err();
        assert!(matches!(err, InputError::ParentCycle { .. }));
    }

    #[test]
    fn two_element_cycle_is_rejected() {
        let elements = vec![el("a").with_parent("b"), el("b").with_parent("a")];
        assert!(matches!(
            validate_elements(&elements),
            Err(InputError::ParentCycle { .. })
        ));
    }

    #[test]
    fn dangling_parent_is_rejected() {
        let err = validate_elements(&[el("a").with_parent("ghost")]).unwrap_err();
        assert!(matches!(err, InputError::DanglingParent { .. }));
    }

    #[test]
    fn confidence_and_bbox_are_checked() {
        assert!(matches!(
            validate_elements(&[el("a").with_confidence(1.5)]),
            Err(InputError::InvalidConfidence { .. })
        ));
        let wide = DetectedElement::new("w", ElementType::Text, BoundingBox::new(0.5, 0.0, 0.8, 0.1));
        assert!(matches!(
            validate_elements(&[wide]),
            Err(InputError::InvalidBoundingBox { .. })
        ));
    }

    #[test]
    fn duplicate_and_empty_ids_are_rejected() {
        assert!(matches!(
            validate_elements(&[el("a"), el("a")]),
            Err(InputError::DuplicateElementId { .. })
        ));
        assert!(matches!(
            validate_elements(&[el("  ")]),
            Err(InputError::EmptyElementId)
        ));
    }
}
