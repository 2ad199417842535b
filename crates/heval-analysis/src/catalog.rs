//! Heuristic catalog: built-in definitions plus startup validation.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use tracing::info;

use heval_core::errors::{DefinitionError, InputError};
use heval_core::models::{
    BoundingBox, CriterionDefinition, DetectedElement, ElementType, HeuristicDefinition,
    HeuristicSummary, Severity,
};
use heval_core::traits::IStructuralPredicate;

use crate::predicates::PredicateRegistry;

/// Validated, immutable set of heuristics and the predicates behind them.
#[derive(Debug, Clone)]
pub struct HeuristicCatalog {
    heuristics: Vec<HeuristicDefinition>,
    registry: PredicateRegistry,
}

impl HeuristicCatalog {
    /// The built-in H1–H4 catalog over the built-in predicates.
    pub fn builtin() -> Result<Self, DefinitionError> {
        Self::new(builtin_definitions(), PredicateRegistry::builtin())
    }

    /// Validate `heuristics` against `registry`. Any malformed definition is fatal.
    pub fn new(
        heuristics: Vec<HeuristicDefinition>,
        registry: PredicateRegistry,
    ) -> Result<Self, DefinitionError> {
        validate_definitions(&heuristics, &registry)?;
        probe_predicates(&heuristics, &registry)?;
        info!(
            heuristics = heuristics.len(),
            criteria = heuristics.iter().map(|h| h.criteria.len()).sum::<usize>(),
            "heuristic catalog loaded"
        );
        Ok(Self {
            heuristics,
            registry,
        })
    }

    pub fn heuristics(&self) -> &[HeuristicDefinition] {
        &self.heuristics
    }

    pub fn get(&self, heuristic_id: &str) -> Option<&HeuristicDefinition> {
        self.heuristics.iter().find(|h| h.heuristic_id == heuristic_id)
    }

    pub fn contains(&self, heuristic_id: &str) -> bool {
        self.get(heuristic_id).is_some()
    }

    pub fn registry(&self) -> &PredicateRegistry {
        &self.registry
    }

    pub fn summaries(&self) -> Vec<HeuristicSummary> {
        self.heuristics.iter().map(HeuristicDefinition::summary).collect()
    }

    /// Resolve requested heuristic ids, in request order without repeats.
    /// An empty request selects the whole catalog.
    pub fn resolve_scope(&self, ids: &[String]) -> Result<Vec<&HeuristicDefinition>, InputError> {
        if ids.is_empty() {
            return Ok(self.heuristics.iter().collect());
        }
        let mut seen = HashSet::new();
        let mut scope = Vec::with_capacity(ids.len());
        for id in ids {
            let heuristic = self.get(id).ok_or_else(|| InputError::UnknownHeuristic {
                heuristic_id: id.clone(),
            })?;
            if seen.insert(id.as_str()) {
                scope.push(heuristic);
            }
        }
        Ok(scope)
    }
}

fn validate_definitions(
    heuristics: &[HeuristicDefinition],
    registry: &PredicateRegistry,
) -> Result<(), DefinitionError> {
    let mut heuristic_ids = HashSet::new();
    let mut criterion_ids = HashSet::new();

    for heuristic in heuristics {
        if !heuristic_ids.insert(heuristic.heuristic_id.as_str()) {
            return Err(DefinitionError::DuplicateHeuristic {
                heuristic_id: heuristic.heuristic_id.clone(),
            });
        }
        if heuristic.criteria.is_empty() {
            return Err(DefinitionError::EmptyHeuristic {
                heuristic_id: heuristic.heuristic_id.clone(),
            });
        }

        let prefix = format!("{}.", heuristic.heuristic_id);
        for criterion in &heuristic.criteria {
            if !criterion_ids.insert(criterion.criterion_id.as_str()) {
                return Err(DefinitionError::DuplicateCriterion {
                    criterion_id: criterion.criterion_id.clone(),
                });
            }
            if !criterion.criterion_id.starts_with(&prefix) {
                return Err(DefinitionError::MismatchedCriterion {
                    criterion_id: criterion.criterion_id.clone(),
                    heuristic_id: heuristic.heuristic_id.clone(),
                });
            }
            if criterion.weight == 0 {
                return Err(DefinitionError::NonPositiveWeight {
                    criterion_id: criterion.criterion_id.clone(),
                    weight: criterion.weight,
                });
            }
            if !registry.contains(&criterion.predicate) {
                return Err(DefinitionError::UnknownPredicate {
                    criterion_id: criterion.criterion_id.clone(),
                    predicate: criterion.predicate.clone(),
                });
            }
            if !criterion.absence_severity.is_at_least(Severity::Major) {
                return Err(DefinitionError::WeakAbsenceSeverity {
                    criterion_id: criterion.criterion_id.clone(),
                    severity: criterion.absence_severity.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Catalogs every predicate must survive: a degenerate single element and a
/// screen with one of each element type, nested and overlapping.
fn probe_catalogs() -> Vec<Vec<DetectedElement>> {
    let degenerate = vec![DetectedElement::new(
        "probe-0",
        ElementType::Button,
        BoundingBox::new(0.0, 0.0, 0.0, 0.0),
    )];

    let types = [
        ElementType::Dialog,
        ElementType::Container,
        ElementType::Navigation,
        ElementType::Button,
        ElementType::Input,
        ElementType::Link,
        ElementType::Icon,
        ElementType::Text,
        ElementType::Heading,
        ElementType::Image,
        ElementType::Indicator,
        ElementType::Spinner,
        ElementType::ProgressBar,
        ElementType::Unknown,
    ];
    let mut assorted: Vec<DetectedElement> = types
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let offset = i as f64 * 0.05;
            let mut e = DetectedElement::new(
                format!("probe-{}", i + 1),
                *t,
                BoundingBox::new(offset, offset, 0.3, 0.0),
            )
            .with_label(format!("Delete next step 1 of 2 error 500 {}", t.as_str()));
            if i > 0 {
                e = e.with_parent("probe-1");
            }
            e
        })
        .collect();
    assorted.push(
        DetectedElement::new("probe-blank", ElementType::Icon, BoundingBox::new(1.0, 1.0, 0.0, 0.0))
            .with_label("   "),
    );

    vec![degenerate, assorted]
}

fn probe_predicates(
    heuristics: &[HeuristicDefinition],
    registry: &PredicateRegistry,
) -> Result<(), DefinitionError> {
    let catalogs = probe_catalogs();
    for criterion in heuristics.iter().flat_map(|h| &h.criteria) {
        let Some(predicate) = registry.get(&criterion.predicate) else {
            continue;
        };
        for catalog in &catalogs {
            probe(criterion, predicate.as_ref(), catalog)?;
        }
    }
    Ok(())
}

fn probe(
    criterion: &CriterionDefinition,
    predicate: &dyn IStructuralPredicate,
    catalog: &[DetectedElement],
) -> Result<(), DefinitionError> {
    panic::catch_unwind(AssertUnwindSafe(|| predicate.evaluate(catalog)))
        .map(|_| ())
        .map_err(|payload| DefinitionError::PredicatePanicked {
            criterion_id: criterion.criterion_id.clone(),
            predicate: criterion.predicate.clone(),
            message: payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string()),
        })
}

/// Built-in heuristic definitions. Weights follow the severity weights of
/// the expert rubric; H4 extends it with consistency checks.
pub fn builtin_definitions() -> Vec<HeuristicDefinition> {
    vec![
        HeuristicDefinition {
            heuristic_id: "H1".to_string(),
            name: "Visibility of System Status".to_string(),
            description: "The design should always keep users informed about what is going on, through appropriate feedback within a reasonable amount of time.".to_string(),
            criteria: vec![
                CriterionDefinition::new("H1.1", "Loading states visible", 10, "loading_indicator"),
                CriterionDefinition::new("H1.2", "System feedback for user actions", 10, "interaction_feedback"),
                CriterionDefinition::new("H1.3", "Progress indicators for multi-step processes", 8, "step_progress"),
            ],
        },
        HeuristicDefinition {
            heuristic_id: "H2".to_string(),
            name: "Match Between System and Real World".to_string(),
            description: "The design should speak the users' language. Use words, phrases, and concepts familiar to the user, rather than internal jargon.".to_string(),
            criteria: vec![
                CriterionDefinition::new("H2.1", "Use of familiar icons and metaphors", 8, "labelled_icons"),
                CriterionDefinition::new("H2.2", "Natural language instead of technical terms", 6, "plain_language"),
                CriterionDefinition::new("H2.3", "Information organization follows user mental models", 10, "content_grouping"),
            ],
        },
        HeuristicDefinition {
            heuristic_id: "H3".to_string(),
            name: "User Control and Freedom".to_string(),
            description: "Users often perform actions by mistake. They need a clearly marked 'emergency exit' to leave the action without having to go through an extended process.".to_string(),
            criteria: vec![
                CriterionDefinition::new("H3.1", "Undo/redo functionality available", 10, "reversible_actions"),
                CriterionDefinition::new("H3.2", "Clear navigation exit points", 10, "exit_affordance")
                    .with_absence_severity(Severity::Critical),
                CriterionDefinition::new("H3.3", "Confirmation for destructive actions", 10, "destructive_confirmation"),
            ],
        },
        HeuristicDefinition {
            heuristic_id: "H4".to_string(),
            name: "Consistency and Standards".to_string(),
            description: "Users should not have to wonder whether different words, situations, or actions mean the same thing. Follow platform and industry conventions.".to_string(),
            criteria: vec![
                CriterionDefinition::new("H4.1", "Consistent terminology for the same action", 8, "consistent_terminology"),
                CriterionDefinition::new("H4.2", "Consistent sizing of comparable controls", 5, "consistent_sizing"),
                CriterionDefinition::new("H4.3", "Navigation placed by platform convention", 6, "navigation_placement"),
            ],
        },
    ]
}
