use crate::models::{DetectedElement, ElementType, Evidence};

/// Structural check behind a criterion.
///
/// Implementations are pure: same catalog in, same evidence out, no shared
/// mutable state.
pub trait IStructuralPredicate: Send + Sync {
    /// Registry key referenced by `CriterionDefinition::predicate`.
    fn name(&self) -> &str;

    /// Element types the check cannot run without. When none of them is
    /// present the detector reports the absence and skips `evaluate`.
    fn required_types(&self) -> &[ElementType] {
        &[]
    }

    /// Evaluate the catalog. An empty result means the criterion is satisfied.
    fn evaluate(&self, elements: &[DetectedElement]) -> Evidence;
}
