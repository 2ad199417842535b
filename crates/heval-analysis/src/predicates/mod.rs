//! Structural predicates and the registry criteria dispatch through.

pub mod consistency;
pub mod geometry;
pub mod lexicon;
pub mod real_world;
pub mod user_control;
pub mod visibility;

use std::collections::BTreeMap;
use std::sync::Arc;

use heval_core::traits::IStructuralPredicate;

/// Name → predicate map. Built once at startup and never mutated afterwards.
#[derive(Clone, Default)]
pub struct PredicateRegistry {
    predicates: BTreeMap<String, Arc<dyn IStructuralPredicate>>,
}

impl PredicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in predicate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(visibility::LoadingIndicator));
        registry.register(Arc::new(visibility::InteractionFeedback));
        registry.register(Arc::new(visibility::StepProgress));
        registry.register(Arc::new(real_world::LabelledIcons));
        registry.register(Arc::new(real_world::PlainLanguage));
        registry.register(Arc::new(real_world::ContentGrouping));
        registry.register(Arc::new(user_control::ReversibleActions));
        registry.register(Arc::new(user_control::ExitAffordance));
        registry.register(Arc::new(user_control::DestructiveConfirmation));
        registry.register(Arc::new(consistency::ConsistentTerminology));
        registry.register(Arc::new(consistency::ConsistentSizing));
        registry.register(Arc::new(consistency::NavigationPlacement));
        registry
    }

    /// Register a predicate under its own name, replacing any previous one.
    pub fn register(&mut self, predicate: Arc<dyn IStructuralPredicate>) {
        self.predicates.insert(predicate.name().to_string(), predicate);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn IStructuralPredicate>> {
        self.predicates.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.predicates.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl std::fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("predicates", &self.names())
            .finish()
    }
}
