//! Request lifecycle: RECEIVED → DETECTING → SCORING → EXPLAINING → ASSEMBLED,
//! with FAILED reachable from every non-terminal state.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationState {
    Received,
    Detecting,
    Scoring,
    Explaining,
    Assembled,
    Failed,
}

impl EvaluationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Assembled | Self::Failed)
    }

    pub fn can_transition_to(&self, next: EvaluationState) -> bool {
        use EvaluationState::*;
        match (self, next) {
            (Received, Detecting)
            | (Detecting, Scoring)
            | (Scoring, Explaining)
            | (Explaining, Assembled) => true,
            (current, Failed) => !current.is_terminal(),
            _ => false,
        }
    }
}

/// State of one evaluation request, with its transition history.
#[derive(Debug, Clone)]
pub struct EvaluationTracker {
    request_id: Uuid,
    history: Vec<EvaluationState>,
}

impl EvaluationTracker {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            history: vec![EvaluationState::Received],
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn state(&self) -> EvaluationState {
        self.history
            .last()
            .copied()
            .unwrap_or(EvaluationState::Received)
    }

    pub fn history(&self) -> &[EvaluationState] {
        &self.history
    }

    /// Move to `next`. Illegal transitions are ignored and reported as `false`.
    pub fn advance(&mut self, next: EvaluationState) -> bool {
        let current = self.state();
        if !current.can_transition_to(next) {
            warn!(
                request_id = %self.request_id,
                from = ?current,
                to = ?next,
                "illegal evaluation state transition ignored"
            );
            return false;
        }
        debug!(request_id = %self.request_id, from = ?current, to = ?next, "evaluation state");
        self.history.push(next);
        true
    }

    pub fn fail(&mut self, code: &str, reason: &str) {
        if self.advance(EvaluationState::Failed) {
            info!(request_id = %self.request_id, code, reason, "evaluation failed");
        }
    }
}

impl Default for EvaluationTracker {
    fn default() -> Self {
        Self::new()
    }
}
