//! Request-scoped cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{HevalError, HevalResult};

/// Anything an evaluation can be cancelled through.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);

    /// `Err(HevalError::Cancelled)` once cancelled. Used at phase boundaries.
    fn check(&self) -> HevalResult<()> {
        if self.is_cancelled() {
            Err(HevalError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Shared flag for one evaluation request. Clones observe the same flag, so a
/// transport layer can keep one and hand another to the engine; queued
/// knowledge-base lookups carry a clone and are skipped once it flips.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that is already cancelled.
    pub fn cancelled() -> Self {
        let token = Self::new();
        token.cancel();
        token
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }
}
