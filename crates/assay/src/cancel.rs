//! Cooperative cancellation for long-running scans.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shareable flag polled inside the tokenizer's character loop.
///
/// Cancellation is cooperative: flipping the flag makes the in-flight run
/// return a dedicated `CANCELLED` error result rather than a partial report.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of any run holding this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
