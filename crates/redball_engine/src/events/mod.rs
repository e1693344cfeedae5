//! One-shot completion signals
//!
//! A [`Signal`] is the engine's stand-in for an awaitable: the component that
//! owns some long-running behavior (a menu waiting for input, a player waiting
//! to die) keeps one handle and resolves it, while whoever started the behavior
//! keeps a clone and polls it once per frame. Resolution happens at most once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared one-shot completion flag
#[derive(Debug, Clone, Default)]
pub struct Signal {
    resolved: Arc<AtomicBool>,
}

impl Signal {
    /// Create a new pending signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the signal
    ///
    /// Returns `true` only for the call that actually resolved it.
    pub fn resolve(&self) -> bool {
        !self.resolved.swap(true, Ordering::AcqRel)
    }

    /// Check whether the signal has resolved
    pub fn is_resolved(&self) -> bool {
        self.resolved.load(Ordering::Acquire)
    }
}
