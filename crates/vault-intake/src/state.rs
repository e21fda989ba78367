//! Global kill switch, held behind an explicit handle.
//!
//! The handle is dependency-injected into the ledger and pipeline rather
//! than living in a process-wide singleton, so the core stays testable.

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide intake state. While inactive, the admission gate rejects
/// all new submissions and the ledger drops per-item appends; only the
/// toggle entries themselves are still recorded.
#[derive(Debug)]
pub struct SystemState {
    active: AtomicBool,
}

impl SystemState {
    /// Starts active.
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(true),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Atomic toggle; returns the previous value. Only the pipeline's
    /// operator-facing `set_active` calls this so every toggle is audited.
    pub(crate) fn set_active(&self, active: bool) -> bool {
        self.active.swap(active, Ordering::SeqCst)
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_active() {
        assert!(SystemState::new().is_active());
    }

    #[test]
    fn toggle_returns_previous() {
        let state = SystemState::new();
        assert!(state.set_active(false));
        assert!(!state.is_active());
        assert!(!state.set_active(true));
        assert!(state.is_active());
    }
}
