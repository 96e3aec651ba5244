//! Testing utilities
//!
//! Helpers shared by the unit tests and the integration tests under `tests/`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts invocations of a wrapped function
///
/// Clones share the same count, so one clone can move into a closure while the
/// test keeps another to assert on.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call.
    pub fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_count() {
        let counter = CallCounter::new();
        let clone = counter.clone();
        clone.hit();
        clone.hit();
        assert_eq!(counter.count(), 2);
    }
}
