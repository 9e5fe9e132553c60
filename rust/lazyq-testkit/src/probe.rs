//! Evaluation probes.
//!
//! Lazy operators are tested by counting how often the upstream is actually
//! pulled: zero before a terminal runs, and exactly as many times as the
//! terminal needs afterwards.

use std::cell::Cell;
use std::rc::Rc;

/// A shared call counter. Clones observe the same count, so one handle can be
/// moved into a closure while the test keeps the other for assertions.
#[derive(Clone, Default)]
pub struct CallCounter {
    calls: Rc<Cell<usize>>,
}

impl CallCounter {
    pub fn new() -> CallCounter {
        CallCounter::default()
    }

    /// Records one call.
    pub fn bump(&self) {
        self.calls.set(self.calls.get() + 1);
    }

    /// Number of calls recorded so far, across all clones.
    pub fn count(&self) -> usize {
        self.calls.get()
    }
}

#[cfg(test)]
mod tests {
    use super::CallCounter;

    #[test]
    fn clones_share_the_count() {
        let counter = CallCounter::new();
        let handle = counter.clone();
        handle.bump();
        handle.bump();
        assert_eq!(counter.count(), 2);
    }
}
