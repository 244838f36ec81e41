//! Served-customer counter used as the termination oracle

use std::sync::atomic::{AtomicUsize, Ordering};

/// Count of customers whose service has been finalized
#[derive(Debug, Default)]
pub struct CompletionCounter {
    served: AtomicUsize,
}

impl CompletionCounter {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finalized customer and return the new total
    pub fn record(&self) -> usize {
        self.served.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Customers served so far
    pub fn served(&self) -> usize {
        self.served.load(Ordering::Acquire)
    }
}
