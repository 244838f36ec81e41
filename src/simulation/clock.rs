//! Virtual simulation clock
//!
//! The clock is a logical tick counter, not wall time. Only the coordinator
//! advances it; actors read it.

use crate::types::Tick;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic tick counter shared by every actor
#[derive(Debug, Default)]
pub struct SimulationClock {
    tick: AtomicU64,
}

impl SimulationClock {
    /// Create a clock at tick 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick
    pub fn now(&self) -> Tick {
        self.tick.load(Ordering::Acquire)
    }

    /// Move to the next tick and return it
    pub(crate) fn advance(&self) -> Tick {
        self.tick.fetch_add(1, Ordering::AcqRel) + 1
    }
}
