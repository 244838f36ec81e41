//! Shared simulation state handed to every actor

use crate::simulation::{CompletionCounter, SimulationClock, WaitingQueue};

/// State owned by the coordinator and borrowed by every actor for one run
#[derive(Debug)]
pub struct SimulationState {
    clock: SimulationClock,
    queue: WaitingQueue,
    completions: CompletionCounter,
    total_customers: usize,
}

impl SimulationState {
    /// Create the state for a run over `total_customers` customers
    pub fn new(total_customers: usize) -> Self {
        Self {
            clock: SimulationClock::new(),
            queue: WaitingQueue::new(),
            completions: CompletionCounter::new(),
            total_customers,
        }
    }

    /// The run's virtual clock
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Customers waiting for a teller
    pub fn queue(&self) -> &WaitingQueue {
        &self.queue
    }

    /// Customers served so far
    pub fn completions(&self) -> &CompletionCounter {
        &self.completions
    }

    /// Customers in the run
    pub fn total_customers(&self) -> usize {
        self.total_customers
    }

    /// Terminal condition: every customer has been served
    pub fn all_served(&self) -> bool {
        self.completions.served() >= self.total_customers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_run_is_already_served() {
        let state = SimulationState::new(0);
        assert!(state.all_served());
    }

    #[test]
    fn test_all_served_tracks_counter() {
        let state = SimulationState::new(2);
        assert!(!state.all_served());
        state.completions().record();
        assert!(!state.all_served());
        state.completions().record();
        assert!(state.all_served());
        assert_eq!(state.clock().now(), 0);
        assert!(state.queue().is_empty());
    }
}
