//! Teller actor
//!
//! On every tick a teller first finalizes its current customer if the
//! service window has elapsed, then, if idle, calls the head of the queue.

use crate::report::TellerSummary;
use crate::simulation::{Actor, Customer, SimulationState};
use crate::types::{CustomerId, TellerId, Tick};
use std::sync::Arc;
use tracing::debug;

/// A teller serving at most one customer at a time
#[derive(Debug)]
pub struct TellerActor {
    id: TellerId,
    current: Option<Arc<Customer>>,
    served: Vec<CustomerId>,
    busy_ticks: Tick,
}

impl TellerActor {
    /// Create an idle teller
    pub fn new(id: TellerId) -> Self {
        Self { id, current: None, served: Vec::new(), busy_ticks: 0 }
    }

    /// Teller identity
    pub fn id(&self) -> TellerId {
        self.id
    }

    /// Customer currently held, if any
    pub fn current(&self) -> Option<&Arc<Customer>> {
        self.current.as_ref()
    }

    /// Customers finalized by this teller, in service order
    pub fn served(&self) -> &[CustomerId] {
        &self.served
    }

    /// Summary of this teller's work
    pub fn summary(&self) -> TellerSummary {
        TellerSummary {
            id: self.id,
            customers_served: self.served.len(),
            busy_ticks: self.busy_ticks,
            served: self.served.clone(),
        }
    }

    fn finalize(&mut self, customer: &Customer, state: &SimulationState) {
        customer.finish();
        self.served.push(customer.id());
        let served = state.completions().record();

        debug!(
            tick = customer.service_end().unwrap_or_default(),
            teller = %self.id,
            customer = %customer.id(),
            served,
            "teller finishes serving customer"
        );
    }
}

impl Actor for TellerActor {
    fn label(&self) -> String {
        format!("teller {}", self.id)
    }

    fn on_tick(&mut self, tick: Tick, state: &SimulationState) {
        let window_elapsed = self
            .current
            .as_ref()
            .and_then(|customer| customer.service_end())
            .is_some_and(|end| tick == end);

        if window_elapsed {
            if let Some(customer) = self.current.take() {
                self.finalize(&customer, state);
            }
        }

        if self.current.is_some() {
            return;
        }

        let Some(customer) = state.queue().pop() else {
            return;
        };

        customer.begin_service(tick, self.id);
        self.busy_ticks += customer.duration();
        debug!(tick, teller = %self.id, customer = %customer.id(), "teller starts serving customer");

        // A one-tick service completes within the tick it starts.
        if customer.duration() > 1 {
            self.current = Some(customer);
        } else {
            self.finalize(&customer, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerPhase;

    fn queued(state: &SimulationState, id: u32, duration: Tick) -> Arc<Customer> {
        let customer = Arc::new(Customer::new(CustomerId::new(id), 0, duration));
        customer.mark_queued();
        state.queue().push(Arc::clone(&customer));
        customer
    }

    #[test]
    fn test_idle_teller_with_empty_queue_does_nothing() {
        let state = SimulationState::new(0);
        let mut teller = TellerActor::new(TellerId::new(1));
        teller.on_tick(0, &state);
        assert!(teller.current().is_none());
        assert_eq!(state.completions().served(), 0);
    }

    #[test]
    fn test_teller_holds_customer_for_duration() {
        let state = SimulationState::new(1);
        let customer = queued(&state, 1, 3);
        let mut teller = TellerActor::new(TellerId::new(1));

        teller.on_tick(0, &state);
        assert_eq!(customer.phase(), CustomerPhase::InService);
        assert_eq!(customer.progress().service_start, Some(0));

        teller.on_tick(1, &state);
        teller.on_tick(2, &state);
        assert!(!customer.is_done());
        assert_eq!(state.completions().served(), 0);

        teller.on_tick(3, &state);
        assert!(customer.is_done());
        assert!(teller.current().is_none());
        assert_eq!(state.completions().served(), 1);
        assert_eq!(teller.served(), &[CustomerId::new(1)]);
    }

    #[test]
    fn test_single_tick_service_finishes_immediately() {
        let state = SimulationState::new(1);
        let customer = queued(&state, 5, 1);
        let mut teller = TellerActor::new(TellerId::new(2));

        teller.on_tick(4, &state);
        assert!(customer.is_done());
        assert!(teller.current().is_none());
        assert_eq!(customer.service_end(), Some(5));
        assert_eq!(state.completions().served(), 1);
    }

    #[test]
    fn test_teller_calls_next_customer_in_finishing_tick() {
        let state = SimulationState::new(2);
        let first = queued(&state, 1, 2);
        let second = queued(&state, 2, 2);
        let mut teller = TellerActor::new(TellerId::new(1));

        teller.on_tick(0, &state);
        teller.on_tick(1, &state);
        assert_eq!(second.phase(), CustomerPhase::Queued);

        teller.on_tick(2, &state);
        assert!(first.is_done());
        assert_eq!(second.progress().service_start, Some(2));
        assert_eq!(teller.current().map(|c| c.id()), Some(CustomerId::new(2)));
    }

    #[test]
    fn test_summary_counts_busy_ticks() {
        let state = SimulationState::new(2);
        queued(&state, 1, 1);
        queued(&state, 2, 3);
        let mut teller = TellerActor::new(TellerId::new(3));

        for tick in 0..5 {
            teller.on_tick(tick, &state);
        }

        let summary = teller.summary();
        assert_eq!(summary.id, TellerId::new(3));
        assert_eq!(summary.customers_served, 2);
        assert_eq!(summary.busy_ticks, 4);
        assert_eq!(summary.served, vec![CustomerId::new(1), CustomerId::new(2)]);
    }
}
