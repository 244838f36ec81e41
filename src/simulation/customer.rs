//! Customer records and the customer actor
//!
//! A [`Customer`] is shared between its own actor (which enqueues it on the
//! arrival tick) and the teller that serves it. Identity, arrival and
//! duration are immutable; service progress sits behind a mutex.

use crate::report::ServiceRecord;
use crate::simulation::{Actor, SimulationState};
use crate::types::{CustomerId, CustomerPhase, TellerId, Tick};
use crate::workload::CustomerRecord;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Service progress of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProgress {
    /// Current lifecycle phase
    pub phase: CustomerPhase,
    /// Tick a teller started serving the customer
    pub service_start: Option<Tick>,
    /// Teller that served the customer
    pub teller: Option<TellerId>,
}

impl Default for CustomerProgress {
    fn default() -> Self {
        Self { phase: CustomerPhase::AwaitingArrival, service_start: None, teller: None }
    }
}

/// A customer taking part in the simulation
#[derive(Debug)]
pub struct Customer {
    id: CustomerId,
    arrival: Tick,
    duration: Tick,
    progress: Mutex<CustomerProgress>,
}

impl Customer {
    /// Create a customer. `duration` must be at least 1.
    pub fn new(id: CustomerId, arrival: Tick, duration: Tick) -> Self {
        debug_assert!(duration >= 1, "service duration must be at least one tick");
        Self { id, arrival, duration, progress: Mutex::new(CustomerProgress::default()) }
    }

    /// Create a customer from a validated workload record
    pub fn from_record(record: &CustomerRecord) -> Self {
        Self::new(record.id, record.arrival, record.duration)
    }

    /// Customer identity
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Tick at which the customer joins the queue
    pub fn arrival(&self) -> Tick {
        self.arrival
    }

    /// Ticks of service required
    pub fn duration(&self) -> Tick {
        self.duration
    }

    /// Snapshot of the service progress
    pub fn progress(&self) -> CustomerProgress {
        *self.progress.lock()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> CustomerPhase {
        self.progress.lock().phase
    }

    /// Whether a teller has finalized this customer
    pub fn is_done(&self) -> bool {
        self.phase() == CustomerPhase::Done
    }

    /// Tick at which service ends, once service has started
    pub fn service_end(&self) -> Option<Tick> {
        self.progress.lock().service_start.map(|start| start + self.duration)
    }

    /// Completed service timings, once the customer is done
    pub fn service_record(&self) -> Option<ServiceRecord> {
        let progress = self.progress();
        match (progress.phase, progress.service_start, progress.teller) {
            (CustomerPhase::Done, Some(service_start), Some(teller)) => Some(ServiceRecord {
                id: self.id,
                arrival: self.arrival,
                service_start,
                service_end: service_start + self.duration,
                teller,
            }),
            _ => None,
        }
    }

    pub(crate) fn mark_queued(&self) {
        self.progress.lock().phase = CustomerPhase::Queued;
    }

    pub(crate) fn begin_service(&self, tick: Tick, teller: TellerId) {
        let mut progress = self.progress.lock();
        progress.phase = CustomerPhase::InService;
        progress.service_start = Some(tick);
        progress.teller = Some(teller);
    }

    pub(crate) fn finish(&self) {
        self.progress.lock().phase = CustomerPhase::Done;
    }
}

/// Actor that stages its customer for the queue on the arrival tick
#[derive(Debug)]
pub struct CustomerActor {
    customer: Arc<Customer>,
    position: usize,
}

impl CustomerActor {
    /// Create the actor for `customer`, the `position`-th entry of the input
    pub fn new(customer: Arc<Customer>, position: usize) -> Self {
        Self { customer, position }
    }

    /// Index of the customer in the input list
    pub fn position(&self) -> usize {
        self.position
    }

    /// The customer this actor drives
    pub fn customer(&self) -> &Arc<Customer> {
        &self.customer
    }
}

impl Actor for CustomerActor {
    fn label(&self) -> String {
        format!("customer {}", self.customer.id())
    }

    fn on_tick(&mut self, tick: Tick, state: &SimulationState) {
        if tick != self.customer.arrival() || self.customer.phase() != CustomerPhase::AwaitingArrival
        {
            return;
        }

        self.customer.mark_queued();
        state.queue().stage(self.position, Arc::clone(&self.customer));
        debug!(tick, customer = %self.customer.id(), "customer arrives");
    }

    fn is_retired(&self) -> bool {
        self.customer.is_done()
    }
}
