//! Result records produced by a completed run

use crate::types::{CustomerId, ExecutionMode, RunId, TellerId, Tick};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service timings of one customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Customer identity
    pub id: CustomerId,
    /// Tick the customer joined the queue
    pub arrival: Tick,
    /// Tick a teller started serving the customer
    pub service_start: Tick,
    /// `service_start + duration`
    pub service_end: Tick,
    /// Teller that served the customer
    pub teller: TellerId,
}

impl ServiceRecord {
    /// Ticks spent in the queue
    pub fn wait(&self) -> Tick {
        self.service_start - self.arrival
    }

    /// Ticks from arrival to end of service
    pub fn turnaround(&self) -> Tick {
        self.service_end - self.arrival
    }

    /// Ticks of service
    pub fn duration(&self) -> Tick {
        self.service_end - self.service_start
    }
}

/// Work done by one teller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TellerSummary {
    /// Teller identity
    pub id: TellerId,
    /// Number of customers finalized
    pub customers_served: usize,
    /// Sum of the service durations of those customers
    pub busy_ticks: Tick,
    /// Customers in the order they were served
    pub served: Vec<CustomerId>,
}

/// Everything a completed run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Run identity
    pub run_id: RunId,
    /// Wall-clock time the run started
    pub started_at: DateTime<Utc>,
    /// Number of tellers
    pub teller_count: usize,
    /// Execution mode used
    pub mode: ExecutionMode,
    /// Tick on which the last customer was finalized
    pub final_tick: Tick,
    /// One record per customer, in input order
    pub records: Vec<ServiceRecord>,
    /// One summary per teller, by teller identity
    pub tellers: Vec<TellerSummary>,
}

impl SimulationReport {
    /// Number of customers served
    pub fn total_customers(&self) -> usize {
        self.records.len()
    }

    /// Record for `id`, if that customer took part
    pub fn record(&self, id: CustomerId) -> Option<&ServiceRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Latest service end over all customers
    pub fn makespan(&self) -> Tick {
        self.records.iter().map(|record| record.service_end).max().unwrap_or(0)
    }

    /// `(id, service_start, service_end)` per customer in input order
    pub fn timings(&self) -> Vec<(CustomerId, Tick, Tick)> {
        self.records
            .iter()
            .map(|record| (record.id, record.service_start, record.service_end))
            .collect()
    }
}
