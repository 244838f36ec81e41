//! Bank Teller Simulator
//!
//! A discrete-time simulation of customers queueing for a pool of bank
//! tellers, where every customer and every teller is an independent actor
//! synchronized by a global tick barrier.
//!
//! # Overview
//!
//! Each tick runs in two strictly ordered phases. All customers still
//! waiting to arrive act first: a customer whose arrival tick has come joins
//! the single FIFO waiting queue. Then every teller acts: a teller finishes
//! its current customer once the service window has elapsed and, when free,
//! takes the next customer from the queue. The run ends once every customer
//! has been served, and produces one `(start, end, teller)` record per
//! customer.
//!
//! ## Key Features
//!
//! - **Deterministic timings**: start and end ticks depend only on the input
//! - **Two execution modes**: one OS thread per actor, or inline stepping
//! - **Workloads**: customer files or seeded random generation
//! - **Reports**: text, JSON or CSV, plus queueing statistics
//!
//! ## Quick Start
//!
//! ```rust
//! use bank_teller_sim::*;
//!
//! let records = parse_customers("1 0 2\n2 0 1\n3 1 1\n")?;
//! let report = Coordinator::new(&records, 2).run()?;
//!
//! // (id, service start, service end) in input order
//! assert_eq!(report.timings(), vec![
//!     (CustomerId::new(1), 0, 2),
//!     (CustomerId::new(2), 0, 1),
//!     (CustomerId::new(3), 1, 2),
//! ]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Core types, identifiers, and configuration
//! - [`workload`]: Customer file loading and random workload generation
//! - [`simulation`]: Actors, shared state and the tick coordinator
//! - [`report`]: Per-customer results and output formats
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Workload   │    │ Simulation  │    │   Report    │
//! │             │    │             │    │             │
//! │ Loader      ├───►│ Coordinator ├───►│ Records     │
//! │ Generator   │    │ Actors      │    │ Writer      │
//! │             │    │ State       │    │ Statistics  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                  ▲                  ▲
//!        └──────────────────┼──────────────────┘
//!                    ┌─────────────┐
//!                    │   Types     │
//!                    │ Identifiers │
//!                    │ Config      │
//!                    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod report;
pub mod simulation;
pub mod types;
pub mod workload;

// Core types and identifiers
pub use types::{
    ConfigValidationError, CustomerId, CustomerPhase, ExecutionMode, OutputFormat, RunId,
    SimulationConfig, TellerId, Tick,
};

// Workloads
pub use workload::{load_customers, parse_customers, CustomerRecord, WorkloadError, WorkloadGenerator};

// Simulation engine
pub use simulation::{
    Coordinator, Customer, CustomerActor, SimulationError, SimulationResult, SimulationState,
    SimulationStatistics, TellerActor,
};

// Reports
pub use report::{write_report, ServiceRecord, SimulationReport, TellerSummary};
