//! Tick-synchronized simulation engine
//!
//! # Overview
//!
//! - **Coordinator**: drives the two-phase tick loop and produces the report
//! - **CustomerActor / TellerActor**: tick-local behavior of each participant
//! - **SimulationState**: clock, waiting queue and completion counter shared
//!   by every actor
//! - **SimulationStatistics**: queueing metrics derived from a finished run
//! - **SimulationError**: error handling for simulation operations
//!
//! # Usage Example
//!
//! ```rust
//! use bank_teller_sim::simulation::*;
//! use bank_teller_sim::types::ExecutionMode;
//! use bank_teller_sim::workload::CustomerRecord;
//!
//! let records = vec![CustomerRecord::new(1, 0, 2), CustomerRecord::new(2, 0, 1)];
//! let report = Coordinator::new(&records, 1)
//!     .with_mode(ExecutionMode::Inline)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(report.timings()[1].1, 2);
//! let stats = SimulationStatistics::from_report(&report);
//! assert_eq!(stats.makespan, 3);
//! ```

pub mod actor;
pub mod clock;
pub mod coordinator;
pub mod counter;
pub mod customer;
pub mod error;
pub mod logging;
pub mod queue;
pub mod state;
pub mod statistics;
pub mod teller;

pub use actor::{Ack, Actor, Signal};
pub use clock::*;
pub use coordinator::*;
pub use counter::*;
pub use customer::*;
pub use error::*;
pub use logging::*;
pub use queue::*;
pub use state::*;
pub use statistics::*;
pub use teller::*;
