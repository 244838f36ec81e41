//! Run results and their output formats
//!
//! - **ServiceRecord**: `(id, arrival, start, end, teller)` per customer
//! - **TellerSummary**: how much each teller did
//! - **SimulationReport**: everything a completed run produced
//! - **write_report**: text, JSON or CSV output of a report

pub mod records;
pub mod writer;

pub use records::*;
pub use writer::*;
