//! Customer workloads
//!
//! Workloads reach the engine as an ordered list of [`CustomerRecord`]s,
//! either loaded from an input file or generated at random. The list order
//! is the FIFO tie-break among customers arriving on the same tick and the
//! order of the final report.
//!
//! ```rust
//! use bank_teller_sim::workload::*;
//!
//! let records = parse_customers("1 0 2\n2 0 1\n").unwrap();
//! assert_eq!(records[1], CustomerRecord::new(2, 0, 1));
//!
//! let generated = WorkloadGenerator::with_seed(7).generate(10, 5, 3).unwrap();
//! assert_eq!(generated.len(), 10);
//! ```

pub mod generator;
pub mod loader;

pub use generator::*;
pub use loader::*;
