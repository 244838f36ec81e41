//! Core types and identifiers for the bank teller simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: customer, teller and run identities plus the [`Tick`] alias
//! - **Enums**: customer lifecycle phases, execution modes and report formats
//! - **Configuration**: simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use bank_teller_sim::types::*;
//!
//! let customer = CustomerId::new(1);
//! let teller = TellerId::new(1);
//! assert_eq!(format!("{} served by {}", customer, teller), "C1 served by T1");
//!
//! let config = SimulationConfig {
//!     teller_count: 3,
//!     execution_mode: ExecutionMode::Inline,
//!     input: Some("customers.txt".to_string()),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
