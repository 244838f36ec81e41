//! Error types and handling
//!
//! This module contains error types and error handling for the simulation.

use crate::types::{ConfigValidationError, Tick};
use crate::workload::WorkloadError;
use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// Workload could not be loaded or generated
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] WorkloadError),

    /// An actor thread could not be started
    #[error("Failed to spawn {actor}: {source}")]
    SpawnError {
        /// Actor that failed to start
        actor: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// An actor stopped answering the coordinator's handshake
    #[error("{actor} disconnected at tick {tick} without acknowledging its phase")]
    ActorDisconnected {
        /// Actor that went away
        actor: String,
        /// Tick being processed
        tick: Tick,
    },

    /// An actor thread panicked
    #[error("{actor} panicked")]
    ActorPanicked {
        /// Actor whose thread panicked
        actor: String,
    },

    /// The run hit its configured tick limit before every customer was served
    #[error("Tick limit {limit} reached with {served} of {total} customers served")]
    TickLimitExceeded {
        /// Configured limit
        limit: Tick,
        /// Customers served when the limit was hit
        served: usize,
        /// Customers in the run
        total: usize,
    },

    /// The engine broke one of its own invariants
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an internal error
    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an actor disconnection error
    pub fn actor_disconnected(actor: impl Into<String>, tick: Tick) -> Self {
        Self::ActorDisconnected { actor: actor.into(), tick }
    }

    /// Create an actor panic error
    pub fn actor_panicked(actor: impl Into<String>) -> Self {
        Self::ActorPanicked { actor: actor.into() }
    }

    /// Whether the failure came from an actor thread rather than from input or I/O
    pub fn is_actor_failure(&self) -> bool {
        matches!(
            self,
            SimulationError::SpawnError { .. }
                | SimulationError::ActorDisconnected { .. }
                | SimulationError::ActorPanicked { .. }
        )
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::InvalidInput(_) => "Input",
            SimulationError::SpawnError { .. } => "Actor Spawn",
            SimulationError::ActorDisconnected { .. } => "Actor Liveness",
            SimulationError::ActorPanicked { .. } => "Actor Liveness",
            SimulationError::TickLimitExceeded { .. } => "Tick Limit",
            SimulationError::Internal(_) => "Internal",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
