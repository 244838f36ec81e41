//! Enumeration types for the bank teller simulator
//!
//! This module contains the customer lifecycle phases, the engine execution
//! modes and the supported report formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a customer inside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerPhase {
    /// Waiting for the clock to reach the arrival tick
    AwaitingArrival,
    /// Sitting in the waiting queue
    Queued,
    /// Held by a teller
    InService,
    /// Service finalized by a teller
    Done,
}

impl fmt::Display for CustomerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerPhase::AwaitingArrival => write!(f, "Awaiting Arrival"),
            CustomerPhase::Queued => write!(f, "Queued"),
            CustomerPhase::InService => write!(f, "In Service"),
            CustomerPhase::Done => write!(f, "Done"),
        }
    }
}

/// How the coordinator executes actor logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One long-lived OS thread per actor, synchronized per phase
    #[default]
    Threaded,
    /// Actors stepped in order on the coordinator thread
    Inline,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Threaded => write!(f, "threaded"),
            ExecutionMode::Inline => write!(f, "inline"),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "threaded" | "threads" | "thread" => Ok(ExecutionMode::Threaded),
            "inline" | "sequential" => Ok(ExecutionMode::Inline),
            _ => Err(format!("Unknown execution mode: {}", s)),
        }
    }
}

/// Output formats for the per-customer report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `id arrival start end teller` line per customer
    #[default]
    Text,
    /// JSON format for structured data
    Json,
    /// CSV format for tabular data
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "TEXT"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_phase_display() {
        assert_eq!(format!("{}", CustomerPhase::AwaitingArrival), "Awaiting Arrival");
        assert_eq!(format!("{}", CustomerPhase::InService), "In Service");
        assert_eq!(format!("{}", CustomerPhase::Done), "Done");
    }

    #[test]
    fn test_execution_mode_from_str() {
        assert_eq!("threaded".parse::<ExecutionMode>().unwrap(), ExecutionMode::Threaded);
        assert_eq!("INLINE".parse::<ExecutionMode>().unwrap(), ExecutionMode::Inline);
        assert_eq!("sequential".parse::<ExecutionMode>().unwrap(), ExecutionMode::Inline);
        assert!("pooled".parse::<ExecutionMode>().is_err());
        assert_eq!(ExecutionMode::default(), ExecutionMode::Threaded);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        // Test error case
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&ExecutionMode::Inline).unwrap(), "\"inline\"");
        assert_eq!(serde_json::to_string(&OutputFormat::Csv).unwrap(), "\"csv\"");
    }
}
