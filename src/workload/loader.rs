//! Customer input file loading
//!
//! Input is one customer per line, `<id> <arrival> <duration>`, separated by
//! whitespace. Blank lines and `#` comments are skipped.

use crate::types::{CustomerId, Tick};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// One customer as supplied by the workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Customer identity
    pub id: CustomerId,
    /// Tick at which the customer arrives
    pub arrival: Tick,
    /// Ticks of service required (at least 1)
    pub duration: Tick,
}

impl CustomerRecord {
    /// Create a record
    pub fn new(id: u32, arrival: Tick, duration: Tick) -> Self {
        Self { id: CustomerId::new(id), arrival, duration }
    }
}

/// Errors raised while loading or generating a workload
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// Input file could not be read
    #[error("Failed to read customer file {path}: {source}")]
    Read {
        /// File that could not be read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line does not have exactly three fields
    #[error("line {line}: expected `id arrival duration`, found {found} field(s)")]
    FieldCount {
        /// 1-based line number
        line: usize,
        /// Number of fields found
        found: usize,
    },

    /// A field is not a non-negative integer
    #[error("line {line}: {field} `{value}` is not a non-negative integer")]
    InvalidNumber {
        /// 1-based line number
        line: usize,
        /// Field name
        field: &'static str,
        /// Raw text
        value: String,
    },

    /// Duration of zero ticks
    #[error("line {line}: customer {id} has a service duration of 0")]
    ZeroDuration {
        /// 1-based line number
        line: usize,
        /// Offending customer
        id: CustomerId,
    },

    /// The same customer id appears twice
    #[error("line {line}: duplicate customer id {id}")]
    DuplicateId {
        /// 1-based line number
        line: usize,
        /// Duplicated customer
        id: CustomerId,
    },

    /// Generated durations would include zero
    #[error("generated service durations must be at least 1 tick, got an upper bound of {0}")]
    InvalidDurationBound(Tick),
}

/// Load customer records from a file
pub fn load_customers<P: AsRef<Path>>(path: P) -> Result<Vec<CustomerRecord>, WorkloadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|source| WorkloadError::Read { path: path.display().to_string(), source })?;

    let records = parse_customers(&content)?;
    info!("Loaded {} customers from {}", records.len(), path.display());
    Ok(records)
}

/// Parse customer records from text, preserving line order
pub fn parse_customers(content: &str) -> Result<Vec<CustomerRecord>, WorkloadError> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(WorkloadError::FieldCount { line, found: fields.len() });
        }

        let id = CustomerId::new(parse_field(fields[0], "id", line)?);
        let arrival: Tick = parse_field(fields[1], "arrival", line)?;
        let duration: Tick = parse_field(fields[2], "duration", line)?;

        if duration == 0 {
            return Err(WorkloadError::ZeroDuration { line, id });
        }
        if !seen.insert(id) {
            return Err(WorkloadError::DuplicateId { line, id });
        }

        debug!(line, customer = %id, arrival, duration, "parsed customer");
        records.push(CustomerRecord { id, arrival, duration });
    }

    Ok(records)
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<T, WorkloadError> {
    value.parse().map_err(|_| WorkloadError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}
