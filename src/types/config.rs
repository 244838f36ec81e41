//! Configuration structures for the bank teller simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control the engine, the workload source and the report output.

use super::{ExecutionMode, OutputFormat, Tick};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Workload generation defaults
pub mod workload_defaults {
    use crate::types::Tick;

    /// Latest arrival tick for generated customers
    pub const MAX_ARRIVAL: Tick = 20;

    /// Longest service duration for generated customers
    pub const MAX_DURATION: Tick = 5;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bank-teller-sim",
    version = "0.1.0",
    about = "Bank Teller Simulator - lock-step simulation of customers and tellers",
    long_about = "Simulates customers arriving at a bank and tellers serving them in FIFO order. Every customer and teller runs on its own thread, yet all visible effects advance in lock-step with a shared tick counter, so the resulting timings are identical to a sequential simulation.

EXAMPLES:
    # Serve the customers listed in a file with 3 tellers
    bank-teller-sim customers.txt --tellers 3

    # Use a configuration file
    bank-teller-sim --config config.json

    # Generate a random workload of 200 customers
    bank-teller-sim --generate 200 --tellers 4 --seed 7

    # Emit CSV and a statistics summary
    bank-teller-sim customers.txt --tellers 2 --format csv --summary

    # Validate configuration without running
    bank-teller-sim --config my-config.json --dry-run

INPUT FORMAT:
    One customer per line: `<id> <arrival tick> <service duration>`.
    Blank lines and lines starting with '#' are ignored.

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Customer input file
    #[arg(help = "Customer input file (`id arrival duration` per line)")]
    pub input: Option<String>,

    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of tellers
    #[arg(
        short,
        long,
        help = "Number of tellers",
        long_help = "Number of tellers serving the queue. Must be greater than 0. Default: 1"
    )]
    pub tellers: Option<usize>,

    /// Engine execution mode
    #[arg(
        long,
        help = "Execution mode (threaded or inline)",
        long_help = "threaded runs one OS thread per actor; inline steps every actor on the coordinator thread. Both produce identical timings. Default: threaded"
    )]
    pub mode: Option<ExecutionMode>,

    /// Abort after this many ticks
    #[arg(long, help = "Abort the run after this many ticks")]
    pub max_ticks: Option<Tick>,

    /// Report format
    #[arg(long, help = "Report format (text, json or csv)")]
    pub format: Option<OutputFormat>,

    /// Generate a random workload instead of reading a file
    #[arg(long, value_name = "COUNT", help = "Generate COUNT random customers")]
    pub generate: Option<usize>,

    /// Latest arrival tick for generated customers
    #[arg(long, help = "Latest arrival tick for generated customers")]
    pub max_arrival: Option<Tick>,

    /// Longest service duration for generated customers
    #[arg(long, help = "Longest service duration for generated customers")]
    pub max_duration: Option<Tick>,

    /// Random seed for reproducible workloads
    #[arg(long, help = "Random seed for reproducible workloads")]
    pub seed: Option<u64>,

    /// Print a statistics summary to stderr
    #[arg(short, long, help = "Print a statistics summary to stderr")]
    pub summary: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging (traces every queue and service event)")]
    pub debug: bool,

    /// Directory for a daily-rolling JSON log file
    #[arg(
        long,
        value_name = "DIR",
        help = "Also write JSON logs to a daily log file in DIR",
        long_help = "Also write log events as JSON lines to a daily-rolling file (bank-teller-sim.YYYY-MM-DD) in DIR. The console keeps its own format."
    )]
    pub log_dir: Option<String>,

    /// JSON console logs
    #[arg(long, help = "Write console logs to stderr as JSON lines")]
    pub log_json: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of tellers
    pub teller_count: Option<usize>,

    /// Engine execution mode
    pub execution_mode: Option<ExecutionMode>,

    /// Abort after this many ticks
    pub max_ticks: Option<Tick>,

    /// Report format
    pub output_format: Option<OutputFormat>,

    /// Customer input file
    pub input: Option<String>,

    /// Number of customers to generate
    pub generate: Option<usize>,

    /// Latest arrival tick for generated customers
    pub max_arrival: Option<Tick>,

    /// Longest service duration for generated customers
    pub max_duration: Option<Tick>,

    /// Random seed for reproducible workloads
    pub seed: Option<u64>,

    /// Print a statistics summary
    pub summary: Option<bool>,
}

/// Configuration for a bank teller simulation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Number of tellers
    pub teller_count: usize,

    /// Engine execution mode
    pub execution_mode: ExecutionMode,

    /// Abort after this many ticks (no limit when absent)
    pub max_ticks: Option<Tick>,

    /// Report format
    pub output_format: OutputFormat,

    /// Customer input file
    pub input: Option<String>,

    /// Number of customers to generate instead of reading `input`
    pub generate: Option<usize>,

    /// Latest arrival tick for generated customers
    pub max_arrival: Tick,

    /// Longest service duration for generated customers
    pub max_duration: Tick,

    /// Random seed for reproducible workloads
    pub seed: Option<u64>,

    /// Print a statistics summary
    pub summary: bool,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigValidationError {
    /// Teller count is invalid
    #[error("Teller count must be greater than 0, got {0}")]
    InvalidTellerCount(usize),

    /// More tellers than teller ids can number
    #[error("Teller count {0} exceeds the largest teller id {max}", max = u32::MAX)]
    TooManyTellers(usize),

    /// Tick limit is invalid
    #[error("Tick limit must be greater than 0, got {0}")]
    InvalidTickLimit(Tick),

    /// Generated customer count is invalid
    #[error("Generated customer count must be greater than 0, got {0}")]
    InvalidGenerateCount(usize),

    /// Generated service duration bound is invalid
    #[error("Maximum service duration must be at least 1, got {0}")]
    InvalidMaxDuration(Tick),

    /// No workload source given
    #[error("No workload: provide an input file or --generate")]
    MissingWorkload,

    /// Both workload sources given
    #[error("Conflicting workload: input file {0} given together with --generate")]
    ConflictingWorkload(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            teller_count: 1,
            execution_mode: ExecutionMode::Threaded,
            max_ticks: None,
            output_format: OutputFormat::Text,
            input: None,
            generate: None,
            max_arrival: workload_defaults::MAX_ARRIVAL,
            max_duration: workload_defaults::MAX_DURATION,
            seed: None,
            summary: false,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            teller_count: config_file.teller_count.unwrap_or(defaults.teller_count),
            execution_mode: config_file.execution_mode.unwrap_or(defaults.execution_mode),
            max_ticks: config_file.max_ticks.or(defaults.max_ticks),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            input: config_file.input.or(defaults.input),
            generate: config_file.generate.or(defaults.generate),
            max_arrival: config_file.max_arrival.unwrap_or(defaults.max_arrival),
            max_duration: config_file.max_duration.unwrap_or(defaults.max_duration),
            seed: config_file.seed.or(defaults.seed),
            summary: config_file.summary.unwrap_or(defaults.summary),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.tellers {
            config.teller_count = value;
        }
        if let Some(value) = args.mode {
            config.execution_mode = value;
        }
        if let Some(value) = args.max_ticks {
            config.max_ticks = Some(value);
        }
        if let Some(value) = args.format {
            config.output_format = value;
        }
        if let Some(value) = args.max_arrival {
            config.max_arrival = value;
        }
        if let Some(value) = args.max_duration {
            config.max_duration = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }

        // A workload source on the command line replaces the file's source
        if let Some(value) = args.input {
            config.input = Some(value);
            config.generate = None;
        }
        if let Some(value) = args.generate {
            config.generate = Some(value);
            if args.config.is_some() {
                config.input = None;
            }
        }

        if args.summary {
            config.summary = true;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.teller_count == 0 {
            return Err(ConfigValidationError::InvalidTellerCount(self.teller_count));
        }
        if u32::try_from(self.teller_count).is_err() {
            return Err(ConfigValidationError::TooManyTellers(self.teller_count));
        }

        if let Some(limit) = self.max_ticks {
            if limit == 0 {
                return Err(ConfigValidationError::InvalidTickLimit(limit));
            }
        }

        match (&self.input, self.generate) {
            (None, None) => return Err(ConfigValidationError::MissingWorkload),
            (Some(input), Some(_)) => {
                return Err(ConfigValidationError::ConflictingWorkload(input.clone()))
            }
            (None, Some(count)) => {
                if count == 0 {
                    return Err(ConfigValidationError::InvalidGenerateCount(count));
                }
                if self.max_duration == 0 {
                    return Err(ConfigValidationError::InvalidMaxDuration(self.max_duration));
                }
            }
            (Some(_), None) => {}
        }

        Ok(())
    }
}
