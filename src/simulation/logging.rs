//! Logging and tracing configuration
//!
//! All diagnostics go to stderr (and optionally a daily log file) so the
//! report written to stdout stays machine-readable.

use crate::types::config::CliArgs;
use std::io;
use tracing::{debug, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type InitResult = Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application
    pub level: Level,
    /// Whether to enable JSON formatting
    pub json_format: bool,
    /// Log file directory; file logging is off when unset
    pub log_directory: Option<String>,
    /// Log file prefix (if logging to file)
    pub log_file_prefix: String,
    /// Whether to enable span events
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
    /// Custom environment filter
    pub env_filter: Option<String>,
}

/// Keeps the non-blocking log writers flushing until dropped
#[must_use = "logs written through the non-blocking writers are lost once the guard is dropped"]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            log_directory: None,
            log_file_prefix: "bank-teller-sim".to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration matching the `--verbose` and `--debug` command line flags
    ///
    /// `debug` wins over `verbose`; with neither only warnings are shown.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            Self::new().with_level(Level::DEBUG).with_span_events()
        } else if verbose {
            Self::new().with_level(Level::INFO)
        } else {
            Self::new()
        }
    }

    /// Configuration for the command line: level flags plus `--log-json` and `--log-dir`
    pub fn from_cli_args(args: &CliArgs) -> Self {
        let mut config = Self::from_flags(args.verbose, args.debug);
        if args.log_json {
            config = config.with_json_format();
        }
        if let Some(directory) = &args.log_dir {
            config = config.with_file_logging(directory.as_str());
        }
        config
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Whether log events are also written to a file
    pub fn logs_to_file(&self) -> bool {
        self.log_directory.is_some()
    }

    /// Filter directive used when neither a custom filter nor `RUST_LOG` is set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// The returned guard must be held for as long as logging is needed.
    pub fn init(self) -> InitResult {
        let env_filter = match &self.env_filter {
            Some(filter) => EnvFilter::try_new(filter)?,
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive())),
        };

        let mut guards = Vec::new();
        let (console_writer, console_guard) = non_blocking(io::stderr());
        guards.push(console_guard);

        let console_layer = if self.json_format {
            fmt::layer()
                .json()
                .with_writer(console_writer)
                .with_span_events(self.span_events())
                .boxed()
        } else {
            fmt::layer()
                .compact()
                .with_target(false)
                .with_thread_names(true)
                .with_writer(console_writer)
                .with_ansi(self.enable_ansi)
                .with_span_events(self.span_events())
                .boxed()
        };

        let file_layer = match &self.log_directory {
            Some(directory) => {
                let appender = rolling::daily(directory, &self.log_file_prefix);
                let (file_writer, file_guard) = non_blocking(appender);
                guards.push(file_guard);
                Some(
                    fmt::layer()
                        .json()
                        .with_thread_names(true)
                        .with_writer(file_writer)
                        .with_span_events(self.span_events()),
                )
            }
            None => None,
        };

        Registry::default().with(env_filter).with(console_layer).with(file_layer).try_init()?;

        debug!(config = ?self, "logging initialized");
        Ok(LoggingGuard { _guards: guards })
    }

    /// Initialize verbose logging (INFO level)
    pub fn init_verbose() -> InitResult {
        Self::from_flags(true, false).init()
    }

    /// Initialize debug logging (DEBUG level with span events)
    pub fn init_debug() -> InitResult {
        Self::from_flags(false, true).init()
    }
}
