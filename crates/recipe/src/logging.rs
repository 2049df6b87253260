//! # Logging
//!
//! Structured logging for the `recipe` binary, built on `tracing`.
//!
//! The library crates only emit events; this module installs the subscriber
//! that renders them. Output goes to stderr so command output on stdout stays
//! machine-readable.
//!
//! ```no_run
//! use recipe::logging::{init_logging, verbosity_to_level, LogConfig, LogFormat};
//!
//! let config = LogConfig {
//!     level: verbosity_to_level(2),
//!     format: LogFormat::Json,
//! };
//! init_logging(&config).expect("logging init");
//!
//! tracing::debug!("Logging initialized");
//! ```
//!
//! ## Address Redaction
//!
//! ```
//! use recipe::logging::redact_address;
//!
//! assert_eq!(
//!     redact_address("cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu"),
//!     "cosmos1qyp...v7xu"
//! );
//! ```

use std::fmt;

use clap::ValueEnum;
use tracing_subscriber::{
    fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Error type for logging initialization failures.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The level filter could not be built.
    #[error("Invalid log configuration: {0}")]
    InvalidConfig(String),

    /// A global subscriber is already installed.
    #[error("Failed to initialize logging: {0}")]
    SubscriberInit(String),
}

/// Minimum severity of logged events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// trace and above
    Trace,
    /// debug and above
    Debug,
    /// info and above
    Info,
    /// warn and above
    #[default]
    Warn,
    /// error only
    Error,
}

impl LogLevel {
    /// The level's env-filter directive.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
    /// Single-line human-readable output.
    Compact,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

/// Configuration for [`init_logging`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    /// Minimum level. `RUST_LOG` is ignored; the level is explicit.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns [`LogError::SubscriberInit`] if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_new(config.level.as_str())
        .map_err(|e| LogError::InvalidConfig(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
    };
    installed.map_err(|e| LogError::SubscriberInit(e.to_string()))
}

/// Map CLI verbosity flags to a level.
///
/// | Verbosity | Level |
/// |-----------|-------|
/// | 0         | Warn  |
/// | 1         | Info  |
/// | 2         | Debug |
/// | 3+        | Trace |
#[must_use]
pub const fn verbosity_to_level(verbosity: u8) -> LogLevel {
    match verbosity {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    }
}

/// Shorten an address for log output.
///
/// Keeps the human-readable part with its separator and three data
/// characters, then the last four characters. Addresses too short to shorten
/// are returned unchanged.
#[must_use]
pub fn redact_address(address: &str) -> String {
    const HEAD_DATA_CHARS: usize = 3;
    const TAIL_CHARS: usize = 4;

    let chars: Vec<char> = address.chars().collect();
    let head_len = chars.iter().rposition(|c| *c == '1').map_or(0, |sep| sep + 1) + HEAD_DATA_CHARS;

    if chars.len() <= head_len + TAIL_CHARS {
        return address.to_string();
    }

    let head: String = chars.iter().take(head_len).collect();
    let tail: String = chars.iter().skip(chars.len() - TAIL_CHARS).collect();

    format!("{head}...{tail}")
}
