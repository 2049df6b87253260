//! # recipe
//!
//! Transaction policy evaluation and signature finalization for
//! threshold-signing wallets on Cosmos-SDK chains.
//!
//! The library half of this crate exposes the CLI definitions, command
//! handlers and logging setup used by the `recipe` binary, so they can be
//! driven from tests.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions and handlers
//! - [`logging`] - Subscriber initialization and address redaction
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use recipe::cli::Cli;
//!
//! let cli = Cli::parse();
//! println!("Verbose level: {}", cli.verbose);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod logging;

pub use logging::{
    init_logging, redact_address, verbosity_to_level, LogConfig, LogError, LogFormat, LogLevel,
};
