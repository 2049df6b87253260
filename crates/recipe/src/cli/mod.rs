//! # CLI Module
//!
//! Command-line interface for the recipe engine.
//!
//! - [`args`] - Argument parsing and CLI structure definitions
//! - [`commands`] - Command handler implementations
//! - [`input`] - Transaction and rule input parsing
//!
//! ## Commands
//!
//! - `recipe evaluate --config <PATH> --rule <PATH> --tx <TX>`
//! - `recipe tx-hash --tx <TX> --r <HEX> --s <HEX> [--recovery-id <HEX>]`
//! - `recipe sender --chain <ID> --tx <TX>`
//! - `recipe chains`

pub mod args;
pub mod commands;
pub mod input;

pub use args::{Cli, Commands, OutputFormat};
