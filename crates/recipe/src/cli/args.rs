//! # CLI Argument Definitions
//!
//! - `recipe evaluate --config <PATH> --rule <PATH> --tx <TX>` - Evaluate a rule against a transaction
//! - `recipe tx-hash --tx <TX> --r <HEX> --s <HEX> [--recovery-id <HEX>]` - Attach a signature and hash
//! - `recipe sender --chain <ID> --tx <TX>` - Print the sender of a transaction
//! - `recipe chains` - List the built-in chains
//!
//! Transactions are given as hex (optional `0x` prefix) or standard base64.
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level
//! - `--log-format <FORMAT>` - Log output format
//! - `-f, --format <FORMAT>` - Command output format

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::logging::LogFormat;

/// Transaction policy evaluation for threshold-signing wallets.
#[derive(Debug, Parser)]
#[command(name = "recipe")]
#[command(author, version, about = "Transaction policy evaluation for threshold-signing wallets")]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    ///
    /// - `-v` - Show info messages
    /// - `-vv` - Show debug messages, including the failing evaluation stage
    /// - `-vvv` - Show trace messages
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true, value_name = "FORMAT")]
    pub log_format: LogFormat,

    /// Command output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true, value_name = "FORMAT")]
    pub format: OutputFormat,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a rule against an unsigned transaction
    ///
    /// Prints `allowed` and exits 0 when every stage passes. A policy denial
    /// exits 1; any other failure exits 2.
    Evaluate {
        /// Chain integration configuration (TOML)
        #[arg(short, long, value_name = "PATH")]
        config: PathBuf,

        /// Rule to evaluate (JSON)
        #[arg(short, long, value_name = "PATH")]
        rule: PathBuf,

        /// Unsigned transaction, hex or base64
        #[arg(short, long, value_name = "TX")]
        tx: String,
    },

    /// Attach a signature to a transaction and print its hash
    ///
    /// S is canonicalized to the lower half of the curve order first, so
    /// both S and N - S produce the same hash.
    TxHash {
        /// Unsigned transaction, hex or base64
        #[arg(short, long, value_name = "TX")]
        tx: String,

        /// Signature R component (32 bytes hex)
        #[arg(long, value_name = "HEX")]
        r: String,

        /// Signature S component (32 bytes hex)
        #[arg(long, value_name = "HEX")]
        s: String,

        /// Recovery id (hex)
        #[arg(long, default_value = "", value_name = "HEX")]
        recovery_id: String,
    },

    /// Print the sender address of a transaction's single message
    Sender {
        /// Built-in chain id
        #[arg(long, value_name = "ID")]
        chain: String,

        /// Transaction, hex or base64
        #[arg(short, long, value_name = "TX")]
        tx: String,
    },

    /// List the built-in chains with their prefixes and protocols
    Chains,
}

/// Command output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON
    Json,
}
