//! # recipe
//!
//! Transaction policy evaluation for threshold-signing wallets.
//!
//! ## Usage
//!
//! ```bash
//! # Evaluate a rule against an unsigned transaction
//! recipe evaluate --config thorchain.toml --rule swap.json --tx 0a8f01...
//!
//! # Attach the ceremony's signature and print the transaction hash
//! recipe tx-hash --tx 0a8f01... --r 3f1c... --s 7a9b... --recovery-id 01
//!
//! # Print the sender of a transaction
//! recipe sender --chain thorchain --tx CoUBCoIB...
//!
//! # List the built-in chains
//! recipe chains
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Success
//! - 1: Policy denied
//! - 2: Other error

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use clap::Parser;
use recipe::cli::commands::exit_codes::{exit_code, EXIT_ERROR};
use recipe::cli::commands::{
    render_error, ChainsCommand, EvaluateCommand, SenderCommand, TxHashCommand,
};
use recipe::cli::{Cli, Commands, OutputFormat};
use recipe::logging::{init_logging, verbosity_to_level, LogConfig, LogError, LogFormat};
use recipe_core::EcdsaSignature;

/// Set up logging based on verbosity level and format.
fn setup_logging(verbose: u8, format: LogFormat) -> Result<(), LogError> {
    let config = LogConfig {
        level: verbosity_to_level(verbose),
        format,
    };
    init_logging(&config)
}

/// Main entry point for the `recipe` binary.
fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose, cli.log_format) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(EXIT_ERROR);
    }

    let format = cli.format;
    let result = match cli.command {
        Commands::Evaluate { config, rule, tx } => {
            EvaluateCommand::new(config, rule, tx, format).run()
        }
        Commands::TxHash {
            tx,
            r,
            s,
            recovery_id,
        } => TxHashCommand::new(tx, EcdsaSignature::new(r, s, recovery_id), format).run(),
        Commands::Sender { chain, tx } => SenderCommand::new(chain, tx, format).run(),
        Commands::Chains => ChainsCommand::new(format).run(),
    };

    if let Err(e) = result {
        match format {
            OutputFormat::Text => eprintln!("{}", render_error(&e, format)),
            OutputFormat::Json => println!("{}", render_error(&e, format)),
        }
        std::process::exit(exit_code(&e));
    }
}
