//! # Tx-Hash Command
//!
//! `recipe tx-hash --tx <TX> --r <HEX> --s <HEX> [--recovery-id <HEX>]`
//!
//! Attaches the signature produced by the signing ceremony to the unsigned
//! transaction and prints the resulting transaction hash. With
//! `--format json` the signed transaction is included, base64-encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use recipe_chain::sign_transaction;
use recipe_core::{EcdsaSignature, RecipeError};
use serde::Serialize;

use super::render_json;
use crate::cli::args::OutputFormat;
use crate::cli::input::decode_tx_input;

/// Result of the `tx-hash` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxHashOutput {
    /// Upper-case hex SHA-256 of the signed transaction.
    pub hash: String,
    /// The signed transaction, standard base64.
    pub signed_tx: String,
}

/// The `recipe tx-hash` command handler.
#[derive(Debug, Clone)]
pub struct TxHashCommand {
    /// Unsigned transaction, hex or base64.
    pub tx: String,
    /// The signature to attach.
    pub signature: EcdsaSignature,
    /// Output format.
    pub format: OutputFormat,
}

impl TxHashCommand {
    /// Create a new `TxHashCommand`.
    #[must_use]
    pub fn new(tx: impl Into<String>, signature: EcdsaSignature, format: OutputFormat) -> Self {
        Self {
            tx: tx.into(),
            signature,
            format,
        }
    }

    /// Sign and hash without printing.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::InvalidInput`] for unreadable transaction input
    /// and [`RecipeError::Signature`] if finalization fails.
    pub fn execute(&self) -> Result<TxHashOutput, RecipeError> {
        let unsigned = decode_tx_input(&self.tx)?;
        let signed = sign_transaction(&unsigned, std::slice::from_ref(&self.signature))?;

        Ok(TxHashOutput {
            signed_tx: STANDARD.encode(&signed.bytes),
            hash: signed.hash,
        })
    }

    /// Sign, hash and print the result.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn run(&self) -> Result<(), RecipeError> {
        let output = self.execute()?;
        match self.format {
            OutputFormat::Text => println!("{}", output.hash),
            OutputFormat::Json => println!("{}", render_json(&output)?),
        }
        Ok(())
    }
}
