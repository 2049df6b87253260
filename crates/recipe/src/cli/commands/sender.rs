//! # Sender Command
//!
//! `recipe sender --chain <ID> --tx <TX>`
//!
//! Prints the address the chain's sender policy extracts from the
//! transaction's single message: the from-address of a send, or the
//! re-encoded signer of a deposit.

use recipe_chain::chains;
use recipe_core::RecipeError;
use recipe_policy::PolicyEngine;
use serde::Serialize;

use super::render_json;
use crate::cli::args::OutputFormat;
use crate::cli::input::decode_tx_input;
use crate::logging::redact_address;

/// Result of the `sender` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderOutput {
    /// Chain id.
    pub chain: String,
    /// The sender address.
    pub sender: String,
}

/// The `recipe sender` command handler.
#[derive(Debug, Clone)]
pub struct SenderCommand {
    /// Built-in chain id.
    pub chain: String,
    /// Transaction, hex or base64.
    pub tx: String,
    /// Output format.
    pub format: OutputFormat,
}

impl SenderCommand {
    /// Create a new `SenderCommand`.
    #[must_use]
    pub fn new(chain: impl Into<String>, tx: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            chain: chain.into(),
            tx: tx.into(),
            format,
        }
    }

    /// Extract the sender without printing.
    ///
    /// # Errors
    ///
    /// - [`RecipeError::Config`] if the chain id is unknown
    /// - [`RecipeError::InvalidInput`] for unreadable transaction input
    /// - [`RecipeError::Policy`] if the transaction cannot be decoded or has no extractable sender
    pub fn execute(&self) -> Result<SenderOutput, RecipeError> {
        let tx = decode_tx_input(&self.tx)?;
        let engine = PolicyEngine::builder(chains::by_id(&self.chain)?).build()?;
        let sender = engine.sender(&tx)?;

        tracing::info!(
            chain = %self.chain,
            sender = %redact_address(&sender),
            "Sender extracted"
        );

        Ok(SenderOutput {
            chain: self.chain.clone(),
            sender,
        })
    }

    /// Extract and print the sender.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn run(&self) -> Result<(), RecipeError> {
        let output = self.execute()?;
        match self.format {
            OutputFormat::Text => println!("{}", output.sender),
            OutputFormat::Json => println!("{}", render_json(&output)?),
        }
        Ok(())
    }
}
