//! # CLI Command Handlers
//!
//! - [`evaluate`] - Evaluate a rule against a transaction
//! - [`tx_hash`] - Attach a signature and compute the transaction hash
//! - [`sender`] - Extract the sender address
//! - [`chains`] - List the built-in chains
//!
//! Each handler has an `execute` method returning a serializable output
//! value and a `run` method that prints it in the requested
//! [`OutputFormat`]. Errors are [`RecipeError`]s; `main` maps them to exit
//! codes with [`exit_codes::exit_code`].

pub mod chains;
pub mod evaluate;
pub mod exit_codes;
pub mod sender;
pub mod tx_hash;

pub use chains::{ChainSummary, ChainsCommand};
pub use evaluate::{EvaluateCommand, EvaluateOutput};
pub use sender::{SenderCommand, SenderOutput};
pub use tx_hash::{TxHashCommand, TxHashOutput};

use recipe_core::RecipeError;
use serde::Serialize;

use crate::cli::args::OutputFormat;

/// Render `value` as a single line of JSON.
///
/// # Errors
///
/// Returns [`RecipeError::InvalidInput`] if `value` cannot be serialized.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, RecipeError> {
    serde_json::to_string(value)
        .map_err(|e| RecipeError::invalid_input(format!("failed to render output: {e}")))
}

/// Machine-readable form of a failed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// `"denied"` for policy denials, `"error"` otherwise.
    pub outcome: &'static str,
    /// Pipeline stage that failed, for policy errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
    /// Error message.
    pub error: String,
}

impl ErrorReport {
    /// Build the report for `err`.
    #[must_use]
    pub fn new(err: &RecipeError) -> Self {
        let stage = match err {
            RecipeError::Policy(policy) => Some(policy.stage()),
            _ => None,
        };
        Self {
            outcome: if err.is_denial() { "denied" } else { "error" },
            stage,
            error: err.to_string(),
        }
    }
}

/// Render `err` for the given output format.
#[must_use]
pub fn render_error(err: &RecipeError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("Error: {err}"),
        OutputFormat::Json => {
            render_json(&ErrorReport::new(err)).unwrap_or_else(|_| format!("Error: {err}"))
        }
    }
}
