//! # Chains Command
//!
//! `recipe chains`
//!
//! Lists the built-in chain descriptors:
//!
//! ```text
//! cosmos      Cosmos Hub  prefix=cosmos  protocols=atom:send
//! thorchain   THORChain   prefix=thor    protocols=rune:send,thorchain_swap:deposit
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use recipe_chain::chains;
use recipe_core::{MessageKind, RecipeError};
use serde::Serialize;

use super::render_json;
use crate::cli::args::OutputFormat;

/// One built-in chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainSummary {
    /// Chain id, as used in resource paths.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Bech32 address prefix.
    pub prefix: String,
    /// Protocol id → expected message kind.
    pub protocols: BTreeMap<String, MessageKind>,
}

/// The `recipe chains` command handler.
#[derive(Debug, Clone, Copy)]
pub struct ChainsCommand {
    /// Output format.
    pub format: OutputFormat,
}

impl ChainsCommand {
    /// Create a new `ChainsCommand`.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Collect the summaries without printing.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Config`] if a built-in descriptor fails to build.
    pub fn execute(&self) -> Result<Vec<ChainSummary>, RecipeError> {
        Ok(chains::all()?
            .into_iter()
            .map(|descriptor| ChainSummary {
                id: descriptor.id().to_string(),
                name: descriptor.name().to_string(),
                prefix: descriptor.prefix().to_string(),
                protocols: descriptor.default_protocol_kinds().clone(),
            })
            .collect())
    }

    /// Print the summaries.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn run(&self) -> Result<(), RecipeError> {
        let summaries = self.execute()?;
        match self.format {
            OutputFormat::Text => print!("{}", render_table(&summaries)),
            OutputFormat::Json => println!("{}", render_json(&summaries)?),
        }
        Ok(())
    }
}

fn render_table(summaries: &[ChainSummary]) -> String {
    let mut out = String::new();
    for summary in summaries {
        let protocols = summary
            .protocols
            .iter()
            .map(|(id, kind)| format!("{id}:{kind}"))
            .collect::<Vec<_>>()
            .join(",");
        // write! to a String never fails
        let _ = writeln!(
            out,
            "{:<11} {:<11} prefix={:<6} protocols={protocols}",
            summary.id, summary.name, summary.prefix
        );
    }
    out
}
