//! # Evaluate Command
//!
//! `recipe evaluate --config <PATH> --rule <PATH> --tx <TX>`
//!
//! Loads the chain integration configuration, builds a policy engine from it
//! and evaluates the rule against the unsigned transaction.
//!
//! ## Output
//!
//! ```text
//! allowed
//! ```
//!
//! ```json
//! {"outcome":"allowed","chain":"cosmos","resource":"cosmos.atom.transfer"}
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Allowed
//! - 1: Policy denied
//! - 2: Other error

use std::path::PathBuf;

use recipe_core::{EngineConfig, RecipeError};
use recipe_policy::PolicyEngine;
use serde::Serialize;

use super::render_json;
use crate::cli::args::OutputFormat;
use crate::cli::input::{decode_tx_input, load_rule};

/// Result of an allowed evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluateOutput {
    /// Always `"allowed"`.
    pub outcome: &'static str,
    /// Chain the engine was built for.
    pub chain: String,
    /// The rule's resource path.
    pub resource: String,
}

/// The `recipe evaluate` command handler.
#[derive(Debug, Clone)]
pub struct EvaluateCommand {
    /// Configuration file path.
    pub config: PathBuf,
    /// Rule file path.
    pub rule: PathBuf,
    /// Transaction, hex or base64.
    pub tx: String,
    /// Output format.
    pub format: OutputFormat,
}

impl EvaluateCommand {
    /// Create a new `EvaluateCommand`.
    #[must_use]
    pub fn new(
        config: impl Into<PathBuf>,
        rule: impl Into<PathBuf>,
        tx: impl Into<String>,
        format: OutputFormat,
    ) -> Self {
        Self {
            config: config.into(),
            rule: rule.into(),
            tx: tx.into(),
            format,
        }
    }

    /// Evaluate without printing.
    ///
    /// # Errors
    ///
    /// - [`RecipeError::Config`] if the configuration cannot be loaded or names an unknown chain
    /// - [`RecipeError::InvalidInput`] if the rule or transaction cannot be read
    /// - [`RecipeError::Policy`] if the engine rejects the transaction
    pub fn execute(&self) -> Result<EvaluateOutput, RecipeError> {
        let config = EngineConfig::load(&self.config)?;
        tracing::debug!(
            path = %self.config.display(),
            chain = %config.chain,
            protocols = config.protocols.len(),
            magic_constants = config.magic_constants.len(),
            "Configuration loaded"
        );

        let rule = load_rule(&self.rule)?;
        let tx = decode_tx_input(&self.tx)?;

        let engine = PolicyEngine::from_config(&config)?;
        engine.evaluate(&rule, &tx)?;

        Ok(EvaluateOutput {
            outcome: "allowed",
            chain: config.chain,
            resource: rule.resource,
        })
    }

    /// Evaluate and print the result.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn run(&self) -> Result<(), RecipeError> {
        let output = self.execute()?;
        match self.format {
            OutputFormat::Text => println!("{}", output.outcome),
            OutputFormat::Json => println!("{}", render_json(&output)?),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use recipe_chain::fixtures::{coin, TxBuilder};
    use recipe_core::{ConfigError, PolicyError};
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
chain = "cosmos"

[[magic_constants]]
id = "treasury"
chain = "cosmos"
address = "cosmos1treasury"
"#;

    struct Setup {
        dir: TempDir,
        tx: String,
    }

    impl Setup {
        fn new(to: &str, amount: &str) -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("chain.toml"), CONFIG).unwrap();
            let tx = TxBuilder::new()
                .send("cosmos1from", to, vec![coin("uatom", amount)])
                .build();
            Self {
                dir,
                tx: hex::encode(tx),
            }
        }

        fn command(&self, rule: &str) -> EvaluateCommand {
            let rule_path = self.dir.path().join("rule.json");
            fs::write(&rule_path, rule).unwrap();
            EvaluateCommand::new(
                self.dir.path().join("chain.toml"),
                rule_path,
                self.tx.clone(),
                OutputFormat::Text,
            )
        }
    }

    #[test]
    fn test_allowed() {
        let setup = Setup::new("cosmos1treasury", "100");
        let output = setup
            .command(
                r#"{"effect":"ALLOW","resource":"cosmos.atom.transfer",
                    "target":{"type":"MAGIC_CONSTANT","magicConstant":"treasury"},
                    "parameterConstraints":[{"parameterName":"amount",
                        "constraint":{"type":"max","maxValue":"100","required":true}}]}"#,
            )
            .execute()
            .unwrap();

        assert_eq!(
            output,
            EvaluateOutput {
                outcome: "allowed",
                chain: "cosmos".to_string(),
                resource: "cosmos.atom.transfer".to_string(),
            }
        );
    }

    #[test]
    fn test_denied() {
        let setup = Setup::new("cosmos1elsewhere", "100");
        let err = setup
            .command(
                r#"{"effect":"ALLOW","resource":"cosmos.atom",
                    "target":{"type":"MAGIC_CONSTANT","magicConstant":"treasury"}}"#,
            )
            .execute()
            .unwrap_err();

        assert!(err.is_denial());
        assert!(matches!(err, RecipeError::Policy(PolicyError::Target(_))));
    }

    #[test]
    fn test_missing_config() {
        let setup = Setup::new("cosmos1treasury", "1");
        let mut command = setup.command(r#"{"effect":"ALLOW","resource":"cosmos.atom"}"#);
        command.config = setup.dir.path().join("missing.toml");

        let err = command.execute().unwrap_err();
        assert!(matches!(err, RecipeError::Config(ConfigError::Io { .. })));
        assert!(!err.is_denial());
    }

    #[test]
    fn test_bad_transaction_input() {
        let setup = Setup::new("cosmos1treasury", "1");
        let mut command = setup.command(r#"{"effect":"ALLOW","resource":"cosmos.atom"}"#);
        command.tx = "zz!".to_string();

        assert!(matches!(
            command.execute().unwrap_err(),
            RecipeError::InvalidInput { .. }
        ));
    }
}
