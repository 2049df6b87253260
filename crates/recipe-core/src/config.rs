//! Configuration types for a chain integration.
//!
//! One configuration file describes one chain integration: which built-in
//! chain descriptor to use, the protocol → expected-message-kind map the
//! engine enforces, and a static table of magic-constant addresses.
//!
//! # Configuration File
//!
//! ```toml
//! chain = "thorchain"
//!
//! [protocols]
//! rune = "send"
//! thorchain_swap = "deposit"
//!
//! [[magic_constants]]
//! id = "treasury"
//! chain = "thorchain"
//! address = "thor1treasury"
//! ```
//!
//! # Examples
//!
//! ```
//! use recipe_core::config::EngineConfig;
//! use recipe_core::types::MessageKind;
//!
//! let config = EngineConfig::from_toml_str(r#"
//! chain = "cosmos"
//!
//! [protocols]
//! atom = "send"
//! "#).expect("valid config");
//!
//! assert_eq!(config.chain, "cosmos");
//! assert_eq!(config.protocols.get("atom"), Some(&MessageKind::Send));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::MessageKind;

/// Configuration of one chain integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Built-in chain descriptor id (e.g. `"cosmos"`, `"thorchain"`).
    pub chain: String,

    /// Protocol id → message kind the protocol's rules must match.
    ///
    /// When empty, the chain descriptor's built-in map is used.
    #[serde(default)]
    pub protocols: BTreeMap<String, MessageKind>,

    /// Static magic-constant addresses.
    #[serde(default)]
    pub magic_constants: Vec<MagicConstantEntry>,
}

/// A magic constant's address on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicConstantEntry {
    /// Symbolic constant id.
    pub id: String,
    /// Chain the address belongs to.
    pub chain: String,
    /// Resolved address.
    pub address: String,
}

impl EngineConfig {
    /// Create a configuration for `chain` with no overrides.
    #[must_use]
    pub fn new(chain: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            ..Self::default()
        }
    }

    /// Add a protocol → kind mapping.
    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>, kind: MessageKind) -> Self {
        self.protocols.insert(protocol.into(), kind);
        self
    }

    /// Add a magic-constant address.
    #[must_use]
    pub fn with_magic_constant(
        mut self,
        id: impl Into<String>,
        chain: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.magic_constants.push(MagicConstantEntry {
            id: id.into(),
            chain: chain.into(),
            address: address.into(),
        });
        self
    }

    /// Parse and validate a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid TOML and
    /// [`ConfigError::InvalidConfiguration`] if validation fails.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`EngineConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] if the chain id is empty,
    /// a protocol id is empty, a magic constant has an empty field, or the
    /// same constant is declared twice for one chain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain.trim().is_empty() {
            return Err(ConfigError::invalid("chain must not be empty"));
        }

        if self.protocols.keys().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid("protocol ids must not be empty"));
        }

        let mut seen = HashSet::new();
        for entry in &self.magic_constants {
            if entry.id.is_empty() || entry.chain.is_empty() || entry.address.is_empty() {
                return Err(ConfigError::invalid(format!(
                    "magic constant {:?} has an empty field",
                    entry.id
                )));
            }
            if !seen.insert((entry.id.as_str(), entry.chain.as_str())) {
                return Err(ConfigError::invalid(format!(
                    "magic constant {} declared twice for chain {}",
                    entry.id, entry.chain
                )));
            }
        }

        Ok(())
    }
}
