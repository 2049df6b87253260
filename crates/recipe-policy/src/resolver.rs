//! Magic-constant resolution.
//!
//! A magic constant is a symbolic destination (for example `treasury`) that
//! is resolved to a concrete address at evaluation time instead of being
//! written into the rule.
//!
//! Resolution is two-step: the [`MagicConstantRegistry`] hands out the
//! [`Resolver`] responsible for a constant, and the resolver maps
//! `(constant, chain, context)` to an address. The engine always resolves in
//! the [`DEFAULT_CONTEXT`].
//!
//! [`StaticMagicConstants`] is an in-process table that plays both roles,
//! built from the `[[magic_constants]]` section of the configuration.
//!
//! # Example
//!
//! ```
//! use recipe_policy::resolver::{MagicConstantRegistry, StaticMagicConstants, DEFAULT_CONTEXT};
//!
//! let constants = StaticMagicConstants::new()
//!     .with_address("treasury", "thorchain", "thor1treasury");
//!
//! let resolver = constants.resolver("treasury").unwrap();
//! let resolved = resolver.resolve("treasury", "thorchain", DEFAULT_CONTEXT).unwrap();
//! assert_eq!(resolved.address, "thor1treasury");
//!
//! assert!(constants.resolver("vault").is_err());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use recipe_core::{EngineConfig, ResolverError};

/// The resolution context used by the policy engine.
pub const DEFAULT_CONTEXT: &str = "default";

/// An address a magic constant resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The concrete address.
    pub address: String,
    /// Resolver-specific metadata (e.g. the source of the address).
    pub meta: BTreeMap<String, String>,
}

impl Resolution {
    /// A resolution with no metadata.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            meta: BTreeMap::new(),
        }
    }
}

/// Resolves a magic constant to an address on a chain.
pub trait Resolver: Send + Sync + fmt::Debug {
    /// Resolve `constant` for `chain_id` in `context`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolverError`] if the constant cannot be resolved.
    fn resolve(
        &self,
        constant: &str,
        chain_id: &str,
        context: &str,
    ) -> Result<Resolution, ResolverError>;
}

/// Hands out the resolver responsible for a magic constant.
pub trait MagicConstantRegistry: Send + Sync + fmt::Debug {
    /// The resolver for `constant`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::UnknownConstant`] if no resolver handles it.
    fn resolver(&self, constant: &str) -> Result<&dyn Resolver, ResolverError>;
}

/// Static `(constant, chain) -> address` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticMagicConstants {
    addresses: BTreeMap<(String, String), String>,
    constants: BTreeSet<String>,
}

impl StaticMagicConstants {
    /// An empty table; every constant is unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from the configuration's magic-constant entries.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        config
            .magic_constants
            .iter()
            .fold(Self::new(), |table, entry| {
                table.with_address(&entry.id, &entry.chain, &entry.address)
            })
    }

    /// Add the address of `constant` on `chain`.
    #[must_use]
    pub fn with_address(
        mut self,
        constant: impl Into<String>,
        chain: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        let constant = constant.into();
        self.constants.insert(constant.clone());
        self.addresses.insert((constant, chain.into()), address.into());
        self
    }

    /// Number of `(constant, chain)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl MagicConstantRegistry for StaticMagicConstants {
    fn resolver(&self, constant: &str) -> Result<&dyn Resolver, ResolverError> {
        if self.constants.contains(constant) {
            Ok(self)
        } else {
            Err(ResolverError::UnknownConstant {
                id: constant.to_string(),
            })
        }
    }
}

impl Resolver for StaticMagicConstants {
    fn resolve(
        &self,
        constant: &str,
        chain_id: &str,
        context: &str,
    ) -> Result<Resolution, ResolverError> {
        if context != DEFAULT_CONTEXT {
            return Err(ResolverError::UnsupportedContext {
                context: context.to_string(),
            });
        }

        if !self.constants.contains(constant) {
            return Err(ResolverError::UnknownConstant {
                id: constant.to_string(),
            });
        }

        self.addresses
            .get(&(constant.to_string(), chain_id.to_string()))
            .map(|address| {
                let mut resolution = Resolution::new(address.clone());
                resolution
                    .meta
                    .insert("source".to_string(), "static".to_string());
                resolution
            })
            .ok_or_else(|| ResolverError::NoAddressForChain {
                id: constant.to_string(),
                chain: chain_id.to_string(),
            })
    }
}
