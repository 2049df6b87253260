//! # recipe-core
//!
//! Core types, error taxonomy and configuration for the recipe policy engine.
//!
//! This crate provides the foundational types shared across all recipe crates:
//!
//! ## Modules
//!
//! - [`error`] - Error types for every evaluation and finalization stage
//! - [`types`] - Rules, resource paths, targets, constraints, message kinds, values
//! - [`config`] - TOML configuration of a chain integration
//!
//! ## Example
//!
//! ```rust
//! use recipe_core::{Effect, PolicyError, ResourcePath, Rule};
//!
//! let rule = Rule::allow("cosmos.atom.transfer");
//! assert_eq!(rule.effect, Effect::Allow);
//!
//! let err = "cosmos".parse::<ResourcePath>().unwrap_err();
//! assert!(matches!(err, PolicyError::BadResourceFormat { .. }));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used error types at crate root for convenience
pub use error::{
    ComparatorError, ConfigError, ConstraintError, DecodeError, ExtractError, PolicyError,
    RecipeError, ResolverError, SignatureError, TargetError, UnsupportedMessage,
};

// Re-export core types at crate root for convenience
pub use types::{
    Constraint, ConstraintKind, EcdsaSignature, Effect, MessageKind, ParameterConstraint,
    ResourcePath, Rule, Target, Value,
};

pub use config::{EngineConfig, MagicConstantEntry};

// Re-export U256 from alloy_primitives for working with amounts
pub use alloy_primitives::U256;
