//! # recipe-policy
//!
//! Policy evaluation for the recipe engine.
//!
//! Given a [`Rule`](recipe_core::Rule) and raw transaction bytes, the
//! [`PolicyEngine`] decides whether the transaction may be co-signed. The
//! decision is a pure function of the rule, the transaction and the
//! configuration captured when the engine was built.
//!
//! ## Modules
//!
//! - [`engine`] - The fail-fast evaluation pipeline
//! - [`target`] - Destination checks against the rule's target
//! - [`params`] - Parameter extraction and constraint validation
//! - [`comparator`] - Constraint comparators and their routing table
//! - [`resolver`] - Magic-constant registry and resolvers
//!
//! ## Example
//!
//! ```rust
//! use recipe_chain::chains;
//! use recipe_core::{PolicyError, Rule};
//! use recipe_policy::PolicyEngine;
//!
//! let engine = PolicyEngine::builder(chains::thorchain().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let mut rule = Rule::allow("thorchain.rune");
//! rule.effect = recipe_core::Effect::Deny;
//!
//! assert!(matches!(
//!     engine.evaluate(&rule, &[0x0a]),
//!     Err(PolicyError::RuleNotAllow { .. })
//! ));
//! ```
//!
//! ## Crate Features
//!
//! - `mock` - Enable the collaborator test doubles in [`mock`] for use in other crates' tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod comparator;
pub mod engine;
pub mod params;
pub mod resolver;
pub mod target;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use comparator::{Comparator, Comparators, IntegerComparator, StringComparator};
pub use engine::{PolicyEngine, PolicyEngineBuilder};
pub use params::{extract, validate_constraints};
pub use resolver::{MagicConstantRegistry, Resolution, Resolver, StaticMagicConstants};
pub use target::validate_target;
