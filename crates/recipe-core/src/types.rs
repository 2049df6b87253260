//! Core data types for the recipe policy engine.
//!
//! - [`Rule`] - The declarative authorization policy ("recipe") for one transaction
//! - [`ResourcePath`] - Parsed `chain.protocol[.function]` resource identifier
//! - [`Target`] - Destination constraint of a rule
//! - [`ParameterConstraint`] / [`Constraint`] - Per-parameter value constraints
//! - [`MessageKind`] - Semantic classification of a decoded message
//! - [`Value`] - A typed value extracted from a message
//! - [`EcdsaSignature`] - Hex-encoded signature produced by the signing ceremony
//!
//! # Examples
//!
//! ```
//! use recipe_core::types::{Effect, ResourcePath, Rule, Target};
//!
//! let rule: Rule = serde_json::from_str(r#"{
//!     "effect": "ALLOW",
//!     "resource": "cosmos.atom.transfer",
//!     "target": { "type": "ADDRESS", "address": "cosmos1recipient" },
//!     "parameterConstraints": [
//!         {
//!             "parameterName": "amount",
//!             "constraint": { "type": "max", "maxValue": "2000000", "required": true }
//!         }
//!     ]
//! }"#).expect("valid rule");
//!
//! assert_eq!(rule.effect, Effect::Allow);
//! assert_eq!(rule.target, Target::address("cosmos1recipient"));
//!
//! let resource: ResourcePath = rule.resource.parse().expect("valid resource");
//! assert_eq!(resource.protocol_id, "atom");
//! ```

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;

// ============================================================================
// Rule
// ============================================================================

/// Effect declared by a rule.
///
/// Only [`Effect::Allow`] rules are evaluated; any other effect is rejected
/// outright rather than interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    /// No effect declared.
    #[default]
    #[serde(alias = "EFFECT_UNSPECIFIED")]
    Unspecified,
    /// The rule allows matching transactions.
    #[serde(alias = "EFFECT_ALLOW")]
    Allow,
    /// The rule denies matching transactions.
    #[serde(alias = "EFFECT_DENY")]
    Deny,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => write!(f, "UNSPECIFIED"),
            Self::Allow => write!(f, "ALLOW"),
            Self::Deny => write!(f, "DENY"),
        }
    }
}

/// A declarative authorization policy for one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// The rule's effect. Only `Allow` is evaluated.
    #[serde(default)]
    pub effect: Effect,

    /// Dotted resource path, `chain.protocol[.function]`.
    pub resource: String,

    /// Destination constraint.
    #[serde(default)]
    pub target: Target,

    /// Ordered parameter constraints.
    #[serde(default)]
    pub parameter_constraints: Vec<ParameterConstraint>,
}

impl Rule {
    /// Create an allow rule for `resource` with no target and no constraints.
    #[must_use]
    pub fn allow(resource: impl Into<String>) -> Self {
        Self {
            effect: Effect::Allow,
            resource: resource.into(),
            target: Target::Unspecified,
            parameter_constraints: Vec::new(),
        }
    }

    /// Set the rule's target.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Append a parameter constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: ParameterConstraint) -> Self {
        self.parameter_constraints.push(constraint);
        self
    }
}

// ============================================================================
// ResourcePath
// ============================================================================

/// Parsed resource identifier `chain.protocol[.function]`.
///
/// Two- and three-segment paths are valid; anything else, or an empty
/// segment, is a format error.
///
/// ```
/// use recipe_core::types::ResourcePath;
///
/// let path: ResourcePath = "thorchain.rune".parse().unwrap();
/// assert_eq!(path.chain_id, "thorchain");
/// assert_eq!(path.function_id, None);
///
/// assert!("thorchain".parse::<ResourcePath>().is_err());
/// assert!("a.b.c.d".parse::<ResourcePath>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    /// Chain identifier.
    pub chain_id: String,
    /// Protocol identifier within the chain.
    pub protocol_id: String,
    /// Optional function identifier within the protocol.
    pub function_id: Option<String>,
}

impl FromStr for ResourcePath {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();

        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(PolicyError::bad_resource(s, "empty segment"));
        }

        match segments.as_slice() {
            [chain, protocol] => Ok(Self {
                chain_id: (*chain).to_string(),
                protocol_id: (*protocol).to_string(),
                function_id: None,
            }),
            [chain, protocol, function] => Ok(Self {
                chain_id: (*chain).to_string(),
                protocol_id: (*protocol).to_string(),
                function_id: Some((*function).to_string()),
            }),
            _ => Err(PolicyError::bad_resource(
                s,
                format!("expected 2 or 3 segments, found {}", segments.len()),
            )),
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.chain_id, self.protocol_id)?;
        if let Some(function) = &self.function_id {
            write!(f, ".{function}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Target
// ============================================================================

/// Destination constraint of a rule.
///
/// Serialized as `{"type": "ADDRESS", "address": "..."}` or
/// `{"type": "MAGIC_CONSTANT", "magicConstant": "..."}`. Target types this
/// engine does not know deserialize to [`Target::Unrecognized`] and are
/// rejected at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Target {
    /// No destination restriction.
    #[default]
    Unspecified,

    /// The destination must equal this literal address.
    Address {
        /// Expected destination address.
        address: String,
    },

    /// The destination must equal the address the constant resolves to.
    MagicConstant {
        /// Symbolic destination id, e.g. `"treasury"`.
        #[serde(rename = "magicConstant")]
        magic_constant: String,
    },

    /// A target type this engine does not know.
    #[serde(other)]
    Unrecognized,
}

impl Target {
    /// Create a literal address target.
    #[must_use]
    pub fn address(address: impl Into<String>) -> Self {
        Self::Address {
            address: address.into(),
        }
    }

    /// Create a magic-constant target.
    #[must_use]
    pub fn magic_constant(id: impl Into<String>) -> Self {
        Self::MagicConstant {
            magic_constant: id.into(),
        }
    }

    /// Returns `true` if the target imposes no destination restriction.
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

// ============================================================================
// Constraints
// ============================================================================

/// Constraint vocabulary understood by the comparators.
///
/// The engine routes constraints; it never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ConstraintKind {
    /// Any value is accepted.
    Any,
    /// The value must equal `fixed_value`.
    Fixed {
        /// The required value.
        fixed_value: String,
    },
    /// The value must not be below `min_value`.
    Min {
        /// Inclusive lower bound.
        min_value: String,
    },
    /// The value must not exceed `max_value`.
    Max {
        /// Inclusive upper bound.
        max_value: String,
    },
    /// The value must equal the address a magic constant resolves to.
    MagicConstant {
        /// Symbolic id.
        magic_constant: String,
    },
}

impl ConstraintKind {
    /// Returns the constraint type name as it appears in rules.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Fixed { .. } => "fixed",
            Self::Min { .. } => "min",
            Self::Max { .. } => "max",
            Self::MagicConstant { .. } => "magic_constant",
        }
    }
}

/// A constraint together with its `required` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// The constraint type and its operand.
    #[serde(flatten)]
    pub kind: ConstraintKind,
    /// Whether the parameter must carry a value.
    #[serde(default)]
    pub required: bool,
}

/// A named parameter and the constraint it must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterConstraint {
    /// Parameter name, e.g. `"amount"`.
    pub parameter_name: String,
    /// The constraint on that parameter.
    pub constraint: Constraint,
}

impl ParameterConstraint {
    /// Create a required constraint of the given kind.
    #[must_use]
    pub fn new(parameter_name: impl Into<String>, kind: ConstraintKind) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            constraint: Constraint {
                kind,
                required: true,
            },
        }
    }

    /// Required fixed-value constraint.
    #[must_use]
    pub fn fixed(parameter_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            parameter_name,
            ConstraintKind::Fixed {
                fixed_value: value.into(),
            },
        )
    }

    /// Required maximum-bound constraint.
    #[must_use]
    pub fn max(parameter_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            parameter_name,
            ConstraintKind::Max {
                max_value: value.into(),
            },
        )
    }

    /// Required minimum-bound constraint.
    #[must_use]
    pub fn min(parameter_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            parameter_name,
            ConstraintKind::Min {
                min_value: value.into(),
            },
        )
    }

    /// Mark the constraint optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.constraint.required = false;
        self
    }
}

// ============================================================================
// MessageKind
// ============================================================================

/// Semantic classification of a decoded message.
///
/// `Unknown` is an explicit value for message types a chain registers but
/// the engine cannot reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Token transfer between two addresses.
    Send,
    /// Deposit into a chain-native module (e.g. a THORChain swap).
    Deposit,
    /// Registered but not classified.
    Unknown,
}

impl MessageKind {
    /// Returns the kind's lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Deposit => "deposit",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Value
// ============================================================================

/// A typed value extracted from a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Textual value (addresses, memos, denominations, assets).
    String(String),
    /// Unsigned integer magnitude (amounts).
    Integer(U256),
}

impl Value {
    /// Returns the value type's name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

// ============================================================================
// EcdsaSignature
// ============================================================================

/// A hex-encoded ECDSA signature produced by the signing ceremony.
///
/// Components may carry an optional `0x`/`0X` prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcdsaSignature {
    /// R component, 32 bytes hex.
    pub r: String,
    /// S component, 32 bytes hex.
    pub s: String,
    /// Recovery id, hex.
    #[serde(default)]
    pub recovery_id: String,
}

impl EcdsaSignature {
    /// Create a signature from its hex components.
    #[must_use]
    pub fn new(r: impl Into<String>, s: impl Into<String>, recovery_id: impl Into<String>) -> Self {
        Self {
            r: r.into(),
            s: s.into(),
            recovery_id: recovery_id.into(),
        }
    }
}
