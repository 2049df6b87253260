//! Error types for the recipe policy engine.
//!
//! Errors are organized by the stage that produces them:
//!
//! - [`DecodeError`] - Raw transaction decoding failures
//! - [`UnsupportedMessage`] - Message type tag missing from the chain's registry
//! - [`TargetError`] - Destination checks against the rule's target
//! - [`ExtractError`] - Parameter extraction from a decoded message
//! - [`ComparatorError`] - Failures reported by a constraint comparator
//! - [`ConstraintError`] - Parameter constraint validation failures
//! - [`ResolverError`] - Magic-constant resolution failures
//! - [`PolicyError`] - Any failure of the evaluation pipeline
//! - [`SignatureError`] - Signature finalization failures
//! - [`ConfigError`] - Configuration loading and validation failures
//! - [`RecipeError`] - Top-level error that wraps all of the above
//!
//! Every stage failure is returned, never logged-and-ignored: in an
//! authorization engine a detected violation always aborts the operation.
//!
//! # Example
//!
//! ```rust
//! use recipe_core::error::{DecodeError, PolicyError};
//!
//! fn decode(data: &[u8]) -> Result<(), PolicyError> {
//!     if data.is_empty() {
//!         return Err(DecodeError::Empty.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(matches!(decode(&[]), Err(PolicyError::Decode(DecodeError::Empty))));
//! ```

use crate::types::{Effect, MessageKind};

/// Top-level error type for the recipe binary and library consumers.
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    /// Policy evaluation rejected the transaction.
    #[error("policy rejected: {0}")]
    Policy(#[from] PolicyError),

    /// Signature finalization failed.
    #[error("signature error: {0}")]
    Signature(#[from] SignatureError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input could not be interpreted.
    #[error("invalid input: {context}")]
    InvalidInput {
        /// What was wrong with the input.
        context: String,
    },
}

impl RecipeError {
    /// Create an `InvalidInput` error with context.
    #[must_use]
    pub fn invalid_input(context: impl Into<String>) -> Self {
        Self::InvalidInput {
            context: context.into(),
        }
    }

    /// Returns `true` if this error is a policy decision against the transaction.
    ///
    /// Configuration problems surfaced during evaluation (unsupported
    /// constraints, missing comparator routes) are not denials.
    #[must_use]
    pub const fn is_denial(&self) -> bool {
        match self {
            Self::Policy(err) => err.is_denial(),
            _ => false,
        }
    }
}

// ============================================================================
// DecodeError
// ============================================================================

/// Errors that can occur while decoding raw transaction bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input exceeds the decoder's size ceiling.
    #[error("transaction too large: {size} bytes exceeds limit of {max} bytes")]
    TooLarge {
        /// Size of the rejected input.
        size: usize,
        /// The configured ceiling.
        max: usize,
    },

    /// The input is empty.
    #[error("empty transaction data")]
    Empty,

    /// The bytes do not form a valid transaction envelope.
    #[error("malformed transaction: {context}")]
    Malformed {
        /// Context about what was malformed.
        context: String,
    },
}

impl DecodeError {
    /// Create a `Malformed` error with context.
    #[must_use]
    pub fn malformed(context: impl Into<String>) -> Self {
        Self::Malformed {
            context: context.into(),
        }
    }
}

// ============================================================================
// UnsupportedMessage
// ============================================================================

/// A message type tag that the chain's message-type registry does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported message type: {type_url}")]
pub struct UnsupportedMessage {
    /// The wire-format type tag that was looked up.
    pub type_url: String,
}

impl UnsupportedMessage {
    /// Create an error for the given type tag.
    #[must_use]
    pub fn new(type_url: impl Into<String>) -> Self {
        Self {
            type_url: type_url.into(),
        }
    }
}

// ============================================================================
// ResolverError
// ============================================================================

/// Errors reported by the magic-constant registry or one of its resolvers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    /// No resolver is registered for this constant.
    #[error("unknown magic constant: {id}")]
    UnknownConstant {
        /// The requested constant id.
        id: String,
    },

    /// The constant has no address on the requested chain.
    #[error("magic constant {id} has no address on chain {chain}")]
    NoAddressForChain {
        /// The requested constant id.
        id: String,
        /// The chain that was asked for.
        chain: String,
    },

    /// The resolution context is not supported by this resolver.
    #[error("unsupported resolution context: {context}")]
    UnsupportedContext {
        /// The context string passed to the resolver.
        context: String,
    },

    /// Resolution failed for another reason.
    #[error("resolution failed: {context}")]
    Failed {
        /// Context about the failure.
        context: String,
    },
}

impl ResolverError {
    /// Create a `Failed` error with context.
    #[must_use]
    pub fn failed(context: impl Into<String>) -> Self {
        Self::Failed {
            context: context.into(),
        }
    }
}

// ============================================================================
// TargetError
// ============================================================================

/// Errors produced while checking a transaction's destination against the rule target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The rule declares an address target with an empty address.
    #[error("target address is empty")]
    EmptyTargetAddress,

    /// The transaction destination differs from the expected address.
    #[error("target address mismatch: expected {expected}, got {actual}")]
    AddressMismatch {
        /// The address the rule requires.
        expected: String,
        /// The recipient found in the transaction.
        actual: String,
    },

    /// Destination targets are not defined for this message kind.
    #[error("target validation is not supported for {kind} messages; use an unspecified target")]
    UnsupportedForKind {
        /// The detected message kind.
        kind: MessageKind,
    },

    /// The magic constant could not be resolved to an address.
    #[error("failed to resolve magic constant {constant}: {source}")]
    ResolverFailed {
        /// The magic constant id.
        constant: String,
        /// The underlying resolver failure.
        #[source]
        source: ResolverError,
    },

    /// The rule uses a target type this engine does not understand.
    #[error("unsupported target type")]
    UnsupportedTargetType,
}

// ============================================================================
// ExtractError
// ============================================================================

/// Errors produced while extracting a named parameter from a decoded message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The parameter name is not defined for this message kind.
    #[error("unsupported parameter {parameter} for {kind} messages")]
    UnsupportedParameter {
        /// The requested parameter name.
        parameter: String,
        /// The detected message kind.
        kind: MessageKind,
    },

    /// The message carries more than one coin.
    #[error("multiple coins are not supported (found {count})")]
    MultiCoinUnsupported {
        /// Number of coins found.
        count: usize,
    },

    /// The message carries no coin at all.
    #[error("message carries no coin")]
    MissingCoin,

    /// The deposit coin has no asset metadata.
    #[error("deposit coin is missing asset information")]
    MissingAssetInfo,

    /// An amount is not a valid unsigned decimal integer.
    #[error("malformed amount: {amount:?}")]
    MalformedAmount {
        /// The raw amount string.
        amount: String,
    },

    /// A registered message kind whose payload does not decode as that kind.
    #[error("malformed {type_url} message: {context}")]
    MalformedMessage {
        /// The message type tag.
        type_url: String,
        /// Decoder context.
        context: String,
    },

    /// Raw signer bytes could not be encoded as an address.
    #[error("invalid signer address: {context}")]
    InvalidSignerAddress {
        /// Encoder context.
        context: String,
    },
}

impl ExtractError {
    /// Create an `UnsupportedParameter` error.
    #[must_use]
    pub fn unsupported_parameter(parameter: impl Into<String>, kind: MessageKind) -> Self {
        Self::UnsupportedParameter {
            parameter: parameter.into(),
            kind,
        }
    }

    /// Create a `MalformedAmount` error.
    #[must_use]
    pub fn malformed_amount(amount: impl Into<String>) -> Self {
        Self::MalformedAmount {
            amount: amount.into(),
        }
    }
}

// ============================================================================
// ComparatorError
// ============================================================================

/// Failures reported by a constraint comparator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparatorError {
    /// The value differs from the fixed value.
    #[error("expected {expected}, got {actual}")]
    Mismatch {
        /// The fixed value from the constraint.
        expected: String,
        /// The extracted value.
        actual: String,
    },

    /// The value is above the maximum bound.
    #[error("value {value} exceeds maximum {max}")]
    AboveMaximum {
        /// The extracted value.
        value: String,
        /// The configured maximum.
        max: String,
    },

    /// The value is below the minimum bound.
    #[error("value {value} is below minimum {min}")]
    BelowMinimum {
        /// The extracted value.
        value: String,
        /// The configured minimum.
        min: String,
    },

    /// No constraint was declared for the parameter.
    #[error("no constraint declared for parameter {parameter}")]
    NotConstrained {
        /// The parameter name.
        parameter: String,
    },

    /// The constraint type is not supported for this value type.
    #[error("constraint type {constraint} is not supported")]
    Unsupported {
        /// The constraint type name.
        constraint: String,
    },

    /// The constraint's bound or fixed value cannot be interpreted.
    #[error("invalid constraint value {value:?}")]
    InvalidConstraintValue {
        /// The raw constraint value.
        value: String,
    },
}

// ============================================================================
// ConstraintError
// ============================================================================

/// Errors produced while validating the rule's parameter constraints.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    /// The comparator rejected the extracted value.
    #[error("parameter {parameter} violates its constraint: {source}")]
    Violation {
        /// The parameter name.
        parameter: String,
        /// The comparator's failure.
        #[source]
        source: ComparatorError,
    },

    /// The comparator does not support the declared constraint type.
    #[error("parameter {parameter} uses unsupported constraint type {constraint}")]
    UnsupportedConstraint {
        /// The parameter name.
        parameter: String,
        /// The constraint type name.
        constraint: String,
    },

    /// No comparator is routed for the extracted value's type.
    #[error("no comparator for {value_type} value of parameter {parameter}")]
    UnsupportedValueType {
        /// The parameter name.
        parameter: String,
        /// The value type name.
        value_type: &'static str,
    },

    /// The parameter value could not be extracted.
    #[error("failed to extract parameter: {0}")]
    Extraction(#[from] ExtractError),
}

impl ConstraintError {
    /// Build the error for a comparator failure on `parameter`.
    ///
    /// A comparator reporting an unsupported constraint type is a rule
    /// configuration problem, not a value violation, and is kept distinct.
    #[must_use]
    pub fn from_comparator(parameter: impl Into<String>, source: ComparatorError) -> Self {
        let parameter = parameter.into();
        match source {
            ComparatorError::Unsupported { constraint } => Self::UnsupportedConstraint {
                parameter,
                constraint,
            },
            source => Self::Violation { parameter, source },
        }
    }
}

// ============================================================================
// PolicyError
// ============================================================================

/// Errors produced by the policy evaluation pipeline.
///
/// Each variant corresponds to one stage; the first failing stage aborts
/// evaluation and its error is returned unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// Only allow rules are evaluated.
    #[error("rule effect must be ALLOW, got {effect}")]
    RuleNotAllow {
        /// The rule's effect.
        effect: Effect,
    },

    /// The resource path is not `chain.protocol[.function]`.
    #[error("invalid resource format {resource:?}: {reason}")]
    BadResourceFormat {
        /// The raw resource string.
        resource: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The resource names a different chain than this engine serves.
    #[error("resource chain {actual} does not match engine chain {expected}")]
    ChainMismatch {
        /// The engine's chain id.
        expected: String,
        /// The chain id from the resource.
        actual: String,
    },

    /// The transaction could not be decoded.
    #[error("failed to decode transaction: {0}")]
    Decode(#[from] DecodeError),

    /// The transaction does not contain exactly one message.
    #[error("expected exactly one message, found {count}")]
    MessageCountNotOne {
        /// Number of messages found.
        count: usize,
    },

    /// The message type is not registered for this chain.
    #[error(transparent)]
    UnsupportedMessage(#[from] UnsupportedMessage),

    /// The resource's protocol has no expected message kind.
    #[error("unsupported protocol: {protocol}")]
    UnsupportedProtocol {
        /// The protocol id from the resource.
        protocol: String,
    },

    /// The message kind is not the one the resource's protocol expects.
    #[error("resource protocol {protocol} expects {expected} message, got {actual}")]
    ResourceMessageMismatch {
        /// The protocol id from the resource.
        protocol: String,
        /// The kind configured for the protocol.
        expected: MessageKind,
        /// The kind detected in the transaction.
        actual: MessageKind,
    },

    /// Target validation failed.
    #[error("target validation failed: {0}")]
    Target(#[from] TargetError),

    /// A value could not be extracted from the message.
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// A parameter constraint failed.
    #[error("constraint validation failed: {0}")]
    Constraint(#[from] ConstraintError),
}

impl PolicyError {
    /// Create a `BadResourceFormat` error.
    #[must_use]
    pub fn bad_resource(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadResourceFormat {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the pipeline stage that produced this error.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::RuleNotAllow { .. } => "effect",
            Self::BadResourceFormat { .. } | Self::ChainMismatch { .. } => "resource",
            Self::Decode(_) => "decode",
            Self::MessageCountNotOne { .. } => "message_count",
            Self::UnsupportedMessage(_) => "message_type",
            Self::UnsupportedProtocol { .. } | Self::ResourceMessageMismatch { .. } => {
                "compatibility"
            }
            Self::Target(_) => "target",
            Self::Extract(_) => "extract",
            Self::Constraint(_) => "parameters",
        }
    }

    /// Returns `true` if the error is a decision against the transaction,
    /// as opposed to a rule or engine configuration problem.
    #[must_use]
    pub const fn is_denial(&self) -> bool {
        !matches!(
            self,
            Self::Constraint(
                ConstraintError::UnsupportedConstraint { .. }
                    | ConstraintError::UnsupportedValueType { .. }
            ) | Self::Target(TargetError::UnsupportedTargetType)
        )
    }
}

// ============================================================================
// SignatureError
// ============================================================================

/// Errors that can occur while attaching a signature and hashing the transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// Exactly one signature is required.
    #[error("expected exactly one signature, got {count}")]
    WrongSignatureCount {
        /// Number of signatures supplied.
        count: usize,
    },

    /// The unsigned transaction could not be decoded.
    #[error("failed to decode unsigned transaction: {0}")]
    Decode(#[from] DecodeError),

    /// The transaction has no signer info to bind the signature to.
    #[error("transaction has no signer info")]
    MissingSignerInfo,

    /// A signature component is not valid hex.
    #[error("invalid hex in {field}: {context}")]
    InvalidHex {
        /// Which component failed (`r`, `s`, `recovery_id`).
        field: &'static str,
        /// Decoder context.
        context: String,
    },

    /// R did not decode to 32 bytes.
    #[error("invalid R length: expected 32 bytes, got {len}")]
    InvalidRLength {
        /// Decoded length.
        len: usize,
    },

    /// S did not decode to 32 bytes.
    #[error("invalid S length: expected 32 bytes, got {len}")]
    InvalidSLength {
        /// Decoded length.
        len: usize,
    },

    /// S is zero or not below the curve order.
    #[error("S is out of range [1, N)")]
    SOutOfRange,
}

impl SignatureError {
    /// Create an `InvalidHex` error.
    #[must_use]
    pub fn invalid_hex(field: &'static str, context: impl Into<String>) -> Self {
        Self::InvalidHex {
            field,
            context: context.into(),
        }
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for the expected schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but is inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong with it.
        reason: String,
    },

    /// No chain integration exists for the requested id.
    #[error("unknown chain: {chain}")]
    UnknownChain {
        /// The requested chain id.
        chain: String,
    },
}

impl ConfigError {
    /// Create an `InvalidConfiguration` error.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create an `UnknownChain` error.
    #[must_use]
    pub fn unknown_chain(chain: impl Into<String>) -> Self {
        Self::UnknownChain {
            chain: chain.into(),
        }
    }
}

/// Result alias for policy evaluation.
pub type Result<T, E = PolicyError> = std::result::Result<T, E>;
