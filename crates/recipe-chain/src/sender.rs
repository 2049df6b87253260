//! Sender-address extraction.
//!
//! "Who sent this" is not encoded the same way for every message kind: a bank
//! send carries a formatted `from_address`, while a deposit carries the
//! signer's raw address bytes that must be re-encoded with the chain's bech32
//! prefix.
//!
//! The [`SenderExtractor`] trait is the seam a chain integration overrides;
//! [`DefaultSenderExtractor`] is a per-kind table of [`SenderStrategy`]
//! values selected once at construction.
//!
//! # Example
//!
//! ```
//! use recipe_chain::message::CosmosMessage;
//! use recipe_chain::proto::MsgDeposit;
//! use recipe_chain::sender::{DefaultSenderExtractor, SenderExtractor};
//!
//! let deposit = CosmosMessage::Deposit(MsgDeposit {
//!     coins: Vec::new(),
//!     memo: String::new(),
//!     signer: vec![0u8; 20],
//! });
//!
//! let sender = DefaultSenderExtractor::new().extract(&deposit, "thor").unwrap();
//! assert!(sender.starts_with("thor1"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use bech32::{Bech32, Hrp};
use recipe_core::{ExtractError, MessageKind};

use crate::message::CosmosMessage;

/// Extracts the sender address of an unpacked message.
///
/// Implementations must be `Send + Sync`; a descriptor holding one is shared
/// across concurrent evaluations.
pub trait SenderExtractor: Send + Sync + fmt::Debug {
    /// Returns the sender of `message` on a chain using address `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] if the sender cannot be determined.
    fn extract(&self, message: &CosmosMessage, prefix: &str) -> Result<String, ExtractError>;
}

/// How the sender is read from a message of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderStrategy {
    /// Use the literal `from_address` field of a send.
    FromAddress,
    /// Encode the deposit's raw signer bytes with the chain prefix.
    Bech32Signer,
}

impl SenderStrategy {
    fn apply(self, message: &CosmosMessage, prefix: &str) -> Result<String, ExtractError> {
        match (self, message) {
            (Self::FromAddress, CosmosMessage::Send(send)) => Ok(send.from_address.clone()),
            (Self::Bech32Signer, CosmosMessage::Deposit(deposit)) => {
                encode_address(prefix, &deposit.signer)
            }
            (_, other) => Err(ExtractError::unsupported_parameter("sender", other.kind())),
        }
    }
}

/// The default per-kind sender strategy table.
///
/// `Send` reads `from_address`, `Deposit` bech32-encodes the signer bytes.
/// Kinds with no entry (including `Unknown`) have no sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSenderExtractor {
    strategies: BTreeMap<MessageKind, SenderStrategy>,
}

impl Default for DefaultSenderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultSenderExtractor {
    /// Create the default table.
    #[must_use]
    pub fn new() -> Self {
        let mut strategies = BTreeMap::new();
        strategies.insert(MessageKind::Send, SenderStrategy::FromAddress);
        strategies.insert(MessageKind::Deposit, SenderStrategy::Bech32Signer);
        Self { strategies }
    }

    /// Replace the strategy for `kind`.
    #[must_use]
    pub fn with_strategy(mut self, kind: MessageKind, strategy: SenderStrategy) -> Self {
        self.strategies.insert(kind, strategy);
        self
    }

    /// The strategy selected for `kind`, if any.
    #[must_use]
    pub fn strategy(&self, kind: MessageKind) -> Option<SenderStrategy> {
        self.strategies.get(&kind).copied()
    }
}

impl SenderExtractor for DefaultSenderExtractor {
    fn extract(&self, message: &CosmosMessage, prefix: &str) -> Result<String, ExtractError> {
        let kind = message.kind();
        self.strategy(kind)
            .ok_or_else(|| ExtractError::unsupported_parameter("sender", kind))?
            .apply(message, prefix)
    }
}

/// Encode raw address bytes as a bech32 address with `prefix`.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidSignerAddress`] if the bytes are empty,
/// the prefix is not a valid human-readable part, or encoding fails.
pub fn encode_address(prefix: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    if bytes.is_empty() {
        return Err(ExtractError::InvalidSignerAddress {
            context: "signer is empty".to_string(),
        });
    }

    let hrp = Hrp::parse(prefix).map_err(|e| ExtractError::InvalidSignerAddress {
        context: format!("invalid prefix {prefix:?}: {e}"),
    })?;

    bech32::encode::<Bech32>(hrp, bytes).map_err(|e| ExtractError::InvalidSignerAddress {
        context: e.to_string(),
    })
}
