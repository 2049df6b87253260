//! Chain descriptors.
//!
//! A [`ChainDescriptor`] is everything the engine knows about one chain
//! integration: its identifier, bech32 address prefix, message-type registry,
//! built-in protocol map and sender-extraction strategy. It is built once and
//! never mutated; cloning shares the underlying data.
//!
//! # Example
//!
//! ```
//! use recipe_chain::descriptor::ChainDescriptor;
//! use recipe_core::MessageKind;
//!
//! let descriptor = ChainDescriptor::builder("thorchain", "THORChain", "thor")
//!     .protocol("rune", MessageKind::Send)
//!     .protocol("thorchain_swap", MessageKind::Deposit)
//!     .message("/types.MsgDeposit", MessageKind::Deposit)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(descriptor.expected_kind("thorchain_swap"), Some(MessageKind::Deposit));
//! assert_eq!(
//!     descriptor.registry().lookup("/types.MsgDeposit"),
//!     Ok(MessageKind::Deposit)
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bech32::Hrp;
use recipe_core::{ConfigError, DecodeError, ExtractError, MessageKind};

use crate::decoder::{DecodedTransaction, TxDecoder};
use crate::message::CosmosMessage;
use crate::registry::MessageTypeRegistry;
use crate::sender::{DefaultSenderExtractor, SenderExtractor};

/// Immutable description of a chain integration.
#[derive(Clone)]
pub struct ChainDescriptor {
    inner: Arc<DescriptorInner>,
}

struct DescriptorInner {
    id: String,
    name: String,
    prefix: String,
    protocols: BTreeMap<String, MessageKind>,
    registry: MessageTypeRegistry,
    sender: Box<dyn SenderExtractor>,
    decoder: TxDecoder,
}

impl fmt::Debug for ChainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainDescriptor")
            .field("id", &self.inner.id)
            .field("prefix", &self.inner.prefix)
            .field("protocols", &self.inner.protocols)
            .field("registry", &self.inner.registry)
            .field("sender", &self.inner.sender)
            .finish_non_exhaustive()
    }
}

impl ChainDescriptor {
    /// Start building a descriptor.
    #[must_use]
    pub fn builder(
        id: impl Into<String>,
        name: impl Into<String>,
        prefix: impl Into<String>,
    ) -> ChainDescriptorBuilder {
        ChainDescriptorBuilder {
            id: id.into(),
            name: name.into(),
            prefix: prefix.into(),
            protocols: BTreeMap::new(),
            registry: MessageTypeRegistry::standard(),
            sender: None,
        }
    }

    /// Chain identifier, as used in resource paths.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Human-readable chain name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Bech32 address prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// The chain's message-type registry.
    #[must_use]
    pub fn registry(&self) -> &MessageTypeRegistry {
        &self.inner.registry
    }

    /// The built-in protocol id to message kind map.
    #[must_use]
    pub fn default_protocol_kinds(&self) -> &BTreeMap<String, MessageKind> {
        &self.inner.protocols
    }

    /// The message kind the built-in map expects for `protocol`.
    #[must_use]
    pub fn expected_kind(&self, protocol: &str) -> Option<MessageKind> {
        self.inner.protocols.get(protocol).copied()
    }

    /// Returns `true` if `protocol` is one of this chain's protocols.
    #[must_use]
    pub fn supports_protocol(&self, protocol: &str) -> bool {
        self.inner.protocols.contains_key(protocol)
    }

    /// Decode raw transaction bytes with this chain's decoder.
    ///
    /// # Errors
    ///
    /// Propagates the decoder's [`DecodeError`].
    pub fn decode(&self, raw: &[u8]) -> Result<DecodedTransaction, DecodeError> {
        self.inner.decoder.decode(raw)
    }

    /// Extract the sender of an unpacked message with this chain's strategy.
    ///
    /// # Errors
    ///
    /// Propagates the extractor's [`ExtractError`].
    pub fn extract_sender(&self, message: &CosmosMessage) -> Result<String, ExtractError> {
        self.inner.sender.extract(message, &self.inner.prefix)
    }
}

/// Builder for [`ChainDescriptor`].
#[derive(Debug)]
pub struct ChainDescriptorBuilder {
    id: String,
    name: String,
    prefix: String,
    protocols: BTreeMap<String, MessageKind>,
    registry: MessageTypeRegistry,
    sender: Option<Box<dyn SenderExtractor>>,
}

impl ChainDescriptorBuilder {
    /// Declare a protocol and the message kind it expects.
    #[must_use]
    pub fn protocol(mut self, id: impl Into<String>, kind: MessageKind) -> Self {
        self.protocols.insert(id.into(), kind);
        self
    }

    /// Register an additional message type tag.
    #[must_use]
    pub fn message(mut self, type_url: impl Into<String>, kind: MessageKind) -> Self {
        self.registry.register(type_url, kind);
        self
    }

    /// Override the default sender extractor.
    #[must_use]
    pub fn sender_extractor(mut self, extractor: impl SenderExtractor + 'static) -> Self {
        self.sender = Some(Box::new(extractor));
        self
    }

    /// Validate and build the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] if the id is empty, the
    /// prefix is not a valid bech32 human-readable part, or no protocol is
    /// declared.
    pub fn build(self) -> Result<ChainDescriptor, ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::invalid("chain id must not be empty"));
        }

        if self.id.contains('.') {
            return Err(ConfigError::invalid(format!(
                "chain id {:?} must not contain '.'",
                self.id
            )));
        }

        Hrp::parse(&self.prefix).map_err(|e| {
            ConfigError::invalid(format!("invalid address prefix {:?}: {e}", self.prefix))
        })?;

        if self.protocols.is_empty() {
            return Err(ConfigError::invalid(format!(
                "chain {} declares no protocols",
                self.id
            )));
        }

        Ok(ChainDescriptor {
            inner: Arc::new(DescriptorInner {
                id: self.id,
                name: self.name,
                prefix: self.prefix,
                protocols: self.protocols,
                registry: self.registry,
                sender: self
                    .sender
                    .unwrap_or_else(|| Box::new(DefaultSenderExtractor::new())),
                decoder: TxDecoder::new(),
            }),
        })
    }
}
