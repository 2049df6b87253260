//! Message-type registry for a chain integration.
//!
//! The [`MessageTypeRegistry`] maps a wire-format type tag (the `type_url` of
//! a packed message) to its semantic [`MessageKind`]. It is built once when a
//! chain descriptor is constructed and is read-only afterwards.
//!
//! Unknown tags are an explicit [`UnsupportedMessage`] error; they are never
//! mapped to [`MessageKind::Unknown`] silently.
//!
//! # Example
//!
//! ```
//! use recipe_chain::registry::MessageTypeRegistry;
//! use recipe_core::MessageKind;
//!
//! let mut registry = MessageTypeRegistry::standard();
//! registry.register("/types.MsgDeposit", MessageKind::Deposit);
//!
//! assert_eq!(registry.lookup("/cosmos.bank.v1beta1.MsgSend"), Ok(MessageKind::Send));
//! assert_eq!(registry.lookup("/types.MsgDeposit"), Ok(MessageKind::Deposit));
//! assert!(registry.lookup("/cosmos.staking.v1beta1.MsgDelegate").is_err());
//! ```

use std::collections::BTreeMap;

use recipe_core::{MessageKind, UnsupportedMessage};

use crate::proto::MSG_SEND_TYPE_URL;

/// Mapping from message type tags to message kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTypeRegistry {
    entries: BTreeMap<String, MessageKind>,
}

impl MessageTypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry with the standard bank send message registered.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(MSG_SEND_TYPE_URL, MessageKind::Send);
        registry
    }

    /// Register a type tag. A tag registered twice keeps the last kind.
    pub fn register(&mut self, type_url: impl Into<String>, kind: MessageKind) {
        self.entries.insert(type_url.into(), kind);
    }

    /// Look up the kind of a type tag.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedMessage`] if the tag is not registered.
    pub fn lookup(&self, type_url: &str) -> Result<MessageKind, UnsupportedMessage> {
        self.entries
            .get(type_url)
            .copied()
            .ok_or_else(|| UnsupportedMessage::new(type_url))
    }

    /// Returns `true` if the tag is registered.
    #[must_use]
    pub fn contains(&self, type_url: &str) -> bool {
        self.entries.contains_key(type_url)
    }

    /// Iterate over `(type_url, kind)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MessageKind)> {
        self.entries.iter().map(|(tag, kind)| (tag.as_str(), *kind))
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no tag is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
