//! # recipe-chain
//!
//! Cosmos-family transaction handling for the recipe policy engine.
//!
//! This crate knows the wire format: it decodes raw `TxRaw` bytes, maps
//! message type tags to semantic kinds, unpacks message payloads, extracts
//! sender addresses and attaches finished signatures. It makes no policy
//! decisions; that is `recipe-policy`'s job.
//!
//! ## Modules
//!
//! - [`proto`] - Hand-declared protobuf wire types
//! - [`decoder`] - Size-bounded transaction decoder
//! - [`registry`] - Message type tag to [`MessageKind`](recipe_core::MessageKind) registry
//! - [`message`] - Unpacking and field access for send and deposit messages
//! - [`sender`] - Per-kind sender-extraction strategies
//! - [`descriptor`] - Immutable per-chain configuration
//! - [`chains`] - Built-in descriptors (Cosmos Hub, THORChain, MAYAChain)
//! - [`finalizer`] - Low-S canonicalization, signature attachment and hashing
//!
//! ## Example
//!
//! ```rust
//! use prost::Message;
//! use recipe_chain::chains;
//! use recipe_chain::message::CosmosMessage;
//! use recipe_chain::proto::{Any, AuthInfo, MsgSend, SignerInfo, TxBody, TxRaw, MSG_SEND_TYPE_URL};
//!
//! let send = MsgSend {
//!     from_address: "cosmos1from".to_string(),
//!     to_address: "cosmos1to".to_string(),
//!     amount: Vec::new(),
//! };
//! let body = TxBody {
//!     messages: vec![Any::pack(MSG_SEND_TYPE_URL, &send)],
//!     ..TxBody::default()
//! };
//! let auth_info = AuthInfo {
//!     signer_infos: vec![SignerInfo::default()],
//!     fee: None,
//! };
//! let raw = TxRaw {
//!     body_bytes: body.encode_to_vec(),
//!     auth_info_bytes: auth_info.encode_to_vec(),
//!     signatures: Vec::new(),
//! }
//! .encode_to_vec();
//!
//! let cosmos = chains::cosmos_hub().unwrap();
//! let tx = cosmos.decode(&raw).unwrap();
//! let any = tx.single_message().unwrap();
//! let kind = cosmos.registry().lookup(&any.type_url).unwrap();
//! let message = CosmosMessage::unpack(kind, any).unwrap();
//!
//! assert_eq!(cosmos.extract_sender(&message).unwrap(), "cosmos1from");
//! ```
//!
//! ## Crate Features
//!
//! - `mock` - Enable the [`fixtures`] transaction builder for use in other crates' tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod chains;
pub mod decoder;
pub mod descriptor;
pub mod finalizer;
pub mod message;
pub mod proto;
pub mod registry;
pub mod sender;

#[cfg(any(test, feature = "mock"))]
pub mod fixtures;

pub use decoder::{DecodedTransaction, TxDecoder, MAX_TX_SIZE};
pub use descriptor::{ChainDescriptor, ChainDescriptorBuilder};
pub use finalizer::{compute_tx_hash, sign_transaction, SignedTransaction};
pub use message::CosmosMessage;
pub use registry::MessageTypeRegistry;
pub use sender::{DefaultSenderExtractor, SenderExtractor, SenderStrategy};
