//! Built-in chain descriptors.
//!
//! | id | prefix | protocols |
//! |---|---|---|
//! | `cosmos` | `cosmos` | `atom` (send) |
//! | `thorchain` | `thor` | `rune` (send), `thorchain_swap` (deposit) |
//! | `mayachain` | `maya` | `cacao` (send), `mayachain_swap` (deposit) |
//!
//! THORChain and MAYAChain additionally register `/types.MsgDeposit`.

use recipe_core::{ConfigError, MessageKind};

use crate::descriptor::ChainDescriptor;
use crate::proto::MSG_DEPOSIT_TYPE_URL;

/// Identifiers of the built-in chains, in listing order.
pub const BUILTIN_CHAINS: [&str; 3] = ["cosmos", "thorchain", "mayachain"];

/// The Cosmos Hub.
///
/// # Errors
///
/// Never fails for the built-in parameters; the `Result` carries the
/// builder's validation.
pub fn cosmos_hub() -> Result<ChainDescriptor, ConfigError> {
    ChainDescriptor::builder("cosmos", "Cosmos Hub", "cosmos")
        .protocol("atom", MessageKind::Send)
        .build()
}

/// THORChain.
///
/// # Errors
///
/// See [`cosmos_hub`].
pub fn thorchain() -> Result<ChainDescriptor, ConfigError> {
    ChainDescriptor::builder("thorchain", "THORChain", "thor")
        .message(MSG_DEPOSIT_TYPE_URL, MessageKind::Deposit)
        .protocol("rune", MessageKind::Send)
        .protocol("thorchain_swap", MessageKind::Deposit)
        .build()
}

/// MAYAChain.
///
/// # Errors
///
/// See [`cosmos_hub`].
pub fn mayachain() -> Result<ChainDescriptor, ConfigError> {
    ChainDescriptor::builder("mayachain", "MAYAChain", "maya")
        .message(MSG_DEPOSIT_TYPE_URL, MessageKind::Deposit)
        .protocol("cacao", MessageKind::Send)
        .protocol("mayachain_swap", MessageKind::Deposit)
        .build()
}

/// Look up a built-in descriptor by id.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownChain`] if `id` is not built in.
pub fn by_id(id: &str) -> Result<ChainDescriptor, ConfigError> {
    match id {
        "cosmos" => cosmos_hub(),
        "thorchain" => thorchain(),
        "mayachain" => mayachain(),
        other => Err(ConfigError::unknown_chain(other)),
    }
}

/// All built-in descriptors, in [`BUILTIN_CHAINS`] order.
///
/// # Errors
///
/// See [`cosmos_hub`].
pub fn all() -> Result<Vec<ChainDescriptor>, ConfigError> {
    BUILTIN_CHAINS.iter().map(|id| by_id(id)).collect()
}
