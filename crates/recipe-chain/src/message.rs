//! Unpacking of packed messages into concrete message types.
//!
//! Once the registry has assigned a [`MessageKind`] to a message's type tag,
//! [`CosmosMessage::unpack`] decodes its payload into the matching wire type.
//! The accessors on [`CosmosMessage`] are the raw material for target
//! validation, parameter extraction and sender extraction.
//!
//! # Amounts
//!
//! Coin amounts travel as decimal strings. They are parsed into [`U256`];
//! anything that is not a non-empty run of ASCII digits fitting 256 bits is
//! [`ExtractError::MalformedAmount`].
//!
//! # Example
//!
//! ```
//! use recipe_chain::message::CosmosMessage;
//! use recipe_chain::proto::{Any, Coin, MsgSend, MSG_SEND_TYPE_URL};
//! use recipe_core::{MessageKind, U256};
//!
//! let send = MsgSend {
//!     from_address: "cosmos1from".to_string(),
//!     to_address: "cosmos1to".to_string(),
//!     amount: vec![Coin { denom: "uatom".to_string(), amount: "1000000".to_string() }],
//! };
//! let any = Any::pack(MSG_SEND_TYPE_URL, &send);
//!
//! let message = CosmosMessage::unpack(MessageKind::Send, &any).unwrap();
//! assert_eq!(message.recipient(), Some("cosmos1to"));
//! assert_eq!(message.amount().unwrap(), U256::from(1_000_000u64));
//! ```

use prost::Message;
use recipe_core::{ExtractError, MessageKind, U256};

use crate::proto::{Any, DepositCoin, MsgDeposit, MsgSend};

/// A message unpacked according to its registered kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CosmosMessage {
    /// Standard bank send.
    Send(MsgSend),
    /// THORChain-style deposit.
    Deposit(MsgDeposit),
    /// A registered tag the engine does not reason about.
    Unknown {
        /// The message type tag.
        type_url: String,
    },
}

impl CosmosMessage {
    /// Decode `any` as the wire type for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MalformedMessage`] if the payload does not
    /// decode as `kind`'s wire type.
    pub fn unpack(kind: MessageKind, any: &Any) -> Result<Self, ExtractError> {
        let malformed = |e: prost::DecodeError| ExtractError::MalformedMessage {
            type_url: any.type_url.clone(),
            context: e.to_string(),
        };

        match kind {
            MessageKind::Send => MsgSend::decode(any.value.as_slice())
                .map(Self::Send)
                .map_err(malformed),
            MessageKind::Deposit => MsgDeposit::decode(any.value.as_slice())
                .map(Self::Deposit)
                .map_err(malformed),
            MessageKind::Unknown => Ok(Self::Unknown {
                type_url: any.type_url.clone(),
            }),
        }
    }

    /// The message kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Send(_) => MessageKind::Send,
            Self::Deposit(_) => MessageKind::Deposit,
            Self::Unknown { .. } => MessageKind::Unknown,
        }
    }

    /// The recipient address. Only send messages have one.
    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        match self {
            Self::Send(send) => Some(send.to_address.as_str()),
            Self::Deposit(_) | Self::Unknown { .. } => None,
        }
    }

    /// Magnitude of the message's single coin.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::MultiCoinUnsupported`] if more than one coin is present
    /// - [`ExtractError::MissingCoin`] if none is present
    /// - [`ExtractError::MalformedAmount`] if the amount does not parse
    /// - [`ExtractError::UnsupportedParameter`] for unknown messages
    pub fn amount(&self) -> Result<U256, ExtractError> {
        let raw = match self {
            Self::Send(send) => single(&send.amount)?.amount.as_str(),
            Self::Deposit(deposit) => single(&deposit.coins)?.amount.as_str(),
            Self::Unknown { .. } => {
                return Err(ExtractError::unsupported_parameter(
                    "amount",
                    MessageKind::Unknown,
                ))
            }
        };
        parse_amount(raw)
    }

    /// Denomination of a send message's single coin.
    ///
    /// # Errors
    ///
    /// Coin-count errors as for [`amount`](Self::amount), or
    /// [`ExtractError::UnsupportedParameter`] for non-send messages.
    pub fn denom(&self) -> Result<&str, ExtractError> {
        match self {
            Self::Send(send) => Ok(single(&send.amount)?.denom.as_str()),
            other => Err(ExtractError::unsupported_parameter("denom", other.kind())),
        }
    }

    /// Asset of a deposit's single coin in `CHAIN.SYMBOL` notation.
    ///
    /// # Errors
    ///
    /// Coin-count errors as for [`amount`](Self::amount),
    /// [`ExtractError::MissingAssetInfo`] if the coin has no asset or the
    /// asset has no symbol, or [`ExtractError::UnsupportedParameter`] for
    /// non-deposit messages.
    pub fn from_asset(&self) -> Result<String, ExtractError> {
        match self {
            Self::Deposit(deposit) => asset_name(single(&deposit.coins)?),
            other => Err(ExtractError::unsupported_parameter(
                "from_asset",
                other.kind(),
            )),
        }
    }

    /// The deposit's own memo, if this is a deposit.
    #[must_use]
    pub fn deposit_memo(&self) -> Option<&str> {
        match self {
            Self::Deposit(deposit) => Some(deposit.memo.as_str()),
            Self::Send(_) | Self::Unknown { .. } => None,
        }
    }
}

/// Returns the only coin of `coins`.
fn single<T>(coins: &[T]) -> Result<&T, ExtractError> {
    match coins {
        [coin] => Ok(coin),
        [] => Err(ExtractError::MissingCoin),
        many => Err(ExtractError::MultiCoinUnsupported { count: many.len() }),
    }
}

fn asset_name(coin: &DepositCoin) -> Result<String, ExtractError> {
    let asset = coin.asset.as_ref().ok_or(ExtractError::MissingAssetInfo)?;

    if asset.symbol.is_empty() {
        return Err(ExtractError::MissingAssetInfo);
    }

    if asset.chain.is_empty() {
        Ok(asset.symbol.clone())
    } else {
        Ok(format!("{}.{}", asset.chain, asset.symbol))
    }
}

/// Parse a decimal amount string into a 256-bit magnitude.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedAmount`] unless `raw` is a non-empty
/// string of ASCII digits that fits in 256 bits.
pub fn parse_amount(raw: &str) -> Result<U256, ExtractError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExtractError::malformed_amount(raw));
    }
    U256::from_str_radix(raw, 10).map_err(|_| ExtractError::malformed_amount(raw))
}
