//! Protobuf wire types for Cosmos-family transactions.
//!
//! These are hand-declared `prost` messages, field-for-field compatible with
//! the upstream schemas:
//!
//! - `cosmos.tx.v1beta1`: [`TxRaw`], [`TxBody`], [`AuthInfo`], [`SignerInfo`],
//!   [`ModeInfo`], [`Fee`]
//! - `google.protobuf`: [`Any`]
//! - `cosmos.base.v1beta1`: [`Coin`]
//! - `cosmos.bank.v1beta1`: [`MsgSend`]
//! - THORChain / MAYAChain `types` and `common`: [`MsgDeposit`], [`DepositCoin`], [`Asset`]
//!
//! Only the fields the engine reads are declared; unknown fields are skipped
//! by the decoder, and [`TxRaw`] keeps body and auth-info as the original
//! bytes so re-encoding a signed transaction never alters them.

use prost::Message;

/// Type URL of the standard bank send message.
pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

/// Type URL of the THORChain / MAYAChain deposit message.
pub const MSG_DEPOSIT_TYPE_URL: &str = "/types.MsgDeposit";

/// Type URL of the secp256k1 public key used in signer infos.
pub const SECP256K1_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";

/// `google.protobuf.Any`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct Any {
    /// Type tag, e.g. `/cosmos.bank.v1beta1.MsgSend`.
    #[prost(string, tag = "1")]
    pub type_url: String,
    /// Encoded message payload.
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

impl Any {
    /// Pack a message under the given type URL.
    #[must_use]
    pub fn pack<M: Message>(type_url: &str, message: &M) -> Self {
        Self {
            type_url: type_url.to_string(),
            value: message.encode_to_vec(),
        }
    }
}

/// `cosmos.tx.v1beta1.TxRaw`: the signed-transaction envelope.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct TxRaw {
    /// Encoded [`TxBody`].
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: Vec<u8>,
    /// Encoded [`AuthInfo`].
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: Vec<u8>,
    /// One signature per signer info.
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub signatures: Vec<Vec<u8>>,
}

/// `cosmos.tx.v1beta1.TxBody`.
#[derive(Clone, PartialEq, Message)]
pub struct TxBody {
    /// Messages in execution order.
    #[prost(message, repeated, tag = "1")]
    pub messages: Vec<Any>,
    /// Transaction-level memo.
    #[prost(string, tag = "2")]
    pub memo: String,
    /// Block height after which the transaction is invalid.
    #[prost(uint64, tag = "3")]
    pub timeout_height: u64,
    /// Extension options that nodes must understand.
    #[prost(message, repeated, tag = "1023")]
    pub extension_options: Vec<Any>,
    /// Extension options nodes may ignore.
    #[prost(message, repeated, tag = "2047")]
    pub non_critical_extension_options: Vec<Any>,
}

/// `cosmos.tx.v1beta1.AuthInfo`.
#[derive(Clone, PartialEq, Message)]
pub struct AuthInfo {
    /// Signer metadata, one per required signer.
    #[prost(message, repeated, tag = "1")]
    pub signer_infos: Vec<SignerInfo>,
    /// Fee paid for the transaction.
    #[prost(message, optional, tag = "2")]
    pub fee: Option<Fee>,
}

/// `cosmos.tx.v1beta1.SignerInfo`.
#[derive(Clone, PartialEq, Message)]
pub struct SignerInfo {
    /// The signer's public key.
    #[prost(message, optional, tag = "1")]
    pub public_key: Option<Any>,
    /// Signing mode.
    #[prost(message, optional, tag = "2")]
    pub mode_info: Option<ModeInfo>,
    /// Account sequence.
    #[prost(uint64, tag = "3")]
    pub sequence: u64,
}

/// `cosmos.tx.v1beta1.ModeInfo`, single-signer arm only.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct ModeInfo {
    /// Single-signer mode.
    #[prost(message, optional, tag = "1")]
    pub single: Option<ModeInfoSingle>,
}

/// `cosmos.tx.v1beta1.ModeInfo.Single`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct ModeInfoSingle {
    /// `cosmos.tx.signing.v1beta1.SignMode` value (1 = DIRECT).
    #[prost(int32, tag = "1")]
    pub mode: i32,
}

/// `cosmos.tx.v1beta1.Fee`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct Fee {
    /// Fee amount.
    #[prost(message, repeated, tag = "1")]
    pub amount: Vec<Coin>,
    /// Gas limit.
    #[prost(uint64, tag = "2")]
    pub gas_limit: u64,
    /// Fee payer address.
    #[prost(string, tag = "3")]
    pub payer: String,
    /// Fee granter address.
    #[prost(string, tag = "4")]
    pub granter: String,
}

/// `cosmos.crypto.secp256k1.PubKey`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct Secp256k1PubKey {
    /// 33-byte compressed public key.
    #[prost(bytes = "vec", tag = "1")]
    pub key: Vec<u8>,
}

/// `cosmos.base.v1beta1.Coin`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct Coin {
    /// Denomination, e.g. `uatom`.
    #[prost(string, tag = "1")]
    pub denom: String,
    /// Decimal integer amount.
    #[prost(string, tag = "2")]
    pub amount: String,
}

/// `cosmos.bank.v1beta1.MsgSend`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct MsgSend {
    /// Sender address.
    #[prost(string, tag = "1")]
    pub from_address: String,
    /// Recipient address.
    #[prost(string, tag = "2")]
    pub to_address: String,
    /// Coins sent.
    #[prost(message, repeated, tag = "3")]
    pub amount: Vec<Coin>,
}

/// `common.Asset`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct Asset {
    /// Native chain of the asset, e.g. `BTC`.
    #[prost(string, tag = "1")]
    pub chain: String,
    /// Asset symbol, e.g. `BTC` or `USDC-0XA0B8...`.
    #[prost(string, tag = "2")]
    pub symbol: String,
    /// Ticker, e.g. `USDC`.
    #[prost(string, tag = "3")]
    pub ticker: String,
    /// Synthetic asset flag.
    #[prost(bool, tag = "4")]
    pub synth: bool,
    /// Trade asset flag.
    #[prost(bool, tag = "5")]
    pub trade: bool,
    /// Secured asset flag.
    #[prost(bool, tag = "6")]
    pub secured: bool,
}

/// `common.Coin`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct DepositCoin {
    /// The coin's asset.
    #[prost(message, optional, tag = "1")]
    pub asset: Option<Asset>,
    /// Decimal integer amount.
    #[prost(string, tag = "2")]
    pub amount: String,
    /// Asset decimals.
    #[prost(int64, tag = "3")]
    pub decimals: i64,
}

/// `types.MsgDeposit`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct MsgDeposit {
    /// Coins deposited.
    #[prost(message, repeated, tag = "1")]
    pub coins: Vec<DepositCoin>,
    /// Deposit memo, e.g. `=:BTC.BTC:bc1...`.
    #[prost(string, tag = "2")]
    pub memo: String,
    /// Raw signer address bytes.
    #[prost(bytes = "vec", tag = "3")]
    pub signer: Vec<u8>,
}
