//! Transaction fixtures for tests and benchmarks.
//!
//! [`TxBuilder`] assembles encoded `TxRaw` bytes from messages, so tests can
//! describe a transaction by what it does rather than by its wire bytes.
//!
//! Available in this crate's tests and, with the `mock` feature, to other
//! crates.
//!
//! # Example
//!
//! ```
//! use recipe_chain::fixtures::{asset, coin, deposit_coin, TxBuilder};
//!
//! let send = TxBuilder::new()
//!     .send("cosmos1from", "cosmos1to", vec![coin("uatom", "1000000")])
//!     .memo("payroll")
//!     .build();
//!
//! let swap = TxBuilder::new()
//!     .deposit(vec![deposit_coin(asset("THOR", "RUNE"), "500")], "=:BTC.BTC:bc1q", vec![1; 20])
//!     .build();
//!
//! assert!(!send.is_empty() && !swap.is_empty());
//! ```

use prost::Message;

use crate::proto::{
    Any, Asset, AuthInfo, Coin, DepositCoin, Fee, ModeInfo, ModeInfoSingle, MsgDeposit, MsgSend,
    Secp256k1PubKey, SignerInfo, TxBody, TxRaw, MSG_DEPOSIT_TYPE_URL, MSG_SEND_TYPE_URL,
    SECP256K1_PUBKEY_TYPE_URL,
};

/// `SIGN_MODE_DIRECT`.
const SIGN_MODE_DIRECT: i32 = 1;

/// A placeholder compressed public key.
const FIXTURE_PUBKEY: [u8; 33] = [0x02; 33];

/// Build a bank coin.
#[must_use]
pub fn coin(denom: &str, amount: &str) -> Coin {
    Coin {
        denom: denom.to_string(),
        amount: amount.to_string(),
    }
}

/// Build an asset with the given chain and symbol; the ticker equals the symbol.
#[must_use]
pub fn asset(chain: &str, symbol: &str) -> Asset {
    Asset {
        chain: chain.to_string(),
        symbol: symbol.to_string(),
        ticker: symbol.to_string(),
        ..Asset::default()
    }
}

/// Build a deposit coin with 8 decimals.
#[must_use]
pub fn deposit_coin(asset: Asset, amount: &str) -> DepositCoin {
    DepositCoin {
        asset: Some(asset),
        amount: amount.to_string(),
        decimals: 8,
    }
}

/// Builder for encoded unsigned (or pre-signed) transactions.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    messages: Vec<Any>,
    memo: String,
    signer: bool,
    signatures: Vec<Vec<u8>>,
}

impl Default for TxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TxBuilder {
    /// An empty transaction with one signer info and no messages.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            memo: String::new(),
            signer: true,
            signatures: Vec::new(),
        }
    }

    /// Append a bank send.
    #[must_use]
    pub fn send(self, from: &str, to: &str, amount: Vec<Coin>) -> Self {
        let msg = MsgSend {
            from_address: from.to_string(),
            to_address: to.to_string(),
            amount,
        };
        self.message(Any::pack(MSG_SEND_TYPE_URL, &msg))
    }

    /// Append a deposit.
    #[must_use]
    pub fn deposit(self, coins: Vec<DepositCoin>, memo: &str, signer: Vec<u8>) -> Self {
        let msg = MsgDeposit {
            coins,
            memo: memo.to_string(),
            signer,
        };
        self.message(Any::pack(MSG_DEPOSIT_TYPE_URL, &msg))
    }

    /// Append an arbitrary packed message.
    #[must_use]
    pub fn message(mut self, any: Any) -> Self {
        self.messages.push(any);
        self
    }

    /// Set the transaction memo.
    #[must_use]
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Leave auth-info without any signer info.
    #[must_use]
    pub fn without_signer(mut self) -> Self {
        self.signer = false;
        self
    }

    /// Attach a raw signature to the envelope.
    #[must_use]
    pub fn signature(mut self, signature: Vec<u8>) -> Self {
        self.signatures.push(signature);
        self
    }

    /// Encode the transaction.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let body = TxBody {
            messages: self.messages,
            memo: self.memo,
            timeout_height: 0,
            extension_options: Vec::new(),
            non_critical_extension_options: Vec::new(),
        };

        let signer_infos = if self.signer {
            vec![SignerInfo {
                public_key: Some(Any::pack(
                    SECP256K1_PUBKEY_TYPE_URL,
                    &Secp256k1PubKey {
                        key: FIXTURE_PUBKEY.to_vec(),
                    },
                )),
                mode_info: Some(ModeInfo {
                    single: Some(ModeInfoSingle {
                        mode: SIGN_MODE_DIRECT,
                    }),
                }),
                sequence: 0,
            }]
        } else {
            Vec::new()
        };

        let auth_info = AuthInfo {
            signer_infos,
            fee: Some(Fee {
                amount: vec![coin("uatom", "5000")],
                gas_limit: 200_000,
                payer: String::new(),
                granter: String::new(),
            }),
        };

        TxRaw {
            body_bytes: body.encode_to_vec(),
            auth_info_bytes: auth_info.encode_to_vec(),
            signatures: self.signatures,
        }
        .encode_to_vec()
    }
}
