//! Transaction decoder for Cosmos-family transactions.
//!
//! [`TxDecoder::decode`] turns raw `TxRaw` bytes into a [`DecodedTransaction`]:
//! the body's messages (still packed, type tag + payload), the memo, and the
//! signer infos from auth-info.
//!
//! # Size Ceiling
//!
//! Input larger than [`MAX_TX_SIZE`] is rejected with
//! [`DecodeError::TooLarge`] before any parsing is attempted, which bounds
//! the work done per call.
//!
//! # Example
//!
//! ```
//! use recipe_chain::decoder::{TxDecoder, MAX_TX_SIZE};
//! use recipe_core::DecodeError;
//!
//! let decoder = TxDecoder::new();
//!
//! assert_eq!(decoder.decode(&[]), Err(DecodeError::Empty));
//! assert!(matches!(
//!     decoder.decode(&vec![0u8; MAX_TX_SIZE + 1]),
//!     Err(DecodeError::TooLarge { .. })
//! ));
//! ```

use prost::Message;
use recipe_core::DecodeError;

use crate::proto::{Any, AuthInfo, Fee, SignerInfo, TxBody, TxRaw};

/// Maximum accepted transaction size in bytes (32 KiB).
pub const MAX_TX_SIZE: usize = 32 * 1024;

/// A decoded transaction envelope.
///
/// Messages are kept packed; unpacking into a concrete message happens once
/// the message kind is known.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTransaction {
    /// Packed messages in body order.
    pub messages: Vec<Any>,
    /// Transaction-level memo.
    pub memo: String,
    /// Timeout height from the body.
    pub timeout_height: u64,
    /// Signer infos from auth-info.
    pub signer_infos: Vec<SignerInfo>,
    /// Fee from auth-info, if present.
    pub fee: Option<Fee>,
    raw: TxRaw,
}

impl DecodedTransaction {
    /// The raw envelope with the original body and auth-info bytes.
    #[must_use]
    pub const fn raw(&self) -> &TxRaw {
        &self.raw
    }

    /// Signatures currently attached to the envelope.
    #[must_use]
    pub fn signatures(&self) -> &[Vec<u8>] {
        &self.raw.signatures
    }

    /// Returns the only message, or the message count if there is not exactly one.
    ///
    /// # Errors
    ///
    /// Returns the actual message count when it differs from one.
    pub fn single_message(&self) -> Result<&Any, usize> {
        match self.messages.as_slice() {
            [message] => Ok(message),
            messages => Err(messages.len()),
        }
    }

    /// Consume the decoded transaction, returning the raw envelope.
    #[must_use]
    pub fn into_raw(self) -> TxRaw {
        self.raw
    }
}

/// Decoder for `cosmos.tx.v1beta1.TxRaw` bytes.
///
/// The decoder is stateless and `Send + Sync`; one instance can serve
/// concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct TxDecoder {
    max_size: usize,
}

impl Default for TxDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TxDecoder {
    /// Create a decoder with the standard [`MAX_TX_SIZE`] ceiling.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_size: MAX_TX_SIZE,
        }
    }

    /// The size ceiling in bytes.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    /// Decode raw transaction bytes.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::TooLarge`] if `raw` exceeds the ceiling
    /// - [`DecodeError::Empty`] if `raw` is empty
    /// - [`DecodeError::Malformed`] if the envelope, body or auth-info does not decode
    pub fn decode(&self, raw: &[u8]) -> Result<DecodedTransaction, DecodeError> {
        if raw.len() > self.max_size {
            return Err(DecodeError::TooLarge {
                size: raw.len(),
                max: self.max_size,
            });
        }

        if raw.is_empty() {
            return Err(DecodeError::Empty);
        }

        let tx_raw = TxRaw::decode(raw)
            .map_err(|e| DecodeError::malformed(format!("invalid TxRaw: {e}")))?;

        let body = TxBody::decode(tx_raw.body_bytes.as_slice())
            .map_err(|e| DecodeError::malformed(format!("invalid TxBody: {e}")))?;

        let auth_info = AuthInfo::decode(tx_raw.auth_info_bytes.as_slice())
            .map_err(|e| DecodeError::malformed(format!("invalid AuthInfo: {e}")))?;

        Ok(DecodedTransaction {
            messages: body.messages,
            memo: body.memo,
            timeout_height: body.timeout_height,
            signer_infos: auth_info.signer_infos,
            fee: auth_info.fee,
            raw: tx_raw,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

    use super::*;
    use crate::fixtures::{coin, TxBuilder};
    use crate::proto::MSG_SEND_TYPE_URL;
    use proptest::prelude::*;

    #[test]
    fn test_decode_send_transaction() {
        let bytes = TxBuilder::new()
            .send("cosmos1from", "cosmos1to", vec![coin("uatom", "1000000")])
            .memo("hello")
            .build();

        let tx = TxDecoder::new().decode(&bytes).unwrap();
        assert_eq!(tx.messages.len(), 1);
        assert_eq!(tx.messages[0].type_url, MSG_SEND_TYPE_URL);
        assert_eq!(tx.memo, "hello");
        assert_eq!(tx.signer_infos.len(), 1);
        assert!(tx.signatures().is_empty());
        assert!(tx.fee.is_some());
    }

    #[test]
    fn test_single_message() {
        let one = TxBuilder::new()
            .send("cosmos1from", "cosmos1to", vec![coin("uatom", "1")])
            .build();
        let tx = TxDecoder::new().decode(&one).unwrap();
        assert!(tx.single_message().is_ok());

        let two = TxBuilder::new()
            .send("cosmos1from", "cosmos1to", vec![coin("uatom", "1")])
            .send("cosmos1from", "cosmos1to", vec![coin("uatom", "2")])
            .build();
        let tx = TxDecoder::new().decode(&two).unwrap();
        assert_eq!(tx.single_message().unwrap_err(), 2);

        let none = TxBuilder::new().build();
        let tx = TxDecoder::new().decode(&none).unwrap();
        assert_eq!(tx.single_message().unwrap_err(), 0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(TxDecoder::new().decode(&[]), Err(DecodeError::Empty));
    }

    #[test]
    fn test_exactly_at_limit_is_parsed() {
        // 32 KiB of zeros is not too large; it fails as malformed instead
        let err = TxDecoder::new().decode(&vec![0u8; MAX_TX_SIZE]).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = TxDecoder::new().decode(&[0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
    }

    #[test]
    fn test_empty_body_has_no_messages() {
        // An all-default body encodes to zero bytes
        let raw = TxRaw {
            body_bytes: Vec::new(),
            auth_info_bytes: vec![0x0a, 0x00],
            signatures: Vec::new(),
        };
        let tx = TxDecoder::new().decode(&raw.encode_to_vec()).unwrap();
        assert!(tx.messages.is_empty());
        assert_eq!(tx.signer_infos.len(), 1);
    }

    #[test]
    fn test_corrupt_body_is_malformed() {
        let raw = TxRaw {
            body_bytes: vec![0x0a, 0x05, 0x01],
            auth_info_bytes: Vec::new(),
            signatures: Vec::new(),
        };
        let err = TxDecoder::new().decode(&raw.encode_to_vec()).unwrap_err();
        assert!(err.to_string().contains("TxBody"));
    }

    proptest! {
        #[test]
        fn test_oversized_input_never_parsed(extra in 1usize..4096, byte in any::<u8>()) {
            let input = vec![byte; MAX_TX_SIZE + extra];
            let err = TxDecoder::new().decode(&input).unwrap_err();
            prop_assert_eq!(err, DecodeError::TooLarge { size: MAX_TX_SIZE + extra, max: MAX_TX_SIZE });
        }

        #[test]
        fn test_arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let _ = TxDecoder::new().decode(&bytes);
        }
    }
}
