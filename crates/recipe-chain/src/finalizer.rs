//! Signature finalizer.
//!
//! After the threshold-signing ceremony produces `(r, s)` for a transaction,
//! [`sign_transaction`] canonicalizes S to the lower half of the curve order,
//! attaches the compact `R || S'` signature to the unsigned envelope and
//! hashes the result. [`compute_tx_hash`] returns only the hash.
//!
//! Both are pure functions of their inputs with no dependency on the policy
//! engine.
//!
//! # Order of Checks
//!
//! 1. Exactly one signature (before any hex is looked at)
//! 2. The unsigned bytes decode
//! 3. Auth-info carries at least one signer info
//! 4. R and S decode to 32 bytes each, recovery id is hex
//! 5. `1 <= S < N`
//!
//! # Example
//!
//! ```
//! use recipe_chain::finalizer::compute_tx_hash;
//! use recipe_core::{EcdsaSignature, SignatureError};
//!
//! let err = compute_tx_hash(&[0x0a], &[]).unwrap_err();
//! assert_eq!(err, SignatureError::WrongSignatureCount { count: 0 });
//! ```

use prost::Message;
use recipe_core::{EcdsaSignature, SignatureError};
use recipe_crypto::ecdsa::{compact_signature, decode_hex_component};
use sha2::{Digest, Sha256};

use crate::decoder::TxDecoder;

/// A signed transaction ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// Encoded signed `TxRaw`.
    pub bytes: Vec<u8>,
    /// Upper-case hex SHA-256 of [`bytes`](Self::bytes).
    pub hash: String,
}

/// Attach the signature to `unsigned` and return the signed transaction.
///
/// Any signatures already present on the envelope are replaced. Body and
/// auth-info bytes are carried over unchanged.
///
/// # Errors
///
/// - [`SignatureError::WrongSignatureCount`] unless exactly one signature is given
/// - [`SignatureError::Decode`] if `unsigned` does not decode
/// - [`SignatureError::MissingSignerInfo`] if auth-info has no signer info
/// - [`SignatureError::InvalidHex`], [`SignatureError::InvalidRLength`],
///   [`SignatureError::InvalidSLength`] for bad components
/// - [`SignatureError::SOutOfRange`] if S is zero or not below the curve order
pub fn sign_transaction(
    unsigned: &[u8],
    signatures: &[EcdsaSignature],
) -> Result<SignedTransaction, SignatureError> {
    let signature = match signatures {
        [signature] => signature,
        other => {
            return Err(SignatureError::WrongSignatureCount { count: other.len() });
        }
    };

    let decoded = TxDecoder::new().decode(unsigned)?;

    if decoded.signer_infos.is_empty() {
        return Err(SignatureError::MissingSignerInfo);
    }

    let compact = compact_signature(&signature.r, &signature.s)?;

    if !signature.recovery_id.is_empty() {
        decode_hex_component("recovery_id", &signature.recovery_id)?;
    }

    let mut raw = decoded.into_raw();
    raw.signatures = vec![compact.to_vec()];

    let bytes = raw.encode_to_vec();
    let hash = hex::encode_upper(Sha256::digest(&bytes));

    tracing::debug!(hash = %hash, size = bytes.len(), "Transaction signed");

    Ok(SignedTransaction { bytes, hash })
}

/// Compute the hash of `unsigned` once the signature is attached.
///
/// Returns a 64-character upper-case hex string.
///
/// # Errors
///
/// See [`sign_transaction`].
pub fn compute_tx_hash(
    unsigned: &[u8],
    signatures: &[EcdsaSignature],
) -> Result<String, SignatureError> {
    sign_transaction(unsigned, signatures).map(|signed| signed.hash)
}
