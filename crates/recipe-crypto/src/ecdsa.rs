//! secp256k1 ECDSA signature component handling.
//!
//! This module holds the curve constants and the low-S canonicalization
//! applied to signatures produced by the threshold-signing ceremony before
//! they are attached to a transaction.
//!
//! # Low-S Normalization
//!
//! For any valid ECDSA signature `(r, s)`, `(r, N - s)` is also valid. Chains
//! in the Cosmos family only accept the form with `s <= N / 2`, so an `s` in
//! the upper half of the order is replaced by `N - s`:
//!
//! ```
//! use recipe_crypto::ecdsa::{curve_order, half_order, normalize_s};
//! use alloy_primitives::U256;
//!
//! let high = *curve_order() - U256::from(1u8);
//! let low = normalize_s(&high.to_be_bytes::<32>()).unwrap();
//!
//! assert_eq!(U256::from_be_bytes(low), U256::from(1u8));
//! assert!(U256::from_be_bytes(low) <= *half_order());
//! ```
//!
//! # Constants
//!
//! The curve order is taken from `k256` and computed once on first use; the
//! values are immutable and shared across threads.

use std::sync::LazyLock;

use alloy_primitives::U256;
use k256::elliptic_curve::bigint::Encoding;
use k256::elliptic_curve::Curve;
use k256::Secp256k1;
use recipe_core::error::SignatureError;

/// Length in bytes of the R and S components.
pub const COMPONENT_LEN: usize = 32;

/// Length in bytes of a compact `R || S` signature.
pub const SIGNATURE_LEN: usize = 2 * COMPONENT_LEN;

static CURVE_ORDER: LazyLock<U256> =
    LazyLock::new(|| U256::from_be_bytes(Secp256k1::ORDER.to_be_bytes()));

static HALF_ORDER: LazyLock<U256> = LazyLock::new(|| *CURVE_ORDER >> 1);

/// The secp256k1 group order `N`.
#[must_use]
pub fn curve_order() -> &'static U256 {
    &CURVE_ORDER
}

/// Half the group order, `N >> 1`.
#[must_use]
pub fn half_order() -> &'static U256 {
    &HALF_ORDER
}

/// Decode a hex signature component, accepting an optional `0x`/`0X` prefix.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidHex`] naming `field` if the string is not hex.
pub fn decode_hex_component(field: &'static str, value: &str) -> Result<Vec<u8>, SignatureError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    hex::decode(digits).map_err(|e| SignatureError::invalid_hex(field, e.to_string()))
}

/// Decode the R component into exactly 32 bytes.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidHex`] or [`SignatureError::InvalidRLength`].
pub fn decode_r(value: &str) -> Result<[u8; COMPONENT_LEN], SignatureError> {
    let bytes = decode_hex_component("r", value)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| SignatureError::InvalidRLength { len })
}

/// Decode the S component into exactly 32 bytes.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidHex`] or [`SignatureError::InvalidSLength`].
pub fn decode_s(value: &str) -> Result<[u8; COMPONENT_LEN], SignatureError> {
    let bytes = decode_hex_component("s", value)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| SignatureError::InvalidSLength { len })
}

/// Returns `true` if `s` is in the lower half of the curve order.
#[must_use]
pub fn is_low_s(s: &[u8; COMPONENT_LEN]) -> bool {
    U256::from_be_bytes(*s) <= *HALF_ORDER
}

/// Canonicalize S to the lower half of the curve order.
///
/// Returns `N - s` when `s > N / 2`, otherwise `s` unchanged, always as a
/// 32-byte big-endian value. Applying it twice yields the same result.
///
/// # Errors
///
/// Returns [`SignatureError::SOutOfRange`] unless `1 <= s < N`.
pub fn normalize_s(s: &[u8; COMPONENT_LEN]) -> Result<[u8; COMPONENT_LEN], SignatureError> {
    let value = U256::from_be_bytes(*s);

    if value.is_zero() || value >= *CURVE_ORDER {
        return Err(SignatureError::SOutOfRange);
    }

    let canonical = if value > *HALF_ORDER {
        *CURVE_ORDER - value
    } else {
        value
    };

    Ok(canonical.to_be_bytes::<COMPONENT_LEN>())
}

/// Build the compact `R || S'` signature from hex components.
///
/// # Errors
///
/// Propagates decoding, length and range errors of the components.
pub fn compact_signature(r: &str, s: &str) -> Result<[u8; SIGNATURE_LEN], SignatureError> {
    let r = decode_r(r)?;
    let s = normalize_s(&decode_s(s)?)?;

    let mut compact = [0u8; SIGNATURE_LEN];
    let (r_half, s_half) = compact.split_at_mut(COMPONENT_LEN);
    r_half.copy_from_slice(&r);
    s_half.copy_from_slice(&s);
    Ok(compact)
}
