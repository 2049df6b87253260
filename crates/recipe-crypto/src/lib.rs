//! # recipe-crypto
//!
//! Cryptographic utilities for the recipe policy engine.
//!
//! ## Modules
//!
//! - [`ecdsa`] - secp256k1 curve constants, signature component decoding and
//!   low-S canonicalization
//!
//! ## Security
//!
//! - No unsafe code allowed
//! - No mutable global state; curve constants are computed once and shared read-only

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ecdsa;

pub use ecdsa::{
    compact_signature, curve_order, half_order, is_low_s, normalize_s, COMPONENT_LEN,
    SIGNATURE_LEN,
};
