//! # Test Utilities for `recipe`
//!
//! Shared helpers for the integration tests.
//!
//! - [`Workspace`] - Temporary directory holding configuration and rule files
//! - [`run_recipe`] - Run the compiled binary and capture its output
//! - [`Signer`] - Deterministic secp256k1 signer producing ceremony-style signatures
//!
//! ## Proptest Strategies
//!
//! - [`decimal_amount`] - Decimal amounts that fit in 128 bits
//! - [`signer_bytes`] - Raw 20-byte signer addresses

#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use k256::ecdsa::SigningKey;
use proptest::prelude::*;
use recipe_core::{EcdsaSignature, U256};
use sha2::{Digest, Sha256};
use tempfile::TempDir;

/// secp256k1 curve order, big-endian hex.
pub const CURVE_ORDER_HEX: &str =
    "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";

/// A Cosmos Hub configuration with one magic constant.
pub const COSMOS_CONFIG: &str = r#"
chain = "cosmos"

[protocols]
atom = "send"

[[magic_constants]]
id = "treasury"
chain = "cosmos"
address = "cosmos1treasury"
"#;

/// A THORChain configuration using the built-in protocol map.
pub const THORCHAIN_CONFIG: &str = r#"
chain = "thorchain"

[[magic_constants]]
id = "vault"
chain = "thorchain"
address = "thor1vault"
"#;

/// Temporary directory for configuration and rule files.
///
/// Cleaned up on drop.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("recipe-test-")
            .tempdir()
            .expect("Failed to create temporary directory for test");
        Self { dir }
    }

    /// The workspace directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` and return the file's path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}

/// Run the `recipe` binary with `args`.
pub fn run_recipe<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_recipe"))
        .args(args)
        .output()
        .expect("Failed to run recipe binary")
}

/// Trimmed stdout of a finished command.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Trimmed stderr of a finished command.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// Deterministic secp256k1 signer.
pub struct Signer {
    key: SigningKey,
}

impl Signer {
    /// A signer whose secret key is `seed` repeated.
    pub fn from_seed(seed: u8) -> Self {
        let key = SigningKey::from_bytes(&[seed.max(1); 32].into()).expect("valid secret key");
        Self { key }
    }

    /// Sign `payload` and return the signature in ceremony form.
    pub fn sign(&self, payload: &[u8]) -> EcdsaSignature {
        let digest = Sha256::digest(payload);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .expect("signing succeeds");
        let bytes = signature.to_bytes();
        let (r, s) = bytes.split_at(32);
        EcdsaSignature::new(
            hex::encode(r),
            hex::encode(s),
            format!("{:02x}", recovery_id.to_byte()),
        )
    }

    /// The verifying key.
    pub fn verifying_key(&self) -> k256::ecdsa::VerifyingKey {
        *self.key.verifying_key()
    }
}

/// The secp256k1 curve order.
pub fn curve_order() -> U256 {
    U256::from_str_radix(CURVE_ORDER_HEX, 16).expect("valid curve order")
}

/// `N - s` for a hex S component, as 64 hex characters.
pub fn flip_s(s_hex: &str) -> String {
    let s = U256::from_be_slice(&hex::decode(s_hex).expect("valid hex"));
    hex::encode((curve_order() - s).to_be_bytes::<32>())
}

// =============================================================================
// Proptest Strategies
// =============================================================================

/// Decimal amount strings that fit in 128 bits.
pub fn decimal_amount() -> impl Strategy<Value = String> {
    any::<u128>().prop_map(|n| n.to_string())
}

/// Raw 20-byte signer addresses.
pub fn signer_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 20)
}
