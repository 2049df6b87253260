//! Signature finalization with real secp256k1 signatures.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::Signature;
use recipe_chain::fixtures::{coin, TxBuilder};
use recipe_chain::{compute_tx_hash, sign_transaction, TxDecoder};
use recipe_core::{EcdsaSignature, SignatureError};
use sha2::{Digest, Sha256};

use crate::common::{flip_s, Signer};

fn unsigned() -> Vec<u8> {
    TxBuilder::new()
        .send("cosmos1sender", "cosmos1recipient", vec![coin("uatom", "42")])
        .memo("invoice 7")
        .build()
}

#[test]
fn test_attached_signature_verifies() {
    let signer = Signer::from_seed(7);
    let tx = unsigned();
    let signature = signer.sign(&tx);

    let signed = sign_transaction(&tx, &[signature]).unwrap();
    let decoded = TxDecoder::new().decode(&signed.bytes).unwrap();
    let attached = Signature::from_slice(&decoded.signatures()[0]).unwrap();

    signer
        .verifying_key()
        .verify_prehash(&Sha256::digest(&tx), &attached)
        .unwrap();
}

#[test]
fn test_high_s_is_canonicalized() {
    let signer = Signer::from_seed(9);
    let tx = unsigned();
    let low = signer.sign(&tx);
    let high = EcdsaSignature::new(low.r.clone(), flip_s(&low.s), low.recovery_id.clone());
    assert_ne!(low.s, high.s);

    let from_low = sign_transaction(&tx, &[low]).unwrap();
    let from_high = sign_transaction(&tx, &[high]).unwrap();

    assert_eq!(from_low, from_high);

    let decoded = TxDecoder::new().decode(&from_high.bytes).unwrap();
    let attached = Signature::from_slice(&decoded.signatures()[0]).unwrap();
    assert!(attached.normalize_s().is_none(), "attached S must be low");
    signer
        .verifying_key()
        .verify_prehash(&Sha256::digest(&tx), &attached)
        .unwrap();
}

#[test]
fn test_hash_is_sha256_of_signed_bytes() {
    let tx = unsigned();
    let signed = sign_transaction(&tx, &[Signer::from_seed(3).sign(&tx)]).unwrap();

    assert_eq!(signed.hash, hex::encode_upper(Sha256::digest(&signed.bytes)));
    assert_eq!(signed.hash.len(), 64);
}

#[test]
fn test_hash_is_deterministic() {
    let tx = unsigned();
    let signature = Signer::from_seed(5).sign(&tx);

    let first = compute_tx_hash(&tx, std::slice::from_ref(&signature)).unwrap();
    for _ in 0..10 {
        assert_eq!(
            compute_tx_hash(&tx, std::slice::from_ref(&signature)).unwrap(),
            first
        );
    }
}

#[test]
fn test_signature_count_checked_before_hex() {
    let tx = unsigned();
    let garbage = EcdsaSignature::new("not hex", "not hex", "zz");

    assert_eq!(
        compute_tx_hash(&tx, &[]).unwrap_err(),
        SignatureError::WrongSignatureCount { count: 0 }
    );
    assert_eq!(
        compute_tx_hash(&tx, &[garbage.clone(), garbage]).unwrap_err(),
        SignatureError::WrongSignatureCount { count: 2 }
    );
}

#[test]
fn test_existing_signatures_are_replaced() {
    let tx = TxBuilder::new()
        .send("cosmos1sender", "cosmos1recipient", vec![coin("uatom", "42")])
        .signature(vec![0xAA; 64])
        .signature(vec![0xBB; 64])
        .build();
    let signature = Signer::from_seed(11).sign(&tx);

    let signed = sign_transaction(&tx, &[signature]).unwrap();
    let decoded = TxDecoder::new().decode(&signed.bytes).unwrap();

    assert_eq!(decoded.signatures().len(), 1);
    assert_ne!(decoded.signatures()[0], vec![0xAA; 64]);
}

#[test]
fn test_missing_signer_info() {
    let tx = TxBuilder::new()
        .send("cosmos1sender", "cosmos1recipient", vec![coin("uatom", "42")])
        .without_signer()
        .build();
    let signature = Signer::from_seed(2).sign(&tx);

    assert_eq!(
        sign_transaction(&tx, &[signature]).unwrap_err(),
        SignatureError::MissingSignerInfo
    );
}

#[test]
fn test_invalid_recovery_id() {
    let tx = unsigned();
    let mut signature = Signer::from_seed(4).sign(&tx);
    signature.recovery_id = "0g".to_string();

    assert!(matches!(
        sign_transaction(&tx, &[signature]).unwrap_err(),
        SignatureError::InvalidHex {
            field: "recovery_id",
            ..
        }
    ));
}
