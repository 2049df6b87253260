//! Property-based tests over the full evaluation and signing path.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use proptest::prelude::*;
use recipe_chain::chains;
use recipe_chain::fixtures::{asset, coin, deposit_coin, TxBuilder};
use recipe_chain::{compute_tx_hash, MAX_TX_SIZE};
use recipe_core::{
    ConstraintError, DecodeError, EcdsaSignature, Effect, ExtractError, ParameterConstraint,
    PolicyError, Rule, U256,
};
use recipe_policy::PolicyEngine;

use crate::common::{decimal_amount, flip_s, signer_bytes, Signer};

fn cosmos_engine() -> PolicyEngine {
    PolicyEngine::builder(chains::cosmos_hub().unwrap())
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn oversized_input_is_rejected_before_parsing(
        extra in 1usize..4096,
        fill in any::<u8>(),
    ) {
        let engine = cosmos_engine();
        let tx = vec![fill; MAX_TX_SIZE + extra];
        let err = engine.evaluate(&Rule::allow("cosmos.atom"), &tx).unwrap_err();
        prop_assert_eq!(
            err,
            PolicyError::Decode(DecodeError::TooLarge { size: MAX_TX_SIZE + extra, max: MAX_TX_SIZE })
        );
    }

    #[test]
    fn non_allow_rules_are_always_rejected(
        deny in any::<bool>(),
        tx in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let engine = cosmos_engine();
        let mut rule = Rule::allow("cosmos.atom");
        rule.effect = if deny { Effect::Deny } else { Effect::Unspecified };

        let is_rule_not_allow = matches!(
            engine.evaluate(&rule, &tx),
            Err(PolicyError::RuleNotAllow { .. })
        );
        prop_assert!(is_rule_not_allow);
    }

    #[test]
    fn max_constraint_matches_integer_comparison(
        amount in any::<u128>(),
        max in any::<u128>(),
    ) {
        let engine = cosmos_engine();
        let tx = TxBuilder::new()
            .send("cosmos1from", "cosmos1to", vec![coin("uatom", &amount.to_string())])
            .build();
        let rule = Rule::allow("cosmos.atom")
            .with_constraint(ParameterConstraint::max("amount", max.to_string()));

        prop_assert_eq!(engine.evaluate(&rule, &tx).is_ok(), amount <= max);
    }

    #[test]
    fn two_coin_deposits_never_extract_an_amount(
        first in decimal_amount(),
        second in decimal_amount(),
    ) {
        let engine = PolicyEngine::builder(chains::thorchain().unwrap()).build().unwrap();
        let tx = TxBuilder::new()
            .deposit(
                vec![
                    deposit_coin(asset("THOR", "RUNE"), &first),
                    deposit_coin(asset("THOR", "RUNE"), &second),
                ],
                "",
                vec![1; 20],
            )
            .build();
        let rule = Rule::allow("thorchain.thorchain_swap")
            .with_constraint(ParameterConstraint::max("amount", U256::MAX.to_string()));

        let is_multi_coin = matches!(
            engine.evaluate(&rule, &tx),
            Err(PolicyError::Constraint(ConstraintError::Extraction(
                ExtractError::MultiCoinUnsupported { count: 2 }
            )))
        );
        prop_assert!(is_multi_coin);
    }

    #[test]
    fn deposit_sender_carries_chain_prefix(signer in signer_bytes()) {
        let tx = TxBuilder::new()
            .deposit(vec![deposit_coin(asset("THOR", "RUNE"), "1")], "", signer)
            .build();

        let thor = PolicyEngine::builder(chains::thorchain().unwrap()).build().unwrap();
        let maya = PolicyEngine::builder(chains::mayachain().unwrap()).build().unwrap();

        let thor_sender = thor.sender(&tx).unwrap();
        let maya_sender = maya.sender(&tx).unwrap();

        prop_assert!(thor_sender.starts_with("thor1"));
        prop_assert!(maya_sender.starts_with("maya1"));
        // Same data and checksum length under both prefixes.
        prop_assert_eq!(thor_sender.len() - "thor".len(), maya_sender.len() - "maya".len());
    }

    #[test]
    fn hash_ignores_s_malleability(seed in 1u8..=255, memo in "[a-z0-9 ]{0,64}") {
        let tx = TxBuilder::new()
            .send("cosmos1from", "cosmos1to", vec![coin("uatom", "1")])
            .memo(memo)
            .build();
        let low = Signer::from_seed(seed).sign(&tx);
        let high = EcdsaSignature::new(low.r.clone(), flip_s(&low.s), low.recovery_id.clone());

        let low_hash = compute_tx_hash(&tx, &[low]).unwrap();
        let high_hash = compute_tx_hash(&tx, &[high]).unwrap();

        prop_assert_eq!(&low_hash, &high_hash);
        prop_assert_eq!(low_hash.len(), 64);
        prop_assert!(low_hash.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
