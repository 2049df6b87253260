//! Configuration-driven evaluation tests.
//!
//! Engines are built from TOML configuration and rules are parsed from JSON,
//! the way the binary consumes them.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use recipe_chain::chains;
use recipe_chain::fixtures::{asset, coin, deposit_coin, TxBuilder};
use recipe_core::{
    ComparatorError, ConstraintError, EngineConfig, ExtractError, MessageKind, PolicyError, Rule,
    TargetError,
};
use recipe_policy::mock::{CountingRegistry, RecordingComparator};
use recipe_policy::{Comparators, PolicyEngine, StaticMagicConstants};

use crate::common::{COSMOS_CONFIG, THORCHAIN_CONFIG};

fn cosmos_engine() -> PolicyEngine {
    PolicyEngine::from_config(&EngineConfig::from_toml_str(COSMOS_CONFIG).unwrap()).unwrap()
}

fn thorchain_engine() -> PolicyEngine {
    PolicyEngine::from_config(&EngineConfig::from_toml_str(THORCHAIN_CONFIG).unwrap()).unwrap()
}

fn rule(json: &str) -> Rule {
    serde_json::from_str(json).unwrap()
}

fn atom_send(to: &str, amount: &str) -> Vec<u8> {
    TxBuilder::new()
        .send("cosmos1sender", to, vec![coin("uatom", amount)])
        .build()
}

fn max_amount_rule(max: &str) -> Rule {
    rule(&format!(
        r#"{{"effect":"ALLOW","resource":"cosmos.atom.transfer",
            "parameterConstraints":[{{"parameterName":"amount",
                "constraint":{{"type":"max","maxValue":"{max}","required":true}}}}]}}"#
    ))
}

#[test]
fn test_max_amount_allows_and_denies() {
    let engine = cosmos_engine();
    let tx = atom_send("cosmos1anyone", "1000000");

    assert!(engine.evaluate(&max_amount_rule("2000000"), &tx).is_ok());

    let err = engine
        .evaluate(&max_amount_rule("500000"), &tx)
        .unwrap_err();
    assert_eq!(
        err,
        PolicyError::Constraint(ConstraintError::Violation {
            parameter: "amount".to_string(),
            source: ComparatorError::AboveMaximum {
                value: "1000000".to_string(),
                max: "500000".to_string(),
            },
        })
    );
    assert!(err.is_denial());
}

#[test]
fn test_max_bound_is_inclusive() {
    let engine = cosmos_engine();
    assert!(engine
        .evaluate(&max_amount_rule("1000000"), &atom_send("cosmos1x", "1000000"))
        .is_ok());
    assert!(engine
        .evaluate(&max_amount_rule("1000000"), &atom_send("cosmos1x", "1000001"))
        .is_err());
}

#[test]
fn test_magic_constant_from_config() {
    let engine = cosmos_engine();
    let treasury = rule(
        r#"{"effect":"ALLOW","resource":"cosmos.atom",
            "target":{"type":"MAGIC_CONSTANT","magicConstant":"treasury"}}"#,
    );

    assert!(engine
        .evaluate(&treasury, &atom_send("cosmos1treasury", "1"))
        .is_ok());
    assert!(matches!(
        engine.evaluate(&treasury, &atom_send("cosmos1other", "1")),
        Err(PolicyError::Target(TargetError::AddressMismatch { .. }))
    ));
}

#[test]
fn test_unknown_magic_constant_fails_closed() {
    let engine = cosmos_engine();
    let payroll = rule(
        r#"{"effect":"ALLOW","resource":"cosmos.atom",
            "target":{"type":"MAGIC_CONSTANT","magicConstant":"payroll"}}"#,
    );
    assert!(matches!(
        engine.evaluate(&payroll, &atom_send("cosmos1treasury", "1")),
        Err(PolicyError::Target(TargetError::ResolverFailed { .. }))
    ));
}

#[test]
fn test_address_target_is_exact_match() {
    let engine = cosmos_engine();
    let exact = rule(
        r#"{"effect":"ALLOW","resource":"cosmos.atom",
            "target":{"type":"ADDRESS","address":"cosmos1abcdef"}}"#,
    );

    assert!(engine
        .evaluate(&exact, &atom_send("cosmos1abcdef", "1"))
        .is_ok());

    for recipient in ["COSMOS1ABCDEF", "cosmos1abcdef ", " cosmos1abcdef", "cosmos1abcdeF"] {
        assert!(
            matches!(
                engine.evaluate(&exact, &atom_send(recipient, "1")),
                Err(PolicyError::Target(TargetError::AddressMismatch { .. }))
            ),
            "{recipient:?} should not match"
        );
    }
}

#[test]
fn test_thorchain_swap_rule() {
    let engine = thorchain_engine();
    let swap = rule(
        r#"{"effect":"ALLOW","resource":"thorchain.thorchain_swap",
            "parameterConstraints":[
                {"parameterName":"from_asset","constraint":{"type":"fixed","fixedValue":"THOR.RUNE","required":true}},
                {"parameterName":"amount","constraint":{"type":"max","maxValue":"500000000","required":true}},
                {"parameterName":"memo","constraint":{"type":"any","required":false}}
            ]}"#,
    );

    let tx = TxBuilder::new()
        .deposit(
            vec![deposit_coin(asset("THOR", "RUNE"), "250000000")],
            "=:ETH.ETH:0x86d526d6624AbC0178cF7296cD538Ecc080A95F1",
            vec![0x11; 20],
        )
        .build();
    assert!(engine.evaluate(&swap, &tx).is_ok());

    let wrong_asset = TxBuilder::new()
        .deposit(
            vec![deposit_coin(asset("BTC", "BTC"), "1")],
            "=:THOR.RUNE:thor1x",
            vec![0x11; 20],
        )
        .build();
    assert!(matches!(
        engine.evaluate(&swap, &wrong_asset),
        Err(PolicyError::Constraint(ConstraintError::Violation { .. }))
    ));
}

#[test]
fn test_deposit_with_two_coins_never_sums() {
    let engine = thorchain_engine();
    let tx = TxBuilder::new()
        .deposit(
            vec![
                deposit_coin(asset("THOR", "RUNE"), "1"),
                deposit_coin(asset("THOR", "RUNE"), "1"),
            ],
            "",
            vec![0x11; 20],
        )
        .build();

    for constraint in [
        r#"{"type":"max","maxValue":"100","required":true}"#,
        r#"{"type":"min","minValue":"0","required":true}"#,
        r#"{"type":"any","required":false}"#,
    ] {
        let rule = rule(&format!(
            r#"{{"effect":"ALLOW","resource":"thorchain.thorchain_swap",
                "parameterConstraints":[{{"parameterName":"amount","constraint":{constraint}}}]}}"#
        ));
        assert_eq!(
            engine.evaluate(&rule, &tx).unwrap_err(),
            PolicyError::Constraint(ConstraintError::Extraction(
                ExtractError::MultiCoinUnsupported { count: 2 }
            ))
        );
    }
}

#[test]
fn test_mismatch_stops_before_target_and_parameters() {
    let registry = CountingRegistry::new(
        StaticMagicConstants::new().with_address("vault", "thorchain", "thor1vault"),
    );
    let comparator = RecordingComparator::new();
    let engine = PolicyEngine::builder(chains::thorchain().unwrap())
        .protocol("rune", MessageKind::Send)
        .protocol("thorchain_swap", MessageKind::Deposit)
        .magic_constants(registry.clone())
        .comparators(
            Comparators::empty()
                .with_string(comparator.clone())
                .with_integer(comparator.clone()),
        )
        .build()
        .unwrap();

    let rule = rule(
        r#"{"effect":"ALLOW","resource":"thorchain.rune.transfer",
            "target":{"type":"MAGIC_CONSTANT","magicConstant":"vault"},
            "parameterConstraints":[{"parameterName":"amount",
                "constraint":{"type":"max","maxValue":"1","required":true}}]}"#,
    );
    let deposit = TxBuilder::new()
        .deposit(
            vec![deposit_coin(asset("THOR", "RUNE"), "5")],
            "",
            vec![0x11; 20],
        )
        .build();

    assert_eq!(
        engine.evaluate(&rule, &deposit).unwrap_err(),
        PolicyError::ResourceMessageMismatch {
            protocol: "rune".to_string(),
            expected: MessageKind::Send,
            actual: MessageKind::Deposit,
        }
    );
    assert_eq!(registry.lookups(), 0);
    assert!(comparator.calls().is_empty());
}

#[test]
fn test_config_protocol_override() {
    let config = EngineConfig::new("thorchain").with_protocol("rune", MessageKind::Send);
    let engine = PolicyEngine::from_config(&config).unwrap();

    assert_eq!(engine.protocols().len(), 1);
    let swap = Rule::allow("thorchain.thorchain_swap");
    let tx = TxBuilder::new()
        .deposit(
            vec![deposit_coin(asset("THOR", "RUNE"), "5")],
            "",
            vec![0x11; 20],
        )
        .build();
    assert!(matches!(
        engine.evaluate(&swap, &tx),
        Err(PolicyError::UnsupportedProtocol { .. })
    ));
}
