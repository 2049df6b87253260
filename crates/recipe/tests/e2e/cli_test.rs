//! Tests that drive the compiled `recipe` binary.
//!
//! - Exit codes: 0 allowed, 1 denied, 2 any other failure
//! - Text and JSON output

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use recipe_chain::compute_tx_hash;
use recipe_chain::fixtures::{asset, coin, deposit_coin, TxBuilder};
use sha2::{Digest, Sha256};

use crate::common::{run_recipe, stderr, stdout, Signer, Workspace, COSMOS_CONFIG};

const MAX_RULE: &str = r#"{
    "effect": "ALLOW",
    "resource": "cosmos.atom.transfer",
    "target": {"type": "MAGIC_CONSTANT", "magicConstant": "treasury"},
    "parameterConstraints": [
        {"parameterName": "amount", "constraint": {"type": "max", "maxValue": "2000000", "required": true}},
        {"parameterName": "denom", "constraint": {"type": "fixed", "fixedValue": "uatom", "required": true}}
    ]
}"#;

fn send_hex(to: &str, amount: &str) -> String {
    hex::encode(
        TxBuilder::new()
            .send("cosmos1sender", to, vec![coin("uatom", amount)])
            .build(),
    )
}

fn evaluate(workspace: &Workspace, rule: &str, tx: &str, extra: &[&str]) -> std::process::Output {
    let config = workspace.write("chain.toml", COSMOS_CONFIG);
    let rule = workspace.write("rule.json", rule);
    let mut args = vec![
        "evaluate".to_string(),
        "--config".to_string(),
        config.display().to_string(),
        "--rule".to_string(),
        rule.display().to_string(),
        "--tx".to_string(),
        tx.to_string(),
    ];
    args.extend(extra.iter().map(ToString::to_string));
    run_recipe(args)
}

mod evaluate_tests {
    use super::*;

    #[test]
    fn test_allowed_exits_zero() {
        let workspace = Workspace::new();
        let output = evaluate(
            &workspace,
            MAX_RULE,
            &send_hex("cosmos1treasury", "1000000"),
            &[],
        );

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), "allowed");
    }

    #[test]
    fn test_allowed_json() {
        let workspace = Workspace::new();
        let output = evaluate(
            &workspace,
            MAX_RULE,
            &send_hex("cosmos1treasury", "1000000"),
            &["--format", "json"],
        );

        assert_eq!(output.status.code(), Some(0));
        let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(json["outcome"], "allowed");
        assert_eq!(json["chain"], "cosmos");
        assert_eq!(json["resource"], "cosmos.atom.transfer");
    }

    #[test]
    fn test_denied_exits_one() {
        let workspace = Workspace::new();
        let output = evaluate(
            &workspace,
            MAX_RULE,
            &send_hex("cosmos1treasury", "5000000"),
            &[],
        );

        assert_eq!(output.status.code(), Some(1));
        assert!(stdout(&output).is_empty());
        assert!(stderr(&output).contains("exceeds maximum"));
    }

    #[test]
    fn test_denied_json_reports_stage() {
        let workspace = Workspace::new();
        let output = evaluate(
            &workspace,
            MAX_RULE,
            &send_hex("cosmos1elsewhere", "1"),
            &["--format", "json"],
        );

        assert_eq!(output.status.code(), Some(1));
        let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(json["outcome"], "denied");
        assert_eq!(json["stage"], "target");
    }

    #[test]
    fn test_base64_transaction() {
        let workspace = Workspace::new();
        let tx = TxBuilder::new()
            .send("cosmos1sender", "cosmos1treasury", vec![coin("uatom", "1")])
            .build();
        let output = evaluate(&workspace, MAX_RULE, &STANDARD.encode(tx), &[]);

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    }

    #[test]
    fn test_unsupported_constraint_exits_two() {
        let workspace = Workspace::new();
        let rule = r#"{"effect":"ALLOW","resource":"cosmos.atom",
            "parameterConstraints":[{"parameterName":"recipient",
                "constraint":{"type":"magic_constant","magicConstant":"treasury","required":true}}]}"#;
        let output = evaluate(&workspace, rule, &send_hex("cosmos1treasury", "1"), &[]);

        assert_eq!(output.status.code(), Some(2));
        assert!(stderr(&output).contains("unsupported constraint type"));
    }

    #[test]
    fn test_invalid_inputs_exit_two() {
        let workspace = Workspace::new();

        let output = evaluate(&workspace, MAX_RULE, "not a transaction!", &[]);
        assert_eq!(output.status.code(), Some(2));

        let output = evaluate(&workspace, "{not json", &send_hex("cosmos1treasury", "1"), &[]);
        assert_eq!(output.status.code(), Some(2));
        assert!(stderr(&output).contains("invalid rule"));
    }

    #[test]
    fn test_unknown_chain_exits_two() {
        let workspace = Workspace::new();
        let config = workspace.write("chain.toml", "chain = \"osmosis\"\n");
        let rule = workspace.write("rule.json", MAX_RULE);
        let output = run_recipe([
            "evaluate".to_string(),
            "--config".to_string(),
            config.display().to_string(),
            "--rule".to_string(),
            rule.display().to_string(),
            "--tx".to_string(),
            send_hex("cosmos1treasury", "1"),
        ]);

        assert_eq!(output.status.code(), Some(2));
        assert!(stderr(&output).contains("unknown chain: osmosis"));
    }
}

mod tx_hash_tests {
    use super::*;

    #[test]
    fn test_prints_hash() {
        let tx = TxBuilder::new()
            .send("cosmos1sender", "cosmos1recipient", vec![coin("uatom", "9")])
            .build();
        let signature = Signer::from_seed(21).sign(&tx);
        let expected = compute_tx_hash(&tx, std::slice::from_ref(&signature)).unwrap();

        let output = run_recipe([
            "tx-hash",
            "--tx",
            hex::encode(&tx).as_str(),
            "--r",
            signature.r.as_str(),
            "--s",
            signature.s.as_str(),
            "--recovery-id",
            signature.recovery_id.as_str(),
        ]);

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), expected);
    }

    #[test]
    fn test_json_includes_signed_tx() {
        let tx = TxBuilder::new()
            .send("cosmos1sender", "cosmos1recipient", vec![coin("uatom", "9")])
            .build();
        let signature = Signer::from_seed(22).sign(&tx);

        let output = run_recipe([
            "tx-hash",
            "--tx",
            format!("0x{}", hex::encode(&tx)).as_str(),
            "--r",
            signature.r.as_str(),
            "--s",
            signature.s.as_str(),
            "--format",
            "json",
        ]);

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        let signed = STANDARD.decode(json["signed_tx"].as_str().unwrap()).unwrap();
        assert_eq!(
            json["hash"].as_str().unwrap(),
            hex::encode_upper(Sha256::digest(&signed))
        );
    }

    #[test]
    fn test_known_vector() {
        let output = run_recipe([
            "tx-hash",
            "--tx",
            "0a510a470a1c2f636f736d6f732e62616e6b2e763162657461312e4d736753656e6412270a0b636f736d6f733166726f6d1209636f736d6f7331746f1a0d0a057561746f6d1204313030301206676f6c64656e12040a021801",
            "--r",
            "1111111111111111111111111111111111111111111111111111111111111111",
            "--s",
            "0000000000000000000000000000000000000000000000000000000000000002",
        ]);

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        assert_eq!(
            stdout(&output),
            "C3857025E74E8A2836381E5114E094C651810F3142ABA08235A6CC11FF350769"
        );
    }

    #[test]
    fn test_bad_s_exits_two() {
        let tx = hex::encode(
            TxBuilder::new()
                .send("cosmos1sender", "cosmos1recipient", vec![coin("uatom", "9")])
                .build(),
        );
        let output = run_recipe([
            "tx-hash",
            "--tx",
            tx.as_str(),
            "--r",
            "11".repeat(32).as_str(),
            "--s",
            "00".repeat(32).as_str(),
        ]);

        assert_eq!(output.status.code(), Some(2));
        assert!(stderr(&output).contains("out of range"));
    }
}

mod sender_tests {
    use super::*;

    #[test]
    fn test_prints_send_sender() {
        let output = run_recipe([
            "sender",
            "--chain",
            "cosmos",
            "--tx",
            send_hex("cosmos1treasury", "1").as_str(),
        ]);

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), "cosmos1sender");
    }

    #[test]
    fn test_prints_deposit_signer() {
        let tx = TxBuilder::new()
            .deposit(
                vec![deposit_coin(asset("THOR", "RUNE"), "1")],
                "",
                vec![0x42; 20],
            )
            .build();
        let output = run_recipe([
            "sender",
            "--chain",
            "thorchain",
            "--tx",
            hex::encode(tx).as_str(),
        ]);

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        assert!(stdout(&output).starts_with("thor1"));
    }
}

mod chains_tests {
    use super::*;

    #[test]
    fn test_lists_builtin_chains() {
        let output = run_recipe(["chains"]);

        assert_eq!(output.status.code(), Some(0));
        let text = stdout(&output);
        let ids: Vec<_> = text
            .lines()
            .map(|line| line.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(ids, ["cosmos", "thorchain", "mayachain"]);
    }

    #[test]
    fn test_verbose_logging_goes_to_stderr() {
        let output = run_recipe(["chains", "--format", "json", "-vvv", "--log-format", "json"]);

        assert_eq!(output.status.code(), Some(0));
        let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_no_arguments_exits_with_usage() {
        let output = run_recipe(Vec::<String>::new());
        assert_ne!(output.status.code(), Some(0));
        assert!(stderr(&output).contains("Usage"));
    }
}
