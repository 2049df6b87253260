//! Fuzz target for rule evaluation.
//!
//! Builds a rule from structured fuzz input and evaluates it against
//! arbitrary transaction bytes on a chain picked by the input.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run policy_engine
//! ```
//!
//! # What is checked
//!
//! - No panics on malformed rules or transactions
//! - Evaluation is deterministic
//! - Rules that are not `Allow` never pass

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use recipe_chain::chains;
use recipe_core::{ConstraintKind, Effect, ParameterConstraint, Rule, Target};
use recipe_policy::{PolicyEngine, StaticMagicConstants};

const CHAINS: [&str; 3] = ["cosmos", "thorchain", "mayachain"];

/// A structured evaluation request.
#[derive(Debug, Arbitrary)]
struct EvaluateInput {
    chain_selector: u8,
    effect_selector: u8,
    resource: String,
    target: TargetInput,
    constraints: Vec<ConstraintInput>,
    tx: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
enum TargetInput {
    Unspecified,
    Address(String),
    MagicConstant(String),
    Unrecognized,
}

#[derive(Debug, Arbitrary)]
struct ConstraintInput {
    parameter: String,
    kind_selector: u8,
    value: String,
    required: bool,
}

impl EvaluateInput {
    fn rule(&self) -> Rule {
        let effect = match self.effect_selector % 3 {
            0 => Effect::Allow,
            1 => Effect::Deny,
            _ => Effect::Unspecified,
        };
        let target = match &self.target {
            TargetInput::Unspecified => Target::Unspecified,
            TargetInput::Address(address) => Target::address(address.clone()),
            TargetInput::MagicConstant(id) => Target::magic_constant(id.clone()),
            TargetInput::Unrecognized => Target::Unrecognized,
        };

        let mut rule = Rule::allow(self.resource.clone()).with_target(target);
        rule.effect = effect;
        for input in &self.constraints {
            let mut constraint = match input.kind_selector % 5 {
                0 => ParameterConstraint::fixed(&input.parameter, &input.value),
                1 => ParameterConstraint::max(&input.parameter, &input.value),
                2 => ParameterConstraint::min(&input.parameter, &input.value),
                3 => ParameterConstraint::new(&input.parameter, ConstraintKind::Any),
                _ => ParameterConstraint::new(
                    &input.parameter,
                    ConstraintKind::MagicConstant {
                        magic_constant: input.value.clone(),
                    },
                ),
            };
            constraint.constraint.required = input.required;
            rule = rule.with_constraint(constraint);
        }
        rule
    }
}

fuzz_target!(|input: EvaluateInput| {
    let chain = CHAINS[usize::from(input.chain_selector) % CHAINS.len()];
    let Ok(descriptor) = chains::by_id(chain) else {
        return;
    };
    let constants = StaticMagicConstants::new()
        .with_address("treasury", "cosmos", "cosmos1treasury")
        .with_address("vault", "thorchain", "thor1vault")
        .with_address("vault", "mayachain", "maya1vault");
    let Ok(engine) = PolicyEngine::builder(descriptor)
        .magic_constants(constants)
        .build()
    else {
        return;
    };

    let rule = input.rule();
    let first = engine.evaluate(&rule, &input.tx);
    let second = engine.evaluate(&rule, &input.tx);
    assert_eq!(first, second, "evaluation must be deterministic");

    if rule.effect != Effect::Allow {
        assert!(first.is_err(), "non-allow rule passed evaluation");
    }

    let _ = engine.sender(&input.tx);
});
