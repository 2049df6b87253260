//! Parameter extraction and constraint validation.
//!
//! Rules constrain named parameters of a message. [`extract`] reads a
//! parameter as a typed [`Value`]; [`validate_constraints`] extracts every
//! constrained parameter and routes its value to the comparator for its type.
//!
//! # Parameters
//!
//! | kind | parameter | value |
//! |---|---|---|
//! | send | `recipient` | string, the to-address |
//! | send | `amount` | integer, the single coin's amount |
//! | send | `denom` | string, the single coin's denomination |
//! | send | `memo` | string, the transaction memo |
//! | deposit | `amount` | integer, the single coin's amount |
//! | deposit | `from_asset` | string, the single coin's asset as `CHAIN.SYMBOL` |
//! | deposit | `memo` | string, the deposit memo (transaction memo if empty) |
//!
//! More than one coin is always an error, never summed.

use recipe_chain::{CosmosMessage, DecodedTransaction};
use recipe_core::{ConstraintError, ExtractError, ParameterConstraint, ResourcePath, Value};

use crate::comparator::Comparators;

/// Extract `parameter` from `message`.
///
/// # Errors
///
/// Returns [`ExtractError::UnsupportedParameter`] for names not defined for
/// the message kind, and the coin and amount errors of
/// [`CosmosMessage::amount`], [`CosmosMessage::denom`] and
/// [`CosmosMessage::from_asset`].
pub fn extract(
    parameter: &str,
    tx: &DecodedTransaction,
    message: &CosmosMessage,
) -> Result<Value, ExtractError> {
    match (message, parameter) {
        (CosmosMessage::Send(send), "recipient") => Ok(Value::String(send.to_address.clone())),
        (CosmosMessage::Send(_), "denom") => message.denom().map(|d| Value::String(d.to_string())),
        (CosmosMessage::Send(_), "memo") => Ok(Value::String(tx.memo.clone())),
        (CosmosMessage::Deposit(deposit), "memo") => {
            let memo = if deposit.memo.is_empty() {
                &tx.memo
            } else {
                &deposit.memo
            };
            Ok(Value::String(memo.clone()))
        }
        (CosmosMessage::Deposit(_), "from_asset") => message.from_asset().map(Value::String),
        (CosmosMessage::Send(_) | CosmosMessage::Deposit(_), "amount") => {
            message.amount().map(Value::Integer)
        }
        (other, parameter) => Err(ExtractError::unsupported_parameter(
            parameter,
            other.kind(),
        )),
    }
}

/// Validate every constraint in `constraints` against `message`.
///
/// Constraints are checked in order, each on its own, so two bounds on the
/// same parameter must both hold. The first failure is returned.
///
/// # Errors
///
/// - [`ConstraintError::Extraction`] if a parameter cannot be extracted
/// - [`ConstraintError::UnsupportedValueType`] if no comparator is routed for the value's type
/// - [`ConstraintError::Violation`] or [`ConstraintError::UnsupportedConstraint`]
///   for comparator failures
pub fn validate_constraints(
    resource: &ResourcePath,
    constraints: &[ParameterConstraint],
    tx: &DecodedTransaction,
    message: &CosmosMessage,
    comparators: &Comparators,
) -> Result<(), ConstraintError> {
    let chain_id = resource.chain_id.as_str();

    for constraint in constraints {
        let parameter = constraint.parameter_name.as_str();
        let value = extract(parameter, tx, message)?;
        // One constraint per call; several constraints may share a parameter.
        let current = std::slice::from_ref(constraint);

        let outcome = match &value {
            Value::String(s) => comparators
                .string()
                .map(|cmp| cmp.assert_arg(chain_id, current, parameter, s.as_str())),
            Value::Integer(n) => comparators
                .integer()
                .map(|cmp| cmp.assert_arg(chain_id, current, parameter, n)),
        };

        match outcome {
            Some(Ok(())) => {}
            Some(Err(source)) => return Err(ConstraintError::from_comparator(parameter, source)),
            None => {
                return Err(ConstraintError::UnsupportedValueType {
                    parameter: parameter.to_string(),
                    value_type: value.type_name(),
                })
            }
        }
    }

    Ok(())
}
