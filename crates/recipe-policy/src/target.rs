//! Target validation.
//!
//! Checks a transaction's destination against the rule's [`Target`]:
//!
//! - [`Target::Unspecified`] always passes
//! - Any other target is only defined for send messages; this is checked
//!   before the target type, so an unknown type on a deposit reports the kind
//! - [`Target::Address`] requires the recipient to equal the address exactly
//! - [`Target::MagicConstant`] resolves the constant for the resource's
//!   chain, then applies the same exact comparison
//!
//! Comparison is case-sensitive and does not trim whitespace.

use recipe_chain::CosmosMessage;
use recipe_core::{MessageKind, ResourcePath, Target, TargetError};

use crate::resolver::{MagicConstantRegistry, DEFAULT_CONTEXT};

/// Validate the destination of `message` against `target`.
///
/// # Errors
///
/// - [`TargetError::UnsupportedForKind`] for a restricting target on a non-send message
/// - [`TargetError::EmptyTargetAddress`] if the expected address is empty
/// - [`TargetError::AddressMismatch`] if the recipient differs
/// - [`TargetError::ResolverFailed`] if the magic constant cannot be resolved
/// - [`TargetError::UnsupportedTargetType`] for unknown target types
pub fn validate_target(
    resource: &ResourcePath,
    target: &Target,
    message: &CosmosMessage,
    constants: &dyn MagicConstantRegistry,
) -> Result<(), TargetError> {
    if target.is_unspecified() {
        return Ok(());
    }

    let kind = message.kind();
    let recipient = match (kind, message.recipient()) {
        (MessageKind::Send, Some(recipient)) => recipient,
        _ => return Err(TargetError::UnsupportedForKind { kind }),
    };

    match target {
        Target::Address { address } => check_address(address, recipient),
        Target::MagicConstant { magic_constant } => {
            let resolved = constants
                .resolver(magic_constant)
                .and_then(|resolver| {
                    resolver.resolve(magic_constant, &resource.chain_id, DEFAULT_CONTEXT)
                })
                .map_err(|source| TargetError::ResolverFailed {
                    constant: magic_constant.clone(),
                    source,
                })?;
            check_address(&resolved.address, recipient)
        }
        Target::Unrecognized => Err(TargetError::UnsupportedTargetType),
        Target::Unspecified => Ok(()),
    }
}

fn check_address(expected: &str, actual: &str) -> Result<(), TargetError> {
    if expected.is_empty() {
        return Err(TargetError::EmptyTargetAddress);
    }

    if expected == actual {
        Ok(())
    } else {
        Err(TargetError::AddressMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}
