//! Exit code constants for CLI commands.

use recipe_core::RecipeError;

/// Successful operation.
pub const EXIT_SUCCESS: i32 = 0;

/// The policy engine denied the transaction.
pub const EXIT_POLICY_DENIED: i32 = 1;

/// Any other failure (configuration, invalid input, malformed rule, etc.).
pub const EXIT_ERROR: i32 = 2;

/// Exit code for `err`.
#[must_use]
pub const fn exit_code(err: &RecipeError) -> i32 {
    if err.is_denial() {
        EXIT_POLICY_DENIED
    } else {
        EXIT_ERROR
    }
}
