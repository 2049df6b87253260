//! Command input parsing.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use recipe_core::{RecipeError, Rule};

/// Decode a transaction given on the command line.
///
/// Input that is entirely hex digits (after an optional `0x`/`0X`) is read as
/// hex; anything else is read as standard base64. Surrounding whitespace is
/// ignored.
///
/// # Errors
///
/// Returns [`RecipeError::InvalidInput`] if the input is empty or decodes as
/// neither.
pub fn decode_tx_input(input: &str) -> Result<Vec<u8>, RecipeError> {
    let trimmed = input.trim();
    let unprefixed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if unprefixed.is_empty() {
        return Err(RecipeError::invalid_input("transaction is empty"));
    }

    if unprefixed.chars().all(|c| c.is_ascii_hexdigit()) {
        return hex::decode(unprefixed)
            .map_err(|e| RecipeError::invalid_input(format!("invalid transaction hex: {e}")));
    }

    STANDARD
        .decode(trimmed)
        .map_err(|e| RecipeError::invalid_input(format!("transaction is neither hex nor base64: {e}")))
}

/// Read and parse a JSON rule file.
///
/// # Errors
///
/// Returns [`RecipeError::InvalidInput`] if the file cannot be read or is not
/// a valid rule.
pub fn load_rule(path: &Path) -> Result<Rule, RecipeError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        RecipeError::invalid_input(format!("failed to read rule {}: {e}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        RecipeError::invalid_input(format!("invalid rule {}: {e}", path.display()))
    })
}
