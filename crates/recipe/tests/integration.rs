//! Integration tests for the `recipe` binary crate.
//!
//! - `e2e` - Configuration-driven evaluation, signing, CLI and property tests

mod common;
mod e2e;
