//! End-to-end test submodules.

pub mod cli_test;
pub mod evaluate_test;
pub mod properties_test;
pub mod signing_test;
