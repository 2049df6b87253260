//! Constraint comparators.
//!
//! A [`Comparator`] owns the semantics of constraint types: given the rule's
//! constraints and an extracted value, it decides whether the value is
//! acceptable. The engine only routes values to comparators by type through
//! a [`Comparators`] table; it never interprets constraints itself.
//!
//! # In-Process Comparators
//!
//! | constraint | [`StringComparator`] | [`IntegerComparator`] |
//! |---|---|---|
//! | `any` | pass | pass |
//! | `fixed` | exact equality | numeric equality |
//! | `min` | unsupported | inclusive lower bound |
//! | `max` | unsupported | inclusive upper bound |
//! | `magic_constant` | unsupported | unsupported |
//!
//! A parameter with no declared constraint fails with
//! [`ComparatorError::NotConstrained`]. An optional (`required = false`)
//! string constraint accepts the empty string.
//!
//! # Example
//!
//! ```
//! use recipe_core::{ParameterConstraint, U256};
//! use recipe_policy::comparator::{Comparator, IntegerComparator};
//!
//! let constraints = vec![ParameterConstraint::max("amount", "2000000")];
//!
//! assert!(IntegerComparator
//!     .assert_arg("cosmos", &constraints, "amount", &U256::from(1_000_000u64))
//!     .is_ok());
//! assert!(IntegerComparator
//!     .assert_arg("cosmos", &constraints, "amount", &U256::from(3_000_000u64))
//!     .is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use alloy_primitives::U256;
use recipe_core::{ComparatorError, ConstraintKind, ParameterConstraint};

/// Checks an extracted value of type `T` against the rule's constraints.
///
/// Implementations must be `Send + Sync` so a comparator table can be shared
/// by concurrent evaluations.
pub trait Comparator<T: ?Sized>: Send + Sync + fmt::Debug {
    /// Check `value` of `parameter` against its constraint in `constraints`.
    ///
    /// [`validate_constraints`](crate::params::validate_constraints) passes
    /// exactly the constraint being checked.
    ///
    /// # Errors
    ///
    /// Returns a [`ComparatorError`] describing why the value is rejected.
    fn assert_arg(
        &self,
        chain_id: &str,
        constraints: &[ParameterConstraint],
        parameter: &str,
        value: &T,
    ) -> Result<(), ComparatorError>;
}

/// Comparator routes keyed by value type.
///
/// A missing route makes values of that type unsupported.
#[derive(Debug, Clone)]
pub struct Comparators {
    string: Option<Arc<dyn Comparator<str>>>,
    integer: Option<Arc<dyn Comparator<U256>>>,
}

impl Default for Comparators {
    fn default() -> Self {
        Self::standard()
    }
}

impl Comparators {
    /// Routes to [`StringComparator`] and [`IntegerComparator`].
    #[must_use]
    pub fn standard() -> Self {
        Self {
            string: Some(Arc::new(StringComparator)),
            integer: Some(Arc::new(IntegerComparator)),
        }
    }

    /// A table with no routes.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            string: None,
            integer: None,
        }
    }

    /// Route string values to `comparator`.
    #[must_use]
    pub fn with_string(mut self, comparator: impl Comparator<str> + 'static) -> Self {
        self.string = Some(Arc::new(comparator));
        self
    }

    /// Route integer values to `comparator`.
    #[must_use]
    pub fn with_integer(mut self, comparator: impl Comparator<U256> + 'static) -> Self {
        self.integer = Some(Arc::new(comparator));
        self
    }

    /// The string route.
    #[must_use]
    pub fn string(&self) -> Option<&dyn Comparator<str>> {
        self.string.as_deref()
    }

    /// The integer route.
    #[must_use]
    pub fn integer(&self) -> Option<&dyn Comparator<U256>> {
        self.integer.as_deref()
    }
}

/// Find the constraint declared for `parameter`.
///
/// # Errors
///
/// Returns [`ComparatorError::NotConstrained`] if none is declared.
pub fn find_constraint<'a>(
    constraints: &'a [ParameterConstraint],
    parameter: &str,
) -> Result<&'a ParameterConstraint, ComparatorError> {
    constraints
        .iter()
        .find(|c| c.parameter_name == parameter)
        .ok_or_else(|| ComparatorError::NotConstrained {
            parameter: parameter.to_string(),
        })
}

fn unsupported(kind: &ConstraintKind) -> ComparatorError {
    ComparatorError::Unsupported {
        constraint: kind.name().to_string(),
    }
}

/// Comparator for textual values.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringComparator;

impl Comparator<str> for StringComparator {
    fn assert_arg(
        &self,
        _chain_id: &str,
        constraints: &[ParameterConstraint],
        parameter: &str,
        value: &str,
    ) -> Result<(), ComparatorError> {
        let constraint = &find_constraint(constraints, parameter)?.constraint;

        if !constraint.required && value.is_empty() {
            return Ok(());
        }

        match &constraint.kind {
            ConstraintKind::Any => Ok(()),
            ConstraintKind::Fixed { fixed_value } => {
                if fixed_value == value {
                    Ok(())
                } else {
                    Err(ComparatorError::Mismatch {
                        expected: fixed_value.clone(),
                        actual: value.to_string(),
                    })
                }
            }
            kind @ (ConstraintKind::Min { .. }
            | ConstraintKind::Max { .. }
            | ConstraintKind::MagicConstant { .. }) => Err(unsupported(kind)),
        }
    }
}

/// Comparator for unsigned integer magnitudes.
///
/// Bounds and fixed values are decimal strings in the rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerComparator;

impl IntegerComparator {
    fn parse(raw: &str) -> Result<U256, ComparatorError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ComparatorError::InvalidConstraintValue {
                value: raw.to_string(),
            });
        }
        U256::from_str_radix(raw, 10).map_err(|_| ComparatorError::InvalidConstraintValue {
            value: raw.to_string(),
        })
    }
}

impl Comparator<U256> for IntegerComparator {
    fn assert_arg(
        &self,
        _chain_id: &str,
        constraints: &[ParameterConstraint],
        parameter: &str,
        value: &U256,
    ) -> Result<(), ComparatorError> {
        let constraint = &find_constraint(constraints, parameter)?.constraint;

        match &constraint.kind {
            ConstraintKind::Any => Ok(()),
            ConstraintKind::Fixed { fixed_value } => {
                if Self::parse(fixed_value)? == *value {
                    Ok(())
                } else {
                    Err(ComparatorError::Mismatch {
                        expected: fixed_value.clone(),
                        actual: value.to_string(),
                    })
                }
            }
            ConstraintKind::Max { max_value } => {
                if *value > Self::parse(max_value)? {
                    Err(ComparatorError::AboveMaximum {
                        value: value.to_string(),
                        max: max_value.clone(),
                    })
                } else {
                    Ok(())
                }
            }
            ConstraintKind::Min { min_value } => {
                if *value < Self::parse(min_value)? {
                    Err(ComparatorError::BelowMinimum {
                        value: value.to_string(),
                        min: min_value.clone(),
                    })
                } else {
                    Ok(())
                }
            }
            kind @ ConstraintKind::MagicConstant { .. } => Err(unsupported(kind)),
        }
    }
}
