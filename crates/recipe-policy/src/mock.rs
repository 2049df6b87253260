//! Collaborator test doubles.
//!
//! Deterministic stand-ins for the comparator and magic-constant
//! collaborators, used to check which collaborators an evaluation reached.
//!
//! Available in this crate's tests and, with the `mock` feature, to other
//! crates.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use alloy_primitives::U256;
use recipe_core::{ComparatorError, ParameterConstraint, ResolverError};

use crate::comparator::Comparator;
use crate::resolver::{MagicConstantRegistry, Resolution, Resolver};

/// One call made to a [`RecordingComparator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparatorCall {
    /// Chain id passed by the engine.
    pub chain_id: String,
    /// Parameter name.
    pub parameter: String,
    /// The value, rendered as a string.
    pub value: String,
}

/// Comparator that records every call and accepts every value.
///
/// Clones share the same call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingComparator {
    calls: Arc<Mutex<Vec<ComparatorCall>>>,
}

impl RecordingComparator {
    /// A comparator with an empty call log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The calls recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ComparatorCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, chain_id: &str, parameter: &str, value: String) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ComparatorCall {
                chain_id: chain_id.to_string(),
                parameter: parameter.to_string(),
                value,
            });
    }
}

impl Comparator<str> for RecordingComparator {
    fn assert_arg(
        &self,
        chain_id: &str,
        _constraints: &[ParameterConstraint],
        parameter: &str,
        value: &str,
    ) -> Result<(), ComparatorError> {
        self.record(chain_id, parameter, value.to_string());
        Ok(())
    }
}

impl Comparator<U256> for RecordingComparator {
    fn assert_arg(
        &self,
        chain_id: &str,
        _constraints: &[ParameterConstraint],
        parameter: &str,
        value: &U256,
    ) -> Result<(), ComparatorError> {
        self.record(chain_id, parameter, value.to_string());
        Ok(())
    }
}

/// Registry whose resolver always fails.
#[derive(Debug, Clone)]
pub struct FailingResolver {
    reason: String,
}

impl FailingResolver {
    /// A resolver failing with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl MagicConstantRegistry for FailingResolver {
    fn resolver(&self, _constant: &str) -> Result<&dyn Resolver, ResolverError> {
        Ok(self)
    }
}

impl Resolver for FailingResolver {
    fn resolve(
        &self,
        _constant: &str,
        _chain_id: &str,
        _context: &str,
    ) -> Result<Resolution, ResolverError> {
        Err(ResolverError::failed(self.reason.clone()))
    }
}

/// Registry wrapper counting resolver lookups.
///
/// Clones share the same counter.
pub struct CountingRegistry<R> {
    inner: Arc<R>,
    lookups: Arc<AtomicUsize>,
}

impl<R> CountingRegistry<R> {
    /// Wrap `inner`.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner: Arc::new(inner),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of resolver lookups so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl<R> Clone for CountingRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            lookups: Arc::clone(&self.lookups),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for CountingRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingRegistry")
            .field("inner", &self.inner)
            .field("lookups", &self.lookups())
            .finish()
    }
}

impl<R: MagicConstantRegistry> MagicConstantRegistry for CountingRegistry<R> {
    fn resolver(&self, constant: &str) -> Result<&dyn Resolver, ResolverError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.resolver(constant)
    }
}
