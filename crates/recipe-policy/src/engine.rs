//! Policy evaluation engine.
//!
//! The [`PolicyEngine`] decides whether a transaction satisfies a rule. It is
//! built once per chain integration and evaluates rules without mutating any
//! state.
//!
//! # Evaluation Order
//!
//! Evaluation is fail-fast; the first failing stage aborts with its error:
//!
//! 1. **Effect** - Only `ALLOW` rules are evaluated
//! 2. **Resource** - `chain.protocol[.function]` must parse and name this chain
//! 3. **Decode** - The transaction must decode (at most 32 KiB)
//! 4. **Message count** - Exactly one message
//! 5. **Message type** - The type tag must be registered for the chain
//! 6. **Compatibility** - The resource's protocol must expect the detected kind
//! 7. **Target** - The destination must match the rule's target
//! 8. **Parameters** - Every parameter constraint must hold
//!
//! # Thread Safety
//!
//! [`PolicyEngine`] is `Send + Sync` and can be shared across threads; each
//! evaluation works on its own decoded copy of the transaction.
//!
//! # Example
//!
//! ```
//! use recipe_chain::chains;
//! use recipe_core::{ParameterConstraint, PolicyError, Rule};
//! use recipe_policy::PolicyEngine;
//!
//! let engine = PolicyEngine::builder(chains::cosmos_hub().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let rule = Rule::allow("cosmos.atom.transfer")
//!     .with_constraint(ParameterConstraint::max("amount", "2000000"));
//!
//! // Empty input never gets past decoding
//! assert!(matches!(engine.evaluate(&rule, &[]), Err(PolicyError::Decode(_))));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use recipe_chain::{chains, ChainDescriptor, CosmosMessage, DecodedTransaction};
use recipe_core::{
    ConfigError, Effect, EngineConfig, MessageKind, PolicyError, ResourcePath, Rule,
};

use crate::comparator::Comparators;
use crate::params::validate_constraints;
use crate::resolver::{MagicConstantRegistry, StaticMagicConstants};
use crate::target::validate_target;

/// Rule evaluator for one chain integration.
#[derive(Clone)]
pub struct PolicyEngine {
    descriptor: ChainDescriptor,
    protocols: BTreeMap<String, MessageKind>,
    constants: Arc<dyn MagicConstantRegistry>,
    comparators: Comparators,
}

impl fmt::Debug for PolicyEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyEngine")
            .field("chain", &self.descriptor.id())
            .field("protocols", &self.protocols)
            .finish_non_exhaustive()
    }
}

impl PolicyEngine {
    /// Start building an engine for `descriptor`.
    #[must_use]
    pub fn builder(descriptor: ChainDescriptor) -> PolicyEngineBuilder {
        PolicyEngineBuilder {
            descriptor,
            protocols: BTreeMap::new(),
            constants: None,
            comparators: Comparators::standard(),
        }
    }

    /// Build an engine from a configuration file's contents.
    ///
    /// The chain must be built in; an empty `[protocols]` table falls back to
    /// the chain's defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownChain`] for unknown chains and
    /// [`ConfigError::InvalidConfiguration`] for invalid protocol maps.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let descriptor = chains::by_id(&config.chain)?;

        config
            .protocols
            .iter()
            .fold(Self::builder(descriptor), |builder, (id, kind)| {
                builder.protocol(id.clone(), *kind)
            })
            .magic_constants(StaticMagicConstants::from_config(config))
            .build()
    }

    /// The chain this engine evaluates for.
    #[must_use]
    pub fn descriptor(&self) -> &ChainDescriptor {
        &self.descriptor
    }

    /// The protocol id to expected message kind map in effect.
    #[must_use]
    pub fn protocols(&self) -> &BTreeMap<String, MessageKind> {
        &self.protocols
    }

    /// Evaluate `rule` against the raw transaction `tx_bytes`.
    ///
    /// Returns `Ok(())` only if every stage passes.
    ///
    /// # Errors
    ///
    /// Returns the [`PolicyError`] of the first failing stage.
    pub fn evaluate(&self, rule: &Rule, tx_bytes: &[u8]) -> Result<(), PolicyError> {
        match self.run(rule, tx_bytes) {
            Ok(()) => {
                tracing::info!(
                    chain = %self.descriptor.id(),
                    resource = %rule.resource,
                    "Policy evaluation passed"
                );
                Ok(())
            }
            Err(err) => {
                tracing::debug!(
                    stage = err.stage(),
                    chain = %self.descriptor.id(),
                    resource = %rule.resource,
                    error = %err,
                    "Policy evaluation failed"
                );
                Err(err)
            }
        }
    }

    /// Extract the sender address of the transaction's single message.
    ///
    /// # Errors
    ///
    /// Returns decode, message-count, message-type and extraction errors.
    pub fn sender(&self, tx_bytes: &[u8]) -> Result<String, PolicyError> {
        let (_, message) = self.detect(tx_bytes)?;
        Ok(self.descriptor.extract_sender(&message)?)
    }

    fn run(&self, rule: &Rule, tx_bytes: &[u8]) -> Result<(), PolicyError> {
        if rule.effect != Effect::Allow {
            return Err(PolicyError::RuleNotAllow {
                effect: rule.effect,
            });
        }

        let resource: ResourcePath = rule.resource.parse()?;

        if resource.chain_id != self.descriptor.id() {
            return Err(PolicyError::ChainMismatch {
                expected: self.descriptor.id().to_string(),
                actual: resource.chain_id,
            });
        }

        let (tx, message) =
            self.detect_checked(tx_bytes, |kind| self.check_compatibility(&resource, kind))?;

        validate_target(&resource, &rule.target, &message, self.constants.as_ref())?;

        validate_constraints(
            &resource,
            &rule.parameter_constraints,
            &tx,
            &message,
            &self.comparators,
        )?;

        Ok(())
    }

    fn check_compatibility(
        &self,
        resource: &ResourcePath,
        kind: MessageKind,
    ) -> Result<(), PolicyError> {
        let expected = self
            .protocols
            .get(&resource.protocol_id)
            .copied()
            .ok_or_else(|| PolicyError::UnsupportedProtocol {
                protocol: resource.protocol_id.clone(),
            })?;

        if expected == kind {
            Ok(())
        } else {
            Err(PolicyError::ResourceMessageMismatch {
                protocol: resource.protocol_id.clone(),
                expected,
                actual: kind,
            })
        }
    }

    fn detect(&self, tx_bytes: &[u8]) -> Result<(DecodedTransaction, CosmosMessage), PolicyError> {
        self.detect_checked(tx_bytes, |_| Ok(()))
    }

    /// Decode, require one message and detect its kind, then run `check` on
    /// the kind before the payload is unpacked.
    fn detect_checked(
        &self,
        tx_bytes: &[u8],
        check: impl FnOnce(MessageKind) -> Result<(), PolicyError>,
    ) -> Result<(DecodedTransaction, CosmosMessage), PolicyError> {
        let tx = self.descriptor.decode(tx_bytes)?;
        let any = tx
            .single_message()
            .map_err(|count| PolicyError::MessageCountNotOne { count })?;
        let kind = self.descriptor.registry().lookup(&any.type_url)?;

        check(kind)?;

        let message = CosmosMessage::unpack(kind, any)?;
        Ok((tx, message))
    }
}

/// Builder for [`PolicyEngine`].
pub struct PolicyEngineBuilder {
    descriptor: ChainDescriptor,
    protocols: BTreeMap<String, MessageKind>,
    constants: Option<Arc<dyn MagicConstantRegistry>>,
    comparators: Comparators,
}

impl fmt::Debug for PolicyEngineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyEngineBuilder")
            .field("chain", &self.descriptor.id())
            .field("protocols", &self.protocols)
            .finish_non_exhaustive()
    }
}

impl PolicyEngineBuilder {
    /// Map `protocol` to the message kind its rules must match.
    ///
    /// When no protocol is given, the descriptor's built-in map is used.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>, kind: MessageKind) -> Self {
        self.protocols.insert(protocol.into(), kind);
        self
    }

    /// Use `registry` for magic-constant targets.
    ///
    /// Without one, every magic constant is unknown.
    #[must_use]
    pub fn magic_constants(mut self, registry: impl MagicConstantRegistry + 'static) -> Self {
        self.constants = Some(Arc::new(registry));
        self
    }

    /// Use `comparators` for parameter constraints.
    #[must_use]
    pub fn comparators(mut self, comparators: Comparators) -> Self {
        self.comparators = comparators;
        self
    }

    /// Build the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] if a protocol is not one
    /// the descriptor lists.
    pub fn build(self) -> Result<PolicyEngine, ConfigError> {
        let protocols = if self.protocols.is_empty() {
            self.descriptor.default_protocol_kinds().clone()
        } else {
            self.protocols
        };

        if let Some(unknown) = protocols
            .keys()
            .find(|id| !self.descriptor.supports_protocol(id))
        {
            return Err(ConfigError::invalid(format!(
                "protocol {unknown} is not supported by chain {}",
                self.descriptor.id()
            )));
        }

        Ok(PolicyEngine {
            descriptor: self.descriptor,
            protocols,
            constants: self
                .constants
                .unwrap_or_else(|| Arc::new(StaticMagicConstants::new())),
            comparators: self.comparators,
        })
    }
}
