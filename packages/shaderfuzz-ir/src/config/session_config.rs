//! Session configuration types
//!
//! One `SessionConfig` drives a fuzzing or reduction session: the seed of
//! the random source, the globals every pass must keep, which identities
//! mutation points may inject and how merged variables are named.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::{validate_identifier, Validatable};
use crate::infrastructure::random::SeededRandom;
use crate::shared::constants::{globals, merging};

// ============================================================================
// Mutation
// ============================================================================

/// Identity transformations a mutation point may inject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// `(e)`
    pub parenthesize: bool,
    /// `(e) + 0`, `(e) * 1`
    pub arithmetic_identity: bool,
    /// `!(!(e))`, `true && (e)`
    pub boolean_identity: bool,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            parenthesize: true,
            arithmetic_identity: true,
            boolean_identity: true,
        }
    }
}

impl MutationConfig {
    /// Builder: Enable/disable `(e)`
    pub fn parenthesize(mut self, v: bool) -> Self {
        self.parenthesize = v;
        self
    }

    /// Builder: Enable/disable arithmetic identities
    pub fn arithmetic_identity(mut self, v: bool) -> Self {
        self.arithmetic_identity = v;
        self
    }

    /// Builder: Enable/disable boolean identities
    pub fn boolean_identity(mut self, v: bool) -> Self {
        self.boolean_identity = v;
        self
    }
}

impl Validatable for MutationConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(self.parenthesize || self.arithmetic_identity || self.boolean_identity) {
            return Err(ConfigError::NoIdentityEnabled {
                hint: "Enable at least one of parenthesize, arithmetic_identity, boolean_identity"
                    .to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Reduction
// ============================================================================

/// Vectorization reduction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    /// Prefix of merged vector variable names
    pub merged_prefix: String,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            merged_prefix: merging::MERGED_PREFIX.to_string(),
        }
    }
}

impl Validatable for ReductionConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_identifier("merged_prefix", &self.merged_prefix)?;
        if self.merged_prefix.ends_with(|c: char| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(format!(
                "merged_prefix '{}' must not end in a digit; the constituent count follows it",
                self.merged_prefix
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Session
// ============================================================================

const MAX_STEPS_LIMIT: usize = 1_000_000;

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Seed of the default random source
    pub seed: u64,

    /// Global that is never removed (controls injected dead code)
    pub injection_switch: String,

    /// Upper bound on applications per `exhaust` call (1..=1000000)
    pub max_steps: usize,

    pub mutation: MutationConfig,

    pub reduction: ReductionConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            injection_switch: globals::INJECTION_SWITCH.to_string(),
            max_steps: 1000,
            mutation: MutationConfig::default(),
            reduction: ReductionConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Builder: Set seed
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Builder: Set max_steps
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }

    /// Builder: Adjust mutation settings
    pub fn mutation(mut self, f: impl FnOnce(MutationConfig) -> MutationConfig) -> Self {
        self.mutation = f(self.mutation);
        self
    }

    /// Seeded random source for this session
    pub fn random_source(&self) -> SeededRandom {
        SeededRandom::new(self.seed)
    }
}

impl Validatable for SessionConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_identifier("injection_switch", &self.injection_switch)?;

        if self.max_steps == 0 || self.max_steps > MAX_STEPS_LIMIT {
            return Err(ConfigError::range_with_hint(
                "max_steps",
                self.max_steps,
                1,
                MAX_STEPS_LIMIT,
                "A session must be allowed at least one step",
            ));
        }

        self.mutation.validate()?;
        self.reduction.validate()
    }
}
