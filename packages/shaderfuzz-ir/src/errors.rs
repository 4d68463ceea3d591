//! Error types for shaderfuzz-ir
//!
//! Scans never fail: illegal sites are filtered, not reported. Errors come
//! from building a session (configuration) and from decoding merged names
//! when asked to directly. Applying a stale opportunity is a caller bug and
//! panics instead.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::vectorization::ProvenanceError;
use crate::shared::utils::ScopeError;

/// Main error type for shaderfuzz-ir operations
#[derive(Debug, Error)]
pub enum ShaderFuzzError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scope error
    #[error("Scope error: {0}")]
    Scope(#[from] ScopeError),

    /// Merged name did not decode
    #[error("Provenance error: {0}")]
    Provenance(#[from] ProvenanceError),
}

/// Result type alias for shaderfuzz-ir operations
pub type Result<T> = std::result::Result<T, ShaderFuzzError>;
