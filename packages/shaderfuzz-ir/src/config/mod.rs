//! Session configuration
//!
//! # Examples
//!
//! ```rust,ignore
//! use shaderfuzz_ir::config::SessionConfig;
//!
//! // Defaults: seed 0, `injectionSwitch` kept, every identity enabled
//! let config = SessionConfig::default().seed(42);
//!
//! // From YAML, validated on load
//! let config = SessionConfig::from_yaml_file("session.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod session_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use session_config::{MutationConfig, ReductionConfig, SessionConfig};
pub use validation::{is_identifier, validate_identifier, Validatable};
