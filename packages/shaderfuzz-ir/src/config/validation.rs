//! Configuration validation
//!
//! Provides the validation trait and shared field validators.

use super::error::{ConfigError, ConfigResult};

// ═══════════════════════════════════════════════════════════════════════════
// Validatable Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use shaderfuzz_ir::config::Validatable;
///
/// fn start_session<C: Validatable>(config: C) -> Result<(), ConfigError> {
///     config.validate()?;
///     // ... build session
/// }
/// ```
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Field validators
// ═══════════════════════════════════════════════════════════════════════════

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Reject `value` unless it is a shader identifier
pub fn validate_identifier(field: &str, value: &str) -> ConfigResult<()> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(ConfigError::invalid_identifier(field, value))
    }
}
