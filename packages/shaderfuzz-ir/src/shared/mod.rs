//! Shared module - Common types and utilities
//!
//! Types shared across all features: the AST data model, the ports onto
//! external collaborators and the traversal utilities.

pub mod constants;
pub mod models;
pub mod ports;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use utils::scope_tree::ScopeTree;
