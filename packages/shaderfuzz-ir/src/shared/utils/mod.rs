//! Utility modules shared across features
//!
//! - `scope_tree`: persistent scope chain for symbol resolution
//! - `ast_visit`: expression ordinals and statement paths

pub mod ast_visit;
pub mod scope_tree;

// Re-exports for convenience
pub use ast_visit::{
    count_exprs, enclosing_stmts_mut, expr_at, expr_at_mut, exprs_in_order, StmtPath,
};
pub use scope_tree::{ScopeError, ScopeTree};
