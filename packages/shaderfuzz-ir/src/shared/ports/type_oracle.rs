//! Type Oracle port
//!
//! Narrow type-query interface onto an external type checker.

use crate::shared::models::{Expr, Type};
use crate::shared::utils::scope_tree::ScopeTree;

/// Answers "what is the semantic type of this expression?"
///
/// `scope` is the scope tree at the expression's position. `None` means the
/// oracle cannot tell; callers treat that conservatively.
///
/// # Implementors
/// - `DeclaredTypeOracle` (infrastructure/declared_type_oracle.rs)
pub trait TypeOracle {
    fn type_of(&self, expr: &Expr, scope: &ScopeTree) -> Option<Type>;
}
