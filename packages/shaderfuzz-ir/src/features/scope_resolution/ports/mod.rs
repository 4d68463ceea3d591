//! Scope Listener port
//!
//! Passes observe the shared traversal through this trait instead of
//! re-implementing scoping rules.

use crate::features::scope_resolution::domain::{DeclSite, ExprSite};
use crate::shared::models::{Expr, Symbol};
use crate::shared::utils::ScopeTree;

/// Receives traversal events from `ScopedWalker`
///
/// # Implementors
/// - `MutationPointCollector` (mutation_points)
/// - `MergeAnalysis` (vectorization)
/// - `GlobalUsage` (dead_globals)
pub trait ScopeListener {
    /// A variable is about to be declared.
    ///
    /// `scope` is the scope it is declared into; `symbol` is not yet visible
    /// in it, so earlier declarations of the same frame can be inspected.
    fn on_declare(&mut self, _symbol: &Symbol, _site: &DeclSite, _scope: &ScopeTree) {}

    /// An expression is visited, before its children.
    fn on_expr(&mut self, _expr: &Expr, _site: &ExprSite, _scope: &ScopeTree) {}
}
