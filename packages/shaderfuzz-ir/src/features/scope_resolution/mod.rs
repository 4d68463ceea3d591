/*
 * Scope Resolution
 *
 * Scope tree and the single scope-aware traversal every pass builds on.
 *
 * Architecture:
 * - Domain: DeclSite, DeclLocation, ExprSite (positional facts)
 * - Application: ScopedWalker (one depth-first walk per scan)
 * - Ports: ScopeListener (passes observe the walk)
 *
 * Scope state is transient: a fresh tree is threaded through every walk
 * and dropped at its end.
 */

pub mod application;
pub mod domain;
pub mod ports;

pub use application::{walk_program, ScopedWalker};
pub use domain::{DeclLocation, DeclSite, ExprSite, ForHeaderSlot};
pub use ports::ScopeListener;

// The tree itself is shared infrastructure
pub use crate::shared::utils::scope_tree::{ScopeError, ScopeTree};
