/*
 * Shaderfuzz IR - Scope-Aware Shader Transformations
 *
 * Feature-First Hexagonal Architecture:
 * - shared/         : AST models, scope tree, positional addressing, ports
 * - features/       : Vertical slices (scope resolution → mutation points,
 *                     vectorization reduction, dead globals → opportunity sessions)
 * - infrastructure/ : Port implementations (declared-type oracle, random sources)
 * - config/         : Session configuration (YAML/JSON)
 *
 * Every pass is a pure, single-threaded scan of the current AST followed by
 * an in-place rewrite; all randomness goes through an injected source.
 */

// Crate-level lint configuration
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Port implementations
pub mod infrastructure;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{MutationConfig, ReductionConfig, SessionConfig};
pub use errors::{Result, ShaderFuzzError};
pub use features::dead_globals::{strip_unused_globals, DeadGlobalEliminator, StripReport};
pub use features::mutation_points::{IdentityKind, MutationPoint, MutationPointFinder};
pub use features::opportunity::{
    Opportunity, OpportunityFinder, OpportunityId, OpportunitySession, SessionSummary,
};
pub use features::scope_resolution::{walk_program, ScopeListener, ScopeTree, ScopedWalker};
pub use features::vectorization::{
    MergeProvenance, VectorizationFinder, VectorizationReductionOpportunity,
};
pub use infrastructure::{CannedRandom, DeclaredTypeOracle, SeededRandom, ZeroRandom};
pub use shared::models::{Program, ShadingLanguageVersion, Type};
pub use shared::ports::{RandomSource, TypeOracle};
