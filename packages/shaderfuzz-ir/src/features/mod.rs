//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/      - Pure models (no traversal)
//! - ports/       - Interface definitions (traits)
//! - application/ - Scans and rewrites

// Shared traversal and scope tree
pub mod scope_resolution;

// Fuzzing: identity injection sites
pub mod mutation_points;

// Reduction: undo variable merging
pub mod vectorization;

// Reduction: drop unread globals
pub mod dead_globals;

// Scan/apply sessions over all of the above
pub mod opportunity;
