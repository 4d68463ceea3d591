/*
 * Mutation Points
 *
 * Fuzzing-side pass: find read sub-expressions where an identity wrapper
 * can be injected, and inject one.
 *
 * Architecture:
 * - Domain: MutationPoint, IdentityKind
 * - Application: MutationPointFinder (scan), MutationPoint::apply
 */

pub mod application;
pub mod domain;

pub use application::MutationPointFinder;
pub use domain::{IdentityKind, MutationPoint};
