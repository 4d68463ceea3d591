//! Opportunity Finder port
//!
//! A session drives any number of finders through this trait.

use crate::features::opportunity::domain::Opportunity;
use crate::shared::models::Program;

/// Scans a program for opportunities of one kind
///
/// # Implementors
/// - `MutationPointFinder` (mutation_points)
/// - `VectorizationFinder` (vectorization)
pub trait OpportunityFinder {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Every opportunity legal in `program`, in a deterministic order
    fn find_opportunities(&self, program: &Program) -> Vec<Opportunity>;
}
