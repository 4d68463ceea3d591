/*
 * Vectorization Reduction
 *
 * Reduction-side pass: undo variable merging one constituent at a time.
 * A merged vector's name encodes which original variables occupy which
 * components; each constituent with a safe, pure access pattern can be
 * declared again and have its accesses redirected to it.
 *
 * Architecture:
 * - Domain: MergeProvenance (name decoding), VectorizationReductionOpportunity
 * - Application: VectorizationFinder (scan), VectorizationReductionOpportunity::apply
 *
 * Full decomposition of an N-constituent vector takes N applications with a
 * re-scan in between; a merged constituent is extracted as a unit and its
 * own constituents only show up on the next scan.
 */

pub mod application;
pub mod domain;

pub use application::VectorizationFinder;
pub use domain::{Constituent, MergeProvenance, ProvenanceError, VectorizationReductionOpportunity};
