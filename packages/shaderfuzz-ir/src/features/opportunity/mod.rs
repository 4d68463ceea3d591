/*
 * Opportunity
 *
 * Common shape of every pass: scan a program into opportunities, apply
 * one, scan again.
 *
 * Architecture:
 * - Domain: Opportunity (closed set of variants), OpportunityId
 * - Ports: OpportunityFinder
 * - Application: OpportunitySession (random choice, step/exhaust),
 *   finder adapters for mutation points and vectorization
 *
 * Opportunities are only valid for the exact tree they were found in.
 */

pub mod application;
pub mod domain;
pub mod ports;

pub use application::{OpportunitySession, SessionSummary};
pub use domain::{Opportunity, OpportunityId};
pub use ports::OpportunityFinder;
