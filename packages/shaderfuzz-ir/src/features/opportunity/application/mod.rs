mod finders;
mod session;

pub use session::{OpportunitySession, SessionSummary};
