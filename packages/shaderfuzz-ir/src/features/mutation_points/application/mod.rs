//! Mutation point application layer

mod apply;
mod finder;

pub use finder::MutationPointFinder;
