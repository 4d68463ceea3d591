//! Scope resolution application layer

mod walker;

pub use walker::{walk_program, ScopedWalker};
