//! Ports onto external collaborators (Hexagonal Architecture)

pub mod random_source;
pub mod type_oracle;

pub use random_source::{choose, RandomSource};
pub use type_oracle::TypeOracle;
