/*
 * Infrastructure Layer - Adapters for shared ports
 *
 * HEXAGONAL ARCHITECTURE:
 * - Implements shared ports (RandomSource, TypeOracle)
 * - rand-backed seeded randomness
 */

pub mod declared_type_oracle;
pub mod random;

pub use declared_type_oracle::DeclaredTypeOracle;
pub use random::{CannedRandom, SeededRandom, ZeroRandom};
