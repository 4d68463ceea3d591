//! Random Source port
//!
//! All randomized choices go through this trait so that a seed reproduces
//! an identical sequence of fuzzing or reduction steps.

/// Seedable source of bounded random integers
///
/// # Implementors
/// - `SeededRandom` (infrastructure/random.rs)
/// - `CannedRandom`, `ZeroRandom` (infrastructure/random.rs, replay/testing)
pub trait RandomSource {
    /// Integer in `[0, bound)`; `bound` must be non-zero
    fn next_int(&mut self, bound: usize) -> usize;

    fn next_bool(&mut self) -> bool {
        self.next_int(2) == 1
    }
}

/// Pick one element of `candidates`, or `None` when empty
pub fn choose<'a, T>(random: &mut dyn RandomSource, candidates: &'a [T]) -> Option<&'a T> {
    if candidates.is_empty() {
        return None;
    }
    candidates.get(random.next_int(candidates.len()))
}
