//! Two-sequence combination operators: concatenation, union, intersection,
//! difference and positional pairing.
//!
//! Everything here is lazy; the operators that need membership testing
//! (`union`, `intersect`, `except`) buffer exactly what the test requires and
//! nothing more, paying O(seen) comparer invocations per candidate.

pub mod concat;
pub mod except;
pub mod intersect;
pub mod union;
pub mod zip;

/// Membership scan used by the history-buffering operators. The comparer is
/// invoked as `comparer(needle, element)`.
pub(crate) fn contains_with<T>(haystack: &[T], needle: &T, comparer: impl Fn(&T, &T) -> bool) -> bool {
    haystack.iter().any(|element| comparer(needle, element))
}
