//! Deterministic synthetic data generation.

/// Generates `count` consecutive integers starting at `start`, shuffled with
/// a fixed-seed Fisher-Yates pass. The same seed always produces the same
/// permutation.
pub fn shuffled_range(start: i64, count: usize, seed: u64) -> Vec<i64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut items: Vec<i64> = (start..start + count as i64).collect();
    for i in (1..items.len()).rev() {
        items.swap(i, rng.usize(..=i));
    }
    items
}

/// A small fixed vocabulary with repeated words and mixed casing, handy for
/// grouping, distinct and comparer tests.
pub fn sample_words() -> Vec<&'static str> {
    vec![
        "pear", "Apple", "plum", "apple", "fig", "Pear", "fig", "quince",
    ]
}

#[cfg(test)]
mod tests {
    use super::shuffled_range;

    #[test]
    fn shuffle_is_a_permutation_and_deterministic() {
        let a = shuffled_range(10, 50, 3);
        let b = shuffled_range(10, 50, 3);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        let expected: Vec<i64> = (10..60).collect();
        assert_eq!(sorted, expected);
    }
}
