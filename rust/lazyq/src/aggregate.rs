//! Aggregating terminal operators: folds, counting and numeric reduction.
//!
//! The aggregates that require at least one qualifying element (`aggregate`,
//! `sum`, `average`, `max`, `min`) treat an empty input as an error, not as a
//! zero result, even where a zero would be mathematically defined.

use num_traits::{ToPrimitive, Zero};

use crate::error::{Error, ErrorKind, Result};
use crate::sequence::Sequence;

/// Re-attributes an empty-aggregation failure raised by an inner fold to the
/// operator the caller actually invoked; every other error passes through.
fn rename_empty(e: Error, operation: &str) -> Error {
    if matches!(e.kind(), ErrorKind::EmptyAggregation { .. }) {
        Error::empty_aggregation(operation)
    } else {
        e
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Folds the sequence with the first element as the initial accumulator.
    /// Fails with an empty-aggregation error when the sequence is empty.
    pub fn aggregate(self, mut func: impl FnMut(T, T) -> T) -> Result<T> {
        let mut cursor = self.into_cursor();
        let mut acc = match cursor.next() {
            None => return Err(Error::empty_aggregation("aggregate")),
            Some(first) => first?,
        };
        for item in cursor {
            acc = func(acc, item?);
        }
        Ok(acc)
    }

    /// Standard fold: returns `seed` unchanged when the sequence is empty.
    pub fn fold<S>(self, seed: S, mut func: impl FnMut(S, T) -> S) -> Result<S> {
        let mut acc = seed;
        for item in self.into_cursor() {
            acc = func(acc, item?);
        }
        Ok(acc)
    }

    /// Fold whose final accumulator is passed through `result_selector`.
    pub fn fold_with<S, R>(
        self,
        seed: S,
        func: impl FnMut(S, T) -> S,
        result_selector: impl FnOnce(S) -> R,
    ) -> Result<R> {
        Ok(result_selector(self.fold(seed, func)?))
    }

    /// Counts the elements; requires a full drain.
    pub fn count(self) -> Result<usize> {
        self.fold(0, |count, _| count + 1)
    }

    /// Counts the elements matching `predicate(element, index)`.
    pub fn count_by(self, predicate: impl FnMut(&T, usize) -> bool + 'static) -> Result<usize> {
        self.where_(predicate).count()
    }

    /// Sums the values produced by `selector`. Fails on an empty sequence.
    pub fn sum_by<N>(self, mut selector: impl FnMut(&T) -> N) -> Result<N>
    where
        N: Zero,
    {
        let (total, count) = self.fold((N::zero(), 0usize), |(total, count), item| {
            (total + selector(&item), count + 1)
        })?;
        if count == 0 {
            return Err(Error::empty_aggregation("sum"));
        }
        Ok(total)
    }

    /// Averages the values produced by `selector`. Fails on an empty sequence.
    pub fn average_by(self, mut selector: impl FnMut(&T) -> f64) -> Result<f64> {
        let (total, count) = self.fold((0.0f64, 0usize), |(total, count), item| {
            (total + selector(&item), count + 1)
        })?;
        if count == 0 {
            return Err(Error::empty_aggregation("average"));
        }
        Ok(total / count as f64)
    }

    /// Returns the element with the greatest `selector` value; the later
    /// element wins ties. Fails on an empty sequence.
    pub fn max_by<K: PartialOrd>(self, selector: impl Fn(&T) -> K) -> Result<T> {
        let result = self.aggregate(move |prev, current| {
            if selector(&prev) > selector(&current) {
                prev
            } else {
                current
            }
        });
        result.map_err(|e| rename_empty(e, "max"))
    }

    /// Returns the element with the smallest `selector` value; the later
    /// element wins ties. Fails on an empty sequence.
    pub fn min_by<K: PartialOrd>(self, selector: impl Fn(&T) -> K) -> Result<T> {
        let result = self.aggregate(move |prev, current| {
            if selector(&prev) < selector(&current) {
                prev
            } else {
                current
            }
        });
        result.map_err(|e| rename_empty(e, "min"))
    }
}

impl<T> Sequence<T>
where
    T: Clone + Zero + 'static,
{
    /// Sums the elements. Fails with an empty-aggregation error on an empty
    /// sequence; an empty input is an error condition here, not a zero.
    pub fn sum(self) -> Result<T> {
        self.sum_by(|item| item.clone())
    }
}

impl<T> Sequence<T>
where
    T: Clone + ToPrimitive + 'static,
{
    /// Averages the elements as `f64`. Fails on an empty sequence, and with a
    /// type-mismatch error on a value that cannot be represented as `f64`;
    /// the upstream is not pulled past the offending element.
    pub fn average(self) -> Result<f64> {
        let mut total = 0.0f64;
        let mut count = 0usize;
        for item in self.into_cursor() {
            let value = item?.to_f64().ok_or_else(|| {
                Error::type_mismatch("average", "element is not representable as a number")
            })?;
            total += value;
            count += 1;
        }
        if count == 0 {
            return Err(Error::empty_aggregation("average"));
        }
        Ok(total / count as f64)
    }
}

impl<T> Sequence<T>
where
    T: Clone + PartialOrd + 'static,
{
    /// Pairwise maximum with the first element as the seed; the later element
    /// wins ties. Fails on an empty sequence.
    pub fn max(self) -> Result<T> {
        self.aggregate(|prev, current| if prev > current { prev } else { current })
            .map_err(|e| rename_empty(e, "max"))
    }

    /// Pairwise minimum with the first element as the seed; the later element
    /// wins ties. Fails on an empty sequence.
    pub fn min(self) -> Result<T> {
        self.aggregate(|prev, current| if prev < current { prev } else { current })
            .map_err(|e| rename_empty(e, "min"))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::sequence::Sequence;
    use lazyq_testkit::CallCounter;

    #[test]
    fn seedless_aggregate_folds_from_the_first_element() {
        let total = Sequence::from_vec(vec![4, 5, 6, 7])
            .aggregate(|a, b| a + b)
            .unwrap();
        assert_eq!(total, 22);
    }

    #[test]
    fn seedless_aggregate_of_one_element_is_that_element() {
        let total = Sequence::from_vec(vec![1]).aggregate(|a, b| a + b).unwrap();
        assert_eq!(total, 1);
    }

    #[test]
    fn seedless_aggregate_of_empty_fails() {
        let err = crate::empty::<i32>().aggregate(|a, b| a + b).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::EmptyAggregation { .. }));
    }

    #[test]
    fn fold_of_empty_returns_the_seed() {
        let out = crate::empty::<i32>().fold(42, |a, b| a + b).unwrap();
        assert_eq!(out, 42);
    }

    #[test]
    fn fold_with_maps_the_final_accumulator() {
        let out = Sequence::from_vec(vec![1, 2, 3])
            .fold_with(0, |a, b| a + b, |total| format!("total={total}"))
            .unwrap();
        assert_eq!(out, "total=6");
    }

    #[test]
    fn count_drains_fully() {
        assert_eq!(Sequence::from_vec(vec![1, 2, 3]).count().unwrap(), 3);
        assert_eq!(crate::empty::<i32>().count().unwrap(), 0);
    }

    #[test]
    fn count_by_counts_matches_only() {
        let n = Sequence::from_vec(vec![1, 2, 3, 4])
            .count_by(|x, _| x % 2 == 0)
            .unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn sum_and_sum_by() {
        assert_eq!(Sequence::from_vec(vec![1, 2, 3]).sum().unwrap(), 6);
        let by = Sequence::from_vec(vec!["a", "bb", "ccc"])
            .sum_by(|s| s.len() as i64)
            .unwrap();
        assert_eq!(by, 6);
    }

    #[test]
    fn sum_of_empty_is_an_error_not_zero() {
        let err = crate::empty::<i32>().sum().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::EmptyAggregation { .. }));
    }

    #[test]
    fn average_and_average_by() {
        assert_eq!(Sequence::from_vec(vec![1, 2, 3, 4]).average().unwrap(), 2.5);
        let by = Sequence::from_vec(vec!["a", "bbb"])
            .average_by(|s| s.len() as f64)
            .unwrap();
        assert_eq!(by, 2.0);
    }

    #[test]
    fn average_stops_pulling_at_the_first_non_numeric_element() {
        // Every coercion of this type fails.
        #[derive(Clone)]
        struct Opaque;
        impl num_traits::ToPrimitive for Opaque {
            fn to_i64(&self) -> Option<i64> {
                None
            }
            fn to_u64(&self) -> Option<u64> {
                None
            }
        }

        let calls = CallCounter::new();
        let probe = calls.clone();
        let err = Sequence::from_vec(vec![Opaque, Opaque, Opaque])
            .select(move |x, _| {
                probe.bump();
                x
            })
            .average()
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
        assert_eq!(calls.count(), 1);
    }

    #[test]
    fn average_of_empty_fails() {
        let err = crate::empty::<i32>().average().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::EmptyAggregation { .. }));
    }

    #[test]
    fn max_and_min_seed_from_the_first_element() {
        assert_eq!(Sequence::from_vec(vec![3, 1, 4, 1, 5]).max().unwrap(), 5);
        assert_eq!(Sequence::from_vec(vec![3, 1, 4, 1, 5]).min().unwrap(), 1);
    }

    #[test]
    fn max_by_returns_the_winning_element() {
        let longest = Sequence::from_vec(vec!["a", "ccc", "bb"])
            .max_by(|s| s.len())
            .unwrap();
        assert_eq!(longest, "ccc");
        let shortest = Sequence::from_vec(vec!["ccc", "a", "bb"])
            .min_by(|s| s.len())
            .unwrap();
        assert_eq!(shortest, "a");
    }

    #[test]
    fn later_element_wins_ties() {
        // Pairwise comparison keeps the current element on equal keys.
        let winner = Sequence::from_vec(vec![("a", 1), ("b", 1)])
            .max_by(|pair| pair.1)
            .unwrap();
        assert_eq!(winner.0, "b");
    }

    #[test]
    fn min_max_of_empty_fail() {
        assert!(matches!(
            crate::empty::<i32>().max().unwrap_err().kind(),
            ErrorKind::EmptyAggregation { .. }
        ));
        assert!(matches!(
            crate::empty::<i32>().min().unwrap_err().kind(),
            ErrorKind::EmptyAggregation { .. }
        ));
    }
}
