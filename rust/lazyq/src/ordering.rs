//! Deferred sorting: `order_by` and its refinements, plus `reverse`.
//!
//! Ordering cannot be streamed, but it can still be deferred: `order_by`
//! returns an [`OrderedSequence`] that merely records the comparison chain.
//! The upstream is drained and sorted only when a downstream pull arrives.
//! The sort is stable, so elements comparing equal under the whole chain keep
//! their source order.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};

type Comparer<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// A sequence with a pending sort. Refine the order with the `then_by`
/// family, then resume chaining via [`OrderedSequence::into_sequence`] or
/// materialize with [`OrderedSequence::to_vec`].
pub struct OrderedSequence<T> {
    source: Sequence<T>,
    comparers: Vec<Comparer<T>>,
}

fn comparer_from_key<T, K>(
    key_selector: impl Fn(&T) -> K + 'static,
    descending: bool,
) -> Comparer<T>
where
    K: Ord + 'static,
{
    Rc::new(move |a: &T, b: &T| {
        let ord = key_selector(a).cmp(&key_selector(b));
        if descending { ord.reverse() } else { ord }
    })
}

fn compare_chain<T>(comparers: &[Comparer<T>], a: &T, b: &T) -> Ordering {
    for comparer in comparers {
        match comparer(a, b) {
            Ordering::Equal => continue,
            decided => return decided,
        }
    }
    Ordering::Equal
}

/// Pull-state machine behind a deferred sort: drains and sorts the upstream
/// on the first pull, then replays the sorted buffer. An upstream error
/// surfaces once, after which the cursor is exhausted.
enum Sort<T> {
    Unsorted {
        inner: Cursor<T>,
        comparers: Vec<Comparer<T>>,
    },
    Sorted(std::vec::IntoIter<T>),
}

impl<T: Clone> Iterator for Sort<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if matches!(self, Sort::Unsorted { .. }) {
            let state = std::mem::replace(self, Sort::Sorted(Vec::new().into_iter()));
            let Sort::Unsorted { inner, comparers } = state else {
                unreachable!()
            };
            let mut buf = Vec::new();
            for item in inner {
                match item {
                    Ok(item) => buf.push(item),
                    // The replacement above already left the cursor exhausted.
                    Err(e) => return Some(Err(e)),
                }
            }
            // Stable sort: equal elements keep their upstream order.
            buf.sort_by(|a, b| compare_chain(&comparers, a, b));
            *self = Sort::Sorted(buf.into_iter());
        }
        match self {
            Sort::Sorted(iter) => iter.next().map(Ok),
            Sort::Unsorted { .. } => unreachable!(),
        }
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Sorts ascending by the natural order of `key_selector`'s output.
    /// Deferred: nothing is pulled until the result is consumed.
    pub fn order_by<K>(self, key_selector: impl Fn(&T) -> K + 'static) -> OrderedSequence<T>
    where
        K: Ord + 'static,
    {
        OrderedSequence {
            source: self,
            comparers: vec![comparer_from_key(key_selector, false)],
        }
    }

    /// Sorts descending by the natural order of `key_selector`'s output.
    pub fn order_by_descending<K>(
        self,
        key_selector: impl Fn(&T) -> K + 'static,
    ) -> OrderedSequence<T>
    where
        K: Ord + 'static,
    {
        OrderedSequence {
            source: self,
            comparers: vec![comparer_from_key(key_selector, true)],
        }
    }

    /// Sorts by a caller-supplied key comparer. The comparer receives the
    /// keys of the two elements under comparison; keys are recomputed per
    /// comparison, so the selector should be cheap and deterministic.
    pub fn order_by_with<K>(
        self,
        key_selector: impl Fn(&T) -> K + 'static,
        comparer: impl Fn(&K, &K) -> Ordering + 'static,
    ) -> OrderedSequence<T>
    where
        K: 'static,
    {
        OrderedSequence {
            source: self,
            comparers: vec![Rc::new(move |a: &T, b: &T| {
                comparer(&key_selector(a), &key_selector(b))
            })],
        }
    }

    /// Yields the elements in reverse traversal order. The upstream is
    /// buffered in full on the first pull.
    pub fn reverse(self) -> Sequence<T> {
        Sequence::from_pipeline(Reverse {
            inner: Some(self.into_cursor()),
            buffered: Vec::new(),
        })
    }
}

impl<T: Clone + 'static> OrderedSequence<T> {
    fn refined(mut self, comparer: Comparer<T>) -> OrderedSequence<T> {
        self.comparers.push(comparer);
        self
    }

    /// Breaks ties left by the preceding orderings, ascending.
    pub fn then_by<K>(self, key_selector: impl Fn(&T) -> K + 'static) -> OrderedSequence<T>
    where
        K: Ord + 'static,
    {
        self.refined(comparer_from_key(key_selector, false))
    }

    /// Breaks ties left by the preceding orderings, descending.
    pub fn then_by_descending<K>(
        self,
        key_selector: impl Fn(&T) -> K + 'static,
    ) -> OrderedSequence<T>
    where
        K: Ord + 'static,
    {
        self.refined(comparer_from_key(key_selector, true))
    }

    /// Tie-breaking refinement under a caller-supplied key comparer.
    pub fn then_by_with<K>(
        self,
        key_selector: impl Fn(&T) -> K + 'static,
        comparer: impl Fn(&K, &K) -> Ordering + 'static,
    ) -> OrderedSequence<T>
    where
        K: 'static,
    {
        self.refined(Rc::new(move |a: &T, b: &T| {
            comparer(&key_selector(a), &key_selector(b))
        }))
    }

    /// Seals the comparison chain and resumes ordinary chaining. The sort
    /// itself still happens only when the sequence is consumed.
    pub fn into_sequence(self) -> Sequence<T> {
        Sequence::from_pipeline(Sort::Unsorted {
            inner: self.source.into_cursor(),
            comparers: self.comparers,
        })
    }

    /// Sorts and materializes in one step.
    pub fn to_vec(self) -> Result<Vec<T>> {
        self.into_sequence().to_vec()
    }
}

impl<T: Clone + 'static> From<OrderedSequence<T>> for Sequence<T> {
    fn from(ordered: OrderedSequence<T>) -> Sequence<T> {
        ordered.into_sequence()
    }
}

/// Buffers the upstream on the first pull, then yields from the back.
pub(crate) struct Reverse<T> {
    inner: Option<Cursor<T>>,
    buffered: Vec<T>,
}

impl<T: Clone> Iterator for Reverse<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if let Some(inner) = self.inner.take() {
            for item in inner {
                match item {
                    Ok(item) => self.buffered.push(item),
                    Err(e) => {
                        self.buffered.clear();
                        return Some(Err(e));
                    }
                }
            }
        }
        self.buffered.pop().map(Ok)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use itertools::Itertools;

    use crate::sequence::Sequence;
    use lazyq_testkit::{CallCounter, shuffled_range};

    #[test]
    fn order_by_sorts_ascending() {
        let out = Sequence::from_vec(vec![3, 1, 2]).order_by(|x| *x).to_vec().unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn order_by_descending_reverses_the_key_order() {
        let out = Sequence::from_vec(vec![3, 1, 2])
            .order_by_descending(|x| *x)
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![3, 2, 1]);
    }

    #[test]
    fn shuffled_input_matches_a_reference_sort() {
        let data = shuffled_range(0, 200, 7);
        let expected: Vec<i64> = data.iter().copied().sorted().collect();
        let out = Sequence::from_vec(data).order_by(|x| *x).to_vec().unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn stability_holds_on_duplicated_keys_over_shuffled_input() {
        // Keys collide ten ways; the payload records each element's position
        // in the shuffled input so stability is observable.
        let data: Vec<(i64, usize)> = shuffled_range(0, 100, 11)
            .into_iter()
            .enumerate()
            .map(|(pos, v)| (v % 10, pos))
            .collect();
        let expected: Vec<(i64, usize)> =
            data.iter().copied().sorted_by_key(|pair| pair.0).collect();
        let out = Sequence::from_vec(data)
            .order_by(|pair| pair.0)
            .to_vec()
            .unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn stable_sort_keeps_source_order_on_equal_keys() {
        let out = Sequence::from_vec(vec![("b", 1), ("a", 1), ("c", 0)])
            .order_by(|pair| pair.1)
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![("c", 0), ("b", 1), ("a", 1)]);
    }

    #[test]
    fn then_by_breaks_ties_only() {
        let out = Sequence::from_vec(vec![("b", 1), ("a", 1), ("a", 0)])
            .order_by(|pair| pair.1)
            .then_by(|pair| pair.0)
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![("a", 0), ("a", 1), ("b", 1)]);
    }

    #[test]
    fn then_by_descending_refinement() {
        let out = Sequence::from_vec(vec![(1, "x"), (1, "z"), (0, "y")])
            .order_by(|pair| pair.0)
            .then_by_descending(|pair| pair.1)
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![(0, "y"), (1, "z"), (1, "x")]);
    }

    #[test]
    fn order_by_with_uses_the_supplied_comparer() {
        let out = Sequence::from_vec(vec!["bb", "a", "ccc"])
            .order_by_with(|s| s.len(), |a, b| b.cmp(a))
            .to_vec()
            .unwrap();
        assert_eq!(out, vec!["ccc", "bb", "a"]);
    }

    #[test]
    fn then_by_with_comparer_refinement() {
        let comparer = |a: &&str, b: &&str| -> Ordering { a.len().cmp(&b.len()) };
        let out = Sequence::from_vec(vec![(1, "ccc"), (1, "a"), (0, "bb")])
            .order_by(|pair| pair.0)
            .then_by_with(|pair| pair.1, comparer)
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![(0, "bb"), (1, "a"), (1, "ccc")]);
    }

    #[test]
    fn sorting_is_deferred_until_consumption() {
        let calls = CallCounter::new();
        let probe = calls.clone();
        let ordered = Sequence::from_vec(vec![2, 1])
            .select(move |x, _| {
                probe.bump();
                x
            })
            .order_by(|x| *x);
        assert_eq!(calls.count(), 0);
        let chained = ordered.into_sequence();
        assert_eq!(calls.count(), 0);
        chained.to_vec().unwrap();
        assert_eq!(calls.count(), 2);
    }

    #[test]
    fn ordered_sequence_resumes_chaining() {
        let out = Sequence::from_vec(vec![5, 3, 4, 1, 2])
            .order_by(|x| *x)
            .into_sequence()
            .where_(|x, _| x % 2 == 1)
            .take(2)
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![1, 3]);
    }

    #[test]
    fn reverse_yields_back_to_front() {
        let out = Sequence::from_vec(vec![1, 2, 3]).reverse().to_vec().unwrap();
        assert_eq!(out, vec![3, 2, 1]);
        assert!(crate::empty::<i32>().reverse().to_vec().unwrap().is_empty());
    }

    #[test]
    fn reverse_is_deferred() {
        let calls = CallCounter::new();
        let probe = calls.clone();
        let chain = Sequence::from_vec(vec![1, 2])
            .select(move |x, _| {
                probe.bump();
                x
            })
            .reverse();
        assert_eq!(calls.count(), 0);
        assert_eq!(chain.to_vec().unwrap(), vec![2, 1]);
        assert_eq!(calls.count(), 2);
    }
}
