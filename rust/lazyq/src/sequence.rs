//! The `Sequence` abstraction, its source adapters and factory functions.
//!
//! A [`Sequence<T>`] is a lazily evaluated, ordered stream of elements. It
//! comes in two flavors, kept as an explicit tagged variant:
//!
//! - **Snapshot**: backed by an immutable `Rc<[T]>` buffer copied from the
//!   input container at adapter-construction time. Restartable: [`replay`]
//!   produces any number of independent traversals, and the snapshot makes the
//!   sequence immune to later mutation of the original container.
//! - **Pipeline**: produced by an operator; a boxed pull-state machine that
//!   supports exactly one traversal. Move semantics enforce this: every
//!   operator and terminal consumes `self`, so an exhausted pipeline cannot be
//!   observed twice.
//!
//! Elements travel through a chain as `Result<T>`. Operators themselves never
//! raise; a deferred failure (e.g. a missing inferred comparer) is passed down
//! the channel and realized by whichever terminal drains the chain.
//!
//! Evaluation is single-threaded, synchronous and pull-driven. `Rc`-backed
//! snapshots make `Sequence` intentionally `!Send`.
//!
//! [`replay`]: Sequence::replay

use std::rc::Rc;

use crate::error::Result;

/// Boxed traversal cursor: transient per-traversal state, owned exclusively by
/// the traversal that created it.
pub(crate) type Cursor<T> = Box<dyn Iterator<Item = Result<T>>>;

/// A lazily evaluated, ordered, possibly single-pass stream of elements.
pub struct Sequence<T> {
    source: Source<T>,
}

enum Source<T> {
    /// Restartable buffer, snapshot-copied from the input container.
    Snapshot(Rc<[T]>),
    /// One-shot operator pipeline.
    Pipeline(Cursor<T>),
}

impl<T: Clone + 'static> Sequence<T> {
    /// Wraps a slice, snapshot-copying it so that later mutation of the
    /// original container is never observed. The result is restartable.
    pub fn from_slice(items: &[T]) -> Sequence<T> {
        Sequence {
            source: Source::Snapshot(Rc::from(items)),
        }
    }

    /// Takes ownership of a vector as a restartable snapshot, without copying.
    pub fn from_vec(items: Vec<T>) -> Sequence<T> {
        Sequence {
            source: Source::Snapshot(items.into()),
        }
    }

    /// Wraps an arbitrary element producer. The result is single-pass: the
    /// producer is pulled lazily and cannot be restarted.
    pub fn from_iterator(iter: impl Iterator<Item = T> + 'static) -> Sequence<T> {
        Sequence::from_pipeline(iter.map(Ok))
    }

    pub(crate) fn from_pipeline(iter: impl Iterator<Item = Result<T>> + 'static) -> Sequence<T> {
        Sequence {
            source: Source::Pipeline(Box::new(iter)),
        }
    }

    /// Whether this sequence supports more than one traversal.
    ///
    /// Operators that need to traverse an upstream twice (`distinct`,
    /// `intersect`, membership checks) do not rely on this: they buffer
    /// internally instead.
    pub fn is_restartable(&self) -> bool {
        matches!(self.source, Source::Snapshot(_))
    }

    /// Returns an independent traversal of the same elements, or `None` for a
    /// single-pass pipeline.
    ///
    /// Replaying is cheap: the snapshot buffer is shared, each replay owns
    /// only its own cursor.
    pub fn replay(&self) -> Option<Sequence<T>> {
        match &self.source {
            Source::Snapshot(buf) => Some(Sequence {
                source: Source::Snapshot(Rc::clone(buf)),
            }),
            Source::Pipeline(_) => None,
        }
    }

    /// Begins the (for pipelines: only) traversal of this sequence.
    pub(crate) fn into_cursor(self) -> Cursor<T> {
        match self.source {
            Source::Snapshot(buf) => Box::new(SnapshotCursor { buf, pos: 0 }),
            Source::Pipeline(cursor) => cursor,
        }
    }
}

/// Cursor over a snapshot buffer. Elements are cloned out; the buffer itself
/// is shared and never mutated.
struct SnapshotCursor<T> {
    buf: Rc<[T]>,
    pos: usize,
}

impl<T: Clone> Iterator for SnapshotCursor<T> {
    type Item = Result<T>;

    #[inline]
    fn next(&mut self) -> Option<Result<T>> {
        let item = self.buf.get(self.pos)?.clone();
        self.pos += 1;
        Some(Ok(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buf.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Sequence<T> {
        Sequence::from_vec(items)
    }
}

impl<'a, T: Clone + 'static> From<&'a [T]> for Sequence<T> {
    fn from(items: &'a [T]) -> Sequence<T> {
        Sequence::from_slice(items)
    }
}

impl<'a, T: Clone + 'static, const N: usize> From<&'a [T; N]> for Sequence<T> {
    fn from(items: &'a [T; N]) -> Sequence<T> {
        Sequence::from_slice(items.as_slice())
    }
}

impl<T: Clone + 'static, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(items: [T; N]) -> Sequence<T> {
        Sequence::from_vec(items.into())
    }
}

/// Collecting into a `Sequence` materializes a restartable snapshot.
impl<T: Clone + 'static> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Sequence<T> {
        Sequence::from_vec(iter.into_iter().collect())
    }
}

/// An element of a sequence produced from a key/value mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue<K, V> {
    pub key: K,
    pub value: V,
}

/// Adapts a key/value mapping into a sequence of [`KeyValue`] pairs, in the
/// order the mapping yields its entries. The entries are snapshot-copied at
/// construction; the result is restartable.
pub fn from_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Sequence<KeyValue<K, V>>
where
    K: Clone + 'static,
    V: Clone + 'static,
{
    entries
        .into_iter()
        .map(|(key, value)| KeyValue { key, value })
        .collect()
}

/// Generates `count` consecutive integers starting at `start`, lazily.
pub fn range(start: i64, count: usize) -> Sequence<i64> {
    Sequence::from_pipeline(RangeCursor {
        start,
        count,
        index: 0,
    })
}

struct RangeCursor {
    start: i64,
    count: usize,
    index: usize,
}

impl Iterator for RangeCursor {
    type Item = Result<i64>;

    #[inline]
    fn next(&mut self) -> Option<Result<i64>> {
        if self.index < self.count {
            let value = self.start + self.index as i64;
            self.index += 1;
            Some(Ok(value))
        } else {
            None
        }
    }
}

/// Generates a sequence that repeats `item` `count` times, lazily.
pub fn repeat<T: Clone + 'static>(item: T, count: usize) -> Sequence<T> {
    Sequence::from_pipeline(RepeatCursor {
        item,
        count,
        index: 0,
    })
}

struct RepeatCursor<T> {
    item: T,
    count: usize,
    index: usize,
}

impl<T: Clone> Iterator for RepeatCursor<T> {
    type Item = Result<T>;

    #[inline]
    fn next(&mut self) -> Option<Result<T>> {
        if self.index < self.count {
            self.index += 1;
            Some(Ok(self.item.clone()))
        } else {
            None
        }
    }
}

/// Returns an empty, restartable sequence with the requested element type.
pub fn empty<T: Clone + 'static>() -> Sequence<T> {
    Sequence::from_vec(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::{KeyValue, Sequence, empty, from_map, range, repeat};

    #[test]
    fn slice_round_trips_through_adapter_and_terminal() {
        let items = [4, 5, 6, 7];
        let out = Sequence::from_slice(&items).to_vec().unwrap();
        assert_eq!(out, items);
    }

    #[test]
    fn snapshot_is_immune_to_source_mutation() {
        let mut items = vec![1, 2, 3];
        let seq = Sequence::from_slice(&items);
        items.push(4);
        assert_eq!(seq.to_vec().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn snapshot_replays_independently() {
        let seq = Sequence::from_vec(vec![1, 2, 3]);
        assert!(seq.is_restartable());

        let replayed = seq.replay().unwrap();
        assert_eq!(replayed.to_vec().unwrap(), vec![1, 2, 3]);
        assert_eq!(seq.to_vec().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn pipeline_is_single_pass() {
        let seq = Sequence::from_iterator(vec![1, 2, 3].into_iter());
        assert!(!seq.is_restartable());
        assert!(seq.replay().is_none());
        assert_eq!(seq.to_vec().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn operator_output_is_single_pass_even_over_snapshots() {
        let seq = Sequence::from_vec(vec![1, 2, 3]).select(|x, _| x * 2);
        assert!(!seq.is_restartable());
    }

    #[test]
    fn map_adapter_yields_key_value_pairs() {
        let entries = vec![("a", 1), ("b", 2)];
        let out = from_map(entries).to_vec().unwrap();
        assert_eq!(
            out,
            vec![
                KeyValue { key: "a", value: 1 },
                KeyValue { key: "b", value: 2 },
            ]
        );
    }

    #[test]
    fn range_generates_consecutive_integers() {
        assert_eq!(range(3, 4).to_vec().unwrap(), vec![3, 4, 5, 6]);
        assert_eq!(range(-2, 3).to_vec().unwrap(), vec![-2, -1, 0]);
        assert!(range(10, 0).to_vec().unwrap().is_empty());
    }

    #[test]
    fn repeat_yields_item_count_times() {
        assert_eq!(repeat("x", 3).to_vec().unwrap(), vec!["x", "x", "x"]);
        assert!(repeat(1, 0).to_vec().unwrap().is_empty());
    }

    #[test]
    fn empty_has_no_elements_and_is_restartable() {
        let seq = empty::<i32>();
        assert!(seq.is_restartable());
        assert!(seq.to_vec().unwrap().is_empty());
    }

    #[test]
    fn collecting_builds_a_restartable_snapshot() {
        let seq: Sequence<i32> = (1..=3).collect();
        assert!(seq.is_restartable());
        assert_eq!(seq.to_vec().unwrap(), vec![1, 2, 3]);
    }
}
