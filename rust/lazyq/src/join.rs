//! Correlated joins and grouping.
//!
//! `join` builds a hash lookup over the inner sequence on the first pull and
//! then streams the outer sequence, so output is outer-major: one run of
//! pairs per outer element, inner matches in inner-sequence order. `join_by`
//! accepts an arbitrary key comparer and falls back to a linear scan of the
//! buffered inner keys.

use std::hash::Hash;

use ahash::AHashMap;

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};

/// One equivalence class produced by `group_by`: the shared key plus every
/// element that mapped to it, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping<K, T> {
    pub key: K,
    pub elements: Vec<T>,
}

/// Hash join. The inner sequence is drained into a key-indexed lookup on the
/// initial pull; the outer sequence streams through afterwards.
pub(crate) struct Join<T, I, K, OK, IK, S> {
    outer: Cursor<T>,
    inner: Option<Cursor<I>>,
    lookup: AHashMap<K, Vec<I>>,
    outer_key: OK,
    inner_key: IK,
    selector: S,
    // Current outer element, its key, and the next inner match to pair it
    // with.
    current: Option<(T, K, usize)>,
}

impl<T, I, K, R, OK, IK, S> Iterator for Join<T, I, K, OK, IK, S>
where
    T: Clone,
    I: Clone,
    K: Hash + Eq + Clone,
    OK: Fn(&T) -> K,
    IK: Fn(&I) -> K,
    S: FnMut(&T, &I) -> R,
{
    type Item = Result<R>;

    fn next(&mut self) -> Option<Result<R>> {
        if let Some(inner) = self.inner.take() {
            for item in inner {
                match item {
                    Ok(item) => {
                        let key = (self.inner_key)(&item);
                        self.lookup.entry(key).or_default().push(item);
                    }
                    Err(e) => return Some(Err(e)),
                }
            }
        }
        loop {
            if let Some((outer, key, pos)) = &mut self.current {
                if let Some(matches) = self.lookup.get(key)
                    && let Some(inner) = matches.get(*pos)
                {
                    *pos += 1;
                    return Some(Ok((self.selector)(outer, inner)));
                }
                self.current = None;
            }
            match self.outer.next()? {
                Err(e) => return Some(Err(e)),
                Ok(outer) => {
                    let key = (self.outer_key)(&outer);
                    self.current = Some((outer, key, 0));
                }
            }
        }
    }
}

/// Comparer-based join: the inner sequence is buffered with its keys and each
/// outer element scans the buffer linearly. Quadratic, but it supports keys
/// with no hash or equality of their own.
pub(crate) struct JoinBy<T, I, K, OK, C, S> {
    outer: Cursor<T>,
    inner: Option<Cursor<(K, I)>>,
    buffered: Vec<(K, I)>,
    outer_key: OK,
    comparer: C,
    selector: S,
    current: Option<(T, K, usize)>,
}

impl<T, I, K, R, OK, C, S> Iterator for JoinBy<T, I, K, OK, C, S>
where
    T: Clone,
    I: Clone,
    OK: Fn(&T) -> K,
    C: Fn(&K, &K) -> bool,
    S: FnMut(&T, &I) -> R,
{
    type Item = Result<R>;

    fn next(&mut self) -> Option<Result<R>> {
        if let Some(inner) = self.inner.take() {
            // The inner cursor already carries (key, element) pairs; keys are
            // computed once, at buffering time.
            for item in inner {
                match item {
                    Ok(pair) => self.buffered.push(pair),
                    Err(e) => return Some(Err(e)),
                }
            }
        }
        loop {
            if let Some((outer, key, pos)) = &mut self.current {
                while *pos < self.buffered.len() {
                    let (inner_key, inner) = &self.buffered[*pos];
                    *pos += 1;
                    if (self.comparer)(key, inner_key) {
                        return Some(Ok((self.selector)(outer, inner)));
                    }
                }
                self.current = None;
            }
            match self.outer.next()? {
                Err(e) => return Some(Err(e)),
                Ok(outer) => {
                    let key = (self.outer_key)(&outer);
                    self.current = Some((outer, key, 0));
                }
            }
        }
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Correlates this sequence with `inner` on equal keys, emitting
    /// `result_selector(outer, inner)` per matching pair. Output is
    /// outer-major; unmatched elements on either side are dropped.
    pub fn join<I, K, R>(
        self,
        inner: impl Into<Sequence<I>>,
        outer_key: impl Fn(&T) -> K + 'static,
        inner_key: impl Fn(&I) -> K + 'static,
        result_selector: impl FnMut(&T, &I) -> R + 'static,
    ) -> Sequence<R>
    where
        I: Clone + 'static,
        K: Hash + Eq + Clone + 'static,
        R: Clone + 'static,
    {
        Sequence::from_pipeline(Join {
            outer: self.into_cursor(),
            inner: Some(inner.into().into_cursor()),
            lookup: AHashMap::new(),
            outer_key,
            inner_key,
            selector: result_selector,
            current: None,
        })
    }

    /// Join under a caller-supplied key comparer, invoked as
    /// `comparer(outer_key, inner_key)`. Falls back to a linear scan of the
    /// buffered inner sequence per outer element.
    pub fn join_by<I, K, R>(
        self,
        inner: impl Into<Sequence<I>>,
        outer_key: impl Fn(&T) -> K + 'static,
        inner_key: impl Fn(&I) -> K + 'static,
        comparer: impl Fn(&K, &K) -> bool + 'static,
        result_selector: impl FnMut(&T, &I) -> R + 'static,
    ) -> Sequence<R>
    where
        I: Clone + 'static,
        K: Clone + 'static,
        R: Clone + 'static,
    {
        let keyed = inner.into().select(move |item, _| {
            let key = inner_key(&item);
            (key, item)
        });
        Sequence::from_pipeline(JoinBy {
            outer: self.into_cursor(),
            inner: Some(keyed.into_cursor()),
            buffered: Vec::new(),
            outer_key,
            comparer,
            selector: result_selector,
            current: None,
        })
    }

    /// Partitions the sequence into [`Grouping`]s keyed by `key_selector`.
    /// Groups appear in first-occurrence order of their keys; elements within
    /// a group keep source order. Buffers the upstream on the first pull.
    pub fn group_by<K>(self, key_selector: impl Fn(&T) -> K + 'static) -> Sequence<Grouping<K, T>>
    where
        K: Hash + Eq + Clone + 'static,
    {
        self.group_by_with(key_selector, |_, item| item)
    }

    /// `group_by` with a per-element transform applied as elements enter
    /// their group; the selector receives the group key and the element.
    pub fn group_by_with<K, V>(
        self,
        key_selector: impl Fn(&T) -> K + 'static,
        mut element_selector: impl FnMut(&K, T) -> V + 'static,
    ) -> Sequence<Grouping<K, V>>
    where
        K: Hash + Eq + Clone + 'static,
        V: Clone + 'static,
    {
        Sequence::from_pipeline(GroupBy {
            inner: Some(Box::new(self.into_cursor().map(move |item| {
                item.map(|item| {
                    let key = key_selector(&item);
                    let value = element_selector(&key, item);
                    (key, value)
                })
            }))),
            groups: Vec::new(),
        })
    }
}

/// Drains the upstream into first-occurrence-ordered groups on the initial
/// pull, then yields the groups one by one.
pub(crate) struct GroupBy<K, V> {
    inner: Option<Cursor<(K, V)>>,
    groups: Vec<Grouping<K, V>>,
}

impl<K, V> Iterator for GroupBy<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    type Item = Result<Grouping<K, V>>;

    fn next(&mut self) -> Option<Result<Grouping<K, V>>> {
        if let Some(inner) = self.inner.take() {
            let mut order = AHashMap::new();
            for item in inner {
                match item {
                    Ok((key, value)) => {
                        let slot = *order.entry(key.clone()).or_insert_with(|| {
                            self.groups.push(Grouping {
                                key,
                                elements: Vec::new(),
                            });
                            self.groups.len() - 1
                        });
                        self.groups[slot].elements.push(value);
                    }
                    Err(e) => {
                        self.groups.clear();
                        return Some(Err(e));
                    }
                }
            }
            self.groups.reverse();
        }
        self.groups.pop().map(Ok)
    }
}
