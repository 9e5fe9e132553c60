//! Element-retrieval and quantifier terminals, materialization, and
//! `default_if_empty`.
//!
//! The `first`/`last`/`single`/`element_at` families come in four call shapes
//! each: bare, `_by(predicate)`, `_or(default)` and `_by_or(predicate,
//! default)`. Whether a default was provided is part of the contract (the
//! `_or` shapes never raise a no-match error), so the distinction is encoded
//! in the method name rather than an optional argument.
//!
//! Early-terminating terminals stop pulling the upstream the moment the
//! outcome is decided.

use crate::error::{Error, ErrorKind, Result};
use crate::sequence::{Cursor, Sequence};

/// Forwards the upstream untouched when it has any element; yields a single
/// default element otherwise. The upstream is probed only on the first pull.
pub(crate) struct DefaultIfEmpty<T> {
    inner: Cursor<T>,
    default: Option<T>,
    started: bool,
}

impl<T> Iterator for DefaultIfEmpty<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if !self.started {
            self.started = true;
            return match self.inner.next() {
                Some(item) => {
                    self.default = None;
                    Some(item)
                }
                None => self.default.take().map(Ok),
            };
        }
        self.inner.next()
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Fully drains the sequence into a vector.
    pub fn to_vec(self) -> Result<Vec<T>> {
        self.into_cursor().collect()
    }

    /// Returns the sequence itself if it has any element, otherwise a
    /// single-element sequence of `default`. Lazy: nothing is pulled until a
    /// consumer asks.
    pub fn default_if_empty(self, default: T) -> Sequence<T> {
        Sequence::from_pipeline(DefaultIfEmpty {
            inner: self.into_cursor(),
            default: Some(default),
            started: false,
        })
    }

    fn first_impl(
        self,
        mut predicate: impl FnMut(&T, usize) -> bool,
        default: Option<T>,
    ) -> Result<T> {
        let mut index = 0;
        for item in self.into_cursor() {
            let item = item?;
            let matched = predicate(&item, index);
            index += 1;
            if matched {
                return Ok(item);
            }
        }
        default.ok_or_else(|| Error::not_found("first"))
    }

    /// Returns the first element; fails with a not-found error on an empty
    /// sequence.
    pub fn first(self) -> Result<T> {
        self.first_impl(|_, _| true, None)
    }

    /// Returns the first element matching `predicate(element, index)`; fails
    /// with a not-found error when nothing matches.
    pub fn first_by(self, predicate: impl FnMut(&T, usize) -> bool + 'static) -> Result<T> {
        self.first_impl(predicate, None)
    }

    /// Returns the first element, or `default` on an empty sequence.
    pub fn first_or(self, default: T) -> Result<T> {
        self.first_impl(|_, _| true, Some(default))
    }

    /// Returns the first matching element, or `default` when nothing matches.
    pub fn first_by_or(
        self,
        predicate: impl FnMut(&T, usize) -> bool + 'static,
        default: T,
    ) -> Result<T> {
        self.first_impl(predicate, Some(default))
    }

    fn last_impl(
        self,
        mut predicate: impl FnMut(&T, usize) -> bool,
        default: Option<T>,
    ) -> Result<T> {
        // One forward pass, tracking the most recent match; reverse iteration
        // is not assumed to be cheap or even possible.
        let mut found = None;
        let mut index = 0;
        for item in self.into_cursor() {
            let item = item?;
            if predicate(&item, index) {
                found = Some(item);
            }
            index += 1;
        }
        found
            .or(default)
            .ok_or_else(|| Error::not_found("last"))
    }

    /// Returns the last element; fails with a not-found error on an empty
    /// sequence.
    pub fn last(self) -> Result<T> {
        self.last_impl(|_, _| true, None)
    }

    /// Returns the last element matching `predicate(element, index)`; fails
    /// with a not-found error when nothing matches.
    pub fn last_by(self, predicate: impl FnMut(&T, usize) -> bool + 'static) -> Result<T> {
        self.last_impl(predicate, None)
    }

    /// Returns the last element, or `default` on an empty sequence.
    pub fn last_or(self, default: T) -> Result<T> {
        self.last_impl(|_, _| true, Some(default))
    }

    /// Returns the last matching element, or `default` when nothing matches.
    pub fn last_by_or(
        self,
        predicate: impl FnMut(&T, usize) -> bool + 'static,
        default: T,
    ) -> Result<T> {
        self.last_impl(predicate, Some(default))
    }

    fn single_impl(
        self,
        mut predicate: impl FnMut(&T, usize) -> bool,
        default: Option<T>,
    ) -> Result<T> {
        let mut found = None;
        let mut index = 0;
        for item in self.into_cursor() {
            let item = item?;
            let matched = predicate(&item, index);
            index += 1;
            if !matched {
                continue;
            }
            if found.is_some() {
                // Second match decides the outcome; stop scanning right here.
                return match default {
                    Some(default) => Ok(default),
                    None => Err(Error::multiple_matches("single")),
                };
            }
            found = Some(item);
        }
        match (found, default) {
            (Some(item), _) => Ok(item),
            (None, Some(default)) => Ok(default),
            (None, None) => Err(Error::empty_aggregation("single")),
        }
    }

    /// Returns the only element. Fails with a multiple-matches error when the
    /// sequence has more than one element, and with an empty-aggregation error
    /// when it has none.
    pub fn single(self) -> Result<T> {
        self.single_impl(|_, _| true, None)
    }

    /// Returns the only element matching `predicate(element, index)`, with
    /// the same failure modes as [`Sequence::single`].
    pub fn single_by(self, predicate: impl FnMut(&T, usize) -> bool + 'static) -> Result<T> {
        self.single_impl(predicate, None)
    }

    /// Returns the only element, or `default` when the sequence does not
    /// contain exactly one element (zero or multiple).
    pub fn single_or(self, default: T) -> Result<T> {
        self.single_impl(|_, _| true, Some(default))
    }

    /// Returns the only matching element, or `default` when the match count
    /// is not exactly one.
    pub fn single_by_or(
        self,
        predicate: impl FnMut(&T, usize) -> bool + 'static,
        default: T,
    ) -> Result<T> {
        self.single_impl(predicate, Some(default))
    }

    /// Returns the element at the 0-based `index`, i.e. `first` with an
    /// index-equality predicate. An index that does not resolve (negative or
    /// past the end) fails with a not-found error.
    pub fn element_at(self, index: isize) -> Result<T> {
        self.first_impl(move |_, i| i as isize == index, None)
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound { .. } => Error::not_found("element_at"),
                _ => e,
            })
    }

    /// Returns the element at `index`, or `default` when the index does not
    /// resolve (negative or past the end).
    pub fn element_at_or(self, index: isize, default: T) -> Result<T> {
        self.first_impl(move |_, i| i as isize == index, Some(default))
    }

    /// True when the sequence has at least one element.
    pub fn any(self) -> Result<bool> {
        self.any_by(|_, _| true)
    }

    /// True when any element matches `predicate(element, index)`; stops at
    /// the first match. False over an empty sequence.
    pub fn any_by(self, mut predicate: impl FnMut(&T, usize) -> bool + 'static) -> Result<bool> {
        let mut index = 0;
        for item in self.into_cursor() {
            let item = item?;
            if predicate(&item, index) {
                return Ok(true);
            }
            index += 1;
        }
        Ok(false)
    }

    /// True when every element matches `predicate(element, index)`; stops at
    /// the first failure. Vacuously true over an empty sequence.
    pub fn all(self, mut predicate: impl FnMut(&T, usize) -> bool + 'static) -> Result<bool> {
        let mut index = 0;
        for item in self.into_cursor() {
            let item = item?;
            if !predicate(&item, index) {
                return Ok(false);
            }
            index += 1;
        }
        Ok(true)
    }

    /// Membership test under a caller-supplied comparer, invoked as
    /// `comparer(value, element)`; stops at the first hit.
    pub fn contains_by(
        self,
        value: &T,
        comparer: impl Fn(&T, &T) -> bool + 'static,
    ) -> Result<bool> {
        let needle = value.clone();
        self.any_by(move |element, _| comparer(&needle, element))
    }

    /// Lockstep pairwise comparison of two traversals under a comparer.
    /// Returns false on the first mismatch or length difference.
    pub fn sequence_equal_by(
        self,
        second: impl Into<Sequence<T>>,
        comparer: impl Fn(&T, &T) -> bool,
    ) -> Result<bool> {
        let mut first = self.into_cursor();
        let mut second = second.into().into_cursor();
        loop {
            match (first.next(), second.next()) {
                (None, None) => return Ok(true),
                (None, Some(_)) | (Some(_), None) => return Ok(false),
                (Some(a), Some(b)) => {
                    if !comparer(&a?, &b?) {
                        return Ok(false);
                    }
                }
            }
        }
    }
}

impl<T: Clone + PartialEq + 'static> Sequence<T> {
    /// Membership test under value equality; stops at the first hit.
    pub fn contains(self, value: &T) -> Result<bool> {
        self.contains_by(value, |a, b| a == b)
    }

    /// Lockstep pairwise equality of two traversals. True only when both
    /// exhaust simultaneously with all pairs equal.
    pub fn sequence_equal(self, second: impl Into<Sequence<T>>) -> Result<bool> {
        self.sequence_equal_by(second, |a, b| a == b)
    }
}
