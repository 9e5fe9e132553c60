//! Concatenation and single-element extension.

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};

/// Yields all of the first sequence, then all of the second. No dedup.
pub(crate) struct Concat<T> {
    first: Option<Cursor<T>>,
    second: Cursor<T>,
}

impl<T> Iterator for Concat<T> {
    type Item = Result<T>;

    #[inline]
    fn next(&mut self) -> Option<Result<T>> {
        if let Some(first) = self.first.as_mut() {
            match first.next() {
                Some(item) => return Some(item),
                None => self.first = None,
            }
        }
        self.second.next()
    }
}

/// Appends one extra element after the upstream is exhausted.
pub(crate) struct Append<T> {
    inner: Cursor<T>,
    item: Option<T>,
}

impl<T> Iterator for Append<T> {
    type Item = Result<T>;

    #[inline]
    fn next(&mut self) -> Option<Result<T>> {
        self.inner.next().or_else(|| self.item.take().map(Ok))
    }
}

/// Yields one extra element before pulling the upstream at all.
pub(crate) struct Prepend<T> {
    inner: Cursor<T>,
    item: Option<T>,
}

impl<T> Iterator for Prepend<T> {
    type Item = Result<T>;

    #[inline]
    fn next(&mut self) -> Option<Result<T>> {
        self.item.take().map(Ok).or_else(|| self.inner.next())
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Yields all elements of `self`, then all elements of `second`.
    pub fn concat(self, second: impl Into<Sequence<T>>) -> Sequence<T> {
        Sequence::from_pipeline(Concat {
            first: Some(self.into_cursor()),
            second: second.into().into_cursor(),
        })
    }

    /// Yields the sequence with `item` added at the end.
    pub fn append(self, item: T) -> Sequence<T> {
        Sequence::from_pipeline(Append {
            inner: self.into_cursor(),
            item: Some(item),
        })
    }

    /// Yields the sequence with `item` added at the start.
    pub fn prepend(self, item: T) -> Sequence<T> {
        Sequence::from_pipeline(Prepend {
            inner: self.into_cursor(),
            item: Some(item),
        })
    }
}
