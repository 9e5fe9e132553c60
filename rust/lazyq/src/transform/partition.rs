//! Index-based and prefix-based partitioning: `skip`, `take`, `skip_while`,
//! `take_while`.

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};

/// Prefix window. Stops pulling the upstream entirely once `remaining` hits
/// zero, so an early-closing window never forces extra upstream work.
pub(crate) struct Take<T> {
    inner: Cursor<T>,
    remaining: usize,
}

impl<T> Iterator for Take<T> {
    type Item = Result<T>;

    #[inline]
    fn next(&mut self) -> Option<Result<T>> {
        if self.remaining == 0 {
            return None;
        }
        match self.inner.next()? {
            Err(e) => Some(Err(e)),
            Ok(item) => {
                self.remaining -= 1;
                Some(Ok(item))
            }
        }
    }
}

/// Skips the longest prefix satisfying the predicate, then forwards the rest
/// untouched. The index handed to the predicate counts from zero at the start
/// of this operator's own traversal.
pub(crate) struct SkipWhile<T, P> {
    inner: Cursor<T>,
    predicate: P,
    index: usize,
    skipping: bool,
}

impl<T, P> Iterator for SkipWhile<T, P>
where
    P: FnMut(&T, usize) -> bool,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if !self.skipping {
            return self.inner.next();
        }
        loop {
            match self.inner.next()? {
                Err(e) => return Some(Err(e)),
                Ok(item) => {
                    let index = self.index;
                    self.index += 1;
                    if !(self.predicate)(&item, index) {
                        self.skipping = false;
                        return Some(Ok(item));
                    }
                }
            }
        }
    }
}

/// Yields elements while the predicate holds; the first failing element ends
/// the traversal permanently and is not yielded.
pub(crate) struct TakeWhile<T, P> {
    inner: Cursor<T>,
    predicate: P,
    index: usize,
    done: bool,
}

impl<T, P> Iterator for TakeWhile<T, P>
where
    P: FnMut(&T, usize) -> bool,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if self.done {
            return None;
        }
        match self.inner.next() {
            None => {
                self.done = true;
                None
            }
            Some(Err(e)) => Some(Err(e)),
            Some(Ok(item)) => {
                let index = self.index;
                self.index += 1;
                if (self.predicate)(&item, index) {
                    Some(Ok(item))
                } else {
                    self.done = true;
                    None
                }
            }
        }
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Skips the first `count` elements. A negative or zero `count` keeps
    /// everything; a `count` at or past the end yields an empty sequence.
    pub fn skip(self, count: isize) -> Sequence<T> {
        self.where_(move |_, index| index as isize >= count)
    }

    /// Yields the first `count` elements. A zero or negative `count` yields an
    /// empty sequence.
    pub fn take(self, count: isize) -> Sequence<T> {
        Sequence::from_pipeline(Take {
            inner: self.into_cursor(),
            remaining: count.max(0) as usize,
        })
    }

    /// Skips elements while `predicate(element, index)` holds, then yields the
    /// remainder without further predicate evaluation.
    pub fn skip_while(self, predicate: impl FnMut(&T, usize) -> bool + 'static) -> Sequence<T> {
        Sequence::from_pipeline(SkipWhile {
            inner: self.into_cursor(),
            predicate,
            index: 0,
            skipping: true,
        })
    }

    /// Yields elements while `predicate(element, index)` holds, then stops
    /// entirely; it never resumes after the first failing element.
    pub fn take_while(self, predicate: impl FnMut(&T, usize) -> bool + 'static) -> Sequence<T> {
        Sequence::from_pipeline(TakeWhile {
            inner: self.into_cursor(),
            predicate,
            index: 0,
            done: false,
        })
    }
}
