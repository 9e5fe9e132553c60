//! Duplicate removal with a running seen-history buffer.

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};
use crate::set_ops::contains_with;

/// Lazy duplicate filter. Buffers every yielded element to test each new
/// candidate against history; first-occurrence order is preserved. Cost is
/// O(seen) comparer invocations per candidate.
pub(crate) struct Distinct<T, C> {
    inner: Cursor<T>,
    comparer: C,
    seen: Vec<T>,
}

impl<T, C> Iterator for Distinct<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> bool,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        loop {
            match self.inner.next()? {
                Err(e) => return Some(Err(e)),
                Ok(item) => {
                    if !contains_with(&self.seen, &item, &self.comparer) {
                        self.seen.push(item.clone());
                        return Some(Ok(item));
                    }
                }
            }
        }
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Removes duplicates under a caller-supplied equality comparer, keeping
    /// the first occurrence of each element.
    pub fn distinct_by(self, comparer: impl Fn(&T, &T) -> bool + 'static) -> Sequence<T> {
        Sequence::from_pipeline(Distinct {
            inner: self.into_cursor(),
            comparer,
            seen: Vec::new(),
        })
    }
}

impl<T: Clone + PartialEq + 'static> Sequence<T> {
    /// Removes duplicates under value equality, keeping first occurrences.
    pub fn distinct(self) -> Sequence<T> {
        self.distinct_by(|a, b| a == b)
    }
}
