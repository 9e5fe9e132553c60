//! Two-phase union with a running history buffer.

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};
use crate::set_ops::contains_with;

/// Union of two sequences.
///
/// Phase one passes the first sequence through verbatim (duplicates inside it
/// are preserved) while recording every yielded element. From the boundary on,
/// elements of the second sequence are yielded only if the accumulated output
/// has not seen them yet, and are recorded in turn.
pub(crate) struct Union<T, C> {
    first: Option<Cursor<T>>,
    second: Cursor<T>,
    comparer: C,
    seen: Vec<T>,
}

impl<T, C> Iterator for Union<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> bool,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if let Some(first) = self.first.as_mut() {
            match first.next() {
                Some(Err(e)) => return Some(Err(e)),
                Some(Ok(item)) => {
                    self.seen.push(item.clone());
                    return Some(Ok(item));
                }
                None => self.first = None,
            }
        }
        loop {
            match self.second.next()? {
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
    /// Union under a caller-supplied equality comparer. See [`Sequence::union`].
    pub fn union_by(
        self,
        second: impl Into<Sequence<T>>,
        comparer: impl Fn(&T, &T) -> bool + 'static,
    ) -> Sequence<T> {
        Sequence::from_pipeline(Union {
            first: Some(self.into_cursor()),
            second: second.into().into_cursor(),
            comparer,
            seen: Vec::new(),
        })
    }
}

impl<T: Clone + PartialEq + 'static> Sequence<T> {
    /// Yields all of `self` as-is (internal duplicates preserved), then the
    /// elements of `second` that have not appeared in the output so far.
    /// Dedup applies only at and after the boundary.
    pub fn union(self, second: impl Into<Sequence<T>>) -> Sequence<T> {
        self.union_by(second, |a, b| a == b)
    }
}
