//! Set difference, driven by the first sequence.

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};
use crate::set_ops::contains_with;

/// Difference of two sequences: yields the elements of the first that do not
/// appear in the second. Order follows the first sequence; its duplicates are
/// preserved. The second sequence is buffered on the initial pull.
pub(crate) struct Except<T, C> {
    first: Cursor<T>,
    second: Option<Cursor<T>>,
    excluded: Vec<T>,
    comparer: C,
}

impl<T, C> Iterator for Except<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> bool,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if let Some(second) = self.second.take() {
            for item in second {
                match item {
                    Ok(item) => self.excluded.push(item),
                    Err(e) => return Some(Err(e)),
                }
            }
        }
        loop {
            match self.first.next()? {
                Err(e) => return Some(Err(e)),
                Ok(item) => {
                    if !contains_with(&self.excluded, &item, &self.comparer) {
                        return Some(Ok(item));
                    }
                }
            }
        }
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Difference under a caller-supplied equality comparer.
    pub fn except_by(
        self,
        second: impl Into<Sequence<T>>,
        comparer: impl Fn(&T, &T) -> bool + 'static,
    ) -> Sequence<T> {
        Sequence::from_pipeline(Except {
            first: self.into_cursor(),
            second: Some(second.into().into_cursor()),
            excluded: Vec::new(),
            comparer,
        })
    }
}

impl<T: Clone + PartialEq + 'static> Sequence<T> {
    /// Yields the elements of `self` that do not appear in `second`, in
    /// `self`'s order.
    pub fn except(self, second: impl Into<Sequence<T>>) -> Sequence<T> {
        self.except_by(second, |a, b| a == b)
    }
}
