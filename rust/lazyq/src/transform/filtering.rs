//! Predicate-based filtering.

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};

/// Lazy filter. The index handed to the predicate is the 0-based position of
/// the element within the upstream as consumed, not within any original
/// source.
pub(crate) struct Where<T, P> {
    inner: Cursor<T>,
    predicate: P,
    index: usize,
}

impl<T, P> Where<T, P> {
    pub(crate) fn new(inner: Cursor<T>, predicate: P) -> Self {
        Where {
            inner,
            predicate,
            index: 0,
        }
    }
}

impl<T, P> Iterator for Where<T, P>
where
    P: FnMut(&T, usize) -> bool,
{
    type Item = Result<T>;

    #[inline]
    fn next(&mut self) -> Option<Result<T>> {
        loop {
            match self.inner.next()? {
                Err(e) => return Some(Err(e)),
                Ok(item) => {
                    let index = self.index;
                    self.index += 1;
                    if (self.predicate)(&item, index) {
                        return Some(Ok(item));
                    }
                }
            }
        }
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Filters the sequence by a predicate over `(element, index)`.
    ///
    /// Pull-driven: the predicate for element N is not invoked until a
    /// consumer requests the Nth passing element. Upstream order is preserved.
    pub fn where_(self, predicate: impl FnMut(&T, usize) -> bool + 'static) -> Sequence<T> {
        Sequence::from_pipeline(Where::new(self.into_cursor(), predicate))
    }
}
