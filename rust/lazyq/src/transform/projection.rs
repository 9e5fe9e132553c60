//! 1:1 and flattening projections.

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};

/// Lazy 1:1 projection; preserves upstream order and cardinality.
pub(crate) struct Select<T, F> {
    inner: Cursor<T>,
    selector: F,
    index: usize,
}

impl<T, U, F> Iterator for Select<T, F>
where
    F: FnMut(T, usize) -> U,
{
    type Item = Result<U>;

    #[inline]
    fn next(&mut self) -> Option<Result<U>> {
        match self.inner.next()? {
            Err(e) => Some(Err(e)),
            Ok(item) => {
                let index = self.index;
                self.index += 1;
                Some(Ok((self.selector)(item, index)))
            }
        }
    }
}

/// One-level flattening: for each upstream element the collection selector
/// yields an inner sequence whose elements are emitted in order before the
/// next upstream element is pulled.
pub(crate) struct SelectMany<T, U, F, R> {
    inner: Cursor<T>,
    collection_selector: F,
    result_selector: R,
    current: Option<(T, Cursor<U>)>,
    index: usize,
}

impl<T, U, V, F, R> Iterator for SelectMany<T, U, F, R>
where
    T: Clone + 'static,
    U: Clone + 'static,
    F: FnMut(&T, usize) -> Sequence<U>,
    R: FnMut(&T, U) -> V,
{
    type Item = Result<V>;

    fn next(&mut self) -> Option<Result<V>> {
        loop {
            if let Some((outer, cursor)) = self.current.as_mut() {
                match cursor.next() {
                    Some(Err(e)) => return Some(Err(e)),
                    Some(Ok(item)) => return Some(Ok((self.result_selector)(outer, item))),
                    None => self.current = None,
                }
            }
            match self.inner.next()? {
                Err(e) => return Some(Err(e)),
                Ok(outer) => {
                    let index = self.index;
                    self.index += 1;
                    let cursor = (self.collection_selector)(&outer, index).into_cursor();
                    self.current = Some((outer, cursor));
                }
            }
        }
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Projects each element through `selector(element, index)`.
    pub fn select<U: Clone + 'static>(
        self,
        selector: impl FnMut(T, usize) -> U + 'static,
    ) -> Sequence<U> {
        Sequence::from_pipeline(Select {
            inner: self.into_cursor(),
            selector,
            index: 0,
        })
    }

    /// Projects each element to an inner sequence and flattens one level; the
    /// inner elements are yielded directly.
    pub fn select_many<U: Clone + 'static>(
        self,
        selector: impl FnMut(&T, usize) -> Sequence<U> + 'static,
    ) -> Sequence<U> {
        Sequence::from_pipeline(SelectMany {
            inner: self.into_cursor(),
            collection_selector: selector,
            result_selector: |_: &T, inner: U| inner,
            current: None,
            index: 0,
        })
    }

    /// Like [`select_many`](Sequence::select_many), but combines the outer
    /// element with each inner element through `result_selector`.
    pub fn select_many_with<U, V>(
        self,
        collection_selector: impl FnMut(&T, usize) -> Sequence<U> + 'static,
        result_selector: impl FnMut(&T, U) -> V + 'static,
    ) -> Sequence<V>
    where
        U: Clone + 'static,
        V: Clone + 'static,
    {
        Sequence::from_pipeline(SelectMany {
            inner: self.into_cursor(),
            collection_selector,
            result_selector,
            current: None,
            index: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::sequence::Sequence;
    use lazyq_testkit::CallCounter;

    #[test]
    fn select_preserves_order_and_cardinality() {
        let out = Sequence::from_vec(vec![1, 2, 3])
            .select(|x, _| x * 10)
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![10, 20, 30]);
    }

    #[test]
    fn select_passes_consumed_position() {
        let out = Sequence::from_vec(vec!["a", "b", "c"])
            .select(|s, i| format!("{i}{s}"))
            .to_vec()
            .unwrap();
        assert_eq!(out, vec!["0a", "1b", "2c"]);
    }

    #[test]
    fn select_is_lazy() {
        let calls = CallCounter::new();
        let probe = calls.clone();
        let chain = Sequence::from_vec(vec![1, 2, 3]).select(move |x, _| {
            probe.bump();
            x + 1
        });
        assert_eq!(calls.count(), 0);
        chain.to_vec().unwrap();
        assert_eq!(calls.count(), 3);
    }

    #[test]
    fn select_many_flattens_in_order() {
        let out = Sequence::from_vec(vec![1, 2, 3])
            .select_many(|x, _| Sequence::from_vec(vec![*x, x * 10]))
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![1, 10, 2, 20, 3, 30]);
    }

    #[test]
    fn select_many_skips_empty_inner_sequences() {
        let out = Sequence::from_vec(vec![0, 2, 0, 3])
            .select_many(|n, _| crate::repeat("x", *n as usize))
            .to_vec()
            .unwrap();
        assert_eq!(out, vec!["x", "x", "x", "x", "x"]);
    }

    #[test]
    fn select_many_with_combines_outer_and_inner() {
        let out = Sequence::from_vec(vec![1, 2])
            .select_many_with(
                |_, _| Sequence::from_vec(vec!["a", "b"]),
                |outer, inner| format!("{outer}{inner}"),
            )
            .to_vec()
            .unwrap();
        assert_eq!(out, vec!["1a", "1b", "2a", "2b"]);
    }

    #[test]
    fn select_many_pulls_outer_lazily() {
        let calls = CallCounter::new();
        let probe = calls.clone();
        let first = Sequence::from_vec(vec![1, 2, 3])
            .select_many(move |x, _| {
                probe.bump();
                Sequence::from_vec(vec![*x])
            })
            .first()
            .unwrap();
        assert_eq!(first, 1);
        assert_eq!(calls.count(), 1);
    }
}
