//! Positional pairing of two sequences.

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};

/// Pairs elements positionally and combines each pair through the result
/// selector. Stops at the shorter sequence; once one side is exhausted the
/// other side is not pulled again.
pub(crate) struct ZipWith<T, U, F> {
    first: Cursor<T>,
    second: Cursor<U>,
    selector: F,
    done: bool,
}

impl<T, U, R, F> Iterator for ZipWith<T, U, F>
where
    F: FnMut(T, U) -> R,
{
    type Item = Result<R>;

    fn next(&mut self) -> Option<Result<R>> {
        if self.done {
            return None;
        }
        let a = match self.first.next() {
            None => {
                self.done = true;
                return None;
            }
            Some(Err(e)) => return Some(Err(e)),
            Some(Ok(a)) => a,
        };
        let b = match self.second.next() {
            None => {
                self.done = true;
                return None;
            }
            Some(Err(e)) => return Some(Err(e)),
            Some(Ok(b)) => b,
        };
        Some(Ok((self.selector)(a, b)))
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Pairs this sequence with `second` positionally, combining each pair
    /// through `result_selector`. The result has the length of the shorter
    /// side.
    pub fn zip_with<U, R>(
        self,
        second: impl Into<Sequence<U>>,
        result_selector: impl FnMut(T, U) -> R + 'static,
    ) -> Sequence<R>
    where
        U: Clone + 'static,
        R: Clone + 'static,
    {
        Sequence::from_pipeline(ZipWith {
            first: self.into_cursor(),
            second: second.into().into_cursor(),
            selector: result_selector,
            done: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::sequence::Sequence;
    use lazyq_testkit::CallCounter;

    #[test]
    fn combines_pairs_positionally() {
        let out = Sequence::from_vec(vec![1, 2, 3])
            .zip_with(vec![4, 5, 6], |a, b| a + b)
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![5, 7, 9]);
    }

    #[test]
    fn stops_at_the_shorter_side() {
        let out = Sequence::from_vec(vec![1])
            .zip_with(vec![4, 5, 6], |a, b| a + b)
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![5]);

        let out = Sequence::from_vec(vec![1, 2, 3])
            .zip_with(vec![4], |a, b| a + b)
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![5]);
    }

    #[test]
    fn mixed_element_types() {
        let out = Sequence::from_vec(vec!["a", "b"])
            .zip_with(vec![1, 2], |s, n| format!("{s}{n}"))
            .to_vec()
            .unwrap();
        assert_eq!(out, vec!["a1", "b2"]);
    }

    #[test]
    fn exhausted_first_side_never_pulls_the_second() {
        let calls = CallCounter::new();
        let probe = calls.clone();
        let second = Sequence::from_vec(vec![10, 20]).select(move |x, _| {
            probe.bump();
            x
        });
        let out = crate::empty::<i32>()
            .zip_with(second, |a, b| a + b)
            .to_vec()
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(calls.count(), 0);
    }
}
