//! Intersection, driven by the second sequence.

use crate::error::Result;
use crate::sequence::{Cursor, Sequence};
use crate::set_ops::contains_with;

/// Intersection of two sequences.
///
/// Quirk, preserved deliberately: the operator iterates the **second**
/// sequence and filters each of its elements by membership in the buffered
/// first sequence. Output order therefore follows the second sequence, not the
/// first, and repeats within the second are yielded as often as they occur.
/// This differs from the conventional symmetric intersection contract of
/// comparable libraries.
///
/// The first sequence is buffered on the initial pull; until then nothing is
/// evaluated.
pub(crate) struct Intersect<T, C> {
    first: Option<Cursor<T>>,
    members: Vec<T>,
    second: Cursor<T>,
    comparer: C,
}

impl<T, C> Iterator for Intersect<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> bool,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if let Some(first) = self.first.take() {
            for item in first {
                match item {
                    Ok(item) => self.members.push(item),
                    Err(e) => return Some(Err(e)),
                }
            }
        }
        loop {
            match self.second.next()? {
                Err(e) => return Some(Err(e)),
                Ok(item) => {
                    if contains_with(&self.members, &item, &self.comparer) {
                        return Some(Ok(item));
                    }
                }
            }
        }
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Intersection under a caller-supplied equality comparer. See
    /// [`Sequence::intersect`] for the ordering quirk.
    pub fn intersect_by(
        self,
        second: impl Into<Sequence<T>>,
        comparer: impl Fn(&T, &T) -> bool + 'static,
    ) -> Sequence<T> {
        Sequence::from_pipeline(Intersect {
            first: Some(self.into_cursor()),
            members: Vec::new(),
            second: second.into().into_cursor(),
            comparer,
        })
    }
}

impl<T: Clone + PartialEq + 'static> Sequence<T> {
    /// Yields the elements of `second` that also appear anywhere in `self`.
    /// Output order follows `second`, not `self`; the asymmetry is part of
    /// the contract.
    pub fn intersect(self, second: impl Into<Sequence<T>>) -> Sequence<T> {
        self.intersect_by(second, |a, b| a == b)
    }
}

#[cfg(test)]
mod tests {
    use crate::sequence::Sequence;

    #[test]
    fn keeps_common_elements() {
        let out = Sequence::from_vec(vec![1, 2, 3, 4])
            .intersect(vec![4, 2, 9])
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![4, 2]);
    }

    #[test]
    fn output_order_follows_the_second_sequence() {
        let out = Sequence::from_vec(vec![1, 2, 3])
            .intersect(vec![3, 1])
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![3, 1]);
    }

    #[test]
    fn repeats_in_the_second_sequence_are_kept() {
        let out = Sequence::from_vec(vec![1, 2])
            .intersect(vec![2, 2, 5])
            .to_vec()
            .unwrap();
        assert_eq!(out, vec![2, 2]);
    }

    #[test]
    fn disjoint_sequences_intersect_to_empty() {
        let out = Sequence::from_vec(vec![1, 2])
            .intersect(vec![3, 4])
            .to_vec()
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn comparer_variant() {
        let out = Sequence::from_vec(vec!["A", "b"])
            .intersect_by(vec!["a", "c"], |x, y| x.eq_ignore_ascii_case(y))
            .to_vec()
            .unwrap();
        assert_eq!(out, vec!["a"]);
    }
}
