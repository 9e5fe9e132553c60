//! Dynamically typed sequences.
//!
//! A [`DynValue`] is a cheaply clonable, type-erased element; a
//! `Sequence<DynValue>` can hold a mix of runtime types the way a
//! dynamically typed host would. Type errors in this module are deferred:
//! building the chain never fails, the error surfaces from whichever terminal
//! eventually pulls the offending element.

use std::any::Any;
use std::cmp::Ordering;
use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::error::{Error, Result};
use crate::sequence::{Cursor, Sequence};

/// A type-erased sequence element.
pub type DynValue = Rc<dyn Any>;

/// Wraps a concrete value as a [`DynValue`].
pub fn value<V: Any>(v: V) -> DynValue {
    Rc::new(v)
}

fn as_f64(v: &DynValue) -> Option<f64> {
    if let Some(x) = v.downcast_ref::<f64>() {
        return Some(*x);
    }
    if let Some(x) = v.downcast_ref::<i64>() {
        return Some(*x as f64);
    }
    if let Some(x) = v.downcast_ref::<i32>() {
        return Some(*x as f64);
    }
    None
}

/// Picks a key ordering from a sample key: strings sort lexicographically,
/// numbers numerically. Returns `None` for any other runtime type. Elements
/// whose key later fails to downcast to the inferred type compare equal.
fn infer_comparer(sample: &DynValue) -> Option<Rc<dyn Fn(&DynValue, &DynValue) -> Ordering>> {
    if sample.downcast_ref::<String>().is_some() {
        return Some(Rc::new(|a, b| {
            match (a.downcast_ref::<String>(), b.downcast_ref::<String>()) {
                (Some(a), Some(b)) => a.cmp(b),
                _ => Ordering::Equal,
            }
        }));
    }
    if as_f64(sample).is_some() {
        return Some(Rc::new(|a, b| match (as_f64(a), as_f64(b)) {
            (Some(a), Some(b)) => OrderedFloat(a).cmp(&OrderedFloat(b)),
            _ => Ordering::Equal,
        }));
    }
    None
}

/// Deferred sort over dynamic values. Drains the upstream on the first pull,
/// probes the first element's key to infer the ordering, and raises a
/// missing-comparer error when the key type supports none.
struct InferredSort<F> {
    inner: Option<Cursor<DynValue>>,
    key_selector: F,
    descending: bool,
    sorted: std::vec::IntoIter<DynValue>,
}

impl<F> Iterator for InferredSort<F>
where
    F: Fn(&DynValue) -> DynValue,
{
    type Item = Result<DynValue>;

    fn next(&mut self) -> Option<Result<DynValue>> {
        if let Some(inner) = self.inner.take() {
            let mut keyed = Vec::new();
            for item in inner {
                match item {
                    Ok(item) => {
                        let key = (self.key_selector)(&item);
                        keyed.push((key, item));
                    }
                    Err(e) => return Some(Err(e)),
                }
            }
            let Some((sample, _)) = keyed.first() else {
                return None;
            };
            let Some(comparer) = infer_comparer(sample) else {
                return Some(Err(Error::missing_comparer(
                    "key is neither a string nor a number",
                )));
            };
            keyed.sort_by(|(a, _), (b, _)| {
                let ord = comparer(a, b);
                if self.descending { ord.reverse() } else { ord }
            });
            self.sorted = keyed
                .into_iter()
                .map(|(_, item)| item)
                .collect::<Vec<_>>()
                .into_iter();
        }
        self.sorted.next().map(Ok)
    }
}

impl Sequence<DynValue> {
    /// Keeps only the elements whose runtime type is `U`, unwrapped to `U`.
    /// Elements of any other type are silently skipped.
    pub fn of_type<U: Any + Clone>(self) -> Sequence<U> {
        Sequence::from_pipeline(self.into_cursor().filter_map(|item| match item {
            Ok(item) => item.downcast_ref::<U>().cloned().map(Ok),
            Err(e) => Some(Err(e)),
        }))
    }

    /// Reinterprets every element as `f64`. A non-numeric element does not
    /// fail here; the type-mismatch error is yielded when that element is
    /// pulled.
    pub fn as_numbers(self) -> Sequence<f64> {
        Sequence::from_pipeline(self.into_cursor().map(|item| {
            let item = item?;
            as_f64(&item).ok_or_else(|| {
                Error::type_mismatch("as_numbers", "element is not a numeric value")
            })
        }))
    }

    /// Sorts ascending by `key_selector`, inferring the key ordering from the
    /// first element's key: lexicographic for strings, numeric for numbers.
    /// Any other key type yields a deferred missing-comparer error; an empty
    /// sequence stays empty without probing anything.
    pub fn order_by_inferred(
        self,
        key_selector: impl Fn(&DynValue) -> DynValue + 'static,
    ) -> Sequence<DynValue> {
        Sequence::from_pipeline(InferredSort {
            inner: Some(self.into_cursor()),
            key_selector,
            descending: false,
            sorted: Vec::new().into_iter(),
        })
    }

    /// Descending counterpart of [`Sequence::order_by_inferred`].
    pub fn order_by_inferred_descending(
        self,
        key_selector: impl Fn(&DynValue) -> DynValue + 'static,
    ) -> Sequence<DynValue> {
        Sequence::from_pipeline(InferredSort {
            inner: Some(self.into_cursor()),
            key_selector,
            descending: true,
            sorted: Vec::new().into_iter(),
        })
    }
}
