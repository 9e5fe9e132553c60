//! Lazily evaluated, chainable queries over in-memory sequences.
//!
//! A [`Sequence`] wraps a source of elements and exposes a fluent operator
//! chain. Intermediate operators (`where_`, `select`, `take`, `union`, ...)
//! never touch the source; they stack pull-driven adapters. Only a terminal
//! (`to_vec`, `count`, `first`, `sum`, ...) drains the chain, and every
//! terminal returns a `Result` so that deferred failures surface exactly
//! where evaluation happens.
//!
//! # Key Types
//!
//! - [`Sequence`] - A chainable, lazily evaluated sequence of elements
//! - [`OrderedSequence`] - A sequence with a pending stable sort, refinable
//!   via `then_by`
//! - [`Grouping`] - One key's equivalence class, as produced by `group_by`
//! - [`DynValue`] - A type-erased element for dynamically typed sequences
//!
//! Operators consume the sequence they are called on; a sequence built from
//! an in-memory snapshot can be traversed again through
//! [`Sequence::replay`].

pub mod aggregate;
pub mod dynamic;
pub mod error;
pub mod join;
pub mod ordering;
pub mod sequence;
pub mod set_ops;
pub mod terminal;
pub mod transform;

pub use dynamic::{DynValue, value};
pub use error::{Error, ErrorKind, Result};
pub use join::Grouping;
pub use ordering::OrderedSequence;
pub use sequence::{KeyValue, Sequence, empty, from_map, range, repeat};
