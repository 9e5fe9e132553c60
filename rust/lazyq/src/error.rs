//! Error taxonomy of the sequence engine.
//!
//! Intermediate operators never fail on their own: an error produced inside a
//! lazy chain travels down the pull channel and is realized by the terminal
//! operator that forces evaluation.

use thiserror::Error;

/// Error returned by terminal operators.
///
/// The concrete failure is carried as a boxed [`ErrorKind`], keeping the
/// type a single pointer wide on the happy path.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn empty_aggregation(operation: impl Into<String>) -> Error {
        Error(
            ErrorKind::EmptyAggregation {
                operation: operation.into(),
            }
            .into(),
        )
    }

    pub fn type_mismatch(operation: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::TypeMismatch {
                operation: operation.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn multiple_matches(operation: impl Into<String>) -> Error {
        Error(
            ErrorKind::MultipleMatches {
                operation: operation.into(),
            }
            .into(),
        )
    }

    pub fn not_found(operation: impl Into<String>) -> Error {
        Error(
            ErrorKind::NotFound {
                operation: operation.into(),
            }
            .into(),
        )
    }

    pub fn missing_comparer(key_kind: impl Into<String>) -> Error {
        Error(
            ErrorKind::MissingComparer {
                key_kind: key_kind.into(),
            }
            .into(),
        )
    }

    pub fn index(operation: impl Into<String>, index: isize) -> Error {
        Error(
            ErrorKind::Index {
                operation: operation.into(),
                index,
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A terminal that requires at least one qualifying element saw none.
    #[error("{operation} over an empty sequence: no qualifying element")]
    EmptyAggregation { operation: String },

    /// A numeric aggregate met a value it could not coerce to a number.
    #[error("type mismatch in {operation}: {message}")]
    TypeMismatch { operation: String, message: String },

    /// `single` matched more than one element and no default was supplied.
    #[error("{operation} matched more than one element")]
    MultipleMatches { operation: String },

    /// An element-retrieval terminal found no match and no default was supplied.
    #[error("{operation} found no matching element")]
    NotFound { operation: String },

    /// Inferred ordering was asked for a key type it does not support.
    #[error("no comparer supplied and none can be inferred for key of kind '{key_kind}'")]
    MissingComparer { key_kind: String },

    /// An index outside a container's bounds. The engine itself reports
    /// unresolved positions as [`ErrorKind::NotFound`]; this kind is part of
    /// the taxonomy for indexed wrappers built on top of it.
    #[error("{operation}: index {index} is out of range")]
    Index { operation: String, index: isize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
