//! Test utilities and helpers for the lazyq project.
//!
//! This crate provides:
//! - Evaluation probes for asserting laziness and short-circuiting
//! - Deterministic synthetic data generation
//!
//! It is intended for use within the lazyq test suite only.

pub mod data_gen;
pub mod probe;

pub use data_gen::{sample_words, shuffled_range};
pub use probe::CallCounter;
