//! Element-wise lazy transformations: filtering, projection, partitioning and
//! duplicate removal.
//!
//! Every operator here is a named pull-state machine implementing `Iterator`
//! over the deferred-error channel. Constructing an operator evaluates
//! nothing; predicates and selectors run only when a downstream consumer
//! pulls.

pub mod distinct;
pub mod filtering;
pub mod partition;
pub mod projection;
