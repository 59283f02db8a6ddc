//! Errors for the deterministic random draw API
//!
//! These are recoverable, typed failures: the draw APIs routinely receive
//! runtime-variable parameters (an empty loot table, a zero-width range)
//! that callers must handle gracefully. Nothing in this module panics.

use thiserror::Error;

/// Errors returned by [`DeterministicRandom`](crate::DeterministicRandom)
/// operations and the sequence algorithms built on them
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RandomError {
    /// Bad bounds, non-positive weights, blank context, or blank fork name
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A selection was requested from a collection with no candidates
    #[error("cannot select from an empty collection")]
    EmptyCollection,
}

impl RandomError {
    /// Shorthand used at every validation site
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        RandomError::InvalidArgument {
            reason: reason.into(),
        }
    }
}
