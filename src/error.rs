//! Error types for tree construction, queries and the extraction pipeline.

use thiserror::Error;

/// Errors raised by the substring engine.
///
/// Convergence outcomes of the extraction pipeline (nothing repeated, a
/// repeat below the minimum length, too little material left) are not
/// errors; they end the loop and return what has accumulated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Empty input set, or inputs of different element kinds.
    #[error("Invalid input: {0}")]
    InvalidInputKind(String),

    /// The sentinel pool ran out before every sequence got a terminator.
    #[error("Too many sequences: the sentinel pool holds {capacity} terminators")]
    TooManySequences { capacity: usize },

    /// The engine reached a state that a correct tree cannot produce.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        Error::InvariantViolation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
