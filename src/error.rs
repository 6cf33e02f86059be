use std::io;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// `pull` or `try_peek` was called on a sequence with nothing left.
    #[error("the sequence is exhausted")]
    Exhausted,

    /// The adapter cannot perform the requested operation.
    #[error("{0} does not support this operation")]
    Unsupported(&'static str),

    /// Contradictory parameters were passed to a constructor.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A lazy group view was used after its parent moved on to the next group.
    #[error("the group view was invalidated by advancing its parent")]
    Invalidated,

    /// Reading or writing the backing storage failed.
    #[error("storage failure: {0}")]
    Storage(#[from] io::Error),
}

impl Error {
    /// true for errors that come from the storage layer.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}
