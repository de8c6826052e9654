use std::io;

use thiserror::Error;

/// Errors returned by [`SplitBuffer`](super::SplitBuffer) operations.
///
/// Every variant except `IoFailure` is raised before any field is touched,
/// so a failed call leaves the buffer exactly as it was.
#[derive(Debug, Error)]
pub enum BufferError {
    /// No room left for another byte.
    #[error("buffer is full ({capacity} bytes)")]
    BufferFull { capacity: usize },

    /// Nothing to delete.
    #[error("buffer is empty")]
    BufferEmpty,

    /// The buffer has content, but all of it sits after the cursor.
    #[error("nothing before the cursor to delete")]
    NothingBeforeCursor,

    /// A cursor move of zero, or one that would leave `[0, size]`.
    #[error("cannot move cursor by {distance} from {cursor} (size {size})")]
    OutOfBounds {
        cursor: usize,
        distance: isize,
        size: usize,
    },

    /// The null byte is reserved and cannot be inserted.
    #[error("character must be non-null")]
    InvalidCharacter,

    #[error("failed to write buffer: {0}")]
    IoFailure(#[from] io::Error),
}

impl BufferError {
    /// Whether this error came from the sink rather than the buffer itself.
    pub fn is_io(&self) -> bool {
        matches!(self, BufferError::IoFailure(_))
    }
}
