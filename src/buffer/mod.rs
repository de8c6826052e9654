//! # Split Buffer
//!
//! Fixed-capacity text storage for a single document, split at the cursor.
//!
//! ## Layout
//!
//! ```text
//!  [ prefix | gap (unused) | suffix | reserved ]
//!    0..pre   pre..post      post..CAP-1  CAP-1
//! ```
//!
//! - The prefix holds everything before the cursor, left-justified.
//! - The suffix holds everything after the cursor, right-justified against
//!   the reserved last slot.
//! - Inserting or deleting at the cursor only touches the edge of the gap.
//! - Moving the cursor copies the bytes it passes over to the other side of
//!   the gap, so the gap always sits at the cursor.
//!
//! ## Bytes, not characters
//!
//! The buffer stores raw bytes. Positions, distances and sizes are byte
//! counts, and no attempt is made to keep multi-byte UTF-8 sequences intact.
//! Callers that want character semantics must restrict themselves to ASCII.
//!
//! ## Errors
//!
//! Every operation checks its preconditions before touching any field, so a
//! call that returns [`BufferError`] leaves the buffer unchanged.

use std::fmt;
use std::io::Write;

mod error;

pub use error::BufferError;

/// Storage size used by [`TextBuffer`].
pub const DEFAULT_CAPACITY: usize = 4096;

/// The buffer type used by the editor.
pub type TextBuffer = SplitBuffer<DEFAULT_CAPACITY>;

#[derive(Clone)]
pub struct SplitBuffer<const CAP: usize = DEFAULT_CAPACITY> {
    storage: [u8; CAP],
    pre_cursor_index: usize,
    post_cursor_index: usize,
    current_size: usize,
}

impl<const CAP: usize> Default for SplitBuffer<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> SplitBuffer<CAP> {
    const NON_ZERO_CAPACITY: () = assert!(CAP > 0, "split buffer capacity must be non-zero");

    /// Most logical bytes the buffer can hold. The last storage slot is
    /// never live.
    pub const MAX_LEN: usize = CAP.saturating_sub(1);

    /// Create an empty buffer.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_ZERO_CAPACITY;

        Self {
            storage: [0; CAP],
            pre_cursor_index: 0,
            post_cursor_index: CAP - 1,
            current_size: 0,
        }
    }

    /// Create a buffer holding `initial_text` with the cursor at the end.
    ///
    /// Text longer than [`Self::MAX_LEN`] is silently cut down to its first
    /// `MAX_LEN` bytes.
    pub fn create(initial_text: impl AsRef<[u8]>) -> Self {
        let mut buffer = Self::new();
        buffer.replace(initial_text.as_ref());
        buffer
    }

    /// Replace the whole content, leaving the cursor at the end.
    pub fn replace(&mut self, text: &[u8]) {
        let length = text.len().min(Self::MAX_LEN);
        self.storage[..length].copy_from_slice(&text[..length]);
        self.pre_cursor_index = length;
        self.post_cursor_index = CAP - 1;
        self.current_size = length;
    }

    /// Return to the empty state. Storage is kept, only the indices move.
    pub fn reset(&mut self) {
        self.pre_cursor_index = 0;
        self.post_cursor_index = CAP - 1;
        self.current_size = 0;
    }

    /// Insert `c` before the cursor.
    pub fn append(&mut self, c: u8) -> Result<(), BufferError> {
        if c == 0 {
            return Err(BufferError::InvalidCharacter);
        }
        if self.current_size == Self::MAX_LEN {
            return Err(BufferError::BufferFull {
                capacity: Self::MAX_LEN,
            });
        }

        self.storage[self.pre_cursor_index] = c;
        self.pre_cursor_index += 1;
        self.current_size += 1;
        Ok(())
    }

    /// Delete the byte before the cursor and return it.
    pub fn remove(&mut self) -> Result<u8, BufferError> {
        if self.current_size == 0 {
            return Err(BufferError::BufferEmpty);
        }
        if self.pre_cursor_index == 0 {
            return Err(BufferError::NothingBeforeCursor);
        }

        self.pre_cursor_index -= 1;
        self.current_size -= 1;
        Ok(self.storage[self.pre_cursor_index])
    }

    /// Move the cursor by `distance` bytes, negative meaning left.
    ///
    /// Fails with [`BufferError::OutOfBounds`] for a zero distance or when
    /// the new position would fall outside `0..=len()`.
    pub fn move_cursor(&mut self, distance: isize) -> Result<(), BufferError> {
        let target = self
            .checked_target(distance)
            .ok_or(BufferError::OutOfBounds {
                cursor: self.pre_cursor_index,
                distance,
                size: self.current_size,
            })?;

        if target > self.pre_cursor_index {
            let count = target - self.pre_cursor_index;
            let start = self.post_cursor_index;
            self.storage
                .copy_within(start..start + count, self.pre_cursor_index);
            self.pre_cursor_index += count;
            self.post_cursor_index += count;
        } else {
            let count = self.pre_cursor_index - target;
            self.storage
                .copy_within(target..self.pre_cursor_index, self.post_cursor_index - count);
            self.pre_cursor_index -= count;
            self.post_cursor_index -= count;
        }

        Ok(())
    }

    fn checked_target(&self, distance: isize) -> Option<usize> {
        if distance == 0 {
            return None;
        }
        let target = self.pre_cursor_index.checked_add_signed(distance)?;
        (target <= self.current_size).then_some(target)
    }

    /// Put the cursor at an absolute position. Already being there is fine.
    pub fn move_to(&mut self, position: usize) -> Result<(), BufferError> {
        let cursor = self.pre_cursor_index;
        if position > self.current_size {
            return Err(BufferError::OutOfBounds {
                cursor,
                distance: isize::try_from(position - cursor).unwrap_or(isize::MAX),
                size: self.current_size,
            });
        }
        if position == cursor {
            return Ok(());
        }

        // Both sides are bounded by CAP, which fits in an isize for any
        // array that can exist.
        self.move_cursor(position as isize - cursor as isize)
    }

    /// Move the cursor to the closest line start before it.
    ///
    /// A line start is position 0 or any position right after a `\n`. When
    /// the cursor is on the first line nothing happens.
    pub fn ascend(&mut self) -> Result<(), BufferError> {
        // A newline right before the cursor means the cursor already sits
        // on a line start, so the scan begins one byte further back.
        let search_end = self.pre_cursor_index.saturating_sub(1);
        match self.storage[..search_end].iter().rposition(|&b| b == b'\n') {
            Some(newline) => self.move_to(newline + 1),
            None => Ok(()),
        }
    }

    /// Move the cursor to the start of the next line. Nothing happens on the
    /// last line.
    pub fn descend(&mut self) -> Result<(), BufferError> {
        match self.suffix().iter().position(|&b| b == b'\n') {
            Some(offset) => self.move_to(self.pre_cursor_index + offset + 1),
            None => Ok(()),
        }
    }

    /// Write the content to `sink`, prefix first, without building an
    /// intermediate copy.
    pub fn save<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), BufferError> {
        sink.write_all(self.prefix())?;
        sink.write_all(self.suffix())?;
        Ok(())
    }

    /// The content as an owned byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.current_size);
        bytes.extend_from_slice(self.prefix());
        bytes.extend_from_slice(self.suffix());
        bytes
    }

    /// Content before the cursor.
    pub fn prefix(&self) -> &[u8] {
        &self.storage[..self.pre_cursor_index]
    }

    /// Content after the cursor.
    pub fn suffix(&self) -> &[u8] {
        &self.storage[self.post_cursor_index..CAP - 1]
    }

    /// Cursor offset in bytes from the start of the document.
    pub fn cursor(&self) -> usize {
        self.pre_cursor_index
    }

    pub fn pre_cursor_index(&self) -> usize {
        self.pre_cursor_index
    }

    pub fn post_cursor_index(&self) -> usize {
        self.post_cursor_index
    }

    pub fn len(&self) -> usize {
        self.current_size
    }

    pub fn is_empty(&self) -> bool {
        self.current_size == 0
    }

    /// Total storage size, including the reserved slot.
    pub fn capacity(&self) -> usize {
        CAP
    }

    /// How many more bytes can be appended.
    pub fn remaining(&self) -> usize {
        Self::MAX_LEN - self.current_size
    }

    /// Zero-based (line, column) of the cursor, counting bytes.
    pub fn line_and_column(&self) -> (usize, usize) {
        let prefix = self.prefix();
        match prefix.iter().rposition(|&b| b == b'\n') {
            Some(newline) => {
                let line = prefix.iter().filter(|&&b| b == b'\n').count();
                (line, prefix.len() - newline - 1)
            }
            None => (0, prefix.len()),
        }
    }
}

impl<const CAP: usize> PartialEq for SplitBuffer<CAP> {
    fn eq(&self, other: &Self) -> bool {
        self.prefix() == other.prefix() && self.suffix() == other.suffix()
    }
}

impl<const CAP: usize> Eq for SplitBuffer<CAP> {}

/// Renders the content as text. Invalid UTF-8 is replaced rather than
/// rejected; use [`SplitBuffer::to_bytes`] for an exact copy.
impl<const CAP: usize> fmt::Display for SplitBuffer<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (
            std::str::from_utf8(self.prefix()),
            std::str::from_utf8(self.suffix()),
        ) {
            (Ok(prefix), Ok(suffix)) => {
                f.write_str(prefix)?;
                f.write_str(suffix)
            }
            _ => f.write_str(&String::from_utf8_lossy(&self.to_bytes())),
        }
    }
}

impl<const CAP: usize> fmt::Debug for SplitBuffer<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitBuffer")
            .field("capacity", &CAP)
            .field("pre_cursor_index", &self.pre_cursor_index)
            .field("post_cursor_index", &self.post_cursor_index)
            .field("current_size", &self.current_size)
            .field("prefix", &String::from_utf8_lossy(self.prefix()))
            .field("suffix", &String::from_utf8_lossy(self.suffix()))
            .finish()
    }
}
