use std::{fmt, io};

use bstr::BString;
use thiserror::Error;

/// Which unread operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreadKind {
    /// `unread_byte` without a preceding successful read.
    Byte,
    /// `unread_rune` without a directly preceding successful `read_rune`.
    Rune,
}

impl fmt::Display for UnreadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte => f.write_str("unread_byte: previous operation was not a successful read"),
            Self::Rune => {
                f.write_str("unread_rune: previous operation was not a successful read_rune")
            }
        }
    }
}

/// Errors reported by a [`GrowableBuffer`](crate::GrowableBuffer).
///
/// The logging decorator passes these through untouched; it never produces
/// an error of its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A read was attempted on a buffer with no unread bytes.
    #[error("end of data")]
    EndOfData,
    /// A delimited read drained the buffer without seeing the delimiter.
    ///
    /// `partial` holds everything that was consumed.
    #[error("end of data before delimiter {delimiter:#04x}")]
    DelimiterNotFound {
        /// The byte that was searched for.
        delimiter: u8,
        /// The bytes consumed by the read.
        partial: BString,
    },
    /// An unread was attempted without a matching read before it.
    #[error("{0}")]
    InvalidUnread(UnreadKind),
    /// The unread bytes do not start with a valid UTF-8 sequence.
    #[error("invalid utf-8 sequence starting with {byte:#04x}")]
    InvalidUtf8 {
        /// First byte of the malformed sequence.
        byte: u8,
    },
    /// A peek asked for more bytes than are buffered.
    #[error("peek of {requested} bytes with only {available} available")]
    ShortBuffer {
        /// Bytes asked for.
        requested: usize,
        /// Bytes actually unread.
        available: usize,
    },
    /// A truncation asked to keep more bytes than are buffered.
    #[error("truncation to {requested} out of range for length {len}")]
    TruncateOutOfRange {
        /// Bytes asked to keep.
        requested: usize,
        /// Unread length at the time of the call.
        len: usize,
    },
    /// The storage could not grow to the requested size.
    #[error("buffer too large")]
    TooLarge,
}

impl From<BufferError> for io::Error {
    fn from(err: BufferError) -> Self {
        let kind = match err {
            BufferError::EndOfData | BufferError::DelimiterNotFound { .. } => {
                io::ErrorKind::UnexpectedEof
            }
            BufferError::TooLarge => io::ErrorKind::OutOfMemory,
            BufferError::InvalidUtf8 { .. } => io::ErrorKind::InvalidData,
            BufferError::InvalidUnread(_)
            | BufferError::ShortBuffer { .. }
            | BufferError::TruncateOutOfRange { .. } => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}

/// A streaming copy that stopped part way through.
///
/// The `copied` bytes stay where the copy put them: appended to the buffer by
/// `read_from`, or drained from it by `write_to`.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct CopyError {
    /// Bytes moved before the failure.
    pub copied: u64,
    /// What stopped the copy.
    #[source]
    pub source: io::Error,
}

impl CopyError {
    /// Creates an error for a copy that moved `copied` bytes before failing.
    #[must_use]
    pub fn new(copied: u64, source: io::Error) -> Self {
        Self { copied, source }
    }

    /// The kind of the underlying I/O error.
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

impl From<io::Error> for CopyError {
    fn from(source: io::Error) -> Self {
        Self::new(0, source)
    }
}

impl From<BufferError> for CopyError {
    fn from(err: BufferError) -> Self {
        Self::new(0, err.into())
    }
}

impl From<CopyError> for io::Error {
    fn from(err: CopyError) -> Self {
        err.source
    }
}
