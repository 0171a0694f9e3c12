//! Growable byte buffers.
//!
//! [`GrowableBuffer`] is the contract the logging decorator forwards to, and
//! [`ByteBuffer`] is the in-memory implementation used by default.
//!
//! A buffer is a byte vector with a read cursor: writes append at the end,
//! reads consume from the cursor. Consumed bytes stay in storage until the
//! buffer needs room, at which point they are compacted away.

mod byte_buffer;


use std::io;

pub use byte_buffer::ByteBuffer;

use crate::{BufferError, CopyError};

/// The operations of a growable byte buffer with an independent read cursor.
///
/// Error and edge semantics are part of the contract: a decorator forwarding
/// to an implementation must be able to rely on them without inspecting the
/// concrete type.
pub trait GrowableBuffer {
    /// The unread bytes.
    fn unread_bytes(&self) -> &[u8];

    /// Capacity of the underlying storage, consumed bytes included.
    fn capacity(&self) -> usize;

    /// Ensures room for `additional` more bytes without another allocation.
    ///
    /// # Errors
    ///
    /// [`BufferError::TooLarge`] if the storage cannot be grown.
    fn grow(&mut self, additional: usize) -> Result<(), BufferError>;

    /// Number of unread bytes.
    fn len(&self) -> usize;

    /// Whether there are no unread bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The next `n` unread bytes, without consuming them.
    ///
    /// # Errors
    ///
    /// [`BufferError::ShortBuffer`] if fewer than `n` bytes are unread.
    fn peek(&self, n: usize) -> Result<&[u8], BufferError>;

    /// Consumes and returns up to `n` unread bytes.
    fn next_bytes(&mut self, n: usize) -> &[u8];

    /// Copies unread bytes into `dest`, returning how many were copied.
    ///
    /// # Errors
    ///
    /// [`BufferError::EndOfData`] if the buffer is empty and `dest` is not.
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, BufferError>;

    /// Consumes one byte.
    ///
    /// # Errors
    ///
    /// [`BufferError::EndOfData`] if the buffer is empty.
    fn read_byte(&mut self) -> Result<u8, BufferError>;

    /// Consumes bytes up to and including `delimiter`.
    ///
    /// # Errors
    ///
    /// [`BufferError::DelimiterNotFound`] carrying every remaining byte if
    /// the delimiter never appears.
    fn read_until(&mut self, delimiter: u8) -> Result<Vec<u8>, BufferError>;

    /// [`read_until`](Self::read_until), decoded as text. Invalid UTF-8 is
    /// replaced with U+FFFD.
    ///
    /// # Errors
    ///
    /// Same as [`read_until`](Self::read_until).
    fn read_string(&mut self, delimiter: u8) -> Result<String, BufferError> {
        self.read_until(delimiter)
            .map(|line| String::from_utf8_lossy(&line).into_owned())
    }

    /// Appends everything `reader` produces until end of file, returning the
    /// number of bytes appended.
    ///
    /// # Errors
    ///
    /// Any error from `reader` other than `Interrupted`, or an
    /// `OutOfMemory` error if the storage cannot grow. The error carries the
    /// bytes appended before the failure.
    fn read_from<R: io::Read + ?Sized>(&mut self, reader: &mut R) -> Result<u64, CopyError>;

    /// Consumes one UTF-8 encoded scalar, returning it with its byte width.
    ///
    /// # Errors
    ///
    /// [`BufferError::EndOfData`] on an empty buffer, and
    /// [`BufferError::InvalidUtf8`] when the next bytes are not valid UTF-8.
    /// Nothing is consumed on error.
    fn read_rune(&mut self) -> Result<(char, usize), BufferError>;

    /// Drops all content while keeping the allocation.
    fn reset(&mut self);

    /// The unread bytes as text, with invalid UTF-8 replaced.
    fn text(&self) -> String {
        String::from_utf8_lossy(self.unread_bytes()).into_owned()
    }

    /// Keeps only the first `n` unread bytes.
    ///
    /// # Errors
    ///
    /// [`BufferError::TruncateOutOfRange`] if `n` exceeds [`len`](Self::len).
    fn truncate(&mut self, n: usize) -> Result<(), BufferError>;

    /// Steps back over the last byte read.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidUnread`] unless the previous operation was a
    /// successful read.
    fn unread_byte(&mut self) -> Result<(), BufferError>;

    /// Steps back over the last scalar returned by
    /// [`read_rune`](Self::read_rune).
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidUnread`] unless the previous operation was a
    /// successful `read_rune`.
    fn unread_rune(&mut self) -> Result<(), BufferError>;

    /// Appends `bytes`, returning how many were written.
    ///
    /// # Errors
    ///
    /// [`BufferError::TooLarge`] if the storage cannot grow.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, BufferError>;

    /// Appends a single byte.
    ///
    /// # Errors
    ///
    /// [`BufferError::TooLarge`] if the storage cannot grow.
    fn write_byte(&mut self, byte: u8) -> Result<(), BufferError> {
        self.write(&[byte]).map(drop)
    }

    /// Appends the UTF-8 encoding of `c`, returning its width.
    ///
    /// # Errors
    ///
    /// [`BufferError::TooLarge`] if the storage cannot grow.
    fn write_rune(&mut self, c: char) -> Result<usize, BufferError> {
        let mut utf8 = [0; 4];
        self.write(c.encode_utf8(&mut utf8).as_bytes())
    }

    /// Appends `s`, returning its length in bytes.
    ///
    /// # Errors
    ///
    /// [`BufferError::TooLarge`] if the storage cannot grow.
    fn write_string(&mut self, s: &str) -> Result<usize, BufferError> {
        self.write(s.as_bytes())
    }

    /// Offers every unread byte to `writer` in a single write, consuming
    /// what it accepts.
    ///
    /// # Errors
    ///
    /// Any error from `writer` other than `Interrupted`, or `WriteZero` if it
    /// accepts fewer bytes than offered. The error carries the bytes drained
    /// before the failure.
    fn write_to<W: io::Write + ?Sized>(&mut self, writer: &mut W) -> Result<u64, CopyError>;
}
