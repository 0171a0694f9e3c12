use std::io;

use bstr::ByteSlice;

use super::GrowableBuffer;
use crate::{BufferError, CopyError};

/// Smallest spare capacity offered to a reader by `read_from`.
const MIN_READ: usize = 512;

/// What the previous operation read, if anything. Unread operations are only
/// valid directly after a successful read of the matching kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LastRead {
    #[default]
    Invalid,
    Byte,
    /// Width in bytes of the scalar returned by `read_rune`.
    Rune(usize),
}

/// In-memory [`GrowableBuffer`] backed by a `Vec<u8>` and a read offset.
///
/// ```rust
/// use logbuf::{ByteBuffer, GrowableBuffer};
///
/// let mut buf = ByteBuffer::from("key=value\nrest");
/// assert_eq!(buf.read_string(b'\n').unwrap(), "key=value\n");
/// assert_eq!(buf.text(), "rest");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ByteBuffer {
    buf: Vec<u8>,
    off: usize,
    last_read: LastRead,
}

impl ByteBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Consumes the buffer, returning the unread bytes.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.drain(..self.off);
        self.buf
    }

    fn clear(&mut self) {
        self.buf.clear();
        self.off = 0;
    }

    /// Makes room for `n` more bytes, sliding unread content to the front of
    /// the storage before asking the allocator for more.
    fn reserve(&mut self, n: usize) -> Result<(), BufferError> {
        if self.off != 0 && self.off == self.buf.len() {
            self.clear();
        }
        if self.buf.capacity() - self.buf.len() >= n {
            return Ok(());
        }
        if self.off > 0 {
            self.buf.drain(..self.off);
            self.off = 0;
        }
        self.buf.try_reserve(n).map_err(|_| BufferError::TooLarge)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(buf: Vec<u8>) -> Self {
        Self {
            buf,
            ..Self::default()
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl From<String> for ByteBuffer {
    fn from(s: String) -> Self {
        Self::from(s.into_bytes())
    }
}

impl From<&str> for ByteBuffer {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes())
    }
}

impl GrowableBuffer for ByteBuffer {
    fn unread_bytes(&self) -> &[u8] {
        &self.buf[self.off..]
    }

    fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    fn grow(&mut self, additional: usize) -> Result<(), BufferError> {
        self.last_read = LastRead::Invalid;
        self.reserve(additional)
    }

    fn len(&self) -> usize {
        self.buf.len() - self.off
    }

    fn peek(&self, n: usize) -> Result<&[u8], BufferError> {
        let available = self.len();
        if n > available {
            return Err(BufferError::ShortBuffer {
                requested: n,
                available,
            });
        }
        Ok(&self.buf[self.off..self.off + n])
    }

    fn next_bytes(&mut self, n: usize) -> &[u8] {
        let n = n.min(self.len());
        let start = self.off;
        self.off += n;
        self.last_read = if n > 0 {
            LastRead::Byte
        } else {
            LastRead::Invalid
        };
        &self.buf[start..self.off]
    }

    fn read(&mut self, dest: &mut [u8]) -> Result<usize, BufferError> {
        self.last_read = LastRead::Invalid;
        if self.is_empty() {
            self.clear();
            if dest.is_empty() {
                return Ok(0);
            }
            return Err(BufferError::EndOfData);
        }
        let n = dest.len().min(self.len());
        dest[..n].copy_from_slice(&self.buf[self.off..self.off + n]);
        self.off += n;
        if n > 0 {
            self.last_read = LastRead::Byte;
        }
        Ok(n)
    }

    fn read_byte(&mut self) -> Result<u8, BufferError> {
        self.last_read = LastRead::Invalid;
        let Some(&byte) = self.buf.get(self.off) else {
            self.clear();
            return Err(BufferError::EndOfData);
        };
        self.off += 1;
        self.last_read = LastRead::Byte;
        Ok(byte)
    }

    fn read_until(&mut self, delimiter: u8) -> Result<Vec<u8>, BufferError> {
        let start = self.off;
        let found = self.buf[start..].find_byte(delimiter);
        self.off = found.map_or(self.buf.len(), |i| start + i + 1);
        self.last_read = if self.off > start {
            LastRead::Byte
        } else {
            LastRead::Invalid
        };
        let line = self.buf[start..self.off].to_vec();
        match found {
            Some(_) => Ok(line),
            None => Err(BufferError::DelimiterNotFound {
                delimiter,
                partial: line.into(),
            }),
        }
    }

    fn read_from<R: io::Read + ?Sized>(&mut self, reader: &mut R) -> Result<u64, CopyError> {
        self.last_read = LastRead::Invalid;
        let mut total = 0u64;
        loop {
            self.reserve(MIN_READ)
                .map_err(|e| CopyError::new(total, e.into()))?;
            let start = self.buf.len();
            self.buf.resize(self.buf.capacity(), 0);
            let result = reader.read(&mut self.buf[start..]);
            let read = *result.as_ref().unwrap_or(&0);
            self.buf.truncate(start + read);
            match result {
                Ok(0) => return Ok(total),
                Ok(n) => total += n as u64,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(CopyError::new(total, e)),
            }
        }
    }

    fn read_rune(&mut self) -> Result<(char, usize), BufferError> {
        self.last_read = LastRead::Invalid;
        let rest = &self.buf[self.off..];
        let Some(&first) = rest.first() else {
            self.clear();
            return Err(BufferError::EndOfData);
        };
        match bstr::decode_utf8(rest) {
            (Some(c), width) => {
                self.off += width;
                self.last_read = LastRead::Rune(width);
                Ok((c, width))
            }
            (None, _) => Err(BufferError::InvalidUtf8 { byte: first }),
        }
    }

    fn reset(&mut self) {
        self.clear();
        self.last_read = LastRead::Invalid;
    }

    fn truncate(&mut self, n: usize) -> Result<(), BufferError> {
        if n == 0 {
            self.reset();
            return Ok(());
        }
        self.last_read = LastRead::Invalid;
        let len = self.len();
        if n > len {
            return Err(BufferError::TruncateOutOfRange { requested: n, len });
        }
        self.buf.truncate(self.off + n);
        Ok(())
    }

    fn unread_byte(&mut self) -> Result<(), BufferError> {
        if self.last_read == LastRead::Invalid {
            return Err(BufferError::InvalidUnread(crate::UnreadKind::Byte));
        }
        self.last_read = LastRead::Invalid;
        self.off = self.off.saturating_sub(1);
        Ok(())
    }

    fn unread_rune(&mut self) -> Result<(), BufferError> {
        let LastRead::Rune(width) = self.last_read else {
            return Err(BufferError::InvalidUnread(crate::UnreadKind::Rune));
        };
        self.last_read = LastRead::Invalid;
        if self.off >= width {
            self.off -= width;
        }
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, BufferError> {
        self.last_read = LastRead::Invalid;
        self.reserve(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn write_to<W: io::Write + ?Sized>(&mut self, writer: &mut W) -> Result<u64, CopyError> {
        self.last_read = LastRead::Invalid;
        let pending = self.len();
        if pending > 0 {
            let written = loop {
                match writer.write(&self.buf[self.off..]) {
                    Ok(n) => break n.min(pending),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => return Err(CopyError::new(0, e)),
                }
            };
            self.off += written;
            if written < pending {
                return Err(CopyError::new(
                    written as u64,
                    io::Error::new(io::ErrorKind::WriteZero, "short write"),
                ));
            }
        }
        self.clear();
        Ok(pending as u64)
    }
}

impl io::Read for ByteBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match GrowableBuffer::read(self, buf) {
            Err(BufferError::EndOfData) => Ok(0),
            result => result.map_err(io::Error::from),
        }
    }
}

impl io::BufRead for ByteBuffer {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(GrowableBuffer::unread_bytes(self))
    }

    fn consume(&mut self, amt: usize) {
        self.last_read = LastRead::Invalid;
        self.off += amt.min(GrowableBuffer::len(self));
    }
}

impl io::Write for ByteBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        GrowableBuffer::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
