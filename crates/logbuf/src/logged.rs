//! The logging decorator.
//!
//! Every public method of [`LoggedBuffer`] forwards to the wrapped
//! [`GrowableBuffer`] and then appends one [`LogRecord`]. Methods are marked
//! `#[track_caller]`, so the recorded location is the code that called the
//! decorator, never a frame inside this crate.

use std::{fmt::Display, io, panic::Location};

use bstr::ByteSlice;

use crate::{
    BufferError, ByteBuffer, CopyError, GrowableBuffer, LogOptions,
    log::{CallLog, LogRecord},
};

/// Text returned by [`LoggedBuffer::text_of`] when there is no buffer.
pub const NIL_TEXT: &str = "<nil>";

/// A [`GrowableBuffer`] that records every call made on it.
///
/// The results of the wrapped buffer are returned unchanged; the log is a
/// side channel, retrieved with [`logs`](Self::logs) or
/// [`records`](Self::records).
///
/// ```rust
/// use logbuf::LoggedBuffer;
///
/// let mut buf = LoggedBuffer::from_text("hello");
/// assert_eq!(buf.len(), 5);
/// assert_eq!(buf.read_byte(), Ok(b'h'));
/// assert_eq!(buf.text(), "ello");
/// assert_eq!(buf.logs().len(), 4);
/// ```
#[derive(Debug)]
pub struct LoggedBuffer<B = ByteBuffer> {
    inner: B,
    log: CallLog,
    options: LogOptions,
}

impl LoggedBuffer<ByteBuffer> {
    /// Wraps a new, empty [`ByteBuffer`].
    #[track_caller]
    #[must_use]
    pub fn empty() -> Self {
        Self::build(
            ByteBuffer::new(),
            LogOptions::default(),
            Location::caller(),
            "new",
        )
    }

    /// Wraps a new [`ByteBuffer`] holding `initial`.
    #[track_caller]
    #[must_use]
    pub fn new(initial: impl Into<Vec<u8>>) -> Self {
        Self::build(
            ByteBuffer::from(initial.into()),
            LogOptions::default(),
            Location::caller(),
            "new",
        )
    }

    /// Wraps a new [`ByteBuffer`] holding the bytes of `text`.
    #[track_caller]
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::build(
            ByteBuffer::from(text),
            LogOptions::default(),
            Location::caller(),
            "from_text",
        )
    }

    /// Like [`new`](Self::new), with explicit log options.
    #[track_caller]
    #[must_use]
    pub fn with_options(initial: impl Into<Vec<u8>>, options: LogOptions) -> Self {
        Self::build(
            ByteBuffer::from(initial.into()),
            options,
            Location::caller(),
            "new",
        )
    }
}

impl<B: GrowableBuffer> LoggedBuffer<B> {
    /// Wraps an existing buffer.
    #[track_caller]
    #[must_use]
    pub fn wrap(inner: B, options: LogOptions) -> Self {
        Self::build(inner, options, Location::caller(), "wrap")
    }

    fn build(
        inner: B,
        options: LogOptions,
        caller: &'static Location<'static>,
        operation: &'static str,
    ) -> Self {
        let mut buf = Self {
            inner,
            log: CallLog::default(),
            options,
        };
        buf.log.record(&buf.options, caller, operation, unit());
        buf
    }

    /// The formatted log lines so far, oldest first.
    ///
    /// Not itself logged. The returned vector is a copy and is unaffected by
    /// later calls.
    #[must_use]
    pub fn logs(&self) -> Vec<String> {
        self.log.lines()
    }

    /// The structured log records so far, oldest first. Not itself logged.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.log.records().to_vec()
    }

    /// Number of logged calls, construction included. Not itself logged.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.log.len()
    }

    /// Splits the decorator into the wrapped buffer and its records.
    #[must_use]
    pub fn into_parts(self) -> (B, Vec<LogRecord>) {
        (self.inner, self.log.into_records())
    }

    /// Forwards to [`GrowableBuffer::unread_bytes`].
    #[track_caller]
    pub fn unread_bytes(&mut self) -> &[u8] {
        let value = preview(self.inner.unread_bytes(), self.options.preview_limit);
        self.log
            .record(&self.options, Location::caller(), "unread_bytes", value);
        self.inner.unread_bytes()
    }

    /// [`unread_bytes`](Self::unread_bytes) that tolerates a missing buffer.
    ///
    /// With `None` this returns an empty slice and records nothing, since
    /// there is no log to record into.
    #[track_caller]
    pub fn unread_bytes_of(buf: Option<&mut Self>) -> &[u8] {
        match buf {
            Some(buf) => buf.unread_bytes(),
            None => &[],
        }
    }

    /// Forwards to [`GrowableBuffer::capacity`].
    #[track_caller]
    pub fn capacity(&mut self) -> usize {
        let capacity = self.inner.capacity();
        self.log.record(
            &self.options,
            Location::caller(),
            "capacity",
            capacity.to_string(),
        );
        capacity
    }

    /// Forwards to [`GrowableBuffer::grow`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn grow(&mut self, additional: usize) -> Result<(), BufferError> {
        let result = self.inner.grow(additional);
        self.log
            .record(&self.options, Location::caller(), "grow", outcome(&result));
        result
    }

    /// Forwards to [`GrowableBuffer::len`].
    #[track_caller]
    pub fn len(&mut self) -> usize {
        let len = self.inner.len();
        self.log
            .record(&self.options, Location::caller(), "len", len.to_string());
        len
    }

    /// Forwards to [`GrowableBuffer::is_empty`].
    #[track_caller]
    pub fn is_empty(&mut self) -> bool {
        let empty = self.inner.is_empty();
        self.log.record(
            &self.options,
            Location::caller(),
            "is_empty",
            empty.to_string(),
        );
        empty
    }

    /// Forwards to [`GrowableBuffer::peek`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn peek(&mut self, n: usize) -> Result<&[u8], BufferError> {
        let result = self.inner.peek(n);
        self.log
            .record(&self.options, Location::caller(), "peek", outcome(&result));
        result
    }

    /// Forwards to [`GrowableBuffer::next_bytes`].
    #[track_caller]
    pub fn next_bytes(&mut self, n: usize) -> &[u8] {
        let bytes = self.inner.next_bytes(n);
        self.log.record(
            &self.options,
            Location::caller(),
            "next_bytes",
            bytes.len().to_string(),
        );
        bytes
    }

    /// Forwards to [`GrowableBuffer::read`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn read(&mut self, dest: &mut [u8]) -> Result<usize, BufferError> {
        let result = self.inner.read(dest);
        self.log
            .record(&self.options, Location::caller(), "read", count(&result));
        result
    }

    /// Forwards to [`GrowableBuffer::read_byte`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn read_byte(&mut self) -> Result<u8, BufferError> {
        let result = self.inner.read_byte();
        self.log.record(
            &self.options,
            Location::caller(),
            "read_byte",
            outcome(&result),
        );
        result
    }

    /// Forwards to [`GrowableBuffer::read_until`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn read_until(&mut self, delimiter: u8) -> Result<Vec<u8>, BufferError> {
        let result = self.inner.read_until(delimiter);
        self.log.record(
            &self.options,
            Location::caller(),
            "read_until",
            outcome(&result),
        );
        result
    }

    /// Forwards to [`GrowableBuffer::read_from`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer or `reader` reports. The logged count is
    /// the bytes appended before the failure.
    #[track_caller]
    pub fn read_from<R: io::Read + ?Sized>(&mut self, reader: &mut R) -> Result<u64, CopyError> {
        let result = self.inner.read_from(reader);
        self.log.record(
            &self.options,
            Location::caller(),
            "read_from",
            copied(&result),
        );
        result
    }

    /// Forwards to [`GrowableBuffer::read_rune`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn read_rune(&mut self) -> Result<(char, usize), BufferError> {
        let result = self.inner.read_rune();
        self.log.record(
            &self.options,
            Location::caller(),
            "read_rune",
            outcome(&result),
        );
        result
    }

    /// Forwards to [`GrowableBuffer::read_string`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn read_string(&mut self, delimiter: u8) -> Result<String, BufferError> {
        let result = self.inner.read_string(delimiter);
        self.log.record(
            &self.options,
            Location::caller(),
            "read_string",
            outcome(&result),
        );
        result
    }

    /// Forwards to [`GrowableBuffer::reset`]. The log is kept.
    #[track_caller]
    pub fn reset(&mut self) {
        self.inner.reset();
        self.log
            .record(&self.options, Location::caller(), "reset", unit());
    }

    /// Forwards to [`GrowableBuffer::text`].
    #[track_caller]
    pub fn text(&mut self) -> String {
        let text = self.inner.text();
        self.log
            .record(&self.options, Location::caller(), "text", unit());
        text
    }

    /// [`text`](Self::text) that tolerates a missing buffer.
    ///
    /// With `None` this returns [`NIL_TEXT`] and records nothing.
    #[track_caller]
    pub fn text_of(buf: Option<&mut Self>) -> String {
        match buf {
            Some(buf) => buf.text(),
            None => NIL_TEXT.to_owned(),
        }
    }

    /// Forwards to [`GrowableBuffer::truncate`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn truncate(&mut self, n: usize) -> Result<(), BufferError> {
        let result = self.inner.truncate(n);
        self.log.record(
            &self.options,
            Location::caller(),
            "truncate",
            outcome(&result),
        );
        result
    }

    /// Forwards to [`GrowableBuffer::unread_byte`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn unread_byte(&mut self) -> Result<(), BufferError> {
        let result = self.inner.unread_byte();
        self.log.record(
            &self.options,
            Location::caller(),
            "unread_byte",
            outcome(&result),
        );
        result
    }

    /// Forwards to [`GrowableBuffer::unread_rune`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn unread_rune(&mut self) -> Result<(), BufferError> {
        let result = self.inner.unread_rune();
        self.log.record(
            &self.options,
            Location::caller(),
            "unread_rune",
            outcome(&result),
        );
        result
    }

    /// Forwards to [`GrowableBuffer::write`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, BufferError> {
        let result = self.inner.write(bytes);
        self.log
            .record(&self.options, Location::caller(), "write", count(&result));
        result
    }

    /// Forwards to [`GrowableBuffer::write_byte`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn write_byte(&mut self, byte: u8) -> Result<(), BufferError> {
        let result = self.inner.write_byte(byte);
        self.log.record(
            &self.options,
            Location::caller(),
            "write_byte",
            outcome(&result),
        );
        result
    }

    /// Forwards to [`GrowableBuffer::write_rune`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn write_rune(&mut self, c: char) -> Result<usize, BufferError> {
        let result = self.inner.write_rune(c);
        self.log
            .record(&self.options, Location::caller(), "write_rune", count(&result));
        result
    }

    /// Forwards to [`GrowableBuffer::write_string`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer reports.
    #[track_caller]
    pub fn write_string(&mut self, s: &str) -> Result<usize, BufferError> {
        let result = self.inner.write_string(s);
        self.log.record(
            &self.options,
            Location::caller(),
            "write_string",
            count(&result),
        );
        result
    }

    /// Forwards to [`GrowableBuffer::write_to`].
    ///
    /// # Errors
    ///
    /// Whatever the wrapped buffer or `writer` reports. The logged count is
    /// the bytes drained before the failure.
    #[track_caller]
    pub fn write_to<W: io::Write + ?Sized>(&mut self, writer: &mut W) -> Result<u64, CopyError> {
        let result = self.inner.write_to(writer);
        self.log.record(
            &self.options,
            Location::caller(),
            "write_to",
            copied(&result),
        );
        result
    }
}

impl<B: GrowableBuffer> io::Read for LoggedBuffer<B> {
    #[track_caller]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let result = match self.inner.read(buf) {
            Err(BufferError::EndOfData) => Ok(0),
            result => result.map_err(io::Error::from),
        };
        self.log
            .record(&self.options, Location::caller(), "read", count(&result));
        result
    }
}

impl<B: GrowableBuffer> io::Write for LoggedBuffer<B> {
    #[track_caller]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let result = self.inner.write(buf).map_err(io::Error::from);
        self.log
            .record(&self.options, Location::caller(), "write", count(&result));
        result
    }

    #[track_caller]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let result = self.inner.write(buf).map(drop).map_err(io::Error::from);
        self.log.record(
            &self.options,
            Location::caller(),
            "write_all",
            outcome(&result),
        );
        result
    }

    #[track_caller]
    fn flush(&mut self) -> io::Result<()> {
        self.log
            .record(&self.options, Location::caller(), "flush", unit());
        Ok(())
    }
}

fn unit() -> String {
    "()".to_owned()
}

/// `ok`, or the error's message.
fn outcome<T, E: Display>(result: &Result<T, E>) -> String {
    match result {
        Ok(_) => "ok".to_owned(),
        Err(e) => e.to_string(),
    }
}

/// The byte count, with the error appended when there is one.
fn count<N: Display, E: Display>(result: &Result<N, E>) -> String {
    match result {
        Ok(n) => n.to_string(),
        Err(e) => format!("0 ({e})"),
    }
}

/// Like [`count`], but a failed copy still reports what it moved.
fn copied(result: &Result<u64, CopyError>) -> String {
    match result {
        Ok(n) => n.to_string(),
        Err(e) => format!("{} ({e})", e.copied),
    }
}

fn preview(bytes: &[u8], limit: usize) -> String {
    if bytes.len() > limit {
        format!("{:?}...", bytes[..limit].as_bstr())
    } else {
        format!("{:?}", bytes.as_bstr())
    }
}
