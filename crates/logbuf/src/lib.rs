//! A growable byte buffer that keeps a log of every call made on it.
//!
//! [`LoggedBuffer`] wraps any [`GrowableBuffer`] (by default the in-memory
//! [`ByteBuffer`]) and forwards each operation unchanged. After the call
//! returns it appends a [`LogRecord`] holding the time, the caller's source
//! location, the operation name and the rendered result:
//!
//! ```rust
//! use logbuf::LoggedBuffer;
//!
//! let mut buf = LoggedBuffer::empty();
//! buf.write_string("ping\n").unwrap();
//! assert_eq!(buf.read_string(b'\n').unwrap(), "ping\n");
//!
//! let ops: Vec<_> = buf.records().iter().map(|r| r.operation).collect();
//! assert_eq!(ops, ["new", "write_string", "read_string"]);
//! ```
//!
//! Records are also mirrored as `tracing` events at `TRACE` level under the
//! `logbuf` target; see [`LogOptions`].

mod buffer;
mod error;
mod log;
mod logged;
mod options;

#[cfg(test)]
mod tests;

pub use buffer::{ByteBuffer, GrowableBuffer};
pub use error::{BufferError, CopyError, UnreadKind};
pub use log::LogRecord;
pub use logged::{LoggedBuffer, NIL_TEXT};
pub use options::{LogOptions, local_now};
