use std::{fmt, panic::Location};

use chrono::NaiveDateTime;

use crate::LogOptions;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One intercepted call.
///
/// Displays as `<timestamp>|<file>:<line>> <operation>=<value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LogRecord {
    /// When the call returned, at whole-second precision.
    pub timestamp: NaiveDateTime,
    /// Source file of the code that called the decorator.
    pub file: &'static str,
    /// Line within [`file`](Self::file).
    pub line: u32,
    /// Column within [`line`](Self::line).
    pub column: u32,
    /// Name of the buffer method that was called.
    pub operation: &'static str,
    /// The call's result, rendered as text.
    pub value: String,
}

impl LogRecord {
    pub(crate) fn new(
        timestamp: NaiveDateTime,
        caller: &'static Location<'static>,
        operation: &'static str,
        value: String,
    ) -> Self {
        Self {
            timestamp,
            file: caller.file(),
            line: caller.line(),
            column: caller.column(),
            operation,
            value,
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}:{}> {}={}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.file,
            self.line,
            self.operation,
            self.value
        )
    }
}

/// Append-only sequence of [`LogRecord`]s.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog {
    records: Vec<LogRecord>,
}

impl CallLog {
    /// Appends a record for `operation`, mirroring it to `tracing` when the
    /// options ask for it.
    pub(crate) fn record(
        &mut self,
        options: &LogOptions,
        caller: &'static Location<'static>,
        operation: &'static str,
        value: String,
    ) {
        let record = LogRecord::new((options.clock)(), caller, operation, value);
        if options.emit_events {
            tracing::trace!(
                target: "logbuf",
                operation = record.operation,
                value = %record.value,
                file = record.file,
                line = record.line,
                "buffer call"
            );
        }
        self.records.push(record);
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    pub(crate) fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub(crate) fn into_records(self) -> Vec<LogRecord> {
        self.records
    }
}
