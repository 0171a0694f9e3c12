#![allow(missing_docs)]
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use logbuf::{GrowableBuffer, LogOptions, LoggedBuffer};

pub fn fixed_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(14, 5, 26)
        .unwrap()
}

pub fn options() -> LogOptions {
    LogOptions {
        clock: fixed_clock,
        emit_events: false,
        ..Default::default()
    }
}

#[track_caller]
pub fn logged(initial: &[u8]) -> LoggedBuffer {
    LoggedBuffer::with_options(initial, options())
}

/// One `operation=value` line per record, without time or location.
pub fn render_calls<B: GrowableBuffer>(buf: &LoggedBuffer<B>) -> String {
    buf.records()
        .iter()
        .map(|r| format!("{}={}", r.operation, r.value))
        .collect::<Vec<_>>()
        .join("\n")
}
