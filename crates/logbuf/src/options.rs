use chrono::{Local, NaiveDateTime, SubsecRound};

/// Configuration for a [`LoggedBuffer`](crate::LoggedBuffer)'s call log.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use logbuf::{LogOptions, LoggedBuffer};
///
/// fn epoch() -> chrono::NaiveDateTime {
///     NaiveDate::from_ymd_opt(2024, 1, 1)
///         .unwrap()
///         .and_hms_opt(0, 0, 0)
///         .unwrap()
/// }
///
/// let buf = LoggedBuffer::with_options(
///     b"abc".to_vec(),
///     LogOptions {
///         clock: epoch,
///         ..Default::default()
///     },
/// );
/// assert!(buf.logs()[0].starts_with("2024-01-01 00:00:00|"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogOptions {
    /// Source of record timestamps.
    ///
    /// # Default
    ///
    /// [`local_now`]: the local wall clock, truncated to whole seconds.
    pub clock: fn() -> NaiveDateTime,

    /// Maximum number of bytes shown when a call's result is a byte slice.
    ///
    /// Longer slices are cut and suffixed with `...`. The record only
    /// carries the preview; the caller still gets the full slice.
    ///
    /// # Default
    ///
    /// `32`
    pub preview_limit: usize,

    /// Whether to mirror each record as a `tracing` event at `TRACE` level.
    ///
    /// # Default
    ///
    /// `true`
    pub emit_events: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            clock: local_now,
            preview_limit: 32,
            emit_events: true,
        }
    }
}

/// Local wall-clock time with sub-second precision dropped.
#[must_use]
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}
