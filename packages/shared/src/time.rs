//! Time-related utilities with clock abstraction for testability.

use chrono::{Local, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as a 12-hour wall-clock time
/// in the given timezone, e.g. `3:04:05 PM`.
///
/// Returns an empty string when the timestamp is out of range.
pub fn format_clock_time<Tz>(timestamp_millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.format("%-I:%M:%S %p").to_string())
        .unwrap_or_default()
}

/// Format a Unix timestamp (milliseconds) as server-local wall-clock time.
pub fn format_local_time(timestamp_millis: i64) -> String {
    format_clock_time(timestamp_millis, &Local)
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in the given timezone
pub fn timestamp_to_rfc3339<Tz>(timestamp_millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

/// Convert Unix timestamp (milliseconds) to local RFC 3339 format
pub fn timestamp_to_local_rfc3339(timestamp_millis: i64) -> String {
    timestamp_to_rfc3339(timestamp_millis, &Local)
}
