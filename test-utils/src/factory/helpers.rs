//! Shared helper utilities for factory methods.

use chrono::{DateTime, TimeZone, Utc};

/// Counter for generating unique IDs in tests.
///
/// Starts well above the small IDs tests pick by hand.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1_000_000);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Builds a UTC instant at minute precision.
///
/// Panics on an impossible date, which is a bug in the test itself.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day} {hour}:{minute}"))
}
