//! Time utilities for the forwarding-history window and channel ages

use chrono::{DateTime, Utc};

/// Seconds in a day (24 × 60 × 60 = 86400)
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Unix timestamp of the start of a lookback window ending at `now`
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use ln_channel_report::utils::time::lookback_start;
/// let now = Utc.timestamp_opt(86_400 * 400, 0).unwrap();
/// assert_eq!(lookback_start(now, 365), 86_400 * 35);
/// ```
pub fn lookback_start(now: DateTime<Utc>, days: u64) -> i64 {
    now.timestamp() - days as i64 * SECONDS_PER_DAY
}

/// Convert a duration in seconds to fractional days
///
/// # Examples
/// ```
/// use ln_channel_report::utils::time::seconds_to_days;
/// assert_eq!(seconds_to_days(86_400.0), 1.0);
/// assert_eq!(seconds_to_days(43_200.0), 0.5);
/// ```
pub fn seconds_to_days(seconds: f64) -> f64 {
    seconds / SECONDS_PER_DAY as f64
}
