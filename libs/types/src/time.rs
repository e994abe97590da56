//! Timestamp helpers
//!
//! All timestamps are Unix nanoseconds in an `i64`, the same unit used on
//! orders and trades.

use chrono::Utc;

/// Current wall-clock time in Unix nanoseconds
///
/// Saturates at `i64::MAX` past the year 2262.
pub fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}
