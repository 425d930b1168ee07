//! Time helpers

use chrono::{TimeZone, Utc};

/// Business date (`YYYY-MM-DD`) for a Unix-millisecond timestamp.
///
/// Business-date strings compare lexicographically in chronological order,
/// which is what reporting relies on for range filtering.
pub fn business_date(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(Utc::now)
        .format("%Y-%m-%d")
        .to_string()
}

/// Compact date (`YYYYMMDD`) for order number generation.
pub fn compact_date(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(Utc::now)
        .format("%Y%m%d")
        .to_string()
}
