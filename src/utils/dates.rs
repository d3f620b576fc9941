//! Calendar-Day Helpers
//!
//! Metric windows, streaks and consistency scores all operate on UTC
//! calendar days compared as `YYYY-MM-DD` strings, not on instants.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Format a timestamp as its UTC calendar day
pub fn day_string(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Today's UTC calendar day
pub fn today_string() -> String {
    day_string(&Utc::now())
}

/// The UTC calendar day `days` days before today
pub fn days_ago_string(days: i64) -> String {
    day_string(&(Utc::now() - Duration::days(days)))
}

/// Truncate an ISO date or datetime string to its day part
pub fn day_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

/// Whole days between two day strings (`later - earlier`)
///
/// Returns None when either string is not a valid `YYYY-MM-DD` day.
pub fn day_diff(later: &str, earlier: &str) -> Option<i64> {
    let later = NaiveDate::parse_from_str(later, "%Y-%m-%d").ok()?;
    let earlier = NaiveDate::parse_from_str(earlier, "%Y-%m-%d").ok()?;
    Some((later - earlier).num_days())
}

/// Whole hours elapsed since a timestamp
pub fn hours_since(ts: &DateTime<Utc>) -> i64 {
    (Utc::now() - *ts).num_hours()
}
