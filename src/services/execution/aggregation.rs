//! Metrics Window Aggregation
//!
//! Sums raw daily metric records into fixed calendar-day windows
//! relative to today. Windows are compared as UTC day strings, so two
//! records on the same calendar day always land in the same window.

use crate::models::business::{MetricRecord, MetricsSnapshot};
use crate::utils::dates::{day_part, days_ago_string};

/// Sum records whose date falls in `[today - end_days_ago, today - start_days_ago]`.
///
/// Both endpoints are inclusive; adjacent windows like (0,7) and (7,14)
/// share their boundary day. Callers pass an already project-filtered
/// record set.
pub fn aggregate_period(
    records: &[MetricRecord],
    start_days_ago: i64,
    end_days_ago: i64,
) -> MetricsSnapshot {
    let start_date = days_ago_string(end_days_ago);
    let end_date = days_ago_string(start_days_ago);

    let mut snapshot =
        MetricsSnapshot::zeroed(format!("{start_days_ago}-{end_days_ago} days ago"));

    for record in records {
        let day = day_part(&record.date);
        if day >= start_date.as_str() && day <= end_date.as_str() {
            snapshot.views += u64::from(record.views);
            snapshot.clicks += u64::from(record.clicks);
            snapshot.messages += u64::from(record.messages);
            snapshot.calls += u64::from(record.calls);
            snapshot.sales += u64::from(record.sales);
        }
    }

    snapshot
}
