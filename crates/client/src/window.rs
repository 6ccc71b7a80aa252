//! Date windows sent as query parameters.
//!
//! Everything takes `now` explicitly so callers decide the clock.

use chrono::{DateTime, Duration, Utc};

/// Forward window used when listing scheduled posts.
pub const SCHEDULE_WINDOW_DAYS: i64 = 60;

/// Default look-back for analytics when no dates are given.
pub const ANALYTICS_WINDOW_DAYS: i64 = 30;

/// Whole-second UTC timestamp without offset suffix.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// `[now, now + 60d]` as `YYYY-MM-DDTHH:MM:SS` strings.
pub fn schedule_window(now: DateTime<Utc>) -> (String, String) {
    let end = now + Duration::days(SCHEDULE_WINDOW_DAYS);
    (
        now.format(TIMESTAMP_FORMAT).to_string(),
        end.format(TIMESTAMP_FORMAT).to_string(),
    )
}

/// `YYYY-MM-DD` → `YYYYMMDD`.
pub fn compact_date(date: &str) -> String {
    date.replace('-', "")
}

/// Analytics `(start, end)` in compact form. Missing bounds default to
/// `now - 30d` and `now`.
pub fn analytics_window(
    now: DateTime<Utc>,
    start: Option<&str>,
    end: Option<&str>,
) -> (String, String) {
    let start = match start {
        Some(date) => compact_date(date),
        None => (now - Duration::days(ANALYTICS_WINDOW_DAYS))
            .format(COMPACT_DATE_FORMAT)
            .to_string(),
    };
    let end = match end {
        Some(date) => compact_date(date),
        None => now.format(COMPACT_DATE_FORMAT).to_string(),
    };
    (start, end)
}
