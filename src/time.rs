//! Human-readable relative time formatting
//!
//! Marker popups and the incoming-reports list show how long ago a report
//! was submitted rather than an absolute timestamp. Thresholds coarsen as
//! the age grows; sub-minute ages collapse to "just now".

use chrono::{DateTime, Utc};

/// Format the age of `instant` relative to `now` as a short phrase.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use citypulse::time::format_relative;
///
/// let now = Utc::now();
/// assert_eq!(format_relative(now, now), "just now");
/// assert_eq!(format_relative(now - Duration::minutes(1), now), "1 minute ago");
/// assert_eq!(format_relative(now - Duration::minutes(12), now), "12 minutes ago");
/// assert_eq!(format_relative(now - Duration::hours(3), now), "3 hours ago");
/// assert_eq!(format_relative(now - Duration::days(2), now), "2 days ago");
/// ```
pub fn format_relative(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - instant).num_seconds().max(0);

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    plural(days, "day")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
