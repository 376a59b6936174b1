//! Humanized "time ago" formatting for post timestamps.
//!
//! Wording follows the usual from-now convention: singular units carry an
//! article ("a minute ago"), plural units a rounded count ("2 hours ago").
//! Takes an explicit `now` so rendering is reproducible.

use chrono::{DateTime, Utc};

pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(created_at);
    // Future timestamps (clock skew) clamp to "just posted"
    let seconds = duration.num_seconds().max(0);

    let minutes = (seconds + 30) / 60;
    let hours = (minutes + 30) / 60;
    let days = (hours + 12) / 24;
    let months = (days * 12 + 182) / 365;
    let years = (months + 6) / 12;

    if seconds <= 44 {
        "a few seconds ago".to_string()
    } else if seconds <= 89 {
        "a minute ago".to_string()
    } else if minutes <= 44 {
        format!("{} minutes ago", minutes)
    } else if minutes <= 89 {
        "an hour ago".to_string()
    } else if hours <= 21 {
        format!("{} hours ago", hours)
    } else if hours <= 35 {
        "a day ago".to_string()
    } else if days <= 25 {
        format!("{} days ago", days)
    } else if days <= 45 {
        "a month ago".to_string()
    } else if days <= 319 {
        format!("{} months ago", months)
    } else if months <= 17 {
        "a year ago".to_string()
    } else {
        format!("{} years ago", years)
    }
}
