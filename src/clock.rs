//! Commit timestamps: "now" for ordinary commits, the epoch for the
//! initial commit, both always displayed in a fixed UTC-8 zone regardless
//! of the host's local timezone.
//!
//! `GITLET_NOW` (Unix seconds) overrides the system clock so integration
//! tests can assert on deterministic commit timestamps; it is never read
//! outside of `now()`.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use std::time::{SystemTime, UNIX_EPOCH};

const DISPLAY_OFFSET_WEST_SECONDS: i32 = 8 * 3600;

/// Seconds since the Unix epoch, honoring `GITLET_NOW` if set.
#[must_use]
pub fn now() -> i64 {
    if let Ok(val) = std::env::var("GITLET_NOW") {
        if let Ok(secs) = val.parse::<i64>() {
            return secs;
        }
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Format `timestamp` (Unix seconds) as `E MMM d HH:mm:ss y Z` in the fixed
/// UTC-8 display zone, e.g. `Wed Dec 31 16:00:00 1969 -0800` for the epoch.
#[must_use]
pub fn format(timestamp: i64) -> String {
    let offset = FixedOffset::west_opt(DISPLAY_OFFSET_WEST_SECONDS).expect("valid fixed offset");
    let utc: DateTime<Utc> = Utc
        .timestamp_opt(timestamp, 0)
        .single()
        .expect("valid unix timestamp");
    let local = utc.with_timezone(&offset);
    local.format("%a %b %-d %H:%M:%S %Y %z").to_string()
}
