//! The single date-parsing seam for the whole crate.
//!
//! The backend has serialized timestamps three different ways across
//! revisions (RFC 3339, `YYYY-MM-DD HH:MM:SS`, bare dates from UI inputs),
//! and the admin UI historically fed whatever came back straight into the
//! platform date constructor. Every caller goes through [`try_parse_timestamp`]
//! so the "unparseable means absent" policy is enforced in exactly one place.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a wire timestamp into a timezone-naive instant.
///
/// Offsets in RFC 3339 inputs are normalized to UTC before dropping the
/// zone; everything the backend emits for one deployment carries the same
/// zone, so ordering comparisons stay consistent. A bare `YYYY-MM-DD`
/// parses as midnight. Returns `None` for anything else - never "now",
/// never epoch.
pub fn try_parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    try_parse_date(trimmed).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a `YYYY-MM-DD` filter bound (the shape HTML date inputs produce).
pub fn try_parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
