//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format a CMS date string using a Moment.js-compatible format
///
/// Accepts RFC 3339 timestamps (`publishedAt`) and plain `YYYY-MM-DD`
/// dates. Anything else is returned unchanged.
///
/// # Examples
/// ```ignore
/// format_date("2024-01-15T10:30:00.000Z", "LL") // -> "January 15, 2024"
/// ```
pub fn format_date(value: &str, format: &str) -> String {
    let Some(date) = parse_date(value) else {
        return value.to_string();
    };

    let chrono_format = if format == "LL" {
        "%B %d, %Y".to_string()
    } else {
        moment_to_chrono_format(format)
    };
    date.format(&chrono_format).to_string()
}

/// Parse the date formats the CMS emits
fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
