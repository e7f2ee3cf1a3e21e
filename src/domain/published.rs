//! Publication timestamps and the "Published N ago on" label.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};

const HOUR_SECS: i64 = 60 * 60;
const DAY_SECS: i64 = HOUR_SECS * 24;

/// Layout of the formatted `Date` field, without the zone.
pub const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

/// A successfully parsed publication time, with its derived display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub date: String,
    pub unix_date: i64,
    pub pub_msg: String,
}

impl Published {
    /// Parse a feed timestamp relative to `now`. Returns `None` when `raw`
    /// matches neither RFC 1123 layout.
    pub fn parse(raw: &str, now: DateTime<Utc>) -> Option<Self> {
        let parsed = parse_rfc1123(raw)?;
        let unix_date = parsed.timestamp();

        Some(Self {
            date: format_date(&parsed.with_timezone(&Local).fixed_offset()),
            unix_date,
            pub_msg: recency_message(now.timestamp() - unix_date),
        })
    }
}

/// Render a timestamp as `Mon, 02 Jan 2006 15:04:05 -0700`, naming the
/// zone `UTC` when the offset is zero.
pub fn format_date(time: &DateTime<FixedOffset>) -> String {
    let zone = if time.offset().local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        time.format("%z").to_string()
    };
    format!("{} {}", time.format(DATE_FORMAT), zone)
}

/// Parse `Mon, 02 Jan 2006 15:04:05 -0700`, then `Mon, 02 Jan 2006 15:04:05 MST`.
///
/// The weekday is skipped rather than checked; plenty of feeds get it wrong.
pub fn parse_rfc1123(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    let body = match raw.split_once(',') {
        Some((_, rest)) => rest.trim(),
        None => raw,
    };
    if body.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_str(body, "%d %b %Y %H:%M:%S %z") {
        return Some(parsed);
    }

    let (stamp, zone) = body.rsplit_once(' ')?;
    let offset = zone_offset(zone)?;
    let naive = NaiveDateTime::parse_from_str(stamp.trim(), "%d %b %Y %H:%M:%S").ok()?;
    offset.from_local_datetime(&naive).single()
}

/// RFC 822 zone names. Any other alphabetic zone is read as UTC.
fn zone_offset(zone: &str) -> Option<FixedOffset> {
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let hours = match zone.to_ascii_uppercase().as_str() {
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        _ => 0,
    };
    FixedOffset::east_opt(hours * HOUR_SECS as i32)
}

/// Label prefix for a comic published `elapsed` seconds ago.
pub fn recency_message(elapsed: i64) -> String {
    if elapsed > DAY_SECS {
        let days = elapsed / DAY_SECS;
        let plural = if days > 1 { "s" } else { "" };
        format!("Published {} day{} ago on", days, plural)
    } else if elapsed > HOUR_SECS {
        format!("Published {} hours ago on", elapsed / HOUR_SECS)
    } else {
        "Published less than 1 hour ago on".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recency_boundaries() {
        assert_eq!(recency_message(1800), "Published less than 1 hour ago on");
        assert_eq!(recency_message(3600), "Published less than 1 hour ago on");
        assert_eq!(recency_message(3700), "Published 1 hours ago on");
        assert_eq!(recency_message(86400), "Published 24 hours ago on");
        assert_eq!(recency_message(90000), "Published 1 day ago on");
        assert_eq!(recency_message(200000), "Published 2 days ago on");
    }

    #[test]
    fn test_recency_future_timestamp() {
        assert_eq!(recency_message(-500), "Published less than 1 hour ago on");
    }

    #[test]
    fn test_parse_numeric_zone() {
        let parsed = parse_rfc1123("Mon, 01 Jan 2024 12:00:00 -0500").unwrap();
        assert_eq!(parsed.timestamp(), 1704128400);
    }

    #[test]
    fn test_parse_named_zone() {
        let gmt = parse_rfc1123("Mon, 01 Jan 2024 00:00:00 GMT").unwrap();
        assert_eq!(gmt.timestamp(), 1704067200);

        let est = parse_rfc1123("Mon, 01 Jan 2024 00:00:00 EST").unwrap();
        assert_eq!(est.timestamp(), 1704067200 + 5 * 3600);
    }

    #[test]
    fn test_parse_unknown_zone_reads_as_utc() {
        let parsed = parse_rfc1123("Mon, 01 Jan 2024 00:00:00 XYZ").unwrap();
        assert_eq!(parsed.timestamp(), 1704067200);
    }

    #[test]
    fn test_parse_ignores_wrong_weekday() {
        let parsed = parse_rfc1123("Fri, 01 Jan 2024 00:00:00 +0000").unwrap();
        assert_eq!(parsed.timestamp(), 1704067200);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_rfc1123("").is_none());
        assert!(parse_rfc1123("yesterday").is_none());
        assert!(parse_rfc1123("2024-01-01T00:00:00Z").is_none());
        assert!(parse_rfc1123("Mon, 01 Jan 2024 00:00:00 +05:xx").is_none());
    }

    #[test]
    fn test_published_fields() {
        let now = Utc.timestamp_opt(1704067200 + 200000, 0).unwrap();
        let published = Published::parse("Mon, 01 Jan 2024 00:00:00 +0000", now).unwrap();

        assert_eq!(published.unix_date, 1704067200);
        assert_eq!(published.pub_msg, "Published 2 days ago on");
        let reparsed = parse_rfc1123(&published.date).unwrap();
        assert_eq!(reparsed.timestamp(), 1704067200);
    }

    #[test]
    fn test_format_date_zone() {
        let utc = parse_rfc1123("Mon, 01 Jan 2024 00:00:00 +0000").unwrap();
        assert_eq!(format_date(&utc), "Mon, 01 Jan 2024 00:00:00 UTC");

        let est = parse_rfc1123("Mon, 01 Jan 2024 09:30:00 -0500").unwrap();
        assert_eq!(format_date(&est), "Mon, 01 Jan 2024 09:30:00 -0500");
    }
}
