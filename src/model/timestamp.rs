use chrono::{DateTime, FixedOffset, Utc};

/// Format used for `date_created` and `date_last_viewed`, e.g. `2023-12-14T09:30:00+0000`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Parses a stored timestamp.
///
/// Accepts the primary format and falls back to RFC 3339 (`2023-12-14T09:30:00Z`).
/// Returns `None` for anything else; callers decide what an unparseable
/// timestamp means for them.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}

/// Formats a timestamp in the primary stored format.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_primary_format() {
        let parsed = parse_timestamp("2023-12-14T09:30:00+0000").unwrap();
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2023, 12, 14, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_with_offset() {
        let east = parse_timestamp("2023-12-14T10:30:00+0100").unwrap();
        let utc = parse_timestamp("2023-12-14T09:30:00+0000").unwrap();
        assert_eq!(east, utc);
    }

    #[test]
    fn test_parse_rfc3339_fallback() {
        assert!(parse_timestamp("2023-12-14T09:30:00Z").is_some());
        assert!(parse_timestamp("2023-12-14T09:30:00+00:00").is_some());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2023-12-14").is_none());
    }

    #[test]
    fn test_format_matches_parse() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let text = format_timestamp(at);
        assert_eq!(text, "2024-01-02T03:04:05+0000");
        assert_eq!(parse_timestamp(&text).unwrap(), at);
    }
}
