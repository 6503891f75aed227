use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Display format for timestamps in exports and listings (day-first).
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Parse a timestamp from any of the accepted wire shapes.
///
/// Accepted, in order: RFC 3339 (stored form), the display format
/// `dd/mm/yyyy HH:MM` (re-imported exports), bare `dd/mm/yyyy`, and bare
/// `yyyy-mm-dd`. Date-only values land at midnight UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DISPLAY_FORMAT) {
        return Some(dt.and_utc());
    }

    for fmt in ["%d/%m/%Y", "%Y-%m-%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

/// True iff `s` is non-empty and parses to a valid point in time.
pub fn is_valid_date(s: &str) -> bool {
    parse_timestamp(s).is_some()
}

/// Render a timestamp in the fixed display format.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_timestamp("2026-03-14T09:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap());
    }

    #[test]
    fn parses_display_format() {
        let dt = parse_timestamp("14/03/2026 09:30").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap());
    }

    #[test]
    fn parses_date_only_at_midnight() {
        let dt = parse_timestamp("14/03/2026").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap());

        let dt = parse_timestamp("2026-03-14").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("32/13/2026").is_none());
        assert!(!is_valid_date(""));
        assert!(!is_valid_date("amanhã"));
    }

    #[test]
    fn display_round_trip() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 5, 18, 45, 0).unwrap();
        let rendered = format_timestamp(&dt);
        assert_eq!(rendered, "05/01/2026 18:45");
        assert_eq!(parse_timestamp(&rendered).unwrap(), dt);
    }
}
