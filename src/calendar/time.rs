use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};

/// Format a query boundary date the way the API expects it
pub fn format_query_date(date: NaiveDate) -> String {
    format!("{}T00:00:00", date.format("%Y-%m-%d"))
}

/// First and last day of the month containing `anchor`
pub fn month_bounds(anchor: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = anchor.with_day(1)?;

    // Day 28 exists in every month, so four days later is always in the next
    // month; backing up by that result's day-of-month lands on the last day.
    let pivot = anchor.with_day(28)? + Duration::days(4);
    let last = pivot - Duration::days(i64::from(pivot.day()));

    Some((first, last))
}

/// January 1 through December 31 of the year containing `anchor`
pub fn year_bounds(anchor: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(anchor.year(), 1, 1)?;
    let last = NaiveDate::from_ymd_opt(anchor.year(), 12, 31)?;
    Some((first, last))
}

/// Parse an event start string in the handful of shapes the API emits
pub fn parse_event_start(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    // Bare dates are treated as midnight
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_query_date() {
        assert_eq!(format_query_date(date(2023, 1, 5)), "2023-01-05T00:00:00");
        assert_eq!(format_query_date(date(2023, 12, 31)), "2023-12-31T00:00:00");
    }

    #[test]
    fn test_month_bounds() {
        // 31-day month
        let (first, last) = month_bounds(date(2023, 1, 15)).unwrap();
        assert_eq!(first, date(2023, 1, 1));
        assert_eq!(last, date(2023, 1, 31));

        // February, non-leap year
        let (first, last) = month_bounds(date(2023, 2, 14)).unwrap();
        assert_eq!(first, date(2023, 2, 1));
        assert_eq!(last, date(2023, 2, 28));

        // February, leap year
        let (_, last) = month_bounds(date(2024, 2, 1)).unwrap();
        assert_eq!(last, date(2024, 2, 29));

        // 30-day month
        let (_, last) = month_bounds(date(2023, 4, 30)).unwrap();
        assert_eq!(last, date(2023, 4, 30));

        // December crosses the year boundary when probing the next month
        let (first, last) = month_bounds(date(2023, 12, 28)).unwrap();
        assert_eq!(first, date(2023, 12, 1));
        assert_eq!(last, date(2023, 12, 31));
    }

    #[test]
    fn test_year_bounds() {
        let (first, last) = year_bounds(date(2023, 6, 15)).unwrap();
        assert_eq!(first, date(2023, 1, 1));
        assert_eq!(last, date(2023, 12, 31));
    }

    #[test]
    fn test_parse_event_start() {
        // RFC 3339 with offset
        let dt = parse_event_start("2023-01-01T10:00:00-05:00").unwrap();
        assert_eq!(dt.date(), date(2023, 1, 1));

        // Bare ISO datetime
        let dt = parse_event_start("2023-01-01T10:00:00").unwrap();
        assert_eq!(
            dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2023-01-01 10:00:00"
        );

        // Space-separated datetime
        let dt = parse_event_start("2023-06-15 18:30:00").unwrap();
        assert_eq!(dt.date(), date(2023, 6, 15));

        // Bare date becomes midnight
        let dt = parse_event_start("2023-06-15").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");

        // Garbage
        assert_eq!(parse_event_start("not a date"), None);
        assert_eq!(parse_event_start(""), None);
    }
}
