use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a date from the formats upstream records use.
///
/// Accepts RFC 3339 timestamps (the calendar date in UTC is kept), naive
/// date-times, `YYYY-MM-DD` and `YYYY-MM` (first of the month).
pub fn parse_date_loose(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc().date());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }

    // "2024-01" -> 2024-01-01
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
}

fn date_from_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_loose(s),
        // Epoch milliseconds, as serialized by JavaScript clients.
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

/// Serde adapter: tolerant date field. Unparseable values become None.
pub fn deserialize_loose_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(date_from_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_plain_date() {
        assert_eq!(parse_date_loose("2024-02-29"), ymd(2024, 2, 29));
    }

    #[test]
    fn test_rfc3339_utc() {
        assert_eq!(parse_date_loose("2021-12-01T00:00:00.000Z"), ymd(2021, 12, 1));
    }

    #[test]
    fn test_rfc3339_offset_uses_utc_date() {
        assert_eq!(
            parse_date_loose("2022-01-01T02:00:00+05:30"),
            ymd(2021, 12, 31)
        );
    }

    #[test]
    fn test_naive_datetime() {
        assert_eq!(parse_date_loose("2023-07-04 10:15:00"), ymd(2023, 7, 4));
    }

    #[test]
    fn test_year_month() {
        assert_eq!(parse_date_loose("2023-11"), ymd(2023, 11, 1));
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_date_loose("").is_none());
        assert!(parse_date_loose("last week").is_none());
        assert!(parse_date_loose("2023-13-01").is_none());
    }

    #[test]
    fn test_epoch_millis() {
        // 2024-01-15T00:00:00Z
        assert_eq!(
            date_from_value(&serde_json::json!(1_705_276_800_000_i64)),
            ymd(2024, 1, 15)
        );
    }
}
