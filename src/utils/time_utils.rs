use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::models::Granularity;

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    // Formats seen in the first column of the source CSVs, tried in order.
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    /// Parse a source timestamp. Bare dates become midnight.
    pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        Self::DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(text, Self::STANDARD_DATE_FORMAT)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    /// Display form: dates only for daily rows, full time for intraday.
    pub fn format_timestamp(ts: NaiveDateTime, granularity: Granularity) -> String {
        match granularity {
            Granularity::Daily => ts.format(Self::STANDARD_DATE_FORMAT).to_string(),
            Granularity::Intraday => ts.format(Self::STANDARD_TIME_FORMAT).to_string(),
        }
    }
}

pub fn local_now_as_timestamp_ms() -> i64 {
    let now_local = Local::now();
    now_local.timestamp_millis()
}

pub fn how_many_seconds_ago(past_timestamp_ms: i64) -> i64 {
    // How many seconds ago was the event described by `past_timestamp_ms` ?
    let now_timestamp_ms = local_now_as_timestamp_ms();
    (now_timestamp_ms - past_timestamp_ms) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_daily_and_intraday_stamps() {
        let daily = TimeUtils::parse_timestamp("2023-01-03").unwrap();
        assert_eq!(daily.to_string(), "2023-01-03 00:00:00");

        let intraday = TimeUtils::parse_timestamp("2023-01-03 19:00:00").unwrap();
        assert_eq!(intraday.to_string(), "2023-01-03 19:00:00");

        let iso = TimeUtils::parse_timestamp(" 2023-01-03T04:30:00 ").unwrap();
        assert_eq!(iso.to_string(), "2023-01-03 04:30:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(TimeUtils::parse_timestamp("yesterday").is_none());
        assert!(TimeUtils::parse_timestamp("").is_none());
    }

    #[test]
    fn display_depends_on_granularity() {
        let ts = TimeUtils::parse_timestamp("2023-01-03 19:00:00").unwrap();
        assert_eq!(TimeUtils::format_timestamp(ts, Granularity::Daily), "2023-01-03");
        assert_eq!(
            TimeUtils::format_timestamp(ts, Granularity::Intraday),
            "2023-01-03 19:00:00"
        );
    }
}
