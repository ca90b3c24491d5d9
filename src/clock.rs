//! Local time handling.

use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Utc, Weekday};

/// Anything earlier than this means the system clock was never set.
const EARLIEST_VALID_TIMESTAMP: i64 = 1_577_836_800; // 2020-01-01T00:00:00Z

/// Time zone used to convert forecast instants to local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    /// Parse `"local"` or a UTC offset such as `"+01:00"` / `"-05:30"`.
    ///
    /// A fixed offset never follows daylight saving time. Zones with DST
    /// rules need `"local"` with the process `TZ` variable set, e.g.
    /// `TZ="CET-1CEST,M3.5.0,M10.5.0/3"`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Some(Zone::Local);
        }
        if s.eq_ignore_ascii_case("utc") || s == "Z" {
            return FixedOffset::east_opt(0).map(Zone::Fixed);
        }

        let (sign, rest) = match s.as_bytes().first()? {
            b'+' => (1, &s[1..]),
            b'-' => (-1, &s[1..]),
            _ => return None,
        };
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
            return None;
        }
        let (hours, minutes) = match rest.split_once(':') {
            Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
            None => (rest.parse::<i32>().ok()?, 0),
        };
        if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
            return None;
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).map(Zone::Fixed)
    }

    pub fn weekday(&self, at: DateTime<Utc>) -> Weekday {
        match self {
            Zone::Local => at.with_timezone(&Local).weekday(),
            Zone::Fixed(offset) => at.with_timezone(offset).weekday(),
        }
    }

    pub fn format(&self, at: DateTime<Utc>, pattern: &str) -> String {
        match self {
            Zone::Local => at.with_timezone(&Local).format(pattern).to_string(),
            Zone::Fixed(offset) => at.with_timezone(offset).format(pattern).to_string(),
        }
    }
}

/// Date and time display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `23.08.2022 14:55:02`
    European,
    /// `08/23/2022 02:55:02 pm`
    Us,
}

impl TimeFormat {
    pub fn from_us(us: bool) -> Self {
        if us {
            TimeFormat::Us
        } else {
            TimeFormat::European
        }
    }

    pub fn date(self) -> &'static str {
        match self {
            TimeFormat::European => "%d.%m.%Y",
            TimeFormat::Us => "%m/%d/%Y",
        }
    }

    pub fn time(self) -> &'static str {
        match self {
            TimeFormat::European => "%H:%M:%S",
            TimeFormat::Us => "%I:%M:%S %P",
        }
    }

    pub fn time_no_seconds(self) -> &'static str {
        match self {
            TimeFormat::European => "%H:%M",
            TimeFormat::Us => "%I:%M %P",
        }
    }
}

/// Whether `now` looks like a synchronized wall clock.
pub fn is_synchronized<Tz: TimeZone>(now: &DateTime<Tz>) -> bool {
    now.timestamp() >= EARLIEST_VALID_TIMESTAMP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_zone() {
        assert_eq!(Zone::parse("local"), Some(Zone::Local));
        assert_eq!(
            Zone::parse("+01:00"),
            Some(Zone::Fixed(FixedOffset::east_opt(3600).unwrap()))
        );
        assert_eq!(
            Zone::parse("-05:30"),
            Some(Zone::Fixed(FixedOffset::west_opt(5 * 3600 + 1800).unwrap()))
        );
        assert_eq!(
            Zone::parse("+9"),
            Some(Zone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap()))
        );
        assert_eq!(
            Zone::parse("UTC"),
            Some(Zone::Fixed(FixedOffset::east_opt(0).unwrap()))
        );
        assert_eq!(Zone::parse("Europe/Zurich"), None);
        assert_eq!(Zone::parse("+25:00"), None);
        assert_eq!(Zone::parse(""), None);
        assert_eq!(Zone::parse("+"), None);
    }

    #[test]
    fn parse_zone_rejects_repeated_sign() {
        assert_eq!(Zone::parse("-+01:00"), None);
        assert_eq!(Zone::parse("+-01:00"), None);
        assert_eq!(Zone::parse("+01:+30"), None);
        assert_eq!(Zone::parse("++2"), None);
    }

    #[test]
    fn weekday_follows_offset() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let utc = Zone::parse("+00:00").unwrap();
        let east = Zone::parse("+01:00").unwrap();
        assert_eq!(utc.weekday(at), Weekday::Mon);
        assert_eq!(east.weekday(at), Weekday::Tue);
    }

    #[test]
    fn formats_in_both_styles() {
        let at = Utc.with_ymd_and_hms(2022, 8, 23, 14, 55, 2).unwrap();
        let zone = Zone::parse("+00:00").unwrap();
        let eu = TimeFormat::from_us(false);
        let us = TimeFormat::from_us(true);
        assert_eq!(zone.format(at, eu.date()), "23.08.2022");
        assert_eq!(zone.format(at, eu.time()), "14:55:02");
        assert_eq!(zone.format(at, us.date()), "08/23/2022");
        assert_eq!(zone.format(at, us.time()), "02:55:02 pm");
        assert_eq!(zone.format(at, us.time_no_seconds()), "02:55 pm");
    }

    #[test]
    fn unsynchronized_clock() {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        assert!(!is_synchronized(&epoch));
        assert!(is_synchronized(&Utc::now()));
    }
}
