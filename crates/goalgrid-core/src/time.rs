//! Calendar keys in the check-in owner's local timezone.
//!
//! Every streak and points figure is computed over civil dates, never over
//! raw instants. This module is the only place where an instant meets a
//! timezone:
//! - [`DateKey`]: local civil date, rendered `YYYY-MM-DD`
//! - [`WeekKey`]: ISO-8601 week-year and week, rendered `YYYY-W##`
//! - [`LocalCalendar`]: a parsed IANA zone that derives both keys and the
//!   Monday-start week boundaries
//!
//! Zones are resolved with the full IANA database (`chrono-tz`), so DST
//! transitions shift local midnight correctly. Unknown zone names fail with
//! [`CoreError::InvalidTimezone`]; there is no fallback zone here.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, KeyKind, Result};

/// Local civil date of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The previous calendar day, or `None` at the start of the supported range.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The next calendar day, or `None` at the end of the supported range.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// The day `days` calendar days before this one.
    pub fn minus_days(&self, days: u32) -> Option<Self> {
        self.0.checked_sub_days(Days::new(u64::from(days))).map(Self)
    }

    /// ISO week containing this date. No timezone is involved: the date is
    /// already local.
    pub fn week_key(&self) -> WeekKey {
        WeekKey::from_date(self.0)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidKey {
            kind: KeyKind::Date,
            value: s.to_string(),
        };
        // chrono accepts unpadded fields; keys are always zero-padded
        if s.len() != 10 {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for DateKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

/// ISO-8601 week identifier. The week-year can differ from the calendar year
/// of the days it contains: 2024-12-30 belongs to `2025-W01`, and 2027-01-01
/// belongs to `2026-W53`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    /// Build a key, rejecting weeks the ISO calendar does not contain.
    pub fn new(year: i32, week: u32) -> Option<Self> {
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).map(|_| Self { year, week })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// ISO week-year
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    /// Monday of this week.
    pub fn monday(&self) -> NaiveDate {
        // Constructors only admit existing weeks
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon).unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidKey {
            kind: KeyKind::Week,
            value: s.to_string(),
        };
        let (year, week) = s.split_once("-W").ok_or_else(invalid)?;
        if year.len() != 4 || week.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let week: u32 = week.parse().map_err(|_| invalid())?;
        WeekKey::new(year, week).ok_or_else(invalid)
    }
}

impl TryFrom<String> for WeekKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<WeekKey> for String {
    fn from(key: WeekKey) -> Self {
        key.to_string()
    }
}

/// Resolve an IANA timezone identifier.
///
/// The name is used verbatim; `"america/chicago"` or `" UTC"` are rejected.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CoreError::InvalidTimezone(name.to_string()))
}

/// A user's local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalCalendar {
    tz: Tz,
}

impl LocalCalendar {
    /// Create a calendar for an IANA timezone name.
    pub fn new(timezone: &str) -> Result<Self> {
        Ok(Self {
            tz: parse_timezone(timezone)?,
        })
    }

    pub fn from_tz(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Civil date of `instant` as observed in this zone.
    pub fn date_key(&self, instant: DateTime<Utc>) -> DateKey {
        DateKey(self.local_date(instant))
    }

    /// ISO week of `instant` as observed in this zone.
    pub fn week_key(&self, instant: DateTime<Utc>) -> WeekKey {
        WeekKey::from_date(self.local_date(instant))
    }

    /// Monday that starts the ISO week containing `instant`.
    ///
    /// Computed on the local date component, so the result is a plain date
    /// and must not be converted through a timezone again.
    pub fn week_start(&self, instant: DateTime<Utc>) -> NaiveDate {
        let date = self.local_date(instant);
        let offset = date.weekday().number_from_monday() - 1;
        date - Days::new(u64::from(offset))
    }

    /// Sunday that ends the ISO week containing `instant`.
    pub fn week_end(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.week_start(instant) + Days::new(6)
    }
}

/// Render the local date key of `instant` in `timezone`.
pub fn local_date_key(instant: DateTime<Utc>, timezone: &str) -> Result<DateKey> {
    Ok(LocalCalendar::new(timezone)?.date_key(instant))
}

/// Render the ISO week key of `instant` in `timezone`.
pub fn week_key(instant: DateTime<Utc>, timezone: &str) -> Result<WeekKey> {
    Ok(LocalCalendar::new(timezone)?.week_key(instant))
}

/// Monday (local civil date) of the ISO week containing `instant`.
pub fn week_start(instant: DateTime<Utc>, timezone: &str) -> Result<NaiveDate> {
    Ok(LocalCalendar::new(timezone)?.week_start(instant))
}

/// Sunday (local civil date) of the ISO week containing `instant`.
pub fn week_end(instant: DateTime<Utc>, timezone: &str) -> Result<NaiveDate> {
    Ok(LocalCalendar::new(timezone)?.week_end(instant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_key_uses_local_civil_date() {
        let instant = utc("2025-01-15T05:30:00Z");
        assert_eq!(
            local_date_key(instant, "America/Chicago").unwrap().to_string(),
            "2025-01-14"
        );
        assert_eq!(
            local_date_key(instant, "Asia/Tokyo").unwrap().to_string(),
            "2025-01-15"
        );
    }

    #[test]
    fn test_date_key_follows_dst() {
        // 2025-03-09 is the spring-forward day in Chicago: CST -6 before, CDT -5 after
        let before = utc("2025-03-09T05:59:00Z");
        let after = utc("2025-03-10T04:59:00Z");
        let cal = LocalCalendar::new("America/Chicago").unwrap();
        assert_eq!(cal.date_key(before).to_string(), "2025-03-08");
        assert_eq!(cal.date_key(after).to_string(), "2025-03-09");
        assert_eq!(cal.date_key(utc("2025-03-10T05:00:00Z")).to_string(), "2025-03-10");
    }

    #[test]
    fn test_week_key_iso_year_boundaries() {
        let cases = [
            (date(2024, 12, 30), "2025-W01"),
            (date(2024, 12, 31), "2025-W01"),
            (date(2025, 12, 29), "2026-W01"),
            (date(2026, 12, 31), "2026-W53"),
            (date(2027, 1, 1), "2026-W53"),
            (date(2021, 1, 3), "2020-W53"),
            (date(2019, 12, 30), "2020-W01"),
            (date(2025, 1, 15), "2025-W03"),
        ];
        for (d, expected) in cases {
            assert_eq!(WeekKey::from_date(d).to_string(), expected, "for {d}");
        }
    }

    #[test]
    fn test_week_key_from_instant_in_zone() {
        // Monday 2024-12-30 00:30 UTC is still Sunday 2024-12-29 in Chicago
        let instant = utc("2024-12-30T00:30:00Z");
        assert_eq!(week_key(instant, "UTC").unwrap().to_string(), "2025-W01");
        assert_eq!(
            week_key(instant, "America/Chicago").unwrap().to_string(),
            "2024-W52"
        );
    }

    #[test]
    fn test_week_start_and_end() {
        let cal = LocalCalendar::new("America/Chicago").unwrap();
        let wednesday = utc("2025-01-15T18:00:00Z");
        assert_eq!(cal.week_start(wednesday), date(2025, 1, 13));
        assert_eq!(cal.week_end(wednesday), date(2025, 1, 19));

        let monday = utc("2025-01-13T12:00:00Z");
        assert_eq!(cal.week_start(monday), date(2025, 1, 13));

        let sunday = utc("2025-01-19T12:00:00Z");
        assert_eq!(cal.week_start(sunday), date(2025, 1, 13));
    }

    #[test]
    fn test_week_start_rederives_same_week_key() {
        let cal = LocalCalendar::new("Pacific/Auckland").unwrap();
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 13, 0, 0).unwrap();
        let start = cal.week_start(instant);
        assert_eq!(WeekKey::from_date(start), cal.week_key(instant));
        assert_eq!(start.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_invalid_timezone_fails_closed() {
        let instant = utc("2025-01-15T18:00:00Z");
        for name in ["Mars/Olympus", "", "america/chicago", " UTC"] {
            assert!(matches!(
                local_date_key(instant, name),
                Err(CoreError::InvalidTimezone(_))
            ));
        }
        assert!(matches!(
            week_start(instant, "Nowhere"),
            Err(CoreError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_date_key_parse() {
        let key: DateKey = "2025-01-15".parse().unwrap();
        assert_eq!(key.date(), date(2025, 1, 15));
        assert!("2025-1-15".parse::<DateKey>().is_err());
        assert!("2025-02-30".parse::<DateKey>().is_err());
        assert!("yesterday".parse::<DateKey>().is_err());
    }

    #[test]
    fn test_week_key_parse() {
        let key: WeekKey = "2026-W53".parse().unwrap();
        assert_eq!((key.year(), key.week()), (2026, 53));
        assert_eq!(key.monday(), date(2026, 12, 28));
        // 2025 has only 52 ISO weeks
        assert!("2025-W53".parse::<WeekKey>().is_err());
        assert!("2025-W00".parse::<WeekKey>().is_err());
        assert!("2025-W3".parse::<WeekKey>().is_err());
        assert!("2025W03".parse::<WeekKey>().is_err());
    }

    #[test]
    fn test_week_keys_order_chronologically() {
        let a: WeekKey = "2024-W52".parse().unwrap();
        let b: WeekKey = "2025-W01".parse().unwrap();
        let c: WeekKey = "2025-W10".parse().unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_keys_serialize_as_strings() {
        let key = DateKey::new(date(2025, 1, 5));
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-01-05\"");
        let week: WeekKey = serde_json::from_str("\"2025-W02\"").unwrap();
        assert_eq!(week.week(), 2);
        assert!(serde_json::from_str::<WeekKey>("\"2025-W99\"").is_err());
    }
}
