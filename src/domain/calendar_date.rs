use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ISO_DATE: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Years a `CalendarDate` can be built for; four-digit ISO years only.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A calendar day with no time-of-day component.
///
/// Every date that enters or leaves the selection engine goes through this
/// type. Conversions from timestamp types drop the time, so two timestamps on
/// the same day always compare equal once normalized.
///
/// Constructors only accept years `MIN_YEAR..=MAX_YEAR`. Day arithmetic may
/// step a little outside that window (grid padding around 0001-01 and
/// 9999-12) but stays far inside chrono's own range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "NaiveDate", into = "NaiveDate")]
pub struct CalendarDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid calendar date {input:?}: expected YYYY-MM-DD between 0001-01-01 and 9999-12-31")]
pub struct DateParseError {
    input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("date {date} is outside the supported years {MIN_YEAR}..={MAX_YEAR}")]
pub struct DateOutOfRange {
    pub date: NaiveDate,
}

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(|date| Self::try_from(date).ok())
    }

    /// The calendar date of `datetime` in its own time zone.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self, DateOutOfRange> {
        Self::try_from(datetime.date_naive())
    }

    /// Today according to the local clock.
    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self::try_from(today).unwrap_or_else(|_| Self::saturate(today))
    }

    fn saturate(date: NaiveDate) -> Self {
        let year = date.year().clamp(MIN_YEAR, MAX_YEAR);
        let (month, day) = if date.year() < MIN_YEAR { (1, 1) } else { (12, 31) };
        Self(NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date))
    }

    pub fn is_supported(&self) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&self.year())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// 0 = Sunday .. 6 = Saturday
    pub fn weekday_from_sunday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    pub fn first_of_month(&self) -> Self {
        // Day 1 exists for every month chrono can represent.
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// First day of the previous month, rolling the year back from January.
    pub fn previous_month(&self) -> Self {
        let (year, month) = if self.month() == 1 {
            (self.year() - 1, 12)
        } else {
            (self.year(), self.month() - 1)
        };
        Self::from_ymd(year, month, 1).unwrap_or_else(|| self.first_of_month())
    }

    /// First day of the next month, rolling the year forward from December.
    pub fn next_month(&self) -> Self {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        Self::from_ymd(year, month, 1).unwrap_or_else(|| self.first_of_month())
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Shift by a signed number of days, saturating at chrono's limits.
    pub fn add_days(&self, days: i64) -> Self {
        let shifted = Duration::try_days(days).and_then(|delta| self.0.checked_add_signed(delta));
        Self(shifted.unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX }))
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: CalendarDate) -> i64 {
        (other.0 - self.0).num_days()
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateOutOfRange;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            Ok(Self(date))
        } else {
            Err(DateOutOfRange { date })
        }
    }
}

impl TryFrom<NaiveDateTime> for CalendarDate {
    type Error = DateOutOfRange;

    fn try_from(datetime: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::try_from(datetime.date())
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE))
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    /// Accepts `YYYY-MM-DD`, or a full timestamp which is cut down to its day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        let parsed = NaiveDate::parse_from_str(input, ISO_DATE)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(input)
                    .ok()
                    .map(|datetime| datetime.date_naive())
            })
            .or_else(|| {
                TIMESTAMP_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
                    .map(|datetime| datetime.date())
            });

        parsed
            .and_then(|date| Self::try_from(date).ok())
            .ok_or_else(|| DateParseError {
                input: input.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn timestamps_on_same_day_normalize_equal() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let morning = day.and_time(NaiveTime::from_hms_milli_opt(0, 0, 1, 5).unwrap());
        let night = day.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());

        assert_eq!(
            CalendarDate::try_from(morning).unwrap(),
            CalendarDate::try_from(night).unwrap()
        );
        assert_eq!(CalendarDate::try_from(morning).unwrap(), date(2025, 3, 10));
    }

    #[test]
    fn datetime_uses_its_own_offset() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let tokyo = offset.with_ymd_and_hms(2025, 3, 10, 1, 30, 0).unwrap();

        assert_eq!(CalendarDate::from_datetime(&tokyo).unwrap(), date(2025, 3, 10));
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(date(2024, 12, 31) < date(2025, 1, 1));
        assert!(date(2025, 2, 28) < date(2025, 3, 1));
        assert!(date(2025, 3, 1) <= date(2025, 3, 1));
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2025));
        assert_eq!(date(2024, 2, 10).days_in_month(), 29);
        assert_eq!(date(2100, 2, 10).days_in_month(), 28);
    }

    #[test]
    fn month_navigation_rolls_over_years() {
        assert_eq!(date(2025, 1, 17).previous_month(), date(2024, 12, 1));
        assert_eq!(date(2025, 12, 31).next_month(), date(2026, 1, 1));
        assert_eq!(date(2025, 5, 31).next_month(), date(2025, 6, 1));
    }

    #[test]
    fn weekday_counts_from_sunday() {
        // 2025-06-01 was a Sunday
        assert_eq!(date(2025, 6, 1).weekday_from_sunday(), 0);
        assert_eq!(date(2025, 6, 7).weekday_from_sunday(), 6);
    }

    #[test]
    fn parse_and_display_iso() {
        let parsed: CalendarDate = "2025-07-04".parse().unwrap();
        assert_eq!(parsed, date(2025, 7, 4));
        assert_eq!(parsed.to_string(), "2025-07-04");
    }

    #[test]
    fn parse_strips_time_of_day() {
        let naive: CalendarDate = "2025-07-04T18:45:12.250".parse().unwrap();
        let zoned: CalendarDate = "2025-07-04T23:00:00-05:00".parse().unwrap();

        assert_eq!(naive, date(2025, 7, 4));
        assert_eq!(zoned, date(2025, 7, 4));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("07/04/2025".parse::<CalendarDate>().is_err());
        assert!("2025-02-30".parse::<CalendarDate>().is_err());
        assert!("".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn serde_uses_iso_string() {
        let json = serde_json::to_string(&date(2025, 1, 15)).unwrap();
        assert_eq!(json, "\"2025-01-15\"");

        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date(2025, 1, 15));
    }

    #[test]
    fn day_arithmetic() {
        assert_eq!(date(2025, 2, 28).add_days(1), date(2025, 3, 1));
        assert_eq!(date(2025, 3, 1).add_days(-1), date(2025, 2, 28));
        assert_eq!(date(2025, 7, 4).days_until(date(2025, 7, 10)), 6);
        assert_eq!(date(2025, 7, 4).succ(), Some(date(2025, 7, 5)));
    }

    #[test]
    fn years_outside_the_window_are_rejected() {
        assert!(CalendarDate::from_ymd(0, 12, 31).is_none());
        assert!(CalendarDate::from_ymd(10000, 1, 1).is_none());
        assert!(CalendarDate::try_from(NaiveDate::MAX).is_err());
        assert!(CalendarDate::try_from(NaiveDate::MIN).is_err());

        assert!("+262142-12-01".parse::<CalendarDate>().is_err());
        assert!("+262142-12-01T10:00:00".parse::<CalendarDate>().is_err());
        assert!(serde_json::from_str::<CalendarDate>("\"+262142-12-01\"").is_err());

        assert_eq!("0001-01-01".parse::<CalendarDate>().unwrap(), date(MIN_YEAR, 1, 1));
        assert_eq!("9999-12-31".parse::<CalendarDate>().unwrap(), date(MAX_YEAR, 12, 31));
    }

    #[test]
    fn month_paging_stops_at_the_window_edges() {
        assert_eq!(date(MAX_YEAR, 12, 31).next_month(), date(MAX_YEAR, 12, 1));
        assert_eq!(date(MIN_YEAR, 1, 15).previous_month(), date(MIN_YEAR, 1, 1));
    }

    #[test]
    fn day_arithmetic_never_panics() {
        let last = date(MAX_YEAR, 12, 31);
        assert!(!last.add_days(1).is_supported());
        assert_eq!(last.add_days(i64::MAX / 2).as_naive(), NaiveDate::MAX);
        assert_eq!(last.add_days(i64::MIN / 2).as_naive(), NaiveDate::MIN);
    }
}
