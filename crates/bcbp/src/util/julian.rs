//! Calendar arithmetic for BCBP day-of-year dates.
//!
//! Boarding passes carry the date of flight as a day-of-year with no year,
//! and the date of issue as the last digit of the year plus a day-of-year.
//! Resolving either into a calendar date needs a reference date supplied by
//! the caller (typically "today" or the scan time).

use std::fmt;
use std::str::FromStr;

use crate::model::JulianDay;

/// Error type for calendar date parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub message: String,
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DateParseError {}

/// A proleptic Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Returns true if the given year is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in a given month (1-indexed).
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Calculates days since Unix epoch for a given date.
fn date_to_days(year: i32, month: u32, day: u32) -> i64 {
    // Howard Hinnant's days_from_civil
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let m = if month <= 2 {
        month as i64 + 9
    } else {
        month as i64 - 3
    };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // year of era
    let doy = (153 * m + 2) / 5 + day as i64 - 1; // day of year, March based
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // day of era

    era * 146097 + doe - 719468
}

/// Converts days since Unix epoch to (year, month, day).
fn days_to_date(days: i64) -> (i32, u32, u32) {
    // Howard Hinnant's civil_from_days
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097; // day of era
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // year of era
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year, March based
    let mp = (5 * doy + 2) / 153; // month index
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;

    let year = if m <= 2 { y + 1 } else { y } as i32;
    (year, m, d)
}

impl CalendarDate {
    /// Creates a date, returning `None` if it does not exist.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Creates a date from days since the Unix epoch.
    pub fn from_unix_days(days: i64) -> Self {
        let (year, month, day) = days_to_date(days);
        Self { year, month, day }
    }

    /// Returns days since the Unix epoch.
    pub fn to_unix_days(self) -> i64 {
        date_to_days(self.year, self.month, self.day)
    }

    /// Returns the date for a day-of-year, or `None` if the year is too short.
    pub fn from_day_of_year(year: i32, day_of_year: u16) -> Option<Self> {
        if day_of_year == 0 || day_of_year > days_in_year(year) {
            return None;
        }
        let days = date_to_days(year, 1, 1) + i64::from(day_of_year) - 1;
        Some(Self::from_unix_days(days))
    }

    /// Returns the day-of-year (1-366).
    pub fn day_of_year(self) -> u16 {
        (self.to_unix_days() - date_to_days(self.year, 1, 1) + 1) as u16
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    /// Parses `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |what: &str| DateParseError {
            message: format!("Invalid {} in date: {}", what, s),
        };

        if s.len() != 10 || s.as_bytes()[4] != b'-' || s.as_bytes()[7] != b'-' {
            return Err(DateParseError {
                message: format!("Invalid date, expected YYYY-MM-DD: {}", s),
            });
        }

        let year: i32 = s[..4].parse().map_err(|_| invalid("year"))?;
        let month: u32 = s[5..7].parse().map_err(|_| invalid("month"))?;
        let day: u32 = s[8..10].parse().map_err(|_| invalid("day"))?;

        if !(1..=12).contains(&month) {
            return Err(invalid("month"));
        }
        CalendarDate::new(year, month, day).ok_or_else(|| invalid("day"))
    }
}

/// Resolves a date of flight to the calendar date nearest to `reference`.
///
/// The candidates are the day in the reference year and in the years either
/// side of it; a pass scanned in early January for a late December flight
/// resolves to the previous year, and vice versa. Returns `None` only for
/// day 366 when none of the three years is a leap year.
pub fn resolve_julian_date(day: JulianDay, reference: CalendarDate) -> Option<CalendarDate> {
    let anchor = reference.to_unix_days();
    [reference.year - 1, reference.year, reference.year + 1]
        .into_iter()
        .filter_map(|year| CalendarDate::from_day_of_year(year, day.get()))
        .min_by_key(|candidate| (candidate.to_unix_days() - anchor).abs())
}

/// Resolves a 4-character date of issue (last digit of the year followed by
/// the day-of-year) to the latest matching date not after `reference`.
pub fn resolve_issue_date(raw: &str, reference: CalendarDate) -> Option<CalendarDate> {
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year_digit: i32 = raw[..1].parse().ok()?;
    let day_of_year: u16 = raw[1..].parse().ok()?;

    let mut year = reference.year - (reference.year - year_digit).rem_euclid(10);
    let candidate = CalendarDate::from_day_of_year(year, day_of_year);
    if candidate.is_none_or(|date| date > reference) {
        year -= 10;
        return CalendarDate::from_day_of_year(year, day_of_year);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn julian(day: u16) -> JulianDay {
        JulianDay::new(day).unwrap()
    }

    #[test]
    fn test_unix_days() {
        assert_eq!(date(1970, 1, 1).to_unix_days(), 0);
        assert_eq!(date(2024, 3, 15).to_unix_days(), 19797);
        assert_eq!(CalendarDate::from_unix_days(19797), date(2024, 3, 15));
        assert_eq!(CalendarDate::from_unix_days(-1), date(1969, 12, 31));
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(date(2024, 3, 15).day_of_year(), 75);
        assert_eq!(date(2023, 3, 15).day_of_year(), 74);
        assert_eq!(date(2024, 12, 31).day_of_year(), 366);
        assert_eq!(CalendarDate::from_day_of_year(2024, 60), Some(date(2024, 2, 29)));
        assert_eq!(CalendarDate::from_day_of_year(2023, 366), None);
        assert_eq!(CalendarDate::from_day_of_year(2023, 0), None);
    }

    #[test]
    fn test_parse_and_format() {
        let parsed: CalendarDate = "2024-02-29".parse().unwrap();
        assert_eq!(parsed, date(2024, 2, 29));
        assert_eq!(parsed.to_string(), "2024-02-29");

        assert!("2023-02-29".parse::<CalendarDate>().is_err());
        assert!("2024-13-01".parse::<CalendarDate>().is_err());
        assert!("2024/01/01".parse::<CalendarDate>().is_err());
        assert!("24-01-01".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_resolve_same_year() {
        let resolved = resolve_julian_date(julian(45), date(2024, 3, 15));
        assert_eq!(resolved, Some(date(2024, 2, 14)));
    }

    #[test]
    fn test_resolve_across_year_boundary() {
        let resolved = resolve_julian_date(julian(360), date(2024, 1, 10));
        assert_eq!(resolved, Some(date(2023, 12, 26)));

        let resolved = resolve_julian_date(julian(5), date(2024, 12, 20));
        assert_eq!(resolved, Some(date(2025, 1, 5)));
    }

    #[test]
    fn test_resolve_leap_day() {
        assert_eq!(
            resolve_julian_date(julian(366), date(2024, 6, 1)),
            Some(date(2024, 12, 31))
        );
        assert_eq!(resolve_julian_date(julian(366), date(2026, 6, 1)), None);
    }

    #[test]
    fn test_resolve_issue_date() {
        assert_eq!(
            resolve_issue_date("4075", date(2024, 3, 20)),
            Some(date(2024, 3, 15))
        );
        assert_eq!(
            resolve_issue_date("4080", date(2024, 3, 15)),
            Some(date(2014, 3, 21))
        );
        assert_eq!(
            resolve_issue_date("3365", date(2024, 3, 15)),
            Some(date(2023, 12, 31))
        );
        assert_eq!(resolve_issue_date("    ", date(2024, 3, 15)), None);
        assert_eq!(resolve_issue_date("407", date(2024, 3, 15)), None);
    }
}
