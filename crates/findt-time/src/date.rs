//! `Date` type.
//!
//! A date is stored as a signed count of days since 1970-01-01 in the
//! proleptic Gregorian calendar, which makes ordering, day arithmetic and
//! differences plain integer operations.
//!
//! # Supported range
//! Every date with a four-digit year: 0001-01-01 to 9999-12-31.  This is the
//! range the `dd/mm/yyyy` text form can express.

use std::str::FromStr;

use crate::codec;
use crate::weekday::Weekday;
use findt_core::errors::{Error, Result};

/// A calendar date.
///
/// Immutable, `Copy`, totally ordered.  `Display` renders `dd/mm/yyyy`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

impl Date {
    /// Earliest supported date, 0001-01-01.
    pub const MIN: Date = Date(days_from_civil(1, 1, 1));

    /// Latest supported date, 9999-12-31.
    pub const MAX: Date = Date(days_from_civil(9999, 12, 31));

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year (1–9999), month (1–12) and day-of-month.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1..=9999).contains(&year) {
            return Err(Error::InvalidDate(format!(
                "year {year} out of range [1, 9999]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidDate(format!(
                "month {month} out of range [1, 12]"
            )));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::InvalidDate(format!(
                "day {day} out of range [1, {days_in}] for {month:02}/{year:04}"
            )));
        }
        Ok(Date(days_from_civil(year as i32, month as i32, day as i32)))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return `(year, month, day)`.
    pub fn ymd(&self) -> (u16, u8, u8) {
        civil_from_days(self.0)
    }

    /// Return the year (1–9999).
    pub fn year(&self) -> u16 {
        self.ymd().0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.ymd().2
    }

    /// Return the ISO weekday.
    pub fn weekday(&self) -> Weekday {
        // Day 0 (1970-01-01) was a Thursday, ISO ordinal 4.
        let iso = ((self.0 + 3).rem_euclid(7) + 1) as u8;
        Weekday::from_ordinal(iso).expect("rem_euclid always in 1..=7")
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Move by `n` days (negative moves backwards).
    ///
    /// Returns an error if the result leaves the supported range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let moved = self
            .0
            .checked_add(n)
            .map(Date)
            .filter(|d| (Self::MIN..=Self::MAX).contains(d));
        moved.ok_or_else(|| {
            Error::InvalidDate(format!("{self} moved by {n} days leaves the supported range"))
        })
    }

    /// Number of days from `self` to `other`; positive if `other` is later.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    // ── Month boundaries ──────────────────────────────────────────────────────

    /// First day of this date's month.
    pub fn first_of_month(self) -> Self {
        let (y, m, _) = self.ymd();
        Date(days_from_civil(y as i32, m as i32, 1))
    }

    /// Last day of this date's month.
    ///
    /// Walks forward one day at a time until the month changes, so the cost
    /// grows with the distance to month end.
    pub fn last_of_month(self) -> Self {
        let month = self.month();
        let mut current = self;
        while let Ok(next) = current.add_days(1) {
            if next.month() != month {
                break;
            }
            current = next;
        }
        current
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_last_of_month(self) -> bool {
        match self.add_days(1) {
            Ok(next) => next.month() != self.month(),
            Err(_) => true,
        }
    }
}

// ── Operators ─────────────────────────────────────────────────────────────────

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Text ──────────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{d:02}/{m:02}/{y:04}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        codec::parse(s)
    }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => unreachable!(),
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian (y, m, d).
///
/// Years are shifted to start in March so the leap day is the last day of
/// the shifted year; eras are 400-year blocks of 146 097 days.
const fn days_from_civil(year: i32, month: i32, day: i32) -> i32 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i32) -> (u16, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i32::from(m <= 2);
    (y as u16, m as u8, d as u8)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
