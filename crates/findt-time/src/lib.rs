//! # findt-time
//!
//! Dates, the `dd/mm/yyyy` codec, holiday tables and periods.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Calendar trait and the day-selection calendars.
pub mod calendar;

/// Text ↔ `Date` conversion.
pub mod codec;

/// `Date` type.
pub mod date;

/// Holiday files and tables.
pub mod holidays;

/// `Period` — a materialized run of days and its queries.
pub mod period;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{Calendar, NullCalendar, WeekendsOnly};
pub use codec::DateInput;
pub use date::Date;
pub use holidays::{HolidayFormat, HolidayLoad, HolidaySource, HolidayTable};
pub use period::{DaySelection, MonthlyCounts, Period, PeriodBuilder, Selected};
pub use weekday::Weekday;
