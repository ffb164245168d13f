//! `Period` — a materialized run of consecutive calendar days.
//!
//! A period is fixed by a start date and either an inclusive end date or a
//! signed day count.  Every day of the run is materialized when the period is
//! built; all queries (day selection, weekday lists, monthly business-day
//! counts, subperiods) return new values and never touch the period itself.
//!
//! Holiday-aware queries re-read the period's [`HolidaySource`] on every call.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::calendar::{Calendar, NullCalendar, WeekendsOnly};
use crate::codec::{self, DateInput};
use crate::date::Date;
use crate::holidays::{HolidayLoad, HolidaySource};
use crate::weekday::Weekday;
use findt_core::errors::{Bound, Error, Result};
use findt_core::{ensure, DayCount};

/// Which days of a period to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DaySelection {
    /// Every calendar day.
    #[default]
    Calendar,
    /// Monday to Friday.
    Weekdays,
    /// Monday to Friday, minus the holidays of the period's holiday source.
    Business,
}

impl DaySelection {
    /// Map the numeric options 1, 2 and 3 to selections.
    pub fn from_option(opt: u8) -> Option<Self> {
        match opt {
            1 => Some(DaySelection::Calendar),
            2 => Some(DaySelection::Weekdays),
            3 => Some(DaySelection::Business),
            _ => None,
        }
    }
}

/// Business-day counts per month together with any holiday-load warning.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCounts {
    /// Business days per `mm/yyyy` label, ordered by label text.
    pub counts: BTreeMap<String, usize>,
    /// Set when the holiday file could not be read, in which case every
    /// count is a weekday count.
    pub warning: Option<Error>,
}

/// Selected days together with any holiday-load warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
    /// The selected days, ascending.
    pub dates: Vec<Date>,
    /// Set when holidays were requested but the file could not be read, in
    /// which case `dates` equals the weekday selection.
    pub warning: Option<Error>,
}

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// A contiguous, ascending, non-empty run of calendar days.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    start: Date,
    end: Date,
    days: Vec<Date>,
    holidays: Option<HolidaySource>,
}

impl Period {
    /// Begin building a period.
    pub fn builder() -> PeriodBuilder {
        PeriodBuilder::default()
    }

    /// The days `start..=end`.
    pub fn between(start: impl Into<DateInput>, end: impl Into<DateInput>) -> Result<Self> {
        Self::builder().with_start(start).with_end(end).build()
    }

    /// `count` days starting at `start`, or `|count|` days ending at `start`
    /// when `count` is negative.
    pub fn with_count(start: impl Into<DateInput>, count: DayCount) -> Result<Self> {
        Self::builder().with_start(start).with_count(count).build()
    }

    fn materialize(start: Date, end: Date, holidays: Option<HolidaySource>) -> Result<Self> {
        let mut days = Vec::with_capacity((end - start) as usize + 1);
        let mut current = start;
        days.push(current);
        while current < end {
            current = current.add_days(1)?;
            days.push(current);
        }
        Ok(Self {
            start,
            end,
            days,
            holidays,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// First day.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Last day.
    pub fn end(&self) -> Date {
        self.end
    }

    /// Every day of the period, ascending.
    pub fn dates(&self) -> &[Date] {
        &self.days
    }

    /// Number of calendar days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always `false`: a period holds at least one day.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Return `true` if `date` is one of the period's days.
    pub fn contains(&self, date: Date) -> bool {
        self.days.binary_search(&date).is_ok()
    }

    /// The holiday source, if one was attached.
    pub fn holiday_source(&self) -> Option<&HolidaySource> {
        self.holidays.as_ref()
    }

    // ── Day selection ─────────────────────────────────────────────────────────

    /// Select days, reporting a degraded holiday load as a warning.
    ///
    /// # Errors
    /// [`Error::Construction`] if [`DaySelection::Business`] is requested
    /// without a holiday source; [`Error::MalformedRow`] if the holiday file
    /// has an unreadable row.
    pub fn select(&self, selection: DaySelection) -> Result<Selected> {
        match selection {
            DaySelection::Calendar => Ok(Selected {
                dates: NullCalendar.business_days(&self.days),
                warning: None,
            }),
            DaySelection::Weekdays => Ok(Selected {
                dates: WeekendsOnly.business_days(&self.days),
                warning: None,
            }),
            DaySelection::Business => {
                let HolidayLoad { table, warning } = self.holidays()?;
                Ok(Selected {
                    dates: table.business_days(&self.days),
                    warning,
                })
            }
        }
    }

    /// Selected days as [`Date`] values.
    pub fn days(&self, selection: DaySelection) -> Result<Vec<Date>> {
        self.select(selection).map(|s| s.dates)
    }

    /// Selected days as `dd/mm/yyyy` text.
    pub fn days_text(&self, selection: DaySelection) -> Result<Vec<String>> {
        self.days(selection).map(|d| codec::format_all(&d))
    }

    /// Number of selected days.
    pub fn count(&self, selection: DaySelection) -> Result<usize> {
        self.days(selection).map(|d| d.len())
    }

    /// Holidays of the attached source that fall inside the period.
    ///
    /// Re-reads the file on every call.
    pub fn holidays(&self) -> Result<HolidayLoad> {
        let source = self.holidays.as_ref().ok_or_else(|| {
            Error::Construction("business days need a holiday file".into())
        })?;
        source.load_between(self.start, self.end)
    }

    /// Holidays as `(dd/mm/yyyy, description)` pairs, ascending by date.
    pub fn holidays_text(&self) -> Result<Vec<(String, String)>> {
        self.holidays().map(|load| load.table.to_text())
    }

    // ── Weekdays ──────────────────────────────────────────────────────────────

    /// Every day of the period falling on `weekday`, ascending.
    ///
    /// Holidays are not considered.
    pub fn specific_weekday(&self, weekday: Weekday) -> Vec<Date> {
        self.days
            .iter()
            .copied()
            .filter(|d| d.weekday() == weekday)
            .collect()
    }

    /// [`specific_weekday`](Self::specific_weekday) as `dd/mm/yyyy` text.
    pub fn specific_weekday_text(&self, weekday: Weekday) -> Vec<String> {
        codec::format_all(&self.specific_weekday(weekday))
    }

    /// Name of the weekday of any date, in the configured language.
    ///
    /// ```
    /// use findt_time::Period;
    /// assert_eq!(Period::weekday_name("03/04/2013").unwrap(), "Wednesday");
    /// ```
    pub fn weekday_name(date: impl Into<DateInput>) -> Result<&'static str> {
        codec::parse(date).map(|d| d.weekday().name())
    }

    // ── Month boundaries ──────────────────────────────────────────────────────

    /// First day of the month of `date`.
    pub fn first_of_month(date: impl Into<DateInput>) -> Result<Date> {
        codec::parse(date).map(Date::first_of_month)
    }

    /// Last day of the month of `date`.
    pub fn last_of_month(date: impl Into<DateInput>) -> Result<Date> {
        codec::parse(date).map(Date::last_of_month)
    }

    // ── Aggregation ───────────────────────────────────────────────────────────

    /// Business days per month, keyed `mm/yyyy`, ordered by key text.
    ///
    /// A bucket closes on every month end inside the period and on the
    /// period's last day; the first bucket starts at the period start.  Each
    /// bucket is its own period and reloads the holiday file.
    pub fn monthly_business_days(&self) -> Result<MonthlyCounts> {
        let mut counts = BTreeMap::new();
        let mut degraded = None;
        for &day in self.days.iter().filter(|d| d.is_last_of_month() || **d == self.end) {
            let first = day.first_of_month().max(self.start);
            let bucket = Self::materialize(first, day, self.holidays.clone())?;
            let Selected { dates, warning } = bucket.select(DaySelection::Business)?;
            if let Some(err) = warning {
                warn!(%err, bucket = %day, "counting month without holidays");
                degraded.get_or_insert(err);
            }
            let (year, month, _) = day.ymd();
            counts.insert(format!("{month:02}/{year:04}"), dates.len());
        }
        Ok(MonthlyCounts {
            counts,
            warning: degraded,
        })
    }

    /// [`monthly_business_days`](Self::monthly_business_days) without the
    /// warning.
    pub fn business_days_by_month(&self) -> Result<BTreeMap<String, usize>> {
        self.monthly_business_days().map(|m| m.counts)
    }

    // ── Subperiods ────────────────────────────────────────────────────────────

    /// A bounded view of this period.
    ///
    /// Unless both bounds are given the result equals `self`.  The result
    /// keeps the holiday source.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] naming the first bound that is not one of the
    /// period's days; [`Error::Construction`] if `start` is after `end`.
    pub fn subperiod(&self, start: Option<DateInput>, end: Option<DateInput>) -> Result<Self> {
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(self.clone());
        };
        let start = codec::parse(start)?;
        let end = codec::parse(end)?;
        self.check_member(Bound::Start, start)?;
        self.check_member(Bound::End, end)?;
        self.builder_like(start).with_end(end).build()
    }

    /// A subperiod of `count` days from `start` (or `|count|` days ending at
    /// `start`), with both resulting bounds inside this period.
    ///
    /// A count running off the supported date range is reported as the
    /// bound it overshoots.
    pub fn subperiod_with_count(
        &self,
        start: impl Into<DateInput>,
        count: DayCount,
    ) -> Result<Self> {
        let anchor = codec::parse(start)?;
        ensure!(count != 0, "day count must be non-zero");
        let (bound, reach) = if count > 0 {
            (Bound::End, count - 1)
        } else {
            (Bound::Start, count + 1)
        };
        let far = anchor.add_days(reach).map_err(|_| Error::OutOfRange {
            bound,
            date: format!("{anchor} {reach:+} days"),
        })?;
        let (first, last) = if count > 0 { (anchor, far) } else { (far, anchor) };
        self.check_member(Bound::Start, first)?;
        self.check_member(Bound::End, last)?;
        self.builder_like(first).with_end(last).build()
    }

    fn builder_like(&self, start: impl Into<DateInput>) -> PeriodBuilder {
        let builder = Self::builder().with_start(start);
        match &self.holidays {
            Some(source) => builder.with_holidays(source.clone()),
            None => builder,
        }
    }

    fn check_member(&self, bound: Bound, date: Date) -> Result<()> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                bound,
                date: date.to_string(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// PeriodBuilder
// ---------------------------------------------------------------------------

/// Builder for [`Period`].
///
/// A start date is mandatory, and exactly one of an end date or a non-zero
/// day count must be given.
#[derive(Debug, Clone, Default)]
pub struct PeriodBuilder {
    start: Option<DateInput>,
    end: Option<DateInput>,
    count: Option<DayCount>,
    holidays: Option<HolidaySource>,
}

impl PeriodBuilder {
    /// Set the first day (or, with a negative count, the last day).
    pub fn with_start(mut self, start: impl Into<DateInput>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Set the inclusive last day.
    pub fn with_end(mut self, end: impl Into<DateInput>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Set a signed day count instead of an end date.
    pub fn with_count(mut self, count: DayCount) -> Self {
        self.count = Some(count);
        self
    }

    /// Attach the holiday file used by business-day queries.
    pub fn with_holidays(mut self, source: impl Into<HolidaySource>) -> Self {
        self.holidays = Some(source.into());
        self
    }

    /// Validate the arguments and materialize the period.
    pub fn build(self) -> Result<Period> {
        let anchor = match self.start {
            Some(start) => codec::parse(start)?,
            None => return Err(Error::Construction("a start date is required".into())),
        };
        let (start, end) = match (self.end, self.count) {
            (Some(_), Some(_)) => {
                return Err(Error::Construction(
                    "give either an end date or a day count, not both".into(),
                ))
            }
            (None, None) => {
                return Err(Error::Construction(
                    "an end date or a day count is required".into(),
                ))
            }
            (Some(end), None) => {
                let end = codec::parse(end)?;
                ensure!(end >= anchor, "end date {end} is before start date {anchor}");
                (anchor, end)
            }
            (None, Some(count)) => {
                ensure!(count != 0, "day count must be non-zero");
                if count > 0 {
                    (anchor, anchor.add_days(count - 1)?)
                } else {
                    (anchor.add_days(count + 1)?, anchor)
                }
            }
        };
        let period = Period::materialize(start, end, self.holidays)?;
        debug!(%start, %end, days = period.len(), "materialized period");
        Ok(period)
    }
}
