//! `Calendar` trait and the day-selection calendars.
//!
//! A calendar knows which dates are business days.  The three day-selection
//! tiers of a [`Period`](crate::period::Period) map onto three calendars:
//! [`NullCalendar`] (every day), [`WeekendsOnly`] (Monday–Friday) and a
//! loaded [`HolidayTable`](crate::holidays::HolidayTable) (Monday–Friday
//! minus listed holidays).

use crate::date::Date;

/// A business-day calendar with a Saturday/Sunday weekend.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` falls on a Saturday or Sunday.
    fn is_weekend(&self, date: Date) -> bool {
        date.weekday().is_weekend()
    }

    /// Keep the business days of `dates`, preserving order.
    fn business_days(&self, dates: &[Date]) -> Vec<Date> {
        dates
            .iter()
            .copied()
            .filter(|&d| self.is_business_day(d))
            .collect()
    }
}

/// Treats every day as a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }

    fn is_weekend(&self, _date: Date) -> bool {
        false
    }
}

/// Treats only Saturdays and Sundays as non-business days.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date)
    }
}
