//! # findt
//!
//! Business-day counting, weekday enumeration, monthly business-day buckets
//! and holiday tables over materialized date periods.
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates. Application code should depend on this crate rather
//! than the individual `findt-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use findt::prelude::*;
//!
//! let period = Period::between("01/01/2013", "28/02/2013").unwrap();
//! assert_eq!(period.count(DaySelection::Calendar).unwrap(), 59);
//! assert_eq!(period.count(DaySelection::Weekdays).unwrap(), 43);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions and settings.
pub use findt_core as core;

/// Dates, codec, holiday tables and periods.
pub use findt_time as time;

/// Subscriber setup for applications embedding findt.
pub mod logging;

/// The types most callers need.
pub mod prelude {
    pub use findt_core::{Bound, Error, Language, Result, Settings};
    pub use findt_time::codec::{format, normalize, parse};
    pub use findt_time::{
        Date, DateInput, DaySelection, HolidayFormat, HolidayLoad, HolidaySource, HolidayTable,
        MonthlyCounts, Period, Weekday,
    };
}
