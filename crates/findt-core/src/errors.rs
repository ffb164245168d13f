//! Error types for findt.
//!
//! Every fallible operation in the workspace reports through a single
//! `thiserror`-derived enum.  Construction checks use the [`ensure!`] macro
//! defined here, which short-circuits with [`Error::Construction`].
//!
//! Two error kinds are never propagated as hard failures by the period
//! engine: [`Error::Resource`] is handed back to callers as a *warning* next
//! to an empty holiday table, and [`Error::Format`] is what the date codec
//! returns for malformed text.

use thiserror::Error;

/// Which bound of a requested subperiod was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// The first day of the subperiod.
    Start,
    /// The last day of the subperiod.
    End,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Start => write!(f, "start"),
            Bound::End => write!(f, "end"),
        }
    }
}

/// The top-level error type used throughout findt.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Text does not match the `dd?mm?yyyy` digit-group pattern.
    #[error("malformed date text {text:?}: expected two-digit day, two-digit month and four-digit year")]
    Format {
        /// The offending input.
        text: String,
    },

    /// Well-formed input that names no calendar date, or date arithmetic
    /// leaving the supported range.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Bad arguments while building a period (missing start, both or
    /// neither of end/count, business days requested without a holiday
    /// source, ...).
    #[error("cannot construct period: {0}")]
    Construction(String),

    /// A subperiod bound is not a member of the parent period.
    #[error("subperiod {bound} date {date} is outside the period")]
    OutOfRange {
        /// The bound that was rejected.
        bound: Bound,
        /// The rejected date, as `dd/mm/yyyy`.
        date: String,
    },

    /// The holiday resource could not be opened or read.
    #[error("holiday resource {path} unavailable: {reason}")]
    Resource {
        /// Location of the resource.
        path: String,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// A holiday row could not be interpreted; the whole load is rejected.
    #[error("malformed holiday row {row}: {reason}")]
    MalformedRow {
        /// 1-based row number in the resource.
        row: u64,
        /// What was wrong with it.
        reason: String,
    },
}

/// Shorthand `Result` type used throughout findt.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Construction(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use findt_core::{ensure, errors::Error};
/// fn positive(n: i32) -> findt_core::errors::Result<i32> {
///     ensure!(n != 0, "day count must be non-zero");
///     Ok(n)
/// }
/// assert!(positive(3).is_ok());
/// assert_eq!(
///     positive(0),
///     Err(Error::Construction("day count must be non-zero".into()))
/// );
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Construction(
                format!($($msg)*)
            ));
        }
    };
}
