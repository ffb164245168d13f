//! Conversion between `dd/mm/yyyy` text and [`Date`].
//!
//! Input text may use any run of non-digit characters between the groups
//! (`/`, `:`, `-`, a space, or nothing at all).  Output always uses `/`.
//! Malformed text is logged and returned as [`Error::Format`].

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::date::Date;
use findt_core::errors::{Error, Result};

/// Either a textual date or an already-parsed [`Date`].
///
/// Lets period construction and the codec accept both forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Free-form `dd?mm?yyyy` text.
    Text(String),
    /// A structured date, passed through unchanged.
    Date(Date),
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Text(s)
    }
}

impl From<&String> for DateInput {
    fn from(s: &String) -> Self {
        DateInput::Text(s.clone())
    }
}

impl From<Date> for DateInput {
    fn from(d: Date) -> Self {
        DateInput::Date(d)
    }
}

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{2})[^0-9]*([0-9]{2})[^0-9]*([0-9]{4})$")
            .expect("date pattern is a valid regex")
    })
}

/// Split text into its day, month and year groups.
fn groups(text: &str) -> Result<(&str, &str, &str)> {
    let caps = pattern().captures(text).ok_or_else(|| {
        warn!(text, "undefined date separator");
        Error::Format {
            text: text.to_owned(),
        }
    })?;
    // All three groups are mandatory in the pattern.
    let group = |i| caps.get(i).map_or("", |m| m.as_str());
    Ok((group(1), group(2), group(3)))
}

/// Rewrite `text` with the canonical `/` separator.
///
/// ```
/// use findt_time::codec::normalize;
/// assert_eq!(normalize("03-04-2013").unwrap(), "03/04/2013");
/// assert_eq!(normalize("03 04 2013").unwrap(), "03/04/2013");
/// assert!(normalize("3/4/2013").is_err());
/// ```
pub fn normalize(text: &str) -> Result<String> {
    let (d, m, y) = groups(text)?;
    Ok(format!("{d}/{m}/{y}"))
}

/// Interpret text as day/month/year, or pass a [`Date`] through.
pub fn parse(input: impl Into<DateInput>) -> Result<Date> {
    match input.into() {
        DateInput::Date(d) => Ok(d),
        DateInput::Text(text) => {
            let (d, m, y) = groups(&text)?;
            // The pattern guarantees ASCII digits of fixed width.
            let number = |s: &str| s.parse::<u16>().unwrap_or_default();
            Date::from_ymd(number(y), number(m) as u8, number(d) as u8).map_err(|err| {
                warn!(text = text.as_str(), %err, "text does not name a calendar date");
                err
            })
        }
    }
}

/// Render as `dd/mm/yyyy`.
///
/// Text is only normalized, never converted to a date and back, so
/// `format("31-02-2013")` is `"31/02/2013"`.
pub fn format(input: impl Into<DateInput>) -> Result<String> {
    match input.into() {
        DateInput::Date(d) => Ok(d.to_string()),
        DateInput::Text(text) => normalize(&text),
    }
}

/// Render every date of a slice as `dd/mm/yyyy`.
pub fn format_all(dates: &[Date]) -> Vec<String> {
    dates.iter().map(Date::to_string).collect()
}
