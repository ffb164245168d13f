//! Holiday tables read from delimited text files.
//!
//! The expected layout is one holiday per row, `date;weekday;description`,
//! semicolon-delimited, encoded in a single-byte Western code page.  Callers
//! strip any header and trailing summary rows before handing the file over
//! (or set [`HolidayFormat::with_header`]).
//!
//! A file that cannot be read is *not* an error for the caller: the load
//! degrades to an empty table and the [`Error::Resource`] travels back in
//! [`HolidayLoad::warning`].  A row that cannot be interpreted rejects the
//! whole load.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use tracing::{debug, warn};

use crate::calendar::Calendar;
use crate::codec;
use crate::date::Date;
use findt_core::errors::{Error, Result};

// ---------------------------------------------------------------------------
// HolidayFormat
// ---------------------------------------------------------------------------

/// Layout of a holiday file.
///
/// The [`Default`] implementation matches the bank-holiday spreadsheets this
/// library is usually fed: `;` delimiter, date in column 0, description in
/// column 2, no header, Windows-1252 text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolidayFormat {
    delimiter: u8,
    date_column: usize,
    description_column: usize,
    has_header: bool,
    encoding: &'static Encoding,
}

impl Default for HolidayFormat {
    fn default() -> Self {
        Self {
            delimiter: b';',
            date_column: 0,
            description_column: 2,
            has_header: false,
            encoding: encoding_rs::WINDOWS_1252,
        }
    }
}

impl HolidayFormat {
    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the 0-based column holding the date.
    pub fn with_date_column(mut self, column: usize) -> Self {
        self.date_column = column;
        self
    }

    /// Set the 0-based column holding the description.
    pub fn with_description_column(mut self, column: usize) -> Self {
        self.description_column = column;
        self
    }

    /// Skip the first row.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the text encoding of the file.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

// ---------------------------------------------------------------------------
// HolidaySource
// ---------------------------------------------------------------------------

/// Where holidays come from: a file path plus its layout.
#[derive(Debug, Clone, PartialEq)]
pub struct HolidaySource {
    path: PathBuf,
    format: HolidayFormat,
}

impl HolidaySource {
    /// A source in the default [`HolidayFormat`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: HolidayFormat::default(),
        }
    }

    /// Replace the file layout.
    pub fn with_format(mut self, format: HolidayFormat) -> Self {
        self.format = format;
        self
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file layout.
    pub fn format(&self) -> &HolidayFormat {
        &self.format
    }

    /// Read every row of the file.
    ///
    /// # Errors
    /// [`Error::Resource`] if the file cannot be read; [`Error::MalformedRow`]
    /// for the first row that is short, unreadable, or whose date does not
    /// parse.
    pub fn read_all(&self) -> Result<HolidayTable> {
        let bytes = std::fs::read(&self.path).map_err(|err| Error::Resource {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        })?;
        let (text, _) = self
            .format
            .encoding
            .decode_without_bom_handling(&bytes);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.format.delimiter)
            .has_headers(self.format.has_header)
            .flexible(true)
            .from_reader(text.as_bytes());

        let first_row = if self.format.has_header { 2 } else { 1 };
        let mut entries = BTreeMap::new();
        for (idx, result) in reader.records().enumerate() {
            let row = (idx + first_row) as u64;
            let record = result.map_err(|err| Error::MalformedRow {
                row,
                reason: err.to_string(),
            })?;
            let field = |column: usize| {
                record.get(column).ok_or_else(|| Error::MalformedRow {
                    row,
                    reason: format!("missing column {column}"),
                })
            };
            let date = codec::parse(field(self.format.date_column)?).map_err(|err| {
                Error::MalformedRow {
                    row,
                    reason: err.to_string(),
                }
            })?;
            let description = field(self.format.description_column)?;
            entries.insert(date, description.to_owned());
        }
        debug!(
            path = %self.path.display(),
            holidays = entries.len(),
            "read holiday file"
        );
        Ok(HolidayTable { entries })
    }

    /// Holidays falling in `[start, end]`.
    ///
    /// A missing or unreadable file yields an empty table with the
    /// [`Error::Resource`] as [`HolidayLoad::warning`].  Malformed rows are
    /// still returned as `Err`.
    pub fn load_between(&self, start: Date, end: Date) -> Result<HolidayLoad> {
        match self.read_all() {
            Ok(all) => Ok(HolidayLoad {
                table: all.restricted_to(start, end),
                warning: None,
            }),
            Err(err @ Error::Resource { .. }) => {
                warn!(%err, "holiday file unavailable, continuing without holidays");
                Ok(HolidayLoad {
                    table: HolidayTable::default(),
                    warning: Some(err),
                })
            }
            Err(err) => Err(err),
        }
    }
}

impl From<PathBuf> for HolidaySource {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for HolidaySource {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for HolidaySource {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

// ---------------------------------------------------------------------------
// HolidayTable
// ---------------------------------------------------------------------------

/// Holidays keyed by date, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayTable {
    entries: BTreeMap<Date, String>,
}

impl HolidayTable {
    /// Build a table from `(date, description)` pairs; later duplicates win.
    pub fn from_entries(entries: impl IntoIterator<Item = (Date, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The entries with dates in `[start, end]`.
    pub fn restricted_to(&self, start: Date, end: Date) -> Self {
        if start > end {
            return Self::default();
        }
        Self {
            entries: self
                .entries
                .range(start..=end)
                .map(|(d, s)| (*d, s.clone()))
                .collect(),
        }
    }

    /// Description of the holiday on `date`, if any.
    pub fn get(&self, date: Date) -> Option<&str> {
        self.entries.get(&date).map(String::as_str)
    }

    /// Return `true` if `date` is listed.
    pub fn contains(&self, date: Date) -> bool {
        self.entries.contains_key(&date)
    }

    /// Number of holidays.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if no holidays are listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(date, description)` ascending by date.
    pub fn iter(&self) -> impl Iterator<Item = (Date, &str)> + '_ {
        self.entries.iter().map(|(d, s)| (*d, s.as_str()))
    }

    /// `(dd/mm/yyyy, description)` pairs, ascending by date.
    pub fn to_text(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(d, s)| (d.to_string(), s.to_owned()))
            .collect()
    }
}

impl Calendar for HolidayTable {
    fn name(&self) -> &str {
        "Holiday Table"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.contains(date)
    }
}

/// Result of a holiday load that tolerates a missing file.
#[derive(Debug, Clone, PartialEq)]
pub struct HolidayLoad {
    /// Holidays found (empty if the file was unavailable).
    pub table: HolidayTable,
    /// The [`Error::Resource`] that caused the table to be empty, if any.
    pub warning: Option<Error>,
}

impl HolidayLoad {
    /// Return `true` if the file could not be read.
    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn write_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_rows_and_orders_by_date() {
        let file = write_file(
            b"25/12/2013;quarta-feira;Natal\n01/01/2013;ter\xe7a-feira;Confraterniza\xe7\xe3o Universal\n",
        );
        let table = HolidaySource::new(file.path()).read_all().unwrap();
        assert_eq!(table.len(), 2);
        let dates: Vec<Date> = table.iter().map(|(d, _)| d).collect();
        assert_eq!(dates, vec![date(2013, 1, 1), date(2013, 12, 25)]);
        assert_eq!(table.get(date(2013, 1, 1)), Some("Confraternização Universal"));
    }

    #[test]
    fn test_restricts_to_range() {
        let file = write_file(b"01/01/2013;x;A\n12/02/2013;x;B\n29/03/2013;x;C\n");
        let load = HolidaySource::new(file.path())
            .load_between(date(2013, 1, 2), date(2013, 3, 1))
            .unwrap();
        assert!(!load.is_degraded());
        assert_eq!(load.table.to_text(), vec![("12/02/2013".to_string(), "B".to_string())]);
    }

    #[test]
    fn test_missing_file_degrades_with_warning() {
        let source = HolidaySource::new("/definitely/not/here/feriados.csv");
        let load = source
            .load_between(date(2013, 1, 1), date(2013, 12, 31))
            .unwrap();
        assert!(load.table.is_empty());
        assert!(matches!(load.warning, Some(Error::Resource { .. })));
    }

    #[test]
    fn test_bad_date_rejects_whole_load() {
        let file = write_file(b"01/01/2013;x;A\nnot a date;x;B\n");
        let err = HolidaySource::new(file.path()).read_all().unwrap_err();
        assert!(matches!(err, Error::MalformedRow { row: 2, .. }));
    }

    #[test]
    fn test_short_row_rejects_whole_load() {
        let file = write_file(b"01/01/2013;x\n");
        let err = HolidaySource::new(file.path()).read_all().unwrap_err();
        assert!(matches!(err, Error::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn test_header_row_is_skipped_when_configured() {
        let file = write_file(b"Data;Dia da Semana;Feriado\n15/11/2013;x;Proclamacao\n");
        let source = HolidaySource::new(file.path())
            .with_format(HolidayFormat::default().with_header(true));
        let table = source.read_all().unwrap();
        assert!(table.contains(date(2013, 11, 15)));
    }

    #[test]
    fn test_table_is_a_calendar() {
        let table = HolidayTable::from_entries([(date(2013, 1, 1), "New Year".to_string())]);
        assert!(table.is_holiday(date(2013, 1, 1)));
        assert!(table.is_holiday(date(2013, 1, 5))); // Saturday
        assert!(table.is_business_day(date(2013, 1, 2)));
    }
}
