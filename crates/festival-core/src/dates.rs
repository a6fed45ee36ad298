//! Date normalisation for the two shapes found in the source exports.
//!
//! - KC_488 CSVs carry dates as a single value (`20200131`, `2020-01-31`,
//!   `2020.01.31`). These are parsed strictly.
//! - The MCST workbook splits dates into year / month / day columns. These are
//!   passed through without calendar validation; the database rejects
//!   impossible dates on insert.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::table::Cell;

/// A normalised festival date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FestivalDate {
  /// A validated calendar date.
  Exact(NaiveDate),
  /// A year/month/day triple taken verbatim from split columns.
  Unchecked { year: i64, month: i64, day: i64 },
}

impl FestivalDate {
  pub fn year(&self) -> i64 {
    match self {
      Self::Exact(d) => i64::from(d.year()),
      Self::Unchecked { year, .. } => *year,
    }
  }
}

impl fmt::Display for FestivalDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Exact(d) => write!(f, "{}", d.format("%Y-%m-%d")),
      Self::Unchecked { year, month, day } => {
        write!(f, "{year:04}-{month:02}-{day:02}")
      }
    }
  }
}

/// Parse a single-value date by its digits.
///
/// Non-digit characters are discarded; if at least eight digits remain the
/// first eight are read as `YYYYMMDD`. Fewer digits or an impossible calendar
/// date yield `None`.
pub fn parse_digits(cell: &Cell) -> Option<FestivalDate> {
  let digits: String = cell
    .as_text()
    .chars()
    .filter(char::is_ascii_digit)
    .collect();
  if digits.len() < 8 {
    return None;
  }
  NaiveDate::parse_from_str(&digits[..8], "%Y%m%d")
    .ok()
    .map(FestivalDate::Exact)
}

/// Build a date from split year / month / day values.
///
/// Year and month are mandatory; a missing day means the 1st. Values that do
/// not read as integers count as missing.
pub fn from_triple(
  year: Option<&Cell>,
  month: Option<&Cell>,
  day: Option<&Cell>,
) -> Option<FestivalDate> {
  let year = year.and_then(Cell::as_i64)?;
  let month = month.and_then(Cell::as_i64)?;
  let day = day.and_then(Cell::as_i64).unwrap_or(1);
  Some(FestivalDate::Unchecked { year, month, day })
}
