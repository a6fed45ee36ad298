//! Raw tabular input: the boundary between file readers and normalisation.
//!
//! Readers (`festival-source`) decide what a blank cell is; by the time a
//! value lands in a [`RawTable`] it is either a non-blank [`Cell`] or `None`.
//! Nothing downstream ever sees a NaN or a whitespace-only string.

use std::collections::HashMap;

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A single non-blank source value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
  Text(String),
  Number(f64),
}

impl Cell {
  /// Build a text cell, returning `None` for blank input.
  pub fn text(s: impl AsRef<str>) -> Option<Self> {
    let s = s.as_ref().trim();
    if s.is_empty() { None } else { Some(Self::Text(s.to_string())) }
  }

  /// Build a numeric cell, returning `None` for NaN/infinite values.
  pub fn number(n: f64) -> Option<Self> {
    n.is_finite().then_some(Self::Number(n))
  }

  /// Render the cell as trimmed text. Integral numbers lose their `.0`, so a
  /// spreadsheet id of `17.0` reads as `"17"`.
  pub fn as_text(&self) -> String {
    match self {
      Self::Text(s) => s.trim().to_string(),
      Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
        format!("{}", *n as i64)
      }
      Self::Number(n) => n.to_string(),
    }
  }

  /// Interpret the cell as a float; text is parsed after trimming.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Self::Number(n) => Some(*n),
      Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
    }
  }

  /// Interpret the cell as an integer, truncating integral floats
  /// (`"2025"`, `"2025.0"` and `2025.0` all give `2025`).
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Self::Number(n) => (n.fract() == 0.0).then_some(*n as i64),
      Self::Text(s) => {
        let s = s.trim();
        s.parse::<i64>().ok().or_else(|| {
          s.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && n.fract() == 0.0)
            .map(|n| n as i64)
        })
      }
    }
  }
}

// ─── RawTable ────────────────────────────────────────────────────────────────

/// One row of a [`RawTable`]; cells are positionally aligned with headers.
pub type RawRow = Vec<Option<Cell>>;

/// Header labels plus rows, as read from a CSV file or a worksheet.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
  headers: Vec<String>,
  index:   HashMap<String, usize>,
  rows:    Vec<RawRow>,
}

impl RawTable {
  /// Build a table from raw header labels and rows.
  ///
  /// Header labels are trimmed and stripped of a UTF-8 BOM. Blank labels are
  /// named `Unnamed: {position}` and repeated labels get a `.{n}` suffix, so
  /// every column is addressable by exactly one label. Rows are padded or
  /// truncated to the header width.
  pub fn new(raw_headers: Vec<Option<String>>, rows: Vec<RawRow>) -> Self {
    let mut headers = Vec::with_capacity(raw_headers.len());
    let mut index = HashMap::with_capacity(raw_headers.len());

    for (pos, raw) in raw_headers.into_iter().enumerate() {
      let label = raw
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| format!("Unnamed: {pos}"));

      let mut unique = label.clone();
      let mut n = 1;
      while index.contains_key(&unique) {
        unique = format!("{label}.{n}");
        n += 1;
      }
      index.insert(unique.clone(), pos);
      headers.push(unique);
    }

    let width = headers.len();
    let rows = rows
      .into_iter()
      .map(|mut row| {
        row.resize(width, None);
        row
      })
      .collect();

    Self { headers, index, rows }
  }

  pub fn headers(&self) -> &[String] { &self.headers }

  pub fn rows(&self) -> &[RawRow] { &self.rows }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Position of the column labelled exactly `label`.
  pub fn column(&self, label: &str) -> Option<usize> {
    self.index.get(label).copied()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn hdr(labels: &[&str]) -> Vec<Option<String>> {
    labels
      .iter()
      .map(|l| (!l.is_empty()).then(|| l.to_string()))
      .collect()
  }

  #[test]
  fn blank_headers_become_unnamed_by_position() {
    let t = RawTable::new(hdr(&["연번", "", "축제명", ""]), vec![]);
    assert_eq!(t.headers(), ["연번", "Unnamed: 1", "축제명", "Unnamed: 3"]);
    assert_eq!(t.column("Unnamed: 3"), Some(3));
  }

  #[test]
  fn duplicate_headers_are_suffixed() {
    let t = RawTable::new(hdr(&["A", "A", "B", "A"]), vec![]);
    assert_eq!(t.headers(), ["A", "A.1", "B", "A.2"]);
  }

  #[test]
  fn bom_and_whitespace_are_stripped_from_headers() {
    let t = RawTable::new(hdr(&["\u{feff}ID", " FCLTY_NM "]), vec![]);
    assert_eq!(t.column("ID"), Some(0));
    assert_eq!(t.column("FCLTY_NM"), Some(1));
  }

  #[test]
  fn short_rows_are_padded() {
    let t = RawTable::new(hdr(&["A", "B", "C"]), vec![vec![Cell::text("x")]]);
    assert_eq!(t.rows()[0].len(), 3);
    assert_eq!(t.rows()[0][2], None);
  }

  #[test]
  fn cell_constructors_reject_blank_and_nan() {
    assert_eq!(Cell::text("   "), None);
    assert_eq!(Cell::number(f64::NAN), None);
    assert_eq!(Cell::text(" a "), Some(Cell::Text("a".into())));
  }

  #[test]
  fn integral_numbers_render_without_fraction() {
    assert_eq!(Cell::Number(17.0).as_text(), "17");
    assert_eq!(Cell::Number(20200131.0).as_text(), "20200131");
    assert_eq!(Cell::Number(127.5).as_text(), "127.5");
  }

  #[test]
  fn integer_coercion() {
    assert_eq!(Cell::Number(2025.0).as_i64(), Some(2025));
    assert_eq!(Cell::Text("2025.0".into()).as_i64(), Some(2025));
    assert_eq!(Cell::Text(" 3 ".into()).as_i64(), Some(3));
    assert_eq!(Cell::Number(3.5).as_i64(), None);
    assert_eq!(Cell::Text("미정".into()).as_i64(), None);
  }
}
