//! Spreadsheet reader (xlsx, xlsm, xlsb, xls, ods via calamine).

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use festival_core::table::{Cell, RawTable};
use tracing::debug;

use crate::{Error, Result};

/// Read `sheet` from the workbook at `path`, taking the header from
/// `header_row` (0-based, counted from row 1 of the sheet) and the data from
/// every row below it.
pub fn read_workbook(path: &Path, sheet: &str, header_row: u32) -> Result<RawTable> {
  let mut workbook = open_workbook_auto(path).map_err(|source| Error::Workbook {
    path: path.to_path_buf(),
    source,
  })?;

  let available = workbook.sheet_names().to_vec();
  if !available.iter().any(|s| s == sheet) {
    return Err(Error::SheetNotFound {
      path: path.to_path_buf(),
      sheet: sheet.to_string(),
      available,
    });
  }

  let range = workbook
    .worksheet_range(sheet)
    .map_err(|source| Error::Workbook {
      path: path.to_path_buf(),
      source,
    })?;
  debug!(path = %path.display(), sheet, size = ?range.get_size(), "read worksheet");

  table_from_range(&range, header_row).ok_or_else(|| Error::HeaderRowOutOfRange {
    path:  path.to_path_buf(),
    sheet: sheet.to_string(),
    row:   header_row,
  })
}

/// Slice a worksheet range into a [`RawTable`]. `None` if the sheet is empty
/// or ends before `header_row`.
///
/// calamine trims leading empty rows and columns from the range; both are
/// put back so header positions (and `Unnamed: N` labels) match the sheet.
pub(crate) fn table_from_range(range: &Range<Data>, header_row: u32) -> Option<RawTable> {
  let (first_row, first_col) = range.start()?;
  let pad = first_col as usize;
  let mut rows = range.rows();

  let headers = if header_row < first_row {
    // Header row is blank, so every row of the range is data.
    vec![None; pad + range.width()]
  } else {
    let header = rows.nth((header_row - first_row) as usize)?;
    std::iter::repeat_n(None, pad)
      .chain(header.iter().map(|d| to_cell(d).map(|c| c.as_text())))
      .collect()
  };
  let body = rows
    .map(|r| {
      std::iter::repeat_n(None, pad)
        .chain(r.iter().map(to_cell))
        .collect()
    })
    .collect();

  Some(RawTable::new(headers, body))
}

fn to_cell(data: &Data) -> Option<Cell> {
  match data {
    Data::Empty | Data::Error(_) => None,
    Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s),
    Data::Float(f) => Cell::number(*f),
    Data::Int(i) => Cell::number(*i as f64),
    Data::Bool(b) => Cell::text(b.to_string()),
    Data::DateTime(dt) => Cell::number(dt.as_f64()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn s(v: &str) -> Data { Data::String(v.to_string()) }

  /// A miniature `조사표`: four title rows, a header with a merged date block
  /// (blank cells to the right of `개최기간`), two data rows and a footnote.
  fn survey_sheet() -> Range<Data> {
    let mut range = Range::new((0, 0), (7, 6));
    range.set_value((0, 0), s("2025년 지역축제 개최계획 현황"));
    range.set_value((4, 0), s("연번"));
    range.set_value((4, 1), s("축제명"));
    range.set_value((4, 2), s("개최기간"));
    range.set_value((4, 6), s("축제 개요"));

    range.set_value((5, 0), Data::Float(1.0));
    range.set_value((5, 1), s("진해군항제"));
    range.set_value((5, 2), Data::Float(2025.0));
    range.set_value((5, 3), Data::Float(3.0));
    range.set_value((5, 4), Data::Int(28));
    range.set_value((5, 6), s("  벚꽃  "));

    range.set_value((6, 0), Data::Float(2.0));
    range.set_value((6, 1), s("보령머드축제"));

    range.set_value((7, 1), s("※ 자료: 각 지자체"));
    range
  }

  #[test]
  fn header_offset_and_unnamed_columns() {
    let table = table_from_range(&survey_sheet(), 4).unwrap();
    assert_eq!(table.headers(), [
      "연번",
      "축제명",
      "개최기간",
      "Unnamed: 3",
      "Unnamed: 4",
      "Unnamed: 5",
      "축제 개요",
    ]);
    assert_eq!(table.len(), 3);
  }

  #[test]
  fn cells_are_typed_and_trimmed() {
    let table = table_from_range(&survey_sheet(), 4).unwrap();
    let row = &table.rows()[0];
    assert_eq!(row[0], Some(Cell::Number(1.0)));
    assert_eq!(row[4], Some(Cell::Number(28.0)));
    assert_eq!(row[5], None);
    assert_eq!(row[6], Some(Cell::Text("벚꽃".into())));
  }

  #[test]
  fn footnote_rows_have_no_sequence() {
    let table = table_from_range(&survey_sheet(), 4).unwrap();
    assert_eq!(table.rows()[2][0], None);
  }

  #[test]
  fn leading_blank_column_keeps_sheet_positions() {
    // Column A is empty, so calamine's range starts at B1.
    let mut range = Range::new((0, 1), (5, 4));
    range.set_value((4, 1), s("연번"));
    range.set_value((4, 2), s("개최기간"));
    range.set_value((4, 4), s("x"));
    range.set_value((5, 1), Data::Float(1.0));
    range.set_value((5, 3), Data::Float(4.0));

    let table = table_from_range(&range, 4).unwrap();
    assert_eq!(table.headers(), ["Unnamed: 0", "연번", "개최기간", "Unnamed: 3", "x"]);
    assert_eq!(table.rows()[0][1], Some(Cell::Number(1.0)));
    assert_eq!(table.rows()[0][3], Some(Cell::Number(4.0)));
  }

  #[test]
  fn leading_blank_rows_count_toward_header_row() {
    // Rows 1-2 are empty, so the range starts at A3.
    let mut range = Range::new((2, 0), (5, 1));
    range.set_value((2, 0), s("제목"));
    range.set_value((4, 0), s("연번"));
    range.set_value((4, 1), s("축제명"));
    range.set_value((5, 0), Data::Float(1.0));
    range.set_value((5, 1), s("강릉단오제"));

    let table = table_from_range(&range, 4).unwrap();
    assert_eq!(table.headers(), ["연번", "축제명"]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0][1], Some(Cell::Text("강릉단오제".into())));
  }

  #[test]
  fn header_row_past_end_is_none() {
    assert!(table_from_range(&survey_sheet(), 8).is_none());
  }

  #[test]
  fn error_cells_are_blank() {
    assert_eq!(to_cell(&Data::Error(calamine::CellErrorType::NA)), None);
    assert_eq!(to_cell(&Data::Bool(true)), Some(Cell::Text("true".into())));
  }
}
