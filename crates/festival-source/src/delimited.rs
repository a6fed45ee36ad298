//! CSV reader.

use std::{fs, path::Path};

use festival_core::table::{Cell, RawTable};
use tracing::debug;

use crate::{
  Error, Result,
  encoding::{TextEncoding, decode_first},
};

/// Read a whole CSV file, trying `encodings` in order.
pub fn read_csv(path: &Path, encodings: &[TextEncoding]) -> Result<RawTable> {
  let bytes = fs::read(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })?;

  let (text, used) = decode_first(&bytes, encodings).ok_or_else(|| Error::Undecodable {
    path:  path.to_path_buf(),
    tried: encodings.iter().map(|e| e.label()).collect(),
  })?;
  debug!(path = %path.display(), encoding = used.label(), "decoded CSV");

  parse_csv(&text).map_err(|source| Error::Csv {
    path: path.to_path_buf(),
    source,
  })
}

/// Parse already-decoded CSV text. The first record is the header; blank
/// cells become `None`. Ragged rows are tolerated.
pub(crate) fn parse_csv(text: &str) -> Result<RawTable, csv::Error> {
  let mut reader = csv::ReaderBuilder::new()
    .flexible(true)
    .from_reader(text.as_bytes());

  let headers = reader
    .headers()?
    .iter()
    .map(|h| Some(h.to_string()))
    .collect();

  let mut rows = Vec::new();
  for record in reader.records() {
    rows.push(record?.iter().map(Cell::text).collect());
  }

  Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use encoding_rs::EUC_KR;

  use super::*;

  #[test]
  fn header_and_blank_cells() {
    let table = parse_csv("ID,FCLTY_NM,TEL_NO\n1,축제,\n2, ,02-123\n").unwrap();
    assert_eq!(table.headers(), ["ID", "FCLTY_NM", "TEL_NO"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0][2], None);
    assert_eq!(table.rows()[1][1], None);
    assert_eq!(table.rows()[1][2], Some(Cell::Text("02-123".into())));
  }

  #[test]
  fn quoted_fields_keep_commas_and_quotes() {
    let table = parse_csv("ID,FCLTY_NM\n1,\"O'Brien's, \"\"Fest\"\"\"\n").unwrap();
    assert_eq!(
      table.rows()[0][1],
      Some(Cell::Text("O'Brien's, \"Fest\"".into()))
    );
  }

  #[test]
  fn ragged_rows_are_padded() {
    let table = parse_csv("A,B,C\n1\n").unwrap();
    assert_eq!(table.rows()[0], vec![Some(Cell::Text("1".into())), None, None]);
  }

  #[test]
  fn reads_euc_kr_file_from_disk() {
    let (bytes, _, _) = EUC_KR.encode("ID,CTPRVN_NM\n7,충청남도\n");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();

    let table = read_csv(file.path(), &TextEncoding::DEFAULT_ORDER).unwrap();
    assert_eq!(table.rows()[0][1], Some(Cell::Text("충청남도".into())));
  }

  #[test]
  fn undecodable_file_reports_tried_encodings() {
    let (bytes, _, _) = EUC_KR.encode("ID\n충청남도\n");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();

    match read_csv(file.path(), &[TextEncoding::Utf8]).unwrap_err() {
      Error::Undecodable { tried, .. } => assert_eq!(tried, ["utf-8"]),
      other => panic!("expected Undecodable, got {other}"),
    }
  }
}
