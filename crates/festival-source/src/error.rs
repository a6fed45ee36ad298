//! Error type for `festival-source`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("{} is not decodable as any of {tried:?}", .path.display())]
  Undecodable {
    path:  PathBuf,
    tried: Vec<&'static str>,
  },

  #[error("malformed CSV in {}: {source}", .path.display())]
  Csv {
    path:   PathBuf,
    source: csv::Error,
  },

  #[error("cannot open workbook {}: {source}", .path.display())]
  Workbook {
    path:   PathBuf,
    source: calamine::Error,
  },

  #[error("{}: sheet {sheet:?} not found (available: {available:?})", .path.display())]
  SheetNotFound {
    path:      PathBuf,
    sheet:     String,
    available: Vec<String>,
  },

  #[error("{}: header row {row} is past the end of sheet {sheet:?}", .path.display())]
  HeaderRowOutOfRange {
    path:  PathBuf,
    sheet: String,
    row:   u32,
  },

  #[error("unsupported input type: {} (expected .csv, .xlsx, .xlsm, .xlsb, .xls or .ods)", .0.display())]
  UnsupportedExtension(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
