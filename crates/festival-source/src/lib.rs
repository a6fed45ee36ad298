//! File readers for festival source data.
//!
//! Loads a CSV export or a spreadsheet into a [`RawTable`]. Headers and cells
//! are kept as the file has them (trimmed, blanks as `None`); mapping them to
//! festival fields is `festival-core`'s job.

mod delimited;
mod workbook;

pub mod encoding;
pub mod error;

use std::path::Path;

pub use delimited::read_csv;
pub use encoding::TextEncoding;
pub use error::{Error, Result};
use festival_core::table::RawTable;
pub use workbook::read_workbook;

/// Sheet holding the survey in the ministry's annual workbook.
pub const DEFAULT_SHEET: &str = "조사표";

/// Header row (0-based, below the sheet's title block) in that sheet.
pub const DEFAULT_HEADER_ROW: u32 = 4;

/// Reader settings shared by every input of a run.
#[derive(Debug, Clone)]
pub struct SourceOptions {
  /// Tried in order for CSV input.
  pub encodings:  Vec<TextEncoding>,
  /// Worksheet to read from spreadsheet input.
  pub sheet_name: String,
  pub header_row: u32,
}

impl Default for SourceOptions {
  fn default() -> Self {
    Self {
      encodings:  TextEncoding::DEFAULT_ORDER.to_vec(),
      sheet_name: DEFAULT_SHEET.to_string(),
      header_row: DEFAULT_HEADER_ROW,
    }
  }
}

/// The reader an input is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
  Delimited,
  Workbook,
}

/// Classify `path` by its extension (case-insensitive).
pub fn kind_of(path: &Path) -> Result<SourceKind> {
  let ext = path
    .extension()
    .map(|e| e.to_string_lossy().to_ascii_lowercase());

  match ext.as_deref() {
    Some("csv") => Ok(SourceKind::Delimited),
    Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(SourceKind::Workbook),
    _ => Err(Error::UnsupportedExtension(path.to_path_buf())),
  }
}

/// Load `path` with the reader its extension calls for.
pub fn load(path: &Path, opts: &SourceOptions) -> Result<RawTable> {
  let table = match kind_of(path)? {
    SourceKind::Delimited => read_csv(path, &opts.encodings)?,
    SourceKind::Workbook => read_workbook(path, &opts.sheet_name, opts.header_row)?,
  };
  tracing::info!(path = %path.display(), rows = table.len(), "loaded source");
  Ok(table)
}
