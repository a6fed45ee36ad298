//! Deterministic natural keys for event records.
//!
//! A `raw_id` embeds the source dataset (prefix) and either a year plus the
//! source's own row id, or a per-sheet sequence number. Re-running the
//! generator over the same inputs reproduces the same ids byte for byte, which
//! is what makes the emitted "skip if raw_id exists" guards idempotent.

use std::{fmt, path::Path, sync::LazyLock};

use regex::Regex;

use crate::dates::FestivalDate;

static YEAR_TOKEN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(19|20)\d{2}").expect("static regex"));

// ─── RawId ───────────────────────────────────────────────────────────────────

/// The natural key of a `festival_event` row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawId(String);

impl RawId {
  /// `{prefix}-{year}-{source_id}`; used when rows carry their own ids.
  pub fn scoped(prefix: &str, year: i64, source_id: &str) -> Self {
    Self(format!("{prefix}-{year}-{source_id}"))
  }

  /// `{prefix}-{seq:04}`; used when rows are only numbered within a sheet.
  pub fn sequenced(prefix: &str, seq: i64) -> Self {
    Self(format!("{prefix}-{seq:04}"))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for RawId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Year scoping ────────────────────────────────────────────────────────────

/// Find a `19xx`/`20xx` token in the file name, falling back to the parent
/// directory path.
pub fn year_from_path(path: &Path) -> Option<i64> {
  let name = path.file_name().map(|n| n.to_string_lossy());
  let parent = path.parent().map(|p| p.to_string_lossy());

  [name, parent]
    .into_iter()
    .flatten()
    .find_map(|s| YEAR_TOKEN.find(&s).and_then(|m| m.as_str().parse().ok()))
}

/// Pick the scoping year: the file's year, else the start date's year, else 0.
pub fn resolve_year(path_year: Option<i64>, start: Option<&FestivalDate>) -> i64 {
  path_year
    .or_else(|| start.map(FestivalDate::year))
    .unwrap_or(0)
}

// ─── Provenance ──────────────────────────────────────────────────────────────

/// Per-input scoping passed into normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
  /// Prefix for generated `raw_id`s (e.g. `KC488`).
  pub id_prefix:   String,
  /// Value written to `origin_nm` when the row does not name its own origin.
  pub origin_name: String,
  /// Year detected from the input path, if any.
  pub path_year:   Option<i64>,
}

impl Provenance {
  pub fn new(id_prefix: impl Into<String>, origin_name: impl Into<String>) -> Self {
    Self {
      id_prefix:   id_prefix.into(),
      origin_name: origin_name.into(),
      path_year:   None,
    }
  }

  /// Attach the year found in `path`, if any.
  pub fn for_path(mut self, path: &Path) -> Self {
    self.path_year = year_from_path(path);
    self
  }
}
