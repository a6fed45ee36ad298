//! Error types for `festival-core`.

use thiserror::Error;

/// A canonical field that could not be resolved against a table's headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
  pub field:      &'static str,
  pub candidates: Vec<&'static str>,
}

impl std::fmt::Display for MissingField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} (tried {:?})", self.field, self.candidates)
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{context}: required columns missing: {}", join_missing(.missing))]
  MissingColumns {
    context: String,
    missing: Vec<MissingField>,
  },
}

fn join_missing(missing: &[MissingField]) -> String {
  missing
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
