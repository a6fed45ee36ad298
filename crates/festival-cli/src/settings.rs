//! Layered import configuration: defaults, then an optional TOML file, then
//! `FESTIVAL_*` environment variables.

use std::path::Path;

use anyhow::Context as _;
use festival_core::{columns::Layout, identity::Provenance};
use festival_source::{DEFAULT_HEADER_ROW, DEFAULT_SHEET, SourceOptions, TextEncoding};
use serde::Deserialize;

/// Settings shared by every import run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
  /// Encodings tried, in order, for CSV input.
  pub encodings:  Vec<TextEncoding>,
  pub sheet_name: String,
  /// 0-based header row in the workbook sheet.
  pub header_row: u32,
  pub kc488:      ProvenanceConfig,
  pub mcst:       ProvenanceConfig,
}

impl Default for ImportConfig {
  fn default() -> Self {
    Self {
      encodings:  TextEncoding::DEFAULT_ORDER.to_vec(),
      sheet_name: DEFAULT_SHEET.to_string(),
      header_row: DEFAULT_HEADER_ROW,
      kc488:      ProvenanceConfig::default(),
      mcst:       ProvenanceConfig::default(),
    }
  }
}

/// Overrides for one dataset's id prefix and origin name. Unset values fall
/// back to the layout's own.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProvenanceConfig {
  pub id_prefix:   Option<String>,
  pub origin_name: Option<String>,
}

impl ProvenanceConfig {
  pub fn provenance(&self, layout: &Layout) -> Provenance {
    Provenance::new(
      self.id_prefix.as_deref().unwrap_or(layout.default_prefix),
      self.origin_name.as_deref().unwrap_or(layout.default_origin),
    )
  }
}

impl ImportConfig {
  /// Build the configuration from `file` (if given) and the environment.
  pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path).required(true));
    }

    builder
      .add_source(
        config::Environment::with_prefix("FESTIVAL")
          .prefix_separator("_")
          .separator("__")
          .list_separator(",")
          .with_list_parse_key("encodings")
          .try_parsing(true),
      )
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise ImportConfig")
  }

  pub fn source_options(&self) -> SourceOptions {
    SourceOptions {
      encodings:  self.encodings.clone(),
      sheet_name: self.sheet_name.clone(),
      header_row: self.header_row,
    }
  }
}
