//! One import run: read every input, normalise, render, write the script.

use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use festival_core::{
  columns::{KC488, Layout, MCST_2025, STAGED},
  normalize::{Normalized, normalize},
  record::retain_keyed,
};
use festival_source::{SourceKind, SourceOptions, kind_of};
use festival_sql::{ScriptOptions, render};
use tracing::info;

use crate::settings::ImportConfig;

/// Which source family the inputs belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
  /// Yearly KC_488 CSV exports.
  Kc488,
  /// The MCST plan: the `조사표` workbook, or a CSV already in canonical
  /// columns.
  Mcst,
}

impl Dataset {
  fn layout(self, kind: SourceKind) -> &'static Layout {
    match (self, kind) {
      (Self::Kc488, _) => &KC488,
      (Self::Mcst, SourceKind::Workbook) => &MCST_2025,
      (Self::Mcst, SourceKind::Delimited) => &STAGED,
    }
  }
}

#[derive(Debug, Clone)]
pub struct ConvertRequest {
  pub dataset: Dataset,
  pub inputs:  Vec<PathBuf>,
  pub out:     PathBuf,
  pub script:  ScriptOptions,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
  pub rows:         usize,
  /// Sheet rows without a usable sequence number.
  pub unidentified: usize,
  /// Rows dropped for a blank name, province or district.
  pub unkeyed:      usize,
  pub masters:      usize,
  pub events:       usize,
  /// Rows the emission mode left out.
  pub skipped:      usize,
}

pub fn run(req: &ConvertRequest, cfg: &ImportConfig) -> anyhow::Result<Summary> {
  let source = cfg.source_options();

  let mut rows = Vec::new();
  let mut unidentified = 0;
  for path in &req.inputs {
    let input = read_input(req.dataset, path, &source, cfg)?;
    unidentified += input.unidentified;
    rows.extend(input.rows);
  }
  let total = rows.len();
  let unkeyed = retain_keyed(&mut rows);

  let script = render(&rows, &req.script);
  write_script(&req.out, &script.text)?;

  let summary = Summary {
    rows: total,
    unidentified,
    unkeyed,
    masters: script.masters,
    events: script.events,
    skipped: script.skipped,
  };
  info!(
    out = %req.out.display(),
    mode = %req.script.mode,
    rows = summary.rows,
    unidentified = summary.unidentified,
    unkeyed = summary.unkeyed,
    masters = summary.masters,
    events = summary.events,
    skipped = summary.skipped,
    "wrote SQL script"
  );
  Ok(summary)
}

fn read_input(
  dataset: Dataset,
  path: &Path,
  source: &SourceOptions,
  cfg: &ImportConfig,
) -> anyhow::Result<Normalized> {
  let kind = kind_of(path)?;
  let layout = dataset.layout(kind);
  let provenance = match dataset {
    Dataset::Kc488 => cfg.kc488.provenance(layout),
    Dataset::Mcst => cfg.mcst.provenance(layout),
  }
  .for_path(path);

  let table = festival_source::load(path, source)
    .with_context(|| format!("failed to load {}", path.display()))?;

  let context = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.display().to_string());
  let normalized = normalize(&table, layout, &provenance, &context)?;

  info!(
    input = %context,
    layout = layout.name,
    rows = normalized.rows.len(),
    "normalised input"
  );
  Ok(normalized)
}

fn write_script(out: &Path, text: &str) -> anyhow::Result<()> {
  if let Some(dir) = out.parent()
    && !dir.as_os_str().is_empty()
  {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
  }
  fs::write(out, text).with_context(|| format!("failed to write {}", out.display()))
}
