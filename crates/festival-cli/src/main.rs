//! `festival-sql`: turn festival source files into a MySQL import script.
//!
//! # Usage
//!
//! ```
//! festival-sql kc488 --input data/KC_488_WNTY_CLTFSTVL_2020.csv data/KC_488_WNTY_CLTFSTVL_2021.csv \
//!   --out sql/kc488.sql
//! festival-sql mcst --input data/2025_plan.xlsx --out sql/mcst_2025.sql --include-ddl
//! festival-sql --config festival.toml mcst --input data/2025_plan.xlsx --out sql/mcst.sql --mode guarded
//! ```

mod convert;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use convert::{ConvertRequest, Dataset};
use festival_sql::{EmitMode, ScriptOptions};
use settings::ImportConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "festival-sql", version, about = "Generate MySQL import scripts for festival data")]
struct Cli {
  /// Path to a TOML config file (encodings, sheet_name, header_row, ...).
  #[arg(short, long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Yearly KC_488 CSV exports. The year in each file name scopes its ids.
  Kc488 {
    #[arg(long = "input", value_name = "CSV", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    #[arg(long, value_name = "FILE")]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = ModeArg::Guarded)]
    mode: ModeArg,

    /// Prepend the CREATE TABLE statements for the chosen mode.
    #[arg(long)]
    include_ddl: bool,
  },

  /// The MCST festival plan workbook, or a CSV already in canonical columns.
  Mcst {
    #[arg(long, value_name = "XLSX|CSV")]
    input: PathBuf,

    #[arg(long, value_name = "FILE")]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = ModeArg::Upsert)]
    mode: ModeArg,

    /// Prepend the DDL for the chosen mode (upsert drops and recreates).
    #[arg(long)]
    include_ddl: bool,

    /// Worksheet name (overrides config).
    #[arg(long)]
    sheet: Option<String>,

    /// 0-based header row, counted from the top of the sheet (overrides config).
    #[arg(long)]
    header_row: Option<u32>,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
  Guarded,
  Upsert,
  Flat,
}

impl From<ModeArg> for EmitMode {
  fn from(m: ModeArg) -> Self {
    match m {
      ModeArg::Guarded => EmitMode::Guarded,
      ModeArg::Upsert => EmitMode::Upsert,
      ModeArg::Flat => EmitMode::Flat,
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let mut cfg = ImportConfig::load(cli.config.as_deref())?;

  let request = match cli.command {
    Command::Kc488 {
      inputs,
      out,
      mode,
      include_ddl,
    } => ConvertRequest {
      dataset: Dataset::Kc488,
      inputs,
      out,
      script: ScriptOptions {
        mode: mode.into(),
        include_ddl,
      },
    },
    Command::Mcst {
      input,
      out,
      mode,
      include_ddl,
      sheet,
      header_row,
    } => {
      if let Some(sheet) = sheet {
        cfg.sheet_name = sheet;
      }
      if let Some(row) = header_row {
        cfg.header_row = row;
      }
      ConvertRequest {
        dataset: Dataset::Mcst,
        inputs: vec![input],
        out,
        script: ScriptOptions {
          mode: mode.into(),
          include_ddl,
        },
      }
    }
  };

  let summary = convert::run(&request, &cfg)
    .with_context(|| format!("failed to generate {}", request.out.display()))?;
  println!(
    "{}: {} masters, {} events ({} rows skipped, {} without a key, {} without an id)",
    request.out.display(),
    summary.masters,
    summary.events,
    summary.skipped,
    summary.unkeyed,
    summary.unidentified,
  );
  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn cli_definition_is_valid() { Cli::command().debug_assert(); }

  #[test]
  fn kc488_defaults_to_guarded() {
    let cli = Cli::parse_from(["festival-sql", "kc488", "--input", "a.csv", "b.csv", "--out", "o.sql"]);
    let Command::Kc488 { inputs, mode, .. } = cli.command else {
      panic!("expected kc488");
    };
    assert_eq!(inputs.len(), 2);
    assert_eq!(EmitMode::from(mode), EmitMode::Guarded);
  }

  #[test]
  fn mcst_defaults_to_upsert_and_takes_overrides() {
    let cli = Cli::parse_from([
      "festival-sql",
      "mcst",
      "--input",
      "plan.xlsx",
      "--out",
      "o.sql",
      "--sheet",
      "Sheet1",
      "--header-row",
      "0",
      "--config",
      "festival.toml",
    ]);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("festival.toml")));
    let Command::Mcst {
      mode,
      sheet,
      header_row,
      ..
    } = cli.command
    else {
      panic!("expected mcst");
    };
    assert_eq!(EmitMode::from(mode), EmitMode::Upsert);
    assert_eq!(sheet.as_deref(), Some("Sheet1"));
    assert_eq!(header_row, Some(0));
  }
}
