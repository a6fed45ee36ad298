//! SQL emitter for normalised festival rows.
//!
//! Turns [`FestivalRow`]s into a MySQL script. Pure and synchronous: no
//! database connection is ever made, and idempotence is pushed to the target
//! database through guarded inserts or upserts.
//!
//! # Quick start
//!
//! ```no_run
//! use festival_sql::{EmitMode, ScriptOptions, render};
//!
//! let script = render(&[], &ScriptOptions::new(EmitMode::Guarded));
//! std::fs::write("out.sql", &script.text).unwrap();
//! ```

mod flat;
mod guarded;
pub mod literal;
pub mod schema;
mod upsert;

use std::{collections::HashSet, fmt};

use festival_core::record::{FestivalRow, unique_masters};

// ─── Public types
// ─────────────────────────────────────────────────────────────

/// How rows are turned into statements. Each mode targets one stage of the
/// table layout's evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
  /// `INSERT ... SELECT ... WHERE NOT EXISTS` against the existing schema,
  /// wrapped in a transaction. Undated events are kept with NULL dates.
  Guarded,
  /// `INSERT ... ON DUPLICATE KEY UPDATE` on the master plus a plain event
  /// insert. Undated events are skipped.
  Upsert,
  /// One unguarded insert per row into the legacy `festival` table.
  Flat,
}

impl EmitMode {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Guarded => "guarded",
      Self::Upsert => "upsert",
      Self::Flat => "flat",
    }
  }

  /// DDL for this mode's tables.
  pub fn schema(self) -> &'static str {
    match self {
      Self::Guarded => schema::GUARDED_SCHEMA,
      Self::Upsert => schema::UPSERT_SCHEMA,
      Self::Flat => schema::FLAT_SCHEMA,
    }
  }
}

impl fmt::Display for EmitMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Options for [`render`].
#[derive(Debug, Clone)]
pub struct ScriptOptions {
  pub mode:        EmitMode,
  /// Prepend [`EmitMode::schema`] to the data statements.
  pub include_ddl: bool,
}

impl ScriptOptions {
  pub fn new(mode: EmitMode) -> Self {
    Self {
      mode,
      include_ddl: false,
    }
  }
}

/// A rendered script and what went into it.
#[derive(Debug, Clone)]
pub struct Script {
  pub text:    String,
  /// Master insert/upsert statements emitted.
  pub masters: usize,
  /// Event (or flat) insert statements emitted.
  pub events:  usize,
  /// Rows left out by the mode's policy.
  pub skipped: usize,
}

// ─── Public API
// ───────────────────────────────────────────────────────────────

/// Render `rows` as a complete SQL script.
pub fn render(rows: &[FestivalRow], opts: &ScriptOptions) -> Script {
  let ddl = opts.include_ddl.then(|| opts.mode.schema());
  let script = match opts.mode {
    EmitMode::Guarded => render_guarded(rows, ddl),
    EmitMode::Upsert => render_upsert(rows, ddl),
    EmitMode::Flat => render_flat(rows, ddl),
  };
  tracing::debug!(
    mode = %opts.mode,
    masters = script.masters,
    events = script.events,
    skipped = script.skipped,
    "rendered script"
  );
  script
}

fn render_guarded(rows: &[FestivalRow], ddl: Option<&str>) -> Script {
  let masters = unique_masters(rows);
  let mut out = String::new();

  out.push_str("-- festival_master / festival_event import [existence-guarded]\n");
  if let Some(ddl) = ddl {
    out.push_str(ddl);
    out.push('\n');
  }
  out.push_str("SET NAMES utf8mb4;\n");
  out.push_str("START TRANSACTION;\n\n");

  out.push_str("-- 1) master insert (skip if (fstvl_nm, ctprvn_nm, signgu_nm) exists)\n");
  for m in &masters {
    out.push_str(&guarded::master_insert(m));
    out.push_str("\n\n");
  }

  out.push_str("-- 2) event insert (skip if raw_id exists)\n");
  for row in rows {
    out.push_str(&guarded::event_insert(&row.event));
    out.push_str("\n\n");
  }

  out.push_str("COMMIT;\n");

  Script {
    text:    out,
    masters: masters.len(),
    events:  rows.len(),
    skipped: 0,
  }
}

fn render_upsert(rows: &[FestivalRow], ddl: Option<&str>) -> Script {
  let mut statements = Vec::new();
  let mut seen = HashSet::new();
  let (mut masters, mut events, mut skipped) = (0, 0, 0);

  for row in rows {
    if !row.event.is_dated() {
      tracing::debug!(raw_id = %row.event.raw_id, "no start/end date; skipped");
      skipped += 1;
      continue;
    }
    if seen.insert(&row.master.key) {
      statements.push(upsert::master_upsert(&row.master));
      masters += 1;
    }
    statements.push(upsert::event_insert(&row.event));
    events += 1;
  }

  let mut out = String::new();
  if let Some(ddl) = ddl {
    out.push_str(ddl);
    out.push('\n');
  }
  out.push_str("-- ===== INSERTS =====\n");
  out.push_str(&statements.join("\n"));

  Script {
    text: out,
    masters,
    events,
    skipped,
  }
}

fn render_flat(rows: &[FestivalRow], ddl: Option<&str>) -> Script {
  let mut out = String::new();
  out.push_str("-- festival import [legacy single table]\n");
  if let Some(ddl) = ddl {
    out.push_str(ddl);
    out.push('\n');
  }
  for row in rows {
    out.push_str(&flat::festival_insert(row));
    out.push('\n');
  }

  Script {
    text:    out,
    masters: 0,
    events:  rows.len(),
    skipped: 0,
  }
}
