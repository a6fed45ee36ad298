//! SQL literal rendering.
//!
//! Every value reaches the statement templates through one of these helpers,
//! so templates never interpolate raw source text.

use festival_core::dates::FestivalDate;

/// Trim and double embedded single quotes.
pub fn escape(s: &str) -> String { s.trim().replace('\'', "''") }

/// A quoted, escaped string literal. Absent text is `''`, never `NULL`.
pub fn text(s: &str) -> String { format!("'{}'", escape(s)) }

/// A floating-point literal, or `NULL` for absent / non-finite values.
///
/// Uses the shortest round-trip representation, keeping a trailing `.0` on
/// integral values (`127.0`).
pub fn number(v: Option<f64>) -> String {
  match v {
    Some(n) if n.is_finite() => format!("{n:?}"),
    _ => "NULL".to_string(),
  }
}

/// An integer literal, or `NULL`.
pub fn integer(v: Option<i64>) -> String {
  v.map_or_else(|| "NULL".to_string(), |n| n.to_string())
}

/// A quoted `YYYY-MM-DD` literal, or `NULL`.
pub fn date(d: Option<&FestivalDate>) -> String {
  d.map_or_else(|| "NULL".to_string(), |d| format!("'{d}'"))
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  #[test]
  fn quotes_are_doubled() {
    assert_eq!(escape("O'Brien's Fest"), "O''Brien''s Fest");
    assert_eq!(text("O'Brien's Fest"), "'O''Brien''s Fest'");
  }

  #[test]
  fn escaped_literal_round_trips() {
    // Reading a quoted literal back: strip the outer quotes, collapse ''.
    let lit = text("it's 'quoted'");
    let inner = &lit[1..lit.len() - 1];
    assert_eq!(inner.replace("''", "'"), "it's 'quoted'");
    assert!(!inner.replace("''", "").contains('\''));
  }

  #[test]
  fn text_is_trimmed_and_blank_is_empty_string() {
    assert_eq!(text("  종로구 "), "'종로구'");
    assert_eq!(text(""), "''");
  }

  #[test]
  fn numbers() {
    assert_eq!(number(Some(126.9784)), "126.9784");
    assert_eq!(number(Some(127.0)), "127.0");
    assert_eq!(number(None), "NULL");
    assert_eq!(number(Some(f64::NAN)), "NULL");
    assert_eq!(integer(Some(2_733_967)), "2733967");
    assert_eq!(integer(None), "NULL");
  }

  #[test]
  fn dates() {
    let d = FestivalDate::Exact(NaiveDate::from_ymd_opt(2020, 1, 31).unwrap());
    assert_eq!(date(Some(&d)), "'2020-01-31'");
    assert_eq!(date(None), "NULL");
    let loose = FestivalDate::Unchecked { year: 2025, month: 3, day: 1 };
    assert_eq!(date(Some(&loose)), "'2025-03-01'");
  }
}
