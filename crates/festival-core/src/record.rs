//! Canonical master and event records.
//!
//! Records are derived once from source rows and never mutated. Text fields
//! are trimmed and default to `""`; numeric and date fields are `None` when
//! the source lacks them or they fail to parse.

use std::collections::HashSet;

use crate::{dates::FestivalDate, identity::RawId};

// ─── Master ──────────────────────────────────────────────────────────────────

/// The natural composite key of `festival_master`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MasterKey {
  pub name:     String,
  pub province: String,
  pub district: String,
}

impl MasterKey {
  /// `true` if any key part is blank; such rows cannot be identified.
  pub fn is_incomplete(&self) -> bool {
    self.name.trim().is_empty()
      || self.province.trim().is_empty()
      || self.district.trim().is_empty()
  }
}

/// A canonical festival identity, one per unique [`MasterKey`].
#[derive(Debug, Clone, PartialEq)]
pub struct MasterRecord {
  pub key:                MasterKey,
  pub legal_dong:         String,
  pub admin_dong:         String,
  pub zip_no:             String,
  pub road_address:       String,
  pub tel_no:             String,
  pub homepage:           String,
  pub longitude:          Option<f64>,
  pub latitude:           Option<f64>,
  pub first_image_url:    String,
  pub overview:           String,
  pub tourapi_content_id: Option<i64>,
}

impl MasterRecord {
  /// A master with only its key set.
  pub fn new(key: MasterKey) -> Self {
    Self {
      key,
      legal_dong: String::new(),
      admin_dong: String::new(),
      zip_no: String::new(),
      road_address: String::new(),
      tel_no: String::new(),
      homepage: String::new(),
      longitude: None,
      latitude: None,
      first_image_url: String::new(),
      overview: String::new(),
      tourapi_content_id: None,
    }
  }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// One occurrence of a festival, referencing its master by key.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
  pub raw_id:          RawId,
  pub master:          MasterKey,
  pub facility_name:   String,
  pub large_category:  String,
  pub medium_category: String,
  pub start:           Option<FestivalDate>,
  pub end:             Option<FestivalDate>,
  pub description:     String,
  pub origin_name:     String,
  pub base_date:       Option<FestivalDate>,
}

impl EventRecord {
  pub fn is_dated(&self) -> bool { self.start.is_some() && self.end.is_some() }
}

// ─── Row ─────────────────────────────────────────────────────────────────────

/// One normalised source row.
#[derive(Debug, Clone, PartialEq)]
pub struct FestivalRow {
  pub master: MasterRecord,
  pub event:  EventRecord,
}

/// Drop rows whose master key is incomplete; returns how many were dropped.
pub fn retain_keyed(rows: &mut Vec<FestivalRow>) -> usize {
  let before = rows.len();
  rows.retain(|r| !r.master.key.is_incomplete());
  before - rows.len()
}

/// The first master per key, in input order.
pub fn unique_masters(rows: &[FestivalRow]) -> Vec<&MasterRecord> {
  let mut seen = HashSet::new();
  rows
    .iter()
    .map(|r| &r.master)
    .filter(|&m| seen.insert(&m.key))
    .collect()
}

#[cfg(test)]
pub(crate) mod test_helpers {
  use super::*;

  pub(crate) fn key(name: &str, province: &str, district: &str) -> MasterKey {
    MasterKey {
      name:     name.to_string(),
      province: province.to_string(),
      district: district.to_string(),
    }
  }

  pub(crate) fn row(raw_id: &str, key: MasterKey) -> FestivalRow {
    FestivalRow {
      master: MasterRecord::new(key.clone()),
      event:  EventRecord {
        raw_id:          RawId::sequenced(raw_id, 1),
        facility_name:   key.name.clone(),
        master:          key,
        large_category:  String::new(),
        medium_category: String::new(),
        start:           None,
        end:             None,
        description:     String::new(),
        origin_name:     String::new(),
        base_date:       None,
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{test_helpers::*, *};

  #[test]
  fn unique_masters_keeps_first_in_order() {
    let mut a = row("A", key("불꽃축제", "서울특별시", "영등포구"));
    a.master.tel_no = "first".into();
    let mut b = row("B", key("불꽃축제", "서울특별시", "영등포구"));
    b.master.tel_no = "second".into();
    let c = row("C", key("벚꽃축제", "경상남도", "창원시"));

    let rows = vec![a, b, c];
    let masters = unique_masters(&rows);
    assert_eq!(masters.len(), 2);
    assert_eq!(masters[0].tel_no, "first");
    assert_eq!(masters[1].key.name, "벚꽃축제");
  }

  #[test]
  fn same_name_in_other_district_is_distinct() {
    let rows = vec![
      row("A", key("해맞이축제", "강원특별자치도", "강릉시")),
      row("B", key("해맞이축제", "강원특별자치도", "동해시")),
    ];
    assert_eq!(unique_masters(&rows).len(), 2);
  }

  #[test]
  fn retain_keyed_drops_blank_keys() {
    let mut rows = vec![
      row("A", key("축제", "서울특별시", "종로구")),
      row("B", key("", "서울특별시", "종로구")),
      row("C", key("축제", "  ", "종로구")),
    ];
    assert_eq!(retain_keyed(&mut rows), 2);
    assert_eq!(rows.len(), 1);
  }
}
