//! Existence-guarded statements for the schema-preserving load.
//!
//! `festival_master` is assumed to have no unique constraint, so each insert
//! checks the composite key with `WHERE NOT EXISTS`. Event inserts resolve
//! `master_id` by the same key (lowest id wins) and skip any `raw_id` already
//! present.

use festival_core::record::{EventRecord, MasterKey, MasterRecord};

use crate::literal::{date, integer, number, text};

pub(crate) fn master_insert(m: &MasterRecord) -> String {
  let MasterKey { name, province, district } = &m.key;
  let (name, province, district) = (text(name), text(province), text(district));

  [
    "INSERT INTO festival_master".to_string(),
    "(fstvl_nm, ctprvn_nm, signgu_nm,".to_string(),
    " legaldong_nm, adstrd_nm, zip_no, addr1,".to_string(),
    " tel_no, hmpg_addr, mapx, mapy,".to_string(),
    " first_image_url, overview, tourapi_content_id,".to_string(),
    " detail_loaded, first_image_url2, original_image_url, image_urls)".to_string(),
    "SELECT".to_string(),
    format!(" {name}, {province}, {district},"),
    format!(
      " {}, {}, {}, {},",
      text(&m.legal_dong),
      text(&m.admin_dong),
      text(&m.zip_no),
      text(&m.road_address),
    ),
    format!(
      " {}, {}, {}, {},",
      text(&m.tel_no),
      text(&m.homepage),
      number(m.longitude),
      number(m.latitude),
    ),
    format!(
      " {}, {}, {},",
      text(&m.first_image_url),
      text(&m.overview),
      integer(m.tourapi_content_id),
    ),
    " b'0', NULL, NULL, NULL".to_string(),
    "WHERE NOT EXISTS (".to_string(),
    "  SELECT 1 FROM festival_master m".to_string(),
    format!("  WHERE m.fstvl_nm = {name}"),
    format!("    AND m.ctprvn_nm = {province}"),
    format!("    AND m.signgu_nm = {district}"),
    "  LIMIT 1".to_string(),
    ");".to_string(),
  ]
  .join("\n")
}

pub(crate) fn event_insert(e: &EventRecord) -> String {
  let raw_id = text(e.raw_id.as_str());

  [
    "INSERT INTO festival_event".to_string(),
    "(master_id, raw_id, fclty_nm, fstvl_start, fstvl_end, origin_nm, data_base_de)"
      .to_string(),
    "SELECT".to_string(),
    "    m.id,".to_string(),
    format!("    {raw_id},"),
    format!("    {},", text(&e.facility_name)),
    format!("    {},", date(e.start.as_ref())),
    format!("    {},", date(e.end.as_ref())),
    format!("    {},", text(&e.origin_name)),
    format!("    {}", date(e.base_date.as_ref())),
    "FROM festival_master m".to_string(),
    format!("WHERE m.fstvl_nm = {}", text(&e.master.name)),
    format!("  AND m.ctprvn_nm = {}", text(&e.master.province)),
    format!("  AND m.signgu_nm = {}", text(&e.master.district)),
    format!(
      "  AND NOT EXISTS (SELECT 1 FROM festival_event e WHERE e.raw_id = {raw_id} LIMIT 1)"
    ),
    "ORDER BY m.id ASC".to_string(),
    "LIMIT 1;".to_string(),
  ]
  .join("\n")
}

#[cfg(test)]
mod tests {
  use festival_core::identity::RawId;

  use super::*;
  use crate::tests::sample_row;

  #[test]
  fn master_insert_is_guarded_by_composite_key() {
    let row = sample_row("O'Brien's Fest", None);
    let sql = master_insert(&row.master);

    assert!(sql.starts_with("INSERT INTO festival_master\n"));
    assert!(sql.contains(" 'O''Brien''s Fest', '서울특별시', '종로구',"));
    assert!(sql.contains("WHERE NOT EXISTS (\n  SELECT 1 FROM festival_master m\n"));
    assert!(sql.contains("  WHERE m.fstvl_nm = 'O''Brien''s Fest'\n"));
    assert!(sql.contains("    AND m.signgu_nm = '종로구'\n"));
    assert!(sql.contains(" b'0', NULL, NULL, NULL\n"));
    assert!(sql.ends_with(");"));
  }

  #[test]
  fn master_insert_renders_nullable_numbers() {
    let mut row = sample_row("축제", None);
    row.master.longitude = Some(126.9784);
    row.master.tourapi_content_id = Some(2733967);
    let sql = master_insert(&row.master);
    assert!(sql.contains(", 126.9784, NULL,\n"));
    assert!(sql.contains(", 2733967,\n"));
  }

  #[test]
  fn event_insert_resolves_master_and_skips_known_raw_id() {
    let mut row = sample_row("축제", None);
    row.event.raw_id = RawId::scoped("KC488", 2021, "7");
    let sql = event_insert(&row.event);

    assert!(sql.contains("    'KC488-2021-7',\n"));
    assert!(sql.contains("FROM festival_master m\nWHERE m.fstvl_nm = '축제'\n"));
    assert!(sql.contains(
      "  AND NOT EXISTS (SELECT 1 FROM festival_event e WHERE e.raw_id = 'KC488-2021-7' LIMIT 1)\n"
    ));
    assert!(sql.ends_with("ORDER BY m.id ASC\nLIMIT 1;"));
  }

  #[test]
  fn event_insert_keeps_missing_dates_as_null() {
    let row = sample_row("축제", None);
    let sql = event_insert(&row.event);
    assert!(sql.contains("    NULL,\n    NULL,\n"));
  }
}
