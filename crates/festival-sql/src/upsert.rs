//! Upsert statements for the redesigned schema.
//!
//! Relies on `uk_master (fstvl_nm, ctprvn_nm, signgu_nm)`: the master insert
//! updates descriptive columns in place on a key collision, and the event
//! insert looks its `master_id` up by that key.

use festival_core::record::{EventRecord, MasterRecord};

use crate::literal::{date, integer, number, text};

/// Non-key master columns, in insert order.
const MASTER_COLUMNS: [&str; 11] = [
  "legaldong_nm",
  "adstrd_nm",
  "zip_no",
  "addr1",
  "tel_no",
  "hmpg_addr",
  "mapx",
  "mapy",
  "first_image_url",
  "overview",
  "tourapi_content_id",
];

/// Columns refreshed on a duplicate key. `overview` is only set on insert;
/// rows here never carry one, and an update would blank it.
const UPDATED_COLUMNS: [&str; 10] = [
  "legaldong_nm",
  "adstrd_nm",
  "zip_no",
  "addr1",
  "tel_no",
  "hmpg_addr",
  "mapx",
  "mapy",
  "first_image_url",
  "tourapi_content_id",
];

pub(crate) fn master_upsert(m: &MasterRecord) -> String {
  let values = [
    text(&m.key.name),
    text(&m.key.province),
    text(&m.key.district),
    text(&m.legal_dong),
    text(&m.admin_dong),
    text(&m.zip_no),
    text(&m.road_address),
    text(&m.tel_no),
    text(&m.homepage),
    number(m.longitude),
    number(m.latitude),
    text(&m.first_image_url),
    text(&m.overview),
    integer(m.tourapi_content_id),
  ];
  let updates = UPDATED_COLUMNS
    .iter()
    .map(|c| format!("  {c} = VALUES({c})"))
    .collect::<Vec<_>>()
    .join(",\n");

  format!(
    "INSERT INTO festival_master (fstvl_nm, ctprvn_nm, signgu_nm, {})\nVALUES \
     ({})\nON DUPLICATE KEY UPDATE\n{updates};\n",
    MASTER_COLUMNS.join(", "),
    values.join(","),
  )
}

pub(crate) fn event_insert(e: &EventRecord) -> String {
  format!(
    "INSERT INTO festival_event (master_id, raw_id, lclas_nm, mlsfc_nm, \
     start_date, end_date, fstvl_cn, origin_nm, data_base_de)\nVALUES (\n  \
     (SELECT id FROM festival_master WHERE fstvl_nm={} AND ctprvn_nm={} AND \
     signgu_nm={} LIMIT 1),\n  {}, {}, {}, {}, {}, {}, {}, {}\n);\n",
    text(&e.master.name),
    text(&e.master.province),
    text(&e.master.district),
    text(e.raw_id.as_str()),
    text(&e.large_category),
    text(&e.medium_category),
    date(e.start.as_ref()),
    date(e.end.as_ref()),
    text(&e.description),
    text(&e.origin_name),
    date(e.base_date.as_ref()),
  )
}
