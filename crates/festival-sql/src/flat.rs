//! Plain inserts into the legacy single-table `festival` layout, which predates
//! the master/event split. No guard: each run appends.

use festival_core::record::FestivalRow;

use crate::literal::{date, number, text};

pub(crate) fn festival_insert(row: &FestivalRow) -> String {
  let FestivalRow { master: m, event: e } = row;
  let values = [
    text(e.raw_id.as_str()),
    text(&e.large_category),
    text(&e.medium_category),
    text(&e.facility_name),
    text(&m.key.province),
    text(&m.key.district),
    text(&m.legal_dong),
    text(&m.admin_dong),
    text(&m.zip_no),
    number(m.longitude),
    number(m.latitude),
    date(e.start.as_ref()),
    date(e.end.as_ref()),
    text(&e.description),
    text(&m.tel_no),
    text(&m.homepage),
    date(e.base_date.as_ref()),
    text(&e.origin_name),
  ];

  format!(
    "INSERT INTO festival (raw_id,lclas_nm,mlsfc_nm,fclty_nm,ctprvn_nm,\
     signgu_nm,legaldong_nm,adstrd_nm,zip_no,fclty_lo,fclty_la,fstvl_begin_de,\
     fstvl_end_de,fstvl_cn,tel_no,hmpg_addr,data_base_de,origin_nm) VALUES ({});",
    values.join(",")
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tests::{day, sample_row};

  #[test]
  fn one_line_per_row_with_all_columns() {
    let mut row = sample_row("축제", Some((day(2025, 3, 1), day(2025, 3, 2))));
    row.event.large_category = "문화예술".into();
    let sql = festival_insert(&row);

    assert!(!sql.contains('\n'));
    assert!(sql.starts_with("INSERT INTO festival (raw_id,lclas_nm,"));
    assert!(sql.contains(
      "VALUES ('KC488-2020-1','문화예술','','축제','서울특별시','종로구','','','',\
       NULL,NULL,'2025-03-01','2025-03-02','','','',NULL,'KC_488_WNTY_CLTFSTVL');"
    ));
  }
}
