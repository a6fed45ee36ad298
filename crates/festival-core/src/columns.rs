//! Column-name heuristics as data.
//!
//! Every source vintage labels its columns differently. A [`Layout`] lists,
//! for each canonical [`Field`], the candidate source labels in priority order;
//! [`ColumnMap::resolve`] picks the first candidate present in a table once,
//! up front, and reports every required field it could not find.

use crate::{
  error::{Error, MissingField, Result},
  table::{Cell, RawRow, RawTable},
};

// ─── Canonical fields ────────────────────────────────────────────────────────

/// A canonical intermediate field, independent of any source's labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  SourceId,
  Sequence,
  Name,
  Province,
  District,
  LegalDong,
  AdminDong,
  ZipNo,
  RoadAddress,
  Tel,
  Homepage,
  Longitude,
  Latitude,
  ImageUrl,
  ContentId,
  LargeCategory,
  MediumCategory,
  StartDate,
  EndDate,
  StartYear,
  StartMonth,
  StartDay,
  EndYear,
  EndMonth,
  EndDay,
  Overview,
  Origin,
  BaseDate,
}

impl Field {
  #[cfg(test)]
  pub(crate) const ALL: [Field; 28] = [
    Field::SourceId,
    Field::Sequence,
    Field::Name,
    Field::Province,
    Field::District,
    Field::LegalDong,
    Field::AdminDong,
    Field::ZipNo,
    Field::RoadAddress,
    Field::Tel,
    Field::Homepage,
    Field::Longitude,
    Field::Latitude,
    Field::ImageUrl,
    Field::ContentId,
    Field::LargeCategory,
    Field::MediumCategory,
    Field::StartDate,
    Field::EndDate,
    Field::StartYear,
    Field::StartMonth,
    Field::StartDay,
    Field::EndYear,
    Field::EndMonth,
    Field::EndDay,
    Field::Overview,
    Field::Origin,
    Field::BaseDate,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Field::SourceId => "source_id",
      Field::Sequence => "sequence",
      Field::Name => "name",
      Field::Province => "province",
      Field::District => "district",
      Field::LegalDong => "legal_dong",
      Field::AdminDong => "admin_dong",
      Field::ZipNo => "zip_no",
      Field::RoadAddress => "road_address",
      Field::Tel => "tel",
      Field::Homepage => "homepage",
      Field::Longitude => "longitude",
      Field::Latitude => "latitude",
      Field::ImageUrl => "image_url",
      Field::ContentId => "content_id",
      Field::LargeCategory => "large_category",
      Field::MediumCategory => "medium_category",
      Field::StartDate => "start_date",
      Field::EndDate => "end_date",
      Field::StartYear => "start_year",
      Field::StartMonth => "start_month",
      Field::StartDay => "start_day",
      Field::EndYear => "end_year",
      Field::EndMonth => "end_month",
      Field::EndDay => "end_day",
      Field::Overview => "overview",
      Field::Origin => "origin",
      Field::BaseDate => "base_date",
    }
  }
}

// ─── Layouts ─────────────────────────────────────────────────────────────────

/// How a layout identifies its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityScheme {
  /// `{prefix}-{year}-{SourceId}`.
  Scoped,
  /// `{prefix}-{Sequence:04}`.
  Sequenced,
}

/// How a layout carries its dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
  /// Single `StartDate` / `EndDate` / `BaseDate` values, parsed by digits.
  Digits,
  /// Split `{Start,End}{Year,Month,Day}` columns.
  Triple,
}

/// A static description of one source format.
#[derive(Debug)]
pub struct Layout {
  pub name:           &'static str,
  pub columns:        &'static [(Field, &'static [&'static str])],
  pub required:       &'static [Field],
  pub identity:       IdentityScheme,
  pub dates:          DateShape,
  pub default_prefix: &'static str,
  pub default_origin: &'static str,
}

impl Layout {
  /// Candidate labels for `field`, in priority order (empty if unmapped).
  pub fn candidates(&self, field: Field) -> &'static [&'static str] {
    self
      .columns
      .iter()
      .find(|(f, _)| *f == field)
      .map(|(_, c)| *c)
      .unwrap_or(&[])
  }
}

/// KC_488 "regional cultural festival" CSV exports, 2019–2024.
pub static KC488: Layout = Layout {
  name:           "KC488",
  columns:        &[
    (Field::SourceId, &["ID"]),
    (Field::Name, &["FCLTY_NM", "FSTVL_NM"]),
    (Field::Province, &["CTPRVN_NM"]),
    (Field::District, &["SIGNGU_NM"]),
    (Field::LargeCategory, &["LCLAS_NM"]),
    (Field::MediumCategory, &["MLSFC_NM"]),
    (Field::LegalDong, &["LEGALDONG_NM"]),
    (Field::AdminDong, &["ADSTRD_NM"]),
    (Field::ZipNo, &["ZIP_NO"]),
    (Field::RoadAddress, &["RDNMADR_NM"]),
    (Field::Tel, &["TEL_NO"]),
    (Field::Homepage, &["HMPG_ADDR"]),
    (Field::Longitude, &["FCLTY_LO"]),
    (Field::Latitude, &["FCLTY_LA"]),
    (Field::StartDate, &["FSTVL_BEGIN_DE"]),
    (Field::EndDate, &["FSTVL_END_DE"]),
    (Field::Overview, &["FSTVL_CN"]),
    (Field::Origin, &["ORIGIN_NM"]),
    (Field::BaseDate, &["BASE_DE"]),
  ],
  required:       &[
    Field::SourceId,
    Field::LargeCategory,
    Field::MediumCategory,
    Field::Name,
    Field::Province,
    Field::District,
    Field::StartDate,
    Field::EndDate,
  ],
  identity:       IdentityScheme::Scoped,
  dates:          DateShape::Digits,
  default_prefix: "KC488",
  default_origin: "KC_488_WNTY_CLTFSTVL",
};

/// The MCST 2025 regional festival plan workbook (`조사표` sheet).
///
/// The date block sits under a merged `개최기간` header, so the month/day
/// columns surface as `Unnamed: N` depending on how the sheet was saved.
pub static MCST_2025: Layout = Layout {
  name:           "MCST2025",
  columns:        &[
    (Field::Sequence, &["연번"]),
    (Field::Name, &["축제명"]),
    (Field::Province, &["광역자치단체명"]),
    (Field::District, &["기초자치단체명"]),
    (Field::LargeCategory, &["축제 유형", "축제유형", "유형"]),
    (Field::LegalDong, &["개최 장소", "개최장소", "장소"]),
    (Field::AdminDong, &["읍면동", "Unnamed:10", "Unnamed: 10"]),
    (Field::StartYear, &[
      "개최기간",
      "개최기간(시작)",
      "시작(연)",
      "시작 연",
      "시작연",
      "Unnamed: 11",
      "Unnamed:11",
    ]),
    (Field::StartMonth, &["Unnamed: 12", "Unnamed:12", "시작(월)", "시작 월", "시작월"]),
    (Field::StartDay, &["Unnamed: 13", "Unnamed:13", "시작(일)", "시작 일", "시작일"]),
    (Field::EndYear, &["Unnamed: 14", "Unnamed:14", "종료(연)", "종료 연", "종료연"]),
    (Field::EndMonth, &["Unnamed: 15", "Unnamed:15", "종료(월)", "종료 월", "종료월"]),
    (Field::EndDay, &["Unnamed: 16", "Unnamed:16", "종료(일)", "종료 일", "종료일"]),
    (Field::Overview, &["축제 개요", "축제개요", "개요", "행사 개요"]),
  ],
  required:       &[
    Field::Sequence,
    Field::Name,
    Field::Province,
    Field::District,
    Field::StartYear,
    Field::StartMonth,
    Field::EndYear,
    Field::EndMonth,
  ],
  identity:       IdentityScheme::Sequenced,
  dates:          DateShape::Triple,
  default_prefix: "MCST2025",
  default_origin: "문체부_지역축제계획_2025",
};

/// A CSV already reshaped to canonical column names (the 2025 plan exported
/// by hand).
pub static STAGED: Layout = Layout {
  name:           "STAGED",
  columns:        &[
    (Field::Sequence, &["seq"]),
    (Field::Name, &["fstvl_nm"]),
    (Field::Province, &["ctprvn_nm"]),
    (Field::District, &["signgu_nm"]),
    (Field::LargeCategory, &["lclas_nm"]),
    (Field::MediumCategory, &["mlsfc_nm"]),
    (Field::LegalDong, &["legaldong_nm"]),
    (Field::AdminDong, &["adstrd_nm"]),
    (Field::ZipNo, &["zip_no"]),
    (Field::RoadAddress, &["addr1"]),
    (Field::Tel, &["tel_no"]),
    (Field::Homepage, &["hmpg_addr"]),
    (Field::Longitude, &["mapx"]),
    (Field::Latitude, &["mapy"]),
    (Field::ImageUrl, &["first_image_url"]),
    (Field::ContentId, &["tourapi_content_id"]),
    (Field::StartDate, &["start_date"]),
    (Field::EndDate, &["end_date"]),
    (Field::Overview, &["fstvl_cn"]),
    (Field::Origin, &["origin_nm"]),
    (Field::BaseDate, &["data_base_de"]),
  ],
  required:       &[
    Field::Sequence,
    Field::Name,
    Field::Province,
    Field::District,
    Field::StartDate,
    Field::EndDate,
  ],
  identity:       IdentityScheme::Sequenced,
  dates:          DateShape::Digits,
  default_prefix: "MCST2025",
  default_origin: "문체부_지역축제계획_2025",
};

// ─── Lookup ──────────────────────────────────────────────────────────────────

/// The first of `candidates` present in `headers`.
pub fn pick_column<'a>(headers: &[String], candidates: &[&'a str]) -> Option<&'a str> {
  candidates
    .iter()
    .copied()
    .find(|c| headers.iter().any(|h| h == c))
}

/// Fields of one layout resolved to column positions in one table.
#[derive(Debug, Clone)]
pub struct ColumnMap {
  positions: Vec<(Field, usize)>,
}

impl ColumnMap {
  /// Resolve every field of `layout` against `table`'s headers.
  ///
  /// Fails with [`Error::MissingColumns`] if any required field has no
  /// candidate present; `context` names the input in that error.
  pub fn resolve(layout: &Layout, table: &RawTable, context: &str) -> Result<Self> {
    let mut positions = Vec::new();
    for (field, candidates) in layout.columns {
      if let Some(label) = pick_column(table.headers(), candidates)
        && let Some(pos) = table.column(label)
      {
        tracing::debug!(layout = layout.name, field = field.name(), label, "resolved column");
        positions.push((*field, pos));
      }
    }

    let missing: Vec<MissingField> = layout
      .required
      .iter()
      .filter(|f| !positions.iter().any(|(p, _)| p == *f))
      .map(|f| MissingField {
        field:      f.name(),
        candidates: layout.candidates(*f).to_vec(),
      })
      .collect();

    if !missing.is_empty() {
      return Err(Error::MissingColumns {
        context: context.to_string(),
        missing,
      });
    }

    Ok(Self { positions })
  }

  #[cfg(test)]
  pub(crate) fn has(&self, field: Field) -> bool { self.position(field).is_some() }

  fn position(&self, field: Field) -> Option<usize> {
    self
      .positions
      .iter()
      .find(|(f, _)| *f == field)
      .map(|(_, p)| *p)
  }

  /// The raw cell for `field` in `row`; `None` if unmapped or blank.
  pub fn cell<'r>(&self, row: &'r RawRow, field: Field) -> Option<&'r Cell> {
    self
      .position(field)
      .and_then(|p| row.get(p))
      .and_then(Option::as_ref)
  }

  /// Trimmed text for `field`, `""` if unmapped or blank.
  pub fn text(&self, row: &RawRow, field: Field) -> String {
    self.cell(row, field).map(Cell::as_text).unwrap_or_default()
  }

  /// Float for `field`, `None` if unmapped, blank or non-numeric.
  pub fn number(&self, row: &RawRow, field: Field) -> Option<f64> {
    self.cell(row, field).and_then(Cell::as_f64)
  }

  /// Integer for `field`, `None` if unmapped, blank or non-integral.
  pub fn integer(&self, row: &RawRow, field: Field) -> Option<i64> {
    self.cell(row, field).and_then(Cell::as_i64)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn table(headers: &[&str]) -> RawTable {
    RawTable::new(headers.iter().map(|h| Some(h.to_string())).collect(), vec![])
  }

  #[test]
  fn pick_column_honours_priority() {
    let headers = vec!["Unnamed: 10".to_string(), "읍면동".to_string()];
    assert_eq!(
      pick_column(&headers, &["읍면동", "Unnamed:10", "Unnamed: 10"]),
      Some("읍면동")
    );
    assert_eq!(pick_column(&headers, &["Unnamed:10", "Unnamed: 10"]), Some("Unnamed: 10"));
    assert_eq!(pick_column(&headers, &["없음"]), None);
  }

  #[test]
  fn every_layout_maps_its_required_fields() {
    for layout in [&KC488, &MCST_2025, &STAGED] {
      for f in layout.required {
        assert!(!layout.candidates(*f).is_empty(), "{} {:?}", layout.name, f);
      }
    }
  }

  #[test]
  fn field_names_are_unique() {
    let mut names: Vec<_> = Field::ALL.iter().map(|f| f.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Field::ALL.len());
  }

  #[test]
  fn missing_required_columns_are_all_reported() {
    let t = table(&["ID", "FCLTY_NM", "CTPRVN_NM", "LCLAS_NM", "MLSFC_NM"]);
    let err = ColumnMap::resolve(&KC488, &t, "f.csv").unwrap_err();
    let Error::MissingColumns { context, missing } = err;
    assert_eq!(context, "f.csv");
    let names: Vec<_> = missing.iter().map(|m| m.field).collect();
    assert_eq!(names, ["district", "start_date", "end_date"]);
  }

  #[test]
  fn optional_columns_may_be_absent() {
    let t = table(&[
      "ID",
      "LCLAS_NM",
      "MLSFC_NM",
      "FCLTY_NM",
      "CTPRVN_NM",
      "SIGNGU_NM",
      "FSTVL_BEGIN_DE",
      "FSTVL_END_DE",
    ]);
    let map = ColumnMap::resolve(&KC488, &t, "f.csv").unwrap();
    assert!(map.has(Field::Name));
    assert!(!map.has(Field::Longitude));
    assert_eq!(map.text(&vec![None; 8], Field::Tel), "");
  }

  #[test]
  fn unnamed_date_columns_resolve_for_mcst() {
    let t = table(&[
      "연번",
      "광역자치단체명",
      "기초자치단체명",
      "축제명",
      "개최기간",
      "Unnamed: 12",
      "Unnamed: 13",
      "Unnamed: 14",
      "Unnamed: 15",
      "Unnamed: 16",
    ]);
    let map = ColumnMap::resolve(&MCST_2025, &t, "plan.xlsx").unwrap();
    assert!(map.has(Field::StartDay));
    assert!(map.has(Field::EndDay));
    assert!(!map.has(Field::Overview));
  }

  #[test]
  fn mcst_without_date_block_fails() {
    let t = table(&["연번", "광역자치단체명", "기초자치단체명", "축제명"]);
    let Error::MissingColumns { missing, .. } =
      ColumnMap::resolve(&MCST_2025, &t, "plan.xlsx").unwrap_err();
    assert_eq!(missing.len(), 4);
    assert_eq!(missing[0].field, "start_year");
  }
}
