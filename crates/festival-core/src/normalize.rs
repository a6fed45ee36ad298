//! Raw table → canonical [`FestivalRow`]s.
//!
//! Column resolution is the only fatal step. Once the required columns are
//! known to exist, each row is converted best-effort: unparseable dates and
//! numbers become `None`, and only sheet rows without a usable sequence
//! number are skipped.

use tracing::{debug, warn};

use crate::{
  Result,
  columns::{ColumnMap, DateShape, Field, IdentityScheme, Layout},
  dates::{self, FestivalDate},
  identity::{Provenance, RawId, resolve_year},
  record::{EventRecord, FestivalRow, MasterKey, MasterRecord},
  table::{RawRow, RawTable},
};

/// The rows of one table, plus how many were left out for lack of an id.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
  pub rows:         Vec<FestivalRow>,
  /// Rows with a blank or non-integer sequence number.
  pub unidentified: usize,
}

/// Normalise every data row of `table` according to `layout`.
///
/// `context` names the input (usually its file name) in errors and logs.
pub fn normalize(
  table: &RawTable,
  layout: &Layout,
  provenance: &Provenance,
  context: &str,
) -> Result<Normalized> {
  let map = ColumnMap::resolve(layout, table, context)?;

  let mut rows = Vec::with_capacity(table.len());
  let mut unidentified = 0usize;

  for (line, raw) in table.rows().iter().enumerate() {
    match normalize_row(&map, layout, provenance, raw) {
      Some(row) => rows.push(row),
      None => {
        debug!(context, line, "row has no usable identity; skipped");
        unidentified += 1;
      }
    }
  }

  if unidentified > 0 {
    warn!(context, unidentified, "rows without a sequence number skipped");
  }
  debug!(
    context,
    layout = layout.name,
    rows = rows.len(),
    unidentified,
    "normalised table"
  );
  Ok(Normalized { rows, unidentified })
}

fn normalize_row(
  map: &ColumnMap,
  layout: &Layout,
  provenance: &Provenance,
  raw: &RawRow,
) -> Option<FestivalRow> {
  let (start, end, base_date) = row_dates(map, layout.dates, raw);

  let raw_id = match layout.identity {
    IdentityScheme::Scoped => {
      // A blank id still yields `{prefix}-{year}-`; the row is kept.
      let source_id = map.text(raw, Field::SourceId);
      let year = resolve_year(provenance.path_year, start.as_ref());
      RawId::scoped(&provenance.id_prefix, year, &source_id)
    }
    IdentityScheme::Sequenced => {
      let cell = map.cell(raw, Field::Sequence)?;
      let Some(seq) = cell.as_i64() else {
        warn!(value = %cell.as_text(), "sequence number is not an integer; row skipped");
        return None;
      };
      RawId::sequenced(&provenance.id_prefix, seq)
    }
  };

  let key = MasterKey {
    name:     map.text(raw, Field::Name),
    province: map.text(raw, Field::Province),
    district: map.text(raw, Field::District),
  };

  let master = MasterRecord {
    legal_dong:         map.text(raw, Field::LegalDong),
    admin_dong:         map.text(raw, Field::AdminDong),
    zip_no:             map.text(raw, Field::ZipNo),
    road_address:       map.text(raw, Field::RoadAddress),
    tel_no:             map.text(raw, Field::Tel),
    homepage:           map.text(raw, Field::Homepage),
    longitude:          map.number(raw, Field::Longitude),
    latitude:           map.number(raw, Field::Latitude),
    first_image_url:    map.text(raw, Field::ImageUrl),
    overview:           String::new(),
    tourapi_content_id: map.integer(raw, Field::ContentId),
    key:                key.clone(),
  };

  let origin = map.text(raw, Field::Origin);
  let event = EventRecord {
    raw_id,
    facility_name: key.name.clone(),
    master: key,
    large_category: map.text(raw, Field::LargeCategory),
    medium_category: map.text(raw, Field::MediumCategory),
    start,
    end,
    description: map.text(raw, Field::Overview),
    origin_name: if origin.is_empty() {
      provenance.origin_name.clone()
    } else {
      origin
    },
    base_date,
  };

  Some(FestivalRow { master, event })
}

type RowDates = (Option<FestivalDate>, Option<FestivalDate>, Option<FestivalDate>);

fn row_dates(map: &ColumnMap, shape: DateShape, raw: &RawRow) -> RowDates {
  match shape {
    DateShape::Digits => {
      let digits = |f| map.cell(raw, f).and_then(dates::parse_digits);
      (
        digits(Field::StartDate),
        digits(Field::EndDate),
        digits(Field::BaseDate),
      )
    }
    DateShape::Triple => {
      let start = dates::from_triple(
        map.cell(raw, Field::StartYear),
        map.cell(raw, Field::StartMonth),
        map.cell(raw, Field::StartDay),
      );
      let end = dates::from_triple(
        map.cell(raw, Field::EndYear),
        map.cell(raw, Field::EndMonth),
        map.cell(raw, Field::EndDay),
      );
      (start, end, None)
    }
  }
}
