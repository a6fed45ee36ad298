//! Text encodings tried, in order, when decoding CSV exports.
//!
//! Older KC_488 exports are UTF-8 with a BOM; re-saved ones are often in the
//! Korean Windows code page.

use encoding_rs::EUC_KR;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
  /// UTF-8, with a leading byte-order mark removed if present.
  #[serde(rename = "utf-8-sig")]
  Utf8Sig,
  #[serde(rename = "utf-8")]
  Utf8,
  /// EUC-KR. Decoded with the WHATWG definition, which is the Windows-949
  /// superset, so it also accepts extended Hangul.
  #[serde(rename = "euc-kr")]
  EucKr,
  #[serde(rename = "cp949")]
  Cp949,
}

impl TextEncoding {
  pub const DEFAULT_ORDER: [TextEncoding; 4] = [
    TextEncoding::Utf8Sig,
    TextEncoding::Utf8,
    TextEncoding::EucKr,
    TextEncoding::Cp949,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::Utf8Sig => "utf-8-sig",
      Self::Utf8 => "utf-8",
      Self::EucKr => "euc-kr",
      Self::Cp949 => "cp949",
    }
  }

  /// Decode `bytes` strictly; `None` if any sequence is malformed.
  pub fn decode(self, bytes: &[u8]) -> Option<String> {
    match self {
      Self::Utf8Sig => {
        let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        std::str::from_utf8(body).ok().map(str::to_string)
      }
      Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
      Self::EucKr | Self::Cp949 => EUC_KR
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|s| s.into_owned()),
    }
  }
}

/// Decode with the first encoding in `order` that accepts `bytes`.
pub fn decode_first(bytes: &[u8], order: &[TextEncoding]) -> Option<(String, TextEncoding)> {
  order
    .iter()
    .find_map(|enc| enc.decode(bytes).map(|text| (text, *enc)))
}
