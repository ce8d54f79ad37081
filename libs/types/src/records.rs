//! Decoded catalog records.
//!
//! One struct per on-disk catalog format. Field names follow what the
//! fields mean, not their byte offsets; the `codec` crate owns the
//! offset tables. All dates are `YYYYMMDD` integers once decoded.

use serde::{Deserialize, Serialize};

use crate::field_mask::FieldMask;
use crate::time_frame::TimeFrame;

/// One entry of the legacy catalog (`MASTER`, 53-byte records).
///
/// References per-symbol data files numbered 1..=255.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyCatalogRecord {
    /// Data file number, always in `1..=255` for this format.
    pub file_number: u8,
    /// Data record width in bytes, taken from the record-length marker.
    pub data_length: u8,
    /// Number of float columns per data record.
    pub field_count: u8,
    /// Issue name, NUL/space trimmed.
    pub display_name: String,
    /// First bar date as `YYYYMMDD`.
    pub start_date: u32,
    /// Last bar date as `YYYYMMDD`.
    pub end_date: u32,
    /// Sampling period; only daily survives decoding.
    pub time_frame: TimeFrame,
    /// Raw intraday-frame bytes (offsets 34..36). Unvalidated; kept for
    /// completeness since the meaning is undocumented.
    pub intraday_frame: [u8; 2],
    /// Ticker symbol, NUL/space trimmed.
    pub ticker_symbol: String,
}

/// One entry of the extended catalog (`EMASTER`, 192-byte records).
///
/// Covers the same file-number domain as the legacy catalog and must
/// agree with it entry by entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedCatalogRecord {
    /// Data file number, `1..=255` and no larger than the table's own
    /// record count.
    pub file_number: u8,
    /// Number of float columns per data record; the derived data length
    /// is four bytes per column.
    pub field_count: u8,
    /// Field-presence marker byte.
    pub field_mask: FieldMask,
    /// Ticker symbol, NUL/space trimmed.
    pub ticker_symbol: String,
    /// Issue name from the short 16-byte field.
    pub name: String,
    /// Long-name fallback used when the short name was truncated.
    pub long_name: String,
    /// Sampling period; only daily survives decoding.
    pub time_frame: TimeFrame,
    /// First bar date (`YYYYMMDD`), best-effort: the field is not
    /// validated on disk and is absent when unparseable or zero.
    pub first_date: Option<u32>,
    /// Last bar date (`YYYYMMDD`), best-effort as above.
    pub last_date: Option<u32>,
    /// Last bar date from the long-format field (`YYYYMMDD`), best-effort.
    pub last_date_long: Option<u32>,
}

impl ExtendedCatalogRecord {
    /// Derived data record width in bytes.
    pub fn data_length(&self) -> u16 {
        4 * u16::from(self.field_count)
    }

    /// Preferred display name: the long-name fallback when present,
    /// otherwise the short name field.
    pub fn display_name(&self) -> &str {
        if self.long_name.is_empty() {
            &self.name
        } else {
            &self.long_name
        }
    }
}

/// One entry of the overflow catalog (`XMASTER`, 150-byte records).
///
/// Exists only for collections with data file numbers above 255.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverflowCatalogRecord {
    /// Data file number, always above 255 for this format.
    pub file_number: u16,
    /// Ticker symbol, NUL/space trimmed.
    pub ticker_symbol: String,
    /// Issue name, NUL/space trimmed.
    pub display_name: String,
    /// Sampling period; only daily survives decoding.
    pub time_frame: TimeFrame,
    /// Field-presence bitmask; derives the data record width.
    pub field_mask: FieldMask,
    /// Date-like integer at offset 80. Raw value, meaning partially
    /// undocumented.
    pub start_date: i32,
    /// Date-like integer at offset 104.
    pub first_date: i32,
    /// Date-like integer at offset 108.
    pub last_date: i32,
    /// Date-like integer at offset 116, duplicates `last_date` in every
    /// observed sample.
    pub last_date_alt: i32,
}

impl OverflowCatalogRecord {
    /// Derived data record width in bytes: four per selected column.
    pub fn data_length(&self) -> u16 {
        self.field_mask.data_width() as u16
    }
}
