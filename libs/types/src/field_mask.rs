//! Field-presence bitmask for per-symbol data records.
//!
//! The overflow catalog stores one byte per entry whose set bits select
//! which 4-byte float columns a data record carries. The number of set
//! bits therefore fixes the record width of the matching data file.

use serde::{Deserialize, Serialize};

/// Bitmask selecting the float columns present in a data record.
///
/// Real-world files carry `0x7F` (date, OHLCV, open interest) or `0x3F`
/// (no open interest); the type itself accepts any byte and leaves
/// legality checks to the codec layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldMask(pub u8);

impl FieldMask {
    /// Full seven-column mask: date, open, high, low, close, volume,
    /// open interest. The width this derives (28) matches the legacy
    /// catalog's record-length marker.
    pub const FULL: FieldMask = FieldMask(0x7F);

    /// Six-column mask without the open-interest column.
    pub const NO_OPEN_INTEREST: FieldMask = FieldMask(0x3F);

    /// Number of float columns selected by the mask.
    pub const fn column_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Data record width in bytes: four bytes per selected column.
    pub const fn data_width(self) -> u32 {
        4 * self.column_count()
    }
}

impl From<u8> for FieldMask {
    fn from(raw: u8) -> Self {
        FieldMask(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_four_bytes_per_set_bit() {
        assert_eq!(FieldMask(0x00).data_width(), 0);
        assert_eq!(FieldMask(0xFF).data_width(), 32);
        assert_eq!(FieldMask::FULL.data_width(), 28);
        assert_eq!(FieldMask::NO_OPEN_INTEREST.data_width(), 24);
    }

    #[test]
    fn column_count_matches_popcount() {
        assert_eq!(FieldMask(0b0101_0101).column_count(), 4);
        assert_eq!(FieldMask::FULL.column_count(), 7);
    }
}
