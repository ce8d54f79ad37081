//! Reconciled catalog entries.
//!
//! A `CatalogEntry` is the result of cross-validating the legacy and
//! extended catalogs (plus the optional overflow catalog): everything a
//! caller needs to locate and decode one symbol's data file.

use serde::{Deserialize, Serialize};

/// One reconciled symbol: where its price history lives and how wide
/// its data records are.
///
/// Entries are produced once per catalog build and immutable afterwards.
/// Decoding the referenced data file is independent per entry, so callers
/// may fan entries out across any executor they like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Data file number. `1..=255` for legacy/extended entries,
    /// above 255 for overflow entries.
    pub file_number: u32,
    /// Record width of the data file in bytes. Also the length of the
    /// data file's header slot.
    pub record_width: u16,
    /// Ticker symbol.
    pub ticker_symbol: String,
    /// Issue display name.
    pub display_name: String,
}

impl CatalogEntry {
    /// Conventional name of the per-symbol data file this entry points
    /// at: `f<N>.dat` for file numbers up to 255, `f<N>.mwd` above.
    ///
    /// Locating and reading that file is the caller's job; the decoder
    /// only consumes the resulting bytes.
    pub fn data_file_name(&self) -> String {
        if self.file_number <= 255 {
            format!("f{}.dat", self.file_number)
        } else {
            format!("f{}.mwd", self.file_number)
        }
    }

    /// Whether the data record layout carries the open-interest column.
    pub fn has_open_interest(&self) -> bool {
        self.record_width >= 28
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file_number: u32, record_width: u16) -> CatalogEntry {
        CatalogEntry {
            file_number,
            record_width,
            ticker_symbol: "TEST".into(),
            display_name: "Test Issue".into(),
        }
    }

    #[test]
    fn file_naming_switches_extension_above_255() {
        assert_eq!(entry(1, 28).data_file_name(), "f1.dat");
        assert_eq!(entry(255, 28).data_file_name(), "f255.dat");
        assert_eq!(entry(256, 28).data_file_name(), "f256.mwd");
        assert_eq!(entry(1042, 24).data_file_name(), "f1042.mwd");
    }

    #[test]
    fn open_interest_requires_28_byte_records() {
        assert!(entry(1, 28).has_open_interest());
        assert!(!entry(1, 24).has_open_interest());
    }
}
