//! Per-symbol quote table decoder (`f<N>.dat` / `f<N>.mwd`).
//!
//! Data files carry no independent record-width marker: the width comes
//! from the catalog entry that references the file, and the header slot
//! occupies one full record width. The 16-bit field at offset 2 of the
//! header holds the total slot count including the header itself, so the
//! number of bars is that count minus one.
//!
//! ```text
//! record: 0..4 date (vendor float, packed) | 4 open | 8 high | 12 low
//!         16 close | 20 volume | 24 open interest (only when width >= 28)
//! ```

use tracing::debug;
use types::{CatalogEntry, QuoteRecord};

use crate::buffers::RecordView;
use crate::config::DecodeConfig;
use crate::dates::decode_packed_date;
use crate::error::{DecodeError, DecodeResult};
use crate::table::{decode_table, TableDecode};

pub const TABLE: &str = "FDAT";

/// Narrowest decodable record: date plus the five OHLCV columns.
pub const MIN_RECORD_WIDTH: usize = 24;
/// Width at and above which the open-interest column exists.
pub const OPEN_INTEREST_WIDTH: usize = 28;

/// Offset of the total-slot-count field inside the header slot.
const COUNT_OFFSET: usize = 2;

/// Decode a quote data buffer using a catalog-supplied record width.
pub fn decode(
    buf: &[u8],
    record_width: usize,
    config: &DecodeConfig,
) -> DecodeResult<TableDecode<QuoteRecord>> {
    if record_width < MIN_RECORD_WIDTH {
        return Err(DecodeError::range_violation(
            "data record width",
            record_width as f64,
            format!("{MIN_RECORD_WIDTH}..="),
        ));
    }
    if buf.len() < record_width {
        return Err(DecodeError::buffer_too_small(
            record_width,
            buf.len(),
            "quote file header slot",
        ));
    }
    // The width came from the catalog; a remainder means the file on
    // disk disagrees with the catalog's idea of this symbol's geometry.
    if buf.len() % record_width != 0 {
        return Err(DecodeError::size_mismatch(
            buf.len(),
            record_width,
            "quote data file",
        ));
    }

    let decoded = decode_table(
        buf,
        TABLE,
        record_width,
        config.policy,
        |header| {
            let total_slots = header.read_u16_le(COUNT_OFFSET)?;
            usize::from(total_slots).checked_sub(1).ok_or_else(|| {
                DecodeError::header_mismatch(
                    TABLE,
                    COUNT_OFFSET,
                    "total slot count of at least 1",
                    &[0, 0],
                )
            })
        },
        move |_, slot| decode_record(slot, record_width),
    )?;

    debug!(
        bars = decoded.records.len(),
        record_width, "quote table decoded"
    );
    Ok(decoded)
}

/// Decode a quote buffer for a reconciled catalog entry.
///
/// `data` is the file content the caller looked up by
/// [`CatalogEntry::data_file_name`]; `None` means the lookup found
/// nothing and yields [`DecodeError::MissingDataFile`] for this entry
/// alone, leaving other entries decodable.
pub fn decode_for_entry(
    entry: &CatalogEntry,
    data: Option<&[u8]>,
    config: &DecodeConfig,
) -> DecodeResult<TableDecode<QuoteRecord>> {
    let buf = data.ok_or_else(|| DecodeError::missing_data_file(entry.data_file_name()))?;
    decode(buf, usize::from(entry.record_width), config)
}

/// Decode one data record slot of the given width.
pub fn decode_record(slot: &RecordView<'_>, record_width: usize) -> DecodeResult<QuoteRecord> {
    let date = decode_packed_date(slot.read_legacy_f32(0)?)?;
    let open_interest = if record_width >= OPEN_INTEREST_WIDTH {
        Some(slot.read_legacy_f32(24)?)
    } else {
        None
    };

    Ok(QuoteRecord {
        date,
        open: slot.read_legacy_f32(4)?,
        high: slot.read_legacy_f32(8)?,
        low: slot.read_legacy_f32(12)?,
        close: slot.read_legacy_f32(16)?,
        volume: slot.read_legacy_f32(20)?,
        open_interest,
    })
}
