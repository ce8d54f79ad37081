//! Overflow catalog decoder (`XMASTER`, 150-byte records).
//!
//! Present only in collections that outgrew the 255-file limit of the
//! legacy/extended pair; every entry here references a data file number
//! above 255. Unlike the other two catalogs it stands alone: there is no
//! cross-table agreement to check beyond its own record invariants.
//!
//! ```text
//! header: 0..4 magic 5D FE 'X' 'M' | 10 count (u16) | 12..14 zero
//!         14 count again (u16) | 16..18 zero | 18 last used + 1 (u16) | 20..22 zero
//! record: 0 0x01 | 1..15 symbol | 15 zero | 16..61 name | 61 zero | 62 'D'
//!         63..65 zero | 65..67 file# (u16) | 67..70 zero | 70 field mask 0x7f/0x3f
//!         71..80 zero | 80..84 start date | 84..87 short date (undecoded)
//!         87..104 zero | 104..108 first date | 108..112 last date
//!         112..116 zero | 116..120 last date again | 120..150 zero
//! ```
//!
//! The 3-byte "short date" at 84..87 duplicates the leading bytes of the
//! start date in every observed file; its exact meaning is unknown and
//! it is deliberately left undecoded.

use types::{FieldMask, OverflowCatalogRecord, TimeFrame};

use crate::buffers::RecordView;
use crate::config::DecodeConfig;
use crate::error::{DecodeError, DecodeResult};
use crate::layout::{FieldConstraint, RecordLayout};
use crate::table::{decode_table, TableDecode};

pub const TABLE: &str = "XMASTER";
pub const RECORD_WIDTH: usize = 150;

/// File magic: `5D FE 'X' 'M'`.
pub const MAGIC: [u8; 4] = [0x5D, 0xFE, b'X', b'M'];

/// Record start marker.
const RECORD_MARKER: u8 = 0x01;
/// Legal field-presence masks: with and without open interest.
const ALLOWED_MASKS: &[u8] = &[0x7F, 0x3F];

const TIME_FRAME_OFFSET: usize = 62;
/// Smallest file number this catalog may reference.
const MIN_FILE_NUMBER: u16 = 256;

static RECORD_LAYOUT: RecordLayout = RecordLayout {
    table: TABLE,
    width: RECORD_WIDTH,
    constraints: &[
        FieldConstraint::Exact { offset: 0, value: RECORD_MARKER },
        FieldConstraint::Exact { offset: 15, value: 0 },
        FieldConstraint::Exact { offset: 61, value: 0 },
        FieldConstraint::ZeroRun { start: 63, end: 65 },
        FieldConstraint::ZeroRun { start: 67, end: 70 },
        FieldConstraint::OneOf { offset: 70, allowed: ALLOWED_MASKS },
        FieldConstraint::ZeroRun { start: 71, end: 80 },
        FieldConstraint::ZeroRun { start: 87, end: 104 },
        FieldConstraint::ZeroRun { start: 112, end: 116 },
        FieldConstraint::ZeroRun { start: 120, end: 150 },
    ],
};

/// Decode a whole `XMASTER` buffer.
pub fn decode(
    buf: &[u8],
    config: &DecodeConfig,
) -> DecodeResult<TableDecode<OverflowCatalogRecord>> {
    decode_table(
        buf,
        TABLE,
        RECORD_WIDTH,
        config.policy,
        check_header,
        |_, slot| decode_record(slot),
    )
}

/// Validate the header slot and return the declared record count.
fn check_header(header: &RecordView<'_>) -> DecodeResult<usize> {
    let magic = header.bytes(0, 4)?;
    if magic != MAGIC {
        return Err(DecodeError::header_mismatch(
            TABLE,
            0,
            format!("magic 0x{}", hex::encode(MAGIC)),
            magic,
        ));
    }

    let count = header.read_u16_le(10)?;
    let count_alt = header.read_u16_le(14)?;
    if count_alt != count {
        return Err(DecodeError::header_mismatch(
            TABLE,
            14,
            format!("repeated record count {count}"),
            header.bytes(14, 2)?,
        ));
    }

    // Allocation high-water mark: the next free record slot, so it must
    // sit strictly past every live record.
    let last_used = header.read_u16_le(18)?;
    if last_used <= count {
        return Err(DecodeError::header_mismatch(
            TABLE,
            18,
            format!("last-used marker above record count {count}"),
            header.bytes(18, 2)?,
        ));
    }

    for offset in [12usize, 13, 16, 17, 20, 21] {
        let b = header.read_u8(offset)?;
        if b != 0 {
            return Err(DecodeError::header_mismatch(TABLE, offset, "0x00", &[b]));
        }
    }

    Ok(usize::from(count))
}

/// Decode one 150-byte record slot.
pub fn decode_record(slot: &RecordView<'_>) -> DecodeResult<OverflowCatalogRecord> {
    RECORD_LAYOUT.check(slot)?;

    let file_number = slot.read_u16_le(65)?;
    if file_number < MIN_FILE_NUMBER {
        return Err(DecodeError::range_violation(
            "overflow catalog file number",
            f64::from(file_number),
            format!("{MIN_FILE_NUMBER}..=65535"),
        ));
    }

    let tf_byte = slot.read_u8(TIME_FRAME_OFFSET)?;
    let time_frame = TimeFrame::try_from(tf_byte as char).map_err(|e| {
        DecodeError::UnsupportedTimeFrame {
            found: e.found,
            offset: TIME_FRAME_OFFSET,
        }
    })?;

    Ok(OverflowCatalogRecord {
        file_number,
        ticker_symbol: slot.read_string(1, 14)?,
        display_name: slot.read_string(16, 45)?,
        time_frame,
        field_mask: FieldMask::from(slot.read_u8(70)?),
        start_date: slot.read_i32_le(80)?,
        first_date: slot.read_i32_le(104)?,
        last_date: slot.read_i32_le(108)?,
        last_date_alt: slot.read_i32_le(116)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecodeConfig;

    fn record(file_number: u16, mask: u8, symbol: &str, name: &str) -> [u8; RECORD_WIDTH] {
        let mut r = [0u8; RECORD_WIDTH];
        r[0] = RECORD_MARKER;
        r[1..1 + symbol.len()].copy_from_slice(symbol.as_bytes());
        r[16..16 + name.len()].copy_from_slice(name.as_bytes());
        r[62] = b'D';
        r[65..67].copy_from_slice(&file_number.to_le_bytes());
        r[70] = mask;
        r[80..84].copy_from_slice(&19_980_105i32.to_le_bytes());
        r[104..108].copy_from_slice(&19_980_105i32.to_le_bytes());
        r[108..112].copy_from_slice(&20_051_230i32.to_le_bytes());
        r[116..120].copy_from_slice(&20_051_230i32.to_le_bytes());
        r
    }

    fn table(records: &[[u8; RECORD_WIDTH]]) -> Vec<u8> {
        let mut buf = vec![0u8; RECORD_WIDTH];
        buf[0..4].copy_from_slice(&MAGIC);
        let count = records.len() as u16;
        buf[10..12].copy_from_slice(&count.to_le_bytes());
        buf[14..16].copy_from_slice(&count.to_le_bytes());
        buf[18..20].copy_from_slice(&(count + 1).to_le_bytes());
        for r in records {
            buf.extend_from_slice(r);
        }
        buf
    }

    #[test]
    fn well_formed_table_recovers_every_field() {
        let buf = table(&[record(300, 0x7F, "NEWISSUE", "New Issue Corp")]);
        let decoded = decode(&buf, &DecodeConfig::strict()).unwrap();
        let (_, rec) = &decoded.records[0];
        assert_eq!(rec.file_number, 300);
        assert_eq!(rec.ticker_symbol, "NEWISSUE");
        assert_eq!(rec.display_name, "New Issue Corp");
        assert_eq!(rec.field_mask, FieldMask::FULL);
        assert_eq!(rec.data_length(), 28);
        assert_eq!(rec.start_date, 19_980_105);
        assert_eq!(rec.last_date, 20_051_230);
        assert_eq!(rec.last_date_alt, 20_051_230);
    }

    #[test]
    fn six_column_mask_derives_24_byte_records() {
        let buf = table(&[record(400, 0x3F, "NOOI", "No Open Interest")]);
        let decoded = decode(&buf, &DecodeConfig::strict()).unwrap();
        let (_, rec) = &decoded.records[0];
        assert_eq!(rec.data_length(), 24);
    }

    #[test]
    fn bad_magic_is_a_header_mismatch() {
        let mut buf = table(&[record(300, 0x7F, "X", "X")]);
        buf[1] = 0;
        let err = decode(&buf, &DecodeConfig::strict()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::HeaderMismatch { table: TABLE, offset: 0, .. }
        ));
    }

    #[test]
    fn last_used_marker_must_exceed_count() {
        let mut buf = table(&[record(300, 0x7F, "X", "X")]);
        buf[18..20].copy_from_slice(&1u16.to_le_bytes());
        let err = decode(&buf, &DecodeConfig::strict()).unwrap_err();
        assert!(matches!(err, DecodeError::HeaderMismatch { offset: 18, .. }));
    }

    #[test]
    fn file_numbers_at_or_below_255_are_rejected() {
        let buf = table(&[record(255, 0x7F, "LOW", "Too Low")]);
        let err = decode(&buf, &DecodeConfig::strict()).unwrap_err();
        assert!(matches!(err, DecodeError::RangeViolation { .. }));
    }

    #[test]
    fn illegal_field_mask_is_a_field_violation() {
        let buf = table(&[record(300, 0x1F, "MASK", "Bad Mask")]);
        let err = decode(&buf, &DecodeConfig::strict()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::RecordFieldViolation { offset: 70, .. }
        ));
    }
}
