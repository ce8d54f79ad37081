//! Extended catalog decoder (`EMASTER`, 192-byte records).
//!
//! Written alongside the legacy catalog by newer application versions;
//! covers the same 1..=255 file-number domain and must agree with the
//! legacy table entry by entry. Adds a long-name fallback for issues
//! whose names overflow the legacy 16-byte field, plus date fields the
//! application itself never validated.
//!
//! ```text
//! header: 0 count | 1 zero | 2 count again | 3 zero | 4..49 zero | 49..53 reserved string
//! record: 2 file# | 3..6 zero | 6 field count | 7 field mask 0x7f | 8 zero | 9 0x20
//!         10 zero | 11..27 symbol | 27..32 zero | 32..48 name | 48..60 zero | 60 'D'
//!         61..64 zero | 64..68 first date | 68..72 zero | 72..76 last date
//!         76..126 zero | 126..130 last date (long format) | 130..139 zero
//!         139..191 long name | 191 zero
//! ```
//!
//! Bytes 0 and 1 vary between files and are not constrained.

use types::{ExtendedCatalogRecord, FieldMask, TimeFrame};

use crate::buffers::RecordView;
use crate::config::DecodeConfig;
use crate::dates::decode_packed_date_lenient;
use crate::error::{DecodeError, DecodeResult};
use crate::layout::{FieldConstraint, RecordLayout};
use crate::table::{decode_table, TableDecode};

pub const TABLE: &str = "EMASTER";
pub const RECORD_WIDTH: usize = 192;

/// Data field count marker: seven 4-byte columns.
const FIELD_COUNT_MARKER: u8 = 0x07;
/// Expected field-presence bitmask.
const FIELD_MASK_MARKER: u8 = 0x7F;

const TIME_FRAME_OFFSET: usize = 60;

static RECORD_LAYOUT: RecordLayout = RecordLayout {
    table: TABLE,
    width: RECORD_WIDTH,
    constraints: &[
        FieldConstraint::NonZero { offset: 2 },
        FieldConstraint::ZeroRun { start: 3, end: 6 },
        FieldConstraint::Exact { offset: 6, value: FIELD_COUNT_MARKER },
        FieldConstraint::Exact { offset: 7, value: FIELD_MASK_MARKER },
        FieldConstraint::Exact { offset: 8, value: 0 },
        FieldConstraint::Exact { offset: 9, value: 0x20 },
        FieldConstraint::Exact { offset: 10, value: 0 },
        FieldConstraint::ZeroRun { start: 27, end: 32 },
        FieldConstraint::ZeroRun { start: 48, end: 60 },
        FieldConstraint::ZeroRun { start: 61, end: 64 },
        FieldConstraint::ZeroRun { start: 68, end: 72 },
        FieldConstraint::ZeroRun { start: 76, end: 126 },
        FieldConstraint::ZeroRun { start: 130, end: 139 },
        FieldConstraint::Exact { offset: 191, value: 0 },
    ],
};

/// Decode a whole `EMASTER` buffer.
pub fn decode(
    buf: &[u8],
    config: &DecodeConfig,
) -> DecodeResult<TableDecode<ExtendedCatalogRecord>> {
    // The record-level file-number bound needs the header count, so peek
    // at it before handing control to the generic reader (which performs
    // the real header validation).
    let record_count = usize::from(*buf.first().ok_or_else(|| {
        DecodeError::buffer_too_small(RECORD_WIDTH, buf.len(), "EMASTER header slot")
    })?);

    decode_table(
        buf,
        TABLE,
        RECORD_WIDTH,
        config.policy,
        check_header,
        move |_, slot| decode_record(slot, record_count),
    )
}

/// Validate the header slot and return the declared record count.
///
/// Same geometry as the legacy catalog header; the trailing bytes hold a
/// short vendor string instead of being reserved zero, and stay
/// unvalidated.
fn check_header(header: &RecordView<'_>) -> DecodeResult<usize> {
    let count = header.read_u8(0)?;
    let count_alt = header.read_u8(2)?;
    if count_alt != count {
        return Err(DecodeError::header_mismatch(
            TABLE,
            2,
            format!("repeated record count {count}"),
            &[count_alt],
        ));
    }
    for offset in [1usize, 3] {
        let b = header.read_u8(offset)?;
        if b != 0 {
            return Err(DecodeError::header_mismatch(TABLE, offset, "0x00", &[b]));
        }
    }
    let reserved = header.bytes(4, 45)?;
    if let Some(pos) = reserved.iter().position(|&b| b != 0) {
        return Err(DecodeError::header_mismatch(
            TABLE,
            4 + pos,
            "reserved zero run 4..49",
            &reserved[pos..=pos],
        ));
    }
    Ok(usize::from(count))
}

/// Decode one 192-byte record slot.
///
/// `record_count` is the table's own declared count; the file number may
/// not exceed it (the extended catalog numbers files densely).
pub fn decode_record(
    slot: &RecordView<'_>,
    record_count: usize,
) -> DecodeResult<ExtendedCatalogRecord> {
    RECORD_LAYOUT.check(slot)?;

    let file_number = slot.read_u8(2)?;
    if usize::from(file_number) > record_count {
        return Err(DecodeError::range_violation(
            "extended catalog file number",
            f64::from(file_number),
            format!("1..={record_count}"),
        ));
    }

    let tf_byte = slot.read_u8(TIME_FRAME_OFFSET)?;
    let time_frame = TimeFrame::try_from(tf_byte as char).map_err(|e| {
        DecodeError::UnsupportedTimeFrame {
            found: e.found,
            offset: TIME_FRAME_OFFSET,
        }
    })?;

    // The application never validated these date fields; blank and
    // garbage values are common in real files, hence the lenient decode.
    let first_date = slot
        .read_legacy_f32(64)
        .ok()
        .and_then(decode_packed_date_lenient);
    let last_date = slot
        .read_legacy_f32(72)
        .ok()
        .and_then(decode_packed_date_lenient);
    let last_date_long = slot
        .read_legacy_f32(126)
        .ok()
        .and_then(decode_packed_date_lenient);

    Ok(ExtendedCatalogRecord {
        file_number,
        field_count: slot.read_u8(6)?,
        field_mask: FieldMask::from(slot.read_u8(7)?),
        ticker_symbol: slot.read_string(11, 16)?,
        name: slot.read_string(32, 16)?,
        long_name: slot.read_string(139, 52)?,
        time_frame,
        first_date,
        last_date,
        last_date_long,
    })
}
