//! Legacy catalog decoder (`MASTER`, 53-byte records).
//!
//! The oldest of the three catalog formats: one record per symbol,
//! limited to data file numbers 1..=255. Layout reverse-engineered from
//! sample files; the marker bytes at offsets 1, 3, and 4 are constant in
//! every file observed.
//!
//! ```text
//! header: 0 count | 1 zero | 2 count again | 3 zero | 4..49 zero | 49..53 unknown
//! record: 0 file# | 1 0x65 | 2 zero | 3 record length | 4 field count | 5..7 zero
//!         7..23 name | 23..25 zero | 25..29 start date | 29..33 end date
//!         33 'D' | 34..36 intraday frame | 36..52 symbol | 52 zero
//! ```

use types::{LegacyCatalogRecord, TimeFrame};

use crate::buffers::RecordView;
use crate::config::DecodeConfig;
use crate::dates::decode_packed_date;
use crate::error::{DecodeError, DecodeResult};
use crate::layout::{FieldConstraint, RecordLayout};
use crate::table::{decode_table, TableDecode};

pub const TABLE: &str = "MASTER";
pub const RECORD_WIDTH: usize = 53;

/// Constant marker after the file number in every record.
const RECORD_TYPE_MARKER: u8 = 0x65;
/// Data record length marker: 28 bytes, seven 4-byte columns.
const RECORD_LENGTH_MARKER: u8 = 0x1C;
/// Data field count marker.
const FIELD_COUNT_MARKER: u8 = 0x07;

const TIME_FRAME_OFFSET: usize = 33;

static RECORD_LAYOUT: RecordLayout = RecordLayout {
    table: TABLE,
    width: RECORD_WIDTH,
    constraints: &[
        FieldConstraint::NonZero { offset: 0 },
        FieldConstraint::Exact { offset: 1, value: RECORD_TYPE_MARKER },
        FieldConstraint::Exact { offset: 2, value: 0 },
        FieldConstraint::Exact { offset: 3, value: RECORD_LENGTH_MARKER },
        FieldConstraint::Exact { offset: 4, value: FIELD_COUNT_MARKER },
        FieldConstraint::ZeroRun { start: 5, end: 7 },
        FieldConstraint::ZeroRun { start: 23, end: 25 },
        FieldConstraint::Exact { offset: 52, value: 0 },
    ],
};

/// Decode a whole `MASTER` buffer.
pub fn decode(buf: &[u8], config: &DecodeConfig) -> DecodeResult<TableDecode<LegacyCatalogRecord>> {
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
///
/// The count is stored twice (offsets 0 and 2) and both copies must
/// agree; offsets 1, 3, and 4..49 are reserved zero. The four trailing
/// bytes are of unknown meaning and stay unvalidated.
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

/// Decode one 53-byte record slot.
pub fn decode_record(slot: &RecordView<'_>) -> DecodeResult<LegacyCatalogRecord> {
    RECORD_LAYOUT.check(slot)?;

    let tf_byte = slot.read_u8(TIME_FRAME_OFFSET)?;
    let time_frame = TimeFrame::try_from(tf_byte as char).map_err(|e| {
        DecodeError::UnsupportedTimeFrame {
            found: e.found,
            offset: TIME_FRAME_OFFSET,
        }
    })?;

    let start_date = decode_packed_date(slot.read_legacy_f32(25)?)?;
    let end_date = decode_packed_date(slot.read_legacy_f32(29)?)?;
    let intraday = slot.bytes(34, 2)?;

    Ok(LegacyCatalogRecord {
        file_number: slot.read_u8(0)?,
        data_length: slot.read_u8(3)?,
        field_count: slot.read_u8(4)?,
        display_name: slot.read_string(7, 16)?,
        start_date,
        end_date,
        time_frame,
        intraday_frame: [intraday[0], intraday[1]],
        ticker_symbol: slot.read_string(36, 16)?,
    })
}
