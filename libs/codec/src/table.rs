//! Generic "header + N fixed-width records" table reader.
//!
//! All four file formats share the same geometry: the first record slot
//! is a header carrying the record count, data records follow at
//! `width * index` for `index` in `1..=count`, and the declared count
//! must equal `buffer_size / width - 1`. This module owns that geometry
//! plus the strict/permissive record-scan policy; the format modules
//! supply the header check and the per-record decoder.

use tracing::{debug, warn};

use crate::buffers::RecordView;
use crate::config::ValidationPolicy;
use crate::error::{DecodeError, DecodeResult};

/// Outcome of scanning one table.
///
/// In strict mode `violations` is always empty; in permissive mode it
/// carries every record-level violation keyed by the 1-based record
/// index, and `records` holds the entries that decoded cleanly, each
/// paired with its index so cross-table alignment survives gaps.
#[derive(Debug, Clone)]
pub struct TableDecode<T> {
    /// Record count derived from the header and buffer geometry.
    pub record_count: usize,
    /// Cleanly decoded records with their 1-based slot index.
    pub records: Vec<(usize, T)>,
    /// Record-level violations, keyed by 1-based slot index.
    pub violations: Vec<(usize, DecodeError)>,
}

impl<T> TableDecode<T> {
    /// Whether every record slot decoded without violation.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Look up a decoded record by its 1-based slot index.
    pub fn record(&self, index: usize) -> Option<&T> {
        self.records
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, r)| r)
    }
}

/// Decode one table buffer.
///
/// `check_header` validates the format-specific header slot and returns
/// the declared record count; `decode_record` turns one record slot into
/// a typed value. Header violations are fatal regardless of policy; the
/// policy only governs the record scan.
pub fn decode_table<T>(
    buf: &[u8],
    table: &'static str,
    width: usize,
    policy: ValidationPolicy,
    check_header: impl Fn(&RecordView<'_>) -> DecodeResult<usize>,
    decode_record: impl Fn(usize, &RecordView<'_>) -> DecodeResult<T>,
) -> DecodeResult<TableDecode<T>> {
    if buf.len() < width {
        return Err(DecodeError::buffer_too_small(
            width,
            buf.len(),
            format!("{table} header slot"),
        ));
    }
    if buf.len() % width != 0 {
        return Err(DecodeError::HeaderMismatch {
            table,
            offset: 0,
            expected: format!("buffer size divisible by record width {width}"),
            actual: format!("{} bytes", buf.len()),
            diagnosis: "truncated file or wrong record width".to_string(),
        });
    }

    let header = RecordView::new(&buf[..width]);
    let declared = check_header(&header)?;
    let derived = buf.len() / width - 1;
    if declared != derived {
        return Err(DecodeError::count_mismatch(table, 0, declared, derived));
    }

    let mut records = Vec::with_capacity(derived);
    let mut violations = Vec::new();
    for index in 1..=derived {
        let slot = RecordView::new(&buf[width * index..width * (index + 1)]);
        match decode_record(index, &slot) {
            Ok(record) => records.push((index, record)),
            Err(err) => match policy {
                ValidationPolicy::Strict => return Err(err),
                ValidationPolicy::Permissive => {
                    warn!(table, record = index, %err, "record failed validation");
                    violations.push((index, err));
                }
            },
        }
    }

    debug!(
        table,
        records = records.len(),
        violations = violations.len(),
        "table decoded"
    );
    Ok(TableDecode {
        record_count: derived,
        records,
        violations,
    })
}
