//! Decode errors for the catalog and quote-table codec.
//!
//! Every invariant violation is reported as a value with enough context
//! to pinpoint the offending bytes. The legacy implementation aborted on
//! the first bad byte; here callers choose between failing fast and
//! collecting violations per record (see [`crate::config::ValidationPolicy`]).

use thiserror::Error;

/// Decode failures with diagnostic context.
///
/// Each variant carries the specific offsets and byte values involved so
/// a migration tool can report exactly which part of which table was
/// malformed, instead of a bare "assertion failed".
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// Read past the end of the supplied buffer.
    #[error("buffer too small: need {need} bytes, got {got} (context: {context})")]
    BufferTooSmall {
        need: usize,
        got: usize,
        context: String,
    },

    /// A table header failed validation: bad magic, nonzero reserved
    /// bytes, or a declared record count that disagrees with the buffer.
    #[error("{table} header mismatch at offset {offset}: expected {expected}, got {actual} (diagnosis: {diagnosis})")]
    HeaderMismatch {
        table: &'static str,
        offset: usize,
        expected: String,
        actual: String,
        diagnosis: String,
    },

    /// A fixed-layout record field did not match its required pattern.
    #[error("{table} record field violation at offset {offset}: expected {expected}, got 0x{actual}")]
    RecordFieldViolation {
        table: &'static str,
        offset: usize,
        expected: String,
        /// Hex dump of the offending bytes.
        actual: String,
    },

    /// A numeric field fell outside its allowed domain (packed date,
    /// file number, vendor float exponent, record width).
    #[error("range violation: {field} = {value} not in {allowed}")]
    RangeViolation {
        field: &'static str,
        value: f64,
        allowed: String,
    },

    /// The legacy and extended catalogs disagree. Index 0 stands for the
    /// header slot (record-count mismatch); data records are 1-based.
    #[error("cross-table inconsistency at record {index}: {field} legacy={legacy} extended={extended}")]
    CrossTableInconsistency {
        index: usize,
        field: &'static str,
        legacy: u64,
        extended: u64,
    },

    /// A catalog entry's data file was not supplied by the caller.
    #[error("missing data file {file_name} for catalog entry")]
    MissingDataFile { file_name: String },

    /// A data file's size does not fit the catalog-derived record width.
    #[error("data file size mismatch: {size} bytes is not a whole number of {record_width}-byte slots (context: {context})")]
    DataFileSizeMismatch {
        size: usize,
        record_width: usize,
        context: String,
    },

    /// A record's time-frame byte selects anything but daily bars.
    #[error("unsupported time frame {found:#04x} at offset {offset}: only daily 'D' series are decoded")]
    UnsupportedTimeFrame { found: u8, offset: usize },
}

impl DecodeError {
    /// Build a [`DecodeError::BufferTooSmall`] with read context.
    pub fn buffer_too_small(need: usize, got: usize, context: impl Into<String>) -> Self {
        Self::BufferTooSmall {
            need,
            got,
            context: context.into(),
        }
    }

    /// Build a [`DecodeError::HeaderMismatch`] with a diagnosis derived
    /// from the observed bytes.
    pub fn header_mismatch(
        table: &'static str,
        offset: usize,
        expected: impl Into<String>,
        actual_bytes: &[u8],
    ) -> Self {
        let diagnosis = if actual_bytes.iter().all(|&b| b == 0) {
            "empty or truncated catalog file"
        } else if actual_bytes.iter().all(|&b| b == 0xFF) {
            "unformatted or corrupted header"
        } else {
            "wrong file format or damaged header"
        };

        Self::HeaderMismatch {
            table,
            offset,
            expected: expected.into(),
            actual: format!("0x{}", hex::encode(actual_bytes)),
            diagnosis: diagnosis.to_string(),
        }
    }

    /// Build a [`DecodeError::HeaderMismatch`] for a record-count field
    /// that disagrees with the buffer geometry.
    pub fn count_mismatch(
        table: &'static str,
        offset: usize,
        declared: usize,
        derived: usize,
    ) -> Self {
        Self::HeaderMismatch {
            table,
            offset,
            expected: format!("record count {derived} (from buffer size)"),
            actual: format!("{declared}"),
            diagnosis: "header count disagrees with file length".to_string(),
        }
    }

    /// Build a [`DecodeError::RecordFieldViolation`] with a hex dump of
    /// the offending bytes.
    pub fn field_violation(
        table: &'static str,
        offset: usize,
        expected: impl Into<String>,
        actual_bytes: &[u8],
    ) -> Self {
        Self::RecordFieldViolation {
            table,
            offset,
            expected: expected.into(),
            actual: hex::encode(actual_bytes),
        }
    }

    /// Build a [`DecodeError::RangeViolation`].
    pub fn range_violation(field: &'static str, value: f64, allowed: impl Into<String>) -> Self {
        Self::RangeViolation {
            field,
            value,
            allowed: allowed.into(),
        }
    }

    /// Build a [`DecodeError::MissingDataFile`].
    pub fn missing_data_file(file_name: impl Into<String>) -> Self {
        Self::MissingDataFile {
            file_name: file_name.into(),
        }
    }

    /// Build a [`DecodeError::DataFileSizeMismatch`].
    pub fn size_mismatch(size: usize, record_width: usize, context: impl Into<String>) -> Self {
        Self::DataFileSizeMismatch {
            size,
            record_width,
            context: context.into(),
        }
    }
}

/// Result type for decode operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
