//! Generic fixed-layout record constraints.
//!
//! ## Purpose
//!
//! The three catalog formats are structurally similar: a fixed record
//! width and a list of "this byte must equal that constant" rules
//! reverse-engineered from sample files. Instead of three hand-rolled
//! validators, each format declares its layout as a static constraint
//! table and this module runs them, reporting the offending offset, the
//! expected pattern, and the actual bytes on the first miss.
//!
//! Typed field extraction stays in the per-format decoders; this engine
//! only enforces the byte-level invariants.

use crate::buffers::RecordView;
use crate::error::{DecodeError, DecodeResult};

/// One byte-level invariant of a fixed-layout record.
#[derive(Debug, Clone, Copy)]
pub enum FieldConstraint {
    /// The byte at `offset` must equal `value`.
    Exact { offset: usize, value: u8 },
    /// Every byte in `start..end` must be zero.
    ZeroRun { start: usize, end: usize },
    /// The byte at `offset` must be one of `allowed`.
    OneOf {
        offset: usize,
        allowed: &'static [u8],
    },
    /// The byte at `offset` must be nonzero.
    NonZero { offset: usize },
}

/// Static description of one record format.
#[derive(Debug, Clone, Copy)]
pub struct RecordLayout {
    /// Table name used in error reports (`"MASTER"`, `"EMASTER"`, ...).
    pub table: &'static str,
    /// Fixed record width in bytes.
    pub width: usize,
    /// Byte-level invariants checked before any field extraction.
    pub constraints: &'static [FieldConstraint],
}

impl RecordLayout {
    /// Check every constraint against one record slot.
    ///
    /// Fails with [`DecodeError::BufferTooSmall`] if the slot is shorter
    /// than the declared width, otherwise with the first
    /// [`DecodeError::RecordFieldViolation`] encountered. A record that
    /// fails here must not be partially decoded.
    pub fn check(&self, record: &RecordView<'_>) -> DecodeResult<()> {
        if record.len() < self.width {
            return Err(DecodeError::buffer_too_small(
                self.width,
                record.len(),
                format!("{} record slot", self.table),
            ));
        }

        for constraint in self.constraints {
            match *constraint {
                FieldConstraint::Exact { offset, value } => {
                    let actual = record.read_u8(offset)?;
                    if actual != value {
                        return Err(DecodeError::field_violation(
                            self.table,
                            offset,
                            format!("{value:#04x}"),
                            &[actual],
                        ));
                    }
                }
                FieldConstraint::ZeroRun { start, end } => {
                    let run = record.bytes(start, end - start)?;
                    if let Some(pos) = run.iter().position(|&b| b != 0) {
                        return Err(DecodeError::field_violation(
                            self.table,
                            start + pos,
                            format!("zero run {start}..{end}"),
                            &run[pos..=pos],
                        ));
                    }
                }
                FieldConstraint::OneOf { offset, allowed } => {
                    let actual = record.read_u8(offset)?;
                    if !allowed.contains(&actual) {
                        return Err(DecodeError::field_violation(
                            self.table,
                            offset,
                            format!("one of 0x{}", hex::encode(allowed)),
                            &[actual],
                        ));
                    }
                }
                FieldConstraint::NonZero { offset } => {
                    let actual = record.read_u8(offset)?;
                    if actual == 0 {
                        return Err(DecodeError::field_violation(
                            self.table,
                            offset,
                            "nonzero byte",
                            &[0],
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
