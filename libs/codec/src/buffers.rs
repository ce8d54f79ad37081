//! Bounds-checked reads over caller-owned byte buffers.
//!
//! ## Purpose
//!
//! Every field in the catalog and quote formats is defined purely by a
//! byte offset and width, and the legacy implementation read them with
//! raw pointer arithmetic. [`RecordView`] replaces that with a borrowed
//! view that rejects any read past its known length, so truncated or
//! malformed files surface as [`DecodeError::BufferTooSmall`] values
//! instead of undefined behavior.
//!
//! The view never copies bytes except for extracted string and numeric
//! fields; it borrows the caller's buffer for its whole lifetime.

use crate::error::{DecodeError, DecodeResult};
use crate::float;

/// Read-only, bounds-known view over a byte buffer.
///
/// Wraps either a whole table file or one record slot within it; all
/// offsets are relative to the view's start.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    data: &'a [u8],
}

impl<'a> RecordView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> DecodeResult<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| DecodeError::buffer_too_small(usize::MAX, self.data.len(), "offset overflow"))?;
        if end > self.data.len() {
            return Err(DecodeError::buffer_too_small(
                end,
                self.data.len(),
                format!("{len}-byte read at offset {offset}"),
            ));
        }
        Ok(&self.data[offset..end])
    }

    pub fn read_u8(&self, offset: usize) -> DecodeResult<u8> {
        Ok(self.bytes(offset, 1)?[0])
    }

    pub fn read_i8(&self, offset: usize) -> DecodeResult<i8> {
        Ok(self.read_u8(offset)? as i8)
    }

    /// Little-endian unsigned 16-bit read: `b0 | (b1 << 8)`.
    pub fn read_u16_le(&self, offset: usize) -> DecodeResult<u16> {
        let b = self.bytes(offset, 2)?;
        Ok(u16::from(b[0]) | u16::from(b[1]) << 8)
    }

    /// Little-endian signed 32-bit read, sign extended from the most
    /// significant byte.
    pub fn read_i32_le(&self, offset: usize) -> DecodeResult<i32> {
        let b = self.bytes(offset, 4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read four bytes and run them through the vendor float codec.
    pub fn read_legacy_f32(&self, offset: usize) -> DecodeResult<f32> {
        let b = self.bytes(offset, 4)?;
        float::legacy_f32([b[0], b[1], b[2], b[3]])
    }

    /// Extract a fixed-width string field.
    ///
    /// Fields are NUL terminated inside a fixed-width slot and sometimes
    /// space padded; everything from the first NUL on is dropped, then
    /// trailing spaces. Bytes outside ASCII are carried through lossily.
    pub fn read_string(&self, offset: usize, len: usize) -> DecodeResult<String> {
        let raw = self.bytes(offset, len)?;
        let terminated = match raw.iter().position(|&b| b == 0) {
            Some(nul) => &raw[..nul],
            None => raw,
        };
        Ok(String::from_utf8_lossy(terminated).trim_end().to_string())
    }
}
