//! Sampling period of a price series.
//!
//! The catalogs store the time frame as a single ASCII byte. Only daily
//! bars (`'D'`) are supported; intraday frames exist in the wild but are
//! out of scope for the decoder.

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time frame marker byte as stored in all three catalog formats.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TryFromPrimitive,
)]
pub enum TimeFrame {
    /// Daily bars, marker byte `'D'`. The only supported frame.
    Daily = b'D',
}

impl TimeFrame {
    /// The on-disk marker byte.
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

/// A time-frame byte that is not `'D'`.
///
/// Carries the raw byte so the caller can report what the file actually
/// contained (e.g. `'I'` for intraday exports).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unsupported time frame byte {found:#04x} (only daily 'D' series are supported)")]
pub struct UnsupportedTimeFrameByte {
    pub found: u8,
}

impl TryFrom<char> for TimeFrame {
    type Error = UnsupportedTimeFrameByte;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u8::try_from(c)
            .ok()
            .and_then(|b| TimeFrame::try_from_primitive(b).ok())
            .ok_or(UnsupportedTimeFrameByte { found: c as u8 })
    }
}
