//! Decoded daily price bars.

use serde::{Deserialize, Serialize};

/// One daily OHLCV bar recovered from a per-symbol data file.
///
/// `open_interest` is `None` when the record layout has no such column
/// (record width below 28 bytes); it is never silently zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Bar date as `YYYYMMDD`.
    pub date: u32,
    pub open: f32,
    pub high: f32,
    pub low: f32,
    pub close: f32,
    pub volume: f32,
    /// Open interest, present only for 28-byte (seven-column) records.
    pub open_interest: Option<f32>,
}
