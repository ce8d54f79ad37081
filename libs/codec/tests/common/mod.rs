//! Shared synthetic-file builders for the integration tests.
//!
//! Builds byte-exact catalog and quote buffers that satisfy every
//! header/record invariant, so tests can flip individual bytes and
//! assert on the precise violation that surfaces.

// Each test binary uses a different subset of the builders.
#![allow(dead_code)]

use std::sync::Once;

use codec::float::encode_legacy_f32;

static TRACING: Once = Once::new();

/// Install the env-filtered log subscriber once per test binary so
/// permissive-mode warnings show up under `RUST_LOG=warn`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub const MASTER_WIDTH: usize = 53;
pub const EMASTER_WIDTH: usize = 192;
pub const XMASTER_WIDTH: usize = 150;

pub struct Symbol {
    pub file_number: u16,
    pub ticker: &'static str,
    pub name: &'static str,
    pub start: f32,
    pub end: f32,
}

impl Symbol {
    pub fn new(file_number: u16, ticker: &'static str, name: &'static str) -> Self {
        Self {
            file_number,
            ticker,
            name,
            start: 1_040_102.0,
            end: 1_051_230.0,
        }
    }
}

pub fn master_record(sym: &Symbol) -> [u8; MASTER_WIDTH] {
    let mut r = [0u8; MASTER_WIDTH];
    r[0] = sym.file_number as u8;
    r[1] = 0x65;
    r[3] = 0x1C;
    r[4] = 0x07;
    r[7..7 + sym.name.len()].copy_from_slice(sym.name.as_bytes());
    r[25..29].copy_from_slice(&encode_legacy_f32(sym.start));
    r[29..33].copy_from_slice(&encode_legacy_f32(sym.end));
    r[33] = b'D';
    r[36..36 + sym.ticker.len()].copy_from_slice(sym.ticker.as_bytes());
    r
}

pub fn master_file(symbols: &[Symbol]) -> Vec<u8> {
    let mut buf = vec![0u8; MASTER_WIDTH];
    buf[0] = symbols.len() as u8;
    buf[2] = symbols.len() as u8;
    for sym in symbols {
        buf.extend_from_slice(&master_record(sym));
    }
    buf
}

pub fn emaster_record(sym: &Symbol, long_name: &str) -> [u8; EMASTER_WIDTH] {
    let mut r = [0u8; EMASTER_WIDTH];
    r[2] = sym.file_number as u8;
    r[6] = 0x07;
    r[7] = 0x7F;
    r[9] = 0x20;
    r[11..11 + sym.ticker.len()].copy_from_slice(sym.ticker.as_bytes());
    r[32..32 + sym.name.len()].copy_from_slice(sym.name.as_bytes());
    r[60] = b'D';
    r[64..68].copy_from_slice(&encode_legacy_f32(sym.start));
    r[72..76].copy_from_slice(&encode_legacy_f32(sym.end));
    r[139..139 + long_name.len()].copy_from_slice(long_name.as_bytes());
    r
}

pub fn emaster_file(symbols: &[Symbol]) -> Vec<u8> {
    let mut buf = vec![0u8; EMASTER_WIDTH];
    buf[0] = symbols.len() as u8;
    buf[2] = symbols.len() as u8;
    for sym in symbols {
        buf.extend_from_slice(&emaster_record(sym, ""));
    }
    buf
}

pub fn xmaster_record(sym: &Symbol, mask: u8) -> [u8; XMASTER_WIDTH] {
    let mut r = [0u8; XMASTER_WIDTH];
    r[0] = 0x01;
    r[1..1 + sym.ticker.len()].copy_from_slice(sym.ticker.as_bytes());
    r[16..16 + sym.name.len()].copy_from_slice(sym.name.as_bytes());
    r[62] = b'D';
    r[65..67].copy_from_slice(&sym.file_number.to_le_bytes());
    r[70] = mask;
    r[80..84].copy_from_slice(&19_980_105i32.to_le_bytes());
    r[104..108].copy_from_slice(&19_980_105i32.to_le_bytes());
    r[108..112].copy_from_slice(&20_051_230i32.to_le_bytes());
    r[116..120].copy_from_slice(&20_051_230i32.to_le_bytes());
    r
}

pub fn xmaster_file(symbols: &[(Symbol, u8)]) -> Vec<u8> {
    let mut buf = vec![0u8; XMASTER_WIDTH];
    buf[0..4].copy_from_slice(&[0x5D, 0xFE, b'X', b'M']);
    let count = symbols.len() as u16;
    buf[10..12].copy_from_slice(&count.to_le_bytes());
    buf[14..16].copy_from_slice(&count.to_le_bytes());
    buf[18..20].copy_from_slice(&(count + 1).to_le_bytes());
    for (sym, mask) in symbols {
        buf.extend_from_slice(&xmaster_record(sym, *mask));
    }
    buf
}

/// One synthetic OHLCV bar at the given record width.
pub fn quote_bar(width: usize, packed_date: f32, close: f32, volume: f32) -> Vec<u8> {
    let mut r = vec![0u8; width];
    r[0..4].copy_from_slice(&encode_legacy_f32(packed_date));
    r[4..8].copy_from_slice(&encode_legacy_f32(close - 0.5));
    r[8..12].copy_from_slice(&encode_legacy_f32(close + 1.0));
    r[12..16].copy_from_slice(&encode_legacy_f32(close - 1.0));
    r[16..20].copy_from_slice(&encode_legacy_f32(close));
    r[20..24].copy_from_slice(&encode_legacy_f32(volume));
    if width >= 28 {
        r[24..28].copy_from_slice(&encode_legacy_f32(1_500.0));
    }
    r
}

pub fn quote_file(width: usize, bars: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = vec![0u8; width];
    let total_slots = (bars.len() + 1) as u16;
    buf[2..4].copy_from_slice(&total_slots.to_le_bytes());
    for bar in bars {
        buf.extend_from_slice(bar);
    }
    buf
}
