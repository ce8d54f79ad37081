//! Vendor 4-byte float codec.
//!
//! The quote files store prices in the old Microsoft Basic float layout,
//! not IEEE-754. Storage order b0..b3:
//!
//! ```text
//! MBF  LE:  mmmm|mmmm  mmmm|mmmm  smmm|mmmm  eeee|eeee
//! IEEE LE:  mmmm|mmmm  mmmm|mmmm  emmm|mmmm  seee|eeee
//! ```
//!
//! The mantissa's low 23 bits already line up with IEEE; the sign bit in
//! b2 needs a further 24-bit shift and the exponent byte carries a bias
//! two above IEEE's. Conversion is a pure bit rearrangement followed by
//! `f32::from_bits` — no pointer aliasing.

use crate::error::{DecodeError, DecodeResult};

/// Exponent bias delta between the vendor format and IEEE-754.
const EXPONENT_BIAS_DELTA: u8 = 2;

/// Convert four vendor-format bytes (storage order) into an IEEE `f32`.
///
/// An exponent byte of zero encodes the value 0.0 by convention: blank
/// record slots are all-zero. An exponent byte of 1 would need a negative
/// IEEE exponent field and is rejected as a range violation rather than
/// wrapped into garbage bits.
pub fn legacy_f32(bytes: [u8; 4]) -> DecodeResult<f32> {
    let [b0, b1, b2, b3] = bytes;

    if b3 == 0 {
        return Ok(0.0);
    }
    if b3 < EXPONENT_BIAS_DELTA {
        return Err(DecodeError::range_violation(
            "legacy float exponent byte",
            f64::from(b3),
            "0 or 2..=255",
        ));
    }

    let mantissa = (u32::from(b2) << 16 | u32::from(b1) << 8 | u32::from(b0)) & 0x7F_FFFF;
    let sign = u32::from(b2 & 0x80);
    let exponent = u32::from(b3 - EXPONENT_BIAS_DELTA);
    let ieee_bits = sign << 24 | exponent << 23 | mantissa;

    Ok(f32::from_bits(ieee_bits))
}

/// Encode an IEEE `f32` into the vendor byte order.
///
/// Test-fixture helper: the decoder never writes files, but synthetic
/// catalogs and quote tables need well-formed vendor floats.
pub fn encode_legacy_f32(value: f32) -> [u8; 4] {
    let bits = value.to_bits();
    if bits << 1 == 0 {
        // +0.0 / -0.0 both store as the all-zero slot.
        return [0, 0, 0, 0];
    }
    let mantissa = bits & 0x7F_FFFF;
    let sign = ((bits >> 24) & 0x80) as u8;
    let exponent = ((bits >> 23) & 0xFF) as u8 + EXPONENT_BIAS_DELTA;
    [
        mantissa as u8,
        (mantissa >> 8) as u8,
        (mantissa >> 16) as u8 | sign,
        exponent,
    ]
}
