//! Packed-date codec.
//!
//! Catalog and quote records store dates as floats holding
//! `(year - 1900) * 10000 + month * 100 + day`, so `1040101.0` means
//! 2004-01-01. Adding 19,000,000 yields the eight-digit `YYYYMMDD`
//! integer the decoded records carry.

use crate::error::{DecodeError, DecodeResult};

/// Smallest legal packed date: 1900-01-01.
pub const PACKED_DATE_MIN: f32 = 101.0;
/// Largest legal packed date: 2199-12-31.
pub const PACKED_DATE_MAX: f32 = 1_991_231.0;

/// Century offset turning a packed date into `YYYYMMDD`.
const CENTURY_OFFSET: u32 = 19_000_000;

/// Decode a packed-date float into a `YYYYMMDD` integer.
///
/// The input must be integral and within `[101, 1991231]`; values below
/// encode an impossible month/day, values above exceed the supported
/// year range. Anything else is a [`DecodeError::RangeViolation`].
pub fn decode_packed_date(value: f32) -> DecodeResult<u32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(DecodeError::range_violation(
            "packed date",
            f64::from(value),
            "integral values only",
        ));
    }
    if !(PACKED_DATE_MIN..=PACKED_DATE_MAX).contains(&value) {
        return Err(DecodeError::range_violation(
            "packed date",
            f64::from(value),
            format!("{PACKED_DATE_MIN}..={PACKED_DATE_MAX}"),
        ));
    }
    Ok(value as u32 + CENTURY_OFFSET)
}

/// Best-effort variant for fields the on-disk format never validated.
///
/// The extended catalog carries date floats that are zero or garbage in
/// many real files; those become `None` instead of failing the record.
pub fn decode_packed_date_lenient(value: f32) -> Option<u32> {
    decode_packed_date(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_fixed_points() {
        assert_eq!(decode_packed_date(40101.0).unwrap(), 19_040_101);
        assert_eq!(decode_packed_date(1_991_231.0).unwrap(), 21_991_231);
        assert_eq!(decode_packed_date(101.0).unwrap(), 19_000_101);
        assert_eq!(decode_packed_date(1_040_101.0).unwrap(), 20_040_101);
    }

    #[test]
    fn below_range_is_a_range_violation() {
        assert!(matches!(
            decode_packed_date(100.0),
            Err(DecodeError::RangeViolation { .. })
        ));
        assert!(decode_packed_date(0.0).is_err());
        assert!(decode_packed_date(1_991_232.0).is_err());
    }

    #[test]
    fn non_integral_input_is_a_range_violation() {
        assert!(matches!(
            decode_packed_date(40101.5),
            Err(DecodeError::RangeViolation { .. })
        ));
        assert!(decode_packed_date(f32::NAN).is_err());
        assert!(decode_packed_date(f32::INFINITY).is_err());
    }

    #[test]
    fn lenient_decode_absorbs_blank_fields() {
        assert_eq!(decode_packed_date_lenient(0.0), None);
        assert_eq!(decode_packed_date_lenient(1_040_101.0), Some(20_040_101));
    }
}
