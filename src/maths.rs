// Copyright 2022 Redglyph
//
// Elementary floating-point helpers used by the digit extraction: decimal
// exponent of a magnitude and range-safe scaling by a power of ten.

/// Largest power of ten that `10f64.powi` can form without overflowing.
const MAX_POW10: i32 = 308;

/// Decimal exponent of `magnitude`, defined as `floor(log10(magnitude)) + 1`,
/// i.e. the number of digits before the decimal point (`0.5` -> 0, `1.5` -> 1,
/// `15.0` -> 2). Returns 0 for a zero magnitude.
///
/// The result may be off by one when `log10` lands within rounding distance of
/// an integer; callers correct it from the digit count actually produced.
pub(crate) fn decimal_exponent(magnitude: f64) -> i32 {
    if magnitude == 0.0 {
        0
    } else {
        magnitude.log10().floor() as i32 + 1
    }
}

/// Multiplies `value` by `10^shift`, splitting the operation in two passes
/// when a single power of ten would leave the representable range. `shift`
/// never exceeds two such passes for any finite input (|shift| <= 339 for
/// subnormal doubles).
pub(crate) fn scale_by_pow10(value: f64, shift: i32) -> f64 {
    debug_assert!(shift.abs() <= 2 * MAX_POW10);
    if shift > MAX_POW10 {
        value * 10f64.powi(MAX_POW10) * 10f64.powi(shift - MAX_POW10)
    } else if shift < -MAX_POW10 {
        value * 10f64.powi(-MAX_POW10) * 10f64.powi(shift + MAX_POW10)
    } else {
        value * 10f64.powi(shift)
    }
}

/// Scales `magnitude` so that it holds `digits + shift` integer digits, where
/// `digits` is the magnitude's own decimal-exponent, and rounds to the nearest
/// integer, half away from zero.
pub(crate) fn scale_to_integer(magnitude: f64, shift: i32) -> u64 {
    scale_by_pow10(magnitude, shift).round() as u64
}
