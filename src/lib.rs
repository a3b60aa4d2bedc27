// Copyright 2022 Redglyph
//
// Numeric-to-text formatting engine: renders integer and floating-point
// values under either a standard format specification ("F2", "X", "G", ...)
// or a custom "picture" format string ("0.##;(0.##);zero") with independent
// sections for positive, negative and zero values.

//! Formats `i64`, `u64`, `f32` and `f64` values to text.
//!
//! Two format dialects are supported:
//!
//! * **standard**: one letter from `{B, D, E, F, G, X}` (case-insensitive)
//!   plus an optional precision in 0-99, e.g. `"X"`, `"D3"`, `"F2"`, `"E6"`;
//! * **custom**: a picture string of literal text, `0`/`#` digit
//!   placeholders, a decimal point and an `e0`-style exponent marker, with up
//!   to three `;`-separated sections for positive, negative and zero values.
//!
//! Anything not recognized as standard is interpreted as custom, so unusual
//! specifications produce literal-looking output instead of failing; the only
//! runtime error is an unterminated quoted literal.
//!
//! ```
//! use numfmt::FormatInterface;
//!
//! assert_eq!(255u64.format(Some("X")).unwrap(), "FF");
//! assert_eq!((-5i64).format(Some("D3")).unwrap(), "-005");
//! assert_eq!(3.14159.format(Some("F2")).unwrap(), "3.14");
//! assert_eq!(1234.5678.format(Some("#,##0.00")).unwrap(), "1,234.57");
//! assert_eq!((-5i64).format(Some("0;(0);Zero")).unwrap(), "(5)");
//! ```

mod maths;
mod digits;
mod standard;
mod custom;

use std::fmt;

pub use crate::digits::DigitBuffer;
use crate::standard::StandardFormat;

/// Formatting failure: the only error the format interpreter can raise at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// a custom format section ended inside a quoted literal
    UnterminatedLiteral,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnterminatedLiteral => f.write_str("unterminated literal in format string"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Formatting interface of the numeric types.
pub trait FormatInterface {
    /// Formats the value, returning the text. `None` (like an empty
    /// specification) selects the general format at the type's default
    /// precision.
    ///
    /// ```
    /// use numfmt::FormatInterface;
    ///
    /// assert_eq!(1.5.format(None).unwrap(), "1.5");
    /// assert_eq!(0.0.format(Some("F2")).unwrap(), "0.00");
    /// ```
    fn format(&self, format: Option<&str>) -> Result<String, FormatError> {
        let mut out = String::new();
        self.format_into(&mut out, format)?;
        Ok(out)
    }

    /// Formats the value, appending the text to `out`.
    fn format_into(&self, out: &mut String, format: Option<&str>) -> Result<(), FormatError>;
}

impl FormatInterface for i64 {
    fn format_into(&self, out: &mut String, format: Option<&str>) -> Result<(), FormatError> {
        if is_non_decimal_format(format) {
            // base 2 and 16 render the two's-complement bit pattern
            (*self as u64).format_into(out, format)
        } else {
            format_value(&mut DigitBuffer::from_i64(*self), format, out)
        }
    }
}

impl FormatInterface for u64 {
    fn format_into(&self, out: &mut String, format: Option<&str>) -> Result<(), FormatError> {
        format_value(&mut DigitBuffer::from_u64(*self), format, out)
    }
}

impl FormatInterface for f32 {
    fn format_into(&self, out: &mut String, format: Option<&str>) -> Result<(), FormatError> {
        if !self.is_finite() {
            push_non_finite(out, f64::from(*self));
            return Ok(());
        }
        format_value(&mut DigitBuffer::from_f32(*self), format, out)
    }
}

impl FormatInterface for f64 {
    fn format_into(&self, out: &mut String, format: Option<&str>) -> Result<(), FormatError> {
        if !self.is_finite() {
            push_non_finite(out, *self);
            return Ok(());
        }
        format_value(&mut DigitBuffer::from_f64(*self), format, out)
    }
}

/// Returns true exactly when `format` is a standard specification resolving
/// to base 2 or base 16. Signed-integer callers use it to decide whether a
/// negative value's bit pattern must be reinterpreted as unsigned first.
///
/// ```
/// assert!(numfmt::is_non_decimal_format(Some("X")));
/// assert!(numfmt::is_non_decimal_format(Some("b8")));
/// assert!(!numfmt::is_non_decimal_format(Some("D3")));
/// assert!(!numfmt::is_non_decimal_format(None));
/// ```
pub fn is_non_decimal_format(format: Option<&str>) -> bool {
    matches!(format.and_then(|spec| StandardFormat::parse(spec, false)),
        Some(standard) if standard.is_non_decimal())
}

/// Routes the buffer through the dialect its specification belongs to.
fn format_value(buf: &mut DigitBuffer, format: Option<&str>, out: &mut String) -> Result<(), FormatError> {
    match format.filter(|spec| !spec.is_empty()) {
        Some(spec) => {
            if let Some(standard) = StandardFormat::parse(spec, buf.is_float()) {
                standard.shape(buf);
                standard::render(buf, out);
                Ok(())
            } else {
                custom::format(buf, spec, out)
            }
        }
        None => {
            let precision = buf.default_precision();
            buf.format_general(precision);
            standard::render(buf, out);
            Ok(())
        }
    }
}

fn push_non_finite(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value < 0.0 {
        out.push_str("-inf");
    } else {
        out.push_str("inf");
    }
}
