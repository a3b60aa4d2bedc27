// Copyright 2022 Redglyph
//
// Standard format dialect: a letter from {B, D, E, F, G, X} followed by an
// optional 0-99 precision, dispatched onto the digit buffer and rendered
// linearly (sign, integer digits, decimal tail, minimal exponent).

use crate::digits::DigitBuffer;

/// A recognized standard format specification.
pub(crate) struct StandardFormat {
    /// format letter, lowercased
    letter: u8,
    /// whether the letter was uppercase (selects the digit case for `X`)
    uppercase: bool,
    /// explicit precision, `None` for the type-dependent default
    precision: Option<u32>,
}

impl StandardFormat {
    /// Recognizes a standard specification: 1 to 3 characters, a letter from
    /// `{b, d, e, f, g, x}` (case-insensitive) then 0-2 decimal digits.
    ///
    /// The integer-base letters do not apply to floating-point values, so for
    /// those `is_float` rejects them and the caller falls through to the
    /// custom dialect.
    pub fn parse(spec: &str, is_float: bool) -> Option<StandardFormat> {
        let bytes = spec.as_bytes();
        if bytes.is_empty() || bytes.len() > 3 {
            return None;
        }
        let letter = bytes[0].to_ascii_lowercase();
        if !matches!(letter, b'b' | b'd' | b'e' | b'f' | b'g' | b'x') {
            return None;
        }
        if is_float && matches!(letter, b'b' | b'd' | b'x') {
            return None;
        }
        let mut precision = None;
        if bytes.len() > 1 {
            let mut p = 0;
            for &c in &bytes[1..] {
                if !c.is_ascii_digit() {
                    return None;
                }
                p = p * 10 + (c - b'0') as u32;
            }
            precision = Some(p);
        }
        Some(StandardFormat {
            letter,
            uppercase: bytes[0].is_ascii_uppercase(),
            precision,
        })
    }

    /// Whether the specification renders in base 2 or base 16.
    pub fn is_non_decimal(&self) -> bool {
        matches!(self.letter, b'b' | b'x')
    }

    /// Shapes the buffer for this specification. Defaults: `E` 6 decimals,
    /// `F` 2 decimals, `G` the type's significant-digit count, integer bases
    /// no zero-padding.
    pub fn shape(&self, buf: &mut DigitBuffer) {
        match self.letter {
            b'b' => buf.format_integer(self.precision.unwrap_or(0), 2, false),
            b'd' => buf.format_integer(self.precision.unwrap_or(0), 10, false),
            b'x' => buf.format_integer(self.precision.unwrap_or(0), 16, self.uppercase),
            b'e' => buf.format_exponential(self.precision.unwrap_or(6)),
            b'f' => buf.format_fixed_point(self.precision.unwrap_or(2)),
            b'g' => {
                // zero significant digits would round everything away, so an
                // explicit 0 selects the type default like an absent precision
                let precision = match self.precision {
                    Some(p) if p > 0 => p,
                    _ => buf.default_precision(),
                };
                buf.format_general(precision);
            }
            _ => unreachable!("unrecognized standard format letter"),
        }
    }
}

/// Renders a shaped buffer in the standard layout: optional '-', integer
/// digits with their synthesized zeros, '.' and the decimal digits only when
/// any exist, and in exponential mode a minimal exponent ('e', '-' only when
/// negative, bare digits).
pub(crate) fn render(buf: &DigitBuffer, out: &mut String) {
    if buf.is_negative() {
        out.push('-');
    }
    for i in 0..buf.integer_digit_count() {
        out.push(buf.integer_digit(i) as char);
    }
    let decimals = buf.decimal_digit_count();
    if decimals > 0 {
        out.push('.');
        for i in 0..decimals {
            out.push(buf.decimal_digit(i) as char);
        }
    }
    if buf.is_exponential() {
        out.push('e');
        let exponent = buf.exponent();
        if exponent < 0 {
            out.push('-');
        }
        push_integer(out, exponent.unsigned_abs(), 1);
    }
}

/// Appends `value` in decimal, zero-padded to at least `min_digits`.
pub(crate) fn push_integer(out: &mut String, value: u32, min_digits: u32) {
    let mut digits = [0u8; 10];
    let mut n = 0;
    let mut m = value;
    loop {
        digits[n] = b'0' + (m % 10) as u8;
        n += 1;
        m /= 10;
        if m == 0 {
            break;
        }
    }
    for _ in n..min_digits as usize {
        out.push('0');
    }
    for i in (0..n).rev() {
        out.push(digits[i] as char);
    }
}
