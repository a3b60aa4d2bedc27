// Copyright 2022 Redglyph
//
// Digit buffer: staging area holding one numeric value's digit sequence and
// layout metadata (sign, decimal place, exponent, synthesized padding counts),
// plus the shaping operations turning the raw value into a renderable layout.
// It knows nothing about format strings.

use ilog::IntLog;

use crate::maths::{decimal_exponent, scale_to_integer};

/// Decimal digits the floating extraction keeps for an `f64` (more would pick
/// up scaling noise).
pub const SIGNIFICANT_F64: u32 = 15;
/// Decimal digits the floating extraction keeps for an `f32`.
pub const SIGNIFICANT_F32: u32 = 7;
/// Decimal digits of `u64::MAX`, the integer default for the general format.
pub const MAX_INTEGER_DIGITS: u32 = 20;

/// Numeric payload of a [DigitBuffer]; the discriminator is checked before
/// any payload access.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// unsigned magnitude of an integer value
    Unsigned(u64),
    /// 32-bit floating-point value
    Single(f32),
    /// 64-bit floating-point value
    Double(f64),
}

/// Staging buffer for one numeric value: an ASCII digit sequence (radix 2-36,
/// most-significant first once generated) and its layout.
///
/// A buffer is built fresh from one value, shaped by exactly one formatting
/// operation, optionally rounded, read back by the renderer and discarded.
/// Padding is tracked as counts and only materialized at render time, so the
/// digit array itself never grows past [DigitBuffer::CAPACITY].
#[derive(Debug, Clone, Copy)]
pub struct DigitBuffer {
    /// formatted value
    value: Value,
    /// sign captured at construction; negative zero counts as negative
    negative: bool,
    /// digit characters, valid in `0..count`
    digits: [u8; Self::CAPACITY],
    /// number of significant digits currently populated
    count: usize,
    /// position of the decimal point relative to the start of `digits`; in
    /// exponential mode, relative to the start of the mantissa
    decimal_place: i32,
    /// synthesized '0' digits before the integer part
    leading_zeros: u32,
    /// synthesized '0' digits after the decimal part
    trailing_zeros: u32,
    /// whether the value renders as mantissa * 10^exponent
    exponential: bool,
    /// decimal exponent, only meaningful when `exponential` is set
    exponent: i32,
}

impl DigitBuffer {
    /// Worst case is a full-width integer in base 2; a double's significant
    /// digits plus one carry-out digit fit with plenty of slack.
    pub const CAPACITY: usize = 64;

    fn new(value: Value, negative: bool) -> Self {
        DigitBuffer {
            value,
            negative,
            digits: [0; Self::CAPACITY],
            count: 0,
            decimal_place: 0,
            leading_zeros: 0,
            trailing_zeros: 0,
            exponential: false,
            exponent: 0,
        }
    }

    /// Creates a buffer from a signed integer. The magnitude is taken with
    /// unsigned arithmetic, so `i64::MIN` does not overflow.
    pub fn from_i64(value: i64) -> Self {
        Self::new(Value::Unsigned(value.unsigned_abs()), value < 0)
    }

    /// Creates a buffer from an unsigned integer.
    pub fn from_u64(value: u64) -> Self {
        Self::new(Value::Unsigned(value), false)
    }

    /// Creates a buffer from a 32-bit float.
    pub fn from_f32(value: f32) -> Self {
        Self::new(Value::Single(value), value.is_sign_negative())
    }

    /// Creates a buffer from a 64-bit float.
    pub fn from_f64(value: f64) -> Self {
        Self::new(Value::Double(value), value.is_sign_negative())
    }

    /// Clears all shaping state, keeping the value and its sign, so the
    /// buffer can be reshaped with different digit/decimal counts.
    pub fn reset(&mut self) {
        self.count = 0;
        self.decimal_place = 0;
        self.leading_zeros = 0;
        self.trailing_zeros = 0;
        self.exponential = false;
        self.exponent = 0;
    }

    // -----------------------------------------------------------------------------------------
    // layout accessors, used by the renderers and the tests

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether the shaped digits represent a zero value (padding counts are
    /// irrelevant, they only ever synthesize zeros).
    pub fn is_zero(&self) -> bool {
        self.count == 0 || self.digits[..self.count].iter().all(|&d| d == b'0')
    }

    pub fn is_float(&self) -> bool {
        !matches!(self.value, Value::Unsigned(_))
    }

    pub fn is_exponential(&self) -> bool {
        self.exponential
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn digit_count(&self) -> usize {
        self.count
    }

    pub fn decimal_place(&self) -> i32 {
        self.decimal_place
    }

    pub fn leading_zeros(&self) -> u32 {
        self.leading_zeros
    }

    pub fn trailing_zeros(&self) -> u32 {
        self.trailing_zeros
    }

    /// Default precision of the value's type: its significant-digit count.
    pub fn default_precision(&self) -> u32 {
        match self.value {
            Value::Unsigned(_) => MAX_INTEGER_DIGITS,
            Value::Single(_) => SIGNIFICANT_F32,
            Value::Double(_) => SIGNIFICANT_F64,
        }
    }

    /// Number of integer digits to render, synthesized leading zeros included.
    pub fn integer_digit_count(&self) -> usize {
        self.leading_zeros as usize + self.decimal_place.max(0) as usize
    }

    /// Number of decimal digits to render, synthesized trailing zeros included.
    pub fn decimal_digit_count(&self) -> usize {
        (self.count as i32 - self.decimal_place).max(0) as usize + self.trailing_zeros as usize
    }

    /// Integer digit at `index`, most-significant first, including the
    /// synthesized zeros on either side of the stored digits.
    pub fn integer_digit(&self, index: usize) -> u8 {
        debug_assert!(index < self.integer_digit_count());
        let lead = self.leading_zeros as usize;
        if index < lead {
            return b'0';
        }
        let pos = index - lead;
        if pos < self.count {
            self.digits[pos]
        } else {
            b'0'
        }
    }

    /// Decimal digit at `index` (0 = first digit after the point), including
    /// the zeros synthesized by a negative decimal place or trailing padding.
    pub fn decimal_digit(&self, index: usize) -> u8 {
        debug_assert!(index < self.decimal_digit_count());
        let pos = self.decimal_place + index as i32;
        if pos < 0 || pos >= self.count as i32 {
            b'0'
        } else {
            self.digits[pos as usize]
        }
    }

    // -----------------------------------------------------------------------------------------
    // digit generation

    /// Renders the integer magnitude in `base`, most-significant first, and
    /// left-pads the layout to `min_digits`.
    ///
    /// Digits above 9 use letters, in the case requested by `uppercase`.
    /// Calling this on a floating-point payload is a programming error.
    pub fn format_integer(&mut self, min_digits: u32, base: u32, uppercase: bool) {
        debug_assert!((2..=36).contains(&base));
        let Value::Unsigned(value) = self.value else {
            unreachable!("integer-base shaping on a floating-point value");
        };
        let base = base as u64;
        let letter = if uppercase { b'A' } else { b'a' };
        let mut m = value;
        let mut n = 0;
        loop {
            let digit = (m % base) as u8;
            self.digits[n] = if digit < 10 { b'0' + digit } else { letter + digit - 10 };
            n += 1;
            m /= base;
            if m == 0 {
                break;
            }
        }
        self.digits[..n].reverse();
        self.count = n;
        self.decimal_place = n as i32;
        self.pad_integer_digits(min_digits);
    }

    /// Extracts the decimal digits of the floating-point magnitude.
    ///
    /// The magnitude is scaled to the type's significant-digit count and
    /// rounded half away from zero; the digit count actually kept is
    /// `num_decimals` when `all_decimal`, otherwise the value's decimal
    /// exponent plus `num_decimals`. Leaves `decimal_place` at the decimal
    /// exponent (carry included), ready for fixed-point rendering or for the
    /// caller to move into an exponent.
    fn format_float(&mut self, num_decimals: i32, all_decimal: bool) {
        let (magnitude, significant) = match self.value {
            Value::Single(f) => (f64::from(f).abs(), SIGNIFICANT_F32),
            Value::Double(f) => (f.abs(), SIGNIFICANT_F64),
            Value::Unsigned(_) => unreachable!("floating extraction on an integer value"),
        };
        if magnitude == 0.0 {
            self.count = 0;
            self.decimal_place = 0;
            return;
        }
        let mut exponent = decimal_exponent(magnitude);
        let scaled = scale_to_integer(magnitude, significant as i32 - exponent);
        if scaled == 0 {
            self.count = 0;
            self.decimal_place = 0;
            return;
        }
        // log10 can land one off on near-power-of-ten magnitudes; the digit
        // count actually produced settles the exponent
        let n = scaled.log10() + 1;
        exponent += n as i32 - significant as i32;
        let mut m = scaled;
        for i in (0..n).rev() {
            self.digits[i] = b'0' + (m % 10) as u8;
            m /= 10;
        }
        self.count = n;
        self.decimal_place = exponent;
        let needed = if all_decimal { num_decimals } else { exponent + num_decimals };
        if needed < self.count as i32 {
            self.round_to_precision(needed.max(0) as usize);
        }
    }

    // -----------------------------------------------------------------------------------------
    // shaping operations

    /// Fixed-point shape: all digits around a decimal point, decimals padded
    /// to `precision`, at least one integer digit.
    pub fn format_fixed_point(&mut self, precision: u32) {
        match self.value {
            Value::Unsigned(_) => self.format_integer(1, 10, false),
            _ => self.format_float(precision as i32, false),
        }
        self.pad_integer_digits(1);
        self.pad_decimal_digits(precision);
    }

    /// Exponential shape with one integer digit and `precision` decimals.
    pub fn format_exponential(&mut self, precision: u32) {
        self.format_custom_exponential(1, precision);
    }

    /// Exponential shape normalized to exactly `integer_digits` digits before
    /// the decimal point; the true exponent minus `integer_digits` becomes
    /// the rendered exponent.
    pub fn format_custom_exponential(&mut self, integer_digits: u32, precision: u32) {
        let total = integer_digits + precision;
        match self.value {
            Value::Unsigned(_) => {
                self.format_integer(1, 10, false);
                self.round_to_precision(total as usize);
            }
            _ => self.format_float(total as i32, true),
        }
        let true_exponent = if self.is_zero() { integer_digits as i32 } else { self.decimal_place };
        self.exponent = true_exponent - integer_digits as i32;
        self.decimal_place = integer_digits as i32;
        self.exponential = true;
        self.pad_integer_digits(integer_digits);
        self.pad_decimal_digits(precision);
    }

    /// General shape: `precision` significant digits, exponential only when
    /// the scientific exponent leaves [-4, precision], insignificant trailing
    /// zeros stripped.
    pub fn format_general(&mut self, precision: u32) {
        match self.value {
            Value::Unsigned(_) => {
                self.format_integer(1, 10, false);
                if self.count as u32 > precision {
                    self.round_to_precision(precision as usize);
                    self.exponent = self.decimal_place - 1;
                    self.decimal_place = 1;
                    self.exponential = true;
                }
            }
            _ => {
                self.format_float(precision as i32, true);
                if self.count > 0 {
                    let scientific = self.decimal_place - 1;
                    if scientific <= -5 || scientific > precision as i32 {
                        self.exponent = scientific;
                        self.decimal_place = 1;
                        self.exponential = true;
                    }
                }
            }
        }
        self.strip_trailing_zeros();
        self.pad_integer_digits(1);
    }

    /// Custom-precision shape driven by a picture section's placeholder
    /// counts: exponential or fixed-point, padded on both sides.
    pub fn format_custom_number(&mut self, integer_digits: u32, decimal_digits: u32, use_exponential: bool) {
        if use_exponential {
            self.format_custom_exponential(integer_digits, decimal_digits);
        } else {
            match self.value {
                Value::Unsigned(_) => self.format_integer(1, 10, false),
                _ => self.format_float(decimal_digits as i32, false),
            }
            self.pad_decimal_digits(decimal_digits);
        }
        self.pad_integer_digits(integer_digits);
    }

    // -----------------------------------------------------------------------------------------
    // rounding and padding

    /// Rounds the digit sequence to `precision` significant digits.
    ///
    /// Trailing zeros are stripped first; the dropped digits are scanned
    /// backward, a digit reaching '5' once the carry from its right is added
    /// propagates the carry further; the kept digits absorb it through
    /// '9' -> '0' runs. A carry escaping past the first digit writes a
    /// leading '1' and bumps the exponent (or the decimal place), so the
    /// decimal point never desynchronizes. The count ends at exactly
    /// `precision`, except after an escaped carry which leaves the single
    /// carried '1' (9.9999 rounded to one digit is "1" * 10, not "10").
    ///
    /// A request past the buffer capacity only materializes up to the
    /// capacity; the remainder is synthesized by the render-time accessors.
    pub fn round_to_precision(&mut self, precision: usize) {
        let precision = precision.min(Self::CAPACITY);
        self.strip_trailing_zeros();
        if self.count > precision {
            let mut carry = false;
            for i in (precision..self.count).rev() {
                carry = self.digits[i] + carry as u8 >= b'5';
            }
            self.count = precision;
            let mut i = precision;
            while carry && i > 0 {
                i -= 1;
                if self.digits[i] == b'9' {
                    self.digits[i] = b'0';
                } else {
                    self.digits[i] += 1;
                    carry = false;
                }
            }
            if carry {
                // every kept digit was a '9', now '0': shift right and write
                // the carried '1', keeping the decimal point in sync
                self.digits.copy_within(0..self.count, 1);
                self.digits[0] = b'1';
                self.count += 1;
                if self.exponential {
                    self.exponent += 1;
                } else {
                    self.decimal_place += 1;
                }
                self.strip_trailing_zeros();
                return;
            }
        }
        while self.count < precision {
            self.digits[self.count] = b'0';
            self.count += 1;
        }
    }

    /// Drops trailing '0' digits from the stored sequence; the decimal place
    /// is untouched, so integer magnitudes keep their implicit zeros.
    pub fn strip_trailing_zeros(&mut self) {
        while self.count > 0 && self.digits[self.count - 1] == b'0' {
            self.count -= 1;
        }
    }

    /// Requests at least `digits` integer digits, synthesizing leading zeros
    /// for the difference. Never touches the stored digits; idempotent.
    pub fn pad_integer_digits(&mut self, digits: u32) {
        let actual = self.decimal_place.max(0) as u32;
        self.leading_zeros = digits.saturating_sub(actual);
    }

    /// Requests at least `digits` decimal digits, synthesizing trailing zeros
    /// for the difference. Never touches the stored digits; idempotent.
    pub fn pad_decimal_digits(&mut self, digits: u32) {
        let actual = (self.count as i32 - self.decimal_place).max(0) as u32;
        self.trailing_zeros = digits.saturating_sub(actual);
    }
}
