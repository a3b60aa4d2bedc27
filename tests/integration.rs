// Copyright 2022 Redglyph
//
// Integration tests: tests that all the functionalities are accessible and work as expected.

#![cfg(test)]

use numfmt::*;

#[test]
fn standard_formats() {
    assert_eq!(255_u64.format(Some("X")).unwrap(), "FF");
    assert_eq!(255_u64.format(Some("x4")).unwrap(), "00ff");
    assert_eq!(10_u64.format(Some("B")).unwrap(), "1010");
    assert_eq!((-5_i64).format(Some("D3")).unwrap(), "-005");
    assert_eq!(3.14159.format(Some("F2")).unwrap(), "3.14");
    assert_eq!(1500.0.format(Some("E2")).unwrap(), "1.50e3");
    assert_eq!(1234.5.format(Some("G2")).unwrap(), "1.2e3");
    assert_eq!(1.5_f32.format(Some("F1")).unwrap(), "1.5");
}

#[test]
fn custom_formats() {
    assert_eq!(1234.5678.format(Some("#,##0.00")).unwrap(), "1,234.57");
    assert_eq!(5_i64.format(Some("0;(0);Zero")).unwrap(), "5");
    assert_eq!((-5_i64).format(Some("0;(0);Zero")).unwrap(), "(5)");
    assert_eq!(0_i64.format(Some("0;(0);Zero")).unwrap(), "Zero");
    assert_eq!(42_i64.format(Some("'total: '0")).unwrap(), "total: 42");
    assert_eq!(1234.5.format(Some("0.0e0")).unwrap(), "1.2e3");
}

#[test]
fn default_format() {
    assert_eq!(1.5.format(None).unwrap(), "1.5");
    assert_eq!((-0.03125).format(None).unwrap(), "-0.03125");
    assert_eq!(1500_u64.format(None).unwrap(), "1500");
    // an empty specification behaves like no specification
    assert_eq!(1.5.format(Some("")).unwrap(), "1.5");
}

#[test]
fn non_finite_values() {
    assert_eq!(f64::NAN.format(None).unwrap(), "NaN");
    assert_eq!(f64::INFINITY.format(Some("F2")).unwrap(), "inf");
    assert_eq!(f32::NEG_INFINITY.format(None).unwrap(), "-inf");
}

#[test]
fn format_into_appends() {
    let mut out = String::from("x = ");
    1.5.format_into(&mut out, Some("F1")).unwrap();
    assert_eq!(out, "x = 1.5");
    out.push_str(", y = ");
    255_u64.format_into(&mut out, Some("X")).unwrap();
    assert_eq!(out, "x = 1.5, y = FF");
}

#[test]
fn format_errors() {
    let err = 1.5.format(Some("'oops")).unwrap_err();
    assert_eq!(err, FormatError::UnterminatedLiteral);
    assert_eq!(err.to_string(), "unterminated literal in format string");
}

#[test]
fn non_decimal_detection() {
    assert!(is_non_decimal_format(Some("X")));
    assert!(is_non_decimal_format(Some("b8")));
    assert!(!is_non_decimal_format(Some("D")));
    assert!(!is_non_decimal_format(Some("#,##0")));
    assert!(!is_non_decimal_format(None));
}

#[test]
fn digit_buffer_access() {
    let mut buf = DigitBuffer::from_f64(1234.5);
    buf.format_fixed_point(2);
    assert!(!buf.is_negative());
    assert_eq!(buf.integer_digit_count(), 4);
    assert_eq!(buf.decimal_digit_count(), 2);
    let text: String = (0..buf.integer_digit_count())
        .map(|i| buf.integer_digit(i) as char)
        .chain(std::iter::once('.'))
        .chain((0..buf.decimal_digit_count()).map(|i| buf.decimal_digit(i) as char))
        .collect();
    assert_eq!(text, "1234.50");
}
