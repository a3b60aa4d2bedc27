// Copyright 2022 Redglyph

use crate::{FormatError, FormatInterface};

fn test_table<T: FormatInterface>(values: Vec<(T, &str, &str)>) {
    let mut error = false;
    for (idx, (value, format, expected)) in values.into_iter().enumerate() {
        match value.format(Some(format)) {
            Ok(result) => {
                if result != expected {
                    println!("test #{idx} '{format}': expecting '{expected}' but got '{result}'");
                    error = true;
                }
            }
            Err(e) => {
                println!("test #{idx} '{format}': expecting '{expected}' but got error '{e}'");
                error = true;
            }
        }
    }
    assert!(!error, "one or more tests failed");
}

#[test]
fn integer_placeholders() {
    test_table::<i64>(vec![
        (5, "0", "5"),
        (5, "00", "05"),
        (1234, "##", "1234"),
        // a zero result leaves optional placeholders empty
        (0, "#", ""),
        (0, "0", "0"),
        (-5, "0", "-5"),
        (-5, "#", "-5"),
    ]);
}

#[test]
fn group_separators() {
    test_table::<i64>(vec![
        (12345, "#,##0", "12,345"),
        (1234567, "#,###,##0", "1,234,567"),
        // a separator is an ordinary literal, it prints even when the digits
        // before it are all suppressed
        (42, "#,##0", ",42"),
    ]);
    test_table::<f64>(vec![
        (1234.5678, "#,##0.00", "1,234.57"),
    ]);
}

#[test]
fn decimal_placeholders() {
    test_table::<f64>(vec![
        (0.5, "0.00", "0.50"),
        (1.2, "0.00", "1.20"),
        (123.456, "0.00", "123.46"),
        // optional decimals drop trailing zeros, and the point with them
        (1.0, "0.##", "1"),
        (1.05, "0.##", "1.05"),
        (0.45, "#.#", ".5"),
        (0.0, "#.##", ""),
        (0.0, "0.0", "0.0"),
        // only the first point is a placeholder, later ones are dropped
        (1.5, "0.0.0", "1.50"),
    ]);
}

#[test]
fn sections() {
    test_table::<i64>(vec![
        (5, "0;(0);Zero", "5"),
        (-5, "0;(0);Zero", "(5)"),
        (0, "0;(0);Zero", "Zero"),
        // a missing negative section falls back to a minus sign
        (-7, "00", "-07"),
    ]);
    test_table::<f64>(vec![
        (-2.5, "0.0;(0.0)", "(2.5)"),
        (-2.5, "0.0", "-2.5"),
        // a value rounding to zero uses the zero section, without a sign
        (0.004, "0.##;;'zero'", "zero"),
        (-0.04, "#.#", ""),
    ]);
}

#[test]
fn literals_and_escapes() {
    test_table::<i64>(vec![
        (42, "'v='0", "v=42"),
        (5, "\"q\"0", "q5"),
        (12, "0';'0", "1;2"),
        (5, "\\00", "05"),
        // a character outside the escape allow-list only drops the backslash
        (5, "\\q0", "q5"),
        // a quote after a dropped backslash opens a literal run, which still
        // protects the ';' from splitting
        (5, "0\\';abc'", "5;abc"),
        (12, "0\\;0", "1;2"),
        (7, "# items", "7 items"),
    ]);
    assert_eq!(5_i64.format(Some("'abc")), Err(FormatError::UnterminatedLiteral));
    assert_eq!(1.5_f64.format(Some("0.0;'oops")), Err(FormatError::UnterminatedLiteral));
}

#[test]
fn wide_placeholder_runs() {
    // more placeholders than the digit array holds render as zero padding
    let spec = "0".repeat(65) + "e0";
    let expected = format!("5{}e-64", "0".repeat(64));
    assert_eq!(5_i64.format(Some(&spec)).unwrap(), expected);
}

#[test]
fn exponent_tokens() {
    test_table::<f64>(vec![
        (1234.5, "0.0e0", "1.2e3"),
        (1234.5, "0.0E0", "1.2E3"),
        (1234.5, "0.0e+00", "1.2e+03"),
        (0.05, "0.0e0", "5.0e-2"),
        (1234.5, "00.0e0", "12.4e2"),
    ]);
    test_table::<i64>(vec![
        (5, "0e-0", "5e0"),
        (-5, "0e0", "-5e0"),
    ]);
}
