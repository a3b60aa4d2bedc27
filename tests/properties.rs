// Copyright 2022 Redglyph
//
// Property tests on randomized values: formatting is deterministic and the
// text parses back to the value whenever the format keeps every digit.

#![cfg(test)]

use std::str::FromStr;
use num::ToPrimitive;
use numfmt::FormatInterface;

#[test]
fn deterministic_output() {
    let mut rng = oorandom::Rand64::new(7);
    for _ in 0..1000 {
        let value = rng.rand_u64();
        let first = value.format(Some("X")).unwrap();
        let second = value.format(Some("X")).unwrap();
        assert_eq!(first, second, "value {value}");
    }
}

#[test]
fn random_hexadecimal_round_trip() {
    let mut rng = oorandom::Rand64::new(11);
    for i in 0..10_000 {
        let value = rng.rand_u64();
        let text = value.format(Some("x")).unwrap();
        let back = u64::from_str_radix(&text, 16)
            .unwrap_or_else(|e| panic!("test #{i}: could not convert '{text}' back: {e}"));
        assert_eq!(back, value, "test #{i}");
    }
}

#[test]
fn random_decimal_round_trip() {
    let mut rng = oorandom::Rand64::new(13);
    for i in 0..10_000 {
        let value = rng.rand_u64() as i64;
        let text = value.format(Some("D")).unwrap();
        let back = i64::from_str(&text)
            .unwrap_or_else(|e| panic!("test #{i}: could not convert '{text}' back: {e}"));
        assert_eq!(back, value, "test #{i}");
    }
}

/// Integral doubles of 1 to 15 digits round-trip exactly through the
/// fixed-point format with no decimals.
#[test]
fn integral_double_ladder() {
    let mut rng = oorandom::Rand64::new(17);
    for digits in 1..=15_u32 {
        let high = 10_u64.pow(digits);
        for i in 0..500 {
            let value = rng.rand_u64() % high;
            let double = value.to_f64().unwrap();
            let text = double.format(Some("F0")).unwrap();
            assert_eq!(text, value.to_string(), "{digits} digits, test #{i}");
        }
    }
}

/// Fixed-point output with 6 decimals stays within the rounding error of the
/// original value.
#[test]
fn fixed_point_closeness() {
    let mut rng = oorandom::Rand64::new(19);
    for i in 0..10_000 {
        let value = rng.rand_float() * 1000.0;
        let text = value.format(Some("F6")).unwrap();
        let back = f64::from_str(&text)
            .unwrap_or_else(|e| panic!("test #{i}: could not convert '{text}' back: {e}"));
        assert!((back - value).abs() < 1.1e-6, "test #{i}: {value} -> '{text}'");
    }
}
