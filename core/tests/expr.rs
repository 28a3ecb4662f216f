// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use caliper_core::{parse, Quantity, Unit};

fn test(input: &str, output: &str) {
    let res = match parse(input) {
        Ok(q) => q.to_user_string(),
        Err(e) => e.to_string(),
    };
    similar_asserts::assert_eq!(res, output);
}

#[test]
fn test_mass() {
    test("1kg", "1 kg");
    assert_eq!(parse("1kg"), Ok(Quantity::new(1.0, Unit::MASS)));
}

#[test]
fn test_length_sum() {
    test("5m + 3m", "8000 mm");
    assert_eq!(parse("5m + 3m"), Ok(Quantity::new(8000.0, Unit::LENGTH)));
}

#[test]
fn test_mismatch() {
    test("5m + 3kg", "Unit mismatch: cannot combine `mm` and `kg`");
}

#[test]
fn test_pow() {
    test("2^3", "8");
    assert_eq!(parse("2^3"), Ok(Quantity::dimensionless(8.0)));
}

#[test]
fn test_parens() {
    test("(2+3)*4m", "20000 mm");
    assert_eq!(parse("(2+3)*4m"), Ok(Quantity::new(20000.0, Unit::LENGTH)));
}

#[test]
fn test_newton() {
    test("12 kg*m/s^2", "12000 mm*kg/s^2");
    assert_eq!(parse("12 kg*m/s^2"), parse("12 N"));
}

#[test]
fn test_division_by_zero_is_not_an_error() {
    let q = parse("1m / 0").unwrap();
    assert!(q.value.is_infinite());
    assert_eq!(q.unit, Unit::LENGTH);
}

#[test]
fn test_angle() {
    test("90deg", "90 deg");
    let rad = parse("1 rad").unwrap();
    assert!((rad.value - 57.29577951308232).abs() < 1e-9);
}

#[test]
fn test_imperial() {
    test("1 in", "25.4 mm");
    let q = parse("1ft + 1in").unwrap();
    assert_eq!(q.unit, Unit::LENGTH);
    assert!((q.value - 330.2).abs() < 1e-9);
}

fn assert_roundtrip(input: &str) {
    let first = parse(input).unwrap();
    let again = parse(&first.to_user_string()).unwrap();
    assert_eq!(first.unit, again.unit, "unit drift for {}", input);
    let tolerance = first.value.abs() * 1e-12;
    assert!(
        (first.value - again.value).abs() <= tolerance,
        "magnitude drift for {}: {} vs {}",
        input,
        first.value,
        again.value
    );
}

#[test]
fn test_user_string_roundtrip() {
    assert_roundtrip("12 kg*m/s^2");
    assert_roundtrip("5 psi");
    assert_roundtrip("-3.25 mm");
    assert_roundtrip("1 W");
    assert_roundtrip("2.5 kPa");
    assert_roundtrip("1 / (4 s)");
    assert_roundtrip("0.0001 µm");
    assert_roundtrip("42");
}

// Guards the redesign of the upstream shared result slot: repeated
// parses are independent, equal values.
#[test]
fn test_parse_idempotence() {
    let first = parse("12 kg*m/s^2").unwrap();
    let second = parse("12 kg*m/s^2").unwrap();
    assert_eq!(first, second);

    // a failed parse leaves no residue for the next call
    assert!(parse("5m + 3kg").is_err());
    assert_eq!(parse("5m + 3m"), Ok(Quantity::new(8000.0, Unit::LENGTH)));
}

#[test]
fn test_parallel_parses() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                for _ in 0..100 {
                    let q = parse("12 kg*m/s^2").unwrap();
                    assert_eq!(q, Quantity::new(12000.0, Unit::FORCE));
                    assert!(parse(&format!("{}m + 3kg", i)).is_err());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_serde_roundtrip() {
    let q = parse("12 kg*m/s^2").unwrap();
    let json = serde_json::to_string(&q).unwrap();
    let back: Quantity = serde_json::from_str(&json).unwrap();
    assert_eq!(q, back);
}
