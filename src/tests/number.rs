use crate::{MathsError, Number, StorageMode};

#[test]
fn test_parse() {
    assert_eq!(Number::parse("5", StorageMode::Double), Some(dbl!(5)));
    assert_eq!(Number::parse("3.25", StorageMode::Double), Some(dbl!(3.25)));
    assert_eq!(Number::parse("-4", StorageMode::Double), Some(dbl!(-4)));
    assert_eq!(Number::parse("0xFF", StorageMode::Double), Some(dbl!(255)));
    assert_eq!(Number::parse("&hff", StorageMode::Double), Some(dbl!(255)));
    assert_eq!(Number::parse("#10", StorageMode::Double), Some(dbl!(16)));

    assert_eq!(Number::parse("3.25", StorageMode::Decimal), Some(dec!(3.25)));
    assert_eq!(Number::parse("0x10", StorageMode::Decimal), Some(dec!(16)));

    // Things which must not read as numbers.
    assert_eq!(Number::parse("inf", StorageMode::Double), None);
    assert_eq!(Number::parse("NaN", StorageMode::Double), None);
    assert_eq!(Number::parse("kg", StorageMode::Double), None);
    assert_eq!(Number::parse("0x", StorageMode::Double), None);
    assert_eq!(Number::parse("", StorageMode::Double), None);
}

#[test]
fn test_literal_prefixes() {
    assert!(Number::is_literal_prefix("-"));
    assert!(Number::is_literal_prefix("3."));
    assert!(Number::is_literal_prefix("3.1"));
    assert!(Number::is_literal_prefix("0x"));
    assert!(Number::is_literal_prefix("0x1F"));
    assert!(Number::is_literal_prefix("&"));
    assert!(Number::is_literal_prefix("&H"));
    assert!(Number::is_literal_prefix("#"));

    assert!(!Number::is_literal_prefix("3.1.4"));
    assert!(!Number::is_literal_prefix("2k"));
    assert!(!Number::is_literal_prefix("x"));
}

#[test]
fn test_decimal_arithmetic_is_exact() {
    let a = dec!(0.1);
    let b = dec!(0.2);
    assert_eq!(a.checked_add(b).unwrap(), dec!(0.3));
    assert_eq!(dec!(0.3).checked_sub(dec!(0.1)).unwrap(), dec!(0.2));
}

#[test]
fn test_division_by_zero() {
    // Decimal reports; double propagates infinity.
    assert_eq!(
        dec!(1).checked_div(dec!(0)),
        Err(MathsError::DivisionByZero)
    );
    assert!(dbl!(1).checked_div(dbl!(0)).unwrap().to_f64().is_infinite());
}

#[test]
fn test_pow() {
    assert_eq!(dbl!(2).pow(dbl!(10)).unwrap(), dbl!(1024));
    assert_eq!(dec!(2).pow(dec!(10)).unwrap(), dec!(1024));
    assert_eq!(dec!(2).pow(dec!(-2)).unwrap(), dec!(0.25));
    assert_eq!(dec!(10).pow(dec!(0)).unwrap(), dec!(1));

    // A negative decimal base with a fractional exponent has no real result.
    assert_eq!(
        dec!(-8).pow(dec!(0.5)),
        Err(MathsError::OutsideDomain)
    );
}

#[test]
fn test_round_to() {
    assert_eq!(dbl!(3.14159).round_to(2).unwrap(), dbl!(3.14));
    assert_eq!(dec!(3.14159).round_to(2).unwrap(), dec!(3.14));
    assert_eq!(dbl!(1234.0).round_to(-1).unwrap(), dbl!(1230));
    assert_eq!(dec!(1234).round_to(-1).unwrap(), dec!(1230));
}

#[test]
fn test_to_whole() {
    assert_eq!(dbl!(5).to_whole(), Some(5));
    assert_eq!(dbl!(5.5).to_whole(), None);
    assert_eq!(dec!(12).to_whole(), Some(12));
    assert_eq!(dec!(12.000).to_whole(), Some(12));
    assert_eq!(dec!(12.5).to_whole(), None);
}

#[test]
fn test_ordering() {
    assert_eq!(dbl!(3).min(dbl!(1)), dbl!(1));
    assert_eq!(dec!(3).max(dec!(7)), dec!(7));
    assert!(dbl!(2) < dbl!(3));
    assert!(dec!(2.5) < dec!(2.6));
}

#[test]
fn test_sqrt_domain() {
    assert_eq!(dec!(9).sqrt().unwrap(), dec!(3));
    assert_eq!(dec!(-1).sqrt(), Err(MathsError::OutsideDomain));
    assert!(dbl!(-1).sqrt().unwrap().to_f64().is_nan());
}
