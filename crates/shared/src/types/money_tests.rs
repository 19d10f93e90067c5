use super::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

#[rstest]
#[case("12.34", 1234)]
#[case("12.3", 1230)]
#[case("12", 1200)]
#[case("-0.50", -50)]
#[case(" 7.10 ", 710)]
#[case("12.340", 1234)]
fn test_amount_from_str(#[case] input: &str, #[case] minor: i64) {
    assert_eq!(Amount::from_str(input).unwrap(), Amount::from_minor(minor));
}

#[test]
fn test_amount_from_str_rejects_sub_cent() {
    assert!(matches!(
        Amount::from_str("0.001"),
        Err(AmountParseError::TooPrecise(_))
    ));
}

#[test]
fn test_amount_from_str_rejects_garbage() {
    assert!(matches!(
        Amount::from_str("twelve"),
        Err(AmountParseError::Invalid(_))
    ));
    assert!(Amount::from_str("").is_err());
}

#[test]
fn test_amount_from_decimal_out_of_range() {
    assert!(matches!(
        Amount::try_from(Decimal::MAX),
        Err(AmountParseError::OutOfRange(_))
    ));
}

#[test]
fn test_amount_display() {
    assert_eq!(Amount::from_minor(1234).to_string(), "12.34");
    assert_eq!(Amount::from_minor(-50).to_string(), "-0.50");
    assert_eq!(Amount::ZERO.to_string(), "0.00");
    assert_eq!(Amount::from_major(3).unwrap().to_string(), "3.00");
}

#[test]
fn test_amount_to_decimal() {
    assert_eq!(Amount::from_minor(1999).to_decimal(), dec!(19.99));
}

#[test]
fn test_amount_arithmetic() {
    let a = Amount::from_minor(1000);
    let b = Amount::from_minor(250);
    assert_eq!(a + b, Amount::from_minor(1250));
    assert_eq!(a - b, Amount::from_minor(750));
    assert_eq!(b - a, Amount::from_minor(-750));
    assert_eq!(-a, Amount::from_minor(-1000));

    let mut total = Amount::ZERO;
    total += a;
    total += b;
    assert_eq!(total, Amount::from_minor(1250));
}

#[test]
fn test_amount_sum_is_exact() {
    // 0.1 added ten times is exactly 1.00.
    let amounts = vec![Amount::from_str("0.1").unwrap(); 10];
    let total: Amount = amounts.iter().sum();
    assert_eq!(total, Amount::from_major(1).unwrap());

    let empty: Vec<Amount> = Vec::new();
    assert_eq!(empty.into_iter().sum::<Amount>(), Amount::ZERO);
}

#[test]
fn test_amount_predicates() {
    assert!(Amount::ZERO.is_zero());
    assert!(!Amount::ZERO.is_negative());
    assert!(Amount::from_minor(-1).is_negative());
    assert!(!Amount::from_minor(1).is_negative());
}

#[test]
fn test_amount_serde_as_string() {
    let json = serde_json::to_string(&Amount::from_minor(4250)).unwrap();
    assert_eq!(json, "\"42.50\"");

    let parsed: Amount = serde_json::from_str("\"-3.05\"").unwrap();
    assert_eq!(parsed, Amount::from_minor(-305));

    assert!(serde_json::from_str::<Amount>("\"1.234\"").is_err());
}

#[test]
fn test_amount_from_major_overflow() {
    assert_eq!(Amount::from_major(-2), Some(Amount::from_minor(-200)));
    assert_eq!(Amount::from_major(i64::MAX / 100 + 1), None);
    assert_eq!(Amount::from_major(i64::MIN), None);
}

#[test]
fn test_amount_operators_saturate() {
    let max = Amount::from_minor(i64::MAX);
    let min = Amount::from_minor(i64::MIN);
    let one = Amount::from_minor(1);

    assert_eq!(max + one, max);
    assert_eq!(min - one, min);
    assert_eq!(-min, max);

    let mut total = max;
    total += max;
    assert_eq!(total, max);
}

#[test]
fn test_amount_checked_arithmetic() {
    let max = Amount::from_minor(i64::MAX);
    let one = Amount::from_minor(1);

    assert_eq!(max.checked_add(one), None);
    assert_eq!(Amount::from_minor(i64::MIN).checked_sub(one), None);
    assert_eq!(
        max.checked_sub(one),
        Some(Amount::from_minor(i64::MAX - 1))
    );
    assert_eq!(one.checked_add(one), Some(Amount::from_minor(2)));
}

#[test]
fn test_amount_sum_survives_intermediate_overflow() {
    let half = Amount::from_minor(i64::MAX / 2 + 1);
    let amounts = [half, half, Amount::from_minor(-(i64::MAX / 2 + 1))];
    assert_eq!(amounts.iter().sum::<Amount>(), half);
}

#[test]
fn test_amount_sum_clamps_out_of_range_total() {
    let half = Amount::from_minor(i64::MAX / 2 + 1);
    assert_eq!([half, half].iter().sum::<Amount>(), Amount::from_minor(i64::MAX));

    let low = Amount::from_minor(i64::MIN);
    assert_eq!([low, low].iter().sum::<Amount>(), low);
}

#[rstest]
#[case(0, 0)]
#[case(-250, 250)]
#[case(i64::MIN, i64::MAX)]
fn test_amount_saturating_abs(#[case] minor: i64, #[case] abs: i64) {
    assert_eq!(
        Amount::from_minor(minor).saturating_abs(),
        Amount::from_minor(abs)
    );
}
