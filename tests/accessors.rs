use chisel_value::{json, Json, Number, Type};
use test_case::test_case;

#[test_case("true", true; "lowercase true")]
#[test_case("TRUE", true; "uppercase true")]
#[test_case("Yes", true; "mixed case yes")]
#[test_case("y", true; "single y")]
#[test_case("T", true; "single t")]
#[test_case("1", true; "digit one")]
#[test_case("0", false; "digit zero")]
#[test_case("no", false; "no")]
#[test_case(" true", false; "untrimmed")]
#[test_case("", false; "empty")]
fn should_coerce_strings_to_bools(input: &str, expected: bool) {
    assert_eq!(Json::from(input).bool_value(), expected);
}

#[test_case(json!(0), false; "integer zero")]
#[test_case(json!(0.0), false; "float zero")]
#[test_case(json!(-0.5), true; "negative fraction")]
#[test_case(json!(7), true; "positive integer")]
#[test_case(json!(null), false; "null")]
#[test_case(json!([true]), false; "array")]
#[test_case(json!({}), false; "object")]
fn should_coerce_values_to_bools(value: Json, expected: bool) {
    assert_eq!(value.bool_value(), expected);
}

#[test_case("42", 42.0; "integer")]
#[test_case("  -1.5  ", -1.5; "trimmed negative")]
#[test_case("+3", 3.0; "explicit plus")]
#[test_case("1e3", 1000.0; "exponent")]
#[test_case("not-a-number", 0.0; "garbage")]
#[test_case("12abc", 0.0; "partial")]
#[test_case("NaN", 0.0; "nan")]
#[test_case("infinity", 0.0; "infinity")]
#[test_case("", 0.0; "empty")]
fn should_coerce_strings_to_numbers(input: &str, expected: f64) {
    assert_eq!(Json::from(input).f64_value(), expected);
}

#[test_case(json!(1), "1"; "integer")]
#[test_case(json!(-0.0), "-0"; "negative zero")]
#[test_case(json!(0.1), "0.1"; "fraction")]
#[test_case(json!(0.1f32), "0.1"; "single precision fraction")]
#[test_case(json!(1e24), "1e+24"; "large exponent")]
#[test_case(json!(-1e-17), "-1e-17"; "small exponent")]
#[test_case(json!(1e-5), "1e-05"; "padded exponent")]
#[test_case(json!(0.0001), "0.0001"; "positional lower bound")]
#[test_case(json!(12345678901234567890u64), "12345678901234567890"; "large unsigned")]
#[test_case(json!(true), "true"; "bool")]
#[test_case(json!(null), ""; "null")]
#[test_case(json!({"a": 1}), ""; "object")]
fn should_coerce_values_to_strings(value: Json, expected: &str) {
    assert_eq!(value.string_value(), expected);
}

#[test]
fn optional_getters_should_not_coerce_strings() {
    let text = json!("12");
    assert_eq!(text.as_i64(), None);
    assert_eq!(text.as_bool(), None);
    assert_eq!(text.as_number(), None);
    assert_eq!(text.as_str(), Some("12"));
    assert_eq!(text.i64_value(), 12);
}

#[test]
fn optional_getters_should_cross_between_bools_and_numbers() {
    assert_eq!(json!(true).as_f64(), Some(1.0));
    assert_eq!(json!(false).as_usize(), Some(0));
    assert_eq!(json!(3).as_bool(), Some(true));
    assert_eq!(json!(true).as_number(), Some(Number::from(1)));
}

#[test]
fn setters_should_replace_whole_variants() {
    let mut value = json!({"nested": [1, 2]});
    value.set_i16_value(-4);
    assert_eq!(value.kind(), Type::Number);
    assert_eq!(value.i16_value(), -4);
    value.set_string(Some("text"));
    assert_eq!(value.as_str(), Some("text"));
    value.set_f32(None);
    assert_eq!(value.kind(), Type::Null);
    value.set_bool_value(true);
    assert_eq!(value, true);
}

#[test]
fn numbers_should_hold_the_full_integer_ranges() {
    let doc = Json::parse(r#"[18446744073709551615, -9223372036854775808, 9007199254740993]"#);
    assert_eq!(doc[0].as_u64(), Some(u64::MAX));
    assert_eq!(doc[1].i64_value(), i64::MIN);
    assert_eq!(doc[2].u64_value(), 9007199254740993);
}
