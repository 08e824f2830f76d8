//! Lossless numeric storage for JSON numbers
//!
//! A [Number] holds either a non-negative integer, a negative integer or a float, so that the
//! full signed and unsigned 64-bit ranges survive a round trip alongside ordinary floating point
//! values. Comparisons work across representations, so `1` and `1.0` are equal.
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Internal representation. Negative integers are only ever stored as [N::NegativeInteger]
#[derive(Debug, Copy, Clone)]
enum N {
    PositiveInteger(u64),
    NegativeInteger(i64),
    Float(f64),
}

/// A JSON number
#[derive(Debug, Copy, Clone)]
pub struct Number {
    n: N,
}

/// Floats with an integral value below this magnitude are formatted without an exponent
const INTEGRAL_FORMAT_LIMIT: f64 = 1e16;

/// Generate the lossy, `as`-style narrowing conversions
macro_rules! narrowing_conversions {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Convert to `", stringify!($ty), "` with `as` semantics: integers wrap, floats saturate")]
            pub fn $name(&self) -> $ty {
                match self.n {
                    N::PositiveInteger(u) => u as $ty,
                    N::NegativeInteger(i) => i as $ty,
                    N::Float(f) => f as $ty,
                }
            }
        )*
    };
}

impl Number {
    /// Create a number from a float. Non-finite values are permitted in memory, but will be
    /// rejected when serialising
    pub fn from_f64(f: f64) -> Self {
        Number { n: N::Float(f) }
    }

    /// The value as an `i64`, if it is an integer that fits
    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::PositiveInteger(u) => i64::try_from(u).ok(),
            N::NegativeInteger(i) => Some(i),
            N::Float(_) => None,
        }
    }

    /// The value as a `u64`, if it is a non-negative integer
    pub fn as_u64(&self) -> Option<u64> {
        match self.n {
            N::PositiveInteger(u) => Some(u),
            _ => None,
        }
    }

    /// Integers are always finite
    pub fn is_finite(&self) -> bool {
        match self.n {
            N::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    narrowing_conversions! {
        to_i8 => i8,
        to_i16 => i16,
        to_i32 => i32,
        to_i64 => i64,
        to_isize => isize,
        to_u8 => u8,
        to_u16 => u16,
        to_u32 => u32,
        to_u64 => u64,
        to_usize => usize,
        to_f32 => f32,
        to_f64 => f64,
    }

    /// Numeric truthiness, anything other than zero is true
    pub fn to_bool(&self) -> bool {
        match self.n {
            N::PositiveInteger(u) => u != 0,
            N::NegativeInteger(_) => true,
            N::Float(f) => f != 0.0,
        }
    }

    /// Parse a decimal representation, ignoring any surrounding whitespace. Integers are kept
    /// exact wherever they fit into 64 bits. Returns [None] for unparsable or non-finite input
    pub fn parse(s: &str) -> Option<Number> {
        let trimmed = s.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if unsigned.is_empty() {
            return None;
        }
        match Self::parse_literal(unsigned) {
            Some(n) if n.is_finite() => Some(n),
            _ => None,
        }
    }

    /// Parse a literal which is already known to be well-formed
    pub(crate) fn parse_literal(literal: &str) -> Option<Number> {
        let digits = literal.strip_prefix('-').unwrap_or(literal);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(n) = Self::parse_integer(literal) {
                return Some(n);
            }
        }
        fast_float::parse::<f64, _>(literal)
            .ok()
            .map(Number::from_f64)
    }

    #[cfg(feature = "mixed_numerics")]
    fn parse_integer(literal: &str) -> Option<Number> {
        if literal.starts_with('-') {
            lexical::parse::<i64, _>(literal).ok().map(Number::from)
        } else {
            lexical::parse::<u64, _>(literal).ok().map(Number::from)
        }
    }

    #[cfg(not(feature = "mixed_numerics"))]
    fn parse_integer(_literal: &str) -> Option<Number> {
        None
    }
}

/// Compare a float against an integer without losing precision on either side
fn cmp_float_integer(f: f64, i: i128) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if f >= 1e20 {
        return Some(Ordering::Greater);
    }
    if f <= -1e20 {
        return Some(Ordering::Less);
    }
    let truncated = f.trunc();
    match (truncated as i128).cmp(&i) {
        Ordering::Equal => f.partial_cmp(&truncated),
        ordering => Some(ordering),
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.n, other.n) {
            (N::PositiveInteger(a), N::PositiveInteger(b)) => Some(a.cmp(&b)),
            (N::NegativeInteger(a), N::NegativeInteger(b)) => Some(a.cmp(&b)),
            (N::PositiveInteger(_), N::NegativeInteger(_)) => Some(Ordering::Greater),
            (N::NegativeInteger(_), N::PositiveInteger(_)) => Some(Ordering::Less),
            (N::Float(a), N::Float(b)) => a.partial_cmp(&b),
            (N::Float(a), N::PositiveInteger(b)) => cmp_float_integer(a, b as i128),
            (N::Float(a), N::NegativeInteger(b)) => cmp_float_integer(a, b as i128),
            (N::PositiveInteger(a), N::Float(b)) => {
                cmp_float_integer(b, a as i128).map(Ordering::reverse)
            }
            (N::NegativeInteger(a), N::Float(b)) => {
                cmp_float_integer(b, a as i128).map(Ordering::reverse)
            }
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number {
            n: N::PositiveInteger(0),
        }
    }
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(u: $ty) -> Self {
                    Number { n: N::PositiveInteger(u as u64) }
                }
            }
        )*
    };
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(i: $ty) -> Self {
                    let i = i as i64;
                    if i < 0 {
                        Number { n: N::NegativeInteger(i) }
                    } else {
                        Number { n: N::PositiveInteger(i as u64) }
                    }
                }
            }
        )*
    };
}

from_unsigned!(u8, u16, u32, u64, usize);
from_signed!(i8, i16, i32, i64, isize);

/// Widens through the shortest decimal form of the `f32`, so `0.1f32` becomes `0.1` rather than
/// `0.10000000149011612`
impl From<f32> for Number {
    fn from(f: f32) -> Self {
        if f.is_finite() {
            if let Ok(widened) = fast_float::parse::<f64, _>(f.to_string()) {
                return Number::from_f64(widened);
            }
        }
        Number::from_f64(f as f64)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::from_f64(f)
    }
}

impl From<bool> for Number {
    fn from(b: bool) -> Self {
        Number {
            n: N::PositiveInteger(u64::from(b)),
        }
    }
}

/// Formats using the shortest round-trippable representation. Integral values print without a
/// decimal point, very large or very small magnitudes switch to exponential notation (`1e+24`,
/// `-1e-17`) and non-finite values print as `inf`, `-inf` or `nan`
impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.n {
            N::PositiveInteger(u) => write!(f, "{}", u),
            N::NegativeInteger(i) => write!(f, "{}", i),
            N::Float(v) => format_float(f, v),
        }
    }
}

fn format_float(f: &mut Formatter<'_>, v: f64) -> std::fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }
    if v.fract() == 0.0 && v.abs() < INTEGRAL_FORMAT_LIMIT {
        if v == 0.0 && v.is_sign_negative() {
            return f.write_str("-0");
        }
        return write!(f, "{}", v as i64);
    }
    let exponential = format!("{:e}", v);
    let (mantissa, exponent) = match exponential.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (exponential.as_str(), 0),
    };
    if (-4..16).contains(&exponent) {
        write!(f, "{}", v)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

#[cfg(test)]
mod tests {
    use crate::number::Number;

    #[test]
    fn should_format_integers_without_decimal_points() {
        assert_eq!(Number::from(42).to_string(), "42");
        assert_eq!(Number::from(-7i64).to_string(), "-7");
        assert_eq!(Number::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Number::from(i64::MIN).to_string(), "-9223372036854775808");
        assert_eq!(Number::from(5.0).to_string(), "5");
        assert_eq!(Number::from(-0.0).to_string(), "-0");
    }

    #[test]
    fn should_format_floats_using_shortest_representation() {
        assert_eq!(Number::from(0.1).to_string(), "0.1");
        assert_eq!(Number::from(1.5).to_string(), "1.5");
        assert_eq!(Number::from(123456.789).to_string(), "123456.789");
        assert_eq!(Number::from(0.0001).to_string(), "0.0001");
    }

    #[test]
    fn should_format_f32_shortest() {
        assert_eq!(Number::from(0.1f32).to_string(), "0.1");
        assert_eq!(Number::from(-2.75f32).to_string(), "-2.75");
        assert_eq!(Number::from(3.4e38f32).to_string(), "3.4e+38");
        assert_eq!(Number::from(1e-7f32).to_string(), "1e-07");
        assert_eq!(Number::from(f32::INFINITY).to_string(), "inf");
        assert_eq!(Number::from(0.1f32).to_f32(), 0.1f32);
    }

    #[test]
    fn should_format_extreme_magnitudes_exponentially() {
        assert_eq!(Number::from(1e24).to_string(), "1e+24");
        assert_eq!(Number::from(-1e-17).to_string(), "-1e-17");
        assert_eq!(Number::from(0.00001).to_string(), "1e-05");
        assert_eq!(Number::from(1e16).to_string(), "1e+16");
        assert_eq!(Number::from(1.5e300).to_string(), "1.5e+300");
    }

    #[test]
    fn should_format_non_finite_sentinels() {
        assert_eq!(Number::from(f64::INFINITY).to_string(), "inf");
        assert_eq!(Number::from(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Number::from(f64::NAN).to_string(), "nan");
    }

    #[test]
    fn should_compare_across_representations() {
        assert_eq!(Number::from(1), Number::from(1.0));
        assert_eq!(Number::from(-3i8), Number::from(-3.0f32));
        assert!(Number::from(2) > Number::from(1.5));
        assert!(Number::from(-2) < Number::from(-1.5));
        assert!(Number::from(u64::MAX) > Number::from(i64::MAX));
        assert_ne!(Number::from(f64::NAN), Number::from(f64::NAN));
        assert!(Number::from(f64::INFINITY) > Number::from(u64::MAX));
    }

    #[test]
    fn should_parse_decimal_strings() {
        assert_eq!(Number::parse("42").and_then(|n| n.as_i64()), Some(42));
        assert_eq!(Number::parse("  -17 ").and_then(|n| n.as_i64()), Some(-17));
        assert_eq!(Number::parse("+3"), Some(Number::from(3)));
        assert_eq!(Number::parse("2.5"), Some(Number::from(2.5)));
        assert_eq!(Number::parse("1e3"), Some(Number::from(1000)));
        assert_eq!(Number::parse("18446744073709551615"), Some(Number::from(u64::MAX)));
    }

    #[test]
    fn should_reject_unparsable_strings() {
        assert_eq!(Number::parse(""), None);
        assert_eq!(Number::parse("not-a-number"), None);
        assert_eq!(Number::parse("12abc"), None);
        assert_eq!(Number::parse("inf"), None);
        assert_eq!(Number::parse("nan"), None);
    }

    #[test]
    fn should_narrow_with_as_semantics() {
        assert_eq!(Number::from(300).to_u8(), 44);
        assert_eq!(Number::from(3.9).to_i32(), 3);
        assert_eq!(Number::from(f64::NAN).to_i64(), 0);
        assert_eq!(Number::from(1e300).to_i32(), i32::MAX);
    }

    #[test]
    fn should_apply_numeric_truthiness() {
        assert!(Number::from(1).to_bool());
        assert!(Number::from(-1).to_bool());
        assert!(!Number::from(0).to_bool());
        assert!(!Number::from(0.0).to_bool());
        assert!(Number::from(true).to_bool());
    }
}
