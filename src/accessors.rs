//! Typed getters and setters
//!
//! Every supported kind gets four accessors:
//! - `as_K` returns [Some] only when the underlying variant matches. Booleans also accept
//!   numbers, and numeric kinds also accept booleans.
//! - `K_value` always returns something, coercing strings, numbers and booleans into the
//!   requested kind and falling back to a zero value.
//! - `set_K` replaces the value, with [None] producing a null.
//! - `set_K_value` replaces the value unconditionally.
//!
//! All setters clear any attached error.
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::number::Number;
use crate::value::{Json, Value};

/// Strings which coerce to `true`, compared case-insensitively
const TRUTHY: [&str; 5] = ["true", "y", "t", "yes", "1"];

macro_rules! numeric_accessors {
    ($($ty:ty => $as:ident, $value:ident, $set:ident, $set_value:ident, $convert:ident);* $(;)?) => {
        $(
            #[doc = concat!("The value as `", stringify!($ty), "`, for numbers and booleans only")]
            pub fn $as(&self) -> Option<$ty> {
                self.as_number().map(|n| n.$convert())
            }

            #[doc = concat!("The value coerced to `", stringify!($ty), "`, or zero")]
            pub fn $value(&self) -> $ty {
                self.number_value().$convert()
            }

            pub fn $set(&mut self, value: Option<$ty>) {
                self.assign(value.map(|v| Value::Number(Number::from(v))))
            }

            pub fn $set_value(&mut self, value: $ty) {
                self.$set(Some(value))
            }
        )*
    };
}

impl Json {
    fn assign(&mut self, value: Option<Value>) {
        self.value = value.unwrap_or(Value::Null);
        self.error = None;
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => Some(n.to_bool()),
            _ => None,
        }
    }

    /// Strings are true when they match one of `true`, `y`, `t`, `yes` or `1` ignoring case
    pub fn bool_value(&self) -> bool {
        match &self.value {
            Value::Bool(b) => *b,
            Value::Number(n) => n.to_bool(),
            Value::String(s) => TRUTHY.iter().any(|t| s.eq_ignore_ascii_case(t)),
            _ => false,
        }
    }

    pub fn set_bool(&mut self, value: Option<bool>) {
        self.assign(value.map(Value::Bool))
    }

    pub fn set_bool_value(&mut self, value: bool) {
        self.set_bool(Some(value))
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numbers and booleans are rendered as text, anything else that isn't a string is empty
    pub fn string_value(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }

    pub fn set_string<S: Into<String>>(&mut self, value: Option<S>) {
        self.assign(value.map(|s| Value::String(s.into())))
    }

    pub fn set_string_value<S: Into<String>>(&mut self, value: S) {
        self.set_string(Some(value))
    }

    pub fn as_number(&self) -> Option<Number> {
        match &self.value {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(Number::from(*b)),
            _ => None,
        }
    }

    /// Strings are parsed as decimal numbers. Anything unparsable, non-finite or otherwise
    /// unsuitable is zero
    pub fn number_value(&self) -> Number {
        match &self.value {
            Value::String(s) => Number::parse(s).unwrap_or_default(),
            _ => self.as_number().unwrap_or_default(),
        }
    }

    pub fn set_number(&mut self, value: Option<Number>) {
        self.assign(value.map(Value::Number))
    }

    pub fn set_number_value(&mut self, value: Number) {
        self.set_number(Some(value))
    }

    numeric_accessors! {
        f64 => as_f64, f64_value, set_f64, set_f64_value, to_f64;
        f32 => as_f32, f32_value, set_f32, set_f32_value, to_f32;
        i8 => as_i8, i8_value, set_i8, set_i8_value, to_i8;
        i16 => as_i16, i16_value, set_i16, set_i16_value, to_i16;
        i32 => as_i32, i32_value, set_i32, set_i32_value, to_i32;
        i64 => as_i64, i64_value, set_i64, set_i64_value, to_i64;
        isize => as_isize, isize_value, set_isize, set_isize_value, to_isize;
        u8 => as_u8, u8_value, set_u8, set_u8_value, to_u8;
        u16 => as_u16, u16_value, set_u16, set_u16_value, to_u16;
        u32 => as_u32, u32_value, set_u32, set_u32_value, to_u32;
        u64 => as_u64, u64_value, set_u64, set_u64_value, to_u64;
        usize => as_usize, usize_value, set_usize, set_usize_value, to_usize;
    }

    pub fn as_array(&self) -> Option<&[Json]> {
        match &self.value {
            Value::Array(elements) => Some(elements.as_slice()),
            _ => None,
        }
    }

    /// A copy of the elements, empty for anything other than an array
    pub fn array_value(&self) -> Vec<Json> {
        self.as_array().map(<[Json]>::to_vec).unwrap_or_default()
    }

    pub fn set_array(&mut self, value: Option<Vec<Json>>) {
        self.assign(value.map(|elements| {
            Value::Array(Arc::new(elements.into_iter().map(Json::stored).collect()))
        }))
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Json>> {
        match &self.value {
            Value::Object(entries) => Some(&**entries),
            _ => None,
        }
    }

    /// A copy of the members, empty for anything other than an object
    pub fn object_value(&self) -> BTreeMap<String, Json> {
        self.as_object().cloned().unwrap_or_default()
    }

    pub fn set_object(&mut self, value: Option<BTreeMap<String, Json>>) {
        self.assign(value.map(|entries| {
            Value::Object(Arc::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.stored()))
                    .collect(),
            ))
        }))
    }

    /// [Some] only for a genuine null, not for error placeholders
    pub fn as_null(&self) -> Option<()> {
        match (&self.value, self.error) {
            (Value::Null, None) => Some(()),
            _ => None,
        }
    }
}
