//! Conversion between [Json] and dynamically typed native values
//!
//! Native graphs are built from `Box<dyn Any>` values, using `Vec` for sequences and string keyed
//! `HashMap`s or `BTreeMap`s for mappings. Classification works through a closed list of
//! downcasts, so anything outside of that list becomes an unknown value carrying
//! [Error::UnsupportedType](crate::Error::UnsupportedType).
use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use crate::number::Number;
use crate::value::{Json, Value};

/// Attempt to downcast to each of the listed numeric types in turn
macro_rules! downcast_numeric {
    ($native:expr, $($ty:ty),*) => {
        $(
            if let Some(n) = $native.downcast_ref::<$ty>() {
                return Some(Json::from(*n));
            }
        )*
    };
}

/// Classify the scalar shapes: booleans, numbers, strings and the `()` null sentinel
pub(crate) fn scalar(native: &dyn Any) -> Option<Json> {
    if let Some(b) = native.downcast_ref::<bool>() {
        return Some(Json::from(*b));
    }
    downcast_numeric!(native, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
    if let Some(n) = native.downcast_ref::<Number>() {
        return Some(Json::from(*n));
    }
    if let Some(s) = native.downcast_ref::<String>() {
        return Some(Json::from(s));
    }
    if let Some(s) = native.downcast_ref::<&'static str>() {
        return Some(Json::from(*s));
    }
    if let Some(s) = native.downcast_ref::<Box<str>>() {
        return Some(Json::from(s.to_string()));
    }
    if native.is::<()>() {
        return Some(Json::null());
    }
    None
}

/// Collect string keyed members, in no particular order
pub(crate) fn mapping(native: &dyn Any) -> Option<Vec<(&str, &dyn Any)>> {
    if let Some(map) = native.downcast_ref::<HashMap<String, Box<dyn Any>>>() {
        return Some(map.iter().map(|(k, v)| (k.as_str(), &**v)).collect());
    }
    if let Some(map) = native.downcast_ref::<BTreeMap<String, Box<dyn Any>>>() {
        return Some(map.iter().map(|(k, v)| (k.as_str(), &**v)).collect());
    }
    if let Some(map) = native.downcast_ref::<HashMap<String, Option<Box<dyn Any>>>>() {
        return Some(map.iter().map(|(k, v)| (k.as_str(), v as &dyn Any)).collect());
    }
    if let Some(map) = native.downcast_ref::<BTreeMap<String, Option<Box<dyn Any>>>>() {
        return Some(map.iter().map(|(k, v)| (k.as_str(), v as &dyn Any)).collect());
    }
    if let Some(map) = native.downcast_ref::<HashMap<String, Json>>() {
        return Some(map.iter().map(|(k, v)| (k.as_str(), v as &dyn Any)).collect());
    }
    if let Some(map) = native.downcast_ref::<BTreeMap<String, Json>>() {
        return Some(map.iter().map(|(k, v)| (k.as_str(), v as &dyn Any)).collect());
    }
    None
}

/// Collect sequence elements in order
pub(crate) fn sequence(native: &dyn Any) -> Option<Vec<&dyn Any>> {
    if let Some(elements) = native.downcast_ref::<Vec<Box<dyn Any>>>() {
        return Some(elements.iter().map(|e| &**e).collect());
    }
    if let Some(elements) = native.downcast_ref::<Vec<Option<Box<dyn Any>>>>() {
        return Some(elements.iter().map(|e| e as &dyn Any).collect());
    }
    None
}

impl Json {
    /// Classify a native value, recursing through sequences and mappings. Existing [Json]
    /// values pass straight through, `()` is null and anything unrecognised (including an
    /// absent `Option::None`) is unknown
    pub fn from_any(native: &dyn Any) -> Json {
        if let Some(json) = native.downcast_ref::<Json>() {
            return json.clone();
        }
        if let Some(boxed) = native.downcast_ref::<Box<dyn Any>>() {
            return Json::from_any(&**boxed);
        }
        if let Some(json) = scalar(native) {
            return json;
        }
        if let Some(elements) = native.downcast_ref::<Vec<Json>>() {
            return Json::array(elements.iter().cloned());
        }
        if let Some(elements) = sequence(native) {
            return Json::array(elements.into_iter().map(Json::from_any));
        }
        if let Some(members) = mapping(native) {
            return Json::object(
                members
                    .into_iter()
                    .map(|(key, value)| (key, Json::from_any(value))),
            );
        }
        match native.downcast_ref::<Option<Box<dyn Any>>>() {
            Some(Some(inner)) => Json::from_any(&**inner),
            _ => Json::unknown(),
        }
    }

    /// Convert back into a native graph of the same shapes [Json::from_any] accepts. Integers
    /// become `i64` (or `u64` beyond the signed range), floats `f64`, arrays
    /// `Vec<Box<dyn Any>>`, objects `BTreeMap<String, Box<dyn Any>>` and null `()`
    pub fn to_native(&self) -> Box<dyn Any> {
        match &self.value {
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Box::new(i),
                (None, Some(u)) => Box::new(u),
                _ => Box::new(n.to_f64()),
            },
            Value::String(s) => Box::new(s.clone()),
            Value::Bool(b) => Box::new(*b),
            Value::Array(elements) => Box::new(
                elements
                    .iter()
                    .map(Json::to_native)
                    .collect::<Vec<Box<dyn Any>>>(),
            ),
            Value::Object(entries) => Box::new(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_native()))
                    .collect::<BTreeMap<String, Box<dyn Any>>>(),
            ),
            Value::Null | Value::Unknown => Box::new(()),
        }
    }
}
