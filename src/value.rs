//! The dynamically typed [Json] value
//!
//! A [Json] is always exactly one of number, string, bool, array, object or null (plus the
//! distinguished unknown state produced when a native value can't be classified). Alongside the
//! value itself, a [Json] may carry an attached [Error] which explains *why* a derived value is a
//! null placeholder, so that lookups never have to fail outright:
//!
//! ```
//! use chisel_value::{json, Error};
//!
//! let doc = json!({"numbers": [1, 2, 3]});
//! assert_eq!(doc["numbers"][1], 2);
//! assert_eq!(doc["numbers"][7].error(), Some(Error::IndexOutOfBounds));
//! assert_eq!(doc["missing"]["deeper"].error(), Some(Error::KeyNotExist));
//! ```
//!
//! Arrays and objects are reference counted and copied on write, so cloning a [Json] is cheap and
//! mutating a clone never affects the value it was cloned from.
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::errors::Error;
use crate::number::Number;
use crate::writer;

/// The type used to hold array elements
pub(crate) type Array = Vec<Json>;

/// The type used to hold object members. Keys are kept sorted, which gives a stable
/// serialisation order
pub(crate) type Object = BTreeMap<String, Json>;

/// Classification of a [Json] value
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Number,
    String,
    Bool,
    Array,
    Object,
    Null,
    /// A native value which couldn't be classified
    Unknown,
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Number => write!(f, "number"),
            Type::String => write!(f, "string"),
            Type::Bool => write!(f, "bool"),
            Type::Array => write!(f, "array"),
            Type::Object => write!(f, "object"),
            Type::Null => write!(f, "null"),
            Type::Unknown => write!(f, "unknown"),
        }
    }
}

/// The underlying tagged union
#[derive(Debug, Clone, Default)]
pub(crate) enum Value {
    Number(Number),
    String(String),
    Bool(bool),
    Array(Arc<Array>),
    Object(Arc<Object>),
    #[default]
    Null,
    Unknown,
}

/// A dynamically typed JSON value, with an optional attached [Error]
#[derive(Debug, Clone, Default)]
pub struct Json {
    pub(crate) value: Value,
    pub(crate) error: Option<Error>,
}

impl Json {
    /// A genuine JSON null, with no attached error
    pub const fn null() -> Json {
        Json {
            value: Value::Null,
            error: None,
        }
    }

    /// A null placeholder carrying an attached error
    pub(crate) const fn errored(error: Error) -> Json {
        Json {
            value: Value::Null,
            error: Some(error),
        }
    }

    /// The result of failing to classify a native value
    pub(crate) fn unknown() -> Json {
        Json {
            value: Value::Unknown,
            error: Some(Error::UnsupportedType),
        }
    }

    pub(crate) fn from_value(value: Value) -> Json {
        match value {
            Value::Unknown => Json::unknown(),
            value => Json { value, error: None },
        }
    }

    /// Build an array from anything that converts into [Json]
    pub fn array<I, T>(elements: I) -> Json
    where
        I: IntoIterator<Item = T>,
        T: Into<Json>,
    {
        let elements: Array = elements
            .into_iter()
            .map(|element| element.into().stored())
            .collect();
        Json::from_value(Value::Array(Arc::new(elements)))
    }

    /// Build an object from `(key, value)` pairs. Later duplicates replace earlier ones
    pub fn object<I, K, V>(entries: I) -> Json
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Json>,
    {
        let entries: Object = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into().stored()))
            .collect();
        Json::from_value(Value::Object(Arc::new(entries)))
    }

    /// The [Type] of the value
    pub fn kind(&self) -> Type {
        match self.value {
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::Bool(_) => Type::Bool,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
            Value::Null => Type::Null,
            Value::Unknown => Type::Unknown,
        }
    }

    /// The attached error, if any
    pub fn error(&self) -> Option<Error> {
        self.error
    }

    /// True unless the value was produced by a failed lookup or classification. A JSON null
    /// that was successfully looked up exists
    pub fn exists(&self) -> bool {
        self.error.is_none()
    }

    /// True for both genuine nulls and error placeholders
    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    /// The number of elements or members. Anything other than an array or object has length 0
    pub fn len(&self) -> usize {
        match &self.value {
            Value::Array(elements) => elements.len(),
            Value::Object(entries) => entries.len(),
            _ => 0,
        }
    }

    /// Arrays and objects are empty when they have no content, everything else is always empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strip a lookup error before the value is stored inside a container. Unknown values keep
    /// their classification error
    pub(crate) fn stored(mut self) -> Json {
        if !matches!(self.value, Value::Unknown) {
            self.error = None;
        }
        self
    }

    /// Wholesale replacement, used by the merge and assignment paths
    pub(crate) fn replace_with(&mut self, other: &Json) {
        *self = other.clone().stored();
    }
}

impl PartialEq for Json {
    /// Values are equal when they are of the same type and hold equal content. Attached errors
    /// are ignored, and unknown values are never equal to anything
    fn eq(&self, other: &Json) -> bool {
        match (&self.value, &other.value) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl PartialOrd for Json {
    /// Numbers and strings are ordered, other values only compare as equal to themselves
    fn partial_cmp(&self, other: &Json) -> Option<Ordering> {
        match (&self.value, &other.value) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            _ if self == other => Some(Ordering::Equal),
            _ => None,
        }
    }
}

macro_rules! partial_eq_via_conversion {
    ($($ty:ty),*) => {
        $(
            impl PartialEq<$ty> for Json {
                fn eq(&self, other: &$ty) -> bool {
                    *self == Json::from(*other)
                }
            }

            impl PartialEq<Json> for $ty {
                fn eq(&self, other: &Json) -> bool {
                    *other == Json::from(*self)
                }
            }
        )*
    };
}

partial_eq_via_conversion!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl PartialEq<str> for Json {
    fn eq(&self, other: &str) -> bool {
        matches!(&self.value, Value::String(s) if s == other)
    }
}

impl PartialEq<&str> for Json {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<String> for Json {
    fn eq(&self, other: &String) -> bool {
        *self == *other.as_str()
    }
}

/// The description of a value: strings render without quotes, numbers follow the numeric
/// formatting rules (including the `inf`/`nan` sentinels) and containers render as pretty
/// printed JSON
impl Display for Json {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
            Value::Unknown => f.write_str("unknown"),
            Value::Array(_) | Value::Object(_) => f.write_str(&writer::describe(self)),
        }
    }
}

macro_rules! from_numeric {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Json {
                fn from(n: $ty) -> Self {
                    Json::from_value(Value::Number(Number::from(n)))
                }
            }
        )*
    };
}

from_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<Number> for Json {
    fn from(n: Number) -> Self {
        Json::from_value(Value::Number(n))
    }
}

impl From<bool> for Json {
    fn from(b: bool) -> Self {
        Json::from_value(Value::Bool(b))
    }
}

impl From<String> for Json {
    fn from(s: String) -> Self {
        Json::from_value(Value::String(s))
    }
}

impl From<&str> for Json {
    fn from(s: &str) -> Self {
        Json::from(s.to_string())
    }
}

impl From<&String> for Json {
    fn from(s: &String) -> Self {
        Json::from(s.clone())
    }
}

impl From<Box<str>> for Json {
    fn from(s: Box<str>) -> Self {
        Json::from(String::from(s))
    }
}

impl<'a> From<Cow<'a, str>> for Json {
    fn from(s: Cow<'a, str>) -> Self {
        Json::from(s.into_owned())
    }
}

impl From<char> for Json {
    fn from(c: char) -> Self {
        Json::from(c.to_string())
    }
}

impl From<()> for Json {
    fn from(_: ()) -> Self {
        Json::null()
    }
}

impl<T: Into<Json>> From<Option<T>> for Json {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Json::null(),
        }
    }
}

impl<T: Into<Json>> From<Vec<T>> for Json {
    fn from(elements: Vec<T>) -> Self {
        Json::array(elements)
    }
}

impl<T: Into<Json>, const N: usize> From<[T; N]> for Json {
    fn from(elements: [T; N]) -> Self {
        Json::array(elements)
    }
}

impl<T: Clone + Into<Json>> From<&[T]> for Json {
    fn from(elements: &[T]) -> Self {
        Json::array(elements.iter().cloned())
    }
}

impl<K: Into<String>, V: Into<Json>, S> From<HashMap<K, V, S>> for Json {
    fn from(entries: HashMap<K, V, S>) -> Self {
        Json::object(entries)
    }
}

impl<K: Into<String>, V: Into<Json>> From<BTreeMap<K, V>> for Json {
    fn from(entries: BTreeMap<K, V>) -> Self {
        Json::object(entries)
    }
}

impl<T: Into<Json>> FromIterator<T> for Json {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Json::array(iter)
    }
}

impl<K: Into<String>, V: Into<Json>> FromIterator<(K, V)> for Json {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Json::object(iter)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use crate::errors::Error;
    use crate::value::{Json, Type};

    #[test]
    fn default_construction_should_yield_null() {
        let json = Json::default();
        assert_eq!(json.kind(), Type::Null);
        assert!(json.exists());
        assert_eq!(json, Json::null());
    }

    #[test]
    fn should_classify_primitives() {
        assert_eq!(Json::from(true).kind(), Type::Bool);
        assert_eq!(Json::from(12u8).kind(), Type::Number);
        assert_eq!(Json::from(-1.5f32).kind(), Type::Number);
        assert_eq!(Json::from("text").kind(), Type::String);
        assert_eq!(Json::from('c').kind(), Type::String);
        assert_eq!(Json::from(()).kind(), Type::Null);
        assert_eq!(Json::from(None::<i32>).kind(), Type::Null);
        assert_eq!(Json::from(Some(3)).kind(), Type::Number);
    }

    #[test]
    fn booleans_should_never_equal_numbers() {
        assert_ne!(Json::from(true), Json::from(1));
        assert_ne!(Json::from(false), Json::from(0));
    }

    #[test]
    fn should_build_containers() {
        let array = Json::from(vec![1, 2, 3]);
        assert_eq!(array.kind(), Type::Array);
        assert_eq!(array.len(), 3);

        let mut map = HashMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        let object = Json::from(map);
        assert_eq!(object.kind(), Type::Object);
        assert_eq!(object.len(), 2);

        let collected: Json = vec![("x", true)].into_iter().collect();
        assert_eq!(collected.kind(), Type::Object);
    }

    #[test]
    fn nested_json_should_collapse_to_a_single_level() {
        let inner = Json::from(vec![1, 2]);
        let outer = Json::from(vec![inner.clone(), Json::from(3)]);
        assert_eq!(outer.len(), 2);
        assert_eq!(Json::from(inner.clone()), inner);
    }

    #[test]
    fn stored_values_should_not_keep_lookup_errors() {
        let placeholder = Json::errored(Error::KeyNotExist);
        let array = Json::array(vec![placeholder]);
        assert!(array.as_array().unwrap()[0].exists());
        assert!(array.as_array().unwrap()[0].is_null());
    }

    #[test]
    fn non_containers_should_report_empty() {
        assert!(Json::from(5).is_empty());
        assert!(Json::null().is_empty());
        assert!(Json::object(BTreeMap::<String, Json>::new()).is_empty());
        assert!(!Json::from(vec![1]).is_empty());
    }

    #[test]
    fn should_order_numbers_and_strings() {
        assert!(Json::from(1) < Json::from(2.5));
        assert!(Json::from("a") < Json::from("b"));
        assert_eq!(
            Json::from(true).partial_cmp(&Json::from(true)),
            Some(std::cmp::Ordering::Equal)
        );
        assert_eq!(Json::from(true).partial_cmp(&Json::from(1)), None);
    }

    #[test]
    fn should_compare_against_primitives() {
        assert_eq!(Json::from(5), 5);
        assert_eq!(Json::from(5), 5.0);
        assert_eq!(Json::from("x"), "x");
        assert_eq!(Json::from("x"), "x".to_string());
        assert_eq!(true, Json::from(true));
    }

    #[test]
    fn should_describe_scalars_without_quotes() {
        assert_eq!(Json::from("plain").to_string(), "plain");
        assert_eq!(Json::from(1e24).to_string(), "1e+24");
        assert_eq!(Json::from(f64::NAN).to_string(), "nan");
        assert_eq!(Json::from(false).to_string(), "false");
        assert_eq!(Json::null().to_string(), "null");
    }
}
