//! Literal construction macros

/// Build a [Json](crate::Json) value from a JSON-like literal.
///
/// Array elements and object values are single token trees, optionally preceded by a `-`.
/// Any other compound expression needs to be wrapped in parentheses:
///
/// ```
/// use chisel_value::json;
///
/// let limit = 4;
/// let doc = json!({
///     "name": "chisel",
///     "offsets": [1, -2, 3.5, (limit * 2)],
///     "nested": {"flag": true, "missing": null, "floor": -1e3}
/// });
/// assert_eq!(doc["offsets"][1], -2);
/// assert_eq!(doc["offsets"][3], 8);
/// ```
#[macro_export]
macro_rules! json {
    (@array [$($elements:expr,)*]) => {
        $crate::Json::array(::std::vec![$($elements),*])
    };
    (@array [$($elements:expr,)*] - $next:tt $(, $($rest:tt)*)?) => {
        $crate::json!(@array [$($elements,)* $crate::json!(-$next),] $($($rest)*)?)
    };
    (@array [$($elements:expr,)*] $next:tt $(, $($rest:tt)*)?) => {
        $crate::json!(@array [$($elements,)* $crate::json!($next),] $($($rest)*)?)
    };
    (@object [$(($keys:expr, $values:expr))*]) => {
        $crate::Json::object(::std::vec![$(($keys, $values)),*])
    };
    (@object [$($pairs:tt)*] $key:literal : - $value:tt $(, $($rest:tt)*)?) => {
        $crate::json!(@object [$($pairs)* ($key, $crate::json!(-$value))] $($($rest)*)?)
    };
    (@object [$($pairs:tt)*] $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $crate::json!(@object [$($pairs)* ($key, $crate::json!($value))] $($($rest)*)?)
    };
    (null) => {
        $crate::Json::null()
    };
    ([]) => {
        $crate::Json::array(::std::vec::Vec::<$crate::Json>::new())
    };
    ([ $($elements:tt)+ ]) => {
        $crate::json!(@array [] $($elements)+)
    };
    ({}) => {
        $crate::Json::object(::std::vec::Vec::<(::std::string::String, $crate::Json)>::new())
    };
    ({ $($pairs:tt)+ }) => {
        $crate::json!(@object [] $($pairs)+)
    };
    ($other:expr) => {
        $crate::Json::from($other)
    };
}

/// Build a [JsonPath](crate::JsonPath) from a list of indexes and keys
///
/// ```
/// use chisel_value::{json, path};
///
/// let doc = json!({"rows": [{"id": 7}]});
/// assert_eq!(doc.get_path(&path!["rows", 0, "id"]), 7);
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::JsonPath::default()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::JsonPath::from(::std::vec![$($crate::Segment::from($segment)),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::path::Segment;
    use crate::value::{Json, Type};

    #[test]
    fn should_build_empty_containers() {
        assert_eq!(json!([]).kind(), Type::Array);
        assert_eq!(json!({}).kind(), Type::Object);
        assert!(json!({}).is_empty());
    }

    #[test]
    fn should_build_nested_literals() {
        let doc = json!({"a": [1, {"b": null}], "c": "d", "e": (-1.5)});
        assert_eq!(doc.len(), 3);
        assert_eq!(doc["a"][1]["b"].kind(), Type::Null);
        assert!(doc["a"][1]["b"].exists());
        assert_eq!(doc["e"], -1.5);
    }

    #[test]
    fn should_accept_negative_numbers_without_parentheses() {
        let doc = json!([1, -2, -0.5, {"low": -1e3, "high": 7,}, [-3],]);
        assert_eq!(doc.len(), 5);
        assert_eq!(doc[1], -2);
        assert_eq!(doc[2], -0.5);
        assert_eq!(doc[3]["low"], -1000);
        assert_eq!(doc[3]["high"], 7);
        assert_eq!(doc[4][0], -3);
        assert_eq!(json!({"only": -1}), json!({"only": (-1)}));
    }

    #[test]
    fn should_accept_expressions() {
        let name = String::from("dynamic");
        let doc = json!([(name.clone()), (Json::from(3)), (vec![1, 2])]);
        assert_eq!(doc[0], "dynamic");
        assert_eq!(doc[2].len(), 2);
    }

    #[test]
    fn should_build_paths() {
        let p = path!["a", 1, (-1)];
        assert_eq!(p[2], Segment::Index(-1));
        assert!(path![].is_empty());
    }
}
