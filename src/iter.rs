//! Uniform iteration over arrays and objects
use std::collections::btree_map;
use std::iter::Enumerate;
use std::slice;

use crate::value::{Json, Value};

/// Iterates `(key, value)` pairs. Array elements are keyed by their index in base 10, object
/// members by their key. Every other value iterates as empty
pub struct Iter<'a> {
    cursor: Cursor<'a>,
}

enum Cursor<'a> {
    Array(Enumerate<slice::Iter<'a, Json>>),
    Object(btree_map::Iter<'a, String, Json>),
    Empty,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (String, &'a Json);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.cursor {
            Cursor::Array(elements) => elements
                .next()
                .map(|(index, element)| (index.to_string(), element)),
            Cursor::Object(entries) => entries.next().map(|(key, value)| (key.clone(), value)),
            Cursor::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.cursor {
            Cursor::Array(elements) => elements.size_hint(),
            Cursor::Object(entries) => entries.size_hint(),
            Cursor::Empty => (0, Some(0)),
        }
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl Json {
    pub fn iter(&self) -> Iter<'_> {
        let cursor = match &self.value {
            Value::Array(elements) => Cursor::Array(elements.iter().enumerate()),
            Value::Object(entries) => Cursor::Object(entries.iter()),
            _ => Cursor::Empty,
        };
        Iter { cursor }
    }
}

impl<'a> IntoIterator for &'a Json {
    type Item = (String, &'a Json);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::json;

    #[test]
    fn should_key_array_elements_by_index() {
        let doc = json!(["a", "b"]);
        let keys: Vec<String> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "1"]);
    }

    #[test]
    fn should_iterate_objects_in_key_order() {
        let doc = json!({"b": 2, "a": 1});
        let pairs: Vec<(String, i32)> = (&doc).into_iter().map(|(k, v)| (k, v.i32_value())).collect();
        assert_eq!(pairs, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn scalars_should_iterate_as_empty() {
        assert_eq!(json!(12).iter().count(), 0);
        assert_eq!(json!(null).iter().len(), 0);
    }
}
