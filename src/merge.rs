//! Recursive reconciliation of two [Json] trees
use std::sync::Arc;

use crate::errors::Error;
use crate::value::{Json, Type, Value};

impl Json {
    /// Merge `other` into this value.
    ///
    /// - Objects merge key by key, recursively. Keys only present in `other` are added.
    /// - Arrays are concatenated, with the elements of `other` following those of `self`.
    /// - Any other value is replaced by `other`.
    ///
    /// Only the top level is type checked: if the two values are of different types, this
    /// fails with [Error::WrongType] and `self` is left untouched. Below the top level, a type
    /// mismatch just replaces the existing value.
    pub fn merge(&mut self, other: &Json) -> Result<(), Error> {
        self.merge_with(other, true)
    }

    /// Non-mutating form of [Json::merge]
    pub fn merged(&self, other: &Json) -> Result<Json, Error> {
        let mut result = self.clone();
        result.merge(other)?;
        Ok(result)
    }

    fn merge_with(&mut self, other: &Json, type_check: bool) -> Result<(), Error> {
        if self.kind() != other.kind() {
            if type_check {
                return Err(Error::WrongType);
            }
            self.replace_with(other);
            return Ok(());
        }
        if !matches!(self.kind(), Type::Object | Type::Array) {
            self.replace_with(other);
            return Ok(());
        }
        match (&mut self.value, &other.value) {
            (Value::Object(entries), Value::Object(incoming)) => {
                let entries = Arc::make_mut(entries);
                for (key, value) in incoming.iter() {
                    entries
                        .entry(key.clone())
                        .or_insert_with(Json::null)
                        .merge_with(value, false)?;
                }
            }
            (Value::Array(elements), Value::Array(incoming)) => {
                Arc::make_mut(elements).extend(incoming.iter().cloned());
            }
            _ => (),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::Error;
    use crate::json;

    #[test]
    fn should_concatenate_arrays() {
        let mut target = json!([1, 2]);
        target.merge(&json!([2, 3])).unwrap();
        assert_eq!(target, json!([1, 2, 2, 3]));
    }

    #[test]
    fn should_deep_merge_objects() {
        let target = json!({"a": {"x": 1, "list": [1]}, "b": "keep"});
        let source = json!({"a": {"y": 2, "list": [2]}, "c": null});
        let merged = target.merged(&source).unwrap();
        assert_eq!(
            merged,
            json!({"a": {"x": 1, "y": 2, "list": [1, 2]}, "b": "keep", "c": null})
        );
    }

    #[test]
    fn should_replace_nested_mismatches() {
        let mut target = json!({"a": [1, 2]});
        target.merge(&json!({"a": "text"})).unwrap();
        assert_eq!(target, json!({"a": "text"}));
    }

    #[test]
    fn should_replace_scalars() {
        let mut target = json!(1);
        target.merge(&json!(2.5)).unwrap();
        assert_eq!(target, json!(2.5));
    }

    #[test]
    fn top_level_mismatches_should_fail_without_modification() {
        let mut target = json!({"a": 1});
        assert_eq!(target.merge(&json!([1])), Err(Error::WrongType));
        assert_eq!(target, json!({"a": 1}));
    }

    #[test]
    fn merging_should_not_affect_the_source_or_clones() {
        let original = json!({"a": [1]});
        let mut copy = original.clone();
        copy.merge(&json!({"a": [2]})).unwrap();
        assert_eq!(original, json!({"a": [1]}));
        assert_eq!(copy, json!({"a": [1, 2]}));
    }
}
