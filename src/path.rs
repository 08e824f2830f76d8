//! Path based navigation and assignment over [Json] values
//!
//! A path is a sequence of [Segment]s, each of which is either an array index or an object key.
//! Reads never fail: the first failing step produces a null placeholder carrying an [Error], and
//! every subsequent step just propagates that first error. Writes follow a copy-down, write-up
//! model: the child at each step is copied out, updated recursively, then written back in.
use std::fmt::Display;
use std::ops::{Add, Deref, Index};
use std::sync::Arc;

use log::trace;

use crate::errors::Error;
use crate::value::{Json, Value};

/// As per RFC 6901, any tilde characters within a key are encoded as ~0
const ENCODED_TILDE: &str = "~0";
/// As per RFC 6901, any slash characters within a key are encoded as ~1
const ENCODED_SLASH: &str = "~1";

/// Null placeholders handed out by failed reads, one per error kind
static PLACEHOLDERS: [Json; 6] = [
    Json::errored(Error::UnsupportedType),
    Json::errored(Error::IndexOutOfBounds),
    Json::errored(Error::ElementTooDeep),
    Json::errored(Error::WrongType),
    Json::errored(Error::KeyNotExist),
    Json::errored(Error::InvalidJson),
];

fn placeholder(error: Error) -> &'static Json {
    match error {
        Error::UnsupportedType => &PLACEHOLDERS[0],
        Error::IndexOutOfBounds => &PLACEHOLDERS[1],
        Error::ElementTooDeep => &PLACEHOLDERS[2],
        Error::WrongType => &PLACEHOLDERS[3],
        Error::KeyNotExist => &PLACEHOLDERS[4],
        Error::InvalidJson => &PLACEHOLDERS[5],
    }
}

/// A single navigation step
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// An array index. Negative indexes are never in bounds
    Index(isize),
    /// An object key
    Key(String),
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Index(i) => write!(f, "{}", i),
            Segment::Key(k) => write!(
                f,
                "{}",
                k.replace('~', ENCODED_TILDE).replace('/', ENCODED_SLASH)
            ),
        }
    }
}

macro_rules! segment_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Segment {
                fn from(i: $ty) -> Self {
                    Segment::Index(i as isize)
                }
            }
        )*
    };
}

segment_from_signed!(i8, i16, i32, isize);

impl From<i64> for Segment {
    fn from(i: i64) -> Self {
        Segment::Index(isize::try_from(i).unwrap_or(if i < 0 { isize::MIN } else { isize::MAX }))
    }
}

macro_rules! segment_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Segment {
                fn from(u: $ty) -> Self {
                    Segment::Index(isize::try_from(u).unwrap_or(isize::MAX))
                }
            }
        )*
    };
}

segment_from_unsigned!(u8, u16, u32, u64, usize);

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<&String> for Segment {
    fn from(key: &String) -> Self {
        Segment::Key(key.clone())
    }
}

/// An owned sequence of [Segment]s. Dereferences to a slice so it can be handed straight to any
/// of the path operations on [Json]
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Push a new [Segment::Key] onto the end of the path
    pub fn push_name<S: Into<String>>(&mut self, name: S) {
        self.segments.push(Segment::Key(name.into()))
    }

    /// Push a new [Segment::Index] onto the end of the path
    pub fn push_index(&mut self, index: isize) {
        self.segments.push(Segment::Index(index))
    }

    /// Push a whole bunch of names onto the end of the path in order
    pub fn push_names(&mut self, names: &[&str]) {
        names.iter().for_each(|n| self.push_name(*n))
    }

    /// Push a whole bunch of indexes onto the end of the path in order
    pub fn push_indexes(&mut self, indexes: &[isize]) {
        indexes.iter().for_each(|i| self.push_index(*i))
    }

    /// Pop the last segment off the back of the path
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// Serialise the path into an RFC 6901 style string. The empty path is the empty string
    pub fn as_str(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("/{}", s))
            .collect()
    }
}

impl Deref for JsonPath {
    type Target = [Segment];

    fn deref(&self) -> &[Segment] {
        &self.segments
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Add<&JsonPath> for JsonPath {
    type Output = Self;

    /// Concatenate two [JsonPath] instances
    fn add(mut self, rhs: &JsonPath) -> Self {
        self.segments.extend(rhs.segments.iter().cloned());
        self
    }
}

impl From<Vec<Segment>> for JsonPath {
    fn from(segments: Vec<Segment>) -> Self {
        JsonPath { segments }
    }
}

impl FromIterator<Segment> for JsonPath {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        JsonPath {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Json {
    /// Resolve a single step without cloning
    pub fn at(&self, segment: &Segment) -> &Json {
        match segment {
            Segment::Index(index) => self.at_index(*index),
            Segment::Key(key) => self.at_key(key),
        }
    }

    fn at_index(&self, index: isize) -> &Json {
        match &self.value {
            Value::Array(elements) => usize::try_from(index)
                .ok()
                .and_then(|i| elements.get(i))
                .unwrap_or_else(|| placeholder(Error::IndexOutOfBounds)),
            _ => placeholder(self.error.unwrap_or(Error::WrongType)),
        }
    }

    fn at_key(&self, key: &str) -> &Json {
        match &self.value {
            Value::Object(entries) => entries
                .get(key)
                .unwrap_or_else(|| placeholder(Error::KeyNotExist)),
            _ => placeholder(self.error.unwrap_or(Error::WrongType)),
        }
    }

    /// Resolve a whole path without cloning. The empty path resolves to `self`
    pub fn pointer(&self, path: &[Segment]) -> &Json {
        path.iter().fold(self, |json, segment| json.at(segment))
    }

    /// Read a single step
    pub fn get<S: Into<Segment>>(&self, segment: S) -> Json {
        self.at(&segment.into()).clone()
    }

    /// Read along a path. The first failing step determines the attached error
    pub fn get_path(&self, path: &[Segment]) -> Json {
        self.pointer(path).clone()
    }

    /// Write a single step. Writes which can't be applied are silently ignored: an index that
    /// is out of bounds, a step that doesn't match the container type, or a value which carries
    /// an error
    pub fn set<S: Into<Segment>, V: Into<Json>>(&mut self, segment: S, value: V) {
        self.write(&segment.into(), value.into())
    }

    /// Write along a path, using the same rules as [Json::set] at every step. An empty path
    /// leaves the value untouched
    pub fn set_path<V: Into<Json>>(&mut self, path: &[Segment], value: V) {
        self.write_path(path, value.into())
    }

    /// Write along a path, reporting why a write couldn't be applied. An index equal to the
    /// length of a non-empty array appends. Nothing is modified when an error is returned
    pub fn try_set_path<V: Into<Json>>(&mut self, path: &[Segment], value: V) -> Result<(), Error> {
        let value = value.into();
        if let Some(error) = value.error {
            return Err(error);
        }
        self.try_write_path(path, value)
    }

    fn write(&mut self, segment: &Segment, value: Json) {
        if let Some(error) = value.error {
            trace!("ignoring write of a value carrying '{}' at {}", error, segment);
            return;
        }
        match (segment, &mut self.value) {
            (Segment::Index(index), Value::Array(elements)) => match usize::try_from(*index) {
                Ok(i) if i < elements.len() => Arc::make_mut(elements)[i] = value,
                _ => trace!("ignoring out of bounds write at index {}", index),
            },
            (Segment::Key(key), Value::Object(entries)) => {
                Arc::make_mut(entries).insert(key.clone(), value);
            }
            _ => trace!("ignoring write at '{}' into a mismatched type", segment),
        }
    }

    fn write_path(&mut self, path: &[Segment], value: Json) {
        match path {
            [] => (),
            [segment] => self.write(segment, value),
            [first, rest @ ..] => {
                let mut child = self.at(first).clone();
                child.write_path(rest, value);
                self.write(first, child);
            }
        }
    }

    fn try_write(&mut self, segment: &Segment, value: Json) -> Result<(), Error> {
        match (segment, &mut self.value) {
            (Segment::Index(index), Value::Array(elements)) => {
                let len = elements.len();
                match usize::try_from(*index) {
                    Ok(i) if i < len => {
                        Arc::make_mut(elements)[i] = value;
                        Ok(())
                    }
                    Ok(i) if len > 0 && i == len => {
                        Arc::make_mut(elements).push(value);
                        Ok(())
                    }
                    _ => Err(Error::IndexOutOfBounds),
                }
            }
            (Segment::Key(key), Value::Object(entries)) => {
                Arc::make_mut(entries).insert(key.clone(), value);
                Ok(())
            }
            _ => Err(Error::WrongType),
        }
    }

    fn try_write_path(&mut self, path: &[Segment], value: Json) -> Result<(), Error> {
        match path {
            [] => Ok(()),
            [segment] => self.try_write(segment, value),
            [first, rest @ ..] => {
                let child = self.at(first);
                if let Some(error) = child.error {
                    return Err(error);
                }
                if !matches!(child.value, Value::Array(_) | Value::Object(_)) {
                    return Err(Error::WrongType);
                }
                let mut child = child.clone();
                child.try_write_path(rest, value)?;
                self.try_write(first, child)
            }
        }
    }
}

impl Index<isize> for Json {
    type Output = Json;

    fn index(&self, index: isize) -> &Json {
        self.at_index(index)
    }
}

impl Index<&str> for Json {
    type Output = Json;

    fn index(&self, key: &str) -> &Json {
        self.at_key(key)
    }
}

impl Index<&Segment> for Json {
    type Output = Json;

    fn index(&self, segment: &Segment) -> &Json {
        self.at(segment)
    }
}
