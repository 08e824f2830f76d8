//! Serialisation of [Json] values back into JSON text
//!
//! Output is either compact or pretty printed with a two space indent. Object members are always
//! written in key order, so serialising the same value twice produces identical output. Numbers
//! which can't be represented in JSON (NaN and the infinities) are rejected with
//! [Error::InvalidJson], and unknown values with [Error::UnsupportedType].
use log::debug;

use crate::errors::Error;
use crate::number::Number;
use crate::value::{Json, Value};

/// The default nesting limit applied by the raw-string writers
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// The indent used for each level of pretty printed output
const INDENT: &str = "  ";

/// Options controlling the shape of serialised output
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Pretty print with newlines and a two space indent
    pub pretty: bool,
    /// The deepest nesting level permitted by the raw-string writers. The root is at depth 0
    pub max_depth: usize,
    /// Write absent native values (`Option::None`) as `null` rather than failing
    pub absent_as_null: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            pretty: false,
            max_depth: DEFAULT_MAX_DEPTH,
            absent_as_null: false,
        }
    }
}

impl WriteOptions {
    pub fn compact() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        WriteOptions {
            pretty: true,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_absent_as_null(mut self, absent_as_null: bool) -> Self {
        self.absent_as_null = absent_as_null;
        self
    }
}

/// Accumulates output for a single serialisation pass
pub(crate) struct Writer<'o> {
    out: String,
    pub(crate) options: &'o WriteOptions,
    depth_limit: Option<usize>,
    lenient: bool,
}

impl<'o> Writer<'o> {
    pub(crate) fn new(options: &'o WriteOptions) -> Self {
        Writer {
            out: String::new(),
            options,
            depth_limit: None,
            lenient: false,
        }
    }

    /// Enforce [WriteOptions::max_depth]
    pub(crate) fn depth_limited(mut self) -> Self {
        self.depth_limit = Some(self.options.max_depth);
        self
    }

    /// Write non-finite numbers and unknown values as their display sentinels instead of failing
    fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), Error> {
        match self.depth_limit {
            Some(limit) if depth > limit => Err(Error::ElementTooDeep),
            _ => Ok(()),
        }
    }

    pub(crate) fn write_json(&mut self, json: &Json, depth: usize) -> Result<(), Error> {
        self.check_depth(depth)?;
        match &json.value {
            Value::Null => self.write_null(),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.write_number(n)?,
            Value::String(s) => self.write_string(s),
            Value::Array(elements) => {
                self.begin_array();
                for (index, element) in elements.iter().enumerate() {
                    self.element(index, depth + 1);
                    self.write_json(element, depth + 1)?;
                }
                self.end_array(depth, elements.len());
            }
            Value::Object(entries) => {
                self.begin_object();
                for (index, (key, value)) in entries.iter().enumerate() {
                    self.key(index, depth + 1, key);
                    self.write_json(value, depth + 1)?;
                }
                self.end_object(depth, entries.len());
            }
            Value::Unknown if self.lenient => self.out.push_str("unknown"),
            Value::Unknown => return Err(Error::UnsupportedType),
        }
        Ok(())
    }

    pub(crate) fn write_null(&mut self) {
        self.out.push_str("null")
    }

    pub(crate) fn write_number(&mut self, n: &Number) -> Result<(), Error> {
        if !n.is_finite() && !self.lenient {
            debug!("rejecting non-finite number '{}' during serialisation", n);
            return Err(Error::InvalidJson);
        }
        self.out.push_str(&n.to_string());
        Ok(())
    }

    pub(crate) fn write_string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                '\u{8}' => self.out.push_str("\\b"),
                '\u{c}' => self.out.push_str("\\f"),
                c if (c as u32) < 0x20 => self.out.push_str(&format!("\\u{:04x}", c as u32)),
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    pub(crate) fn begin_array(&mut self) {
        self.out.push('[')
    }

    /// Separate and position the element at `index`, which lives at `depth`
    pub(crate) fn element(&mut self, index: usize, depth: usize) {
        if index > 0 {
            self.out.push(',');
        }
        self.newline(depth);
    }

    pub(crate) fn end_array(&mut self, depth: usize, count: usize) {
        if count > 0 {
            self.newline(depth);
        }
        self.out.push(']')
    }

    pub(crate) fn begin_object(&mut self) {
        self.out.push('{')
    }

    /// Separate, position and write the key of the member at `index`, which lives at `depth`
    pub(crate) fn key(&mut self, index: usize, depth: usize, key: &str) {
        self.element(index, depth);
        self.write_string(key);
        self.out.push(':');
        if self.options.pretty {
            self.out.push(' ');
        }
    }

    pub(crate) fn end_object(&mut self, depth: usize, count: usize) {
        if count > 0 {
            self.newline(depth);
        }
        self.out.push('}')
    }

    fn newline(&mut self, depth: usize) {
        if self.options.pretty {
            self.out.push('\n');
            for _ in 0..depth {
                self.out.push_str(INDENT);
            }
        }
    }
}

impl Json {
    /// Serialise into JSON text. Nesting depth is unrestricted
    pub fn serialize(&self, options: &WriteOptions) -> Result<String, Error> {
        let mut writer = Writer::new(options);
        writer.write_json(self, 0)?;
        Ok(writer.finish())
    }

    /// Serialise into UTF-8 encoded JSON text
    pub fn to_vec(&self, options: &WriteOptions) -> Result<Vec<u8>, Error> {
        self.serialize(options).map(String::into_bytes)
    }

    /// Render the value for display or interchange: scalars are written unquoted, containers as
    /// JSON text with nesting limited by [WriteOptions::max_depth]
    pub fn raw_string(&self, options: &WriteOptions) -> Result<String, Error> {
        match &self.value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Null => Ok("null".to_string()),
            Value::Unknown => Err(Error::UnsupportedType),
            Value::Array(_) | Value::Object(_) => {
                let mut writer = Writer::new(options).depth_limited();
                writer.write_json(self, 0)?;
                Ok(writer.finish())
            }
        }
    }
}

/// Pretty printed description of a container, falling back to display sentinels for content
/// JSON can't represent
pub(crate) fn describe(json: &Json) -> String {
    let options = WriteOptions::pretty();
    let mut writer = Writer::new(&options).lenient();
    match writer.write_json(json, 0) {
        Ok(()) => writer.finish(),
        Err(_) => String::from("unknown"),
    }
}
