//! A dynamically typed JSON value with safe navigation.
//!
//! [Json] holds a number, string, boolean, array, object or null. Lookups by index, key or path
//! never fail outright: a failed lookup produces a null carrying an [Error], and chained lookups
//! report the first error encountered. Typed accessors come in optional (`as_i64`) and coercing
//! (`i64_value`) flavours, two values can be deep merged, and values serialise back into compact
//! or pretty printed JSON text.
//!
//! ```
//! use chisel_value::{json, path, Error, Json, WriteOptions};
//!
//! let mut doc = Json::parse(r#"{"user": {"name": "jo", "tags": ["a"]}}"#);
//! assert_eq!(doc["user"]["name"].string_value(), "jo");
//! assert_eq!(doc["user"]["age"].error(), Some(Error::KeyNotExist));
//!
//! doc.set_path(&path!["user", "tags", 0], "b");
//! doc.merge(&json!({"user": {"tags": ["c"]}})).unwrap();
//! assert_eq!(
//!     doc.serialize(&WriteOptions::compact()).unwrap(),
//!     r#"{"user":{"name":"jo","tags":["b","c"]}}"#
//! );
//! ```
//!
//! Parsing is handled by the crate's own pipeline: [decoders] turn bytes into chars, the
//! [lexer] turns chars into tokens and the [parser] builds the tree.

pub mod coords;
pub mod decoders;
pub mod errors;
pub mod lexer;
pub mod number;
pub mod parser;
pub mod raw;

mod accessors;
mod iter;
mod macros;
mod merge;
mod native;
mod path;
#[cfg(feature = "serde")]
mod serde;
#[cfg(test)]
mod test_macros;
mod value;
mod writer;

pub use errors::Error;
pub use iter::Iter;
pub use number::Number;
pub use path::{JsonPath, Segment};
pub use value::{Json, Type};
pub use writer::{WriteOptions, DEFAULT_MAX_DEPTH};
