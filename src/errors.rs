//! General error types, both for values and for the parser
//!
//! There are two distinct error channels within the crate. An [Error] is a small, closed code
//! that may be *attached* to a [crate::Json] (for example, the result of looking up a missing key)
//! or returned from one of the fallible operations such as merging or serialisation. A
//! [ParserError] carries the detailed reason (and location) of a failed parse, and collapses down
//! to [Error::InvalidJson] whenever it crosses into the value layer.
use std::fmt::{Display, Formatter};

use crate::coords::Coords;
use crate::lexer::Token;

/// The closed set of errors which may be attached to, or produced by operations on, a
/// [crate::Json] value
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Error {
    /// A native value could not be classified as one of the supported JSON types
    UnsupportedType,
    /// An array index was negative, or beyond the end of the array
    IndexOutOfBounds,
    /// A nesting limit was reached whilst serialising
    ElementTooDeep,
    /// The value was not of the type required by the operation
    WrongType,
    /// An object did not contain the requested key
    KeyNotExist,
    /// Input was not valid JSON, or a value cannot be represented as valid JSON
    InvalidJson,
}

impl Error {
    /// The stable numeric code associated with the error
    pub fn code(&self) -> i32 {
        match self {
            Error::UnsupportedType => 999,
            Error::IndexOutOfBounds => 900,
            Error::ElementTooDeep => 902,
            Error::WrongType => 901,
            Error::KeyNotExist => 500,
            Error::InvalidJson => 490,
        }
    }

    /// The fixed, human-readable message associated with the error
    pub fn message(&self) -> &'static str {
        match self {
            Error::UnsupportedType => "It is an unsupported type.",
            Error::IndexOutOfBounds => "Array index is out of bounds.",
            Error::ElementTooDeep => "Element too deep. Increase maxObjectDepth and make sure there is no reference loop.",
            Error::WrongType => "Couldn't complete the operation, because the JSON is of the wrong type.",
            Error::KeyNotExist => "Dictionary key does not exist.",
            Error::InvalidJson => "JSON is invalid.",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

impl std::error::Error for Error {}

/// Global result type used throughout the parser stages
pub type ParserResult<T> = Result<T, ParserError>;

/// Enumeration of the various different parser stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// The lexer stage of the parser
    Lexer,
    /// The parsing/DOM construction stage of the parser
    Parser,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexer => write!(f, "lexer"),
            Stage::Parser => write!(f, "parser"),
        }
    }
}

/// A global enumeration of parser error details
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    EndOfInput,
    ZeroLengthInput,
    NonUtf8InputDetected,
    NonAsciiInputDetected,
    InvalidFile,
    StreamFailure,
    UnexpectedToken(Token),
    PairExpected,
    InvalidObject,
    InvalidArray,
    InvalidCharacter(char),
    MatchFailed,
    InvalidNumericRepresentation(String),
    InvalidEscapeSequence(String),
    InvalidUnicodeEscapeSequence(String),
    TrailingInput,
    MaxDepthExceeded(usize),
}

impl Display for Details {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Details::EndOfInput => write!(f, "end of input reached"),
            Details::ZeroLengthInput => write!(f, "zero length input"),
            Details::NonUtf8InputDetected => write!(f, "non-UTF-8 input detected"),
            Details::NonAsciiInputDetected => write!(f, "non-ASCII input detected"),
            Details::InvalidFile => write!(f, "invalid or unreadable file"),
            Details::StreamFailure => write!(f, "failed to read from the input stream"),
            Details::UnexpectedToken(token) => write!(f, "unexpected token found: {}", token),
            Details::PairExpected => write!(f, "expected a key/value pair"),
            Details::InvalidObject => write!(f, "invalid object"),
            Details::InvalidArray => write!(f, "invalid array"),
            Details::InvalidCharacter(c) => write!(f, "invalid character found: {:?}", c),
            Details::MatchFailed => write!(f, "failed to match a literal"),
            Details::InvalidNumericRepresentation(s) => {
                write!(f, "invalid numeric representation: {}", s)
            }
            Details::InvalidEscapeSequence(s) => write!(f, "invalid escape sequence: {}", s),
            Details::InvalidUnicodeEscapeSequence(s) => {
                write!(f, "invalid unicode escape sequence: {}", s)
            }
            Details::TrailingInput => write!(f, "unexpected input after the root value"),
            Details::MaxDepthExceeded(depth) => {
                write!(f, "maximum nesting depth of {} exceeded", depth)
            }
        }
    }
}

/// The general parser error structure
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: Details,
    /// Optional parser coordinates
    pub coords: Option<Coords>,
}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.coords {
            Some(coords) => write!(f, "{} error at {}: {}", self.stage, coords, self.details),
            None => write!(f, "{} error: {}", self.stage, self.details),
        }
    }
}

impl std::error::Error for ParserError {}

impl From<ParserError> for Error {
    fn from(_: ParserError) -> Self {
        Error::InvalidJson
    }
}

#[macro_export]
macro_rules! lexer_error {
    ($details: expr, $coords : expr) => {
        Err($crate::errors::ParserError {
            stage: $crate::errors::Stage::Lexer,
            details: $details,
            coords: Some($coords),
        })
    };
}

#[macro_export]
macro_rules! parser_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::ParserError {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: Some($coords),
        })
    };
    ($details: expr) => {
        Err($crate::errors::ParserError {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: None,
        })
    };
}
