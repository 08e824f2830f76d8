//! Parsing entry points
//!
//! Input flows through a [crate::decoders::DecoderSelector] (bytes to chars), then the
//! [crate::lexer::Lexer] (chars to tokens) and finally the DOM [Parser] (tokens to a [Json]
//! tree). The methods on [Json] collapse any failure into [Error::InvalidJson]; use [Parser]
//! directly to get at the detailed [crate::errors::ParserError].

/// The DOM-based parser
pub mod dom;

use std::io::BufRead;
use std::str::FromStr;

use log::debug;

use crate::errors::{Error, ParserError};
use crate::value::Json;

pub use dom::Parser;

fn collapse(err: ParserError) -> Error {
    debug!("failed to parse JSON: {}", err);
    Error::from(err)
}

impl Json {
    /// Parse a UTF-8 encoded buffer
    pub fn from_slice(bytes: &[u8]) -> Result<Json, Error> {
        Parser::default().parse_bytes(bytes).map_err(collapse)
    }

    /// Parse the contents of a buffered reader
    pub fn from_reader<B: BufRead>(reader: B) -> Result<Json, Error> {
        Parser::default().parse_reader(reader).map_err(collapse)
    }

    /// Parse a string, attaching any failure to the result rather than returning it. A
    /// failed parse yields a null carrying [Error::InvalidJson]
    pub fn parse(source: &str) -> Json {
        source
            .parse::<Json>()
            .unwrap_or_else(Json::errored)
    }
}

impl FromStr for Json {
    type Err = Error;

    fn from_str(s: &str) -> Result<Json, Error> {
        Parser::default().parse_str(s).map_err(collapse)
    }
}

#[cfg(test)]
mod tests {
    use std::io::BufReader;

    use crate::errors::Error;
    use crate::value::{Json, Type};
    use crate::{json, reader_from_bytes};

    #[test]
    fn should_parse_slices() {
        let parsed = Json::from_slice(br#"{"a": [1, 2.5, "x"]}"#).unwrap();
        assert_eq!(parsed, json!({"a": [1, 2.5, "x"]}));
    }

    #[test]
    fn should_parse_readers() {
        let parsed = Json::from_reader(reader_from_bytes!("[true, false]")).unwrap();
        assert_eq!(parsed, json!([true, false]));
    }

    #[test]
    fn should_reject_undecodable_readers() {
        assert_eq!(
            Json::from_reader(&b"[1]\xff\xff garbage"[..]),
            Err(Error::InvalidJson)
        );
        assert_eq!(Json::from_reader(&b"\"\xC3"[..]), Err(Error::InvalidJson));
    }

    #[test]
    fn should_collapse_failures_to_invalid_json() {
        assert_eq!(Json::from_slice(b"{\"a\":"), Err(Error::InvalidJson));
        assert_eq!("[1,".parse::<Json>(), Err(Error::InvalidJson));
    }

    #[test]
    fn should_attach_parse_failures() {
        let parsed = Json::parse("{oops}");
        assert_eq!(parsed.kind(), Type::Null);
        assert_eq!(parsed.error(), Some(Error::InvalidJson));
        assert!(Json::parse("{}").exists());
    }
}
