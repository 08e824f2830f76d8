//! The DOM parser
//!
//! A recursive descent parser which pulls [Token]s from a [Lexer] and builds a complete [Json]
//! tree. Any JSON value is accepted at the root, trailing input after the root value is rejected,
//! and nesting is limited to [DEFAULT_NESTING_LIMIT] levels unless configured otherwise.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::coords::{Coords, Span};
use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{Details, ParserResult};
use crate::lexer::{Lexer, PackedToken, Token};
use crate::parser_error;
use crate::value::Json;

/// The default limit on array and object nesting
pub const DEFAULT_NESTING_LIMIT: usize = 128;

/// Main JSON parser struct
#[derive(Debug, Copy, Clone)]
pub struct Parser {
    decoders: DecoderSelector,
    encoding: Encoding,
    max_depth: usize,
}

impl Default for Parser {
    /// The default encoding is Utf-8
    fn default() -> Self {
        Self {
            decoders: Default::default(),
            encoding: Default::default(),
            max_depth: DEFAULT_NESTING_LIMIT,
        }
    }
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Default::default()
        }
    }

    /// Change the limit on array and object nesting
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the contents of a file
    pub fn parse_file<PathLike: AsRef<Path>>(&self, path: PathLike) -> ParserResult<Json> {
        match File::open(&path) {
            Ok(f) => self.parse_reader(BufReader::new(f)),
            Err(_) => {
                parser_error!(Details::InvalidFile)
            }
        }
    }

    /// Parse a complete buffer. The buffer is validated against the configured [Encoding]
    /// before any decoding takes place
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<Json> {
        if bytes.is_empty() {
            return parser_error!(Details::ZeroLengthInput, Coords::default());
        }
        match self.encoding {
            Encoding::Utf8 => {
                if let Err(err) = std::str::from_utf8(bytes) {
                    return parser_error!(
                        Details::NonUtf8InputDetected,
                        Coords {
                            absolute: err.valid_up_to(),
                            ..Default::default()
                        }
                    );
                }
            }
            Encoding::Ascii => {
                if let Some(position) = bytes.iter().position(|b| !b.is_ascii()) {
                    return parser_error!(
                        Details::NonAsciiInputDetected,
                        Coords {
                            absolute: position,
                            ..Default::default()
                        }
                    );
                }
            }
        }
        let mut reader = BufReader::new(bytes);
        let mut chars = self.decoders.new_decoder(&mut reader, self.encoding);
        self.parse(&mut chars)
    }

    /// Parse a string slice, which is already known to be valid
    pub fn parse_str(&self, str: &str) -> ParserResult<Json> {
        self.parse(&mut str.chars())
    }

    /// Parse the contents of a buffered reader. The reader is drained and the resulting buffer
    /// validated in the same way as [Parser::parse_bytes]
    pub fn parse_reader<B: BufRead>(&self, mut reader: B) -> ParserResult<Json> {
        let mut buffer = vec![];
        match reader.read_to_end(&mut buffer) {
            Ok(_) => self.parse_bytes(&buffer),
            Err(_) => parser_error!(Details::StreamFailure),
        }
    }

    /// Parse a stream of chars
    pub fn parse(&self, chars: &mut impl Iterator<Item = char>) -> ParserResult<Json> {
        let mut lexer = Lexer::new(chars);
        let root = match lexer.consume()? {
            (Token::EndOfInput, span) => {
                return parser_error!(Details::ZeroLengthInput, span.start);
            }
            packed => self.parse_value(&mut lexer, packed, 0)?,
        };
        match lexer.consume()? {
            (Token::EndOfInput, _) => Ok(root),
            (_, span) => parser_error!(Details::TrailingInput, span.start),
        }
    }

    fn parse_value(&self, lexer: &mut Lexer, packed: PackedToken, depth: usize) -> ParserResult<Json> {
        match packed {
            (Token::StartObject, span) => self.parse_object(lexer, span, depth + 1),
            (Token::StartArray, span) => self.parse_array(lexer, span, depth + 1),
            (Token::Str(str), _) => Ok(Json::from(str)),
            (Token::Num(value), _) => Ok(Json::from(value)),
            (Token::Bool(value), _) => Ok(Json::from(value)),
            (Token::Null, _) => Ok(Json::null()),
            (token, span) => {
                parser_error!(Details::UnexpectedToken(token), span.start)
            }
        }
    }

    fn check_depth(&self, depth: usize, span: Span) -> ParserResult<()> {
        if depth > self.max_depth {
            return parser_error!(Details::MaxDepthExceeded(self.max_depth), span.start);
        }
        Ok(())
    }

    /// An object is just a list of comma separated KV pairs. Later duplicate keys replace
    /// earlier ones
    fn parse_object(&self, lexer: &mut Lexer, start: Span, depth: usize) -> ParserResult<Json> {
        self.check_depth(depth, start)?;
        let mut pairs = BTreeMap::new();
        match lexer.consume()? {
            (Token::EndObject, _) => return Ok(Json::object(pairs)),
            packed => self.parse_pair(lexer, packed, &mut pairs, depth)?,
        }
        loop {
            match lexer.consume()? {
                (Token::Comma, _) => {
                    let packed = lexer.consume()?;
                    self.parse_pair(lexer, packed, &mut pairs, depth)?
                }
                (Token::EndObject, _) => return Ok(Json::object(pairs)),
                (_token, span) => {
                    return parser_error!(Details::InvalidObject, span.start);
                }
            }
        }
    }

    fn parse_pair(
        &self,
        lexer: &mut Lexer,
        packed: PackedToken,
        pairs: &mut BTreeMap<String, Json>,
        depth: usize,
    ) -> ParserResult<()> {
        match packed {
            (Token::Str(str), _) => {
                let should_be_colon = lexer.consume()?;
                match should_be_colon {
                    (Token::Colon, _) => {
                        let packed = lexer.consume()?;
                        let value = self.parse_value(lexer, packed, depth)?;
                        pairs.insert(str, value);
                        Ok(())
                    }
                    (_, span) => parser_error!(Details::PairExpected, span.start),
                }
            }
            (_, span) => parser_error!(Details::PairExpected, span.start),
        }
    }

    /// An array is just a list of comma separated values
    fn parse_array(&self, lexer: &mut Lexer, start: Span, depth: usize) -> ParserResult<Json> {
        self.check_depth(depth, start)?;
        let mut values: Vec<Json> = vec![];
        match lexer.consume()? {
            (Token::EndArray, _) => return Ok(Json::array(values)),
            packed => values.push(self.parse_value(lexer, packed, depth)?),
        }
        loop {
            match lexer.consume()? {
                (Token::Comma, _) => {
                    let packed = lexer.consume()?;
                    values.push(self.parse_value(lexer, packed, depth)?)
                }
                (Token::EndArray, _) => return Ok(Json::array(values)),
                (_token, span) => {
                    return parser_error!(Details::InvalidArray, span.start);
                }
            }
        }
    }
}
