//! A lexer implementation which consumes a stream of `char`s and produces a stream of [Token]s,
//! each packed alongside the [Span] of input it was matched from.
//!
//! The lexer is a simple LA(1) affair: it peeks at the next character in the input and, based on
//! the grammar rules, attempts to match a complete token with that prefix. Whitespace is skipped
//! between tokens. String escapes are decoded, and numbers are validated against the JSON number
//! grammar before being handed over to the numeric parsers.
//!
//! The current implementation of the lexer is *not* internally thread safe.
use std::fmt::{Display, Formatter};

use crate::coords::{Coords, Span};
use crate::errors::{Details, ParserResult};
use crate::lexer_error;
use crate::number::Number;

/// Sequence of literal characters forming a 'null' token
const NULL_SEQUENCE: &str = "null";
/// Sequence of literal characters forming a 'true' token
const TRUE_SEQUENCE: &str = "true";
/// Sequence of literal characters forming a 'false' token
const FALSE_SEQUENCE: &str = "false";

/// Default string buffer capacity
const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Enumeration of valid JSON tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Colon,
    Comma,
    Str(String),
    Num(Number),
    Null,
    Bool(bool),
    EndOfInput,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::StartObject => write!(f, "'{{'"),
            Token::EndObject => write!(f, "'}}'"),
            Token::StartArray => write!(f, "'['"),
            Token::EndArray => write!(f, "']'"),
            Token::Colon => write!(f, "':'"),
            Token::Comma => write!(f, "','"),
            Token::Str(s) => write!(f, "string {:?}", s),
            Token::Num(n) => write!(f, "number {}", n),
            Token::Null => write!(f, "null"),
            Token::Bool(b) => write!(f, "{}", b),
            Token::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A packed token consists of a [Token] and the [Span] associated with it
pub type PackedToken = (Token, Span);

/// Convenience macro for packing tokens along with their positional information
macro_rules! packed_token {
    ($t:expr, $s:expr, $e:expr) => {
        ($t, Span { start: $s, end: $e })
    };
    ($t:expr, $s:expr) => {
        ($t, Span { start: $s, end: $s })
    };
}

/// JSON only recognises four whitespace characters
fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Check a numeric literal against the JSON number grammar:
/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_valid_number(literal: &str) -> bool {
    let bytes = literal.as_bytes();
    let mut index = 0;
    let digits = |index: &mut usize| {
        let start = *index;
        while *index < bytes.len() && bytes[*index].is_ascii_digit() {
            *index += 1;
        }
        *index - start
    };

    if bytes.first() == Some(&b'-') {
        index += 1;
    }
    match bytes.get(index) {
        Some(b'0') => index += 1,
        Some(b'1'..=b'9') => {
            digits(&mut index);
        }
        _ => return false,
    }
    if bytes.get(index) == Some(&b'.') {
        index += 1;
        if digits(&mut index) == 0 {
            return false;
        }
    }
    if matches!(bytes.get(index), Some(b'e') | Some(b'E')) {
        index += 1;
        if matches!(bytes.get(index), Some(b'+') | Some(b'-')) {
            index += 1;
        }
        if digits(&mut index) == 0 {
            return false;
        }
    }
    index == bytes.len()
}

pub struct Lexer<'a> {
    /// The underlying source of characters
    chars: &'a mut dyn Iterator<Item = char>,
    /// Single character lookahead
    lookahead: Option<char>,
    /// The [Coords] of the next character to be consumed
    coords: Coords,
    /// Internal buffer for hoovering up strings and numbers from the input
    buffer: String,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a mut dyn Iterator<Item = char>) -> Self {
        Lexer {
            chars,
            lookahead: None,
            coords: Coords::default(),
            buffer: String::with_capacity(DEFAULT_BUFFER_CAPACITY),
        }
    }

    /// Consume the next token from the input stream. Produces [Token::EndOfInput] once the input
    /// has been exhausted, and will continue to do so on subsequent calls.
    pub fn consume(&mut self) -> ParserResult<PackedToken> {
        self.skip_whitespace();
        let start = self.coords;
        match self.peek() {
            None => Ok(packed_token!(Token::EndOfInput, start)),
            Some(c) => match c {
                '{' => self.match_single(Token::StartObject),
                '}' => self.match_single(Token::EndObject),
                '[' => self.match_single(Token::StartArray),
                ']' => self.match_single(Token::EndArray),
                ':' => self.match_single(Token::Colon),
                ',' => self.match_single(Token::Comma),
                '"' => self.match_string(),
                'n' => self.match_exact(NULL_SEQUENCE, Token::Null),
                't' => self.match_exact(TRUE_SEQUENCE, Token::Bool(true)),
                'f' => self.match_exact(FALSE_SEQUENCE, Token::Bool(false)),
                '-' | '0'..='9' => self.match_number(),
                c => lexer_error!(Details::InvalidCharacter(c), start),
            },
        }
    }

    /// Peek at the next character without consuming it
    fn peek(&mut self) -> Option<char> {
        if self.lookahead.is_none() {
            self.lookahead = self.chars.next();
        }
        self.lookahead
    }

    /// Consume the next character, moving the coordinates along
    fn advance(&mut self) -> Option<char> {
        let next = match self.lookahead.take() {
            Some(c) => Some(c),
            None => self.chars.next(),
        };
        if let Some(c) = next {
            self.coords.advance(c);
        }
        next
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !is_json_whitespace(c) {
                break;
            }
            self.advance();
        }
    }

    /// Consume a single structural character
    fn match_single(&mut self, token: Token) -> ParserResult<PackedToken> {
        let start = self.coords;
        self.advance();
        Ok(packed_token!(token, start))
    }

    /// Consume and match (exactly) a sequence of characters from the input stream
    fn match_exact(&mut self, sequence: &str, token: Token) -> ParserResult<PackedToken> {
        let start = self.coords;
        for expected in sequence.chars() {
            match self.advance() {
                Some(c) if c == expected => (),
                Some(_) => return lexer_error!(Details::MatchFailed, start),
                None => return lexer_error!(Details::EndOfInput, self.coords),
            }
        }
        Ok(packed_token!(token, start, self.coords))
    }

    /// Attempt to match on a number representation. The literal is validated against the JSON
    /// grammar first, given that the numeric parsers are more lenient (leading zeros etc...)
    fn match_number(&mut self) -> ParserResult<PackedToken> {
        let start = self.coords;
        self.buffer.clear();
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '-' | '+' | '.' | 'e' | 'E' => {
                    self.buffer.push(c);
                    self.advance();
                }
                _ => break,
            }
        }

        if !is_valid_number(&self.buffer) {
            return lexer_error!(
                Details::InvalidNumericRepresentation(self.buffer.clone()),
                start
            );
        }
        match Number::parse_literal(&self.buffer) {
            Some(n) => Ok(packed_token!(Token::Num(n), start, self.coords)),
            None => lexer_error!(
                Details::InvalidNumericRepresentation(self.buffer.clone()),
                start
            ),
        }
    }

    /// Attempts to match a string token, decoding any escape sequences along the way. Raw
    /// control characters are not permitted within strings
    fn match_string(&mut self) -> ParserResult<PackedToken> {
        let start = self.coords;
        self.advance();
        self.buffer.clear();
        loop {
            let coords = self.coords;
            match self.advance() {
                Some('"') => break,
                Some('\\') => self.match_escape_sequence(coords)?,
                Some(c) if (c as u32) < 0x20 => {
                    return lexer_error!(Details::InvalidCharacter(c), coords);
                }
                Some(c) => self.buffer.push(c),
                None => return lexer_error!(Details::EndOfInput, coords),
            }
        }
        Ok(packed_token!(
            Token::Str(self.buffer.clone()),
            start,
            self.coords
        ))
    }

    /// Match and decode a valid string escape sequence
    fn match_escape_sequence(&mut self, start: Coords) -> ParserResult<()> {
        match self.advance() {
            Some('"') => self.buffer.push('"'),
            Some('\\') => self.buffer.push('\\'),
            Some('/') => self.buffer.push('/'),
            Some('b') => self.buffer.push('\u{8}'),
            Some('f') => self.buffer.push('\u{c}'),
            Some('n') => self.buffer.push('\n'),
            Some('r') => self.buffer.push('\r'),
            Some('t') => self.buffer.push('\t'),
            Some('u') => {
                let c = self.match_unicode_escape_sequence(start)?;
                self.buffer.push(c)
            }
            Some(c) => {
                return lexer_error!(Details::InvalidEscapeSequence(format!("\\{}", c)), start)
            }
            None => return lexer_error!(Details::EndOfInput, self.coords),
        }
        Ok(())
    }

    /// Match a unicode escape sequence in the form uXXXX where each X is a valid hex digit.
    /// High surrogates must be immediately followed by an escaped low surrogate
    fn match_unicode_escape_sequence(&mut self, start: Coords) -> ParserResult<char> {
        let high = self.match_hex_quad(start)?;
        let code = match high {
            0xD800..=0xDBFF => {
                if self.advance() != Some('\\') || self.advance() != Some('u') {
                    return lexer_error!(
                        Details::InvalidUnicodeEscapeSequence(format!("\\u{:04x}", high)),
                        start
                    );
                }
                let low = self.match_hex_quad(start)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return lexer_error!(
                        Details::InvalidUnicodeEscapeSequence(format!(
                            "\\u{:04x}\\u{:04x}",
                            high, low
                        )),
                        start
                    );
                }
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return lexer_error!(
                    Details::InvalidUnicodeEscapeSequence(format!("\\u{:04x}", high)),
                    start
                );
            }
            code => code,
        };
        match char::from_u32(code) {
            Some(c) => Ok(c),
            None => lexer_error!(
                Details::InvalidUnicodeEscapeSequence(format!("\\u{:04x}", code)),
                start
            ),
        }
    }

    fn match_hex_quad(&mut self, start: Coords) -> ParserResult<u32> {
        let mut code = 0;
        for _ in 1..=4 {
            match self.advance().and_then(|c| c.to_digit(16)) {
                Some(digit) => code = code * 16 + digit,
                None => {
                    return lexer_error!(
                        Details::InvalidUnicodeEscapeSequence("invalid hex digit".to_string()),
                        start
                    );
                }
            }
        }
        Ok(code)
    }
}
