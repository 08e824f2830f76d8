use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};

use chisel_decoders::utf8::Utf8Decoder;
use chisel_value::coords::Coords;
use chisel_value::decoders::Encoding;
use chisel_value::errors::{Details, Stage};
use chisel_value::lexer::{Lexer, Token};
use chisel_value::Number;

fn all_tokens(source: &str) -> Vec<Token> {
    let mut chars = source.chars();
    let mut lexer = Lexer::new(&mut chars);
    let mut tokens = vec![];
    loop {
        let (token, _) = lexer.consume().unwrap();
        if token == Token::EndOfInput {
            tokens.push(token);
            return tokens;
        }
        tokens.push(token);
    }
}

#[test]
fn should_parse_basic_tokens() {
    assert_eq!(
        all_tokens("{}[],:"),
        [
            Token::StartObject,
            Token::EndObject,
            Token::StartArray,
            Token::EndArray,
            Token::Comma,
            Token::Colon,
            Token::EndOfInput
        ]
    );
}

#[test]
fn should_parse_null_and_booleans() {
    assert_eq!(
        all_tokens("null true    falsetruefalse"),
        [
            Token::Null,
            Token::Bool(true),
            Token::Bool(false),
            Token::Bool(true),
            Token::Bool(false),
            Token::EndOfInput
        ]
    );
}

#[test]
fn should_parse_strings() {
    let path = env::current_dir()
        .unwrap()
        .join("fixtures/samples/utf-8/strings.txt");
    let f = File::open(path).unwrap();
    let lines = BufReader::new(f).lines();
    for l in lines.flatten() {
        if !l.is_empty() {
            let mut chars = l.chars();
            let mut lexer = Lexer::new(&mut chars);
            let (token, span) = lexer.consume().unwrap();
            match token {
                Token::Str(_) => {
                    assert_eq!(span.start.column, 0);
                    assert_eq!(span.end.column, l.chars().count());
                }
                _ => panic!("expected a string token for {}", l),
            }
        }
    }
}

#[test]
fn should_decode_strings_from_byte_sources() {
    let path = env::current_dir()
        .unwrap()
        .join("fixtures/samples/utf-8/strings.txt");
    let f = File::open(path).unwrap();
    let mut reader = BufReader::new(f);
    let mut chars = Utf8Decoder::new(&mut reader);
    let mut lexer = Lexer::new(&mut chars);
    let mut strings = vec![];
    while let (Token::Str(s), _) = lexer.consume().unwrap() {
        strings.push(s);
    }
    assert_eq!(strings.len(), 8);
    assert_eq!(strings[3], "unicode escape éè");
    assert_eq!(strings[5], "surrogates 🚀 rocket");
    assert_eq!(strings[6], "");
    assert_eq!(Encoding::default(), Encoding::Utf8);
}

#[test]
fn should_parse_numerics() {
    assert_eq!(
        all_tokens("0 -1 2.5 1e3 18446744073709551615"),
        [
            Token::Num(Number::from(0)),
            Token::Num(Number::from(-1)),
            Token::Num(Number::from(2.5)),
            Token::Num(Number::from(1000)),
            Token::Num(Number::from(u64::MAX)),
            Token::EndOfInput
        ]
    );
}

#[test]
fn should_report_errors_with_coordinates() {
    let source = "[\n  true,\n  fals\n]";
    let mut chars = source.chars();
    let mut lexer = Lexer::new(&mut chars);
    let err = loop {
        match lexer.consume() {
            Ok((Token::EndOfInput, _)) => panic!("expected a failure"),
            Ok(_) => (),
            Err(err) => break err,
        }
    };
    assert_eq!(err.stage, Stage::Lexer);
    assert_eq!(err.details, Details::MatchFailed);
    assert_eq!(
        err.coords,
        Some(Coords {
            absolute: 12,
            line: 2,
            column: 2
        })
    );
}
