//! The parser operates over a stream of `char`s produced by some flavour of iterator. By default,
//! this iterator is based on a decoder that will take a stream of bytes from an underlying source,
//! and convert into a stream of `char`s.
//!
//! The [DecoderSelector] implemented within this module is used to instantiate new `char`
//! iterators, based on different encodings. (Currently only ASCII and UTF-8 are supported).
use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};
use std::io::BufRead;

/// Enumeration of different supported encoding types
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Ascii,
}

impl Default for Encoding {
    #[cfg(feature = "default_utf8_encoding")]
    fn default() -> Self {
        Self::Utf8
    }

    #[cfg(not(feature = "default_utf8_encoding"))]
    fn default() -> Self {
        Self::Ascii
    }
}

/// A struct that is essentially a factory for creating new instances of [char] iterators,
/// based on a specified encoding type
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct DecoderSelector {}

impl DecoderSelector {
    /// Create and return an instance of a given byte decoder / char iterator based on a specific
    /// encoding
    pub fn new_decoder<'a, Buffer: BufRead>(
        &'a self,
        buffer: &'a mut Buffer,
        encoding: Encoding,
    ) -> Box<dyn Iterator<Item = char> + 'a> {
        match encoding {
            Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
            Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::BufReader;

    use crate::decoders::{DecoderSelector, Encoding};

    #[test]
    fn should_decode_multibyte_utf8() {
        let source = "{\"kéy\": \"välue ✓\"}";
        let mut reader = BufReader::new(source.as_bytes());
        let selector = DecoderSelector::default();
        let decoded: String = selector.new_decoder(&mut reader, Encoding::Utf8).collect();
        assert_eq!(decoded, source);
    }

    #[test]
    fn should_decode_plain_ascii() {
        let source = "[1, 2, 3]";
        let mut reader = BufReader::new(source.as_bytes());
        let selector = DecoderSelector::default();
        let decoded: String = selector.new_decoder(&mut reader, Encoding::Ascii).collect();
        assert_eq!(decoded, source);
    }
}
