//! Decoding and encoding of Base 16 a.k.a. hex digits.
//!
//! The Base 16 encoding is defined in [RFC 4648]. It really is just a normal
//! hex-encoding using the (case-insensitive) letters ‘A’ to ‘F’ as
//! additional values for the digits.
//!
//! Zonefiles use it for the data of the generic record data format of
//! [RFC 3597] where the digits may be spread over several tokens.
//!
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use core::fmt;
use std::vec::Vec;

//------------ Convenience Functions -----------------------------------------

/// Decodes a string with Base 16 data and returns it as a vec.
pub fn decode_vec(s: &str) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = Decoder::new();
    for ch in s.chars() {
        decoder.push(ch)?;
    }
    decoder.finalize()
}

/// Encodes binary data in Base 16 and writes it into a format stream.
///
/// Lower case letters are used for the digits above nine.
pub fn display<Target: fmt::Write>(
    octets: &[u8],
    f: &mut Target,
) -> fmt::Result {
    for &octet in octets {
        write!(f, "{:02x}", octet)?;
    }
    Ok(())
}

/// Returns a placeholder value that implements `Display` for encoded data.
pub fn encode_display(octets: &[u8]) -> impl fmt::Display + '_ {
    struct Display<'a>(&'a [u8]);

    impl fmt::Display for Display<'_> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            display(self.0, f)
        }
    }

    Display(octets)
}

//------------ Decoder -------------------------------------------------------

/// A Base 16 decoder.
///
/// This type keeps all the state for decoding a sequence of characters
/// representing data encoded in Base 16. Upon success, the decoder returns
/// the decoded data.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    /// A buffer for the first half of an octet.
    buf: Option<u8>,

    /// The decoded octets so far.
    target: Vec<u8>,
}

impl Decoder {
    /// Creates a new, empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalizes decoding and returns the decoded data.
    pub fn finalize(self) -> Result<Vec<u8>, DecodeError> {
        if self.buf.is_some() {
            return Err(DecodeError::ShortInput);
        }
        Ok(self.target)
    }

    /// Decodes one more character of data.
    pub fn push(&mut self, ch: char) -> Result<(), DecodeError> {
        let value = match ch.to_digit(16) {
            Some(value) => value as u8,
            None => return Err(DecodeError::IllegalChar(ch)),
        };
        if let Some(upper) = self.buf.take() {
            self.target.push(upper | value);
        } else {
            self.buf = Some(value << 4)
        }
        Ok(())
    }
}

//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding a Base 16 encoded string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// A character was pushed that isn’t allowed in the encoding.
    IllegalChar(char),

    /// There was trailing data that wasn’t a full octet.
    ShortInput,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::IllegalChar(ch) => {
                write!(f, "illegal character '{}'", ch)
            }
            DecodeError::ShortInput => f.write_str("incomplete input"),
        }
    }
}

impl std::error::Error for DecodeError {}

//============ Test ==========================================================
