//! Creating and consuming data in wire format.
//!
//! Record data in wire format appears in two places in zone data: in the
//! generic `\#` notation of [RFC 3597] in zonefiles and in the generic `:`
//! lines of tinydns data. In both cases, the data is a single record’s
//! data without any surrounding message, so there is no name compression.
//!
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597

use super::name::Name;
use core::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::vec::Vec;

//------------ Compose -------------------------------------------------------

/// An extension trait to add composing to foreign types.
pub trait Compose {
    /// Appends the wire format representation of the value to the target.
    fn compose(&self, target: &mut Vec<u8>);
}

impl<T: Compose + ?Sized> Compose for &T {
    fn compose(&self, target: &mut Vec<u8>) {
        (*self).compose(target)
    }
}

macro_rules! compose_to_be_bytes {
    ( $type:ident ) => {
        impl Compose for $type {
            fn compose(&self, target: &mut Vec<u8>) {
                target.extend_from_slice(&self.to_be_bytes())
            }
        }
    };
}

compose_to_be_bytes!(u8);
compose_to_be_bytes!(u16);
compose_to_be_bytes!(u32);

impl Compose for Ipv4Addr {
    fn compose(&self, target: &mut Vec<u8>) {
        target.extend_from_slice(&self.octets())
    }
}

impl Compose for Ipv6Addr {
    fn compose(&self, target: &mut Vec<u8>) {
        target.extend_from_slice(&self.octets())
    }
}

impl Compose for Name {
    /// Appends the uncompressed name including the root label.
    fn compose(&self, target: &mut Vec<u8>) {
        for label in self.labels() {
            // Labels are limited to 63 octets at creation.
            target.push(label.len() as u8);
            target.extend_from_slice(&label);
        }
        target.push(0)
    }
}

//------------ Parse ---------------------------------------------------------

/// A type that can extract a value from a parser.
pub trait Parse: Sized {
    /// Extracts a value from the beginning of `parser`.
    ///
    /// If parsing fails and an error is returned, the parser’s position
    /// should be considered to be undefined.
    fn parse(parser: &mut Parser) -> Result<Self, ParseError>;
}

impl Parse for u8 {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        parser.parse_u8()
    }
}

impl Parse for u16 {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        parser.parse_u16_be()
    }
}

impl Parse for u32 {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        parser.parse_u32_be()
    }
}

impl Parse for Ipv4Addr {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(parser.parse_octets(4)?);
        Ok(Ipv4Addr::from(buf))
    }
}

impl Parse for Ipv6Addr {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(parser.parse_octets(16)?);
        Ok(Ipv6Addr::from(buf))
    }
}

impl Parse for Name {
    /// Parses an uncompressed absolute name.
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let mut labels = Vec::new();
        loop {
            let len = parser.parse_u8()?;
            if len == 0 {
                break;
            }
            if len > 63 {
                return Err(ParseError::form_error(
                    "compressed or extended label",
                ));
            }
            labels.push(parser.parse_octets(len.into())?);
        }
        Name::from_labels(labels, true)
            .map_err(|_| ParseError::form_error("invalid domain name"))
    }
}

//------------ Parser --------------------------------------------------------

/// A parser for sequentially extracting data from an octets slice.
#[derive(Clone, Copy, Debug)]
pub struct Parser<'a> {
    octets: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser atop the given octets.
    pub fn new(octets: &'a [u8]) -> Self {
        Parser { octets, pos: 0 }
    }

    /// Returns the number of remaining octets.
    pub fn remaining(&self) -> usize {
        self.octets.len() - self.pos
    }

    /// Takes and returns the next `len` octets.
    pub fn parse_octets(
        &mut self,
        len: usize,
    ) -> Result<&'a [u8], ParseError> {
        if self.remaining() < len {
            return Err(ParseError::ShortInput);
        }
        let res = &self.octets[self.pos..self.pos + len];
        self.pos += len;
        Ok(res)
    }

    /// Takes and returns all remaining octets.
    pub fn parse_remaining(&mut self) -> &'a [u8] {
        let res = &self.octets[self.pos..];
        self.pos = self.octets.len();
        res
    }

    /// Takes a single octet.
    pub fn parse_u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.parse_octets(1)?[0])
    }

    /// Takes a big-endian `u16`.
    pub fn parse_u16_be(&mut self) -> Result<u16, ParseError> {
        let mut buf = [0u8; 2];
        buf.copy_from_slice(self.parse_octets(2)?);
        Ok(u16::from_be_bytes(buf))
    }

    /// Takes a big-endian `u32`.
    pub fn parse_u32_be(&mut self) -> Result<u32, ParseError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.parse_octets(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    /// Checks that all octets have been consumed.
    pub fn check_exhausted(&self) -> Result<(), ParseError> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(ParseError::form_error("trailing data"))
        }
    }
}

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the parser.
    ShortInput,

    /// A formatting error occurred.
    Form(FormError),
}

impl ParseError {
    /// Creates a new parse error as a form error with the given message.
    #[must_use]
    pub fn form_error(msg: &'static str) -> Self {
        FormError::new(msg).into()
    }
}

//--- From

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::Form(ref err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    #[must_use]
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }
}

//--- Display and Error

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn parse_integers() {
        let mut parser = Parser::new(b"\x01\x02\x03\x04\x05\x06\x07");
        assert_eq!(parser.parse_u8(), Ok(1));
        assert_eq!(parser.parse_u16_be(), Ok(0x0203));
        assert_eq!(parser.parse_u32_be(), Ok(0x04050607));
        assert_eq!(parser.parse_u8(), Err(ParseError::ShortInput));
        parser.check_exhausted().unwrap();
    }

    #[test]
    fn compose_parse_name() {
        let name = Name::from_str("www.Example.com.").unwrap();
        let mut buf = Vec::new();
        name.compose(&mut buf);
        assert_eq!(buf, b"\x03www\x07Example\x03com\x00");
        let mut parser = Parser::new(&buf);
        assert_eq!(Name::parse(&mut parser).unwrap(), name);
        assert_eq!(parser.remaining(), 0);

        let mut buf = Vec::new();
        Name::root().compose(&mut buf);
        assert_eq!(buf, b"\0");
    }

    #[test]
    fn reject_compression() {
        assert_eq!(
            Name::parse(&mut Parser::new(b"\x03www\xc0\x0c")),
            Err(ParseError::form_error("compressed or extended label"))
        );
        assert_eq!(
            Name::parse(&mut Parser::new(b"\x03www")),
            Err(ParseError::ShortInput)
        );
    }
}
