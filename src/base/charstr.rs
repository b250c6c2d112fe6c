//! Character strings.
//!
//! The somewhat ill-named `<character-string>` is defined in [RFC 1035] as
//! binary information of up to 255 octets. As such, it doesn’t necessarily
//! contain (ASCII-) characters nor is it a string in a Rust-sense.
//!
//! In presentation format, a character string is either a single token or
//! a sequence of characters enclosed in double quotes. Characters that
//! aren’t printable ASCII are escaped.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::scan::decode_octets;
use super::wire::{Compose, Parse, ParseError, Parser};
use super::zonefile_fmt::{self, Formatter, ZonefileFmt};
use crate::error::Error;
use core::str::FromStr;
use std::fmt;
use std::vec::Vec;

//------------ CharStr -------------------------------------------------------

/// The content of a DNS character string.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct CharStr(Vec<u8>);

impl CharStr {
    /// The maximum length of a character string.
    pub const MAX_LEN: usize = 255;

    /// Creates a character string from its octets.
    pub fn from_octets(octets: Vec<u8>) -> Result<Self, CharStrError> {
        if octets.len() > Self::MAX_LEN {
            Err(CharStrError)
        } else {
            Ok(CharStr(octets))
        }
    }

    /// Creates a character string from its presentation format.
    ///
    /// Escape sequences are decoded. Surrounding quotes must have been
    /// removed already.
    pub fn from_presentation(s: &str) -> Result<Self, Error> {
        let octets = decode_octets(s).map_err(|err| {
            Error::invalid_data(format!("{} in '{}'", err, s))
        })?;
        Self::from_octets(octets).map_err(|err| {
            Error::invalid_data(format!("{} in '{}'", err, s))
        })
    }

    /// Returns the octets of the string.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the length of the string in octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an object that displays the string in double quotes.
    pub fn display_quoted(&self) -> DisplayQuoted {
        DisplayQuoted(self.as_slice())
    }
}

//--- FromStr

impl FromStr for CharStr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_presentation(s)
    }
}

//--- Compose and Parse

impl Compose for CharStr {
    fn compose(&self, target: &mut Vec<u8>) {
        // The length was checked at creation.
        target.push(self.0.len() as u8);
        target.extend_from_slice(&self.0);
    }
}

impl Parse for CharStr {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let len = parser.parse_u8()?;
        Ok(CharStr(parser.parse_octets(len.into())?.into()))
    }
}

//--- Display, Debug, and ZonefileFmt

impl fmt::Display for CharStr {
    /// Writes the string as an unquoted token.
    ///
    /// Spaces and other special characters are escaped.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in self.0.iter() {
            write_octet(f, ch, false)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CharStr({})", self.display_quoted())
    }
}

impl ZonefileFmt for CharStr {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token(self.display_quoted())
    }
}

fn write_octet(f: &mut fmt::Formatter, ch: u8, quoted: bool) -> fmt::Result {
    if ch == b'"' || ch == b'\\' || (!quoted && b"();".contains(&ch)) {
        write!(f, "\\{}", ch as char)
    } else if ch == b' ' && quoted {
        f.write_str(" ")
    } else if (0x21..0x7F).contains(&ch) {
        write!(f, "{}", ch as char)
    } else {
        write!(f, "\\{:03}", ch)
    }
}

//--- Serialize

impl serde::Serialize for CharStr {
    /// Serializes the string as text.
    ///
    /// Content that isn’t valid UTF-8 is written with escape sequences.
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match std::str::from_utf8(&self.0) {
            Ok(s) => serializer.serialize_str(s),
            Err(_) => serializer.collect_str(self),
        }
    }
}

//------------ DisplayQuoted -------------------------------------------------

/// Helper for displaying a character string in double quotes.
///
/// This can also be used for other octet sequences that use the quoted
/// presentation format but aren’t limited in length.
#[derive(Clone, Copy, Debug)]
pub struct DisplayQuoted<'a>(&'a [u8]);

impl<'a> DisplayQuoted<'a> {
    /// Creates a quoted display for arbitrary octets.
    pub fn new(octets: &'a [u8]) -> Self {
        DisplayQuoted(octets)
    }
}

impl fmt::Display for DisplayQuoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("\"")?;
        for &ch in self.0 {
            write_octet(f, ch, true)?;
        }
        f.write_str("\"")
    }
}

//------------ CharStrError --------------------------------------------------

/// A byte sequence does not represent a valid character string.
///
/// This can only mean that the sequence is longer than 255 octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CharStrError;

impl fmt::Display for CharStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("long character string")
    }
}

impl std::error::Error for CharStrError {}

/// Converts octets into a sequence of character strings.
///
/// The octets are split into strings of at most `chunk` octets. Empty input
/// results in a single empty string.
pub fn split_octets(octets: &[u8], chunk: usize) -> Vec<CharStr> {
    let chunk = chunk.clamp(1, CharStr::MAX_LEN);
    if octets.is_empty() {
        return vec![CharStr::default()];
    }
    octets.chunks(chunk).map(|c| CharStr(c.into())).collect()
}

//============ Tests =========================================================
