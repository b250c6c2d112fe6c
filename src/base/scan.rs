//! Parsing of data from its presentation format.
//!
//! This module provides the basic machinery to parse DNS data from its
//! representation format in zonefiles. The [`Scanner`] trait is what a
//! source of tokens implements; record data types use it through the
//! [`Scan`] trait to assemble themselves.
//!
//! Presentation data is a sequence of _symbols_: ordinary characters,
//! characters escaped by a backslash, and octets given as a backslash
//! followed by three decimal digits. The [`Symbol`] type represents one of
//! those.

use super::charstr::CharStr;
use super::name::Name;
use crate::error::Error;
use core::str::FromStr;
use std::fmt;
use std::collections::VecDeque;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::string::String;
use std::vec::Vec;

//------------ Scan ---------------------------------------------------------

/// An extension trait to add parsing from presentation format to types.
pub trait Scan: Sized {
    /// Reads a value from the provided scanner.
    fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error>;
}

macro_rules! impl_scan_from_str {
    ($t:ty, $what:expr) => {
        impl Scan for $t {
            fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error> {
                let token = scanner.scan_token()?;
                <$t>::from_str(&token).map_err(|_| {
                    Error::invalid_data(format!(
                        concat!("expected ", $what, ", got '{}'"),
                        token
                    ))
                })
            }
        }
    };
}

impl_scan_from_str!(u8, "an 8 bit integer");
impl_scan_from_str!(u16, "a 16 bit integer");
impl_scan_from_str!(u32, "a 32 bit integer");
impl_scan_from_str!(Ipv4Addr, "an IPv4 address");
impl_scan_from_str!(Ipv6Addr, "an IPv6 address");

impl Scan for Name {
    fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error> {
        scanner.scan_name()
    }
}

impl Scan for CharStr {
    fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error> {
        scanner.scan_charstr()
    }
}

//------------ Scanner -------------------------------------------------------

/// A type that can produce tokens of data in presentation format.
///
/// The scanner covers the remaining tokens of a single entry, i.e., the
/// record data portion of a record. Running out of tokens is an error
/// for all `scan_*` methods; [`continues`][Self::continues] tells whether
/// there are more.
pub trait Scanner {
    /// Returns whether there are more tokens in the current entry.
    fn continues(&self) -> bool;

    /// Returns the next token as its raw presentation text.
    ///
    /// Escape sequences are kept as they are. The surrounding quotes of a
    /// quoted token are removed.
    fn scan_token(&mut self) -> Result<String, Error>;

    /// Scans a domain name and makes it absolute.
    ///
    /// The implementing type is responsible for resolving relative names
    /// and the `@` shorthand against the current origin.
    fn scan_name(&mut self) -> Result<Name, Error>;

    /// Scans a character string.
    fn scan_charstr(&mut self) -> Result<CharStr, Error> {
        let token = self.scan_token()?;
        CharStr::from_presentation(&token)
    }

    /// Skips over the `\#` marker of the generic record data format.
    ///
    /// Returns whether the marker was present.
    fn scan_opt_unknown_marker(&mut self) -> bool;
}

//------------ IterScanner ---------------------------------------------------

/// A simple scanner atop a sequence of tokens.
///
/// Relative names are qualified with the origin given at creation. Without
/// an origin, scanning a relative name fails.
#[derive(Clone, Debug)]
pub struct IterScanner {
    tokens: VecDeque<String>,
    origin: Option<Name>,
}

impl IterScanner {
    /// Creates a new scanner from tokens and an optional origin.
    pub fn new<I>(tokens: I, origin: Option<Name>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        IterScanner {
            tokens: tokens.into_iter().map(Into::into).collect(),
            origin,
        }
    }

    /// Returns whether all tokens have been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Scanner for IterScanner {
    fn continues(&self) -> bool {
        !self.tokens.is_empty()
    }

    fn scan_token(&mut self) -> Result<String, Error> {
        self.tokens
            .pop_front()
            .ok_or_else(|| Error::malformed("unexpected end of record data"))
    }

    fn scan_name(&mut self) -> Result<Name, Error> {
        let token = self.scan_token()?;
        qualify_token(&token, self.origin.as_ref())
    }

    fn scan_opt_unknown_marker(&mut self) -> bool {
        if self.tokens.front().map(String::as_str) == Some("\\#") {
            self.tokens.pop_front();
            true
        } else {
            false
        }
    }
}

/// Parses a name token and qualifies it with `origin`.
pub fn qualify_token(
    token: &str,
    origin: Option<&Name>,
) -> Result<Name, Error> {
    let name = Name::from_str(token).map_err(|err| {
        Error::invalid_data(format!("{} in name '{}'", err, token))
    })?;
    if name.is_absolute() {
        return Ok(name);
    }
    match origin {
        Some(origin) => name.qualify(origin).map_err(|err| {
            Error::invalid_data(format!("{} in name '{}'", err, token))
        }),
        None => Err(Error::unresolved_origin(token)),
    }
}

//------------ Symbol --------------------------------------------------------

/// The result of parsing a single symbol.
///
/// Zonefiles can only contain printable ASCII characters plus whatever
/// non-ASCII UTF-8 the file brings along. Everything else has to be
/// escaped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symbol {
    /// An unescaped Unicode character.
    Char(char),

    /// A character escaped via a preceding backslash.
    ///
    /// This escape sequence is only allowed for printable ASCII characters.
    SimpleEscape(u8),

    /// A raw octet escaped using the decimal escape sequence.
    ///
    /// This escape sequence consists of a backslash followed by exactly three
    /// decimal digits with the value of the octets.
    DecimalEscape(u8),
}

impl Symbol {
    /// Reads a symbol from a character source.
    ///
    /// Returns the next symbol in the source, `Ok(None)` if the source has
    /// been exhausted, or an error if there wasn’t a valid symbol.
    pub fn from_chars<C>(chars: C) -> Result<Option<Self>, SymbolCharsError>
    where
        C: IntoIterator<Item = char>,
    {
        use self::SymbolCharsError::*;

        let mut chars = chars.into_iter();
        let ch = match chars.next() {
            Some(ch) => ch,
            None => return Ok(None),
        };
        if ch != '\\' {
            return Ok(Some(Symbol::Char(ch)));
        }
        match chars.next() {
            Some(ch) if ch.is_ascii_digit() => {
                let ch = decimal(ch) * 100;
                let ch2 = match chars.next() {
                    Some(ch) if ch.is_ascii_digit() => decimal(ch) * 10,
                    Some(_) => return Err(BadEscape),
                    None => return Err(ShortInput),
                };
                let ch3 = match chars.next() {
                    Some(ch) if ch.is_ascii_digit() => decimal(ch),
                    Some(_) => return Err(BadEscape),
                    None => return Err(ShortInput),
                };
                let res = ch + ch2 + ch3;
                if res > 255 {
                    return Err(BadEscape);
                }
                Ok(Some(Symbol::DecimalEscape(res as u8)))
            }
            Some(ch) => {
                let ch = u8::try_from(ch).map_err(|_| BadEscape)?;
                if !(0x20..=0x7e).contains(&ch) {
                    Err(BadEscape)
                } else {
                    Ok(Some(Symbol::SimpleEscape(ch)))
                }
            }
            None => Err(ShortInput),
        }
    }

    /// Returns whether the symbol is an unescaped dot.
    pub fn is_label_separator(self) -> bool {
        self == Symbol::Char('.')
    }

    /// Appends the octets the symbol stands for to `target`.
    ///
    /// Non-ASCII characters are appended in their UTF-8 encoding.
    pub fn push_octets(self, target: &mut Vec<u8>) {
        match self {
            Symbol::Char(ch) => {
                let mut buf = [0u8; 4];
                target.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes())
            }
            Symbol::SimpleEscape(ch) | Symbol::DecimalEscape(ch) => {
                target.push(ch)
            }
        }
    }

    /// Returns the presentation symbol for an octet.
    ///
    /// Printable ASCII characters are kept unless they are in `special`,
    /// in which case they are escaped by a backslash. Everything else is
    /// turned into a decimal escape.
    pub fn from_octet(ch: u8, special: &[u8]) -> Self {
        if special.contains(&ch) {
            Symbol::SimpleEscape(ch)
        } else if (0x21..0x7F).contains(&ch) {
            Symbol::Char(ch.into())
        } else {
            Symbol::DecimalEscape(ch)
        }
    }
}

fn decimal(ch: char) -> u32 {
    ch.to_digit(10).unwrap_or(0)
}

//--- From

impl From<char> for Symbol {
    fn from(ch: char) -> Symbol {
        Symbol::Char(ch)
    }
}

//--- Display

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Symbol::Char(ch) => write!(f, "{}", ch),
            Symbol::SimpleEscape(ch) => write!(f, "\\{}", ch as char),
            Symbol::DecimalEscape(ch) => write!(f, "\\{:03}", ch),
        }
    }
}

//------------ Symbols -------------------------------------------------------

/// An iterator over the symbols in a char sequence.
#[derive(Clone, Debug)]
pub struct Symbols<Chars> {
    /// The chars of the sequence.
    ///
    /// This is an option so we can fuse the iterator on error.
    chars: Option<Chars>,
}

impl<Chars> Symbols<Chars> {
    /// Creates a new symbols iterator atop a char iterator.
    pub fn new(chars: Chars) -> Self {
        Symbols { chars: Some(chars) }
    }
}

impl<Chars: Iterator<Item = char>> Iterator for Symbols<Chars> {
    type Item = Result<Symbol, SymbolCharsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let chars = self.chars.as_mut()?;
        match Symbol::from_chars(chars) {
            Ok(Some(symbol)) => Some(Ok(symbol)),
            Ok(None) => {
                self.chars = None;
                None
            }
            Err(err) => {
                self.chars = None;
                Some(Err(err))
            }
        }
    }
}

/// Decodes presentation text into the octets it stands for.
pub fn decode_octets(s: &str) -> Result<Vec<u8>, SymbolCharsError> {
    let mut res = Vec::with_capacity(s.len());
    for sym in Symbols::new(s.chars()) {
        sym?.push_octets(&mut res);
    }
    Ok(res)
}

//------------ SymbolCharsError ----------------------------------------------

/// An error happened when reading a symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SymbolCharsError {
    /// An illegal escape sequence was encountered.
    BadEscape,

    /// Unexpected end of input.
    ///
    /// This can only happen in an escape sequence.
    ShortInput,
}

//--- Display and Error

impl fmt::Display for SymbolCharsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SymbolCharsError::BadEscape => {
                f.write_str("illegal escape sequence")
            }
            SymbolCharsError::ShortInput => {
                f.write_str("unexpected end of input")
            }
        }
    }
}

impl std::error::Error for SymbolCharsError {}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn symbol_from_chars() {
        fn sym(s: &str) -> Result<Option<Symbol>, SymbolCharsError> {
            Symbol::from_chars(s.chars())
        }

        assert_eq!(sym(""), Ok(None));
        assert_eq!(sym("a"), Ok(Some(Symbol::Char('a'))));
        assert_eq!(sym("\\."), Ok(Some(Symbol::SimpleEscape(b'.'))));
        assert_eq!(sym("\\065"), Ok(Some(Symbol::DecimalEscape(65))));
        assert_eq!(sym("\\256"), Err(SymbolCharsError::BadEscape));
        assert_eq!(sym("\\06"), Err(SymbolCharsError::ShortInput));
        assert_eq!(sym("\\"), Err(SymbolCharsError::ShortInput));
    }

    #[test]
    fn decode() {
        assert_eq!(decode_octets("a\\;b\\009").unwrap(), b"a;b\t");
        assert_eq!(decode_octets("ü").unwrap(), "ü".as_bytes());
        assert!(decode_octets("bad\\").is_err());
    }

    #[test]
    fn iter_scanner() {
        let origin = Name::from_str("example.com.").unwrap();
        let mut scanner =
            IterScanner::new(["\\#", "www", "@", "10"], Some(origin));
        assert!(scanner.scan_opt_unknown_marker());
        assert!(!scanner.scan_opt_unknown_marker());
        assert_eq!(
            scanner.scan_name().unwrap().to_string(),
            "www.example.com."
        );
        assert_eq!(scanner.scan_name().unwrap().to_string(), "example.com.");
        assert_eq!(u16::scan(&mut scanner).unwrap(), 10);
        assert!(scanner.is_exhausted());
        assert!(u16::scan(&mut scanner).is_err());

        let mut scanner = IterScanner::new(["www"], None);
        assert_eq!(
            scanner.scan_name(),
            Err(Error::unresolved_origin("www"))
        );
    }

    #[test]
    fn from_octet() {
        assert_eq!(Symbol::from_octet(b'a', b"\""), Symbol::Char('a'));
        assert_eq!(
            Symbol::from_octet(b'"', b"\""),
            Symbol::SimpleEscape(b'"')
        );
        assert_eq!(Symbol::from_octet(b' ', b""), Symbol::DecimalEscape(32));
        assert_eq!(Symbol::from_octet(0xff, b"").to_string(), "\\255");
    }
}
