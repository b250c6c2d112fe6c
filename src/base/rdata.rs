//! Resource record data.
//!
//! Each resource record type has it’s own definition of the content and
//! formatting of its data. This module provides the basics for implementing
//! specific types for this record data. The concrete implementations for
//! the record types this crate knows live in the top-level [crate::rdata]
//! module.
//!
//! There are three traits herein: Any type that represents record data
//! implements [`RecordData`]. If it can be written in wire format, it
//! implements [`ComposeRecordData`] and if it can be read from wire format,
//! [`ParseRecordData`].
//!
//! The module also provides a type, [`UnknownRecordData`], that can be used
//! to deal with record types this crate doesn’t know.

use super::iana::Rtype;
use super::scan::{Scan, Scanner};
use super::wire::{ParseError, Parser};
use super::zonefile_fmt::{self, Formatter, ZonefileFmt};
use crate::error::Error;
use crate::utils::base16;
use core::fmt;
use std::vec::Vec;

//----------- RecordData -----------------------------------------------------

/// A type that represents record data.
///
/// The type needs to be able to to be able to provide the record type of a
/// record with a value’s data via the [`rtype`][Self::rtype] method.
pub trait RecordData {
    /// Returns the record type associated with this record data instance.
    ///
    /// This is a method rather than an associated function to allow one
    /// type to be used for several real record types.
    fn rtype(&self) -> Rtype;
}

impl<T: RecordData> RecordData for &T {
    fn rtype(&self) -> Rtype {
        (*self).rtype()
    }
}

//----------- ComposeRecordData ----------------------------------------------

/// A type of record data that can be composed.
pub trait ComposeRecordData: RecordData {
    /// Appends the wire format of the record data into a target.
    ///
    /// Names are never compressed.
    fn compose_rdata(&self, target: &mut Vec<u8>);

    /// Returns the wire format of the record data as a new vec.
    fn to_rdata_vec(&self) -> Vec<u8> {
        let mut res = Vec::new();
        self.compose_rdata(&mut res);
        res
    }
}

//------------ ParseRecordData -----------------------------------------------

/// A record data type that can be parsed from its wire format.
pub trait ParseRecordData: RecordData + Sized {
    /// Parses the record data.
    ///
    /// The record data is for a record of type `rtype`. The parser covers
    /// exactly the record data.
    ///
    /// If this type cannot parse record data for this record type, the
    /// method should return `Ok(None)`.
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ UnknownRecordData ---------------------------------------------

/// A type for parsing any type of record data.
///
/// This type accepts any record type and stores the plain, unparsed record
/// data as an octets sequence. In presentation format, it uses the generic
/// `\#` notation defined in [RFC 3597].
///
/// [RFC 3597]: https://tools.ietf.org/html/rfc3597
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct UnknownRecordData {
    /// The record type of this data.
    rtype: Rtype,

    /// The record data.
    data: Vec<u8>,
}

impl UnknownRecordData {
    /// Creates generic record data from an octets sequence.
    pub fn from_octets(
        rtype: Rtype,
        data: Vec<u8>,
    ) -> Result<Self, LongRecordData> {
        if data.len() > usize::from(u16::MAX) {
            Err(LongRecordData())
        } else {
            Ok(UnknownRecordData { rtype, data })
        }
    }

    /// Returns the record type this data is for.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns a reference to the record data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Scans the record data assuming that the `\#` marker has been
    /// skipped.
    pub fn scan_without_marker<S: Scanner>(
        rtype: Rtype,
        scanner: &mut S,
    ) -> Result<Self, Error> {
        // First token is the rdata length.
        let len = u16::scan(scanner)?;

        // The rest is the actual data, spread over any number of tokens.
        let mut decoder = base16::Decoder::new();
        while scanner.continues() {
            for ch in scanner.scan_token()?.chars() {
                decoder.push(ch).map_err(|err| {
                    Error::invalid_data(format!("generic data: {}", err))
                })?;
            }
        }
        let data = decoder.finalize().map_err(|err| {
            Error::invalid_data(format!("generic data: {}", err))
        })?;

        if data.len() != usize::from(len) {
            return Err(Error::invalid_data(
                "generic data has incorrect length",
            ));
        }

        Ok(UnknownRecordData { rtype, data })
    }
}

//--- RecordData, ComposeRecordData, and ParseRecordData

impl RecordData for UnknownRecordData {
    fn rtype(&self) -> Rtype {
        self.rtype
    }
}

impl ComposeRecordData for UnknownRecordData {
    fn compose_rdata(&self, target: &mut Vec<u8>) {
        target.extend_from_slice(&self.data)
    }
}

impl ParseRecordData for UnknownRecordData {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser,
    ) -> Result<Option<Self>, ParseError> {
        UnknownRecordData::from_octets(rtype, parser.parse_remaining().into())
            .map(Some)
            .map_err(|_| ParseError::form_error("long record data"))
    }
}

//--- Display, Debug, and ZonefileFmt

impl fmt::Display for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        if !self.data.is_empty() {
            write!(f, " {}", base16::encode_display(&self.data))?;
        }
        Ok(())
    }
}

impl fmt::Debug for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("UnknownRecordData(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

impl ZonefileFmt for UnknownRecordData {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token(self)
    }
}

//--- Serialize

impl serde::Serialize for UnknownRecordData {
    /// Serializes the data in its generic presentation format.
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("UnknownRecordData", 1)?;
        state.serialize_field("rdata", &format_args!("{}", self))?;
        state.end()
    }
}

//------------ LongRecordData ------------------------------------------------

/// The octets sequence to be used for record data is too long.
#[derive(Clone, Copy, Debug)]
pub struct LongRecordData();

impl fmt::Display for LongRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("record data too long")
    }
}

impl std::error::Error for LongRecordData {}

//============ Testing ======================================================
