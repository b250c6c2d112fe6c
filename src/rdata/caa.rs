//! CAA record data.
//!
//! The CAA record type is defined in [RFC 8659].
//!
//! [RFC 8659]: https://tools.ietf.org/html/rfc8659

use crate::base::charstr::{CharStr, DisplayQuoted};
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, RecordData};
use crate::base::scan::{decode_octets, Scan, Scanner};
use crate::base::wire::{Compose, Parse, ParseError, Parser};
use crate::base::zonefile_fmt::{self, Formatter, ZonefileFmt};
use crate::error::Error;
use core::fmt;
use std::vec::Vec;

//------------ Caa ---------------------------------------------------------

/// Caa record data.
///
/// A Caa record lists the certification authorities allowed to issue
/// certificates for a domain. The tag is a sequence of ASCII letters and
/// digits, the value is arbitrary data extending to the end of the record.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Caa {
    flags: u8,
    tag: CharStr,
    value: Vec<u8>,
}

impl Caa {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::CAA;

    /// Creates new CAA record data.
    ///
    /// Fails if the tag is empty or contains anything but ASCII letters
    /// and digits.
    pub fn new(
        flags: u8,
        tag: CharStr,
        value: Vec<u8>,
    ) -> Result<Self, Error> {
        if tag.is_empty()
            || !tag.as_slice().iter().all(|ch| ch.is_ascii_alphanumeric())
        {
            return Err(Error::invalid_data(format!("bad CAA tag {}", tag)));
        }
        Ok(Caa { flags, tag, value })
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn tag(&self) -> &CharStr {
        &self.tag
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let flags = u8::parse(parser)?;
        let tag = CharStr::parse(parser)?;
        let value = parser.parse_remaining().into();
        Self::new(flags, tag, value)
            .map_err(|_| ParseError::form_error("bad CAA tag"))
    }

    pub fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error> {
        let flags = u8::scan(scanner)?;
        let tag = scanner.scan_charstr()?;
        let token = scanner.scan_token()?;
        let value = decode_octets(&token).map_err(|err| {
            Error::invalid_data(format!("{} in CAA value", err))
        })?;
        Self::new(flags, tag, value)
    }
}

//--- RecordData, ComposeRecordData

impl RecordData for Caa {
    fn rtype(&self) -> Rtype {
        Caa::RTYPE
    }
}

impl ComposeRecordData for Caa {
    fn compose_rdata(&self, target: &mut Vec<u8>) {
        self.flags.compose(target);
        self.tag.compose(target);
        target.extend_from_slice(&self.value);
    }
}

//--- Display and ZonefileFmt

impl fmt::Display for Caa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.flags,
            self.tag,
            DisplayQuoted::new(&self.value)
        )
    }
}

impl ZonefileFmt for Caa {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token(self.flags)?;
        p.write_token(&self.tag)?;
        p.write_token(DisplayQuoted::new(&self.value))
    }
}

//--- Serialize

impl serde::Serialize for Caa {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Caa", 3)?;
        state.serialize_field("flags", &self.flags)?;
        state.serialize_field("tag", &self.tag)?;
        state.serialize_field(
            "value",
            &String::from_utf8_lossy(&self.value),
        )?;
        state.end()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_scan};
    use core::str::FromStr;

    #[test]
    fn caa_compose_parse_scan() {
        let rdata = Caa::new(
            0,
            CharStr::from_str("issue").unwrap(),
            b"ca.example.net".to_vec(),
        )
        .unwrap();
        test_compose_parse(&rdata, Caa::parse);
        test_scan(&["0", "issue", "ca.example.net"], Caa::scan, &rdata);
        assert_eq!(rdata.to_string(), "0 issue \"ca.example.net\"");
    }

    #[test]
    fn caa_bad_tag() {
        assert!(Caa::new(0, CharStr::from_str("is-sue").unwrap(), Vec::new())
            .is_err());
        assert!(Caa::new(0, CharStr::default(), Vec::new()).is_err());
    }

    #[test]
    fn caa_serialize() {
        let rdata = Caa::new(
            128,
            CharStr::from_str("iodef").unwrap(),
            b"mailto:sec@example.com".to_vec(),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_string(&rdata).unwrap(),
            r#"{"flags":128,"tag":"iodef","value":"mailto:sec@example.com"}"#
        );
    }
}
