//! Record data for the TXT record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::charstr::CharStr;
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, RecordData};
use crate::base::scan::Scanner;
use crate::base::wire::{Compose, Parse, ParseError, Parser};
use crate::base::zonefile_fmt::{self, Formatter, ZonefileFmt};
use crate::error::Error;
use core::fmt;
use std::vec::Vec;

//------------ Txt ----------------------------------------------------------

/// TXT record data.
///
/// TXT records hold descriptive text. While it may appear as a single text,
/// it internally consists of a sequence of one or more
/// [character strings][CharStr]. A TXT record without any character string
/// is invalid.
///
/// The TXT record type is defined in [RFC 1035, section 3.3.14].
///
/// # Presentation format
///
/// TXT record data appears in zone files as the white-space delimited
/// sequence of its constituent [character strings][CharStr]. This means
/// that if these strings are not quoted, each “word” results in a
/// character string of its own. Thus, the quoted form is always used when
/// writing.
///
/// [RFC 1035, section 3.3.14]: https://tools.ietf.org/html/rfc1035#section-3.3.14
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct Txt {
    #[serde(rename = "data")]
    strings: Vec<CharStr>,
}

impl Txt {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::TXT;

    /// Creates new TXT record data from a sequence of character strings.
    ///
    /// Fails if the sequence is empty.
    pub fn from_strings(strings: Vec<CharStr>) -> Result<Self, Error> {
        if strings.is_empty() {
            return Err(Error::invalid_data(
                "TXT record without character strings",
            ));
        }
        Ok(Txt { strings })
    }

    /// Returns the character strings.
    pub fn strings(&self) -> &[CharStr] {
        &self.strings
    }

    /// Returns the concatenated content of all character strings.
    pub fn text(&self) -> Vec<u8> {
        self.strings
            .iter()
            .flat_map(|s| s.as_slice().iter().copied())
            .collect()
    }

    /// Scans TXT data from all the remaining tokens of an entry.
    pub fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error> {
        let mut strings = Vec::new();
        while scanner.continues() {
            strings.push(scanner.scan_charstr()?);
        }
        Self::from_strings(strings)
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let mut strings = Vec::new();
        while parser.remaining() > 0 {
            strings.push(CharStr::parse(parser)?);
        }
        if strings.is_empty() {
            return Err(ParseError::form_error("empty TXT record"));
        }
        Ok(Txt { strings })
    }
}

//--- RecordData, ComposeRecordData

impl RecordData for Txt {
    fn rtype(&self) -> Rtype {
        Txt::RTYPE
    }
}

impl ComposeRecordData for Txt {
    fn compose_rdata(&self, target: &mut Vec<u8>) {
        for s in &self.strings {
            s.compose(target)
        }
    }
}

//--- Display

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for s in &self.strings {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}", s.display_quoted())?;
        }
        Ok(())
    }
}

//--- ZonefileFmt

impl ZonefileFmt for Txt {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        for s in &self.strings {
            p.write_token(s.display_quoted())?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_scan};
    use crate::base::scan::IterScanner;
    use crate::error::ErrorKind;
    use core::str::FromStr;

    fn txt(strings: &[&str]) -> Txt {
        Txt::from_strings(
            strings.iter().map(|s| CharStr::from_str(s).unwrap()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn txt_compose_parse_scan() {
        let rdata = txt(&["v=spf1 -all", "more"]);
        test_compose_parse(&rdata, Txt::parse);
        test_scan(&["v=spf1 -all", "more"], Txt::scan, &rdata);
        assert_eq!(rdata.text(), b"v=spf1 -allmore");
        assert_eq!(rdata.to_string(), "\"v=spf1 -all\" \"more\"");
    }

    #[test]
    fn txt_empty() {
        let err = Txt::scan(&mut IterScanner::new(Vec::<String>::new(), None))
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidRecordData(_)));
        assert!(Txt::from_strings(Vec::new()).is_err());
        assert!(Txt::parse(&mut Parser::new(b"")).is_err());
    }

    #[test]
    fn txt_empty_string_is_fine() {
        let rdata = txt(&[""]);
        test_compose_parse(&rdata, Txt::parse);
        assert_eq!(rdata.to_string(), "\"\"");
    }

    #[test]
    fn txt_serialize() {
        assert_eq!(
            serde_json::to_string(&txt(&["a", "b c"])).unwrap(),
            r#"{"data":["a","b c"]}"#
        );
    }
}
