//! Record data for the MX record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, RecordData};
use crate::base::scan::{Scan, Scanner};
use crate::base::wire::{Compose, Parse, ParseError, Parser};
use crate::base::zonefile_fmt::{self, Formatter, ZonefileFmt};
use crate::error::Error;
use core::fmt;

//------------ Mx -----------------------------------------------------------

/// Mx record data.
///
/// The Mx record specifies a host willing to serve as a mail exchange for
/// the owner name.
///
/// The Mx record type is defined in [RFC 1035, section 3.3.9][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.9
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct Mx {
    preference: u16,
    exchange: Name,
}

impl Mx {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::MX;

    /// Creates a new Mx record data from the components.
    pub fn new(preference: u16, exchange: Name) -> Self {
        Mx {
            preference,
            exchange,
        }
    }

    /// The preference for this record.
    ///
    /// Defines an order if there are several Mx records for the same owner.
    /// Lower values are preferred.
    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// The name of the host that is the exchange.
    pub fn exchange(&self) -> &Name {
        &self.exchange
    }

    pub fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error> {
        Ok(Self::new(u16::scan(scanner)?, scanner.scan_name()?))
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        Ok(Self::new(u16::parse(parser)?, Name::parse(parser)?))
    }
}

//--- RecordData, ComposeRecordData

impl RecordData for Mx {
    fn rtype(&self) -> Rtype {
        Mx::RTYPE
    }
}

impl ComposeRecordData for Mx {
    fn compose_rdata(&self, target: &mut Vec<u8>) {
        self.preference.compose(target);
        self.exchange.compose(target)
    }
}

//--- Display

impl fmt::Display for Mx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

//--- ZonefileFmt

impl ZonefileFmt for Mx {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token(self.preference)?;
        p.write_name(&self.exchange)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_scan};
    use core::str::FromStr;

    #[test]
    fn mx_compose_parse_scan() {
        let rdata = Mx::new(12, Name::from_str("mail.example.com.").unwrap());
        test_compose_parse(&rdata, Mx::parse);
        test_scan(&["12", "mail"], Mx::scan, &rdata);
        assert_eq!(rdata.to_string(), "12 mail.example.com.");
    }

    #[test]
    fn mx_serialize() {
        let rdata = Mx::new(10, Name::from_str("mx.example.com.").unwrap());
        assert_eq!(
            serde_json::to_string(&rdata).unwrap(),
            r#"{"preference":10,"exchange":"mx.example.com."}"#
        );
    }
}
