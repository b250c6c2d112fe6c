//! Record data for the AAAA record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, RecordData};
use crate::base::scan::{Scan, Scanner};
use crate::base::wire::{Compose, Parse, ParseError, Parser};
use crate::base::zonefile_fmt::{self, Formatter, ZonefileFmt};
use crate::error::Error;
use core::fmt;
use core::str::FromStr;
use std::net::Ipv6Addr;

//------------ Aaaa ---------------------------------------------------------

/// Aaaa record data.
///
/// Aaaa records convey the IPv6 address of a host. The wire format is the
/// 128 bit IPv6 address in network byte order. The presentation format is
/// any of the textual forms of [RFC 4291, section 2.2].
///
/// The Aaaa record type is defined in [RFC 3596, section 2.2][1].
///
/// [1]: https://tools.ietf.org/html/rfc3596#section-2.2
/// [RFC 4291, section 2.2]: https://tools.ietf.org/html/rfc4291#section-2.2
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(serde::Serialize)]
pub struct Aaaa {
    #[serde(rename = "address")]
    addr: Ipv6Addr,
}

impl Aaaa {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::AAAA;

    #[must_use]
    pub fn new(addr: Ipv6Addr) -> Aaaa {
        Aaaa { addr }
    }

    #[must_use]
    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        Ipv6Addr::parse(parser).map(Self::new)
    }

    pub fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error> {
        Ipv6Addr::scan(scanner).map(Self::new)
    }
}

//--- From and FromStr

impl From<Ipv6Addr> for Aaaa {
    fn from(addr: Ipv6Addr) -> Self {
        Self::new(addr)
    }
}

impl From<Aaaa> for Ipv6Addr {
    fn from(data: Aaaa) -> Self {
        data.addr
    }
}

impl FromStr for Aaaa {
    type Err = <Ipv6Addr as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv6Addr::from_str(s).map(Aaaa::new)
    }
}

//--- RecordData, ComposeRecordData

impl RecordData for Aaaa {
    fn rtype(&self) -> Rtype {
        Aaaa::RTYPE
    }
}

impl ComposeRecordData for Aaaa {
    fn compose_rdata(&self, target: &mut Vec<u8>) {
        self.addr.compose(target)
    }
}

//--- Display and ZonefileFmt

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.addr, f)
    }
}

impl ZonefileFmt for Aaaa {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token(self.addr)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_scan};

    #[test]
    fn aaaa_compose_parse_scan() {
        let addr = Ipv6Addr::from_str("2001:db8::1").unwrap();
        let rdata = Aaaa::new(addr);
        test_compose_parse(&rdata, Aaaa::parse);
        test_scan(&["2001:db8::1"], Aaaa::scan, &rdata);
        test_scan(&["2001:0db8:0:0:0:0:0:1"], Aaaa::scan, &rdata);
        assert_eq!(rdata.to_string(), "2001:db8::1");
    }
}
