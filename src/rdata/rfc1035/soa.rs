//! Record data for the SOA record.
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

//------------ Soa ----------------------------------------------------------

/// Soa record data.
///
/// Soa records mark the top of a zone and contain information pertinent to
/// name server maintenance operations.
///
/// The Soa record type is defined in [RFC 1035, section 3.3.13][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.13
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct Soa {
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

impl Soa {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::SOA;

    /// Creates new Soa record data from content.
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// The primary name server for the zone.
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// The mailbox for the person responsible for this zone.
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// The serial number of the original copy of the zone.
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// The time interval in seconds before the zone should be refreshed.
    pub fn refresh(&self) -> u32 {
        self.refresh
    }

    /// The time in seconds before a failed refresh is retried.
    pub fn retry(&self) -> u32 {
        self.retry
    }

    /// The upper limit of time in seconds the zone is authoritative.
    pub fn expire(&self) -> u32 {
        self.expire
    }

    /// The minimum TTL to be exported with any RR from this zone.
    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        Ok(Self::new(
            Name::parse(parser)?,
            Name::parse(parser)?,
            u32::parse(parser)?,
            u32::parse(parser)?,
            u32::parse(parser)?,
            u32::parse(parser)?,
            u32::parse(parser)?,
        ))
    }

    pub fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error> {
        Ok(Self::new(
            scanner.scan_name()?,
            scanner.scan_name()?,
            u32::scan(scanner)?,
            u32::scan(scanner)?,
            u32::scan(scanner)?,
            u32::scan(scanner)?,
            u32::scan(scanner)?,
        ))
    }
}

//--- RecordData, ComposeRecordData

impl RecordData for Soa {
    fn rtype(&self) -> Rtype {
        Soa::RTYPE
    }
}

impl ComposeRecordData for Soa {
    fn compose_rdata(&self, target: &mut Vec<u8>) {
        self.mname.compose(target);
        self.rname.compose(target);
        self.serial.compose(target);
        self.refresh.compose(target);
        self.retry.compose(target);
        self.expire.compose(target);
        self.minimum.compose(target);
    }
}

//--- Display

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname,
            self.rname,
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.minimum
        )
    }
}

//--- ZonefileFmt

impl ZonefileFmt for Soa {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_name(&self.mname)?;
        p.write_name(&self.rname)?;
        p.write_token(self.serial)?;
        p.write_token(self.refresh)?;
        p.write_token(self.retry)?;
        p.write_token(self.expire)?;
        p.write_token(self.minimum)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_scan};
    use core::str::FromStr;

    #[test]
    fn soa_compose_parse_scan() {
        let rdata = Soa::new(
            Name::from_str("m.example.com.").unwrap(),
            Name::from_str("r.example.com.").unwrap(),
            11,
            12,
            13,
            14,
            15,
        );
        test_compose_parse(&rdata, Soa::parse);
        test_scan(
            &["m", "r.example.com.", "11", "12", "13", "14", "15"],
            Soa::scan,
            &rdata,
        );
    }

    #[test]
    fn soa_short_scan() {
        use crate::base::scan::IterScanner;

        let mut scanner =
            IterScanner::new(["m.", "r.", "1", "2", "3", "4"], None);
        assert!(Soa::scan(&mut scanner).is_err());
    }
}
