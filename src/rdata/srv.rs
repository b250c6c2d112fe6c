//! Record data from [RFC 2782]: SRV records.
//!
//! This RFC defines the Srv record type.
//!
//! [RFC 2782]: https://tools.ietf.org/html/rfc2782

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, RecordData};
use crate::base::scan::{Scan, Scanner};
use crate::base::wire::{Compose, Parse, ParseError, Parser};
use crate::base::zonefile_fmt::{self, Formatter, ZonefileFmt};
use crate::error::Error;
use core::fmt;

//------------ Srv ---------------------------------------------------------

/// Srv record data.
///
/// The Srv record specifies the location of the server(s) for a specific
/// protocol and domain.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct Srv {
    priority: u16,
    weight: u16,
    port: u16,
    target: Name,
}

impl Srv {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::SRV;

    pub fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
        Srv {
            priority,
            weight,
            port,
            target,
        }
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn weight(&self) -> u16 {
        self.weight
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn target(&self) -> &Name {
        &self.target
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        Ok(Self::new(
            u16::parse(parser)?,
            u16::parse(parser)?,
            u16::parse(parser)?,
            Name::parse(parser)?,
        ))
    }

    pub fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error> {
        Ok(Self::new(
            u16::scan(scanner)?,
            u16::scan(scanner)?,
            u16::scan(scanner)?,
            scanner.scan_name()?,
        ))
    }
}

//--- RecordData, ComposeRecordData

impl RecordData for Srv {
    fn rtype(&self) -> Rtype {
        Srv::RTYPE
    }
}

impl ComposeRecordData for Srv {
    fn compose_rdata(&self, target: &mut Vec<u8>) {
        self.priority.compose(target);
        self.weight.compose(target);
        self.port.compose(target);
        self.target.compose(target);
    }
}

//--- Display and ZonefileFmt

impl fmt::Display for Srv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.priority, self.weight, self.port, self.target
        )
    }
}

impl ZonefileFmt for Srv {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token(self.priority)?;
        p.write_token(self.weight)?;
        p.write_token(self.port)?;
        p.write_name(&self.target)
    }
}

//============ Testing =======================================================
