//! Record data for the HINFO record.
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

//------------ Hinfo --------------------------------------------------------

/// Hinfo record data.
///
/// Hinfo records are used to acquire general information about a host,
/// specifically the CPU type and operating system type.
///
/// The Hinfo type is defined in [RFC 1035, section 3.3.2][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.2
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct Hinfo {
    cpu: CharStr,
    os: CharStr,
}

impl Hinfo {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::HINFO;

    /// Creates a new Hinfo record data from the components.
    pub fn new(cpu: CharStr, os: CharStr) -> Self {
        Hinfo { cpu, os }
    }

    /// The CPU type of the host.
    pub fn cpu(&self) -> &CharStr {
        &self.cpu
    }

    /// The operating system type of the host.
    pub fn os(&self) -> &CharStr {
        &self.os
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        Ok(Self::new(CharStr::parse(parser)?, CharStr::parse(parser)?))
    }

    pub fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, Error> {
        Ok(Self::new(scanner.scan_charstr()?, scanner.scan_charstr()?))
    }
}

//--- RecordData, ComposeRecordData

impl RecordData for Hinfo {
    fn rtype(&self) -> Rtype {
        Hinfo::RTYPE
    }
}

impl ComposeRecordData for Hinfo {
    fn compose_rdata(&self, target: &mut Vec<u8>) {
        self.cpu.compose(target);
        self.os.compose(target);
    }
}

//--- Display

impl fmt::Display for Hinfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.cpu.display_quoted(),
            self.os.display_quoted()
        )
    }
}

//--- ZonefileFmt

impl ZonefileFmt for Hinfo {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token(self.cpu.display_quoted())?;
        p.write_token(self.os.display_quoted())
    }
}

//============ Testing =======================================================
