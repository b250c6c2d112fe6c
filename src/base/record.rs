//! Resource Records.
//!
//! This module defines types related to DNS resource records. The most
//! complete one is [`Record`] which contains a complete record for a certain
//! record type plus the annotations zone data brings along: a comment from
//! a zonefile, the timestamp and location of a tinydns line, and where the
//! record came from in terms of tinydns shortcuts.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::rdata::RecordData;
use super::zonefile_fmt::{self, Formatter, ZonefileFmt};
use crate::error::Error;
use crate::rdata::ZoneRecordData;
use core::str::FromStr;
use std::fmt;
use std::net::Ipv4Addr;
use std::string::String;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name (the _owner_), a record type,
/// and a class. Data is arranged in a tree which is navigated using the
/// domain name. Each node in the tree carries a label which, when combined
/// with all the labels of nodes from this node to the tree’s root, forms
/// the domain name of the node. Finally, records also have a time-to-live
/// (TTL) value. Records taken from zone data may lack one if it was left
/// out and there wasn’t anything to inherit it from.
///
/// Two records are equal if their owner, class, TTL, and data are equal.
/// The annotations are ignored.
///
/// The `Display` implementation writes the record as a single line of a
/// zonefile with all names absolute and without the comment.
#[derive(Clone, Debug)]
pub struct Record {
    owner: Name,
    class: Class,
    ttl: Option<Ttl>,
    data: ZoneRecordData,
    comment: Option<String>,
    timestamp: Option<String>,
    location: Option<String>,
    provenance: Provenance,
}

impl Record {
    /// Creates a new record from its parts.
    ///
    /// Fails with an invalid record data error if `data` is not record
    /// data for `rtype`.
    pub fn new(
        owner: Name,
        class: Class,
        ttl: Option<Ttl>,
        rtype: Rtype,
        data: ZoneRecordData,
    ) -> Result<Self, Error> {
        if data.rtype() != rtype {
            return Err(Error::invalid_data(format!(
                "{} data given for {} record",
                data.rtype(),
                rtype
            )));
        }
        Ok(Self::from_data(owner, class, ttl, data))
    }

    /// Creates a new record with the record type taken from the data.
    pub fn from_data(
        owner: Name,
        class: Class,
        ttl: Option<Ttl>,
        data: ZoneRecordData,
    ) -> Self {
        Record {
            owner,
            class,
            ttl,
            data,
            comment: None,
            timestamp: None,
            location: None,
            provenance: Provenance::Plain,
        }
    }

    /// Returns a reference to the owner domain name.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the owner relative to `origin` if it is at or below it.
    pub fn relative_owner(&self, origin: &Name) -> Option<Name> {
        self.owner.relative_to(origin)
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype {
        self.data.rtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the record’s time-to-live if known.
    pub fn ttl(&self) -> Option<Ttl> {
        self.ttl
    }

    /// Sets the record’s time-to-live.
    pub fn set_ttl(&mut self, ttl: Option<Ttl>) {
        self.ttl = ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &ZoneRecordData {
        &self.data
    }

    /// Trades the record for its record data.
    pub fn into_data(self) -> ZoneRecordData {
        self.data
    }

    /// Returns the comment attached to the record.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the tinydns timestamp of the record.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Returns the tinydns location of the record.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns where the record came from.
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Sets where the record came from.
    pub fn set_provenance(&mut self, provenance: Provenance) {
        self.provenance = provenance
    }

    /// Attaches a comment to the record.
    #[must_use]
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Attaches the tinydns timestamp and location to the record.
    ///
    /// Empty values are treated as absent.
    #[must_use]
    pub fn with_annotations(
        mut self,
        timestamp: Option<String>,
        location: Option<String>,
    ) -> Self {
        self.timestamp = timestamp.filter(|s| !s.is_empty());
        self.location = location.filter(|s| !s.is_empty());
        self
    }

    /// Marks the record as a tinydns shortcut awaiting expansion.
    #[must_use]
    pub fn with_shortcut(mut self, shortcut: Shortcut) -> Self {
        self.provenance = Provenance::Shortcut(shortcut);
        self
    }

    /// Creates a record implied by this record.
    ///
    /// The new record shares class, TTL and annotations with this record
    /// and is marked as derived from `shortcut`.
    pub fn derive(
        &self,
        owner: Name,
        ttl: Option<Ttl>,
        data: ZoneRecordData,
        shortcut: Shortcut,
    ) -> Record {
        Record {
            owner,
            class: self.class,
            ttl,
            data,
            comment: None,
            timestamp: self.timestamp.clone(),
            location: self.location.clone(),
            provenance: Provenance::Derived(shortcut),
        }
    }
}

//--- PartialEq and Eq

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner
            && self.class == other.class
            && self.ttl == other.ttl
            && self.data == other.data
    }
}

impl Eq for Record {}

//--- Display and ZonefileFmt

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_zonefile())
    }
}

impl ZonefileFmt for Record {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_name(&self.owner)?;
        if let Some(ttl) = self.ttl {
            p.write_token(ttl.as_secs())?;
        }
        p.write_token(self.class)?;
        p.write_token(self.rtype())?;
        p.write_show(&self.data)
    }
}

//------------ Provenance ----------------------------------------------------

/// Where a record came from.
///
/// Records read from tinydns data may stand for more than one record. Such
/// shortcut records are replaced by a set of standard records during
/// expansion. The provenance keeps track of this so that expansion can be
/// repeated without effect and tinydns output can collapse the set again.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Provenance {
    /// An ordinary record.
    Plain,

    /// A shortcut that hasn’t been expanded yet.
    Shortcut(Shortcut),

    /// The primary record of an expanded shortcut.
    Expanded(Shortcut),

    /// A record implied by an expanded shortcut.
    Derived(Shortcut),
}

impl Provenance {
    /// Returns the shortcut the record belongs to, if any.
    pub fn shortcut(self) -> Option<Shortcut> {
        match self {
            Provenance::Plain => None,
            Provenance::Shortcut(shortcut)
            | Provenance::Expanded(shortcut)
            | Provenance::Derived(shortcut) => Some(shortcut),
        }
    }

    /// Returns whether the record was implied by a shortcut.
    pub fn is_derived(self) -> bool {
        matches!(self, Provenance::Derived(_))
    }
}

//------------ Shortcut ------------------------------------------------------

/// The kinds of tinydns shortcuts.
///
/// Each kind names the records implied by its primary record. Addresses
/// given inline are kept here since the primary record has no room for
/// them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Shortcut {
    /// A host address plus its reverse pointer (`=` and `6`).
    Host,

    /// A name server plus its address (`&`).
    NameServer { address: Option<Ipv4Addr> },

    /// A mail exchanger plus its address (`@`).
    MailExchanger { address: Option<Ipv4Addr> },

    /// A service plus the target’s address (`S`).
    Service { address: Option<Ipv4Addr> },

    /// An SOA plus a name server and its address (`.`).
    ///
    /// The name server records use their own TTL.
    ZoneAuthority {
        address: Option<Ipv4Addr>,
        ns_ttl: Option<Ttl>,
    },

    /// An SOA plus the name server given as its primary master (`Z`).
    Authority,
}

//------------ Ttl -----------------------------------------------------------

/// A span of time, typically used to describe the time a given DNS record
/// is valid.
///
/// TTL values have second-level precision. In zone data they are written
/// as a plain decimal number of seconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Ttl(u32);

impl Ttl {
    /// A time-to-live of one day.
    pub const DAY: Ttl = Ttl::from_secs(86400);

    /// Creates a new `Ttl` from the specified number of seconds.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Returns the total time to live in seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u32 {
        self.0
    }
}

//--- FromStr and Display

impl FromStr for Ttl {
    type Err = Error;

    /// Parses a TTL.
    ///
    /// Only plain decimal digits are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|ch| ch.is_ascii_digit()) {
            return Err(Error::malformed(format!("bad TTL '{}'", s)));
        }
        s.parse()
            .map(Ttl)
            .map_err(|_| Error::malformed(format!("TTL '{}' too large", s)))
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

//============ Testing ======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::rdata::{Ns, A};

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn a_record(ttl: Option<u32>) -> Record {
        Record::new(
            name("example.com."),
            Class::IN,
            ttl.map(Ttl::from_secs),
            Rtype::A,
            A::new(Ipv4Addr::new(1, 2, 3, 4)).into(),
        )
        .unwrap()
    }

    #[test]
    fn ttl_from_str() {
        assert_eq!(Ttl::from_str("3600").unwrap(), Ttl::from_secs(3600));
        assert!(Ttl::from_str("1h").is_err());
        assert!(Ttl::from_str("").is_err());
        assert!(Ttl::from_str("+5").is_err());
        assert!(Ttl::from_str("4294967296").is_err());
    }

    #[test]
    fn new_checks_type() {
        assert!(Record::new(
            name("example.com."),
            Class::IN,
            None,
            Rtype::NS,
            A::new(Ipv4Addr::new(1, 2, 3, 4)).into(),
        )
        .is_err());
    }

    #[test]
    fn display() {
        assert_eq!(
            a_record(Some(300)).to_string(),
            "example.com. 300 IN A 1.2.3.4"
        );
        assert_eq!(a_record(None).to_string(), "example.com. IN A 1.2.3.4");
    }

    #[test]
    fn eq_ignores_annotations() {
        let plain = a_record(Some(300));
        let annotated = a_record(Some(300))
            .with_comment(Some("web".into()))
            .with_annotations(Some("4000000000000000".into()), None)
            .with_shortcut(Shortcut::Host);
        assert_eq!(plain, annotated);
        assert_ne!(plain, a_record(Some(301)));
    }

    #[test]
    fn derive_shares_annotations() {
        let primary = a_record(Some(300))
            .with_annotations(None, Some("ex".into()))
            .with_comment(Some("primary only".into()));
        let derived = primary.derive(
            name("example.com."),
            Some(Ttl::from_secs(600)),
            Ns::new(name("ns.example.com.")).into(),
            Shortcut::Authority,
        );
        assert_eq!(derived.location(), Some("ex"));
        assert_eq!(derived.comment(), None);
        assert_eq!(derived.class(), Class::IN);
        assert!(derived.provenance().is_derived());
        assert_eq!(
            derived.provenance().shortcut(),
            Some(Shortcut::Authority)
        );
    }
}
