//! Basics.
//!
//! This module provides the fundamental types for working with DNS zone
//! data: domain names, character strings, record classes and types, and
//! resource records. The record data for the individual record types lives
//! in the top-level [rdata](crate::rdata) module.
//!
//!
//! # Presentation and Wire Format
//!
//! Zone data is text, so the primary representation of all types here is
//! their _presentation format._ Reading it is called _scanning_ and is
//! covered by the [scan] module; writing it is done through the
//! [zonefile_fmt] module.
//!
//! Some zone data carries record data in DNS wire format, namely the
//! generic record data of [RFC 3597] and the generic lines of tinydns data.
//! In order to distinguish this from reading presentation format, we use
//! the term *parsing* for extracting data from a wire-format
//! representation and *composing* for producing such a representation. The
//! [wire] module has the machinery for both.
//!
//!
//! # Types for DNS Data
//!
//! The module contains a number of types for DNS data. Because they often
//! come with a number of support types, they are arranged in submodules:
//!
//! * [charstr] for DNS character strings,
//! * [iana] for the record classes and types,
//! * [name] for domain names,
//! * [record] for DNS resource records, and
//! * [rdata] for the traits shared by all record data types.
//!
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597

//--- Re-exports

pub use self::charstr::CharStr;
pub use self::iana::{Class, Rtype};
pub use self::name::Name;
pub use self::rdata::UnknownRecordData;
pub use self::record::{Provenance, Record, Shortcut, Ttl};

//--- Modules

pub mod charstr;
pub mod iana;
pub mod name;
pub mod rdata;
pub mod record;
pub mod scan;
pub mod wire;
pub mod zonefile_fmt;
