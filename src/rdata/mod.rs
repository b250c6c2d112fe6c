//! Record data implementations.
//!
//! This module contains the record data types for all record types this
//! crate understands natively.
//!
//! The types are named identically to the [`Rtype`] constant they
//! implement. Some of them are grouped into submodules for the RFCs they
//! are defined in. All types are also re-exported at the top level here.
//! Ie., for the AAAA record type, you can simply `use dnszone::rdata::Aaaa`
//! instead of `use dnszone::rdata::aaaa::Aaaa`.
//!
//! The enum [`ZoneRecordData`] collects all the types into a single type
//! and adds a variant for record data of all other types, kept in the
//! generic form of [RFC 3597]. This is the record data type used by
//! [`Record`].
//!
//! [`Rtype`]: crate::base::iana::Rtype
//! [`Record`]: crate::base::record::Record
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597

#[macro_use]
mod macros;

pub use crate::base::rdata::UnknownRecordData;

pub mod aaaa;
pub mod caa;
pub mod rfc1035;
pub mod rfc6672;
pub mod srv;

rdata_types! {
    rfc1035::{
        A,
        Cname,
        Hinfo,
        Mx,
        Ns,
        Ptr,
        Soa,
        Txt,
    }
    aaaa::{
        Aaaa,
    }
    srv::{
        Srv,
    }
    rfc6672::{
        Dname,
    }
    caa::{
        Caa,
    }
}

//============ Testing =======================================================
