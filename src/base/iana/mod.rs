//! IANA Definitions for DNS.
//!
//! This module contains enums for parameters defined in IANA registries
//! that are relevant for this crate: record classes and record types.
//!
//! All types defined in this module wrap their integer value and provide
//! associated constants for the well-known values. They implement
//! `FromStr` and `Display` using their mnemonic, falling back to the
//! generic `CLASSnnn` and `TYPEnnn` forms for values without one.

pub use self::class::Class;
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod rtype;
