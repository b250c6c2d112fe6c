//! Reading zone data.
//!
//! This module contains the parsers for the two zone data formats this
//! crate understands: BIND master files in [bind] and tinydns data in
//! [tinydns]. Both produce a sequence of [`Record`]s and use a
//! [`ZoneContext`] to resolve what was left out.
//!
//! Tinydns data contains shortcuts that stand for more than one record.
//! These are expanded into separate records by [`expand`].
//!
//! [`Record`]: crate::base::record::Record

pub use self::context::{Defaults, ZoneContext};
pub use self::expand::expand;

pub mod bind;
pub mod context;
pub mod expand;
pub mod tinydns;
