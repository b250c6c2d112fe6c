//! Writing zone data.
//!
//! This module contains the serializers for the output formats: BIND
//! master files in [bind], tinydns data in [tinydns], and JSON in [json].
//! Each of them turns a slice of records into text, one rendering per
//! record in the order given.
//!
//! How the output looks is controlled by [`OutputOptions`].

use crate::base::iana::Class;
use crate::base::name::Name;
use crate::base::record::Ttl;

pub mod bind;
pub mod json;
pub mod tinydns;

//------------ OutputOptions -------------------------------------------------

/// Options for writing zone data.
///
/// The origin, TTL, and class are the zone-level values a reader of the
/// output will assume. The `hide` flags elide those parts of each record
/// that can be reconstructed from them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// The origin of the zone.
    pub origin: Option<Name>,

    /// The TTL for records that don’t have one.
    pub ttl: Option<Ttl>,

    /// The class of the zone.
    pub class: Class,

    /// Which parts of a record to leave out.
    pub hide: Hide,
}

impl OutputOptions {
    /// Returns the origin names should be written relative to, if any.
    pub fn relative_origin(&self) -> Option<&Name> {
        if self.hide.origin {
            self.origin.as_ref()
        } else {
            None
        }
    }

    /// Returns the TTL to write for a record with the given TTL.
    pub fn ttl(&self, ttl: Option<Ttl>) -> Option<Ttl> {
        if self.hide.ttl {
            None
        } else {
            ttl.or(self.ttl)
        }
    }
}

//------------ Hide ----------------------------------------------------------

/// The parts of a record left out when writing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Hide {
    /// Write names relative to the origin.
    pub origin: bool,

    /// Leave out the class.
    pub class: bool,

    /// Leave out the TTL.
    pub ttl: bool,
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn hide_tokens() {
        assert_tokens(
            &Hide {
                origin: true,
                class: false,
                ttl: true,
            },
            &[
                Token::Struct {
                    name: "Hide",
                    len: 3,
                },
                Token::Str("origin"),
                Token::Bool(true),
                Token::Str("class"),
                Token::Bool(false),
                Token::Str("ttl"),
                Token::Bool(true),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn ttl_fallback() {
        let mut options = OutputOptions {
            ttl: Some(Ttl::from_secs(3600)),
            ..Default::default()
        };
        assert_eq!(options.ttl(None), Some(Ttl::from_secs(3600)));
        assert_eq!(
            options.ttl(Some(Ttl::from_secs(60))),
            Some(Ttl::from_secs(60))
        );
        options.hide.ttl = true;
        assert_eq!(options.ttl(Some(Ttl::from_secs(60))), None);
    }
}
