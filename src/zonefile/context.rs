//! Per-parse state shared by the zonefile parsers.

use crate::base::iana::Class;
use crate::base::name::Name;
use crate::base::record::Ttl;
use crate::base::scan::qualify_token;
use crate::error::Error;
use core::str::FromStr;
use tracing::debug;

//------------ Defaults ------------------------------------------------------

/// Zone-level defaults a parse starts out with.
///
/// These are typically taken from the command line. A zonefile may
/// override the origin and TTL through directives.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// The initial origin for relative names.
    pub origin: Option<Name>,

    /// The TTL for records that don’t have one.
    pub ttl: Option<Ttl>,

    /// The class for records that don’t have one.
    pub class: Class,

    /// The SOA serial for tinydns lines that leave it empty.
    pub serial: Option<u32>,
}

impl Defaults {
    /// Returns the defaults with a new origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Option<Name>) -> Self {
        self.origin = origin;
        self
    }
}

//------------ ZoneContext ---------------------------------------------------

/// The state of a single parse.
///
/// The context tracks the current origin, the default TTL, and what the
/// previous record used for its owner, TTL, and class. It resolves the
/// parts of a record that were left out or given relative to the origin.
///
/// A context is created for each parse and never shared.
#[derive(Clone, Debug)]
pub struct ZoneContext {
    /// The current origin, always absolute.
    origin: Option<Name>,

    /// The default TTL from `$TTL` or the initial defaults.
    default_ttl: Option<Ttl>,

    /// The class used if no record gave one yet.
    default_class: Class,

    /// The SOA serial for tinydns data.
    serial: Option<u32>,

    /// The owner of the previous record.
    last_owner: Option<Name>,

    /// The last TTL given explicitly.
    last_ttl: Option<Ttl>,

    /// The last class given explicitly.
    last_class: Option<Class>,
}

impl ZoneContext {
    /// Creates a new context from the given defaults.
    ///
    /// A relative default origin is taken to be relative to the root.
    pub fn new(defaults: &Defaults) -> Self {
        ZoneContext {
            origin: defaults.origin.as_ref().map(|origin| {
                origin.qualify(&Name::root()).unwrap_or_else(|_| Name::root())
            }),
            default_ttl: defaults.ttl,
            default_class: defaults.class,
            serial: defaults.serial,
            last_owner: None,
            last_ttl: None,
            last_class: None,
        }
    }

    /// Returns the current origin.
    pub fn origin(&self) -> Option<&Name> {
        self.origin.as_ref()
    }

    /// Processes an `$ORIGIN` directive.
    ///
    /// A relative name is qualified with the current origin.
    pub fn set_origin(&mut self, token: &str) -> Result<(), Error> {
        let origin = self.qualify(token)?;
        debug!("origin set to {}", origin);
        self.origin = Some(origin);
        Ok(())
    }

    /// Returns the default TTL.
    pub fn default_ttl(&self) -> Option<Ttl> {
        self.default_ttl
    }

    /// Processes a `$TTL` directive.
    pub fn set_default_ttl(&mut self, token: &str) -> Result<(), Error> {
        let ttl = Ttl::from_str(token)?;
        debug!("default TTL set to {}", ttl);
        self.default_ttl = Some(ttl);
        Ok(())
    }

    /// Returns the default SOA serial.
    pub fn serial(&self) -> Option<u32> {
        self.serial
    }

    /// Makes a name token absolute.
    ///
    /// Absolute names are returned as they are. Relative names, including
    /// `@`, are qualified with the current origin.
    pub fn qualify(&self, token: &str) -> Result<Name, Error> {
        qualify_token(token, self.origin.as_ref())
    }

    /// Resolves the owner of a record.
    ///
    /// If `token` is `None`, the owner was left blank and the previous
    /// owner is used.
    pub fn owner(&mut self, token: Option<&str>) -> Result<Name, Error> {
        match token {
            Some(token) => {
                let owner = self.qualify(token)?;
                self.last_owner = Some(owner.clone());
                Ok(owner)
            }
            None => self.last_owner.clone().ok_or_else(|| {
                Error::malformed("blank owner without a previous owner")
            }),
        }
    }

    /// Resolves the TTL of a record.
    ///
    /// The order is: the explicit TTL, the default TTL, and the last
    /// explicit TTL. If none of them is present, the TTL stays absent.
    pub fn ttl(&mut self, explicit: Option<Ttl>) -> Option<Ttl> {
        match explicit {
            Some(ttl) => {
                self.last_ttl = Some(ttl);
                Some(ttl)
            }
            None => self.default_ttl.or(self.last_ttl),
        }
    }

    /// Resolves the class of a record.
    ///
    /// The order is: the explicit class, the last explicit class, and the
    /// default class.
    pub fn class(&mut self, explicit: Option<Class>) -> Class {
        match explicit {
            Some(class) => {
                self.last_class = Some(class);
                class
            }
            None => self.last_class.unwrap_or(self.default_class),
        }
    }
}

impl Default for ZoneContext {
    fn default() -> Self {
        Self::new(&Defaults::default())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn context(origin: Option<&str>) -> ZoneContext {
        ZoneContext::new(&Defaults {
            origin: origin.map(name),
            ..Default::default()
        })
    }

    #[test]
    fn relative_default_origin() {
        let ctx = context(Some("example.com"));
        assert_eq!(ctx.origin(), Some(&name("example.com.")));
    }

    #[test]
    fn set_origin() {
        let mut ctx = context(Some("example.com."));
        ctx.set_origin("sub").unwrap();
        assert_eq!(ctx.origin(), Some(&name("sub.example.com.")));
        ctx.set_origin("example.org.").unwrap();
        assert_eq!(ctx.origin(), Some(&name("example.org.")));

        let mut ctx = context(None);
        assert!(matches!(
            ctx.set_origin("sub").unwrap_err().kind(),
            ErrorKind::UnresolvedOrigin(_)
        ));
    }

    #[test]
    fn owner() {
        let mut ctx = context(Some("example.com."));
        assert!(matches!(
            ctx.owner(None).unwrap_err().kind(),
            ErrorKind::MalformedRecord(_)
        ));
        assert_eq!(ctx.owner(Some("www")).unwrap(), name("www.example.com."));
        assert_eq!(ctx.owner(None).unwrap(), name("www.example.com."));
        assert_eq!(ctx.owner(Some("@")).unwrap(), name("example.com."));

        let mut ctx = context(None);
        assert!(matches!(
            ctx.owner(Some("www")).unwrap_err().kind(),
            ErrorKind::UnresolvedOrigin(_)
        ));
        assert_eq!(ctx.owner(Some("www.")).unwrap(), name("www."));
    }

    #[test]
    fn ttl_inheritance() {
        let mut ctx = context(None);
        assert_eq!(ctx.ttl(None), None);
        let ttl = Some(Ttl::from_secs(60));
        assert_eq!(ctx.ttl(ttl), ttl);
        assert_eq!(ctx.ttl(None), Some(Ttl::from_secs(60)));
        ctx.set_default_ttl("3600").unwrap();
        assert_eq!(ctx.ttl(None), Some(Ttl::from_secs(3600)));
        assert!(ctx.set_default_ttl("1h").is_err());
    }

    #[test]
    fn class_inheritance() {
        let mut ctx = context(None);
        assert_eq!(ctx.class(None), Class::IN);
        assert_eq!(ctx.class(Some(Class::CH)), Class::CH);
        assert_eq!(ctx.class(None), Class::CH);
    }

    #[test]
    fn defaults_deserialize() {
        let defaults: Defaults =
            serde_yaml::from_str("origin: example.com.\nttl: 300\n").unwrap();
        assert_eq!(defaults.origin, Some(name("example.com.")));
        assert_eq!(defaults.ttl, Some(Ttl::from_secs(300)));
        assert_eq!(defaults.class, Class::IN);
        assert_eq!(defaults.serial, None);
    }
}
