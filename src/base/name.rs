//! Domain names.
//!
//! This module provides the [`Name`] type for domain names as they appear
//! in zonefiles and tinydns data.
//!
//! Names are kept in their presentation format, i.e., as text with the
//! labels separated by dots and special characters escaped. A name is
//! either _absolute_, meaning it ends in the root label and thus stands on
//! its own, or _relative_, meaning it still needs to be completed by an
//! origin. Absolute names are written with a trailing dot, relative names
//! without one.
//!
//! Escape sequences are kept textually as they were written. They are
//! decoded only when the octets of the labels are needed, such as when
//! comparing names or turning them into wire format or tinydns notation.

use super::scan::{Symbol, SymbolCharsError, Symbols};
use core::str::FromStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::string::String;
use std::vec::Vec;

//------------ Name ----------------------------------------------------------

/// A domain name.
///
/// Comparison and hashing of names ignore ASCII case as required for
/// DNS names.
#[derive(Clone)]
pub struct Name {
    /// The presentation format without a trailing dot.
    ///
    /// This is empty for both the root name and the empty relative name
    /// that stands for the origin itself.
    repr: String,

    /// Does the name end in the root label?
    absolute: bool,
}

/// The maximum length of a label in octets.
const MAX_LABEL_LEN: usize = 63;

/// The maximum length of a name in its wire format.
const MAX_NAME_LEN: usize = 255;

/// Characters that need escaping in a label.
const LABEL_SPECIALS: &[u8] = b".\\\"();";

impl Name {
    /// Returns the root name.
    pub fn root() -> Self {
        Name {
            repr: String::new(),
            absolute: true,
        }
    }

    /// Returns the empty relative name.
    ///
    /// This is the name written as `@` in zonefiles. Qualifying it results
    /// in the origin itself.
    pub fn empty() -> Self {
        Name {
            repr: String::new(),
            absolute: false,
        }
    }

    /// Creates a name from a sequence of label octets.
    ///
    /// The labels must not include the root label. Instead, `absolute`
    /// determines whether the name ends in it.
    pub fn from_labels<'a>(
        labels: impl IntoIterator<Item = &'a [u8]>,
        absolute: bool,
    ) -> Result<Self, NameError> {
        let mut repr = String::new();
        let mut len = 1;
        for label in labels {
            if label.is_empty() {
                return Err(NameError::EmptyLabel);
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(NameError::LongLabel);
            }
            len += label.len() + 1;
            if !repr.is_empty() {
                repr.push('.');
            }
            for &ch in label {
                fmt::Write::write_fmt(
                    &mut repr,
                    format_args!("{}", Symbol::from_octet(ch, LABEL_SPECIALS)),
                )
                .map_err(|_| NameError::BadEscape)?;
            }
        }
        if len > MAX_NAME_LEN {
            return Err(NameError::LongName);
        }
        Ok(Name { repr, absolute })
    }

    /// Returns the reverse pointer name for an IPv4 address.
    ///
    /// This is the name in `in-addr.arpa.` with the octets of the address
    /// in reverse order, as described in RFC 1035, section 3.5.
    pub fn reverse_v4(addr: Ipv4Addr) -> Self {
        let [a, b, c, d] = addr.octets();
        Name {
            repr: format!("{}.{}.{}.{}.in-addr.arpa", d, c, b, a),
            absolute: true,
        }
    }

    /// Returns the reverse pointer name for an IPv6 address.
    ///
    /// This is the name in `ip6.arpa.` with each of the 32 nibbles of the
    /// address as a label, least significant nibble first, as described in
    /// RFC 3596, section 2.5.
    pub fn reverse_v6(addr: Ipv6Addr) -> Self {
        let mut repr = String::with_capacity(72);
        for octet in addr.octets().iter().rev() {
            repr.push(nibble(octet & 0x0F));
            repr.push('.');
            repr.push(nibble(octet >> 4));
            repr.push('.');
        }
        repr.push_str("ip6.arpa");
        Name {
            repr,
            absolute: true,
        }
    }

    /// Returns whether the name ends in the root label.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Returns whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.absolute && self.repr.is_empty()
    }

    /// Returns whether this is the empty relative name.
    pub fn is_empty(&self) -> bool {
        !self.absolute && self.repr.is_empty()
    }

    /// Returns the presentation format of the name without a trailing dot.
    ///
    /// This is the empty string for both the root and the empty name.
    pub fn as_str(&self) -> &str {
        &self.repr
    }

    /// Returns the absolute name for this name relative to `origin`.
    ///
    /// If the name is absolute already, returns it unchanged. Otherwise
    /// appends `origin` which must be absolute.
    pub fn qualify(&self, origin: &Name) -> Result<Name, NameError> {
        if self.absolute {
            return Ok(self.clone());
        }
        debug_assert!(origin.absolute, "qualifying with a relative origin");
        let repr = if self.repr.is_empty() {
            origin.repr.clone()
        } else if origin.repr.is_empty() {
            self.repr.clone()
        } else {
            format!("{}.{}", self.repr, origin.repr)
        };
        let res = Name {
            repr,
            absolute: true,
        };
        if res.wire_len() > MAX_NAME_LEN {
            return Err(NameError::LongName);
        }
        Ok(res)
    }

    /// Returns the name relative to `origin` if it is below it.
    ///
    /// Returns the empty name if the two are equal and `None` if `self`
    /// isn’t absolute or not at or below `origin`.
    pub fn relative_to(&self, origin: &Name) -> Option<Name> {
        if !self.absolute || !origin.absolute {
            return None;
        }
        let labels = self.label_strs();
        let origin_labels = origin.label_strs();
        if origin_labels.len() > labels.len() {
            return None;
        }
        let split = labels.len() - origin_labels.len();
        let (head, tail) = labels.split_at(split);
        let matches = tail
            .iter()
            .zip(origin_labels.iter())
            .all(|(left, right)| left.eq_ignore_ascii_case(right));
        if !matches {
            return None;
        }
        Some(Name {
            repr: head.join("."),
            absolute: false,
        })
    }

    /// Returns a new name with `label` prepended to this name.
    ///
    /// The label is given in presentation format.
    pub fn prepend(&self, label: &str) -> Result<Name, NameError> {
        let label = Name::from_str(label)?;
        if label.absolute {
            return Err(NameError::EmptyLabel);
        }
        let res = Name {
            repr: if self.repr.is_empty() {
                label.repr
            } else {
                format!("{}.{}", label.repr, self.repr)
            },
            absolute: self.absolute,
        };
        if res.wire_len() > MAX_NAME_LEN {
            return Err(NameError::LongName);
        }
        Ok(res)
    }

    /// Returns the decoded octets of the labels of the name.
    ///
    /// The root label is not included.
    pub fn labels(&self) -> Vec<Vec<u8>> {
        let mut res = Vec::new();
        if self.repr.is_empty() {
            return res;
        }
        let mut label = Vec::new();
        // The content was checked when the name was created, so there
        // can’t be any errors here.
        for sym in Symbols::new(self.repr.chars()).flatten() {
            if sym.is_label_separator() {
                res.push(std::mem::take(&mut label));
            } else {
                sym.push_octets(&mut label);
            }
        }
        res.push(label);
        res
    }

    /// Returns the presentation format of each label.
    fn label_strs(&self) -> Vec<&str> {
        let mut res = Vec::new();
        if self.repr.is_empty() {
            return res;
        }
        let mut start = 0;
        let mut escaped = false;
        for (pos, ch) in self.repr.char_indices() {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '.' {
                res.push(&self.repr[start..pos]);
                start = pos + 1;
            }
        }
        res.push(&self.repr[start..]);
        res
    }

    /// Returns the length of the name in wire format.
    pub fn wire_len(&self) -> usize {
        self.labels().iter().map(|label| label.len() + 1).sum::<usize>() + 1
    }
}

fn nibble(value: u8) -> char {
    char::from_digit(value.into(), 16).unwrap_or('0')
}

//--- FromStr

impl FromStr for Name {
    type Err = NameError;

    /// Parses a name from its presentation format.
    ///
    /// A name ending in an unescaped dot is absolute. The single dot is the
    /// root name and `@` is the empty relative name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(NameError::Empty);
        }
        if s == "." {
            return Ok(Name::root());
        }
        if s == "@" {
            return Ok(Name::empty());
        }

        let mut label_len = 0;
        let mut name_len = 1;
        let mut last_dot = None;
        let mut pos = 0;
        let mut symbols = Symbols::new(s.chars());
        while let Some(sym) = symbols.next() {
            let sym = sym?;
            let sym_len = match sym {
                Symbol::Char(ch) => ch.len_utf8(),
                Symbol::SimpleEscape(_) => 2,
                Symbol::DecimalEscape(_) => 4,
            };
            if sym.is_label_separator() {
                if label_len == 0 {
                    return Err(NameError::EmptyLabel);
                }
                name_len += label_len + 1;
                label_len = 0;
                last_dot = Some(pos);
            } else {
                label_len += match sym {
                    Symbol::Char(ch) => ch.len_utf8(),
                    _ => 1,
                };
                if label_len > MAX_LABEL_LEN {
                    return Err(NameError::LongLabel);
                }
            }
            pos += sym_len;
        }
        if label_len > 0 {
            name_len += label_len + 1;
        }
        if name_len > MAX_NAME_LEN {
            return Err(NameError::LongName);
        }

        let absolute = last_dot == Some(s.len() - 1);
        let repr = if absolute { &s[..s.len() - 1] } else { s };
        Ok(Name {
            repr: repr.into(),
            absolute,
        })
    }
}

//--- PartialEq, Eq, and Hash

impl PartialEq for Name {
    /// Compares the label octets, so differently escaped spellings of a
    /// name are equal.
    fn eq(&self, other: &Self) -> bool {
        if self.absolute != other.absolute {
            return false;
        }
        if self.repr.eq_ignore_ascii_case(&other.repr) {
            return true;
        }
        let (left, right) = (self.labels(), other.labels());
        left.len() == right.len()
            && left
                .iter()
                .zip(right.iter())
                .all(|(left, right)| left.eq_ignore_ascii_case(right))
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.absolute.hash(state);
        for label in self.labels() {
            state.write_usize(label.len());
            for ch in label {
                ch.to_ascii_lowercase().hash(state)
            }
        }
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.absolute, self.repr.is_empty()) {
            (true, true) => f.write_str("."),
            (true, false) => write!(f, "{}.", self.repr),
            (false, true) => f.write_str("@"),
            (false, false) => f.write_str(&self.repr),
        }
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

//--- Serialize and Deserialize

impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Name::from_str(&s).map_err(serde::de::Error::custom)
    }
}

//------------ NameError -----------------------------------------------------

/// A domain name could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// The name was an empty string.
    Empty,

    /// A label other than the root label was empty.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 255 octets in wire format.
    LongName,

    /// An illegal escape sequence was encountered.
    BadEscape,
}

impl From<SymbolCharsError> for NameError {
    fn from(_: SymbolCharsError) -> Self {
        NameError::BadEscape
    }
}

//--- Display and Error

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NameError::Empty => "empty name",
            NameError::EmptyLabel => "empty label",
            NameError::LongLabel => "label longer than 63 octets",
            NameError::LongName => "name longer than 255 octets",
            NameError::BadEscape => "illegal escape sequence",
        })
    }
}

impl std::error::Error for NameError {}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert!(name("example.com.").is_absolute());
        assert!(!name("www").is_absolute());
        assert!(name(".").is_root());
        assert!(name("@").is_empty());
        assert_eq!(name("a\\.b").labels(), vec![b"a.b".to_vec()]);
        assert!(!name("a\\.").is_absolute());
        assert!(name("a\\\\.").is_absolute());
        assert_eq!(Name::from_str(""), Err(NameError::Empty));
        assert_eq!(Name::from_str("a..b"), Err(NameError::EmptyLabel));
        assert_eq!(Name::from_str(".a"), Err(NameError::EmptyLabel));
        assert_eq!(
            Name::from_str(&"x".repeat(64)),
            Err(NameError::LongLabel)
        );
        assert_eq!(
            Name::from_str(&"abcdefg.".repeat(32)),
            Err(NameError::LongName)
        );
        assert_eq!(Name::from_str("a\\2"), Err(NameError::BadEscape));
    }

    #[test]
    fn eq_ignores_case() {
        assert_eq!(name("Example.COM."), name("example.com."));
        assert_ne!(name("example.com"), name("example.com."));
    }

    #[test]
    fn eq_decodes_escapes() {
        use std::collections::HashSet;

        assert_eq!(name("a\\065.example."), name("aA.example."));
        assert_eq!(name("a\\046b.example."), name("a\\.b.example."));
        assert_ne!(name("a\\.b.example."), name("a.b.example."));

        let set: HashSet<_> = [name("a\\065.example."), name("AA.example.")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[rstest]
    #[case("www", "example.com.", "www.example.com.")]
    #[case("a.b", "example.com.", "a.b.example.com.")]
    #[case("@", "example.com.", "example.com.")]
    #[case("www", ".", "www.")]
    #[case("host.other.org.", "example.com.", "host.other.org.")]
    fn qualify(#[case] rel: &str, #[case] origin: &str, #[case] res: &str) {
        let qualified = name(rel).qualify(&name(origin)).unwrap();
        assert!(qualified.is_absolute());
        assert_eq!(qualified.to_string(), res);
    }

    #[test]
    fn qualify_is_concatenation() {
        let origin = name("zones.test.");
        for rel in ["a", "b.c", "x-1.y_2", "\\@weird"] {
            assert_eq!(
                name(rel).qualify(&origin).unwrap().to_string(),
                format!("{}.{}", rel, origin)
            );
        }
    }

    #[rstest]
    #[case("www.example.com.", "example.com.", Some("www"))]
    #[case("WWW.Example.com.", "example.COM.", Some("WWW"))]
    #[case("example.com.", "example.com.", Some("@"))]
    #[case("a\\.example.com.", "example.com.", None)]
    #[case("a\\.b.example.com.", "example.com.", Some("a\\.b"))]
    #[case("otherexample.com.", "example.com.", None)]
    #[case("www.example.org.", "example.com.", None)]
    fn relative_to(
        #[case] abs: &str,
        #[case] origin: &str,
        #[case] res: Option<&str>,
    ) {
        assert_eq!(
            name(abs)
                .relative_to(&name(origin))
                .map(|name| name.to_string()),
            res.map(Into::into)
        );
    }

    #[test]
    fn reverse_v4() {
        assert_eq!(
            Name::reverse_v4(Ipv4Addr::new(1, 2, 3, 4)).to_string(),
            "4.3.2.1.in-addr.arpa."
        );
        assert_eq!(
            Name::reverse_v4(Ipv4Addr::new(192, 0, 2, 255)).to_string(),
            "255.2.0.192.in-addr.arpa."
        );
    }

    #[test]
    fn reverse_v6() {
        let addr = Ipv6Addr::from_str("2001:db8::567:89ab").unwrap();
        assert_eq!(
            Name::reverse_v6(addr).to_string(),
            "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.\
             0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa."
        );
        assert_eq!(Name::reverse_v6(addr).labels().len(), 34);
    }

    #[test]
    fn from_labels_escapes() {
        let name =
            Name::from_labels([b"a.b".as_ref(), b"c d", b"com"], true)
                .unwrap();
        assert_eq!(name.to_string(), "a\\.b.c\\032d.com.");
        assert_eq!(name.labels()[1], b"c d");
        assert_eq!(
            Name::from_labels([b"".as_ref()], true),
            Err(NameError::EmptyLabel)
        );
    }

    #[test]
    fn prepend() {
        assert_eq!(
            name("example.com.").prepend("hostmaster").unwrap(),
            name("hostmaster.example.com.")
        );
        assert_eq!(name(".").prepend("ns").unwrap(), name("ns."));
    }
}
