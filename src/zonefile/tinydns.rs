//! Reading tinydns data.
//!
//! The format is the one read by `tinydns-data`. Each line holds one entry.
//! The first character is a code for the kind of entry, the remainder is a
//! list of fields separated by colons. Within fields, arbitrary octets can
//! be given as a backslash followed by three octal digits.
//!
//! Several codes are shortcuts for more than one record. Parsing produces
//! only the primary record of such a line, marked with its [`Shortcut`]
//! kind. The implied records are added by [expand](super::expand).
//!
//! Lines starting with `#` are comments, lines starting with `-` are
//! disabled entries. Both are skipped, as are location definitions
//! (`%`) and blank lines.

use super::context::ZoneContext;
use crate::base::charstr::split_octets;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::record::{Record, Shortcut, Ttl};
use crate::error::Error;
use crate::rdata::{
    Aaaa, Cname, Mx, Ns, Ptr, Soa, Srv, Txt, ZoneRecordData, A,
};
use crate::utils::base16;
use core::str::FromStr;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::string::String;
use std::vec::Vec;
use tracing::{debug, trace};

//------------ Default Values ------------------------------------------------

/// The TTL of name server records and their addresses.
const NS_TTL: Ttl = Ttl::from_secs(259200);

/// The TTL of SOA records.
const SOA_TTL: Ttl = Ttl::from_secs(2560);

/// The TTL of all other records.
const DEFAULT_TTL: Ttl = Ttl::DAY;

/// The SOA refresh, retry, expire, and minimum values.
const SOA_REFRESH: u32 = 16384;
const SOA_RETRY: u32 = 2048;
const SOA_EXPIRE: u32 = 1048576;
const SOA_MINIMUM: u32 = 2560;

/// The maximum length of the strings a TXT line is split into.
pub const TXT_CHUNK: usize = 127;

//------------ parse ---------------------------------------------------------

/// Parses tinydns data.
///
/// Records are returned in the order of the lines they are defined on.
/// Shortcut lines produce their primary record only.
pub fn parse(
    text: &str,
    context: &mut ZoneContext,
) -> Result<Vec<Record>, Error> {
    let mut res = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim_end_matches('\r');
        if let Some(record) = parse_line(line, context)
            .map_err(|err| err.at_line(line_no))?
        {
            trace!("line {}: {}", line_no, record);
            res.push(record)
        }
    }
    Ok(res)
}

/// Parses a single line.
fn parse_line(
    line: &str,
    context: &mut ZoneContext,
) -> Result<Option<Record>, Error> {
    let mut chars = line.chars();
    let code = match chars.next() {
        Some(code) => code,
        None => return Ok(None),
    };
    let rest = chars.as_str();
    let record = match code {
        '.' => zone_authority(Fields::new(code, rest, 6)?, context)?,
        '&' => name_server(Fields::new(code, rest, 6)?, context)?,
        '=' => host_v4(Fields::new(code, rest, 5)?, context)?,
        '+' => address_v4(Fields::new(code, rest, 5)?, context)?,
        '@' => mail_exchanger(Fields::new(code, rest, 7)?, context)?,
        '\'' => text_record(Fields::new(code, rest, 5)?, context)?,
        '^' => pointer(Fields::new(code, rest, 5)?, context)?,
        'C' => alias(Fields::new(code, rest, 5)?, context)?,
        'Z' => start_of_authority(Fields::new(code, rest, 11)?, context)?,
        ':' => generic(Fields::new(code, rest, 6)?, context)?,
        '6' => host_v6(Fields::new(code, rest, 5)?, context)?,
        '3' => address_v6(Fields::new(code, rest, 5)?, context)?,
        'S' => service(Fields::new(code, rest, 9)?, context)?,
        '%' => {
            debug!("skipping location definition '{}'", line);
            return Ok(None);
        }
        '#' | '-' => {
            debug!("skipping line '{}'", line);
            return Ok(None);
        }
        ch if ch.is_whitespace() && line.trim().is_empty() => return Ok(None),
        _ => return Err(Error::unknown_type(code.to_string())),
    };
    Ok(Some(record))
}

/// Returns the number of fields a line with the given code needs.
///
/// Fields beyond these can be left out and then take their defaults.
pub fn min_fields(code: char) -> usize {
    match code {
        '.' | '&' | '@' | 'Z' | ':' | 'S' => 3,
        _ => 2,
    }
}

//------------ Line Types ----------------------------------------------------

/// `.fqdn:ip:x:ttl:timestamp:lo`
fn zone_authority(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let address = fields.opt_ipv4(1)?;
    let ns = fields.server_name(2, &fqdn, "ns")?;
    let ns_ttl = fields.ttl(3, context, NS_TTL)?;
    let rname = fqdn.prepend("hostmaster").map_err(|err| {
        Error::invalid_data(format!("{} in hostmaster name", err))
    })?;
    let soa = Soa::new(
        ns,
        rname,
        context.serial().unwrap_or(1),
        SOA_REFRESH,
        SOA_RETRY,
        SOA_EXPIRE,
        SOA_MINIMUM,
    );
    let ttl = context.default_ttl().unwrap_or(SOA_TTL);
    Ok(fields
        .record(fqdn, Some(ttl), soa.into(), 4, context)
        .with_shortcut(Shortcut::ZoneAuthority {
            address,
            ns_ttl: Some(ns_ttl),
        }))
}

/// `&fqdn:ip:x:ttl:timestamp:lo`
fn name_server(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let address = fields.opt_ipv4(1)?;
    let ns = fields.server_name(2, &fqdn, "ns")?;
    let ttl = fields.ttl(3, context, NS_TTL)?;
    Ok(fields
        .record(fqdn, Some(ttl), Ns::new(ns).into(), 4, context)
        .with_shortcut(Shortcut::NameServer { address }))
}

/// `=fqdn:ip:ttl:timestamp:lo`
fn host_v4(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let addr = match fields.opt_ipv4(1) {
        Ok(Some(addr)) => addr,
        _ => {
            return Err(Error::ambiguous_shortcut(format!(
                "no IPv4 address to derive a reverse pointer from: '{}'",
                fields.get(1)
            )))
        }
    };
    let ttl = fields.ttl(2, context, DEFAULT_TTL)?;
    Ok(fields
        .record(fqdn, Some(ttl), A::new(addr).into(), 3, context)
        .with_shortcut(Shortcut::Host))
}

/// `+fqdn:ip:ttl:timestamp:lo`
fn address_v4(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let addr = fields.ipv4(1)?;
    let ttl = fields.ttl(2, context, DEFAULT_TTL)?;
    Ok(fields.record(fqdn, Some(ttl), A::new(addr).into(), 3, context))
}

/// `@fqdn:ip:x:dist:ttl:timestamp:lo`
fn mail_exchanger(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let address = fields.opt_ipv4(1)?;
    let exchange = fields.server_name(2, &fqdn, "mx")?;
    let dist = fields.opt_int::<u16>(3, "distance")?.unwrap_or(0);
    let ttl = fields.ttl(4, context, DEFAULT_TTL)?;
    Ok(fields
        .record(fqdn, Some(ttl), Mx::new(dist, exchange).into(), 5, context)
        .with_shortcut(Shortcut::MailExchanger { address }))
}

/// `'fqdn:s:ttl:timestamp:lo`
fn text_record(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let txt = Txt::from_strings(split_octets(&fields.octets(1), TXT_CHUNK))?;
    let ttl = fields.ttl(2, context, DEFAULT_TTL)?;
    Ok(fields.record(fqdn, Some(ttl), txt.into(), 3, context))
}

/// `^fqdn:p:ttl:timestamp:lo`
fn pointer(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let target = fields.name(1)?;
    let ttl = fields.ttl(2, context, DEFAULT_TTL)?;
    Ok(fields.record(fqdn, Some(ttl), Ptr::new(target).into(), 3, context))
}

/// `Cfqdn:p:ttl:timestamp:lo`
fn alias(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let target = fields.name(1)?;
    let ttl = fields.ttl(2, context, DEFAULT_TTL)?;
    Ok(fields.record(fqdn, Some(ttl), Cname::new(target).into(), 3, context))
}

/// `Zfqdn:mname:rname:ser:ref:ret:exp:min:ttl:timestamp:lo`
fn start_of_authority(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let soa = Soa::new(
        fields.name(1)?,
        fields.name(2)?,
        fields
            .opt_int(3, "serial")?
            .or(context.serial())
            .unwrap_or(1),
        fields.opt_int(4, "refresh")?.unwrap_or(SOA_REFRESH),
        fields.opt_int(5, "retry")?.unwrap_or(SOA_RETRY),
        fields.opt_int(6, "expire")?.unwrap_or(SOA_EXPIRE),
        fields.opt_int(7, "minimum")?.unwrap_or(SOA_MINIMUM),
    );
    let ttl = fields.ttl(8, context, SOA_TTL)?;
    Ok(fields
        .record(fqdn, Some(ttl), soa.into(), 9, context)
        .with_shortcut(Shortcut::Authority))
}

/// `:fqdn:n:rdata:ttl:timestamp:lo`
fn generic(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let rtype = match fields.opt_int::<u16>(1, "record type")? {
        Some(0) | None => {
            return Err(Error::unknown_type(fields.get(1)));
        }
        Some(value) => Rtype::from_int(value),
    };
    let data = ZoneRecordData::from_rdata(rtype, &fields.octets(2))?;
    let ttl = fields.ttl(3, context, DEFAULT_TTL)?;
    Ok(fields.record(fqdn, Some(ttl), data, 4, context))
}

/// `6fqdn:ip6:ttl:timestamp:lo`
fn host_v6(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let addr = fields.ipv6(1)?;
    let ttl = fields.ttl(2, context, DEFAULT_TTL)?;
    Ok(fields
        .record(fqdn, Some(ttl), Aaaa::new(addr).into(), 3, context)
        .with_shortcut(Shortcut::Host))
}

/// `3fqdn:ip6:ttl:timestamp:lo`
fn address_v6(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let addr = fields.ipv6(1)?;
    let ttl = fields.ttl(2, context, DEFAULT_TTL)?;
    Ok(fields.record(fqdn, Some(ttl), Aaaa::new(addr).into(), 3, context))
}

/// `Sfqdn:ip:x:port:priority:weight:ttl:timestamp:lo`
fn service(
    fields: Fields,
    context: &mut ZoneContext,
) -> Result<Record, Error> {
    let fqdn = fields.name(0)?;
    let address = fields.opt_ipv4(1)?;
    let target = fields.name(2)?;
    let srv = Srv::new(
        fields.opt_int(4, "priority")?.unwrap_or(0),
        fields.opt_int(5, "weight")?.unwrap_or(0),
        fields.opt_int(3, "port")?.unwrap_or(0),
        target,
    );
    let ttl = fields.ttl(6, context, DEFAULT_TTL)?;
    Ok(fields
        .record(fqdn, Some(ttl), srv.into(), 7, context)
        .with_shortcut(Shortcut::Service { address }))
}

//------------ Fields --------------------------------------------------------

/// The colon-separated fields of a line after the type code.
struct Fields<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    /// Splits the line and checks the number of fields.
    fn new(code: char, rest: &'a str, max: usize) -> Result<Self, Error> {
        let min = min_fields(code);
        let fields: Vec<_> = rest.split(':').collect();
        if fields.len() < min {
            return Err(Error::malformed(format!(
                "'{}' line needs at least {} fields, found {}",
                code,
                min,
                fields.len()
            )));
        }
        if fields.len() > max {
            return Err(Error::malformed(format!(
                "'{}' line has more than {} fields",
                code, max
            )));
        }
        Ok(Fields { fields })
    }

    /// Returns the raw content of a field or an empty string if missing.
    fn get(&self, idx: usize) -> &'a str {
        self.fields.get(idx).copied().unwrap_or("")
    }

    /// Returns the decoded octets of a field.
    fn octets(&self, idx: usize) -> Vec<u8> {
        decode_octal(self.get(idx))
    }

    /// Returns a field as a string with escapes decoded.
    fn string(&self, idx: usize) -> Option<String> {
        let octets = self.octets(idx);
        if octets.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&octets).into_owned())
        }
    }

    /// Returns a field as a domain name.
    ///
    /// Names are always absolute, a trailing dot is optional.
    fn name(&self, idx: usize) -> Result<Name, Error> {
        parse_name(self.get(idx))
    }

    /// Returns the name of a name server or mail exchanger.
    ///
    /// A name without a dot is a label below `x.<kind>.<fqdn>`, an empty
    /// field stands for `<kind>.<fqdn>`.
    fn server_name(
        &self,
        idx: usize,
        fqdn: &Name,
        kind: &str,
    ) -> Result<Name, Error> {
        let raw = self.get(idx);
        let res = if raw.is_empty() {
            fqdn.prepend(kind)
        } else if raw.contains('.') {
            return parse_name(raw);
        } else {
            fqdn.prepend(kind).and_then(|name| name.prepend(raw))
        };
        res.map_err(|err| {
            Error::invalid_data(format!("{} in name '{}'", err, raw))
        })
    }

    /// Returns an optional integer field.
    fn opt_int<T: FromStr>(
        &self,
        idx: usize,
        what: &str,
    ) -> Result<Option<T>, Error> {
        let raw = self.get(idx);
        if raw.is_empty() {
            return Ok(None);
        }
        T::from_str(raw).map(Some).map_err(|_| {
            Error::invalid_data(format!("bad {} '{}'", what, raw))
        })
    }

    /// Returns the TTL of the line.
    ///
    /// An empty field falls back to the context’s default TTL and then to
    /// `fallback`.
    fn ttl(
        &self,
        idx: usize,
        context: &ZoneContext,
        fallback: Ttl,
    ) -> Result<Ttl, Error> {
        let raw = self.get(idx);
        if raw.is_empty() {
            Ok(context.default_ttl().unwrap_or(fallback))
        } else {
            Ttl::from_str(raw)
        }
    }

    /// Returns a required IPv4 address.
    fn ipv4(&self, idx: usize) -> Result<Ipv4Addr, Error> {
        self.opt_ipv4(idx)?.ok_or_else(|| {
            Error::invalid_data("missing IPv4 address")
        })
    }

    /// Returns an optional IPv4 address.
    fn opt_ipv4(&self, idx: usize) -> Result<Option<Ipv4Addr>, Error> {
        let raw = self.get(idx);
        if raw.is_empty() {
            return Ok(None);
        }
        Ipv4Addr::from_str(raw).map(Some).map_err(|_| {
            Error::invalid_data(format!("bad IPv4 address '{}'", raw))
        })
    }

    /// Returns an IPv6 address given as 32 hex digits.
    fn ipv6(&self, idx: usize) -> Result<Ipv6Addr, Error> {
        let raw = self.get(idx);
        let octets: [u8; 16] = base16::decode_vec(raw)
            .ok()
            .and_then(|octets| octets.try_into().ok())
            .ok_or_else(|| {
                Error::invalid_data(format!("bad IPv6 address '{}'", raw))
            })?;
        Ok(Ipv6Addr::from(octets))
    }

    /// Creates the record for the line.
    ///
    /// The timestamp and location are taken from the field `annotations`
    /// and the one following it.
    fn record(
        &self,
        owner: Name,
        ttl: Option<Ttl>,
        data: ZoneRecordData,
        annotations: usize,
        context: &mut ZoneContext,
    ) -> Record {
        let class = context.class(None);
        Record::from_data(owner, class, ttl, data).with_annotations(
            self.string(annotations),
            self.string(annotations + 1),
        )
    }
}

//------------ Helper Functions ----------------------------------------------

/// Parses a domain name from a tinydns field.
fn parse_name(raw: &str) -> Result<Name, Error> {
    let raw = raw.strip_suffix('.').unwrap_or(raw);
    if raw.is_empty() {
        return Ok(Name::root());
    }
    let labels: Vec<_> = raw.split('.').map(decode_octal).collect();
    Name::from_labels(labels.iter().map(Vec::as_slice), true).map_err(|err| {
        Error::invalid_data(format!("{} in name '{}'", err, raw))
    })
}

/// Decodes the octal escapes of a field.
///
/// A backslash that isn’t followed by three octal digits is kept.
pub fn decode_octal(raw: &str) -> Vec<u8> {
    let bytes = raw.as_bytes();
    let mut res = Vec::with_capacity(bytes.len());
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'\\' {
            if let Some(value) = bytes.get(pos + 1..pos + 4).and_then(octal) {
                res.push(value);
                pos += 4;
                continue;
            }
        }
        res.push(bytes[pos]);
        pos += 1;
    }
    res
}

/// Converts three octal digits into an octet.
fn octal(digits: &[u8]) -> Option<u8> {
    digits.iter().try_fold(0u16, |acc, ch| match ch {
        b'0'..=b'7' => Some(acc * 8 + u16::from(ch - b'0')),
        _ => None,
    })
    .and_then(|value| u8::try_from(value).ok())
}

//============ Testing =======================================================
