//! Writing tinydns data.
//!
//! Records with a native tinydns line are written as such. Records that
//! were produced by expanding a shortcut are collapsed back into the
//! shortcut line: the primary record is written with its shortcut’s code
//! and the derived records are skipped. Everything else is written as a
//! generic `:` line carrying the record data in wire format.
//!
//! Tinydns only knows the IN class. Records of any other class can’t be
//! written.

use super::OutputOptions;
use crate::base::charstr::split_octets;
use crate::base::iana::Class;
use crate::base::name::Name;
use crate::base::rdata::ComposeRecordData;
use crate::base::record::{Provenance, Record, Shortcut, Ttl};
use crate::error::Error;
use crate::rdata::{Txt, ZoneRecordData};
use crate::utils::base16;
use crate::zonefile::tinydns::{min_fields, TXT_CHUNK};
use std::net::Ipv4Addr;
use std::string::{String, ToString};
use std::vec::Vec;
use tracing::trace;

//------------ render --------------------------------------------------------

/// Renders records as tinydns data.
pub fn render(
    records: &[Record],
    options: &OutputOptions,
) -> Result<String, Error> {
    let mut res = String::new();
    for record in records {
        render_record(record, options, &mut res)?;
    }
    Ok(res)
}

/// Appends the line for a single record to `target`.
///
/// Nothing is appended for records derived from a shortcut.
pub fn render_record(
    record: &Record,
    options: &OutputOptions,
    target: &mut String,
) -> Result<(), Error> {
    if record.provenance().is_derived() {
        trace!("skipping derived record {}", record);
        return Ok(());
    }
    if record.class() != Class::IN {
        return Err(Error::unsupported_export(format!(
            "tinydns data can’t hold {} record {}",
            record.class(),
            record.owner()
        )));
    }

    let ttl = options.ttl(record.ttl());
    let shortcut = record.provenance().shortcut();
    let mut line = Line::new(record.owner());
    match (record.data(), shortcut) {
        (ZoneRecordData::A(data), Some(Shortcut::Host)) => {
            line.code('=').addr(Some(data.addr())).ttl(ttl);
        }
        (ZoneRecordData::A(data), _) => {
            line.code('+').addr(Some(data.addr())).ttl(ttl);
        }
        (ZoneRecordData::Aaaa(data), shortcut) => {
            let code = match shortcut {
                Some(Shortcut::Host) => '6',
                _ => '3',
            };
            line.code(code)
                .field(base16::encode_display(&data.addr().octets()))
                .ttl(ttl);
        }
        (ZoneRecordData::Ns(data), shortcut) => {
            let address = match shortcut {
                Some(Shortcut::NameServer { address }) => address,
                _ => None,
            };
            line.code('&').addr(address).server(data.dname()).ttl(ttl);
        }
        (
            ZoneRecordData::Soa(data),
            Some(Shortcut::ZoneAuthority { address, ns_ttl }),
        ) => {
            line.code('.')
                .addr(address)
                .server(data.mname())
                .ttl(options.ttl(ns_ttl));
        }
        (ZoneRecordData::Soa(data), _) => {
            line.code('Z')
                .name(data.mname())
                .name(data.rname())
                .field(data.serial())
                .field(data.refresh())
                .field(data.retry())
                .field(data.expire())
                .field(data.minimum())
                .ttl(ttl);
        }
        (ZoneRecordData::Mx(data), shortcut) => {
            let address = match shortcut {
                Some(Shortcut::MailExchanger { address }) => address,
                _ => None,
            };
            line.code('@')
                .addr(address)
                .server(data.exchange())
                .field(data.preference())
                .ttl(ttl);
        }
        (ZoneRecordData::Txt(data), _) if is_native_txt(data) => {
            line.code('\'').octets(&data.text()).ttl(ttl);
        }
        (ZoneRecordData::Ptr(data), _) => {
            line.code('^').name(data.dname()).ttl(ttl);
        }
        (ZoneRecordData::Cname(data), _) => {
            line.code('C').name(data.cname()).ttl(ttl);
        }
        (ZoneRecordData::Srv(data), shortcut) => {
            let address = match shortcut {
                Some(Shortcut::Service { address }) => address,
                _ => None,
            };
            line.code('S')
                .addr(address)
                .name(data.target())
                .field(data.port())
                .field(data.priority())
                .field(data.weight())
                .ttl(ttl);
        }
        (data, _) => {
            line.code(':')
                .field(record.rtype().to_int())
                .octets(&data.to_rdata_vec())
                .ttl(ttl);
        }
    }
    line.annotations(record.timestamp(), record.location());
    target.push_str(&line.finish());
    Ok(())
}

/// Returns whether TXT data can be written as a `'` line.
///
/// This is the case if splitting the concatenated strings reproduces the
/// strings.
fn is_native_txt(data: &Txt) -> bool {
    split_octets(&data.text(), TXT_CHUNK).as_slice() == data.strings()
}

/// Returns whether a record is written as a shortcut line.
///
/// Derived records of such a record are not written.
pub fn is_shortcut_line(record: &Record) -> bool {
    matches!(
        record.provenance(),
        Provenance::Shortcut(_) | Provenance::Expanded(_)
    )
}

//------------ Line ----------------------------------------------------------

/// A tinydns line under construction.
struct Line {
    code: char,
    fields: Vec<String>,
}

impl Line {
    fn new(owner: &Name) -> Self {
        Line {
            code: ':',
            fields: vec![escape_name(owner)],
        }
    }

    fn code(&mut self, code: char) -> &mut Self {
        self.code = code;
        self
    }

    fn field(&mut self, value: impl ToString) -> &mut Self {
        self.fields.push(value.to_string());
        self
    }

    fn addr(&mut self, addr: Option<Ipv4Addr>) -> &mut Self {
        match addr {
            Some(addr) => self.field(addr),
            None => self.field(""),
        }
    }

    fn name(&mut self, name: &Name) -> &mut Self {
        self.fields.push(escape_name(name));
        self
    }

    /// Adds the name of a name server or mail exchanger.
    ///
    /// Since a name without a dot is taken as a label below the owner,
    /// single label names keep their trailing dot.
    fn server(&mut self, name: &Name) -> &mut Self {
        let mut value = escape_name(name);
        if !value.contains('.') {
            value.push('.');
        }
        self.fields.push(value);
        self
    }

    fn octets(&mut self, octets: &[u8]) -> &mut Self {
        let mut value = String::with_capacity(octets.len());
        escape_octets(octets, b"", &mut value);
        self.fields.push(value);
        self
    }

    fn ttl(&mut self, ttl: Option<Ttl>) -> &mut Self {
        match ttl {
            Some(ttl) => self.field(ttl),
            None => self.field(""),
        }
    }

    fn annotations(
        &mut self,
        timestamp: Option<&str>,
        location: Option<&str>,
    ) {
        if timestamp.is_some() || location.is_some() {
            self.octets(timestamp.unwrap_or("").as_bytes());
        }
        if let Some(location) = location {
            self.octets(location.as_bytes());
        }
    }

    /// Returns the line.
    ///
    /// Empty trailing fields are dropped as long as the line keeps the
    /// fields its code requires.
    fn finish(&self) -> String {
        let min = min_fields(self.code);
        let mut len = self.fields.len();
        while len > min && self.fields[len - 1].is_empty() {
            len -= 1;
        }
        let mut res = String::new();
        res.push(self.code);
        res.push_str(&self.fields[..len].join(":"));
        res.push('\n');
        res
    }
}

//------------ Helper Functions ----------------------------------------------

/// Returns the tinydns form of a name.
///
/// The name is written without the trailing dot.
fn escape_name(name: &Name) -> String {
    let mut res = String::new();
    for (idx, label) in name.labels().iter().enumerate() {
        if idx > 0 {
            res.push('.');
        }
        escape_octets(label, b".", &mut res);
    }
    res
}

/// Appends octets with everything but safe printable ASCII escaped.
///
/// Colons, backslashes, and everything in `special` are escaped, too.
fn escape_octets(octets: &[u8], special: &[u8], target: &mut String) {
    for &ch in octets {
        if (0x20..0x7F).contains(&ch)
            && ch != b':'
            && ch != b'\\'
            && !special.contains(&ch)
        {
            target.push(ch.into())
        } else {
            target.push_str(&format!("\\{:03o}", ch))
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::charstr::CharStr;
    use crate::error::ErrorKind;
    use crate::rdata::{Caa, Hinfo, A};
    use crate::present::Hide;
    use crate::zonefile::context::{Defaults, ZoneContext};
    use crate::zonefile::{bind, expand, tinydns};
    use core::str::FromStr;
    use rstest::rstest;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn round_trip(text: &str) -> String {
        let records =
            tinydns::parse(text, &mut ZoneContext::default()).unwrap();
        render(&records, &OutputOptions::default()).unwrap()
    }

    #[rstest]
    #[case("=host.example.com:1.2.3.4:86400\n")]
    #[case("+host.example.com:1.2.3.4:300:4000000062a1b2c3:ex\n")]
    #[case("+host.example.com:1.2.3.4:300::ex\n")]
    #[case("&example.com:192.0.2.53:ns1.example.com:3600\n")]
    #[case("&example.com::a.ns.example.com:259200\n")]
    #[case(".example.com:192.0.2.53:a.ns.example.com:259200\n")]
    #[case("@example.com::mail.example.com:10:86400\n")]
    #[case("'example.com:v=spf1\\072a -all:300\n")]
    #[case("^4.3.2.1.in-addr.arpa:host.example.com:86400\n")]
    #[case("Cwww.example.com:host.example.com:86400\n")]
    #[case("Zexample.com:ns1.example.com:hm.example.com:1:2:3:4:5:60\n")]
    #[case("6host.example.com:20010db8000000000000000000000001:86400\n")]
    #[case("3host.example.com:20010db8000000000000000000000001:86400\n")]
    #[case("S_sip._tcp.example.com::sip.example.com:5060:10:20:86400\n")]
    #[case(":example.com:65280:\\001\\002\\072:60\n")]
    fn native_lines(#[case] line: &str) {
        assert_eq!(round_trip(line), line);
    }

    #[rstest]
    #[case("p 300 IN PTR .", false, "^p.example.com::300\n")]
    #[case("p 86400 IN PTR .", true, "^p.example.com:\n")]
    #[case("c 86400 IN CNAME .", true, "Cc.example.com:\n")]
    #[case("t 300 IN TYPE65281 \\# 0", false, ":t.example.com:65281::300\n")]
    #[case("t 86400 IN TYPE65281 \\# 0", true, ":t.example.com:65281:\n")]
    #[case("@ 259200 IN NS ns1", true, "&example.com::ns1.example.com\n")]
    #[case("www 86400 IN A 192.0.2.1", true, "+www.example.com:192.0.2.1\n")]
    fn empty_trailing_fields(
        #[case] zone: &str,
        #[case] hide_ttl: bool,
        #[case] line: &str,
    ) {
        let mut context = ZoneContext::new(&Defaults {
            origin: Some(name("example.com.")),
            ..Default::default()
        });
        let records = bind::parse(zone, &mut context).unwrap();
        let options = OutputOptions {
            hide: Hide {
                ttl: hide_ttl,
                ..Default::default()
            },
            ..Default::default()
        };
        let text = render(&records, &options).unwrap();
        assert_eq!(text, line);

        // Without a TTL, tinydns falls back to its defaults.
        let parsed =
            tinydns::parse(&text, &mut ZoneContext::default()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn expanded_shortcuts_collapse() {
        let records = tinydns::parse(
            "=host.example.com:1.2.3.4:86400\n\
             .example.com:192.0.2.53:a:3600\n",
            &mut ZoneContext::default(),
        )
        .unwrap();
        let records = expand(records).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(
            render(&records, &OutputOptions::default()).unwrap(),
            "=host.example.com:1.2.3.4:86400\n\
             .example.com:192.0.2.53:a.ns.example.com:3600\n"
        );
    }

    #[test]
    fn generic_lines() {
        let hinfo = Record::from_data(
            name("example.com."),
            Class::IN,
            Some(Ttl::from_secs(60)),
            Hinfo::new(
                CharStr::from_str("PC").unwrap(),
                CharStr::from_str("OS").unwrap(),
            )
            .into(),
        );
        let caa = Record::from_data(
            name("example.com."),
            Class::IN,
            None,
            Caa::new(0, CharStr::from_str("issue").unwrap(), b"ca".to_vec())
                .unwrap()
                .into(),
        );
        assert_eq!(
            render(&[hinfo, caa], &OutputOptions::default()).unwrap(),
            ":example.com:13:\\002PC\\002OS:60\n\
             :example.com:257:\\000\\005issueca\n"
        );
    }

    #[test]
    fn txt_that_does_not_split() {
        let record = Record::from_data(
            name("example.com."),
            Class::IN,
            Some(Ttl::from_secs(60)),
            Txt::from_strings(vec![
                CharStr::from_str("a").unwrap(),
                CharStr::from_str("b").unwrap(),
            ])
            .unwrap()
            .into(),
        );
        assert_eq!(
            render(&[record], &OutputOptions::default()).unwrap(),
            ":example.com:16:\\001a\\001b:60\n"
        );
    }

    #[test]
    fn escaped_names() {
        let record = Record::from_data(
            name("a\\.b\\058c.example.com."),
            Class::IN,
            None,
            A::new(Ipv4Addr::new(192, 0, 2, 1)).into(),
        );
        assert_eq!(
            render(&[record], &OutputOptions::default()).unwrap(),
            "+a\\056b\\072c.example.com:192.0.2.1\n"
        );
    }

    #[test]
    fn other_classes_fail() {
        let record = Record::from_data(
            name("example.com."),
            Class::CH,
            None,
            A::new(Ipv4Addr::new(192, 0, 2, 1)).into(),
        );
        let err = render(&[record], &OutputOptions::default()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedExport(_)));
    }

    #[test]
    fn shortcut_lines() {
        let records = tinydns::parse(
            "=a.example.com:192.0.2.1\n+b.example.com:192.0.2.2\n",
            &mut ZoneContext::default(),
        )
        .unwrap();
        assert!(is_shortcut_line(&records[0]));
        assert!(!is_shortcut_line(&records[1]));
    }
}
