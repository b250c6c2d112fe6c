//! Expanding tinydns shortcuts.
//!
//! A record marked as a [`Shortcut`] stands for itself plus a number of
//! implied records. The function [`expand`] adds these implied records
//! right after the shortcut and marks the shortcut as expanded. Running it
//! again doesn’t change anything.

use crate::base::iana::Class;
use crate::base::name::Name;
use crate::base::rdata::RecordData;
use crate::base::record::{Provenance, Record, Shortcut, Ttl};
use crate::error::Error;
use crate::rdata::{Ns, Ptr, ZoneRecordData, A};
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::vec::Vec;
use tracing::debug;

//------------ expand --------------------------------------------------------

/// Replaces shortcut records with the records they stand for.
///
/// Each shortcut record is kept in place and followed by the records it
/// implies. An implied record is dropped if a record with the same owner,
/// class, and data is present already, whether it came before or after
/// the shortcut.
///
/// Fails if a shortcut can’t be expanded, for instance because a host
/// shortcut’s record is neither an A nor an AAAA record.
pub fn expand(records: Vec<Record>) -> Result<Vec<Record>, Error> {
    let mut seen: HashSet<(Name, Class, ZoneRecordData)> = records
        .iter()
        .map(|record| {
            (record.owner().clone(), record.class(), record.data().clone())
        })
        .collect();
    let mut res = Vec::with_capacity(records.len());
    let mut expanded = 0;
    for mut record in records {
        let shortcut = match record.provenance() {
            Provenance::Shortcut(shortcut) => shortcut,
            _ => {
                res.push(record);
                continue;
            }
        };
        let derived = derive(&record, shortcut)?;
        record.set_provenance(Provenance::Expanded(shortcut));
        res.push(record);
        for item in derived {
            if seen.insert((
                item.owner().clone(),
                item.class(),
                item.data().clone(),
            )) {
                res.push(item)
            }
        }
        expanded += 1;
    }
    if expanded > 0 {
        debug!("expanded {} shortcuts into {} records", expanded, res.len());
    }
    Ok(res)
}

/// Returns the records implied by a shortcut record.
fn derive(record: &Record, shortcut: Shortcut) -> Result<Vec<Record>, Error> {
    let mut res = Vec::new();
    match (shortcut, record.data()) {
        (Shortcut::Host, ZoneRecordData::A(data)) => {
            res.push(record.derive(
                Name::reverse_v4(data.addr()),
                record.ttl(),
                Ptr::new(record.owner().clone()).into(),
                shortcut,
            ));
        }
        (Shortcut::Host, ZoneRecordData::Aaaa(data)) => {
            res.push(record.derive(
                Name::reverse_v6(data.addr()),
                record.ttl(),
                Ptr::new(record.owner().clone()).into(),
                shortcut,
            ));
        }
        (Shortcut::NameServer { address }, ZoneRecordData::Ns(data)) => {
            push_address(
                &mut res,
                record,
                data.dname(),
                address,
                None,
                shortcut,
            );
        }
        (Shortcut::MailExchanger { address }, ZoneRecordData::Mx(data)) => {
            push_address(
                &mut res,
                record,
                data.exchange(),
                address,
                None,
                shortcut,
            );
        }
        (Shortcut::Service { address }, ZoneRecordData::Srv(data)) => {
            push_address(
                &mut res,
                record,
                data.target(),
                address,
                None,
                shortcut,
            );
        }
        (
            Shortcut::ZoneAuthority { address, ns_ttl },
            ZoneRecordData::Soa(data),
        ) => {
            let ttl = ns_ttl.or(record.ttl());
            res.push(record.derive(
                record.owner().clone(),
                ttl,
                Ns::new(data.mname().clone()).into(),
                shortcut,
            ));
            push_address(
                &mut res,
                record,
                data.mname(),
                address,
                ttl,
                shortcut,
            );
        }
        (Shortcut::Authority, ZoneRecordData::Soa(data)) => {
            res.push(record.derive(
                record.owner().clone(),
                record.ttl(),
                Ns::new(data.mname().clone()).into(),
                shortcut,
            ));
        }
        (shortcut, data) => {
            return Err(Error::ambiguous_shortcut(format!(
                "cannot expand {:?} shortcut for {} record {}",
                shortcut,
                data.rtype(),
                record.owner()
            )));
        }
    }
    Ok(res)
}

/// Adds an A record for `owner` if an address is given.
///
/// Without an explicit TTL, the primary record’s TTL is used.
fn push_address(
    res: &mut Vec<Record>,
    record: &Record,
    owner: &Name,
    address: Option<Ipv4Addr>,
    ttl: Option<Ttl>,
    shortcut: Shortcut,
) {
    if let Some(addr) = address {
        res.push(record.derive(
            owner.clone(),
            ttl.or(record.ttl()),
            A::new(addr).into(),
            shortcut,
        ))
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::error::ErrorKind;
    use crate::rdata::{Mx, Soa};
    use crate::zonefile::context::ZoneContext;
    use crate::zonefile::tinydns;
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn tinydns(text: &str) -> Vec<Record> {
        tinydns::parse(text, &mut ZoneContext::default()).unwrap()
    }

    #[test]
    fn host_with_reverse_pointer() {
        let records =
            expand(tinydns("=host.example.com:1.2.3.4:86400")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rtype(), Rtype::A);
        assert_eq!(
            records[0].provenance(),
            Provenance::Expanded(Shortcut::Host)
        );
        assert_eq!(records[1].owner(), &name("4.3.2.1.in-addr.arpa."));
        assert_eq!(records[1].ttl(), Some(Ttl::from_secs(86400)));
        assert_eq!(
            records[1].data(),
            &ZoneRecordData::Ptr(Ptr::new(name("host.example.com.")))
        );
        assert!(records[1].provenance().is_derived());
    }

    #[test]
    fn ipv6_host() {
        let records = expand(tinydns(
            "6host.example.com:20010db8000000000000000000000001:300",
        ))
        .unwrap();
        assert_eq!(
            records[1].owner(),
            &name(
                "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.\
                 0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa."
            )
        );
    }

    #[test]
    fn mail_exchanger() {
        let records =
            expand(tinydns("@example.com:192.0.2.25:mail.example.com:10"))
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].owner(), &name("mail.example.com."));
        assert_eq!(
            records[1].data(),
            &ZoneRecordData::A(A::new(Ipv4Addr::new(192, 0, 2, 25)))
        );

        let records =
            expand(tinydns("@example.com::mail.example.com:10")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].data(),
            &ZoneRecordData::Mx(Mx::new(10, name("mail.example.com.")))
        );
    }

    #[test]
    fn zone_authority() {
        let records =
            expand(tinydns(".example.com:192.0.2.53:a:3600")).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].rtype(), Rtype::SOA);
        assert_eq!(
            records[1].data(),
            &ZoneRecordData::Ns(Ns::new(name("a.ns.example.com.")))
        );
        assert_eq!(records[1].ttl(), Some(Ttl::from_secs(3600)));
        assert_eq!(records[2].owner(), &name("a.ns.example.com."));
        assert_eq!(records[2].ttl(), Some(Ttl::from_secs(3600)));
    }

    #[test]
    fn authority() {
        let records = expand(tinydns(
            "Zexample.com:ns1.example.com:hostmaster.example.com",
        ))
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].owner(), &name("example.com."));
        assert_eq!(
            records[1].data(),
            &ZoneRecordData::Ns(Ns::new(name("ns1.example.com.")))
        );
    }

    #[test]
    fn derived_records_are_deduplicated() {
        let records = expand(tinydns(
            "=a.example.com:192.0.2.1\n\
             =b.example.com:192.0.2.2\n\
             ^1.2.0.192.in-addr.arpa:a.example.com\n\
             &example.com:192.0.2.53:ns1.example.com\n\
             &example.net:192.0.2.53:ns1.example.com\n",
        ))
        .unwrap();
        let ptrs = records
            .iter()
            .filter(|record| record.rtype() == Rtype::PTR)
            .count();
        assert_eq!(ptrs, 2);
        let addrs = records
            .iter()
            .filter(|record| record.owner() == &name("ns1.example.com."))
            .count();
        assert_eq!(addrs, 1);
    }

    #[test]
    fn expansion_is_idempotent() {
        let once = expand(tinydns(
            ".example.com:192.0.2.53:a\n\
             =www.example.com:192.0.2.80\n\
             @example.com:192.0.2.25:mail.example.com\n",
        ))
        .unwrap();
        assert!(once.iter().all(|record| !matches!(
            record.provenance(),
            Provenance::Shortcut(_)
        )));
        let twice = expand(once.clone()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(
            once.iter().map(Record::provenance).collect::<Vec<_>>(),
            twice.iter().map(Record::provenance).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn mismatched_shortcut() {
        let record = Record::from_data(
            name("example.com."),
            Class::IN,
            None,
            Soa::new(
                name("ns.example.com."),
                name("hm.example.com."),
                1,
                2,
                3,
                4,
                5,
            )
            .into(),
        )
        .with_shortcut(Shortcut::Host);
        let err = expand(vec![record]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::AmbiguousShortcut(_)));
    }
}
