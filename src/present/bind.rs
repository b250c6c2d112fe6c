//! Writing BIND master files.
//!
//! Each record is written as a single line with tab-separated fields:
//! owner, TTL, class, type, and record data, followed by the record’s
//! comment if it has one.

use super::OutputOptions;
use crate::base::record::Record;
use crate::base::zonefile_fmt::ZonefileFmt;
use std::string::{String, ToString};
use std::vec::Vec;

/// Renders records as master file lines.
pub fn render(records: &[Record], options: &OutputOptions) -> String {
    let mut res = String::new();
    for record in records {
        render_record(record, options, &mut res);
    }
    res
}

/// Appends the line for a single record to `target`.
pub fn render_record(
    record: &Record,
    options: &OutputOptions,
    target: &mut String,
) {
    let origin = options.relative_origin();
    let mut fields = Vec::with_capacity(6);

    fields.push(match origin.and_then(|origin| record.relative_owner(origin)) {
        Some(owner) => owner.to_string(),
        None => record.owner().to_string(),
    });
    if let Some(ttl) = options.ttl(record.ttl()) {
        fields.push(ttl.to_string())
    }
    if !options.hide.class {
        fields.push(record.class().to_string())
    }
    fields.push(record.rtype().to_string());
    fields.push(match origin {
        Some(origin) => record.data().display_relative(origin).to_string(),
        None => record.data().display_zonefile().to_string(),
    });
    if let Some(comment) = record.comment() {
        fields.push(format!("; {}", comment))
    }

    target.push_str(&fields.join("\t"));
    target.push('\n');
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Class;
    use crate::base::name::Name;
    use crate::base::record::Ttl;
    use crate::present::Hide;
    use crate::rdata::{Mx, Txt, A};
    use core::str::FromStr;
    use std::net::Ipv4Addr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn records() -> Vec<Record> {
        vec![
            Record::from_data(
                name("www.example.com."),
                Class::IN,
                Some(Ttl::from_secs(300)),
                A::new(Ipv4Addr::new(192, 0, 2, 1)).into(),
            )
            .with_comment(Some("web server".into())),
            Record::from_data(
                name("example.com."),
                Class::IN,
                None,
                Mx::new(10, name("mail.example.com.")).into(),
            ),
            Record::from_data(
                name("example.com."),
                Class::IN,
                Some(Ttl::from_secs(60)),
                Txt::from_strings(vec![
                    "v=spf1 -all".parse().unwrap(),
                    "two".parse().unwrap(),
                ])
                .unwrap()
                .into(),
            ),
        ]
    }

    #[test]
    fn absolute() {
        assert_eq!(
            render(&records(), &OutputOptions::default()),
            "www.example.com.\t300\tIN\tA\t192.0.2.1\t; web server\n\
             example.com.\tIN\tMX\t10 mail.example.com.\n\
             example.com.\t60\tIN\tTXT\t\"v=spf1 -all\" \"two\"\n"
        );
    }

    #[test]
    fn hidden() {
        let options = OutputOptions {
            origin: Some(name("example.com.")),
            ttl: Some(Ttl::from_secs(3600)),
            class: Class::IN,
            hide: Hide {
                origin: true,
                class: true,
                ttl: false,
            },
        };
        assert_eq!(
            render(&records(), &options),
            "www\t300\tA\t192.0.2.1\t; web server\n\
             @\t3600\tMX\t10 mail\n\
             @\t60\tTXT\t\"v=spf1 -all\" \"two\"\n"
        );

        let options = OutputOptions {
            hide: Hide {
                origin: false,
                class: false,
                ttl: true,
            },
            ..options
        };
        assert_eq!(
            render(&records()[..1], &options),
            "www.example.com.\tIN\tA\t192.0.2.1\t; web server\n"
        );
    }
}
