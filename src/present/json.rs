//! Writing records as JSON.
//!
//! Each record becomes a flat object with its owner under `name`, the
//! class, the TTL if known, the record type under `type`, and the fields
//! of the record data. Tinydns timestamps and locations are added if
//! present.

use super::OutputOptions;
use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::record::{Record, Ttl};
use crate::error::Error;
use crate::rdata::ZoneRecordData;
use serde::Serialize;
use std::string::String;
use std::vec::Vec;

//------------ render_json ---------------------------------------------------

/// Renders records as JSON with one object per line.
///
/// Comments are left out.
pub fn render_json(
    records: &[Record],
    options: &OutputOptions,
) -> Result<String, Error> {
    let mut res = String::new();
    for record in records {
        let item = JsonRecord::new(record, options, false);
        res.push_str(&serde_json::to_string(&item).map_err(json_error)?);
        res.push('\n');
    }
    Ok(res)
}

//------------ render_js -----------------------------------------------------

/// Renders records as a pretty-printed JSON array.
///
/// This is the structure dump used when no other format was asked for.
/// Unlike [`render_json`], it keeps the comments.
pub fn render_js(
    records: &[Record],
    options: &OutputOptions,
) -> Result<String, Error> {
    let items: Vec<_> = records
        .iter()
        .map(|record| JsonRecord::new(record, options, true))
        .collect();
    let mut res = serde_json::to_string_pretty(&items).map_err(json_error)?;
    res.push('\n');
    Ok(res)
}

fn json_error(err: serde_json::Error) -> Error {
    Error::unsupported_export(format!("cannot write JSON: {}", err))
}

//------------ JsonRecord ----------------------------------------------------

/// The JSON form of a record.
#[derive(Serialize)]
struct JsonRecord<'a> {
    name: &'a Name,
    class: Class,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<Ttl>,
    #[serde(rename = "type")]
    rtype: Rtype,
    #[serde(flatten)]
    data: &'a ZoneRecordData,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

impl<'a> JsonRecord<'a> {
    fn new(
        record: &'a Record,
        options: &OutputOptions,
        with_comment: bool,
    ) -> Self {
        JsonRecord {
            name: record.owner(),
            class: record.class(),
            ttl: record.ttl().or(options.ttl),
            rtype: record.rtype(),
            data: record.data(),
            timestamp: record.timestamp(),
            location: record.location(),
            comment: if with_comment { record.comment() } else { None },
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::rdata::{Mx, A};
    use core::str::FromStr;
    use serde_json::{json, Value};
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
            .with_comment(Some("web".into())),
            Record::from_data(
                name("example.com."),
                Class::IN,
                None,
                Mx::new(10, name("mail.example.com.")).into(),
            )
            .with_annotations(Some("4000000062a1b2c3".into()), None),
        ]
    }

    #[test]
    fn json_lines() {
        let text = render_json(&records(), &OutputOptions::default()).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![
                json!({
                    "name": "www.example.com.",
                    "class": "IN",
                    "ttl": 300,
                    "type": "A",
                    "address": "192.0.2.1",
                }),
                json!({
                    "name": "example.com.",
                    "class": "IN",
                    "type": "MX",
                    "preference": 10,
                    "exchange": "mail.example.com.",
                    "timestamp": "4000000062a1b2c3",
                }),
            ]
        );
    }

    #[test]
    fn structure_dump() {
        let options = OutputOptions {
            ttl: Some(Ttl::from_secs(3600)),
            ..Default::default()
        };
        let text = render_js(&records(), &options).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["comment"], json!("web"));
        assert_eq!(value[1]["ttl"], json!(3600));
        assert!(text.starts_with("[\n"));
    }
}
