use dnszone::base::{Class, Name, Provenance, Rtype, Ttl};
use dnszone::convert::{
    convert, render, Conversion, ExportFormat, SourceFormat,
};
use dnszone::present::{Hide, OutputOptions};
use dnszone::rdata::{Ptr, ZoneRecordData, A};
use dnszone::zonefile::{expand, Defaults};
use dnszone::ErrorKind;
use serde_json::{json, Value};
use std::net::Ipv4Addr;
use std::str::FromStr;

const ZONE: &str = r#"$ORIGIN example.com.
$TTL 3600
@       IN SOA  ns1 hostmaster (
                2024010101 ; serial
                7200 3600 1209600 300 )
        IN NS   ns1
        IN NS   ns2.example.net.
        IN MX   10 mail
@       IN TXT  "v=spf1 mx -all" "second string"
@       IN CAA  0 issue "letsencrypt.org"
ns1     300 IN A 192.0.2.53
mail    IN A    192.0.2.25
        IN AAAA 2001:db8::25
www     IN CNAME mail ; the web server
_sip._tcp IN SRV 10 20 5060 sip
sip     IN HINFO "PC" "Linux"
old     IN DNAME example.net.
        IN TYPE65280 \# 3 abcdef
"#;

fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

fn defaults(origin: &str) -> Defaults {
    Defaults {
        origin: Some(name(origin)),
        ..Default::default()
    }
}

#[test]
fn single_absolute_record() {
    let records = convert(
        "example.com. 300 IN A 1.2.3.4",
        SourceFormat::Bind,
        &defaults("example.com."),
    )
    .unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.owner(), &name("example.com."));
    assert_eq!(record.ttl(), Some(Ttl::from_secs(300)));
    assert_eq!(record.class(), Class::IN);
    assert_eq!(record.rtype(), Rtype::A);

    let json = render(&records, ExportFormat::Json, &Default::default())
        .unwrap();
    let value: Value = serde_json::from_str(json.trim_end()).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "example.com.",
            "class": "IN",
            "ttl": 300,
            "type": "A",
            "address": "1.2.3.4",
        })
    );
}

#[test]
fn host_shortcut_expands() {
    let records = convert(
        "=host.example.com:1.2.3.4:86400",
        SourceFormat::Tinydns,
        &Defaults::default(),
    )
    .unwrap();
    let records = expand(records).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].owner(), &name("host.example.com."));
    assert_eq!(records[0].ttl(), Some(Ttl::from_secs(86400)));
    assert_eq!(
        records[0].data(),
        &ZoneRecordData::A(A::new(Ipv4Addr::new(1, 2, 3, 4)))
    );
    assert_eq!(records[1].owner(), &name("4.3.2.1.in-addr.arpa."));
    assert_eq!(records[1].ttl(), Some(Ttl::from_secs(86400)));
    assert_eq!(
        records[1].data(),
        &ZoneRecordData::Ptr(Ptr::new(name("host.example.com.")))
    );
}

#[test]
fn missing_origin_directive_uses_default() {
    let records = convert(
        "www 60 IN A 192.0.2.1\nmail 60 IN MX 10 www\n",
        SourceFormat::Bind,
        &defaults("zones.test."),
    )
    .unwrap();
    assert_eq!(records[0].owner(), &name("www.zones.test."));
    assert_eq!(records[1].owner(), &name("mail.zones.test."));
}

#[test]
fn json_drops_comments() {
    let conversion = Conversion {
        export: ExportFormat::Json,
        defaults: defaults("example.com."),
        ..Default::default()
    };
    let output = conversion.run("www 60 IN A 192.0.2.1 ; web\n").unwrap();
    assert!(!output.contains("comment"));
    assert!(!output.contains("web"));

    let conversion = Conversion {
        export: ExportFormat::Js,
        ..conversion
    };
    let output = conversion.run("www 60 IN A 192.0.2.1 ; web\n").unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value[0]["comment"], json!("web"));
}

#[test]
fn bind_round_trip() {
    let records =
        convert(ZONE, SourceFormat::Bind, &Defaults::default()).unwrap();
    assert_eq!(records.len(), 14);

    let text =
        render(&records, ExportFormat::Bind, &Default::default()).unwrap();
    let again =
        convert(&text, SourceFormat::Bind, &Defaults::default()).unwrap();
    assert_eq!(records, again);
    assert_eq!(
        records.iter().map(|r| r.comment()).collect::<Vec<_>>(),
        again.iter().map(|r| r.comment()).collect::<Vec<_>>()
    );
}

#[test]
fn bind_round_trip_relative() {
    let records =
        convert(ZONE, SourceFormat::Bind, &Defaults::default()).unwrap();
    let options = OutputOptions {
        origin: Some(name("example.com.")),
        hide: Hide {
            origin: true,
            class: true,
            ttl: false,
        },
        ..Default::default()
    };
    let text = render(&records, ExportFormat::Bind, &options).unwrap();
    assert!(text.starts_with("@\t3600\tSOA\tns1 hostmaster 2024010101"));
    let again =
        convert(&text, SourceFormat::Bind, &defaults("example.com."))
            .unwrap();
    assert_eq!(records, again);
}

#[test]
fn expansion_is_idempotent() {
    let records = convert(
        ".example.com:192.0.2.53:a:259200\n\
         =www.example.com:192.0.2.80\n\
         6www.example.com:20010db8000000000000000000000080\n\
         &example.com:192.0.2.54:b\n\
         @example.com:192.0.2.25:mail\n",
        SourceFormat::Tinydns,
        &Defaults::default(),
    )
    .unwrap();
    let once = expand(records).unwrap();
    let twice = expand(once.clone()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn default_inheritance() {
    let records = convert(
        "$ORIGIN example.com.\n$TTL 3600\nwww A 192.0.2.1\n",
        SourceFormat::Bind,
        &Defaults::default(),
    )
    .unwrap();
    assert_eq!(records[0].ttl(), Some(Ttl::from_secs(3600)));
    assert_eq!(records[0].class(), Class::IN);
}

#[test]
fn txt_without_strings() {
    let err = convert(
        "example.com. 60 IN TXT\n",
        SourceFormat::Bind,
        &Defaults::default(),
    )
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidRecordData(_)));
    assert_eq!(err.line(), Some(1));
}

#[test]
fn unknown_type_mnemonic() {
    let err = convert(
        "\n\nexample.com. 60 IN BOGUS 1.2.3.4\n",
        SourceFormat::Bind,
        &Defaults::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownRecordType("BOGUS".into()));
    assert_eq!(err.line(), Some(3));
}

#[test]
fn ipv6_reverse_pointer() {
    let records = convert(
        "6host.example.com:20010db8000000000000000000000001:300",
        SourceFormat::Tinydns,
        &Defaults::default(),
    )
    .unwrap();
    let records = expand(records).unwrap();
    assert_eq!(
        records[1].owner(),
        &name(
            "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.\
             0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa."
        )
    );
    assert_eq!(records[1].rtype(), Rtype::PTR);
}

#[test]
fn generic_lines_through_wire_format() {
    let conversion = Conversion {
        source: SourceFormat::Tinydns,
        export: ExportFormat::Tinydns,
        ..Default::default()
    };
    let text = ":example.com:13:\\002PC\\005Linux:60\n";
    assert_eq!(conversion.run(text).unwrap(), text);

    let conversion = Conversion {
        export: ExportFormat::Bind,
        ..conversion
    };
    assert_eq!(
        conversion.run(text).unwrap(),
        "example.com.\t60\tIN\tHINFO\t\"PC\" \"Linux\"\n"
    );
}

#[test]
fn unknown_export_format_falls_back() {
    let conversion = Conversion {
        export: ExportFormat::from_name("xml"),
        defaults: defaults("example.com."),
        ..Default::default()
    };
    let output = conversion.run("www 60 IN A 192.0.2.1\n").unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["name"], json!("www.example.com."));
}

#[test]
fn derived_records_skipped_on_tinydns_export() {
    let records = convert(
        "=www.example.com:192.0.2.80:300\n\
         @example.com:192.0.2.25:mail.example.com:10:300\n",
        SourceFormat::Tinydns,
        &Defaults::default(),
    )
    .unwrap();
    let records = expand(records).unwrap();
    assert_eq!(records.len(), 4);
    assert!(records[1].provenance().is_derived());
    assert_eq!(
        records[0].provenance(),
        Provenance::Expanded(dnszone::base::Shortcut::Host)
    );
    assert_eq!(
        render(&records, ExportFormat::Tinydns, &Default::default())
            .unwrap(),
        "=www.example.com:192.0.2.80:300\n\
         @example.com:192.0.2.25:mail.example.com:10:300\n"
    );
}

#[test]
fn bind_to_tinydns() {
    let conversion = Conversion {
        export: ExportFormat::Tinydns,
        ..Default::default()
    };
    let output = conversion
        .run(
            "$ORIGIN example.com.\n\
             @ 3600 IN NS ns1\n\
             www 300 IN A 192.0.2.1\n\
             www 300 IN TXT \"hello world\"\n",
        )
        .unwrap();
    assert_eq!(
        output,
        "&example.com::ns1.example.com:3600\n\
         +www.example.com:192.0.2.1:300\n\
         'www.example.com:hello world:300\n"
    );

    let conversion = Conversion {
        export: ExportFormat::Tinydns,
        ..Default::default()
    };
    let err = conversion
        .run("example.com. 60 CH TXT \"x\"\n")
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedExport(_)));
}
