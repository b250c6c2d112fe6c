//! Conversion of DNS zone data.
//!
//! This crate reads DNS zone data in one of two formats, the master file
//! format used by BIND and most other name servers and the data format of
//! djbdns’s tinydns, and writes it in one of these formats or as JSON.
//!
//! # Modules
//!
//! * [base] contains the fundamental types: domain names, character
//!   strings, record types and classes, and the [`Record`] itself,
//! * [rdata] contains the record data types for the supported record
//!   types,
//! * [zonefile] contains the parsers for both input formats as well as the
//!   expansion of tinydns shortcuts into plain records,
//! * [present] contains the serializers for the output formats, and
//! * [convert] ties all of these together.
//!
#![cfg_attr(feature = "cli", doc = "* [logging]:")]
#![cfg_attr(not(feature = "cli"), doc = "* logging:")]
//!   Logging setup for the command line tool.
//!
//! # Example
//!
//! ```
//! use dnszone::convert::{Conversion, ExportFormat, SourceFormat};
//!
//! let conversion = Conversion {
//!     source: SourceFormat::Tinydns,
//!     export: ExportFormat::Bind,
//!     ..Default::default()
//! };
//! let zone = conversion.run("+www.example.com:192.0.2.1:300\n").unwrap();
//! assert_eq!(zone, "www.example.com.\t300\tIN\tA\t192.0.2.1\n");
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `cli`: Builds the `dnszone` command line tool and enables the
#![cfg_attr(feature = "cli", doc = "  [logging]")]
#![cfg_attr(not(feature = "cli"), doc = "  logging")]
//!   module. This adds the [clap](https://github.com/clap-rs/clap) and
//!   [tracing-subscriber](https://github.com/tokio-rs/tracing) crates as
//!   dependencies. This feature is enabled by default.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use self::base::record::Record;
pub use self::convert::{convert, render, Conversion};
pub use self::error::{Error, ErrorKind};
pub use self::zonefile::expand;

pub mod base;
pub mod convert;
pub mod error;
#[cfg(feature = "cli")]
#[cfg_attr(docsrs, doc(cfg(feature = "cli")))]
pub mod logging;
pub mod present;
pub mod rdata;
pub mod utils;
pub mod zonefile;
