//! Converting zone data between formats.
//!
//! This module ties the parsers, the shortcut expansion, and the
//! serializers together. [`convert`] reads zone data in one of the
//! [`SourceFormat`]s, [`render`] writes records in one of the
//! [`ExportFormat`]s, and a [`Conversion`] does both in one go.

use crate::base::record::Record;
use crate::error::Error;
use crate::present::{self, OutputOptions};
use crate::zonefile::{bind, expand, tinydns, Defaults, ZoneContext};
use core::fmt;
use core::str::FromStr;
use std::path::Path;
use std::string::String;
use std::vec::Vec;
use tracing::{debug, warn};

//------------ SourceFormat --------------------------------------------------

/// The formats zone data can be read from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SourceFormat {
    /// A BIND master file.
    #[default]
    Bind,

    /// Tinydns data.
    Tinydns,
}

impl SourceFormat {
    /// Determines the format of a file from its path.
    ///
    /// Tinydns always keeps its data in a file named `data`. Everything
    /// else is taken to be a master file.
    pub fn detect(path: impl AsRef<Path>) -> Self {
        match path.as_ref().file_name() {
            Some(name) if name == "data" => SourceFormat::Tinydns,
            _ => SourceFormat::Bind,
        }
    }
}

//------------ ExportFormat --------------------------------------------------

/// The formats zone data can be written in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExportFormat {
    /// A pretty-printed JSON array including comments.
    #[default]
    Js,

    /// JSON with one object per line.
    Json,

    /// A BIND master file.
    Bind,

    /// Tinydns data.
    Tinydns,
}

impl ExportFormat {
    /// Returns the format for a name, falling back to [`ExportFormat::Js`].
    ///
    /// A warning is logged for unknown names.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnknownExportFormat| {
            warn!("{}, writing structure dump instead", err);
            ExportFormat::Js
        })
    }

    /// Returns the name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Js => "js",
            ExportFormat::Json => "json",
            ExportFormat::Bind => "bind",
            ExportFormat::Tinydns => "tinydns",
        }
    }
}

//--- FromStr and Display

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ExportFormat::Js,
            ExportFormat::Json,
            ExportFormat::Bind,
            ExportFormat::Tinydns,
        ]
        .into_iter()
        .find(|format| format.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| UnknownExportFormat(s.into()))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//------------ convert -------------------------------------------------------

/// Parses zone data.
///
/// If BIND data doesn’t set an origin through an `$ORIGIN` directive, the
/// origin from `defaults` is used from the start. If it does, names before
/// the first directive need to be absolute.
///
/// Shortcuts in tinydns data are not expanded.
pub fn convert(
    text: &str,
    format: SourceFormat,
    defaults: &Defaults,
) -> Result<Vec<Record>, Error> {
    match format {
        SourceFormat::Bind => {
            let mut context = if has_origin_directive(text) {
                ZoneContext::new(&defaults.clone().with_origin(None))
            } else {
                ZoneContext::new(defaults)
            };
            bind::parse(text, &mut context)
        }
        SourceFormat::Tinydns => {
            tinydns::parse(text, &mut ZoneContext::new(defaults))
        }
    }
}

/// Returns whether a master file contains an `$ORIGIN` directive.
fn has_origin_directive(text: &str) -> bool {
    text.lines().any(|line| {
        line.split(|ch: char| ch.is_whitespace() || ch == ';')
            .next()
            .map_or(false, |word| word.eq_ignore_ascii_case("$ORIGIN"))
    })
}

//------------ render --------------------------------------------------------

/// Writes records in the given format.
pub fn render(
    records: &[Record],
    format: ExportFormat,
    options: &OutputOptions,
) -> Result<String, Error> {
    match format {
        ExportFormat::Js => present::json::render_js(records, options),
        ExportFormat::Json => present::json::render_json(records, options),
        ExportFormat::Bind => Ok(present::bind::render(records, options)),
        ExportFormat::Tinydns => present::tinydns::render(records, options),
    }
}

//------------ Conversion ----------------------------------------------------

/// A complete conversion from one format into another.
#[derive(Clone, Debug, Default)]
pub struct Conversion {
    /// The format of the input.
    pub source: SourceFormat,

    /// The format of the output.
    pub export: ExportFormat,

    /// The defaults for parsing.
    pub defaults: Defaults,

    /// The options for writing.
    pub options: OutputOptions,
}

impl Conversion {
    /// Converts `text`.
    ///
    /// Shortcuts are expanded unless tinydns data is written as tinydns
    /// data again.
    pub fn run(&self, text: &str) -> Result<String, Error> {
        let records = convert(text, self.source, &self.defaults)?;
        debug!("read {} records", records.len());
        let records = if self.source == SourceFormat::Tinydns
            && self.export == ExportFormat::Tinydns
        {
            records
        } else {
            expand(records)?
        };
        render(&records, self.export, &self.options)
    }
}

//------------ UnknownExportFormat -------------------------------------------

/// The name of an export format wasn’t recognized.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownExportFormat(String);

impl fmt::Display for UnknownExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown export format '{}'", self.0)
    }
}

impl std::error::Error for UnknownExportFormat {}

//============ Testing =======================================================
