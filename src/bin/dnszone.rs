//! Converts DNS zone data between BIND, tinydns, and JSON.

use clap::Parser;
use dnszone::base::{Class, Name, Ttl};
use dnszone::convert::{Conversion, ExportFormat, SourceFormat};
use dnszone::logging::init_logging;
use dnszone::present::{Hide, OutputOptions};
use dnszone::zonefile::Defaults;
use std::io::Read;
use std::path::Path;
use std::{fs, io, process};
use tracing::debug;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to read, or "stdin".
    ///
    /// A file named "data" is read as tinydns data, anything else as a
    /// BIND master file.
    #[arg(
        short = 'i',
        long = "input",
        visible_alias = "import",
        default_value = "stdin"
    )]
    input: String,

    /// The output format: js, json, bind, or tinydns.
    #[arg(short = 'e', long = "export", default_value = "js")]
    export: String,

    /// The origin of the zone.
    ///
    /// Defaults to the name of the input file for master files.
    #[arg(short = 'o', long = "origin")]
    origin: Option<Name>,

    /// The default TTL.
    #[arg(short = 't', long = "ttl")]
    ttl: Option<Ttl>,

    /// The class of the zone.
    #[arg(short = 'c', long = "class", default_value = "IN")]
    class: Class,

    /// Write names relative to the origin.
    #[arg(long = "hide-origin")]
    hide_origin: bool,

    /// Leave out the class.
    #[arg(long = "hide-class")]
    hide_class: bool,

    /// Leave out TTLs.
    #[arg(long = "hide-ttl")]
    hide_ttl: bool,

    /// Log what is going on.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn input_path(&self) -> Option<&Path> {
        if self.input == "stdin" {
            None
        } else {
            Some(Path::new(&self.input))
        }
    }

    fn source(&self) -> SourceFormat {
        match self.input_path() {
            Some(path) => SourceFormat::detect(path),
            None => SourceFormat::Bind,
        }
    }

    /// Returns the origin, falling back to the input file’s name.
    fn origin(&self) -> Option<Name> {
        let origin = match self.origin {
            Some(ref origin) => origin.clone(),
            None if self.source() == SourceFormat::Bind => {
                self.input_path()?.file_name()?.to_str()?.parse().ok()?
            }
            None => return None,
        };
        origin.qualify(&Name::root()).ok()
    }

    fn conversion(&self) -> Conversion {
        let origin = self.origin();
        Conversion {
            source: self.source(),
            export: ExportFormat::from_name(&self.export),
            defaults: Defaults {
                origin: origin.clone(),
                ttl: self.ttl,
                class: self.class,
                serial: None,
            },
            options: OutputOptions {
                origin,
                ttl: self.ttl,
                class: self.class,
                hide: Hide {
                    origin: self.hide_origin,
                    class: self.hide_class,
                    ttl: self.hide_ttl,
                },
            },
        }
    }

    fn read_input(&self) -> Result<String, io::Error> {
        match self.input_path() {
            Some(path) => fs::read_to_string(path),
            None => {
                let mut res = String::new();
                io::stdin().read_to_string(&mut res)?;
                Ok(res)
            }
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let conversion = args.conversion();
    debug!(
        "converting {:?} data to {}",
        conversion.source, conversion.export
    );

    let text = match args.read_input() {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Failed to read {}: {}", args.input, err);
            process::exit(1);
        }
    };
    match conversion.run(&text) {
        Ok(output) => print!("{}", output),
        Err(err) => {
            eprintln!("{}: {}", args.input, err);
            process::exit(1);
        }
    }
}

//============ Testing =======================================================
