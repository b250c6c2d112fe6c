use super::name::Name;
use core::fmt;

#[derive(Clone, Copy, Debug)]
pub struct Error;

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Self
    }
}

pub type Result = core::result::Result<(), Error>;

pub struct ZoneFileDisplay<'a, T: ?Sized> {
    inner: &'a T,
    origin: Option<&'a Name>,
}

impl<T: ZonefileFmt + ?Sized> fmt::Display for ZoneFileDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner
            .fmt(&mut SimpleWriter::new(f, self.origin))
            .map_err(|_| fmt::Error)
    }
}

/// Show a value as zonefile format
pub trait ZonefileFmt {
    fn fmt(&self, p: &mut impl Formatter) -> Result;

    /// Displays the value with all names absolute.
    fn display_zonefile(&self) -> ZoneFileDisplay<'_, Self> {
        ZoneFileDisplay {
            inner: self,
            origin: None,
        }
    }

    /// Displays the value with names at or below `origin` relative to it.
    fn display_relative<'a>(
        &'a self,
        origin: &'a Name,
    ) -> ZoneFileDisplay<'a, Self> {
        ZoneFileDisplay {
            inner: self,
            origin: Some(origin),
        }
    }
}

impl<T: ZonefileFmt> ZonefileFmt for &T {
    fn fmt(&self, p: &mut impl Formatter) -> Result {
        T::fmt(self, p)
    }
}

/// Determines how a zonefile is formatted
pub trait FormatWriter: Sized {
    /// Push a token to the zonefile
    fn fmt_token(&mut self, args: fmt::Arguments<'_>) -> Result;

    /// Returns the origin names should be written relative to, if any.
    fn origin(&self) -> Option<&Name>;
}

/// The simplest possible zonefile writer
///
/// This writer does not do any alignment and squeezes all tokens onto a
/// single line separated by spaces.
struct SimpleWriter<'a, W> {
    first: bool,
    origin: Option<&'a Name>,
    writer: W,
}

impl<'a, W: fmt::Write> SimpleWriter<'a, W> {
    fn new(writer: W, origin: Option<&'a Name>) -> Self {
        Self {
            first: true,
            origin,
            writer,
        }
    }
}

impl<W: fmt::Write> FormatWriter for SimpleWriter<'_, W> {
    fn fmt_token(&mut self, args: fmt::Arguments<'_>) -> Result {
        if !self.first {
            self.writer.write_char(' ')?;
        }
        self.first = false;
        self.writer.write_fmt(args)?;
        Ok(())
    }

    fn origin(&self) -> Option<&Name> {
        self.origin
    }
}

/// A more structured wrapper around a [`FormatWriter`]
pub trait Formatter: FormatWriter {
    /// Push a token
    fn write_token(&mut self, token: impl fmt::Display) -> Result {
        self.fmt_token(format_args!("{token}"))
    }

    /// Push a domain name
    ///
    /// The name is written relative to the writer’s origin if it has one
    /// and the name is at or below it.
    fn write_name(&mut self, name: &Name) -> Result {
        let rel = self.origin().and_then(|origin| name.relative_to(origin));
        match rel {
            Some(rel) => self.write_token(rel),
            None => self.write_token(name),
        }
    }

    /// Call the `fmt` method on `item` with this formatter
    fn write_show(&mut self, item: impl ZonefileFmt) -> Result {
        item.fmt(self)
    }
}

impl<T: FormatWriter> Formatter for T {}

#[cfg(test)]
mod test {
    use std::string::ToString as _;

    use crate::base::zonefile_fmt::ZonefileFmt;
    use crate::base::Name;
    use crate::rdata::{Cname, Hinfo, Mx, Txt, A};

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn a_record() {
        let data = A::new("128.140.76.106".parse().unwrap());
        assert_eq!("128.140.76.106", data.display_zonefile().to_string());
    }

    #[test]
    fn cname_record() {
        let data = Cname::new(name("www.example.com."));
        assert_eq!("www.example.com.", data.display_zonefile().to_string());
        assert_eq!(
            "www",
            data.display_relative(&name("example.com.")).to_string()
        );
        assert_eq!(
            "www.example.com.",
            data.display_relative(&name("example.org.")).to_string()
        );
    }

    #[test]
    fn mx_record() {
        let data = Mx::new(20, name("example.com."));
        assert_eq!("20 example.com.", data.display_zonefile().to_string());
        assert_eq!(
            "20 @",
            data.display_relative(&name("example.com.")).to_string()
        );
    }

    #[test]
    fn txt_record() {
        let data = Txt::from_strings(vec![
            "this is a string".parse().unwrap(),
            "and \"another\" one".parse().unwrap(),
        ])
        .unwrap();
        assert_eq!(
            "\"this is a string\" \"and \\\"another\\\" one\"",
            data.display_zonefile().to_string()
        );
    }

    #[test]
    fn hinfo_record() {
        let record = Hinfo::new(
            "Windows".parse().unwrap(),
            "Windows Server".parse().unwrap(),
        );
        assert_eq!(
            "\"Windows\" \"Windows Server\"",
            record.display_zonefile().to_string()
        );
    }
}
