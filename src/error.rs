//! Error handling.
//!
//! All operations of this crate report failure through the single
//! [`Error`] type. A conversion either succeeds completely or fails with
//! one of these; partial output is never produced.

use std::fmt;
use std::string::String;

//------------ Error ---------------------------------------------------------

/// A conversion failed.
///
/// The error consists of a kind describing what went wrong and, where it
/// is known, the number of the input line the problem was found on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    line: Option<usize>,
}

impl Error {
    /// Creates a new error of the given kind without line information.
    pub fn new(kind: ErrorKind) -> Self {
        Error { kind, line: None }
    }

    /// A line didn’t follow the syntax of its format.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedRecord(msg.into()))
    }

    /// A record type mnemonic or tinydns type code wasn’t recognized.
    pub fn unknown_type(token: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownRecordType(token.into()))
    }

    /// A relative name was used before any origin was known.
    pub fn unresolved_origin(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedOrigin(name.into()))
    }

    /// Record data didn’t match the shape of its record type.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRecordData(msg.into()))
    }

    /// A tinydns shortcut couldn’t be expanded unambiguously.
    pub fn ambiguous_shortcut(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::AmbiguousShortcut(msg.into()))
    }

    /// A recognized but unsupported directive was encountered.
    pub fn unsupported_directive(directive: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedDirective(directive.into()))
    }

    /// A record can’t be represented in the requested output format.
    pub fn unsupported_export(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedExport(msg.into()))
    }

    /// Attaches a line number unless one is present already.
    pub fn at_line(mut self, line: usize) -> Self {
        if self.line.is_none() {
            self.line = Some(line)
        }
        self
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the input line the error was found on, if known.
    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

//--- From

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

//--- Display and Error

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.kind),
            None => fmt::Display::fmt(&self.kind, f),
        }
    }
}

impl std::error::Error for Error {}

//------------ ErrorKind -----------------------------------------------------

/// The kinds of conversion failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A line-level syntax violation.
    MalformedRecord(String),

    /// An unrecognized record type mnemonic or tinydns type code.
    ///
    /// Holds the offending token.
    UnknownRecordType(String),

    /// A relative name was used before any `$ORIGIN` was set.
    ///
    /// Holds the name in question.
    UnresolvedOrigin(String),

    /// Record data doesn’t fit the shape or arity of its type.
    InvalidRecordData(String),

    /// A tinydns shortcut can’t be expanded unambiguously.
    AmbiguousShortcut(String),

    /// A directive such as `$INCLUDE` that isn’t supported.
    UnsupportedDirective(String),

    /// A record that has no representation in the output format.
    UnsupportedExport(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::MalformedRecord(msg) => {
                write!(f, "malformed record: {}", msg)
            }
            ErrorKind::UnknownRecordType(token) => {
                write!(f, "unknown record type '{}'", token)
            }
            ErrorKind::UnresolvedOrigin(name) => {
                write!(f, "relative name '{}' used without origin", name)
            }
            ErrorKind::InvalidRecordData(msg) => {
                write!(f, "invalid record data: {}", msg)
            }
            ErrorKind::AmbiguousShortcut(msg) => {
                write!(f, "ambiguous shortcut: {}", msg)
            }
            ErrorKind::UnsupportedDirective(directive) => {
                write!(f, "unsupported directive {}", directive)
            }
            ErrorKind::UnsupportedExport(msg) => {
                write!(f, "unsupported export: {}", msg)
            }
        }
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_with_line() {
        let err = Error::malformed("trailing tokens").at_line(7);
        assert_eq!(
            err.to_string(),
            "line 7: malformed record: trailing tokens"
        );
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn first_line_sticks() {
        let err = Error::unknown_type("BOGUS").at_line(3).at_line(9);
        assert_eq!(err.line(), Some(3));
        assert_eq!(
            err.kind(),
            &ErrorKind::UnknownRecordType("BOGUS".into())
        );
    }
}
