//! Reading BIND master files.
//!
//! The format is defined in [RFC 1035, section 5] with later additions
//! such as the `$TTL` directive of [RFC 2308] and the generic record data
//! of [RFC 3597].
//!
//! Parsing happens in two steps. First, the text is split into entries.
//! An entry is a logical line: a sequence of tokens that may be spread
//! over several physical lines by parentheses. Then each entry is turned
//! into either a directive that changes the [`ZoneContext`] or a record.
//!
//! Only the `$ORIGIN` and `$TTL` directives are supported. Everything else,
//! `$INCLUDE` in particular, results in an error.
//!
//! [RFC 1035, section 5]: https://tools.ietf.org/html/rfc1035#section-5
//! [RFC 2308]: https://tools.ietf.org/html/rfc2308
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597

use super::context::ZoneContext;
use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::record::{Record, Ttl};
use crate::base::scan::Scanner;
use crate::error::Error;
use crate::rdata::ZoneRecordData;
use core::str::FromStr;
use std::collections::VecDeque;
use std::iter::Peekable;
use std::str::Chars;
use std::string::String;
use std::vec::Vec;
use tracing::trace;

//------------ parse ---------------------------------------------------------

/// Parses the records of a master file.
///
/// Records are returned in the order they appear in `text`. The context
/// provides the initial origin and defaults and is updated by the
/// directives found.
pub fn parse(
    text: &str,
    context: &mut ZoneContext,
) -> Result<Vec<Record>, Error> {
    let mut tokenizer = Tokenizer::new(text);
    let mut res = Vec::new();
    while let Some(entry) = tokenizer.next_entry()? {
        let line = entry.line;
        if let Some(record) = scan_entry(entry, context)
            .map_err(|err| err.at_line(line))?
        {
            trace!("line {}: {}", line, record);
            res.push(record)
        }
    }
    Ok(res)
}

/// Turns an entry into a record or applies its directive.
fn scan_entry(
    entry: Entry,
    context: &mut ZoneContext,
) -> Result<Option<Record>, Error> {
    let Entry {
        blank_owner,
        tokens,
        comment,
        ..
    } = entry;
    let mut tokens = VecDeque::from(tokens);

    let owner = if blank_owner {
        None
    } else {
        match tokens.pop_front() {
            Some(token) if !token.quoted && token.text.starts_with('$') => {
                scan_directive(&token.text, tokens, context)?;
                return Ok(None);
            }
            Some(token) => Some(token.text),
            None => return Ok(None),
        }
    };

    let (class, ttl, rtype) = scan_ctr(&mut tokens)?;
    let owner = context.owner(owner.as_deref())?;
    let ttl = context.ttl(ttl);
    let class = context.class(class);

    let mut scanner = EntryScanner {
        tokens,
        origin: context.origin(),
    };
    let data = ZoneRecordData::scan(rtype, &mut scanner)?;
    if scanner.continues() {
        return Err(Error::malformed(format!(
            "trailing data in {} record",
            rtype
        )));
    }
    Ok(Some(
        Record::new(owner, class, ttl, rtype, data)?.with_comment(comment),
    ))
}

/// Applies a directive.
fn scan_directive(
    directive: &str,
    mut args: VecDeque<Token>,
    context: &mut ZoneContext,
) -> Result<(), Error> {
    let arg = match args.pop_front() {
        Some(arg) => arg.text,
        None => {
            return if directive.eq_ignore_ascii_case("$ORIGIN")
                || directive.eq_ignore_ascii_case("$TTL")
            {
                Err(Error::malformed(format!("missing {} value", directive)))
            } else {
                Err(Error::unsupported_directive(directive))
            };
        }
    };
    if directive.eq_ignore_ascii_case("$ORIGIN") {
        context.set_origin(&arg)?;
    } else if directive.eq_ignore_ascii_case("$TTL") {
        context.set_default_ttl(&arg)?;
    } else {
        return Err(Error::unsupported_directive(directive));
    }
    if !args.is_empty() {
        return Err(Error::malformed(format!(
            "trailing data after {}",
            directive
        )));
    }
    Ok(())
}

/// Scans the TTL, class, and type portions of a record.
fn scan_ctr(
    tokens: &mut VecDeque<Token>,
) -> Result<(Option<Class>, Option<Ttl>, Rtype), Error> {
    // Possible options are:
    //
    //   [<TTL>] [<class>] <type>
    //   [<class>] [<TTL>] <type>

    let mut class = None;
    let mut ttl = None;
    loop {
        let token = match tokens.pop_front() {
            Some(token) => token,
            None => return Err(Error::malformed("missing record type")),
        };
        if token.quoted {
            return Err(Error::unknown_type(token.text));
        }
        if ttl.is_none() {
            if let Ok(value) = Ttl::from_str(&token.text) {
                ttl = Some(value);
                continue;
            }
        }
        if let Ok(rtype) = Rtype::from_str(&token.text) {
            return Ok((class, ttl, rtype));
        }
        if class.is_none() {
            if let Ok(value) = Class::from_str(&token.text) {
                class = Some(value);
                continue;
            }
        }
        return Err(Error::unknown_type(token.text));
    }
}

//------------ Entry ---------------------------------------------------------

/// A logical line of a master file.
#[derive(Clone, Debug, Default)]
struct Entry {
    /// The line number the entry starts on.
    line: usize,

    /// Whether the entry started with white space.
    blank_owner: bool,

    /// The tokens of the entry.
    tokens: Vec<Token>,

    /// The comment found on the entry’s last line, if any.
    comment: Option<String>,
}

//------------ Token ---------------------------------------------------------

/// A single token of an entry.
///
/// Escape sequences are kept in the text. Quoted tokens don’t include their
/// quotes.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Token {
    text: String,
    quoted: bool,
}

//------------ Tokenizer -----------------------------------------------------

/// Splits master file text into entries.
struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,

    /// The current line number, starting at 1.
    line: usize,

    /// The current depth of parentheses.
    parens: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Tokenizer {
            chars: text.chars().peekable(),
            line: 1,
            parens: 0,
        }
    }

    /// Returns the next entry that contains tokens.
    fn next_entry(&mut self) -> Result<Option<Entry>, Error> {
        loop {
            if self.chars.peek().is_none() {
                return Ok(None);
            }
            let entry = self.scan_entry()?;
            if !entry.tokens.is_empty() {
                return Ok(Some(entry));
            }
        }
    }

    /// Scans a single entry which may turn out to be empty.
    fn scan_entry(&mut self) -> Result<Entry, Error> {
        let mut entry = Entry {
            line: self.line,
            blank_owner: matches!(self.chars.peek(), Some(' ' | '\t')),
            ..Default::default()
        };
        loop {
            let ch = match self.chars.peek() {
                Some(ch) => *ch,
                None => {
                    if self.parens > 0 {
                        return Err(Error::malformed("unclosed parenthesis")
                            .at_line(entry.line));
                    }
                    return Ok(entry);
                }
            };
            match ch {
                '\n' => {
                    self.chars.next();
                    self.line += 1;
                    if self.parens == 0 {
                        return Ok(entry);
                    }
                }
                ' ' | '\t' | '\r' => {
                    self.chars.next();
                }
                ';' => {
                    let comment = self.scan_comment();
                    if self.parens == 0 && !comment.is_empty() {
                        entry.comment = Some(comment);
                    }
                }
                '(' => {
                    self.chars.next();
                    self.parens += 1;
                }
                ')' => {
                    self.chars.next();
                    if self.parens == 0 {
                        return Err(Error::malformed("unbalanced parenthesis")
                            .at_line(self.line));
                    }
                    self.parens -= 1;
                }
                '"' => {
                    self.chars.next();
                    let text = self.scan_quoted()?;
                    entry.tokens.push(Token { text, quoted: true });
                }
                _ => {
                    let text = self.scan_unquoted();
                    entry.tokens.push(Token {
                        text,
                        quoted: false,
                    });
                }
            }
        }
    }

    /// Scans a comment up to but excluding the line feed.
    ///
    /// Returns the comment text without the semicolon and surrounding
    /// white space.
    fn scan_comment(&mut self) -> String {
        self.chars.next();
        let mut res = String::new();
        while let Some(ch) = self.chars.next_if(|ch| *ch != '\n') {
            res.push(ch)
        }
        res.trim().into()
    }

    /// Scans the content of a quoted token after the opening quote.
    fn scan_quoted(&mut self) -> Result<String, Error> {
        let mut res = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(res),
                Some('\\') => {
                    res.push('\\');
                    match self.chars.next() {
                        Some('\n') | None => break,
                        Some(ch) => res.push(ch),
                    }
                }
                Some('\n') => {
                    return Err(Error::malformed("line feed in quoted string")
                        .at_line(self.line))
                }
                Some(ch) => res.push(ch),
                None => break,
            }
        }
        Err(Error::malformed("unterminated quoted string").at_line(self.line))
    }

    /// Scans an unquoted token.
    fn scan_unquoted(&mut self) -> String {
        let mut res = String::new();
        while let Some(ch) = self.chars.next_if(|ch| {
            !matches!(ch, ' ' | '\t' | '\r' | '\n' | ';' | '(' | ')' | '"')
        }) {
            res.push(ch);
            if ch == '\\' {
                if let Some(ch) = self.chars.next_if(|ch| *ch != '\n') {
                    res.push(ch)
                }
            }
        }
        res
    }
}

//------------ EntryScanner --------------------------------------------------

/// The scanner for the record data of an entry.
struct EntryScanner<'a> {
    tokens: VecDeque<Token>,
    origin: Option<&'a Name>,
}

impl Scanner for EntryScanner<'_> {
    fn continues(&self) -> bool {
        !self.tokens.is_empty()
    }

    fn scan_token(&mut self) -> Result<String, Error> {
        self.tokens
            .pop_front()
            .map(|token| token.text)
            .ok_or_else(|| Error::malformed("missing record data"))
    }

    fn scan_name(&mut self) -> Result<Name, Error> {
        let token = self.scan_token()?;
        crate::base::scan::qualify_token(&token, self.origin)
    }

    fn scan_opt_unknown_marker(&mut self) -> bool {
        match self.tokens.front() {
            Some(token) if !token.quoted && token.text == "\\#" => {
                self.tokens.pop_front();
                true
            }
            _ => false,
        }
    }
}

//============ Testing =======================================================
