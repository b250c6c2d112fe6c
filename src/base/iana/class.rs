//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for different
    /// network types. That is, each class has its own separate record tree
    /// starting at the root. However, in practice, only the IN class is really
    /// relevant.
    ///
    /// In addition, there are query classes or QCLASSes that are used in
    /// questions or UPDATE queries, namely NONE and ANY (or *).
    ///
    /// See [RFC 1034] for the introduction of classes and the
    /// [DNS CLASSes IANA registry] for an overview of assigned values.
    ///
    /// [RFC 1034]: https://tools.ietf.org/html/rfc1034
    /// [DNS CLASSes IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
    =>
    Class, u16;

    /// Internet (IN).
    ///
    /// This class is defined in RFC 1035 and really the only one relevant
    /// at all.
    (IN => 1, "IN")

    /// Chaosnet (CH).
    ///
    /// A network protocol developed at MIT in the 1970s. Reused by BIND for
    /// built-in server information zones.
    (CH => 3, "CH")

    /// Hesiod (HS).
    ///
    /// A system information protocol part of MIT's Project Athena.
    (HS => 4, "HS")

    /// Query class None.
    (NONE => 0xFE, "NONE")

    /// Query class * (ANY).
    (ANY => 0xFF, "*")
}

int_enum_str_with_prefix!(Class, "CLASS", u16, "unknown class");

impl Default for Class {
    fn default() -> Self {
        Class::IN
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Class;
    use core::str::FromStr;

    #[test]
    fn ser_de() {
        use serde_test::{assert_de_tokens, assert_tokens, Configure, Token};

        assert_tokens(&Class::IN.readable(), &[Token::Str("IN")]);
        assert_tokens(&Class::from_int(5).readable(), &[Token::Str("CLASS5")]);
        assert_tokens(&Class::CH.compact(), &[Token::U16(3)]);
        assert_de_tokens(&Class::HS.readable(), &[Token::U64(4)]);
    }

    #[test]
    fn from_str() {
        assert_eq!(Class::from_str("in").unwrap(), Class::IN);
        assert_eq!(Class::from_str("CH").unwrap(), Class::CH);
        assert_eq!(Class::from_str("CLASS17").unwrap(), Class::from_int(17));
        assert!(Class::from_str("CLASS").is_err());
        assert!(Class::from_str("XY").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Class::IN.to_string(), "IN");
        assert_eq!(Class::ANY.to_string(), "*");
        assert_eq!(Class::from_int(42).to_string(), "CLASS42");
    }
}
