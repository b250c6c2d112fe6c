//! Record data from [RFC 6672]: DNAME records.
//!
//! [RFC 6672]: https://tools.ietf.org/html/rfc6672

//------------ Dname --------------------------------------------------------

name_type! {
    /// DNAME record data.
    ///
    /// The DNAME record provides redirection for a subtree of the domain
    /// name tree in the DNS.
    ///
    /// The DNAME type is defined in RFC 6672.
    (Dname, DNAME, target)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::name::Name;
    use crate::base::rdata::test::{test_compose_parse, test_scan};
    use core::str::FromStr;

    #[test]
    fn dname_compose_parse_scan() {
        let rdata = Dname::new(Name::from_str("www.example.com.").unwrap());
        test_compose_parse(&rdata, Dname::parse);
        test_scan(&["www.example.com."], Dname::scan, &rdata);
    }
}
