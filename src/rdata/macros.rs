//! Macros for use in rdata definitions.
//!
//! These macros are not public but are used by the super module only. They
//! are here so that `mod.rs` doesn’t become too unwieldly.

//------------ rdata_types! --------------------------------------------------

/// Creates the [`ZoneRecordData`] enum over all record data types.
///
/// Each type needs to provide an associated `RTYPE` constant, inherent
/// `scan` and `parse` functions, and implementations of `RecordData`,
/// `ComposeRecordData`, `ZonefileFmt`, and `Serialize`.
macro_rules! rdata_types {
    ( $(
        $module:ident::{
            $( $rtype:ident, )*
        }
    )* ) => {
        $(
            pub use self::$module::{ $( $rtype, )* };
        )*

        //------------- ZoneRecordData ---------------------------------------

        /// Record data for all record types allowed in zone data.
        ///
        /// This enum collects the record data types for all record types
        /// this crate knows. Data for all other types is kept in the
        /// generic form as [`UnknownRecordData`].
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub enum ZoneRecordData {
            $( $(
                $rtype($rtype),
            )* )*
            Unknown($crate::base::rdata::UnknownRecordData),
        }

        impl ZoneRecordData {
            /// Scans record data of the given record type.
            ///
            /// The generic `\#` format is accepted for all types. For types
            /// with a known record data type, the generic data is parsed
            /// into that type.
            pub fn scan<S: $crate::base::scan::Scanner>(
                rtype: $crate::base::iana::Rtype,
                scanner: &mut S,
            ) -> Result<Self, $crate::error::Error> {
                if scanner.scan_opt_unknown_marker() {
                    let data =
                        $crate::base::rdata::UnknownRecordData
                            ::scan_without_marker(rtype, scanner)?;
                    return Self::from_rdata(rtype, data.data());
                }
                match rtype {
                    $( $(
                        $rtype::RTYPE => {
                            $rtype::scan(scanner).map(ZoneRecordData::$rtype)
                        }
                    )* )*
                    _ => Err($crate::error::Error::invalid_data(format!(
                        "{} record data must use the generic format",
                        rtype
                    ))),
                }
            }

            /// Creates record data from its wire format.
            ///
            /// The whole of `rdata` has to be consumed.
            pub fn from_rdata(
                rtype: $crate::base::iana::Rtype,
                rdata: &[u8],
            ) -> Result<Self, $crate::error::Error> {
                let mut parser = $crate::base::wire::Parser::new(rdata);
                let res = <Self as $crate::base::rdata::ParseRecordData>
                    ::parse_rdata(rtype, &mut parser)
                    .and_then(|res| {
                        parser.check_exhausted()?;
                        Ok(res)
                    });
                match res {
                    Ok(Some(res)) => Ok(res),
                    Ok(None) => Err($crate::error::Error::invalid_data(
                        format!("no record data for {}", rtype)
                    )),
                    Err(err) => Err($crate::error::Error::invalid_data(
                        format!("{} record data: {}", rtype, err)
                    )),
                }
            }
        }

        //--- From

        $( $(
            impl From<$rtype> for ZoneRecordData {
                fn from(value: $rtype) -> Self {
                    ZoneRecordData::$rtype(value)
                }
            }
        )* )*

        impl From<$crate::base::rdata::UnknownRecordData>
        for ZoneRecordData {
            fn from(
                value: $crate::base::rdata::UnknownRecordData
            ) -> Self {
                ZoneRecordData::Unknown(value)
            }
        }

        //--- RecordData, ComposeRecordData, and ParseRecordData

        impl $crate::base::rdata::RecordData for ZoneRecordData {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                match *self {
                    $( $(
                        ZoneRecordData::$rtype(_) => $rtype::RTYPE,
                    )* )*
                    ZoneRecordData::Unknown(ref inner) => inner.rtype(),
                }
            }
        }

        impl $crate::base::rdata::ComposeRecordData for ZoneRecordData {
            fn compose_rdata(&self, target: &mut Vec<u8>) {
                match *self {
                    $( $(
                        ZoneRecordData::$rtype(ref inner) => {
                            $crate::base::rdata::ComposeRecordData
                                ::compose_rdata(inner, target)
                        }
                    )* )*
                    ZoneRecordData::Unknown(ref inner) => {
                        $crate::base::rdata::ComposeRecordData
                            ::compose_rdata(inner, target)
                    }
                }
            }
        }

        impl $crate::base::rdata::ParseRecordData for ZoneRecordData {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut $crate::base::wire::Parser,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                match rtype {
                    $( $(
                        $rtype::RTYPE => {
                            Ok(Some(ZoneRecordData::$rtype(
                                $rtype::parse(parser)?
                            )))
                        }
                    )* )*
                    _ => {
                        <
                            $crate::base::rdata::UnknownRecordData
                            as $crate::base::rdata::ParseRecordData
                        >::parse_rdata(rtype, parser)
                            .map(|res| res.map(ZoneRecordData::Unknown))
                    }
                }
            }
        }

        //--- ZonefileFmt and Display

        impl $crate::base::zonefile_fmt::ZonefileFmt for ZoneRecordData {
            fn fmt(
                &self,
                p: &mut impl $crate::base::zonefile_fmt::Formatter,
            ) -> $crate::base::zonefile_fmt::Result {
                match *self {
                    $( $(
                        ZoneRecordData::$rtype(ref inner) => {
                            $crate::base::zonefile_fmt::ZonefileFmt
                                ::fmt(inner, p)
                        }
                    )* )*
                    ZoneRecordData::Unknown(ref inner) => {
                        $crate::base::zonefile_fmt::ZonefileFmt
                            ::fmt(inner, p)
                    }
                }
            }
        }

        impl core::fmt::Display for ZoneRecordData {
            fn fmt(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                use $crate::base::zonefile_fmt::ZonefileFmt;

                write!(f, "{}", self.display_zonefile())
            }
        }

        //--- Serialize

        impl serde::Serialize for ZoneRecordData {
            /// Serializes the fields of the record data.
            ///
            /// The variant isn’t included since it follows from the record
            /// type.
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                match *self {
                    $( $(
                        ZoneRecordData::$rtype(ref inner) => {
                            serde::Serialize::serialize(inner, serializer)
                        }
                    )* )*
                    ZoneRecordData::Unknown(ref inner) => {
                        serde::Serialize::serialize(inner, serializer)
                    }
                }
            }
        }
    }
}

//------------ name_type! --------------------------------------------------

/// A macro for implementing a record data type with a single domain name.
///
/// Implements some basic methods plus the `RecordData`,
/// `ComposeRecordData`, `ZonefileFmt`, and `Display` traits. The field
/// name is used for the accessor and as the key when serializing.
macro_rules! name_type {
    ($(#[$attr:meta])* ( $target:ident, $rtype:ident, $field:ident ) ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
        pub struct $target {
            $field: $crate::base::name::Name,
        }

        impl $target {
            /// The rtype of this record data type.
            pub const RTYPE: $crate::base::iana::Rtype =
                $crate::base::iana::Rtype::$rtype;

            pub fn new($field: $crate::base::name::Name) -> Self {
                $target { $field }
            }

            pub fn $field(&self) -> &$crate::base::name::Name {
                &self.$field
            }

            pub fn scan<S: $crate::base::scan::Scanner>(
                scanner: &mut S,
            ) -> Result<Self, $crate::error::Error> {
                scanner.scan_name().map(Self::new)
            }

            pub fn parse(
                parser: &mut $crate::base::wire::Parser,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                <$crate::base::name::Name as $crate::base::wire::Parse>
                    ::parse(parser).map(Self::new)
            }
        }

        //--- From

        impl From<$crate::base::name::Name> for $target {
            fn from(name: $crate::base::name::Name) -> Self {
                Self::new(name)
            }
        }

        //--- RecordData and ComposeRecordData

        impl $crate::base::rdata::RecordData for $target {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                Self::RTYPE
            }
        }

        impl $crate::base::rdata::ComposeRecordData for $target {
            fn compose_rdata(&self, target: &mut Vec<u8>) {
                $crate::base::wire::Compose::compose(&self.$field, target)
            }
        }

        //--- Display and ZonefileFmt

        impl core::fmt::Display for $target {
            fn fmt(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                write!(f, "{}", self.$field)
            }
        }

        impl $crate::base::zonefile_fmt::ZonefileFmt for $target {
            fn fmt(
                &self,
                p: &mut impl $crate::base::zonefile_fmt::Formatter,
            ) -> $crate::base::zonefile_fmt::Result {
                p.write_name(&self.$field)
            }
        }
    }
}
