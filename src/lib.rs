//! TAI64 timestamps for tinydns-data.
//!
//! The data file of djbdns’ tinydns allows each line to carry a timestamp
//! field that either marks the time a record starts being served or – with
//! a zero TTL – the time it stops being served. The field is an external
//! TAI64 label written as 16 lowercase hex digits. Writing those by hand is
//! not much fun, so this crate converts ordinary date/time strings such as
//! `2014-03-20 01:14:56+13:00` or `2014-03-20 01:14:56 NZDT` into them.
//!
//! The crate is built from a small number of modules:
//!
//! * [tai64] contains the [`Tai64Label`] type and the [`encode`] function
//!   that performs the conversion,
//! * [datetime] contains the parser for date/time strings, helped by the
//!   table of time zone abbreviations in [zones] and the options in
//!   [config], and
//! * [function] provides the `to_tinydns_tai64` host function for callers
//!   that hand over untyped argument lists.
//!
//! ```
//! use tinydns_tai64::encode;
//!
//! assert_eq!(
//!     encode("2014-03-20 01:14:56+13:00").unwrap(),
//!     encode("2014-03-20 01:14:56 NZDT").unwrap(),
//! );
//! assert_eq!(
//!     encode("1970-01-01T00:00:00+00:00").unwrap(), "400000000000000a"
//! );
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `serde`: adds serialization of [`Tai64Label`] and deserialization of
//!   host function arguments via [serde](https://serde.rs/).
//! * `cli`: builds the `to-tinydns-tai64` command line tool. This also
//!   enables the `serde` feature.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod datetime;
pub mod function;
#[cfg(feature = "cli")]
pub mod logging;
pub mod tai64;
pub mod utils;
pub mod zones;

pub use self::config::{MissingOffset, ParseConfig};
pub use self::datetime::ParseDateTimeError;
pub use self::function::{to_tinydns_tai64, FunctionError, Value};
pub use self::tai64::{encode, encode_with, Tai64Label};
