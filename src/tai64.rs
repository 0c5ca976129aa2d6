//! TAI64 labels.
//!
//! The timestamp field of a tinydns-data line holds an external [TAI64]
//! label: a 64 bit number of seconds written as 16 lowercase hex digits.
//! This module provides the type [`Tai64Label`] for such labels and the
//! function [`encode`] that turns a date/time string into one.
//!
//! Labels are produced from Unix time by adding the ten seconds TAI was
//! ahead of UTC at the Unix epoch and then the bias of 2^62. Leap seconds
//! inserted after 1970 are not accounted for. This matches what the zone
//! data generators in the wild have been producing for years.
//!
//! # Instants before the epoch
//!
//! For instants more than ten seconds before the Unix epoch, the labels
//! produced here are `2^62 + |seconds|` rather than `2^62 - |seconds|`.
//! These labels thus move away from the epoch in the wrong direction. The
//! behaviour is kept as is for compatibility with existing zone data.
//!
//! [TAI64]: https://cr.yp.to/libtai/tai64.html

use crate::config::ParseConfig;
use crate::datetime::{self, ParseDateTimeError};
use crate::utils::base16;
use core::{fmt, str};
use time::OffsetDateTime;
use tracing::trace;

//------------ Constants -----------------------------------------------------

/// The bias added to the seconds of an external TAI64 label.
pub const EPOCH_BIAS: u64 = 1 << 62;

/// The difference between TAI and UTC at the Unix epoch in seconds.
pub const LEAP_SECONDS_AT_EPOCH: i64 = 10;

//------------ encode --------------------------------------------------------

/// Converts a date/time string into the tinydns-data timestamp.
///
/// The string can be in any of the formats described in the
/// [datetime] module. If it lacks a UTC offset, it is assumed to be in
/// UTC. The returned string always consists of exactly 16 lowercase hex
/// digits.
///
/// ```
/// assert_eq!(
///     tinydns_tai64::encode("2014-03-20 01:14:56 NZDT").unwrap(),
///     "4000000053298a4a"
/// );
/// ```
pub fn encode(input: &str) -> Result<String, ParseDateTimeError> {
    encode_with(input, &ParseConfig::default())
}

/// Converts a date/time string using the given parser config.
pub fn encode_with(
    input: &str,
    config: &ParseConfig,
) -> Result<String, ParseDateTimeError> {
    let instant = datetime::parse(input, config)?;
    let label = Tai64Label::from_datetime(instant)?;
    trace!(
        input,
        unix = instant.unix_timestamp(),
        label = %label,
        "encoded TAI64 label"
    );
    Ok(label.to_string())
}

//------------ Tai64Label ----------------------------------------------------

/// An external TAI64 label.
///
/// The label is stored as its native `u64` value. Its presentation format,
/// provided via `Display` and `FromStr`, is the 16 digit hex form used by
/// tinydns-data. The wire format is the value in network byte order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tai64Label(pub u64);

impl Tai64Label {
    /// The length of the wire format of a label.
    pub const OCTETS_LEN: usize = 8;

    /// Creates a label from a number of seconds since the Unix epoch.
    pub fn from_unix_seconds(secs: i64) -> Result<Self, LabelOverflow> {
        let secs = secs
            .checked_add(LEAP_SECONDS_AT_EPOCH)
            .ok_or(LabelOverflow)?;
        let res = if secs >= 0 {
            EPOCH_BIAS.checked_add(secs as u64)
        } else {
            // EPOCH_BIAS - secs, see the module docs.
            EPOCH_BIAS.checked_add(secs.unsigned_abs())
        };
        res.map(Tai64Label).ok_or(LabelOverflow)
    }

    /// Creates a label for the given instant.
    ///
    /// Fractions of a second are dropped, rounding towards the past.
    pub fn from_datetime(
        instant: OffsetDateTime,
    ) -> Result<Self, LabelOverflow> {
        Self::from_unix_seconds(instant.unix_timestamp())
    }

    /// Returns the label as a raw integer.
    pub fn into_int(self) -> u64 {
        self.0
    }

    /// Returns the wire format of the label.
    pub fn to_octets(self) -> [u8; Self::OCTETS_LEN] {
        self.0.to_be_bytes()
    }

    /// Creates a label from its wire format.
    pub fn from_octets(octets: [u8; Self::OCTETS_LEN]) -> Self {
        Tai64Label(u64::from_be_bytes(octets))
    }
}

//--- From and FromStr

impl From<u64> for Tai64Label {
    fn from(value: u64) -> Self {
        Tai64Label(value)
    }
}

impl From<Tai64Label> for u64 {
    fn from(label: Tai64Label) -> u64 {
        label.0
    }
}

impl str::FromStr for Tai64Label {
    type Err = IllegalLabel;

    /// Parses the 16 hex digit presentation format.
    ///
    /// Upper case digits are accepted, too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        base16::decode_array(s)
            .map(Self::from_octets)
            .map_err(|_| IllegalLabel)
    }
}

//--- Display

impl fmt::Display for Tai64Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        base16::display(&self.to_octets(), f)
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Tai64Label {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_u64(self.0)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tai64Label {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Tai64Label;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a TAI64 label")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: serde::de::Error>(
                self,
                v: u64,
            ) -> Result<Self::Value, E> {
                Ok(Tai64Label(v))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(Visitor)
        } else {
            deserializer.deserialize_u64(Visitor)
        }
    }
}

//============ Error Types ===================================================

//------------ LabelOverflow -------------------------------------------------

/// An instant is too far from the epoch to be expressed as a label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LabelOverflow;

impl fmt::Display for LabelOverflow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("time stamp out of range")
    }
}

impl std::error::Error for LabelOverflow {}

//------------ IllegalLabel --------------------------------------------------

/// A string did not contain a TAI64 label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IllegalLabel;

impl fmt::Display for IllegalLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal TAI64 label")
    }
}

impl std::error::Error for IllegalLabel {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn constants() {
        assert_eq!(EPOCH_BIAS, 0x4000_0000_0000_0000);
        assert_eq!(LEAP_SECONDS_AT_EPOCH, 10);
    }

    #[test]
    fn from_unix_seconds() {
        assert_eq!(
            Tai64Label::from_unix_seconds(0),
            Ok(Tai64Label(EPOCH_BIAS + 10))
        );
        assert_eq!(
            Tai64Label::from_unix_seconds(-1),
            Ok(Tai64Label(EPOCH_BIAS + 9))
        );
        assert_eq!(
            Tai64Label::from_unix_seconds(-10),
            Ok(Tai64Label(EPOCH_BIAS))
        );
        assert_eq!(
            Tai64Label::from_unix_seconds(-11),
            Ok(Tai64Label(EPOCH_BIAS + 1))
        );
        assert_eq!(
            Tai64Label::from_unix_seconds(-20),
            Ok(Tai64Label(EPOCH_BIAS + 10))
        );
        assert_eq!(
            Tai64Label::from_unix_seconds(1_395_231_296),
            Ok(Tai64Label(0x4000_0000_5329_8a4a))
        );
    }

    #[test]
    fn from_unix_seconds_extremes() {
        assert_eq!(
            Tai64Label::from_unix_seconds(i64::MAX),
            Err(LabelOverflow)
        );
        assert_eq!(
            Tai64Label::from_unix_seconds(i64::MAX - 10),
            Ok(Tai64Label(EPOCH_BIAS + i64::MAX as u64))
        );
        assert_eq!(
            Tai64Label::from_unix_seconds(i64::MIN),
            Ok(Tai64Label(EPOCH_BIAS + (i64::MAX as u64 - 9)))
        );
    }

    #[test]
    fn display() {
        assert_eq!(Tai64Label(EPOCH_BIAS + 10).to_string(), "400000000000000a");
        assert_eq!(Tai64Label(0).to_string(), "0000000000000000");
        assert_eq!(Tai64Label(u64::MAX).to_string(), "ffffffffffffffff");
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Tai64Label::from_str("400000000000000a"),
            Ok(Tai64Label(EPOCH_BIAS + 10))
        );
        assert_eq!(
            Tai64Label::from_str("4000000053298A4A"),
            Ok(Tai64Label(0x4000_0000_5329_8a4a))
        );
        assert_eq!(Tai64Label::from_str(""), Err(IllegalLabel));
        assert_eq!(Tai64Label::from_str("400000000000000"), Err(IllegalLabel));
        assert_eq!(
            Tai64Label::from_str("400000000000000a0"),
            Err(IllegalLabel)
        );
        assert_eq!(
            Tai64Label::from_str("400000000000000g"),
            Err(IllegalLabel)
        );
    }

    #[test]
    fn octets() {
        let label = Tai64Label(0x4000_0000_5329_8a4a);
        assert_eq!(
            label.to_octets(),
            [0x40, 0, 0, 0, 0x53, 0x29, 0x8a, 0x4a]
        );
        assert_eq!(Tai64Label::from_octets(label.to_octets()), label);
    }

    #[test]
    fn encode_epoch() {
        assert_eq!(
            encode("1970-01-01T00:00:00+00:00").unwrap(),
            "400000000000000a"
        );
    }

    #[test]
    fn encode_error() {
        assert_eq!(encode(""), Err(ParseDateTimeError::Empty));
        assert_eq!(encode("not a date"), Err(ParseDateTimeError::Syntax));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        let label = Tai64Label(0x4000_0000_5329_8a4a);
        assert_tokens(&label.readable(), &[Token::Str("4000000053298a4a")]);
        assert_tokens(&label.compact(), &[Token::U64(0x4000_0000_5329_8a4a)]);
    }
}
