//! Configuration of the date/time parser.
//!
//! There is only one thing to configure at the moment: what to do with a
//! date/time string that doesn’t say which time zone it is in.

use core::{fmt, str};
use time::UtcOffset;

//------------ ParseConfig ---------------------------------------------------

/// The options for parsing date/time strings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ParseConfig {
    /// What to do if the input has no UTC offset or zone name.
    missing_offset: MissingOffset,
}

impl ParseConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a new config that rejects inputs without an offset.
    pub fn strict() -> Self {
        Self::new().with_missing_offset(MissingOffset::Reject)
    }

    /// Returns the policy for inputs without an offset.
    pub fn missing_offset(&self) -> MissingOffset {
        self.missing_offset
    }

    /// Sets the policy for inputs without an offset.
    pub fn set_missing_offset(&mut self, value: MissingOffset) {
        self.missing_offset = value
    }

    /// Returns the config with the policy for missing offsets replaced.
    #[must_use]
    pub fn with_missing_offset(mut self, value: MissingOffset) -> Self {
        self.set_missing_offset(value);
        self
    }
}

//------------ MissingOffset -------------------------------------------------

/// What to do with a date/time string that lacks a UTC offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MissingOffset {
    /// Assume the time is given with this offset.
    Assume(UtcOffset),

    /// Refuse to guess and fail parsing.
    Reject,
}

impl MissingOffset {
    /// Resolves the offset to use for a time without one.
    ///
    /// Returns `None` if the time should be rejected.
    pub fn resolve(self) -> Option<UtcOffset> {
        match self {
            MissingOffset::Assume(offset) => Some(offset),
            MissingOffset::Reject => None,
        }
    }
}

impl Default for MissingOffset {
    fn default() -> Self {
        MissingOffset::Assume(UtcOffset::UTC)
    }
}

//--- FromStr and Display

impl str::FromStr for MissingOffset {
    type Err = IllegalMissingOffset;

    /// Parses the policy from a string.
    ///
    /// Accepted are `reject`, `utc`, `Z`, a zone abbreviation, or a numeric
    /// offset such as `+13:00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("reject") {
            return Ok(MissingOffset::Reject);
        }
        if let Some(offset) = crate::zones::lookup(s) {
            return Ok(MissingOffset::Assume(offset));
        }
        crate::datetime::parse_numeric_offset(s)
            .map(MissingOffset::Assume)
            .ok_or(IllegalMissingOffset)
    }
}

impl fmt::Display for MissingOffset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MissingOffset::Reject => f.write_str("reject"),
            MissingOffset::Assume(offset) => {
                let (hours, minutes, _) = offset.as_hms();
                let sign = if offset.is_negative() { '-' } else { '+' };
                write!(
                    f,
                    "{}{:02}:{:02}",
                    sign,
                    hours.unsigned_abs(),
                    minutes.unsigned_abs()
                )
            }
        }
    }
}

//------------ IllegalMissingOffset ------------------------------------------

/// A string did not describe a policy for missing offsets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IllegalMissingOffset;

impl fmt::Display for IllegalMissingOffset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("expected 'reject', a zone name, or a UTC offset")
    }
}

impl std::error::Error for IllegalMissingOffset {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;
    use time::macros::offset;

    #[test]
    fn default_assumes_utc() {
        assert_eq!(
            ParseConfig::default().missing_offset().resolve(),
            Some(UtcOffset::UTC)
        );
        assert_eq!(ParseConfig::strict().missing_offset().resolve(), None);
    }

    #[test]
    fn from_str() {
        assert_eq!(
            MissingOffset::from_str("reject"),
            Ok(MissingOffset::Reject)
        );
        assert_eq!(
            MissingOffset::from_str("UTC"),
            Ok(MissingOffset::Assume(UtcOffset::UTC))
        );
        assert_eq!(
            MissingOffset::from_str("nzdt"),
            Ok(MissingOffset::Assume(offset!(+13)))
        );
        assert_eq!(
            MissingOffset::from_str("-03:30"),
            Ok(MissingOffset::Assume(offset!(-3:30)))
        );
        assert_eq!(
            MissingOffset::from_str("sometimes"),
            Err(IllegalMissingOffset)
        );
    }

    #[test]
    fn display() {
        assert_eq!(MissingOffset::Reject.to_string(), "reject");
        assert_eq!(
            MissingOffset::Assume(offset!(-3:30)).to_string(),
            "-03:30"
        );
        assert_eq!(MissingOffset::default().to_string(), "+00:00");
    }
}
