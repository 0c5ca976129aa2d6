//! Parsing date/time strings.
//!
//! This module turns the kind of date/time strings people write into zone
//! data templates into an absolute instant. It understands three families
//! of input:
//!
//! * [RFC 3339] timestamps such as `2014-03-20T01:14:56+13:00`,
//! * [RFC 2822] dates as used in mail headers such as
//!   `Thu, 20 Mar 2014 01:14:56 +1300`, and
//! * a more relaxed ISO-like format of the form `date [time] [zone]`.
//!
//! In the relaxed format, the date is given as `YYYY-MM-DD` or
//! `YYYY/MM/DD`. The optional time is separated from the date by a `T` or
//! white space and written as `HH:MM`, `HH:MM:SS`, or with a fraction of a
//! second appended. The zone, which may or may not be separated by white
//! space, is either `Z`, a numeric offset in one of the forms `+HH`,
//! `+HHMM`, or `+HH:MM`, or one of the abbreviations known to the
//! [zones][crate::zones] module. A missing time means midnight. What
//! happens when the zone is missing is decided by
//! [`ParseConfig`][crate::config::ParseConfig].
//!
//! [RFC 3339]: https://tools.ietf.org/html/rfc3339
//! [RFC 2822]: https://tools.ietf.org/html/rfc2822

use crate::config::ParseConfig;
use crate::tai64::LabelOverflow;
use core::fmt;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::{
    Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time,
    UtcOffset,
};

//------------ parse ---------------------------------------------------------

/// Parses a date/time string into an instant.
///
/// Leading and trailing white space is ignored. Fractions of a second are
/// kept for the well-known formats and dropped for the relaxed format. A
/// leap second, i.e., a seconds value of 60, rolls over into the next
/// minute.
pub fn parse(
    input: &str,
    config: &ParseConfig,
) -> Result<OffsetDateTime, ParseDateTimeError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseDateTimeError::Empty);
    }
    let well_known = OffsetDateTime::parse(input, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(input, &Rfc2822));
    match well_known {
        Ok(res) if has_leap_second(input) => roll_leap_second(res),
        Ok(res) => Ok(res),
        Err(_) => parse_relaxed(input, config),
    }
}

/// Returns whether the seconds of the time in `input` are given as 60.
fn has_leap_second(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.windows(6).enumerate().any(|(i, window)| {
        window[0] == b':'
            && window[1].is_ascii_digit()
            && window[2].is_ascii_digit()
            && window[3] == b':'
            && &window[4..] == b"60"
            && !bytes.get(i + 6).map_or(false, u8::is_ascii_digit)
    })
}

/// Moves an instant parsed from a leap second to the start of the next one.
///
/// The well-known parsers clamp a leap second to the last nanosecond of the
/// preceding second.
fn roll_leap_second(
    res: OffsetDateTime,
) -> Result<OffsetDateTime, ParseDateTimeError> {
    res.checked_sub(Duration::nanoseconds(i64::from(res.nanosecond())))
        .and_then(|res| res.checked_add(Duration::SECOND))
        .ok_or(ParseDateTimeError::OutOfRange)
}

/// Parses the relaxed `date [time] [zone]` format.
fn parse_relaxed(
    input: &str,
    config: &ParseConfig,
) -> Result<OffsetDateTime, ParseDateTimeError> {
    let mut cursor = Cursor::new(input);
    let date = cursor.date()?;

    let time = if cursor.eat_if(|ch| ch == 'T' || ch == 't') {
        cursor.time()?
    } else if cursor.skip_space() && cursor.peek_digit() {
        cursor.time()?
    } else {
        LocalTime::MIDNIGHT
    };

    cursor.skip_space();
    let offset = match cursor.zone()? {
        Some(offset) => offset,
        None => config
            .missing_offset()
            .resolve()
            .ok_or(ParseDateTimeError::MissingOffset)?,
    };

    let res = PrimitiveDateTime::new(date, time.time).assume_offset(offset);
    if time.leap_second {
        res.checked_add(Duration::SECOND)
            .ok_or(ParseDateTimeError::OutOfRange)
    } else {
        Ok(res)
    }
}

/// Parses a numeric UTC offset.
///
/// The offset has to be one of `+HH`, `+HHMM`, or `+HH:MM` or the same with
/// a minus sign and has to make up the entire string.
pub(crate) fn parse_numeric_offset(s: &str) -> Option<UtcOffset> {
    let mut cursor = Cursor::new(s);
    let offset = cursor.numeric_offset().ok()?;
    if cursor.is_empty() {
        Some(offset)
    } else {
        None
    }
}

//------------ LocalTime -----------------------------------------------------

/// A time of day as written, before knowing the offset.
#[derive(Clone, Copy, Debug)]
struct LocalTime {
    time: Time,

    /// The seconds were given as 60 and `time` holds 59.
    leap_second: bool,
}

impl LocalTime {
    const MIDNIGHT: Self = LocalTime {
        time: Time::MIDNIGHT,
        leap_second: false,
    };
}

//------------ Cursor --------------------------------------------------------

/// A position in the input string.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { rest: input }
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn peek_digit(&self) -> bool {
        self.peek().map(|ch| ch.is_ascii_digit()).unwrap_or(false)
    }

    /// Consumes the next character if it matches `op`.
    fn eat_if(&mut self, op: impl FnOnce(char) -> bool) -> bool {
        match self.peek() {
            Some(ch) if op(ch) => {
                self.rest = &self.rest[ch.len_utf8()..];
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseDateTimeError> {
        if self.eat_if(|ch| ch == expected) {
            Ok(())
        } else {
            Err(ParseDateTimeError::Syntax)
        }
    }

    /// Skips white space and returns whether there was any.
    fn skip_space(&mut self) -> bool {
        let trimmed = self.rest.trim_start();
        let skipped = trimmed.len() != self.rest.len();
        self.rest = trimmed;
        skipped
    }

    /// Consumes between `min` and `max` ASCII digits.
    fn digits(
        &mut self,
        min: usize,
        max: usize,
    ) -> Result<u32, ParseDateTimeError> {
        let len = self
            .rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return Err(ParseDateTimeError::Syntax);
        }
        let (digits, rest) = self.rest.split_at(len);
        self.rest = rest;
        Ok(digits
            .bytes()
            .fold(0, |res, ch| res * 10 + u32::from(ch - b'0')))
    }

    /// Consumes at least one ASCII digit without looking at the value.
    fn skip_digits(&mut self) -> Result<(), ParseDateTimeError> {
        let trimmed =
            self.rest.trim_start_matches(|ch: char| ch.is_ascii_digit());
        if trimmed.len() == self.rest.len() {
            return Err(ParseDateTimeError::Syntax);
        }
        self.rest = trimmed;
        Ok(())
    }

    fn date(&mut self) -> Result<Date, ParseDateTimeError> {
        let year = self.digits(4, 4)? as i32;
        let sep = match self.peek() {
            Some(ch @ ('-' | '/')) => ch,
            _ => return Err(ParseDateTimeError::Syntax),
        };
        self.expect(sep)?;
        let month = self.digits(1, 2)?;
        self.expect(sep)?;
        let day = self.digits(1, 2)?;

        let month = Month::try_from(month as u8)
            .map_err(|_| ParseDateTimeError::Component("month"))?;
        Date::from_calendar_date(year, month, day as u8)
            .map_err(|_| ParseDateTimeError::Component("day"))
    }

    fn time(&mut self) -> Result<LocalTime, ParseDateTimeError> {
        let hour = self.digits(1, 2)?;
        self.expect(':')?;
        let minute = self.digits(2, 2)?;
        let mut second = 0;
        if self.eat_if(|ch| ch == ':') {
            second = self.digits(2, 2)?;
            if self.eat_if(|ch| ch == '.' || ch == ',') {
                // Only whole seconds count.
                self.skip_digits()?;
            }
        }

        let leap_second = second == 60;
        if leap_second {
            second = 59;
        }
        if hour > 23 {
            return Err(ParseDateTimeError::Component("hour"));
        }
        if minute > 59 {
            return Err(ParseDateTimeError::Component("minute"));
        }
        let time = Time::from_hms(hour as u8, minute as u8, second as u8)
            .map_err(|_| ParseDateTimeError::Component("second"))?;
        Ok(LocalTime { time, leap_second })
    }

    /// Parses the zone, which has to be the remainder of the input.
    ///
    /// Returns `Ok(None)` if the input is already exhausted.
    fn zone(&mut self) -> Result<Option<UtcOffset>, ParseDateTimeError> {
        match self.peek() {
            None => Ok(None),
            Some('+' | '-') => {
                let offset = self.numeric_offset()?;
                if self.is_empty() {
                    Ok(Some(offset))
                } else {
                    Err(ParseDateTimeError::Syntax)
                }
            }
            Some(_) => {
                let name = self.rest;
                if !crate::zones::is_zone_name(name) {
                    return Err(ParseDateTimeError::Syntax);
                }
                self.rest = "";
                crate::zones::lookup(name).map(Some).ok_or_else(|| {
                    ParseDateTimeError::UnknownZone(name.into())
                })
            }
        }
    }

    fn numeric_offset(&mut self) -> Result<UtcOffset, ParseDateTimeError> {
        let negative = if self.eat_if(|ch| ch == '-') {
            true
        } else {
            self.expect('+')?;
            false
        };
        let hours = self.digits(2, 2)?;
        let minutes = if self.eat_if(|ch| ch == ':') {
            self.digits(2, 2)?
        } else if self.peek_digit() {
            self.digits(2, 2)?
        } else {
            0
        };
        if hours > 23 || minutes > 59 {
            return Err(ParseDateTimeError::Component("offset"));
        }
        let (hours, minutes) = if negative {
            (-(hours as i8), -(minutes as i8))
        } else {
            (hours as i8, minutes as i8)
        };
        UtcOffset::from_hms(hours, minutes, 0)
            .map_err(|_| ParseDateTimeError::Component("offset"))
    }
}

//============ Error Types ===================================================

//------------ ParseDateTimeError --------------------------------------------

/// A date/time string could not be converted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseDateTimeError {
    /// The string was empty or only contained white space.
    Empty,

    /// The string didn’t have any of the known shapes.
    Syntax,

    /// A component of the date or time was out of range.
    ///
    /// The value names the offending component.
    Component(&'static str),

    /// The zone abbreviation is not known.
    UnknownZone(String),

    /// The string had no offset and the config says to reject those.
    MissingOffset,

    /// The instant cannot be represented as a TAI64 label.
    OutOfRange,
}

impl From<LabelOverflow> for ParseDateTimeError {
    fn from(_: LabelOverflow) -> Self {
        ParseDateTimeError::OutOfRange
    }
}

//--- Display and Error

impl fmt::Display for ParseDateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseDateTimeError::Empty => f.write_str("empty date/time"),
            ParseDateTimeError::Syntax => {
                f.write_str("unrecognized date/time format")
            }
            ParseDateTimeError::Component(name) => {
                write!(f, "{} out of range", name)
            }
            ParseDateTimeError::UnknownZone(ref name) => {
                write!(f, "unknown time zone '{}'", name)
            }
            ParseDateTimeError::MissingOffset => {
                f.write_str("missing UTC offset")
            }
            ParseDateTimeError::OutOfRange => {
                f.write_str("time stamp out of range")
            }
        }
    }
}

impl std::error::Error for ParseDateTimeError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::MissingOffset;
    use time::macros::{datetime, offset};

    fn parse_default(s: &str) -> Result<OffsetDateTime, ParseDateTimeError> {
        parse(s, &ParseConfig::default())
    }

    #[test]
    fn rfc3339() {
        assert_eq!(
            parse_default("2014-03-20T01:14:56+13:00").unwrap(),
            datetime!(2014-03-20 01:14:56 +13)
        );
        assert_eq!(
            parse_default("  1970-01-01T00:00:00Z\n").unwrap()
                .unix_timestamp(),
            0
        );
        assert_eq!(
            parse_default("1969-12-31T23:59:59.5Z").unwrap().unix_timestamp(),
            -1
        );
    }

    #[test]
    fn rfc2822() {
        assert_eq!(
            parse_default("Thu, 20 Mar 2014 01:14:56 +1300").unwrap(),
            datetime!(2014-03-20 01:14:56 +13)
        );
    }

    #[test]
    fn relaxed_offsets() {
        let expected = datetime!(2014-03-20 01:14:56 +13);
        for s in [
            "2014-03-20 01:14:56+13:00",
            "2014-03-20 01:14:56 +13:00",
            "2014-03-20 01:14:56+1300",
            "2014-03-20 01:14:56 +13",
            "2014-03-20 01:14:56 NZDT",
            "2014-03-20 01:14:56 nzdt",
            "2014/03/20 01:14:56 NZDT",
            "2014-3-20 1:14:56 NZDT",
            "2014-03-19 12:14:56 UTC",
            "2014-03-19 12:14:56Z",
            "2014-03-19T12:14:56.999 GMT",
            "2014-03-19 07:14:56 -05:00",
            "2014-03-19 08:14:56 EDT",
        ] {
            assert_eq!(parse_default(s).unwrap(), expected, "{}", s);
        }
    }

    #[test]
    fn relaxed_missing_parts() {
        assert_eq!(
            parse_default("2014-03-20").unwrap(),
            datetime!(2014-03-20 00:00:00 UTC)
        );
        assert_eq!(
            parse_default("2014-03-20 01:14").unwrap(),
            datetime!(2014-03-20 01:14:00 UTC)
        );
        assert_eq!(
            parse_default("2014-03-20 NZDT").unwrap(),
            datetime!(2014-03-20 00:00:00 +13)
        );
    }

    #[test]
    fn missing_offset_policy() {
        let config = ParseConfig::default()
            .with_missing_offset(MissingOffset::Assume(offset!(+13)));
        assert_eq!(
            parse("2014-03-20 01:14:56", &config).unwrap(),
            datetime!(2014-03-20 01:14:56 +13)
        );
        assert_eq!(
            parse("2014-03-20 01:14:56", &ParseConfig::strict()),
            Err(ParseDateTimeError::MissingOffset)
        );
        assert!(parse("2014-03-20 01:14:56Z", &ParseConfig::strict()).is_ok());
    }

    #[test]
    fn leap_second() {
        for s in [
            "2016-12-31 23:59:60 UTC",
            "2016-12-31T23:59:60Z",
            "2016-12-31T23:59:60+00:00",
            "2016-12-31T23:59:60.5Z",
            "2017-01-01T12:59:60+13:00",
        ] {
            assert_eq!(
                parse_default(s).unwrap(),
                datetime!(2017-01-01 00:00:00 UTC),
                "{}",
                s
            );
        }
    }

    #[test]
    fn leap_second_detection() {
        assert!(has_leap_second("2016-12-31T23:59:60Z"));
        assert!(has_leap_second("Sat, 31 Dec 2016 23:59:60 +0000"));
        assert!(!has_leap_second("2016-12-31T23:59:59Z"));
        assert!(!has_leap_second("2016-12-31T23:59:600Z"));
        assert!(!has_leap_second("2016-12-31T23:60Z"));
    }

    #[test]
    fn errors() {
        assert_eq!(parse_default(""), Err(ParseDateTimeError::Empty));
        assert_eq!(parse_default("   "), Err(ParseDateTimeError::Empty));
        assert_eq!(parse_default("garbage"), Err(ParseDateTimeError::Syntax));
        assert_eq!(
            parse_default("2014-03-20 01:14:56 +13:00 extra"),
            Err(ParseDateTimeError::Syntax)
        );
        assert_eq!(
            parse_default("2014-03-20 01:14:56 XYZT"),
            Err(ParseDateTimeError::UnknownZone("XYZT".into()))
        );
        assert_eq!(
            parse_default("2014-13-20"),
            Err(ParseDateTimeError::Component("month"))
        );
        assert_eq!(
            parse_default("2014-02-30"),
            Err(ParseDateTimeError::Component("day"))
        );
        assert_eq!(
            parse_default("2014-03-20 24:00:00"),
            Err(ParseDateTimeError::Component("hour"))
        );
        assert_eq!(
            parse_default("2014-03-20 01:14:56+24:00"),
            Err(ParseDateTimeError::Component("offset"))
        );
    }

    #[test]
    fn numeric_offset() {
        assert_eq!(parse_numeric_offset("+13:00"), Some(offset!(+13)));
        assert_eq!(parse_numeric_offset("-0330"), Some(offset!(-3:30)));
        assert_eq!(parse_numeric_offset("+05"), Some(offset!(+5)));
        assert_eq!(parse_numeric_offset("13:00"), None);
        assert_eq!(parse_numeric_offset("+13:00 "), None);
    }
}
