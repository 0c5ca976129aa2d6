//! Time zone abbreviations.
//!
//! Date/time strings often name their zone with an abbreviation like `NZDT`
//! or `EST` rather than a numeric offset. Abbreviations are ambiguous in
//! general, so this module only knows a fixed set of common ones, each
//! mapped to a fixed offset. Daylight saving names map to the daylight
//! offset, whatever the date.

use time::UtcOffset;

/// Returns the UTC offset for a time zone abbreviation.
///
/// The name is matched ignoring ASCII case. Returns `None` for unknown
/// names.
pub fn lookup(name: &str) -> Option<UtcOffset> {
    let seconds = ZONES
        .iter()
        .find(|(zone, _)| zone.eq_ignore_ascii_case(name))?
        .1;
    UtcOffset::from_whole_seconds(seconds).ok()
}

/// Returns whether `name` looks like it is meant to be a zone abbreviation.
pub(crate) fn is_zone_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|ch| ch.is_ascii_alphabetic())
}

//------------ Constants -----------------------------------------------------

const HOUR: i32 = 3600;
const MINUTE: i32 = 60;

/// The known abbreviations and their offsets in seconds.
const ZONES: &[(&str, i32)] = &[
    // Universal
    ("z", 0),
    ("ut", 0),
    ("utc", 0),
    ("gmt", 0),

    // North America
    ("nst", -3 * HOUR - 30 * MINUTE),
    ("ndt", -2 * HOUR - 30 * MINUTE),
    ("ast", -4 * HOUR),
    ("adt", -3 * HOUR),
    ("est", -5 * HOUR),
    ("edt", -4 * HOUR),
    ("cst", -6 * HOUR),
    ("cdt", -5 * HOUR),
    ("mst", -7 * HOUR),
    ("mdt", -6 * HOUR),
    ("pst", -8 * HOUR),
    ("pdt", -7 * HOUR),
    ("akst", -9 * HOUR),
    ("akdt", -8 * HOUR),
    ("hst", -10 * HOUR),

    // Europe
    ("wet", 0),
    ("west", HOUR),
    ("bst", HOUR),
    ("cet", HOUR),
    ("cest", 2 * HOUR),
    ("met", HOUR),
    ("mest", 2 * HOUR),
    ("eet", 2 * HOUR),
    ("eest", 3 * HOUR),
    ("msk", 3 * HOUR),

    // Asia
    ("ist", 5 * HOUR + 30 * MINUTE),
    ("sgt", 8 * HOUR),
    ("hkt", 8 * HOUR),
    ("jst", 9 * HOUR),
    ("kst", 9 * HOUR),

    // Australia and New Zealand
    ("awst", 8 * HOUR),
    ("acst", 9 * HOUR + 30 * MINUTE),
    ("acdt", 10 * HOUR + 30 * MINUTE),
    ("aest", 10 * HOUR),
    ("aedt", 11 * HOUR),
    ("nzst", 12 * HOUR),
    ("nzdt", 13 * HOUR),
];

//============ Testing =======================================================
