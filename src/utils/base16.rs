//! Decoding and encoding of Base 16 a.k.a. hex digits.
//!
//! The Base 16 encoding is defined in [RFC 4648]. It really is just a normal
//! hex-encoding using the (case-insensitive) letters ‘a’ to ‘f’ as
//! additional values for the digits.
//!
//! Unlike the RFC, tinydns-data wants its timestamps in lower case, so that
//! is what the encoding functions here produce. Decoding accepts either
//! case. Since the labels we deal with always have a fixed size, decoding
//! happens into octet arrays via the [`Decoder`] type.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use core::fmt;

//------------ Convenience Functions -----------------------------------------

/// Decodes a string with Base 16 encoded data into an array.
///
/// The string must encode exactly `N` octets.
pub fn decode_array<const N: usize>(s: &str) -> Result<[u8; N], DecodeError> {
    let mut decoder = Decoder::<N>::new();
    for ch in s.chars() {
        decoder.push(ch)?;
    }
    decoder.finalize()
}

/// Encodes binary data in Base 16 and writes it into a format stream.
///
/// This function is intended to be used in implementations of formatting
/// traits:
///
/// ```
/// use core::fmt;
/// use tinydns_tai64::utils::base16;
///
/// struct Foo<'a>(&'a [u8]);
///
/// impl<'a> fmt::Display for Foo<'a> {
///     fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
///         base16::display(&self.0, f)
///     }
/// }
/// ```
pub fn display<Octets, Target>(octets: &Octets, f: &mut Target) -> fmt::Result
where
    Octets: AsRef<[u8]> + ?Sized,
    Target: fmt::Write,
{
    for &octet in octets.as_ref() {
        f.write_str(ENCODE_ALPHABET[usize::from(octet)])?;
    }
    Ok(())
}

/// Encodes binary data in Base 16 and returns the encoded data as a string.
pub fn encode_string<B: AsRef<[u8]> + ?Sized>(bytes: &B) -> String {
    let mut res = String::with_capacity(bytes.as_ref().len() * 2);
    display(bytes, &mut res).unwrap();
    res
}

//------------ Decoder -------------------------------------------------------

/// A Base 16 decoder for exactly `N` octets.
///
/// This type keeps all the state for decoding a sequence of characters
/// representing data encoded in Base 16. Upon success, the decoder returns
/// the decoded data.
pub struct Decoder<const N: usize> {
    /// A buffer for the first half of an octet.
    buf: Option<u8>,

    /// The octets decoded so far.
    target: [u8; N],

    /// The number of complete octets in `target`.
    len: usize,

    /// The first error encountered, if any.
    err: Option<DecodeError>,
}

impl<const N: usize> Decoder<N> {
    /// Creates a new, empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Decoder {
            buf: None,
            target: [0; N],
            len: 0,
            err: None,
        }
    }

    /// Finalizes decoding and returns the decoded data.
    pub fn finalize(self) -> Result<[u8; N], DecodeError> {
        if let Some(err) = self.err {
            return Err(err);
        }
        if self.buf.is_some() || self.len < N {
            return Err(DecodeError::ShortInput);
        }
        Ok(self.target)
    }

    /// Decodes one more character of data.
    ///
    /// Returns an error as soon as the encoded data is determined to be
    /// illegal. It is okay to push more data after the first error. The
    /// method will just keep returning errors.
    pub fn push(&mut self, ch: char) -> Result<(), DecodeError> {
        if let Some(err) = self.err {
            return Err(err);
        }
        let value = match ch.to_digit(16) {
            Some(value) => value as u8,
            None => return self.fail(DecodeError::IllegalChar(ch)),
        };
        if let Some(upper) = self.buf.take() {
            self.target[self.len] = upper | value;
            self.len += 1;
        } else if self.len >= N {
            return self.fail(DecodeError::TrailingInput);
        } else {
            self.buf = Some(value << 4)
        }
        Ok(())
    }

    fn fail(&mut self, err: DecodeError) -> Result<(), DecodeError> {
        self.err = Some(err);
        Err(err)
    }
}

impl<const N: usize> Default for Decoder<N> {
    fn default() -> Self {
        Self::new()
    }
}

//============ Error Types ===================================================

//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding Base 16 data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// A character was pushed that isn’t allowed in the encoding.
    IllegalChar(char),

    /// There was more data than fits into the target.
    TrailingInput,

    /// The input ended before the target was complete.
    ShortInput,
}

//--- Display and Error

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::TrailingInput => f.write_str("trailing input"),
            DecodeError::IllegalChar(ch) => {
                write!(f, "illegal character '{}'", ch)
            }
            DecodeError::ShortInput => f.write_str("incomplete input"),
        }
    }
}

impl std::error::Error for DecodeError {}

//------------ Constants -----------------------------------------------------

/// The alphabet used for encoding.
///
/// `char::from_digit` would give us lower case letters, too, but a table
/// lets us write a whole octet at once.
const ENCODE_ALPHABET: [&str; 256] = [
    "00", "01", "02", "03", "04", "05", "06", "07", "08", "09", "0a", "0b",
    "0c", "0d", "0e", "0f", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "1a", "1b", "1c", "1d", "1e", "1f", "20", "21", "22", "23",
    "24", "25", "26", "27", "28", "29", "2a", "2b", "2c", "2d", "2e", "2f",
    "30", "31", "32", "33", "34", "35", "36", "37", "38", "39", "3a", "3b",
    "3c", "3d", "3e", "3f", "40", "41", "42", "43", "44", "45", "46", "47",
    "48", "49", "4a", "4b", "4c", "4d", "4e", "4f", "50", "51", "52", "53",
    "54", "55", "56", "57", "58", "59", "5a", "5b", "5c", "5d", "5e", "5f",
    "60", "61", "62", "63", "64", "65", "66", "67", "68", "69", "6a", "6b",
    "6c", "6d", "6e", "6f", "70", "71", "72", "73", "74", "75", "76", "77",
    "78", "79", "7a", "7b", "7c", "7d", "7e", "7f", "80", "81", "82", "83",
    "84", "85", "86", "87", "88", "89", "8a", "8b", "8c", "8d", "8e", "8f",
    "90", "91", "92", "93", "94", "95", "96", "97", "98", "99", "9a", "9b",
    "9c", "9d", "9e", "9f", "a0", "a1", "a2", "a3", "a4", "a5", "a6", "a7",
    "a8", "a9", "aa", "ab", "ac", "ad", "ae", "af", "b0", "b1", "b2", "b3",
    "b4", "b5", "b6", "b7", "b8", "b9", "ba", "bb", "bc", "bd", "be", "bf",
    "c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8", "c9", "ca", "cb",
    "cc", "cd", "ce", "cf", "d0", "d1", "d2", "d3", "d4", "d5", "d6", "d7",
    "d8", "d9", "da", "db", "dc", "dd", "de", "df", "e0", "e1", "e2", "e3",
    "e4", "e5", "e6", "e7", "e8", "e9", "ea", "eb", "ec", "ed", "ee", "ef",
    "f0", "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "fa", "fb",
    "fc", "fd", "fe", "ff",
];

//============ Test ==========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_str() {
        assert_eq!(decode_array::<0>("").unwrap(), [0u8; 0]);
        assert_eq!(decode_array::<1>("F0").unwrap(), [0xF0]);
        assert_eq!(decode_array::<2>("F00f").unwrap(), [0xF0, 0x0F]);
    }

    #[test]
    fn decode_bad() {
        assert_eq!(decode_array::<2>("F0"), Err(DecodeError::ShortInput));
        assert_eq!(decode_array::<2>("F00"), Err(DecodeError::ShortInput));
        assert_eq!(
            decode_array::<1>("F00f"),
            Err(DecodeError::TrailingInput)
        );
        assert_eq!(
            decode_array::<1>("g0"),
            Err(DecodeError::IllegalChar('g'))
        );
    }

    #[test]
    fn test_display() {
        fn fmt(s: &[u8]) -> String {
            let mut out = String::new();
            display(s, &mut out).unwrap();
            out
        }

        assert_eq!(fmt(b""), "");
        assert_eq!(fmt(b"\xf0"), "f0");
        assert_eq!(fmt(b"\xf0\x0f"), "f00f");
        assert_eq!(encode_string(b"\x40\0\0\0\0\0\0\x0a"), "400000000000000a");
    }
}
