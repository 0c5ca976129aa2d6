//! The `to_tinydns_tai64` host function.
//!
//! Templating and configuration systems call functions with a list of
//! untyped values. This module provides [`to_tinydns_tai64`] for such
//! callers. It checks that it received exactly one argument and that this
//! argument is a string before handing it to [`encode`][crate::encode].
//!
//! ```
//! use tinydns_tai64::{to_tinydns_tai64, FunctionError, Value};
//!
//! assert_eq!(
//!     to_tinydns_tai64(&[Value::from("1970-01-01 00:00:00 UTC")]).unwrap(),
//!     "400000000000000a"
//! );
//! assert!(matches!(
//!     to_tinydns_tai64(&[]),
//!     Err(FunctionError::Arity { given: 0 })
//! ));
//! ```

use crate::config::ParseConfig;
use crate::datetime::ParseDateTimeError;
use crate::tai64::encode_with;
use core::fmt;
use std::collections::BTreeMap;

/// The name the function is exposed under.
pub const NAME: &str = "to_tinydns_tai64";

//------------ to_tinydns_tai64 ----------------------------------------------

/// Converts the single date/time string argument into a TAI64 label.
///
/// Missing offsets are treated as UTC.
pub fn to_tinydns_tai64(args: &[Value]) -> Result<String, FunctionError> {
    to_tinydns_tai64_with(args, &ParseConfig::default())
}

/// Converts the single argument using the given parser config.
///
/// The argument count is checked first, then the argument’s type, and only
/// then is the string parsed.
pub fn to_tinydns_tai64_with(
    args: &[Value],
    config: &ParseConfig,
) -> Result<String, FunctionError> {
    let datetime = match args {
        [arg] => arg,
        _ => return Err(FunctionError::Arity { given: args.len() }),
    };
    let datetime = datetime
        .as_str()
        .ok_or_else(|| FunctionError::Type(datetime.type_name()))?;
    encode_with(datetime, config).map_err(FunctionError::Parse)
}

//------------ Value ---------------------------------------------------------

/// An untyped value handed to a host function.
///
/// With the `serde` feature, values can be deserialized from any self
/// describing format. JSON `null` becomes [`Value::Undef`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// The undefined value.
    Undef,

    /// A boolean.
    Boolean(bool),

    /// An integer.
    Integer(i64),

    /// A floating point number.
    Float(f64),

    /// A string.
    String(String),

    /// An array of values.
    Array(Vec<Value>),

    /// A hash of values.
    Hash(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the string if the value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::String(ref s) => Some(s),
            _ => None,
        }
    }

    /// Returns the name of the value’s type.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Undef => "Undef",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Hash(_) => "Hash",
        }
    }
}

//--- From

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

//============ Error Types ===================================================

//------------ FunctionError -------------------------------------------------

/// Calling the host function failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FunctionError {
    /// The function wasn’t given exactly one argument.
    Arity {
        /// The number of arguments given.
        given: usize,
    },

    /// The argument wasn’t a string.
    ///
    /// The value names the type of the argument given instead.
    Type(&'static str),

    /// The argument wasn’t a date/time.
    Parse(ParseDateTimeError),
}

impl From<ParseDateTimeError> for FunctionError {
    fn from(err: ParseDateTimeError) -> Self {
        FunctionError::Parse(err)
    }
}

//--- Display and Error

impl fmt::Display for FunctionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FunctionError::Arity { given } => write!(
                f,
                "{}(): Wrong number of arguments given ({} for 1)",
                NAME, given
            ),
            FunctionError::Type(given) => write!(
                f,
                "{}(): Requires a datetime string to work with, got {}",
                NAME, given
            ),
            FunctionError::Parse(ref err) => write!(f, "{}(): {}", NAME, err),
        }
    }
}

impl std::error::Error for FunctionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            FunctionError::Parse(ref err) => Some(err),
            _ => None,
        }
    }
}

//============ Testing =======================================================
