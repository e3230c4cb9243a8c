//! Compound range tokens used by the price, mileage and year filters.
//!
//! Tokens are `"<min>-<max>"` (inclusive on both ends) or `"<min>+"`
//! (no upper bound). The sentinel `"all"` means the dimension is not
//! constrained. Anything else that fails to parse is kept verbatim as
//! [`RangeFilter::Invalid`], which matches no vehicle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ALL;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RangeFilter {
    #[default]
    Any,
    Between { min: i64, max: i64 },
    AtLeast { min: i64 },
    /// Token whose bounds could not be read. Fails closed.
    Invalid(String),
}

impl RangeFilter {
    /// Decode a range token. Never fails: malformed input becomes `Invalid`.
    pub fn parse(token: &str) -> Self {
        if token == ALL {
            return RangeFilter::Any;
        }
        match parse_range(token) {
            (Some(min), Bound::Unbounded) => RangeFilter::AtLeast { min },
            (Some(min), Bound::Value(max)) => RangeFilter::Between { min, max },
            _ => RangeFilter::Invalid(token.to_string()),
        }
    }

    pub fn is_constrained(&self) -> bool {
        !matches!(self, RangeFilter::Any)
    }

    pub fn contains(&self, value: i64) -> bool {
        match self {
            RangeFilter::Any => true,
            RangeFilter::Between { min, max } => value >= *min && value <= *max,
            RangeFilter::AtLeast { min } => value >= *min,
            RangeFilter::Invalid(_) => false,
        }
    }
}

impl From<String> for RangeFilter {
    fn from(token: String) -> Self {
        RangeFilter::parse(&token)
    }
}

impl From<&str> for RangeFilter {
    fn from(token: &str) -> Self {
        RangeFilter::parse(token)
    }
}

impl From<RangeFilter> for String {
    fn from(filter: RangeFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for RangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeFilter::Any => f.write_str(ALL),
            RangeFilter::Between { min, max } => write!(f, "{}-{}", min, max),
            RangeFilter::AtLeast { min } => write!(f, "{}+", min),
            RangeFilter::Invalid(raw) => f.write_str(raw),
        }
    }
}

/// Upper bound of a parsed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Value(i64),
    Unbounded,
    /// The segment held no digits.
    NotANumber,
}

/// Split a token into its numeric bounds.
///
/// `None` for the minimum and `Bound::NotANumber` for the maximum stand in
/// for segments that are not numbers. Callers must only pass tokens that
/// are not the `"all"` sentinel.
pub fn parse_range(token: &str) -> (Option<i64>, Bound) {
    if let Some(min) = token.strip_suffix('+') {
        return (parse_int(min), Bound::Unbounded);
    }
    match token.split_once('-') {
        Some((left, right)) => {
            let max = parse_int(right).map_or(Bound::NotANumber, Bound::Value);
            (parse_int(left), max)
        }
        None => (parse_int(token), Bound::NotANumber),
    }
}

/// Lenient integer read: skips leading whitespace, accepts one sign and
/// then the longest run of decimal digits, ignoring whatever follows.
fn parse_int(segment: &str) -> Option<i64> {
    let trimmed = segment.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
