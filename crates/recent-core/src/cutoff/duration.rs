/// Relative duration parsing: `24h`, `1h30m`, `1.5h`, `-90s`, `300ms`.
///
/// A duration is an optional sign followed by one or more decimal numbers,
/// each with an optional fraction and a mandatory unit suffix. Valid units
/// are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. The bare literal `0` needs
/// no unit.
use std::time::{Duration, SystemTime};

/// Unit suffixes and their length in nanoseconds.
const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("\u{b5}s", 1_000),  // micro sign
    ("\u{3bc}s", 1_000), // Greek small letter mu
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3_600 * 1_000_000_000),
];

/// Why a duration string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,
    #[error("expected a number at \"{0}\"")]
    MissingNumber(String),
    #[error("missing unit after \"{0}\"")]
    MissingUnit(String),
    #[error("unknown unit \"{0}\"")]
    UnknownUnit(String),
    #[error("duration out of range")]
    OutOfRange,
}

/// A duration that may point backwards or forwards in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedDuration {
    pub negative: bool,
    pub magnitude: Duration,
}

impl SignedDuration {
    /// `t - self`, or `None` if the result is not representable.
    ///
    /// A negative duration moves `t` forwards.
    pub fn before(&self, t: SystemTime) -> Option<SystemTime> {
        if self.negative {
            t.checked_add(self.magnitude)
        } else {
            t.checked_sub(self.magnitude)
        }
    }
}

/// Parse a duration string.
pub fn parse_duration(input: &str) -> Result<SignedDuration, DurationError> {
    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(SignedDuration {
            negative,
            magnitude: Duration::ZERO,
        });
    }
    if s.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        let (value, rest) = take_number(s)?;
        let (unit, rest) = take_unit(rest);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(s.to_string()));
        }
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|&(_, nanos)| nanos)
            .ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        total = value
            .nanos(scale)
            .and_then(|n| total.checked_add(n))
            .filter(|&n| n <= u64::MAX as u128)
            .ok_or(DurationError::OutOfRange)?;
        s = rest;
    }

    Ok(SignedDuration {
        negative,
        magnitude: Duration::from_nanos(total as u64),
    })
}

/// `integer.fraction` with the fraction kept as digits over a power of ten.
struct Decimal {
    integer: u128,
    fraction: u128,
    scale: u128,
}

impl Decimal {
    fn nanos(&self, unit: u128) -> Option<u128> {
        let whole = self.integer.checked_mul(unit)?;
        let part = self.fraction.checked_mul(unit)? / self.scale;
        whole.checked_add(part)
    }
}

/// Leading `[0-9]*(\.[0-9]*)?`, requiring at least one digit on either side.
fn take_number(s: &str) -> Result<(Decimal, &str), DurationError> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut integer: u128 = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        integer = integer
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(bytes[i] - b'0')))
            .ok_or(DurationError::OutOfRange)?;
        i += 1;
    }
    let int_digits = i;

    let mut fraction: u128 = 0;
    let mut scale: u128 = 1;
    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            // Digits past nanosecond precision of an hour cannot change the result.
            if frac_digits < 18 {
                fraction = fraction * 10 + u128::from(bytes[i] - b'0');
                scale *= 10;
            }
            frac_digits += 1;
            i += 1;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return Err(DurationError::MissingNumber(s.to_string()));
    }
    Ok((
        Decimal {
            integer,
            fraction,
            scale,
        },
        &s[i..],
    ))
}

/// Everything up to the next digit or `.`.
fn take_unit(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| c == '.' || c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}
