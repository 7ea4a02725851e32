//! Duration parsing.
//!
//! Durations are read in two steps. A plain base-10 integer is taken as a
//! count of nanoseconds. Anything else is parsed with the familiar
//! `<number><unit>` grammar, where terms may be summed (`1h30m`) and may
//! carry a fraction (`1.5s`).
//!
//! | Unit | Meaning |
//! |------|---------|
//! | `ns` | nanoseconds |
//! | `us`, `µs`, `μs` | microseconds |
//! | `ms` | milliseconds |
//! | `s` | seconds |
//! | `m` | minutes |
//! | `h` | hours |
//!
//! [`Duration`] is unsigned, so a negative non-zero duration is rejected.

use std::time::Duration;

use thiserror::Error as ThisError;

/// Largest representable duration, in nanoseconds.
const MAX_NANOS: u64 = i64::MAX as u64;

/// Errors produced by [`parse_duration`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum DurationError {
    /// The input does not follow the duration grammar, or overflows.
    #[error("time: invalid duration {0:?}")]
    Invalid(String),

    /// A number was not followed by a unit.
    #[error("time: missing unit in duration {0:?}")]
    MissingUnit(String),

    /// A unit was not recognized.
    #[error("time: unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The rejected unit.
        unit: String,
        /// The full input.
        input: String,
    },

    /// The duration is below zero.
    #[error("time: negative duration {0:?}")]
    Negative(String),
}

/// Parses integer nanoseconds first, then the unit grammar.
///
/// # Errors
///
/// Returns a [`DurationError`] describing the first problem found.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    if let Ok(nanos) = input.parse::<i64>() {
        return u64::try_from(nanos)
            .map(Duration::from_nanos)
            .map_err(|_| DurationError::Negative(input.to_string()));
    }

    parse_units(input)
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(60 * 60 * 1_000_000_000),
        _ => None,
    }
}

fn parse_units(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;

    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after_whole) = leading_int(rest).ok_or_else(invalid)?;
        let has_whole = after_whole.len() != rest.len();
        rest = after_whole;

        let mut fraction: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut has_fraction = false;

        if let Some(after_dot) = rest.strip_prefix('.') {
            let (f, s, remaining) = leading_fraction(after_dot);
            has_fraction = remaining.len() != after_dot.len();
            fraction = f;
            scale = s;
            rest = remaining;
        }

        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());

        if unit_len == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }

        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        let factor = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let mut term = whole
            .checked_mul(factor)
            .filter(|v| *v <= MAX_NANOS)
            .ok_or_else(invalid)?;

        if fraction > 0 {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss,
                reason = "fractional nanoseconds are truncated toward zero"
            )]
            let extra = (fraction as f64 * (factor as f64 / scale)) as u64;

            term = term
                .checked_add(extra)
                .filter(|v| *v <= MAX_NANOS)
                .ok_or_else(invalid)?;
        }

        total = total
            .checked_add(term)
            .filter(|v| *v <= MAX_NANOS)
            .ok_or_else(invalid)?;
    }

    if negative && total != 0 {
        return Err(DurationError::Negative(input.to_string()));
    }

    Ok(Duration::from_nanos(total))
}

/// Consumes leading ASCII digits. `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());

    let mut value: u64 = 0;
    for digit in s[..end].bytes() {
        value = value
            .checked_mul(10)?
            .checked_add(u64::from(digit - b'0'))?;
    }

    Some((value, &s[end..]))
}

/// Consumes leading fraction digits, dropping precision that would overflow.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());

    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut saturated = false;

    for digit in s[..end].bytes() {
        if saturated {
            continue;
        }

        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => saturated = true,
        }
    }

    (value, scale, &s[end..])
}
