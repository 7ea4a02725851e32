//! Scalar conversions: booleans, numbers, strings, durations and timestamps.

use std::num::{IntErrorKind, ParseFloatError, ParseIntError};
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use num_traits::{Float, NumCast};

use super::{FieldValue, Kind, split};
use crate::duration::parse_duration;
use crate::error::CoerceError;
use crate::settings::Settings;

/// A type with a single-token string form.
///
/// Scalars are usable directly as fields and as `Vec<T>` elements. Implement
/// it for a domain type to get list support:
///
/// ```rust,ignore
/// impl envbind::Scalar for Port {
///     const KIND: envbind::Kind = envbind::Kind::Uint;
///
///     fn parse_scalar(raw: &str) -> Result<Self, envbind::CoerceError> {
///         u16::parse_scalar(raw).map(Port)
///     }
/// }
/// ```
pub trait Scalar: Sized {
    /// The kind reported in error messages.
    const KIND: Kind;

    /// The kind of a `Vec` of this scalar.
    const LIST_KIND: Kind = Kind::List;

    /// Parses one token.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] when `raw` is not a valid token.
    fn parse_scalar(raw: &str) -> Result<Self, CoerceError>;

    /// Parses a separated list of tokens; any element failure fails the list.
    ///
    /// # Errors
    ///
    /// Returns the first element's [`CoerceError`].
    fn parse_list(raw: &str, settings: &Settings) -> Result<Vec<Self>, CoerceError> {
        split(raw, settings.list_separator())
            .map(Self::parse_scalar)
            .collect()
    }
}

// ============================================================================
// Numbers
// ============================================================================

fn overflow(raw: &str, target: &'static str) -> CoerceError {
    CoerceError::Overflow {
        input: raw.to_string(),
        target,
    }
}

/// Parses at full width; an out-of-range literal is an overflow, not a
/// syntax error.
fn parse_wide<W>(raw: &str, target: &'static str) -> Result<W, CoerceError>
where
    W: FromStr<Err = ParseIntError>,
{
    raw.parse::<W>().map_err(|source| match source.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => overflow(raw, target),
        _ => CoerceError::InvalidInt {
            input: raw.to_string(),
            source,
        },
    })
}

macro_rules! impl_integer_scalar {
    ($wide:ty, $kind:ident => $($t:ty),+ $(,)?) => {
        $(
            impl Scalar for $t {
                const KIND: Kind = Kind::$kind;

                fn parse_scalar(raw: &str) -> Result<Self, CoerceError> {
                    let wide: $wide = parse_wide(raw, stringify!($t))?;

                    <$t as NumCast>::from(wide).ok_or_else(|| overflow(raw, stringify!($t)))
                }
            }
        )+
    };
}

impl_integer_scalar!(i64, Int => i8, i16, i32, i64, isize);
impl_integer_scalar!(u64, Uint => u16, u32, u64, usize);

/// `Vec<u8>` holds the raw bytes of the input unless byte lists are enabled.
impl Scalar for u8 {
    const KIND: Kind = Kind::Uint;
    const LIST_KIND: Kind = Kind::Bytes;

    fn parse_scalar(raw: &str) -> Result<Self, CoerceError> {
        let wide: u64 = parse_wide(raw, "u8")?;

        <Self as NumCast>::from(wide).ok_or_else(|| overflow(raw, "u8"))
    }

    fn parse_list(raw: &str, settings: &Settings) -> Result<Vec<Self>, CoerceError> {
        if !settings.byte_lists() {
            return Ok(raw.as_bytes().to_vec());
        }

        split(raw, settings.list_separator())
            .map(Self::parse_scalar)
            .collect()
    }
}

fn is_infinity_literal(raw: &str) -> bool {
    raw.trim_start_matches(['+', '-'])
        .to_ascii_lowercase()
        .starts_with("inf")
}

/// Parses at the target width, so literals that round to `MAX` stay finite.
fn parse_float<F>(raw: &str, target: &'static str) -> Result<F, CoerceError>
where
    F: Float + FromStr<Err = ParseFloatError>,
{
    let value: F = raw.parse().map_err(|source| CoerceError::InvalidFloat {
        input: raw.to_string(),
        source,
    })?;

    if value.is_infinite() && !is_infinity_literal(raw) {
        return Err(overflow(raw, target));
    }

    Ok(value)
}

impl Scalar for f64 {
    const KIND: Kind = Kind::Float;

    fn parse_scalar(raw: &str) -> Result<Self, CoerceError> {
        parse_float(raw, "f64")
    }
}

impl Scalar for f32 {
    const KIND: Kind = Kind::Float;

    fn parse_scalar(raw: &str) -> Result<Self, CoerceError> {
        parse_float(raw, "f32")
    }
}

// ============================================================================
// Booleans and strings
// ============================================================================

impl Scalar for bool {
    const KIND: Kind = Kind::Bool;

    fn parse_scalar(raw: &str) -> Result<Self, CoerceError> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(CoerceError::InvalidBool {
                input: raw.to_string(),
            })
        }
    }
}

impl Scalar for String {
    const KIND: Kind = Kind::String;

    fn parse_scalar(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_string())
    }
}

// ============================================================================
// Time
// ============================================================================

impl Scalar for Duration {
    const KIND: Kind = Kind::Duration;

    fn parse_scalar(raw: &str) -> Result<Self, CoerceError> {
        Ok(parse_duration(raw)?)
    }
}

impl Scalar for DateTime<FixedOffset> {
    const KIND: Kind = Kind::Time;

    fn parse_scalar(raw: &str) -> Result<Self, CoerceError> {
        DateTime::parse_from_rfc3339(raw).map_err(|source| CoerceError::Timestamp {
            input: raw.to_string(),
            source,
        })
    }
}

impl Scalar for DateTime<Utc> {
    const KIND: Kind = Kind::Time;

    fn parse_scalar(raw: &str) -> Result<Self, CoerceError> {
        DateTime::<FixedOffset>::parse_scalar(raw).map(|t| t.with_timezone(&Utc))
    }
}

// ============================================================================
// FieldValue
// ============================================================================

macro_rules! impl_scalar_field {
    ($($t:ty),+ $(,)?) => {
        $(
            impl FieldValue for $t {
                fn kind(&self) -> Kind {
                    <$t as Scalar>::KIND
                }

                fn decode(&mut self, raw: &str, _settings: &Settings) -> Result<(), CoerceError> {
                    *self = <$t as Scalar>::parse_scalar(raw)?;
                    Ok(())
                }

                fn decode_option(
                    slot: &mut Option<Self>,
                    raw: &str,
                    _settings: &Settings,
                ) -> Result<(), CoerceError> {
                    *slot = Some(<$t as Scalar>::parse_scalar(raw)?);
                    Ok(())
                }
            }
        )+
    };
}

impl_scalar_field!(
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    String,
    Duration,
    DateTime<FixedOffset>,
    DateTime<Utc>,
);
