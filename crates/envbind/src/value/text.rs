//! The text-decoding extension point.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use super::{FieldValue, Kind};
use crate::error::{BoxError, CoerceError};
use crate::settings::Settings;

/// A type that converts itself from text.
///
/// This is the extension point for enums and domain values. Any
/// `TextDecode` type is a valid field type, and so is `Option` of it.
///
/// ```rust
/// use envbind::{BoxError, TextDecode};
///
/// #[derive(Debug, Default, PartialEq)]
/// enum Color {
///     #[default]
///     Unset,
///     Red,
///     Blue,
/// }
///
/// impl TextDecode for Color {
///     fn decode_text(text: &str) -> Result<Self, BoxError> {
///         match text.to_ascii_lowercase().as_str() {
///             "red" => Ok(Self::Red),
///             "blue" => Ok(Self::Blue),
///             _ => Err(format!("unrecognized color name {text:?}").into()),
///         }
///     }
/// }
///
/// assert_eq!(Color::decode_text("RED").unwrap(), Color::Red);
/// ```
///
/// Types that already implement [`FromStr`](std::str::FromStr) can use
/// [`impl_text_decode!`](crate::impl_text_decode).
pub trait TextDecode: Sized {
    /// Converts `text` into a value.
    ///
    /// # Errors
    ///
    /// The error is reported to the caller verbatim.
    fn decode_text(text: &str) -> Result<Self, BoxError>;
}

fn decode_text<T: TextDecode>(raw: &str) -> Result<T, CoerceError> {
    T::decode_text(raw).map_err(|error| CoerceError::Text {
        type_name: std::any::type_name::<T>(),
        error,
    })
}

impl<T: TextDecode> FieldValue for T {
    fn kind(&self) -> Kind {
        Kind::Text
    }

    fn decode(&mut self, raw: &str, _settings: &Settings) -> Result<(), CoerceError> {
        *self = decode_text(raw)?;
        Ok(())
    }

    fn decode_option(
        slot: &mut Option<Self>,
        raw: &str,
        _settings: &Settings,
    ) -> Result<(), CoerceError> {
        *slot = Some(decode_text(raw)?);
        Ok(())
    }
}

/// Implements [`TextDecode`] through [`FromStr`](std::str::FromStr).
///
/// The `FromStr` error must convert into [`BoxError`](crate::BoxError),
/// which holds for any `std::error::Error + Send + Sync` and for `String`.
///
/// ```rust
/// use std::str::FromStr;
///
/// #[derive(Debug, PartialEq)]
/// struct Port(u16);
///
/// impl FromStr for Port {
///     type Err = std::num::ParseIntError;
///
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         s.parse().map(Port)
///     }
/// }
///
/// envbind::impl_text_decode!(Port);
///
/// assert_eq!(<Port as envbind::TextDecode>::decode_text("80").unwrap(), Port(80));
/// ```
#[macro_export]
macro_rules! impl_text_decode {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::TextDecode for $t {
                fn decode_text(
                    text: &str,
                ) -> ::core::result::Result<Self, $crate::BoxError> {
                    <$t as ::core::str::FromStr>::from_str(text)
                        .map_err(::core::convert::Into::into)
                }
            }
        )+
    };
}

impl_text_decode!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, PathBuf);

#[cfg(feature = "url")]
impl_text_decode!(url::Url);
