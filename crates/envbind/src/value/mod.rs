//! String-to-value coercion.
//!
//! Every bindable field implements [`FieldValue`], the object-safe
//! capability the binder uses to write into a field without knowing its
//! concrete type. The implementation chosen by the type system replaces a
//! runtime type switch:
//!
//! | Field type | Conversion |
//! |------------|------------|
//! | `DateTime<FixedOffset>`, `DateTime<Utc>` | RFC 3339 |
//! | `Duration` | integer nanoseconds, then `1h30m` style |
//! | `Vec<String>`, numeric `Vec`s | split on the list separator, trim, parse each |
//! | `Vec<u8>` | raw bytes, or a numeric list with byte lists enabled |
//! | `HashMap<String, String>` | `k1:v1,k2:v2` |
//! | any [`TextDecode`] type | delegated to the type |
//! | `Option<T>` | decode into a new `T`; unsupported `T` is left `None` |
//! | `bool`, integers, floats, `String` | direct parse with overflow checks |
//! | [`Json<T>`] | JSON document |
//!
//! Derived structs implement `FieldValue` too, but only to take part in
//! nested (`">"`) binding; a plain key on a struct field is an
//! unsupported-type error.

mod json;
mod list;
mod scalar;
mod text;

pub use json::Json;
pub use scalar::Scalar;
pub use text::TextDecode;

use std::fmt::{self, Display, Formatter};

use crate::binder::BindContext;
use crate::describe::Describer;
use crate::error::{CoerceError, Error};
use crate::settings::Settings;

/// Coarse classification of a field type, used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `bool`.
    Bool,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    Uint,
    /// Floating point numbers.
    Float,
    /// `String`.
    String,
    /// `std::time::Duration`.
    Duration,
    /// Timestamps.
    Time,
    /// Lists other than `Vec<u8>`.
    List,
    /// `Vec<u8>`.
    Bytes,
    /// String maps.
    Map,
    /// [`TextDecode`] types.
    Text,
    /// [`Json`] wrappers.
    Json,
    /// `Option<T>`.
    Optional,
    /// Derived bindable structs.
    Struct,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::Duration => "duration",
            Self::Time => "time",
            Self::List => "list",
            Self::Bytes => "bytes",
            Self::Map => "map",
            Self::Text => "text",
            Self::Json => "json",
            Self::Optional => "option",
            Self::Struct => "struct",
        };

        f.write_str(name)
    }
}

/// A field the binder can write into.
///
/// The methods with a `Self: Sized` bound are the hooks `Option<Self>`
/// uses to create a value it does not have yet; they are not part of the
/// trait object.
pub trait FieldValue {
    /// The concrete type name.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The coarse kind of this field.
    fn kind(&self) -> Kind;

    /// Replaces the value with one converted from `raw`.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] when `raw` cannot be converted.
    fn decode(&mut self, raw: &str, settings: &Settings) -> Result<(), CoerceError>;

    /// Whether the `unmarshalJSON` attribute is legal on this field.
    fn supports_structured(&self) -> bool {
        false
    }

    /// Decodes a JSON document on top of the current value.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError::Json`] for malformed documents and
    /// [`CoerceError::Unsupported`] when the type has no structured form.
    fn decode_structured(&mut self, _raw: &str) -> Result<(), CoerceError> {
        Err(CoerceError::Unsupported {
            type_name: self.type_name(),
            kind: self.kind(),
        })
    }

    /// Runs a nested build into this field.
    ///
    /// Returns `None` when the type cannot be bound, otherwise whether the
    /// nested build set anything.
    fn bind_nested(&mut self, _ctx: &BindContext<'_>) -> Option<Result<bool, Error>> {
        None
    }

    /// Lists the keys of this field's type when it can be bound.
    fn describe_nested(&self, _describer: &mut Describer<'_>) -> Option<Result<(), Error>> {
        None
    }

    /// Decodes `raw` into an optional slot.
    ///
    /// # Errors
    ///
    /// The default reports [`CoerceError::Unsupported`], which `Option<Self>`
    /// treats as "leave unset".
    fn decode_option(
        _slot: &mut Option<Self>,
        _raw: &str,
        _settings: &Settings,
    ) -> Result<(), CoerceError>
    where
        Self: Sized,
    {
        Err(CoerceError::Unsupported {
            type_name: std::any::type_name::<Self>(),
            kind: Kind::Optional,
        })
    }

    /// Whether `Option<Self>` accepts the `unmarshalJSON` attribute.
    fn structured_capable() -> bool
    where
        Self: Sized,
    {
        false
    }

    /// Decodes a JSON document into an optional slot.
    ///
    /// # Errors
    ///
    /// See [`FieldValue::decode_structured`].
    fn decode_structured_option(slot: &mut Option<Self>, raw: &str) -> Result<(), CoerceError>
    where
        Self: Sized,
    {
        match slot {
            Some(value) => value.decode_structured(raw),
            None => Err(CoerceError::Unsupported {
                type_name: std::any::type_name::<Self>(),
                kind: Kind::Optional,
            }),
        }
    }

    /// Runs a nested build into an optional slot.
    fn bind_nested_option(
        _slot: &mut Option<Self>,
        _ctx: &BindContext<'_>,
    ) -> Option<Result<bool, Error>>
    where
        Self: Sized,
    {
        None
    }

    /// Lists the keys of `Self` for an optional slot.
    fn describe_nested_option(_describer: &mut Describer<'_>) -> Option<Result<(), Error>>
    where
        Self: Sized,
    {
        None
    }
}

// ============================================================================
// Option<T>
// ============================================================================

impl<T: FieldValue> FieldValue for Option<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn kind(&self) -> Kind {
        Kind::Optional
    }

    fn decode(&mut self, raw: &str, settings: &Settings) -> Result<(), CoerceError> {
        match T::decode_option(self, raw, settings) {
            Err(err) if err.is_unsupported() => {
                tracing::trace!(
                    type_name = std::any::type_name::<T>(),
                    "optional field has no string form, leaving it unset"
                );
                Ok(())
            }
            other => other,
        }
    }

    fn supports_structured(&self) -> bool {
        T::structured_capable()
    }

    fn decode_structured(&mut self, raw: &str) -> Result<(), CoerceError> {
        T::decode_structured_option(self, raw)
    }

    fn bind_nested(&mut self, ctx: &BindContext<'_>) -> Option<Result<bool, Error>> {
        T::bind_nested_option(self, ctx)
    }

    fn describe_nested(&self, describer: &mut Describer<'_>) -> Option<Result<(), Error>> {
        T::describe_nested_option(describer)
    }
}

// ============================================================================
// Splitting
// ============================================================================

/// Splits `raw` on `separator` and trims each element.
///
/// Blank input yields no elements for every list kind.
pub(crate) fn split<'a>(raw: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    let elements = if raw.trim().is_empty() {
        None
    } else {
        Some(raw.split(separator).map(str::trim))
    };

    elements.into_iter().flatten()
}
