//! JSON-decoded fields.

use std::ops::{Deref, DerefMut};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{FieldValue, Kind};
use crate::error::CoerceError;
use crate::settings::Settings;

/// A field decoded from a JSON document.
///
/// With the `unmarshalJSON` tag attribute the document is merged on top of
/// the current value: objects are merged key by key and anything else is
/// replaced. This lets a `default=` document be partially overridden by the
/// external one. Without the attribute the document replaces the value.
///
/// ```rust
/// use envbind::{FieldValue, Json, Settings};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Deserialize, Serialize)]
/// struct Limits {
///     burst: u32,
///     rate: u32,
/// }
///
/// let mut limits = Json(Limits::default());
/// limits.decode_structured(r#"{"burst": 10, "rate": 5}"#).unwrap();
/// limits.decode_structured(r#"{"rate": 7}"#).unwrap();
///
/// assert_eq!(limits.burst, 10);
/// assert_eq!(limits.rate, 7);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwraps the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

fn merge(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(current), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match current.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        current.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn overlay<T>(current: &T, raw: &str) -> Result<T, CoerceError>
where
    T: Serialize + DeserializeOwned,
{
    let mut document = serde_json::to_value(current)?;
    merge(&mut document, serde_json::from_str(raw)?);

    Ok(serde_json::from_value(document)?)
}

impl<T> FieldValue for Json<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    fn kind(&self) -> Kind {
        Kind::Json
    }

    fn decode(&mut self, raw: &str, _settings: &Settings) -> Result<(), CoerceError> {
        self.0 = serde_json::from_str(raw)?;
        Ok(())
    }

    fn supports_structured(&self) -> bool {
        true
    }

    fn decode_structured(&mut self, raw: &str) -> Result<(), CoerceError> {
        self.0 = overlay(&self.0, raw)?;
        Ok(())
    }

    fn decode_option(
        slot: &mut Option<Self>,
        raw: &str,
        _settings: &Settings,
    ) -> Result<(), CoerceError> {
        *slot = Some(Self(serde_json::from_str(raw)?));
        Ok(())
    }

    fn structured_capable() -> bool {
        true
    }

    fn decode_structured_option(slot: &mut Option<Self>, raw: &str) -> Result<(), CoerceError> {
        slot.get_or_insert_with(Self::default).decode_structured(raw)
    }
}
