//! List and map conversions.

use std::collections::{BTreeMap, HashMap};

use super::{FieldValue, Kind, Scalar, split};
use crate::error::CoerceError;
use crate::settings::Settings;

impl<T: Scalar> FieldValue for Vec<T> {
    fn kind(&self) -> Kind {
        T::LIST_KIND
    }

    fn decode(&mut self, raw: &str, settings: &Settings) -> Result<(), CoerceError> {
        *self = T::parse_list(raw, settings)?;
        Ok(())
    }

    fn decode_option(
        slot: &mut Option<Self>,
        raw: &str,
        settings: &Settings,
    ) -> Result<(), CoerceError> {
        *slot = Some(T::parse_list(raw, settings)?);
        Ok(())
    }
}

/// Parses `k1:v1,k2:v2`; every pair needs exactly one key/value separator.
fn parse_pairs<M>(raw: &str, settings: &Settings) -> Result<M, CoerceError>
where
    M: FromIterator<(String, String)>,
{
    let separator = settings.key_value_separator();

    split(raw, settings.list_separator())
        .map(|pair| {
            let mut parts = pair.split(separator);

            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => {
                    Ok((key.trim().to_string(), value.trim().to_string()))
                }
                _ => Err(CoerceError::KeyValuePair {
                    separator: separator.to_string(),
                }),
            }
        })
        .collect()
}

macro_rules! impl_string_map {
    ($($map:ident),+ $(,)?) => {
        $(
            impl FieldValue for $map<String, String> {
                fn kind(&self) -> Kind {
                    Kind::Map
                }

                fn decode(&mut self, raw: &str, settings: &Settings) -> Result<(), CoerceError> {
                    *self = parse_pairs(raw, settings)?;
                    Ok(())
                }

                fn supports_structured(&self) -> bool {
                    true
                }

                /// Keys in the document are added to, or replace, existing keys.
                fn decode_structured(&mut self, raw: &str) -> Result<(), CoerceError> {
                    let incoming: $map<String, String> = serde_json::from_str(raw)?;
                    self.extend(incoming);
                    Ok(())
                }

                fn decode_option(
                    slot: &mut Option<Self>,
                    raw: &str,
                    settings: &Settings,
                ) -> Result<(), CoerceError> {
                    *slot = Some(parse_pairs(raw, settings)?);
                    Ok(())
                }

                fn structured_capable() -> bool {
                    true
                }

                fn decode_structured_option(
                    slot: &mut Option<Self>,
                    raw: &str,
                ) -> Result<(), CoerceError> {
                    slot.get_or_insert_with(Self::new).decode_structured(raw)
                }
            }
        )+
    };
}

impl_string_map!(HashMap, BTreeMap);
