//! Key listing and `.env.example` generation.
//!
//! The [`Describer`] walks the same registration tables as the binder,
//! without reading any values, and reports every key a build would look up.

use std::fmt::Write as _;

use crate::error::Error;
use crate::schema::Bindable;
use crate::settings::Settings;
use crate::tag::{Tag, TagKey};

/// One key a build reads from the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInfo {
    /// Dotted path to the field, e.g. `db.host`.
    pub field: String,

    /// The full key with all nested prefixes applied.
    pub key: String,

    /// The `default=` literal, if any.
    pub default: Option<String>,

    /// Whether the field is `required`.
    pub required: bool,

    /// Whether the value is decoded as a JSON document.
    pub structured: bool,

    /// The Rust type of the field.
    pub type_name: &'static str,
}

impl KeyInfo {
    /// Formats this key as a `.env.example` entry.
    ///
    /// ```text
    /// # (required, type: u16)
    /// PORT=
    ///
    /// # (type: alloc::string::String)
    /// # HOST=localhost
    /// ```
    #[must_use]
    pub fn format(&self) -> String {
        let mut meta = Vec::new();
        if self.required {
            meta.push("required".to_string());
        }
        if self.structured {
            meta.push("json".to_string());
        }
        meta.push(format!("type: {}", self.type_name));

        let line = match &self.default {
            Some(default) => format!("# {}={default}", self.key),
            None => format!("{}=", self.key),
        };

        format!("# ({})\n{line}", meta.join(", "))
    }
}

/// Collects [`KeyInfo`] entries for a struct and its nested structs.
pub struct Describer<'a> {
    settings: &'a Settings,
    prefix: String,
    path: Vec<&'static str>,
    keys: Vec<KeyInfo>,
}

impl<'a> Describer<'a> {
    pub(crate) const fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            prefix: String::new(),
            path: Vec::new(),
            keys: Vec::new(),
        }
    }

    pub(crate) fn into_keys(self) -> Vec<KeyInfo> {
        self.keys
    }

    /// Appends the keys of `T` under the current prefix.
    ///
    /// # Errors
    ///
    /// Returns tag syntax errors, and an internal error when a nested
    /// marker sits on a type that cannot be bound.
    pub fn describe<T: Bindable>(&mut self) -> Result<(), Error> {
        if self.path.len() >= crate::binder::MAX_DEPTH {
            return Err(Error::internal(format!(
                "nesting deeper than {} levels at prefix {:?}",
                crate::binder::MAX_DEPTH,
                self.prefix
            )));
        }

        let tag_key = self.settings.tag_key();
        let probe = T::default();

        for (index, info) in T::fields().iter().enumerate() {
            let Some(raw) = info.tag(tag_key) else {
                continue;
            };

            let field = probe.field(index).ok_or_else(|| {
                Error::internal(format!("field index {index} out of range for {}", T::NAME))
            })?;

            let tag = Tag::parse(raw);
            tag.validate(tag_key, info.name, info.public, field.supports_structured())?;

            match tag.key() {
                TagKey::Suppressed | TagKey::Empty => {}

                TagKey::Nested => {
                    let saved = self.prefix.len();
                    self.prefix.push_str(tag.prefix());
                    self.path.push(info.name);

                    let result = field.describe_nested(self).ok_or_else(|| {
                        Error::internal(format!(
                            "field {:?} of type {} is not a bindable struct",
                            info.name,
                            field.type_name()
                        ))
                    });

                    self.path.pop();
                    self.prefix.truncate(saved);
                    result??;
                }

                TagKey::Name(key) => {
                    let mut path = self.path.join(".");
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(info.name);

                    self.keys.push(KeyInfo {
                        field: path,
                        key: format!("{}{key}", self.prefix),
                        default: tag.default_value().map(str::to_string),
                        required: tag.is_required(),
                        structured: tag.is_structured(),
                        type_name: field.type_name(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Renders keys as a `.env.example` document.
#[must_use]
pub fn render_env_example(name: &str, keys: &[KeyInfo]) -> String {
    let mut out = format!("# Environment configuration for {name}\n");

    for key in keys {
        let _ = write!(out, "\n{}\n", key.format());
    }

    out
}
