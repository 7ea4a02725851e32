//! The build lifecycle.
//!
//! Every build, and every nested sub-build, walks the same linear states;
//! the first error stops it:
//!
//! ```text
//! validate tags -> init hook -> defaults -> external values -> required check -> validate hook
//! ```
//!
//! A [`Builder`] holds the options and the [`Provider`]. Each (sub-)build
//! runs inside a [`BindContext`], which adds the key prefix in effect and
//! the nesting depth. A nested sub-build always starts from a fresh
//! `Default` instance and is only assigned to the parent field when it set
//! at least one value from the provider.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, debug_span, trace, warn};

use crate::describe::{Describer, KeyInfo, render_env_example};
use crate::error::Error;
use crate::provider::{EnvProvider, Provider};
use crate::schema::{Bindable, FieldInfo};
use crate::settings::Settings;
use crate::tag::{Tag, TagKey};

/// Nesting deeper than this is reported as an internal error.
pub const MAX_DEPTH: usize = 64;

// ============================================================================
// Builder
// ============================================================================

/// Builds configuration structs from a [`Provider`].
///
/// ```rust
/// use envbind::{Bindable, Builder, provider::MapProvider};
///
/// #[derive(Bindable, Debug, Default)]
/// struct Config {
///     #[envvar = "NAMES"]
///     pub names: Vec<String>,
///
///     #[envvar = "RETRIES,default=3"]
///     pub retries: u8,
/// }
///
/// let config: Config = Builder::new()
///     .list_separator(";")
///     .provider(MapProvider::from([("NAMES", "a;b")]))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.names, ["a", "b"]);
/// assert_eq!(config.retries, 3);
/// ```
///
/// A panic raised by user code during a build (a hook, a [`TextDecode`]
/// implementation, a `Default` impl) is caught and returned as
/// [`Error::Internal`]. This needs `panic = "unwind"`; under
/// `panic = "abort"` the process still aborts.
///
/// [`TextDecode`]: crate::TextDecode
pub struct Builder {
    settings: Settings,
    provider: Box<dyn Provider>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("settings", &self.settings)
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl Builder {
    /// Creates a builder with default settings over the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            provider: Box::new(EnvProvider::new()),
        }
    }

    /// Sets the list and map-pair separator. Empty restores `,`.
    #[must_use]
    pub fn list_separator(mut self, separator: impl Into<String>) -> Self {
        self.settings = self.settings.with_list_separator(separator);
        self
    }

    /// Sets the separator inside one map pair. Empty restores `:`.
    #[must_use]
    pub fn key_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.settings = self.settings.with_key_value_separator(separator);
        self
    }

    /// Sets the tag namespace to read. Empty restores `envvar`.
    #[must_use]
    pub fn tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.settings = self.settings.with_tag_key(tag_key);
        self
    }

    /// Treats `Vec<u8>` fields as lists of numbers.
    #[must_use]
    pub fn byte_lists(mut self, enabled: bool) -> Self {
        self.settings = self.settings.with_byte_lists(enabled);
        self
    }

    /// Retries a missed prefixed lookup with the bare key.
    #[must_use]
    pub fn prefix_fallback(mut self, enabled: bool) -> Self {
        self.settings = self.settings.with_prefix_fallback(enabled);
        self
    }

    /// Replaces all settings at once.
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the source values are read from.
    #[must_use]
    pub fn provider(mut self, provider: impl Provider + 'static) -> Self {
        self.provider = Box::new(provider);
        self
    }

    /// The settings in effect.
    #[must_use]
    pub const fn current_settings(&self) -> &Settings {
        &self.settings
    }

    fn context(&self) -> BindContext<'_> {
        BindContext {
            settings: &self.settings,
            provider: self.provider.as_ref(),
            prefix: String::new(),
            depth: 0,
        }
    }

    /// Creates a new `T` and runs the full lifecycle on it.
    ///
    /// # Errors
    ///
    /// Returns the first error of the build.
    pub fn build<T: Bindable>(&self) -> Result<T, Error> {
        contain(|| {
            let mut cfg = T::default();
            self.context().run(&mut cfg)?;
            Ok(cfg)
        })
    }

    /// Runs the lifecycle on an existing instance.
    ///
    /// On error `cfg` may be partially populated and must be discarded.
    ///
    /// # Errors
    ///
    /// Returns the first error of the build.
    pub fn bind<T: Bindable>(&self, cfg: &mut T) -> Result<(), Error> {
        contain(|| self.context().run(cfg).map(|_| ()))
    }

    /// Lists every key `T` reads, including those of nested structs.
    ///
    /// # Errors
    ///
    /// Returns tag syntax errors and nesting contract violations.
    pub fn keys<T: Bindable>(&self) -> Result<Vec<KeyInfo>, Error> {
        contain(|| {
            let mut describer = Describer::new(&self.settings);
            describer.describe::<T>()?;
            Ok(describer.into_keys())
        })
    }

    /// Renders a `.env.example` template for `T`.
    ///
    /// # Errors
    ///
    /// See [`Builder::keys`].
    pub fn env_example<T: Bindable>(&self) -> Result<String, Error> {
        Ok(render_env_example(T::NAME, &self.keys::<T>()?))
    }
}

/// Creates a `T` from the process environment with default settings.
///
/// # Errors
///
/// Returns the first error of the build.
pub fn new_config<T: Bindable>() -> Result<T, Error> {
    Builder::new().build()
}

/// Binds an existing `T` from the process environment with default
/// settings.
///
/// # Errors
///
/// Returns the first error of the build.
pub fn init_config<T: Bindable>(cfg: &mut T) -> Result<(), Error> {
    Builder::new().bind(cfg)
}

// ============================================================================
// Bind Context
// ============================================================================

/// State of one (sub-)build.
pub struct BindContext<'a> {
    settings: &'a Settings,
    provider: &'a dyn Provider,
    prefix: String,
    depth: usize,
}

/// A field whose tag passed validation.
struct TaggedField {
    index: usize,
    info: &'static FieldInfo,
    tag: Tag<'static>,
}

impl TaggedField {
    fn display_key(&self, prefix: &str) -> String {
        match self.tag.key() {
            TagKey::Nested => self.info.name.to_string(),
            _ => format!("{prefix}{}", self.tag.key_str()),
        }
    }
}

impl<'a> BindContext<'a> {
    /// The key prefix in effect.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        self.settings
    }

    fn child(&self, prefix: &str) -> Result<Self, Error> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::internal(format!(
                "nesting deeper than {MAX_DEPTH} levels at prefix {:?}",
                self.prefix
            )));
        }

        Ok(Self {
            settings: self.settings,
            provider: self.provider,
            prefix: format!("{}{prefix}", self.prefix),
            depth: self.depth + 1,
        })
    }

    /// Builds a fresh `T` in this context and assigns it to `target` if the
    /// sub-build set anything. Returns whether it did.
    ///
    /// # Errors
    ///
    /// Returns the sub-build's first error unchanged.
    pub fn bind_nested<T: Bindable>(&self, target: &mut T) -> Result<bool, Error> {
        let mut fresh = T::default();
        let set = self.run(&mut fresh)?;

        if set {
            *target = fresh;
        }

        Ok(set)
    }

    /// Like [`bind_nested`](Self::bind_nested) for an optional field; the
    /// slot becomes `Some` only if the sub-build set anything.
    ///
    /// # Errors
    ///
    /// Returns the sub-build's first error unchanged.
    pub fn bind_nested_option<T: Bindable>(&self, slot: &mut Option<T>) -> Result<bool, Error> {
        let mut fresh = T::default();
        let set = self.run(&mut fresh)?;

        if set {
            *slot = Some(fresh);
        }

        Ok(set)
    }

    /// Runs the full lifecycle on `cfg`. Returns whether any field was set
    /// from the provider.
    fn run<T: Bindable>(&self, cfg: &mut T) -> Result<bool, Error> {
        let span = debug_span!("bind", config = T::NAME, prefix = %self.prefix);
        let _guard = span.enter();

        let fields = self.validate_tags::<T>(cfg)?;

        cfg.init().map_err(Error::Hook)?;

        self.apply_defaults(cfg, &fields)?;

        let set = self.resolve_external(cfg, &fields)?;

        self.check_required(&fields, &set)?;

        cfg.validate().map_err(Error::Hook)?;

        let any_set = set.iter().any(|set| *set);
        debug!(any_set, "build finished");

        Ok(any_set)
    }

    fn validate_tags<T: Bindable>(&self, cfg: &T) -> Result<Vec<TaggedField>, Error> {
        let tag_key = self.settings.tag_key();
        let mut tagged = Vec::new();

        for (index, info) in T::fields().iter().enumerate() {
            let Some(raw) = info.tag(tag_key) else {
                trace!(field = info.name, tag_key, "no tag in this namespace, skipping");
                continue;
            };

            let field = cfg.field(index).ok_or_else(|| out_of_range::<T>(index))?;
            let tag = Tag::parse(raw);

            tag.validate(tag_key, info.name, info.public, field.supports_structured())?;

            tagged.push(TaggedField { index, info, tag });
        }

        Ok(tagged)
    }

    fn apply_defaults<T: Bindable>(&self, cfg: &mut T, fields: &[TaggedField]) -> Result<(), Error> {
        for tagged in fields {
            let Some(literal) = tagged.tag.default_value() else {
                continue;
            };

            let key = tagged.display_key(&self.prefix);
            let field = cfg
                .field_mut(tagged.index)
                .ok_or_else(|| out_of_range::<T>(tagged.index))?;

            let result = if tagged.tag.is_structured() {
                field.decode_structured(literal)
            } else {
                field.decode(literal, self.settings)
            };

            result.map_err(|source| Error::Default {
                key: key.clone(),
                source,
            })?;

            debug!(field = tagged.info.name, key, "applied default");
        }

        Ok(())
    }

    fn resolve_external<T: Bindable>(
        &self,
        cfg: &mut T,
        fields: &[TaggedField],
    ) -> Result<Vec<bool>, Error> {
        let mut set = vec![false; fields.len()];

        for (slot, tagged) in set.iter_mut().zip(fields) {
            let name = tagged.info.name;
            let field = cfg
                .field_mut(tagged.index)
                .ok_or_else(|| out_of_range::<T>(tagged.index))?;

            match tagged.tag.key() {
                TagKey::Suppressed | TagKey::Empty => {
                    trace!(field = name, "suppressed, not reading");
                }

                TagKey::Nested => {
                    let child = self.child(tagged.tag.prefix())?;
                    let type_name = field.type_name();

                    let nested = field.bind_nested(&child).ok_or_else(|| {
                        Error::internal(format!(
                            "field {name:?} of type {type_name} is not a bindable struct"
                        ))
                    })??;

                    debug!(field = name, prefix = child.prefix(), set = nested, "nested build");
                    *slot = nested;
                }

                TagKey::Name(key) => {
                    let Some((found_key, raw)) = self.lookup(key)? else {
                        trace!(field = name, key, "not set");
                        continue;
                    };

                    let result = if tagged.tag.is_structured() {
                        field.decode_structured(&raw)
                    } else {
                        field.decode(&raw, self.settings)
                    };

                    result.map_err(|source| Error::Read {
                        key: tagged.display_key(&self.prefix),
                        source,
                    })?;

                    debug!(field = name, key = found_key, "read value");
                    *slot = true;
                }
            }
        }

        Ok(set)
    }

    /// Looks up `prefix + key`, then the bare key when fallback applies.
    fn lookup(&self, key: &str) -> Result<Option<(String, String)>, Error> {
        let full_key = format!("{}{key}", self.prefix);

        if let Some(value) = self.provider.lookup(&full_key)? {
            return Ok(Some((full_key, value)));
        }

        if self.settings.prefix_fallback()
            && !self.prefix.is_empty()
            && let Some(value) = self.provider.lookup(key)?
        {
            trace!(key, prefixed = full_key, "prefixed key missing, using bare key");
            return Ok(Some((key.to_string(), value)));
        }

        Ok(None)
    }

    fn check_required(&self, fields: &[TaggedField], set: &[bool]) -> Result<(), Error> {
        let keys: Vec<String> = fields
            .iter()
            .zip(set)
            .filter(|(tagged, set)| {
                tagged.tag.is_required() && tagged.tag.key() != TagKey::Suppressed && !**set
            })
            .map(|(tagged, _)| tagged.display_key(&self.prefix))
            .collect();

        if keys.is_empty() {
            return Ok(());
        }

        debug!(?keys, "required values missing");
        Err(Error::MissingRequired { keys })
    }
}

/// Runs `f`, turning a panic into [`Error::Internal`].
fn contain<R>(f: impl FnOnce() -> Result<R, Error>) -> Result<R, Error> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        warn!(panic = %message, "build panicked");
        Err(Error::internal(message))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

fn out_of_range<T: Bindable>(index: usize) -> Error {
    Error::internal(format!(
        "field index {index} out of range for {}",
        T::NAME
    ))
}
