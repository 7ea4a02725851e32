//! # envbind
//!
//! Populates configuration structs from environment-style key/value
//! sources, driven by a compact per-field tag.
//!
//! ## Quick Start
//!
//! ```rust
//! use envbind::Bindable;
//! use envbind::provider::MapProvider;
//!
//! #[derive(Bindable, Debug, Default)]
//! struct Database {
//!     #[envvar = "HOST,default=localhost"]
//!     pub host: String,
//!
//!     #[envvar = "PORT,required"]
//!     pub port: u16,
//! }
//!
//! #[derive(Bindable, Debug, Default)]
//! struct Config {
//!     #[envvar = "LOG_LEVELS"]
//!     pub log_levels: Vec<String>,
//!
//!     #[envvar = ">,prefix=DB_"]
//!     pub db: Database,
//! }
//!
//! let config: Config = envbind::Builder::new()
//!     .provider(MapProvider::from([("DB_PORT", "5432"), ("LOG_LEVELS", "info, warn")]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.db.host, "localhost");
//! assert_eq!(config.db.port, 5432);
//! assert_eq!(config.log_levels, ["info", "warn"]);
//! ```
//!
//! ## Tag Grammar
//!
//! ```text
//! KEY[,ATTR[=VALUE]]*
//! ```
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `NAME` | read `prefix + NAME` from the provider |
//! | `-` | never read; only `default=` applies |
//! | `>` | nested struct, bound recursively |
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `required` | the build fails unless the provider set the field |
//! | `default=VALUE` | applied before provider values, which override it |
//! | `prefix=PREFIX` | prepended to every key of a nested struct |
//! | `unmarshalJSON` | decode the value as a JSON document merged onto the field |
//!
//! Tags are validated before anything is read; a malformed tag always fails
//! the build with a [`TagSyntaxError`].
//!
//! ## Field Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[envvar = "..."]` | tag in the default `envvar` namespace |
//! | `#[tag(ns = "...")]` | tag in namespace `ns`, read with [`Builder::tag_key`] |
//!
//! Only tagged fields are registered; their types must implement
//! [`FieldValue`]. Mark the struct `#[bind(hooks)]` to supply your own
//! [`Hooks`] implementation.
//!
//! ## Build Lifecycle
//!
//! ```text
//! validate tags -> init hook -> defaults -> provider values -> required check -> validate hook
//! ```
//!
//! The first error stops the build. Nested structs run the same lifecycle
//! and are only assigned when the provider set at least one of their keys.
//!
//! ## Logging
//!
//! Builds emit [`tracing`] spans and events at `debug` and `trace` level.
//! No subscriber is installed by this crate.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

extern crate self as envbind;

// Re-export the derive macro
pub use envbind_macro::Bindable;

/// Re-export miette so callers can render errors without a direct
/// dependency.
pub use miette;

// ============================================================================
// Core Modules
// ============================================================================

mod binder;
mod describe;
mod duration;
mod error;
mod schema;
mod settings;

pub mod provider;
pub mod tag;
pub mod value;

pub use binder::{BindContext, Builder, MAX_DEPTH, init_config, new_config};
pub use describe::{Describer, KeyInfo, render_env_example};
pub use duration::{DurationError, parse_duration};
pub use error::{BoxError, CoerceError, Error, TagSyntaxError};
pub use schema::{Bindable, FieldInfo, Hooks};
pub use settings::{
    DEFAULT_KEY_VALUE_SEPARATOR, DEFAULT_LIST_SEPARATOR, DEFAULT_TAG_KEY, Settings,
};
pub use value::{FieldValue, Json, Kind, Scalar, TextDecode};

/// A Result type that renders errors with miette's formatting.
///
/// ```rust,ignore
/// fn main() -> envbind::Result<()> {
///     let config: Config = envbind::new_config()?;
///     Ok(())
/// }
/// ```
pub type Result<T> = miette::Result<T>;
