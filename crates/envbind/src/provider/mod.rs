//! The external key/value source.
//!
//! The binder reads every value through a [`Provider`]. It only ever looks
//! keys up; it never enumerates or mutates the source.
//!
//! # Built-in Providers
//!
//! - [`EnvProvider`] - Reads process environment variables
//! - [`MapProvider`] - Reads an in-memory snapshot
//!
//! # Custom Providers
//!
//! ```rust
//! use envbind::provider::{Provider, ProviderResult};
//!
//! struct Fixed;
//!
//! impl Provider for Fixed {
//!     fn name(&self) -> &str {
//!         "fixed"
//!     }
//!
//!     fn lookup(&self, key: &str) -> ProviderResult<String> {
//!         Ok((key == "PORT").then(|| "8080".to_string()))
//!     }
//! }
//!
//! assert_eq!(Fixed.lookup("PORT").unwrap().as_deref(), Some("8080"));
//! ```

mod env;
mod map;

pub use env::EnvProvider;
pub use map::MapProvider;

use miette::Diagnostic;
use thiserror::Error as ThisError;

use crate::error::BoxError;

// ============================================================================
// Provider Errors
// ============================================================================

/// Errors a provider can report for a lookup.
#[derive(Debug, ThisError, Diagnostic)]
pub enum ProviderError {
    /// The stored value cannot be represented as a string.
    #[error("invalid value for '{key}' from provider '{provider}': {message}")]
    #[diagnostic(code(envbind::provider::invalid_value))]
    InvalidValue {
        /// The key with the invalid value.
        key: String,
        /// The provider name.
        provider: String,
        /// The error message.
        message: String,
    },

    /// Any other provider failure.
    #[error("provider '{provider}' error: {message}")]
    #[diagnostic(code(envbind::provider::error))]
    Other {
        /// The provider name.
        provider: String,
        /// The error message.
        message: String,
        /// The underlying error source.
        #[source]
        source: Option<BoxError>,
    },
}

impl ProviderError {
    /// Returns the provider name from the error.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        match self {
            Self::InvalidValue { provider, .. } | Self::Other { provider, .. } => provider,
        }
    }

    /// Creates an [`ProviderError::Other`] with a source.
    pub fn other(
        provider: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Other {
            provider: provider.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Result type for provider lookups.
///
/// - `Ok(Some(value))` - Key found
/// - `Ok(None)` - Key not present
/// - `Err(e)` - The lookup itself failed
pub type ProviderResult<T> = Result<Option<T>, ProviderError>;

// ============================================================================
// Provider Trait
// ============================================================================

/// A key/value source the binder reads from.
pub trait Provider: Send + Sync {
    /// Returns the provider's name for error messages and logs.
    fn name(&self) -> &str;

    /// Looks up a single key.
    ///
    /// # Errors
    ///
    /// Returns an error if the value exists but cannot be read.
    fn lookup(&self, key: &str) -> ProviderResult<String>;
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup(&self, key: &str) -> ProviderResult<String> {
        (**self).lookup(key)
    }
}

impl<P: Provider + ?Sized> Provider for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup(&self, key: &str) -> ProviderResult<String> {
        (**self).lookup(key)
    }
}
