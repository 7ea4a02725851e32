//! Environment variable provider.

use super::{Provider, ProviderError, ProviderResult};

/// Provider that reads process environment variables.
///
/// ```rust
/// use envbind::provider::{EnvProvider, Provider};
///
/// let provider = EnvProvider::new();
/// assert_eq!(provider.name(), "environment");
///
/// // Reads APP_PORT for key "PORT".
/// let provider = EnvProvider::with_prefix("APP_");
/// ```
#[derive(Clone, Debug, Default)]
pub struct EnvProvider {
    prefix: Option<String>,
}

impl EnvProvider {
    /// Creates a provider without a prefix.
    #[must_use]
    pub const fn new() -> Self {
        Self { prefix: None }
    }

    /// Creates a provider that prepends `prefix` to every key.
    ///
    /// This is applied below the binder, so it stacks with nested-field
    /// prefixes.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn full_key(&self, key: &str) -> String {
        self.prefix
            .as_ref()
            .map_or_else(|| key.to_string(), |p| format!("{p}{key}"))
    }
}

impl Provider for EnvProvider {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn lookup(&self, key: &str) -> ProviderResult<String> {
        let full_key = self.full_key(key);

        match std::env::var(&full_key) {
            Ok(value) => Ok(Some(value)),

            Err(std::env::VarError::NotPresent) => Ok(None),

            Err(std::env::VarError::NotUnicode(_)) => Err(ProviderError::InvalidValue {
                key: full_key,
                provider: self.name().to_string(),
                message: "environment variable contains invalid UTF-8".to_string(),
            }),
        }
    }
}
