//! In-memory provider.

use std::collections::HashMap;

use super::{Provider, ProviderResult};

/// Provider backed by a fixed map of keys to values.
///
/// ```rust
/// use envbind::provider::{MapProvider, Provider};
///
/// let provider = MapProvider::from([("PORT", "8080"), ("HOST", "localhost")]);
/// assert_eq!(provider.lookup("PORT").unwrap().as_deref(), Some("8080"));
/// assert_eq!(provider.lookup("USER").unwrap(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapProvider {
    values: HashMap<String, String>,
}

impl MapProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapProvider
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for MapProvider
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Provider for MapProvider {
    fn name(&self) -> &'static str {
        "map"
    }

    fn lookup(&self, key: &str) -> ProviderResult<String> {
        Ok(self.values.get(key).cloned())
    }
}
