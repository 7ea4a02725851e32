//! Binder-level options.

/// Tag namespace read when none is configured.
pub const DEFAULT_TAG_KEY: &str = "envvar";

/// Separator between list elements and between map pairs.
pub const DEFAULT_LIST_SEPARATOR: &str = ",";

/// Separator between the key and value of one map pair.
pub const DEFAULT_KEY_VALUE_SEPARATOR: &str = ":";

/// Options shared by a build and all of its nested sub-builds.
///
/// Empty strings are never stored: setting an empty separator or tag key
/// restores the default.
///
/// ```rust
/// use envbind::Settings;
///
/// let settings = Settings::default().with_list_separator(";");
/// assert_eq!(settings.list_separator(), ";");
/// assert_eq!(settings.key_value_separator(), ":");
///
/// let settings = settings.with_list_separator("");
/// assert_eq!(settings.list_separator(), ",");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    list_separator: String,
    key_value_separator: String,
    tag_key: String,
    byte_lists: bool,
    prefix_fallback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            list_separator: DEFAULT_LIST_SEPARATOR.to_string(),
            key_value_separator: DEFAULT_KEY_VALUE_SEPARATOR.to_string(),
            tag_key: DEFAULT_TAG_KEY.to_string(),
            byte_lists: false,
            prefix_fallback: false,
        }
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

impl Settings {
    /// Sets the list and map-pair separator.
    #[must_use]
    pub fn with_list_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = or_default(separator.into(), DEFAULT_LIST_SEPARATOR);
        self
    }

    /// Sets the separator inside one map pair.
    #[must_use]
    pub fn with_key_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.key_value_separator = or_default(separator.into(), DEFAULT_KEY_VALUE_SEPARATOR);
        self
    }

    /// Sets the tag namespace to read.
    #[must_use]
    pub fn with_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.tag_key = or_default(tag_key.into(), DEFAULT_TAG_KEY);
        self
    }

    /// Treats `Vec<u8>` fields as lists of numbers instead of raw bytes.
    #[must_use]
    pub const fn with_byte_lists(mut self, enabled: bool) -> Self {
        self.byte_lists = enabled;
        self
    }

    /// Retries a missed prefixed lookup with the bare key.
    #[must_use]
    pub const fn with_prefix_fallback(mut self, enabled: bool) -> Self {
        self.prefix_fallback = enabled;
        self
    }

    /// The list and map-pair separator.
    #[must_use]
    pub fn list_separator(&self) -> &str {
        &self.list_separator
    }

    /// The separator inside one map pair.
    #[must_use]
    pub fn key_value_separator(&self) -> &str {
        &self.key_value_separator
    }

    /// The tag namespace being read.
    #[must_use]
    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    /// Whether `Vec<u8>` fields are parsed as numeric lists.
    #[must_use]
    pub const fn byte_lists(&self) -> bool {
        self.byte_lists
    }

    /// Whether prefixed lookups fall back to the bare key.
    #[must_use]
    pub const fn prefix_fallback(&self) -> bool {
        self.prefix_fallback
    }
}
