//! Field tag parsing and validation.
//!
//! A tag has the form `KEY[,ATTR[=VALUE]]*`:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `-` | never read from the provider; only `default` applies |
//! | `>` | nested struct, bound recursively with its own prefix |
//! | anything else | the external key to look up |
//!
//! | Attribute | Value | Legal on |
//! |-----------|-------|----------|
//! | `required` | none | any key except `-` |
//! | `default` | mandatory | any key except `>` |
//! | `prefix` | mandatory | `>` only |
//! | `unmarshalJSON` | none | fields with a structured form |
//!
//! Tags are validated before any value is resolved, so a malformed tag
//! fails the build even when the field would never be bound.

use crate::error::TagSyntaxError;

/// The `required` attribute.
pub const ATTR_REQUIRED: &str = "required";

/// The `default=` attribute.
pub const ATTR_DEFAULT: &str = "default";

/// The `prefix=` attribute.
pub const ATTR_PREFIX: &str = "prefix";

/// The `unmarshalJSON` attribute.
pub const ATTR_UNMARSHAL_JSON: &str = "unmarshalJSON";

/// Known attributes, in the order their value rules are checked.
const KNOWN_ATTRIBUTES: [(&str, bool); 4] = [
    (ATTR_DEFAULT, true),
    (ATTR_PREFIX, true),
    (ATTR_REQUIRED, false),
    (ATTR_UNMARSHAL_JSON, false),
];

/// Key marking a field that is never read from the provider.
pub const SUPPRESSED_KEY: &str = "-";

/// Key marking a nested struct field.
pub const NESTED_KEY: &str = ">";

/// What a tag's key asks the binder to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKey<'a> {
    /// `-`
    Suppressed,
    /// `>`
    Nested,
    /// An external key.
    Name(&'a str),
    /// Missing key, always rejected by [`Tag::validate`].
    Empty,
}

/// One `NAME[=VALUE]` segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Text before the first `=`.
    pub name: &'a str,
    /// Text after the first `=`, if there was one.
    pub value: Option<&'a str>,
}

/// A parsed field tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    raw: &'a str,
    key: &'a str,
    attributes: Vec<Attribute<'a>>,
}

/// Returns the text before the first `,`.
#[must_use]
pub fn parse_key(raw: &str) -> &str {
    raw.split(',').next().unwrap_or_default()
}

/// Returns every segment after the key, split once on `=`.
#[must_use]
pub fn parse_attributes(raw: &str) -> Vec<Attribute<'_>> {
    raw.split(',')
        .skip(1)
        .map(|segment| match segment.split_once('=') {
            Some((name, value)) => Attribute {
                name,
                value: Some(value),
            },
            None => Attribute {
                name: segment,
                value: None,
            },
        })
        .collect()
}

impl<'a> Tag<'a> {
    /// Parses a raw tag. Parsing never fails; see [`Tag::validate`].
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        Self {
            raw,
            key: parse_key(raw),
            attributes: parse_attributes(raw),
        }
    }

    /// The raw tag string.
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        self.raw
    }

    /// The raw key text.
    #[must_use]
    pub const fn key_str(&self) -> &'a str {
        self.key
    }

    /// The interpreted key.
    #[must_use]
    pub fn key(&self) -> TagKey<'a> {
        match self.key {
            "" => TagKey::Empty,
            SUPPRESSED_KEY => TagKey::Suppressed,
            NESTED_KEY => TagKey::Nested,
            name => TagKey::Name(name),
        }
    }

    /// All attribute segments, in tag order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute<'a>] {
        &self.attributes
    }

    /// The first attribute called `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute<'a>> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Whether an attribute called `name` is present.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Whether the tag has the `required` attribute.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.has(ATTR_REQUIRED)
    }

    /// Whether the tag has the `unmarshalJSON` attribute.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        self.has(ATTR_UNMARSHAL_JSON)
    }

    /// The value of the first occurrence of `name` that carries one.
    #[must_use]
    pub fn attribute_value(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .filter(|attr| attr.name == name)
            .find_map(|attr| attr.value)
    }

    /// The `default=` literal.
    #[must_use]
    pub fn default_value(&self) -> Option<&'a str> {
        self.attribute_value(ATTR_DEFAULT)
    }

    /// The `prefix=` value, or `""`.
    #[must_use]
    pub fn prefix(&self) -> &'a str {
        self.attribute_value(ATTR_PREFIX).unwrap_or_default()
    }

    /// Checks the tag against the field it is attached to.
    ///
    /// Rules are checked in a fixed order and the first violation wins.
    ///
    /// # Errors
    ///
    /// Returns a [`TagSyntaxError`] naming the violated rule.
    pub fn validate(
        &self,
        tag_key: &str,
        field_name: &str,
        public: bool,
        supports_structured: bool,
    ) -> Result<(), TagSyntaxError> {
        let fail = |message: String| TagSyntaxError {
            tag_key: tag_key.to_string(),
            tag_value: self.raw.to_string(),
            field_name: field_name.to_string(),
            message,
        };

        if !public {
            return Err(fail(
                "non-public fields may not have the tag set".to_string(),
            ));
        }

        let key = self.key();

        if key == TagKey::Empty {
            return Err(fail("tag does not have the name attribute set".to_string()));
        }

        if key == TagKey::Nested && self.has(ATTR_DEFAULT) {
            return Err(fail(format!(
                "the {ATTR_DEFAULT:?} attribute is not allowed on {NESTED_KEY:?} nested config fields"
            )));
        }

        if key == TagKey::Suppressed && self.has(ATTR_REQUIRED) {
            return Err(fail(format!(
                "the {ATTR_REQUIRED:?} attribute is not allowed on {SUPPRESSED_KEY:?} fields"
            )));
        }

        if self.has(ATTR_UNMARSHAL_JSON) && !supports_structured {
            return Err(fail(format!(
                "field type does not support {ATTR_UNMARSHAL_JSON:?} tag attribute"
            )));
        }

        if key != TagKey::Nested && self.has(ATTR_PREFIX) {
            return Err(fail(format!(
                "the {ATTR_PREFIX:?} attribute is only allowed on {NESTED_KEY:?} nested config fields"
            )));
        }

        if let Some(unknown) = self.attributes.iter().find(|attr| {
            !attr.name.is_empty() && !KNOWN_ATTRIBUTES.iter().any(|(name, _)| *name == attr.name)
        }) {
            return Err(fail(format!(
                "tag value contains non-existent attribute {:?}",
                unknown.name
            )));
        }

        // Repeated attributes: one valued occurrence satisfies a valued
        // attribute, and one valued occurrence breaks a flag.
        for (name, needs_value) in KNOWN_ATTRIBUTES {
            let mut occurrences = self
                .attributes
                .iter()
                .filter(|attr| attr.name == name)
                .peekable();
            if occurrences.peek().is_none() {
                continue;
            }

            let any_valued = occurrences.any(|attr| attr.value.is_some());

            if needs_value && !any_valued {
                return Err(fail(format!("the {name:?} attribute requires a value")));
            }

            if !needs_value && any_valued {
                return Err(fail(format!("the {name:?} attribute may not have a value")));
            }
        }

        Ok(())
    }
}
