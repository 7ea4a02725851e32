//! Error types for struct binding.
//!
//! Two layers of errors exist:
//!
//! | Type | Produced by |
//! |------|-------------|
//! | [`CoerceError`] | A single string-to-value conversion (the `FieldValue` impls) |
//! | [`Error`] | A build: tag validation, defaults, reads, required checks and hooks |
//!
//! Every [`Error`] variant carries a [`miette`] diagnostic code, so the
//! caller can render a failed build with `miette::Report`:
//!
//! ```rust,ignore
//! match Config::from_env() {
//!     Ok(config) => { /* use config */ }
//!     Err(e) => eprintln!("{:?}", miette::Report::from(e)),
//! }
//! ```
//!
//! The `Display` output of each variant is stable and is asserted verbatim
//! by the test suite.

use std::error::Error as StdError;
use std::num::{ParseFloatError, ParseIntError};

use miette::Diagnostic;
use thiserror::Error as ThisError;

use crate::duration::DurationError;
use crate::provider::ProviderError;
use crate::value::{FieldValue, Kind};

/// Boxed error returned by hooks and text decoders.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// ============================================================================
// Build Errors
// ============================================================================

/// Errors that can occur while building or binding a configuration struct.
///
/// The first error encountered stops the build. When binding into an
/// existing instance the instance may be partially populated; callers must
/// treat it as unusable once an error is returned.
///
/// # Diagnostic Codes
///
/// | Code | Meaning |
/// |------|---------|
/// | `envbind::tag_syntax` | A field tag is malformed or uses an illegal attribute |
/// | `envbind::default_value` | A `default=` literal could not be converted |
/// | `envbind::read_value` | An external value could not be converted |
/// | `envbind::missing_required` | A `required` field was never set |
/// | `envbind::hook` | The init or validate hook failed |
/// | `envbind::internal` | A contract violation inside the binder |
#[derive(Debug, ThisError, Diagnostic)]
pub enum Error {
    /// A field tag failed validation before any value was resolved.
    #[error(transparent)]
    #[diagnostic(transparent)]
    TagSyntax(#[from] TagSyntaxError),

    /// The `default=` literal of a field could not be converted.
    #[error("error setting default value for {key:?} ({source})")]
    #[diagnostic(
        code(envbind::default_value),
        help("the `default=` literal in the field tag must be valid for the field type")
    )]
    Default {
        /// The external key of the field, with the active prefix applied.
        key: String,

        /// The underlying conversion failure.
        #[source]
        source: CoerceError,
    },

    /// A value read from the provider could not be converted.
    #[error("error reading {key:?} ({source})")]
    #[diagnostic(code(envbind::read_value))]
    Read {
        /// The external key that was read, with the active prefix applied.
        key: String,

        /// The underlying conversion failure.
        #[source]
        source: CoerceError,
    },

    /// One or more `required` fields were not set by the provider.
    #[error("{}", missing_message(.keys))]
    #[diagnostic(
        code(envbind::missing_required),
        help("set the listed variables in the environment")
    )]
    MissingRequired {
        /// The missing keys, in field declaration order.
        keys: Vec<String>,
    },

    /// The init or validate hook reported a failure.
    #[error("{0}")]
    #[diagnostic(code(envbind::hook))]
    Hook(BoxError),

    /// A contract violation, such as a nested marker on a type that cannot
    /// be bound.
    #[error("builder panic:  {message}")]
    #[diagnostic(code(envbind::internal))]
    Internal {
        /// Description of the violated contract.
        message: String,
    },

    /// The provider failed to look up a key.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Provider(#[from] ProviderError),
}

impl Error {
    /// Creates an [`Error::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the missing keys if this is an [`Error::MissingRequired`].
    #[must_use]
    pub fn missing_keys(&self) -> Option<&[String]> {
        match self {
            Self::MissingRequired { keys } => Some(keys),
            _ => None,
        }
    }
}

fn missing_message(keys: &[String]) -> String {
    match keys {
        [key] => format!("missing required var {key:?}"),
        keys => format!("missing required vars: {}", keys.join(",")),
    }
}

/// A malformed field tag.
///
/// Raised while validating tags, before any defaults or external values
/// are applied. The `Display` output is the bare message.
#[derive(Clone, Debug, PartialEq, Eq, ThisError, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(envbind::tag_syntax),
    help("tags have the form KEY[,required][,default=VALUE][,prefix=PREFIX][,unmarshalJSON]")
)]
pub struct TagSyntaxError {
    /// The tag namespace being read (e.g. `envvar`).
    pub tag_key: String,

    /// The full raw tag string.
    pub tag_value: String,

    /// The name of the offending field.
    pub field_name: String,

    /// Human-readable description of the violation.
    pub message: String,
}

// ============================================================================
// Coercion Errors
// ============================================================================

/// A failure converting one raw string into a field value.
#[derive(Debug, ThisError)]
pub enum CoerceError {
    /// The input was not `true` or `false` (case-insensitive).
    #[error("string {input:?} is not a valid boolean value")]
    InvalidBool {
        /// The rejected literal.
        input: String,
    },

    /// The input was not an integer.
    #[error("invalid integer {input:?}: {source}")]
    InvalidInt {
        /// The rejected literal.
        input: String,
        /// The std parse error.
        source: ParseIntError,
    },

    /// The input was not a floating point number.
    #[error("invalid float {input:?}: {source}")]
    InvalidFloat {
        /// The rejected literal.
        input: String,
        /// The std parse error.
        source: ParseFloatError,
    },

    /// The parsed number does not fit the destination width.
    #[error("overflow error: {input:?} does not fit in {target}")]
    Overflow {
        /// The rejected literal.
        input: String,
        /// The destination type name.
        target: &'static str,
    },

    /// The input was not an RFC 3339 timestamp.
    #[error("invalid timestamp {input:?}: {source}")]
    Timestamp {
        /// The rejected literal.
        input: String,
        /// The chrono parse error.
        source: chrono::ParseError,
    },

    /// The input was neither integer nanoseconds nor a duration string.
    #[error(transparent)]
    Duration(#[from] DurationError),

    /// A map pair did not contain exactly one key/value separator.
    #[error("key/value pair must contain exactly one {separator:?} separator")]
    KeyValuePair {
        /// The expected separator.
        separator: String,
    },

    /// A [`TextDecode`](crate::TextDecode) implementation rejected the input.
    #[error("{error}")]
    Text {
        /// The destination type name.
        type_name: &'static str,
        /// The decoder's own error, shown verbatim.
        error: BoxError,
    },

    /// Structured (JSON) decoding failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The destination type has no conversion from a string.
    #[error("unsupported type/kind \"{type_name}/{kind}\"")]
    Unsupported {
        /// The destination type name.
        type_name: &'static str,
        /// The destination kind.
        kind: Kind,
    },
}

impl CoerceError {
    /// Creates an [`CoerceError::Unsupported`] describing `value`.
    #[must_use]
    pub fn unsupported(value: &dyn FieldValue) -> Self {
        Self::Unsupported {
            type_name: value.type_name(),
            kind: value.kind(),
        }
    }

    /// Returns `true` for [`CoerceError::Unsupported`].
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
