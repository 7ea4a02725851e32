//! Per-type registration tables.
//!
//! `#[derive(Bindable)]` generates a static table describing every tagged
//! field of a struct, plus index-based accessors the binder uses to reach
//! each field as a [`FieldValue`] trait object. The table stands in for
//! runtime reflection: the binder walks it in declaration order.

use crate::error::{BoxError, Error};
use crate::value::FieldValue;

/// Registration metadata for one tagged field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    /// The field identifier.
    pub name: &'static str,

    /// Whether the field is `pub`.
    pub public: bool,

    /// `(namespace, raw tag)` pairs attached to the field.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldInfo {
    /// Creates a table entry.
    #[must_use]
    pub const fn new(
        name: &'static str,
        public: bool,
        tags: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { name, public, tags }
    }

    /// Returns the raw tag for `namespace`, if the field carries one.
    #[must_use]
    pub fn tag(&self, namespace: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(ns, _)| *ns == namespace)
            .map(|(_, raw)| *raw)
    }
}

/// Optional lifecycle hooks of a configuration struct.
///
/// `init` runs after tag validation and before defaults are applied;
/// `validate` runs last, after the required check has passed. An error from
/// either fails the build and is reported verbatim.
///
/// The derive emits an empty implementation unless the struct is marked
/// `#[bind(hooks)]`, in which case it must be written by hand:
///
/// ```rust
/// use envbind::{Bindable, BoxError, Hooks};
///
/// #[derive(Bindable, Debug, Default)]
/// #[bind(hooks)]
/// struct Server {
///     #[envvar = "PORT,default=8080"]
///     pub port: u16,
/// }
///
/// impl Hooks for Server {
///     fn validate(&mut self) -> Result<(), BoxError> {
///         if self.port < 1024 {
///             return Err("port must be 1024 or above".into());
///         }
///         Ok(())
///     }
/// }
///
/// let err = envbind::Builder::new()
///     .provider(envbind::provider::MapProvider::from([("PORT", "80")]))
///     .build::<Server>()
///     .unwrap_err();
///
/// assert_eq!(err.to_string(), "port must be 1024 or above");
/// ```
pub trait Hooks {
    /// Runs on the instance before defaults are applied.
    ///
    /// # Errors
    ///
    /// Any error fails the build.
    fn init(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Runs on the instance after all values are resolved.
    ///
    /// # Errors
    ///
    /// Any error fails the build.
    fn validate(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// A struct the binder can populate.
///
/// Implemented by `#[derive(Bindable)]`. The indices passed to
/// [`field`](Bindable::field) and [`field_mut`](Bindable::field_mut) are
/// positions in [`fields`](Bindable::fields).
pub trait Bindable: Hooks + Default {
    /// The struct name, used in logs and error messages.
    const NAME: &'static str;

    /// The registration table, in declaration order.
    fn fields() -> &'static [FieldInfo];

    /// Borrows the field at `index`.
    fn field(&self, index: usize) -> Option<&dyn FieldValue>;

    /// Mutably borrows the field at `index`.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn FieldValue>;

    /// Builds a new instance from the process environment with default
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns the first error of the build.
    fn from_env() -> Result<Self, Error> {
        crate::new_config()
    }
}
