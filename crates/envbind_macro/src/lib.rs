//! # envbind_macro
//!
//! Derive macro for `envbind`. It generates the registration table the
//! binder walks instead of runtime reflection. Use it through the
//! re-export `envbind::Bindable`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod parse;

/// Derives `envbind::Bindable` for a struct with named fields.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[envvar = "TAG"]` | tag in the `envvar` namespace |
/// | `#[tag(ns = "TAG", ...)]` | tags in arbitrary namespaces |
///
/// Untagged fields are ignored by the binder and may have any type. Tagged
/// fields must implement `envbind::FieldValue`.
///
/// # Struct Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[bind(hooks)]` | do not emit an empty `Hooks` impl |
///
/// # Example
///
/// ```ignore
/// use envbind::Bindable;
///
/// #[derive(Bindable, Default)]
/// struct Config {
///     #[envvar = "MY_INT,default=1234"]
///     #[tag(voodoo = "MY_VOODOO_INT")]
///     pub my_int: i64,
///
///     #[envvar = ">,prefix=CHILD_"]
///     pub child: Child,
/// }
/// ```
///
/// # Generated Code
///
/// - `impl envbind::Bindable` with the field table and accessors
/// - `impl envbind::FieldValue`, so the struct can be a `">"` nested field
/// - `impl envbind::Hooks` (empty) unless `#[bind(hooks)]` is given
#[proc_macro_derive(Bindable, attributes(envvar, tag, bind))]
pub fn derive_bindable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    // On error, emit compile_error!() pointing at the offending tokens
    expand::Expander::expand(&input).unwrap_or_else(|err| err.to_compile_error().into())
}
