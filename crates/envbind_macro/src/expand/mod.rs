//! Code generation for the `Bindable` derive.
//!
//! The [`Expander`] validates the input, collects the tagged fields and
//! emits three impl blocks:
//!
//! | Impl | Generator |
//! |------|-----------|
//! | `envbind::Bindable` | [`bindable::generate_bindable_impl`] |
//! | `envbind::FieldValue` | [`bindable::generate_field_value_impl`] |
//! | `envbind::Hooks` | [`bindable::generate_hooks_impl`] |

use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Data, DeriveInput, Error as SynError, Field, Fields, Ident, Result as SynResult};

use crate::parse::{BindAttr, FieldTags};

pub mod bindable;

/// A field that carries at least one tag.
pub struct TaggedField<'a> {
    /// The field identifier.
    pub ident: &'a Ident,
    /// Whether the field is `pub`.
    pub public: bool,
    /// Its tags.
    pub tags: FieldTags,
}

/// The main orchestrator for macro expansion.
pub struct Expander;

impl Expander {
    /// Main entry point for expanding the derive macro.
    pub fn expand(input: &DeriveInput) -> SynResult<TokenStream> {
        let bind_attr = BindAttr::parse_from_struct(input)?;
        let fields = Self::extract_struct_fields(input)?;

        let mut tagged = Vec::new();
        for field in fields {
            let Some(tags) = FieldTags::parse(field)? else {
                continue;
            };

            let Some(ident) = field.ident.as_ref() else {
                return Err(SynError::new_spanned(field, "expected a named field"));
            };

            tagged.push(TaggedField {
                ident,
                public: matches!(field.vis, syn::Visibility::Public(_)),
                tags,
            });
        }

        let bindable_impl = bindable::generate_bindable_impl(input, &tagged);
        let field_value_impl = bindable::generate_field_value_impl(input);
        let hooks_impl = if bind_attr.hooks {
            quote! {}
        } else {
            bindable::generate_hooks_impl(input)
        };

        Ok(quote! {
            #bindable_impl
            #field_value_impl
            #hooks_impl
        }
        .into())
    }

    fn extract_struct_fields(input: &DeriveInput) -> SynResult<&Punctuated<Field, Comma>> {
        match &input.data {
            Data::Struct(data_struct) => match &data_struct.fields {
                Fields::Named(fields_named) => Ok(&fields_named.named),

                Fields::Unnamed(_) => Err(SynError::new_spanned(
                    input,
                    "Bindable does not support tuple structs",
                )),

                Fields::Unit => Err(SynError::new_spanned(
                    input,
                    "Bindable does not support unit structs",
                )),
            },

            Data::Enum(_) => Err(SynError::new_spanned(
                input,
                "Bindable can only be derived for structs, not enums",
            )),

            Data::Union(_) => Err(SynError::new_spanned(
                input,
                "Bindable can only be derived for structs, not unions",
            )),
        }
    }
}
