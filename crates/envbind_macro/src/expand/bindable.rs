//! Generators for the three impl blocks.

use proc_macro2::TokenStream as QuoteStream;
use quote::quote;
use syn::DeriveInput;

use super::TaggedField;

/// Generates `impl envbind::Bindable`.
///
/// The field table is a `const` so the returned slice is `'static` even
/// for generic structs. Accessor indices follow table order.
pub fn generate_bindable_impl(input: &DeriveInput, fields: &[TaggedField<'_>]) -> QuoteStream {
    let struct_name = &input.ident;
    let name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let infos = fields.iter().map(|field| {
        let field_name = field.ident.to_string();
        let public = field.public;
        let tags = field.tags.tags.iter().map(|(namespace, raw)| {
            quote! { (#namespace, #raw) }
        });

        quote! {
            ::envbind::FieldInfo::new(#field_name, #public, &[#(#tags),*])
        }
    });

    let indices: Vec<usize> = (0..fields.len()).collect();
    let idents: Vec<_> = fields.iter().map(|field| field.ident).collect();

    quote! {
        impl #impl_generics ::envbind::Bindable for #struct_name #ty_generics #where_clause {
            const NAME: &'static str = #name;

            fn fields() -> &'static [::envbind::FieldInfo] {
                const FIELDS: &[::envbind::FieldInfo] = &[#(#infos),*];
                FIELDS
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::envbind::FieldValue> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents as &dyn ::envbind::FieldValue),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::envbind::FieldValue> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents as &mut dyn ::envbind::FieldValue),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

/// Generates `impl envbind::FieldValue` so the struct can be a `">"` field.
///
/// A plain key on a struct field has no string form and reports an
/// unsupported type.
pub fn generate_field_value_impl(input: &DeriveInput) -> QuoteStream {
    let struct_name = &input.ident;
    let name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::envbind::FieldValue for #struct_name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #name
            }

            fn kind(&self) -> ::envbind::Kind {
                ::envbind::Kind::Struct
            }

            fn decode(
                &mut self,
                _raw: &str,
                _settings: &::envbind::Settings,
            ) -> ::core::result::Result<(), ::envbind::CoerceError> {
                ::core::result::Result::Err(::envbind::CoerceError::Unsupported {
                    type_name: #name,
                    kind: ::envbind::Kind::Struct,
                })
            }

            fn bind_nested(
                &mut self,
                ctx: &::envbind::BindContext<'_>,
            ) -> ::core::option::Option<::core::result::Result<bool, ::envbind::Error>> {
                ::core::option::Option::Some(ctx.bind_nested(self))
            }

            fn describe_nested(
                &self,
                describer: &mut ::envbind::Describer<'_>,
            ) -> ::core::option::Option<::core::result::Result<(), ::envbind::Error>> {
                ::core::option::Option::Some(describer.describe::<Self>())
            }

            fn bind_nested_option(
                slot: &mut ::core::option::Option<Self>,
                ctx: &::envbind::BindContext<'_>,
            ) -> ::core::option::Option<::core::result::Result<bool, ::envbind::Error>> {
                ::core::option::Option::Some(ctx.bind_nested_option(slot))
            }

            fn describe_nested_option(
                describer: &mut ::envbind::Describer<'_>,
            ) -> ::core::option::Option<::core::result::Result<(), ::envbind::Error>> {
                ::core::option::Option::Some(describer.describe::<Self>())
            }
        }
    }
}

/// Generates an empty `impl envbind::Hooks`.
pub fn generate_hooks_impl(input: &DeriveInput) -> QuoteStream {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::envbind::Hooks for #struct_name #ty_generics #where_clause {}
    }
}
