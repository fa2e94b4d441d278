//! `#[derive(FormRecord)]` implementation.
//!
//! Generates a `FormRecord` impl whose `descriptors()` lists every named
//! field in declaration order. `pub` fields are visible; all others are
//! emitted as hidden descriptors.

use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{DeriveInput, Visibility};

use crate::types::{infer_kind, type_display_name};

/// Struct-level attributes from `#[form(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(form), supports(struct_named))]
pub struct RecordOpts {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub data: darling::ast::Data<(), RecordFieldOpts>,

    /// Display name of the record (defaults to the struct name).
    #[darling(default)]
    pub name: Option<String>,

    /// Path to the `formx_forms` crate, for use through a re-export.
    #[darling(default, rename = "crate")]
    pub krate: Option<syn::Path>,
}

/// Per-field attributes from `#[form_field(...)]`.
#[derive(Debug, FromField)]
#[darling(attributes(form_field))]
pub struct RecordFieldOpts {
    pub ident: Option<syn::Ident>,
    pub ty: syn::Type,
    pub vis: Visibility,

    /// Posted form key (defaults to the field name).
    #[darling(default)]
    pub rename: Option<String>,

    /// Tag string, e.g. `"label=Name;required=true"`.
    #[darling(default)]
    pub tags: Option<String>,

    /// Validation rules, e.g. `"required,max_length=40"`.
    #[darling(default)]
    pub validate: Option<String>,

    /// Rejects binding into this field.
    #[darling(default)]
    pub readonly: bool,
}

/// Generates the `FormRecord` implementation for the struct.
pub fn derive_form_record_impl(input: DeriveInput) -> TokenStream {
    let opts = match RecordOpts::from_derive_input(&input) {
        Ok(o) => o,
        Err(e) => return e.write_errors(),
    };

    let Some(fields) = opts.data.as_ref().take_struct() else {
        return syn::Error::new_spanned(&input, "#[derive(FormRecord)] only supports named structs")
            .to_compile_error();
    };

    let krate = opts
        .krate
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::formx_forms));
    let struct_name = &opts.ident;
    let record_name = opts.name.clone().unwrap_or_else(|| struct_name.to_string());
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let descriptors: Vec<TokenStream> = fields
        .fields
        .iter()
        .filter_map(|f| generate_descriptor(f, &krate))
        .collect();

    quote! {
        impl #impl_generics #krate::record::FormRecord for #struct_name #ty_generics #where_clause {
            fn record_name() -> &'static str {
                #record_name
            }

            fn descriptors() -> ::std::vec::Vec<#krate::record::FieldDescriptor<Self>> {
                ::std::vec![
                    #(#descriptors),*
                ]
            }
        }
    }
}

/// Generates a single `FieldDescriptor` construction expression.
fn generate_descriptor(f: &RecordFieldOpts, krate: &syn::Path) -> Option<TokenStream> {
    let ident = f.ident.as_ref()?;
    let name = f
        .rename
        .clone()
        .unwrap_or_else(|| ident.unraw().to_string());
    let type_name = type_display_name(&f.ty);
    let kind = infer_kind(&f.ty);
    let kind_variant = format_ident!("{}", kind.variant());
    let visible = matches!(f.vis, Visibility::Public(_));
    let convertible = visible && kind.is_assignable();

    let getter = if convertible {
        quote! { |r: &Self| #krate::record::FormValue::to_field_value(&r.#ident) }
    } else {
        quote! { |_: &Self| #krate::record::FieldValue::Opaque }
    };

    let mut chain = vec![quote! { .type_name(#type_name) }];

    if let Some(ref tags) = f.tags {
        chain.push(quote! { .tags(#tags) });
    }
    if let Some(ref rules) = f.validate {
        chain.push(quote! { .rules(#rules) });
    }

    // Descriptors start out read-only.
    match (visible, f.readonly, convertible) {
        (false, _, _) => chain.push(quote! { .hidden() }),
        (true, true, _) => {}
        (true, false, true) => chain.push(quote! {
            .setter(|r: &mut Self, v: #krate::record::FieldValue| {
                r.#ident = #krate::record::FormValue::from_field_value(#name, v)?;
                ::core::result::Result::Ok(())
            })
        }),
        (true, false, false) => chain.push(quote! { .opaque() }),
    }

    Some(quote! {
        #krate::record::FieldDescriptor::new(
            #name,
            #krate::record::FieldKind::#kind_variant,
            #getter,
        )
        #(#chain)*
    })
}
