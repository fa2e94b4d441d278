//! # formx-macros
//!
//! Procedural macros for formx-rs. `#[derive(FormRecord)]` turns a struct
//! with named fields into a form record by generating its field-descriptor
//! table.
//!
//! This crate is independent of all other formx-rs crates because proc-macro
//! crates cannot depend on crates that use them.
//!
//! ## Attributes
//!
//! - `#[form(name = "...")]` - display name of the record
//! - `#[form(crate = "...")]` - path to `formx_forms` when used through a re-export
//! - `#[form_field(tags = "...")]` - the field's `key=value;...` tag string
//! - `#[form_field(validate = "...")]` - comma-separated validation rules
//! - `#[form_field(rename = "...")]` - posted form key
//! - `#[form_field(readonly)]` - visible but never bound

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod record;
mod types;

/// Derives `formx_forms::record::FormRecord` for a struct with named fields.
///
/// `pub` fields are visible to rendering, binding and validation; all other
/// fields are listed as hidden. Field kinds follow the declared type:
/// `String`, `i64`, `bool`, `Date`, `Vec<String>`; any other named type is a
/// nested record and anything else is unsupported.
///
/// ```ignore
/// use formx_forms::Date;
/// use formx_macros::FormRecord;
///
/// #[derive(Default, FormRecord)]
/// pub struct Signup {
///     #[form_field(tags = "label=Your name;required=true", validate = "required")]
///     pub name: String,
///     pub agree: bool,
///     #[form_field(tags = "type=date")]
///     pub born: Date,
/// }
/// ```
#[proc_macro_derive(FormRecord, attributes(form, form_field))]
pub fn derive_form_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    record::derive_form_record_impl(input).into()
}
