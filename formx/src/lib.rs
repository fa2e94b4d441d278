//! # formx
//!
//! Typed record <-> HTML form binding for Rust.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `formx` to get everything, or depend on individual crates
//! for finer-grained control.
//!
//! When deriving through this crate, point the derive at the re-exported
//! forms crate:
//!
//! ```
//! use formx::prelude::*;
//!
//! #[derive(Default, FormRecord)]
//! #[form(crate = "formx::forms")]
//! pub struct Person {
//!     #[form_field(rename = "Name", tags = "label=Your name")]
//!     pub name: String,
//!     #[form_field(rename = "Agree")]
//!     pub agree: bool,
//!     #[form_field(rename = "Born", tags = "type=date")]
//!     pub born: Date,
//! }
//!
//! let config = FormConfig::with_default_widgets(validation_factory::<PassThroughValidation>());
//!
//! let query = QueryDict::parse("Name=Ann&Agree=on&Born=2020-05-01");
//! let (person, validation) = restore_form::<Person, _>(&config, &query).unwrap();
//! assert_eq!(person.name, "Ann");
//! assert!(person.agree);
//! assert_eq!(person.born, Date::new(2020, 5, 1));
//! assert!(!validation.has_errors());
//!
//! let ctx = RenderContext::new();
//! let form = generate_form_inputs(&config, &ctx, Some(validation.as_ref()), &person).unwrap();
//! assert_eq!(form.len(), 3);
//! ```

/// Error types, settings, and logging.
pub use formx_core as core;

/// Submission sources: `QueryDict` and `HttpRequest`.
pub use formx_http as http;

/// Records, widgets, validation, rendering, and binding.
pub use formx_forms as forms;

/// The `FormRecord` derive.
#[cfg(feature = "macros")]
pub use formx_macros as macros;

/// Structured logging, re-exported so applications log through the same
/// `tracing` version.
pub use tracing;

/// Common imports for working with forms.
pub mod prelude {
    pub use formx_core::{FormxError, FormxResult, Settings};
    pub use formx_forms::{
        generate_form_inputs, render_form, render_to_string, restore_form, restore_form_into,
        validation_factory, Component, Date, FieldError, FormConfig, FormRecord, FormValidation,
        PassThroughValidation, RenderContext, RuleValidation, SubmissionSource, Widget,
    };
    pub use formx_http::{HttpRequest, QueryDict};

    #[cfg(feature = "macros")]
    pub use formx_macros::FormRecord;
}
