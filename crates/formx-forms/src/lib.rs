//! # formx-forms
//!
//! Renders typed records as HTML forms and binds form submissions back into
//! records.
//!
//! A record type describes its fields through [`FormRecord`], normally via
//! `#[derive(FormRecord)]` from `formx-macros`. Rendering resolves one
//! [`Widget`] per visible field from its tags and kind; binding converts the
//! posted text of each visible field by kind and then runs the configured
//! [`FormValidation`].
//!
//! ## Modules
//!
//! - [`record`] - Field descriptors, [`FormRecord`] and [`RecordView`]
//! - [`tags`] - The `key=value;...` field tag language
//! - [`date`] - The date-only [`Date`] value type
//! - [`component`] - Renderable output and the render context
//! - [`widgets`] - The widget traits and the built-in HTML widgets
//! - [`validation`] - Validation state, pass-through and rule-based validators
//! - [`config`] - The widget registry and the process-wide slot
//! - [`introspect`] - Record to form ([`generate_form_inputs`])
//! - [`binder`] - Submission to record ([`restore_form`])
//! - [`submission`] - Sources of submitted values

pub mod binder;
pub mod component;
pub mod config;
pub mod date;
pub mod introspect;
pub mod record;
pub mod submission;
pub mod tags;
pub mod validation;
pub mod widgets;

pub use binder::{restore_form, restore_form_into};
pub use component::{render_to_string, Component, ComponentList, Html, RenderContext};
pub use config::{get_widget, global_config, init_global_config, FormConfig};
pub use date::{Date, DateParseError};
pub use introspect::{generate_form_inputs, render_form};
pub use record::{FieldDescriptor, FieldKind, FieldValue, FormRecord, FormValue, RecordView};
pub use submission::SubmissionSource;
pub use tags::{parse_tags, Tags};
pub use validation::{
    validation_factory, FieldError, FormValidation, PassThroughValidation, RuleValidation,
    ValidationFactory,
};
pub use widgets::{ErrorWidget, FieldInfo, Widget, WidgetType};
