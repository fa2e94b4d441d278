//! Form-to-record binding.
//!
//! [`restore_form`] populates a fresh record from a submission, then runs
//! validation over it. Binding is a single pass over the visible fields in
//! declaration order:
//!
//! 1. read the first posted value under the field name;
//! 2. reject read-only fields;
//! 3. skip empty values, leaving the field at its default;
//! 4. convert by field kind and assign.
//!
//! Any conversion failure aborts the whole bind. Rule failures do not; they
//! are collected in the returned validation state.

use formx_core::logging::bind_span;
use formx_core::{FormxError, FormxResult};

use crate::config::FormConfig;
use crate::date::Date;
use crate::record::{FieldDescriptor, FieldKind, FieldValue, FormRecord};
use crate::submission::SubmissionSource;
use crate::validation::FormValidation;

/// The posted value that marks a checked checkbox.
pub const CHECKBOX_ON: &str = "on";

/// Binds `source` into a new `R` and validates it.
///
/// # Errors
///
/// Returns [`FormxError::FieldNotSettable`] for a read-only visible field,
/// [`FormxError::InvalidInteger`] or [`FormxError::InvalidDate`] for a
/// malformed value, and [`FormxError::UnsupportedFieldType`] for a non-empty
/// value posted to a field the binder cannot convert.
///
/// # Examples
///
/// ```
/// use formx_forms::binder::restore_form;
/// use formx_forms::config::FormConfig;
/// use formx_forms::record::{FieldDescriptor, FieldKind, FieldValue, FormRecord, FormValue};
/// use formx_forms::validation::{validation_factory, FormValidation, PassThroughValidation};
/// use formx_http::QueryDict;
///
/// #[derive(Default)]
/// struct Search {
///     q: String,
/// }
///
/// impl FormRecord for Search {
///     fn record_name() -> &'static str {
///         "Search"
///     }
///
///     fn descriptors() -> Vec<FieldDescriptor<Self>> {
///         vec![FieldDescriptor::new("q", FieldKind::Text, |r: &Self| r.q.to_field_value())
///             .setter(|r: &mut Self, v: FieldValue| {
///                 r.q = FormValue::from_field_value("q", v)?;
///                 Ok(())
///             })]
///     }
/// }
///
/// let config = FormConfig::with_default_widgets(validation_factory::<PassThroughValidation>());
/// let (search, validation) =
///     restore_form::<Search, _>(&config, &QueryDict::parse("q=rust+forms")).unwrap();
/// assert_eq!(search.q, "rust forms");
/// assert!(!validation.has_errors());
/// ```
pub fn restore_form<R, S>(
    config: &FormConfig,
    source: &S,
) -> FormxResult<(R, Box<dyn FormValidation>)>
where
    R: FormRecord + Default,
    S: SubmissionSource + ?Sized,
{
    let mut record = R::default();
    let validation = restore_form_into(config, source, &mut record)?;
    Ok((record, validation))
}

/// Binds `source` into an existing record and validates it.
///
/// Fields without a posted value keep their current contents.
///
/// # Errors
///
/// See [`restore_form`]. On error the record may be partially updated.
pub fn restore_form_into<R, S>(
    config: &FormConfig,
    source: &S,
    record: &mut R,
) -> FormxResult<Box<dyn FormValidation>>
where
    R: FormRecord,
    S: SubmissionSource + ?Sized,
{
    let mut validation = config.new_validation();

    let span = bind_span(R::record_name());
    let _guard = span.enter();

    for descriptor in R::visible_descriptors() {
        bind_field(&descriptor, source, record)?;
    }

    validation.validate_struct(&*record);
    tracing::debug!(has_errors = validation.has_errors(), "bound submission");

    Ok(validation)
}

fn bind_field<R, S>(descriptor: &FieldDescriptor<R>, source: &S, record: &mut R) -> FormxResult<()>
where
    S: SubmissionSource + ?Sized,
{
    let name = descriptor.name;
    let raw = source.value(name).unwrap_or_default();

    if !descriptor.is_settable() {
        return Err(FormxError::FieldNotSettable(name.to_string()));
    }

    if raw.is_empty() {
        tracing::trace!(field = name, "no value submitted; keeping default");
        return Ok(());
    }

    let value = convert(descriptor, source, raw)?;
    tracing::debug!(field = name, kind = %descriptor.kind, "bound field");
    descriptor.assign(record, value)
}

fn convert<R, S>(descriptor: &FieldDescriptor<R>, source: &S, raw: String) -> FormxResult<FieldValue>
where
    S: SubmissionSource + ?Sized,
{
    let field = descriptor.name;
    match descriptor.kind {
        FieldKind::Text => Ok(FieldValue::Text(raw)),
        FieldKind::Int64 => raw
            .parse::<i64>()
            .map(FieldValue::Int64)
            .map_err(|_| FormxError::InvalidInteger {
                field: field.to_string(),
                value: raw,
            }),
        FieldKind::Bool => Ok(FieldValue::Bool(raw == CHECKBOX_ON)),
        FieldKind::Date => {
            let mut date = Date::default();
            match date.parse_text(&raw) {
                Ok(()) => Ok(FieldValue::Date(date)),
                Err(e) => Err(FormxError::InvalidDate {
                    field: field.to_string(),
                    value: raw,
                    reason: e.to_string(),
                }),
            }
        }
        FieldKind::TextList => Ok(FieldValue::TextList(source.values(field))),
        FieldKind::Record | FieldKind::Other => {
            tracing::warn!(
                field,
                type_name = descriptor.type_name,
                "field type is not supported"
            );
            Err(FormxError::UnsupportedFieldType {
                field: field.to_string(),
                type_name: descriptor.type_name.to_string(),
            })
        }
    }
}
