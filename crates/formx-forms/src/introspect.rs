//! Record-to-form rendering.
//!
//! [`generate_form_inputs`] walks the visible fields of a record in
//! declaration order, resolves a widget for each from its tags and kind, and
//! collects the rendered widgets into a [`ComponentList`]. Any failure aborts
//! the whole call; no partial list is returned.

use std::io::Write;

use formx_core::logging::render_span;
use formx_core::{FormxError, FormxResult};

use crate::component::{Component, ComponentList, RenderContext};
use crate::config::FormConfig;
use crate::record::{FieldDescriptor, FieldKind, FormRecord};
use crate::tags::{keys, parse_tags, Tags};
use crate::validation::FormValidation;
use crate::widgets::{FieldInfo, WidgetType};

/// Resolves the widget name for a field.
///
/// An explicit `widget` tag wins. Otherwise text, record and date fields use
/// `text` (or `textarea`/`date` when tagged `type=textarea`/`type=date`),
/// and boolean fields use `checkbox`.
///
/// # Errors
///
/// Returns [`FormxError::UnsupportedKind`] for any other kind without a
/// `widget` tag.
pub fn resolve_widget_name(field: &str, kind: FieldKind, tags: &Tags) -> FormxResult<String> {
    if let Some(widget) = tags.get(keys::WIDGET) {
        return Ok(widget.to_string());
    }

    let widget = match kind {
        FieldKind::Text | FieldKind::Record | FieldKind::Date => match tags.get(keys::TYPE) {
            Some("textarea") => WidgetType::Textarea,
            Some("date") => WidgetType::Date,
            _ => WidgetType::Text,
        },
        FieldKind::Bool => WidgetType::Checkbox,
        FieldKind::Int64 | FieldKind::TextList | FieldKind::Other => {
            tracing::warn!(field, kind = %kind, "no default widget for field kind");
            return Err(FormxError::UnsupportedKind {
                field: field.to_string(),
                kind: kind.to_string(),
            });
        }
    };
    Ok(widget.as_str().to_string())
}

/// Assembles the widget metadata for one field.
pub fn field_info<R: FormRecord>(
    descriptor: &FieldDescriptor<R>,
    tags: Tags,
    validation: Option<&dyn FormValidation>,
    record: &R,
) -> FieldInfo {
    let name = descriptor.name;
    FieldInfo {
        name: name.to_string(),
        label: tags.get(keys::LABEL).unwrap_or(name).to_string(),
        placeholder: tags.get(keys::PLACEHOLDER).unwrap_or_default().to_string(),
        error: validation.map(|v| v.error_message(name)).unwrap_or_default(),
        required: tags.is_required(),
        value: descriptor.value(record),
        kind: descriptor.kind,
        type_name: descriptor.type_name.to_string(),
        record_name: R::record_name().to_string(),
        tags,
    }
}

/// Renders one component per visible field of `record`, followed by the
/// error widget when `validation` carries a form-level error.
///
/// # Errors
///
/// Fails on the first field whose kind has no default widget, whose widget
/// is not registered, or whose widget fails to render, and when the
/// form-level error must be shown but no error widget is registered.
///
/// # Examples
///
/// ```
/// use formx_forms::component::{render_to_string, RenderContext};
/// use formx_forms::config::FormConfig;
/// use formx_forms::introspect::generate_form_inputs;
/// use formx_forms::record::{FieldDescriptor, FieldKind, FormRecord, FormValue};
/// use formx_forms::validation::{validation_factory, PassThroughValidation};
///
/// struct Login {
///     user: String,
/// }
///
/// impl FormRecord for Login {
///     fn record_name() -> &'static str {
///         "Login"
///     }
///
///     fn descriptors() -> Vec<FieldDescriptor<Self>> {
///         vec![FieldDescriptor::new("user", FieldKind::Text, |r: &Self| r.user.to_field_value())
///             .tags("label=User name")]
///     }
/// }
///
/// let config = FormConfig::with_default_widgets(validation_factory::<PassThroughValidation>());
/// let ctx = RenderContext::new();
/// let form = generate_form_inputs(&config, &ctx, None, &Login { user: "ann".into() }).unwrap();
/// let html = render_to_string(&form, &ctx).unwrap();
/// assert!(html.contains("User name</label>"));
/// assert!(html.contains(r#"value="ann""#));
/// ```
pub fn generate_form_inputs<R: FormRecord>(
    config: &FormConfig,
    ctx: &RenderContext,
    validation: Option<&dyn FormValidation>,
    record: &R,
) -> FormxResult<ComponentList> {
    let span = render_span(R::record_name());
    let _guard = span.enter();

    let mut components = ComponentList::new();

    for descriptor in R::visible_descriptors() {
        let tags = parse_tags(descriptor.tags);
        let widget_name = resolve_widget_name(descriptor.name, descriptor.kind, &tags)?;
        let widget = config.widget(&widget_name)?;

        tracing::debug!(
            field = descriptor.name,
            widget = %widget_name,
            request_id = ctx.request_id(),
            "rendering field"
        );

        let info = field_info(&descriptor, tags, validation, record);
        components.push(widget.render(ctx, &info, validation)?);
    }

    if let Some(validation) = validation.filter(|v| v.has_form_error()) {
        let error_widget = config.error_widget()?;
        components.push(error_widget.render(validation)?);
    }

    Ok(components)
}

/// Generates the form inputs for `record` and writes them to `w`.
///
/// # Errors
///
/// Propagates every failure of [`generate_form_inputs`] and of rendering,
/// including [`FormxError::Cancelled`].
pub fn render_form<R: FormRecord>(
    config: &FormConfig,
    ctx: &RenderContext,
    validation: Option<&dyn FormValidation>,
    record: &R,
    w: &mut dyn Write,
) -> FormxResult<()> {
    generate_form_inputs(config, ctx, validation, record)?.render(ctx, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{render_to_string, Html};
    use crate::date::Date;
    use crate::record::FormValue;
    use crate::validation::{validation_factory, ErrorState, FieldError, PassThroughValidation};
    use crate::widgets::{builtin_widgets, ErrorWidget};

    #[derive(Default)]
    struct Profile {
        name: String,
        bio: String,
        born: Date,
        agree: bool,
        age: i64,
    }

    impl FormRecord for Profile {
        fn record_name() -> &'static str {
            "Profile"
        }

        fn descriptors() -> Vec<FieldDescriptor<Self>> {
            vec![
                FieldDescriptor::new("name", FieldKind::Text, |r: &Self| r.name.to_field_value())
                    .tags("label=Full name;required=true;placeholder=Jane"),
                FieldDescriptor::new("bio", FieldKind::Text, |r: &Self| r.bio.to_field_value())
                    .tags("type=textarea"),
                FieldDescriptor::new("born", FieldKind::Date, |r: &Self| r.born.to_field_value())
                    .tags("type=date"),
                FieldDescriptor::new("agree", FieldKind::Bool, |r: &Self| r.agree.to_field_value()),
                FieldDescriptor::new("age", FieldKind::Int64, |r: &Self| r.age.to_field_value())
                    .tags("widget=number"),
            ]
        }
    }

    fn config() -> FormConfig {
        FormConfig::with_default_widgets(validation_factory::<PassThroughValidation>())
    }

    #[test]
    fn test_resolve_widget_defaults() {
        let none = Tags::default();
        assert_eq!(resolve_widget_name("f", FieldKind::Text, &none).unwrap(), "text");
        assert_eq!(resolve_widget_name("f", FieldKind::Record, &none).unwrap(), "text");
        assert_eq!(resolve_widget_name("f", FieldKind::Date, &none).unwrap(), "text");
        assert_eq!(resolve_widget_name("f", FieldKind::Bool, &none).unwrap(), "checkbox");
        assert_eq!(
            resolve_widget_name("f", FieldKind::Text, &parse_tags("type=textarea")).unwrap(),
            "textarea"
        );
        assert_eq!(
            resolve_widget_name("f", FieldKind::Record, &parse_tags("type=date")).unwrap(),
            "date"
        );
        assert_eq!(
            resolve_widget_name("f", FieldKind::Text, &parse_tags("type=email")).unwrap(),
            "text"
        );
    }

    #[test]
    fn test_type_tag_ignored_for_bool() {
        assert_eq!(
            resolve_widget_name("f", FieldKind::Bool, &parse_tags("type=textarea")).unwrap(),
            "checkbox"
        );
    }

    #[test]
    fn test_widget_tag_wins_verbatim() {
        let tags = parse_tags("widget=stars;type=textarea");
        assert_eq!(resolve_widget_name("f", FieldKind::Text, &tags).unwrap(), "stars");
        assert_eq!(resolve_widget_name("f", FieldKind::Int64, &tags).unwrap(), "stars");
    }

    #[test]
    fn test_unsupported_kind_without_widget_tag() {
        for kind in [FieldKind::Int64, FieldKind::TextList, FieldKind::Other] {
            let err = resolve_widget_name("count", kind, &Tags::default()).unwrap_err();
            assert!(matches!(err, FormxError::UnsupportedKind { ref field, .. } if field == "count"));
        }
    }

    #[test]
    fn test_field_info_defaults() {
        let descriptors = Profile::descriptors();
        let record = Profile::default();

        let info = field_info(&descriptors[0], parse_tags(descriptors[0].tags), None, &record);
        assert_eq!(info.label, "Full name");
        assert!(info.required);
        assert_eq!(info.placeholder, "Jane");
        assert_eq!(info.record_name, "Profile");

        let info = field_info(&descriptors[3], parse_tags(descriptors[3].tags), None, &record);
        assert_eq!(info.label, "agree");
        assert!(!info.required);
        assert_eq!(info.placeholder, "");
        assert_eq!(info.error, "");
    }

    #[test]
    fn test_one_component_per_field_in_order() {
        let ctx = RenderContext::new();
        let record = Profile {
            name: "Ann".into(),
            born: Date::new(2020, 5, 1),
            agree: true,
            age: 41,
            ..Profile::default()
        };
        let list = generate_form_inputs(&config(), &ctx, None, &record).unwrap();
        assert_eq!(list.len(), 5);

        let html = render_to_string(&list, &ctx).unwrap();
        let positions: Vec<usize> = [
            r#"name="name""#,
            "<textarea",
            r#"type="date""#,
            r#"type="checkbox""#,
            r#"type="number""#,
        ]
        .iter()
        .map(|needle| html.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains(r#"value="2020-05-01""#));
        assert!(html.contains(r#"value="41""#));
    }

    #[test]
    fn test_field_error_is_rendered() {
        let ctx = RenderContext::new();
        let mut state = ErrorState::new();
        state.add_field_error(FieldError::new(
            "required",
            "name",
            "This field is required.",
        ));
        let list = generate_form_inputs(&config(), &ctx, Some(&state), &Profile::default()).unwrap();
        let html = render_to_string(&list, &ctx).unwrap();
        assert!(html.contains(r#"<p class="field-error">This field is required.</p>"#));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_form_error_appends_error_widget() {
        let ctx = RenderContext::new();
        let mut validation = PassThroughValidation::new();
        validation.set_form_error("Try again.");
        let list =
            generate_form_inputs(&config(), &ctx, Some(&validation), &Profile::default()).unwrap();
        assert_eq!(list.len(), 6);
        let html = render_to_string(&list, &ctx).unwrap();
        assert!(html.ends_with(r#"<div class="form-error" role="alert">Try again.</div>"#));
    }

    #[test]
    fn test_form_error_without_error_widget_fails() {
        let ctx = RenderContext::new();
        let mut config = FormConfig::new(validation_factory::<PassThroughValidation>());
        config
            .register_widgets(builtin_widgets(&Default::default()))
            .unwrap();
        let mut validation = PassThroughValidation::new();
        validation.set_form_error("Try again.");
        let err = generate_form_inputs(&config, &ctx, Some(&validation), &Profile::default())
            .unwrap_err();
        assert!(matches!(err, FormxError::ErrorWidgetMissing));
    }

    #[test]
    fn test_custom_error_widget() {
        #[derive(Debug)]
        struct Banner;

        impl ErrorWidget for Banner {
            fn render(&self, validation: &dyn FormValidation) -> FormxResult<Box<dyn Component>> {
                Ok(Box::new(Html::new(format!(
                    "!{}!",
                    validation.form_error()
                ))))
            }
        }

        let ctx = RenderContext::new();
        let mut config = config();
        config.register_error_widget(std::sync::Arc::new(Banner));
        let mut validation = PassThroughValidation::new();
        validation.set_form_error("bad");
        let list =
            generate_form_inputs(&config, &ctx, Some(&validation), &Profile::default()).unwrap();
        assert!(render_to_string(&list, &ctx).unwrap().ends_with("!bad!"));
    }

    #[test]
    fn test_unregistered_widget_aborts() {
        let ctx = RenderContext::new();
        let config = FormConfig::new(validation_factory::<PassThroughValidation>());
        let err = generate_form_inputs(&config, &ctx, None, &Profile::default()).unwrap_err();
        assert!(matches!(err, FormxError::UnknownWidget(ref w) if w == "text"));
    }

    #[test]
    fn test_render_form_honours_cancellation() {
        let ctx = RenderContext::new();
        ctx.cancel();
        let mut out = Vec::new();
        let err = render_form(&config(), &ctx, None, &Profile::default(), &mut out).unwrap_err();
        assert!(matches!(err, FormxError::Cancelled));
        assert!(out.is_empty());
    }
}
