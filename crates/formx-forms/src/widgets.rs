//! Widget system for rendering record fields as HTML.
//!
//! A [`Widget`] turns the metadata of one field ([`FieldInfo`]) into a
//! [`Component`]. Widgets are registered by name in a
//! [`FormConfig`](crate::config::FormConfig); the introspector picks one per
//! field from the field's tags and kind. An [`ErrorWidget`] renders the
//! form-level error after the fields.
//!
//! Every built-in widget wraps its control in a `<div class="field">` row with
//! a `<label>`, the `required`/`placeholder` attributes, the current value,
//! and a `<p class="field-error">` paragraph when the field has an error.

use std::fmt;
use std::sync::Arc;

use formx_core::settings::FormSettings;
use formx_core::FormxResult;

use crate::component::{Component, Html, RenderContext};
use crate::record::{FieldKind, FieldValue};
use crate::tags::{keys, Tags};
use crate::validation::FormValidation;

/// Names of the built-in widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetType {
    /// `<input type="text">`; the default for text and record fields.
    Text,
    /// `<textarea>`; selected by `type=textarea`.
    Textarea,
    /// `<input type="date">`; selected by `type=date`.
    Date,
    /// `<input type="checkbox">`; the default for boolean fields.
    Checkbox,
    /// `<input type="number">`.
    Number,
    /// `<input type="password">`. Never renders the current value.
    Password,
    /// `<input type="hidden">`, without label or error row.
    Hidden,
    /// `<select multiple>` with options from the `choices` tag.
    SelectMultiple,
}

impl WidgetType {
    /// Every built-in widget type.
    pub const ALL: [Self; 8] = [
        Self::Text,
        Self::Textarea,
        Self::Date,
        Self::Checkbox,
        Self::Number,
        Self::Password,
        Self::Hidden,
        Self::SelectMultiple,
    ];

    /// Returns the registry name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::Password => "password",
            Self::Hidden => "hidden",
            Self::SelectMultiple => "select_multiple",
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a widget needs to render one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// The field name; also the posted form key.
    pub name: String,
    /// The displayed label.
    pub label: String,
    /// The placeholder text, possibly empty.
    pub placeholder: String,
    /// The field's validation message, possibly empty.
    pub error: String,
    /// Whether the field is tagged `required=true`.
    pub required: bool,
    /// The parsed tags.
    pub tags: Tags,
    /// The current value.
    pub value: FieldValue,
    /// The field's kind.
    pub kind: FieldKind,
    /// The declared type name.
    pub type_name: String,
    /// The name of the record the field belongs to.
    pub record_name: String,
}

/// A pluggable renderer for one field, registered by name.
pub trait Widget: Send + Sync + fmt::Debug {
    /// Returns the registry key.
    fn name(&self) -> &str;

    /// Renders the field.
    fn render(
        &self,
        ctx: &RenderContext,
        info: &FieldInfo,
        validation: Option<&dyn FormValidation>,
    ) -> FormxResult<Box<dyn Component>>;
}

/// Renders the form-level error.
pub trait ErrorWidget: Send + Sync + fmt::Debug {
    /// Renders the error held by `validation`.
    fn render(&self, validation: &dyn FormValidation) -> FormxResult<Box<dyn Component>>;
}

/// Presentation options shared by the built-in widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetStyle {
    /// Appended to the label of required fields.
    pub required_marker: String,
    /// Prefix of generated `id` attributes.
    pub id_prefix: String,
}

impl Default for WidgetStyle {
    fn default() -> Self {
        Self::from(&FormSettings::default())
    }
}

impl From<&FormSettings> for WidgetStyle {
    fn from(settings: &FormSettings) -> Self {
        Self {
            required_marker: settings.required_marker.clone(),
            id_prefix: settings.id_prefix.clone(),
        }
    }
}

impl WidgetStyle {
    fn id_for(&self, name: &str) -> String {
        format!("{}{name}", self.id_prefix)
    }

    fn label(&self, info: &FieldInfo) -> String {
        let marker = if info.required {
            escape_html(&self.required_marker)
        } else {
            String::new()
        };
        format!(
            r#"<label for="{}">{}{marker}</label>"#,
            escape_html(&self.id_for(&info.name)),
            escape_html(&info.label)
        )
    }

    fn row(&self, info: &FieldInfo, control: &str) -> String {
        let class = if info.error.is_empty() {
            "field"
        } else {
            "field has-error"
        };
        let error = if info.error.is_empty() {
            String::new()
        } else {
            format!(r#"<p class="field-error">{}</p>"#, escape_html(&info.error))
        };
        format!(
            r#"<div class="{class}">{}{control}{error}</div>"#,
            self.label(info)
        )
    }

    fn base_attrs(&self, info: &FieldInfo) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("id", self.id_for(&info.name)), ("name", info.name.clone())];
        if !info.placeholder.is_empty() {
            attrs.push(("placeholder", info.placeholder.clone()));
        }
        attrs
    }
}

/// Escapes HTML special characters.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their entity equivalents.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Formats attributes as ` key="value"`, in order, escaping values.
fn render_attrs(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!(r#" {k}="{}""#, escape_html(v)))
        .collect()
}

fn flag(on: bool, name: &str) -> &str {
    if on {
        name
    } else {
        ""
    }
}

/// A single-line `<input>` of a fixed type.
#[derive(Debug, Clone)]
pub struct InputWidget {
    widget_type: WidgetType,
    input_type: &'static str,
    style: WidgetStyle,
}

impl InputWidget {
    /// `<input type="text">`.
    pub fn text(style: WidgetStyle) -> Self {
        Self::new(WidgetType::Text, "text", style)
    }

    /// `<input type="date">`.
    pub fn date(style: WidgetStyle) -> Self {
        Self::new(WidgetType::Date, "date", style)
    }

    /// `<input type="number">`.
    pub fn number(style: WidgetStyle) -> Self {
        Self::new(WidgetType::Number, "number", style)
    }

    /// `<input type="password">`.
    pub fn password(style: WidgetStyle) -> Self {
        Self::new(WidgetType::Password, "password", style)
    }

    /// `<input type="hidden">`.
    pub fn hidden(style: WidgetStyle) -> Self {
        Self::new(WidgetType::Hidden, "hidden", style)
    }

    const fn new(widget_type: WidgetType, input_type: &'static str, style: WidgetStyle) -> Self {
        Self {
            widget_type,
            input_type,
            style,
        }
    }
}

impl Widget for InputWidget {
    fn name(&self) -> &str {
        self.widget_type.as_str()
    }

    fn render(
        &self,
        _ctx: &RenderContext,
        info: &FieldInfo,
        _validation: Option<&dyn FormValidation>,
    ) -> FormxResult<Box<dyn Component>> {
        // A list posts back as a repeated key, one input per item. Only the
        // first input carries the id the label points at.
        let values = match (&info.value, self.widget_type) {
            (_, WidgetType::Password) => vec![String::new()],
            (FieldValue::TextList(items), _) if !items.is_empty() => items.clone(),
            (value, _) => vec![value.to_text()],
        };

        let control: String = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let mut attrs = vec![("type", self.input_type.to_string())];
                attrs.extend(
                    self.style
                        .base_attrs(info)
                        .into_iter()
                        .filter(|(key, _)| index == 0 || *key != "id"),
                );
                attrs.push(("value", value));
                format!(
                    "<input{}{} />",
                    render_attrs(&attrs),
                    flag(info.required, " required")
                )
            })
            .collect();

        let markup = if self.widget_type == WidgetType::Hidden {
            control
        } else {
            self.style.row(info, &control)
        };
        Ok(Box::new(Html::new(markup)))
    }
}

/// A multi-line `<textarea>`.
#[derive(Debug, Clone, Default)]
pub struct Textarea {
    style: WidgetStyle,
}

impl Textarea {
    /// Creates a textarea widget.
    pub const fn new(style: WidgetStyle) -> Self {
        Self { style }
    }
}

impl Widget for Textarea {
    fn name(&self) -> &str {
        WidgetType::Textarea.as_str()
    }

    fn render(
        &self,
        _ctx: &RenderContext,
        info: &FieldInfo,
        _validation: Option<&dyn FormValidation>,
    ) -> FormxResult<Box<dyn Component>> {
        let control = format!(
            "<textarea{}{}>{}</textarea>",
            render_attrs(&self.style.base_attrs(info)),
            flag(info.required, " required"),
            escape_html(&info.value.to_text())
        );
        Ok(Box::new(Html::new(self.style.row(info, &control))))
    }
}

/// A checkbox posting `on` when checked.
#[derive(Debug, Clone, Default)]
pub struct CheckboxInput {
    style: WidgetStyle,
}

impl CheckboxInput {
    /// Creates a checkbox widget.
    pub const fn new(style: WidgetStyle) -> Self {
        Self { style }
    }
}

impl Widget for CheckboxInput {
    fn name(&self) -> &str {
        WidgetType::Checkbox.as_str()
    }

    fn render(
        &self,
        _ctx: &RenderContext,
        info: &FieldInfo,
        _validation: Option<&dyn FormValidation>,
    ) -> FormxResult<Box<dyn Component>> {
        let checked = match &info.value {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => s == "on" || s == "true",
            _ => false,
        };
        let mut attrs = vec![("type", "checkbox".to_string())];
        attrs.extend(self.style.base_attrs(info));
        let control = format!(
            "<input{}{}{} />",
            render_attrs(&attrs),
            flag(checked, " checked"),
            flag(info.required, " required")
        );
        Ok(Box::new(Html::new(self.style.row(info, &control))))
    }
}

/// A `<select multiple>` whose options come from the `choices` tag.
#[derive(Debug, Clone, Default)]
pub struct SelectMultiple {
    style: WidgetStyle,
}

impl SelectMultiple {
    /// Creates a multi-select widget.
    pub const fn new(style: WidgetStyle) -> Self {
        Self { style }
    }
}

impl Widget for SelectMultiple {
    fn name(&self) -> &str {
        WidgetType::SelectMultiple.as_str()
    }

    fn render(
        &self,
        _ctx: &RenderContext,
        info: &FieldInfo,
        _validation: Option<&dyn FormValidation>,
    ) -> FormxResult<Box<dyn Component>> {
        let selected: Vec<String> = match &info.value {
            FieldValue::TextList(items) => items.clone(),
            FieldValue::Opaque => Vec::new(),
            other => vec![other.to_text()],
        };

        let options: String = info
            .tags
            .get(keys::CHOICES)
            .unwrap_or("")
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|choice| {
                let is_selected = selected.iter().any(|s| s == choice);
                format!(
                    r#"<option value="{0}"{1}>{0}</option>"#,
                    escape_html(choice),
                    flag(is_selected, " selected")
                )
            })
            .collect();

        let control = format!(
            "<select multiple{}{}>{options}</select>",
            render_attrs(&self.style.base_attrs(info)),
            flag(info.required, " required")
        );
        Ok(Box::new(Html::new(self.style.row(info, &control))))
    }
}

/// Renders the form-level error as an alert box.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorList;

impl ErrorWidget for ErrorList {
    fn render(&self, validation: &dyn FormValidation) -> FormxResult<Box<dyn Component>> {
        Ok(Box::new(Html::new(format!(
            r#"<div class="form-error" role="alert">{}</div>"#,
            escape_html(&validation.form_error())
        ))))
    }
}

/// Returns one instance of every built-in widget.
pub fn builtin_widgets(style: &WidgetStyle) -> Vec<Arc<dyn Widget>> {
    WidgetType::ALL
        .iter()
        .map(|t| -> Arc<dyn Widget> {
            let style = style.clone();
            match t {
                WidgetType::Text => Arc::new(InputWidget::text(style)),
                WidgetType::Textarea => Arc::new(Textarea::new(style)),
                WidgetType::Date => Arc::new(InputWidget::date(style)),
                WidgetType::Checkbox => Arc::new(CheckboxInput::new(style)),
                WidgetType::Number => Arc::new(InputWidget::number(style)),
                WidgetType::Password => Arc::new(InputWidget::password(style)),
                WidgetType::Hidden => Arc::new(InputWidget::hidden(style)),
                WidgetType::SelectMultiple => Arc::new(SelectMultiple::new(style)),
            }
        })
        .collect()
}
