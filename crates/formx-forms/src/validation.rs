//! Validation state for bound records.
//!
//! The binder hands every populated record to a [`FormValidation`] and
//! returns it to the caller. Rule failures are collected here, never raised
//! as errors: the caller checks [`FormValidation::has_errors`] and re-renders
//! the form with the messages.
//!
//! Two implementations ship with the crate:
//!
//! - [`PassThroughValidation`] accepts every record.
//! - [`RuleValidation`] interprets the comma-separated rule string attached
//!   to each field (`#[form_field(validate = "required,max_length=40")]`).

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::record::{FieldKind, FieldSnapshot, FieldValue, RecordView};

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    tag: String,
    field: String,
    message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(
        tag: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// The name of the rule that failed, e.g. `"required"`.
    pub fn actual_tag(&self) -> &str {
        &self.tag
    }

    /// The field the rule was attached to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FieldError {}

/// Per-submission validation state.
pub trait FormValidation: Send + Sync + fmt::Debug {
    /// Runs the rules against `record`, replacing any previous field errors.
    fn validate_struct(&mut self, record: &dyn RecordView);

    /// Returns `true` if a form-level error is set.
    fn has_form_error(&self) -> bool;

    /// Sets the form-level error.
    fn set_form_error(&mut self, message: &str);

    /// Returns the form-level error, or an empty string.
    fn form_error(&self) -> String;

    /// Returns `true` if `field` has an error.
    fn has_field_error(&self, field: &str) -> bool;

    /// Returns `true` if any field or form-level error is set.
    fn has_errors(&self) -> bool;

    /// Returns the message for `field`, or an empty string.
    fn error_message(&self, field: &str) -> String;

    /// Returns the error for `field`, if any.
    fn field_error(&self, field: &str) -> Option<FieldError>;
}

/// Creates fresh validation state for each submission.
pub type ValidationFactory = Arc<dyn Fn() -> Box<dyn FormValidation> + Send + Sync>;

/// Returns a factory producing `V::default()`.
pub fn validation_factory<V>() -> ValidationFactory
where
    V: FormValidation + Default + 'static,
{
    Arc::new(|| -> Box<dyn FormValidation> { Box::new(V::default()) })
}

/// Error storage shared by the built-in validators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    form_error: Option<String>,
    field_errors: Vec<FieldError>,
}

impl ErrorState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every field error. The form-level error is kept.
    pub fn clear_field_errors(&mut self) {
        self.field_errors.clear();
    }

    /// Records a field error, replacing an earlier one for the same field.
    pub fn add_field_error(&mut self, error: FieldError) {
        self.field_errors.retain(|e| e.field != error.field);
        self.field_errors.push(error);
    }

    /// Returns every field error in the order they were recorded.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    fn find(&self, field: &str) -> Option<&FieldError> {
        self.field_errors.iter().find(|e| e.field == field)
    }
}

impl FormValidation for ErrorState {
    fn validate_struct(&mut self, _record: &dyn RecordView) {}

    fn has_form_error(&self) -> bool {
        self.form_error.is_some()
    }

    fn set_form_error(&mut self, message: &str) {
        self.form_error = Some(message.to_string());
    }

    fn form_error(&self) -> String {
        self.form_error.clone().unwrap_or_default()
    }

    fn has_field_error(&self, field: &str) -> bool {
        self.find(field).is_some()
    }

    fn has_errors(&self) -> bool {
        self.form_error.is_some() || !self.field_errors.is_empty()
    }

    fn error_message(&self, field: &str) -> String {
        self.find(field)
            .map(|e| e.message.clone())
            .unwrap_or_default()
    }

    fn field_error(&self, field: &str) -> Option<FieldError> {
        self.find(field).cloned()
    }
}

/// Accepts every record. Only an explicit
/// [`set_form_error`](FormValidation::set_form_error) produces an error.
#[derive(Debug, Clone, Default)]
pub struct PassThroughValidation {
    state: ErrorState,
}

impl PassThroughValidation {
    /// Creates a pass-through validator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormValidation for PassThroughValidation {
    fn validate_struct(&mut self, _record: &dyn RecordView) {
        self.state.clear_field_errors();
    }

    fn has_form_error(&self) -> bool {
        self.state.has_form_error()
    }

    fn set_form_error(&mut self, message: &str) {
        self.state.set_form_error(message);
    }

    fn form_error(&self) -> String {
        self.state.form_error()
    }

    fn has_field_error(&self, field: &str) -> bool {
        self.state.has_field_error(field)
    }

    fn has_errors(&self) -> bool {
        self.state.has_errors()
    }

    fn error_message(&self, field: &str) -> String {
        self.state.error_message(field)
    }

    fn field_error(&self, field: &str) -> Option<FieldError> {
        self.state.field_error(field)
    }
}

/// A record-wide check producing the form-level error.
pub type FormCheck = Arc<dyn Fn(&dyn RecordView) -> Result<(), String> + Send + Sync>;

/// Interprets per-field rule strings.
///
/// Rules are comma-separated; arguments follow `=`:
///
/// | rule | applies to | fails when |
/// |------|------------|------------|
/// | `required` | all | the value is zero (empty, `0`, `false`, absent date) |
/// | `email` | text | not an email address |
/// | `url` | text | not an `http(s)` URL |
/// | `min_length=N`, `max_length=N` | text, text list | character / item count out of range |
/// | `min=N`, `max=N` | int64 | value out of range |
/// | `oneof=a\|b` | text, text list | a value is not listed |
///
/// Rules other than `required` are skipped for zero values. The first
/// failing rule of a field is recorded; its tag is the rule name. Unknown
/// rules and malformed arguments are logged and ignored.
///
/// # Examples
///
/// ```
/// use formx_forms::record::{FieldDescriptor, FieldKind, FormRecord, FormValue};
/// use formx_forms::validation::{FormValidation, RuleValidation};
///
/// #[derive(Default)]
/// struct Signup {
///     email: String,
/// }
///
/// impl FormRecord for Signup {
///     fn record_name() -> &'static str {
///         "Signup"
///     }
///
///     fn descriptors() -> Vec<FieldDescriptor<Self>> {
///         vec![FieldDescriptor::new("email", FieldKind::Text, |r: &Self| r.email.to_field_value())
///             .rules("required,email")]
///     }
/// }
///
/// let mut v = RuleValidation::new();
/// v.validate_struct(&Signup { email: "nope".into() });
/// assert_eq!(v.error_message("email"), "Enter a valid email address.");
/// assert_eq!(v.field_error("email").unwrap().actual_tag(), "email");
/// ```
#[derive(Clone, Default)]
pub struct RuleValidation {
    state: ErrorState,
    form_checks: Vec<FormCheck>,
}

impl RuleValidation {
    /// Creates a validator with no form-level checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a form-level check. The first failing check sets the form error.
    #[must_use]
    pub fn with_form_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&dyn RecordView) -> Result<(), String> + Send + Sync + 'static,
    {
        self.form_checks.push(Arc::new(check));
        self
    }

    /// Returns every field error in field order.
    pub fn field_errors(&self) -> &[FieldError] {
        self.state.field_errors()
    }
}

impl fmt::Debug for RuleValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleValidation")
            .field("state", &self.state)
            .field("form_checks", &self.form_checks.len())
            .finish()
    }
}

impl FormValidation for RuleValidation {
    fn validate_struct(&mut self, record: &dyn RecordView) {
        self.state.clear_field_errors();

        for snapshot in record.field_snapshots() {
            if let Some(error) = check_field(&snapshot) {
                tracing::debug!(
                    record = record.record_name(),
                    field = snapshot.name,
                    rule = error.actual_tag(),
                    "validation rule failed"
                );
                self.state.add_field_error(error);
            }
        }

        for check in &self.form_checks {
            if let Err(message) = check(record) {
                self.state.set_form_error(&message);
                break;
            }
        }
    }

    fn has_form_error(&self) -> bool {
        self.state.has_form_error()
    }

    fn set_form_error(&mut self, message: &str) {
        self.state.set_form_error(message);
    }

    fn form_error(&self) -> String {
        self.state.form_error()
    }

    fn has_field_error(&self, field: &str) -> bool {
        self.state.has_field_error(field)
    }

    fn has_errors(&self) -> bool {
        self.state.has_errors()
    }

    fn error_message(&self, field: &str) -> String {
        self.state.error_message(field)
    }

    fn field_error(&self, field: &str) -> Option<FieldError> {
        self.state.field_error(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    Required,
    Email,
    Url,
    MinLength(usize),
    MaxLength(usize),
    Min(i64),
    Max(i64),
    OneOf(Vec<String>),
}

impl Rule {
    const fn tag(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Url => "url",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::OneOf(_) => "oneof",
        }
    }
}

fn parse_rules(field: &str, raw: &str) -> Vec<Rule> {
    raw.split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .filter_map(|clause| {
            let (name, arg) = clause
                .split_once('=')
                .map_or((clause, None), |(n, a)| (n.trim(), Some(a.trim())));
            let rule = match (name, arg) {
                ("required", None) => Some(Rule::Required),
                ("email", None) => Some(Rule::Email),
                ("url", None) => Some(Rule::Url),
                ("min_length", Some(a)) => a.parse().ok().map(Rule::MinLength),
                ("max_length", Some(a)) => a.parse().ok().map(Rule::MaxLength),
                ("min", Some(a)) => a.parse().ok().map(Rule::Min),
                ("max", Some(a)) => a.parse().ok().map(Rule::Max),
                ("oneof", Some(a)) => Some(Rule::OneOf(
                    a.split('|').map(|s| s.trim().to_string()).collect(),
                )),
                _ => None,
            };
            if rule.is_none() {
                tracing::warn!(field, rule = clause, "ignoring unknown or malformed validation rule");
            }
            rule
        })
        .collect()
}

fn check_field(snapshot: &FieldSnapshot) -> Option<FieldError> {
    let rules = parse_rules(snapshot.name, snapshot.rules);
    let value = &snapshot.value;

    for rule in &rules {
        if value.is_zero() && *rule != Rule::Required {
            continue;
        }
        if let Some(message) = apply_rule(rule, snapshot.kind, value) {
            return Some(FieldError::new(rule.tag(), snapshot.name, message));
        }
    }
    None
}

fn apply_rule(rule: &Rule, kind: FieldKind, value: &FieldValue) -> Option<String> {
    match (rule, value) {
        (Rule::Required, v) => v.is_zero().then(|| "This field is required.".to_string()),
        (Rule::Email, FieldValue::Text(s)) => {
            (!email_regex().is_match(s)).then(|| "Enter a valid email address.".to_string())
        }
        (Rule::Url, FieldValue::Text(s)) => {
            (!url_regex().is_match(s)).then(|| "Enter a valid URL.".to_string())
        }
        (Rule::MinLength(min), FieldValue::Text(s)) => {
            let len = s.chars().count();
            (len < *min).then(|| {
                format!("Ensure this value has at least {min} characters (it has {len}).")
            })
        }
        (Rule::MaxLength(max), FieldValue::Text(s)) => {
            let len = s.chars().count();
            (len > *max).then(|| {
                format!("Ensure this value has at most {max} characters (it has {len}).")
            })
        }
        (Rule::MinLength(min), FieldValue::TextList(items)) => (items.len() < *min)
            .then(|| format!("Ensure this list has at least {min} items (it has {}).", items.len())),
        (Rule::MaxLength(max), FieldValue::TextList(items)) => (items.len() > *max)
            .then(|| format!("Ensure this list has at most {max} items (it has {}).", items.len())),
        (Rule::Min(min), FieldValue::Int64(n)) => (n < min)
            .then(|| format!("Ensure this value is greater than or equal to {min}.")),
        (Rule::Max(max), FieldValue::Int64(n)) => {
            (n > max).then(|| format!("Ensure this value is less than or equal to {max}."))
        }
        (Rule::OneOf(choices), FieldValue::Text(s)) => (!choices.contains(s)).then(|| {
            format!("Select a valid choice. {s} is not one of the available choices.")
        }),
        (Rule::OneOf(choices), FieldValue::TextList(items)) => {
            items.iter().find(|s| !choices.contains(s)).map(|s| {
                format!("Select a valid choice. {s} is not one of the available choices.")
            })
        }
        (rule, _) => {
            tracing::trace!(rule = rule.tag(), kind = %kind, "rule does not apply to field kind");
            None
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
    })
}

fn url_regex() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid regex"))
}
