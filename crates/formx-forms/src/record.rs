//! Static field-descriptor tables for form records.
//!
//! A form record is a struct with named fields. Instead of inspecting the
//! struct at runtime, each record type supplies an ordered list of
//! [`FieldDescriptor`]s, normally generated by `#[derive(FormRecord)]`. A
//! descriptor names the field, classifies its declared type into a
//! [`FieldKind`], carries its raw tag and rule strings, and holds a getter and
//! setter that move values across the boundary as [`FieldValue`]s.
//!
//! Only *visible* fields take part in rendering, binding and validation. The
//! derive macro marks `pub` fields visible and every other field hidden, so
//! both directions see the same fields in the same order.

use std::fmt;

use formx_core::{FormxError, FormxResult};

use crate::date::Date;

/// Classification of a field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `String`.
    Text,
    /// `i64`.
    Int64,
    /// `bool`.
    Bool,
    /// [`Date`].
    Date,
    /// `Vec<String>`, bound from every value posted under the field name.
    TextList,
    /// Any other struct-like type.
    Record,
    /// Any other scalar (`i32`, `f64`, `Option<T>`, ...).
    Other,
}

impl FieldKind {
    /// Returns the lowercase name used in logs and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int64 => "int64",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::TextList => "text list",
            Self::Record => "record",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value crossing the descriptor boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A text value.
    Text(String),
    /// A 64-bit integer.
    Int64(i64),
    /// A boolean.
    Bool(bool),
    /// A date.
    Date(Date),
    /// A list of text values.
    TextList(Vec<String>),
    /// The field's type has no value representation.
    Opaque,
}

impl FieldValue {
    /// Returns the value as it would appear in a form input.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int64(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Date(d) => d.to_text(),
            Self::TextList(items) => items.join(","),
            Self::Opaque => String::new(),
        }
    }

    /// Returns `true` for the zero value of the shape: empty text or list,
    /// `0`, `false`, the absent date.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Int64(n) => *n == 0,
            Self::Bool(b) => !b,
            Self::Date(d) => d.is_zero(),
            Self::TextList(items) => items.is_empty(),
            Self::Opaque => false,
        }
    }

    /// Returns the shape name, for error messages.
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int64(_) => "int64",
            Self::Bool(_) => "bool",
            Self::Date(_) => "date",
            Self::TextList(_) => "text list",
            Self::Opaque => "opaque",
        }
    }
}

/// Conversion between a Rust field type and [`FieldValue`].
///
/// Implemented for every type whose [`FieldKind`] the binder can assign.
pub trait FormValue: Sized {
    /// Wraps the current value.
    fn to_field_value(&self) -> FieldValue;

    /// Unwraps a value for assignment to `field`.
    fn from_field_value(field: &str, value: FieldValue) -> FormxResult<Self>;
}

macro_rules! impl_form_value {
    (copy $ty:ty, $variant:ident, $expected:literal) => {
        impl_form_value!(@impl $ty, $variant, $expected, |v| *v);
    };
    (clone $ty:ty, $variant:ident, $expected:literal) => {
        impl_form_value!(@impl $ty, $variant, $expected, |v| v.clone());
    };
    (@impl $ty:ty, $variant:ident, $expected:literal, |$v:ident| $read:expr) => {
        impl FormValue for $ty {
            fn to_field_value(&self) -> FieldValue {
                let $v = self;
                FieldValue::$variant($read)
            }

            fn from_field_value(field: &str, value: FieldValue) -> FormxResult<Self> {
                match value {
                    FieldValue::$variant(v) => Ok(v),
                    other => Err(mismatch(field, $expected, &other)),
                }
            }
        }
    };
}

impl_form_value!(clone String, Text, "text");
impl_form_value!(copy i64, Int64, "int64");
impl_form_value!(copy bool, Bool, "bool");
impl_form_value!(copy Date, Date, "date");
impl_form_value!(clone Vec<String>, TextList, "text list");

fn mismatch(field: &str, expected: &str, found: &FieldValue) -> FormxError {
    FormxError::ValueMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        found: found.shape().to_string(),
    }
}

/// How the binder writes a field.
pub enum Setter<R> {
    /// Assigns a converted value.
    Assign(fn(&mut R, FieldValue) -> FormxResult<()>),
    /// The field is writable, but its type has no value conversion.
    Opaque,
    /// The field cannot be written.
    ReadOnly,
}

impl<R> Clone for Setter<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Setter<R> {}

impl<R> fmt::Debug for Setter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign(_) => f.write_str("Assign"),
            Self::Opaque => f.write_str("Opaque"),
            Self::ReadOnly => f.write_str("ReadOnly"),
        }
    }
}

/// Describes one field of a record type `R`.
///
/// Descriptors are built with a chain of setters, mirroring what the derive
/// macro emits:
///
/// ```
/// use formx_forms::record::{FieldDescriptor, FieldKind, FieldValue, FormValue};
///
/// #[derive(Default)]
/// struct Signup {
///     name: String,
/// }
///
/// let field = FieldDescriptor::new("name", FieldKind::Text, |r: &Signup| r.name.to_field_value())
///     .type_name("String")
///     .tags("label=Your name;required=true")
///     .setter(|r: &mut Signup, v: FieldValue| {
///         r.name = FormValue::from_field_value("name", v)?;
///         Ok(())
///     });
///
/// let mut record = Signup::default();
/// field.assign(&mut record, FieldValue::Text("Ann".into())).unwrap();
/// assert_eq!(record.name, "Ann");
/// ```
pub struct FieldDescriptor<R> {
    /// The field name; also the posted form key.
    pub name: &'static str,
    /// The declared type as written in the record definition.
    pub type_name: &'static str,
    /// The classified kind.
    pub kind: FieldKind,
    /// The raw tag string.
    pub tags: &'static str,
    /// The raw validation-rule string.
    pub rules: &'static str,
    /// Whether the field takes part in rendering and binding.
    pub visible: bool,
    /// Reads the field.
    pub get: fn(&R) -> FieldValue,
    /// Writes the field.
    pub set: Setter<R>,
}

impl<R> FieldDescriptor<R> {
    /// Creates a visible, read-only descriptor.
    pub fn new(name: &'static str, kind: FieldKind, get: fn(&R) -> FieldValue) -> Self {
        Self {
            name,
            type_name: kind.as_str(),
            kind,
            tags: "",
            rules: "",
            visible: true,
            get,
            set: Setter::ReadOnly,
        }
    }

    /// Sets the declared type name.
    #[must_use]
    pub const fn type_name(mut self, type_name: &'static str) -> Self {
        self.type_name = type_name;
        self
    }

    /// Sets the raw tag string.
    #[must_use]
    pub const fn tags(mut self, tags: &'static str) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the raw validation-rule string.
    #[must_use]
    pub const fn rules(mut self, rules: &'static str) -> Self {
        self.rules = rules;
        self
    }

    /// Makes the field writable through `set`.
    #[must_use]
    pub fn setter(mut self, set: fn(&mut R, FieldValue) -> FormxResult<()>) -> Self {
        self.set = Setter::Assign(set);
        self
    }

    /// Makes the field writable but without a value conversion.
    #[must_use]
    pub fn opaque(mut self) -> Self {
        self.set = Setter::Opaque;
        self
    }

    /// Hides the field from rendering, binding and validation.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Returns `true` unless the field is read-only.
    pub const fn is_settable(&self) -> bool {
        !matches!(self.set, Setter::ReadOnly)
    }

    /// Reads the field from `record`.
    pub fn value(&self, record: &R) -> FieldValue {
        (self.get)(record)
    }

    /// Writes `value` into `record`.
    pub fn assign(&self, record: &mut R, value: FieldValue) -> FormxResult<()> {
        match self.set {
            Setter::Assign(set) => set(record, value),
            Setter::Opaque => Err(FormxError::UnsupportedFieldType {
                field: self.name.to_string(),
                type_name: self.type_name.to_string(),
            }),
            Setter::ReadOnly => Err(FormxError::FieldNotSettable(self.name.to_string())),
        }
    }
}

impl<R> Clone for FieldDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            type_name: self.type_name,
            kind: self.kind,
            tags: self.tags,
            rules: self.rules,
            visible: self.visible,
            get: self.get,
            set: self.set,
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .field("tags", &self.tags)
            .field("rules", &self.rules)
            .field("visible", &self.visible)
            .field("set", &self.set)
            .finish_non_exhaustive()
    }
}

/// A record type that can be rendered as a form and bound from one.
///
/// Implement with `#[derive(FormRecord)]`, or by hand by listing the
/// descriptors in declaration order.
pub trait FormRecord: Sized {
    /// The record's display name, used in logs.
    fn record_name() -> &'static str;

    /// Every field of the record in declaration order, hidden ones included.
    fn descriptors() -> Vec<FieldDescriptor<Self>>;

    /// The visible fields in declaration order.
    fn visible_descriptors() -> Vec<FieldDescriptor<Self>> {
        Self::descriptors().into_iter().filter(|d| d.visible).collect()
    }
}

/// A point-in-time view of one visible field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    /// The field name.
    pub name: &'static str,
    /// The declared type name.
    pub type_name: &'static str,
    /// The classified kind.
    pub kind: FieldKind,
    /// The raw tag string.
    pub tags: &'static str,
    /// The raw validation-rule string.
    pub rules: &'static str,
    /// The current value.
    pub value: FieldValue,
}

/// Object-safe, read-only access to a record.
///
/// Validation receives records through this trait. Every [`FormRecord`]
/// implements it.
pub trait RecordView {
    /// The record's display name.
    fn record_name(&self) -> &'static str;

    /// Snapshots of the visible fields in declaration order.
    fn field_snapshots(&self) -> Vec<FieldSnapshot>;

    /// The current value of a visible field.
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        self.field_snapshots()
            .into_iter()
            .find(|s| s.name == name)
            .map(|s| s.value)
    }
}

impl<R: FormRecord> RecordView for R {
    fn record_name(&self) -> &'static str {
        <R as FormRecord>::record_name()
    }

    fn field_snapshots(&self) -> Vec<FieldSnapshot> {
        R::visible_descriptors()
            .into_iter()
            .map(|d| FieldSnapshot {
                name: d.name,
                type_name: d.type_name,
                kind: d.kind,
                tags: d.tags,
                rules: d.rules,
                value: d.value(self),
            })
            .collect()
    }
}
