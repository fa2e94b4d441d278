//! Core error types for formx-rs.
//!
//! [`FormxError`] covers the two failure families of form rendering and
//! binding:
//!
//! - **Configuration errors**: misuse of the API such as an unknown widget
//!   name, a duplicate registration, an unsettable field, or a field type
//!   the binder cannot convert. These abort the current call.
//! - **Data errors**: a posted value that cannot be converted to the field's
//!   declared type (malformed integer or date). These also abort the whole
//!   bind; there is no partial result.
//!
//! Validation-rule failures are *not* errors in this sense. They are
//! collected into the form validation state and rendered back to the user.

use thiserror::Error;

/// The primary error type for formx-rs.
#[derive(Error, Debug)]
pub enum FormxError {
    // ── Configuration errors ─────────────────────────────────────────

    /// No widget is registered under the requested name.
    #[error("widget {0} not found")]
    UnknownWidget(String),

    /// A widget with the same name is already registered.
    #[error("widget {0} already registered")]
    DuplicateWidget(String),

    /// Registration of one widget in a batch failed.
    #[error("failed to register widget {name}: {source}")]
    WidgetRegistration {
        /// Name of the widget that could not be registered.
        name: String,
        /// The underlying registration failure.
        #[source]
        source: Box<FormxError>,
    },

    /// The form needs the error widget but none was registered.
    #[error("error widget not registered")]
    ErrorWidgetMissing,

    /// The field's binding has no setter.
    #[error("field {0} is not settable")]
    FieldNotSettable(String),

    /// The binder has no conversion for the field's declared type.
    #[error("field '{field}' type '{type_name}' is not supported")]
    UnsupportedFieldType {
        /// The field name.
        field: String,
        /// The declared type, as written in the record definition.
        type_name: String,
    },

    /// The introspector has no default widget for the field's kind.
    #[error("unsupported type: field '{field}' of kind {kind}")]
    UnsupportedKind {
        /// The field name.
        field: String,
        /// The resolved field kind.
        kind: String,
    },

    /// A setter received a value of the wrong shape.
    #[error("field '{field}' expects a {expected} value, got {found}")]
    ValueMismatch {
        /// The field name.
        field: String,
        /// The value shape the field accepts.
        expected: String,
        /// The value shape that was supplied.
        found: String,
    },

    /// The process-wide configuration was used before it was installed.
    #[error("formx global config not set")]
    NotInitialized,

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Data errors ──────────────────────────────────────────────────

    /// A posted value is not a base-10 signed 64-bit integer.
    #[error("field '{field}' value '{value}' is not int64")]
    InvalidInteger {
        /// The field name.
        field: String,
        /// The raw posted value.
        value: String,
    },

    /// A posted value is not a structurally valid date.
    #[error("field '{field}' value '{value}' is not a date: {reason}")]
    InvalidDate {
        /// The field name.
        field: String,
        /// The raw posted value.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    // ── Rendering ────────────────────────────────────────────────────

    /// A widget failed while producing its component.
    #[error("widget '{widget}' failed for field '{field}': {message}")]
    WidgetRender {
        /// The widget name.
        widget: String,
        /// The field being rendered.
        field: String,
        /// What went wrong.
        message: String,
    },

    /// The render context was cancelled while output was being written.
    #[error("render cancelled")]
    Cancelled,

    // ── IO / serialization ───────────────────────────────────────────

    /// An I/O error occurred while writing to the output sink.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FormxError {
    /// Returns `true` for errors that signal API misuse rather than bad
    /// end-user input.
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownWidget(_)
                | Self::DuplicateWidget(_)
                | Self::WidgetRegistration { .. }
                | Self::ErrorWidgetMissing
                | Self::FieldNotSettable(_)
                | Self::UnsupportedFieldType { .. }
                | Self::UnsupportedKind { .. }
                | Self::ValueMismatch { .. }
                | Self::NotInitialized
                | Self::ConfigurationError(_)
        )
    }

    /// Returns `true` for errors caused by malformed submitted values.
    pub const fn is_data_error(&self) -> bool {
        matches!(self, Self::InvalidInteger { .. } | Self::InvalidDate { .. })
    }
}

/// A convenience type alias for `Result<T, FormxError>`.
pub type FormxResult<T> = Result<T, FormxError>;
