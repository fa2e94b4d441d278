//! Settings for formx-rs.
//!
//! [`Settings`] holds process-level configuration: logging and the options
//! used when building the form configuration at startup. All fields have
//! sensible defaults, so an empty configuration file is valid.

use serde::{Deserialize, Serialize};

/// Options for form rendering and the widget registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Whether the built-in widgets are registered when the form
    /// configuration is created from settings.
    pub register_default_widgets: bool,
    /// Text appended to the label of a required field.
    pub required_marker: String,
    /// Prefix for generated HTML `id` attributes.
    pub id_prefix: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            register_default_widgets: true,
            required_marker: " *".to_string(),
            id_prefix: "id_".to_string(),
        }
    }
}

/// The complete set of formx settings.
///
/// # Examples
///
/// ```
/// use formx_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(!settings.debug);
/// assert_eq!(settings.log_level, "info");
/// assert!(settings.forms.register_default_widgets);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled. Switches logging to a pretty format.
    pub debug: bool,
    /// The log filter directive (e.g. "info", "formx_forms=debug").
    pub log_level: String,
    /// Form rendering options.
    pub forms: FormSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            forms: FormSettings::default(),
        }
    }
}
