//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (missing keys keep their defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMX_DEBUG` | `debug` |
//! | `FORMX_LOG_LEVEL` | `log_level` |
//! | `FORMX_REGISTER_DEFAULT_WIDGETS` | `forms.register_default_widgets` |
//! | `FORMX_REQUIRED_MARKER` | `forms.required_marker` |
//! | `FORMX_ID_PREFIX` | `forms.id_prefix` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formx_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/formx.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::FormxError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// # Errors
///
/// Returns [`FormxError::ConfigurationError`] if the TOML is malformed or
/// does not match the settings schema.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormxError> {
    toml::from_str(toml_str)
        .map_err(|e| FormxError::ConfigurationError(format!("Failed to parse TOML: {e}")))
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormxError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormxError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormxError> {
    serde_json::from_str(json_str)
        .map_err(|e| FormxError::ConfigurationError(format!("Failed to parse JSON: {e}")))
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormxError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `FORMX_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

/// Applies overrides using an arbitrary variable lookup.
///
/// [`apply_env_overrides`] delegates here with `std::env::var`.
pub fn apply_overrides_from(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("FORMX_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Some(val) = lookup("FORMX_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("FORMX_REGISTER_DEFAULT_WIDGETS") {
        settings.forms.register_default_widgets = parse_bool(&val);
    }

    if let Some(val) = lookup("FORMX_REQUIRED_MARKER") {
        settings.forms.required_marker = val;
    }

    if let Some(val) = lookup("FORMX_ID_PREFIX") {
        settings.forms.id_prefix = val;
    }
}

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, format: &str) -> Result<String, FormxError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormxError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = true
            log_level = "formx_forms=debug"

            [forms]
            required_marker = " (required)"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "formx_forms=debug");
        assert_eq!(settings.forms.required_marker, " (required)");
        // Defaults preserved
        assert_eq!(settings.forms.id_prefix, "id_");
        assert!(settings.forms.register_default_widgets);
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let err = from_toml_str("debug = [").unwrap_err();
        assert!(matches!(err, FormxError::ConfigurationError(_)));
    }

    #[test]
    fn test_from_json_str_basic() {
        let settings =
            from_json_str(r#"{"forms": {"register_default_widgets": false}}"#).unwrap();
        assert!(!settings.forms.register_default_widgets);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = std::env::temp_dir().join("formx_settings_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("formx.toml");
        std::fs::write(&path, "log_level = \"warn\"\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.log_level, "warn");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = from_toml_file("/nonexistent/formx.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read TOML file"));
    }

    #[test]
    fn test_apply_overrides_from() {
        let vars: HashMap<&str, &str> = [
            ("FORMX_DEBUG", "yes"),
            ("FORMX_LOG_LEVEL", "trace"),
            ("FORMX_REGISTER_DEFAULT_WIDGETS", "0"),
            ("FORMX_ID_PREFIX", "f_"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        apply_overrides_from(&mut settings, |k| vars.get(k).map(|v| (*v).to_string()));

        assert!(settings.debug);
        assert_eq!(settings.log_level, "trace");
        assert!(!settings.forms.register_default_widgets);
        assert_eq!(settings.forms.id_prefix, "f_");
        assert_eq!(settings.forms.required_marker, " *");
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("off"));
    }
}
