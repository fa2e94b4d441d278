//! Widget registry and validation factory.
//!
//! A [`FormConfig`] maps widget names to [`Widget`]s, holds the single
//! [`ErrorWidget`] slot, and creates fresh validation state for each
//! submission. Build one at startup and pass it by reference to
//! [`generate_form_inputs`](crate::introspect::generate_form_inputs) and
//! [`restore_form`](crate::binder::restore_form).
//!
//! For code that cannot thread the configuration through, a process-wide
//! slot is available via [`init_global_config`] and [`global_config`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use formx_core::settings::Settings;
use formx_core::{FormxError, FormxResult};

use crate::validation::{FormValidation, ValidationFactory};
use crate::widgets::{builtin_widgets, ErrorList, ErrorWidget, Widget, WidgetStyle};

/// The widget registry and validation factory.
///
/// # Examples
///
/// ```
/// use formx_forms::config::FormConfig;
/// use formx_forms::validation::{validation_factory, PassThroughValidation};
///
/// let config = FormConfig::with_default_widgets(validation_factory::<PassThroughValidation>());
/// assert!(config.widget("text").is_ok());
/// assert!(config.widget("color").is_err());
/// ```
pub struct FormConfig {
    widgets: HashMap<String, Arc<dyn Widget>>,
    error_widget: Option<Arc<dyn ErrorWidget>>,
    new_validation: ValidationFactory,
}

impl FormConfig {
    /// Creates an empty registry.
    pub fn new(new_validation: ValidationFactory) -> Self {
        Self {
            widgets: HashMap::new(),
            error_widget: None,
            new_validation,
        }
    }

    /// Creates a registry holding the built-in widgets and [`ErrorList`].
    pub fn with_default_widgets(new_validation: ValidationFactory) -> Self {
        Self::with_style(new_validation, &WidgetStyle::default())
    }

    /// Creates a registry from settings.
    ///
    /// The built-ins are registered only when
    /// `settings.forms.register_default_widgets` is set.
    pub fn from_settings(settings: &Settings, new_validation: ValidationFactory) -> Self {
        if settings.forms.register_default_widgets {
            Self::with_style(new_validation, &WidgetStyle::from(&settings.forms))
        } else {
            Self::new(new_validation)
        }
    }

    fn with_style(new_validation: ValidationFactory, style: &WidgetStyle) -> Self {
        let mut config = Self::new(new_validation);
        for widget in builtin_widgets(style) {
            config.widgets.insert(widget.name().to_string(), widget);
        }
        config.error_widget = Some(Arc::new(ErrorList));
        config
    }

    /// Registers a widget under its name.
    ///
    /// # Errors
    ///
    /// Returns [`FormxError::DuplicateWidget`] if the name is taken.
    pub fn register_widget(&mut self, widget: Arc<dyn Widget>) -> FormxResult<()> {
        let name = widget.name().to_string();
        if self.widgets.contains_key(&name) {
            return Err(FormxError::DuplicateWidget(name));
        }
        tracing::debug!(widget = %name, "registered widget");
        self.widgets.insert(name, widget);
        Ok(())
    }

    /// Registers widgets in order, stopping at the first failure.
    ///
    /// Widgets registered before the failure stay registered.
    ///
    /// # Errors
    ///
    /// Returns [`FormxError::WidgetRegistration`] naming the offending widget.
    pub fn register_widgets<I>(&mut self, widgets: I) -> FormxResult<()>
    where
        I: IntoIterator<Item = Arc<dyn Widget>>,
    {
        for widget in widgets {
            let name = widget.name().to_string();
            self.register_widget(widget)
                .map_err(|source| FormxError::WidgetRegistration {
                    name,
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    /// Sets the error widget, replacing any previous one.
    pub fn register_error_widget(&mut self, widget: Arc<dyn ErrorWidget>) {
        self.error_widget = Some(widget);
    }

    /// Looks up a widget by name.
    ///
    /// # Errors
    ///
    /// Returns [`FormxError::UnknownWidget`] if nothing is registered under `name`.
    pub fn widget(&self, name: &str) -> FormxResult<Arc<dyn Widget>> {
        self.widgets
            .get(name)
            .cloned()
            .ok_or_else(|| FormxError::UnknownWidget(name.to_string()))
    }

    /// Returns `true` if a widget is registered under `name`.
    pub fn has_widget(&self, name: &str) -> bool {
        self.widgets.contains_key(name)
    }

    /// Returns the registered widget names, sorted.
    pub fn widget_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.widgets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the error widget.
    ///
    /// # Errors
    ///
    /// Returns [`FormxError::ErrorWidgetMissing`] if none was registered.
    pub fn error_widget(&self) -> FormxResult<Arc<dyn ErrorWidget>> {
        self.error_widget
            .clone()
            .ok_or(FormxError::ErrorWidgetMissing)
    }

    /// Creates fresh validation state.
    pub fn new_validation(&self) -> Box<dyn FormValidation> {
        (self.new_validation)()
    }
}

impl fmt::Debug for FormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormConfig")
            .field("widgets", &self.widget_names())
            .field("error_widget", &self.error_widget)
            .finish_non_exhaustive()
    }
}

static GLOBAL_CONFIG: RwLock<Option<Arc<FormConfig>>> = RwLock::new(None);

/// Installs `config` as the process-wide configuration, replacing any
/// previous one, and returns it.
pub fn init_global_config(config: FormConfig) -> Arc<FormConfig> {
    let config = Arc::new(config);
    *GLOBAL_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&config));
    tracing::info!(widgets = config.widgets.len(), "installed global form config");
    config
}

/// Returns the process-wide configuration.
///
/// # Errors
///
/// Returns [`FormxError::NotInitialized`] before [`init_global_config`].
pub fn global_config() -> FormxResult<Arc<FormConfig>> {
    GLOBAL_CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(FormxError::NotInitialized)
}

/// Removes the process-wide configuration.
pub fn reset_global_config() {
    *GLOBAL_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Looks up a widget in the process-wide configuration.
///
/// # Errors
///
/// Returns [`FormxError::NotInitialized`] before [`init_global_config`], or
/// [`FormxError::UnknownWidget`] if the name is not registered.
pub fn get_widget(name: &str) -> FormxResult<Arc<dyn Widget>> {
    global_config()?.widget(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, Html, RenderContext};
    use crate::validation::{validation_factory, PassThroughValidation};
    use crate::widgets::FieldInfo;

    #[derive(Debug)]
    struct Named(&'static str);

    impl Widget for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn render(
            &self,
            _ctx: &RenderContext,
            _info: &FieldInfo,
            _validation: Option<&dyn FormValidation>,
        ) -> FormxResult<Box<dyn Component>> {
            Ok(Box::new(Html::new(self.0)))
        }
    }

    fn empty() -> FormConfig {
        FormConfig::new(validation_factory::<PassThroughValidation>())
    }

    #[test]
    fn test_register_and_lookup() {
        let mut config = empty();
        config.register_widget(Arc::new(Named("stars"))).unwrap();
        assert_eq!(config.widget("stars").unwrap().name(), "stars");
        assert!(config.has_widget("stars"));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut config = empty();
        config.register_widget(Arc::new(Named("stars"))).unwrap();
        let err = config.register_widget(Arc::new(Named("stars"))).unwrap_err();
        assert!(matches!(err, FormxError::DuplicateWidget(ref n) if n == "stars"));
    }

    #[test]
    fn test_unknown_widget() {
        let err = empty().widget("nope").unwrap_err();
        assert_eq!(err.to_string(), "widget nope not found");
    }

    #[test]
    fn test_register_widgets_stops_at_first_failure() {
        let mut config = empty();
        let widgets: Vec<Arc<dyn Widget>> = vec![
            Arc::new(Named("a")),
            Arc::new(Named("b")),
            Arc::new(Named("a")),
            Arc::new(Named("c")),
        ];
        let err = config.register_widgets(widgets).unwrap_err();
        assert!(matches!(err, FormxError::WidgetRegistration { ref name, .. } if name == "a"));
        assert_eq!(config.widget_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_defaults_collide_with_builtin_names() {
        let mut config = FormConfig::with_default_widgets(validation_factory::<PassThroughValidation>());
        assert!(config.register_widget(Arc::new(Named("text"))).is_err());
        assert!(config.error_widget().is_ok());
    }

    #[test]
    fn test_error_widget_missing() {
        let err = empty().error_widget().unwrap_err();
        assert!(matches!(err, FormxError::ErrorWidgetMissing));
    }

    #[test]
    fn test_from_settings_respects_flag() {
        let factory = validation_factory::<PassThroughValidation>();
        let mut settings = Settings::default();
        assert!(FormConfig::from_settings(&settings, Arc::clone(&factory)).has_widget("checkbox"));

        settings.forms.register_default_widgets = false;
        let config = FormConfig::from_settings(&settings, factory);
        assert!(config.widget_names().is_empty());
        assert!(config.error_widget().is_err());
    }

    #[test]
    fn test_new_validation_is_fresh() {
        let config = empty();
        let mut first = config.new_validation();
        first.set_form_error("boom");
        assert!(!config.new_validation().has_errors());
    }

    // All global-slot assertions live in one test; the slot is shared by
    // every test in this binary.
    #[test]
    fn test_global_config_lifecycle() {
        reset_global_config();
        assert!(matches!(global_config(), Err(FormxError::NotInitialized)));
        assert!(matches!(get_widget("text"), Err(FormxError::NotInitialized)));

        init_global_config(FormConfig::with_default_widgets(validation_factory::<
            PassThroughValidation,
        >()));
        assert_eq!(get_widget("checkbox").unwrap().name(), "checkbox");
        assert!(matches!(get_widget("nope"), Err(FormxError::UnknownWidget(_))));

        let mut replacement = empty();
        replacement.register_widget(Arc::new(Named("only"))).unwrap();
        init_global_config(replacement);
        assert!(get_widget("only").is_ok());
        assert!(get_widget("checkbox").is_err());

        reset_global_config();
        assert!(global_config().is_err());
    }
}
