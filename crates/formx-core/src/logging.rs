//! Logging integration for formx-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`] and for creating spans around form rendering and binding.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise structured JSON.
///
/// Installing a subscriber twice is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a span covering the rendering of one record's form inputs.
///
/// # Examples
///
/// ```
/// use formx_core::logging::render_span;
///
/// let span = render_span("SignupForm");
/// let _guard = span.enter();
/// tracing::debug!("rendering");
/// ```
pub fn render_span(record: &str) -> tracing::Span {
    tracing::debug_span!("formx.render", record = record)
}

/// Creates a span covering the binding of one submission into a record.
pub fn bind_span(record: &str) -> tracing::Span {
    tracing::debug_span!("formx.bind", record = record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        let mut settings = Settings {
            log_level: "formx=debug".to_string(),
            ..Settings::default()
        };
        setup_logging(&settings);
        settings.debug = true;
        settings.log_level = "not a [valid filter".to_string();
        setup_logging(&settings);
    }

    #[test]
    fn test_spans_can_be_entered() {
        let span = bind_span("Signup");
        let _guard = span.enter();
        let inner = render_span("Signup");
        let _inner_guard = inner.enter();
        tracing::debug!("inside nested spans");
    }
}
