//! Renderable output units.
//!
//! A [`Component`] writes markup to a byte sink under a [`RenderContext`].
//! Widgets produce components; the introspector collects them into a
//! [`ComponentList`] which renders its children in order.

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use formx_core::{FormxError, FormxResult};

/// Request-scoped context threaded through rendering.
///
/// Clones share the cancellation flag, so a handler can keep one copy and
/// cancel a render running elsewhere.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    cancelled: Arc<AtomicBool>,
    request_id: Option<String>,
}

impl RenderContext {
    /// Creates a fresh, uncancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a request identifier, recorded in log events.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Returns the request identifier, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Signals cancellation to every clone of this context.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns [`FormxError::Cancelled`] if the context was cancelled.
    pub fn check(&self) -> FormxResult<()> {
        if self.is_cancelled() {
            return Err(FormxError::Cancelled);
        }
        Ok(())
    }
}

/// Anything that can write itself to an output sink.
pub trait Component: Send + Sync {
    /// Writes this component to `w`.
    fn render(&self, ctx: &RenderContext, w: &mut dyn Write) -> FormxResult<()>;
}

/// A literal chunk of markup, written as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Html(String);

impl Html {
    /// Wraps already-escaped markup.
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Returns the markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the component and returns the markup.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Component for Html {
    fn render(&self, _ctx: &RenderContext, w: &mut dyn Write) -> FormxResult<()> {
        w.write_all(self.0.as_bytes())?;
        Ok(())
    }
}

/// An ordered sequence of components.
///
/// Rendering writes each child in order and stops at the first failure.
/// The context is checked before every child.
#[derive(Default)]
pub struct ComponentList {
    components: Vec<Box<dyn Component>>,
}

impl ComponentList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component.
    pub fn push(&mut self, component: Box<dyn Component>) {
        self.components.push(component);
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterates over the components in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Component> {
        self.components.iter().map(|c| c.as_ref() as &dyn Component)
    }
}

impl Component for ComponentList {
    fn render(&self, ctx: &RenderContext, w: &mut dyn Write) -> FormxResult<()> {
        for component in &self.components {
            ctx.check()?;
            component.render(ctx, w)?;
        }
        Ok(())
    }
}

impl From<Vec<Box<dyn Component>>> for ComponentList {
    fn from(components: Vec<Box<dyn Component>>) -> Self {
        Self { components }
    }
}

impl fmt::Debug for ComponentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentList")
            .field("len", &self.components.len())
            .finish()
    }
}

/// Renders a component into a `String`.
pub fn render_to_string(component: &dyn Component, ctx: &RenderContext) -> FormxResult<String> {
    let mut buf = Vec::new();
    component.render(ctx, &mut buf)?;
    String::from_utf8(buf).map_err(|e| FormxError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Component for Failing {
        fn render(&self, _ctx: &RenderContext, _w: &mut dyn Write) -> FormxResult<()> {
            Err(FormxError::WidgetRender {
                widget: "failing".into(),
                field: "x".into(),
                message: "boom".into(),
            })
        }
    }

    struct CancelOnRender;

    impl Component for CancelOnRender {
        fn render(&self, ctx: &RenderContext, w: &mut dyn Write) -> FormxResult<()> {
            w.write_all(b"[c]")?;
            ctx.cancel();
            Ok(())
        }
    }

    #[test]
    fn test_list_renders_in_order() {
        let components: Vec<Box<dyn Component>> =
            vec![Box::new(Html::new("<a>")), Box::new(Html::new("<b>"))];
        let list = ComponentList::from(components);
        let out = render_to_string(&list, &RenderContext::new()).unwrap();
        assert_eq!(out, "<a><b>");
    }

    #[test]
    fn test_list_stops_at_first_error() {
        let mut list = ComponentList::new();
        list.push(Box::new(Html::new("one")));
        list.push(Box::new(Failing));
        list.push(Box::new(Html::new("three")));

        let mut buf = Vec::new();
        let err = list.render(&RenderContext::new(), &mut buf).unwrap_err();
        assert!(matches!(err, FormxError::WidgetRender { .. }));
        assert_eq!(buf, b"one");
    }

    #[test]
    fn test_cancelled_context_stops_rendering() {
        let mut list = ComponentList::new();
        list.push(Box::new(CancelOnRender));
        list.push(Box::new(Html::new("never")));

        let mut buf = Vec::new();
        let err = list.render(&RenderContext::new(), &mut buf).unwrap_err();
        assert!(matches!(err, FormxError::Cancelled));
        assert_eq!(buf, b"[c]");
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let ctx = RenderContext::new().with_request_id("req-1");
        let other = ctx.clone();
        other.cancel();
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.request_id(), Some("req-1"));
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        let list = ComponentList::new();
        assert!(list.is_empty());
        assert_eq!(render_to_string(&list, &RenderContext::new()).unwrap(), "");
    }
}
