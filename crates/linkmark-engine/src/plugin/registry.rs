use crate::document::NodeId;

use super::{
    EditorContext, EventOutcome, InlinePlugin, KeyEvent, PluginError, PluginEvent, ToggleOutcome,
};

/// The plugins a host has enabled, in registration order.
///
/// Keystrokes and pastes go to each plugin in turn until one handles them.
/// Selection changes and document-parsed notifications reach every plugin.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn InlinePlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Box<dyn InlinePlugin>) -> Result<(), PluginError> {
        if self.get(plugin.name()).is_some() {
            return Err(PluginError::DuplicatePlugin(plugin.name().to_string()));
        }
        log::debug!("registered plugin `{}` for <{}>", plugin.name(), plugin.tag());
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn InlinePlugin> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| &**p)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn keystroke(
        &self,
        ctx: &mut EditorContext<'_>,
        event: &mut KeyEvent,
    ) -> Result<bool, PluginError> {
        for plugin in &self.plugins {
            if plugin
                .on_event(ctx, PluginEvent::Keystroke(&mut *event))?
                .is_handled()
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn paste(&self, ctx: &mut EditorContext<'_>, node: NodeId) -> Result<bool, PluginError> {
        for plugin in &self.plugins {
            if plugin.on_event(ctx, PluginEvent::Paste(node))?.is_handled() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn selection_changed(&self, ctx: &mut EditorContext<'_>) -> Result<(), PluginError> {
        self.broadcast(ctx, || PluginEvent::SelectionChanged)
    }

    pub fn document_parsed(&self, ctx: &mut EditorContext<'_>) -> Result<(), PluginError> {
        self.broadcast(ctx, || PluginEvent::DocumentParsed)
    }

    fn broadcast(
        &self,
        ctx: &mut EditorContext<'_>,
        event: impl Fn() -> PluginEvent<'static>,
    ) -> Result<(), PluginError> {
        for plugin in &self.plugins {
            let _: EventOutcome = plugin.on_event(ctx, event())?;
        }
        Ok(())
    }

    pub fn execute(
        &self,
        name: &str,
        ctx: &mut EditorContext<'_>,
        args: &[&str],
    ) -> Result<ToggleOutcome, PluginError> {
        self.plugin(name)?.execute(ctx, args)
    }

    /// Runs the named plugin's hotkey binding.
    pub fn hotkey(
        &self,
        name: &str,
        ctx: &mut EditorContext<'_>,
    ) -> Result<ToggleOutcome, PluginError> {
        let plugin = self.plugin(name)?;
        let args: Vec<&str> = plugin.hotkey().args.iter().map(String::as_str).collect();
        plugin.execute(ctx, &args)
    }

    pub fn update(
        &self,
        name: &str,
        ctx: &mut EditorContext<'_>,
        id: NodeId,
        args: &[&str],
    ) -> Result<(), PluginError> {
        self.plugin(name)?.update(ctx, id, args)
    }

    pub fn query(&self, name: &str, ctx: &mut EditorContext<'_>) -> Result<bool, PluginError> {
        Ok(self.plugin(name)?.query(ctx))
    }

    fn plugin(&self, name: &str) -> Result<&dyn InlinePlugin, PluginError> {
        self.get(name)
            .ok_or_else(|| PluginError::UnknownPlugin(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        document::{InlineDocument, InlineHost},
        plugin::{Key, LinkPlugin},
        surface::{NoSurface, SignalLog, SurfaceSignal},
    };

    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register(Box::new(LinkPlugin::default())).unwrap();
        registry
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut registry = registry();
        let err = registry
            .register(Box::new(LinkPlugin::default()))
            .unwrap_err();
        assert!(matches!(err, PluginError::DuplicatePlugin(name) if name == "link"));
        assert_eq!(registry.names(), vec!["link"]);
    }

    #[test]
    fn unknown_plugin() {
        let mut doc = InlineDocument::new();
        let err = registry()
            .execute("bold", &mut EditorContext::new(&mut doc, &mut NoSurface), &[])
            .unwrap_err();
        assert!(matches!(err, PluginError::UnknownPlugin(name) if name == "bold"));
    }

    #[test]
    fn keystroke_is_dispatched() {
        let mut doc = InlineDocument::from_markup("[A](u)");
        let mut event = KeyEvent::new(Key::Space);

        let handled = registry()
            .keystroke(&mut EditorContext::new(&mut doc, &mut NoSurface), &mut event)
            .unwrap();

        assert!(handled);
        assert!(event.is_default_prevented());
        assert_eq!(doc.text(), "A\u{A0}");
    }

    #[test]
    fn unhandled_keystroke() {
        let mut doc = InlineDocument::from_markup("plain");
        let mut event = KeyEvent::new(Key::Char('x'));

        let handled = registry()
            .keystroke(&mut EditorContext::new(&mut doc, &mut NoSurface), &mut event)
            .unwrap();

        assert!(!handled);
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn hotkey_drafts_link_for_the_surface_to_complete() {
        let mut doc = InlineDocument::from_markup("hello");
        doc.set_range(0..5);
        let registry = registry();
        let mut log = SignalLog::default();

        let outcome = registry
            .hotkey("link", &mut EditorContext::new(&mut doc, &mut log))
            .unwrap();
        let ToggleOutcome::Drafted(id) = outcome else {
            panic!("expected Drafted, got {outcome:?}");
        };
        assert_eq!(log.last(), Some(SurfaceSignal::Show(id)));

        registry
            .update(
                "link",
                &mut EditorContext::new(&mut doc, &mut log),
                id,
                &["", "https://example.com"],
            )
            .unwrap();
        assert_eq!(
            doc.to_markup(),
            r#"<a target="_blank" href="https://example.com">hello</a>"#
        );

        // The same chord now removes it again.
        let outcome = registry
            .hotkey("link", &mut EditorContext::new(&mut doc, &mut log))
            .unwrap();
        assert_eq!(outcome, ToggleOutcome::Unwrapped(id));
        assert_eq!(doc.to_markup(), "hello");
    }

    #[test]
    fn selection_changed_queries_every_plugin() {
        let mut doc = InlineDocument::from_markup("plain");
        let mut log = SignalLog::default();

        registry()
            .selection_changed(&mut EditorContext::new(&mut doc, &mut log))
            .unwrap();

        assert_eq!(log.signals, vec![SurfaceSignal::Hide(None)]);
    }

    #[test]
    fn execute_and_query_by_name() {
        let mut doc = InlineDocument::from_markup("hello");
        doc.set_range(0..5);
        let registry = registry();
        let mut log = SignalLog::default();

        let outcome = registry
            .execute(
                "link",
                &mut EditorContext::new(&mut doc, &mut log),
                &["_self", "https://example.com"],
            )
            .unwrap();
        assert!(matches!(outcome, ToggleOutcome::Wrapped(_)));

        let found = registry
            .query("link", &mut EditorContext::new(&mut doc, &mut log))
            .unwrap();
        assert!(found);
        assert_eq!(doc.range(), 0..5);
    }
}
