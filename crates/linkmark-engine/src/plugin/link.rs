use crate::{
    document::{InlineHost, NodeId},
    element::{AttributeSchema, LINK_SCHEMA, LINK_TAG},
    markdown::{MarkdownPattern, PatternError},
};

use super::{
    EditorContext, EventOutcome, Hotkey, InlinePlugin, LinkOptions, PluginError, PluginEvent,
    paste::paste_markdown,
    toggle::{InlineToggle, ToggleOutcome},
    typing::trigger_markdown,
};

/// The link element plugin: `<a target href>` with `[text](url)` markdown.
#[derive(Debug, Clone)]
pub struct LinkPlugin {
    toggle: InlineToggle,
    markdown: Option<MarkdownPattern>,
    hotkey: Hotkey,
}

impl LinkPlugin {
    pub const NAME: &'static str = "link";

    pub fn new(options: &LinkOptions) -> Result<Self, PatternError> {
        Ok(Self {
            toggle: InlineToggle {
                tag: LINK_TAG,
                schema: LINK_SCHEMA,
            },
            markdown: options.pattern()?,
            hotkey: options.hotkey(),
        })
    }

    /// Link elements missing a required attribute. They stay in the document
    /// but are never treated as links.
    pub fn malformed_links(&self, host: &dyn InlineHost) -> Vec<NodeId> {
        host.elements()
            .into_iter()
            .filter(|id| {
                host.element(*id)
                    .is_some_and(|el| el.tag == self.toggle.tag && !self.toggle.is_self(el))
            })
            .collect()
    }
}

impl Default for LinkPlugin {
    fn default() -> Self {
        let options = LinkOptions::default();
        Self {
            toggle: InlineToggle {
                tag: LINK_TAG,
                schema: LINK_SCHEMA,
            },
            markdown: Some(MarkdownPattern::default()),
            hotkey: options.hotkey(),
        }
    }
}

impl InlinePlugin for LinkPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn tag(&self) -> &'static str {
        self.toggle.tag
    }

    fn schema(&self) -> &AttributeSchema {
        &self.toggle.schema
    }

    fn markdown(&self) -> Option<&MarkdownPattern> {
        self.markdown.as_ref()
    }

    fn hotkey(&self) -> &Hotkey {
        &self.hotkey
    }

    fn on_event(
        &self,
        ctx: &mut EditorContext<'_>,
        event: PluginEvent<'_>,
    ) -> Result<EventOutcome, PluginError> {
        match event {
            PluginEvent::Keystroke(key) => match &self.markdown {
                Some(pattern) => Ok(trigger_markdown(ctx, pattern, &self.toggle, key)?.into()),
                None => Ok(EventOutcome::Ignored),
            },
            PluginEvent::Paste(node) => match &self.markdown {
                Some(pattern) => Ok(paste_markdown(&mut *ctx.host, node, pattern)?.into()),
                None => Ok(EventOutcome::Ignored),
            },
            PluginEvent::SelectionChanged => Ok(self.query(ctx).into()),
            PluginEvent::DocumentParsed => {
                for id in self.malformed_links(&*ctx.host) {
                    log::warn!("link {id} has no href and will not be treated as a link");
                }
                Ok(EventOutcome::Ignored)
            }
        }
    }

    fn execute(
        &self,
        ctx: &mut EditorContext<'_>,
        args: &[&str],
    ) -> Result<ToggleOutcome, PluginError> {
        self.toggle.execute(ctx, args)
    }

    fn update(
        &self,
        ctx: &mut EditorContext<'_>,
        id: NodeId,
        args: &[&str],
    ) -> Result<(), PluginError> {
        self.toggle.update(ctx, id, args)
    }

    fn query(&self, ctx: &mut EditorContext<'_>) -> bool {
        self.toggle.query(ctx)
    }
}
