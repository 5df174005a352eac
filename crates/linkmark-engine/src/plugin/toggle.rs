use std::ops::Range;

use crate::{
    document::{DocumentError, InlineElement, InlineHost, NodeId},
    element::AttributeSchema,
};

use super::{EditorContext, PluginError};

/// What a toggle did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The selection was wrapped in a new element.
    Wrapped(NodeId),
    /// A new element with literal text was inserted at the caret.
    Inserted(NodeId),
    /// The selection was wrapped in an element still missing attributes, and
    /// the editing surface was shown so they can be filled in.
    Drafted(NodeId),
    /// The element under the selection was removed, its content kept.
    Unwrapped(NodeId),
    /// Nothing changed (nothing selected to wrap, or nothing to unwrap).
    Unchanged,
}

/// Wrap/unwrap logic for one inline element type.
///
/// Holds no state between calls; every decision is made from the host's
/// current selection.
#[derive(Debug, Clone, Copy)]
pub struct InlineToggle {
    pub tag: &'static str,
    pub schema: AttributeSchema,
}

impl InlineToggle {
    /// True for well-formed elements of this type. Malformed ones are skipped.
    pub fn is_self(&self, el: &InlineElement) -> bool {
        el.tag == self.tag && self.schema.matches(el)
    }

    fn find_self(&self, host: &dyn InlineHost, range: Range<usize>) -> Option<NodeId> {
        host.find_inlines(range)
            .into_iter()
            .find(|id| host.element(*id).is_some_and(|el| self.is_self(el)))
    }

    /// Does the selection intersect an element of this type?
    ///
    /// Always hides the editing surface first; then, for a collapsed caret
    /// inside a (non-card) element, shows it anchored to that element.
    pub fn query(&self, ctx: &mut EditorContext<'_>) -> bool {
        let range = ctx.host.range();
        let found = self.find_self(&*ctx.host, range.clone());
        ctx.surface.hide(found);

        match found {
            Some(id) if !ctx.host.element(id).is_some_and(InlineElement::is_card) => {
                if range.is_empty() {
                    ctx.surface.show(id);
                }
                true
            }
            _ => false,
        }
    }

    pub fn query_state(&self, ctx: &mut EditorContext<'_>) -> bool {
        self.query(ctx)
    }

    /// Builds a new element from positional `args`, validating them first.
    pub fn build(&self, args: &[&str]) -> Result<InlineElement, PluginError> {
        let mut node = InlineElement::new(self.tag);
        self.schema.set_attributes(&mut node, args)?;
        Ok(node)
    }

    /// Toggles the element on the current selection.
    ///
    /// `args` are the schema's attributes in order, optionally followed by
    /// literal text. With no element under the selection, a new one is
    /// inserted (when text is given) or wraps the selection; otherwise the
    /// existing one is unwrapped. When `args` stops short of the schema the
    /// selection is wrapped in a draft instead, see [`InlineToggle::draft`].
    /// A validation error aborts before the document is touched.
    pub fn execute(
        &self,
        ctx: &mut EditorContext<'_>,
        args: &[&str],
    ) -> Result<ToggleOutcome, PluginError> {
        if self.query_state(ctx) {
            return self.remove(ctx);
        }
        if self.schema.is_partial(args) {
            return self.draft(ctx, args);
        }
        let node = self.build(args)?;
        let text = args.get(self.schema.attributes.len()).copied().unwrap_or("");
        self.place(ctx, node, text)
    }

    /// The "add" half of [`InlineToggle::execute`] for an already validated node.
    pub fn place(
        &self,
        ctx: &mut EditorContext<'_>,
        mut node: InlineElement,
        text: &str,
    ) -> Result<ToggleOutcome, PluginError> {
        let outcome = if !text.is_empty() {
            node.set_text(text);
            ToggleOutcome::Inserted(ctx.host.insert(node)?)
        } else {
            let range = ctx.host.range();
            if range.is_empty() {
                log::debug!("nothing selected to wrap in <{}>", self.tag);
                return Ok(ToggleOutcome::Unchanged);
            }
            ToggleOutcome::Wrapped(ctx.host.wrap(range, node)?)
        };
        log::debug!("toggle <{}> on: {outcome:?}", self.tag);

        let range = ctx.host.range();
        if !range.is_empty()
            && let Some(id) = self.find_self(&*ctx.host, range)
        {
            ctx.surface.show(id);
        }
        Ok(outcome)
    }

    /// Wraps the selection in an element carrying only the attributes `args`
    /// gives, and shows the editing surface on it. The element stays
    /// malformed until [`InlineToggle::update`] completes it.
    pub fn draft(
        &self,
        ctx: &mut EditorContext<'_>,
        args: &[&str],
    ) -> Result<ToggleOutcome, PluginError> {
        let range = ctx.host.range();
        if range.is_empty() {
            log::debug!("nothing selected to draft <{}>", self.tag);
            return Ok(ToggleOutcome::Unchanged);
        }
        let mut node = InlineElement::new(self.tag);
        self.schema.set_given_attributes(&mut node, args)?;
        let id = ctx.host.wrap(range, node)?;
        log::debug!("toggle <{}> on: drafted {id}", self.tag);
        ctx.surface.show(id);
        Ok(ToggleOutcome::Drafted(id))
    }

    /// Applies `args` to an existing element of this type, all or nothing.
    pub fn update(
        &self,
        ctx: &mut EditorContext<'_>,
        id: NodeId,
        args: &[&str],
    ) -> Result<(), PluginError> {
        let element = ctx
            .host
            .element_mut(id)
            .filter(|el| el.tag == self.tag)
            .ok_or(DocumentError::NotElement(id))?;
        self.schema.set_attributes(element, args)?;
        log::debug!("updated <{}> {id}", self.tag);
        Ok(())
    }

    fn remove(&self, ctx: &mut EditorContext<'_>) -> Result<ToggleOutcome, PluginError> {
        let range = ctx.host.range();
        let Some(id) = self.find_self(&*ctx.host, range) else {
            return Ok(ToggleOutcome::Unchanged);
        };
        ctx.host.unwrap(id)?;
        log::debug!("toggle <{}> off: unwrapped {id}", self.tag);
        Ok(ToggleOutcome::Unwrapped(id))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        document::{CARD_ATTRIBUTE, InlineDocument},
        element::{LINK_SCHEMA, LINK_TAG, ValidationError},
        surface::{SignalLog, SurfaceSignal},
    };

    const LINK: InlineToggle = InlineToggle {
        tag: LINK_TAG,
        schema: LINK_SCHEMA,
    };

    #[test]
    fn query_collapsed_inside_link_shows_surface() {
        let mut doc = InlineDocument::from_markup(r#"ab<a href="u">cd</a>ef"#);
        doc.set_range(3..3);
        let mut log = SignalLog::default();

        assert!(LINK.query(&mut EditorContext::new(&mut doc, &mut log)));

        let id = doc.find_inlines(3..3)[0];
        assert_eq!(
            log.signals,
            vec![SurfaceSignal::Hide(Some(id)), SurfaceSignal::Show(id)]
        );
    }

    #[test]
    fn query_selection_over_link_hides_only() {
        let mut doc = InlineDocument::from_markup(r#"ab<a href="u">cd</a>ef"#);
        doc.set_range(1..5);
        let mut log = SignalLog::default();

        assert!(LINK.query(&mut EditorContext::new(&mut doc, &mut log)));
        assert!(matches!(log.signals[..], [SurfaceSignal::Hide(Some(_))]));
    }

    #[test]
    fn query_without_link_hides() {
        let mut doc = InlineDocument::from_markup("plain");
        let mut log = SignalLog::default();

        assert!(!LINK.query(&mut EditorContext::new(&mut doc, &mut log)));
        assert_eq!(log.signals, vec![SurfaceSignal::Hide(None)]);
    }

    #[test]
    fn malformed_link_is_not_a_link() {
        let mut doc = InlineDocument::from_markup("ab<a>cd</a>ef");
        doc.set_range(3..3);
        let mut log = SignalLog::default();

        assert!(!LINK.query(&mut EditorContext::new(&mut doc, &mut log)));
    }

    #[test]
    fn card_is_found_but_not_reported() {
        let markup = format!(r#"ab<a href="u" {CARD_ATTRIBUTE}="1">cd</a>"#);
        let mut doc = InlineDocument::from_markup(&markup);
        doc.set_range(3..3);
        let mut log = SignalLog::default();

        assert!(!LINK.query(&mut EditorContext::new(&mut doc, &mut log)));
        assert!(matches!(log.signals[..], [SurfaceSignal::Hide(Some(_))]));
    }

    #[test]
    fn execute_wraps_selection_and_shows_surface() {
        let mut doc = InlineDocument::from_markup("hello world");
        doc.set_range(0..5);
        let mut log = SignalLog::default();

        let outcome = LINK
            .execute(&mut EditorContext::new(&mut doc, &mut log), &["_blank", "u"])
            .unwrap();

        let ToggleOutcome::Wrapped(id) = outcome else {
            panic!("expected Wrapped, got {outcome:?}");
        };
        assert_eq!(
            doc.to_markup(),
            r#"<a target="_blank" href="u">hello</a> world"#
        );
        assert_eq!(log.last(), Some(SurfaceSignal::Show(id)));
    }

    #[test]
    fn execute_with_text_inserts_at_caret() {
        let mut doc = InlineDocument::from_markup("see ");
        let mut log = SignalLog::default();

        let outcome = LINK
            .execute(
                &mut EditorContext::new(&mut doc, &mut log),
                &["_top", "https://openai.com", "OpenAI"],
            )
            .unwrap();

        assert!(matches!(outcome, ToggleOutcome::Inserted(_)));
        assert_eq!(
            doc.to_markup(),
            r#"see <a target="_top" href="https://openai.com">OpenAI</a>"#
        );
        assert_eq!(doc.range(), 10..10);
        assert_eq!(log.signals, vec![SurfaceSignal::Hide(None)]);
    }

    #[test]
    fn execute_on_collapsed_caret_without_text_changes_nothing() {
        let mut doc = InlineDocument::from_markup("hello");
        let mut log = SignalLog::default();

        let outcome = LINK
            .execute(&mut EditorContext::new(&mut doc, &mut log), &["_blank", "u"])
            .unwrap();

        assert_eq!(outcome, ToggleOutcome::Unchanged);
        assert_eq!(doc.to_markup(), "hello");
    }

    #[test]
    fn execute_twice_restores_structure() {
        let mut doc = InlineDocument::from_markup("hello world");
        doc.set_range(3..8);
        let before: Vec<_> = doc.nodes().map(|(_, n)| n.clone()).collect();
        let mut log = SignalLog::default();

        let first = LINK
            .execute(&mut EditorContext::new(&mut doc, &mut log), &["", "u"])
            .unwrap();
        let second = LINK
            .execute(&mut EditorContext::new(&mut doc, &mut log), &["", "u"])
            .unwrap();

        let ToggleOutcome::Wrapped(id) = first else {
            panic!("expected Wrapped, got {first:?}");
        };
        assert_eq!(second, ToggleOutcome::Unwrapped(id));
        let after: Vec<_> = doc.nodes().map(|(_, n)| n.clone()).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn target_only_drafts_link_and_shows_surface() {
        let mut doc = InlineDocument::from_markup("hello world");
        doc.set_range(0..5);
        let mut log = SignalLog::default();

        let outcome = LINK
            .execute(&mut EditorContext::new(&mut doc, &mut log), &["_blank"])
            .unwrap();

        let ToggleOutcome::Drafted(id) = outcome else {
            panic!("expected Drafted, got {outcome:?}");
        };
        assert_eq!(doc.to_markup(), r#"<a target="_blank">hello</a> world"#);
        assert_eq!(log.last(), Some(SurfaceSignal::Show(id)));

        LINK.update(
            &mut EditorContext::new(&mut doc, &mut log),
            id,
            &["", "https://example.com"],
        )
        .unwrap();
        assert_eq!(
            doc.to_markup(),
            r#"<a target="_blank" href="https://example.com">hello</a> world"#
        );
        assert!(LINK.is_self(doc.element(id).unwrap()));
    }

    #[test]
    fn draft_needs_a_selection() {
        let mut doc = InlineDocument::from_markup("hello");
        let mut log = SignalLog::default();

        let outcome = LINK
            .execute(&mut EditorContext::new(&mut doc, &mut log), &["_blank"])
            .unwrap();

        assert_eq!(outcome, ToggleOutcome::Unchanged);
        assert_eq!(doc.to_markup(), "hello");
    }

    #[test]
    fn update_with_empty_href_keeps_element() {
        let mut doc = InlineDocument::from_markup(r#"<a href="u">A</a>"#);
        let id = doc.elements()[0];
        let mut log = SignalLog::default();

        let err = LINK
            .update(&mut EditorContext::new(&mut doc, &mut log), id, &["_top", ""])
            .unwrap_err();

        assert!(matches!(
            err,
            PluginError::Validation(ValidationError::Required { attribute: "href" })
        ));
        assert_eq!(doc.to_markup(), r#"<a href="u">A</a>"#);
    }

    #[test]
    fn validation_error_leaves_document_untouched() {
        let mut doc = InlineDocument::from_markup("hello");
        doc.set_range(0..5);
        let mut log = SignalLog::default();

        let err = LINK
            .execute(
                &mut EditorContext::new(&mut doc, &mut log),
                &["invalid-target", ""],
            )
            .unwrap_err();

        assert!(matches!(
            err,
            PluginError::Validation(ValidationError::Required { attribute: "href" })
        ));
        assert_eq!(doc.to_markup(), "hello");
        assert_eq!(doc.range(), 0..5);
    }
}
