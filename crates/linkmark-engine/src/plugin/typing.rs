use crate::{
    element::LinkTarget,
    markdown::{MarkdownPattern, find_trailing_link},
};

use super::{EditorContext, KeyEvent, PluginError, toggle::InlineToggle};

/// Inserted after a link converted while typing so the next typed character
/// does not merge into it.
pub const NBSP: &str = "\u{A0}";

/// Converts markdown link syntax ending at the caret into a link.
///
/// Runs on the markdown trigger key only. On a match the key's default
/// action is prevented, the syntax is split out of its text node and
/// removed, a `_blank` link with the captured url and text is inserted at
/// the caret, and a non-breaking space follows it. Returns whether the
/// event was handled.
///
/// The converted link's text never contains the syntax again, so the same
/// span is never reprocessed.
pub fn trigger_markdown(
    ctx: &mut EditorContext<'_>,
    pattern: &MarkdownPattern,
    toggle: &InlineToggle,
    event: &mut KeyEvent,
) -> Result<bool, PluginError> {
    if !event.is_markdown_trigger() || event.is_default_prevented() {
        return Ok(false);
    }
    let Some((node, caret)) = ctx.host.text_at_caret() else {
        return Ok(false);
    };
    let Some(text) = ctx.host.node_text(node) else {
        return Ok(false);
    };
    let Some(before) = text.get(..caret) else {
        return Ok(false);
    };
    let Some(m) = find_trailing_link(before, pattern) else {
        return Ok(false);
    };

    let label = if m.text.is_empty() { &m.url } else { &m.text };
    let link = toggle.build(&[LinkTarget::Blank.as_str(), &m.url])?;
    event.prevent_default();

    let syntax = ctx.host.split_text(node, caret - m.len)?;
    ctx.host.split_text(syntax, m.len)?;
    ctx.host.remove(syntax)?;
    log::debug!("converted typed markdown {:?} -> {}", m.full, m.url);

    toggle.place(ctx, link, label)?;
    ctx.host.insert_text(NBSP)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        document::{InlineDocument, InlineHost},
        element::{LINK_SCHEMA, LINK_TAG},
        plugin::Key,
        surface::SignalLog,
    };

    const LINK: InlineToggle = InlineToggle {
        tag: LINK_TAG,
        schema: LINK_SCHEMA,
    };

    fn type_space(doc: &mut InlineDocument) -> (bool, KeyEvent) {
        let mut log = SignalLog::default();
        let mut event = KeyEvent::new(Key::Space);
        let handled = trigger_markdown(
            &mut EditorContext::new(doc, &mut log),
            &MarkdownPattern::default(),
            &LINK,
            &mut event,
        )
        .unwrap();
        (handled, event)
    }

    #[test]
    fn converts_syntax_at_caret() {
        let mut doc = InlineDocument::from_markup("see [OpenAI](https://openai.com)");
        let (handled, event) = type_space(&mut doc);

        assert!(handled);
        assert!(event.is_default_prevented());
        assert_eq!(doc.text(), "see OpenAI\u{A0}");
        assert_eq!(
            doc.to_markup(),
            "see <a target=\"_blank\" href=\"https://openai.com\">OpenAI</a>\u{A0}"
        );
        assert_eq!(doc.range(), 12..12);
    }

    #[test]
    fn keeps_text_after_caret() {
        let mut doc = InlineDocument::from_markup("[A](u) tail");
        doc.set_range(6..6);
        let (handled, _) = type_space(&mut doc);

        assert!(handled);
        assert_eq!(doc.text(), "A\u{A0} tail");
    }

    #[test]
    fn syntax_not_at_caret_is_ignored() {
        let mut doc = InlineDocument::from_markup("[A](u) tail");
        let (handled, event) = type_space(&mut doc);

        assert!(!handled);
        assert!(!event.is_default_prevented());
        assert_eq!(doc.text(), "[A](u) tail");
    }

    #[test]
    fn image_syntax_is_ignored() {
        let mut doc = InlineDocument::from_markup("![A](u)");
        let (handled, _) = type_space(&mut doc);

        assert!(!handled);
        assert_eq!(doc.text(), "![A](u)");
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut doc = InlineDocument::from_markup("[A](u)");
        let mut log = SignalLog::default();
        let mut event = KeyEvent::new(Key::Char('x'));

        let handled = trigger_markdown(
            &mut EditorContext::new(&mut doc, &mut log),
            &MarkdownPattern::default(),
            &LINK,
            &mut event,
        )
        .unwrap();

        assert!(!handled);
        assert_eq!(doc.text(), "[A](u)");
    }

    #[test]
    fn link_next_to_existing_link_does_not_unwrap_it() {
        let mut doc = InlineDocument::from_markup(r#"<a href="x">X</a>[B](u)"#);
        let (handled, _) = type_space(&mut doc);

        assert!(handled);
        assert_eq!(doc.elements().len(), 2);
        assert_eq!(doc.text(), "XB\u{A0}");
    }

    #[test]
    fn converted_link_is_not_reconverted() {
        let mut doc = InlineDocument::from_markup("[A](u)");
        assert!(type_space(&mut doc).0);
        assert!(!type_space(&mut doc).0);
        assert_eq!(doc.elements().len(), 1);
    }
}
