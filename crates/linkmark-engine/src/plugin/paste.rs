use crate::{
    document::{DocumentError, InlineHost, NodeId},
    markdown::{MarkdownPattern, fragments_to_markup, has_links, split_fragments},
};

/// Converts every markdown link in a pasted text node.
///
/// The node's text is split into fragments, serialized to markup and handed
/// back to the host, which re-parses it into live nodes in one step. A node
/// without convertible links is left untouched. Returns whether the node
/// was replaced.
pub fn paste_markdown(
    host: &mut dyn InlineHost,
    node: NodeId,
    pattern: &MarkdownPattern,
) -> Result<bool, DocumentError> {
    let text = host.node_text(node).ok_or(DocumentError::UnknownNode(node))?;
    let fragments = split_fragments(&text, pattern);
    if !has_links(&fragments) {
        return Ok(false);
    }
    log::debug!("pasted text {node} holds {} fragments", fragments.len());
    host.set_markup(node, &fragments_to_markup(&fragments))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::InlineDocument;

    fn paste(markup: &str) -> (bool, InlineDocument) {
        let mut doc = InlineDocument::from_markup(markup);
        let (node, _) = doc.text_at_caret().unwrap();
        let changed = paste_markdown(&mut doc, node, &MarkdownPattern::default()).unwrap();
        (changed, doc)
    }

    #[test]
    fn converts_links_and_keeps_images() {
        let (changed, doc) = paste("[A](u1) mid ![B](u2) end");

        assert!(changed);
        assert_eq!(doc.text(), "A mid ![B](u2) end");
        assert_eq!(
            doc.to_markup(),
            r#"<a target="_blank" href="u1">A</a> mid ![B](u2) end"#
        );
    }

    #[test]
    fn markup_characters_in_pasted_text_survive() {
        let (changed, doc) = paste("a &lt; b [A](u1)");

        assert!(changed);
        assert_eq!(doc.text(), "a < b A");
    }

    #[test]
    fn text_without_links_is_untouched() {
        let (changed, doc) = paste("nothing ![here](x)");

        assert!(!changed);
        assert_eq!(doc.nodes().count(), 1);
    }

    #[test]
    fn unknown_node_is_an_error() {
        let mut doc = InlineDocument::from_markup("[A](u1)");
        assert_eq!(
            paste_markdown(&mut doc, NodeId(99), &MarkdownPattern::default()),
            Err(DocumentError::UnknownNode(NodeId(99)))
        );
    }
}
