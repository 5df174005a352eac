use std::borrow::Cow;

use crate::document::{InlineElement, InlineNode};

use super::{cursor::Cursor, kinds::Tag};

/// Parses mixed text and inline element markup into [`InlineNode`]s.
///
/// Anything that is not a well-formed, closed element stays text, so the
/// parse never fails: `a < b` and an unclosed `<a href="x">` are both text.
/// Entities are decoded in text and attribute values.
pub fn parse_markup(s: &str) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s);
    let (nodes, _) = parse_nodes(&mut cur, None);
    nodes
}

/// Parses nodes until EOF or until the closing tag for `closing` is reached.
///
/// Returns the nodes and whether the closing tag was found (always true at
/// top level). The closing tag itself is left unconsumed.
fn parse_nodes(cur: &mut Cursor<'_>, closing: Option<&str>) -> (Vec<InlineNode>, bool) {
    let mut out = vec![];
    let mut text_start = cur.i;

    while !cur.eof() {
        if let Some(tag) = closing
            && at_close_tag(cur, tag)
        {
            flush_text(&mut out, cur.since(text_start));
            return (out, true);
        }
        let before = cur.i;
        if let Some(el) = try_parse_element(cur) {
            flush_text(&mut out, &cur.s[text_start..before]);
            out.push(InlineNode::Element(el));
            text_start = cur.i;
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, cur.since(text_start));
    (out, closing.is_none())
}

fn flush_text(out: &mut Vec<InlineNode>, raw: &str) {
    if !raw.is_empty() {
        out.push(InlineNode::text(&decode(raw)));
    }
}

fn decode(raw: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(raw)
}

fn at_close_tag(cur: &Cursor<'_>, tag: &str) -> bool {
    if !cur.starts_with(Tag::END_OPEN) {
        return false;
    }
    let mut probe = cur.clone();
    probe.bump_n(Tag::END_OPEN.len());
    probe.starts_with(tag.as_bytes()) && {
        probe.bump_n(tag.len());
        probe.peek() == Some(Tag::CLOSE)
    }
}

/// Attempts to parse an element starting at the current position.
///
/// On failure the cursor is restored and `None` returned.
fn try_parse_element(cur: &mut Cursor<'_>) -> Option<InlineElement> {
    if cur.peek() != Some(Tag::OPEN) || cur.starts_with(Tag::END_OPEN) {
        return None;
    }
    let saved = cur.clone();
    let parsed = parse_element(cur);
    if parsed.is_none() {
        *cur = saved;
    }
    parsed
}

fn parse_element(cur: &mut Cursor<'_>) -> Option<InlineElement> {
    cur.bump(); // <
    if !cur.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let tag = cur.take_while(Tag::is_name_byte);
    let mut el = InlineElement::new(tag);

    loop {
        let spaced = !cur.take_while(|b| b.is_ascii_whitespace()).is_empty();
        match cur.peek()? {
            Tag::CLOSE => {
                cur.bump();
                break;
            }
            _ if spaced => {
                let (name, value) = parse_attribute(cur)?;
                el.set_attr(name, &decode(value));
            }
            _ => return None,
        }
    }

    let (children, closed) = parse_nodes(cur, Some(tag));
    if !closed {
        return None;
    }
    cur.bump_n(Tag::END_OPEN.len() + tag.len() + 1);
    el.children = children;
    Some(el)
}

/// Parses `name="value"`, returning the raw (still encoded) value.
fn parse_attribute<'a>(cur: &mut Cursor<'a>) -> Option<(&'a str, &'a str)> {
    let name = cur.take_while(Tag::is_attribute_byte);
    if name.is_empty() || cur.bump()? != Tag::ASSIGN || cur.bump()? != Tag::QUOTE {
        return None;
    }
    let value = cur.take_while(|b| b != Tag::QUOTE);
    if cur.bump()? != Tag::QUOTE {
        return None;
    }
    Some((name, value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn link(href: &str, text: &str) -> InlineNode {
        let mut el = InlineElement::new("a");
        el.set_attr("target", "_blank");
        el.set_attr("href", href);
        InlineNode::Element(el.with_text(text))
    }

    #[test]
    fn parse_plain_text() {
        assert_eq!(parse_markup("hello world"), vec![InlineNode::text("hello world")]);
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse_markup("").is_empty());
    }

    #[test]
    fn parse_link_between_text() {
        let nodes = parse_markup(r#"see <a target="_blank" href="u1">A</a> end"#);
        assert_eq!(
            nodes,
            vec![
                InlineNode::text("see "),
                link("u1", "A"),
                InlineNode::text(" end"),
            ]
        );
    }

    #[test]
    fn entities_are_decoded() {
        let nodes = parse_markup(r#"a &lt; b <a target="_blank" href="x?a=1&amp;b=&quot;2&quot;">&amp;</a>"#);
        assert_eq!(
            nodes,
            vec![InlineNode::text("a < b "), link("x?a=1&b=\"2\"", "&")]
        );
    }

    #[test]
    fn nested_elements() {
        let nodes = parse_markup(r#"<a href="u"><strong>bold</strong> tail</a>"#);
        assert_eq!(nodes.len(), 1);
        let el = nodes[0].as_element().unwrap();
        assert_eq!(el.text(), "bold tail");
        assert_eq!(el.children[0].as_element().unwrap().tag, "strong");
    }

    #[test]
    fn unclosed_element_becomes_text() {
        let raw = r#"<a href="u">never closed"#;
        assert_eq!(parse_markup(raw), vec![InlineNode::text(raw)]);
    }

    #[test]
    fn stray_angle_brackets_are_text() {
        assert_eq!(parse_markup("1 < 2 > 0 </a>"), vec![InlineNode::text("1 < 2 > 0 </a>")]);
    }

    #[test]
    fn malformed_attribute_becomes_text() {
        let raw = "<a href=u>x</a>";
        assert_eq!(parse_markup(raw), vec![InlineNode::text(raw)]);
    }

    #[test]
    fn multibyte_text_around_elements() {
        let nodes = parse_markup("é<b>ü</b>\u{A0}");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2], InlineNode::text("\u{A0}"));
    }
}
