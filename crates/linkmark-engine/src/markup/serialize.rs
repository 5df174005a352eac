use std::fmt::Write as _;

use crate::document::{InlineElement, InlineNode};

use super::kinds::Tag;

/// Serializes an element to markup that [`super::parse_markup`] re-ingests
/// with identical tag, attributes and content.
pub fn serialize_element(el: &InlineElement) -> String {
    let mut out = String::new();
    write_element(&mut out, el);
    out
}

/// Serializes a node sequence, escaping text so it cannot be mistaken for markup.
pub fn serialize_nodes(nodes: &[InlineNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

/// Escapes plain text for embedding in a markup stream.
pub fn escape_text(text: &str) -> std::borrow::Cow<'_, str> {
    html_escape::encode_text(text)
}

fn write_node(out: &mut String, node: &InlineNode) {
    match node {
        InlineNode::Text(run) => out.push_str(&escape_text(&run.text())),
        InlineNode::Element(el) => write_element(out, el),
    }
}

fn write_element(out: &mut String, el: &InlineElement) {
    out.push(Tag::OPEN as char);
    out.push_str(&el.tag);
    for (name, value) in el.attributes() {
        let _ = write!(
            out,
            " {name}{}{}{}{}",
            Tag::ASSIGN as char,
            Tag::QUOTE as char,
            html_escape::encode_double_quoted_attribute(value),
            Tag::QUOTE as char
        );
    }
    out.push(Tag::CLOSE as char);
    for child in &el.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push(Tag::CLOSE as char);
}
