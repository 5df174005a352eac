use std::fmt;

use super::text_run::TextRun;

/// Attribute marking an element as an embedded card rather than plain inline content.
pub const CARD_ATTRIBUTE: &str = "data-card-key";

/// Stable identifier of a top-level inline node in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node participating in running text flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// A run of plain text.
    Text(TextRun),
    /// A tagged inline element such as a link.
    Element(InlineElement),
}

impl InlineNode {
    pub fn text(text: &str) -> Self {
        InlineNode::Text(TextRun::new(text))
    }

    /// Visible text content, with element markup stripped.
    pub fn text_content(&self) -> String {
        match self {
            InlineNode::Text(run) => run.text(),
            InlineNode::Element(el) => el.text(),
        }
    }

    /// Length of the visible text content in bytes.
    pub fn text_len(&self) -> usize {
        match self {
            InlineNode::Text(run) => run.len(),
            InlineNode::Element(el) => el.text_len(),
        }
    }

    pub fn as_element(&self) -> Option<&InlineElement> {
        match self {
            InlineNode::Element(el) => Some(el),
            InlineNode::Text(_) => None,
        }
    }
}

/// A tagged inline span with ordered attributes and child content.
///
/// Attributes keep insertion order so serializing and re-parsing an element
/// yields an identical attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineElement {
    pub tag: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<InlineNode>,
}

impl InlineElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`InlineElement::set_text`].
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, replacing any existing value in place.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Replaces all children with a single text run.
    pub fn set_text(&mut self, text: &str) {
        self.children = vec![InlineNode::text(text)];
    }

    pub fn text(&self) -> String {
        self.children.iter().map(InlineNode::text_content).collect()
    }

    pub fn text_len(&self) -> usize {
        self.children.iter().map(InlineNode::text_len).sum()
    }

    pub fn is_card(&self) -> bool {
        self.attr(CARD_ATTRIBUTE).is_some()
    }
}
