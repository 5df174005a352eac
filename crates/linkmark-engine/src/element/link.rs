use std::{fmt, str::FromStr};

use crate::{
    document::InlineElement,
    markdown::MarkdownMatch,
    markup::serialize_element,
};

use super::{AttributeSchema, ValidationError, VariableRule};

/// Tag name of link elements.
pub const LINK_TAG: &str = "a";

/// Values accepted for a link's `target` attribute.
pub const TARGET_DOMAIN: &[&str] = &["_blank", "_parent", "_top", "_self"];

/// `target` (optional, enumerated) then `href` (required, free-form).
pub const LINK_SCHEMA: AttributeSchema = AttributeSchema {
    attributes: &[
        ("target", VariableRule::OneOf(TARGET_DOMAIN)),
        ("href", VariableRule::Required),
    ],
};

/// Browsing context a link opens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkTarget {
    #[default]
    Blank,
    Parent,
    Top,
    SelfFrame,
}

impl LinkTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkTarget::Blank => "_blank",
            LinkTarget::Parent => "_parent",
            LinkTarget::Top => "_top",
            LinkTarget::SelfFrame => "_self",
        }
    }
}

impl FromStr for LinkTarget {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "_blank" => Ok(LinkTarget::Blank),
            "_parent" => Ok(LinkTarget::Parent),
            "_top" => Ok(LinkTarget::Top),
            "_self" => Ok(LinkTarget::SelfFrame),
            other => Err(ValidationError::OutOfDomain {
                attribute: "target",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link: display text plus `href` and optional `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub target: Option<LinkTarget>,
    pub href: String,
    pub text: String,
}

impl LinkElement {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target: None,
            href: href.into(),
            text: text.into(),
        }
    }

    pub fn with_target(mut self, target: LinkTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Builds the link a recognized markdown match converts into: opens in a
    /// new context, and falls back to the url when the display text is empty.
    pub fn from_match(m: &MarkdownMatch) -> Self {
        let text = if m.text.is_empty() { &m.url } else { &m.text };
        LinkElement::new(m.url.as_str(), text.as_str()).with_target(LinkTarget::Blank)
    }

    /// Reads a link back from a document element. Malformed links (wrong tag,
    /// missing `href`, unknown `target`) yield `None`.
    pub fn from_element(el: &InlineElement) -> Option<Self> {
        if el.tag != LINK_TAG || !LINK_SCHEMA.matches(el) {
            return None;
        }
        Some(Self {
            target: el.attr("target").and_then(|t| t.parse().ok()),
            href: el.attr("href")?.to_string(),
            text: el.text(),
        })
    }

    pub fn to_element(&self) -> InlineElement {
        let mut el = InlineElement::new(LINK_TAG);
        if let Some(target) = self.target {
            el.set_attr("target", target.as_str());
        }
        el.set_attr("href", &self.href);
        el.with_text(&self.text)
    }

    pub fn to_markup(&self) -> String {
        serialize_element(&self.to_element())
    }
}
