use crate::{element::LinkElement, markup::escape_text};

use super::{MarkdownPattern, matcher::find_link_at};

/// A unit of splitter output: literal text or a recognized link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Link(LinkElement),
}

/// Splits `text` into plain text and converted links.
///
/// Single pass over the input with a byte cursor: each convertible match
/// moves the cursor past its end, so the loop terminates. Escaped matches
/// (image syntax) stay in the literal text between links. Adjacent text is
/// merged, so the output never holds two `Text` fragments in a row.
///
/// Concatenating each fragment's text (the link's display text for links)
/// reproduces `text` with every converted match replaced by its text.
pub fn split_fragments(text: &str, pattern: &MarkdownPattern) -> Vec<Fragment> {
    let mut out = FragmentBuilder::default();
    let mut cursor = 0;

    while let Some(m) = find_link_at(text, pattern, cursor) {
        out.push_text(&text[cursor..m.index]);
        log::debug!("converting markdown link {:?} -> {}", m.text, m.url);
        out.push(Fragment::Link(LinkElement::from_match(&m)));
        cursor = m.end();
    }

    out.push_text(&text[cursor..]);
    out.finish()
}

/// Returns true if any fragment is a converted link.
pub fn has_links(fragments: &[Fragment]) -> bool {
    fragments.iter().any(|f| matches!(f, Fragment::Link(_)))
}

/// Serializes fragments to a markup string: text escaped, links as elements.
pub fn fragments_to_markup(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(|f| match f {
            Fragment::Text(text) => escape_text(text).into_owned(),
            Fragment::Link(link) => link.to_markup(),
        })
        .collect()
}

#[derive(Default)]
struct FragmentBuilder {
    out: Vec<Fragment>,
}

impl FragmentBuilder {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.out.last_mut() {
            Some(Fragment::Text(prev)) => prev.push_str(text),
            _ => self.out.push(Fragment::Text(text.to_string())),
        }
    }

    fn push(&mut self, fragment: Fragment) {
        match fragment {
            Fragment::Text(text) => self.push_text(&text),
            link => self.out.push(link),
        }
    }

    fn finish(self) -> Vec<Fragment> {
        self.out
    }
}
