use regex::Regex;

use super::MarkdownPattern;

/// Marks image syntax: `![alt](src)` must never become a link.
pub const ESCAPE: char = '!';

/// One occurrence of markdown link syntax in a text.
///
/// Offsets are byte offsets relative to the text that was matched, not
/// document positions; callers translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownMatch {
    /// The whole matched syntax, e.g. `[OpenAI](https://openai.com)`.
    pub full: String,
    /// Display text (group 1).
    pub text: String,
    /// Target url (group 2).
    pub url: String,
    /// Start of the match.
    pub index: usize,
    /// Length of `full` in bytes.
    pub len: usize,
}

impl MarkdownMatch {
    pub fn end(&self) -> usize {
        self.index + self.len
    }
}

/// True if a match is image syntax rather than a link: the text just before
/// it ends with `!`, or its display text starts with `!`.
pub fn is_escaped(preceding: &str, m: &MarkdownMatch) -> bool {
    preceding.ends_with(ESCAPE) || m.text.starts_with(ESCAPE)
}

/// Leftmost raw match of `re` at or after `from`, without the escape check.
///
/// Empty matches are ignored so every accepted match consumes input.
pub fn next_match(re: &Regex, text: &str, from: usize) -> Option<MarkdownMatch> {
    if from > text.len() {
        return None;
    }
    let caps = re.captures_at(text, from)?;
    let full = caps.get(0)?;
    if full.is_empty() {
        return None;
    }
    let group = |i: usize| caps.get(i).map_or("", |g| g.as_str()).to_string();
    Some(MarkdownMatch {
        full: full.as_str().to_string(),
        text: group(1),
        url: group(2),
        index: full.start(),
        len: full.len(),
    })
}

/// Finds the first convertible link in `text`, skipping escaped matches and
/// continuing the scan just past each of them.
pub fn find_link(text: &str, pattern: &MarkdownPattern) -> Option<MarkdownMatch> {
    find_link_at(text, pattern, 0)
}

/// Like [`find_link`], starting at byte offset `from`.
///
/// The escape check only looks at text after `from` and after any skipped
/// image syntax, so consumed input never escapes a later match.
pub fn find_link_at(text: &str, pattern: &MarkdownPattern, from: usize) -> Option<MarkdownMatch> {
    let mut from = from;
    while let Some(m) = next_match(pattern.scan(), text, from) {
        if !is_escaped(&text[from..m.index], &m) {
            return Some(m);
        }
        log::trace!("skipping image syntax {:?} at {}", m.full, m.index);
        from = m.end();
    }
    None
}

/// Finds link syntax ending exactly at the end of `text` (the caret).
///
/// The leftmost anchored match can start at earlier image syntax and run to
/// the end; when that one is escaped the search retries one character later.
pub fn find_trailing_link(text: &str, pattern: &MarkdownPattern) -> Option<MarkdownMatch> {
    let mut from = 0;
    while let Some(m) = next_match(pattern.trailing(), text, from) {
        if !is_escaped(&text[..m.index], &m) {
            return Some(m);
        }
        log::trace!("not converting image syntax {:?} at caret", m.full);
        from = m.index + text[m.index..].chars().next().map_or(1, char::len_utf8);
    }
    None
}
