use regex::Regex;

/// Default markdown link syntax: `[text](url)` with a whitespace-free url.
pub const DEFAULT_MARKDOWN: &str = r"\[(.+?)\]\(([^\s]+?)\)";

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid markdown pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("Markdown pattern must have exactly 2 capture groups (text, url), found {found}")]
    CaptureGroups { found: usize },
}

/// A compiled markdown link pattern.
///
/// Group 1 captures the display text and group 2 the url. The pattern is
/// compiled twice: unanchored for scanning pasted text, and anchored to the
/// end of input for live typing, where only syntax ending at the caret counts.
#[derive(Debug, Clone)]
pub struct MarkdownPattern {
    source: String,
    scan: Regex,
    trailing: Regex,
}

impl MarkdownPattern {
    /// Compiles `source`. A trailing unescaped `$` is dropped from the scan
    /// variant so a pattern written for live typing also works for paste.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let body = source
            .strip_suffix('$')
            .filter(|rest| !rest.ends_with('\\'))
            .unwrap_or(source);

        let scan = Regex::new(body)?;
        let found = scan.captures_len() - 1;
        if found != 2 {
            return Err(PatternError::CaptureGroups { found });
        }
        let trailing = Regex::new(&format!("(?:{body})$"))?;

        Ok(Self {
            source: source.to_string(),
            scan,
            trailing,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Unanchored variant, for finding matches anywhere in a text.
    pub fn scan(&self) -> &Regex {
        &self.scan
    }

    /// End-anchored variant, for matches ending exactly at the caret.
    pub fn trailing(&self) -> &Regex {
        &self.trailing
    }
}

impl Default for MarkdownPattern {
    fn default() -> Self {
        Self::new(DEFAULT_MARKDOWN).expect("default markdown pattern compiles")
    }
}
