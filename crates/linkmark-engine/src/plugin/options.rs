use crate::{
    element::LinkTarget,
    markdown::{MarkdownPattern, PatternError},
};

use super::Hotkey;

/// Chord bound to the link toggle unless configured otherwise.
pub const DEFAULT_HOTKEY: &str = "mod+k";

/// Construction options for [`super::LinkPlugin`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// Markdown pattern source. `None` uses the default pattern; an empty
    /// string turns markdown conversion off.
    pub markdown: Option<String>,
    /// Hotkey chord. `None` uses [`DEFAULT_HOTKEY`].
    pub hotkey: Option<String>,
    /// Target passed to the toggle by the hotkey.
    pub default_target: LinkTarget,
}

impl LinkOptions {
    /// Compiles the markdown pattern, or `None` when conversion is disabled.
    pub fn pattern(&self) -> Result<Option<MarkdownPattern>, PatternError> {
        match self.markdown.as_deref() {
            None => Ok(Some(MarkdownPattern::default())),
            Some("") => Ok(None),
            Some(source) => MarkdownPattern::new(source).map(Some),
        }
    }

    pub fn hotkey(&self) -> Hotkey {
        Hotkey {
            keys: self
                .hotkey
                .clone()
                .unwrap_or_else(|| DEFAULT_HOTKEY.to_string()),
            args: vec![self.default_target.as_str().to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::markdown::DEFAULT_MARKDOWN;

    #[test]
    fn defaults() {
        let options = LinkOptions::default();
        let pattern = options.pattern().unwrap().unwrap();
        assert_eq!(pattern.source(), DEFAULT_MARKDOWN);
        assert_eq!(
            options.hotkey(),
            Hotkey {
                keys: "mod+k".to_string(),
                args: vec!["_blank".to_string()],
            }
        );
    }

    #[test]
    fn empty_markdown_disables_conversion() {
        let options = LinkOptions {
            markdown: Some(String::new()),
            ..Default::default()
        };
        assert!(options.pattern().unwrap().is_none());
    }

    #[test]
    fn invalid_markdown_is_rejected() {
        let options = LinkOptions {
            markdown: Some(r"\[(.+?)\]".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            options.pattern(),
            Err(PatternError::CaptureGroups { found: 1 })
        ));
    }

    #[test]
    fn configured_hotkey_and_target() {
        let options = LinkOptions {
            hotkey: Some("ctrl+l".to_string()),
            default_target: LinkTarget::Top,
            ..Default::default()
        };
        assert_eq!(options.hotkey().keys, "ctrl+l");
        assert_eq!(options.hotkey().args, vec!["_top".to_string()]);
    }
}
