//! # Markdown Link Recognition
//!
//! Recognizes the single inline pattern `[text](url)` in plain text. This is
//! not a markdown parser: nothing else is recognized.
//!
//! ## Modules
//!
//! - **`pattern`**: `MarkdownPattern`, the configurable two-group regex in
//!   its scan and end-anchored forms
//! - **`matcher`**: `find_link()` / `find_link_at()` / `find_trailing_link()` returning a
//!   `MarkdownMatch`, with the image-syntax escape rule
//! - **`splitter`**: `split_fragments()`, the pure `(text, pattern) -> [Fragment]`
//!   transform behind paste conversion
//!
//! ## Escape Rule
//!
//! A match is image syntax, and is left as literal text, when the text right
//! before it ends with `!` or its display text starts with `!`.

pub mod matcher;
pub mod pattern;
pub mod splitter;

pub use matcher::{
    ESCAPE, MarkdownMatch, find_link, find_link_at, find_trailing_link, is_escaped,
};
pub use pattern::{DEFAULT_MARKDOWN, MarkdownPattern, PatternError};
pub use splitter::{Fragment, fragments_to_markup, has_links, split_fragments};
