//! # Inline Element Plugins
//!
//! A plugin owns one inline element type: its tag, attribute schema,
//! optional markdown pattern and hotkey, plus handlers for the host's
//! events. Hosts talk to plugins through [`registry::PluginRegistry`] and
//! never to a concrete plugin type.
//!
//! ## Modules
//!
//! - **`toggle`**: `InlineToggle`, the wrap/unwrap/query logic shared by
//!   every inline element type
//! - **`typing`**: convert-as-you-type on the markdown trigger key
//! - **`paste`**: bulk conversion of a pasted text node
//! - **`options`**: `LinkOptions`, host-supplied construction options
//! - **`link`**: `LinkPlugin`, the link element plugin
//! - **`registry`**: `PluginRegistry`, the capability table hosts dispatch through
//!
//! ## Events
//!
//! Handlers run synchronously and finish before the next event; a handler
//! either completes its mutation or leaves the document as it found it.

pub mod link;
pub mod options;
pub mod paste;
pub mod registry;
pub mod toggle;
pub mod typing;

pub use link::LinkPlugin;
pub use options::{DEFAULT_HOTKEY, LinkOptions};
pub use paste::paste_markdown;
pub use registry::PluginRegistry;
pub use toggle::{InlineToggle, ToggleOutcome};
pub use typing::{NBSP, trigger_markdown};

use crate::{
    document::{DocumentError, InlineHost, NodeId},
    element::{AttributeSchema, ValidationError},
    markdown::{MarkdownPattern, PatternError},
    surface::EditingSurface,
};

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Invalid attributes: {0}")]
    Validation(#[from] ValidationError),
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
    #[error("Invalid markdown pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("No plugin named `{0}`")]
    UnknownPlugin(String),
    #[error("A plugin named `{0}` is already registered")]
    DuplicatePlugin(String),
}

/// The collaborators a handler works against for the duration of one event.
pub struct EditorContext<'a> {
    pub host: &'a mut dyn InlineHost,
    pub surface: &'a mut dyn EditingSurface,
}

impl<'a> EditorContext<'a> {
    pub fn new(host: &'a mut dyn InlineHost, surface: &'a mut dyn EditingSurface) -> Self {
        Self { host, surface }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Backspace,
    Other,
}

/// A keystroke delivered to plugins before the host applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            default_prevented: false,
        }
    }

    /// Tells the host not to apply the key's own effect (e.g. inserting a space).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Markdown is converted when the user finishes a word with a space.
    pub fn is_markdown_trigger(&self) -> bool {
        matches!(self.key, Key::Space | Key::Char(' '))
    }
}

#[derive(Debug)]
pub enum PluginEvent<'e> {
    Keystroke(&'e mut KeyEvent),
    /// Text was pasted into this text node.
    Paste(NodeId),
    SelectionChanged,
    DocumentParsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    Ignored,
}

impl EventOutcome {
    pub fn is_handled(self) -> bool {
        self == EventOutcome::Handled
    }
}

impl From<bool> for EventOutcome {
    fn from(handled: bool) -> Self {
        if handled {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }
}

/// A key chord the host should bind to `execute(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    /// Chord in `mod+k` form; `mod` is Ctrl or Cmd depending on platform.
    pub keys: String,
    pub args: Vec<String>,
}

/// What a host needs to know about an inline element type.
pub trait InlinePlugin {
    /// Registry key, unique per registry.
    fn name(&self) -> &'static str;

    fn tag(&self) -> &'static str;

    fn schema(&self) -> &AttributeSchema;

    /// The markdown pattern converted while typing and on paste, if enabled.
    fn markdown(&self) -> Option<&MarkdownPattern>;

    fn hotkey(&self) -> &Hotkey;

    fn on_event(
        &self,
        ctx: &mut EditorContext<'_>,
        event: PluginEvent<'_>,
    ) -> Result<EventOutcome, PluginError>;

    /// Toggles the element on the current selection.
    fn execute(
        &self,
        ctx: &mut EditorContext<'_>,
        args: &[&str],
    ) -> Result<ToggleOutcome, PluginError>;

    /// Completes or edits an element of this type, e.g. a drafted one once
    /// the editing surface has the missing values.
    fn update(
        &self,
        ctx: &mut EditorContext<'_>,
        id: NodeId,
        args: &[&str],
    ) -> Result<(), PluginError>;

    /// Does the current selection intersect an element of this type?
    fn query(&self, ctx: &mut EditorContext<'_>) -> bool;
}
