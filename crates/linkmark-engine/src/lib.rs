pub mod document;
pub mod element;
pub mod markdown;
pub mod markup;
pub mod plugin;
pub mod surface;

// Re-export key types for easier usage
pub use document::{DocumentError, InlineDocument, InlineElement, InlineHost, InlineNode, NodeId};
pub use element::{LinkElement, LinkTarget, ValidationError};
pub use markdown::{Fragment, MarkdownMatch, MarkdownPattern, PatternError, split_fragments};
pub use plugin::{
    EditorContext, EventOutcome, Hotkey, InlinePlugin, Key, KeyEvent, LinkOptions, LinkPlugin,
    PluginError, PluginEvent, PluginRegistry, ToggleOutcome,
};
pub use surface::{EditingSurface, NoSurface, SignalLog, SurfaceSignal};
