//! # Document Model
//!
//! The inline document the link engine mutates, seen through the
//! [`InlineHost`] trait. [`InlineDocument`] is the in-memory host used by the
//! CLI and the tests; embedders implement [`InlineHost`] over their own tree.
//!
//! ## Modules
//!
//! - **`text_run`**: `TextRun`, a splittable xi-rope backed run of text
//! - **`node`**: `InlineNode` / `InlineElement` / `NodeId`
//! - **`host`**: the `InlineHost` collaborator contract
//! - **`inline_doc`**: `InlineDocument`, a flat paragraph of inline nodes

pub mod host;
pub mod inline_doc;
pub mod node;
pub mod text_run;

pub use host::InlineHost;
pub use inline_doc::InlineDocument;
pub use node::{CARD_ATTRIBUTE, InlineElement, InlineNode, NodeId};
pub use text_run::TextRun;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("Node {0} is not a text node")]
    NotText(NodeId),
    #[error("Node {0} is not an element")]
    NotElement(NodeId),
    #[error("Offset {offset} is out of bounds for node {node} (length {len})")]
    OffsetOutOfBounds {
        node: NodeId,
        offset: usize,
        len: usize,
    },
    #[error("Cannot wrap a collapsed range at {0}")]
    CollapsedRange(usize),
}
