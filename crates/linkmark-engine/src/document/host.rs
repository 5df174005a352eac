use std::ops::Range;

use super::{DocumentError, InlineElement, NodeId};

/// The document and selection service the link engine drives.
///
/// All positions are byte offsets into the document's visible text. The
/// engine only reads the selection and the inline elements intersecting it,
/// and issues wrap/unwrap/insert/split commands back; it never owns the tree.
pub trait InlineHost {
    /// Current selection. An empty range is a collapsed caret.
    fn range(&self) -> Range<usize>;

    fn set_range(&mut self, range: Range<usize>);

    /// Top-level inline elements intersecting `range`, in document order.
    fn find_inlines(&self, range: Range<usize>) -> Vec<NodeId>;

    fn element(&self, id: NodeId) -> Option<&InlineElement>;

    fn element_mut(&mut self, id: NodeId) -> Option<&mut InlineElement>;

    /// Every top-level inline element, in document order.
    fn elements(&self) -> Vec<NodeId>;

    /// Wraps the content covered by `range` in `element`. The selection keeps
    /// covering the wrapped content.
    fn wrap(&mut self, range: Range<usize>, element: InlineElement)
    -> Result<NodeId, DocumentError>;

    /// Removes the element, leaving its children in place.
    fn unwrap(&mut self, id: NodeId) -> Result<(), DocumentError>;

    /// Inserts `element` at the caret, replacing any selected content. The
    /// caret collapses after the inserted element.
    fn insert(&mut self, element: InlineElement) -> Result<NodeId, DocumentError>;

    /// Inserts plain text at the caret, never inside an element.
    fn insert_text(&mut self, text: &str) -> Result<(), DocumentError>;

    /// The text node holding a collapsed caret and the caret's offset in it.
    fn text_at_caret(&self) -> Option<(NodeId, usize)>;

    fn node_text(&self, id: NodeId) -> Option<String>;

    /// Splits a text node at `offset`. The left half keeps `id`; the id of
    /// the right half is returned.
    fn split_text(&mut self, id: NodeId, offset: usize) -> Result<NodeId, DocumentError>;

    fn remove(&mut self, id: NodeId) -> Result<(), DocumentError>;

    /// Replaces a text node with the nodes parsed from `markup`.
    fn set_markup(&mut self, id: NodeId, markup: &str) -> Result<(), DocumentError>;
}
