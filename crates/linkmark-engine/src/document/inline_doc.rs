use std::ops::Range;

use crate::markup::{parse_markup, serialize_nodes};

use super::{DocumentError, InlineElement, InlineHost, InlineNode, NodeId};

#[derive(Debug, Clone)]
struct Slot {
    id: NodeId,
    node: InlineNode,
}

/// An in-memory paragraph of inline nodes with a selection.
///
/// Only top-level nodes carry a [`NodeId`]; element children are plain
/// [`InlineNode`]s. Offsets are byte offsets into the visible text, where an
/// element contributes the text of its children.
///
/// ```rust
/// # use linkmark_engine::document::{InlineDocument, InlineHost};
/// let mut doc = InlineDocument::from_markup(r#"see <a href="u">it</a>"#);
/// assert_eq!(doc.text(), "see it");
/// doc.set_range(5..5);
/// assert_eq!(doc.find_inlines(doc.range()).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct InlineDocument {
    slots: Vec<Slot>,
    selection: Range<usize>,
    next_id: u64,
}

impl Default for InlineDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineDocument {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            selection: 0..0,
            next_id: 1,
        }
    }

    /// Parses `markup` into a document with the caret at the end.
    pub fn from_markup(markup: &str) -> Self {
        let mut doc = Self::new();
        let slots: Vec<Slot> = parse_markup(markup)
            .into_iter()
            .map(|node| doc.slot(node))
            .collect();
        doc.slots = slots;
        let len = doc.len();
        doc.selection = len..len;
        doc
    }

    /// Visible text of the whole document.
    pub fn text(&self) -> String {
        self.slots.iter().map(|s| s.node.text_content()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().map(|s| s.node.text_len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_markup(&self) -> String {
        let nodes: Vec<InlineNode> = self.slots.iter().map(|s| s.node.clone()).collect();
        serialize_nodes(&nodes)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &InlineNode)> {
        self.slots.iter().map(|s| (s.id, &s.node))
    }

    pub fn node(&self, id: NodeId) -> Option<&InlineNode> {
        self.slots.iter().find(|s| s.id == id).map(|s| &s.node)
    }

    /// Merges adjacent text nodes and drops empty ones. The surviving left
    /// node of each merge keeps its id.
    pub fn normalize(&mut self) {
        let mut merged: Vec<Slot> = Vec::with_capacity(self.slots.len());
        for slot in self.slots.drain(..) {
            if let InlineNode::Text(run) = &slot.node {
                if run.is_empty() {
                    continue;
                }
                if let Some(Slot {
                    node: InlineNode::Text(prev),
                    ..
                }) = merged.last_mut()
                {
                    prev.append(run);
                    continue;
                }
            }
            merged.push(slot);
        }
        self.slots = merged;
    }

    /// Inserts `text` at the caret as a node of its own, so a paste handler
    /// sees only the pasted text. Returns the new node's id.
    pub fn insert_text_node(&mut self, text: &str) -> NodeId {
        self.delete_selection();
        let caret = self.clamp(self.selection.clone()).start;
        let at = self.cut(caret, false);
        let slot = self.slot(InlineNode::text(text));
        let id = slot.id;
        self.slots.insert(at, slot);
        let caret = caret + text.len();
        self.selection = caret..caret;
        id
    }

    /// Deletes the selection, or the character before a collapsed caret.
    /// An element touched by the deletion is removed whole.
    pub fn delete_backward(&mut self) {
        let range = self.clamp(self.selection.clone());
        if range.is_empty() {
            let text = self.text();
            let Some(prev) = text.get(..range.start).and_then(|t| t.chars().next_back()) else {
                return;
            };
            self.selection = range.start - prev.len_utf8()..range.start;
        }
        self.delete_selection();
        self.normalize();
    }

    fn slot(&mut self, node: InlineNode) -> Slot {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        Slot { id, node }
    }

    fn index_of(&self, id: NodeId) -> Result<usize, DocumentError> {
        self.slots
            .iter()
            .position(|s| s.id == id)
            .ok_or(DocumentError::UnknownNode(id))
    }

    fn span_at(&self, index: usize) -> Range<usize> {
        let start: usize = self.slots[..index].iter().map(|s| s.node.text_len()).sum();
        start..start + self.slots[index].node.text_len()
    }

    fn spans(&self) -> impl Iterator<Item = (usize, Range<usize>)> + '_ {
        let mut pos = 0;
        self.slots.iter().enumerate().map(move |(i, s)| {
            let start = pos;
            pos += s.node.text_len();
            (i, start..pos)
        })
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len();
        let end = range.end.min(len);
        range.start.min(end)..end
    }

    /// Ensures a node boundary at `offset`, splitting a text node if needed,
    /// and returns the index of the first slot at or after it. An element
    /// straddling `offset` is never split: it is kept whole on the side given
    /// by `expand_right`.
    fn cut(&mut self, offset: usize, expand_right: bool) -> usize {
        let mut pos = 0;
        for i in 0..self.slots.len() {
            let end = pos + self.slots[i].node.text_len();
            if offset <= pos {
                return i;
            }
            if offset < end {
                let halves = match &self.slots[i].node {
                    InlineNode::Text(run) => run.split_at(offset - pos),
                    InlineNode::Element(_) => None,
                };
                return match halves {
                    Some((left, right)) => {
                        self.slots[i].node = InlineNode::Text(left);
                        let right = self.slot(InlineNode::Text(right));
                        self.slots.insert(i + 1, right);
                        i + 1
                    }
                    None if expand_right => i + 1,
                    None => i,
                };
            }
            pos = end;
        }
        self.slots.len()
    }

    /// Cuts at both ends of `range` and returns the slot indices covering it.
    fn isolate(&mut self, range: Range<usize>) -> Range<usize> {
        let start = self.cut(range.start, false);
        let end = self.cut(range.end, true);
        start..end.max(start)
    }

    fn delete_selection(&mut self) {
        let range = self.clamp(self.selection.clone());
        if range.is_empty() {
            return;
        }
        let covered = self.isolate(range.clone());
        let start = self.span_start(covered.start);
        self.slots.drain(covered);
        self.selection = start..start;
    }

    fn span_start(&self, index: usize) -> usize {
        self.slots[..index].iter().map(|s| s.node.text_len()).sum()
    }

    /// Text slot containing or ending at `pos`, preferring the one that ends
    /// there so typed text extends what precedes the caret.
    fn text_slot_at(&self, pos: usize) -> Option<(usize, Range<usize>)> {
        let is_text = |i: usize| matches!(self.slots[i].node, InlineNode::Text(_));
        self.spans()
            .find(|(i, span)| is_text(*i) && span.start < pos && pos <= span.end)
            .or_else(|| {
                self.spans()
                    .find(|(i, span)| is_text(*i) && span.start == pos)
            })
    }

    /// Moves a position across a replacement of `old` by `new_len` bytes.
    fn shift(pos: usize, old: &Range<usize>, new_len: usize) -> usize {
        if pos >= old.end {
            pos - old.len() + new_len
        } else if pos > old.start {
            old.start + (pos - old.start).min(new_len)
        } else {
            pos
        }
    }

    fn replace_shift(&mut self, old: &Range<usize>, new_len: usize) {
        let start = Self::shift(self.selection.start, old, new_len);
        let end = Self::shift(self.selection.end, old, new_len);
        self.selection = start..end;
    }
}

impl InlineHost for InlineDocument {
    fn range(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn set_range(&mut self, range: Range<usize>) {
        self.selection = self.clamp(range);
    }

    fn find_inlines(&self, range: Range<usize>) -> Vec<NodeId> {
        self.spans()
            .filter(|(i, _)| matches!(self.slots[*i].node, InlineNode::Element(_)))
            .filter(|(_, span)| {
                if range.is_empty() {
                    span.start < range.start && range.start <= span.end
                } else {
                    span.start < range.end && range.start < span.end
                }
            })
            .map(|(i, _)| self.slots[i].id)
            .collect()
    }

    fn element(&self, id: NodeId) -> Option<&InlineElement> {
        self.node(id).and_then(InlineNode::as_element)
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut InlineElement> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .and_then(|s| match &mut s.node {
                InlineNode::Element(element) => Some(element),
                InlineNode::Text(_) => None,
            })
    }

    fn elements(&self) -> Vec<NodeId> {
        self.slots
            .iter()
            .filter(|s| matches!(s.node, InlineNode::Element(_)))
            .map(|s| s.id)
            .collect()
    }

    fn wrap(
        &mut self,
        range: Range<usize>,
        mut element: InlineElement,
    ) -> Result<NodeId, DocumentError> {
        let range = self.clamp(range);
        if range.is_empty() {
            return Err(DocumentError::CollapsedRange(range.start));
        }
        let covered = self.isolate(range);
        let at = covered.start;
        element.children = self.slots.drain(covered).map(|s| s.node).collect();
        let slot = self.slot(InlineNode::Element(element));
        let id = slot.id;
        self.slots.insert(at, slot);
        self.selection = self.span_at(at);
        Ok(id)
    }

    fn unwrap(&mut self, id: NodeId) -> Result<(), DocumentError> {
        let index = self.index_of(id)?;
        let InlineNode::Element(element) = self.slots[index].node.clone() else {
            return Err(DocumentError::NotElement(id));
        };
        self.slots.remove(index);
        let children: Vec<Slot> = element
            .children
            .into_iter()
            .map(|node| self.slot(node))
            .collect();
        self.slots.splice(index..index, children);
        self.normalize();
        Ok(())
    }

    fn insert(&mut self, element: InlineElement) -> Result<NodeId, DocumentError> {
        self.delete_selection();
        let caret = self.clamp(self.selection.clone()).start;
        let at = self.cut(caret, false);
        let slot = self.slot(InlineNode::Element(element));
        let id = slot.id;
        self.slots.insert(at, slot);
        let end = self.span_at(at).end;
        self.selection = end..end;
        Ok(id)
    }

    fn insert_text(&mut self, text: &str) -> Result<(), DocumentError> {
        if text.is_empty() {
            return Ok(());
        }
        self.delete_selection();
        let caret = self.clamp(self.selection.clone()).start;
        match self.text_slot_at(caret) {
            Some((i, span)) => {
                if let InlineNode::Text(run) = &mut self.slots[i].node
                    && !run.insert(caret - span.start, text)
                {
                    return Err(DocumentError::OffsetOutOfBounds {
                        node: self.slots[i].id,
                        offset: caret - span.start,
                        len: span.len(),
                    });
                }
            }
            None => {
                let at = self.cut(caret, false);
                let slot = self.slot(InlineNode::text(text));
                self.slots.insert(at, slot);
            }
        }
        let caret = caret + text.len();
        self.selection = caret..caret;
        Ok(())
    }

    fn text_at_caret(&self) -> Option<(NodeId, usize)> {
        if !self.selection.is_empty() {
            return None;
        }
        let caret = self.selection.start;
        self.text_slot_at(caret)
            .map(|(i, span)| (self.slots[i].id, caret - span.start))
    }

    fn node_text(&self, id: NodeId) -> Option<String> {
        self.node(id).map(InlineNode::text_content)
    }

    fn split_text(&mut self, id: NodeId, offset: usize) -> Result<NodeId, DocumentError> {
        let index = self.index_of(id)?;
        let InlineNode::Text(run) = &self.slots[index].node else {
            return Err(DocumentError::NotText(id));
        };
        let (left, right) = run
            .split_at(offset)
            .ok_or(DocumentError::OffsetOutOfBounds {
                node: id,
                offset,
                len: run.len(),
            })?;
        self.slots[index].node = InlineNode::Text(left);
        let right = self.slot(InlineNode::Text(right));
        let right_id = right.id;
        self.slots.insert(index + 1, right);
        Ok(right_id)
    }

    fn remove(&mut self, id: NodeId) -> Result<(), DocumentError> {
        let index = self.index_of(id)?;
        let span = self.span_at(index);
        self.slots.remove(index);
        self.replace_shift(&span, 0);
        Ok(())
    }

    fn set_markup(&mut self, id: NodeId, markup: &str) -> Result<(), DocumentError> {
        let index = self.index_of(id)?;
        if !matches!(self.slots[index].node, InlineNode::Text(_)) {
            return Err(DocumentError::NotText(id));
        }
        let span = self.span_at(index);
        let parsed: Vec<Slot> = parse_markup(markup)
            .into_iter()
            .map(|node| self.slot(node))
            .collect();
        let new_len = parsed.iter().map(|s| s.node.text_len()).sum();
        self.slots.splice(index..index + 1, parsed);
        self.replace_shift(&span, new_len);
        Ok(())
    }
}
