use std::fmt;

use xi_rope::Rope;

/// A run of characters owned by a single text-bearing node.
///
/// Backed by an `xi_rope::Rope` so splitting a long pasted block into
/// pieces shares leaves instead of copying.
#[derive(Clone)]
pub struct TextRun {
    rope: Rope,
}

impl TextRun {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Returns true if `offset` lies on a UTF-8 character boundary of this run.
    pub fn is_boundary(&self, offset: usize) -> bool {
        offset <= self.len() && self.rope.is_codepoint_boundary(offset)
    }

    /// Splits the run at `offset`, returning the two sibling runs.
    ///
    /// The concatenation of the two halves always equals the original run.
    /// Returns `None` when `offset` is past the end or inside a character.
    pub fn split_at(&self, offset: usize) -> Option<(TextRun, TextRun)> {
        if !self.is_boundary(offset) {
            return None;
        }
        let len = self.len();
        Some((
            TextRun {
                rope: self.rope.subseq(0..offset),
            },
            TextRun {
                rope: self.rope.subseq(offset..len),
            },
        ))
    }

    /// Appends another run to the end of this one.
    pub fn append(&mut self, other: &TextRun) {
        self.rope = Rope::concat(self.rope.clone(), other.rope.clone());
    }

    /// Inserts `text` at `offset`. Returns false if `offset` is not a boundary.
    pub fn insert(&mut self, offset: usize, text: &str) -> bool {
        let Some((mut left, right)) = self.split_at(offset) else {
            return false;
        };
        left.append(&TextRun::new(text));
        left.append(&right);
        *self = left;
        true
    }
}

impl Default for TextRun {
    fn default() -> Self {
        TextRun::new("")
    }
}

impl From<&str> for TextRun {
    fn from(text: &str) -> Self {
        TextRun::new(text)
    }
}

impl PartialEq for TextRun {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.text() == other.text()
    }
}

impl Eq for TextRun {}

impl fmt::Debug for TextRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextRun").field(&self.text()).finish()
    }
}
