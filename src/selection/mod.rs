//! Selection and caret model.
//!
//! A caret is a [`SelectionPosition`]: a document byte offset plus an
//! optional amount of virtual space (columns past the end of the line).
//! A [`SelectionRange`] pairs an anchor with a caret, and a [`SelectionSet`]
//! holds every range with the primary one first.

mod set;

pub use set::SelectionSet;

/// A document position, optionally inside the virtual space past a line end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionPosition {
    /// Byte offset into the document
    pub position: usize,
    /// Columns of virtual space after `position`
    pub virtual_space: usize,
}

impl SelectionPosition {
    pub const fn new(position: usize) -> Self {
        Self {
            position,
            virtual_space: 0,
        }
    }

    pub const fn with_virtual_space(position: usize, virtual_space: usize) -> Self {
        Self {
            position,
            virtual_space,
        }
    }

    pub fn is_virtual(&self) -> bool {
        self.virtual_space > 0
    }

    /// Shift for `len` bytes inserted at `start`. A position exactly at the
    /// insertion point stays, though virtual space is consumed first.
    pub fn move_for_insert(&mut self, start: usize, len: usize) {
        if self.position == start {
            let consumed = len.min(self.virtual_space);
            self.virtual_space -= consumed;
            self.position += consumed;
        } else if self.position > start {
            self.position += len;
        }
    }

    /// Shift for `len` bytes deleted at `start`
    pub fn move_for_delete(&mut self, start: usize, len: usize) {
        if self.position == start {
            self.virtual_space = 0;
        }
        if self.position > start {
            if self.position > start + len {
                self.position -= len;
            } else {
                self.position = start;
                self.virtual_space = 0;
            }
        }
    }
}

/// A selection with an anchor (fixed end) and a caret (moving end).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionRange {
    pub anchor: SelectionPosition,
    pub caret: SelectionPosition,
}

impl SelectionRange {
    pub fn new(anchor: SelectionPosition, caret: SelectionPosition) -> Self {
        Self { anchor, caret }
    }

    /// Range between two plain byte offsets
    pub fn from_offsets(anchor: usize, caret: usize) -> Self {
        Self::new(SelectionPosition::new(anchor), SelectionPosition::new(caret))
    }

    /// Create a collapsed selection (caret with no selection)
    pub fn collapsed(pos: SelectionPosition) -> Self {
        Self {
            anchor: pos,
            caret: pos,
        }
    }

    /// Check if selection is empty (anchor == caret)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.caret
    }

    pub fn start(&self) -> SelectionPosition {
        self.anchor.min(self.caret)
    }

    pub fn end(&self) -> SelectionPosition {
        self.anchor.max(self.caret)
    }

    /// Selected bytes (virtual space excluded)
    pub fn len(&self) -> usize {
        self.end().position - self.start().position
    }

    /// Check if selection is reversed (caret before anchor)
    pub fn is_reversed(&self) -> bool {
        self.caret < self.anchor
    }

    pub fn extend_to(&mut self, pos: SelectionPosition) {
        self.caret = pos;
    }

    /// Collapse selection to the caret
    pub fn collapse(&mut self) {
        self.anchor = self.caret;
    }

    /// Whether `position` lies within the range, both ends included
    pub fn contains(&self, position: usize) -> bool {
        position >= self.start().position && position <= self.end().position
    }

    /// Whether two ranges share any bytes, or are identical carets
    pub fn overlaps(&self, other: &SelectionRange) -> bool {
        if self.is_empty() && other.is_empty() {
            return self.caret == other.caret;
        }
        let (a, b) = (self.start(), self.end());
        let (c, d) = (other.start(), other.end());
        if self.is_empty() {
            return a > c && a < d;
        }
        if other.is_empty() {
            return c > a && c < b;
        }
        a < d && c < b
    }

    pub fn clamp(&mut self, doc_len: usize) {
        for pos in [&mut self.anchor, &mut self.caret] {
            if pos.position > doc_len {
                *pos = SelectionPosition::new(doc_len);
            }
        }
    }
}
