//! The document facade: every text mutation the input core performs goes
//! through [`DocumentFacade`].
//!
//! Positions are UTF-8 byte offsets into the document. Input methods speak
//! UTF-16, so the facade also offers [`DocumentFacade::relative_position_utf16`]
//! for walking the document by UTF-16 code units.
//!
//! # Tentative transactions
//!
//! A composition inserts its preedit inside a *tentative transaction*:
//! [`DocumentFacade::tentative_start`] marks the current state, and
//! [`DocumentFacade::tentative_undo`] reverts everything inserted since, even
//! when the document has meanwhile become read-only. Transactions do not nest.

mod decoration;
mod history;
mod rope;

use std::ops::Range;

pub use decoration::{Decorations, IndicatorRun};
pub use history::{EditOperation, TentativeLog};
pub use rope::RopeDocument;

/// Where an inserted character came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSource {
    /// Typed text or committed IME text
    DirectInput,
    /// Preedit text that will be undone by the next composition update
    TentativeInput,
}

/// A single applied change to the document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    Inserted { position: usize, text: String },
    Deleted { position: usize, text: String },
}

impl Modification {
    pub fn position(&self) -> usize {
        match self {
            Self::Inserted { position, .. } | Self::Deleted { position, .. } => *position,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Inserted { text, .. } | Self::Deleted { text, .. } => text,
        }
    }

    /// Length of the affected text in bytes
    pub fn len(&self) -> usize {
        self.text().len()
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Net number of lines added (negative for deletions)
    pub fn lines_added(&self) -> isize {
        let newlines = self.text().matches('\n').count() as isize;
        match self {
            Self::Inserted { .. } => newlines,
            Self::Deleted { .. } => -newlines,
        }
    }
}

/// Errors the document reports back to the input core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The document is read-only
    ReadOnly,
    /// The range touches protected text
    Protected,
    /// The edit would exceed the maximum document length
    LengthLimit,
    /// Offset past the end or not on a character boundary
    InvalidPosition(usize),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "document is read-only"),
            Self::Protected => write!(f, "range contains protected text"),
            Self::LengthLimit => write!(f, "document length limit reached"),
            Self::InvalidPosition(pos) => write!(f, "invalid document position {}", pos),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Command interface of the text storage engine.
pub trait DocumentFacade {
    /// Length in bytes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of a byte range, clamped to the document
    fn text_range(&self, range: Range<usize>) -> String;

    fn text(&self) -> String {
        self.text_range(0..self.len())
    }

    /// Insert `text` at `position`
    fn insert_character(
        &mut self,
        position: usize,
        text: &str,
        source: CharacterSource,
    ) -> Result<Modification, DocumentError>;

    /// Delete `len` bytes starting at `position`
    fn delete_range(&mut self, position: usize, len: usize) -> Result<Modification, DocumentError>;

    fn tentative_start(&mut self);

    /// Revert everything inserted since [`Self::tentative_start`] and end the
    /// transaction. Returns the reverting modifications in the order applied.
    fn tentative_undo(&mut self) -> Vec<Modification>;

    fn tentative_active(&self) -> bool;

    fn decoration_set_current_indicator(&mut self, indicator: usize);

    /// Paint `value` over `len` bytes with the current indicator; 0 clears.
    fn decoration_fill_range(&mut self, position: usize, value: i32, len: usize);

    /// Painted runs of one indicator, in document order
    fn indicator_runs(&self, indicator: usize) -> Vec<IndicatorRun>;

    /// Start of the paragraph containing (or preceding) `position`
    fn para_up(&self, position: usize) -> usize;

    /// Start of the next paragraph, or the end of the document
    fn para_down(&self, position: usize) -> usize;

    /// Move `position` by `chars` characters; `None` when that leaves the document
    fn relative_position(&self, position: usize, chars: isize) -> Option<usize>;

    /// Move `position` by `units` UTF-16 code units; `None` when that leaves the document
    fn relative_position_utf16(&self, position: usize, units: isize) -> Option<usize>;

    fn line_from_position(&self, position: usize) -> usize;

    /// Byte offset of the first character of `line`
    fn line_start(&self, line: usize) -> usize;

    /// Byte offset of the end of `line`, before its line terminator
    fn line_end(&self, line: usize) -> usize;

    /// Number of lines (always >= 1)
    fn line_count(&self) -> usize;

    fn is_read_only(&self) -> bool;

    fn set_read_only(&mut self, read_only: bool);

    /// Whether `start..end` touches protected text. An empty range is
    /// protected when it lies strictly inside a protected range.
    fn range_contains_protected(&self, start: usize, end: usize) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modification_lines_added() {
        let ins = Modification::Inserted {
            position: 0,
            text: "a\nb\n".to_string(),
        };
        assert_eq!(ins.lines_added(), 2);
        assert_eq!(ins.len(), 4);

        let del = Modification::Deleted {
            position: 3,
            text: "\n".to_string(),
        };
        assert_eq!(del.lines_added(), -1);
        assert_eq!(del.position(), 3);
    }

    #[test]
    fn test_document_error_display() {
        assert_eq!(DocumentError::ReadOnly.to_string(), "document is read-only");
        assert_eq!(
            DocumentError::InvalidPosition(7).to_string(),
            "invalid document position 7"
        );
    }
}
