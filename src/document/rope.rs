//! Rope-backed reference implementation of [`DocumentFacade`].

use std::ops::Range;

use ropey::Rope;

use super::decoration::{shift_range_for_delete, shift_range_for_insert, Decorations};
use super::history::{EditOperation, TentativeLog};
use super::{CharacterSource, DocumentError, DocumentFacade, IndicatorRun, Modification};

/// In-memory document backed by `ropey::Rope`.
#[derive(Debug, Clone, Default)]
pub struct RopeDocument {
    rope: Rope,
    read_only: bool,
    protected: Vec<Range<usize>>,
    max_length: Option<usize>,
    tentative: Option<TentativeLog>,
    decorations: Decorations,
}

impl RopeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            ..Self::default()
        }
    }

    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Mark a byte range as protected; edits touching it are refused
    pub fn protect(&mut self, range: Range<usize>) {
        if !range.is_empty() {
            self.protected.push(range);
        }
    }

    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    fn is_char_boundary(&self, position: usize) -> bool {
        if position > self.rope.len_bytes() {
            return false;
        }
        let ci = self.rope.byte_to_char(position);
        self.rope.char_to_byte(ci) == position
    }

    /// A line consisting only of spaces and tabs
    fn is_white_line(&self, line: usize) -> bool {
        self.rope
            .line(line)
            .chars()
            .take_while(|c| *c != '\n' && *c != '\r')
            .all(|c| c == ' ' || c == '\t')
    }

    fn raw_insert(&mut self, position: usize, text: &str) -> Modification {
        let ci = self.rope.byte_to_char(position);
        self.rope.insert(ci, text);
        self.decorations.insert_space(position, text.len());
        for range in &mut self.protected {
            shift_range_for_insert(range, position, text.len());
        }
        Modification::Inserted {
            position,
            text: text.to_string(),
        }
    }

    fn raw_delete(&mut self, position: usize, len: usize) -> Modification {
        let start = self.rope.byte_to_char(position);
        let end = self.rope.byte_to_char(position + len);
        let text = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.decorations.delete_space(position, len);
        for range in &mut self.protected {
            shift_range_for_delete(range, position, len);
        }
        self.protected.retain(|r| !r.is_empty());
        Modification::Deleted { position, text }
    }

    fn record(&mut self, modification: &Modification) {
        if let Some(log) = self.tentative.as_mut() {
            log.record(EditOperation::from(modification));
        }
    }
}

impl DocumentFacade for RopeDocument {
    fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    fn text_range(&self, range: Range<usize>) -> String {
        let len = self.rope.len_bytes();
        let start = self.rope.byte_to_char(range.start.min(len));
        let end = self.rope.byte_to_char(range.end.min(len));
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    fn insert_character(
        &mut self,
        position: usize,
        text: &str,
        _source: CharacterSource,
    ) -> Result<Modification, DocumentError> {
        if self.read_only {
            return Err(DocumentError::ReadOnly);
        }
        if !self.is_char_boundary(position) {
            return Err(DocumentError::InvalidPosition(position));
        }
        if self.range_contains_protected(position, position) {
            return Err(DocumentError::Protected);
        }
        if let Some(max) = self.max_length {
            if self.len() + text.len() > max {
                return Err(DocumentError::LengthLimit);
            }
        }

        let modification = self.raw_insert(position, text);
        self.record(&modification);
        Ok(modification)
    }

    fn delete_range(&mut self, position: usize, len: usize) -> Result<Modification, DocumentError> {
        if self.read_only {
            return Err(DocumentError::ReadOnly);
        }
        let end = position + len;
        if !self.is_char_boundary(position) {
            return Err(DocumentError::InvalidPosition(position));
        }
        if !self.is_char_boundary(end) {
            return Err(DocumentError::InvalidPosition(end));
        }
        if self.range_contains_protected(position, end) {
            return Err(DocumentError::Protected);
        }

        let modification = self.raw_delete(position, len);
        self.record(&modification);
        Ok(modification)
    }

    fn tentative_start(&mut self) {
        debug_assert!(
            self.tentative.is_none(),
            "tentative transactions do not nest"
        );
        self.tentative = Some(TentativeLog::new());
    }

    fn tentative_undo(&mut self) -> Vec<Modification> {
        let Some(mut log) = self.tentative.take() else {
            return Vec::new();
        };

        // Reverting bypasses the read-only and protection checks
        log.drain_inverse()
            .into_iter()
            .map(|op| {
                if op.inserted_text.is_empty() {
                    self.raw_delete(op.offset, op.deleted_text.len())
                } else {
                    self.raw_insert(op.offset, &op.inserted_text)
                }
            })
            .collect()
    }

    fn tentative_active(&self) -> bool {
        self.tentative.is_some()
    }

    fn decoration_set_current_indicator(&mut self, indicator: usize) {
        self.decorations.set_current(indicator);
    }

    fn decoration_fill_range(&mut self, position: usize, value: i32, len: usize) {
        let len = len.min(self.len().saturating_sub(position));
        self.decorations.fill(position, value, len);
    }

    fn indicator_runs(&self, indicator: usize) -> Vec<IndicatorRun> {
        self.decorations.runs(indicator)
    }

    fn para_up(&self, position: usize) -> usize {
        let position = position.min(self.len());
        let mut line = self.line_from_position(position) as isize;
        if position == self.line_start(line as usize) {
            line -= 1;
        }
        // Skip white lines, then the paragraph itself
        while line >= 0 && self.is_white_line(line as usize) {
            line -= 1;
        }
        while line >= 0 && !self.is_white_line(line as usize) {
            line -= 1;
        }
        self.line_start((line + 1) as usize)
    }

    fn para_down(&self, position: usize) -> usize {
        let total = self.line_count();
        let mut line = self.line_from_position(position.min(self.len()));
        while line < total && !self.is_white_line(line) {
            line += 1;
        }
        while line < total && self.is_white_line(line) {
            line += 1;
        }
        if line < total {
            self.line_start(line)
        } else {
            self.line_end(total - 1)
        }
    }

    fn relative_position(&self, position: usize, chars: isize) -> Option<usize> {
        if position > self.len() {
            return None;
        }
        let ci = self.rope.byte_to_char(position) as isize + chars;
        if ci < 0 || ci as usize > self.rope.len_chars() {
            return None;
        }
        Some(self.rope.char_to_byte(ci as usize))
    }

    fn relative_position_utf16(&self, position: usize, units: isize) -> Option<usize> {
        if position > self.len() {
            return None;
        }
        let mut ci = self.rope.byte_to_char(position);
        let mut remaining = units;

        // Step whole characters; a surrogate pair counts as two units
        while remaining > 0 {
            let ch = self.rope.get_char(ci)?;
            remaining -= ch.len_utf16() as isize;
            ci += 1;
        }
        while remaining < 0 {
            if ci == 0 {
                return None;
            }
            ci -= 1;
            remaining += self.rope.char(ci).len_utf16() as isize;
        }
        Some(self.rope.char_to_byte(ci))
    }

    fn line_from_position(&self, position: usize) -> usize {
        self.rope.byte_to_line(position.min(self.len()))
    }

    fn line_start(&self, line: usize) -> usize {
        let line = line.min(self.line_count() - 1);
        self.rope.line_to_byte(line)
    }

    fn line_end(&self, line: usize) -> usize {
        let line = line.min(self.line_count() - 1);
        let start = self.rope.line_to_byte(line);
        let content = self.rope.line(line);
        let mut len = content.len_bytes();
        let mut chars = content.chars_at(content.len_chars());
        if chars.prev() == Some('\n') {
            len -= 1;
            if chars.prev() == Some('\r') {
                len -= 1;
            }
        }
        start + len
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn range_contains_protected(&self, start: usize, end: usize) -> bool {
        self.protected.iter().any(|p| {
            if start == end {
                p.start < start && start < p.end
            } else {
                start < p.end && end > p.start
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut doc = RopeDocument::from_text("hello");
        let m = doc
            .insert_character(5, " wörld", CharacterSource::DirectInput)
            .unwrap();
        assert_eq!(m.len(), 7);
        assert_eq!(doc.text(), "hello wörld");

        let m = doc.delete_range(0, 6).unwrap();
        assert_eq!(m.text(), "hello ");
        assert_eq!(doc.text(), "wörld");
    }

    #[test]
    fn test_insert_rejections() {
        let mut doc = RopeDocument::from_text("aé").with_max_length(Some(4));
        assert_eq!(
            doc.insert_character(2, "x", CharacterSource::DirectInput),
            Err(DocumentError::InvalidPosition(2))
        );
        assert_eq!(
            doc.insert_character(3, "xy", CharacterSource::DirectInput),
            Err(DocumentError::LengthLimit)
        );

        doc.set_read_only(true);
        assert_eq!(
            doc.insert_character(0, "x", CharacterSource::DirectInput),
            Err(DocumentError::ReadOnly)
        );
        assert_eq!(doc.delete_range(0, 1), Err(DocumentError::ReadOnly));
    }

    #[test]
    fn test_protected_ranges() {
        let mut doc = RopeDocument::from_text("0123456789");
        doc.protect(3..6);

        assert!(doc.range_contains_protected(4, 4));
        // Edges of a protected range accept insertion
        assert!(!doc.range_contains_protected(3, 3));
        assert!(!doc.range_contains_protected(6, 6));
        assert!(doc.range_contains_protected(0, 4));
        assert!(!doc.range_contains_protected(6, 9));

        assert_eq!(doc.delete_range(2, 2), Err(DocumentError::Protected));
        doc.insert_character(0, "ab", CharacterSource::DirectInput)
            .unwrap();
        // Protection moved with the text
        assert!(doc.range_contains_protected(6, 6));
        assert!(!doc.range_contains_protected(4, 4));
    }

    #[test]
    fn test_tentative_undo_reverts_inserts() {
        let mut doc = RopeDocument::from_text("ab");
        doc.tentative_start();
        assert!(doc.tentative_active());
        doc.insert_character(1, "が", CharacterSource::TentativeInput)
            .unwrap();
        doc.insert_character(4, "x", CharacterSource::TentativeInput)
            .unwrap();
        assert_eq!(doc.text(), "aがxb");

        // Read-only does not block the rollback
        doc.set_read_only(true);
        let undone = doc.tentative_undo();
        assert_eq!(doc.text(), "ab");
        assert!(!doc.tentative_active());
        assert_eq!(undone.len(), 2);
        assert_eq!(
            undone[0],
            Modification::Deleted {
                position: 4,
                text: "x".to_string()
            }
        );
    }

    #[test]
    fn test_tentative_undo_without_transaction() {
        let mut doc = RopeDocument::from_text("ab");
        assert!(doc.tentative_undo().is_empty());
    }

    #[test]
    fn test_para_up_down() {
        let doc = RopeDocument::from_text("one\ntwo\n\nthree\nfour\n  \nfive");
        // line starts: one=0 two=4 ""=8 three=9 four=15 "  "=20 five=23
        assert_eq!(doc.para_up(17), 9);
        assert_eq!(doc.para_up(9), 0);
        assert_eq!(doc.para_up(5), 0);
        assert_eq!(doc.para_up(0), 0);
        assert_eq!(doc.para_up(25), 23);

        assert_eq!(doc.para_down(0), 9);
        assert_eq!(doc.para_down(10), 23);
        assert_eq!(doc.para_down(24), doc.len());
    }

    #[test]
    fn test_relative_position() {
        let doc = RopeDocument::from_text("aが😀b");
        assert_eq!(doc.relative_position(0, 2), Some(4));
        assert_eq!(doc.relative_position(4, -1), Some(1));
        assert_eq!(doc.relative_position(0, -1), None);
        assert_eq!(doc.relative_position(0, 5), None);
    }

    #[test]
    fn test_relative_position_utf16() {
        let doc = RopeDocument::from_text("aが😀b");
        // '😀' is two UTF-16 units
        assert_eq!(doc.relative_position_utf16(0, 2), Some(4));
        assert_eq!(doc.relative_position_utf16(4, 2), Some(8));
        assert_eq!(doc.relative_position_utf16(9, -3), Some(1));
        assert_eq!(doc.relative_position_utf16(9, -10), None);
        assert_eq!(doc.relative_position_utf16(9, 1), None);
    }

    #[test]
    fn test_line_queries() {
        let doc = RopeDocument::from_text("ab\r\ncd\nef");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_end(0), 2);
        assert_eq!(doc.line_start(1), 4);
        assert_eq!(doc.line_end(1), 6);
        assert_eq!(doc.line_end(2), 9);
        assert_eq!(doc.line_from_position(5), 1);
    }

    #[test]
    fn test_decorations_follow_edits() {
        let mut doc = RopeDocument::from_text("abcdef");
        doc.decoration_set_current_indicator(32);
        doc.decoration_fill_range(2, 1, 2);
        doc.insert_character(0, "xx", CharacterSource::DirectInput)
            .unwrap();
        assert_eq!(doc.indicator_runs(32)[0].range(), 4..6);

        // Filling is clamped to the document and merges with its neighbour
        doc.decoration_fill_range(6, 1, 100);
        assert_eq!(doc.indicator_runs(32).len(), 1);
        assert_eq!(doc.indicator_runs(32)[0].range(), 4..8);
    }
}
