//! Document edits that keep carets and notifications in sync.

use crate::coords::CoordinateMapper;
use crate::document::{CharacterSource, DocumentError, DocumentFacade, Modification};
use crate::notify::{ModificationKind, Notification};
use crate::selection::{SelectionPosition, SelectionRange};
use crate::util::char_type;

use super::Editor;

impl<D: DocumentFacade, M: CoordinateMapper> Editor<D, M> {
    /// Move carets over an applied modification and report it
    pub(super) fn after_modification(&mut self, modification: &Modification) {
        let (kind, position, length) = match modification {
            Modification::Inserted { position, text } => {
                self.selection.adjust_for_insert(*position, text.len());
                (ModificationKind::Insert, *position, text.len())
            }
            Modification::Deleted { position, text } => {
                self.selection.adjust_for_delete(*position, text.len());
                (ModificationKind::Delete, *position, text.len())
            }
        };

        let lines_added = modification.lines_added();
        let doc_len = self.doc.len();
        self.notify(Notification::Modified {
            kind,
            position,
            length,
            lines_added,
            text: modification.text().to_string(),
        });

        // Text appearing in (or vanishing from) an empty document adds or
        // removes the first line even without a newline
        let first_line = match kind {
            ModificationKind::Insert => doc_len == length,
            ModificationKind::Delete => doc_len == 0,
        };
        if lines_added != 0 {
            self.notify(Notification::LinesAdded { lines: lines_added });
        } else if first_line && length > 0 {
            let lines = if kind == ModificationKind::Insert { 1 } else { -1 };
            self.notify(Notification::LinesAdded { lines });
        }

        let line = self.doc.line_from_position(position);
        let style_from = self.doc.line_start(line);
        self.notify(Notification::StyleNeeded {
            position: style_from,
        });
    }

    pub(super) fn report_error(&mut self, error: &DocumentError) {
        tracing::debug!(target: "selection", %error, "edit refused");
        if *error == DocumentError::ReadOnly {
            self.notify(Notification::ModifyAttemptReadOnly);
        }
    }

    pub(super) fn insert_text_at(
        &mut self,
        position: usize,
        text: &str,
        source: CharacterSource,
    ) -> Result<Modification, DocumentError> {
        match self.doc.insert_character(position, text, source) {
            Ok(modification) => {
                self.after_modification(&modification);
                Ok(modification)
            }
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    pub(super) fn delete_text_at(
        &mut self,
        position: usize,
        len: usize,
    ) -> Result<Modification, DocumentError> {
        match self.doc.delete_range(position, len) {
            Ok(modification) => {
                self.after_modification(&modification);
                Ok(modification)
            }
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    /// Whether any selected range touches protected text
    pub(super) fn selection_contains_protected(&self) -> bool {
        self.selection.ranges().any(|r| {
            self.doc
                .range_contains_protected(r.start().position, r.end().position)
        })
    }

    /// Delete the text of every non-empty, unprotected range
    pub(super) fn clear_selected_text(&mut self) {
        for i in 0..self.selection.count() {
            let Some(range) = self.selection.get(i).copied() else {
                continue;
            };
            let (start, end) = (range.start().position, range.end().position);
            if range.is_empty() || self.doc.range_contains_protected(start, end) {
                continue;
            }
            if end > start && self.delete_text_at(start, end - start).is_err() {
                continue;
            }
            // Anchor and caret now meet at `start`; drop leftover virtual space
            let caret = range.start();
            self.selection.set_range(i, SelectionRange::collapsed(caret));
        }
    }

    /// Turn the virtual space of range `index` into real whitespace.
    ///
    /// At a line's indentation position the indentation is rewritten (with
    /// tabs when configured); elsewhere spaces are inserted.
    pub(super) fn realize_virtual_space(&mut self, index: usize) -> Result<(), DocumentError> {
        let Some(range) = self.selection.get(index).copied() else {
            return Ok(());
        };
        let caret = range.caret;
        if !caret.is_virtual() {
            return Ok(());
        }

        let line = self.doc.line_from_position(caret.position);
        let line_start = self.doc.line_start(line);
        let (indent_pos, indent_columns) = self.line_indentation(line);

        let new_position = if indent_pos == caret.position {
            let columns = indent_columns + caret.virtual_space;
            let indent = self.indentation_string(columns);
            if indent_pos > line_start {
                self.delete_text_at(line_start, indent_pos - line_start)?;
            }
            self.insert_text_at(line_start, &indent, CharacterSource::DirectInput)?;
            line_start + indent.len()
        } else {
            let spaces = " ".repeat(caret.virtual_space);
            self.insert_text_at(caret.position, &spaces, CharacterSource::DirectInput)?;
            caret.position + spaces.len()
        };

        self.selection.set_range(
            index,
            SelectionRange::collapsed(SelectionPosition::new(new_position)),
        );
        Ok(())
    }

    /// (byte offset after the leading whitespace, its width in columns)
    fn line_indentation(&self, line: usize) -> (usize, usize) {
        let start = self.doc.line_start(line);
        let text = self.doc.text_range(start..self.doc.line_end(line));
        let tab_width = self.config.tab_width.max(1);
        let mut columns = 0;
        let mut bytes = 0;
        for ch in text.chars() {
            match ch {
                ' ' => columns += 1,
                '\t' => columns = (columns / tab_width + 1) * tab_width,
                _ => break,
            }
            bytes += 1;
        }
        (start + bytes, columns)
    }

    pub(super) fn indentation_string(&self, columns: usize) -> String {
        let tab_width = self.config.tab_width.max(1);
        if self.config.use_tabs {
            let mut s = "\t".repeat(columns / tab_width);
            s.push_str(&" ".repeat(columns % tab_width));
            s
        } else {
            " ".repeat(columns)
        }
    }

    /// Insert typed `text` at every caret, replacing selected text.
    ///
    /// Tentative input reports no `CharAdded`; overstrike only applies to
    /// direct input.
    pub(super) fn insert_character(
        &mut self,
        text: &str,
        source: CharacterSource,
    ) -> Result<(), DocumentError> {
        let overstrike = self.overstrike && source == CharacterSource::DirectInput;
        self.insert_at_carets(text, source, overstrike)?;

        if source != CharacterSource::TentativeInput {
            for ch in text.chars() {
                self.notify(Notification::CharAdded { ch });
            }
        }
        Ok(())
    }

    /// Insert `text` at every caret. Ranges touching protected text are skipped.
    pub(super) fn insert_at_carets(
        &mut self,
        text: &str,
        source: CharacterSource,
        overstrike: bool,
    ) -> Result<(), DocumentError> {
        if text.is_empty() {
            return Ok(());
        }

        for i in 0..self.selection.count() {
            let Some(range) = self.selection.get(i).copied() else {
                continue;
            };
            if self
                .doc
                .range_contains_protected(range.start().position, range.end().position)
            {
                continue;
            }

            if !range.is_empty() {
                let (start, end) = (range.start().position, range.end().position);
                if end > start {
                    self.delete_text_at(start, end - start)?;
                }
                self.selection
                    .set_range(i, SelectionRange::collapsed(range.start()));
            }
            self.realize_virtual_space(i)?;

            let Some(position) = self.selection.get(i).map(|r| r.caret.position) else {
                continue;
            };

            if overstrike && range.is_empty() {
                self.overstrike_next_char(position)?;
            }

            let inserted = self.insert_text_at(position, text, source)?;
            let after = SelectionPosition::new(position + inserted.len());
            self.selection.set_range(i, SelectionRange::collapsed(after));
        }
        Ok(())
    }

    /// Text of all non-empty ranges in document order, one per line
    pub(super) fn selected_text(&self) -> String {
        let mut spans: Vec<(usize, usize)> = self
            .selection
            .ranges()
            .filter(|r| !r.is_empty())
            .map(|r| (r.start().position, r.end().position))
            .collect();
        spans.sort_unstable();
        spans
            .into_iter()
            .map(|(start, end)| self.doc.text_range(start..end))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Overstrike: remove the character after `position` unless it ends the line
    fn overstrike_next_char(&mut self, position: usize) -> Result<(), DocumentError> {
        let line = self.doc.line_from_position(position);
        if position >= self.doc.line_end(line) {
            return Ok(());
        }
        if let Some(next) = self.doc.relative_position(position, 1) {
            self.delete_text_at(position, next - position)?;
        }
        Ok(())
    }

    /// Apply the result of a tentative undo
    pub(super) fn apply_undo(&mut self, modifications: Vec<Modification>) {
        for modification in &modifications {
            self.after_modification(modification);
        }
    }

    // === Word and line geometry ===

    fn char_at(&self, position: usize) -> Option<char> {
        let next = self.doc.relative_position(position, 1)?;
        self.doc.text_range(position..next).chars().next()
    }

    fn char_before(&self, position: usize) -> Option<char> {
        let prev = self.doc.relative_position(position, -1)?;
        self.doc.text_range(prev..position).chars().next()
    }

    /// Start of the word before `position` (whitespace skipped first)
    pub(super) fn word_start_before(&self, position: usize) -> usize {
        let step_back = |pos: usize| self.doc.relative_position(pos, -1).unwrap_or(0);
        let mut pos = position;
        while matches!(self.char_before(pos), Some(' ' | '\t')) {
            pos = step_back(pos);
        }
        match self.char_before(pos) {
            None => pos,
            Some('\n' | '\r') if pos == position => {
                // Crossing a line break is a word step of its own
                let mut pos = step_back(pos);
                if self.char_before(pos) == Some('\r') && self.char_at(pos) == Some('\n') {
                    pos = step_back(pos);
                }
                pos
            }
            Some('\n' | '\r') => pos,
            Some(first) => {
                let kind = char_type(first);
                while self
                    .char_before(pos)
                    .is_some_and(|c| c != '\n' && c != '\r' && char_type(c) == kind)
                {
                    pos = step_back(pos);
                }
                pos
            }
        }
    }

    /// End of the word after `position` (trailing whitespace skipped)
    pub(super) fn word_end_after(&self, position: usize) -> usize {
        let mut pos = position;
        let Some(first) = self.char_at(pos) else {
            return pos;
        };
        if first == '\n' || first == '\r' {
            return self.doc.relative_position(pos, 1).unwrap_or(pos);
        }
        let kind = char_type(first);
        while let Some(ch) = self.char_at(pos) {
            if char_type(ch) != kind || ch == '\n' || ch == '\r' {
                break;
            }
            pos = self.doc.relative_position(pos, 1).unwrap_or(pos);
        }
        while let Some(ch) = self.char_at(pos) {
            if ch != ' ' && ch != '\t' {
                break;
            }
            pos = self.doc.relative_position(pos, 1).unwrap_or(pos);
        }
        pos
    }

    /// The run of same-class characters around `position`, as (start, end)
    pub(super) fn word_range_at(&self, position: usize) -> (usize, usize) {
        let probe = match self.char_at(position) {
            Some(ch) if ch != '\n' && ch != '\r' => Some(ch),
            _ => self.char_before(position),
        };
        let Some(probe) = probe.filter(|c| *c != '\n' && *c != '\r') else {
            return (position, position);
        };
        let kind = char_type(probe);
        let same = |c: Option<char>| c.is_some_and(|c| c != '\n' && c != '\r' && char_type(c) == kind);

        let mut start = position;
        while same(self.char_before(start)) {
            start = self.doc.relative_position(start, -1).unwrap_or(0);
        }
        let mut end = position;
        while same(self.char_at(end)) {
            end = self.doc.relative_position(end, 1).unwrap_or(end);
        }
        (start, end)
    }

    /// Line `line` including its terminator, as (start, end)
    pub(super) fn line_range(&self, line: usize) -> (usize, usize) {
        let start = self.doc.line_start(line);
        let end = if line + 1 < self.doc.line_count() {
            self.doc.line_start(line + 1)
        } else {
            self.doc.len()
        };
        (start, end)
    }
}
