//! The input-method composition state machine.
//!
//! Idle → Composing on the first non-empty preedit. Each further preedit
//! first undoes the previous tentative text, then inserts the whole new
//! preedit (replace, never append). A commit undoes the tentative text and
//! inserts the final string as direct input. An event with neither preedit
//! nor commit text cancels.

use crate::coords::CoordinateMapper;
use crate::document::{CharacterSource, DocumentFacade};
use crate::ime::{is_hangul, is_valid_indicator, map_ime_indicators, CompositionEvent, IndicatorKind};
use crate::surface::EventResult;
use crate::util::utf16::code_points;

use super::Editor;

impl<D: DocumentFacade, M: CoordinateMapper> Editor<D, M> {
    pub(super) fn handle_composition(&mut self, event: &CompositionEvent) -> EventResult {
        if self.doc.is_read_only() || self.selection_contains_protected() {
            if self.composition.is_idle() {
                tracing::debug!(target: "ime", "composition ignored: document is read-only or protected");
                return EventResult::consumed_no_redraw();
            }
            let before = self.selection.clone();
            self.cancel_composition();
            self.selection_updated(&before);
            return EventResult::consumed_redraw();
        }

        let before = self.selection.clone();
        self.apply_ime_selection(event);

        if self.doc.tentative_active() {
            let undone = self.doc.tentative_undo();
            self.apply_undo(undone);
        }
        self.composition.block_caret_override = false;

        if event.is_empty() {
            if !self.composition.is_idle() {
                tracing::debug!(target: "ime", "composition cancelled by empty event");
            }
            self.composition.reset();
            self.selection_updated(&before);
            return EventResult::consumed_redraw();
        }

        if !event.commit.is_empty() {
            self.commit_text(&event.commit);
        }
        if !event.preedit.is_empty() {
            let initial = self.composition.is_idle();
            self.show_preedit(event, initial);
        }

        self.selection_updated(&before);
        EventResult::consumed_redraw()
    }

    /// Apply `Selection` attributes: UTF-16 offsets from the paragraph start
    fn apply_ime_selection(&mut self, event: &CompositionEvent) {
        for (start, length) in event.selections() {
            let para = self.doc.para_up(self.current_position());
            let len = self.doc.len();
            let a = self
                .doc
                .relative_position_utf16(para, start as isize)
                .unwrap_or(len);
            let b = self
                .doc
                .relative_position_utf16(a, length)
                .unwrap_or(if length < 0 { 0 } else { len });
            tracing::debug!(target: "ime", start, length, a, b, "selection attribute");
            self.selection.set_selection_normalized(a, b);
        }
    }

    /// Insert `text` as direct input, one code point at a time
    fn commit_text(&mut self, text: &str) {
        self.composition.begin_commit();
        for cp in code_points(text) {
            let mut buf = [0u8; 4];
            if let Err(e) = self.insert_character(cp.ch.encode_utf8(&mut buf), CharacterSource::DirectInput) {
                tracing::debug!(target: "ime", %e, "commit insertion failed");
                break;
            }
        }
        tracing::debug!(target: "ime", text, "composition committed");
        self.composition.reset();
    }

    fn show_preedit(&mut self, event: &CompositionEvent, initial: bool) {
        let units = event.preedit_utf16();
        if initial {
            self.clear_before_tentative_start();
        }
        self.doc.tentative_start();

        let start = self.current_position();
        self.composition.begin_preedit(start, units.clone());
        let kinds = map_ime_indicators(event, self.config.platform.dark_underline_is_target());

        for cp in code_points(&event.preedit) {
            let mut buf = [0u8; 4];
            let one_char = cp.ch.encode_utf8(&mut buf);
            if let Err(e) = self.insert_character(one_char, CharacterSource::TentativeInput) {
                tracing::debug!(target: "ime", %e, "preedit insertion failed, cancelling composition");
                self.cancel_composition();
                return;
            }
            let kind = kinds.get(cp.index).copied().unwrap_or(IndicatorKind::Unknown);
            self.draw_ime_indicator(kind, one_char.len());
        }

        // The IME caret is a UTF-16 offset into the preedit, never past its end
        let ime_caret = event.cursor_position().min(units.len());
        let end_to_caret = ime_caret as isize - units.len() as isize;
        let current = self.current_position();
        let target = self
            .doc
            .relative_position_utf16(current, end_to_caret)
            .unwrap_or(current);
        self.move_ime_carets(target as isize - current as isize);

        if event.preedit.chars().next().is_some_and(is_hangul) {
            if self.config.hangul_step_back() && ime_caret > 0 {
                let current = self.current_position();
                if let Some(before) = self.doc.relative_position(current, -1) {
                    self.move_ime_carets(before as isize - current as isize);
                }
            }
            self.composition.block_caret_override = true;
        }

        self.composition.preedit_position = Some(self.current_position());
        tracing::debug!(
            target: "ime",
            preedit = %event.preedit,
            caret = self.current_position(),
            "preedit shown"
        );
    }

    /// Remove selected text and realize virtual space before the first preedit
    fn clear_before_tentative_start(&mut self) {
        self.clear_selected_text();
        for i in 0..self.selection.count() {
            if let Err(e) = self.realize_virtual_space(i) {
                tracing::debug!(target: "ime", %e, "could not realize virtual space");
            }
        }
    }

    /// Paint the `len` bytes before every caret with the indicator for `kind`
    fn draw_ime_indicator(&mut self, kind: IndicatorKind, len: usize) {
        let id = kind.id();
        if !is_valid_indicator(id) {
            return;
        }
        self.doc.decoration_set_current_indicator(id);
        let starts: Vec<usize> = self.selection.ranges().map(|r| r.start().position).collect();
        for position in starts {
            let from = position.saturating_sub(len);
            self.doc.decoration_fill_range(from, 1, len);
            self.composition.push_indicator(from, kind);
        }
    }

    fn move_ime_carets(&mut self, offset: isize) {
        if offset != 0 {
            let len = self.doc.len();
            self.selection.move_all_carets_by(offset, len);
        }
    }

    /// Roll back the tentative text and return to idle. Nothing is inserted.
    pub fn cancel_composition(&mut self) {
        if self.doc.tentative_active() {
            let undone = self.doc.tentative_undo();
            self.apply_undo(undone);
        }
        if !self.composition.is_idle() {
            tracing::debug!(target: "ime", "composition cancelled");
        }
        self.composition.reset();
    }

    /// Commit the current preedit as typed text (focus loss, pointer press,
    /// navigation keys while composing).
    pub fn finalize_composition(&mut self) {
        if self.composition.is_idle() {
            return;
        }
        let before = self.selection.clone();
        let preedit = self.composition.preedit_text();
        if self.doc.tentative_active() {
            let undone = self.doc.tentative_undo();
            self.apply_undo(undone);
        }
        self.composition.reset();

        if !preedit.is_empty() && !self.doc.is_read_only() {
            self.commit_text(&preedit);
        }
        self.selection_updated(&before);
    }
}
