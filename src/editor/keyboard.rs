//! Key handling: engine key commands first, then typed text.

use crate::clipboard::ClipboardKind;
use crate::coords::{CoordinateMapper, Point};
use crate::document::{CharacterSource, DocumentFacade};
use crate::input::{insertable_text, normalize, EngineKey, KeyEvent, KeyMods, NormalizedKey};
use crate::notify::Notification;
use crate::selection::{SelectionPosition, SelectionRange};
use crate::surface::EventResult;

use super::Editor;

const ZOOM_MIN: i32 = -10;
const ZOOM_MAX: i32 = 20;

/// Where a caret movement goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    CharLeft,
    CharRight,
    WordLeft,
    WordRight,
    LineUp,
    LineDown,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    PageUp,
    PageDown,
}

/// An editing command bound to an engine key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Move { motion: Motion, extend: bool },
    DeleteBack { word: bool },
    DeleteForward { word: bool },
    NewLine,
    Tab,
    /// Cancel the composition, else drop secondary ranges
    Cancel,
    ToggleOverstrike,
    ZoomIn,
    ZoomOut,
    SelectAll,
    Copy,
    Cut,
    Paste,
}

impl KeyCommand {
    /// The command for `key`, or `None` when the key should type text or bubble
    pub fn from_key(key: EngineKey, mods: KeyMods) -> Option<Self> {
        let ctrl = mods.ctrl();
        let extend = mods.shift();
        let motion = |motion| Some(KeyCommand::Move { motion, extend });

        match key {
            EngineKey::Left if ctrl => motion(Motion::WordLeft),
            EngineKey::Left => motion(Motion::CharLeft),
            EngineKey::Right if ctrl => motion(Motion::WordRight),
            EngineKey::Right => motion(Motion::CharRight),
            EngineKey::Up => motion(Motion::LineUp),
            EngineKey::Down => motion(Motion::LineDown),
            EngineKey::Home if ctrl => motion(Motion::DocumentStart),
            EngineKey::Home => motion(Motion::LineStart),
            EngineKey::End if ctrl => motion(Motion::DocumentEnd),
            EngineKey::End => motion(Motion::LineEnd),
            EngineKey::PageUp => motion(Motion::PageUp),
            EngineKey::PageDown => motion(Motion::PageDown),
            EngineKey::Backspace => Some(KeyCommand::DeleteBack { word: ctrl }),
            EngineKey::Delete => Some(KeyCommand::DeleteForward { word: ctrl }),
            EngineKey::Return => Some(KeyCommand::NewLine),
            EngineKey::Tab if !ctrl && !mods.shift() => Some(KeyCommand::Tab),
            EngineKey::Escape => Some(KeyCommand::Cancel),
            EngineKey::Insert if mods.is_empty() => Some(KeyCommand::ToggleOverstrike),
            EngineKey::Add if ctrl => Some(KeyCommand::ZoomIn),
            EngineKey::Subtract if ctrl => Some(KeyCommand::ZoomOut),
            EngineKey::Char(ch) if ctrl && !mods.alt() => match ch {
                'A' => Some(KeyCommand::SelectAll),
                'C' => Some(KeyCommand::Copy),
                'X' => Some(KeyCommand::Cut),
                'V' => Some(KeyCommand::Paste),
                _ => None,
            },
            _ => None,
        }
    }
}

impl<D: DocumentFacade, M: CoordinateMapper> Editor<D, M> {
    pub(super) fn handle_key(&mut self, event: &KeyEvent) -> EventResult {
        let (key, mods) = match normalize(event) {
            NormalizedKey::Forward => {
                tracing::trace!(target: "keys", key = ?event.key, "forwarded to host");
                return EventResult::Bubble;
            }
            NormalizedKey::Engine { key, mods } => (key, mods),
        };
        if key == EngineKey::None {
            return EventResult::Bubble;
        }

        let command = KeyCommand::from_key(key, mods);
        tracing::trace!(target: "keys", ?key, %mods, ?command, "key");

        let before = self.selection.clone();
        if !self.composition.is_idle() {
            if command == Some(KeyCommand::Cancel) {
                self.cancel_composition();
                self.selection_updated(&before);
                return EventResult::consumed_redraw();
            }
            self.finalize_composition();
        }

        let result = match command {
            Some(command) => self.run_command(command),
            None => self.type_text(event),
        };
        self.selection_updated(&before);
        result
    }

    fn type_text(&mut self, event: &KeyEvent) -> EventResult {
        let alt_composes = self.config.platform.alt_composes_characters();
        let Some(text) = insertable_text(event, alt_composes) else {
            return EventResult::Bubble;
        };
        match self.insert_character(text, CharacterSource::DirectInput) {
            Ok(()) => EventResult::consumed_redraw(),
            Err(_) => EventResult::consumed_no_redraw(),
        }
    }

    pub(super) fn run_command(&mut self, command: KeyCommand) -> EventResult {
        match command {
            KeyCommand::Move { motion, extend } => self.move_carets(motion, extend),
            KeyCommand::DeleteBack { word } => self.delete_back(word),
            KeyCommand::DeleteForward { word } => self.delete_forward(word),
            KeyCommand::NewLine => {
                if self
                    .insert_at_carets("\n", CharacterSource::DirectInput, false)
                    .is_ok()
                {
                    self.notify(Notification::CharAdded { ch: '\n' });
                }
            }
            KeyCommand::Tab => {
                let indent = self.tab_text();
                if let Err(e) = self.insert_at_carets(&indent, CharacterSource::DirectInput, false) {
                    tracing::debug!(target: "keys", %e, "tab not inserted");
                }
            }
            KeyCommand::Cancel => {
                if self.selection.count() == 1 && !self.selection.has_non_empty() {
                    return EventResult::Bubble;
                }
                self.selection.collapse_to_primary();
                self.selection.primary_mut().collapse();
            }
            KeyCommand::ToggleOverstrike => {
                self.overstrike = !self.overstrike;
                tracing::debug!(target: "keys", overstrike = self.overstrike, "overstrike toggled");
            }
            KeyCommand::ZoomIn => self.set_zoom(self.zoom + 1),
            KeyCommand::ZoomOut => self.set_zoom(self.zoom - 1),
            KeyCommand::SelectAll => {
                let len = self.doc.len();
                self.selection.set_selection(0, len);
            }
            KeyCommand::Copy => self.copy_selection(ClipboardKind::Standard),
            KeyCommand::Cut => {
                self.copy_selection(ClipboardKind::Standard);
                if self.doc.is_read_only() {
                    self.notify(Notification::ModifyAttemptReadOnly);
                } else {
                    self.clear_selected_text();
                }
            }
            KeyCommand::Paste => self.paste(ClipboardKind::Standard),
        }
        EventResult::consumed_redraw()
    }

    pub(super) fn set_zoom(&mut self, level: i32) {
        let level = level.clamp(ZOOM_MIN, ZOOM_MAX);
        if level != self.zoom {
            self.zoom = level;
            self.notify(Notification::Zoom { level });
        }
    }

    pub(super) fn copy_selection(&mut self, kind: ClipboardKind) {
        if !self.selection.has_non_empty() {
            return;
        }
        let text = self.selected_text();
        self.clipboard.set_text(kind, &text);
    }

    pub(super) fn paste(&mut self, kind: ClipboardKind) {
        let Some(text) = self.clipboard.get_text(kind) else {
            return;
        };
        if let Err(e) = self.insert_at_carets(&text, CharacterSource::DirectInput, false) {
            tracing::debug!(target: "keys", %e, ?kind, "paste refused");
        }
    }

    /// A tab, or spaces up to the next tab stop of the primary caret
    fn tab_text(&self) -> String {
        if self.config.use_tabs {
            return "\t".to_string();
        }
        let tab_width = self.config.tab_width.max(1);
        let caret = self.selection.primary().caret;
        let line_start = self.doc.line_start(self.doc.line_from_position(caret.position));
        let column = self.doc.text_range(line_start..caret.position).chars().count()
            + caret.virtual_space;
        " ".repeat(tab_width - column % tab_width)
    }

    fn move_carets(&mut self, motion: Motion, extend: bool) {
        let ranges: Vec<SelectionRange> = self.selection.ranges().copied().collect();
        for (i, range) in ranges.into_iter().enumerate() {
            // A plain left/right collapses a selection onto its edge
            if !extend && !range.is_empty() {
                match motion {
                    Motion::CharLeft => {
                        self.selection
                            .set_range(i, SelectionRange::collapsed(range.start()));
                        continue;
                    }
                    Motion::CharRight => {
                        self.selection.set_range(i, SelectionRange::collapsed(range.end()));
                        continue;
                    }
                    _ => {}
                }
            }

            let target = SelectionPosition::new(self.motion_target(motion, range.caret.position));
            let moved = if extend {
                SelectionRange::new(range.anchor, target)
            } else {
                SelectionRange::collapsed(target)
            };
            self.selection.set_range(i, moved);
        }
        self.selection.normalize();
    }

    fn motion_target(&self, motion: Motion, position: usize) -> usize {
        let line = self.doc.line_from_position(position);
        match motion {
            Motion::CharLeft => self.doc.relative_position(position, -1).unwrap_or(0),
            Motion::CharRight => self.doc.relative_position(position, 1).unwrap_or(position),
            Motion::WordLeft => self.word_start_before(position),
            Motion::WordRight => self.word_end_after(position),
            Motion::LineUp => self.vertical_target(position, -1),
            Motion::LineDown => self.vertical_target(position, 1),
            Motion::LineStart => self.doc.line_start(line),
            Motion::LineEnd => self.doc.line_end(line),
            Motion::DocumentStart => 0,
            Motion::DocumentEnd => self.doc.len(),
            Motion::PageUp => self.vertical_target(position, -(self.mapper.lines_on_screen() as isize)),
            Motion::PageDown => self.vertical_target(position, self.mapper.lines_on_screen() as isize),
        }
    }

    /// Same x, `lines` lines away, clamped to the first and last line
    fn vertical_target(&self, position: usize, lines: isize) -> usize {
        let line = self.doc.line_from_position(position) as isize;
        let last = self.doc.line_count().saturating_sub(1) as isize;
        let target_line = (line + lines).clamp(0, last);
        if target_line == line {
            return position;
        }
        let here = self.mapper.location_from_position(&self.doc, position);
        let line_height = self.mapper.line_height();
        let point = Point::new(
            here.x,
            here.y + (target_line - line) as f64 * line_height + line_height / 2.0,
        );
        self.mapper.position_from_location(&self.doc, point)
    }

    fn delete_back(&mut self, word: bool) {
        if self.doc.is_read_only() {
            self.notify(Notification::ModifyAttemptReadOnly);
            return;
        }
        if self.selection.has_non_empty() {
            self.clear_selected_text();
            return;
        }

        for i in 0..self.selection.count() {
            let Some(caret) = self.selection.get(i).map(|r| r.caret) else {
                continue;
            };
            if caret.virtual_space > 0 {
                let shrunk = SelectionPosition::with_virtual_space(caret.position, caret.virtual_space - 1);
                self.selection.set_range(i, SelectionRange::collapsed(shrunk));
                continue;
            }

            let position = caret.position;
            let from = if word {
                self.word_start_before(position)
            } else {
                match self.doc.relative_position(position, -1) {
                    Some(from) => self.crlf_start(from),
                    None => continue,
                }
            };
            if from >= position || self.doc.range_contains_protected(from, position) {
                continue;
            }
            if self.delete_text_at(from, position - from).is_ok() {
                self.selection
                    .set_range(i, SelectionRange::collapsed(SelectionPosition::new(from)));
            }
        }
        self.selection.normalize();
    }

    fn delete_forward(&mut self, word: bool) {
        if self.doc.is_read_only() {
            self.notify(Notification::ModifyAttemptReadOnly);
            return;
        }
        if self.selection.has_non_empty() {
            self.clear_selected_text();
            return;
        }

        for i in 0..self.selection.count() {
            let Some(position) = self.selection.get(i).map(|r| r.caret.position) else {
                continue;
            };
            let to = if word {
                self.word_end_after(position)
            } else {
                match self.doc.relative_position(position, 1) {
                    Some(to) => self.crlf_end(position, to),
                    None => continue,
                }
            };
            if to <= position || self.doc.range_contains_protected(position, to) {
                continue;
            }
            if self.delete_text_at(position, to - position).is_ok() {
                self.selection
                    .set_range(i, SelectionRange::collapsed(SelectionPosition::new(position)));
            }
        }
        self.selection.normalize();
    }

    /// Step back over the `\r` of a CRLF pair ending at `from + 1`
    fn crlf_start(&self, from: usize) -> usize {
        if from > 0 && self.doc.text_range(from - 1..from + 1) == "\r\n" {
            from - 1
        } else {
            from
        }
    }

    fn crlf_end(&self, position: usize, to: usize) -> usize {
        if self.doc.text_range(position..to) == "\r" && self.doc.text_range(to..(to + 1).min(self.doc.len())) == "\n" {
            to + 1
        } else {
            to
        }
    }
}
