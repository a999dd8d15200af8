//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::ops::Range;

use preedit::config::{InputConfig, Platform};
use preedit::coords::{GridMapper, Point};
use preedit::document::{
    CharacterSource, DocumentError, DocumentFacade, IndicatorRun, Modification, RopeDocument,
};
use preedit::editor::Editor;
use preedit::gesture::{PointerButton, PointerEvent, Timestamp, TouchEvent, TouchPhase};
use preedit::input::{KeyEvent, KeyMods, NamedKey};
use preedit::notify::Notification;
use preedit::surface::EditorSurface;

/// Editor on `text` with the caret at byte `caret`, X11 profile
pub fn test_editor(text: &str, caret: usize) -> Editor {
    test_editor_on(Platform::X11, text, caret)
}

pub fn test_editor_on(platform: Platform, text: &str, caret: usize) -> Editor {
    test_editor_with(InputConfig::for_platform(platform), text, caret)
}

pub fn test_editor_with(config: InputConfig, text: &str, caret: usize) -> Editor {
    let mut editor = Editor::with_document(RopeDocument::from_text(text), config);
    editor.set_selection(caret, caret);
    editor.take_notifications();
    editor
}

/// Editor over a [`RecordingDocument`]
pub fn recording_editor(text: &str, caret: usize) -> Editor<RecordingDocument> {
    let doc = RecordingDocument::new(RopeDocument::from_text(text));
    let mut editor = Editor::with_document(doc, InputConfig::for_platform(Platform::X11));
    editor.set_selection(caret, caret);
    editor.take_notifications();
    editor
}

/// (anchor, caret) of every range, primary first
pub fn ranges<D: DocumentFacade>(editor: &Editor<D>) -> Vec<(usize, usize)> {
    editor
        .selection()
        .ranges()
        .map(|r| (r.anchor.position, r.caret.position))
        .collect()
}

pub fn typed(ch: char) -> KeyEvent {
    KeyEvent::character(ch, KeyMods::NONE)
}

pub fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::character(ch, KeyMods::CTRL)
}

pub fn named(key: NamedKey) -> KeyEvent {
    KeyEvent::named(key, KeyMods::NONE)
}

pub fn named_with(key: NamedKey, modifiers: KeyMods) -> KeyEvent {
    KeyEvent::named(key, modifiers)
}

pub fn type_text<D: DocumentFacade>(editor: &mut Editor<D>, text: &str) {
    for ch in text.chars() {
        editor.on_key(&typed(ch));
    }
}

/// Centre of the grid cell at (line, column) for the default layout
pub fn cell(line: usize, column: usize) -> Point {
    GridMapper::default().cell_center(line, column)
}

/// Left edge of the grid cell at (line, column): hits the boundary before it
pub fn boundary(line: usize, column: usize) -> Point {
    let grid = GridMapper::default();
    Point::new(
        column as f64 * grid.char_width,
        (line as f64 + 0.5) * grid.line_height,
    )
}

pub fn click<D: DocumentFacade>(editor: &mut Editor<D>, point: Point, time: u64) {
    click_with(editor, point, time, KeyMods::NONE);
}

pub fn click_with<D: DocumentFacade>(
    editor: &mut Editor<D>,
    point: Point,
    time: u64,
    modifiers: KeyMods,
) {
    editor.on_pointer(
        &PointerEvent::down(PointerButton::Left, point, Timestamp(time)).with_modifiers(modifiers),
    );
    editor.on_pointer(
        &PointerEvent::up(PointerButton::Left, point, Timestamp(time + 10)).with_modifiers(modifiers),
    );
}

pub fn touch<D: DocumentFacade>(editor: &mut Editor<D>, phase: TouchPhase, point: Point, time: u64) {
    editor.on_touch(&TouchEvent::new(phase, point, Timestamp(time)));
}

pub fn has_note<D: DocumentFacade>(editor: &mut Editor<D>, wanted: &Notification) -> bool {
    editor.take_notifications().contains(wanted)
}

/// One `insert_character` call seen by [`RecordingDocument`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertCall {
    pub position: usize,
    pub text: String,
    pub source: CharacterSource,
}

/// A [`RopeDocument`] that records every `insert_character` call
#[derive(Debug, Default)]
pub struct RecordingDocument {
    inner: RopeDocument,
    pub inserts: Vec<InsertCall>,
    pub tentative_starts: usize,
    pub tentative_undos: usize,
}

impl RecordingDocument {
    pub fn new(inner: RopeDocument) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Inserts made with `source`
    pub fn inserts_from(&self, source: CharacterSource) -> Vec<&InsertCall> {
        self.inserts.iter().filter(|c| c.source == source).collect()
    }
}

impl DocumentFacade for RecordingDocument {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn text_range(&self, range: Range<usize>) -> String {
        self.inner.text_range(range)
    }

    fn insert_character(
        &mut self,
        position: usize,
        text: &str,
        source: CharacterSource,
    ) -> Result<Modification, DocumentError> {
        self.inserts.push(InsertCall {
            position,
            text: text.to_string(),
            source,
        });
        self.inner.insert_character(position, text, source)
    }

    fn delete_range(&mut self, position: usize, len: usize) -> Result<Modification, DocumentError> {
        self.inner.delete_range(position, len)
    }

    fn tentative_start(&mut self) {
        self.tentative_starts += 1;
        self.inner.tentative_start();
    }

    fn tentative_undo(&mut self) -> Vec<Modification> {
        self.tentative_undos += 1;
        self.inner.tentative_undo()
    }

    fn tentative_active(&self) -> bool {
        self.inner.tentative_active()
    }

    fn decoration_set_current_indicator(&mut self, indicator: usize) {
        self.inner.decoration_set_current_indicator(indicator);
    }

    fn decoration_fill_range(&mut self, position: usize, value: i32, len: usize) {
        self.inner.decoration_fill_range(position, value, len);
    }

    fn indicator_runs(&self, indicator: usize) -> Vec<IndicatorRun> {
        self.inner.indicator_runs(indicator)
    }

    fn para_up(&self, position: usize) -> usize {
        self.inner.para_up(position)
    }

    fn para_down(&self, position: usize) -> usize {
        self.inner.para_down(position)
    }

    fn relative_position(&self, position: usize, chars: isize) -> Option<usize> {
        self.inner.relative_position(position, chars)
    }

    fn relative_position_utf16(&self, position: usize, units: isize) -> Option<usize> {
        self.inner.relative_position_utf16(position, units)
    }

    fn line_from_position(&self, position: usize) -> usize {
        self.inner.line_from_position(position)
    }

    fn line_start(&self, line: usize) -> usize {
        self.inner.line_start(line)
    }

    fn line_end(&self, line: usize) -> usize {
        self.inner.line_end(line)
    }

    fn line_count(&self) -> usize {
        self.inner.line_count()
    }

    fn is_read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.inner.set_read_only(read_only);
    }

    fn range_contains_protected(&self, start: usize, end: usize) -> bool {
        self.inner.range_contains_protected(start, end)
    }
}
