//! The editor core: owns the document, the selection, the composition and
//! gesture state, and implements [`EditorSurface`] on top of them.
//!
//! Event handling is split by concern:
//! - [`edit`]: document edits that keep carets and notifications in sync
//! - [`keyboard`]: key normalization, engine key commands, typed text
//! - [`composition`]: the input-method state machine
//! - [`pointer`]: mouse, touch and the long-press timer
//! - [`query`]: input-method queries and paint state

mod composition;
mod edit;
mod keyboard;
mod pointer;
mod query;

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::InputConfig;
use crate::coords::{CoordinateMapper, GridMapper};
use crate::document::{DocumentFacade, RopeDocument};
use crate::gesture::{
    ClickTracker, LongPressTimer, PointerEvent, PointerState, Timestamp, TouchEvent, WheelEvent,
};
use crate::ime::{CompositionEvent, CompositionState};
use crate::input::KeyEvent;
use crate::notify::Notification;
use crate::selection::{SelectionRange, SelectionSet};
use crate::surface::{EditorSurface, EventResult, ImeQuery, ImeQueryValue, PaintState, HINT_MULTI_LINE};

/// Editor input core over a document `D` laid out by `M`.
pub struct Editor<D: DocumentFacade = RopeDocument, M: CoordinateMapper = GridMapper> {
    doc: D,
    mapper: M,
    selection: SelectionSet,
    composition: CompositionState,
    pointer: PointerState,
    clicks: ClickTracker,
    long_press: LongPressTimer,
    config: InputConfig,
    clipboard: Box<dyn Clipboard>,
    notifications: Vec<Notification>,
    has_focus: bool,
    overstrike: bool,
    zoom: i32,
    input_hints: u32,
}

impl<D: DocumentFacade, M: CoordinateMapper> Editor<D, M> {
    /// Editor with an in-memory clipboard
    pub fn new(doc: D, mapper: M, config: InputConfig) -> Self {
        Self::with_clipboard(doc, mapper, config, Box::new(MemoryClipboard::new()))
    }

    pub fn with_clipboard(
        doc: D,
        mapper: M,
        config: InputConfig,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        Self {
            doc,
            mapper,
            selection: SelectionSet::new(),
            composition: CompositionState::new(),
            pointer: PointerState::default(),
            clicks: ClickTracker::default(),
            long_press: LongPressTimer::default(),
            config,
            clipboard,
            notifications: Vec::new(),
            has_focus: false,
            overstrike: false,
            zoom: 0,
            input_hints: HINT_MULTI_LINE,
        }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut M {
        &mut self.mapper
    }

    pub fn text(&self) -> String {
        self.doc.text()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn composition(&self) -> &CompositionState {
        &self.composition
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn overstrike(&self) -> bool {
        self.overstrike
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    pub fn set_input_hints(&mut self, hints: u32) {
        self.input_hints = hints;
    }

    /// Primary caret position
    pub fn current_position(&self) -> usize {
        self.selection.primary().caret.position
    }

    /// Programmatic selection change. Cancels any composition first.
    pub fn set_selection(&mut self, anchor: usize, caret: usize) {
        if !self.composition.is_idle() {
            self.cancel_composition();
        }
        let len = self.doc.len();
        let before = self.selection.clone();
        self.selection.set_selection(anchor.min(len), caret.min(len));
        self.selection_updated(&before);
    }

    /// Add a secondary range that becomes the primary.
    pub fn add_selection(&mut self, anchor: usize, caret: usize) {
        if !self.composition.is_idle() {
            self.cancel_composition();
        }
        let len = self.doc.len();
        let before = self.selection.clone();
        self.selection
            .add_range(SelectionRange::from_offsets(anchor.min(len), caret.min(len)));
        self.selection.normalize();
        self.selection_updated(&before);
    }

    /// Toggle read-only. Cancels any composition and pending long press.
    pub fn set_read_only(&mut self, read_only: bool) {
        if !self.composition.is_idle() {
            self.cancel_composition();
        }
        self.long_press.cancel();
        self.doc.set_read_only(read_only);
        tracing::debug!(target: "selection", read_only, "read-only changed");
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Pending notifications, oldest first
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        tracing::trace!(target: "message", ?notification, "notify");
        self.notifications.push(notification);
    }

    /// Emit selection notifications when the selection differs from `before`
    pub(crate) fn selection_updated(&mut self, before: &SelectionSet) {
        if &self.selection == before {
            return;
        }
        self.notify(Notification::SelectionChanged);
        if self.selection.primary().caret != before.primary().caret {
            self.notify(Notification::CursorPositionChanged);
        }
    }

    fn set_focus(&mut self, focused: bool) -> EventResult {
        if self.has_focus == focused {
            return EventResult::consumed_no_redraw();
        }
        if !focused {
            self.long_press.cancel();
            self.pointer.release();
            if !self.composition.is_idle() {
                self.finalize_composition();
            }
        }
        self.has_focus = focused;
        self.notify(Notification::FocusChanged { focused });
        EventResult::consumed_redraw()
    }
}

impl<D: DocumentFacade> Editor<D, GridMapper> {
    /// Editor with a default monospace layout
    pub fn with_document(doc: D, config: InputConfig) -> Self {
        Self::new(doc, GridMapper::default(), config)
    }
}

impl<D: DocumentFacade, M: CoordinateMapper> EditorSurface for Editor<D, M> {
    fn on_key(&mut self, event: &KeyEvent) -> EventResult {
        self.handle_key(event)
    }

    fn on_pointer(&mut self, event: &PointerEvent) -> EventResult {
        self.handle_pointer(event)
    }

    fn on_touch(&mut self, event: &TouchEvent) -> EventResult {
        self.handle_touch(event)
    }

    fn on_composition(&mut self, event: &CompositionEvent) -> EventResult {
        self.handle_composition(event)
    }

    fn on_wheel(&mut self, event: &WheelEvent) -> EventResult {
        self.handle_wheel(event)
    }

    fn on_focus(&mut self, focused: bool) -> EventResult {
        self.set_focus(focused)
    }

    fn on_timer(&mut self, now: Timestamp) -> EventResult {
        self.handle_timer(now)
    }

    fn on_paint(&self) -> PaintState {
        self.paint_state()
    }

    fn next_deadline(&self) -> Option<Timestamp> {
        self.long_press.deadline()
    }

    fn input_method_query(&self, query: ImeQuery) -> ImeQueryValue {
        self.query(query)
    }

    fn is_read_only(&self) -> bool {
        self.doc.is_read_only()
    }

    fn take_notifications(&mut self) -> Vec<Notification> {
        Editor::take_notifications(self)
    }
}
