//! Mouse buttons, touch and the long-press timer.

use crate::clipboard::ClipboardKind;
use crate::coords::{CoordinateMapper, Point};
use crate::document::DocumentFacade;
use crate::gesture::{
    PointerButton, PointerEvent, PointerEventKind, SelectionUnit, Timestamp, TouchEvent, TouchPhase,
    WheelEvent,
};
use crate::notify::Notification;
use crate::selection::{SelectionPosition, SelectionRange};
use crate::surface::EventResult;

use super::Editor;

impl<D: DocumentFacade, M: CoordinateMapper> Editor<D, M> {
    pub(super) fn handle_pointer(&mut self, event: &PointerEvent) -> EventResult {
        tracing::trace!(
            target: "pointer",
            kind = ?event.kind,
            button = ?event.button,
            x = event.point.x,
            y = event.point.y,
            "pointer"
        );
        match (event.kind, event.button) {
            (PointerEventKind::Down, PointerButton::Left) => self.left_button_down(event),
            (PointerEventKind::Down, PointerButton::Middle) => self.middle_button_down(event),
            (PointerEventKind::Down, PointerButton::Right) => self.right_button_down(event),
            (PointerEventKind::Move, _) => self.pointer_moved(event.point),
            (PointerEventKind::Up, button) => self.button_up(event, button),
        }
    }

    fn hit_position(&self, point: Point) -> SelectionPosition {
        self.mapper
            .sposition_from_location(&self.doc, point, self.config.virtual_space)
    }

    fn left_button_down(&mut self, event: &PointerEvent) -> EventResult {
        if !self.composition.is_idle() {
            self.finalize_composition();
        }
        self.long_press.cancel();

        let before = self.selection.clone();
        let hit = self.hit_position(event.point);
        let position = hit.position;
        let clicks = self
            .clicks
            .track_click(position, event.time, self.config.double_click_ms);

        self.pointer.press(event.point, event.time);
        self.pointer.dragging = true;
        self.pointer.unit = SelectionUnit::from_click_count(clicks);

        match self.pointer.unit {
            SelectionUnit::Character => {
                let mods = event.modifiers;
                if mods.shift() {
                    self.selection.collapse_to_primary();
                    self.selection.primary_mut().extend_to(hit);
                } else if mods.ctrl() && self.config.multiple_selection {
                    self.selection.add_range(SelectionRange::collapsed(hit));
                    self.selection.normalize();
                } else {
                    self.selection.set_range_only(SelectionRange::collapsed(hit));
                }
            }
            SelectionUnit::Word => {
                let (start, end) = self.word_range_at(position);
                self.selection.set_selection(start, end);
                self.pointer.unit_anchor = Some((start, end));
                let line = self.doc.line_from_position(position);
                self.notify(Notification::DoubleClick { position, line });
            }
            SelectionUnit::Line => {
                let (start, end) = self.line_range(self.doc.line_from_position(position));
                self.selection.set_selection(start, end);
                self.pointer.unit_anchor = Some((start, end));
            }
        }
        tracing::debug!(target: "pointer", position, clicks, "button down");

        self.selection_updated(&before);
        EventResult::consumed_redraw()
    }

    /// Middle click pastes the primary selection at the point
    fn middle_button_down(&mut self, event: &PointerEvent) -> EventResult {
        if !self.config.selection_clipboard_enabled() {
            return EventResult::Bubble;
        }
        if !self.composition.is_idle() {
            self.finalize_composition();
        }
        let before = self.selection.clone();
        let hit = self.hit_position(event.point);
        self.selection.set_range_only(SelectionRange::collapsed(hit));
        self.paste(ClipboardKind::Selection);
        self.selection_updated(&before);
        EventResult::consumed_redraw()
    }

    fn right_button_down(&mut self, event: &PointerEvent) -> EventResult {
        if !self.composition.is_idle() {
            self.finalize_composition();
        }
        self.show_context_menu(event.point)
    }

    /// Collapse onto `point` unless it is inside the selection, then ask
    /// the host for a menu
    fn show_context_menu(&mut self, point: Point) -> EventResult {
        let before = self.selection.clone();
        let position = self.mapper.position_from_location(&self.doc, point);
        if !self.selection.contains_position(position) {
            self.selection.set_empty(position);
        }
        self.selection_updated(&before);
        if self.config.context_menu {
            self.notify(Notification::ContextMenu { point });
        }
        EventResult::consumed_redraw()
    }

    fn pointer_moved(&mut self, point: Point) -> EventResult {
        if !self.pointer.dragging {
            return EventResult::Bubble;
        }
        if !self
            .pointer
            .track_move(point, self.config.drag_threshold_px)
        {
            return EventResult::consumed_no_redraw();
        }

        let before = self.selection.clone();
        let hit = self.hit_position(point);
        match (self.pointer.unit, self.pointer.unit_anchor) {
            (SelectionUnit::Word, Some(anchor)) => {
                let span = self.word_range_at(hit.position);
                self.extend_by_unit(anchor, span, hit.position);
            }
            (SelectionUnit::Line, Some(anchor)) => {
                let line = self.doc.line_from_position(hit.position);
                let span = self.line_range(line);
                self.extend_by_unit(anchor, span, hit.position);
            }
            _ => self.selection.primary_mut().extend_to(hit),
        }
        self.selection_updated(&before);
        EventResult::consumed_redraw()
    }

    /// Grow the primary range from the unit under the press to the unit under the pointer
    fn extend_by_unit(&mut self, anchor: (usize, usize), span: (usize, usize), position: usize) {
        let range = if position < anchor.0 {
            SelectionRange::from_offsets(anchor.1, span.0.min(anchor.0))
        } else {
            SelectionRange::from_offsets(anchor.0, span.1.max(anchor.1))
        };
        *self.selection.primary_mut() = range;
    }

    fn button_up(&mut self, event: &PointerEvent, button: PointerButton) -> EventResult {
        let was_dragging = self.pointer.dragging;
        if button == PointerButton::Left {
            self.pointer.release();
            if was_dragging && self.config.selection_clipboard_enabled() {
                self.copy_selection(ClipboardKind::Selection);
            }
        }

        let position = self.mapper.position_from_location(&self.doc, event.point);
        let line = self.doc.line_from_position(position);
        self.notify(Notification::TextAreaClicked {
            line,
            modifiers: event.modifiers,
        });
        EventResult::consumed_no_redraw()
    }

    pub(super) fn handle_wheel(&mut self, event: &WheelEvent) -> EventResult {
        if !event.modifiers.ctrl() || event.lines == 0.0 {
            return EventResult::Bubble;
        }
        let step = if event.lines > 0.0 { 1 } else { -1 };
        tracing::debug!(target: "pointer", lines = event.lines, "ctrl+wheel zoom");
        self.set_zoom(self.zoom + step);
        EventResult::consumed_redraw()
    }

    pub(super) fn handle_touch(&mut self, event: &TouchEvent) -> EventResult {
        if self.doc.is_read_only() {
            tracing::trace!(target: "pointer", "touch ignored on read-only document");
            return EventResult::Bubble;
        }

        match event.phase {
            TouchPhase::Pressed => {
                if !self.composition.is_idle() {
                    self.finalize_composition();
                }
                self.pointer.press(event.point, event.time);
                self.pointer.touch_active = true;
                self.long_press
                    .start(event.time, self.config.long_press_ms, event.point);
                EventResult::consumed_no_redraw()
            }
            TouchPhase::Moved => self.touch_moved(event.point),
            TouchPhase::Stationary => EventResult::consumed_no_redraw(),
            TouchPhase::Released => self.touch_released(event),
            TouchPhase::Cancelled => {
                self.long_press.cancel();
                self.pointer.release();
                EventResult::consumed_no_redraw()
            }
        }
    }

    fn touch_moved(&mut self, point: Point) -> EventResult {
        if !self.pointer.touch_active {
            return EventResult::Bubble;
        }
        if !self
            .pointer
            .track_move(point, self.config.drag_threshold_px)
        {
            return EventResult::consumed_no_redraw();
        }
        self.long_press.cancel();

        let Some(origin) = self.pointer.last_button_down_position else {
            return EventResult::consumed_no_redraw();
        };
        let before = self.selection.clone();
        let anchor = self.mapper.position_from_location(&self.doc, origin);
        let caret = self.mapper.position_from_location(&self.doc, point);
        self.selection.set_selection(anchor, caret);
        self.selection_updated(&before);
        EventResult::consumed_redraw()
    }

    fn touch_released(&mut self, event: &TouchEvent) -> EventResult {
        self.long_press.cancel();
        let held = self.pointer.held_for(event.time);
        let long_press_fired = self.pointer.long_press_fired;
        self.pointer.release();

        let is_tap = !long_press_fired && held.is_some_and(|ms| ms < self.config.tap_threshold_ms);
        if !is_tap {
            return EventResult::consumed_no_redraw();
        }

        let before = self.selection.clone();
        let position = self.mapper.position_from_location(&self.doc, event.point);
        self.selection.set_empty(position);
        self.selection_updated(&before);
        self.notify(Notification::ShowSoftKeyboard);
        tracing::debug!(target: "pointer", position, "tap");
        EventResult::consumed_redraw()
    }

    pub(super) fn handle_timer(&mut self, now: Timestamp) -> EventResult {
        let Some(point) = self.long_press.poll(now) else {
            return EventResult::consumed_no_redraw();
        };
        self.pointer.long_press_fired = true;
        tracing::debug!(target: "pointer", x = point.x, y = point.y, "long press");
        self.show_context_menu(point)
    }
}
