//! Touch-first declarative item host.
//!
//! The item draws the editor inside a margin, so every rectangle handed to
//! the input method is shifted by [`ITEM_MARGIN`] and every point coming
//! back from it is shifted the other way. The item also takes focus on any
//! press and tells its enclosing scroll view to stop stealing the gesture
//! while a button is held.

use super::HostAdapter;
use crate::coords::{Point, Rect};
use crate::gesture::{PointerButton, PointerEvent, Timestamp, TouchEvent, TouchPhase, WheelEvent};
use crate::ime::CompositionEvent;
use crate::input::{KeyEvent, KeyMods};
use crate::surface::{EditorSurface, EventResult, ImeQuery, ImeQueryValue};

/// Offset of the text area inside the item, both axes
pub const ITEM_MARGIN: f64 = 5.0;

/// Events delivered by the declarative item
#[derive(Debug, Clone, PartialEq)]
pub enum QuickEvent {
    MousePress {
        button: PointerButton,
        point: Point,
        modifiers: KeyMods,
        time: Timestamp,
    },
    MouseRelease {
        button: PointerButton,
        point: Point,
        modifiers: KeyMods,
        time: Timestamp,
    },
    MouseMove {
        point: Point,
        time: Timestamp,
    },
    /// Synthesized by the toolkit; the editor counts clicks itself
    MouseDoubleClick {
        button: PointerButton,
        point: Point,
        time: Timestamp,
    },
    Touch(TouchEvent),
    Wheel(WheelEvent),
    Key(KeyEvent),
    InputMethod(CompositionEvent),
    FocusIn,
    FocusOut,
    Timer(Timestamp),
}

/// Requests from the adapter to the surrounding item
#[derive(Debug, Clone, PartialEq)]
pub enum HostSignal {
    /// Let the enclosing scroll view handle drags (false while a button is held)
    EnableScrollViewInteraction(bool),
    /// The caret moved; the candidate window should follow
    CursorRectangleChanged(Rect),
}

pub struct QuickItemAdapter<S: EditorSurface> {
    surface: S,
    focused: bool,
    signals: Vec<HostSignal>,
}

impl<S: EditorSurface> QuickItemAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            focused: false,
            signals: Vec::new(),
        }
    }

    pub fn take_signals(&mut self) -> Vec<HostSignal> {
        std::mem::take(&mut self.signals)
    }

    fn force_active_focus(&mut self) {
        if !self.focused {
            self.focused = true;
            self.surface.on_focus(true);
        }
    }

    fn cursor_changed(&mut self) {
        if let ImeQueryValue::Rect(rect) = self.input_method_query(ImeQuery::CursorRectangle) {
            self.signals.push(HostSignal::CursorRectangleChanged(rect));
        }
    }

    /// Input-method query in item coordinates
    pub fn input_method_query(&self, query: ImeQuery) -> ImeQueryValue {
        match query {
            ImeQuery::PositionAt(point) => self.surface.input_method_query(ImeQuery::PositionAt(
                Point::new(point.x - ITEM_MARGIN, point.y - ITEM_MARGIN),
            )),
            ImeQuery::CursorRectangle | ImeQuery::AnchorRectangle => {
                match self.surface.input_method_query(query) {
                    ImeQueryValue::Rect(rect) => {
                        ImeQueryValue::Rect(rect.translated(ITEM_MARGIN, ITEM_MARGIN))
                    }
                    other => other,
                }
            }
            _ => self.surface.input_method_query(query),
        }
    }
}

impl<S: EditorSurface> HostAdapter for QuickItemAdapter<S> {
    type Event = QuickEvent;
    type Surface = S;

    fn handle_event(&mut self, event: QuickEvent) -> EventResult {
        match event {
            QuickEvent::MousePress {
                button,
                point,
                modifiers,
                time,
            } => {
                let result = self
                    .surface
                    .on_pointer(&PointerEvent::down(button, point, time).with_modifiers(modifiers));
                if button == PointerButton::Left {
                    self.cursor_changed();
                }
                self.force_active_focus();
                self.signals.push(HostSignal::EnableScrollViewInteraction(false));
                result
            }
            QuickEvent::MouseRelease {
                button,
                point,
                modifiers,
                time,
            } => {
                let result = self
                    .surface
                    .on_pointer(&PointerEvent::up(button, point, time).with_modifiers(modifiers));
                self.signals.push(HostSignal::EnableScrollViewInteraction(true));
                result
            }
            QuickEvent::MouseMove { point, time } => {
                self.surface.on_pointer(&PointerEvent::moved(point, time))
            }
            QuickEvent::MouseDoubleClick { .. } => EventResult::consumed_no_redraw(),
            QuickEvent::Touch(touch) => {
                if self.surface.is_read_only() {
                    return EventResult::Bubble;
                }
                self.force_active_focus();
                let result = self.surface.on_touch(&touch);
                if matches!(touch.phase, TouchPhase::Pressed | TouchPhase::Released) {
                    self.cursor_changed();
                }
                result
            }
            QuickEvent::Wheel(wheel) => self.surface.on_wheel(&wheel),
            QuickEvent::Key(key) => self.surface.on_key(&key),
            QuickEvent::InputMethod(composition) => {
                let result = self.surface.on_composition(&composition);
                self.cursor_changed();
                result
            }
            QuickEvent::FocusIn => {
                self.focused = true;
                self.surface.on_focus(true)
            }
            QuickEvent::FocusOut => {
                self.focused = false;
                self.surface.on_focus(false)
            }
            QuickEvent::Timer(now) => self.surface.on_timer(now),
        }
    }

    fn surface(&self) -> &S {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InputConfig, Platform};
    use crate::document::RopeDocument;
    use crate::editor::Editor;
    use crate::notify::Notification;

    fn item(text: &str) -> QuickItemAdapter<Editor> {
        let editor = Editor::with_document(
            RopeDocument::from_text(text),
            InputConfig::for_platform(Platform::Android),
        );
        QuickItemAdapter::new(editor)
    }

    #[test]
    fn test_press_forces_focus_and_locks_scroll_view() {
        let mut item = item("hello");
        item.handle_event(QuickEvent::MousePress {
            button: PointerButton::Left,
            point: Point::new(20.0, 10.0),
            modifiers: KeyMods::NONE,
            time: Timestamp::from_millis(0),
        });
        assert!(item.surface().has_focus());
        let signals = item.take_signals();
        assert!(signals.contains(&HostSignal::EnableScrollViewInteraction(false)));
        assert!(signals
            .iter()
            .any(|s| matches!(s, HostSignal::CursorRectangleChanged(_))));

        item.handle_event(QuickEvent::MouseRelease {
            button: PointerButton::Left,
            point: Point::new(20.0, 10.0),
            modifiers: KeyMods::NONE,
            time: Timestamp::from_millis(40),
        });
        assert_eq!(
            item.take_signals(),
            vec![HostSignal::EnableScrollViewInteraction(true)]
        );
    }

    #[test]
    fn test_ctrl_wheel_reaches_surface() {
        let mut item = item("hello");
        let result = item.handle_event(QuickEvent::Wheel(WheelEvent::new(1.0, KeyMods::CTRL)));
        assert!(result.needs_redraw());
        assert_eq!(item.surface().zoom(), 1);
        assert_eq!(
            item.handle_event(QuickEvent::Wheel(WheelEvent::new(1.0, KeyMods::NONE))),
            EventResult::Bubble
        );
    }

    #[test]
    fn test_double_click_is_ignored() {
        let mut item = item("hello");
        let result = item.handle_event(QuickEvent::MouseDoubleClick {
            button: PointerButton::Left,
            point: Point::new(20.0, 10.0),
            time: Timestamp::from_millis(0),
        });
        assert!(!result.needs_redraw());
        assert!(item.surface_mut().take_notifications().is_empty());
    }

    #[test]
    fn test_rectangles_are_offset_by_margin() {
        let item = item("hello");
        let ImeQueryValue::Rect(inner) = item.surface().input_method_query(ImeQuery::CursorRectangle)
        else {
            panic!("expected a rectangle");
        };
        let ImeQueryValue::Rect(outer) = item.input_method_query(ImeQuery::CursorRectangle) else {
            panic!("expected a rectangle");
        };
        assert_eq!(outer.x, inner.x + ITEM_MARGIN);
        assert_eq!(outer.y, inner.y + ITEM_MARGIN);
    }

    #[test]
    fn test_position_query_removes_margin() {
        let item = item("hello");
        // Grid cells are 10px wide: x = 35 is column 3 once the margin is removed
        let value = item.input_method_query(ImeQuery::PositionAt(Point::new(35.0, 15.0)));
        assert_eq!(value, ImeQueryValue::Offset(3));
    }

    #[test]
    fn test_touch_on_read_only_document_bubbles() {
        let mut item = item("hello");
        item.surface_mut().set_read_only(true);
        let touch = TouchEvent::new(TouchPhase::Pressed, Point::new(10.0, 10.0), Timestamp(0));
        assert_eq!(item.handle_event(QuickEvent::Touch(touch)), EventResult::Bubble);
        assert!(!item.surface().has_focus());
    }

    #[test]
    fn test_tap_requests_keyboard() {
        let mut item = item("hello");
        let at = Point::new(20.0, 10.0);
        item.handle_event(QuickEvent::Touch(TouchEvent::new(TouchPhase::Pressed, at, Timestamp(0))));
        item.handle_event(QuickEvent::Touch(TouchEvent::new(TouchPhase::Released, at, Timestamp(50))));
        let notes = item.surface_mut().take_notifications();
        assert!(notes.contains(&Notification::ShowSoftKeyboard));
        assert_eq!(item.surface().current_position(), 2);
    }
}
