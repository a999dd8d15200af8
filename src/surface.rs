//! The hooks a host widget calls on the editor.
//!
//! Hosts (see `adapters`) own a value implementing [`EditorSurface`] and
//! forward their platform events to it; nothing here depends on a toolkit.

use std::ops::Range;

use crate::coords::{Point, Rect};
use crate::document::IndicatorRun;
use crate::gesture::{PointerEvent, Timestamp, TouchEvent, WheelEvent};
use crate::ime::{CompositionEvent, IndicatorKind};
use crate::input::KeyEvent;
use crate::notify::Notification;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was fully handled; stop propagation
    Consumed {
        /// Whether a redraw is needed
        redraw: bool,
    },
    /// Event was not handled; the host may process it
    Bubble,
}

impl EventResult {
    /// Create a consumed result that requests redraw
    pub fn consumed_redraw() -> Self {
        Self::Consumed { redraw: true }
    }

    /// Create a consumed result with no redraw (event blocked but nothing changed)
    pub fn consumed_no_redraw() -> Self {
        Self::Consumed { redraw: false }
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed { .. })
    }

    pub fn needs_redraw(&self) -> bool {
        matches!(self, Self::Consumed { redraw: true })
    }
}

/// A caret to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretPaint {
    pub position: usize,
    pub point: Point,
    /// Draw as a block over the composed character
    pub block: bool,
    pub primary: bool,
}

/// Everything the renderer needs from the input core for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaintState {
    pub carets: Vec<CaretPaint>,
    pub caret_width: u32,
    /// Non-empty selection ranges, primary first
    pub selections: Vec<Range<usize>>,
    /// Composition indicator runs
    pub indicators: Vec<(IndicatorKind, IndicatorRun)>,
}

/// Properties an input method can ask about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImeQuery {
    /// Where to place the candidate window
    CursorRectangle,
    AnchorRectangle,
    /// Caret offset from the paragraph start, in UTF-16 units
    CursorPosition,
    /// Selection end offset from the paragraph start, in UTF-16 units
    AnchorPosition,
    AbsolutePosition,
    SurroundingText,
    TextBeforeCursor,
    TextAfterCursor,
    CurrentSelection,
    /// Offset (from the paragraph start) of the character under a point
    PositionAt(Point),
    MaximumTextLength,
    Hints,
    Enabled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImeQueryValue {
    Rect(Rect),
    Offset(usize),
    Text(String),
    Hints(u32),
    Bool(bool),
    /// No value (for example, no maximum length)
    None,
}

/// Input hint: the editor accepts several lines
pub const HINT_MULTI_LINE: u32 = 0x400;

/// Event hooks of an embeddable editor.
pub trait EditorSurface {
    fn on_key(&mut self, event: &KeyEvent) -> EventResult;

    fn on_pointer(&mut self, event: &PointerEvent) -> EventResult;

    fn on_touch(&mut self, event: &TouchEvent) -> EventResult;

    /// Ctrl+wheel zooms; plain scrolling is left to the host
    fn on_wheel(&mut self, event: &WheelEvent) -> EventResult;

    fn on_composition(&mut self, event: &CompositionEvent) -> EventResult;

    fn on_focus(&mut self, focused: bool) -> EventResult;

    /// Drive timers; call when `now` reaches [`Self::next_deadline`]
    fn on_timer(&mut self, now: Timestamp) -> EventResult;

    fn on_paint(&self) -> PaintState;

    fn next_deadline(&self) -> Option<Timestamp>;

    fn input_method_query(&self, query: ImeQuery) -> ImeQueryValue;

    fn is_read_only(&self) -> bool;

    fn take_notifications(&mut self) -> Vec<Notification>;
}
