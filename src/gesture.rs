//! Pointer and touch gesture state: event types, click counting, the
//! long-press timer and per-gesture drag bookkeeping.
//!
//! Time is supplied by the host as millisecond [`Timestamp`]s so every
//! gesture can be replayed deterministically.

use serde::{Deserialize, Serialize};

use crate::coords::Point;
use crate::input::KeyMods;

/// Milliseconds on a host-chosen monotonic clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier` (0 if `earlier` is later)
    pub fn since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn plus_millis(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// A mouse event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub button: PointerButton,
    pub point: Point,
    pub time: Timestamp,
    #[serde(default)]
    pub modifiers: KeyMods,
}

impl PointerEvent {
    pub fn down(button: PointerButton, point: Point, time: Timestamp) -> Self {
        Self {
            kind: PointerEventKind::Down,
            button,
            point,
            time,
            modifiers: KeyMods::NONE,
        }
    }

    /// Movement with the left button held
    pub fn moved(point: Point, time: Timestamp) -> Self {
        Self {
            kind: PointerEventKind::Move,
            button: PointerButton::Left,
            point,
            time,
            modifiers: KeyMods::NONE,
        }
    }

    pub fn up(button: PointerButton, point: Point, time: Timestamp) -> Self {
        Self {
            kind: PointerEventKind::Up,
            button,
            point,
            time,
            modifiers: KeyMods::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyMods) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Pressed,
    Moved,
    Stationary,
    Released,
    Cancelled,
}

/// A mouse wheel turn. `lines` is positive when the wheel turns away
/// from the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub lines: f64,
    #[serde(default)]
    pub modifiers: KeyMods,
}

impl WheelEvent {
    pub fn new(lines: f64, modifiers: KeyMods) -> Self {
        Self { lines, modifiers }
    }
}

/// The first touch point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub point: Point,
    pub time: Timestamp,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, point: Point, time: Timestamp) -> Self {
        Self { phase, point, time }
    }
}

/// Granularity of a drag selection, from the click count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionUnit {
    #[default]
    Character,
    Word,
    Line,
}

impl SelectionUnit {
    pub fn from_click_count(count: u8) -> Self {
        match count {
            2 => Self::Word,
            3 => Self::Line,
            _ => Self::Character,
        }
    }
}

/// State of the gesture in progress. Reset on every button press.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    pub last_button_down_time: Option<Timestamp>,
    pub last_button_down_position: Option<Point>,
    pub drag_threshold_exceeded: bool,
    /// Left button held over the text area
    pub dragging: bool,
    pub unit: SelectionUnit,
    /// Anchor range of a word/line drag, as (start, end)
    pub unit_anchor: Option<(usize, usize)>,
    /// Touch gesture started and not yet ended
    pub touch_active: bool,
    pub long_press_fired: bool,
}

impl PointerState {
    pub fn press(&mut self, point: Point, time: Timestamp) {
        *self = Self {
            last_button_down_time: Some(time),
            last_button_down_position: Some(point),
            ..Self::default()
        };
    }

    /// Update the drag flag; returns true once movement exceeds `threshold`
    pub fn track_move(&mut self, point: Point, threshold: f64) -> bool {
        if !self.drag_threshold_exceeded {
            if let Some(origin) = self.last_button_down_position {
                self.drag_threshold_exceeded = origin.distance_to(point) > threshold;
            }
        }
        self.drag_threshold_exceeded
    }

    pub fn release(&mut self) {
        self.dragging = false;
        self.touch_active = false;
    }

    /// Milliseconds the button has been held at `now`
    pub fn held_for(&self, now: Timestamp) -> Option<u64> {
        self.last_button_down_time.map(|t| now.since(t))
    }
}

/// Click tracking state for double/triple click detection
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_click_time: Option<Timestamp>,
    last_click_position: Option<usize>,
    click_count: u8,
}

impl ClickTracker {
    /// Update the click count from the timing and document position.
    ///
    /// Returns the new click count (1, 2, or 3)
    pub fn track_click(&mut self, position: usize, time: Timestamp, double_click_ms: u64) -> u8 {
        let is_rapid_click = self
            .last_click_time
            .is_some_and(|last| time.since(last) < double_click_ms);
        let is_same_position = self.last_click_position == Some(position);

        if is_rapid_click && is_same_position {
            self.click_count += 1;
            if self.click_count > 3 {
                self.click_count = 1;
            }
        } else {
            self.click_count = 1;
        }

        self.last_click_time = Some(time);
        self.last_click_position = Some(position);
        self.click_count
    }

    pub fn click_count(&self) -> u8 {
        self.click_count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Single-shot long-press timer.
#[derive(Debug, Clone, Default)]
pub struct LongPressTimer {
    deadline: Option<Timestamp>,
    point: Point,
}

impl LongPressTimer {
    pub fn start(&mut self, now: Timestamp, delay_ms: u64, point: Point) {
        self.deadline = Some(now.plus_millis(delay_ms));
        self.point = point;
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Timestamp> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire if the deadline has passed: returns the press point once, then disarms
    pub fn poll(&mut self, now: Timestamp) -> Option<Point> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.point)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_counting() {
        let mut clicks = ClickTracker::default();
        assert_eq!(clicks.track_click(5, Timestamp(1000), 300), 1);
        assert_eq!(clicks.track_click(5, Timestamp(1100), 300), 2);
        assert_eq!(clicks.track_click(5, Timestamp(1200), 300), 3);
        assert_eq!(clicks.track_click(5, Timestamp(1300), 300), 1);

        // Too slow
        assert_eq!(clicks.track_click(5, Timestamp(2000), 300), 1);
        // Different position
        assert_eq!(clicks.track_click(6, Timestamp(2100), 300), 1);
    }

    #[test]
    fn test_long_press_timer_is_single_shot() {
        let mut timer = LongPressTimer::default();
        timer.start(Timestamp(100), 300, Point::new(4.0, 5.0));
        assert_eq!(timer.deadline(), Some(Timestamp(400)));
        assert_eq!(timer.poll(Timestamp(399)), None);
        assert_eq!(timer.poll(Timestamp(400)), Some(Point::new(4.0, 5.0)));
        assert_eq!(timer.poll(Timestamp(500)), None);
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timer = LongPressTimer::default();
        timer.start(Timestamp(0), 300, Point::default());
        timer.cancel();
        assert_eq!(timer.poll(Timestamp(1000)), None);
    }

    #[test]
    fn test_drag_threshold() {
        let mut state = PointerState::default();
        state.press(Point::new(10.0, 10.0), Timestamp(0));
        assert!(!state.track_move(Point::new(12.0, 12.0), 4.0));
        assert!(state.track_move(Point::new(20.0, 10.0), 4.0));
        // Stays exceeded even when coming back
        assert!(state.track_move(Point::new(10.0, 10.0), 4.0));
        assert_eq!(state.held_for(Timestamp(250)), Some(250));
    }

    #[test]
    fn test_selection_unit_from_clicks() {
        assert_eq!(SelectionUnit::from_click_count(1), SelectionUnit::Character);
        assert_eq!(SelectionUnit::from_click_count(2), SelectionUnit::Word);
        assert_eq!(SelectionUnit::from_click_count(3), SelectionUnit::Line);
    }
}
