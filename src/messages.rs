//! Message types for replaying input against an editor
//!
//! Every input the core reacts to can be expressed as a [`Msg`], so a whole
//! session can be written down as JSON and fed through [`crate::update`].

use serde::{Deserialize, Serialize};

use crate::config::InputConfig;
use crate::gesture::{PointerEvent, Timestamp, TouchEvent, WheelEvent};
use crate::ime::CompositionEvent;
use crate::input::KeyEvent;

/// One input to the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Msg {
    /// Key press
    Key(KeyEvent),
    /// Mouse button or motion
    Pointer(PointerEvent),
    /// First touch point of a touch event
    Touch(TouchEvent),
    Wheel(WheelEvent),
    /// Input-method preedit / commit
    Ime(CompositionEvent),
    Focus { focused: bool },
    /// Host clock advanced; fires due timers
    Tick { time: Timestamp },
    ReadOnly { read_only: bool },
    /// Programmatic selection change
    Select { anchor: usize, caret: usize },
}

impl Msg {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Msg::Key(_) => "key",
            Msg::Pointer(_) => "pointer",
            Msg::Touch(_) => "touch",
            Msg::Wheel(_) => "wheel",
            Msg::Ime(_) => "ime",
            Msg::Focus { .. } => "focus",
            Msg::Tick { .. } => "tick",
            Msg::ReadOnly { .. } => "read_only",
            Msg::Select { .. } => "select",
        }
    }

    /// Whether the message is periodic and not worth a log line
    pub fn is_noisy(&self) -> bool {
        matches!(self, Msg::Tick { .. }) || matches!(self, Msg::Pointer(p) if p.kind == crate::gesture::PointerEventKind::Move)
    }
}

/// A recorded session: initial text, optional config, and the inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayScript {
    pub text: String,
    /// Overrides the config file when present
    pub config: Option<InputConfig>,
    /// Byte ranges that refuse edits
    pub protected: Vec<(usize, usize)>,
    pub events: Vec<Msg>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::PointerButton;
    use crate::input::RawKey;

    #[test]
    fn test_parse_script() {
        let json = r#"{
            "text": "hello",
            "events": [
                {"type": "focus", "focused": true},
                {"type": "key", "key": {"character": "x"}, "text": "x"},
                {"type": "pointer", "kind": "down", "button": "left",
                 "point": {"x": 10.0, "y": 5.0}, "time": 120},
                {"type": "ime", "preedit": "か",
                 "attributes": [{"kind": "cursor", "position": 1}]},
                {"type": "tick", "time": 500},
                {"type": "wheel", "lines": -1.0}
            ]
        }"#;
        let script: ReplayScript = serde_json::from_str(json).unwrap();
        assert_eq!(script.text, "hello");
        assert_eq!(script.events.len(), 6);
        assert!(matches!(&script.events[1], Msg::Key(k) if k.key == RawKey::Character('x')));
        assert!(matches!(&script.events[2], Msg::Pointer(p) if p.button == PointerButton::Left));
        assert!(matches!(&script.events[3], Msg::Ime(e) if e.cursor_position() == 1));
        assert_eq!(script.events[4].name(), "tick");
        assert!(script.events[4].is_noisy());
        assert!(matches!(&script.events[5], Msg::Wheel(w) if w.lines < 0.0));
    }
}
