//! Notifications the editor queues for its host.

use serde::Serialize;

use crate::coords::Point;
use crate::input::KeyMods;

/// What kind of text change a [`Notification::Modified`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationKind {
    Insert,
    Delete,
}

/// Outbound events, drained with `Editor::take_notifications`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Text from `position` on needs styling
    StyleNeeded { position: usize },
    /// A character was typed (not emitted for tentative preedit text)
    CharAdded { ch: char },
    Modified {
        kind: ModificationKind,
        position: usize,
        length: usize,
        lines_added: isize,
        text: String,
    },
    LinesAdded { lines: isize },
    SelectionChanged,
    CursorPositionChanged,
    FocusChanged { focused: bool },
    /// An edit was refused because the document is read-only
    ModifyAttemptReadOnly,
    TextAreaClicked { line: usize, modifiers: KeyMods },
    DoubleClick { position: usize, line: usize },
    ContextMenu { point: Point },
    ShowSoftKeyboard,
    Zoom { level: i32 },
}
