//! Integration tests for replaying recorded event scripts through `update`

mod common;

use common::*;
use preedit::config::Platform;
use preedit::document::RopeDocument;
use preedit::editor::Editor;
use preedit::gesture::Timestamp;
use preedit::ime::CompositionEvent;
use preedit::messages::{Msg, ReplayScript};
use preedit::notify::Notification;
use preedit::surface::EventResult;
use preedit::update::update;

const SCRIPT: &str = r#"{
    "text": "hello",
    "config": {"platform": "x11"},
    "events": [
        {"type": "focus", "focused": true},
        {"type": "select", "anchor": 5, "caret": 5},
        {"type": "ime", "preedit": "か",
         "attributes": [{"kind": "cursor", "position": 1}]},
        {"type": "ime", "commit": "か"},
        {"type": "key", "key": {"named": "return"}},
        {"type": "touch", "phase": "pressed", "point": {"x": 15.0, "y": 10.0}, "time": 1000}
    ]
}"#;

fn load_script() -> (Editor, Vec<Msg>) {
    let script: ReplayScript = serde_json::from_str(SCRIPT).unwrap();
    let config = script.config.clone().unwrap();
    let editor = Editor::with_document(RopeDocument::from_text(&script.text), config);
    (editor, script.events)
}

#[test]
fn test_replay_script() {
    let (mut editor, events) = load_script();
    assert_eq!(editor.config().platform, Platform::X11);

    for msg in events {
        update(&mut editor, msg);
    }

    assert_eq!(editor.text(), "helloか\n");
    assert!(editor.has_focus());
    assert!(editor.composition().is_idle());
    assert_eq!(ranges(&editor), vec![(9, 9)]);

    // The touch press armed the long-press timer
    let early = update(
        &mut editor,
        Msg::Tick {
            time: Timestamp(1_200),
        },
    );
    assert_eq!(early, EventResult::Bubble);

    update(
        &mut editor,
        Msg::Tick {
            time: Timestamp(1_300),
        },
    );
    assert_eq!(ranges(&editor), vec![(2, 2)]);
    assert!(editor
        .take_notifications()
        .iter()
        .any(|n| matches!(n, Notification::ContextMenu { .. })));
}

#[test]
fn test_read_only_message() {
    let mut editor = test_editor("abc", 3);

    update(&mut editor, Msg::ReadOnly { read_only: true });
    update(&mut editor, Msg::Key(typed('x')));

    assert_eq!(editor.text(), "abc");
    assert!(has_note(&mut editor, &Notification::ModifyAttemptReadOnly));
}

#[test]
fn test_select_message_cancels_composition() {
    let mut editor = test_editor("abc", 3);
    update(
        &mut editor,
        Msg::Ime(CompositionEvent::preedit("x").with_cursor(1)),
    );
    assert_eq!(editor.text(), "abcx");

    let result = update(&mut editor, Msg::Select { anchor: 0, caret: 1 });

    assert_eq!(result, EventResult::consumed_redraw());
    assert_eq!(editor.text(), "abc");
    assert_eq!(ranges(&editor), vec![(0, 1)]);
}
