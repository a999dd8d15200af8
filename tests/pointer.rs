//! Integration tests for mouse clicks, drags, touch gestures and the
//! long-press timer

mod common;

use common::*;
use preedit::config::{InputConfig, Platform};
use preedit::coords::Point;
use preedit::gesture::{PointerButton, PointerEvent, Timestamp, TouchEvent, TouchPhase, WheelEvent};
use preedit::ime::CompositionEvent;
use preedit::input::KeyMods;
use preedit::notify::Notification;
use preedit::surface::{EditorSurface, EventResult};

const TEXT: &str = "hello world\nsecond line";

fn press(button: PointerButton, point: Point, time: u64) -> PointerEvent {
    PointerEvent::down(button, point, Timestamp(time))
}

fn release(button: PointerButton, point: Point, time: u64) -> PointerEvent {
    PointerEvent::up(button, point, Timestamp(time))
}

// ============================================================================
// Clicks
// ============================================================================

#[test]
fn test_click_places_caret() {
    let mut editor = test_editor(TEXT, 0);

    click(&mut editor, boundary(1, 3), 1_000);

    assert_eq!(ranges(&editor), vec![(15, 15)]);
    let notes = editor.take_notifications();
    assert!(notes.contains(&Notification::TextAreaClicked {
        line: 1,
        modifiers: KeyMods::NONE
    }));
    assert!(notes.contains(&Notification::CursorPositionChanged));
}

#[test]
fn test_shift_click_extends() {
    let mut editor = test_editor(TEXT, 0);
    click(&mut editor, boundary(0, 3), 1_000);

    click_with(&mut editor, boundary(0, 8), 2_000, KeyMods::SHIFT);

    assert_eq!(ranges(&editor), vec![(3, 8)]);
}

#[test]
fn test_ctrl_click_adds_caret() {
    let mut editor = test_editor(TEXT, 0);
    click(&mut editor, boundary(0, 3), 1_000);

    click_with(&mut editor, boundary(0, 8), 2_000, KeyMods::CTRL);

    assert_eq!(ranges(&editor), vec![(8, 8), (3, 3)]);
}

#[test]
fn test_ctrl_click_without_multiple_selection() {
    let config = InputConfig {
        multiple_selection: false,
        ..InputConfig::for_platform(Platform::X11)
    };
    let mut editor = test_editor_with(config, TEXT, 0);
    click(&mut editor, boundary(0, 3), 1_000);

    click_with(&mut editor, boundary(0, 8), 2_000, KeyMods::CTRL);

    assert_eq!(ranges(&editor), vec![(8, 8)]);
}

#[test]
fn test_double_and_triple_click() {
    let mut editor = test_editor(TEXT, 0);

    click(&mut editor, boundary(0, 2), 1_000);
    click(&mut editor, boundary(0, 2), 1_100);
    assert_eq!(ranges(&editor), vec![(0, 5)]);
    assert!(has_note(
        &mut editor,
        &Notification::DoubleClick {
            position: 2,
            line: 0
        }
    ));

    click(&mut editor, boundary(0, 2), 1_200);
    assert_eq!(ranges(&editor), vec![(0, 12)]);
}

#[test]
fn test_slow_clicks_are_single() {
    let mut editor = test_editor(TEXT, 0);

    click(&mut editor, boundary(0, 2), 1_000);
    click(&mut editor, boundary(0, 2), 2_000);

    assert_eq!(ranges(&editor), vec![(2, 2)]);
}

#[test]
fn test_click_commits_composition() {
    let mut editor = test_editor("ab", 2);
    editor.on_composition(&CompositionEvent::preedit("x").with_cursor(1));

    click(&mut editor, boundary(0, 0), 1_000);

    assert_eq!(editor.text(), "abx");
    assert_eq!(ranges(&editor), vec![(0, 0)]);
    assert!(editor.composition().is_idle());
}

// ============================================================================
// Drags
// ============================================================================

#[test]
fn test_drag_selects() {
    let mut editor = test_editor(TEXT, 0);

    editor.on_pointer(&press(PointerButton::Left, boundary(0, 1), 1_000));
    let result = editor.on_pointer(&PointerEvent::moved(boundary(0, 6), Timestamp(1_050)));
    editor.on_pointer(&release(PointerButton::Left, boundary(0, 6), 1_100));

    assert_eq!(result, EventResult::consumed_redraw());
    assert_eq!(ranges(&editor), vec![(1, 6)]);
}

#[test]
fn test_small_move_is_not_a_drag() {
    let mut editor = test_editor(TEXT, 0);

    editor.on_pointer(&press(PointerButton::Left, boundary(0, 1), 1_000));
    let result = editor.on_pointer(&PointerEvent::moved(Point::new(12.0, 10.0), Timestamp(1_050)));

    assert_eq!(result, EventResult::consumed_no_redraw());
    assert_eq!(ranges(&editor), vec![(1, 1)]);
}

#[test]
fn test_move_without_press_bubbles() {
    let mut editor = test_editor(TEXT, 0);

    let result = editor.on_pointer(&PointerEvent::moved(boundary(0, 6), Timestamp(1_000)));

    assert_eq!(result, EventResult::Bubble);
}

#[test]
fn test_word_drag_extends_by_words() {
    let mut editor = test_editor(TEXT, 0);

    click(&mut editor, boundary(0, 2), 1_000);
    editor.on_pointer(&press(PointerButton::Left, boundary(0, 2), 1_100));
    editor.on_pointer(&PointerEvent::moved(boundary(0, 8), Timestamp(1_150)));

    assert_eq!(ranges(&editor), vec![(0, 11)]);
}

// ============================================================================
// Other buttons
// ============================================================================

#[test]
fn test_middle_click_pastes_primary_selection() {
    let mut editor = test_editor_on(Platform::X11, TEXT, 0);
    editor.on_pointer(&press(PointerButton::Left, boundary(0, 1), 1_000));
    editor.on_pointer(&PointerEvent::moved(boundary(0, 6), Timestamp(1_050)));
    editor.on_pointer(&release(PointerButton::Left, boundary(0, 6), 1_100));

    editor.on_pointer(&press(PointerButton::Middle, boundary(1, 0), 2_000));

    assert_eq!(editor.text(), "hello world\nello second line");
    assert_eq!(ranges(&editor), vec![(17, 17)]);
}

#[test]
fn test_middle_click_bubbles_without_selection_clipboard() {
    let mut editor = test_editor_on(Platform::Windows, TEXT, 0);

    let result = editor.on_pointer(&press(PointerButton::Middle, boundary(1, 0), 1_000));

    assert_eq!(result, EventResult::Bubble);
    assert_eq!(editor.text(), TEXT);
}

#[test]
fn test_right_click_inside_selection_keeps_it() {
    let mut editor = test_editor(TEXT, 0);
    editor.set_selection(0, 5);
    editor.take_notifications();

    let point = boundary(0, 2);
    editor.on_pointer(&press(PointerButton::Right, point, 1_000));

    assert_eq!(ranges(&editor), vec![(0, 5)]);
    assert!(has_note(&mut editor, &Notification::ContextMenu { point }));
}

#[test]
fn test_right_click_outside_selection_moves_caret() {
    let mut editor = test_editor(TEXT, 0);
    editor.set_selection(0, 5);

    editor.on_pointer(&press(PointerButton::Right, boundary(0, 8), 1_000));
    editor.on_pointer(&release(PointerButton::Right, boundary(0, 8), 1_010));

    assert_eq!(ranges(&editor), vec![(8, 8)]);
    assert!(has_note(
        &mut editor,
        &Notification::TextAreaClicked {
            line: 0,
            modifiers: KeyMods::NONE
        }
    ));
}

#[test]
fn test_context_menu_can_be_disabled() {
    let config = InputConfig {
        context_menu: false,
        ..InputConfig::for_platform(Platform::X11)
    };
    let mut editor = test_editor_with(config, TEXT, 0);

    editor.on_pointer(&press(PointerButton::Right, boundary(0, 8), 1_000));

    assert!(!editor
        .take_notifications()
        .iter()
        .any(|n| matches!(n, Notification::ContextMenu { .. })));
}

// ============================================================================
// Touch
// ============================================================================

#[test]
fn test_tap_places_caret_and_requests_keyboard() {
    let mut editor = test_editor(TEXT, 0);

    touch(&mut editor, TouchPhase::Pressed, boundary(0, 3), 1_000);
    touch(&mut editor, TouchPhase::Released, boundary(0, 3), 1_050);

    assert_eq!(ranges(&editor), vec![(3, 3)]);
    assert!(has_note(&mut editor, &Notification::ShowSoftKeyboard));
    assert_eq!(editor.next_deadline(), None);
}

#[test]
fn test_slow_release_is_not_a_tap() {
    let mut editor = test_editor(TEXT, 0);

    touch(&mut editor, TouchPhase::Pressed, boundary(0, 3), 1_000);
    touch(&mut editor, TouchPhase::Released, boundary(0, 3), 1_200);

    assert_eq!(ranges(&editor), vec![(0, 0)]);
    assert!(!has_note(&mut editor, &Notification::ShowSoftKeyboard));
}

#[test]
fn test_long_press_opens_context_menu() {
    let mut editor = test_editor(TEXT, 0);
    let point = boundary(0, 3);

    touch(&mut editor, TouchPhase::Pressed, point, 1_000);
    assert_eq!(editor.next_deadline(), Some(Timestamp(1_300)));

    // Too early: nothing happens
    assert_eq!(
        editor.on_timer(Timestamp(1_200)),
        EventResult::consumed_no_redraw()
    );
    assert!(editor.take_notifications().is_empty());

    editor.on_timer(Timestamp(1_300));
    assert_eq!(ranges(&editor), vec![(3, 3)]);
    assert!(has_note(&mut editor, &Notification::ContextMenu { point }));
    assert_eq!(editor.next_deadline(), None);

    touch(&mut editor, TouchPhase::Released, point, 1_350);
    assert!(!has_note(&mut editor, &Notification::ShowSoftKeyboard));
}

#[test]
fn test_touch_move_selects_and_cancels_long_press() {
    let mut editor = test_editor(TEXT, 0);

    touch(&mut editor, TouchPhase::Pressed, boundary(0, 1), 1_000);
    touch(&mut editor, TouchPhase::Moved, boundary(0, 6), 1_050);

    assert_eq!(ranges(&editor), vec![(1, 6)]);
    assert_eq!(editor.next_deadline(), None);
}

#[test]
fn test_touch_ignored_when_read_only() {
    let mut editor = test_editor(TEXT, 0);
    editor.set_read_only(true);

    let result = editor.on_touch(&TouchEvent::new(
        TouchPhase::Pressed,
        boundary(0, 3),
        Timestamp(1_000),
    ));

    assert_eq!(result, EventResult::Bubble);
    assert_eq!(editor.next_deadline(), None);
}

#[test]
fn test_focus_loss_cancels_long_press() {
    let mut editor = test_editor(TEXT, 0);
    editor.on_focus(true);

    touch(&mut editor, TouchPhase::Pressed, boundary(0, 3), 1_000);
    editor.on_focus(false);

    assert_eq!(editor.next_deadline(), None);
}

#[test]
fn test_read_only_cancels_long_press() {
    let mut editor = test_editor(TEXT, 0);

    touch(&mut editor, TouchPhase::Pressed, boundary(0, 3), 1_000);
    editor.set_read_only(true);

    assert_eq!(editor.next_deadline(), None);
}

// ============================================================================
// Wheel
// ============================================================================

#[test]
fn test_ctrl_wheel_zooms() {
    let mut editor = test_editor(TEXT, 0);

    let result = editor.on_wheel(&WheelEvent::new(1.0, KeyMods::CTRL));
    assert_eq!(result, EventResult::consumed_redraw());
    assert_eq!(editor.zoom(), 1);
    assert!(has_note(&mut editor, &Notification::Zoom { level: 1 }));

    editor.on_wheel(&WheelEvent::new(-3.0, KeyMods::CTRL));
    editor.on_wheel(&WheelEvent::new(-0.5, KeyMods::CTRL));
    assert_eq!(editor.zoom(), -1);
}

#[test]
fn test_plain_wheel_bubbles() {
    let mut editor = test_editor(TEXT, 0);

    assert_eq!(
        editor.on_wheel(&WheelEvent::new(2.0, KeyMods::NONE)),
        EventResult::Bubble
    );
    assert_eq!(
        editor.on_wheel(&WheelEvent::new(0.0, KeyMods::CTRL)),
        EventResult::Bubble
    );
    assert_eq!(editor.zoom(), 0);
    assert!(editor.take_notifications().is_empty());
}
