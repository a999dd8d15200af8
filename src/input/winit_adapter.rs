//! Adapter to convert winit input events to the core's event types

use winit::event::{Ime, MouseButton, TouchPhase as WinitTouchPhase};
use winit::keyboard::{Key, ModifiersState, NamedKey as WinitNamedKey};

use super::keys::{KeyEvent, KeyMods, NamedKey, RawKey};
use crate::gesture::{PointerButton, TouchPhase};
use crate::ime::{CompositionEvent, TextFormat, UnderlineStyle};
use crate::util::utf16::utf16_offset_of;

pub fn mods_from_winit(state: ModifiersState) -> KeyMods {
    KeyMods::new(
        state.control_key(),
        state.shift_key(),
        state.alt_key(),
        state.super_key(), // logo = meta = cmd on macOS
    )
}

/// Convert winit key event data to a [`KeyEvent`]
///
/// Returns None for dead and unidentified keys; the input method handles those.
pub fn key_event_from_winit(
    logical_key: &Key,
    text: Option<&str>,
    modifiers: ModifiersState,
) -> Option<KeyEvent> {
    let key = match logical_key {
        Key::Named(named) => RawKey::Named(match named {
            WinitNamedKey::ArrowUp => NamedKey::ArrowUp,
            WinitNamedKey::ArrowDown => NamedKey::ArrowDown,
            WinitNamedKey::ArrowLeft => NamedKey::ArrowLeft,
            WinitNamedKey::ArrowRight => NamedKey::ArrowRight,
            WinitNamedKey::Home => NamedKey::Home,
            WinitNamedKey::End => NamedKey::End,
            WinitNamedKey::PageUp => NamedKey::PageUp,
            WinitNamedKey::PageDown => NamedKey::PageDown,
            WinitNamedKey::Delete => NamedKey::Delete,
            WinitNamedKey::Insert => NamedKey::Insert,
            WinitNamedKey::Escape => NamedKey::Escape,
            WinitNamedKey::Backspace => NamedKey::Backspace,
            WinitNamedKey::Tab => NamedKey::Tab,
            WinitNamedKey::Enter => NamedKey::Enter,
            WinitNamedKey::Space => NamedKey::Space,
            WinitNamedKey::Control => NamedKey::Control,
            WinitNamedKey::Alt | WinitNamedKey::AltGraph => NamedKey::Alt,
            WinitNamedKey::Shift => NamedKey::Shift,
            WinitNamedKey::Super | WinitNamedKey::Meta => NamedKey::Meta,
            _ => NamedKey::Other,
        }),
        Key::Character(s) => RawKey::Character(s.chars().next()?),
        _ => return None,
    };

    Some(KeyEvent {
        key,
        modifiers: mods_from_winit(modifiers),
        text: text.map(str::to_string),
    })
}

pub fn pointer_button_from_winit(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Left),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Right => Some(PointerButton::Right),
        _ => None,
    }
}

pub fn touch_phase_from_winit(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Pressed,
        WinitTouchPhase::Moved => TouchPhase::Moved,
        WinitTouchPhase::Ended => TouchPhase::Released,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

/// Convert a winit IME event into a composition event.
///
/// winit reports the preedit cursor as a byte range. The whole preedit is
/// marked as raw input, a non-empty cursor range as the conversion target,
/// and the caret goes to the end of the cursor range. `Enabled` carries no
/// composition and maps to None; `Disabled` ends any composition.
pub fn composition_from_winit(ime: &Ime) -> Option<CompositionEvent> {
    match ime {
        Ime::Enabled => None,
        Ime::Preedit(text, cursor) => {
            if text.is_empty() {
                return Some(CompositionEvent::empty());
            }
            let len = text.encode_utf16().count();
            let mut event = CompositionEvent::preedit(text.as_str()).with_format(
                0,
                len,
                TextFormat::underline(UnderlineStyle::Single),
            );
            match cursor {
                Some((start, end)) => {
                    let start = utf16_offset_of(text, *start);
                    let end = utf16_offset_of(text, *end);
                    if end > start {
                        event = event.with_format(
                            start,
                            end - start,
                            TextFormat::underline(UnderlineStyle::Single).with_background(),
                        );
                    }
                    event = event.with_cursor(end);
                }
                None => {
                    event = event.with_attribute(crate::ime::ImeAttribute::Cursor {
                        position: len,
                        visible: false,
                    });
                }
            }
            Some(event)
        }
        Ime::Commit(text) => Some(CompositionEvent::commit(text.as_str())),
        Ime::Disabled => Some(CompositionEvent::empty()),
    }
}
