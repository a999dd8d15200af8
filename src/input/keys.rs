//! Platform-neutral key events and their translation to engine keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::is_printable;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMods(u8);

impl KeyMods {
    pub const NONE: KeyMods = KeyMods(0);
    pub const CTRL: KeyMods = KeyMods(0b0001);
    pub const SHIFT: KeyMods = KeyMods(0b0010);
    pub const ALT: KeyMods = KeyMods(0b0100);
    pub const META: KeyMods = KeyMods(0b1000);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= Self::CTRL.0;
        }
        if shift {
            bits |= Self::SHIFT.0;
        }
        if alt {
            bits |= Self::ALT.0;
        }
        if meta {
            bits |= Self::META.0;
        }
        KeyMods(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & Self::META.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for KeyMods {
    type Output = KeyMods;

    fn bitor(self, rhs: Self) -> Self::Output {
        KeyMods(self.0 | rhs.0)
    }
}

impl fmt::Display for KeyMods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Named (non-character) keys a platform can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Insert,
    Escape,
    Backspace,
    Tab,
    Backtab,
    Enter,
    Return,
    Space,
    Control,
    Alt,
    Shift,
    Meta,
    /// Anything the core has no use for (function keys, media keys...)
    Other,
}

/// A key as reported by the platform, before normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawKey {
    Named(NamedKey),
    Character(char),
}

/// A key press with its modifiers and the text it would produce.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: RawKey,
    #[serde(default)]
    pub modifiers: KeyMods,
    #[serde(default)]
    pub text: Option<String>,
}

impl KeyEvent {
    pub fn named(key: NamedKey, modifiers: KeyMods) -> Self {
        Self {
            key: RawKey::Named(key),
            modifiers,
            text: None,
        }
    }

    /// A character key that types its own character
    pub fn character(ch: char, modifiers: KeyMods) -> Self {
        Self {
            key: RawKey::Character(ch),
            modifiers,
            text: Some(ch.to_string()),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Keys the editing engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineKey {
    Down,
    Up,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Insert,
    Escape,
    Backspace,
    Add,
    Subtract,
    Tab,
    Return,
    /// Any other character key, ASCII letters upper-cased
    Char(char),
    /// Bare modifier keys and keys with no engine meaning
    None,
}

/// Outcome of normalizing a platform key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizedKey {
    /// Shortcut for the host; the core does not look at it
    Forward,
    Engine { key: EngineKey, mods: KeyMods },
}

/// Map a platform key onto an engine key
pub fn engine_key(key: RawKey) -> EngineKey {
    match key {
        RawKey::Named(named) => match named {
            NamedKey::ArrowDown => EngineKey::Down,
            NamedKey::ArrowUp => EngineKey::Up,
            NamedKey::ArrowLeft => EngineKey::Left,
            NamedKey::ArrowRight => EngineKey::Right,
            NamedKey::Home => EngineKey::Home,
            NamedKey::End => EngineKey::End,
            NamedKey::PageUp => EngineKey::PageUp,
            NamedKey::PageDown => EngineKey::PageDown,
            NamedKey::Delete => EngineKey::Delete,
            NamedKey::Insert => EngineKey::Insert,
            NamedKey::Escape => EngineKey::Escape,
            NamedKey::Backspace => EngineKey::Backspace,
            NamedKey::Backtab | NamedKey::Tab => EngineKey::Tab,
            NamedKey::Enter | NamedKey::Return => EngineKey::Return,
            NamedKey::Space => EngineKey::Char(' '),
            NamedKey::Control | NamedKey::Alt | NamedKey::Shift | NamedKey::Meta => {
                EngineKey::None
            }
            NamedKey::Other => EngineKey::None,
        },
        RawKey::Character('+') => EngineKey::Add,
        RawKey::Character('-') => EngineKey::Subtract,
        RawKey::Character(ch) => EngineKey::Char(ch.to_ascii_uppercase()),
    }
}

/// Normalize a key event. Anything carrying meta is forwarded untouched.
pub fn normalize(event: &KeyEvent) -> NormalizedKey {
    if event.modifiers.meta() {
        return NormalizedKey::Forward;
    }
    NormalizedKey::Engine {
        key: engine_key(event.key),
        mods: event.modifiers,
    }
}

/// Whether a key press with `mods` may insert its text.
///
/// Ctrl suppresses text unless alt is also held (AltGr). Where alt does not
/// compose characters, alt alone suppresses it too.
pub fn text_input_allowed(mods: KeyMods, alt_composes_characters: bool) -> bool {
    let mut input = !mods.ctrl() || mods.alt();
    if !alt_composes_characters {
        input &= !mods.alt() || mods.ctrl();
    }
    input
}

/// Text of `event` that should be inserted, if any
pub fn insertable_text(event: &KeyEvent, alt_composes_characters: bool) -> Option<&str> {
    if !text_input_allowed(event.modifiers, alt_composes_characters) {
        return None;
    }
    let text = event.text.as_deref()?;
    match text.chars().next() {
        Some(first) if is_printable(first) => Some(text),
        _ => None,
    }
}
