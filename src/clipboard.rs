//! Clipboard access, injected into the editor.
//!
//! [`SystemClipboard`] talks to the OS through `arboard`; [`MemoryClipboard`]
//! keeps text in process and is what tests and the replay tool use.

/// Which clipboard buffer to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipboardKind {
    /// The regular copy/paste clipboard
    Standard,
    /// The X11 primary selection (filled on select, pasted with the middle button)
    Selection,
}

pub trait Clipboard {
    fn get_text(&mut self, kind: ClipboardKind) -> Option<String>;

    fn set_text(&mut self, kind: ClipboardKind, text: &str);
}

/// OS clipboard. Failures are logged and otherwise ignored.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self, kind: ClipboardKind) -> Option<String> {
        let mut clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                return None;
            }
        };
        match kind {
            ClipboardKind::Standard => clipboard.get_text().ok(),
            ClipboardKind::Selection => selection_get(&mut clipboard),
        }
    }

    fn set_text(&mut self, kind: ClipboardKind, text: &str) {
        let Ok(mut clipboard) = arboard::Clipboard::new() else {
            tracing::warn!("Clipboard unavailable");
            return;
        };
        let result = match kind {
            ClipboardKind::Standard => clipboard.set_text(text),
            ClipboardKind::Selection => selection_set(&mut clipboard, text),
        };
        if let Err(e) = result {
            tracing::debug!("Failed to set clipboard text: {}", e);
        }
    }
}

#[cfg(target_os = "linux")]
fn selection_get(clipboard: &mut arboard::Clipboard) -> Option<String> {
    use arboard::{GetExtLinux, LinuxClipboardKind};
    clipboard
        .get()
        .clipboard(LinuxClipboardKind::Primary)
        .text()
        .ok()
}

#[cfg(target_os = "linux")]
fn selection_set(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::{LinuxClipboardKind, SetExtLinux};
    clipboard
        .set()
        .clipboard(LinuxClipboardKind::Primary)
        .text(text.to_string())
}

#[cfg(not(target_os = "linux"))]
fn selection_get(_clipboard: &mut arboard::Clipboard) -> Option<String> {
    None
}

#[cfg(not(target_os = "linux"))]
fn selection_set(_clipboard: &mut arboard::Clipboard, _text: &str) -> Result<(), arboard::Error> {
    Ok(())
}

/// In-process clipboard with one buffer per kind.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    standard: Option<String>,
    selection: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self, kind: ClipboardKind) -> Option<String> {
        match kind {
            ClipboardKind::Standard => self.standard.clone(),
            ClipboardKind::Selection => self.selection.clone(),
        }
    }

    fn set_text(&mut self, kind: ClipboardKind, text: &str) {
        let slot = match kind {
            ClipboardKind::Standard => &mut self.standard,
            ClipboardKind::Selection => &mut self.selection,
        };
        *slot = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_keeps_buffers_apart() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.get_text(ClipboardKind::Standard), None);
        clipboard.set_text(ClipboardKind::Standard, "copy");
        clipboard.set_text(ClipboardKind::Selection, "select");
        assert_eq!(
            clipboard.get_text(ClipboardKind::Standard).as_deref(),
            Some("copy")
        );
        assert_eq!(
            clipboard.get_text(ClipboardKind::Selection).as_deref(),
            Some("select")
        );
    }
}
