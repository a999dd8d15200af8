//! Platform-neutral input-method event.
//!
//! Offsets and lengths in attributes are UTF-16 code units, as every
//! platform input method reports them.

use serde::{Deserialize, Serialize};

use crate::util::utf16;

/// Underline style requested for a run of preedit text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderlineStyle {
    #[default]
    NoUnderline,
    Single,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
    Wave,
    SpellCheck,
}

/// Character format of a preedit run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormat {
    #[serde(default)]
    pub underline: UnderlineStyle,
    /// A background brush is present
    #[serde(default)]
    pub background: bool,
    /// Underline colour as RGB, when the input method sets one
    #[serde(default)]
    pub underline_color: Option<[u8; 3]>,
}

impl TextFormat {
    pub fn underline(underline: UnderlineStyle) -> Self {
        Self {
            underline,
            ..Self::default()
        }
    }

    pub fn with_background(mut self) -> Self {
        self.background = true;
        self
    }

    pub fn with_underline_color(mut self, rgb: [u8; 3]) -> Self {
        self.underline_color = Some(rgb);
        self
    }

    /// HSL lightness (0..=255) of the underline colour
    pub fn underline_lightness(&self) -> Option<u8> {
        self.underline_color.map(|[r, g, b]| {
            let max = r.max(g).max(b) as u16;
            let min = r.min(g).min(b) as u16;
            ((max + min) / 2) as u8
        })
    }
}

/// One attribute attached to a composition event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImeAttribute {
    /// Format for `length` units of the preedit starting at `start`
    TextFormat {
        start: usize,
        length: usize,
        #[serde(default)]
        format: TextFormat,
    },
    /// Caret inside the preedit
    Cursor {
        position: usize,
        #[serde(default = "default_visible")]
        visible: bool,
    },
    /// Selection relative to the start of the current paragraph
    Selection { start: usize, length: isize },
}

fn default_visible() -> bool {
    true
}

/// A composition update from the input method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionEvent {
    #[serde(default)]
    pub preedit: String,
    #[serde(default)]
    pub commit: String,
    #[serde(default)]
    pub attributes: Vec<ImeAttribute>,
}

impl CompositionEvent {
    pub fn preedit(text: impl Into<String>) -> Self {
        Self {
            preedit: text.into(),
            ..Self::default()
        }
    }

    pub fn commit(text: impl Into<String>) -> Self {
        Self {
            commit: text.into(),
            ..Self::default()
        }
    }

    /// Event with neither preedit nor commit text
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, attribute: ImeAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_cursor(self, position: usize) -> Self {
        self.with_attribute(ImeAttribute::Cursor {
            position,
            visible: true,
        })
    }

    pub fn with_format(self, start: usize, length: usize, format: TextFormat) -> Self {
        self.with_attribute(ImeAttribute::TextFormat {
            start,
            length,
            format,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.preedit.is_empty() && self.commit.is_empty()
    }

    pub fn preedit_utf16(&self) -> Vec<u16> {
        utf16::encode(&self.preedit)
    }

    /// Caret offset inside the preedit; 0 when no cursor attribute is given
    pub fn cursor_position(&self) -> usize {
        self.attributes
            .iter()
            .find_map(|a| match a {
                ImeAttribute::Cursor { position, .. } => Some(*position),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Selection attributes as (start, length) pairs, in event order
    pub fn selections(&self) -> impl Iterator<Item = (usize, isize)> + '_ {
        self.attributes.iter().filter_map(|a| match a {
            ImeAttribute::Selection { start, length } => Some((*start, *length)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_position_defaults_to_zero() {
        assert_eq!(CompositionEvent::preedit("abc").cursor_position(), 0);
        assert_eq!(
            CompositionEvent::preedit("abc").with_cursor(2).cursor_position(),
            2
        );
    }

    #[test]
    fn test_underline_lightness() {
        let dark = TextFormat::underline(UnderlineStyle::Single).with_underline_color([0, 0, 1]);
        assert_eq!(dark.underline_lightness(), Some(0));
        let grey = TextFormat::default().with_underline_color([100, 120, 140]);
        assert_eq!(grey.underline_lightness(), Some(120));
        assert_eq!(TextFormat::default().underline_lightness(), None);
    }

    #[test]
    fn test_deserialize_event() {
        let json = r#"{
            "preedit": "かな",
            "attributes": [
                {"kind": "text_format", "start": 0, "length": 2,
                 "format": {"underline": "dash"}},
                {"kind": "cursor", "position": 2}
            ]
        }"#;
        let event: CompositionEvent = serde_json::from_str(json).unwrap();
        assert!(event.commit.is_empty());
        assert_eq!(event.cursor_position(), 2);
        assert_eq!(
            event.attributes[0],
            ImeAttribute::TextFormat {
                start: 0,
                length: 2,
                format: TextFormat::underline(UnderlineStyle::Dash),
            }
        );
    }
}
