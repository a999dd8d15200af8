//! UTF-16 helpers for text coming from platform input methods.
//!
//! Input methods report strings and offsets in UTF-16 code units. The
//! document stores UTF-8, so every preedit/commit string is walked one code
//! point at a time, keeping a surrogate pair together.

/// One character of a string, positioned in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePoint {
    /// Index of the first code unit
    pub index: usize,
    /// Number of code units (1, or 2 for a surrogate pair)
    pub width: usize,
    pub ch: char,
}

/// Iterator over the characters of a string with their UTF-16 positions.
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    chars: std::str::Chars<'a>,
    index: usize,
}

impl Iterator for CodePoints<'_> {
    type Item = CodePoint;

    fn next(&mut self) -> Option<CodePoint> {
        let ch = self.chars.next()?;
        let index = self.index;
        let width = ch.len_utf16();
        self.index += width;
        Some(CodePoint { index, width, ch })
    }
}

/// Walk `text` one code point at a time.
///
/// `&str` cannot hold an unpaired surrogate, so every UTF-16 pair arrives
/// here already joined into one `char`.
pub fn code_points(text: &str) -> CodePoints<'_> {
    CodePoints {
        chars: text.chars(),
        index: 0,
    }
}

/// Encode a Rust string as UTF-16 code units.
pub fn encode(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Convert a UTF-8 byte offset within `text` into a UTF-16 offset.
///
/// Offsets inside a character or past the end are clamped.
pub fn utf16_offset_of(text: &str, byte_offset: usize) -> usize {
    let mut utf16 = 0;
    for (i, ch) in text.char_indices() {
        if i >= byte_offset {
            break;
        }
        utf16 += ch.len_utf16();
    }
    utf16
}
