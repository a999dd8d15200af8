//! Character classification used for word-wise caret movement and selection
//!
//! The word classes (`is_punctuation`, `CharType`, `char_type`) are shared
//! word-boundary logic: double-click selection, ctrl+arrow motion and word
//! deletion all use them.

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
    )
}

/// Character type for word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    /// Whitespace characters
    Whitespace,
    /// Alphanumeric characters (word characters)
    WordChar,
    /// Punctuation and symbols
    Punctuation,
}

/// Get the character type for word navigation
pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

/// Whether typed text starting with `ch` should be inserted into the document.
///
/// Control characters (Ctrl+letter chords delivered as text, escape, DEL)
/// are never inserted.
pub fn is_printable(ch: char) -> bool {
    !ch.is_control()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_type() {
        assert_eq!(char_type('a'), CharType::WordChar);
        assert_eq!(char_type('가'), CharType::WordChar);
        assert_eq!(char_type(' '), CharType::Whitespace);
        assert_eq!(char_type('\t'), CharType::Whitespace);
        assert_eq!(char_type('.'), CharType::Punctuation);
    }

    #[test]
    fn test_is_printable() {
        assert!(is_printable('a'));
        assert!(is_printable('é'));
        assert!(is_printable(' '));
        assert!(!is_printable('\u{1b}'));
        assert!(!is_printable('\u{1}'));
        assert!(!is_printable('\u{7f}'));
    }
}
