//! Korean script detection for composition caret handling.

/// Whether `ch` is Hangul: jamo, compatibility jamo, jamo extended A/B, or a
/// precomposed syllable.
pub fn is_hangul(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x1100..=0x11FF | 0x3130..=0x318F | 0xA960..=0xA97F | 0xD7B0..=0xD7FF | 0xAC00..=0xD7A3
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hangul_ranges() {
        assert!(is_hangul('한'));
        assert!(is_hangul('\u{1100}'));
        assert!(is_hangul('ㄱ'));
        assert!(is_hangul('\u{A960}'));
        assert!(is_hangul('\u{D7FF}'));
        assert!(!is_hangul('が'));
        assert!(!is_hangul('a'));
        assert!(!is_hangul('\u{1200}'));
    }
}
