//! Mapping of input-method text formats onto document indicators.

use super::event::{CompositionEvent, ImeAttribute, UnderlineStyle};

/// First indicator id available to containers
pub const INDICATOR_CONTAINER: usize = 8;
/// First of the four indicator ids reserved for input methods
pub const INDICATOR_IME: usize = 32;
pub const INDICATOR_MAX: usize = 35;

/// Visual role of a preedit character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    /// Raw input not yet converted
    Input,
    /// The clause being converted
    Target,
    /// Already converted text
    Converted,
    Unknown,
}

/// How an indicator is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorStyle {
    Hidden,
    Dots,
    CompositionThick,
    StraightBox,
}

pub const IME_INDICATOR_COLOR: [u8; 3] = [0, 0, 255];

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 4] = [
        IndicatorKind::Input,
        IndicatorKind::Target,
        IndicatorKind::Converted,
        IndicatorKind::Unknown,
    ];

    pub fn id(self) -> usize {
        match self {
            Self::Input => INDICATOR_IME,
            Self::Target => INDICATOR_IME + 1,
            Self::Converted => INDICATOR_IME + 2,
            Self::Unknown => INDICATOR_IME + 3,
        }
    }

    pub fn style(self) -> IndicatorStyle {
        match self {
            Self::Unknown => IndicatorStyle::Hidden,
            Self::Input => IndicatorStyle::Dots,
            Self::Converted => IndicatorStyle::CompositionThick,
            Self::Target => IndicatorStyle::StraightBox,
        }
    }

    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

/// Whether `id` names a paintable indicator
pub fn is_valid_indicator(id: usize) -> bool {
    (INDICATOR_CONTAINER..=INDICATOR_MAX).contains(&id)
}

/// Indicator for every UTF-16 unit of the preedit.
///
/// Later attributes overwrite earlier ones. With `dark_underline_is_target`,
/// a single underline in a near-black colour marks the conversion target.
pub fn map_ime_indicators(
    event: &CompositionEvent,
    dark_underline_is_target: bool,
) -> Vec<IndicatorKind> {
    let len = event.preedit.encode_utf16().count();
    let mut kinds = vec![IndicatorKind::Unknown; len];

    for attr in &event.attributes {
        let ImeAttribute::TextFormat {
            start,
            length,
            format,
        } = attr
        else {
            continue;
        };

        let mut kind = match format.underline {
            UnderlineStyle::NoUnderline => IndicatorKind::Target,
            UnderlineStyle::Single | UnderlineStyle::Dash => IndicatorKind::Input,
            UnderlineStyle::Dot
            | UnderlineStyle::DashDot
            | UnderlineStyle::Wave
            | UnderlineStyle::SpellCheck => IndicatorKind::Converted,
            UnderlineStyle::DashDotDot => IndicatorKind::Unknown,
        };
        if format.background {
            kind = IndicatorKind::Target;
        }
        if dark_underline_is_target
            && format.underline == UnderlineStyle::Single
            && format.underline_lightness().is_some_and(|l| l < 2)
        {
            kind = IndicatorKind::Target;
        }

        let end = start.saturating_add(*length).min(len);
        for slot in kinds.iter_mut().take(end).skip(*start) {
            *slot = kind;
        }
    }
    kinds
}
