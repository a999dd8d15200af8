//! Input-method composition: event model, indicator mapping and state.
//!
//! The state machine that drives these lives in `editor::composition`,
//! since every step edits the document and moves carets.

pub mod event;
pub mod hangul;
pub mod indicator;
pub mod state;

pub use event::{CompositionEvent, ImeAttribute, TextFormat, UnderlineStyle};
pub use hangul::is_hangul;
pub use indicator::{
    is_valid_indicator, map_ime_indicators, IndicatorKind, IndicatorStyle, INDICATOR_CONTAINER,
    INDICATOR_IME, INDICATOR_MAX,
};
pub use state::{CompositionPhase, CompositionState};
