//! Input event normalization.
//!
//! [`keys`] holds the platform-neutral key model and the rules that turn a
//! key press into an engine key or inserted text; [`winit_adapter`] converts
//! winit events into that model.

pub mod keys;
pub mod winit_adapter;

pub use keys::{
    engine_key, insertable_text, normalize, text_input_allowed, EngineKey, KeyEvent, KeyMods,
    NamedKey, NormalizedKey, RawKey,
};
