//! preedit - input-method composition and pointer/selection handling
//!
//! This crate turns raw platform input (key presses, mouse and touch
//! gestures, input-method preedit/commit sequences) into edits of a text
//! document while keeping carets, selections and composition indicators
//! consistent.
//!
//! The [`editor::Editor`] owns the state and implements
//! [`surface::EditorSurface`]; host adapters in [`adapters`] forward toolkit
//! events to it.

pub mod adapters;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod config_paths;
pub mod coords;
pub mod document;
pub mod editor;
pub mod gesture;
pub mod ime;
pub mod input;
pub mod messages;
pub mod notify;
pub mod selection;
pub mod surface;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use config::InputConfig;
pub use document::{DocumentFacade, RopeDocument};
pub use editor::Editor;
pub use messages::Msg;
pub use surface::{EditorSurface, EventResult};
