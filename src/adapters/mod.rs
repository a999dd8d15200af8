//! Host adapters: thin layers that translate a toolkit's events into
//! [`EditorSurface`](crate::surface::EditorSurface) calls.
//!
//! - [`desktop`]: winit window events, wall-clock timestamps
//! - [`quick`]: a touch-first declarative item (forced focus, scroll-view
//!   interaction toggles, IME rectangles offset by the item margin)

pub mod desktop;
pub mod quick;

pub use desktop::DesktopAdapter;
pub use quick::{HostSignal, QuickEvent, QuickItemAdapter, ITEM_MARGIN};

use crate::surface::{EditorSurface, EventResult};

/// A host integration owning an editor surface.
pub trait HostAdapter {
    /// The host's native event type
    type Event;
    type Surface: EditorSurface;

    fn handle_event(&mut self, event: Self::Event) -> EventResult;

    fn surface(&self) -> &Self::Surface;

    fn surface_mut(&mut self) -> &mut Self::Surface;
}
