//! winit window events → editor surface.

use std::time::{Duration, Instant};

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::ModifiersState;

use super::HostAdapter;
use crate::coords::Point;
use crate::gesture::{PointerEvent, Timestamp, TouchEvent, WheelEvent};
use crate::input::winit_adapter::{
    composition_from_winit, key_event_from_winit, mods_from_winit, pointer_button_from_winit,
    touch_phase_from_winit,
};
use crate::surface::{EditorSurface, EventResult};

/// Desktop window host. Timestamps are milliseconds since the adapter was created.
pub struct DesktopAdapter<S: EditorSurface> {
    surface: S,
    origin: Instant,
    modifiers: ModifiersState,
    cursor: Point,
}

impl<S: EditorSurface> DesktopAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            origin: Instant::now(),
            modifiers: ModifiersState::empty(),
            cursor: Point::default(),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.origin.elapsed().as_millis() as u64)
    }

    /// When the event loop should wake up next (for `ControlFlow::WaitUntil`)
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.surface
            .next_deadline()
            .map(|deadline| self.origin + Duration::from_millis(deadline.as_millis()))
    }

    /// Fire timers that are due; call from `about_to_wait`
    pub fn tick(&mut self) -> EventResult {
        let now = self.now();
        match self.surface.next_deadline() {
            Some(deadline) if deadline <= now => self.surface.on_timer(now),
            _ => EventResult::Bubble,
        }
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: EditorSurface> HostAdapter for DesktopAdapter<S> {
    type Event = WindowEvent;
    type Surface = S;

    fn handle_event(&mut self, event: WindowEvent) -> EventResult {
        let time = self.now();
        let mods = mods_from_winit(self.modifiers);

        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                EventResult::Bubble
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return EventResult::Bubble;
                }
                match key_event_from_winit(&event.logical_key, event.text.as_deref(), self.modifiers) {
                    Some(key) => self.surface.on_key(&key),
                    None => EventResult::Bubble,
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x, position.y);
                self.surface
                    .on_pointer(&PointerEvent::moved(self.cursor, time).with_modifiers(mods))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = pointer_button_from_winit(button) else {
                    return EventResult::Bubble;
                };
                let event = match state {
                    ElementState::Pressed => PointerEvent::down(button, self.cursor, time),
                    ElementState::Released => PointerEvent::up(button, self.cursor, time),
                };
                self.surface.on_pointer(&event.with_modifiers(mods))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(y),
                    MouseScrollDelta::PixelDelta(pos) => pos.y,
                };
                self.surface.on_wheel(&WheelEvent::new(lines, mods))
            }
            WindowEvent::Touch(touch) => {
                let point = Point::new(touch.location.x, touch.location.y);
                let event = TouchEvent::new(touch_phase_from_winit(touch.phase), point, time);
                self.surface.on_touch(&event)
            }
            WindowEvent::Ime(ime) => match composition_from_winit(&ime) {
                Some(composition) => self.surface.on_composition(&composition),
                None => EventResult::consumed_no_redraw(),
            },
            WindowEvent::Focused(focused) => self.surface.on_focus(focused),
            _ => EventResult::Bubble,
        }
    }

    fn surface(&self) -> &S {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
