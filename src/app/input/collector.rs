//! Raw input collection from winit events

use tracing::trace;
use winit::event::{ElementState, WindowEvent};

use super::keys::Key;
use super::state::InputState;

/// Collects raw input from winit events and maintains InputState
#[derive(Debug, Default)]
pub struct InputCollector {
    state: InputState,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let Some(key) = Key::from_physical(event.physical_key) else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => self.state.press(key),
                    ElementState::Released => self.state.release(key),
                }
                trace!(?key, state = ?self.state.keys[key], "Key event");
            }

            // Keys released while unfocused never reach us
            WindowEvent::Focused(false) => self.state.release_all(),

            _ => {}
        }
    }

    /// Advance to next frame (transitions edge states to steady states)
    pub fn advance_frame(&mut self) {
        self.state.advance_frame();
    }

    /// Get current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }
}
