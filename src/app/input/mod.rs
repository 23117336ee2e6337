//! Input handling system
//!
//! ```text
//! Raw Input (winit) → InputCollector → InputState (key table)
//!                                          ↓
//!                                   bindings::controls
//!                                          ↓
//!                                 Controls → Game::update
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // In window_event()
//! collector.handle_window_event(&event);
//!
//! // Each redraw, before the frame is drawn
//! let controls = bindings::controls(collector.state());
//! game.update(&controls);
//! collector.advance_frame();
//! ```

pub mod bindings;
mod collector;
mod keys;
mod state;

pub use collector::InputCollector;
pub use keys::Key;
pub use state::{ButtonState, InputState};
