//! Game application module
//!
//! Handles windowing, rendering, and user input. The game logic itself lives
//! in [`crate::sim`]; this module feeds it controls and draws what it submits.

pub mod debug_ui;
pub mod input;
pub mod renderer;
mod runner;
mod window;

pub use runner::App;
pub use window::window_attributes;
