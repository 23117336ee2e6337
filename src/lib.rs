//! Spaceship Game
//!
//! Fly a spaceship through a field of meteors. Built with winit, wgpu and
//! egui; the game logic runs headless for tests and preflight checks.

/// Game application - windowing, rendering, and input handling
pub mod app;

/// Build-time information (git SHA, timestamp, compiler)
pub mod build_info;

/// Layered configuration: profile files, then environment
pub mod config;

pub mod error;

/// Startup checks that run without a window
pub mod preflight;

/// Game simulation - sprites, collision, state machine
pub mod sim;
