//! Debug UI state and rendering

use std::time::Instant;

use sysinfo::System;

use super::renderer::Renderer;
use crate::build_info;
use crate::sim::Game;

/// Renderer figures shown in the overlay
///
/// Captured before the frame is drawn, since the renderer is busy while the
/// overlay is built.
#[derive(Debug, Clone)]
pub struct RendererStats {
    pub adapter: String,
    pub backend: wgpu::Backend,
    pub surface_size: [u32; 2],
    pub format: wgpu::TextureFormat,
    pub sprites: usize,
    pub textures: usize,
}

impl RendererStats {
    pub fn capture(renderer: &Renderer) -> Self {
        let config = renderer.config();
        let adapter = renderer.adapter_info();
        Self {
            adapter: adapter.name.clone(),
            backend: adapter.backend,
            surface_size: [config.width, config.height],
            format: config.format,
            sprites: renderer.sprite_count(),
            textures: renderer.texture_count(),
        }
    }
}

/// Frame times kept for the FPS average
const FRAME_WINDOW: usize = 100;

/// Debug UI state for toggling different panels
#[derive(Debug, Clone)]
pub struct DebugUIState {
    pub show_window: bool,
    pub show_fps: bool,
    pub show_game_state: bool,
    pub show_actors: bool,
    pub show_renderer_info: bool,
    pub show_system_info: bool,
    frame_times: Vec<f32>,
    last_frame_time: Instant,
}

impl Default for DebugUIState {
    fn default() -> Self {
        Self {
            show_window: cfg!(debug_assertions),
            show_fps: true,
            show_game_state: true,
            show_actors: false,
            show_renderer_info: true,
            show_system_info: false,
            frame_times: Vec::with_capacity(FRAME_WINDOW),
            last_frame_time: Instant::now(),
        }
    }
}

impl DebugUIState {
    /// Toggles the debug window visibility
    pub fn toggle_window(&mut self) {
        self.show_window = !self.show_window;
    }

    /// Updates frame timing information
    pub fn update_frame_time(&mut self) {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FRAME_WINDOW {
            self.frame_times.remove(0);
        }
    }

    /// Gets the current FPS
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg_frame_time: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// Renders the debug UI
    pub fn render(&mut self, ctx: &egui::Context, game: &Game, stats: &RendererStats) {
        // Keep timing current even while hidden so the first shown value is sane
        self.update_frame_time();

        if !self.show_window {
            return;
        }

        egui::Window::new("Debug Info")
            .default_pos([10.0, 40.0])
            .default_width(300.0)
            .resizable(true)
            .scroll([false, true])
            .show(ctx, |ui| {
                ui.heading("Categories");
                ui.separator();

                ui.checkbox(&mut self.show_fps, "FPS");
                ui.checkbox(&mut self.show_game_state, "Game State");
                ui.checkbox(&mut self.show_actors, "Actors");
                ui.checkbox(&mut self.show_renderer_info, "Renderer Info");
                ui.checkbox(&mut self.show_system_info, "System Info");

                ui.separator();

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if self.show_fps {
                            ui.heading("FPS");
                            ui.label(format!("FPS: {:.1}", self.fps()));
                            let last = self.frame_times.last().copied().unwrap_or(0.0);
                            ui.label(format!("Frame time: {:.2}ms", last * 1000.0));
                            ui.separator();
                        }

                        if self.show_game_state {
                            ui.heading("Game State");
                            ui.label(format!("State: {:?}", game.state()));
                            ui.label(format!("Drawn: {:?}", game.drawn_state()));
                            ui.label(format!("Frame: {}", game.frame()));
                            ui.label(format!("Seed: {}", game.seed()));
                            let playfield = game.playfield();
                            ui.label(format!("Playfield: {}x{}", playfield.x, playfield.y));
                            ui.separator();
                        }

                        if self.show_actors {
                            ui.heading("Actors");
                            let ship = game.actors().spaceship.position();
                            ui.label(format!("Spaceship: ({:.1}, {:.1})", ship.x, ship.y));
                            for (index, meteor) in game.actors().meteors.iter().enumerate() {
                                let position = meteor.sprite().position();
                                ui.label(format!(
                                    "Meteor {}: ({:.1}, {:.1})",
                                    index, position.x, position.y
                                ));
                            }
                            ui.separator();
                        }

                        if self.show_renderer_info {
                            ui.heading("Renderer Info");
                            ui.label(format!("Adapter: {}", stats.adapter));
                            ui.label(format!("Backend: {:?}", stats.backend));
                            ui.label(format!(
                                "Surface: {}x{}",
                                stats.surface_size[0], stats.surface_size[1]
                            ));
                            ui.label(format!("Format: {:?}", stats.format));
                            ui.label(format!("Sprites: {}", stats.sprites));
                            ui.label(format!("Textures: {}", stats.textures));
                            ui.separator();
                        }

                        if self.show_system_info {
                            ui.heading("System Info");

                            let mut sys = System::new();
                            sys.refresh_memory();
                            sys.refresh_cpu_all();

                            let os_name = System::name().unwrap_or_else(|| "Unknown".to_string());
                            let os_version =
                                System::os_version().unwrap_or_else(|| "Unknown".to_string());
                            let physical_cores = System::physical_core_count().unwrap_or(0);
                            let logical_cores = sys.cpus().len();
                            let total_memory_gb = sys.total_memory() as f64 / 1_073_741_824.0;

                            ui.label(format!("OS: {} {}", os_name, os_version));
                            ui.label(format!("Physical cores: {}", physical_cores));
                            ui.label(format!("Logical cores: {}", logical_cores));
                            ui.label(format!("Memory: {:.1} GB", total_memory_gb));
                            ui.label(format!("Build: {}", build_info::version_string()));
                            ui.separator();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_without_samples_is_zero() {
        let state = DebugUIState::default();
        assert_eq!(state.fps(), 0.0);
    }

    #[test]
    fn test_frame_window_is_bounded() {
        let mut state = DebugUIState::default();
        for _ in 0..FRAME_WINDOW + 20 {
            state.update_frame_time();
        }
        assert_eq!(state.frame_times.len(), FRAME_WINDOW);
    }

    #[test]
    fn test_toggle_window() {
        let mut state = DebugUIState::default();
        let initial = state.show_window;
        state.toggle_window();
        assert_ne!(state.show_window, initial);
    }
}
