//! Main application handler for the game

use std::sync::Arc;

use anyhow::Context as _;
use glam::Vec2;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

#[cfg(debug_assertions)]
use winit::keyboard::{KeyCode, PhysicalKey};

use super::debug_ui::{DebugUIState, RendererStats};
use super::input::{InputCollector, InputState, bindings};
use super::renderer::Renderer;
use super::window::window_attributes;
use crate::config::GameConfig;
use crate::sim::Game;

/// Main game application
pub struct App {
    config: GameConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    game: Option<Game>,
    debug_ui: DebugUIState,
    input_collector: InputCollector,
    /// Startup error that ended the event loop
    fatal: Option<anyhow::Error>,
}

impl App {
    /// Creates a new game application with the provided configuration
    pub fn new(config: GameConfig) -> Self {
        info!(profile = %config.profile, "Starting game");
        info!(?config.window, "Window configuration");

        Self {
            config,
            window: None,
            renderer: None,
            game: None,
            debug_ui: DebugUIState::default(),
            input_collector: InputCollector::new(),
            fatal: None,
        }
    }

    /// Takes the error that stopped the application, if any
    pub fn take_fatal(&mut self) -> Option<anyhow::Error> {
        self.fatal.take()
    }

    /// Creates the window, renderer and game; any failure is fatal
    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = event_loop
            .create_window(window_attributes(&self.config.window))
            .context("Failed to create window")?;
        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            "Window created successfully"
        );
        let window = Arc::new(window);

        // winit's event loop is synchronous; block on the async wgpu setup
        let [width, height] = self.config.playfield();
        let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let mut renderer = runtime
            .block_on(Renderer::new(
                window.clone(),
                Vec2::new(width, height),
                self.config.window.vsync,
            ))
            .context("Failed to initialize renderer")?;
        info!("Renderer initialized successfully");

        let game = Game::new(&self.config, &mut renderer.texture_loader())
            .context("Failed to load game assets")?;

        window.set_visible(true);
        self.renderer = Some(renderer);
        self.game = Some(game);
        self.window = Some(window);
        Ok(())
    }

    /// Toggles debug window (debug builds only)
    #[cfg(debug_assertions)]
    fn toggle_debug_window(&mut self) {
        self.debug_ui.toggle_window();
    }

    /// Updates the game once and presents the result
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(window), Some(game)) =
            (&mut self.renderer, &self.window, &mut self.game)
        else {
            return;
        };

        if !step_game(game, self.input_collector.state()) {
            info!("Quit requested, exiting");
            event_loop.exit();
            return;
        }
        // Advance frame AFTER the update to transition edges to steady states
        self.input_collector.advance_frame();

        let game = &*game;
        let debug_ui = &mut self.debug_ui;
        // The overlay reads renderer stats from the previous frame
        let stats = RendererStats::capture(renderer);

        let result = renderer.draw(window, game, |ctx| {
            debug_ui.render(ctx, game, &stats);
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                renderer.resize(window.inner_size());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => {
                error!(error = %e, "Render error");
            }
        }
    }
}

/// Runs one game frame from this frame's input; false means quit
///
/// Called once per presented frame, so game speed follows the display rate.
fn step_game(game: &mut Game, input: &InputState) -> bool {
    if bindings::quit_requested(input) {
        return false;
    }
    game.update(&bindings::controls(input));
    true
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.fatal.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            error!(error = ?e, "Startup failed");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Feed events to input collector FIRST (before egui)
        self.input_collector.handle_window_event(&event);

        // Let egui handle the event for UI interactions
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            let _ = renderer.handle_event(window, &event);
        }

        // Handle debug hotkeys (debug builds only)
        #[cfg(debug_assertions)]
        if let WindowEvent::KeyboardInput { event, .. } = &event
            && event.state.is_pressed()
            && !event.repeat
            && let PhysicalKey::Code(KeyCode::Backquote) = event.physical_key
        {
            self.toggle_debug_window();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::Key;
    use crate::sim::{GameState, HeadlessTextures};

    fn game() -> Game {
        let config = GameConfig::builtin("test");
        Game::new(&config, &mut HeadlessTextures::new()).unwrap()
    }

    #[test]
    fn test_each_step_updates_the_game_once() {
        let mut game = game();
        let mut input = InputState::new();
        input.press(Key::Enter);

        assert!(step_game(&mut game, &input));
        assert_eq!(game.frame(), 1);
        assert_eq!(game.state(), GameState::Running);

        input.advance_frame();
        assert!(step_game(&mut game, &input));
        assert_eq!(game.frame(), 2);
    }

    #[test]
    fn test_quit_skips_the_update() {
        let mut game = game();
        let mut input = InputState::new();
        input.press(Key::Escape);
        input.press(Key::Enter);

        assert!(!step_game(&mut game, &input));
        assert_eq!(game.frame(), 0);
        assert_eq!(game.state(), GameState::BeforeStart);
    }
}
