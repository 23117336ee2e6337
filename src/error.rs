//! Error types for game setup
//!
//! Everything here is a startup failure: once the game is built, the
//! per-frame loop has no fallible operations.

use std::path::PathBuf;

/// Errors raised while configuring the game or creating its resources
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A texture file could not be opened or decoded
    #[error("failed to load texture {path}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The sprite shader or pipeline failed validation
    #[error("sprite shader failed validation: {0}")]
    Shader(String),

    /// A sprite was declared with zero frames or animations
    #[error("sprite atlas needs at least one frame and one animation (got {frames}x{animations})")]
    InvalidAtlas { frames: u32, animations: u32 },

    /// A meteor is too tall to fit fully on screen
    #[error("meteor of height {meteor_height} does not fit a screen of height {screen_height}")]
    SpawnBandEmpty {
        screen_height: f32,
        meteor_height: f32,
    },

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    /// Configuration loaded but holds unusable values
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for game setup
pub type Result<T, E = GameError> = std::result::Result<T, E>;
