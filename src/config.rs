//! Game configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Window configuration
///
/// The window size doubles as the playfield: the orthographic projection
/// maps `[0, width] x [0, height]` onto the surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
    /// Whether to enable vsync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Spaceship Game!".to_string(),
            width: 800.0,
            height: 600.0,
            fullscreen: false,
            resizable: false,
            decorated: true,
            vsync: true,
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Distance moved per frame by the spaceship and the meteors
    pub velocity: f32,
    /// Number of meteors in play
    pub meteor_count: usize,
    /// How far past the left edge a meteor travels before it is recycled
    pub offscreen_margin: f32,
    /// Spaceship spawn point
    pub spawn_point: [f32; 2],
    /// X position of the first meteor at startup
    pub meteor_start_x: f32,
    /// Horizontal gap between consecutive meteors at startup
    pub meteor_spacing: f32,
    /// Fixed RNG seed; random when unset
    pub seed: Option<u64>,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            velocity: 1.2,
            meteor_count: 5,
            offscreen_margin: 100.0,
            spawn_point: [100.0, 300.0],
            meteor_start_x: 500.0,
            meteor_spacing: 100.0,
            seed: None,
        }
    }
}

/// A texture file and the factor applied to its pixel size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteAsset {
    /// Path relative to the asset root
    pub path: PathBuf,
    /// Scale applied to the image dimensions to get the on-screen size
    pub scale: f32,
}

impl SpriteAsset {
    fn new(path: &str, scale: f32) -> Self {
        Self {
            path: PathBuf::from(path),
            scale,
        }
    }
}

/// Texture assets for every sprite in the game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory the sprite paths are relative to
    pub root: PathBuf,
    pub background: SpriteAsset,
    pub spaceship: SpriteAsset,
    pub meteor: SpriteAsset,
    pub game_over: SpriteAsset,
    pub start_screen: SpriteAsset,
}

impl AssetConfig {
    /// Resolves a sprite path against the asset root
    pub fn resolve(&self, asset: &SpriteAsset) -> PathBuf {
        self.root.join(&asset.path)
    }

    /// All sprite assets paired with a display name
    pub fn entries(&self) -> [(&'static str, &SpriteAsset); 5] {
        [
            ("background", &self.background),
            ("spaceship", &self.spaceship),
            ("meteor", &self.meteor),
            ("game_over", &self.game_over),
            ("start_screen", &self.start_screen),
        ]
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            background: SpriteAsset::new("textures/space.png", 0.2),
            spaceship: SpriteAsset::new("textures/spaceship.png", 0.1),
            meteor: SpriteAsset::new("textures/meteor.png", 0.2),
            game_over: SpriteAsset::new("textures/game-over.png", 0.5),
            start_screen: SpriteAsset::new("textures/start-game.png", 1.0),
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Gameplay tuning
    #[serde(default)]
    pub gameplay: GameplayConfig,
    /// Texture assets
    #[serde(default)]
    pub assets: AssetConfig,
}

impl GameConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_GAMEPLAY__VELOCITY=2.0)
    ///
    /// Config files are searched for next to the executable first, then in
    /// the current directory. The asset root stays relative to the working
    /// directory.
    pub fn load(profile: &str) -> Result<Self> {
        let config_dir = find_config_dir();

        let mut builder = Config::builder();

        if let Some(ref dir) = config_dir {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .set_override("profile", profile)
            .and_then(|b| b.build())?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Built-in configuration, used when no profile can be loaded
    pub fn builtin(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            window: WindowConfig::default(),
            gameplay: GameplayConfig::default(),
            assets: AssetConfig::default(),
        }
    }

    /// Playfield size in world units (matches the window size)
    pub fn playfield(&self) -> [f32; 2] {
        [self.window.width as f32, self.window.height as f32]
    }

    /// Rejects values the game cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(self.window.width) || !positive(self.window.height) {
            return Err(GameError::InvalidConfig(format!(
                "window size must be finite and positive, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !positive(f64::from(self.gameplay.velocity)) {
            return Err(GameError::InvalidConfig(format!(
                "velocity must be finite and positive, got {}",
                self.gameplay.velocity
            )));
        }
        if self.gameplay.meteor_count == 0 {
            return Err(GameError::InvalidConfig(
                "meteor_count must be at least 1".to_string(),
            ));
        }
        let margin = self.gameplay.offscreen_margin;
        if !margin.is_finite() || margin < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "offscreen_margin must be finite and not negative, got {}",
                self.gameplay.offscreen_margin
            )));
        }
        for (name, asset) in self.assets.entries() {
            if !positive(f64::from(asset.scale)) {
                return Err(GameError::InvalidConfig(format!(
                    "{} scale must be finite and positive, got {}",
                    name, asset.scale
                )));
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::builtin("release")
    }
}

/// Finds the config directory by searching in multiple locations
fn find_config_dir() -> Option<PathBuf> {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let config_dir = exe_dir.join("config");
        if config_dir.exists() {
            return Some(config_dir);
        }
    }

    let cwd_config = PathBuf::from("config");
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_is_valid() {
        let config = GameConfig::builtin("debug");
        assert!(config.validate().is_ok());
        assert_eq!(config.playfield(), [800.0, 600.0]);
        assert_eq!(config.gameplay.meteor_count, 5);
        assert_eq!(config.gameplay.spawn_point, [100.0, 300.0]);
    }

    #[test]
    fn test_validate_rejects_zero_meteors() {
        let mut config = GameConfig::builtin("debug");
        config.gameplay.meteor_count = 0;
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_scale() {
        let mut config = GameConfig::builtin("debug");
        config.assets.meteor.scale = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("meteor"));
    }

    #[test]
    fn test_validate_rejects_negative_velocity() {
        let mut config = GameConfig::builtin("debug");
        config.gameplay.velocity = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_infinite_window() {
        let mut config = GameConfig::builtin("debug");
        config.window.height = f64::INFINITY;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("window size"));
    }

    #[test]
    fn test_validate_rejects_nan_values() {
        let mut config = GameConfig::builtin("debug");
        config.gameplay.velocity = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::builtin("debug");
        config.gameplay.offscreen_margin = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::builtin("debug");
        config.assets.spaceship.scale = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_is_builtin_release() {
        let config = GameConfig::default();
        assert_eq!(config.profile, "release");
        assert_eq!(config.playfield(), GameConfig::builtin("release").playfield());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_asset_paths_resolve_against_root() {
        let mut assets = AssetConfig::default();
        assets.root = PathBuf::from("/data");
        assert_eq!(
            assets.resolve(&assets.meteor),
            PathBuf::from("/data/textures/meteor.png")
        );
    }
}
