//! Built-in preflight checks

pub mod assets;
pub mod build_info;
pub mod config;
pub mod game;
pub mod graphics_backend;

pub use assets::AssetCheck;
pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use game::GameRoundCheck;
pub use graphics_backend::GraphicsBackendCheck;
