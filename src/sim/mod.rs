//! Game simulation module
//!
//! Pure game logic: sprites, collision, the state machine and the per-frame
//! update. Nothing here talks to a window or a GPU directly; textures come in
//! through [`TextureSource`] and draws go out through [`SpriteSink`].

pub mod backend;
pub mod bounds;
pub mod controls;
pub mod game;
pub mod meteor;
pub mod spawn;
pub mod sprite;
pub mod state;

pub use backend::{DrawCall, DrawList, HeadlessTextures, LoadedTexture, SpriteSink, TextureSource};
pub use bounds::Bounds;
pub use controls::Controls;
pub use game::{Actors, Game};
pub use meteor::Meteor;
pub use spawn::SpawnBand;
pub use sprite::{Animation, Sprite, TextureHandle};
pub use state::{GameState, Trigger};
