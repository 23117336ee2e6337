//! Seams between the game and the graphics backend
//!
//! The game only needs two capabilities: turn an image file into a texture
//! handle with known pixel size, and submit a textured quad with a model
//! transform. The wgpu renderer implements both; headless code and tests use
//! lightweight stand-ins.

use std::path::Path;

use glam::{Mat4, Vec2};
use tracing::debug;

use super::sprite::TextureHandle;
use crate::error::{GameError, Result};

/// A texture the backend has accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedTexture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

/// Loads image files into backend textures
pub trait TextureSource {
    fn load(&mut self, path: &Path) -> Result<LoadedTexture>;
}

/// Receives draw submissions in painter's order
pub trait SpriteSink {
    /// Draws the unit quad scaled and placed by `model`, sampling the
    /// `atlas_cell` fraction of `texture`
    fn submit(&mut self, texture: TextureHandle, model: Mat4, atlas_cell: Vec2);
}

/// Reads image dimensions without decoding pixels or touching a GPU
///
/// Hands out sequential handles. Used by the preflight checks to build a
/// game from the real assets on machines without a display.
#[derive(Debug, Default)]
pub struct HeadlessTextures {
    next: u32,
}

impl HeadlessTextures {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextureSource for HeadlessTextures {
    fn load(&mut self, path: &Path) -> Result<LoadedTexture> {
        let (width, height) =
            image::image_dimensions(path).map_err(|source| GameError::Texture {
                path: path.to_path_buf(),
                source,
            })?;
        let handle = TextureHandle(self.next);
        self.next += 1;
        debug!(path = %path.display(), width, height, "Read texture dimensions");
        Ok(LoadedTexture {
            handle,
            width,
            height,
        })
    }
}

/// One recorded draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub texture: TextureHandle,
    pub model: Mat4,
    pub atlas_cell: Vec2,
}

/// Collects draws in submission order
///
/// The renderer uploads a batch per frame; tests inspect it directly.
#[derive(Debug, Default)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Texture handles in draw order
    pub fn textures(&self) -> Vec<TextureHandle> {
        self.calls.iter().map(|c| c.texture).collect()
    }
}

impl SpriteSink for DrawList {
    fn submit(&mut self, texture: TextureHandle, model: Mat4, atlas_cell: Vec2) {
        self.calls.push(DrawCall {
            texture,
            model,
            atlas_cell,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_keeps_submission_order() {
        let mut list = DrawList::new();
        list.submit(TextureHandle(2), Mat4::IDENTITY, Vec2::ONE);
        list.submit(TextureHandle(0), Mat4::IDENTITY, Vec2::ONE);
        list.submit(TextureHandle(2), Mat4::IDENTITY, Vec2::ONE);
        assert_eq!(
            list.textures(),
            vec![TextureHandle(2), TextureHandle(0), TextureHandle(2)]
        );

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_headless_textures_report_missing_file() {
        let mut textures = HeadlessTextures::new();
        let err = textures
            .load(Path::new("does/not/exist.png"))
            .unwrap_err();
        assert!(matches!(err, GameError::Texture { .. }));
        assert!(err.to_string().contains("exist.png"));
    }
}
