//! Sprite records: textured, positioned quads
//!
//! A sprite owns its position and size privately so its cached bounds can
//! never go stale: every mutator refreshes them before returning.

use glam::{Mat4, Vec2, Vec3};

use super::bounds::Bounds;
use crate::error::{GameError, Result};

/// Opaque handle to a texture owned by the graphics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Sprite-sheet bookkeeping
///
/// Carried for every sprite but not advanced by the game: all sprites are
/// single-frame today.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub frames: u32,
    pub animations: u32,
    pub frame: u32,
    pub animation: u32,
    pub fps: f32,
    pub last_time: f32,
}

impl Animation {
    const DEFAULT_FPS: f32 = 12.0;

    fn new(frames: u32, animations: u32) -> Self {
        Self {
            frames,
            animations,
            frame: 0,
            animation: 0,
            fps: Self::DEFAULT_FPS,
            last_time: 0.0,
        }
    }
}

/// A positioned, sized, textured quad drawn once per frame
#[derive(Debug, Clone)]
pub struct Sprite {
    texture: TextureHandle,
    position: Vec3,
    size: Vec3,
    animation: Animation,
    /// Fraction of the texture covered by one atlas cell
    atlas_cell: Vec2,
    bounds: Bounds,
}

impl Sprite {
    /// Creates a sprite over a `frames` x `animations` texture atlas
    pub fn new(
        texture: TextureHandle,
        position: Vec3,
        size: Vec3,
        frames: u32,
        animations: u32,
    ) -> Result<Self> {
        if frames == 0 || animations == 0 {
            return Err(GameError::InvalidAtlas { frames, animations });
        }

        let mut sprite = Self {
            texture,
            position,
            size,
            animation: Animation::new(frames, animations),
            atlas_cell: Vec2::new(1.0 / frames as f32, 1.0 / animations as f32),
            bounds: Bounds::from_center_size(Vec2::ZERO, Vec2::ZERO),
        };
        sprite.refresh_bounds();
        Ok(sprite)
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn atlas_cell(&self) -> Vec2 {
        self.atlas_cell
    }

    /// Current bounding box
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.refresh_bounds();
    }

    /// Moves the sprite in the xy plane
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta.extend(0.0);
        self.refresh_bounds();
    }

    pub fn set_x(&mut self, x: f32) {
        self.position.x = x;
        self.refresh_bounds();
    }

    pub fn set_size(&mut self, size: Vec3) {
        self.size = size;
        self.refresh_bounds();
    }

    /// Recomputes the bounding box from position and size
    pub fn refresh_bounds(&mut self) {
        self.bounds = Bounds::from_center_size(self.position.truncate(), self.size.truncate());
    }

    pub fn intersects(&self, other: &Sprite) -> bool {
        self.bounds.intersects(&other.bounds)
    }

    /// Model transform: translate to position, then scale the unit quad
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite_at(x: f32, y: f32, w: f32, h: f32) -> Sprite {
        Sprite::new(TextureHandle(0), Vec3::new(x, y, 0.0), Vec3::new(w, h, 1.0), 1, 1).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_atlas() {
        let err = Sprite::new(TextureHandle(1), Vec3::ZERO, Vec3::ONE, 0, 1).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidAtlas {
                frames: 0,
                animations: 1
            }
        ));
        assert!(Sprite::new(TextureHandle(1), Vec3::ZERO, Vec3::ONE, 1, 0).is_err());
    }

    #[test]
    fn test_atlas_cell_fraction() {
        let sprite = Sprite::new(TextureHandle(3), Vec3::ZERO, Vec3::ONE, 4, 2).unwrap();
        assert_eq!(sprite.atlas_cell(), Vec2::new(0.25, 0.5));
        assert_eq!(sprite.animation().frames, 4);
        assert_eq!(sprite.animation().frame, 0);
        assert_eq!(sprite.animation().fps, 12.0);

        let single = sprite_at(0.0, 0.0, 1.0, 1.0);
        assert_eq!(single.atlas_cell(), Vec2::ONE);
    }

    #[test]
    fn test_bounds_follow_every_mutation() {
        let mut sprite = sprite_at(100.0, 300.0, 60.0, 40.0);
        assert_eq!(sprite.bounds().min, Vec2::new(70.0, 280.0));
        assert_eq!(sprite.bounds().max, Vec2::new(130.0, 320.0));

        sprite.translate(Vec2::new(-1.5, 2.0));
        assert_eq!(sprite.bounds().min, Vec2::new(68.5, 282.0));
        assert_eq!(sprite.bounds().max, Vec2::new(128.5, 322.0));

        sprite.set_x(800.0);
        assert_eq!(sprite.bounds().center().x, 800.0);

        sprite.set_position(Vec3::new(10.0, 20.0, 0.5));
        assert_eq!(sprite.bounds().min, Vec2::new(-20.0, 0.0));

        sprite.set_size(Vec3::new(2.0, 4.0, 1.0));
        assert_eq!(sprite.bounds().min, Vec2::new(9.0, 18.0));
        assert_eq!(sprite.bounds().max, Vec2::new(11.0, 22.0));
    }

    #[test]
    fn test_depth_is_ignored_by_bounds() {
        let mut sprite = sprite_at(5.0, 5.0, 2.0, 2.0);
        sprite.set_position(Vec3::new(5.0, 5.0, -0.9));
        assert_eq!(sprite.bounds().min, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_model_matrix_maps_unit_quad_to_bounds() {
        let sprite = sprite_at(400.0, 300.0, 800.0, 600.0);
        let model = sprite.model_matrix();
        let corner_min = model.transform_point3(Vec3::new(-0.5, -0.5, 0.0));
        let corner_max = model.transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(corner_min.truncate(), sprite.bounds().min);
        assert_eq!(corner_max.truncate(), sprite.bounds().max);
    }
}
