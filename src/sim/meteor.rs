//! Scrolling meteors

use glam::{Vec2, Vec3};
use rand::Rng;

use super::spawn::SpawnBand;
use super::sprite::Sprite;
use crate::error::Result;

/// A meteor sprite and the vertical band it respawns in
///
/// The band is derived from the sprite's height when the meteor is built,
/// so the size is fixed for the meteor's lifetime.
#[derive(Debug, Clone)]
pub struct Meteor {
    sprite: Sprite,
    band: SpawnBand,
}

impl Meteor {
    /// Fails if the sprite is too tall to fit on a screen of `screen_height`
    pub fn new(sprite: Sprite, screen_height: f32) -> Result<Self> {
        let band = SpawnBand::new(screen_height, sprite.size().y)?;
        Ok(Self { sprite, band })
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn band(&self) -> &SpawnBand {
        &self.band
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.sprite.set_position(position);
    }

    /// Scrolls horizontally by `dx`
    pub fn advance(&mut self, dx: f32) {
        self.sprite.translate(Vec2::new(dx, 0.0));
    }

    /// Places the meteor at `x` with a fresh random height
    pub fn respawn(&mut self, x: f32, rng: &mut impl Rng) {
        let y = self.band.sample(rng);
        let z = self.sprite.position().z;
        self.sprite.set_position(Vec3::new(x, y, z));
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::sim::sprite::TextureHandle;

    fn meteor(x: f32, y: f32) -> Meteor {
        let sprite = Sprite::new(
            TextureHandle(2),
            Vec3::new(x, y, 0.0),
            Vec3::new(60.0, 60.0, 1.0),
            1,
            1,
        )
        .unwrap();
        Meteor::new(sprite, 600.0).unwrap()
    }

    #[test]
    fn test_advance_moves_left() {
        let mut m = meteor(500.0, 300.0);
        m.advance(-1.5);
        assert_eq!(m.sprite().position().x, 498.5);
        assert_eq!(m.sprite().bounds().max.x, 528.5);
    }

    #[test]
    fn test_respawn_lands_in_band() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = meteor(-150.0, 300.0);
        for _ in 0..100 {
            m.respawn(800.0, &mut rng);
            let pos = m.sprite().position();
            assert_eq!(pos.x, 800.0);
            assert!(pos.y >= 30.0 && pos.y <= 570.0);
        }
    }

    #[test]
    fn test_oversized_meteor_is_rejected() {
        let size = Vec3::new(10.0, 601.0, 1.0);
        let sprite = Sprite::new(TextureHandle(2), Vec3::ZERO, size, 1, 1).unwrap();
        assert!(Meteor::new(sprite, 600.0).is_err());
    }
}
