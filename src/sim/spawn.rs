//! Vertical spawn range for meteors

use rand::Rng;

use crate::error::{GameError, Result};

/// Range of y positions that keep a meteor fully on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnBand {
    min: f32,
    max: f32,
}

impl SpawnBand {
    /// Band for a meteor of `meteor_height` on a screen of `screen_height`
    ///
    /// Fails when the meteor cannot fit, including the exact-fit case,
    /// which leaves no room to sample from. Both ends must be finite.
    pub fn new(screen_height: f32, meteor_height: f32) -> Result<Self> {
        let half = meteor_height / 2.0;
        let (min, max) = (half, screen_height - half);
        if !(min.is_finite() && max.is_finite() && max > min) {
            return Err(GameError::SpawnBandEmpty {
                screen_height,
                meteor_height,
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Uniform sample in `[min, max)`
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        rng.random_range(self.min..self.max)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_band_keeps_meteor_on_screen() {
        let band = SpawnBand::new(600.0, 60.0).unwrap();
        assert_eq!(band.min(), 30.0);
        assert_eq!(band.max(), 570.0);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let y = band.sample(&mut rng);
            assert!((30.0..570.0).contains(&y), "sampled {}", y);
        }
    }

    #[test]
    fn test_meteor_taller_than_screen_is_rejected() {
        assert!(matches!(
            SpawnBand::new(600.0, 700.0),
            Err(GameError::SpawnBandEmpty { .. })
        ));
    }

    #[test]
    fn test_exact_fit_is_rejected() {
        assert!(SpawnBand::new(600.0, 600.0).is_err());
    }

    #[test]
    fn test_nan_height_is_rejected() {
        assert!(SpawnBand::new(600.0, f32::NAN).is_err());
    }

    #[test]
    fn test_infinite_screen_is_rejected() {
        assert!(matches!(
            SpawnBand::new(f32::INFINITY, 60.0),
            Err(GameError::SpawnBandEmpty { .. })
        ));
        assert!(SpawnBand::new(600.0, f32::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_same_seed_same_samples() {
        let band = SpawnBand::new(600.0, 60.0).unwrap();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            assert_eq!(band.sample(&mut a), band.sample(&mut b));
        }
    }
}
