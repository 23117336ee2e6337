//! Per-frame player intent, decoupled from any windowing library

use glam::Vec2;

/// Which game inputs are active this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub confirm: bool,
    pub restart: bool,
}

impl Controls {
    /// Unit steps along each active axis
    ///
    /// Axes are independent, so diagonals are not normalised and move
    /// faster than straight lines. Opposing keys cancel out.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.down, self.up))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_direction() {
        assert_eq!(Controls::default().direction(), Vec2::ZERO);
    }

    #[test]
    fn test_up_is_positive_y() {
        let controls = Controls {
            up: true,
            ..Default::default()
        };
        assert_eq!(controls.direction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_diagonal_is_not_normalised() {
        let controls = Controls {
            left: true,
            down: true,
            ..Default::default()
        };
        let direction = controls.direction();
        assert_eq!(direction, Vec2::new(-1.0, -1.0));
        assert!(direction.length() > 1.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let controls = Controls {
            left: true,
            right: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(controls.direction(), Vec2::new(0.0, 1.0));
    }
}
