//! Axis-aligned bounding boxes for collision

use glam::Vec2;

/// Axis-aligned box in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered on `center`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(center - half, center + half)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Overlap test with inclusive edges: boxes that touch intersect
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(cx: f32, cy: f32, w: f32, h: f32) -> Bounds {
        Bounds::from_center_size(Vec2::new(cx, cy), Vec2::new(w, h))
    }

    #[test]
    fn test_bounds_from_center_and_size() {
        let b = boxed(100.0, 300.0, 60.0, 40.0);
        assert_eq!(b.min, Vec2::new(70.0, 280.0));
        assert_eq!(b.max, Vec2::new(130.0, 320.0));
        assert_eq!(b.width(), 60.0);
        assert_eq!(b.height(), 40.0);
        assert_eq!(b.center(), Vec2::new(100.0, 300.0));
    }

    #[test]
    fn test_same_center_always_intersects() {
        for (w, h) in [(1.0, 1.0), (60.0, 40.0), (0.5, 300.0)] {
            let a = boxed(250.0, 125.0, w, h);
            let b = boxed(250.0, 125.0, h, w);
            assert!(a.intersects(&b));
        }
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        let right = boxed(10.0, 0.0, 10.0, 10.0);
        let above = boxed(0.0, 10.0, 10.0, 10.0);
        assert!(a.intersects(&right));
        assert!(a.intersects(&above));
    }

    #[test]
    fn test_separated_boxes_do_not_intersect() {
        let a = boxed(0.0, 0.0, 10.0, 20.0);
        // Half extents sum to 10 on x and 20 on y
        assert!(!a.intersects(&boxed(10.01, 0.0, 10.0, 20.0)));
        assert!(!a.intersects(&boxed(-10.01, 0.0, 10.0, 20.0)));
        assert!(!a.intersects(&boxed(0.0, 20.01, 10.0, 20.0)));
        assert!(!a.intersects(&boxed(0.0, -20.01, 10.0, 20.0)));
        // Overlap on one axis is not enough
        assert!(!a.intersects(&boxed(3.0, 50.0, 10.0, 20.0)));
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let samples = [
            boxed(0.0, 0.0, 10.0, 10.0),
            boxed(9.0, 4.0, 2.0, 2.0),
            boxed(12.0, 0.0, 4.0, 4.0),
            boxed(-5.0, -5.0, 1.0, 1.0),
            boxed(0.0, 7.5, 20.0, 5.0),
        ];
        for a in &samples {
            for b in &samples {
                assert_eq!(a.intersects(b), b.intersects(a), "{:?} vs {:?}", a, b);
            }
        }
    }
}
