//! Axis-aligned rectangles in viewport space

use glam::Vec2;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Whether the point lies inside or on the edge
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// Distance from a point to the nearest edge or corner of a rectangle
///
/// Zero when the point is inside the rectangle.
pub fn distance_point_to_rect(p: Vec2, rect: &Rect) -> f32 {
    let max = rect.max();
    let dx = (rect.min.x - p.x).max(0.0).max(p.x - max.x);
    let dy = (rect.min.y - p.y).max(0.0).max(p.y - max.y);
    Vec2::new(dx, dy).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_inside_is_zero() {
        let rect = Rect::new(480.0, 480.0, 40.0, 40.0);
        assert_eq!(distance_point_to_rect(Vec2::new(500.0, 500.0), &rect), 0.0);
        // Edges count as inside
        assert_eq!(distance_point_to_rect(Vec2::new(480.0, 520.0), &rect), 0.0);
    }

    #[test]
    fn test_distance_to_edge() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        // Straight left of the rect
        assert!((distance_point_to_rect(Vec2::new(40.0, 110.0), &rect) - 60.0).abs() < 1e-4);
        // Straight below
        assert!((distance_point_to_rect(Vec2::new(120.0, 150.0), &rect) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_distance_to_corner() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // 3-4-5 triangle off the bottom-right corner
        let d = distance_point_to_rect(Vec2::new(13.0, 14.0), &rect);
        assert!((d - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_rect_center_and_contains() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.center(), Vec2::new(25.0, 40.0));
        assert_eq!(rect.max(), Vec2::new(40.0, 60.0));
        assert!(rect.contains(Vec2::new(25.0, 40.0)));
        assert!(!rect.contains(Vec2::new(41.0, 40.0)));
    }
}
