use serde::{Deserialize, Serialize};

/// A pointer position in client coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance, so diagonal jitter counts the same as
    /// horizontal or vertical jitter.
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_axis_aligned() {
        let a = Point::new(0.0, 0.0);
        assert_eq!(a.distance_to(Point::new(3.0, 0.0)), 3.0);
        assert_eq!(a.distance_to(Point::new(0.0, -4.0)), 4.0);
    }

    #[test]
    fn test_distance_diagonal() {
        let a = Point::new(100.0, 100.0);
        let b = Point::new(50.0, 50.0);
        let d = a.distance_to(b);
        assert!((d - 70.710_678).abs() < 1e-5);

        // 4px on both axes is farther than 5px even though neither axis is.
        assert!(Point::new(0.0, 0.0).distance_to(Point::new(4.0, 4.0)) > 5.0);
    }
}
