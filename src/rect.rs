//! Rectangles and edge insets.

use cgmath::{Point2, Vector2, Zero};
use std::ops;

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Creates a new rectangle from x, y, width and height.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            origin: Point2::new(x, y),
            size: Vector2::new(width, height),
        }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.x
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.y
    }

    /// Returns the center point.
    pub fn center(&self) -> Point2<f64> {
        self.origin + self.size / 2.
    }
}

/// Offsets the rectangle by a vector.
impl ops::Add<Vector2<f64>> for Rect {
    type Output = Rect;
    fn add(self, offset: Vector2<f64>) -> Rect {
        Rect {
            origin: self.origin + offset,
            size: self.size,
        }
    }
}

impl ops::Sub<Vector2<f64>> for Rect {
    type Output = Rect;
    fn sub(self, offset: Vector2<f64>) -> Rect {
        Rect {
            origin: self.origin - offset,
            size: self.size,
        }
    }
}

/// Distances inwards from each edge of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Insets {
        Insets {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same inset on all four edges.
    pub fn uniform(value: f64) -> Insets {
        Insets::new(value, value, value, value)
    }

    pub fn zero() -> Insets {
        Insets::default()
    }
}

#[test]
fn test_rect_edges() {
    let rect = Rect::from_xywh(8., 16., 304., 128.);
    assert_eq!(rect.max_x(), 312.);
    assert_eq!(rect.max_y(), 144.);
    assert_eq!(rect.center(), Point2::new(160., 80.));

    let moved = rect - Vector2::new(8., 16.);
    assert_eq!(moved.origin, Point2::new(0., 0.));
    assert_eq!(moved.size, rect.size);
}
