//! Points and the viewport offset transform.
//!
//! The viewport is a pure translation: a planet at world position `p` is
//! drawn at `p + offset` on the canvas. Increasing `offset.x` shifts content
//! right. There is no zoom; the persisted `scale` field is reserved.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in either canvas (screen) or world space, or a viewport offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.hypot(dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Convert a world-space point to canvas coordinates under `offset`.
#[must_use]
pub fn world_to_screen(world: Point, offset: Point) -> Point {
    world + offset
}

/// Convert a canvas point to world coordinates under `offset`.
#[must_use]
pub fn screen_to_world(screen: Point, offset: Point) -> Point {
    screen - offset
}

/// World-space point currently shown at the middle of a `width` x `height` canvas.
#[must_use]
pub fn visible_center(offset: Point, width: f64, height: f64) -> Point {
    screen_to_world(Point::new(width * 0.5, height * 0.5), offset)
}
