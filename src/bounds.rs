//! Pannable canvas extent derived from the planet set.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use serde::{Deserialize, Serialize};

use crate::consts::CANVAS_MARGIN;
use crate::planet::Planet;

/// Axis-aligned rectangle in world coordinates beyond which panning stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: -CANVAS_MARGIN,
            max_x: CANVAS_MARGIN,
            min_y: -CANVAS_MARGIN,
            max_y: CANVAS_MARGIN,
        }
    }
}

impl Bounds {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Smallest rectangle enclosing every planet footprint, inflated by the margin.
///
/// Each planet is a square of side `size` centered on its position. An
/// empty collection yields a margin-sized square around the origin.
#[must_use]
pub fn calculate_bounds(planets: &[Planet]) -> Bounds {
    if planets.is_empty() {
        return Bounds::default();
    }

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for planet in planets {
        let half = planet.size / 2.0;
        min_x = min_x.min(planet.position.x - half);
        max_x = max_x.max(planet.position.x + half);
        min_y = min_y.min(planet.position.y - half);
        max_y = max_y.max(planet.position.y + half);
    }

    Bounds {
        min_x: min_x - CANVAS_MARGIN,
        max_x: max_x + CANVAS_MARGIN,
        min_y: min_y - CANVAS_MARGIN,
        max_y: max_y + CANVAS_MARGIN,
    }
}
