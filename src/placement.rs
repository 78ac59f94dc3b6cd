//! Spawn positions for new planets.
//!
//! Spacing is a soft preference: after the attempt budget is exhausted the
//! helper still returns a position, possibly overlapping an existing planet.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use rand::Rng;

use crate::camera::Point;
use crate::consts::{PLACEMENT_MAX_ATTEMPTS, PLACEMENT_MIN_DISTANCE, PLACEMENT_SPREAD};
use crate::planet::Planet;

/// Propose a position within `center ± 200` on both axes, preferring one at
/// least 200 units from every existing planet.
pub fn generate_random_position<R: Rng + ?Sized>(center: Point, planets: &[Planet], rng: &mut R) -> Point {
    for _ in 0..PLACEMENT_MAX_ATTEMPTS {
        let candidate = candidate_near(center, rng);
        let clear = planets
            .iter()
            .all(|p| p.position.distance_to(candidate) >= PLACEMENT_MIN_DISTANCE);
        if clear {
            return candidate;
        }
    }
    tracing::debug!(planets = planets.len(), "no spaced position found, placing anyway");
    candidate_near(center, rng)
}

/// [`generate_random_position`] using the thread-local generator.
#[must_use]
pub fn random_position_near(center: Point, planets: &[Planet]) -> Point {
    generate_random_position(center, planets, &mut rand::rng())
}

fn candidate_near<R: Rng + ?Sized>(center: Point, rng: &mut R) -> Point {
    Point::new(
        center.x + rng.random_range(-PLACEMENT_SPREAD..PLACEMENT_SPREAD),
        center.y + rng.random_range(-PLACEMENT_SPREAD..PLACEMENT_SPREAD),
    )
}
