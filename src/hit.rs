//! Click routing: which planet's on-screen box contains a canvas point.
//!
//! Planets are drawn with their position as the top-left corner of a
//! `size` x `size` box, translated by the viewport offset. Later planets are
//! drawn above earlier ones, so the last match wins.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Point, world_to_screen};
use crate::planet::Planet;

/// Whether `screen_pt` falls inside `planet`'s drawn box under `offset`.
#[must_use]
pub fn planet_contains(planet: &Planet, screen_pt: Point, offset: Point) -> bool {
    let top_left = world_to_screen(planet.position, offset);
    screen_pt.x >= top_left.x
        && screen_pt.x <= top_left.x + planet.size
        && screen_pt.y >= top_left.y
        && screen_pt.y <= top_left.y + planet.size
}

/// The topmost planet under `screen_pt`, if any.
#[must_use]
pub fn hit_test<'a>(planets: &'a [Planet], screen_pt: Point, offset: Point) -> Option<&'a Planet> {
    planets
        .iter()
        .rev()
        .find(|planet| planet_contains(planet, screen_pt, offset))
}
