//! Entity model: planets, their sparse updates, and the persisted viewport record.
//!
//! Planets reach this layer from untrusted storage as raw JSON. The
//! [`is_planet_shape`] guard and the [`decode_planets`] tolerant reader turn
//! that JSON into a clean collection, silently dropping records that do not
//! have the expected shape.

#[cfg(test)]
#[path = "planet_test.rs"]
mod planet_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::camera::Point;

/// Opaque planet identifier (a UUID v4 string when created by this crate).
pub type PlanetId = String;

/// A planet as stored in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    /// Unique identifier, assigned on creation and never changed.
    pub id: PlanetId,
    /// Display name, at most 50 characters.
    pub name: String,
    /// Free text, at most 500 characters.
    pub description: String,
    /// Data URL or external URL of the planet image.
    pub image_url: String,
    /// Canvas position in world coordinates. Unbounded.
    pub position: Point,
    /// Side length of the planet's footprint, 80 to 200.
    pub size: f64,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 time of the last mutation. Never earlier than `created_at`.
    pub updated_at: String,
}

/// Everything a caller supplies to create a planet; id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlanet {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub position: Point,
    pub size: f64,
}

/// Sparse update for a planet. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPatch {
    /// New name, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New image reference, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// New position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// New size, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl PlanetPatch {
    /// Returns `true` if the patch carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.position.is_none()
            && self.size.is_none()
    }

    /// Shallow-merge the present fields over `planet`. Timestamps are left to the caller.
    pub fn apply_to(&self, planet: &mut Planet) {
        if let Some(ref name) = self.name {
            planet.name.clone_from(name);
        }
        if let Some(ref description) = self.description {
            planet.description.clone_from(description);
        }
        if let Some(ref image_url) = self.image_url {
            planet.image_url.clone_from(image_url);
        }
        if let Some(position) = self.position {
            planet.position = position;
        }
        if let Some(size) = self.size {
            planet.size = size;
        }
    }
}

/// Persisted viewport singleton: `{ "viewport": { "x", "y", "scale" } }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRecord {
    pub viewport: ViewportState,
}

/// Camera offset plus the reserved zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub x: f64,
    pub y: f64,
    /// Always written as `1`. Reserved for zoom.
    pub scale: f64,
}

impl ViewportRecord {
    /// Record for `offset` with the fixed scale of 1.
    #[must_use]
    pub fn new(offset: Point) -> Self {
        Self { viewport: ViewportState { x: offset.x, y: offset.y, scale: 1.0 } }
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.viewport.x, self.viewport.y)
    }
}

/// Structural guard for planet records read from storage.
///
/// Accepts any JSON object carrying string `id`, `name`, `description`,
/// `imageUrl`, `createdAt` and `updatedAt`, numeric `size`, and a `position`
/// object with numeric `x` and `y`. Extra fields are ignored. Field values are
/// not range-checked here.
#[must_use]
pub fn is_planet_shape(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    let is_str = |key: &str| obj.get(key).is_some_and(Value::is_string);
    let is_num = |v: Option<&Value>| v.is_some_and(Value::is_number);

    let position_ok = obj
        .get("position")
        .and_then(Value::as_object)
        .is_some_and(|p| is_num(p.get("x")) && is_num(p.get("y")));

    ["id", "name", "description", "imageUrl", "createdAt", "updatedAt"]
        .into_iter()
        .all(is_str)
        && position_ok
        && is_num(obj.get("size"))
}

/// Tolerant reader for the stored planet collection.
///
/// Anything other than a JSON array decodes to an empty collection. Array
/// elements that fail [`is_planet_shape`] are dropped; the rest keep their
/// stored order.
#[must_use]
pub fn decode_planets(value: &Value) -> Vec<Planet> {
    let Some(items) = value.as_array() else {
        tracing::debug!("stored planets are not an array, ignoring");
        return Vec::new();
    };
    let mut planets = Vec::with_capacity(items.len());
    for item in items {
        if !is_planet_shape(item) {
            tracing::debug!("dropping malformed planet record");
            continue;
        }
        match Planet::deserialize(item) {
            Ok(planet) => planets.push(planet),
            Err(e) => tracing::debug!(error = %e, "dropping undecodable planet record"),
        }
    }
    planets
}
