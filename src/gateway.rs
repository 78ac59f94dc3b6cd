//! Persistence gateway: the only boundary between the planet/viewport model
//! and durable storage.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail. Unparseable or malformed data is logged and treated as
//! "no data" (planets) or the origin (viewport). Planet writes are hard
//! failures surfaced as [`StoreError`], with quota exhaustion kept distinct so
//! the UI can tell the user to delete planets. Viewport writes are
//! best-effort: failures are logged and swallowed.
//!
//! Every mutation is a full load-modify-save cycle with no locking. Two
//! writers can race and the last write wins; cross-instance consistency comes
//! from storage change notifications, not from this layer.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{PLANETS_KEY, VIEWPORT_KEY};
use crate::planet::{NewPlanet, Planet, PlanetPatch, ViewportRecord, decode_planets};
use crate::storage::{Storage, StorageError};
use crate::validate::Locale;

/// Hard failures of planet mutations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("planet with id {0} not found")]
    NotFound(String),
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("storage error: {0}")]
    Storage(#[source] StorageError),
    #[error("failed to serialize planets: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::QuotaExceeded => StoreError::QuotaExceeded,
            other => StoreError::Storage(other),
        }
    }
}

impl StoreError {
    /// User-facing message in `locale`.
    #[must_use]
    pub fn user_message(&self, locale: Locale) -> String {
        match (locale, self) {
            (Locale::Es, Self::QuotaExceeded) => {
                "El almacenamiento está lleno. Por favor elimina algunos planetas.".to_owned()
            }
            (Locale::En, Self::QuotaExceeded) => "Storage is full. Please delete some planets.".to_owned(),
            (Locale::Es, Self::NotFound(_)) => "El planeta no existe".to_owned(),
            (Locale::En, Self::NotFound(_)) => "Planet not found".to_owned(),
            (Locale::Es, _) => "No se pudo guardar el planeta".to_owned(),
            (Locale::En, _) => "Could not save the planet".to_owned(),
        }
    }
}

/// Planet and viewport persistence over a [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct PlanetStore<S> {
    storage: S,
}

impl<S: Storage> PlanetStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // --- Planets ---

    /// Load the stored collection, dropping malformed records. Never fails.
    pub fn load_planets(&self) -> Vec<Planet> {
        let raw = match self.storage.get_item(PLANETS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, backend = self.storage.name(), "failed to read planets");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => decode_planets(&value),
            Err(e) => {
                tracing::error!(error = %e, "stored planets are not valid JSON");
                Vec::new()
            }
        }
    }

    /// Write the whole collection in a single storage write.
    pub fn save_planets(&self, planets: &[Planet]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(planets)?;
        self.storage.set_item(PLANETS_KEY, &raw)?;
        Ok(())
    }

    /// Look up a planet by id.
    #[must_use]
    pub fn get_planet(&self, id: &str) -> Option<Planet> {
        self.load_planets().into_iter().find(|p| p.id == id)
    }

    /// Create a planet with a fresh UUID v4 and both timestamps set to now.
    ///
    /// The id is not checked against existing ones.
    pub fn add_planet(&self, data: NewPlanet) -> Result<Planet, StoreError> {
        let mut planets = self.load_planets();
        let now = now_rfc3339()?;
        let planet = Planet {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            description: data.description,
            image_url: data.image_url,
            position: data.position,
            size: data.size,
            created_at: now.clone(),
            updated_at: now,
        };
        planets.push(planet.clone());
        self.save_planets(&planets)?;
        tracing::info!(id = %planet.id, total = planets.len(), "planet created");
        Ok(planet)
    }

    /// Merge `patch` over the planet with `id` and refresh its update time.
    pub fn update_planet(&self, id: &str, patch: &PlanetPatch) -> Result<(), StoreError> {
        let mut planets = self.load_planets();
        let Some(planet) = planets.iter_mut().find(|p| p.id == id) else {
            return Err(StoreError::NotFound(id.to_owned()));
        };
        patch.apply_to(planet);
        planet.updated_at = update_timestamp(&planet.created_at)?;
        self.save_planets(&planets)?;
        tracing::info!(%id, "planet updated");
        Ok(())
    }

    /// Remove the planet with `id`.
    pub fn delete_planet(&self, id: &str) -> Result<(), StoreError> {
        let mut planets = self.load_planets();
        let before = planets.len();
        planets.retain(|p| p.id != id);
        if planets.len() == before {
            return Err(StoreError::NotFound(id.to_owned()));
        }
        self.save_planets(&planets)?;
        tracing::info!(%id, total = planets.len(), "planet deleted");
        Ok(())
    }

    /// Remove the planet collection entirely.
    pub fn clear_planets(&self) {
        if let Err(e) = self.storage.remove_item(PLANETS_KEY) {
            tracing::warn!(error = %e, "failed to clear planets");
        }
    }

    // --- Viewport ---

    /// Load the persisted offset, or the origin when absent or unreadable.
    pub fn load_viewport(&self) -> Point {
        let raw = match self.storage.get_item(VIEWPORT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Point::ORIGIN,
            Err(e) => {
                tracing::error!(error = %e, "failed to read viewport");
                return Point::ORIGIN;
            }
        };
        let value = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(error = %e, "stored viewport is not valid JSON");
                return Point::ORIGIN;
            }
        };
        let Some(viewport) = value.get("viewport").filter(|v| v.is_object()) else {
            tracing::error!("stored viewport record has no viewport object");
            return Point::ORIGIN;
        };
        let coord = |key: &str| viewport.get(key).and_then(Value::as_f64).unwrap_or(0.0);
        Point::new(coord("x"), coord("y"))
    }

    /// Persist the offset with `scale: 1`. Best-effort.
    pub fn save_viewport(&self, offset: Point) {
        let raw = match serde_json::to_string(&ViewportRecord::new(offset)) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize viewport");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(VIEWPORT_KEY, &raw) {
            tracing::warn!(error = %e, "failed to save viewport");
        }
    }

    /// Remove the persisted viewport.
    pub fn clear_viewport(&self) {
        if let Err(e) = self.storage.remove_item(VIEWPORT_KEY) {
            tracing::warn!(error = %e, "failed to clear viewport");
        }
    }
}

fn now_rfc3339() -> Result<String, time::error::Format> {
    OffsetDateTime::now_utc().format(&Rfc3339)
}

/// Current time, but never earlier than `created_at`.
fn update_timestamp(created_at: &str) -> Result<String, time::error::Format> {
    let now = OffsetDateTime::now_utc();
    match OffsetDateTime::parse(created_at, &Rfc3339) {
        Ok(created) if created > now => Ok(created_at.to_owned()),
        _ => now.format(&Rfc3339),
    }
}
