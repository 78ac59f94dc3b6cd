//! The planet canvas: host-facing core of the pannable planet view.
//!
//! `PlanetCanvas` owns the in-memory planet list, the viewport controller,
//! and the persistence gateway. The host forwards pointer, touch, timer, and
//! storage-change events and applies the returned [`Action`]s. Nothing here
//! depends on a browser, so the whole interaction model is testable natively.
//!
//! ## Lifecycle
//!
//! 1. [`PlanetCanvas::mount`] loads planets and the persisted viewport.
//! 2. Gestures pan the viewport; [`PlanetCanvas::tick`] performs the
//!    debounced viewport write once the quiet window elapses.
//! 3. [`PlanetCanvas::on_storage_event`] reloads planets changed by another
//!    instance sharing the same storage.
//! 4. [`PlanetCanvas::unmount`] discards any pending viewport write.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use crate::bounds::{Bounds, calculate_bounds};
use crate::camera::{Point, visible_center};
use crate::config::Config;
use crate::consts::{DEFAULT_SIZE, PLANETS_KEY};
use crate::gateway::{PlanetStore, StoreError};
use crate::hit::hit_test;
use crate::placement::random_position_near;
use crate::planet::{NewPlanet, Planet, PlanetId, PlanetPatch};
use crate::storage::Storage;
use crate::validate::{Locale, ValidationError, validate_new_planet, validate_patch};
use crate::viewport::{Gesture, ViewportController};

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The live viewport offset changed; re-render planets at `planet + offset`.
    ViewportChanged(Point),
    /// A click (not a drag) landed on this planet.
    PlanetClicked(PlanetId),
    /// Update the canvas cursor.
    SetCursor(Cursor),
    /// The planet list was reloaded from storage; carries the new count.
    PlanetsReloaded(usize),
}

/// Canvas cursor styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button.
    Primary,
    Middle,
    Secondary,
}

/// User input for a new planet. The canvas picks the position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetDraft {
    pub name: String,
    pub description: String,
    /// Image reference, typically a data URL produced by [`crate::image::to_data_url`].
    pub image_url: String,
    /// Planet size; the default size is used when absent.
    pub size: Option<f64>,
}

/// Failures of user-initiated planet changes.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("invalid planet: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CanvasError {
    /// User-facing message in `locale`.
    #[must_use]
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            Self::Validation(e) => e.message(locale),
            Self::Store(e) => e.user_message(locale),
        }
    }
}

/// A mounted planet canvas over storage backend `S`.
#[derive(Debug)]
pub struct PlanetCanvas<S> {
    store: PlanetStore<S>,
    planets: Vec<Planet>,
    viewport: ViewportController,
    locale: Locale,
}

impl<S: Storage> PlanetCanvas<S> {
    /// Load planets and the persisted viewport and compute the bounds.
    pub fn mount(store: PlanetStore<S>, config: &Config) -> Self {
        let planets = store.load_planets();
        let offset = store.load_viewport();
        let mut viewport =
            ViewportController::with_settings(offset, config.viewport_debounce_ms, config.click_threshold_px);
        viewport.set_bounds(calculate_bounds(&planets));
        tracing::debug!(planets = planets.len(), x = offset.x, y = offset.y, "canvas mounted");
        Self { store, planets, viewport, locale: config.locale }
    }

    // --- Queries ---

    #[must_use]
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// Whether there is nothing to show (the empty-state message applies).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    #[must_use]
    pub fn viewport(&self) -> Point {
        self.viewport.offset()
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.viewport.bounds()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.viewport.is_dragging()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        if self.is_dragging() { Cursor::Grabbing } else { Cursor::Grab }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn store(&self) -> &PlanetStore<S> {
        &self.store
    }

    /// World point currently at the middle of the visible canvas.
    #[must_use]
    pub fn visible_center(&self) -> Point {
        let (width, height) = self
            .viewport
            .canvas_size()
            .map_or((0.0, 0.0), |c| (c.width, c.height));
        visible_center(self.viewport.offset(), width, height)
    }

    // --- Layout ---

    /// Update the visible canvas dimensions. Must be called on every resize.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
    }

    // --- Mouse ---

    pub fn pointer_down(&mut self, at: Point, button: PointerButton) -> Vec<Action> {
        if button != PointerButton::Primary {
            return Vec::new();
        }
        self.viewport.begin_drag(at);
        vec![Action::SetCursor(Cursor::Grabbing)]
    }

    pub fn pointer_move(&mut self, at: Point, now_ms: u64) -> Vec<Action> {
        self.viewport
            .drag_to(at, now_ms)
            .map(Action::ViewportChanged)
            .into_iter()
            .collect()
    }

    pub fn pointer_up(&mut self, at: Point) -> Vec<Action> {
        self.finish_gesture(at)
    }

    /// The pointer left the canvas; ends any drag like a release.
    pub fn pointer_leave(&mut self, at: Point) -> Vec<Action> {
        self.finish_gesture(at)
    }

    // --- Touch ---

    /// Start a pan when exactly one finger touches down.
    pub fn touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        let [touch] = touches else {
            return Vec::new();
        };
        self.viewport.begin_drag(*touch);
        vec![Action::SetCursor(Cursor::Grabbing)]
    }

    pub fn touch_move(&mut self, touches: &[Point], now_ms: u64) -> Vec<Action> {
        let [touch] = touches else {
            return Vec::new();
        };
        self.pointer_move(*touch, now_ms)
    }

    /// `changed` is the lifted finger's final position.
    pub fn touch_end(&mut self, changed: Point) -> Vec<Action> {
        self.finish_gesture(changed)
    }

    fn finish_gesture(&mut self, at: Point) -> Vec<Action> {
        let Some(gesture) = self.viewport.end_drag(at) else {
            return Vec::new();
        };
        let mut actions = vec![Action::SetCursor(Cursor::Grab)];
        if let Gesture::Click { at } = gesture {
            if let Some(planet) = hit_test(&self.planets, at, self.viewport.offset()) {
                actions.push(Action::PlanetClicked(planet.id.clone()));
            }
        }
        actions
    }

    // --- Timers ---

    /// Persist the viewport if its debounce window has elapsed. Returns `true` on a write.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(offset) = self.viewport.poll_save(now_ms) else {
            return false;
        };
        self.store.save_viewport(offset);
        true
    }

    /// Write a pending viewport change now instead of waiting for its window.
    /// Returns `true` if there was one to write.
    pub fn flush_viewport(&mut self) -> bool {
        let Some(offset) = self.viewport.flush_save() else {
            return false;
        };
        self.store.save_viewport(offset);
        true
    }

    // --- Storage sync ---

    /// Handle a storage change made by another instance. Only planet changes
    /// are synced; viewport changes stay local to each instance.
    pub fn on_storage_event(&mut self, key: &str) -> Vec<Action> {
        if key != PLANETS_KEY {
            return Vec::new();
        }
        self.reload_planets();
        vec![Action::PlanetsReloaded(self.planets.len())]
    }

    /// Re-read planets from storage and recompute the bounds.
    pub fn reload_planets(&mut self) {
        self.planets = self.store.load_planets();
        self.viewport.set_bounds(calculate_bounds(&self.planets));
    }

    // --- Planet changes ---

    /// Validate `draft`, place it near the visible center, and store it.
    pub fn create_planet(&mut self, draft: PlanetDraft) -> Result<Planet, CanvasError> {
        let data = NewPlanet {
            name: draft.name,
            description: draft.description,
            image_url: draft.image_url,
            position: random_position_near(self.visible_center(), &self.planets),
            size: draft.size.unwrap_or(DEFAULT_SIZE),
        };
        validate_new_planet(&data)?;
        let planet = self.store.add_planet(data)?;
        self.reload_planets();
        Ok(planet)
    }

    pub fn update_planet(&mut self, id: &str, patch: &PlanetPatch) -> Result<(), CanvasError> {
        validate_patch(patch)?;
        self.store.update_planet(id, patch)?;
        self.reload_planets();
        Ok(())
    }

    pub fn delete_planet(&mut self, id: &str) -> Result<(), CanvasError> {
        self.store.delete_planet(id)?;
        self.reload_planets();
        Ok(())
    }

    // --- Teardown ---

    /// Tear down the canvas. A pending viewport write is discarded, never performed.
    pub fn unmount(mut self) -> PlanetStore<S> {
        if self.viewport.cancel_save() {
            tracing::debug!("discarded pending viewport write on unmount");
        }
        self.store
    }
}
