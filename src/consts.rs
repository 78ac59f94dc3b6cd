//! Shared constants for the canvas core.

// ── Planet fields ───────────────────────────────────────────────

/// Maximum planet name length, in characters.
pub const NAME_MAX_LENGTH: usize = 50;

/// Maximum planet description length, in characters.
pub const DESCRIPTION_MAX_LENGTH: usize = 500;

/// Smallest allowed planet size in canvas units.
pub const MIN_SIZE: f64 = 80.0;

/// Largest allowed planet size in canvas units.
pub const MAX_SIZE: f64 = 200.0;

/// Size given to planets created without an explicit one.
pub const DEFAULT_SIZE: f64 = 120.0;

/// Largest accepted image upload, in bytes (2 MiB).
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

// ── Canvas ──────────────────────────────────────────────────────

/// Margin added on every side of the planet extent when computing bounds.
pub const CANVAS_MARGIN: f64 = 500.0;

/// Quiet period before a viewport change is written to storage.
pub const VIEWPORT_SAVE_DEBOUNCE_MS: u64 = 500;

/// Net pointer travel below which a gesture counts as a click.
pub const CLICK_THRESHOLD_PX: f64 = 5.0;

// ── Placement ───────────────────────────────────────────────────

/// Half-width of the square around the reference point where new planets spawn.
pub const PLACEMENT_SPREAD: f64 = 200.0;

/// Preferred minimum distance between a new planet and existing ones.
pub const PLACEMENT_MIN_DISTANCE: f64 = 200.0;

/// Candidates tried before settling for an unchecked one.
pub const PLACEMENT_MAX_ATTEMPTS: usize = 10;

// ── Storage keys ────────────────────────────────────────────────

/// Key holding the JSON array of planets.
pub const PLANETS_KEY: &str = "vortex-planets";

/// Key holding the `{ viewport: { x, y, scale } }` record.
pub const VIEWPORT_KEY: &str = "vortex-viewport";
