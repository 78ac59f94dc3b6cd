//! Viewport controller: live pan offset, drag state machine, clamping, and
//! debounced persistence of the offset.
//!
//! The controller is driven entirely by the host's gesture events. It never
//! touches storage itself; the owner drains [`ViewportController::poll_save`]
//! on each tick and hands the released offset to the gateway.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::bounds::Bounds;
use crate::camera::Point;
use crate::consts::{CLICK_THRESHOLD_PX, VIEWPORT_SAVE_DEBOUNCE_MS};
use crate::debounce::Debouncer;

/// Gesture tracking between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The user is panning the canvas.
    Dragging {
        /// Pointer position at the previous event, used for the pan delta.
        last: Point,
        /// Pointer position at drag start, used to tell clicks from drags.
        origin: Point,
    },
}

/// How a finished gesture was classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Net travel stayed under the click threshold.
    Click { at: Point },
    /// The pointer travelled far enough to count as a pan.
    Drag { distance: f64 },
}

/// Visible canvas dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Owner of the live viewport offset.
#[derive(Debug, Clone)]
pub struct ViewportController {
    offset: Point,
    bounds: Bounds,
    canvas: Option<CanvasSize>,
    state: DragState,
    click_threshold: f64,
    save: Debouncer<Point>,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(Point::ORIGIN)
    }
}

impl ViewportController {
    /// Controller starting at `offset` with the default debounce and click threshold.
    #[must_use]
    pub fn new(offset: Point) -> Self {
        Self::with_settings(offset, VIEWPORT_SAVE_DEBOUNCE_MS, CLICK_THRESHOLD_PX)
    }

    #[must_use]
    pub fn with_settings(offset: Point, debounce_ms: u64, click_threshold: f64) -> Self {
        Self {
            offset,
            bounds: Bounds::default(),
            canvas: None,
            state: DragState::Idle,
            click_threshold,
            save: Debouncer::new(debounce_ms),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn canvas_size(&self) -> Option<CanvasSize> {
        self.canvas
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    // --- Inputs ---

    /// Replace the pannable bounds. The live offset is re-clamped on the next drag step.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas = Some(CanvasSize { width, height });
    }

    /// Start panning from pointer position `at`.
    pub fn begin_drag(&mut self, at: Point) {
        self.state = DragState::Dragging { last: at, origin: at };
    }

    /// Pan by the pointer delta since the previous event.
    ///
    /// Returns the new clamped offset, or `None` when no drag is in progress.
    /// The new offset is applied immediately and its write is debounced.
    pub fn drag_to(&mut self, at: Point, now_ms: u64) -> Option<Point> {
        let DragState::Dragging { last, origin } = self.state else {
            return None;
        };
        let proposed = self.offset + (at - last);
        self.offset = self.clamp(proposed);
        self.state = DragState::Dragging { last: at, origin };
        self.save.schedule(self.offset, now_ms);
        Some(self.offset)
    }

    /// Finish the gesture and classify it. `None` when no drag was in progress.
    ///
    /// Clicks are reported, not handled: routing a click to a planet is the
    /// caller's job.
    pub fn end_drag(&mut self, at: Point) -> Option<Gesture> {
        let DragState::Dragging { origin, .. } = self.state else {
            return None;
        };
        self.state = DragState::Idle;
        let distance = origin.distance_to(at);
        if distance < self.click_threshold {
            Some(Gesture::Click { at })
        } else {
            Some(Gesture::Drag { distance })
        }
    }

    /// Clamp `offset` so the visible window never leaves the bounds.
    ///
    /// Without a known canvas size the offset passes through unchanged.
    #[must_use]
    pub fn clamp(&self, offset: Point) -> Point {
        let Some(canvas) = self.canvas else {
            return offset;
        };
        Point::new(
            clamp_axis(offset.x, self.bounds.min_x, self.bounds.max_x, canvas.width),
            clamp_axis(offset.y, self.bounds.min_y, self.bounds.max_y, canvas.height),
        )
    }

    // --- Persistence ---

    /// The offset to persist, once the debounce window has elapsed.
    pub fn poll_save(&mut self, now_ms: u64) -> Option<Point> {
        self.save.poll(now_ms)
    }

    /// The pending offset, released immediately.
    pub fn flush_save(&mut self) -> Option<Point> {
        self.save.flush()
    }

    /// Discard the pending write. Returns `true` if one was dropped.
    pub fn cancel_save(&mut self) -> bool {
        self.save.cancel()
    }

    #[must_use]
    pub fn has_pending_save(&self) -> bool {
        self.save.is_pending()
    }
}

/// Clamp one axis of the offset to `[-max + extent, -min]`.
///
/// When content is smaller than the canvas the range is inverted
/// (`lower > upper`); the lower bound `-max + extent` then wins.
#[must_use]
pub fn clamp_axis(value: f64, min: f64, max: f64, extent: f64) -> f64 {
    let lower = -max + extent;
    let upper = -min;
    value.min(upper).max(lower)
}
