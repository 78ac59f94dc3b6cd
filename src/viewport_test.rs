#![allow(clippy::float_cmp)]

use super::*;

fn small_bounds() -> Bounds {
    Bounds { min_x: -100.0, max_x: 100.0, min_y: -100.0, max_y: 100.0 }
}

fn wide_bounds() -> Bounds {
    Bounds { min_x: -10_000.0, max_x: 10_000.0, min_y: -10_000.0, max_y: 10_000.0 }
}

fn controller(bounds: Bounds, width: f64, height: f64) -> ViewportController {
    let mut vc = ViewportController::default();
    vc.set_bounds(bounds);
    vc.set_canvas_size(width, height);
    vc
}

// =============================================================
// clamp
// =============================================================

#[test]
fn clamp_far_outside_lands_in_range() {
    let vc = controller(small_bounds(), 50.0, 50.0);
    assert_eq!(vc.clamp(Point::new(1_000.0, -1_000.0)), Point::new(100.0, -50.0));
    assert_eq!(vc.clamp(Point::new(-1_000.0, 1_000.0)), Point::new(-50.0, 100.0));
}

#[test]
fn clamp_inside_is_unchanged() {
    let vc = controller(small_bounds(), 50.0, 50.0);
    assert_eq!(vc.clamp(Point::new(0.0, 0.0)), Point::new(0.0, 0.0));
    assert_eq!(vc.clamp(Point::new(-50.0, 100.0)), Point::new(-50.0, 100.0));
}

#[test]
fn clamp_degenerate_range_picks_lower_bound() {
    // 1000-unit bounds on a 1600-unit canvas: lower 1100 > upper 500.
    let vc = controller(Bounds::default(), 1_600.0, 1_600.0);
    for v in [-9_999.0, 0.0, 500.0, 800.0, 9_999.0] {
        assert_eq!(vc.clamp(Point::new(v, v)), Point::new(1_100.0, 1_100.0));
    }
}

#[test]
fn clamp_never_yields_nan() {
    let vc = controller(Bounds::default(), 1_600.0, 200.0);
    let p = vc.clamp(Point::new(f64::NAN, f64::NAN));
    assert!(!p.x.is_nan());
    assert!(!p.y.is_nan());
}

#[test]
fn clamp_without_canvas_size_passes_through() {
    let mut vc = ViewportController::default();
    vc.set_bounds(small_bounds());
    assert_eq!(vc.clamp(Point::new(5_000.0, -5_000.0)), Point::new(5_000.0, -5_000.0));
}

#[test]
fn clamp_axis_formula() {
    assert_eq!(clamp_axis(0.0, -100.0, 100.0, 50.0), 0.0);
    assert_eq!(clamp_axis(500.0, -100.0, 100.0, 50.0), 100.0);
    assert_eq!(clamp_axis(-500.0, -100.0, 100.0, 50.0), -50.0);
}

// =============================================================
// drag state machine
// =============================================================

#[test]
fn starts_idle_at_given_offset() {
    let vc = ViewportController::new(Point::new(3.0, 4.0));
    assert_eq!(vc.state(), DragState::Idle);
    assert!(!vc.is_dragging());
    assert_eq!(vc.offset(), Point::new(3.0, 4.0));
    assert_eq!(vc.canvas_size(), None);
}

#[test]
fn drag_applies_pointer_delta() {
    let mut vc = controller(wide_bounds(), 800.0, 600.0);
    vc.begin_drag(Point::new(100.0, 100.0));
    assert!(vc.is_dragging());

    assert_eq!(vc.drag_to(Point::new(110.0, 95.0), 0), Some(Point::new(10.0, -5.0)));
    assert_eq!(vc.drag_to(Point::new(130.0, 95.0), 16), Some(Point::new(30.0, -5.0)));
    assert_eq!(vc.offset(), Point::new(30.0, -5.0));
}

#[test]
fn drag_move_while_idle_is_ignored() {
    let mut vc = controller(wide_bounds(), 800.0, 600.0);
    assert_eq!(vc.drag_to(Point::new(50.0, 50.0), 0), None);
    assert_eq!(vc.offset(), Point::ORIGIN);
    assert!(!vc.has_pending_save());
}

#[test]
fn drag_is_clamped_each_step() {
    let mut vc = controller(small_bounds(), 50.0, 50.0);
    vc.begin_drag(Point::ORIGIN);
    assert_eq!(vc.drag_to(Point::new(500.0, 500.0), 0), Some(Point::new(100.0, 100.0)));
    // Moving back applies the raw delta from the clamped offset.
    assert_eq!(vc.drag_to(Point::new(480.0, 500.0), 10), Some(Point::new(80.0, 100.0)));
}

#[test]
fn short_gesture_is_a_click() {
    let mut vc = controller(wide_bounds(), 800.0, 600.0);
    vc.begin_drag(Point::new(10.0, 10.0));
    vc.drag_to(Point::new(12.0, 11.0), 0);
    let gesture = vc.end_drag(Point::new(13.0, 12.0));
    assert_eq!(gesture, Some(Gesture::Click { at: Point::new(13.0, 12.0) }));
    assert!(!vc.is_dragging());
}

#[test]
fn long_gesture_is_a_drag() {
    let mut vc = controller(wide_bounds(), 800.0, 600.0);
    vc.begin_drag(Point::new(0.0, 0.0));
    let gesture = vc.end_drag(Point::new(3.0, 4.0));
    assert_eq!(gesture, Some(Gesture::Drag { distance: 5.0 }));
}

#[test]
fn end_while_idle_is_none() {
    let mut vc = ViewportController::default();
    assert_eq!(vc.end_drag(Point::ORIGIN), None);
}

#[test]
fn custom_click_threshold() {
    let mut vc = ViewportController::with_settings(Point::ORIGIN, 500, 20.0);
    vc.begin_drag(Point::ORIGIN);
    assert!(matches!(vc.end_drag(Point::new(10.0, 10.0)), Some(Gesture::Click { .. })));
}

#[test]
fn new_bounds_apply_on_next_step() {
    let mut vc = controller(wide_bounds(), 50.0, 50.0);
    vc.begin_drag(Point::ORIGIN);
    vc.drag_to(Point::new(1_000.0, 0.0), 0);
    vc.set_bounds(small_bounds());
    assert_eq!(vc.offset(), Point::new(1_000.0, 0.0));
    vc.drag_to(Point::new(1_000.0, 0.0), 10);
    assert_eq!(vc.offset(), Point::new(100.0, 0.0));
}

// =============================================================
// debounced persistence
// =============================================================

#[test]
fn rapid_moves_release_one_save_with_last_offset() {
    let mut vc = controller(wide_bounds(), 800.0, 600.0);
    vc.begin_drag(Point::ORIGIN);
    let mut saves = Vec::new();
    for step in 1..=20u64 {
        vc.drag_to(Point::new(step as f64, 0.0), step * 10);
        if let Some(p) = vc.poll_save(step * 10) {
            saves.push(p);
        }
    }
    vc.end_drag(Point::new(20.0, 0.0));
    for now in [300, 600, 699, 700, 800, 5_000] {
        if let Some(p) = vc.poll_save(now) {
            saves.push(p);
        }
    }
    assert_eq!(saves, vec![Point::new(20.0, 0.0)]);
}

#[test]
fn cancel_before_window_drops_save() {
    let mut vc = controller(wide_bounds(), 800.0, 600.0);
    vc.begin_drag(Point::ORIGIN);
    vc.drag_to(Point::new(40.0, 40.0), 0);
    assert!(vc.has_pending_save());
    assert!(vc.cancel_save());
    assert_eq!(vc.poll_save(10_000), None);
}

#[test]
fn flush_releases_pending_offset() {
    let mut vc = controller(wide_bounds(), 800.0, 600.0);
    vc.begin_drag(Point::ORIGIN);
    vc.drag_to(Point::new(7.0, 8.0), 0);
    assert_eq!(vc.flush_save(), Some(Point::new(7.0, 8.0)));
    assert_eq!(vc.flush_save(), None);
}
