#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn point_approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::ORIGIN);
}

#[test]
fn point_add_and_sub() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(10.0, -5.0);
    assert_eq!(a + b, Point::new(11.0, -3.0));
    assert_eq!(b - a, Point::new(9.0, -7.0));
}

#[test]
fn point_distance_is_euclidean() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert!((a.distance_to(b) - 5.0).abs() < EPSILON);
    assert!((b.distance_to(a) - 5.0).abs() < EPSILON);
}

#[test]
fn point_serializes_as_xy_object() {
    let json = serde_json::to_value(Point::new(1.5, -2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

// --- transforms ---

#[test]
fn world_to_screen_adds_offset() {
    let screen = world_to_screen(Point::new(100.0, 50.0), Point::new(-30.0, 20.0));
    assert!(point_approx_eq(screen, Point::new(70.0, 70.0)));
}

#[test]
fn screen_to_world_inverts_world_to_screen() {
    let offset = Point::new(123.0, -456.0);
    let world = Point::new(7.5, 8.25);
    let back = screen_to_world(world_to_screen(world, offset), offset);
    assert!(point_approx_eq(back, world));
}

#[test]
fn visible_center_at_origin_offset_is_half_canvas() {
    let c = visible_center(Point::ORIGIN, 800.0, 600.0);
    assert!(point_approx_eq(c, Point::new(400.0, 300.0)));
}

#[test]
fn visible_center_moves_against_offset() {
    let c = visible_center(Point::new(100.0, -100.0), 800.0, 600.0);
    assert!(point_approx_eq(c, Point::new(300.0, 400.0)));
}
