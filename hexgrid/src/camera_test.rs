#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn vp() -> Viewport {
    Viewport::new(800.0, 600.0)
}

fn cam(pan_x: f64, pan_y: f64, zoom: f64, tile_size: f64) -> Camera {
    Camera { pan_x, pan_y, zoom, tile_size }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_camera_is_centered_at_unit_zoom() {
    let c = Camera::default();
    assert_eq!(c.pan_x, 0.0);
    assert_eq!(c.pan_y, 0.0);
    assert_eq!(c.zoom, 1.0);
    assert_eq!(c.tile_size, 50.0);
}

#[test]
fn viewport_center_is_half_extent() {
    assert_eq!(vp().center(), Point::new(400.0, 300.0));
}

// =============================================================
// Scale
// =============================================================

#[test]
fn total_zoom_combines_tile_size_and_zoom() {
    assert!(approx_eq(Camera::default().total_zoom(), 1.25));
    assert!(approx_eq(cam(0.0, 0.0, 2.0, 40.0).total_zoom(), 2.0));
    assert!(approx_eq(cam(0.0, 0.0, 0.5, 80.0).total_zoom(), 1.0));
}

#[test]
fn screen_hex_size_is_tile_size_times_zoom() {
    assert!(approx_eq(cam(0.0, 0.0, 1.5, 50.0).screen_hex_size(), 75.0));
}

// =============================================================
// World <-> screen
// =============================================================

#[test]
fn world_origin_lands_on_viewport_center() {
    let s = Camera::default().world_to_screen(Point::new(0.0, 0.0), vp());
    assert!(point_approx_eq(s, Point::new(400.0, 300.0)));
}

#[test]
fn viewport_center_is_world_origin() {
    let w = Camera::default().screen_to_world(Point::new(400.0, 300.0), vp());
    assert!(point_approx_eq(w, Point::new(0.0, 0.0)));
}

#[test]
fn world_to_screen_scales_then_pans_then_centers() {
    let c = cam(20.0, 10.0, 2.0, 40.0);
    let s = c.world_to_screen(Point::new(5.0, 5.0), vp());
    assert!(point_approx_eq(s, Point::new(430.0, 320.0)));
}

#[test]
fn screen_world_round_trip() {
    let cameras = [
        Camera::default(),
        cam(120.0, -45.0, 2.5, 50.0),
        cam(-300.0, 80.0, 0.5, 30.0),
        cam(7.25, 3.5, 1.05, 64.0),
    ];
    let points = [Point::new(0.0, 0.0), Point::new(400.0, 300.0), Point::new(13.5, 599.0), Point::new(-50.0, 900.0)];
    for c in cameras {
        for p in points {
            let back = c.world_to_screen(c.screen_to_world(p, vp()), vp());
            assert!(point_approx_eq(back, p), "{c:?} {p:?}");
        }
    }
}

#[test]
fn cell_to_screen_uses_base_hex_size() {
    let s = Camera::default().cell_to_screen(Axial::new(1, 0), vp());
    // 40·√3 world units at a total zoom of 1.25.
    assert!(approx_eq(s.x, 400.0 + 50.0 * crate::consts::SQRT_3));
    assert!(approx_eq(s.y, 300.0));
}

#[test]
fn viewport_center_resolves_to_origin_cell() {
    assert_eq!(Camera::default().screen_to_cell(Point::new(400.0, 300.0), vp()), Axial::ORIGIN);
}

#[test]
fn cell_screen_round_trip_under_pan_and_zoom() {
    let c = cam(-75.0, 42.0, 1.7, 50.0);
    for q in -5..=5 {
        for r in -5..=5 {
            let cell = Axial::new(q, r);
            assert_eq!(c.screen_to_cell(c.cell_to_screen(cell, vp()), vp()), cell);
        }
    }
}

// =============================================================
// Pan / zoom
// =============================================================

#[test]
fn panned_by_adds_delta() {
    let c = Camera::default().panned_by(10.0, -5.0).panned_by(2.5, 1.0);
    assert!(approx_eq(c.pan_x, 12.5));
    assert!(approx_eq(c.pan_y, -4.0));
    assert_eq!(c.zoom, 1.0);
}

#[test]
fn zoom_at_keeps_anchor_fixed() {
    let anchor = Point::new(610.0, 145.0);
    let cameras = [Camera::default(), cam(130.0, -60.0, 1.0, 50.0), cam(-20.0, 35.0, 2.2, 40.0)];
    for c in cameras {
        for factor in [1.05, 0.95, 1.5, 0.6] {
            let before = c.screen_to_world(anchor, vp());
            let next = c.zoomed_at(anchor, c.zoom * factor, vp());
            let after = next.screen_to_world(anchor, vp());
            assert!(point_approx_eq(before, after), "{c:?} x{factor}");
        }
    }
}

#[test]
fn zoom_at_center_does_not_pan_a_centered_camera() {
    let c = Camera::default().zoomed_at(Point::new(400.0, 300.0), 2.0, vp());
    assert_eq!(c.zoom, 2.0);
    assert!(approx_eq(c.pan_x, 0.0));
    assert!(approx_eq(c.pan_y, 0.0));
}

#[test]
fn zoom_at_clamps_and_keeps_anchor_at_limit() {
    let anchor = Point::new(100.0, 100.0);
    let c = cam(0.0, 0.0, 2.9, 50.0);
    let before = c.screen_to_world(anchor, vp());
    let next = c.zoomed_at(anchor, 10.0, vp());
    assert_eq!(next.zoom, MAX_ZOOM);
    assert!(point_approx_eq(next.screen_to_world(anchor, vp()), before));
}

#[test]
fn zoom_at_preserves_tile_size() {
    let c = cam(0.0, 0.0, 1.0, 64.0).zoomed_at(Point::new(0.0, 0.0), 1.5, vp());
    assert_eq!(c.tile_size, 64.0);
}

#[test]
fn clamp_zoom_bounds() {
    assert_eq!(clamp_zoom(0.2), 0.5);
    assert_eq!(clamp_zoom(1.3), 1.3);
    assert_eq!(clamp_zoom(7.0), 3.0);
}

#[test]
fn reset_restores_origin_and_unit_zoom() {
    let c = cam(300.0, -200.0, 2.4, 72.0).reset();
    assert_eq!(c, cam(0.0, 0.0, 1.0, 72.0));
}

// =============================================================
// Culling
// =============================================================

#[test]
fn cull_margin_is_two_hexes() {
    assert!(approx_eq(Camera::default().cull_margin(), 100.0));
    assert!(approx_eq(cam(0.0, 0.0, 2.0, 50.0).cull_margin(), 200.0));
}

#[test]
fn visible_inside_viewport() {
    assert!(Camera::default().is_visible(Point::new(400.0, 300.0), vp()));
}

#[test]
fn visible_within_margin() {
    let c = Camera::default();
    assert!(c.is_visible(Point::new(-99.0, 300.0), vp()));
    assert!(c.is_visible(Point::new(899.0, 300.0), vp()));
    assert!(c.is_visible(Point::new(400.0, 699.0), vp()));
}

#[test]
fn culled_past_margin() {
    let c = Camera::default();
    assert!(!c.is_visible(Point::new(-101.0, 300.0), vp()));
    assert!(!c.is_visible(Point::new(900.0, 300.0), vp()));
    assert!(!c.is_visible(Point::new(400.0, -100.0), vp()));
    assert!(!c.is_visible(Point::new(400.0, 750.0), vp()));
}
