use crate::{Bounds, Point2, Viewport, ZoomRange, fit_camera};

fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 1.0e-4,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

fn range() -> ZoomRange {
    ZoomRange::new(0.01, 10.0).expect("valid range")
}

#[test]
fn zoom_uses_the_larger_relative_extent() {
    let bounds = Bounds::new(-100.0, -50.0, 100.0, 50.0);
    let cam = fit_camera(bounds, Viewport::new(400.0, 400.0), 0.9, range());
    // max(200 * 0.9 / 400, 100 * 0.9 / 400)
    assert_approx(cam.zoom, 0.45);
    assert_approx(cam.center_x, 0.0);
    assert_approx(cam.center_y, 0.0);
    assert_eq!(cam.viewport_width, 400.0);
    assert_eq!(cam.viewport_height, 400.0);
}

#[test]
fn center_is_bounds_midpoint() {
    let bounds = Bounds::new(10.0, 20.0, 30.0, 60.0);
    let cam = fit_camera(bounds, Viewport::new(800.0, 600.0), 1.0, range());
    assert_approx(cam.center_x, 20.0);
    assert_approx(cam.center_y, 40.0);
}

#[test]
fn zoom_is_clamped_for_degenerate_bounds() {
    let r = range();
    let tiny = Bounds::new(0.0, 0.0, 0.0, 0.0);
    let huge = Bounds::new(-1.0e30, -1.0e30, 1.0e30, 1.0e30);
    let overflow = Bounds::new(-f32::MAX, -f32::MAX, f32::MAX, f32::MAX);

    for bounds in [tiny, huge, overflow, Bounds::DEFAULT] {
        for viewport in [
            Viewport::new(1.0, 1.0),
            Viewport::new(0.0, 0.0),
            Viewport::new(f32::NAN, 300.0),
            Viewport::new(1920.0, 1080.0),
        ] {
            for pad in [0.5, 0.9, 1.0, 0.0, -1.0, f32::NAN] {
                let cam = fit_camera(bounds, viewport, pad, r);
                assert!(
                    cam.zoom >= r.min && cam.zoom <= r.max,
                    "zoom {} out of range for {bounds:?} / {viewport:?} / {pad}",
                    cam.zoom
                );
                assert!(cam.center_x.is_finite() && cam.center_y.is_finite());
            }
        }
    }
}

#[test]
fn inverted_range_collapses_to_max() {
    let r = ZoomRange { min: 5.0, max: 1.0 };
    let cam = fit_camera(Bounds::DEFAULT, Viewport::new(100.0, 100.0), 1.0, r);
    assert_eq!(cam.zoom, 1.0);
    assert!(ZoomRange::new(5.0, 1.0).is_err());
    assert!(ZoomRange::new(0.0, 1.0).is_err());
    assert!(ZoomRange::new(0.5, f32::INFINITY).is_err());
}

#[test]
fn clamp_maps_nan_to_max() {
    assert_eq!(range().clamp(f32::NAN), 10.0);
    assert_eq!(range().clamp(0.0), 0.01);
    assert_eq!(range().clamp(3.0), 3.0);
}

#[test]
fn viewport_validation() {
    assert!(Viewport::validated(100.0, 50.0).is_ok());
    assert!(Viewport::validated(0.0, 50.0).is_err());
    assert!(Viewport::validated(100.0, f32::INFINITY).is_err());
}

#[test]
fn screen_world_round_trip() {
    let bounds = Bounds::new(-50.0, 0.0, 50.0, 200.0);
    let cam = fit_camera(bounds, Viewport::new(400.0, 300.0), 0.8, range());

    let center = cam.world_to_screen(Point2::new(cam.center_x, cam.center_y));
    assert_approx(center.x, 200.0);
    assert_approx(center.y, 150.0);

    let top = cam.world_to_screen(Point2::new(0.0, 200.0));
    assert!(top.y < 150.0, "world +y maps upwards on screen");

    let back = cam.screen_to_world(Point2::new(37.0, 211.0));
    let again = cam.world_to_screen(back);
    assert_approx(again.x, 37.0);
    assert_approx(again.y, 211.0);
}

#[test]
fn clip_matrix_maps_visible_corners_to_unit_square() {
    let bounds = Bounds::new(0.0, 0.0, 300.0, 100.0);
    let cam = fit_camera(bounds, Viewport::new(600.0, 400.0), 1.0, range());
    let m = cam.clip_from_world();
    let visible = cam.visible_bounds();

    let clip = |x: f32, y: f32| (m[0][0] * x + m[3][0], m[1][1] * y + m[3][1]);
    let (x0, y0) = clip(visible.min_x, visible.min_y);
    let (x1, y1) = clip(visible.max_x, visible.max_y);
    assert_approx(x0, -1.0);
    assert_approx(y0, -1.0);
    assert_approx(x1, 1.0);
    assert_approx(y1, 1.0);
}

#[test]
fn same_input_same_output() {
    let bounds = Bounds::new(-3.0, -4.0, 12.0, 5.0);
    let a = fit_camera(bounds, Viewport::new(640.0, 480.0), 0.9, range());
    let b = fit_camera(bounds, Viewport::new(640.0, 480.0), 0.9, range());
    assert_eq!(a, b);
}
