use crate::{Bounds, Point2, Viewport, ZoomRange, fit_camera};

#[test]
fn clip_matrix_matches_array_form() {
    let cam = fit_camera(
        Bounds::new(-20.0, 0.0, 60.0, 40.0),
        Viewport::new(320.0, 240.0),
        0.9,
        ZoomRange::default(),
    );
    let m = cam.clip_from_world_mat4();
    assert_eq!(m.to_cols_array_2d(), cam.clip_from_world());

    let center = m.transform_point3(glam::Vec3::new(cam.center_x, cam.center_y, 0.0));
    assert!(center.x.abs() < 1.0e-5 && center.y.abs() < 1.0e-5);
}

#[test]
fn point_conversions() {
    let p: Point2 = glam::Vec2::new(1.5, -2.0).into();
    assert_eq!(p, Point2::new(1.5, -2.0));
    let v: glam::Vec2 = p.into();
    assert_eq!(v, glam::Vec2::new(1.5, -2.0));
}
