// Orbit controls: damped rotation, pan, zoom and settling without drift.

use glam::Vec3;
use scatter_core::*;

fn camera() -> Camera {
    let mut c = Camera::new(Vec3::new(0.0, 0.0, 80.0), Vec3::ZERO, 60.0, 0.1, 1000.0);
    c.set_aspect_from(800, 600);
    c
}

fn settle(orbit: &mut OrbitController, cam: &mut Camera) -> usize {
    let mut frames = 0;
    while orbit.update(cam) {
        frames += 1;
        assert!(frames < 10_000, "orbit never settled");
    }
    frames
}

#[test]
fn idle_update_does_not_touch_camera() {
    let mut cam = camera();
    let mut orbit = OrbitController::default();
    let before = (cam.eye, cam.target);
    for _ in 0..100 {
        assert!(!orbit.update(&mut cam));
    }
    assert_eq!((cam.eye, cam.target), before);
}

#[test]
fn rotation_keeps_distance_and_settles() {
    let mut cam = camera();
    let mut orbit = OrbitController::default();
    orbit.rotate_by_pixels(100.0, 0.0, 600.0);
    assert!(orbit.update(&mut cam));
    let frames = settle(&mut orbit, &mut cam);
    assert!(frames > 10, "damping should spread motion over frames");
    assert!((cam.eye.length() - 80.0).abs() < 1e-3);
    // dragging right swings the eye towards -X
    assert!(cam.eye.x < 0.0);
    assert!(orbit.is_idle());
}

#[test]
fn undamped_rotation_applies_in_one_frame() {
    let mut cam = camera();
    let mut orbit = OrbitController::new(0.0);
    orbit.rotate_by_pixels(150.0, 0.0, 600.0);
    assert!(orbit.update(&mut cam));
    assert!(!orbit.update(&mut cam));
    // a quarter of the surface height is a quarter turn
    assert!((cam.eye - Vec3::new(-80.0, 0.0, 0.0)).length() < 1e-2);
}

#[test]
fn polar_angle_never_flips_over_the_pole() {
    let mut cam = camera();
    let mut orbit = OrbitController::new(0.0);
    orbit.rotate_by_pixels(0.0, 5000.0, 600.0);
    orbit.update(&mut cam);
    let offset = cam.eye - cam.target;
    assert!(offset.y > 0.0);
    assert!((offset.length() - 80.0).abs() < 1e-2);
}

#[test]
fn wheel_zooms_in_and_out_within_limits() {
    let mut cam = camera();
    let mut orbit = OrbitController::new(0.0);
    orbit.zoom_by_wheel(-100.0);
    orbit.update(&mut cam);
    assert!(cam.eye.z < 80.0);
    for _ in 0..500 {
        orbit.zoom_by_wheel(-100.0);
        orbit.update(&mut cam);
    }
    assert!((cam.distance_to(cam.target) - ORBIT_MIN_DISTANCE).abs() < 1e-3);
    for _ in 0..500 {
        orbit.zoom_by_wheel(100.0);
        orbit.update(&mut cam);
    }
    assert!((cam.distance_to(cam.target) - ORBIT_MAX_DISTANCE).abs() < 1e-2);
}

#[test]
fn pan_moves_target_and_eye_together() {
    let mut cam = camera();
    let mut orbit = OrbitController::new(0.0);
    orbit.pan_by_pixels(50.0, 0.0, &cam, 600.0);
    orbit.update(&mut cam);
    assert!(cam.target.x < 0.0);
    assert!((cam.eye - cam.target - Vec3::new(0.0, 0.0, 80.0)).length() < 1e-3);
}

#[test]
fn stop_discards_inertia() {
    let mut cam = camera();
    let mut orbit = OrbitController::default();
    orbit.rotate_by_pixels(200.0, 50.0, 600.0);
    orbit.update(&mut cam);
    orbit.stop();
    let snapshot = (cam.eye, cam.target);
    assert!(!orbit.update(&mut cam));
    assert_eq!((cam.eye, cam.target), snapshot);
}
