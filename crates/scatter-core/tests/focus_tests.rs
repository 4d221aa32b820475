// Camera focus: deterministic cut, and eased transitions that the latest request overrides.

use glam::Vec3;
use scatter_core::*;
use std::time::Duration;

fn camera() -> Camera {
    Camera::new(Vec3::new(0.0, 0.0, 80.0), Vec3::ZERO, 60.0, 0.1, 1000.0)
}

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn cut_places_camera_at_offset_regardless_of_prior_state() {
    let marker = Vec3::new(15.0, -6.0, 5.0);
    let priors = [
        (Vec3::new(0.0, 0.0, 80.0), Vec3::ZERO),
        (Vec3::new(-40.0, 12.0, -3.0), Vec3::new(1.0, 2.0, 3.0)),
        (Vec3::new(100.0, 100.0, 100.0), Vec3::new(-15.0, 8.0, 0.0)),
    ];
    for (eye, target) in priors {
        let mut cam = camera();
        cam.eye = eye;
        cam.target = target;
        let mut focus = FocusController::new(focus_offset_vec3(), Duration::ZERO);
        focus.request(&mut cam, marker);
        assert_eq!(cam.eye, marker + Vec3::new(0.0, 0.0, 30.0));
        assert_eq!(cam.target, marker);
        assert!(!focus.is_animating());
    }
}

#[test]
fn focus_pose_is_offset_from_marker() {
    let (eye, target) = focus_pose(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 30.0));
    assert_eq!(eye, Vec3::new(1.0, 2.0, 33.0));
    assert_eq!(target, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn animated_focus_ends_exactly_on_target() {
    let mut cam = camera();
    let mut focus = FocusController::new(focus_offset_vec3(), Duration::from_millis(500));
    let marker = Vec3::new(-15.0, 8.0, 0.0);
    focus.request(&mut cam, marker);
    assert!(focus.is_animating());
    // request alone does not move the camera
    assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 80.0));

    assert!(focus.tick(Duration::from_millis(250), &mut cam));
    assert!(cam.target.x < 0.0 && cam.target.x > -15.0);
    assert!((cam.eye - cam.target).length() > 1.0);

    assert!(!focus.tick(Duration::from_millis(300), &mut cam));
    assert!(close(cam.eye, marker + focus_offset_vec3()));
    assert!(close(cam.target, marker));
}

#[test]
fn new_request_mid_transition_wins() {
    let mut cam = camera();
    let mut focus = FocusController::new(focus_offset_vec3(), Duration::from_secs(1));
    let first = Vec3::new(-15.0, 8.0, 0.0);
    let second = Vec3::new(15.0, -6.0, 5.0);
    focus.request(&mut cam, first);
    focus.tick(Duration::from_millis(400), &mut cam);
    focus.request(&mut cam, second);
    for _ in 0..20 {
        focus.tick(Duration::from_millis(100), &mut cam);
    }
    assert!(!focus.is_animating());
    assert!(close(cam.target, second));
    assert!(close(cam.eye, second + focus_offset_vec3()));
}

#[test]
fn cancel_leaves_camera_in_place() {
    let mut cam = camera();
    let mut focus = FocusController::new(focus_offset_vec3(), Duration::from_secs(1));
    focus.request(&mut cam, Vec3::new(10.0, 0.0, 0.0));
    focus.tick(Duration::from_millis(300), &mut cam);
    let (eye, target) = (cam.eye, cam.target);
    focus.cancel();
    assert!(!focus.tick(Duration::from_millis(300), &mut cam));
    assert_eq!(cam.eye, eye);
    assert_eq!(cam.target, target);
}
