//! Camera focus: put a chosen marker at the centre of the view at a fixed
//! standoff and make it the orbit pivot.

use crate::camera::Camera;
use glam::Vec3;
use std::time::Duration;

/// Camera eye and look target for focusing a point.
#[inline]
pub fn focus_pose(marker_world: Vec3, offset: Vec3) -> (Vec3, Vec3) {
    (marker_world + offset, marker_world)
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Clone, Debug)]
struct FocusTransition {
    from_target: Vec3,
    from_offset: Vec3,
    to_target: Vec3,
    to_offset: Vec3,
    elapsed: Duration,
    duration: Duration,
}

impl FocusTransition {
    /// Pose at eased progress `s`. The eye-to-target vector is interpolated
    /// in direction and length separately so the eye never collapses onto the target.
    fn pose_at(&self, s: f32) -> (Vec3, Vec3) {
        let target = self.from_target.lerp(self.to_target, s);
        let from_len = self.from_offset.length();
        let to_len = self.to_offset.length();
        let from_dir = self.from_offset.normalize_or_zero();
        let to_dir = self.to_offset.normalize_or_zero();
        let mut dir = from_dir.lerp(to_dir, s);
        if dir.length_squared() < 1e-6 {
            dir = to_dir;
        }
        let len = from_len + (to_len - from_len) * s;
        (target + dir.normalize_or_zero() * len, target)
    }
}

#[derive(Clone, Debug)]
pub struct FocusController {
    offset: Vec3,
    duration: Duration,
    active: Option<FocusTransition>,
}

impl FocusController {
    pub fn new(offset: Vec3, duration: Duration) -> Self {
        Self {
            offset,
            duration,
            active: None,
        }
    }

    #[inline]
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Focus `marker_world`. With a zero duration the camera cuts immediately;
    /// otherwise a transition starts from the current pose, replacing any
    /// transition still running.
    pub fn request(&mut self, camera: &mut Camera, marker_world: Vec3) {
        let (eye, target) = focus_pose(marker_world, self.offset);
        if self.duration.is_zero() {
            self.active = None;
            camera.eye = eye;
            camera.target = target;
            return;
        }
        self.active = Some(FocusTransition {
            from_target: camera.target,
            from_offset: camera.eye - camera.target,
            to_target: target,
            to_offset: eye - target,
            elapsed: Duration::ZERO,
            duration: self.duration,
        });
    }

    /// Advance a running transition. Returns true while still animating.
    pub fn tick(&mut self, dt: Duration, camera: &mut Camera) -> bool {
        let Some(tr) = self.active.as_mut() else {
            return false;
        };
        tr.elapsed += dt;
        if tr.elapsed >= tr.duration {
            camera.target = tr.to_target;
            camera.eye = tr.to_target + tr.to_offset;
            self.active = None;
            return false;
        }
        let s = smoothstep(tr.elapsed.as_secs_f32() / tr.duration.as_secs_f32());
        let (eye, target) = tr.pose_at(s);
        camera.eye = eye;
        camera.target = target;
        true
    }

    /// Drop a running transition, leaving the camera where it is.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_hits_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn opposite_offsets_do_not_collapse() {
        let tr = FocusTransition {
            from_target: Vec3::ZERO,
            from_offset: Vec3::new(0.0, 0.0, 30.0),
            to_target: Vec3::ZERO,
            to_offset: Vec3::new(0.0, 0.0, -30.0),
            elapsed: Duration::ZERO,
            duration: Duration::from_secs(1),
        };
        let (eye, target) = tr.pose_at(0.5);
        assert!((eye - target).length() > 1.0);
    }
}
