//! Orbit controls: rotate, pan and zoom the camera around its look target.
//!
//! Input handlers only accumulate deltas; `update` applies them once per frame.
//! With damping enabled a fraction of the pending motion is applied each
//! frame and the rest decays, giving the camera some inertia.

use crate::camera::Camera;
use crate::constants::*;
use glam::Vec3;
use std::f32::consts::PI;

const POLE_EPS: f32 = 1e-3;
const SETTLE_EPS: f32 = 1e-6;

/// Spherical coordinates around +Y: `theta` from +Z towards +X, `phi` from +Y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitController {
    pub damping: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(ORBIT_DAMPING)
    }
}

impl OrbitController {
    pub fn new(damping: f32) -> Self {
        Self {
            damping: damping.clamp(0.0, 1.0),
            rotate_speed: ORBIT_ROTATE_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Drag of `dx, dy` pixels; a drag across the full surface height turns a full circle.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, surface_height_px: f32) {
        if surface_height_px <= 0.0 {
            return;
        }
        self.delta_theta -= 2.0 * PI * dx / surface_height_px * self.rotate_speed;
        self.delta_phi -= 2.0 * PI * dy / surface_height_px * self.rotate_speed;
    }

    /// Move the target so the point under the pointer follows the drag.
    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32, camera: &Camera, surface_height_px: f32) {
        if surface_height_px <= 0.0 {
            return;
        }
        let target_distance = camera.distance_to(camera.target) * (camera.fovy_radians * 0.5).tan();
        let (right, up) = camera.billboard_axes();
        let left_amount = 2.0 * dx * target_distance / surface_height_px * self.pan_speed;
        let up_amount = 2.0 * dy * target_distance / surface_height_px * self.pan_speed;
        self.pan_offset += -right * left_amount + up * up_amount;
    }

    /// Wheel delta in pixels; negative zooms in.
    pub fn zoom_by_wheel(&mut self, delta_y: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= step;
        } else if delta_y > 0.0 {
            self.scale /= step;
        }
    }

    /// Drop any pending or decaying motion.
    pub fn stop(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.delta_theta.abs() < SETTLE_EPS
            && self.delta_phi.abs() < SETTLE_EPS
            && self.pan_offset.length_squared() < SETTLE_EPS * SETTLE_EPS
            && (self.scale - 1.0).abs() < SETTLE_EPS
    }

    /// Apply pending motion to the camera. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if self.is_idle() {
            self.stop();
            return false;
        }
        let damped = self.damping > 0.0;
        let k = if damped { self.damping } else { 1.0 };

        let mut s = Spherical::from_offset(camera.eye - camera.target);
        s.theta += self.delta_theta * k;
        s.phi = (s.phi + self.delta_phi * k).clamp(POLE_EPS, PI - POLE_EPS);
        let zoom = if damped { 1.0 + (self.scale - 1.0) * k } else { self.scale };
        s.radius = (s.radius * zoom).clamp(self.min_distance, self.max_distance);

        camera.target += self.pan_offset * k;
        camera.eye = camera.target + s.to_offset();

        if damped {
            let keep = 1.0 - self.damping;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
            self.scale = 1.0 + (self.scale - 1.0) * keep;
        } else {
            self.stop();
        }
        true
    }
}
