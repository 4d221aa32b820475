use crate::constants::*;
use glam::{Vec2, Vec3};
use std::time::Duration;

/// Tunables for the label billboard scaler.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelScaleConfig {
    pub desired_px: f32,
    pub min_world: f32,
    pub max_world: f32,
}

impl LabelScaleConfig {
    /// Clamp a billboard size to the configured world bounds, per axis.
    #[inline]
    pub fn clamp(&self, size: Vec2) -> Vec2 {
        size.clamp(Vec2::splat(self.min_world), Vec2::splat(self.max_world))
    }
}

impl Default for LabelScaleConfig {
    fn default() -> Self {
        Self {
            desired_px: LABEL_DESIRED_PX,
            min_world: LABEL_MIN_WORLD,
            max_world: LABEL_MAX_WORLD,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub data_url: String,
    pub fov_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    pub start_eye: Vec3,
    pub marker_radius: f32,
    pub hover_scale: f32,
    pub labels: LabelScaleConfig,
    pub focus_offset: Vec3,
    /// Zero means the camera cuts straight to the focus pose.
    pub focus_duration: Duration,
    pub orbit_damping: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            fov_deg: CAMERA_FOV_DEG,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            start_eye: Vec3::from_array(CAMERA_START_EYE),
            marker_radius: MARKER_RADIUS,
            hover_scale: HOVER_SCALE,
            labels: LabelScaleConfig::default(),
            focus_offset: focus_offset_vec3(),
            focus_duration: Duration::from_secs_f32(FOCUS_DURATION_SEC),
            orbit_damping: ORBIT_DAMPING,
        }
    }
}
