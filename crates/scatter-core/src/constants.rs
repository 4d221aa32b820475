use glam::Vec3;

// Shared visual/interaction tuning constants used by the viewer frontends.

// Camera
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_START_EYE: [f32; 3] = [0.0, 0.0, 80.0];

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05; // fraction of pending motion applied per frame
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 500.0;

// Markers
pub const MARKER_RADIUS: f32 = 2.2;
pub const BASE_SCALE: f32 = 1.0; // idle marker size
pub const HOVER_SCALE: f32 = 1.4; // hovered marker size

// Label billboards
pub const LABEL_DESIRED_PX: f32 = 36.0;
pub const LABEL_MIN_WORLD: f32 = 0.5;
pub const LABEL_MAX_WORLD: f32 = 20.0;
pub const LABEL_FONT_PX: f32 = 48.0;
pub const LABEL_BORDER_PX: f32 = 4.0;
pub const LABEL_SCALE_FACTOR: f32 = 0.12; // world units per bitmap pixel before the first rescale
pub const LABEL_LOCAL_OFFSET: [f32; 3] = [0.0, 0.0, 0.6]; // relative to the owning marker

// Axes
pub const AXIS_LEN: f32 = 18.0;
pub const AXIS_LABEL_MARGIN: f32 = 1.2;
pub const AXIS_LABEL_FONT_PX: f32 = 36.0;
pub const AXIS_LABEL_SCALE_FACTOR: f32 = 0.08;

// Camera focus
pub const FOCUS_OFFSET: [f32; 3] = [0.0, 0.0, 30.0];
pub const FOCUS_DURATION_SEC: f32 = 0.0; // 0 = instant cut

// Pointer
pub const TOOLTIP_OFFSET_PX: f32 = 12.0;
pub const CLICK_SLOP_PX: f32 = 4.0; // max pointer travel for a press to count as a click

// Data
pub const DEFAULT_DATA_URL: &str = "data/collections.json";

// Lighting (ambient + one directional light)
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const LIGHT_COLOR: u32 = 0x88ccff;
pub const LIGHT_INTENSITY: f32 = 1.0;
pub const LIGHT_POSITION: [f32; 3] = [10.0, 20.0, 30.0];
pub const EMISSIVE_INTENSITY: f32 = 0.25;

#[inline]
pub fn focus_offset_vec3() -> Vec3 {
    Vec3::from_array(FOCUS_OFFSET)
}

#[inline]
pub fn label_offset_vec3() -> Vec3 {
    Vec3::from_array(LABEL_LOCAL_OFFSET)
}
