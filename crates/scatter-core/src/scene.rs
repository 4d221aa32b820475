//! GPU-facing instance data built from the viewer state each frame.

use crate::camera::Camera;
use crate::constants::*;
use crate::data::Rgb;
use crate::label::LabelMetrics;
use crate::registry::{max_axis_scale, MarkerRegistry};
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub light_dir: [f32; 4],   // w: emissive intensity
    pub light_color: [f32; 4], // w: ambient intensity
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LabelInstance {
    pub center: [f32; 3],
    pub size: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}

pub fn scene_uniforms(camera: &Camera) -> SceneUniforms {
    let (right, up) = camera.billboard_axes();
    let light_dir = Vec3::from_array(LIGHT_POSITION).normalize();
    let [r, g, b] = Rgb(LIGHT_COLOR).to_linear_f32();
    SceneUniforms {
        view_proj: camera.view_proj().to_cols_array_2d(),
        camera_right: right.extend(0.0).to_array(),
        camera_up: up.extend(0.0).to_array(),
        light_dir: light_dir.extend(EMISSIVE_INTENSITY).to_array(),
        light_color: [r * LIGHT_INTENSITY, g * LIGHT_INTENSITY, b * LIGHT_INTENSITY, AMBIENT_INTENSITY],
    }
}

/// One lit sphere per marker, in registry order.
pub fn sphere_instances(registry: &MarkerRegistry, base_radius: f32) -> Vec<SphereInstance> {
    let parent_scale = max_axis_scale(&registry.parent_transform());
    registry
        .iter()
        .map(|m| {
            let [r, g, b] = m.color.to_linear_f32();
            SphereInstance {
                center: registry.world_position(m.id).to_array(),
                radius: base_radius * m.scale() * parent_scale,
                color: [r, g, b, 1.0],
            }
        })
        .collect()
}

/// One billboard per marker label, in registry order. Labels hang off their
/// marker, so both the offset and the size follow the marker's transform.
pub fn label_instances(registry: &MarkerRegistry) -> Vec<LabelInstance> {
    let offset = label_offset_vec3();
    registry
        .iter()
        .map(|m| {
            let world = registry.world_transform(m.id);
            let inherited = max_axis_scale(&world);
            let size = m.label().scale() * inherited;
            LabelInstance {
                center: world.transform_point3(offset).to_array(),
                size: size.to_array(),
            }
        })
        .collect()
}

/// Axis lines through the origin, red X, green Y, blue Z.
pub fn axis_lines(len: f32) -> Vec<LineVertex> {
    let axes = [
        (Vec3::X, [1.0, 0.0, 0.0]),
        (Vec3::Y, [0.0, 1.0, 0.0]),
        (Vec3::Z, [0.0, 0.0, 1.0]),
    ];
    axes.iter()
        .flat_map(|(axis, color)| {
            [
                LineVertex { pos: (-*axis * len).to_array(), color: *color },
                LineVertex { pos: (*axis * len).to_array(), color: *color },
            ]
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisLabel {
    pub text: &'static str,
    pub position: Vec3,
}

impl AxisLabel {
    /// Axis labels keep the fixed size they were created with.
    pub fn instance(&self, metrics: LabelMetrics) -> LabelInstance {
        LabelInstance {
            center: self.position.to_array(),
            size: metrics.scaled(AXIS_LABEL_SCALE_FACTOR).to_array(),
        }
    }
}

pub fn axis_labels(len: f32) -> [AxisLabel; 6] {
    let d = len + AXIS_LABEL_MARGIN;
    [
        AxisLabel { text: "+X", position: Vec3::new(d, 0.0, 0.0) },
        AxisLabel { text: "-X", position: Vec3::new(-d, 0.0, 0.0) },
        AxisLabel { text: "+Y", position: Vec3::new(0.0, d, 0.0) },
        AxisLabel { text: "-Y", position: Vec3::new(0.0, -d, 0.0) },
        AxisLabel { text: "+Z", position: Vec3::new(0.0, 0.0, d) },
        AxisLabel { text: "-Z", position: Vec3::new(0.0, 0.0, -d) },
    ]
}
