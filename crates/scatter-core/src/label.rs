//! Label billboards and the per-frame scaler that keeps them at a constant
//! on-screen height regardless of camera distance.
//!
//! For a perspective camera the visible world height at distance `d` is
//! `2 * d * tan(fovy / 2)`. Dividing by the surface height in pixels gives
//! world units per pixel at that distance; multiplying by the desired pixel
//! height gives the world height a billboard needs, and the label's fixed
//! aspect ratio gives its width. Both are clamped so far labels never vanish
//! and near labels never fill the view.

use crate::camera::Camera;
use crate::config::LabelScaleConfig;
use crate::registry::{MarkerId, MarkerRegistry};
use glam::Vec2;

/// Pixel size of a rasterized label bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelMetrics {
    pub width_px: u32,
    pub height_px: u32,
}

impl LabelMetrics {
    /// Bitmap size for text of the given measured width: the text box is
    /// `ceil(font * 1.2)` tall and everything is padded by twice the border.
    pub fn from_text_width(text_width_px: f32, font_px: f32, border_px: f32) -> Self {
        let padding = border_px * 2.0;
        let text_h = (font_px * 1.2).ceil();
        let width = text_width_px.max(0.0).ceil() + padding * 2.0;
        let height = text_h + padding * 2.0;
        Self {
            width_px: width as u32,
            height_px: height.max(1.0) as u32,
        }
    }

    /// Headless approximation assuming an average advance of 0.6 em per glyph.
    pub fn estimate(text: &str, font_px: f32, border_px: f32) -> Self {
        let glyphs = text.chars().count() as f32;
        Self::from_text_width(glyphs * font_px * 0.6, font_px, border_px)
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.width_px as f32 / self.height_px.max(1) as f32
    }

    /// World size when the bitmap is scaled by a fixed factor per pixel.
    #[inline]
    pub fn scaled(&self, factor: f32) -> Vec2 {
        Vec2::new(self.width_px as f32 * factor, self.height_px as f32 * factor)
    }
}

/// Camera-facing text billboard owned by a marker.
#[derive(Clone, Debug)]
pub struct Label {
    owner: MarkerId,
    aspect_ratio: f32,
    scale: Vec2,
}

impl Label {
    pub fn new(owner: MarkerId, metrics: LabelMetrics, initial_scale: Vec2) -> Self {
        Self {
            owner,
            aspect_ratio: metrics.aspect_ratio(),
            scale: initial_scale,
        }
    }

    /// Lookup-only back reference to the owning marker.
    #[inline]
    pub fn owner(&self) -> MarkerId {
        self.owner
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Current (width, height) in scene units.
    #[inline]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub(crate) fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }
}

/// What the scaler did this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleOutcome {
    /// Surface has no height yet; labels keep last frame's scale.
    Skipped,
    Scaled(usize),
}

#[derive(Clone, Debug, Default)]
pub struct LabelScaler {
    pub config: LabelScaleConfig,
}

impl LabelScaler {
    pub fn new(config: LabelScaleConfig) -> Self {
        Self { config }
    }

    /// World units covered by one screen pixel at `distance`, or `None` when
    /// the surface has no height.
    pub fn world_units_per_pixel(distance: f32, fovy_radians: f32, surface_height_px: u32) -> Option<f32> {
        if surface_height_px == 0 {
            return None;
        }
        let visible_height = 2.0 * distance * (fovy_radians * 0.5).tan();
        Some(visible_height / surface_height_px as f32)
    }

    /// Clamped billboard size for a label of `aspect_ratio` at `distance`.
    pub fn world_size(
        &self,
        distance: f32,
        fovy_radians: f32,
        surface_height_px: u32,
        aspect_ratio: f32,
    ) -> Option<Vec2> {
        let per_px = Self::world_units_per_pixel(distance, fovy_radians, surface_height_px)?;
        let height = self.config.desired_px * per_px;
        let width = height * aspect_ratio;
        Some(self.config.clamp(Vec2::new(width, height)))
    }

    /// Pull every label back inside the configured bounds without a camera,
    /// for sizes that were set before the first scaled frame.
    pub fn clamp_all(&self, registry: &mut MarkerRegistry) {
        for i in 0..registry.len() {
            if let Some(marker) = registry.get_mut(MarkerId(i)) {
                let size = self.config.clamp(marker.label.scale());
                marker.label.set_scale(size);
            }
        }
    }

    /// Rescale every label from its marker's world position.
    pub fn apply(&self, camera: &Camera, surface_height_px: u32, registry: &mut MarkerRegistry) -> ScaleOutcome {
        if surface_height_px == 0 {
            log::trace!("label scaling skipped: zero-height surface");
            return ScaleOutcome::Skipped;
        }
        let mut scaled = 0;
        for i in 0..registry.len() {
            let id = MarkerId(i);
            let distance = camera.distance_to(registry.world_position(id));
            let Some(marker) = registry.get_mut(id) else {
                continue;
            };
            let aspect = marker.label.aspect_ratio();
            if let Some(size) = self.world_size(distance, camera.fovy_radians, surface_height_px, aspect) {
                marker.label.set_scale(size);
                scaled += 1;
            }
        }
        ScaleOutcome::Scaled(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_match_padded_canvas_layout() {
        // 48px font, 4px border: padding 8, text box ceil(57.6) = 58
        let m = LabelMetrics::from_text_width(100.2, 48.0, 4.0);
        assert_eq!(m.width_px, 101 + 16);
        assert_eq!(m.height_px, 58 + 16);
    }

    #[test]
    fn aspect_is_fixed_at_creation() {
        let m = LabelMetrics { width_px: 200, height_px: 50 };
        let mut label = Label::new(MarkerId(0), m, m.scaled(0.12));
        label.set_scale(Vec2::new(1.0, 1.0));
        assert_eq!(label.aspect_ratio(), 4.0);
    }
}
