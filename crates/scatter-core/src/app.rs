//! Explicit application state driven once per animation frame.

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::constants::TOOLTIP_OFFSET_PX;
use crate::data::LoadedCollections;
use crate::focus::FocusController;
use crate::label::{LabelMetrics, LabelScaler, ScaleOutcome};
use crate::orbit::OrbitController;
use crate::pointer::{HoverState, PointerRouter, PointerSample};
use crate::registry::{MarkerId, MarkerRegistry};
use glam::Vec3;
use std::time::Duration;

/// Render surface size in CSS pixels, the space pointer samples use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    pub hovered: Option<MarkerId>,
    pub selected: Option<MarkerId>,
    pub tooltip: Option<Tooltip>,
    pub labels: ScaleOutcome,
}

pub struct ViewerState {
    pub config: ViewerConfig,
    pub camera: Camera,
    pub registry: MarkerRegistry,
    pub orbit: OrbitController,
    pub focus: FocusController,
    pub pointer: PointerRouter,
    scaler: LabelScaler,
    focus_request: Option<String>,
    notice: Option<String>,
}

impl ViewerState {
    pub fn new<F>(config: ViewerConfig, loaded: LoadedCollections, measure: F) -> Self
    where
        F: FnMut(&str) -> LabelMetrics,
    {
        let camera = Camera::new(config.start_eye, Vec3::ZERO, config.fov_deg, config.znear, config.zfar);
        let mut registry = MarkerRegistry::from_collections(&loaded.collections, measure);
        let scaler = LabelScaler::new(config.labels.clone());
        // labels stay in bounds even if the first frames have no surface height
        scaler.clamp_all(&mut registry);
        log::info!("viewer ready with {} markers", registry.len());
        Self {
            orbit: OrbitController::new(config.orbit_damping),
            focus: FocusController::new(config.focus_offset, config.focus_duration),
            pointer: PointerRouter::new(),
            scaler,
            camera,
            registry,
            focus_request: None,
            notice: loaded.warning,
            config,
        }
    }

    /// The fallback warning, handed out once.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Queue a camera focus on the named marker for the next frame. Later
    /// requests replace earlier ones.
    pub fn request_focus(&mut self, name: &str) {
        self.focus_request = Some(name.to_string());
    }

    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        self.pointer.on_pointer_move(sample);
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer.on_pointer_leave();
    }

    pub fn on_click(&mut self) {
        self.pointer.on_click();
    }

    /// Orbit drag. User motion takes over from any running focus transition.
    pub fn on_rotate_drag(&mut self, dx: f32, dy: f32, surface_height_px: f32) {
        self.focus.cancel();
        self.orbit.rotate_by_pixels(dx, dy, surface_height_px);
    }

    pub fn on_pan_drag(&mut self, dx: f32, dy: f32, surface_height_px: f32) {
        self.focus.cancel();
        self.orbit.pan_by_pixels(dx, dy, &self.camera, surface_height_px);
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        self.focus.cancel();
        self.orbit.zoom_by_wheel(delta_y);
    }

    #[inline]
    pub fn hover(&self) -> HoverState {
        self.pointer.hover()
    }

    fn apply_focus_request(&mut self) {
        let Some(name) = self.focus_request.take() else {
            return;
        };
        // An unknown name can only come from a stale UI entry; ignore it.
        let Some(id) = self.registry.find(&name) else {
            log::warn!("focus requested for unknown marker {name:?}");
            return;
        };
        let world = self.registry.world_position(id);
        self.orbit.stop();
        self.focus.request(&mut self.camera, world);
        log::info!("focusing {name}");
    }

    /// Run one frame: focus, hover, orbit, then label scaling.
    pub fn frame(&mut self, dt: Duration, surface: SurfaceSize) -> FrameOutput {
        self.camera.set_aspect_from(surface.width, surface.height);

        self.apply_focus_request();
        let animating = self.focus.tick(dt, &mut self.camera);

        let pf = self.pointer.update(
            &self.camera,
            &mut self.registry,
            self.config.marker_radius,
            self.config.hover_scale,
        );

        if !animating {
            self.orbit.update(&mut self.camera);
        }

        let labels = self.scaler.apply(&self.camera, surface.height, &mut self.registry);

        let tooltip = pf.hover.marker().and_then(|id| {
            let marker = self.registry.get(id)?;
            let p = self.pointer.pointer()?;
            Some(Tooltip {
                text: marker.name.clone(),
                x: p.x + TOOLTIP_OFFSET_PX,
                y: p.y + TOOLTIP_OFFSET_PX,
            })
        });

        FrameOutput {
            hovered: pf.hover.marker(),
            selected: pf.selected,
            tooltip,
            labels,
        }
    }
}
