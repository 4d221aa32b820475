use crate::camera::{Camera, Ray};
use crate::constants::BASE_SCALE;
use crate::registry::{max_axis_scale, MarkerId, MarkerRegistry};
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t_near = -b - sq;
    if t_near >= 0.0 {
        return Some(t_near);
    }
    // origin inside the sphere: the exit point is the first hit
    let t_far = -b + sq;
    (t_far >= 0.0).then_some(t_far)
}

/// Nearest marker hit by `ray`, by distance along the ray.
pub fn pick_nearest(ray: &Ray, registry: &MarkerRegistry, base_radius: f32) -> Option<(MarkerId, f32)> {
    let parent_scale = max_axis_scale(&registry.parent_transform());
    let mut best = None::<(MarkerId, f32)>;
    for m in registry.iter() {
        let center = registry.world_position(m.id);
        let radius = base_radius * m.scale() * parent_scale;
        if let Some(t) = ray_sphere(ray.origin, ray.dir, center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((m.id, t)),
            }
        }
    }
    best
}

/// Latest pointer position in CSS pixels relative to the render surface.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PointerSample {
    /// Normalized device coordinates, or `None` for an unsized surface.
    pub fn ndc(&self) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (self.x / self.width) * 2.0 - 1.0,
            -(self.y / self.height) * 2.0 + 1.0,
        ))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Unhovered,
    HoveringMarker(MarkerId),
}

impl HoverState {
    #[inline]
    pub fn marker(&self) -> Option<MarkerId> {
        match self {
            HoverState::Unhovered => None,
            HoverState::HoveringMarker(id) => Some(*id),
        }
    }
}

/// Result of one frame of pointer routing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerFrame {
    pub hover: HoverState,
    pub hover_changed: bool,
    pub selected: Option<MarkerId>,
}

/// Resolves the hovered marker each frame and turns clicks into selections.
#[derive(Clone, Debug, Default)]
pub struct PointerRouter {
    pointer: Option<PointerSample>,
    hover: HoverState,
    pending_clicks: SmallVec<[Option<MarkerId>; 4]>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        self.pointer = Some(sample);
    }

    /// Pointer left the surface: nothing is under it any more.
    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    /// Queue a click against whatever is hovered right now; it is reported on
    /// the next update.
    pub fn on_click(&mut self) {
        self.pending_clicks.push(self.hover.marker());
    }

    #[inline]
    pub fn pointer(&self) -> Option<PointerSample> {
        self.pointer
    }

    #[inline]
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// Ray-cast the latest pointer position, move emphasis from the previously
    /// hovered marker to the new one and resolve queued clicks.
    pub fn update(
        &mut self,
        camera: &Camera,
        registry: &mut MarkerRegistry,
        base_radius: f32,
        hover_scale: f32,
    ) -> PointerFrame {
        let hit = self
            .pointer
            .and_then(|p| p.ndc())
            .map(|ndc| camera.ray_from_ndc(ndc))
            .and_then(|ray| pick_nearest(&ray, registry, base_radius));
        let next = match hit {
            Some((id, _)) => HoverState::HoveringMarker(id),
            None => HoverState::Unhovered,
        };

        let changed = next != self.hover;
        if changed {
            if let Some(prev) = self.hover.marker() {
                registry.set_marker_scale(prev, BASE_SCALE);
            }
            if let Some(id) = next.marker() {
                registry.set_marker_scale(id, hover_scale);
            }
            log::trace!("hover {:?} -> {:?}", self.hover, next);
            self.hover = next;
        }

        let clicks = std::mem::take(&mut self.pending_clicks);
        let selected = clicks.iter().rev().find_map(|c| *c);
        if let Some(id) = selected {
            if let Some(m) = registry.get(id) {
                log::info!("marker selected: {}", m.name);
            }
        }

        PointerFrame {
            hover: self.hover,
            hover_changed: changed,
            selected,
        }
    }
}
