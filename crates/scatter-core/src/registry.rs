//! Marker registry: one marker (sphere + label billboard) per loaded collection.

use crate::config::LabelScaleConfig;
use crate::constants::{BASE_SCALE, LABEL_SCALE_FACTOR};
use crate::data::{CollectionRecord, Rgb};
use crate::label::{Label, LabelMetrics};
use fnv::FnvHashMap;
use glam::{Affine3A, Vec3};

/// Largest axis scale of a transform. Spheres and billboards stay round and
/// upright, so a non-uniform scale is covered by its largest factor.
#[inline]
pub fn max_axis_scale(transform: &Affine3A) -> f32 {
    let m = transform.matrix3;
    m.x_axis.length().max(m.y_axis.length()).max(m.z_axis.length())
}

/// Stable handle to a marker; markers are never removed during a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub usize);

#[derive(Clone, Debug)]
pub struct Marker {
    pub id: MarkerId,
    pub name: String,
    pub color: Rgb,
    position: Vec3,
    scale: f32,
    pub(crate) label: Label,
}

impl Marker {
    /// Position relative to the registry's parent transform.
    #[inline]
    pub fn local_position(&self) -> Vec3 {
        self.position
    }

    /// Uniform visual scale (1.0 idle, emphasised while hovered).
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }
}

#[derive(Clone, Debug)]
pub struct MarkerRegistry {
    markers: Vec<Marker>,
    by_name: FnvHashMap<String, MarkerId>,
    parent: Affine3A,
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            by_name: FnvHashMap::default(),
            parent: Affine3A::IDENTITY,
        }
    }
}

impl MarkerRegistry {
    /// Build markers from collection records. `measure` supplies the bitmap
    /// size of each label text. Records repeating an existing name are skipped.
    pub fn from_collections<F>(records: &[CollectionRecord], mut measure: F) -> Self
    where
        F: FnMut(&str) -> LabelMetrics,
    {
        let bounds = LabelScaleConfig::default();
        let mut registry = Self::default();
        for record in records {
            if registry.by_name.contains_key(&record.name) {
                log::warn!("duplicate collection name {:?} skipped", record.name);
                continue;
            }
            let id = MarkerId(registry.markers.len());
            let metrics = measure(&record.name);
            registry.markers.push(Marker {
                id,
                name: record.name.clone(),
                color: record.color,
                position: record.position_vec3(),
                scale: BASE_SCALE,
                label: Label::new(id, metrics, bounds.clamp(metrics.scaled(LABEL_SCALE_FACTOR))),
            });
            registry.by_name.insert(record.name.clone(), id);
        }
        registry
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[inline]
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.0)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.get_mut(id.0)
    }

    pub fn find(&self, name: &str) -> Option<MarkerId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Transform applied to every marker (the group they hang under).
    #[inline]
    pub fn parent_transform(&self) -> Affine3A {
        self.parent
    }

    pub fn set_parent_transform(&mut self, parent: Affine3A) {
        self.parent = parent;
    }

    /// Marker centre after the full parent chain.
    pub fn world_position(&self, id: MarkerId) -> Vec3 {
        self.get(id)
            .map(|m| self.parent.transform_point3(m.position))
            .unwrap_or(Vec3::ZERO)
    }

    /// Full local-to-world transform of a marker, including its own scale.
    pub fn world_transform(&self, id: MarkerId) -> Affine3A {
        self.get(id)
            .map(|m| {
                self.parent
                    * Affine3A::from_translation(m.position)
                    * Affine3A::from_scale(Vec3::splat(m.scale))
            })
            .unwrap_or(self.parent)
    }

    pub(crate) fn set_marker_scale(&mut self, id: MarkerId, scale: f32) {
        if let Some(m) = self.get_mut(id) {
            m.scale = scale;
        }
    }
}
