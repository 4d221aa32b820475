//! Collection records loaded from the static data file, with a built-in fallback set.

use crate::error::DataError;
use glam::Vec3;
use serde::{Deserialize, Deserializer};

/// 24-bit RGB color as stored in the data file (`0xRRGGBB`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Components in [0, 1], sRGB-encoded as authored.
    pub fn to_srgb_f32(self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b]
    }

    /// Components converted to linear space for lighting.
    pub fn to_linear_f32(self) -> [f32; 3] {
        self.to_srgb_f32().map(srgb_to_linear)
    }

    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .or_else(|| s.trim().strip_prefix("0x"))
            .or_else(|| s.trim().strip_prefix("0X"))?;
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Rgb)
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u32),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Int(v) if v <= 0xff_ffff => Ok(Rgb(v)),
            Raw::Int(v) => Err(serde::de::Error::custom(format!(
                "color {v:#x} exceeds 24-bit RGB"
            ))),
            Raw::Text(s) => Rgb::parse_hex(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid color string {s:?}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CollectionRecord {
    pub name: String,
    pub position: [f32; 3],
    pub color: Rgb,
}

impl CollectionRecord {
    pub fn new(name: &str, position: [f32; 3], color: u32) -> Self {
        Self {
            name: name.to_string(),
            position,
            color: Rgb(color),
        }
    }

    #[inline]
    pub fn position_vec3(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

#[derive(Debug, Deserialize)]
struct CollectionFile {
    collections: Vec<CollectionRecord>,
}

pub const FALLBACK_NOTICE: &str =
    "Warning: could not load the collections data, showing fallback data instead.";

/// Outcome of the start-up load: the entries to build markers from and an
/// optional user-facing warning when the fallback set was substituted.
#[derive(Clone, Debug)]
pub struct LoadedCollections {
    pub collections: Vec<CollectionRecord>,
    pub warning: Option<String>,
}

impl LoadedCollections {
    #[inline]
    pub fn used_fallback(&self) -> bool {
        self.warning.is_some()
    }
}

pub fn parse_collections(text: &str) -> Result<Vec<CollectionRecord>, DataError> {
    let file: CollectionFile = serde_json::from_str(text)?;
    if file.collections.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(file.collections)
}

pub fn fallback_collections() -> Vec<CollectionRecord> {
    vec![
        CollectionRecord::new("Teste A", [-15.0, 8.0, 0.0], 0xff8844),
        CollectionRecord::new("Teste B", [0.0, 0.0, 0.0], 0x44ff88),
        CollectionRecord::new("Teste C", [15.0, -6.0, 5.0], 0x4488ff),
    ]
}

/// Turn the raw fetch result into the collections to display. Any failure,
/// whether fetching or parsing, falls back to the built-in set.
pub fn resolve_collections(fetched: Result<String, DataError>) -> LoadedCollections {
    match fetched.and_then(|text| parse_collections(&text)) {
        Ok(collections) => {
            log::info!("loaded {} collections", collections.len());
            LoadedCollections {
                collections,
                warning: None,
            }
        }
        Err(e) => {
            log::error!("failed to load collections: {e}");
            log::warn!("using {} fallback collections", fallback_collections().len());
            LoadedCollections {
                collections: fallback_collections(),
                warning: Some(FALLBACK_NOTICE.to_string()),
            }
        }
    }
}
