pub mod app;
pub mod camera;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod focus;
pub mod label;
pub mod orbit;
pub mod pointer;
pub mod registry;
pub mod scene;

// Shaders bundled as string constants
pub static MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");
pub static LABELS_WGSL: &str = include_str!("../shaders/labels.wgsl");
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

pub use app::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use data::*;
pub use error::*;
pub use focus::*;
pub use label::*;
pub use orbit::*;
pub use pointer::*;
pub use registry::*;
pub use scene::*;
