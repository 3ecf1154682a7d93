use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of the map's layer stack, bottom first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    /// OpenStreetMap base tiles.
    Base,
    Raster(RasterOverlay),
    /// The vector layer holding spot markers.
    Spots,
}

/// An uploaded GeoTIFF shown as a tile layer. The bytes are handed to the
/// renderer untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RasterOverlay {
    pub id: Uuid,
    pub file_name: String,
    pub size: usize,
    pub convert_to_rgb: bool,
    pub added_at: DateTime<Utc>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl RasterOverlay {
    pub fn new(file_name: String, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name,
            size: bytes.len(),
            convert_to_rgb: true,
            added_at: Utc::now(),
            bytes,
        }
    }
}

impl Layer {
    pub fn name(&self) -> String {
        match self {
            Self::Base => "base".into(),
            Self::Raster(overlay) => format!("raster:{}", overlay.file_name),
            Self::Spots => "spots".into(),
        }
    }
}
