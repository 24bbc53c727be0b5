//! Area-of-interest geometry.
//!
//! The query model never inspects coordinates: an AOI carries its GeoJSON
//! geometry as raw JSON and hands it to the provider unchanged. A [`BBox`]
//! convenience type covers the common rectangular case.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A geographic bounding box in `[west, south, east, north]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Check if two bboxes intersect.
    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// GeoJSON Polygon ring for this box (closed, counter-clockwise).
    pub fn to_geojson(&self) -> serde_json::Value {
        json!({
            "type": "Polygon",
            "coordinates": [[
                [self.min_x, self.min_y],
                [self.max_x, self.min_y],
                [self.max_x, self.max_y],
                [self.min_x, self.max_y],
                [self.min_x, self.min_y],
            ]]
        })
    }
}

/// An area of interest.
///
/// Geometry is GeoJSON carried as raw JSON — the provider interprets it, we
/// only embed it in filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aoi {
    /// GeoJSON geometry (Polygon, MultiPolygon, ...).
    pub geometry: serde_json::Value,

    /// Optional human-readable label (country name, site code, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Aoi {
    /// Create an AOI from a GeoJSON geometry value.
    pub fn new(geometry: serde_json::Value) -> Self {
        Self { geometry, label: None }
    }

    /// Create a rectangular AOI from a bounding box.
    pub fn from_bbox(bbox: BBox) -> Self {
        Self::new(bbox.to_geojson())
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The GeoJSON geometry of this AOI.
    pub fn geometry(&self) -> &serde_json::Value {
        &self.geometry
    }
}
