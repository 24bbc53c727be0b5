//! Sentinel-2 mosaic specs.
//!
//! Sentinel-2 mosaics always draw from the single `COPERNICUS/S2` archive,
//! so every spec produces exactly one data set. The working resolution is
//! whatever the finest requested band natively offers — 10 or 20 meters.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use tesela_core::dates;
use tesela_core::{
    BandTable, Error, Filter, FilteredCollection, Image, ImageCollectionRef, Result, INDEX_FIELD,
};

use crate::analyze::ImageAnalysis;
use crate::data_set::DataSet;
use crate::spec::{MosaicDef, MosaicRequest};

/// The single Sentinel-2 collection identifier.
pub const S2_COLLECTION: &str = "COPERNICUS/S2";

static S2_BANDS: BandTable = BandTable::new(&[
    ("aerosol", "B1"),
    ("blue", "B2"),
    ("green", "B3"),
    ("red", "B4"),
    ("nir", "B8A"),
    ("swir1", "B11"),
    ("swir2", "B12"),
    ("cirrus", "B10"),
    ("waterVapor", "B9"),
]);

/// Native resolution per band role, in meters.
static SCALE_BY_BAND: &[(&str, u32)] = &[
    ("blue", 10),
    ("green", 10),
    ("red", 10),
    ("nir", 10),
    ("swir1", 20),
    ("swir2", 20),
    ("dayOfYear", 10),
    ("daysFromTarget", 10),
    ("unixTimeDays", 10),
];

/// Finest native resolution among the requested bands.
///
/// Bands without a native resolution (derived bands the analysis adds) are
/// ignored; if nothing remains the minimum is undefined and the request is
/// rejected.
fn scale_for_bands(bands: &[String]) -> Result<u32> {
    SCALE_BY_BAND
        .iter()
        .filter(|(band, _)| bands.iter().any(|b| b == band))
        .map(|(_, resolution)| *resolution)
        .min()
        .ok_or_else(|| Error::UnknownResolution {
            bands: bands.to_vec(),
        })
}

/// Acquisition timestamp of a scene, from the `YYYYMMDD` block its id
/// starts with.
fn acquisition_millis(scene_id: &str) -> Result<i64> {
    let encoded = scene_id.get(..8).ok_or_else(|| Error::InvalidSceneId {
        scene_id: scene_id.to_string(),
        reason: "no acquisition date in first 8 characters".to_string(),
    })?;
    dates::parse_year_month_day(encoded).map_err(|err| Error::InvalidSceneId {
        scene_id: scene_id.to_string(),
        reason: err.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Specs
// ---------------------------------------------------------------------------

/// Automatic Sentinel-2 spec: every scene intersecting the AOI within the
/// date window.
#[derive(Debug, Clone)]
pub struct Sentinel2AutomaticSpec {
    def: Arc<MosaicDef>,
    data_set: Sentinel2DataSet,
}

impl Sentinel2AutomaticSpec {
    pub(crate) fn new(request: &MosaicRequest) -> Result<Self> {
        let (from_date, to_date) = request.date_window_ms()?;
        let scale = scale_for_bands(&request.bands)?;
        let def = Arc::new(MosaicDef {
            aoi: request.aoi.clone(),
            from_date,
            to_date,
            bands: request.bands.clone(),
            scale,
        });
        debug!(scale, "built sentinel-2 automatic spec");

        let filter = Filter::and([
            Filter::intersects(&def.aoi),
            Filter::date_range(from_date, to_date),
        ]);
        let data_set = Sentinel2DataSet::new(filter, Arc::clone(&def));

        Ok(Self { def, data_set })
    }

    pub fn def(&self) -> &MosaicDef {
        &self.def
    }

    pub fn data_sets(&self) -> &[Sentinel2DataSet] {
        std::slice::from_ref(&self.data_set)
    }
}

impl fmt::Display for Sentinel2AutomaticSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sentinel2AutomaticSpec(bands={:?}, scale={})",
            self.def.bands, self.def.scale
        )
    }
}

/// Manual Sentinel-2 spec: exactly the named scenes.
///
/// The date window is derived from the scenes themselves, spanning the
/// earliest to the latest acquisition. No grouping is needed — all scenes
/// live in the one collection.
#[derive(Debug, Clone)]
pub struct Sentinel2ManualSpec {
    def: Arc<MosaicDef>,
    scene_ids: Vec<String>,
    data_set: Sentinel2DataSet,
}

impl Sentinel2ManualSpec {
    pub(crate) fn new(request: &MosaicRequest) -> Result<Self> {
        let mut scene_ids = request.scene_ids.clone();
        scene_ids.sort();

        let mut acquisitions = Vec::with_capacity(scene_ids.len());
        for scene_id in &scene_ids {
            acquisitions.push(acquisition_millis(scene_id)?);
        }
        let from_date = acquisitions.iter().copied().min().ok_or(Error::EmptyScenes)?;
        let to_date = acquisitions.iter().copied().max().ok_or(Error::EmptyScenes)?;

        let scale = scale_for_bands(&request.bands)?;
        let def = Arc::new(MosaicDef {
            aoi: request.aoi.clone(),
            from_date,
            to_date,
            bands: request.bands.clone(),
            scale,
        });
        debug!(scenes = scene_ids.len(), scale, "built sentinel-2 manual spec");

        let filter = Filter::in_list(INDEX_FIELD, scene_ids.iter().cloned());
        let data_set = Sentinel2DataSet::new(filter, Arc::clone(&def));

        Ok(Self {
            def,
            scene_ids,
            data_set,
        })
    }

    pub fn def(&self) -> &MosaicDef {
        &self.def
    }

    /// The requested scene ids, in sorted order.
    pub fn scene_ids(&self) -> &[String] {
        &self.scene_ids
    }

    pub fn data_sets(&self) -> &[Sentinel2DataSet] {
        std::slice::from_ref(&self.data_set)
    }
}

impl fmt::Display for Sentinel2ManualSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sentinel2ManualSpec(scenes={}, scale={})",
            self.scene_ids.len(),
            self.def.scale
        )
    }
}

// ---------------------------------------------------------------------------
// Data set
// ---------------------------------------------------------------------------

/// The one filtered Sentinel-2 collection of a mosaic.
#[derive(Debug, Clone)]
pub struct Sentinel2DataSet {
    filter: Filter,
    def: Arc<MosaicDef>,
}

impl Sentinel2DataSet {
    fn new(filter: Filter, def: Arc<MosaicDef>) -> Self {
        Self { filter, def }
    }
}

impl DataSet for Sentinel2DataSet {
    fn to_collection(&self) -> FilteredCollection {
        ImageCollectionRef::new(S2_COLLECTION).filter(self.filter.clone())
    }

    fn analyze(&self, image: &Image, analysis: &dyn ImageAnalysis) -> Image {
        analysis.apply(image, &S2_BANDS, &self.def)
    }

    fn masks_cloud_on_analysis(&self) -> bool {
        false
    }

    fn bands(&self) -> &'static BandTable {
        &S2_BANDS
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
