//! Landsat mosaic specs.
//!
//! Landsat mosaics draw from four provider collections, one per instrument
//! generation. Automatic specs pick collections from the requested sensor
//! names and filter scenes by AOI and date window; manual specs group the
//! given scene ids by collection and filter on exact membership. Everything
//! here is table-driven: the sensor and band mappings are fixed at compile
//! time.

use std::collections::{BTreeMap, BTreeSet};
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

/// Metadata field holding the Landsat scene id.
pub const SCENE_ID_FIELD: &str = "LANDSAT_SCENE_ID";

/// Landsat mosaics always work at the instrument's 30 m resolution.
const LANDSAT_SCALE: u32 = 30;

/// Scene-id prefix of OLI-only acquisitions, which lack the thermal bands
/// cloud masking needs and are excluded from automatic mosaics.
const OLI_ONLY_PREFIX: &str = "LO8";

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

static LC08_BANDS: BandTable = BandTable::new(&[
    ("blue", "B2"),
    ("green", "B3"),
    ("red", "B4"),
    ("nir", "B5"),
    ("swir1", "B6"),
    ("swir2", "B7"),
    ("cirrus", "B9"),
    ("thermal", "B10"),
    ("BQA", "BQA"),
]);

static LE07_BANDS: BandTable = BandTable::new(&[
    ("blue", "B1"),
    ("green", "B2"),
    ("red", "B3"),
    ("nir", "B4"),
    ("swir1", "B5"),
    ("swir2", "B7"),
    ("thermal", "B6_VCID_1"),
    ("BQA", "BQA"),
]);

static LT5_BANDS: BandTable = BandTable::new(&[
    ("blue", "B1"),
    ("green", "B2"),
    ("red", "B3"),
    ("nir", "B4"),
    ("swir1", "B5"),
    ("swir2", "B7"),
    ("thermal", "B6"),
    ("fmask", "fmask"),
]);

static LT4_BANDS: BandTable = BandTable::new(&[
    ("blue", "B1"),
    ("green", "B2"),
    ("red", "B3"),
    ("nir", "B4"),
    ("swir1", "B5"),
    ("swir2", "B7"),
    ("thermal", "B6"),
    ("fmask", "fmask"),
]);

/// The Landsat collections a mosaic can draw from.
///
/// Variant order matches scene-id prefix order, so grouped data sets come
/// out in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LandsatCollection {
    /// Landsat 8 OLI/TIRS, top-of-atmosphere reflectance.
    Lc08,
    /// Landsat 7 ETM+, top-of-atmosphere reflectance.
    Le07,
    /// Landsat 4 TM, top-of-atmosphere reflectance with FMask.
    Lt4,
    /// Landsat 5 TM, top-of-atmosphere reflectance with FMask.
    Lt5,
}

impl LandsatCollection {
    /// Collection identifier as known to the imagery provider.
    pub fn name(self) -> &'static str {
        match self {
            Self::Lc08 => "LANDSAT/LC08/C01/T1_TOA",
            Self::Le07 => "LANDSAT/LE07/C01/T1_TOA",
            Self::Lt4 => "LANDSAT/LT4_L1T_TOA_FMASK",
            Self::Lt5 => "LANDSAT/LT5_L1T_TOA_FMASK",
        }
    }

    /// Role-to-band-name table of this collection.
    pub fn bands(self) -> &'static BandTable {
        match self {
            Self::Lc08 => &LC08_BANDS,
            Self::Le07 => &LE07_BANDS,
            Self::Lt4 => &LT4_BANDS,
            Self::Lt5 => &LT5_BANDS,
        }
    }

    /// Looks a collection up by its provider identifier.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "LANDSAT/LC08/C01/T1_TOA" => Ok(Self::Lc08),
            "LANDSAT/LE07/C01/T1_TOA" => Ok(Self::Le07),
            "LANDSAT/LT4_L1T_TOA_FMASK" => Ok(Self::Lt4),
            "LANDSAT/LT5_L1T_TOA_FMASK" => Ok(Self::Lt5),
            other => Err(Error::UnknownCollection(other.to_string())),
        }
    }

    /// Collection a scene belongs to, decided by the three-letter id prefix.
    pub fn from_scene_id(scene_id: &str) -> Result<Self> {
        let prefix = scene_id.get(..3).unwrap_or(scene_id);
        match prefix {
            "LC8" => Ok(Self::Lc08),
            "LE7" => Ok(Self::Le07),
            "LT5" => Ok(Self::Lt5),
            "LT4" => Ok(Self::Lt4),
            other => Err(Error::UnknownScenePrefix {
                prefix: other.to_string(),
                scene_id: scene_id.to_string(),
            }),
        }
    }
}

/// Collections contributed by each supported sensor name.
static COLLECTIONS_BY_SENSOR: &[(&str, &[LandsatCollection])] = &[
    ("LANDSAT_8", &[LandsatCollection::Lc08]),
    ("LANDSAT_7", &[LandsatCollection::Le07]),
    ("LANDSAT_TM", &[LandsatCollection::Lt4, LandsatCollection::Lt5]),
];

/// Resolves sensor names to the deduplicated set of collections they cover.
fn collections_for_sensors(sensors: &[String]) -> Result<BTreeSet<LandsatCollection>> {
    let mut collections = BTreeSet::new();
    for sensor in sensors {
        let (_, contributed) = COLLECTIONS_BY_SENSOR
            .iter()
            .find(|(name, _)| *name == sensor.as_str())
            .ok_or_else(|| Error::UnknownSensor(sensor.clone()))?;
        collections.extend(contributed.iter().copied());
    }
    Ok(collections)
}

/// Acquisition timestamp of a scene, from the year and day-of-year encoded
/// at offset 9..16 of its id.
fn acquisition_millis(scene_id: &str) -> Result<i64> {
    let encoded = scene_id.get(9..16).ok_or_else(|| Error::InvalidSceneId {
        scene_id: scene_id.to_string(),
        reason: "no acquisition date at offset 9..16".to_string(),
    })?;
    dates::parse_year_doy(encoded).map_err(|err| Error::InvalidSceneId {
        scene_id: scene_id.to_string(),
        reason: err.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Specs
// ---------------------------------------------------------------------------

/// Automatic Landsat spec: every scene of the requested sensors that
/// intersects the AOI and falls in the date window.
#[derive(Debug, Clone)]
pub struct LandsatAutomaticSpec {
    def: Arc<MosaicDef>,
    sensors: Vec<String>,
    data_sets: Vec<LandsatDataSet>,
}

impl LandsatAutomaticSpec {
    pub(crate) fn new(request: &MosaicRequest) -> Result<Self> {
        let (from_date, to_date) = request.date_window_ms()?;
        let def = Arc::new(MosaicDef {
            aoi: request.aoi.clone(),
            from_date,
            to_date,
            bands: request.bands.clone(),
            scale: LANDSAT_SCALE,
        });

        let collections = collections_for_sensors(&request.sensors)?;
        debug!(
            sensors = ?request.sensors,
            collections = collections.len(),
            "resolved landsat sensors"
        );

        let filter = Filter::and([
            Filter::intersects(&def.aoi),
            Filter::date_range(from_date, to_date),
            Filter::starts_with(INDEX_FIELD, OLI_ONLY_PREFIX).negate(),
        ]);
        let data_sets = collections
            .into_iter()
            .map(|collection| LandsatDataSet::new(collection, filter.clone(), Arc::clone(&def)))
            .collect();

        Ok(Self {
            def,
            sensors: request.sensors.clone(),
            data_sets,
        })
    }

    pub fn def(&self) -> &MosaicDef {
        &self.def
    }

    pub fn data_sets(&self) -> &[LandsatDataSet] {
        &self.data_sets
    }
}

impl fmt::Display for LandsatAutomaticSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LandsatAutomaticSpec(sensors={:?}, data_sets={})",
            self.sensors,
            self.data_sets.len()
        )
    }
}

/// Manual Landsat spec: exactly the named scenes, grouped per collection.
///
/// The date window is derived from the scenes themselves, spanning the
/// earliest to the latest acquisition.
#[derive(Debug, Clone)]
pub struct LandsatManualSpec {
    def: Arc<MosaicDef>,
    scene_ids: Vec<String>,
    data_sets: Vec<LandsatDataSet>,
}

impl LandsatManualSpec {
    pub(crate) fn new(request: &MosaicRequest) -> Result<Self> {
        let mut scene_ids = request.scene_ids.clone();
        scene_ids.sort();

        let mut acquisitions = Vec::with_capacity(scene_ids.len());
        for scene_id in &scene_ids {
            acquisitions.push(acquisition_millis(scene_id)?);
        }
        let from_date = acquisitions.iter().copied().min().ok_or(Error::EmptyScenes)?;
        let to_date = acquisitions.iter().copied().max().ok_or(Error::EmptyScenes)?;

        let def = Arc::new(MosaicDef {
            aoi: request.aoi.clone(),
            from_date,
            to_date,
            bands: request.bands.clone(),
            scale: LANDSAT_SCALE,
        });

        let mut ids_by_collection: BTreeMap<LandsatCollection, Vec<String>> = BTreeMap::new();
        for scene_id in &scene_ids {
            let collection = LandsatCollection::from_scene_id(scene_id)?;
            ids_by_collection
                .entry(collection)
                .or_default()
                .push(scene_id.clone());
        }
        debug!(
            scenes = scene_ids.len(),
            collections = ids_by_collection.len(),
            "grouped landsat scenes"
        );

        let data_sets = ids_by_collection
            .into_iter()
            .map(|(collection, ids)| {
                LandsatDataSet::new(
                    collection,
                    Filter::in_list(SCENE_ID_FIELD, ids),
                    Arc::clone(&def),
                )
            })
            .collect();

        Ok(Self {
            def,
            scene_ids,
            data_sets,
        })
    }

    pub fn def(&self) -> &MosaicDef {
        &self.def
    }

    /// The requested scene ids, in sorted order.
    pub fn scene_ids(&self) -> &[String] {
        &self.scene_ids
    }

    pub fn data_sets(&self) -> &[LandsatDataSet] {
        &self.data_sets
    }
}

impl fmt::Display for LandsatManualSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LandsatManualSpec(scenes={}, data_sets={})",
            self.scene_ids.len(),
            self.data_sets.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Data set
// ---------------------------------------------------------------------------

/// One filtered Landsat collection participating in a mosaic.
#[derive(Debug, Clone)]
pub struct LandsatDataSet {
    collection: LandsatCollection,
    filter: Filter,
    def: Arc<MosaicDef>,
}

impl LandsatDataSet {
    fn new(collection: LandsatCollection, filter: Filter, def: Arc<MosaicDef>) -> Self {
        Self {
            collection,
            filter,
            def,
        }
    }

    pub fn collection(&self) -> LandsatCollection {
        self.collection
    }
}

impl DataSet for LandsatDataSet {
    fn to_collection(&self) -> FilteredCollection {
        ImageCollectionRef::new(self.collection.name()).filter(self.filter.clone())
    }

    fn analyze(&self, image: &Image, analysis: &dyn ImageAnalysis) -> Image {
        analysis.apply(image, self.collection.bands(), &self.def)
    }

    fn masks_cloud_on_analysis(&self) -> bool {
        true
    }

    fn bands(&self) -> &'static BandTable {
        self.collection.bands()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tesela_core::{Aoi, BBox};

    const LC8_SCENE_JUL_01: &str = "LC81910312015182LGN00";
    const LC8_SCENE_JUL_09: &str = "LC81920282015190LGN00";
    const LE7_SCENE_JUN_27: &str = "LE71920282015178NSG00";

    const JUN_27_2015_MS: i64 = 1_435_363_200_000;
    const JUL_01_2015_MS: i64 = 1_435_708_800_000;
    const JUL_09_2015_MS: i64 = 1_436_400_000_000;

    fn test_aoi() -> Aoi {
        Aoi::from_bbox(BBox::new(11.0, 46.0, 12.0, 47.0))
    }

    fn automatic_request(sensors: &[&str]) -> MosaicRequest {
        MosaicRequest::landsat(test_aoi())
            .date_range("2015-01-01", "2016-01-01")
            .bands(["red", "nir", "swir1"])
            .sensors(sensors.iter().copied())
    }

    struct ProbeAnalysis;

    impl ImageAnalysis for ProbeAnalysis {
        fn apply(&self, image: &Image, bands: &BandTable, def: &MosaicDef) -> Image {
            Image::new(format!("{}|bands={}|scale={}", image.id, bands.len(), def.scale))
        }
    }

    #[test]
    fn band_tables_match_provider_layout() {
        let lc08: Vec<_> = LC08_BANDS.iter().collect();
        assert_eq!(
            lc08,
            [
                ("blue", "B2"),
                ("green", "B3"),
                ("red", "B4"),
                ("nir", "B5"),
                ("swir1", "B6"),
                ("swir2", "B7"),
                ("cirrus", "B9"),
                ("thermal", "B10"),
                ("BQA", "BQA"),
            ]
        );

        let le07: Vec<_> = LE07_BANDS.iter().collect();
        assert_eq!(
            le07,
            [
                ("blue", "B1"),
                ("green", "B2"),
                ("red", "B3"),
                ("nir", "B4"),
                ("swir1", "B5"),
                ("swir2", "B7"),
                ("thermal", "B6_VCID_1"),
                ("BQA", "BQA"),
            ]
        );

        let tm = [
            ("blue", "B1"),
            ("green", "B2"),
            ("red", "B3"),
            ("nir", "B4"),
            ("swir1", "B5"),
            ("swir2", "B7"),
            ("thermal", "B6"),
            ("fmask", "fmask"),
        ];
        assert_eq!(LT5_BANDS.iter().collect::<Vec<_>>(), tm);
        assert_eq!(LT4_BANDS.iter().collect::<Vec<_>>(), tm);
    }

    #[test]
    fn collection_names_round_trip() {
        for collection in [
            LandsatCollection::Lc08,
            LandsatCollection::Le07,
            LandsatCollection::Lt4,
            LandsatCollection::Lt5,
        ] {
            assert_eq!(
                LandsatCollection::from_name(collection.name()).unwrap(),
                collection
            );
        }

        match LandsatCollection::from_name("LANDSAT/LC09/C02/T1_TOA") {
            Err(Error::UnknownCollection(name)) => {
                assert_eq!(name, "LANDSAT/LC09/C02/T1_TOA")
            }
            other => panic!("expected UnknownCollection, got {:?}", other),
        }
    }

    #[test]
    fn scene_prefix_selects_collection() {
        assert_eq!(
            LandsatCollection::from_scene_id(LC8_SCENE_JUL_01).unwrap(),
            LandsatCollection::Lc08
        );
        assert_eq!(
            LandsatCollection::from_scene_id(LE7_SCENE_JUN_27).unwrap(),
            LandsatCollection::Le07
        );
        assert_eq!(
            LandsatCollection::from_scene_id("LT51920282011178MLK00").unwrap(),
            LandsatCollection::Lt5
        );
        assert_eq!(
            LandsatCollection::from_scene_id("LT41920281989178XXX00").unwrap(),
            LandsatCollection::Lt4
        );

        match LandsatCollection::from_scene_id("LO81910312015182LGN00") {
            Err(Error::UnknownScenePrefix { prefix, scene_id }) => {
                assert_eq!(prefix, "LO8");
                assert_eq!(scene_id, "LO81910312015182LGN00");
            }
            other => panic!("expected UnknownScenePrefix, got {:?}", other),
        }
    }

    #[test]
    fn sensors_map_to_deduplicated_collections() {
        let sensors = vec![
            "LANDSAT_8".to_string(),
            "LANDSAT_TM".to_string(),
            "LANDSAT_8".to_string(),
        ];

        let collections = collections_for_sensors(&sensors).unwrap();
        assert_eq!(
            collections.into_iter().collect::<Vec<_>>(),
            [
                LandsatCollection::Lc08,
                LandsatCollection::Lt4,
                LandsatCollection::Lt5,
            ]
        );
    }

    #[test]
    fn unknown_sensor_is_rejected() {
        let sensors = vec!["LANDSAT_9".to_string()];

        match collections_for_sensors(&sensors) {
            Err(Error::UnknownSensor(name)) => assert_eq!(name, "LANDSAT_9"),
            other => panic!("expected UnknownSensor, got {:?}", other),
        }
    }

    #[test]
    fn acquisition_date_is_parsed_from_fixed_offset() {
        assert_eq!(acquisition_millis(LC8_SCENE_JUL_01).unwrap(), JUL_01_2015_MS);
        assert_eq!(acquisition_millis(LE7_SCENE_JUN_27).unwrap(), JUN_27_2015_MS);

        match acquisition_millis("LC8191031") {
            Err(Error::InvalidSceneId { scene_id, .. }) => {
                assert_eq!(scene_id, "LC8191031")
            }
            other => panic!("expected InvalidSceneId, got {:?}", other),
        }

        assert!(matches!(
            acquisition_millis("LC8191031201518XLGN00"),
            Err(Error::InvalidSceneId { .. })
        ));
    }

    #[test]
    fn automatic_spec_builds_one_data_set_per_collection() {
        let request = automatic_request(&["LANDSAT_8", "LANDSAT_TM"]);
        let spec = LandsatAutomaticSpec::new(&request).unwrap();

        let names: Vec<_> = spec
            .data_sets()
            .iter()
            .map(|ds| ds.collection().name())
            .collect();
        assert_eq!(
            names,
            [
                "LANDSAT/LC08/C01/T1_TOA",
                "LANDSAT/LT4_L1T_TOA_FMASK",
                "LANDSAT/LT5_L1T_TOA_FMASK",
            ]
        );
        assert_eq!(spec.def().scale, 30);
    }

    #[test]
    fn automatic_filter_excludes_oli_only_scenes() {
        let request = automatic_request(&["LANDSAT_8"]);
        let spec = LandsatAutomaticSpec::new(&request).unwrap();

        let collection = spec.data_sets()[0].to_collection();
        assert_eq!(collection.collection.name, "LANDSAT/LC08/C01/T1_TOA");

        let json = serde_json::to_value(&collection.filter).unwrap();
        assert_eq!(json["type"], "and");
        let inner = json["filters"].as_array().unwrap();
        assert_eq!(inner.len(), 3);
        assert_eq!(inner[0]["type"], "intersects");
        assert_eq!(inner[1]["type"], "dateRange");
        assert_eq!(inner[2]["type"], "not");
        assert_eq!(inner[2]["filter"]["field"], "system:index");
        assert_eq!(inner[2]["filter"]["prefix"], "LO8");
    }

    #[test]
    fn automatic_spec_without_sensors_has_no_data_sets() {
        let request = automatic_request(&[]);
        let spec = LandsatAutomaticSpec::new(&request).unwrap();

        assert!(spec.data_sets().is_empty());
    }

    #[test]
    fn manual_spec_groups_scenes_by_collection() {
        let request = MosaicRequest::landsat(test_aoi()).scene_ids([
            LE7_SCENE_JUN_27,
            LC8_SCENE_JUL_09,
            LC8_SCENE_JUL_01,
        ]);
        let spec = LandsatManualSpec::new(&request).unwrap();

        assert_eq!(spec.data_sets().len(), 2);
        assert_eq!(
            spec.data_sets()[0].collection(),
            LandsatCollection::Lc08,
            "sorted scene ids should put the LC8 group first"
        );
        assert_eq!(spec.data_sets()[1].collection(), LandsatCollection::Le07);

        let lc8_filter = serde_json::to_value(&spec.data_sets()[0].to_collection().filter).unwrap();
        assert_eq!(lc8_filter["type"], "inList");
        assert_eq!(lc8_filter["field"], "LANDSAT_SCENE_ID");
        assert_eq!(
            lc8_filter["values"],
            serde_json::json!([LC8_SCENE_JUL_01, LC8_SCENE_JUL_09])
        );
    }

    #[test]
    fn manual_spec_date_window_spans_acquisitions() {
        let request = MosaicRequest::landsat(test_aoi()).scene_ids([
            LC8_SCENE_JUL_01,
            LE7_SCENE_JUN_27,
            LC8_SCENE_JUL_09,
        ]);
        let spec = LandsatManualSpec::new(&request).unwrap();

        assert_eq!(spec.def().from_date, JUN_27_2015_MS);
        assert_eq!(spec.def().to_date, JUL_09_2015_MS);
    }

    #[test]
    fn manual_spec_rejects_unknown_prefix() {
        let request =
            MosaicRequest::landsat(test_aoi()).scene_ids(["LX81910312015182LGN00"]);

        match LandsatManualSpec::new(&request) {
            Err(Error::UnknownScenePrefix { prefix, .. }) => assert_eq!(prefix, "LX8"),
            other => panic!("expected UnknownScenePrefix, got {:?}", other),
        }
    }

    #[test]
    fn manual_spec_rejects_empty_scene_list() {
        let request = MosaicRequest::landsat(test_aoi());

        assert!(matches!(
            LandsatManualSpec::new(&request),
            Err(Error::EmptyScenes)
        ));
    }

    #[test]
    fn data_set_analysis_gets_bands_and_def() {
        let request = automatic_request(&["LANDSAT_8"]);
        let spec = LandsatAutomaticSpec::new(&request).unwrap();
        let data_set = &spec.data_sets()[0];

        assert!(data_set.masks_cloud_on_analysis());
        assert_eq!(data_set.bands().get("nir"), Some("B5"));

        let analyzed = data_set.analyze(&Image::new("scene-1"), &ProbeAnalysis);
        assert_eq!(analyzed.id, "scene-1|bands=9|scale=30");
    }
}
