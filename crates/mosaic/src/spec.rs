//! Mosaic spec requests and the common mosaic definition.
//!
//! A [`MosaicRequest`] is the payload a caller hands us: an AOI, a date
//! window or an explicit scene list, requested band roles, and the imagery
//! source. Building a spec from it resolves everything against the static
//! configuration tables and yields immutable data sets; nothing is looked up
//! again afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tesela_core::dates;
use tesela_core::{Aoi, Error, Result};

use crate::data_set::DataSet;
use crate::landsat::{LandsatAutomaticSpec, LandsatManualSpec};
use crate::sentinel2::{Sentinel2AutomaticSpec, Sentinel2ManualSpec};

// ---------------------------------------------------------------------------
// Common definition
// ---------------------------------------------------------------------------

/// Parameters shared by every mosaic spec, fixed at construction.
///
/// Manual specs derive `from_date`/`to_date` from their scene ids; automatic
/// specs take them from the request. Dates are UTC epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosaicDef {
    /// Area of interest.
    pub aoi: Aoi,
    /// Start of the mosaic window, epoch milliseconds.
    pub from_date: i64,
    /// End of the mosaic window, epoch milliseconds.
    pub to_date: i64,
    /// Requested band roles (e.g. `"red"`, `"nir"`).
    pub bands: Vec<String>,
    /// Working resolution in meters.
    pub scale: u32,
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Which imagery family a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImagerySource {
    Landsat,
    Sentinel2,
}

/// Incoming mosaic spec payload.
///
/// `sceneIds` present selects manual mode; otherwise the request is
/// automatic and must carry both dates. Dates are ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicRequest {
    pub source: ImagerySource,

    pub aoi: Aoi,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,

    #[serde(default)]
    pub bands: Vec<String>,

    /// Sensor names for automatic Landsat specs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sensors: Vec<String>,

    /// Explicit scene identifiers for manual specs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scene_ids: Vec<String>,
}

impl MosaicRequest {
    /// Start a Landsat request over an AOI.
    pub fn landsat(aoi: Aoi) -> Self {
        Self::new(ImagerySource::Landsat, aoi)
    }

    /// Start a Sentinel-2 request over an AOI.
    pub fn sentinel2(aoi: Aoi) -> Self {
        Self::new(ImagerySource::Sentinel2, aoi)
    }

    fn new(source: ImagerySource, aoi: Aoi) -> Self {
        Self {
            source,
            aoi,
            from_date: None,
            to_date: None,
            bands: Vec::new(),
            sensors: Vec::new(),
            scene_ids: Vec::new(),
        }
    }

    /// Set the date window (ISO `YYYY-MM-DD`, end exclusive).
    pub fn date_range(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_date = Some(from.into());
        self.to_date = Some(to.into());
        self
    }

    /// Set the requested band roles.
    pub fn bands<I, S>(mut self, bands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bands = bands.into_iter().map(Into::into).collect();
        self
    }

    /// Set the sensor names (automatic Landsat mode).
    pub fn sensors<I, S>(mut self, sensors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensors = sensors.into_iter().map(Into::into).collect();
        self
    }

    /// Set explicit scene ids (manual mode).
    pub fn scene_ids<I, S>(mut self, scene_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scene_ids = scene_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Parse the request's date window to epoch milliseconds.
    ///
    /// Automatic specs require both dates; manual specs never call this.
    pub(crate) fn date_window_ms(&self) -> Result<(i64, i64)> {
        let from = self
            .from_date
            .as_deref()
            .ok_or(Error::MissingField("fromDate"))?;
        let to = self
            .to_date
            .as_deref()
            .ok_or(Error::MissingField("toDate"))?;
        Ok((dates::parse_iso_date(from)?, dates::parse_iso_date(to)?))
    }
}

// ---------------------------------------------------------------------------
// Umbrella spec
// ---------------------------------------------------------------------------

/// A fully built mosaic spec of any family and mode.
#[derive(Debug, Clone)]
pub enum MosaicSpec {
    LandsatAutomatic(LandsatAutomaticSpec),
    LandsatManual(LandsatManualSpec),
    Sentinel2Automatic(Sentinel2AutomaticSpec),
    Sentinel2Manual(Sentinel2ManualSpec),
}

impl MosaicSpec {
    /// Build the spec a request describes.
    ///
    /// The source field picks the family; a non-empty scene-id list picks
    /// manual mode, otherwise automatic.
    pub fn from_request(request: &MosaicRequest) -> Result<Self> {
        let manual = !request.scene_ids.is_empty();
        debug!(source = ?request.source, manual, "building mosaic spec");

        match (request.source, manual) {
            (ImagerySource::Landsat, false) => {
                Ok(Self::LandsatAutomatic(LandsatAutomaticSpec::new(request)?))
            }
            (ImagerySource::Landsat, true) => {
                Ok(Self::LandsatManual(LandsatManualSpec::new(request)?))
            }
            (ImagerySource::Sentinel2, false) => Ok(Self::Sentinel2Automatic(
                Sentinel2AutomaticSpec::new(request)?,
            )),
            (ImagerySource::Sentinel2, true) => {
                Ok(Self::Sentinel2Manual(Sentinel2ManualSpec::new(request)?))
            }
        }
    }

    /// The common mosaic definition.
    pub fn def(&self) -> &MosaicDef {
        match self {
            Self::LandsatAutomatic(s) => s.def(),
            Self::LandsatManual(s) => s.def(),
            Self::Sentinel2Automatic(s) => s.def(),
            Self::Sentinel2Manual(s) => s.def(),
        }
    }

    /// The data sets of this spec, one per participating collection.
    pub fn data_sets(&self) -> Vec<&dyn DataSet> {
        match self {
            Self::LandsatAutomatic(s) => {
                s.data_sets().iter().map(|d| d as &dyn DataSet).collect()
            }
            Self::LandsatManual(s) => {
                s.data_sets().iter().map(|d| d as &dyn DataSet).collect()
            }
            Self::Sentinel2Automatic(s) => {
                s.data_sets().iter().map(|d| d as &dyn DataSet).collect()
            }
            Self::Sentinel2Manual(s) => {
                s.data_sets().iter().map(|d| d as &dyn DataSet).collect()
            }
        }
    }
}

impl fmt::Display for MosaicSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LandsatAutomatic(s) => s.fmt(f),
            Self::LandsatManual(s) => s.fmt(f),
            Self::Sentinel2Automatic(s) => s.fmt(f),
            Self::Sentinel2Manual(s) => s.fmt(f),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
