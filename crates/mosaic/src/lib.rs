//! # Tesela Mosaic
//!
//! Mosaic query specifications for Landsat and Sentinel-2 imagery.
//!
//! A [`MosaicRequest`] names an area of interest, a date window or an
//! explicit scene list, and the band roles to mosaic. Building a
//! [`MosaicSpec`] from it resolves sensor names and scene ids against the
//! static provider tables and yields one [`DataSet`] per participating
//! collection; each data set carries its filter, its band table, and the
//! hookup to the external [`ImageAnalysis`] routine.

pub mod analyze;
pub mod data_set;
pub mod landsat;
pub mod sentinel2;
pub mod spec;

pub use analyze::ImageAnalysis;
pub use data_set::DataSet;
pub use landsat::{LandsatAutomaticSpec, LandsatCollection, LandsatDataSet, LandsatManualSpec};
pub use sentinel2::{Sentinel2AutomaticSpec, Sentinel2DataSet, Sentinel2ManualSpec};
pub use spec::{ImagerySource, MosaicDef, MosaicRequest, MosaicSpec};
