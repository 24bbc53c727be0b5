//! The data-set contract shared by both spec families.

use tesela_core::{BandTable, FilteredCollection, Image};

use crate::analyze::ImageAnalysis;

/// One filtered imagery collection plus its band table and analysis hookup.
///
/// Data sets are built once when their spec is constructed, are immutable,
/// and live exactly as long as the spec that owns them.
pub trait DataSet {
    /// The filtered provider collection for this data set.
    ///
    /// Pure function of collection name and filter — recomputed on every
    /// call, never cached.
    fn to_collection(&self) -> FilteredCollection;

    /// Delegate one image to the external analysis routine, handing it this
    /// data set's band table and owning mosaic definition. The result is
    /// returned unmodified.
    fn analyze(&self, image: &Image, analysis: &dyn ImageAnalysis) -> Image;

    /// Whether analysis must mask clouds itself.
    ///
    /// `true` for every Landsat data set, `false` for every Sentinel-2 data
    /// set, independent of spec parameters.
    fn masks_cloud_on_analysis(&self) -> bool;

    /// The role → provider-band-name table of this data set's collection.
    fn bands(&self) -> &'static BandTable;
}
