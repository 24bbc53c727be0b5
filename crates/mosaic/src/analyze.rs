//! Seam to the external per-image analysis routine.
//!
//! Cloud masking, spectral-index computation and everything else pixel-level
//! happens behind [`ImageAnalysis`]; a data set only wires the routine up
//! with its band table and owning mosaic definition.

use tesela_core::{BandTable, Image};

use crate::spec::MosaicDef;

/// External analysis routine applied to one image of a data set.
pub trait ImageAnalysis {
    /// Analyze a single image.
    ///
    /// `bands` is the role → provider-band table of the data set the image
    /// came from, `def` the mosaic definition that selected it. The returned
    /// image passes through [`DataSet::analyze`](crate::DataSet::analyze)
    /// unmodified.
    fn apply(&self, image: &Image, bands: &BandTable, def: &MosaicDef) -> Image;
}
