//! # Tesela Core
//!
//! Core query model and shared types for the Tesela mosaic builder.
//!
//! This crate provides:
//! - `Filter`: scene filter predicates composed conjunctively
//! - `ImageCollectionRef` / `FilteredCollection`: provider collection queries
//! - `Aoi` / `BBox`: area-of-interest geometry
//! - `BandTable`: role → provider-band-name lookup
//! - Acquisition-date parsing to epoch milliseconds

pub mod bands;
pub mod collection;
pub mod dates;
pub mod error;
pub mod filter;
pub mod geometry;

pub use bands::BandTable;
pub use collection::{FilteredCollection, Image, ImageCollectionRef, INDEX_FIELD};
pub use error::{Error, Result};
pub use filter::Filter;
pub use geometry::{Aoi, BBox};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bands::BandTable;
    pub use crate::collection::{FilteredCollection, Image, ImageCollectionRef};
    pub use crate::error::{Error, Result};
    pub use crate::filter::Filter;
    pub use crate::geometry::{Aoi, BBox};
}
