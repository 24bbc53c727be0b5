//! Provider collection references.
//!
//! An [`ImageCollectionRef`] names a provider-hosted imagery archive; pairing
//! it with a [`Filter`] yields a [`FilteredCollection`], the query value a
//! mosaic data set hands to the remote service. Nothing here touches the
//! network.

use serde::{Deserialize, Serialize};

use crate::filter::Filter;

/// Name of the provider attribute indexing scenes within any collection.
pub const INDEX_FIELD: &str = "system:index";

/// Reference to a provider-hosted imagery collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCollectionRef {
    /// Provider identifier, e.g. `"LANDSAT/LC08/C01/T1_TOA"`.
    pub name: String,
}

impl ImageCollectionRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Restrict this collection with a filter.
    pub fn filter(&self, filter: Filter) -> FilteredCollection {
        FilteredCollection {
            collection: self.clone(),
            filter,
        }
    }
}

/// A collection restricted by a filter — the value `to_collection()` yields.
///
/// Pure function of collection name and filter; callers recompute it at will,
/// nothing is cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredCollection {
    pub collection: ImageCollectionRef,
    pub filter: Filter,
}

/// Opaque handle naming one satellite capture inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Provider scene identifier.
    pub id: String,
}

impl Image {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
