//! Image filter predicates.
//!
//! Filters describe which scenes of a provider collection participate in a
//! mosaic. They are pure values: building one performs no I/O, and the remote
//! imagery-query service is what eventually evaluates them. The JSON encoding
//! (internally tagged, camelCase) is the wire form embedded in outgoing
//! queries.

use serde::{Deserialize, Serialize};

use crate::geometry::Aoi;

/// A scene filter, composed conjunctively by the provider.
///
/// The variant set matches what the imagery-query service supports: geometry
/// intersection, date ranges, string-prefix tests (with negation), and exact
/// membership over a named scene attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Filter {
    /// All inner filters must pass.
    And { filters: Vec<Filter> },

    /// Scene footprint intersects the GeoJSON geometry.
    Intersects { geometry: serde_json::Value },

    /// Scene acquisition time falls in `[from, to)`, epoch milliseconds.
    DateRange { from: i64, to: i64 },

    /// The named string attribute starts with `prefix`.
    StartsWith { field: String, prefix: String },

    /// Inverts the inner filter.
    Not { filter: Box<Filter> },

    /// The named attribute equals one of `values`.
    InList { field: String, values: Vec<String> },
}

impl Filter {
    /// Conjunction of several filters.
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::And {
            filters: filters.into_iter().collect(),
        }
    }

    /// Geometry-intersection filter over an AOI.
    pub fn intersects(aoi: &Aoi) -> Self {
        Self::Intersects {
            geometry: aoi.geometry().clone(),
        }
    }

    /// Acquisition-date range filter, epoch milliseconds, `[from, to)`.
    pub fn date_range(from: i64, to: i64) -> Self {
        Self::DateRange { from, to }
    }

    /// String-prefix filter over a named attribute.
    pub fn starts_with(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::StartsWith {
            field: field.into(),
            prefix: prefix.into(),
        }
    }

    /// Exact-membership filter over a named attribute.
    pub fn in_list<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InList {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Wrap this filter in a negation.
    pub fn negate(self) -> Self {
        Self::Not {
            filter: Box::new(self),
        }
    }
}
