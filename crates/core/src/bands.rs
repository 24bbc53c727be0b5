//! Band lookup tables.
//!
//! A [`BandTable`] maps canonical band roles (`"blue"`, `"nir"`, ...) to the
//! provider-specific band identifiers of one collection. Tables are
//! hand-authored constants owned by the spec families; this module only
//! provides the lookup wrapper.

use std::collections::HashMap;

/// Immutable role → provider-band-name table for one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandTable {
    entries: &'static [(&'static str, &'static str)],
}

impl BandTable {
    /// Wrap a static entry slice.
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Provider band identifier for a canonical role, if the collection has
    /// one.
    pub fn get(&self, role: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, name)| *name)
    }

    /// Canonical roles this collection exposes, in table order.
    pub fn roles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(r, _)| *r)
    }

    /// Iterate `(role, provider band)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned map form, for callers that want hashing over table order.
    pub fn to_map(&self) -> HashMap<&'static str, &'static str> {
        self.entries.iter().copied().collect()
    }
}
