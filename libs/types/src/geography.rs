//! Geography types: regions and the places they own

use crate::ids::RegionKey;
use serde::{Deserialize, Serialize};

/// A named geographic grouping of places
///
/// Places are kept in attachment order. A region only ever gains places;
/// a place registered elsewhere is never moved into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    places: Vec<String>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            places: Vec::new(),
        }
    }

    /// Attach a place name to this region
    pub fn attach_place(&mut self, place_name: impl Into<String>) {
        self.places.push(place_name.into());
    }

    /// Place names in attachment order
    pub fn places(&self) -> &[String] {
        &self.places
    }
}

/// A named location belonging to exactly one region instance
///
/// The owning region is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub region: RegionKey,
}

impl Place {
    pub fn new(name: impl Into<String>, region: RegionKey) -> Self {
        Self {
            name: name.into(),
            region,
        }
    }
}
