//! Carrier types
//!
//! A carrier holds non-owning references to the region instances it is
//! authorized to operate in.

use crate::ids::RegionKey;
use serde::{Deserialize, Serialize};

/// A carrier and its served region set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    pub name: String,
    regions: Vec<RegionKey>,
}

impl Carrier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regions: Vec::new(),
        }
    }

    /// Add a region to the served set
    ///
    /// Returns false if the region was already served.
    pub fn serve(&mut self, region: RegionKey) -> bool {
        if self.regions.contains(&region) {
            return false;
        }
        self.regions.push(region);
        true
    }

    /// Check coverage of a region instance
    pub fn serves(&self, region: RegionKey) -> bool {
        self.regions.contains(&region)
    }

    /// Served regions in attachment order
    pub fn regions(&self) -> &[RegionKey] {
        &self.regions
    }
}
