//! Carrier coverage checks
//!
//! A carrier must serve the region instance of both the offer's place and
//! the request's place.

use types::carrier::Carrier;
use types::errors::RegistryError;
use types::ids::RegionKey;

use crate::store::EntityStore;

/// Check coverage of the offer region, then the request region.
pub fn check_coverage(
    store: &EntityStore,
    carrier: &Carrier,
    offer_region: RegionKey,
    request_region: RegionKey,
) -> Result<(), RegistryError> {
    for region in [offer_region, request_region] {
        if !carrier.serves(region) {
            return Err(RegistryError::CoverageViolation {
                carrier: carrier.name.clone(),
                region: region_label(store, region),
            });
        }
    }
    Ok(())
}

fn region_label(store: &EntityStore, key: RegionKey) -> String {
    store
        .region(key)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::geography::Region;

    #[test]
    fn test_both_regions_served() {
        let mut store = EntityStore::new();
        let north = store.insert_region(Region::new("North"));
        let south = store.insert_region(Region::new("South"));
        let mut carrier = Carrier::new("FastCo");
        carrier.serve(north);
        carrier.serve(south);

        assert!(check_coverage(&store, &carrier, south, north).is_ok());
    }

    #[test]
    fn test_same_region_both_ends() {
        let mut store = EntityStore::new();
        let north = store.insert_region(Region::new("North"));
        let mut carrier = Carrier::new("LocalCo");
        carrier.serve(north);

        assert!(check_coverage(&store, &carrier, north, north).is_ok());
    }

    #[test]
    fn test_offer_region_missing_reported_first() {
        let mut store = EntityStore::new();
        let north = store.insert_region(Region::new("North"));
        let south = store.insert_region(Region::new("South"));
        let east = store.insert_region(Region::new("East"));
        let mut carrier = Carrier::new("FastCo");
        carrier.serve(east);

        let err = check_coverage(&store, &carrier, south, north).unwrap_err();
        assert_eq!(
            err,
            RegistryError::CoverageViolation {
                carrier: "FastCo".to_string(),
                region: "South".to_string(),
            }
        );
    }

    #[test]
    fn test_request_region_missing() {
        let mut store = EntityStore::new();
        let north = store.insert_region(Region::new("North"));
        let south = store.insert_region(Region::new("South"));
        let mut carrier = Carrier::new("FastCo");
        carrier.serve(south);

        let err = check_coverage(&store, &carrier, south, north).unwrap_err();
        assert!(matches!(err, RegistryError::CoverageViolation { ref region, .. } if region == "North"));
    }
}
