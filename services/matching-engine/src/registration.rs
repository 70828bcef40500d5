//! Registration service
//!
//! Creates regions (with their places) and carriers (with their served
//! regions), and records requests and offers. Identifier uniqueness and
//! referential existence are checked here, once, at creation time.

use tracing::{debug, warn};

use types::carrier::Carrier;
use types::errors::{EntityKind, RegistryError};
use types::geography::{Place, Region};
use types::ids::ProductId;
use types::listing::{Offer, Request};

use crate::config::NamePolicy;
use crate::store::EntityStore;

/// Register a region and attach every place name not yet known anywhere.
///
/// Place names already registered (in any region, or earlier in this same
/// call) are left where they are. Returns the region's place names in
/// attachment order.
pub fn add_region<S: AsRef<str>>(
    store: &mut EntityStore,
    policy: NamePolicy,
    region_name: &str,
    place_names: &[S],
) -> Result<Vec<String>, RegistryError> {
    if store.region_key(region_name).is_some() {
        match policy {
            NamePolicy::Reject => {
                return Err(RegistryError::duplicate(EntityKind::Region, region_name));
            }
            NamePolicy::Overwrite => {
                warn!(region = region_name, "Replacing existing region entry");
            }
        }
    }

    let key = store.insert_region(Region::new(region_name));

    for place_name in place_names {
        let place_name = place_name.as_ref();
        if store.contains_place(place_name) {
            debug!(place = place_name, region = region_name, "Place already registered, skipping");
            continue;
        }
        store.insert_place(Place::new(place_name, key));
        if let Some(region) = store.region_mut(key) {
            region.attach_place(place_name);
        }
    }

    let places = store
        .region(key)
        .map(|r| r.places().to_vec())
        .unwrap_or_default();

    debug!(region = region_name, place_count = places.len(), "Region registered");
    Ok(places)
}

/// Register a carrier serving every known region among `region_names`.
///
/// Unknown region names are skipped. Returns the served region names in
/// attachment order.
pub fn add_carrier<S: AsRef<str>>(
    store: &mut EntityStore,
    policy: NamePolicy,
    carrier_name: &str,
    region_names: &[S],
) -> Result<Vec<String>, RegistryError> {
    if store.carrier_key(carrier_name).is_some() {
        match policy {
            NamePolicy::Reject => {
                return Err(RegistryError::duplicate(EntityKind::Carrier, carrier_name));
            }
            NamePolicy::Overwrite => {
                warn!(carrier = carrier_name, "Replacing existing carrier entry");
            }
        }
    }

    let mut carrier = Carrier::new(carrier_name);
    for region_name in region_names {
        let region_name = region_name.as_ref();
        match store.region_key(region_name) {
            Some(key) => {
                carrier.serve(key);
            }
            None => {
                debug!(carrier = carrier_name, region = region_name, "Unknown region skipped");
            }
        }
    }

    let served = region_names_of(store, &carrier);
    store.insert_carrier(carrier);

    debug!(carrier = carrier_name, region_count = served.len(), "Carrier registered");
    Ok(served)
}

/// Names of the carriers serving the current instance of a region, sorted.
///
/// An unknown region yields an empty list.
pub fn carriers_for_region(store: &EntityStore, region_name: &str) -> Vec<String> {
    let Some(key) = store.region_key(region_name) else {
        return Vec::new();
    };

    let mut names: Vec<String> = store
        .current_carriers()
        .filter(|c| c.serves(key))
        .map(|c| c.name.clone())
        .collect();
    names.sort();
    names
}

/// Record a buyer request at an existing place.
pub fn add_request(
    store: &mut EntityStore,
    request_id: &str,
    place_name: &str,
    product_id: impl Into<ProductId>,
) -> Result<(), RegistryError> {
    if store.contains_request(request_id) {
        return Err(RegistryError::duplicate(EntityKind::Request, request_id));
    }
    if !store.contains_place(place_name) {
        return Err(RegistryError::unknown(EntityKind::Place, place_name));
    }

    let request = Request::new(request_id, place_name, product_id);
    debug!(request = request_id, place = place_name, product = %request.product_id, "Request recorded");
    store.insert_request(request);
    Ok(())
}

/// Record a seller offer at an existing place.
pub fn add_offer(
    store: &mut EntityStore,
    offer_id: &str,
    place_name: &str,
    product_id: impl Into<ProductId>,
) -> Result<(), RegistryError> {
    if store.contains_offer(offer_id) {
        return Err(RegistryError::duplicate(EntityKind::Offer, offer_id));
    }
    if !store.contains_place(place_name) {
        return Err(RegistryError::unknown(EntityKind::Place, place_name));
    }

    let offer = Offer::new(offer_id, place_name, product_id);
    debug!(offer = offer_id, place = place_name, product = %offer.product_id, "Offer recorded");
    store.insert_offer(offer);
    Ok(())
}

/// Place names of a region, in attachment order.
pub fn region_places(store: &EntityStore, region_name: &str) -> Result<Vec<String>, RegistryError> {
    store
        .region_by_name(region_name)
        .map(|r| r.places().to_vec())
        .ok_or_else(|| RegistryError::unknown(EntityKind::Region, region_name))
}

/// Served region names of a carrier, in attachment order.
pub fn carrier_regions(store: &EntityStore, carrier_name: &str) -> Result<Vec<String>, RegistryError> {
    store
        .carrier_by_name(carrier_name)
        .map(|c| region_names_of(store, c))
        .ok_or_else(|| RegistryError::unknown(EntityKind::Carrier, carrier_name))
}

fn region_names_of(store: &EntityStore, carrier: &Carrier) -> Vec<String> {
    carrier
        .regions()
        .iter()
        .filter_map(|key| store.region(*key))
        .map(|r| r.name.clone())
        .collect()
}
