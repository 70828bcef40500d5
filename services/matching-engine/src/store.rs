//! Entity store
//!
//! Keyed collections for regions, places, carriers, requests, offers and
//! transactions. No business rules live here; callers validate before they
//! insert.
//!
//! Regions and carriers are append-only arenas. Re-registering a name pushes
//! a new instance and repoints the name, leaving the superseded instance in
//! place for everything that still references it.

use std::collections::HashMap;

use types::carrier::Carrier;
use types::geography::{Place, Region};
use types::ids::{CarrierKey, RegionKey};
use types::listing::{Offer, Request};
use types::transaction::Transaction;

/// In-memory entity store owned by a single manager instance
#[derive(Debug, Default)]
pub struct EntityStore {
    regions: Vec<Region>,
    region_names: HashMap<String, RegionKey>,
    places: HashMap<String, Place>,
    carriers: Vec<Carrier>,
    carrier_names: HashMap<String, CarrierKey>,
    requests: HashMap<String, Request>,
    offers: HashMap<String, Offer>,
    /// Transactions in insertion order
    transactions: Vec<Transaction>,
    transaction_positions: HashMap<String, usize>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Regions

    /// Store a region instance and point its name at it
    pub fn insert_region(&mut self, region: Region) -> RegionKey {
        let key = RegionKey::from_index(self.regions.len());
        self.region_names.insert(region.name.clone(), key);
        self.regions.push(region);
        key
    }

    pub fn region(&self, key: RegionKey) -> Option<&Region> {
        self.regions.get(key.index())
    }

    pub fn region_mut(&mut self, key: RegionKey) -> Option<&mut Region> {
        self.regions.get_mut(key.index())
    }

    /// Current instance registered under a name
    pub fn region_key(&self, name: &str) -> Option<RegionKey> {
        self.region_names.get(name).copied()
    }

    pub fn region_by_name(&self, name: &str) -> Option<&Region> {
        self.region_key(name).and_then(|key| self.region(key))
    }

    /// Number of distinct region names
    pub fn region_count(&self) -> usize {
        self.region_names.len()
    }

    // Places

    pub fn insert_place(&mut self, place: Place) {
        self.places.insert(place.name.clone(), place);
    }

    pub fn contains_place(&self, name: &str) -> bool {
        self.places.contains_key(name)
    }

    /// Region instance owning a place
    pub fn place_region(&self, name: &str) -> Option<RegionKey> {
        self.places.get(name).map(|p| p.region)
    }

    // Carriers

    pub fn insert_carrier(&mut self, carrier: Carrier) -> CarrierKey {
        let key = CarrierKey::from_index(self.carriers.len());
        self.carrier_names.insert(carrier.name.clone(), key);
        self.carriers.push(carrier);
        key
    }

    pub fn carrier(&self, key: CarrierKey) -> Option<&Carrier> {
        self.carriers.get(key.index())
    }

    pub fn carrier_key(&self, name: &str) -> Option<CarrierKey> {
        self.carrier_names.get(name).copied()
    }

    pub fn carrier_by_name(&self, name: &str) -> Option<&Carrier> {
        self.carrier_key(name).and_then(|key| self.carrier(key))
    }

    /// Carriers currently registered under a name (superseded instances excluded)
    pub fn current_carriers(&self) -> impl Iterator<Item = &Carrier> + '_ {
        self.carrier_names
            .values()
            .filter_map(move |key| self.carrier(*key))
    }

    // Requests and offers

    pub fn insert_request(&mut self, request: Request) {
        self.requests.insert(request.request_id.clone(), request);
    }

    pub fn request(&self, id: &str) -> Option<&Request> {
        self.requests.get(id)
    }

    pub fn contains_request(&self, id: &str) -> bool {
        self.requests.contains_key(id)
    }

    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    pub fn insert_offer(&mut self, offer: Offer) {
        self.offers.insert(offer.offer_id.clone(), offer);
    }

    pub fn offer(&self, id: &str) -> Option<&Offer> {
        self.offers.get(id)
    }

    pub fn contains_offer(&self, id: &str) -> bool {
        self.offers.contains_key(id)
    }

    pub fn offer_count(&self) -> usize {
        self.offers.len()
    }

    // Transactions

    /// Store a transaction, replacing any entry under the same id in place.
    ///
    /// Returns the replaced transaction, if any.
    pub fn insert_transaction(&mut self, transaction: Transaction) -> Option<Transaction> {
        match self.transaction_positions.get(&transaction.transaction_id) {
            Some(&pos) => Some(std::mem::replace(&mut self.transactions[pos], transaction)),
            None => {
                self.transaction_positions
                    .insert(transaction.transaction_id.clone(), self.transactions.len());
                self.transactions.push(transaction);
                None
            }
        }
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transaction_positions
            .get(id)
            .and_then(|&pos| self.transactions.get(pos))
    }

    pub fn transaction_mut(&mut self, id: &str) -> Option<&mut Transaction> {
        match self.transaction_positions.get(id) {
            Some(&pos) => self.transactions.get_mut(pos),
            None => None,
        }
    }

    pub fn contains_transaction(&self, id: &str) -> bool {
        self.transaction_positions.contains_key(id)
    }

    /// All transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}
