//! Transaction manager
//!
//! Main coordinator owning the entity store, configuration and event
//! journal. Every public operation is all-or-nothing: the store is only
//! touched once all validation has passed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use types::errors::RegistryError;
use types::ids::ProductId;
use types::transaction::Transaction;

use crate::config::RegistryConfig;
use crate::events::{EventJournal, RegistryEvent, SequencedEvent};
use crate::reports::{self, CarrierScoreReport, DeliveryRegionReport, ProductCountReport};
use crate::store::EntityStore;
use crate::{matching, registration, scoring};

/// Single-owner registry: regions, places, carriers, requests, offers and
/// the transactions pairing them.
#[derive(Debug)]
pub struct TransactionManager {
    store: EntityStore,
    config: RegistryConfig,
    journal: EventJournal,
}

impl TransactionManager {
    /// Create an empty manager with the given configuration.
    pub fn new(config: RegistryConfig) -> Self {
        info!(
            name_collision = ?config.name_collision,
            transaction_id_collision = ?config.transaction_id_collision,
            journal_capacity = config.journal_capacity,
            "TransactionManager initialized"
        );

        Self {
            store: EntityStore::new(),
            journal: EventJournal::new(config.journal_capacity),
            config,
        }
    }

    /// Create an empty manager with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RegistryConfig::default())
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Read-only view of the underlying store
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    // Registration

    /// Register a region with its places.
    ///
    /// Returns the names of the places attached to the region, in order.
    pub fn add_region<S: AsRef<str>>(
        &mut self,
        region_name: &str,
        place_names: &[S],
    ) -> Result<Vec<String>, RegistryError> {
        let replaced = self.store.region_key(region_name).is_some();
        let places = registration::add_region(
            &mut self.store,
            self.config.name_collision,
            region_name,
            place_names,
        )?;

        self.journal.record(RegistryEvent::RegionAdded {
            region: region_name.to_string(),
            places: places.clone(),
            replaced,
        });
        Ok(places)
    }

    /// Register a carrier serving the known regions among `region_names`.
    ///
    /// Returns the names of the served regions, in order.
    pub fn add_carrier<S: AsRef<str>>(
        &mut self,
        carrier_name: &str,
        region_names: &[S],
    ) -> Result<Vec<String>, RegistryError> {
        let replaced = self.store.carrier_key(carrier_name).is_some();
        let regions = registration::add_carrier(
            &mut self.store,
            self.config.name_collision,
            carrier_name,
            region_names,
        )?;

        self.journal.record(RegistryEvent::CarrierAdded {
            carrier: carrier_name.to_string(),
            regions: regions.clone(),
            replaced,
        });
        Ok(regions)
    }

    /// Sorted names of the carriers serving a region
    pub fn carriers_for_region(&self, region_name: &str) -> Vec<String> {
        registration::carriers_for_region(&self.store, region_name)
    }

    pub fn add_request(
        &mut self,
        request_id: &str,
        place_name: &str,
        product_id: impl Into<ProductId>,
    ) -> Result<(), RegistryError> {
        let product_id = product_id.into();
        registration::add_request(&mut self.store, request_id, place_name, product_id.clone())?;

        self.journal.record(RegistryEvent::RequestAdded {
            request_id: request_id.to_string(),
            place: place_name.to_string(),
            product_id: product_id.to_string(),
        });
        Ok(())
    }

    pub fn add_offer(
        &mut self,
        offer_id: &str,
        place_name: &str,
        product_id: impl Into<ProductId>,
    ) -> Result<(), RegistryError> {
        let product_id = product_id.into();
        registration::add_offer(&mut self.store, offer_id, place_name, product_id.clone())?;

        self.journal.record(RegistryEvent::OfferAdded {
            offer_id: offer_id.to_string(),
            place: place_name.to_string(),
            product_id: product_id.to_string(),
        });
        Ok(())
    }

    pub fn region_places(&self, region_name: &str) -> Result<Vec<String>, RegistryError> {
        registration::region_places(&self.store, region_name)
    }

    pub fn carrier_regions(&self, carrier_name: &str) -> Result<Vec<String>, RegistryError> {
        registration::carrier_regions(&self.store, carrier_name)
    }

    // Matching and scoring

    /// Validate and create a transaction pairing a request with an offer.
    pub fn add_transaction(
        &mut self,
        transaction_id: &str,
        carrier_name: &str,
        request_id: &str,
        offer_id: &str,
    ) -> Result<(), RegistryError> {
        let replaced = matching::add_transaction(
            &mut self.store,
            self.config.transaction_id_collision,
            transaction_id,
            carrier_name,
            request_id,
            offer_id,
        )?;

        self.journal.record(RegistryEvent::TransactionCreated {
            transaction_id: transaction_id.to_string(),
            carrier: carrier_name.to_string(),
            request_id: request_id.to_string(),
            offer_id: offer_id.to_string(),
            replaced,
        });
        Ok(())
    }

    /// Score a transaction; `Ok(false)` for a score outside 1..=10.
    pub fn evaluate_transaction(&mut self, transaction_id: &str, score: i64) -> Result<bool, RegistryError> {
        let applied = scoring::evaluate_transaction(&mut self.store, transaction_id, score)?;
        if applied {
            self.journal.record(RegistryEvent::TransactionScored {
                transaction_id: transaction_id.to_string(),
                score: score as u8,
            });
        }
        Ok(applied)
    }

    pub fn transaction(&self, transaction_id: &str) -> Option<&Transaction> {
        self.store.transaction(transaction_id)
    }

    pub fn transaction_count(&self) -> usize {
        self.store.transaction_count()
    }

    // Reports

    pub fn delivery_regions_per_transaction_count(&self) -> DeliveryRegionReport {
        reports::delivery_regions_per_transaction_count(&self.store)
    }

    pub fn score_per_carrier(&self, minimum_score: i64) -> CarrierScoreReport {
        reports::score_per_carrier(&self.store, minimum_score)
    }

    pub fn transaction_count_per_product(&self) -> ProductCountReport {
        reports::transaction_count_per_product(&self.store)
    }

    // Journal

    /// Remove and return journaled events in sequence order
    pub fn drain_events(&mut self) -> Vec<SequencedEvent> {
        self.journal.drain()
    }

    pub fn evicted_events(&self) -> u64 {
        self.journal.evicted()
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Thread-safe handle to a [`TransactionManager`].
///
/// A single lock guards all collections, so the scan-then-insert in
/// `add_transaction` is atomic with respect to other callers.
#[derive(Debug, Clone)]
pub struct SharedTransactionManager {
    inner: Arc<Mutex<TransactionManager>>,
}

impl SharedTransactionManager {
    pub fn new(config: RegistryConfig) -> Self {
        Self::from_manager(TransactionManager::new(config))
    }

    pub fn from_manager(manager: TransactionManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    // Each operation validates before it mutates and is atomic, so a poisoned
    // lock still guards state that is consistent at operation boundaries.
    fn lock(&self) -> MutexGuard<'_, TransactionManager> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run several operations under one lock acquisition.
    pub fn with<R>(&self, f: impl FnOnce(&mut TransactionManager) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn add_region<S: AsRef<str>>(&self, region_name: &str, place_names: &[S]) -> Result<Vec<String>, RegistryError> {
        self.lock().add_region(region_name, place_names)
    }

    pub fn add_carrier<S: AsRef<str>>(&self, carrier_name: &str, region_names: &[S]) -> Result<Vec<String>, RegistryError> {
        self.lock().add_carrier(carrier_name, region_names)
    }

    pub fn carriers_for_region(&self, region_name: &str) -> Vec<String> {
        self.lock().carriers_for_region(region_name)
    }

    pub fn add_request(&self, request_id: &str, place_name: &str, product_id: impl Into<ProductId>) -> Result<(), RegistryError> {
        self.lock().add_request(request_id, place_name, product_id)
    }

    pub fn add_offer(&self, offer_id: &str, place_name: &str, product_id: impl Into<ProductId>) -> Result<(), RegistryError> {
        self.lock().add_offer(offer_id, place_name, product_id)
    }

    pub fn add_transaction(
        &self,
        transaction_id: &str,
        carrier_name: &str,
        request_id: &str,
        offer_id: &str,
    ) -> Result<(), RegistryError> {
        self.lock().add_transaction(transaction_id, carrier_name, request_id, offer_id)
    }

    pub fn evaluate_transaction(&self, transaction_id: &str, score: i64) -> Result<bool, RegistryError> {
        self.lock().evaluate_transaction(transaction_id, score)
    }

    pub fn transaction(&self, transaction_id: &str) -> Option<Transaction> {
        self.lock().transaction(transaction_id).cloned()
    }

    pub fn transaction_count(&self) -> usize {
        self.lock().transaction_count()
    }

    pub fn delivery_regions_per_transaction_count(&self) -> DeliveryRegionReport {
        self.lock().delivery_regions_per_transaction_count()
    }

    pub fn score_per_carrier(&self, minimum_score: i64) -> CarrierScoreReport {
        self.lock().score_per_carrier(minimum_score)
    }

    pub fn transaction_count_per_product(&self) -> ProductCountReport {
        self.lock().transaction_count_per_product()
    }

    pub fn drain_events(&self) -> Vec<SequencedEvent> {
        self.lock().drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamePolicy;
    use types::errors::EntityKind;

    fn setup_manager() -> TransactionManager {
        let mut tm = TransactionManager::with_defaults();
        tm.add_region("North", &["Oslo"]).unwrap();
        tm.add_region("South", &["Madrid"]).unwrap();
        tm.add_carrier("FastCo", &["North", "South"]).unwrap();
        tm.add_request("R1", "Oslo", "P1").unwrap();
        tm.add_offer("O1", "Madrid", "P1").unwrap();
        tm
    }

    #[test]
    fn test_manager_full_flow() {
        let mut tm = setup_manager();
        tm.add_transaction("T1", "FastCo", "R1", "O1").unwrap();
        assert_eq!(tm.evaluate_transaction("T1", 8), Ok(true));

        assert_eq!(tm.transaction("T1").unwrap().score_value(), 8);
        assert_eq!(tm.score_per_carrier(1).get("FastCo"), Some(&8));
    }

    #[test]
    fn test_events_journaled_for_successes_only() {
        let mut tm = setup_manager();
        tm.add_transaction("T1", "FastCo", "R1", "O1").unwrap();
        assert!(tm.add_transaction("T2", "FastCo", "R1", "O1").is_err());
        assert_eq!(tm.evaluate_transaction("T1", 0), Ok(false));
        assert_eq!(tm.evaluate_transaction("T1", 9), Ok(true));

        let labels: Vec<&str> = tm
            .drain_events()
            .iter()
            .map(|e| e.event.event_type_label())
            .collect();
        assert_eq!(
            labels,
            vec![
                "REGION_ADDED",
                "REGION_ADDED",
                "CARRIER_ADDED",
                "REQUEST_ADDED",
                "OFFER_ADDED",
                "TRANSACTION_CREATED",
                "TRANSACTION_SCORED",
            ]
        );
        assert!(tm.drain_events().is_empty());
    }

    #[test]
    fn test_region_overwrite_flagged_in_event() {
        let mut tm = setup_manager();
        tm.drain_events();
        tm.add_region("North", &["Tromso"]).unwrap();

        let events = tm.drain_events();
        assert_eq!(
            events[0].event,
            RegistryEvent::RegionAdded {
                region: "North".to_string(),
                places: vec!["Tromso".to_string()],
                replaced: true,
            }
        );
    }

    #[test]
    fn test_reject_policy_from_config() {
        let config = RegistryConfig {
            name_collision: NamePolicy::Reject,
            ..RegistryConfig::default()
        };
        let mut tm = TransactionManager::new(config);
        tm.add_region("North", &["Oslo"]).unwrap();
        tm.add_carrier("FastCo", &["North"]).unwrap();

        assert_eq!(
            tm.add_region("North", &["Bergen"]),
            Err(RegistryError::duplicate(EntityKind::Region, "North"))
        );
        assert_eq!(
            tm.add_carrier("FastCo", &["North"]),
            Err(RegistryError::duplicate(EntityKind::Carrier, "FastCo"))
        );
        assert_eq!(tm.drain_events().len(), 2);
    }

    #[test]
    fn test_journal_capacity_from_config() {
        let config = RegistryConfig {
            journal_capacity: 2,
            ..RegistryConfig::default()
        };
        let mut tm = TransactionManager::new(config);
        tm.add_region("A", &["a"]).unwrap();
        tm.add_region("B", &["b"]).unwrap();
        tm.add_region("C", &["c"]).unwrap();

        let events = tm.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].sequence, 2);
        assert_eq!(tm.evicted_events(), 1);
    }

    #[test]
    fn test_shared_manager_batch() {
        let shared = SharedTransactionManager::from_manager(setup_manager());
        let created = shared.with(|tm| {
            tm.add_transaction("T1", "FastCo", "R1", "O1")?;
            tm.evaluate_transaction("T1", 10)
        });
        assert_eq!(created, Ok(true));
        assert_eq!(shared.transaction("T1").map(|t| t.score_value()), Some(10));
    }

    #[test]
    fn test_transaction_overwrite_flagged_in_event() {
        let config = RegistryConfig {
            transaction_id_collision: NamePolicy::Overwrite,
            ..RegistryConfig::default()
        };
        let mut tm = TransactionManager::new(config);
        tm.add_region("North", &["Oslo"]).unwrap();
        tm.add_region("South", &["Madrid"]).unwrap();
        tm.add_carrier("FastCo", &["North", "South"]).unwrap();
        tm.add_request("R1", "Oslo", "P1").unwrap();
        tm.add_request("R2", "Oslo", "P1").unwrap();
        tm.add_offer("O1", "Madrid", "P1").unwrap();
        tm.add_offer("O2", "Madrid", "P1").unwrap();
        tm.drain_events();

        tm.add_transaction("T1", "FastCo", "R1", "O1").unwrap();
        tm.add_transaction("T1", "FastCo", "R2", "O2").unwrap();

        let flags: Vec<bool> = tm
            .drain_events()
            .iter()
            .filter_map(|e| match e.event {
                RegistryEvent::TransactionCreated { replaced, .. } => Some(replaced),
                _ => None,
            })
            .collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn test_shared_manager_usable_after_panic() {
        let shared = SharedTransactionManager::from_manager(setup_manager());
        let worker = shared.clone();
        let outcome = std::thread::spawn(move || {
            worker.with(|tm| {
                tm.add_transaction("T1", "FastCo", "R1", "O1").unwrap();
                panic!("caller bug after a completed operation");
            })
        })
        .join();
        assert!(outcome.is_err());

        assert_eq!(shared.transaction("T1").map(|t| t.request_id.clone()), Some("R1".to_string()));
        assert_eq!(shared.evaluate_transaction("T1", 6), Ok(true));
    }
}
