//! Reporting engine
//!
//! Derives sorted aggregate views over the transaction history. Every report
//! is recomputed from the store on each call; nothing is cached.
//!
//! Transactions are visited in insertion order, which fixes the "first
//! encountered" order used by the delivery-region report.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use types::ids::RegionKey;
use types::transaction::Transaction;

use crate::store::EntityStore;

/// Transaction count → region names with exactly that count
pub type DeliveryRegionReport = BTreeMap<u64, Vec<String>>;
/// Carrier name → truncated average score
pub type CarrierScoreReport = BTreeMap<String, u32>;
/// Product id → transaction count
pub type ProductCountReport = BTreeMap<String, u64>;

/// Group transactions by the region of the offer's place.
///
/// Regions sharing a count are listed in the order they were first
/// encountered, not alphabetically. Superseded region instances are tallied
/// separately from the current instance of the same name.
pub fn delivery_regions_per_transaction_count(store: &EntityStore) -> DeliveryRegionReport {
    let mut tally: Vec<(RegionKey, u64)> = Vec::new();
    let mut positions: HashMap<RegionKey, usize> = HashMap::new();

    for region in store.transactions().iter().filter_map(|t| offer_region(store, t)) {
        match positions.get(&region) {
            Some(&pos) => tally[pos].1 += 1,
            None => {
                positions.insert(region, tally.len());
                tally.push((region, 1));
            }
        }
    }

    let mut report = DeliveryRegionReport::new();
    for (key, count) in tally {
        if let Some(region) = store.region(key) {
            report.entry(count).or_default().push(region.name.clone());
        }
    }

    debug!(buckets = report.len(), "Delivery region report built");
    report
}

/// Truncated average score per carrier over transactions scoring at least
/// `minimum_score`.
///
/// Unscored transactions count as 0, so they are only included when
/// `minimum_score <= 0`.
pub fn score_per_carrier(store: &EntityStore, minimum_score: i64) -> CarrierScoreReport {
    let mut totals: BTreeMap<String, (u64, u64)> = BTreeMap::new();

    for t in store.transactions() {
        let score = t.score_value();
        if (score as i64) < minimum_score {
            continue;
        }
        let Some(carrier) = store.carrier(t.carrier) else {
            continue;
        };
        let entry = totals.entry(carrier.name.clone()).or_insert((0, 0));
        entry.0 += score as u64;
        entry.1 += 1;
    }

    let report: CarrierScoreReport = totals
        .into_iter()
        .map(|(name, (sum, count))| (name, truncated_average(sum, count)))
        .collect();

    debug!(minimum_score, carriers = report.len(), "Carrier score report built");
    report
}

/// Transaction count per product, keyed by the offer's product id.
pub fn transaction_count_per_product(store: &EntityStore) -> ProductCountReport {
    let mut report = ProductCountReport::new();

    for t in store.transactions() {
        if let Some(offer) = store.offer(&t.offer_id) {
            *report.entry(offer.product_id.to_string()).or_insert(0) += 1;
        }
    }

    debug!(products = report.len(), "Product count report built");
    report
}

fn offer_region(store: &EntityStore, transaction: &Transaction) -> Option<RegionKey> {
    store
        .offer(&transaction.offer_id)
        .and_then(|offer| store.place_region(&offer.place))
}

/// Integer division, truncating toward zero
fn truncated_average(sum: u64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    (sum / count) as u32
}
