//! Matching logic module
//!
//! Validates and creates transactions. Checks run in a fixed order and the
//! first violation wins:
//! 1. request/offer exclusivity
//! 2. request and offer resolution
//! 3. product identity, then carrier resolution
//! 4. carrier coverage of the offer region, then the request region
//! 5. transaction id collision (per policy)
//!
//! Nothing is written to the store until every check has passed.

pub mod coverage;
pub mod exclusivity;

pub use coverage::check_coverage;
pub use exclusivity::check_unbound;

use tracing::{info, warn};

use types::errors::{EntityKind, RegistryError};
use types::transaction::Transaction;

use crate::config::NamePolicy;
use crate::store::EntityStore;

/// Validate and store a new unscored transaction.
///
/// Returns true when an existing transaction under the same id was replaced.
pub fn add_transaction(
    store: &mut EntityStore,
    policy: NamePolicy,
    transaction_id: &str,
    carrier_name: &str,
    request_id: &str,
    offer_id: &str,
) -> Result<bool, RegistryError> {
    let result = validate(store, policy, transaction_id, carrier_name, request_id, offer_id);

    let transaction = match result {
        Ok(t) => t,
        Err(err) => {
            warn!(
                transaction = transaction_id,
                carrier = carrier_name,
                request = request_id,
                offer = offer_id,
                reason = err.kind_label(),
                "Transaction rejected"
            );
            return Err(err);
        }
    };

    let replaced = store.insert_transaction(transaction);
    if let Some(previous) = &replaced {
        warn!(
            transaction = transaction_id,
            previous_request = %previous.request_id,
            previous_offer = %previous.offer_id,
            "Transaction id reused, previous entry replaced"
        );
    }

    info!(
        transaction = transaction_id,
        carrier = carrier_name,
        request = request_id,
        offer = offer_id,
        "Transaction created"
    );
    Ok(replaced.is_some())
}

fn validate(
    store: &EntityStore,
    policy: NamePolicy,
    transaction_id: &str,
    carrier_name: &str,
    request_id: &str,
    offer_id: &str,
) -> Result<Transaction, RegistryError> {
    check_unbound(store.transactions(), request_id, offer_id)?;

    let request = store
        .request(request_id)
        .ok_or_else(|| RegistryError::unknown(EntityKind::Request, request_id))?;
    let offer = store
        .offer(offer_id)
        .ok_or_else(|| RegistryError::unknown(EntityKind::Offer, offer_id))?;

    if !offer.matches_product(request) {
        return Err(RegistryError::ProductMismatch {
            request_product: request.product_id.to_string(),
            offer_product: offer.product_id.to_string(),
        });
    }

    let carrier_key = store
        .carrier_key(carrier_name)
        .ok_or_else(|| RegistryError::unknown(EntityKind::Carrier, carrier_name))?;
    let carrier = store
        .carrier(carrier_key)
        .ok_or_else(|| RegistryError::unknown(EntityKind::Carrier, carrier_name))?;

    let offer_region = store
        .place_region(&offer.place)
        .ok_or_else(|| RegistryError::unknown(EntityKind::Place, offer.place.as_str()))?;
    let request_region = store
        .place_region(&request.place)
        .ok_or_else(|| RegistryError::unknown(EntityKind::Place, request.place.as_str()))?;

    check_coverage(store, carrier, offer_region, request_region)?;

    if policy == NamePolicy::Reject && store.contains_transaction(transaction_id) {
        return Err(RegistryError::duplicate(EntityKind::Transaction, transaction_id));
    }

    Ok(Transaction::new(transaction_id, carrier_key, request_id, offer_id))
}
