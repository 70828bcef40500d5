//! Exclusivity checks
//!
//! A request and an offer may each be bound by at most one transaction.

use types::errors::{EntityKind, RegistryError};
use types::transaction::Transaction;

/// Check that neither the request nor the offer is already bound.
///
/// Every stored transaction counts, including one about to be overwritten.
/// The request side is reported first when both are taken.
pub fn check_unbound<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    request_id: &str,
    offer_id: &str,
) -> Result<(), RegistryError> {
    for t in transactions {
        if t.request_id == request_id {
            return Err(RegistryError::ExclusivityViolation {
                kind: EntityKind::Request,
                id: request_id.to_string(),
                transaction: t.transaction_id.clone(),
            });
        }
        if t.offer_id == offer_id {
            return Err(RegistryError::ExclusivityViolation {
                kind: EntityKind::Offer,
                id: offer_id.to_string(),
                transaction: t.transaction_id.clone(),
            });
        }
    }
    Ok(())
}
