//! Transaction scoring
//!
//! Attaches a 1..=10 quality score to an existing transaction. Re-scoring
//! replaces the previous value.

use tracing::{debug, info};

use types::errors::{EntityKind, RegistryError};
use types::transaction::Score;

use crate::store::EntityStore;

/// Score a transaction.
///
/// Returns `Ok(false)` without touching the store when the score is out of
/// range (the id is not looked up in that case), and `UnknownReference`
/// when the transaction does not exist.
pub fn evaluate_transaction(
    store: &mut EntityStore,
    transaction_id: &str,
    score: i64,
) -> Result<bool, RegistryError> {
    let score = match Score::new(score) {
        Ok(score) => score,
        Err(_) => {
            debug!(transaction = transaction_id, score, "Score out of range, ignored");
            return Ok(false);
        }
    };

    let transaction = store
        .transaction_mut(transaction_id)
        .ok_or_else(|| RegistryError::unknown(EntityKind::Transaction, transaction_id))?;
    transaction.set_score(score);

    info!(transaction = transaction_id, score = score.value(), "Transaction scored");
    Ok(true)
}
