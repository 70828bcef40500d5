//! Transaction and score types
//!
//! A transaction pairs one request with one offer through a carrier. It holds
//! references only; coverage and product identity are checked once, when the
//! transaction is created.

use crate::errors::RegistryError;
use crate::ids::CarrierKey;
use serde::{Deserialize, Serialize};

/// Lowest accepted quality score
pub const MIN_SCORE: u8 = 1;
/// Highest accepted quality score
pub const MAX_SCORE: u8 = 10;

/// Quality score in the closed range 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Validate a raw score
    pub fn new(value: i64) -> Result<Self, RegistryError> {
        if value < MIN_SCORE as i64 || value > MAX_SCORE as i64 {
            return Err(RegistryError::OutOfRangeScore { score: value });
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = RegistryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

/// A carrier-mediated pairing of one request and one offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub carrier: CarrierKey,
    pub request_id: String,
    pub offer_id: String,
    pub score: Option<Score>,
}

impl Transaction {
    /// Create an unscored transaction
    pub fn new(
        transaction_id: impl Into<String>,
        carrier: CarrierKey,
        request_id: impl Into<String>,
        offer_id: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            carrier,
            request_id: request_id.into(),
            offer_id: offer_id.into(),
            score: None,
        }
    }

    /// Set or replace the score. No history is kept.
    pub fn set_score(&mut self, score: Score) {
        self.score = Some(score);
    }

    /// Raw score, 0 when unset
    pub fn score_value(&self) -> u8 {
        self.score.map_or(0, |s| s.value())
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}
