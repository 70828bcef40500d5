//! Error types for the registry
//!
//! Every variant is a local, caller-recoverable "invalid operation". A failed
//! call never leaves partial state behind.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which entity collection an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Region,
    Place,
    Carrier,
    Request,
    Offer,
    Transaction,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Region => "region",
            EntityKind::Place => "place",
            EntityKind::Carrier => "carrier",
            EntityKind::Request => "request",
            EntityKind::Offer => "offer",
            EntityKind::Transaction => "transaction",
        };
        f.write_str(label)
    }
}

/// Registry error taxonomy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate {kind} identifier: {id}")]
    DuplicateIdentifier { kind: EntityKind, id: String },

    #[error("Unknown {kind}: {id}")]
    UnknownReference { kind: EntityKind, id: String },

    #[error("Product mismatch: request wants {request_product}, offer supplies {offer_product}")]
    ProductMismatch {
        request_product: String,
        offer_product: String,
    },

    #[error("Carrier {carrier} does not serve region {region}")]
    CoverageViolation { carrier: String, region: String },

    #[error("{kind} {id} already bound to transaction {transaction}")]
    ExclusivityViolation {
        kind: EntityKind,
        id: String,
        transaction: String,
    },

    #[error("Score out of range: {score}")]
    OutOfRangeScore { score: i64 },
}

impl RegistryError {
    pub fn duplicate(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::DuplicateIdentifier { kind, id: id.into() }
    }

    pub fn unknown(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::UnknownReference { kind, id: id.into() }
    }

    /// Short machine-readable label, used in structured logs
    pub fn kind_label(&self) -> &'static str {
        match self {
            RegistryError::DuplicateIdentifier { .. } => "duplicate_identifier",
            RegistryError::UnknownReference { .. } => "unknown_reference",
            RegistryError::ProductMismatch { .. } => "product_mismatch",
            RegistryError::CoverageViolation { .. } => "coverage_violation",
            RegistryError::ExclusivityViolation { .. } => "exclusivity_violation",
            RegistryError::OutOfRangeScore { .. } => "out_of_range_score",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_display() {
        let err = RegistryError::duplicate(EntityKind::Request, "R1");
        assert_eq!(err.to_string(), "Duplicate request identifier: R1");
    }

    #[test]
    fn test_unknown_display() {
        let err = RegistryError::unknown(EntityKind::Place, "Atlantis");
        assert_eq!(err.to_string(), "Unknown place: Atlantis");
    }

    #[test]
    fn test_coverage_violation_display() {
        let err = RegistryError::CoverageViolation {
            carrier: "FastCo".to_string(),
            region: "South".to_string(),
        };
        assert!(err.to_string().contains("FastCo"));
        assert!(err.to_string().contains("South"));
    }

    #[test]
    fn test_kind_labels_are_distinct() {
        let errors = vec![
            RegistryError::duplicate(EntityKind::Offer, "O1"),
            RegistryError::unknown(EntityKind::Offer, "O1"),
            RegistryError::ProductMismatch {
                request_product: "A".into(),
                offer_product: "B".into(),
            },
            RegistryError::CoverageViolation {
                carrier: "C".into(),
                region: "R".into(),
            },
            RegistryError::ExclusivityViolation {
                kind: EntityKind::Offer,
                id: "O1".into(),
                transaction: "T1".into(),
            },
            RegistryError::OutOfRangeScore { score: 11 },
        ];
        let mut labels: Vec<&str> = errors.iter().map(RegistryError::kind_label).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), errors.len());
    }
}
