//! Registry configuration

use serde::{Deserialize, Serialize};

/// What to do when an entity is registered under a name already in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Replace the existing entry; the old instance stays reachable through
    /// references already held elsewhere.
    Overwrite,
    /// Fail with `DuplicateIdentifier`.
    Reject,
}

/// Configuration for the transaction manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Collision policy for region and carrier names.
    pub name_collision: NamePolicy,
    /// Collision policy for transaction ids.
    pub transaction_id_collision: NamePolicy,
    /// Maximum number of registry events retained in the journal.
    pub journal_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name_collision: NamePolicy::Overwrite,
            transaction_id_collision: NamePolicy::Reject,
            journal_capacity: 10_000,
        }
    }
}

impl RegistryConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
