//! Matching Engine Service
//!
//! In-memory logistics-matching registry: regions and places, carriers
//! authorized for sets of regions, buyer requests, seller offers, and the
//! transactions pairing a request with an offer through a qualified carrier.
//!
//! **Key Invariants:**
//! - Request and offer ids are unique; places are unique system-wide
//! - A request or offer is bound by at most one transaction
//! - A transaction's request and offer carry the same product
//! - The carrier serves the regions of both the offer and request places
//! - Failed calls leave no partial state
//!
//! ```text
//! registration ──► store ◄── matching / scoring
//!                    │
//!                 reports
//! ```

pub mod config;
pub mod store;
pub mod registration;
pub mod matching;
pub mod scoring;
pub mod reports;
pub mod events;
pub mod engine;

pub use config::{NamePolicy, RegistryConfig};
pub use engine::{SharedTransactionManager, TransactionManager};
pub use events::{RegistryEvent, SequencedEvent};
pub use reports::{CarrierScoreReport, DeliveryRegionReport, ProductCountReport};
