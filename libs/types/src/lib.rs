//! Types library for the logistics-matching registry
//!
//! This library provides the entity definitions shared by the registry
//! services: geography, carriers, buyer requests, seller offers and the
//! transactions that pair them.
//!
//! # Modules
//! - `ids`: Arena keys and product identifiers
//! - `geography`: Regions and places
//! - `carrier`: Carriers and their served regions
//! - `listing`: Buyer requests and seller offers
//! - `transaction`: Transactions and bounded quality scores
//! - `errors`: Error taxonomy

pub mod ids;
pub mod geography;
pub mod carrier;
pub mod listing;
pub mod transaction;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::geography::*;
    pub use crate::carrier::*;
    pub use crate::listing::*;
    pub use crate::transaction::*;
    pub use crate::errors::*;
}
